use upscaler_core::{high_res_extent, low_res_extent, OptionsError, UpscalerOptions};
use wgpu::Device;

use crate::composite_pass::{CompositeUniforms, EdgeComposite};
use crate::scene_pass::CubeScene;
use crate::target::{DepthTexture, RenderTarget};

// ---------------------------------------------------------------------------
// Override strategies
// ---------------------------------------------------------------------------

/// Replaces construction of the default composite resources.
///
/// When installed, [`Upscaler::init_shaders`] calls `rebuild` instead of
/// building the fullscreen-quad pipeline; the implementor owns whatever it
/// draws with. Usually paired with a [`RenderOverride`], since the default
/// composite draw has nothing to execute without its own resources.
pub trait SceneDrawOverride {
    fn rebuild(&mut self, device: &Device, surface_format: wgpu::TextureFormat);
}

/// Replaces the default composite draw into the surface.
///
/// `source` is the low-resolution color view the scene pass just rendered;
/// `dest` is the surface view for this frame.
pub trait RenderOverride {
    fn draw(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        source: &wgpu::TextureView,
        dest: &wgpu::TextureView,
    );
}

/// Optional strategies injected at construction. Both default to the
/// built-in edge-enhancing composite.
#[derive(Default)]
pub struct Overrides {
    pub scene_draw: Option<Box<dyn SceneDrawOverride>>,
    pub render: Option<Box<dyn RenderOverride>>,
}

// ---------------------------------------------------------------------------
// Frame plan — the pass sequence as plain data
// ---------------------------------------------------------------------------

/// What `render()` will record for one frame. Computed before any GPU call
/// so the pipeline shape is checkable without a device: two invocations with
/// unchanged state must produce equal plans.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FramePlan {
    pub scene_target: (u32, u32),
    pub composite: CompositeStep,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CompositeStep {
    EdgeEnhance {
        resolution: [f32; 2],
        edge_enabled: bool,
    },
    Overridden,
}

pub(crate) fn plan_frame(
    low_size: (u32, u32),
    render_overridden: bool,
    edge_enabled: bool,
) -> FramePlan {
    let composite = if render_overridden {
        CompositeStep::Overridden
    } else {
        CompositeStep::EdgeEnhance {
            resolution: [low_size.0 as f32, low_size.1 as f32],
            edge_enabled,
        }
    };
    FramePlan {
        scene_target: low_size,
        composite,
    }
}

// ---------------------------------------------------------------------------
// Upscaler
// ---------------------------------------------------------------------------

/// Two-pass upscaling pipeline: render the scene at reduced resolution, then
/// stretch it over the surface through the edge-enhancement filter.
///
/// Exactly one low-resolution target and one composite pipeline are current
/// at a time. On resize the caller must run [`init_render_targets`] then
/// [`init_shaders`] before the next [`render`]; skipping either leaves
/// stale-size resources behind (visual distortion, not a crash).
///
/// [`init_render_targets`]: Upscaler::init_render_targets
/// [`init_shaders`]: Upscaler::init_shaders
/// [`render`]: Upscaler::render
pub struct Upscaler {
    options: UpscalerOptions,
    surface_format: wgpu::TextureFormat,
    surface_size: (u32, u32),

    low_res: RenderTarget,
    // Allocated at the upscaled size for sizing parity with the output; the
    // composite pass currently draws straight to the surface instead.
    high_res: RenderTarget,
    depth: DepthTexture,

    composite: Option<EdgeComposite>,
    scene_draw_override: Option<Box<dyn SceneDrawOverride>>,
    render_override: Option<Box<dyn RenderOverride>>,
}

impl Upscaler {
    /// Validate options and build all GPU resources. Construction runs the
    /// full target + shader init, leaving the pipeline ready to render.
    pub fn new(
        device: &Device,
        surface_format: wgpu::TextureFormat,
        surface_size: (u32, u32),
        options: UpscalerOptions,
        overrides: Overrides,
    ) -> Result<Self, OptionsError> {
        options.validate()?;

        let low_size = low_res_extent(surface_size, options.scale_factor);
        let high_size = high_res_extent(low_size, options.scale_factor);
        log::info!(
            "Upscaler targets: low {}×{}, high {}×{} (scale {})",
            low_size.0,
            low_size.1,
            high_size.0,
            high_size.1,
            options.scale_factor
        );

        let mut upscaler = Self {
            options,
            surface_format,
            surface_size,
            low_res: RenderTarget::new(device, "low_res_target", low_size.0, low_size.1),
            high_res: RenderTarget::new(device, "high_res_target", high_size.0, high_size.1),
            depth: DepthTexture::new(device, "scene_depth", low_size.0, low_size.1),
            composite: None,
            scene_draw_override: overrides.scene_draw,
            render_override: overrides.render,
        };
        upscaler.init_shaders(device);
        Ok(upscaler)
    }

    /// Reallocate both render targets (and the depth buffer) for a new
    /// surface size. The previous targets are dropped here, releasing their
    /// GPU memory before the replacements are installed.
    pub fn init_render_targets(&mut self, device: &Device, surface_size: (u32, u32)) {
        self.surface_size = surface_size;
        let low_size = low_res_extent(surface_size, self.options.scale_factor);
        let high_size = high_res_extent(low_size, self.options.scale_factor);

        self.low_res = RenderTarget::new(device, "low_res_target", low_size.0, low_size.1);
        self.high_res = RenderTarget::new(device, "high_res_target", high_size.0, high_size.1);
        self.depth = DepthTexture::new(device, "scene_depth", low_size.0, low_size.1);

        log::debug!("render targets rebuilt: low {}×{}", low_size.0, low_size.1);
    }

    /// Rebuild the composite pipeline, or hand resource construction to the
    /// scene-draw override when one is installed (the default quad pipeline
    /// is then never built).
    pub fn init_shaders(&mut self, device: &Device) {
        if let Some(hook) = self.scene_draw_override.as_mut() {
            self.composite = None;
            hook.rebuild(device, self.surface_format);
        } else {
            self.composite = Some(EdgeComposite::new(
                device,
                self.surface_format,
                self.surface_size,
                self.options.use_edge_detection,
            ));
        }
    }

    /// Produce one composited frame: scene into the low-res target, then the
    /// composite (or the render override) onto `surface_view`. Exactly two
    /// passes are recorded per call.
    pub fn render(
        &mut self,
        device: &Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        scene: &CubeScene,
        surface_view: &wgpu::TextureView,
    ) {
        let plan = plan_frame(
            self.low_res.size(),
            self.render_override.is_some(),
            self.options.use_edge_detection,
        );

        log::trace!("frame: scene pass at {:?}", plan.scene_target);

        // Pass 1: scene at reduced resolution.
        scene.draw(encoder, &self.low_res.view, &self.depth.view);

        // Pass 2: composite to the surface.
        match plan.composite {
            CompositeStep::Overridden => {
                if let Some(hook) = self.render_override.as_mut() {
                    hook.draw(encoder, &self.low_res.view, surface_view);
                }
            }
            CompositeStep::EdgeEnhance {
                resolution,
                edge_enabled,
            } => match &self.composite {
                Some(composite) => composite.draw(
                    device,
                    queue,
                    encoder,
                    &self.low_res.view,
                    surface_view,
                    CompositeUniforms {
                        resolution,
                        edge_enabled: edge_enabled as u32,
                        _pad: 0,
                    },
                ),
                // Scene-draw override without a render override: nothing can
                // draw the second pass.
                None => log::warn!("no composite resources and no render override; frame dropped"),
            },
        }
    }

    /// True while the built-in fullscreen-quad composite is current (no
    /// scene-draw override installed).
    pub fn uses_default_composite(&self) -> bool {
        self.composite.is_some()
    }

    pub fn options(&self) -> &UpscalerOptions {
        &self.options
    }

    /// Current low-resolution target size in pixels.
    pub fn low_res_size(&self) -> (u32, u32) {
        self.low_res.size()
    }

    /// Current high-resolution target size in pixels.
    pub fn high_res_size(&self) -> (u32, u32) {
        self.high_res.size()
    }
}

// ---------------------------------------------------------------------------
