use std::sync::Arc;
use std::time::Instant;

use upscaler_core::camera::Camera;
use upscaler_core::{CubeSpin, UpscalerOptions};
use upscaler_gpu::{CubeScene, Overrides, Upscaler};
use winit::window::Window;

// ---------------------------------------------------------------------------
// Simple FPS counter — logs to console once per second
// ---------------------------------------------------------------------------

struct FpsCounter {
    frames: u32,
    last_report: Instant,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frames: 0,
            last_report: Instant::now(),
        }
    }

    /// Increment the frame count. Returns the FPS value if a full second has
    /// elapsed since the last report (so the caller can log it).
    fn tick(&mut self) -> Option<f32> {
        self.frames += 1;
        let elapsed = self.last_report.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            let fps = self.frames as f32 / elapsed;
            self.frames = 0;
            self.last_report = Instant::now();
            Some(fps)
        } else {
            None
        }
    }
}

// ---------------------------------------------------------------------------
// App — owns the surface, the demo scene, and the upscaling pipeline
// ---------------------------------------------------------------------------

pub struct App {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface_config: wgpu::SurfaceConfiguration,

    camera: Camera,
    spin: CubeSpin,
    scene: CubeScene,
    upscaler: Upscaler,

    fps: FpsCounter,
}

impl App {
    /// Initialise wgpu for a given window. The window is wrapped in `Arc` so
    /// that the surface can safely hold a `'static` reference to it.
    pub fn new(window: Arc<Window>) -> Self {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);

        // ---- Instance -------------------------------------------------------
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // ---- Surface --------------------------------------------------------
        let surface = instance
            .create_surface(Arc::clone(&window))
            .expect("failed to create wgpu surface");

        // ---- Adapter --------------------------------------------------------
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("no suitable GPU adapter found");

        log::info!("GPU adapter: {}", adapter.get_info().name);

        // ---- Device & Queue -------------------------------------------------
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("upscaler-app device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("failed to create GPU device");

        // ---- Surface configuration ------------------------------------------
        let surface_caps = surface.get_capabilities(&adapter);

        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        surface.configure(&device, &surface_config);
        log::info!(
            "Surface configured: {}×{} {:?} Fifo",
            surface_config.width,
            surface_config.height,
            format
        );

        // ---- Scene + upscaling pipeline --------------------------------------
        let camera = Camera::new(width, height);
        let scene = CubeScene::new(&device);
        let upscaler = Upscaler::new(
            &device,
            format,
            (width, height),
            UpscalerOptions {
                scale_factor: 1.25,
                use_edge_detection: true,
            },
            Overrides::default(),
        )
        .expect("upscaler options are valid");

        Self {
            surface,
            device,
            queue,
            surface_config,
            camera,
            spin: CubeSpin::default(),
            scene,
            upscaler,
            fps: FpsCounter::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Resize
    // -------------------------------------------------------------------------

    /// Reconfigure the surface, update the camera, and rebuild the size-
    /// dependent upscaler resources: targets first, then shaders. Zero-sized
    /// events (minimize) are ignored.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            return;
        }
        self.surface_config.width = new_width;
        self.surface_config.height = new_height;
        self.surface.configure(&self.device, &self.surface_config);

        self.camera.set_aspect(new_width, new_height);
        self.upscaler
            .init_render_targets(&self.device, (new_width, new_height));
        self.upscaler.init_shaders(&self.device);

        log::debug!("Surface resized to {}×{}", new_width, new_height);
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Run one frame: advance the cube spin, upload the MVP, and let the
    /// upscaler record its two passes.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.spin.tick();

        if let Some(fps) = self.fps.tick() {
            let (lw, lh) = self.upscaler.low_res_size();
            log::debug!(
                "FPS: {fps:.1}  scene target: {lw}×{lh}  scale: {}",
                self.upscaler.options().scale_factor
            );
        }

        self.scene
            .update(&self.queue, self.camera.view_proj(), &self.spin);

        let output = self.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        self.upscaler
            .render(&self.device, &self.queue, &mut encoder, &self.scene, &surface_view);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
