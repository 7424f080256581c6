use wgpu::{Device, Instance, Queue};

pub struct GpuContext {
    pub instance: Instance,
    pub device: Device,
    pub queue: Queue,
}

impl GpuContext {
    /// Create a headless GPU context (no surface). Used by the integration
    /// tests; the surface-aware context is built by `upscaler-app`.
    ///
    /// Returns an error when the machine has no usable adapter so callers
    /// (tests in particular) can skip instead of panicking.
    pub async fn new_headless() -> Result<Self, String> {
        let instance = Instance::default();

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| "no suitable GPU adapter found".to_string())?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("upscaler-gpu device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| format!("failed to create GPU device: {e}"))?;

        Ok(Self {
            instance,
            device,
            queue,
        })
    }
}
