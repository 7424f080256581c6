pub mod composite_pass;
pub mod context;
pub mod scene_pass;
pub mod target;
pub mod upscaler;

pub use composite_pass::EdgeComposite;
pub use context::GpuContext;
pub use scene_pass::CubeScene;
pub use target::{DepthTexture, RenderTarget};
pub use upscaler::{Overrides, RenderOverride, SceneDrawOverride, Upscaler};
