pub mod camera;
pub mod edge_filter;

use std::fmt;

// ---------------------------------------------------------------------------
// UpscalerOptions — immutable-after-construction plugin configuration
// ---------------------------------------------------------------------------

/// Configuration for the upscaling pipeline.
///
/// `scale_factor` divides the surface resolution to size the off-screen
/// scene target; the composite pass stretches that target back over the full
/// surface. `use_edge_detection` toggles the edge-enhancement blend in the
/// composite shader (off = plain bilinear upscale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpscalerOptions {
    pub scale_factor: f32,
    pub use_edge_detection: bool,
}

impl Default for UpscalerOptions {
    fn default() -> Self {
        Self {
            scale_factor: 2.0,
            use_edge_detection: true,
        }
    }
}

impl UpscalerOptions {
    /// Reject configurations the render-target math cannot support.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(OptionsError::InvalidScaleFactor(self.scale_factor));
        }
        Ok(())
    }
}

/// Configuration error raised before any GPU resource is touched.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionsError {
    /// `scale_factor` must be a finite value greater than zero.
    InvalidScaleFactor(f32),
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionsError::InvalidScaleFactor(v) => {
                write!(f, "scale_factor must be finite and > 0, got {v}")
            }
        }
    }
}

impl std::error::Error for OptionsError {}

// ---------------------------------------------------------------------------
// Render-target sizing
// ---------------------------------------------------------------------------

/// Size of the off-screen scene target for a given surface size, in integer
/// pixels (fractional results truncate, never below 1×1).
pub fn low_res_extent(surface: (u32, u32), scale_factor: f32) -> (u32, u32) {
    (
        ((surface.0 as f32 / scale_factor) as u32).max(1),
        ((surface.1 as f32 / scale_factor) as u32).max(1),
    )
}

/// Size of the upscaled output target: the low-resolution extent scaled back
/// up. Within one pixel of the original surface size due to truncation.
pub fn high_res_extent(low: (u32, u32), scale_factor: f32) -> (u32, u32) {
    (
        ((low.0 as f32 * scale_factor) as u32).max(1),
        ((low.1 as f32 * scale_factor) as u32).max(1),
    )
}

// ---------------------------------------------------------------------------
// CubeSpin — the demo scene's only animation state
// ---------------------------------------------------------------------------

/// Per-frame rotation increment, radians per axis.
pub const SPIN_STEP: f32 = 0.01;

/// Accumulated cube rotation, advanced once per frame (not time-scaled).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CubeSpin {
    pub x: f32,
    pub y: f32,
}

impl CubeSpin {
    pub fn tick(&mut self) {
        self.x += SPIN_STEP;
        self.y += SPIN_STEP;
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let opts = UpscalerOptions::default();
        assert_eq!(opts.scale_factor, 2.0);
        assert!(opts.use_edge_detection);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn zero_scale_factor_rejected() {
        let opts = UpscalerOptions {
            scale_factor: 0.0,
            ..Default::default()
        };
        assert_eq!(opts.validate(), Err(OptionsError::InvalidScaleFactor(0.0)));
    }

    #[test]
    fn negative_scale_factor_rejected() {
        let opts = UpscalerOptions {
            scale_factor: -1.5,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn nan_scale_factor_rejected() {
        let opts = UpscalerOptions {
            scale_factor: f32::NAN,
            ..Default::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn resize_sequence_dimensions() {
        // 800×600 → 1600×900 at scale 1.25
        assert_eq!(low_res_extent((800, 600), 1.25), (640, 480));
        assert_eq!(low_res_extent((1600, 900), 1.25), (1280, 720));
    }

    #[test]
    fn high_res_roundtrip_within_one_pixel() {
        for &scale in &[1.25f32, 1.5, 2.0, 3.0, 1.0, 0.5] {
            for &surface in &[(800u32, 600u32), (1600, 900), (1920, 1080), (333, 777)] {
                let low = low_res_extent(surface, scale);
                let high = high_res_extent(low, scale);
                let expect_w = low.0 as f32 * scale;
                let expect_h = low.1 as f32 * scale;
                assert!((high.0 as f32 - expect_w).abs() <= 1.0, "{surface:?} @ {scale}");
                assert!((high.1 as f32 - expect_h).abs() <= 1.0, "{surface:?} @ {scale}");
            }
        }
    }

    #[test]
    fn tiny_surface_never_collapses_to_zero() {
        assert_eq!(low_res_extent((1, 1), 4.0), (1, 1));
        assert_eq!(high_res_extent((1, 1), 0.25), (1, 1));
    }

    #[test]
    fn spin_advances_both_axes() {
        let mut spin = CubeSpin::default();
        spin.tick();
        spin.tick();
        assert!((spin.x - 2.0 * SPIN_STEP).abs() < 1e-6);
        assert!((spin.y - 2.0 * SPIN_STEP).abs() < 1e-6);
    }
}
