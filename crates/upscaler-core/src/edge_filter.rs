//! CPU reference implementation of the composite fragment filter.
//!
//! Mirrors `upscaler-gpu/shaders/composite.wgsl` exactly so the filter's
//! behavior can be pinned down in unit tests without a GPU. Any change here
//! must be made to the WGSL as well, and vice versa.

use glam::{Vec3, Vec4};

/// Lower edge of the color-difference ramp; differences below this leave
/// `edge_strength` at its per-neighbor maximum of 1.
pub const EDGE_LO: f32 = 0.1;
/// Upper edge of the ramp; differences above this contribute 0.
pub const EDGE_HI: f32 = 0.3;
/// Blend weight between the sampled color and the enhanced color.
pub const BLEND: f32 = 0.5;

/// GLSL/WGSL `smoothstep`: Hermite ramp from 0 at `e0` to 1 at `e1`.
pub fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Summed flatness response over the four axis-aligned neighbors, clamped to
/// [0, 1]. Evaluates to 1.0 in flat regions and drops toward 0 across color
/// discontinuities.
pub fn edge_strength(center: Vec3, up: Vec3, down: Vec3, left: Vec3, right: Vec3) -> f32 {
    let mut s = 0.0;
    for neighbor in [up, down, left, right] {
        s += 1.0 - smoothstep(EDGE_LO, EDGE_HI, (center - neighbor).length());
    }
    s.clamp(0.0, 1.0)
}

/// The 50%-blended screen-composite sharpening operator. Alpha passes
/// through unchanged. With `edge_strength == 1.0` this is the identity.
pub fn enhance(center: Vec4, edge_strength: f32) -> Vec4 {
    let rgb = center.truncate();
    let screened = Vec3::ONE - (Vec3::ONE - rgb) * edge_strength;
    let out = rgb.lerp(screened, BLEND);
    out.extend(center.w)
}

/// Full per-pixel filter: neighbors in, enhanced color out.
pub fn filter_pixel(center: Vec4, up: Vec4, down: Vec4, left: Vec4, right: Vec4) -> Vec4 {
    let strength = edge_strength(
        center.truncate(),
        up.truncate(),
        down.truncate(),
        left.truncate(),
        right.truncate(),
    );
    enhance(center, strength)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(r: f32, g: f32, b: f32) -> Vec4 {
        Vec4::new(r, g, b, 1.0)
    }

    #[test]
    fn smoothstep_endpoints() {
        assert_eq!(smoothstep(0.1, 0.3, 0.0), 0.0);
        assert_eq!(smoothstep(0.1, 0.3, 0.1), 0.0);
        assert_eq!(smoothstep(0.1, 0.3, 0.3), 1.0);
        assert_eq!(smoothstep(0.1, 0.3, 1.0), 1.0);
        assert!((smoothstep(0.1, 0.3, 0.2) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn uniform_region_is_identity() {
        // All five samples equal: edge_strength saturates at 1.0 and the
        // blend collapses to the input color.
        let c = rgba(0.2, 0.7, 0.4);
        let g = c.truncate();
        assert_eq!(edge_strength(g, g, g, g, g), 1.0);

        let out = filter_pixel(c, c, c, c, c);
        assert!((out - c).length() < 1e-6);
    }

    #[test]
    fn uniform_region_identity_across_gamut() {
        for &v in &[0.0f32, 0.25, 0.5, 0.75, 1.0] {
            let c = rgba(v, 1.0 - v, v * 0.5);
            let out = filter_pixel(c, c, c, c, c);
            assert!((out - c).length() < 1e-6, "not identity at {v}");
        }
    }

    #[test]
    fn checkerboard_step_brightens_toward_white() {
        // Black pixel surrounded by white: every neighbor difference is
        // sqrt(3) > EDGE_HI, so edge_strength is 0 and the output is pulled
        // halfway to white.
        let black = rgba(0.0, 0.0, 0.0);
        let white = rgba(1.0, 1.0, 1.0);
        assert_eq!(
            edge_strength(
                black.truncate(),
                white.truncate(),
                white.truncate(),
                white.truncate(),
                white.truncate()
            ),
            0.0
        );

        let out = filter_pixel(black, white, white, white, white);
        assert!((out.x - 0.5).abs() < 1e-6);
        assert!((out.y - 0.5).abs() < 1e-6);
        assert!((out.z - 0.5).abs() < 1e-6);
    }

    #[test]
    fn single_flat_neighbor_saturates_the_clamp() {
        // The sum of four per-neighbor responses clamps to 1, so any pixel
        // with at least one flat neighbor stays untouched no matter how
        // strong the other discontinuities are.
        let green = rgba(0.0, 1.0, 0.0);
        let black = rgba(0.0, 0.0, 0.0);
        let out = filter_pixel(green, black, black, black, green);
        assert!((out - green).length() < 1e-6);
    }

    #[test]
    fn mid_ramp_step_brightens_relative_to_flat_baseline() {
        // All four neighbors at color distance 0.25 (inside the 0.1..0.3
        // ramp): edge_strength lands strictly between 0 and 1 and the output
        // is pulled toward the screened color — brighter than the input.
        let c = rgba(0.5, 0.5, 0.5);
        let n = rgba(0.75, 0.5, 0.5);
        let flat = filter_pixel(c, c, c, c, c);
        let edgy = filter_pixel(c, n, n, n, n);

        let strength = edge_strength(
            c.truncate(),
            n.truncate(),
            n.truncate(),
            n.truncate(),
            n.truncate(),
        );
        assert!(strength > 0.0 && strength < 1.0);
        assert!((edgy - flat).length() > 1e-3);
        assert!(edgy.x > flat.x && edgy.y > flat.y && edgy.z > flat.z);
    }

    #[test]
    fn small_differences_stay_flat() {
        // Neighbor deltas under EDGE_LO must not trigger enhancement.
        let c = rgba(0.50, 0.50, 0.50);
        let near = rgba(0.55, 0.50, 0.50);
        let out = filter_pixel(c, near, near, near, near);
        assert!((out - c).length() < 1e-6);
    }

    #[test]
    fn alpha_passes_through() {
        let c = Vec4::new(0.1, 0.2, 0.3, 0.42);
        let white = rgba(1.0, 1.0, 1.0);
        let out = filter_pixel(c, white, white, white, white);
        assert_eq!(out.w, 0.42);
    }
}
