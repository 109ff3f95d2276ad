//! Scalar helpers:
//! - lerp_f32 (linear blend)
//! - quadratic/cubic ease curves on normalized progress
//! - bezier_ease_t (cubic-bezier timing, x inverted by bisection)

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn ease_in_quad(p: f32) -> f32 {
    p * p
}

#[inline]
pub fn ease_out_quad(p: f32) -> f32 {
    1.0 - (1.0 - p) * (1.0 - p)
}

/// Symmetric quadratic ease: `2p²` up to the midpoint, mirrored decay after.
#[inline]
pub fn ease_in_out_quad(p: f32) -> f32 {
    if p < 0.5 {
        2.0 * p * p
    } else {
        let k = -2.0 * p + 2.0;
        1.0 - k * k / 2.0
    }
}

#[inline]
pub fn ease_in_out_cubic(p: f32) -> f32 {
    if p < 0.5 {
        4.0 * p * p * p
    } else {
        let k = -2.0 * p + 2.0;
        1.0 - k * k * k / 2.0
    }
}

/// One axis of a cubic bezier anchored at 0 and 1, with inner control
/// values `c1`, `c2`, evaluated at curve parameter `s`.
#[inline]
fn bezier_axis(c1: f32, c2: f32, s: f32) -> f32 {
    let inv = 1.0 - s;
    3.0 * inv * s * (inv * c1 + s * c2) + s * s * s
}

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing: find the curve parameter
/// whose x equals `p` by bisection, then return its y. Control x values are
/// expected in `[0, 1]` so x is monotonic.
pub fn bezier_ease_t(p: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    if x1 == y1 && x2 == y2 {
        // control points on the diagonal
        return p;
    }
    let (mut low, mut high) = (0.0_f32, 1.0_f32);
    let mut s = p;
    for _ in 0..32 {
        let err = bezier_axis(x1, x2, s) - p;
        if err.abs() <= 1e-6 {
            break;
        }
        if err > 0.0 {
            high = s;
        } else {
            low = s;
        }
        s = (low + high) * 0.5;
    }
    bezier_axis(y1, y2, s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_in_out_quad_midpoint_is_fixed() {
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(0.25), 0.125);
        assert_eq!(ease_in_out_quad(0.75), 0.875);
    }

    #[test]
    fn bezier_linear_fast_path() {
        assert_eq!(bezier_ease_t(0.3, 0.0, 0.0, 1.0, 1.0), 0.3);
    }

    #[test]
    fn symmetric_bezier_passes_through_midpoint() {
        let y = bezier_ease_t(0.5, 0.42, 0.0, 0.58, 1.0);
        assert!((y - 0.5).abs() < 1e-3, "y={y}");
    }
}
