//! Easing curves applied to normalized progress before sampling.
//!
//! Interpolation itself is always axis-independent linear between two
//! bracketing keyframes; easing only remaps progress.

pub mod functions;

use serde::{Deserialize, Serialize};

use functions::{bezier_ease_t, ease_in_out_cubic, ease_in_out_quad, ease_in_quad, ease_out_quad};

/// Named easing curves. `EaseInOutQuad` is the playback default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseInQuad,
    EaseOutQuad,
    #[default]
    EaseInOutQuad,
    EaseInOutCubic,
    /// CSS-style timing curve with control points (x1, y1, x2, y2).
    CubicBezier([f32; 4]),
}

impl Easing {
    /// Map progress in [0,1] through the curve. Input is clamped first.
    #[inline]
    pub fn apply(self, p: f32) -> f32 {
        let p = p.clamp(0.0, 1.0);
        match self {
            Easing::Linear => p,
            Easing::EaseInQuad => ease_in_quad(p),
            Easing::EaseOutQuad => ease_out_quad(p),
            Easing::EaseInOutQuad => ease_in_out_quad(p),
            Easing::EaseInOutCubic => ease_in_out_cubic(p),
            Easing::CubicBezier([x1, y1, x2, y2]) => bezier_ease_t(p, x1, y1, x2, y2),
        }
    }

    /// Borrow the curve as a plain function for APIs taking `Fn(f32) -> f32`.
    #[inline]
    pub fn as_fn(self) -> impl Fn(f32) -> f32 {
        move |p| self.apply(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_curves_fix_endpoints() {
        let curves = [
            Easing::Linear,
            Easing::EaseInQuad,
            Easing::EaseOutQuad,
            Easing::EaseInOutQuad,
            Easing::EaseInOutCubic,
            Easing::CubicBezier([0.42, 0.0, 0.58, 1.0]),
        ];
        for e in curves {
            assert!(e.apply(0.0).abs() < 1e-5, "{e:?} at 0");
            assert!((e.apply(1.0) - 1.0).abs() < 1e-5, "{e:?} at 1");
        }
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::EaseInOutQuad.apply(7.0), 1.0);
    }
}
