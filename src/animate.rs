//! Frame-sweep interpolation: how a frame index becomes a parameter
//! value, a viewport, or a zoom factor.
//!
//! Every movie advances monotonically through frames `0..FRAMES` and
//! derives its per-frame state from the normalized progress alone, so
//! frames are pure functions of `(frame, FRAMES)`.

/// Normalized progress of `frame` through an animation of `frames`
/// frames.  The last frame lands exactly on 1.  A single-frame run
/// would divide by zero, so it pins to 0.
pub fn progress(frame: usize, frames: usize) -> f64 {
    if frames <= 1 {
        0.0
    } else {
        frame as f64 / (frames - 1) as f64
    }
}

/// A linear sweep between two endpoint values.
#[derive(Copy, Clone, Debug)]
pub struct Sweep {
    /// Value at progress 0.
    pub start: f64,
    /// Value at progress 1.
    pub end: f64,
}

impl Sweep {
    /// The swept value at progress `t`.  Endpoints are exact.
    pub fn at(&self, t: f64) -> f64 {
        self.start + t * (self.end - self.start)
    }
}

/// A geometric zoom law.  The factor grows exponentially with
/// progress, so the apparent zoom speed stays visually constant; it is
/// applied to viewport *widths*, never to the center.
#[derive(Copy, Clone, Debug)]
pub struct Zoom {
    /// Total magnification reached at progress 1.
    pub total: f64,
}

impl Zoom {
    /// The zoom factor at progress `t`: `total` raised to `t`.
    pub fn factor_at(&self, t: f64) -> f64 {
        self.total.powf(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_frame_sweep_hits_both_endpoints_exactly() {
        let sweep = Sweep {
            start: 2.0,
            end: 4.0,
        };
        assert_eq!(sweep.at(progress(0, 2)), 2.0);
        assert_eq!(sweep.at(progress(1, 2)), 4.0);
    }

    #[test]
    fn single_frame_runs_pin_progress_to_zero() {
        assert_eq!(progress(0, 1), 0.0);
        assert_eq!(progress(0, 0), 0.0);
    }

    #[test]
    fn progress_is_monotonic() {
        let mut last = -1.0;
        for frame in 0..600 {
            let t = progress(frame, 600);
            assert!(t > last);
            last = t;
        }
        assert_eq!(last, 1.0);
    }

    #[test]
    fn zoom_interpolation_is_geometric() {
        let zoom = Zoom { total: 100.0 };
        assert_eq!(zoom.factor_at(progress(0, 3)), 1.0);
        assert_eq!(zoom.factor_at(progress(1, 3)), 10.0);
        assert_eq!(zoom.factor_at(progress(2, 3)), 100.0);
    }
}
