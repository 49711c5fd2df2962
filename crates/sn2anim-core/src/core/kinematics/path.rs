use crate::core::utils::clamp_unit;

/// Normalized progress of the transition state.
pub const TRANSITION_T: f64 = 0.5;

/// A piecewise-linear coordinate with one affine segment before the transition state and one
/// after it. Both segments meet at `transition` when `t == TRANSITION_T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Waypoints {
    /// Value at `t = 0` (reactants).
    pub start: f64,
    /// Value at `t = 0.5` (transition state).
    pub transition: f64,
    /// Value at `t = 1` (products).
    pub end: f64,
}

impl Waypoints {
    pub const fn new(start: f64, transition: f64, end: f64) -> Self {
        Self {
            start,
            transition,
            end,
        }
    }

    /// Slope of the segment on `[0, 0.5]`.
    #[inline]
    pub fn approach_slope(&self) -> f64 {
        (self.transition - self.start) / TRANSITION_T
    }

    /// Slope of the segment on `[0.5, 1]`.
    #[inline]
    pub fn departure_slope(&self) -> f64 {
        (self.end - self.transition) / (1.0 - TRANSITION_T)
    }

    /// Evaluates the path at `t`, clamping `t` into `[0, 1]`.
    pub fn at(&self, t: f64) -> f64 {
        let t = clamp_unit(t);
        if t <= TRANSITION_T {
            self.start + self.approach_slope() * t
        } else {
            self.transition + self.departure_slope() * (t - TRANSITION_T)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NU: Waypoints = Waypoints::new(-200.0, -96.0, -60.0);
    const LG: Waypoints = Waypoints::new(75.0, 108.0, 200.0);

    #[test]
    fn path_hits_all_three_waypoints_exactly() {
        for path in [NU, LG] {
            assert_eq!(path.at(0.0), path.start);
            assert_eq!(path.at(TRANSITION_T), path.transition);
            assert_eq!(path.at(1.0), path.end);
        }
    }

    #[test]
    fn slopes_match_reference_paths() {
        assert_eq!(NU.approach_slope(), 208.0);
        assert_eq!(NU.departure_slope(), 72.0);
        assert_eq!(LG.approach_slope(), 66.0);
        assert_eq!(LG.departure_slope(), 184.0);
    }

    #[test]
    fn segments_join_without_a_jump_at_transition_state() {
        for path in [NU, LG] {
            let left_limit = path.start + path.approach_slope() * TRANSITION_T;
            let right_limit = path.transition + path.departure_slope() * 0.0;
            assert!((left_limit - right_limit).abs() <= f64::EPSILON * left_limit.abs());

            let just_after = path.at(TRANSITION_T + 1e-12);
            assert!((just_after - path.transition).abs() < 1e-9);
        }
    }

    #[test]
    fn each_segment_is_affine() {
        let a = NU.at(0.1);
        let b = NU.at(0.2);
        let c = NU.at(0.3);
        assert!(((b - a) - (c - b)).abs() < 1e-9);

        let d = LG.at(0.6);
        let e = LG.at(0.7);
        let f = LG.at(0.8);
        assert!(((e - d) - (f - e)).abs() < 1e-9);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        assert_eq!(NU.at(-1.0), NU.start);
        assert_eq!(NU.at(2.0), NU.end);
        assert_eq!(LG.at(f64::NAN), LG.start);
    }

    #[test]
    fn evaluation_is_idempotent() {
        for i in 0..=1000 {
            let t = f64::from(i) / 1000.0;
            assert_eq!(NU.at(t).to_bits(), NU.at(t).to_bits());
        }
    }
}
