use crate::core::kinematics::TRANSITION_T;
use crate::core::utils::clamp_unit;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ProfileError {
    #[error("Energy profile parameter '{name}' must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("Energy profile parameter '{name}' must be strictly positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
}

/// Logistic curve on `[0, 1]`, centered at the transition state and rescaled so that it is exactly
/// `0` at `t = 0`, `0.5` at `t = 0.5` and `1` at `t = 1`.
///
/// Uses the identity `σ(x) = ½ + ½·tanh(x/2)`; dividing by `tanh(k/4)` pins both endpoints.
#[inline]
pub fn anchored_logistic(t: f64, steepness: f64) -> f64 {
    let t = clamp_unit(t);
    let edge = (0.25 * steepness).tanh();
    0.5 + 0.5 * (0.5 * steepness * (t - TRANSITION_T)).tanh() / edge
}

/// Gaussian bump on `[0, 1]` centered at the transition state, shifted and rescaled so that it is
/// exactly `1` at `t = 0.5` and exactly `0` at both endpoints.
#[inline]
pub fn anchored_gaussian(t: f64, width: f64) -> f64 {
    let t = clamp_unit(t);
    let bump = |x: f64| (-(width * x).powi(2)).exp();
    let floor = bump(TRANSITION_T);
    (bump(t - TRANSITION_T) - floor) / (1.0 - floor)
}

/// Closed-form free energy (kJ/mol) along the reaction coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyProfile {
    /// Energy of the transition state relative to the reactants.
    pub activation_energy: f64,
    /// Energy of the products relative to the reactants (negative for an exergonic reaction).
    pub reaction_free_energy: f64,
    /// Steepness `k` of the thermodynamic sigmoid.
    pub steepness: f64,
    /// Width parameter `w` of the barrier Gaussian.
    pub width: f64,
}

impl EnergyProfile {
    pub const REFERENCE: Self = Self {
        activation_energy: 110.0,
        reaction_free_energy: -20.0,
        steepness: 10.0,
        width: 5.0,
    };

    pub fn new(
        activation_energy: f64,
        reaction_free_energy: f64,
        steepness: f64,
        width: f64,
    ) -> Result<Self, ProfileError> {
        for (name, value) in [
            ("activation_energy", activation_energy),
            ("reaction_free_energy", reaction_free_energy),
            ("steepness", steepness),
            ("width", width),
        ] {
            if !value.is_finite() {
                return Err(ProfileError::NonFinite { name, value });
            }
        }
        if steepness <= 0.0 {
            return Err(ProfileError::NonPositive {
                name: "steepness",
                value: steepness,
            });
        }
        if width <= 0.0 {
            return Err(ProfileError::NonPositive {
                name: "width",
                value: width,
            });
        }
        Ok(Self {
            activation_energy,
            reaction_free_energy,
            steepness,
            width,
        })
    }

    /// `ΔG(t)`: the thermodynamic contribution, from `0` to the reaction free energy.
    #[inline]
    pub fn thermodynamic(&self, t: f64) -> f64 {
        self.reaction_free_energy * anchored_logistic(t, self.steepness)
    }

    /// Peak height of the barrier, chosen so that `E(0.5)` equals the activation energy.
    #[inline]
    pub fn barrier_height(&self) -> f64 {
        self.activation_energy - self.thermodynamic(TRANSITION_T)
    }

    #[inline]
    pub fn barrier(&self, t: f64) -> f64 {
        self.barrier_height() * anchored_gaussian(t, self.width)
    }

    /// `E(t) = Barrier(t) + ΔG(t)`.
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        self.barrier(t) + self.thermodynamic(t)
    }
}

impl Default for EnergyProfile {
    fn default() -> Self {
        Self::REFERENCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn reference_profile_hits_exact_anchor_energies() {
        let profile = EnergyProfile::REFERENCE;
        assert_eq!(profile.evaluate(0.5), 110.0);
        assert_eq!(profile.evaluate(0.0), 0.0);
        assert_eq!(profile.evaluate(1.0), -20.0);
    }

    #[test]
    fn reference_barrier_height_compensates_half_the_free_energy() {
        let profile = EnergyProfile::REFERENCE;
        assert_eq!(profile.thermodynamic(0.5), -10.0);
        assert_eq!(profile.barrier_height(), 120.0);
    }

    #[test]
    fn anchored_logistic_hits_endpoints_and_midpoint() {
        for k in [1.0, 4.0, 10.0, 25.0] {
            assert_eq!(anchored_logistic(0.0, k), 0.0);
            assert_eq!(anchored_logistic(0.5, k), 0.5);
            assert_eq!(anchored_logistic(1.0, k), 1.0);
        }
    }

    #[test]
    fn anchored_logistic_is_monotonic() {
        let mut previous = anchored_logistic(0.0, 10.0);
        for i in 1..=100 {
            let value = anchored_logistic(f64::from(i) / 100.0, 10.0);
            assert!(value >= previous);
            previous = value;
        }
    }

    #[test]
    fn anchored_gaussian_peaks_at_transition_state_and_vanishes_at_ends() {
        assert_eq!(anchored_gaussian(0.5, 5.0), 1.0);
        assert_eq!(anchored_gaussian(0.0, 5.0), 0.0);
        assert_eq!(anchored_gaussian(1.0, 5.0), 0.0);
        assert!(f64_approx_equal(
            anchored_gaussian(0.3, 5.0),
            anchored_gaussian(0.7, 5.0)
        ));
    }

    #[test]
    fn anchored_curve_stays_close_to_unanchored_closed_form() {
        let profile = EnergyProfile::REFERENCE;
        for i in 0..=100 {
            let t = f64::from(i) / 100.0;
            let sigmoid = 1.0 / (1.0 + (-10.0 * (t - 0.5)).exp());
            let raw = 120.0 * (-((t - 0.5) * 5.0).powi(2)).exp() - 20.0 * sigmoid;
            assert!((profile.evaluate(t) - raw).abs() < 0.25);
        }
    }

    #[test]
    fn barrier_region_lies_far_above_both_endpoints() {
        let profile = EnergyProfile::REFERENCE;
        for i in 40..=60 {
            let energy = profile.evaluate(f64::from(i) / 100.0);
            assert!(energy > 50.0);
            assert!(energy > profile.evaluate(0.0));
            assert!(energy > profile.evaluate(1.0));
        }
    }

    #[test]
    fn custom_profile_keeps_activation_energy_exact_at_transition_state() {
        let profile = EnergyProfile::new(80.0, -30.0, 10.0, 5.0).unwrap();
        assert_eq!(profile.evaluate(0.5), 80.0);
        assert_eq!(profile.evaluate(1.0), -30.0);
    }

    #[test]
    fn new_rejects_invalid_parameters() {
        assert_eq!(
            EnergyProfile::new(110.0, -20.0, 0.0, 5.0),
            Err(ProfileError::NonPositive {
                name: "steepness",
                value: 0.0
            })
        );
        assert!(matches!(
            EnergyProfile::new(110.0, -20.0, 10.0, -1.0),
            Err(ProfileError::NonPositive { name: "width", .. })
        ));
        assert!(matches!(
            EnergyProfile::new(f64::NAN, -20.0, 10.0, 5.0),
            Err(ProfileError::NonFinite {
                name: "activation_energy",
                ..
            })
        ));
    }
}
