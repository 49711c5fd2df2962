use super::DisplayToggles;
use crate::core::kinematics::TRANSITION_T;
use crate::core::utils::clamp_unit;
use serde::Serialize;

/// The attack arrow fades out linearly and is gone after this progress.
pub const ATTACK_ARROW_END: f64 = 0.45;
/// Open window of the leaving-group arrow.
pub const LEAVING_ARROW_WINDOW: (f64, f64) = (0.3, 0.7);
/// Width of the fade-in/fade-out margin at each end of the leaving-arrow window.
pub const LEAVING_ARROW_FADE: f64 = 0.05;
/// Half-width of the transition-state bracket window around `t = 0.5`.
pub const BRACKET_HALF_WIDTH: f64 = 0.1;
/// Orbital lobes vanish once `|t − 0.5|` reaches `1 / ORBITAL_TENT_SLOPE`.
pub const ORBITAL_TENT_SLOPE: f64 = 4.0;
/// Open progress window (0..100) in which the transition-state badge is shown.
pub const BADGE_PROGRESS_WINDOW: (f64, f64) = (45.0, 55.0);
/// Energies above this (kJ/mol) are flagged as high-energy.
pub const HIGH_ENERGY_THRESHOLD: f64 = 100.0;

/// Transient, progress-dependent decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationKind {
    /// Curved arrow from the nucleophile's lone pair to the central carbon.
    AttackArrow,
    /// Curved arrow from the breaking C–LG bond onto the leaving group.
    LeavingArrow,
    /// Dashed bracket around the pentavalent transition state with its labels.
    TransitionStateBracket,
    /// Pair of p-orbital lobes on the central carbon.
    OrbitalLobes,
}

/// Drawing pass an annotation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnnotationLayer {
    /// Drawn before bonds and atoms.
    Underlay,
    /// Drawn after all atoms.
    Overlay,
}

impl AnnotationKind {
    /// Draw order within a frame: underlays first, then overlays.
    pub const ALL: [AnnotationKind; 4] = [
        AnnotationKind::OrbitalLobes,
        AnnotationKind::TransitionStateBracket,
        AnnotationKind::AttackArrow,
        AnnotationKind::LeavingArrow,
    ];

    pub fn layer(self) -> AnnotationLayer {
        match self {
            AnnotationKind::OrbitalLobes | AnnotationKind::TransitionStateBracket => {
                AnnotationLayer::Underlay
            }
            AnnotationKind::AttackArrow | AnnotationKind::LeavingArrow => AnnotationLayer::Overlay,
        }
    }

    /// Opacity at `t`, or `None` when the annotation is not shown.
    pub fn opacity(self, t: f64, toggles: DisplayToggles) -> Option<f64> {
        match self {
            AnnotationKind::AttackArrow => attack_arrow_opacity(t, toggles),
            AnnotationKind::LeavingArrow => leaving_arrow_opacity(t, toggles),
            AnnotationKind::TransitionStateBracket => bracket_opacity(t),
            AnnotationKind::OrbitalLobes => orbital_opacity(t, toggles),
        }
    }
}

pub fn attack_arrow_opacity(t: f64, toggles: DisplayToggles) -> Option<f64> {
    let t = clamp_unit(t);
    (toggles.show_arrows && t <= ATTACK_ARROW_END).then(|| 1.0 - t / ATTACK_ARROW_END)
}

pub fn leaving_arrow_opacity(t: f64, toggles: DisplayToggles) -> Option<f64> {
    let t = clamp_unit(t);
    let (open, close) = LEAVING_ARROW_WINDOW;
    if !toggles.show_arrows || t <= open || t >= close {
        return None;
    }
    let opacity = if t < open + LEAVING_ARROW_FADE {
        (t - open) / LEAVING_ARROW_FADE
    } else if t > close - LEAVING_ARROW_FADE {
        (close - t) / LEAVING_ARROW_FADE
    } else {
        1.0
    };
    Some(opacity)
}

pub fn bracket_opacity(t: f64) -> Option<f64> {
    let offset = (clamp_unit(t) - TRANSITION_T).abs();
    (offset <= BRACKET_HALF_WIDTH).then(|| 1.0 - offset / BRACKET_HALF_WIDTH)
}

pub fn orbital_opacity(t: f64, toggles: DisplayToggles) -> Option<f64> {
    if !toggles.show_distances {
        return None;
    }
    let opacity = (1.0 - ORBITAL_TENT_SLOPE * (clamp_unit(t) - TRANSITION_T).abs()).max(0.0);
    (opacity > 0.0).then_some(opacity)
}

/// One annotation that is shown at the evaluated `t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnnotationVisibility {
    pub kind: AnnotationKind,
    pub layer: AnnotationLayer,
    pub opacity: f64,
}

/// All annotations shown at `t`, in draw order.
pub fn evaluate_annotations(t: f64, toggles: DisplayToggles) -> Vec<AnnotationVisibility> {
    AnnotationKind::ALL
        .into_iter()
        .filter_map(|kind| {
            kind.opacity(t, toggles).map(|opacity| AnnotationVisibility {
                kind,
                layer: kind.layer(),
                opacity,
            })
        })
        .collect()
}

/// Whether the "transition state" badge is shown for a progress value in `0..=100`.
#[inline]
pub fn transition_state_badge_visible(progress: f64) -> bool {
    let (low, high) = BADGE_PROGRESS_WINDOW;
    progress > low && progress < high
}

#[inline]
pub fn is_high_energy(energy: f64) -> bool {
    energy > HIGH_ENERGY_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    const ALL_ON: DisplayToggles = DisplayToggles {
        show_arrows: true,
        show_distances: true,
    };
    const ALL_OFF: DisplayToggles = DisplayToggles {
        show_arrows: false,
        show_distances: false,
    };

    #[test]
    fn attack_arrow_fades_out_over_its_window() {
        assert_eq!(attack_arrow_opacity(0.0, ALL_ON), Some(1.0));
        assert!(f64_approx_equal(
            attack_arrow_opacity(0.225, ALL_ON).unwrap(),
            0.5
        ));
        assert!(f64_approx_equal(attack_arrow_opacity(0.45, ALL_ON).unwrap(), 0.0));
        assert_eq!(attack_arrow_opacity(0.46, ALL_ON), None);
    }

    #[test]
    fn arrows_require_arrow_toggle() {
        for i in 0..=100 {
            let t = f64::from(i) / 100.0;
            assert_eq!(attack_arrow_opacity(t, ALL_OFF), None);
            assert_eq!(leaving_arrow_opacity(t, ALL_OFF), None);
        }
    }

    #[test]
    fn leaving_arrow_fades_in_and_out_at_window_edges() {
        assert_eq!(leaving_arrow_opacity(0.3, ALL_ON), None);
        assert!(f64_approx_equal(
            leaving_arrow_opacity(0.325, ALL_ON).unwrap(),
            0.5
        ));
        assert_eq!(leaving_arrow_opacity(0.5, ALL_ON), Some(1.0));
        assert!(f64_approx_equal(
            leaving_arrow_opacity(0.675, ALL_ON).unwrap(),
            0.5
        ));
        assert_eq!(leaving_arrow_opacity(0.7, ALL_ON), None);
    }

    #[test]
    fn bracket_is_a_narrow_tent_around_transition_state() {
        assert_eq!(bracket_opacity(0.5), Some(1.0));
        assert!(f64_approx_equal(bracket_opacity(0.45).unwrap(), 0.5));
        assert!(f64_approx_equal(bracket_opacity(0.55).unwrap(), 0.5));
        assert_eq!(bracket_opacity(0.35), None);
        assert_eq!(bracket_opacity(0.65), None);
    }

    #[test]
    fn bracket_ignores_display_toggles() {
        assert_eq!(
            AnnotationKind::TransitionStateBracket.opacity(0.5, ALL_OFF),
            Some(1.0)
        );
    }

    #[test]
    fn orbital_lobes_follow_tent_and_require_distance_toggle() {
        assert_eq!(orbital_opacity(0.5, ALL_ON), Some(1.0));
        assert!(f64_approx_equal(orbital_opacity(0.375, ALL_ON).unwrap(), 0.5));
        assert_eq!(orbital_opacity(0.2, ALL_ON), None);
        assert_eq!(orbital_opacity(0.75, ALL_ON), None);
        assert_eq!(orbital_opacity(0.5, ALL_OFF), None);
    }

    #[test]
    fn layers_put_arrows_over_atoms() {
        assert_eq!(AnnotationKind::AttackArrow.layer(), AnnotationLayer::Overlay);
        assert_eq!(AnnotationKind::LeavingArrow.layer(), AnnotationLayer::Overlay);
        assert_eq!(
            AnnotationKind::TransitionStateBracket.layer(),
            AnnotationLayer::Underlay
        );
        assert_eq!(AnnotationKind::OrbitalLobes.layer(), AnnotationLayer::Underlay);
    }

    #[test]
    fn evaluate_annotations_lists_visible_ones_underlays_first() {
        let shown = evaluate_annotations(0.5, ALL_ON);
        let kinds: Vec<AnnotationKind> = shown.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AnnotationKind::OrbitalLobes,
                AnnotationKind::TransitionStateBracket,
                AnnotationKind::LeavingArrow,
            ]
        );

        let start = evaluate_annotations(0.0, DisplayToggles::default());
        assert_eq!(start.len(), 1);
        assert_eq!(start[0].kind, AnnotationKind::AttackArrow);

        assert!(evaluate_annotations(1.0, ALL_ON).is_empty());
    }

    #[test]
    fn badge_window_is_open_on_both_ends() {
        assert!(!transition_state_badge_visible(45.0));
        assert!(transition_state_badge_visible(46.0));
        assert!(transition_state_badge_visible(50.0));
        assert!(transition_state_badge_visible(54.0));
        assert!(!transition_state_badge_visible(55.0));
    }

    #[test]
    fn high_energy_flag_is_strictly_above_threshold() {
        assert!(!is_high_energy(100.0));
        assert!(is_high_energy(110.0));
        assert!(!is_high_energy(-20.0));
    }
}
