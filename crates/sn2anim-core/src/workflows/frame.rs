use crate::core::kinematics::ReactionGeometry;
use crate::core::models::atom::{Atom, AtomRole};
use crate::core::projection::{Camera, Projection, ScreenPoint, compositing_order};
use crate::core::rules::DisplayToggles;
use crate::core::rules::annotations::{
    AnnotationKind, AnnotationLayer, evaluate_annotations, transition_state_badge_visible,
};
use crate::core::rules::bonds::{BondKind, BondLabel, BondState, bond_states};
use crate::core::rules::charges::{ChargeBadge, charge_marker};
use crate::core::utils::{clamp_finite, clamp_unit};
use crate::core::utils::geometry::midpoint_z;
use crate::engine::state::{MAX_PROGRESS, MIN_PROGRESS};
use serde::Serialize;

/// Screen offsets below a bond midpoint for its label.
const DISTANCE_LABEL_OFFSET_Y: f64 = 24.0;
const BOND_ORDER_LABEL_OFFSET_Y: f64 = 50.0;

const ATTACK_ARROW_START_LIFT: f64 = 25.0;
const ARROW_CONTROL_LIFT: f64 = 70.0;
const ATTACK_ARROW_END_GAP: f64 = 15.0;
/// Leaving-arrow end point, in multiples of the projected leaving-group radius.
const LEAVING_ARROW_END_FACTORS: (f64, f64) = (0.6, 0.9);

const BRACKET_HORIZONTAL_PAD: f64 = 25.0;
const BRACKET_HALF_HEIGHT: f64 = 110.0;
pub const BRACKET_TITLE: &str = "Pentavalent Carbon";
pub const BRACKET_FORMULA: &str = "[Nu ••• C ••• Br]⁻";

const LOBE_OFFSET_X: f64 = 45.0;
const LOBE_RADII: (f64, f64) = (28.0, 17.6);

/// One atom, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AtomSprite {
    pub role: AtomRole,
    pub symbol: &'static str,
    pub color: &'static str,
    pub draw_x: f64,
    pub draw_y: f64,
    pub draw_radius: f64,
    pub opacity: f64,
    /// Raw scene depth used for compositing.
    pub depth: f64,
    pub charge: Option<ChargeBadge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLabel {
    #[serde(flatten)]
    pub label: BondLabel,
    pub text: String,
    pub anchor: ScreenPoint,
}

/// One bond, ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondStroke {
    pub kind: BondKind,
    pub visible: bool,
    pub from: ScreenPoint,
    pub to: ScreenPoint,
    pub width: f64,
    pub dash: Option<[f64; 2]>,
    pub opacity: f64,
    pub label: Option<PlacedLabel>,
    /// Mean scene depth of the two endpoints.
    pub depth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "kebab-case")]
pub enum AnnotationGeometry {
    /// Quadratic Bézier arrow.
    Arrow {
        start: ScreenPoint,
        control: ScreenPoint,
        end: ScreenPoint,
    },
    /// Axis-aligned box with two text labels.
    Bracket {
        min: ScreenPoint,
        max: ScreenPoint,
        title: &'static str,
        formula: &'static str,
    },
    /// Two ellipses either side of the central atom.
    Lobes {
        left: ScreenPoint,
        right: ScreenPoint,
        rx: f64,
        ry: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Annotation {
    pub kind: AnnotationKind,
    pub layer: AnnotationLayer,
    pub opacity: f64,
    pub geometry: AnnotationGeometry,
}

/// The complete render payload for one value of `t`.
///
/// `atoms` and `bonds` are in compositing order (farthest first); `annotations` are in draw order
/// and carry their layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub t: f64,
    pub progress: f64,
    pub toggles: DisplayToggles,
    pub atoms: Vec<AtomSprite>,
    pub bonds: Vec<BondStroke>,
    pub annotations: Vec<Annotation>,
    pub transition_state_badge: bool,
}

impl Frame {
    pub fn atom(&self, role: AtomRole) -> Option<&AtomSprite> {
        self.atoms.iter().find(|atom| atom.role == role)
    }

    pub fn bond(&self, kind: BondKind) -> Option<&BondStroke> {
        self.bonds.iter().find(|bond| bond.kind == kind)
    }

    pub fn annotation(&self, kind: AnnotationKind) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.kind == kind)
    }

    pub fn annotations_in(&self, layer: AnnotationLayer) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(move |a| a.layer == layer)
    }

    /// Keeps only the atoms in `roles` and the bonds with at least one endpoint among them.
    /// Compositing order is preserved.
    pub fn retain_atoms(&mut self, roles: &[AtomRole]) {
        self.atoms.retain(|atom| roles.contains(&atom.role));
        self.bonds.retain(|bond| {
            let (from, to) = bond.kind.endpoints();
            roles.contains(&from) || roles.contains(&to)
        });
    }
}

/// Projected atoms of one frame, looked up by role.
struct ProjectedScene {
    atoms: [Atom; 6],
    projections: [Projection; 6],
}

impl ProjectedScene {
    fn new(geometry: &ReactionGeometry, camera: &Camera) -> Self {
        let atoms = geometry.atoms();
        let projections = atoms.map(|atom| camera.project(&atom.position, atom.radius));
        Self { atoms, projections }
    }

    fn index_of(role: AtomRole) -> usize {
        AtomRole::ALL
            .iter()
            .position(|candidate| *candidate == role)
            .unwrap_or_default()
    }

    fn atom(&self, role: AtomRole) -> &Atom {
        &self.atoms[Self::index_of(role)]
    }

    fn projection(&self, role: AtomRole) -> &Projection {
        &self.projections[Self::index_of(role)]
    }

    fn center(&self, role: AtomRole) -> ScreenPoint {
        self.projection(role).center
    }
}

/// Builds the render payload for `t` (clamped to `[0, 1]`).
///
/// Pure: identical inputs give identical frames.
pub fn build_frame(t: f64, toggles: DisplayToggles, camera: &Camera) -> Frame {
    let t = clamp_unit(t);
    assemble(t, t * MAX_PROGRESS, toggles, camera)
}

/// Builds the render payload for a progress value (clamped to `[0, 100]`).
///
/// The frame reports `progress` exactly as given rather than recovering it from `t`.
pub fn build_frame_at_progress(progress: f64, toggles: DisplayToggles, camera: &Camera) -> Frame {
    let progress = clamp_finite(progress, MIN_PROGRESS, MAX_PROGRESS);
    assemble(progress / MAX_PROGRESS, progress, toggles, camera)
}

fn assemble(t: f64, progress: f64, toggles: DisplayToggles, camera: &Camera) -> Frame {
    let geometry = ReactionGeometry::at(t);
    let scene = ProjectedScene::new(&geometry, camera);

    let atoms = atom_sprites(&scene, t);
    let bonds = bond_strokes(&scene, &bond_states(&geometry, toggles));
    let annotations = annotations(&scene, t, toggles);

    Frame {
        t,
        progress,
        toggles,
        atoms,
        bonds,
        annotations,
        transition_state_badge: transition_state_badge_visible(progress),
    }
}

fn atom_sprites(scene: &ProjectedScene, t: f64) -> Vec<AtomSprite> {
    compositing_order(&scene.atoms[..], Atom::depth)
        .into_iter()
        .map(|i| {
            let atom = &scene.atoms[i];
            let projection = &scene.projections[i];
            AtomSprite {
                role: atom.role,
                symbol: atom.role.element().symbol(),
                color: atom.color,
                draw_x: projection.center.x,
                draw_y: projection.center.y,
                draw_radius: projection.radius,
                opacity: projection.opacity,
                depth: atom.depth(),
                charge: charge_marker(atom.role, t),
            }
        })
        .collect()
}

fn bond_strokes(scene: &ProjectedScene, states: &[BondState]) -> Vec<BondStroke> {
    let strokes: Vec<BondStroke> = states
        .iter()
        .map(|state| {
            let (a, b) = state.kind.endpoints();
            let from = scene.center(a);
            let to = scene.center(b);
            let midpoint = from.midpoint(to);
            BondStroke {
                kind: state.kind,
                visible: state.visible,
                from,
                to,
                width: state.stroke.width,
                dash: state.stroke.dash,
                opacity: state.stroke.opacity,
                label: state.label.map(|label| place_label(label, midpoint)),
                depth: midpoint_z(&scene.atom(a).position, &scene.atom(b).position),
            }
        })
        .collect();

    let order = compositing_order(&strokes, |bond| bond.depth);
    let mut slots: Vec<Option<BondStroke>> = strokes.into_iter().map(Some).collect();
    order.into_iter().filter_map(|i| slots[i].take()).collect()
}

fn place_label(label: BondLabel, midpoint: ScreenPoint) -> PlacedLabel {
    let offset = match label {
        BondLabel::Distance { .. } => DISTANCE_LABEL_OFFSET_Y,
        BondLabel::PartialBondOrder { .. } => BOND_ORDER_LABEL_OFFSET_Y,
    };
    PlacedLabel {
        text: label.text(),
        anchor: midpoint.offset(0.0, offset),
        label,
    }
}

fn annotations(scene: &ProjectedScene, t: f64, toggles: DisplayToggles) -> Vec<Annotation> {
    evaluate_annotations(t, toggles)
        .into_iter()
        .map(|shown| Annotation {
            kind: shown.kind,
            layer: shown.layer,
            opacity: shown.opacity,
            geometry: annotation_geometry(scene, shown.kind),
        })
        .collect()
}

fn annotation_geometry(scene: &ProjectedScene, kind: AnnotationKind) -> AnnotationGeometry {
    let nu = scene.center(AtomRole::Nucleophile);
    let c = scene.center(AtomRole::Central);
    let lg = scene.center(AtomRole::LeavingGroup);

    match kind {
        AnnotationKind::AttackArrow => AnnotationGeometry::Arrow {
            start: nu.offset(0.0, -ATTACK_ARROW_START_LIFT),
            control: ScreenPoint::new(0.5 * (nu.x + c.x), nu.y - ARROW_CONTROL_LIFT),
            end: ScreenPoint::new(c.x - ATTACK_ARROW_END_GAP, c.y),
        },
        AnnotationKind::LeavingArrow => {
            let r = scene.projection(AtomRole::LeavingGroup).radius;
            let start = c.midpoint(lg);
            let (fx, fy) = LEAVING_ARROW_END_FACTORS;
            let end = ScreenPoint::new(lg.x + fx * r, lg.y - fy * r);
            AnnotationGeometry::Arrow {
                start,
                control: ScreenPoint::new(
                    start.x + 0.5 * (end.x - start.x),
                    start.y - ARROW_CONTROL_LIFT,
                ),
                end,
            }
        }
        AnnotationKind::TransitionStateBracket => AnnotationGeometry::Bracket {
            min: ScreenPoint::new(nu.x - BRACKET_HORIZONTAL_PAD, c.y - BRACKET_HALF_HEIGHT),
            max: ScreenPoint::new(lg.x + BRACKET_HORIZONTAL_PAD, c.y + BRACKET_HALF_HEIGHT),
            title: BRACKET_TITLE,
            formula: BRACKET_FORMULA,
        },
        AnnotationKind::OrbitalLobes => AnnotationGeometry::Lobes {
            left: c.offset(-LOBE_OFFSET_X, 0.0),
            right: c.offset(LOBE_OFFSET_X, 0.0),
            rx: LOBE_RADII.0,
            ry: LOBE_RADII.1,
        },
    }
}
