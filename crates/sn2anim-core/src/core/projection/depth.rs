use crate::core::models::atom::Atom;

/// Indices of `items` in compositing order: descending raw depth (`z`), ties kept in input order.
///
/// The order depends only on the depth key, never on any projected quantity such as scale or
/// radius.
pub fn compositing_order<T, F>(items: &[T], depth: F) -> Vec<usize>
where
    F: Fn(&T) -> f64,
{
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| depth(&items[b]).total_cmp(&depth(&items[a])));
    order
}

/// Sorts atoms in place into compositing order.
pub fn sort_for_compositing(atoms: &mut [Atom]) {
    atoms.sort_by(|a, b| b.depth().total_cmp(&a.depth()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kinematics::ReactionGeometry;
    use crate::core::models::atom::AtomRole;
    use crate::core::projection::Camera;
    use nalgebra::Point3;

    #[test]
    fn order_is_descending_by_depth() {
        let depths = [0.0, 12.5, -40.0, 65.0, 3.0];
        let order = compositing_order(&depths, |z| *z);
        assert_eq!(order, vec![3, 1, 4, 0, 2]);
    }

    #[test]
    fn ties_keep_input_order() {
        let depths = [1.0, 0.0, 1.0, 0.0];
        assert_eq!(compositing_order(&depths, |z| *z), vec![0, 2, 1, 3]);
    }

    #[test]
    fn compositing_uses_raw_depth_not_projected_radius() {
        // A large far atom projects bigger than a small near one, yet is ordered by z alone.
        let camera = Camera::default();
        let far_big = Atom::new(AtomRole::LeavingGroup, Point3::new(0.0, 0.0, -10.0));
        let near_small = Atom::new(AtomRole::Central, Point3::new(0.0, 0.0, 10.0));
        assert!(
            camera.project(&far_big.position, 80.0).radius
                > camera.project(&near_small.position, 5.0).radius
        );
        let atoms = [far_big, near_small];
        assert_eq!(compositing_order(&atoms, Atom::depth), vec![1, 0]);
    }

    #[test]
    fn order_changes_as_substituents_rotate() {
        let before = ReactionGeometry::at(0.0).atoms();
        let after = ReactionGeometry::at(1.0).atoms();
        assert_ne!(
            compositing_order(&before, Atom::depth),
            compositing_order(&after, Atom::depth)
        );
    }

    #[test]
    fn sorted_atoms_have_non_increasing_depth_for_any_progress() {
        for i in 0..=50 {
            let mut atoms = ReactionGeometry::at(f64::from(i) / 50.0).atoms();
            sort_for_compositing(&mut atoms);
            assert!(atoms.windows(2).all(|w| w[0].depth() >= w[1].depth()));
        }
    }
}
