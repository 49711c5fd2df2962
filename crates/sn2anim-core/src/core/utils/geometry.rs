use nalgebra::{Point3, Rotation3, Unit, Vector3};

pub fn rotation_from_axis_angle(axis: &Vector3<f64>, angle_radians: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Unit::new_normalize(*axis), angle_radians)
}

/// Places a point on a circle of `radius` around `center`, in the plane perpendicular to the
/// x axis, at `angle_radians` measured from +y towards +z.
pub fn point_on_x_ring(center: &Point3<f64>, radius: f64, angle_radians: f64) -> Point3<f64> {
    let rotation = rotation_from_axis_angle(&Vector3::x(), angle_radians);
    center + rotation * Vector3::new(0.0, radius, 0.0)
}

#[inline]
pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

#[inline]
pub fn midpoint_z(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    0.5 * (a.z + b.z)
}
