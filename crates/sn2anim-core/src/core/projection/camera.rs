use nalgebra::Point3;
use serde::Serialize;
use thiserror::Error;

/// Opacity bounds applied after the `0.4 + 0.6·scale` fade.
pub const MIN_OPACITY: f64 = 0.3;
pub const MAX_OPACITY: f64 = 1.0;

/// Smallest allowed `f − z`; keeps the divide finite for points at or behind the focal plane.
const MIN_DEPTH_DENOMINATOR: f64 = 1e-6;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum CameraError {
    #[error("Camera focal length must be finite and positive, got {0}")]
    InvalidFocalLength(f64),

    #[error("Camera origin must be finite, got ({x}, {y})")]
    InvalidOrigin { x: f64, y: f64 },
}

/// A point in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn midpoint(self, other: Self) -> Self {
        Self::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }
}

/// Result of projecting one atom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    pub center: ScreenPoint,
    pub radius: f64,
    pub opacity: f64,
    pub scale: f64,
}

/// A fixed camera: focal length plus the screen position of the scene origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    focal_length: f64,
    origin: ScreenPoint,
}

impl Camera {
    pub const REFERENCE_FOCAL_LENGTH: f64 = 600.0;
    pub const REFERENCE_ORIGIN: ScreenPoint = ScreenPoint::new(300.0, 160.0);

    pub fn new(focal_length: f64, origin: ScreenPoint) -> Result<Self, CameraError> {
        if !focal_length.is_finite() || focal_length <= 0.0 {
            return Err(CameraError::InvalidFocalLength(focal_length));
        }
        if !origin.x.is_finite() || !origin.y.is_finite() {
            return Err(CameraError::InvalidOrigin {
                x: origin.x,
                y: origin.y,
            });
        }
        Ok(Self {
            focal_length,
            origin,
        })
    }

    #[inline]
    pub fn focal_length(&self) -> f64 {
        self.focal_length
    }

    #[inline]
    pub fn origin(&self) -> ScreenPoint {
        self.origin
    }

    #[inline]
    pub fn scale(&self, z: f64) -> f64 {
        self.focal_length / (self.focal_length - z).max(MIN_DEPTH_DENOMINATOR)
    }

    pub fn project(&self, position: &Point3<f64>, base_radius: f64) -> Projection {
        let scale = self.scale(position.z);
        Projection {
            center: ScreenPoint::new(
                self.origin.x + position.x * scale,
                self.origin.y + position.y * scale,
            ),
            radius: base_radius * scale,
            opacity: (0.4 + 0.6 * scale).clamp(MIN_OPACITY, MAX_OPACITY),
            scale,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            focal_length: Self::REFERENCE_FOCAL_LENGTH,
            origin: Self::REFERENCE_ORIGIN,
        }
    }
}
