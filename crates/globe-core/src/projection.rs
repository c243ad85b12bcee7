//! Geographic → sphere → screen mapping for a fixed orthographic camera on +Z.
//!
//! Body space: latitude 0 / longitude 0 faces +Z, +Y is north, +X is east.
//! View space: the body rotated by the composite angle (about Y) and then
//! tilted (about X). Anything with view-space `z < 0` faces away from the
//! camera and is culled.

use crate::constants::{GLOBE_RADIUS_FRACTION, MARKER_RADIUS_SCALE};
use crate::markers::Marker;
use glam::{Mat3, Vec2, Vec3};
use smallvec::SmallVec;

/// Unit vector for a latitude/longitude pair in degrees.
#[inline]
pub fn geo_to_unit(latitude_deg: f32, longitude_deg: f32) -> Vec3 {
    let lat = latitude_deg.to_radians();
    let lon = longitude_deg.to_radians();
    let cos_lat = lat.cos();
    Vec3::new(cos_lat * lon.sin(), lat.sin(), cos_lat * lon.cos())
}

/// Latitude/longitude in degrees for a body-space direction.
#[inline]
pub fn unit_to_geo(p: Vec3) -> (f32, f32) {
    let p = p.normalize_or_zero();
    let lat = p.y.clamp(-1.0, 1.0).asin().to_degrees();
    let lon = p.x.atan2(p.z).to_degrees();
    (lat, lon)
}

/// Body → view rotation for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    matrix: Mat3,
}

impl Orientation {
    pub fn new(composite_angle: f64, tilt: f32) -> Self {
        // Wrap before narrowing so long-running accumulation keeps precision.
        let angle = composite_angle.rem_euclid(std::f64::consts::TAU) as f32;
        Self {
            matrix: Mat3::from_rotation_x(tilt) * Mat3::from_rotation_y(angle),
        }
    }

    #[inline]
    pub fn to_view(&self, body: Vec3) -> Vec3 {
        self.matrix * body
    }

    #[inline]
    pub fn to_body(&self, view: Vec3) -> Vec3 {
        self.matrix.transpose() * view
    }
}

/// Latitude/longitude (degrees) currently facing the camera.
pub fn sub_camera_point(composite_angle: f64, tilt: f32) -> (f32, f32) {
    unit_to_geo(Orientation::new(composite_angle, tilt).to_body(Vec3::Z))
}

/// Square backing-store area holding the globe disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub size: u32,
    pub center: Vec2,
    pub radius: f32,
}

impl Viewport {
    pub fn square(size_px: u32) -> Self {
        let half = size_px as f32 * 0.5;
        Self {
            size: size_px,
            center: Vec2::splat(half),
            radius: half * GLOBE_RADIUS_FRACTION,
        }
    }

    /// Screen position (y down) of a view-space point on the unit sphere.
    #[inline]
    pub fn to_screen(&self, view: Vec3) -> Vec2 {
        Vec2::new(
            self.center.x + view.x * self.radius,
            self.center.y - view.y * self.radius,
        )
    }

    /// Inverse of `to_screen` for points on the visible hemisphere.
    pub fn from_screen(&self, screen: Vec2) -> Option<Vec3> {
        if self.radius <= 0.0 {
            return None;
        }
        let x = (screen.x - self.center.x) / self.radius;
        let y = (self.center.y - screen.y) / self.radius;
        let d2 = x * x + y * y;
        (d2 <= 1.0).then(|| Vec3::new(x, y, (1.0 - d2).sqrt()))
    }
}

/// A marker that survived culling, in screen space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedMarker {
    pub index: usize,
    pub screen: Vec2,
    /// View-space z in (0, 1]; 1 is the sub-camera point.
    pub depth: f32,
    pub radius_px: f32,
}

pub type ProjectedMarkers = SmallVec<[ProjectedMarker; 16]>;

/// Project one marker; `None` when it faces away from the camera.
pub fn project_marker(
    marker: &Marker,
    orientation: &Orientation,
    viewport: &Viewport,
) -> Option<(Vec2, f32)> {
    let view = orientation.to_view(geo_to_unit(marker.latitude, marker.longitude));
    if view.z < 0.0 || !view.is_finite() {
        return None;
    }
    Some((viewport.to_screen(view), view.z))
}

/// Project every visible marker, preserving catalog order.
pub fn project_markers(
    markers: &[Marker],
    orientation: &Orientation,
    viewport: &Viewport,
) -> ProjectedMarkers {
    markers
        .iter()
        .enumerate()
        .filter_map(|(index, m)| {
            project_marker(m, orientation, viewport).map(|(screen, depth)| ProjectedMarker {
                index,
                screen,
                depth,
                radius_px: marker_radius_px(m.size, viewport),
            })
        })
        .collect()
}

#[inline]
pub fn marker_radius_px(size: f32, viewport: &Viewport) -> f32 {
    (size.max(0.0) * viewport.radius * MARKER_RADIUS_SCALE).max(0.5)
}
