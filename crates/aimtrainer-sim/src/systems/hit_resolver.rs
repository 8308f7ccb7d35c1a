//! Ray-versus-target hit resolution. Pure: never touches the target set.

use glam::DVec3;

use aimtrainer_core::constants::DETECTION_RADIUS_SCALE;
use aimtrainer_core::types::{Ray, Target, TargetId};

/// The target a shot struck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub target_id: TargetId,
    /// Ray origin to sphere center, not to the surface point.
    pub distance: f64,
}

/// Resolve a shot against the live targets.
///
/// Every target gets a detection sphere of radius `target_size * 1.1`. Among
/// the spheres the ray touches, the one whose center is nearest the ray
/// origin wins.
pub fn resolve(ray: &Ray, targets: &[Target], target_size: f64) -> Option<RayHit> {
    let direction = ray.direction.normalize_or_zero();
    if direction == DVec3::ZERO {
        return None;
    }

    let radius = target_size * DETECTION_RADIUS_SCALE;

    targets
        .iter()
        .filter_map(|target| {
            let center = DVec3::from(target.position);
            ray_intersects_sphere(ray.origin, direction, center, radius).then(|| RayHit {
                target_id: target.id,
                distance: ray.origin.distance(center),
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Whether a ray (unit `direction`) passes within `radius` of `center`.
/// Spheres behind the origin only count if they contain the origin.
pub fn ray_intersects_sphere(origin: DVec3, direction: DVec3, center: DVec3, radius: f64) -> bool {
    let along = (center - origin).dot(direction);
    let closest = if along < 0.0 {
        origin
    } else {
        origin + direction * along
    };
    closest.distance_squared(center) <= radius * radius
}
