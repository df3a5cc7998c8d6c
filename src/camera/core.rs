use glam::{Mat4, Vec2, Vec3};

use super::views::StandardView;
use crate::error::MeshViewError;
use crate::options::CameraOptions;

/// Hard lower bound on the view radius; `options.min_radius` can only raise it.
pub const RADIUS_FLOOR: f32 = 0.1;

/// Orthographic orbit camera.
///
/// The eye orbits `center` at `yaw`/`pitch` (degrees, always normalized into
/// `[0, 360)`). `radius` is the half-extent of the shorter viewport side in
/// world units and never drops below [`RADIUS_FLOOR`] or `options.min_radius`,
/// whichever is larger. The pan offset
/// shifts the view in the screen plane without moving the orbit center.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    yaw: f32,
    pitch: f32,
    radius: f32,
    center: Vec3,
    pan_offset: Vec2,
    needs_refit: bool,
    options: CameraOptions,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(CameraOptions::default())
    }
}

impl Camera {
    /// Camera at the configured default view, marked for a refit.
    #[must_use]
    pub fn new(options: CameraOptions) -> Self {
        let (yaw, pitch) = options.default_view.angles();
        Self {
            yaw: normalize_degrees(yaw),
            pitch: normalize_degrees(pitch),
            radius: 1.0_f32.max(options.min_radius).max(RADIUS_FLOOR),
            center: Vec3::ZERO,
            pan_offset: Vec2::ZERO,
            needs_refit: true,
            options,
        }
    }

    /// Yaw in degrees, in `[0, 360)`.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Pitch in degrees, in `[0, 360)`.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Half-extent of the shorter viewport side, in world units.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Orbit center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Screen-plane pan offset (camera right, camera up), world units.
    #[must_use]
    pub fn pan_offset(&self) -> Vec2 {
        self.pan_offset
    }

    /// Tuning parameters.
    #[must_use]
    pub fn options(&self) -> &CameraOptions {
        &self.options
    }

    /// Whether a fit is pending.
    #[must_use]
    pub fn needs_refit(&self) -> bool {
        self.needs_refit
    }

    /// Mark the camera for a fit on the next frame.
    pub fn request_refit(&mut self) {
        self.needs_refit = true;
    }

    /// Center on the bounding box of `points` and size the view to it.
    ///
    /// Clears the pan offset and the pending-refit flag.
    ///
    /// # Errors
    ///
    /// [`MeshViewError::EmptyBoundsFit`] when `points` is empty; the camera
    /// then keeps its center and radius.
    pub fn fit_to_bounds<I>(&mut self, points: I) -> Result<(), MeshViewError>
    where
        I: IntoIterator<Item = Vec3>,
    {
        self.needs_refit = false;

        let mut points = points.into_iter();
        let first = points.next().ok_or(MeshViewError::EmptyBoundsFit)?;
        let (min, max) =
            points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

        let extent = max - min;
        let planar = extent.x.hypot(extent.z);
        let height = (extent.y * self.pitch.to_radians().cos()).abs();

        self.center = (min + max) * 0.5;
        self.radius = (planar.max(height) * self.options.fit_scale).max(self.radius_floor());
        self.pan_offset = Vec2::ZERO;
        log::debug!(
            "camera fit: center {:?}, radius {:.3}",
            self.center,
            self.radius
        );
        Ok(())
    }

    /// Scroll-wheel zoom. Positive `direction` zooms in, negative zooms out,
    /// zero does nothing.
    pub fn zoom(&mut self, direction: f32) {
        let step = self.options.zoom_step;
        let factor = if direction > 0.0 {
            1.0 - step
        } else if direction < 0.0 {
            1.0 + step
        } else {
            return;
        };
        self.radius = (self.radius * factor).max(self.radius_floor());
    }

    /// Translate the view by a screen-space drag vector (y down).
    ///
    /// Only the direction of `delta` is used; drags shorter than
    /// `pan_threshold` pixels are ignored. Returns whether the camera moved.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        if delta.length() < self.options.pan_threshold {
            return false;
        }
        let dir = delta.normalize_or_zero();
        let step = self.radius * self.options.pan_step;
        self.pan_offset += Vec2::new(dir.x, -dir.y) * step;
        true
    }

    /// Rotate by one fixed step along the dominant axis of a screen-space
    /// drag: horizontal drags change yaw, vertical drags change pitch.
    ///
    /// Returns whether the camera moved.
    pub fn rotate(&mut self, delta: Vec2) -> bool {
        let step = self.options.rotate_step;
        if delta.x.abs() > delta.y.abs() {
            self.yaw = normalize_degrees(self.yaw + step * delta.x.signum());
        } else if delta.y != 0.0 {
            self.pitch = normalize_degrees(self.pitch + step * delta.y.signum());
        } else {
            return false;
        }
        true
    }

    /// Jump to a preset orientation. Center, radius and pan are kept.
    pub fn set_standard_view(&mut self, view: StandardView) {
        let (yaw, pitch) = view.angles();
        self.yaw = normalize_degrees(yaw);
        self.pitch = normalize_degrees(pitch);
    }

    /// World → camera space. The camera looks down -Z at `center` shifted by
    /// the pan offset.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.pan_offset.extend(0.0))
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_y(-self.yaw.to_radians())
            * Mat4::from_translation(-self.center)
    }

    /// Orthographic projection for a viewport of the given aspect ratio
    /// (width / height). The shorter side always spans `2 * radius`.
    #[must_use]
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        let (half_w, half_h) = if aspect >= 1.0 {
            (self.radius * aspect, self.radius)
        } else {
            (self.radius, self.radius / aspect)
        };
        let depth = self.radius * self.options.depth_factor.max(1.0);
        Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, -depth, depth)
    }

    /// Effective lower bound on the radius. `f32::max` ignores a NaN
    /// `min_radius`.
    fn radius_floor(&self) -> f32 {
        self.options.min_radius.max(RADIUS_FLOOR)
    }

    /// Combined projection * view.
    #[must_use]
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_points() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::X, Vec3::Y]
    }

    #[test]
    fn fit_is_idempotent() {
        let mut camera = Camera::default();
        camera.fit_to_bounds(triangle_points()).unwrap();
        let (center, radius) = (camera.center(), camera.radius());
        camera.fit_to_bounds(triangle_points()).unwrap();
        assert_eq!(camera.center(), center);
        assert_eq!(camera.radius(), radius);
        assert!(!camera.needs_refit());
    }

    #[test]
    fn fit_uses_planar_diagonal_and_height() {
        let mut camera = Camera::default();
        camera.set_standard_view(StandardView::Front);
        camera
            .fit_to_bounds([Vec3::ZERO, Vec3::new(3.0, 0.0, 4.0)])
            .unwrap();
        assert_eq!(camera.center(), Vec3::new(1.5, 0.0, 2.0));
        assert!((camera.radius() - 5.0 * 0.55).abs() < 1e-5);

        camera.fit_to_bounds([Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0)]).unwrap();
        assert!((camera.radius() - 10.0 * 0.55).abs() < 1e-5);
    }

    #[test]
    fn empty_fit_keeps_state() {
        let mut camera = Camera::default();
        camera.fit_to_bounds(triangle_points()).unwrap();
        let before = camera.clone();
        camera.request_refit();
        assert!(matches!(
            camera.fit_to_bounds(std::iter::empty()),
            Err(MeshViewError::EmptyBoundsFit)
        ));
        assert_eq!(camera.center(), before.center());
        assert_eq!(camera.radius(), before.radius());
        assert!(!camera.needs_refit());
    }

    #[test]
    fn zoom_never_below_floor() {
        let mut camera = Camera::default();
        for _ in 0..500 {
            camera.zoom(1.0);
        }
        assert!(camera.radius() >= 0.1);
        assert_eq!(camera.radius(), 0.1);

        let r = camera.radius();
        camera.zoom(-3.0);
        assert!((camera.radius() - r * 1.05).abs() < 1e-6);
        camera.zoom(0.0);
        assert!((camera.radius() - r * 1.05).abs() < 1e-6);
    }

    #[test]
    fn floor_holds_with_zero_min_radius() {
        let options = CameraOptions {
            min_radius: 0.0,
            fit_scale: 0.0,
            depth_factor: 0.0,
            ..CameraOptions::default()
        };
        let mut camera = Camera::new(options);
        for _ in 0..5000 {
            camera.zoom(1.0);
        }
        assert_eq!(camera.radius(), RADIUS_FLOOR);

        camera.fit_to_bounds([Vec3::ONE]).unwrap();
        assert_eq!(camera.radius(), RADIUS_FLOOR);
        let projected = camera.view_projection(1.0).project_point3(Vec3::ONE);
        assert!(projected.is_finite());
        assert!(projected.length() < 1e-5);
    }

    #[test]
    fn pan_ignores_small_drags() {
        let mut camera = Camera::default();
        assert!(!camera.pan(Vec2::new(3.0, 4.0)));
        assert_eq!(camera.pan_offset(), Vec2::ZERO);

        assert!(camera.pan(Vec2::new(30.0, 40.0)));
        let step = camera.radius() * 0.15;
        let expected = Vec2::new(0.6, -0.8) * step;
        assert!((camera.pan_offset() - expected).length() < 1e-6);
    }

    #[test]
    fn rotate_follows_dominant_axis() {
        let mut camera = Camera::default();
        camera.set_standard_view(StandardView::Front);

        assert!(camera.rotate(Vec2::new(-40.0, 5.0)));
        assert_eq!(camera.yaw(), 345.0);
        assert_eq!(camera.pitch(), 0.0);

        assert!(camera.rotate(Vec2::new(2.0, 30.0)));
        assert_eq!(camera.pitch(), 15.0);

        assert!(!camera.rotate(Vec2::ZERO));
    }

    #[test]
    fn angles_stay_normalized() {
        let mut camera = Camera::default();
        for view in StandardView::ALL {
            camera.set_standard_view(view);
            assert!((0.0..360.0).contains(&camera.yaw()));
            assert!((0.0..360.0).contains(&camera.pitch()));
        }
        camera.set_standard_view(StandardView::Isometric);
        assert_eq!(camera.yaw(), 315.0);
        assert_eq!(camera.pitch(), 30.0);

        for i in 0..100 {
            let sign = if i % 3 == 0 { -1.0 } else { 1.0 };
            let _ = camera.rotate(Vec2::new(sign * 50.0, 0.0));
            let _ = camera.rotate(Vec2::new(0.0, -sign * 50.0));
            assert!((0.0..360.0).contains(&camera.yaw()));
            assert!((0.0..360.0).contains(&camera.pitch()));
        }
        assert_eq!(normalize_degrees(-1e-7), 0.0);
    }

    #[test]
    fn projection_compensates_aspect() {
        let mut camera = Camera::default();
        camera.set_standard_view(StandardView::Front);
        camera.fit_to_bounds([Vec3::splat(-1.0), Vec3::splat(1.0)]).unwrap();
        let r = camera.radius();

        // Wide viewport: the vertical extent is the radius.
        let vp = camera.view_projection(2.0);
        let top = vp.project_point3(Vec3::new(0.0, r, 0.0));
        let right = vp.project_point3(Vec3::new(r, 0.0, 0.0));
        assert!((top.y - 1.0).abs() < 1e-5);
        assert!((right.x - 0.5).abs() < 1e-5);

        // Tall viewport: the horizontal extent is the radius.
        let vp = camera.view_projection(0.5);
        let right = vp.project_point3(Vec3::new(r, 0.0, 0.0));
        assert!((right.x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn front_view_depth_orders_nearer_points_first() {
        let mut camera = Camera::default();
        camera.set_standard_view(StandardView::Front);
        let vp = camera.view_projection(1.0);
        let near = vp.project_point3(Vec3::new(0.0, 0.0, 0.5));
        let far = vp.project_point3(Vec3::new(0.0, 0.0, -0.5));
        assert!(near.z < far.z);
        assert!((0.0..=1.0).contains(&near.z));
        assert!((0.0..=1.0).contains(&far.z));
    }
}
