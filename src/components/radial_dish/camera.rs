use glam::{Mat4, Vec2, Vec3, Vec4};

use super::config::DishConfig;
use super::scene::Aabb;

#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
	pub position: Vec3,
	pub target: Vec3,
	pub fov_deg: f32,
	pub aspect: f32,
	pub near: f32,
	pub far: f32,
}

impl PerspectiveCamera {
	pub fn new(position: Vec3, fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
		Self {
			position,
			target: Vec3::ZERO,
			fov_deg,
			aspect,
			near,
			far,
		}
	}

	pub fn view_matrix(&self) -> Mat4 {
		Mat4::look_at_rh(self.position, self.target, Vec3::Y)
	}

	pub fn projection_matrix(&self) -> Mat4 {
		Mat4::perspective_rh_gl(
			self.fov_deg.to_radians(),
			self.aspect.max(0.0001),
			self.near,
			self.far,
		)
	}

	pub fn view_projection(&self) -> Mat4 {
		self.projection_matrix() * self.view_matrix()
	}

	/// Normalized device coordinates of a world point, `None` behind the camera.
	pub fn project(&self, point: Vec3) -> Option<Vec3> {
		let clip = self.view_projection() * point.extend(1.0);
		if clip.w <= f32::EPSILON {
			return None;
		}
		Some(clip.truncate() / clip.w)
	}

	/// Picks the FOV preset for the viewport shape.
	pub fn fit(&mut self, width: f64, height: f64, wide_fov: f32, tall_fov: f32) {
		if width <= 0.0 || height <= 0.0 {
			return;
		}
		self.aspect = (width / height) as f32;
		self.fov_deg = if self.aspect > 1.0 { wide_fov } else { tall_fov };
	}
}

/// Screen pixels relative to the canvas into normalized device coordinates.
pub fn to_ndc(x: f64, y: f64, width: f64, height: f64) -> Vec2 {
	if width <= 0.0 || height <= 0.0 {
		return Vec2::ZERO;
	}
	Vec2::new(
		(x / width * 2.0 - 1.0) as f32,
		(-(y / height) * 2.0 + 1.0) as f32,
	)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
	pub origin: Vec3,
	pub direction: Vec3,
}

impl Ray {
	pub fn from_camera(ndc: Vec2, camera: &PerspectiveCamera) -> Option<Self> {
		let inv = camera.view_projection().inverse();
		let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
		if far.w.abs() < f32::EPSILON {
			return None;
		}
		let direction = (far.truncate() / far.w - camera.position).normalize_or_zero();
		if direction == Vec3::ZERO {
			return None;
		}
		Some(Self {
			origin: camera.position,
			direction,
		})
	}

	/// Slab test; the box counts as hit when any part lies ahead of the origin.
	pub fn intersects_box(&self, aabb: &Aabb) -> bool {
		self.distance_to_box(aabb).is_some()
	}

	pub fn distance_to_box(&self, aabb: &Aabb) -> Option<f32> {
		if aabb.is_empty() {
			return None;
		}
		let mut t_min: f32 = 0.0;
		let mut t_max: f32 = f32::INFINITY;
		let (o, d) = (self.origin.to_array(), self.direction.to_array());
		let (min, max) = (aabb.min.to_array(), aabb.max.to_array());
		for i in 0..3 {
			if d[i].abs() < 1e-6 {
				if o[i] < min[i] || o[i] > max[i] {
					return None;
				}
				continue;
			}
			let inv = 1.0 / d[i];
			let (mut t1, mut t2) = ((min[i] - o[i]) * inv, (max[i] - o[i]) * inv);
			if t1 > t2 {
				std::mem::swap(&mut t1, &mut t2);
			}
			t_min = t_min.max(t1);
			t_max = t_max.min(t2);
			if t_min > t_max {
				return None;
			}
		}
		Some(t_min)
	}
}

/// Spherical orbit around the camera target.
#[derive(Clone, Debug)]
pub struct OrbitControls {
	pub radius: f32,
	pub azimuth: f32,
	pub polar: f32,
	pub min_distance: f32,
	pub max_distance: f32,
	pub max_polar: f32,
	pub rotate_speed: f32,
}

impl OrbitControls {
	pub fn new(camera: &PerspectiveCamera, config: &DishConfig) -> Self {
		let offset = camera.position - camera.target;
		let radius = offset.length().max(0.01);
		Self {
			radius,
			azimuth: offset.x.atan2(offset.z),
			polar: (offset.y / radius).clamp(-1.0, 1.0).acos(),
			min_distance: config.min_distance,
			max_distance: config.max_distance,
			max_polar: config.max_polar_angle,
			rotate_speed: 0.005,
		}
	}

	/// Drag delta in pixels.
	pub fn rotate(&mut self, dx: f64, dy: f64) {
		self.azimuth -= dx as f32 * self.rotate_speed;
		self.polar = (self.polar - dy as f32 * self.rotate_speed).clamp(0.0, self.max_polar);
	}

	pub fn zoom(&mut self, factor: f32) {
		self.radius = (self.radius * factor).clamp(self.min_distance, self.max_distance);
	}

	pub fn apply(&self, camera: &mut PerspectiveCamera) {
		let (sin_p, cos_p) = self.polar.sin_cos();
		let offset = Vec3::new(
			self.radius * sin_p * self.azimuth.sin(),
			self.radius * cos_p,
			self.radius * sin_p * self.azimuth.cos(),
		);
		camera.position = camera.target + offset;
	}
}
