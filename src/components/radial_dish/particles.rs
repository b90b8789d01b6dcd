use glam::Vec3;

use super::config::DishConfig;

/// Linear congruential sequence in `[0, 1)`, stable for a given seed.
#[derive(Clone, Debug)]
struct Lcg(u64);

impl Lcg {
	fn next_unit(&mut self) -> f32 {
		self.0 = (self.0 * 9301 + 49297) % 233280;
		self.0 as f32 / 233280.0
	}
}

/// Backdrop point cloud drifting upward through a cube centered on the origin.
#[derive(Clone, Debug)]
pub struct Particles {
	pub positions: Vec<Vec3>,
	half_extent: f32,
	speed: f32,
}

impl Particles {
	pub fn new(count: usize, box_size: f32, speed: f32, seed: u64) -> Self {
		let half_extent = box_size * 0.5;
		let mut rng = Lcg(seed % 233280);
		let positions = (0..count)
			.map(|_| {
				let x = rng.next_unit() * box_size - half_extent;
				let y = rng.next_unit() * box_size - half_extent;
				let z = rng.next_unit() * box_size - half_extent;
				Vec3::new(x, y, z)
			})
			.collect();
		Self {
			positions,
			half_extent,
			speed,
		}
	}

	pub fn from_config(config: &DishConfig, seed: u64) -> Self {
		Self::new(
			config.particle_count,
			config.particle_box,
			config.particle_speed,
			seed,
		)
	}

	/// One drift step; particles leaving the top re-enter at the bottom.
	pub fn update(&mut self) {
		for p in &mut self.positions {
			p.y += self.speed;
			if p.y > self.half_extent {
				p.y = -self.half_extent;
			}
		}
	}
}
