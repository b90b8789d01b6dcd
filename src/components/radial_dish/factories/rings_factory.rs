use std::rc::Rc;

use super::primitives;
use crate::components::radial_dish::color::Color;
use crate::components::radial_dish::scene::{Material, Template};

/// Concentric guide rings laid over the disk.
#[derive(Clone, Debug)]
pub struct RingsFactory {
	width: f32,
	segments: u32,
	color: Color,
}

impl RingsFactory {
	pub fn new(width: f32, segments: u32, color: Color) -> Self {
		Self {
			width,
			segments,
			color,
		}
	}

	/// `count` rings at radii `k * radius / count` for `k = 1..=count`.
	pub fn rings(&self, radius: f32, count: u32) -> Template {
		let step = radius / count.max(1) as f32;
		(1..=count).fold(Template::group("rings"), |group, k| {
			let inner = k as f32 * step;
			let geometry = primitives::ring(inner, inner + self.width, self.segments);
			group.with_child(Template::mesh(
				format!("ring_{k}"),
				Rc::new(geometry),
				Material::unlit(self.color),
			))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::radial_dish::scene::ObjectKind;

	#[test]
	fn rings_are_evenly_spaced() {
		let rings = RingsFactory::new(0.05, 90, Color::WHITE).rings(8.0, 4);
		assert_eq!(rings.children.len(), 4);
		for (k, ring) in rings.children.iter().enumerate() {
			let ObjectKind::Mesh { geometry, .. } = &ring.kind else {
				panic!("ring is a mesh");
			};
			let inner = geometry
				.positions
				.iter()
				.map(|p| p.length())
				.fold(f32::INFINITY, f32::min);
			let outer = geometry.positions.iter().map(|p| p.length()).fold(0.0, f32::max);
			assert!((inner - 2.0 * (k + 1) as f32).abs() < 1e-4);
			assert!((outer - inner - 0.05).abs() < 1e-4);
		}
	}
}
