use std::rc::Rc;

use glam::Quat;

use super::primitives;
use crate::components::radial_dish::color::Color;
use crate::components::radial_dish::layout::{slice_angle, slice_arc};
use crate::components::radial_dish::scene::{Geometry, Material, Template};

/// Pie wedges for the type sections of the disk.
#[derive(Clone, Debug)]
pub struct SliceFactory {
	radius: f32,
	section_count: usize,
	segments: u32,
	palette: Vec<Color>,
	geometry: Option<Rc<Geometry>>,
}

impl SliceFactory {
	pub fn new(radius: f32, section_count: usize, segments: u32, palette: Vec<Color>) -> Self {
		Self {
			radius,
			section_count,
			segments,
			palette,
			geometry: None,
		}
	}

	fn wedge(&self) -> Geometry {
		primitives::wedge(self.radius, 0.0, slice_angle(self.section_count), self.segments)
	}

	pub fn create_meshes(&mut self) {
		if self.geometry.is_none() {
			self.geometry = Some(Rc::new(self.wedge()));
		}
	}

	pub fn color(&self, index: usize) -> Color {
		if self.palette.is_empty() {
			return Color::WHITE;
		}
		self.palette[index % self.palette.len()]
	}

	/// Wedge covering `slice_arc(index)`. The rotation lives on the returned
	/// group so anything attached to it lands inside the sector.
	pub fn slice(&mut self, index: usize) -> Template {
		self.create_meshes();
		let color = self.color(index);
		let geometry = match &self.geometry {
			Some(geometry) => geometry.clone(),
			None => Rc::new(self.wedge()),
		};
		let (start, _) = slice_arc(index, self.section_count);
		Template::group("slice")
			.with_rotation(Quat::from_rotation_y(-start))
			.with_child(Template::mesh("wedge", geometry, Material::unlit(color)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::radial_dish::scene::SceneGraph;
	use std::f32::consts::TAU;

	#[test]
	fn wedges_land_in_their_sector() {
		let mut factory = SliceFactory::new(8.0, 3, 24, vec![Color::BLACK]);
		let mut scene = SceneGraph::new();
		let slice = factory.slice(1);
		let root = scene.instantiate(&slice, None);
		scene.update_world_matrices();
		let wedge = scene.find_descendant(root, "wedge").unwrap();
		let world = scene.get(wedge).world();
		let (start, end) = (TAU / 3.0, 2.0 * TAU / 3.0);
		let geometry = match &scene.get(wedge).kind {
			crate::components::radial_dish::scene::ObjectKind::Mesh { geometry, .. } => geometry.clone(),
			_ => panic!("wedge is a mesh"),
		};
		for p in geometry.positions.iter().skip(1) {
			let w = world.transform_point3(*p);
			let angle = w.z.atan2(w.x).rem_euclid(TAU);
			assert!(angle >= start - 1e-3 && angle <= end + 1e-3, "angle {angle}");
		}
	}

	#[test]
	fn palette_is_cyclic() {
		let palette = vec![Color::from_hex(0x002a4d), Color::from_hex(0x1a1a1a)];
		let factory = SliceFactory::new(8.0, 5, 8, palette.clone());
		assert_eq!(factory.color(0), palette[0]);
		assert_eq!(factory.color(3), palette[1]);
		assert_eq!(factory.color(4), palette[0]);
	}

	#[test]
	fn geometry_is_built_once() {
		let mut factory = SliceFactory::new(8.0, 2, 8, vec![]);
		factory.create_meshes();
		let a = factory.slice(0);
		let b = factory.slice(1);
		let geometry = |t: &Template| match &t.find("wedge").unwrap().kind {
			crate::components::radial_dish::scene::ObjectKind::Mesh { geometry, .. } => geometry.clone(),
			_ => panic!("wedge is a mesh"),
		};
		assert!(Rc::ptr_eq(&geometry(&a), &geometry(&b)));
		assert_eq!(geometry(&a).triangle_count(), 8);
	}
}
