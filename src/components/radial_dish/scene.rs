//! Arena-backed scene graph: immutable templates are instantiated into
//! independent objects that share geometry and own their materials.

use std::rc::Rc;

use glam::{Mat3, Mat4, Quat, Vec3};

use super::color::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
	pub min: Vec3,
	pub max: Vec3,
}

impl Aabb {
	pub const EMPTY: Aabb = Aabb {
		min: Vec3::splat(f32::INFINITY),
		max: Vec3::splat(f32::NEG_INFINITY),
	};

	pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
		let mut aabb = Self::EMPTY;
		for p in points {
			aabb.expand(p);
		}
		aabb
	}

	pub fn expand(&mut self, p: Vec3) {
		self.min = self.min.min(p);
		self.max = self.max.max(p);
	}

	pub fn union(&mut self, other: &Aabb) {
		if !other.is_empty() {
			self.expand(other.min);
			self.expand(other.max);
		}
	}

	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
	}

	#[cfg(test)]
	pub fn size(&self) -> Vec3 {
		if self.is_empty() {
			Vec3::ZERO
		} else {
			self.max - self.min
		}
	}

	#[cfg(test)]
	pub fn center(&self) -> Vec3 {
		(self.min + self.max) * 0.5
	}

	pub fn corners(&self) -> [Vec3; 8] {
		let (a, b) = (self.min, self.max);
		[
			Vec3::new(a.x, a.y, a.z),
			Vec3::new(b.x, a.y, a.z),
			Vec3::new(a.x, b.y, a.z),
			Vec3::new(b.x, b.y, a.z),
			Vec3::new(a.x, a.y, b.z),
			Vec3::new(b.x, a.y, b.z),
			Vec3::new(a.x, b.y, b.z),
			Vec3::new(b.x, b.y, b.z),
		]
	}

	pub fn transformed(&self, m: &Mat4) -> Aabb {
		if self.is_empty() {
			return *self;
		}
		Aabb::from_points(self.corners().map(|c| m.transform_point3(c)))
	}
}

/// Indexed triangle list with precomputed local bounds.
#[derive(Clone, Debug)]
pub struct Geometry {
	pub positions: Vec<Vec3>,
	pub indices: Vec<u32>,
	pub bounds: Aabb,
}

impl Geometry {
	pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
		let bounds = Aabb::from_points(positions.iter().copied());
		Self {
			positions,
			indices,
			bounds,
		}
	}

	pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
		self.indices.chunks_exact(3).map(|t| {
			[
				self.positions[t[0] as usize],
				self.positions[t[1] as usize],
				self.positions[t[2] as usize],
			]
		})
	}

	#[cfg(test)]
	pub fn triangle_count(&self) -> usize {
		self.indices.len() / 3
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shading {
	/// Flat Lambert lighting from the scene light.
	Lit,
	Unlit,
}

/// Per-instance material, the software stand-in for shader uniforms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
	pub shading: Shading,
	pub color: Color,
	pub opacity: f32,
}

impl Material {
	pub fn lit(color: Color) -> Self {
		Self {
			shading: Shading::Lit,
			color,
			opacity: 1.0,
		}
	}

	pub fn unlit(color: Color) -> Self {
		Self {
			shading: Shading::Unlit,
			color,
			opacity: 1.0,
		}
	}

	pub fn with_opacity(mut self, opacity: f32) -> Self {
		self.opacity = opacity;
		self
	}
}

#[derive(Clone, Debug)]
pub enum ObjectKind {
	Group,
	Mesh {
		geometry: Rc<Geometry>,
		material: Material,
	},
	Text {
		content: String,
		size: f32,
		family: String,
		color: Color,
	},
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
	pub translation: Vec3,
	pub rotation: Quat,
	pub scale: Vec3,
}

impl Default for Transform {
	fn default() -> Self {
		Self {
			translation: Vec3::ZERO,
			rotation: Quat::IDENTITY,
			scale: Vec3::ONE,
		}
	}
}

impl Transform {
	#[cfg(test)]
	pub fn from_translation(translation: Vec3) -> Self {
		Self {
			translation,
			..Default::default()
		}
	}

	pub fn matrix(&self) -> Mat4 {
		Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
	}
}

/// Immutable blueprint produced by the factories.
#[derive(Clone, Debug)]
pub struct Template {
	pub name: String,
	pub transform: Transform,
	pub kind: ObjectKind,
	pub children: Vec<Template>,
}

impl Template {
	pub fn group(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			transform: Transform::default(),
			kind: ObjectKind::Group,
			children: Vec::new(),
		}
	}

	pub fn mesh(name: impl Into<String>, geometry: Rc<Geometry>, material: Material) -> Self {
		Self {
			name: name.into(),
			transform: Transform::default(),
			kind: ObjectKind::Mesh { geometry, material },
			children: Vec::new(),
		}
	}

	pub fn with_translation(mut self, translation: Vec3) -> Self {
		self.transform.translation = translation;
		self
	}

	pub fn with_rotation(mut self, rotation: Quat) -> Self {
		self.transform.rotation = rotation;
		self
	}

	pub fn with_child(mut self, child: Template) -> Self {
		self.children.push(child);
		self
	}

	#[cfg(test)]
	pub fn find(&self, name: &str) -> Option<&Template> {
		if self.name == name {
			return Some(self);
		}
		self.children.iter().find_map(|c| c.find(name))
	}

	#[cfg(test)]
	pub fn mesh_count(&self) -> usize {
		let own = matches!(self.kind, ObjectKind::Mesh { .. }) as usize;
		own + self.children.iter().map(Template::mesh_count).sum::<usize>()
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(usize);

#[derive(Clone, Debug)]
pub struct SceneObject {
	pub name: String,
	pub transform: Transform,
	pub kind: ObjectKind,
	pub visible: bool,
	parent: Option<ObjectId>,
	children: Vec<ObjectId>,
	world: Mat4,
}

impl SceneObject {
	pub fn world(&self) -> Mat4 {
		self.world
	}

	pub fn material(&self) -> Option<&Material> {
		match &self.kind {
			ObjectKind::Mesh { material, .. } => Some(material),
			_ => None,
		}
	}

	pub fn material_mut(&mut self) -> Option<&mut Material> {
		match &mut self.kind {
			ObjectKind::Mesh { material, .. } => Some(material),
			_ => None,
		}
	}
}

/// Objects are stored parent-first, so one forward pass refreshes every world matrix.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
	objects: Vec<SceneObject>,
}

impl SceneGraph {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.objects.len()
	}

	pub fn add(
		&mut self,
		name: impl Into<String>,
		transform: Transform,
		kind: ObjectKind,
		parent: Option<ObjectId>,
	) -> ObjectId {
		let id = ObjectId(self.objects.len());
		let world = match parent {
			Some(p) => self.objects[p.0].world * transform.matrix(),
			None => transform.matrix(),
		};
		self.objects.push(SceneObject {
			name: name.into(),
			transform,
			kind,
			visible: true,
			parent,
			children: Vec::new(),
			world,
		});
		if let Some(p) = parent {
			self.objects[p.0].children.push(id);
		}
		id
	}

	pub fn add_group(&mut self, name: impl Into<String>, parent: Option<ObjectId>) -> ObjectId {
		self.add(name, Transform::default(), ObjectKind::Group, parent)
	}

	/// Spawns an independent copy of `template` under `parent`.
	pub fn instantiate(&mut self, template: &Template, parent: Option<ObjectId>) -> ObjectId {
		let id = self.add(
			template.name.clone(),
			template.transform,
			template.kind.clone(),
			parent,
		);
		for child in &template.children {
			self.instantiate(child, Some(id));
		}
		id
	}

	pub fn get(&self, id: ObjectId) -> &SceneObject {
		&self.objects[id.0]
	}

	pub fn get_mut(&mut self, id: ObjectId) -> &mut SceneObject {
		&mut self.objects[id.0]
	}

	pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
		self.objects.iter().enumerate().map(|(i, o)| (ObjectId(i), o))
	}

	pub fn update_world_matrices(&mut self) {
		for i in 0..self.objects.len() {
			let local = self.objects[i].transform.matrix();
			self.objects[i].world = match self.objects[i].parent {
				Some(p) => self.objects[p.0].world * local,
				None => local,
			};
		}
	}

	/// Refreshes `id` and its descendants; ancestors must already be current.
	pub fn update_subtree(&mut self, id: ObjectId) {
		for d in self.descendants(id) {
			let local = self.objects[d.0].transform.matrix();
			self.objects[d.0].world = match self.objects[d.0].parent {
				Some(p) => self.objects[p.0].world * local,
				None => local,
			};
		}
	}

	/// `true` when the object and all its ancestors are visible.
	pub fn is_visible(&self, id: ObjectId) -> bool {
		let mut current = Some(id);
		while let Some(c) = current {
			let object = &self.objects[c.0];
			if !object.visible {
				return false;
			}
			current = object.parent;
		}
		true
	}

	pub fn world_position(&self, id: ObjectId) -> Vec3 {
		self.objects[id.0].world.w_axis.truncate()
	}

	/// Depth-first list of `id` and everything below it.
	pub fn descendants(&self, id: ObjectId) -> Vec<ObjectId> {
		let mut out = Vec::new();
		let mut stack = vec![id];
		while let Some(current) = stack.pop() {
			out.push(current);
			stack.extend(self.objects[current.0].children.iter().rev());
		}
		out
	}

	pub fn find_descendant(&self, id: ObjectId, name: &str) -> Option<ObjectId> {
		self.descendants(id)
			.into_iter()
			.find(|d| self.objects[d.0].name == name)
	}

	pub fn meshes_under(&self, id: ObjectId) -> Vec<ObjectId> {
		self.descendants(id)
			.into_iter()
			.filter(|d| matches!(self.objects[d.0].kind, ObjectKind::Mesh { .. }))
			.collect()
	}

	/// World box over the local bounds of every mesh in the subtree.
	/// Uses the cached world matrices.
	pub fn world_aabb(&self, id: ObjectId) -> Aabb {
		let mut aabb = Aabb::EMPTY;
		for d in self.descendants(id) {
			let object = &self.objects[d.0];
			if let ObjectKind::Mesh { geometry, .. } = &object.kind {
				aabb.union(&geometry.bounds.transformed(&object.world));
			}
		}
		aabb
	}

	/// Rotates the object so its +Z axis points at `target` in world space.
	pub fn look_at(&mut self, id: ObjectId, target: Vec3) {
		let position = self.world_position(id);
		let forward = target - position;
		if forward.length_squared() <= f32::EPSILON {
			return;
		}
		let z = forward.normalize();
		let up = if z.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
		let x = up.cross(z).normalize();
		let y = z.cross(x);
		let world_rotation = Quat::from_mat3(&Mat3::from_cols(x, y, z));
		let parent_rotation = match self.objects[id.0].parent {
			Some(p) => self.objects[p.0].world.to_scale_rotation_translation().1,
			None => Quat::IDENTITY,
		};
		self.objects[id.0].transform.rotation = parent_rotation.inverse() * world_rotation;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn unit_cube() -> Rc<Geometry> {
		let positions = Aabb {
			min: Vec3::splat(-0.5),
			max: Vec3::splat(0.5),
		}
		.corners()
		.to_vec();
		Rc::new(Geometry::new(positions, vec![0, 1, 2]))
	}

	#[test]
	fn instances_do_not_share_materials() {
		let template = Template::group("root").with_child(Template::mesh(
			"cube",
			unit_cube(),
			Material::lit(Color::WHITE),
		));
		let mut scene = SceneGraph::new();
		let a = scene.instantiate(&template, None);
		let b = scene.instantiate(&template, None);
		let mesh_a = scene.find_descendant(a, "cube").unwrap();
		let mesh_b = scene.find_descendant(b, "cube").unwrap();
		scene.get_mut(mesh_a).material_mut().unwrap().color = Color::BLACK;
		assert_eq!(
			scene.get_mut(mesh_b).material_mut().unwrap().color,
			Color::WHITE
		);
		assert_eq!(scene.len(), 4);
	}

	#[test]
	fn world_matrices_compose_down_the_tree() {
		let mut scene = SceneGraph::new();
		let root = scene.add(
			"root",
			Transform {
				rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
				..Transform::from_translation(Vec3::new(1.0, 0.0, 0.0))
			},
			ObjectKind::Group,
			None,
		);
		let child = scene.add(
			"child",
			Transform::from_translation(Vec3::new(0.0, 0.0, 2.0)),
			ObjectKind::Group,
			Some(root),
		);
		scene.get_mut(root).transform.translation.y = 3.0;
		scene.update_world_matrices();
		let p = scene.world_position(child);
		assert!((p - Vec3::new(3.0, 3.0, 0.0)).length() < 1e-5);
	}

	#[test]
	fn world_aabb_tracks_translation() {
		let mut scene = SceneGraph::new();
		let root = scene.add_group("root", None);
		scene.add(
			"cube",
			Transform::from_translation(Vec3::new(0.0, 2.0, 0.0)),
			ObjectKind::Mesh {
				geometry: unit_cube(),
				material: Material::unlit(Color::WHITE),
			},
			Some(root),
		);
		scene.update_world_matrices();
		let aabb = scene.world_aabb(root);
		assert!((aabb.min - Vec3::new(-0.5, 1.5, -0.5)).length() < 1e-5);
		assert!((aabb.max - Vec3::new(0.5, 2.5, 0.5)).length() < 1e-5);
		let empty = scene.add_group("empty", None);
		assert!(scene.world_aabb(empty).is_empty());
	}

	#[test]
	fn look_at_points_z_axis_at_target() {
		let mut scene = SceneGraph::new();
		let parent = scene.add(
			"parent",
			Transform {
				rotation: Quat::from_rotation_y(1.0),
				..Default::default()
			},
			ObjectKind::Group,
			None,
		);
		let label = scene.add(
			"label",
			Transform::from_translation(Vec3::new(1.0, 0.0, 0.0)),
			ObjectKind::Group,
			Some(parent),
		);
		scene.update_world_matrices();
		let target = Vec3::new(0.0, 6.0, 12.0);
		scene.look_at(label, target);
		scene.update_world_matrices();
		let world = scene.get(label).world();
		let z = world.z_axis.truncate().normalize();
		let expected = (target - scene.world_position(label)).normalize();
		assert!(z.dot(expected) > 0.9999);
	}

	#[test]
	fn hidden_ancestor_hides_subtree() {
		let mut scene = SceneGraph::new();
		let root = scene.add_group("root", None);
		let child = scene.add_group("child", Some(root));
		scene.get_mut(root).visible = false;
		assert!(!scene.is_visible(child));
	}
}
