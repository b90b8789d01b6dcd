use glam::Vec3;

use super::color::Color;
use super::config::DishConfig;
use super::error::{DishError, DishResult};
use super::factories::label_factory::FRAME;
use super::factories::node_factory::{MODEL_GROUP, SHADOW_GROUP};
use super::scene::{Aabb, ObjectId, SceneGraph};
use super::tween::{TweenField, Tweener};
use super::types::{Connection, Entity};

pub const MODEL_REST_Y: f32 = 0.5;
pub const LABEL_REST_Y: f32 = 2.4;
/// Vertical offset of model and label while selected or connected.
pub const LIFT: f32 = 2.5;
pub const TRANSITION: f32 = 0.3;
pub const CONNECT_DELAY: f32 = 0.3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeState {
	Idle,
	Hovered,
	Selected,
	Connected,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePalette {
	pub connect: Color,
	pub out: Color,
	pub selected: Color,
}

impl From<&DishConfig> for NodePalette {
	fn from(config: &DishConfig) -> Self {
		Self {
			connect: config.connect_color,
			out: config.out_color,
			selected: config.selected_color,
		}
	}
}

#[derive(Clone, Debug)]
struct LabelParts {
	root: ObjectId,
	frame: ObjectId,
}

/// Visual state of one entity. Holds handles into the scene graph, never the objects.
#[derive(Clone, Debug)]
pub struct Node {
	pub entity: Entity,
	pub root: ObjectId,
	pub is_selected: bool,
	pub is_connected: bool,
	is_hovered: bool,
	model: ObjectId,
	model_meshes: Vec<ObjectId>,
	shadow_mesh: ObjectId,
	label: Option<LabelParts>,
	original_color: Color,
	palette: NodePalette,
	bounding_box: Aabb,
}

impl Node {
	/// Wraps an instantiated node template rooted at `root`.
	/// Fails when the template has no mesh under its model group.
	pub fn new(
		entity: Entity,
		root: ObjectId,
		scene: &mut SceneGraph,
		palette: NodePalette,
	) -> DishResult<Self> {
		let model = scene
			.find_descendant(root, MODEL_GROUP)
			.ok_or(DishError::MissingGroup { name: MODEL_GROUP })?;
		let model_meshes = scene.meshes_under(model);
		let Some(&first) = model_meshes.first() else {
			return Err(DishError::MissingMesh {
				entity: entity.id.clone(),
			});
		};
		let original_color = scene
			.get(first)
			.material()
			.map(|m| m.color)
			.unwrap_or(Color::BLACK);
		let shadow = scene
			.find_descendant(root, SHADOW_GROUP)
			.ok_or(DishError::MissingGroup { name: SHADOW_GROUP })?;
		let shadow_mesh = *scene
			.meshes_under(shadow)
			.first()
			.ok_or(DishError::MissingMesh {
				entity: entity.id.clone(),
			})?;

		scene.get_mut(model).transform.translation.y = MODEL_REST_Y;
		scene.update_subtree(root);
		let bounding_box = scene.world_aabb(root);

		let node = Self {
			entity,
			root,
			is_selected: false,
			is_connected: false,
			is_hovered: false,
			model,
			model_meshes,
			shadow_mesh,
			label: None,
			original_color,
			palette,
			bounding_box,
		};
		node.set_shadow_color(scene, palette.out);
		Ok(node)
	}

	pub fn set_label(&mut self, label: ObjectId, scene: &mut SceneGraph) -> DishResult<()> {
		let frame = scene
			.find_descendant(label, FRAME)
			.ok_or(DishError::MissingGroup { name: FRAME })?;
		scene.get_mut(label).transform.translation.y = LABEL_REST_Y;
		self.label = Some(LabelParts { root: label, frame });
		self.set_frame_color(scene, self.palette.out);
		scene.update_subtree(self.root);
		Ok(())
	}

	pub fn id(&self) -> &str {
		&self.entity.id
	}

	pub fn bounding_box(&self) -> Aabb {
		self.bounding_box
	}

	pub fn state(&self) -> NodeState {
		if self.is_selected {
			NodeState::Selected
		} else if self.is_connected {
			NodeState::Connected
		} else if self.is_hovered {
			NodeState::Hovered
		} else {
			NodeState::Idle
		}
	}

	fn set_shader_color(&self, scene: &mut SceneGraph, color: Color, opacity: f32) {
		for &mesh in &self.model_meshes {
			if let Some(m) = scene.get_mut(mesh).material_mut() {
				m.color = color;
				m.opacity = opacity;
			}
		}
	}

	fn set_shadow_color(&self, scene: &mut SceneGraph, color: Color) {
		if let Some(m) = scene.get_mut(self.shadow_mesh).material_mut() {
			m.color = color;
		}
	}

	fn set_frame_color(&self, scene: &mut SceneGraph, color: Color) {
		if let Some(label) = &self.label {
			if let Some(m) = scene.get_mut(label.frame).material_mut() {
				m.color = color;
			}
		}
	}

	fn move_to(&self, tweens: &mut Tweener, lifted: bool, delay: f32) {
		let offset = if lifted { LIFT } else { 0.0 };
		tweens.schedule(
			self.model,
			TweenField::PositionY,
			MODEL_REST_Y + offset,
			TRANSITION,
			delay,
		);
		if let Some(label) = &self.label {
			tweens.schedule(
				label.root,
				TweenField::PositionY,
				LABEL_REST_Y + offset,
				TRANSITION,
				delay,
			);
		}
	}

	pub fn set_hovered(&mut self, hovered: bool) {
		self.is_hovered = hovered;
	}

	/// Connection tint. With a connection the node also lifts and takes the
	/// connection's strength as opacity; without one only the tints are refreshed.
	pub fn connect(
		&mut self,
		connection: Option<&Connection>,
		scene: &mut SceneGraph,
		tweens: &mut Tweener,
	) {
		self.set_frame_color(scene, self.palette.connect);
		self.set_shadow_color(scene, self.palette.connect);
		if let Some(connection) = connection {
			self.move_to(tweens, true, CONNECT_DELAY);
			self.set_shader_color(scene, self.palette.connect, connection.opacity());
		}
	}

	pub fn on_mouse_out(&mut self, scene: &mut SceneGraph, tweens: &mut Tweener) {
		self.move_to(tweens, false, 0.0);
		self.set_shadow_color(scene, self.palette.out);
		self.set_frame_color(scene, self.palette.out);
		self.set_shader_color(scene, self.original_color, 1.0);
	}

	pub fn on_mouse_over(&mut self, scene: &mut SceneGraph) {
		self.set_shadow_color(scene, self.palette.selected);
	}

	/// Drops the hover tint while keeping whatever selection state the node holds.
	pub fn on_hover_end(&mut self, scene: &mut SceneGraph, tweens: &mut Tweener) {
		self.is_hovered = false;
		if self.is_selected {
			self.set_shadow_color(scene, self.palette.out);
		} else if self.is_connected {
			self.connect(None, scene, tweens);
		} else {
			self.on_mouse_out(scene, tweens);
		}
	}

	pub fn on_click(&mut self, scene: &mut SceneGraph, tweens: &mut Tweener) {
		self.move_to(tweens, true, 0.0);
		self.set_frame_color(scene, self.palette.selected);
		self.set_shader_color(scene, self.palette.selected, 1.0);
	}

	/// Faces the label to the camera and refreshes the bounding box.
	/// Run after tweens have been applied for the frame.
	pub fn update(&mut self, scene: &mut SceneGraph, camera_position: Vec3) {
		if let Some(label) = &self.label {
			scene.look_at(label.root, camera_position);
		}
		scene.update_subtree(self.root);
		self.bounding_box = scene.world_aabb(self.root);
	}
}

#[cfg(test)]
impl Node {
	pub fn has_label(&self) -> bool {
		self.label.is_some()
	}

	pub fn label_root(&self) -> Option<ObjectId> {
		self.label.as_ref().map(|l| l.root)
	}

	pub fn model(&self) -> ObjectId {
		self.model
	}

	pub fn is_hovered(&self) -> bool {
		self.is_hovered
	}

	/// Color and opacity currently applied to the model meshes.
	pub fn highlight(&self, scene: &SceneGraph) -> (Color, f32) {
		scene
			.get(self.model_meshes[0])
			.material()
			.map(|m| (m.color, m.opacity))
			.unwrap_or((self.original_color, 1.0))
	}

	pub fn shadow_color(&self, scene: &SceneGraph) -> Color {
		scene
			.get(self.shadow_mesh)
			.material()
			.map(|m| m.color)
			.unwrap_or(self.palette.out)
	}

	pub fn frame_color(&self, scene: &SceneGraph) -> Option<Color> {
		let frame = self.label.as_ref()?.frame;
		scene.get(frame).material().map(|m| m.color)
	}
}
