use glam::{Vec2, Vec3};

use super::camera::{PerspectiveCamera, Ray};
use super::config::DishConfig;
use super::error::DishResult;
use super::events::{DishEvent, Subscribers};
use super::factories::{LabelFactory, NodeFactory, RingsFactory, SliceFactory};
use super::layout::to_cartesian;
use super::node::{Node, NodePalette};
use super::scene::{ObjectId, SceneGraph};
use super::tween::Tweener;
use super::types::{Entity, TypeSection};

/// One type section attached to the disk.
#[derive(Clone, Debug)]
pub struct Slice {
	pub section: TypeSection,
	pub root: ObjectId,
}

/// Template builders used while assembling a dish.
#[derive(Clone, Debug)]
pub struct DishFactories {
	pub nodes: NodeFactory,
	pub slices: SliceFactory,
	pub rings: RingsFactory,
	pub labels: LabelFactory,
}

impl DishFactories {
	pub fn new(config: &DishConfig, section_count: usize) -> Self {
		Self {
			nodes: NodeFactory::new(),
			slices: SliceFactory::new(
				config.radius,
				section_count,
				config.slice_segments,
				config.slice_colors.clone(),
			),
			rings: RingsFactory::new(config.ring_width, config.ring_segments, config.ring_color),
			labels: LabelFactory::new(),
		}
	}
}

/// The assembled dish plus its selection and hover state.
///
/// At most one node is selected and at most one is hovered. Connected nodes
/// always come from the selected node's connection list.
#[derive(Debug)]
pub struct DishController {
	config: DishConfig,
	scene: SceneGraph,
	tweens: Tweener,
	group: ObjectId,
	slices: Vec<Slice>,
	nodes: Vec<Node>,
	pointer: Option<Vec2>,
	ray: Option<Ray>,
	hovered: Option<usize>,
	subscribers: Subscribers,
}

impl DishController {
	pub fn new(config: DishConfig) -> Self {
		let mut scene = SceneGraph::new();
		let group = scene.add_group("dish", None);
		Self {
			config,
			scene,
			tweens: Tweener::new(),
			group,
			slices: Vec::new(),
			nodes: Vec::new(),
			pointer: None,
			ray: None,
			hovered: None,
			subscribers: Subscribers::new(),
		}
	}

	/// Slices, then rings, then nodes.
	pub fn build(
		config: DishConfig,
		sections: Vec<TypeSection>,
		factories: &mut DishFactories,
	) -> DishResult<Self> {
		let mut dish = Self::new(config);
		dish.create_dish_group(sections, &mut factories.slices);
		dish.create_rings(&factories.rings);
		dish.add_nodes(&mut factories.nodes, &factories.labels)?;
		log::info!(
			"dish assembled: {} sections, {} nodes, {} scene objects",
			dish.slices.len(),
			dish.nodes.len(),
			dish.scene.len()
		);
		Ok(dish)
	}

	pub fn create_dish_group(&mut self, sections: Vec<TypeSection>, factory: &mut SliceFactory) {
		factory.create_meshes();
		for (index, section) in sections.into_iter().enumerate() {
			let root = self.scene.instantiate(&factory.slice(index), Some(self.group));
			log::debug!("slice {index} ({}) holds {} entities", section.kind, section.entities.len());
			self.slices.push(Slice { section, root });
		}
	}

	pub fn create_rings(&mut self, factory: &RingsFactory) {
		let template = factory
			.rings(self.config.radius, self.config.num_rings)
			.with_translation(Vec3::new(0.0, self.config.ring_offset, 0.0));
		self.scene.instantiate(&template, Some(self.group));
	}

	/// One node per entity, parented to its section's slice. Labels are only
	/// attached when the label factory has a font.
	pub fn add_nodes(&mut self, factory: &mut NodeFactory, labels: &LabelFactory) -> DishResult<()> {
		factory.create_meshes();
		if !labels.is_ready() {
			log::warn!("font not ready, building nodes without labels");
		}
		let palette = NodePalette::from(&self.config);
		for slice in &self.slices {
			for entity in &slice.section.entities {
				let (x, z) = to_cartesian(
					entity.position.angle,
					entity.position.distance,
					self.config.num_rings,
					self.config.radius,
				);
				let template = factory
					.node_model(entity.kind)
					.with_translation(Vec3::new(x, 0.0, z));
				let root = self.scene.instantiate(&template, Some(slice.root));
				let mut node = Node::new(entity.clone(), root, &mut self.scene, palette)?;
				if labels.is_ready() {
					let label = self.scene.instantiate(&labels.label(&entity.label())?, Some(root));
					node.set_label(label, &mut self.scene)?;
				}
				self.nodes.push(node);
			}
		}
		Ok(())
	}

	pub fn scene(&self) -> &SceneGraph {
		&self.scene
	}

	pub fn hovered(&self) -> Option<&Node> {
		self.hovered.map(|i| &self.nodes[i])
	}

	pub fn subscribe(&mut self, listener: impl FnMut(&DishEvent) + 'static) {
		self.subscribers.subscribe(listener);
	}

	pub fn on_mouse_move(&mut self, ndc: Vec2, camera: &PerspectiveCamera) {
		self.pointer = Some(ndc);
		self.ray = Ray::from_camera(ndc, camera);
	}

	/// Pointer left the viewport; hover ends on the next update.
	pub fn on_mouse_leave(&mut self) {
		self.pointer = None;
		self.ray = None;
	}

	pub fn on_mouse_down(&mut self, ndc: Vec2, camera: &PerspectiveCamera) {
		self.on_mouse_move(ndc, camera);
		self.check_click_position();
	}

	/// First node in assembly order whose bounding box the ray crosses.
	fn pick(&self) -> Option<usize> {
		let ray = self.ray?;
		self.nodes
			.iter()
			.position(|n| ray.intersects_box(&n.bounding_box()))
	}

	/// Hover events fire on transitions only.
	pub fn check_hover_position(&mut self) {
		let hit = self.pick();
		if hit == self.hovered {
			return;
		}
		if let Some(previous) = self.hovered.take() {
			self.nodes[previous].on_hover_end(&mut self.scene, &mut self.tweens);
			self.subscribers.emit(&DishEvent::NodeOut);
		}
		if let Some(index) = hit {
			let node = &mut self.nodes[index];
			node.set_hovered(true);
			node.on_mouse_over(&mut self.scene);
			let entity = node.entity.clone();
			self.hovered = Some(index);
			self.subscribers.emit(&DishEvent::NodeHover(entity));
		}
	}

	pub fn check_click_position(&mut self) {
		if let Some(index) = self.pick() {
			self.toggle_selection(index);
		}
	}

	/// Selects the node at `index`, or clears the selection when it already is.
	pub fn toggle_selection(&mut self, index: usize) {
		if index >= self.nodes.len() {
			return;
		}
		if self.nodes[index].is_selected {
			self.unselect(index);
		} else {
			self.select(index);
		}
	}

	fn select(&mut self, index: usize) {
		self.reset_entities();
		self.reset_connections();
		let node = &mut self.nodes[index];
		node.is_selected = true;
		node.on_click(&mut self.scene, &mut self.tweens);
		let entity = node.entity.clone();
		self.select_connections(&entity);
		self.restore_hover_tint();
		log::debug!("{} -> {:?}", entity.id, self.nodes[index].state());
		self.subscribers.emit(&DishEvent::NodeSelected(entity));
	}

	fn unselect(&mut self, index: usize) {
		self.reset_connections();
		let node = &mut self.nodes[index];
		node.is_selected = false;
		node.on_mouse_out(&mut self.scene, &mut self.tweens);
		self.restore_hover_tint();
		let node = &self.nodes[index];
		log::debug!("{} -> {:?}", node.id(), node.state());
		self.subscribers.emit(&DishEvent::NodeUnselected);
	}

	/// Ends hover and selection with their events. Called on a dish that is
	/// about to be replaced so listeners drop what they show.
	pub fn release(&mut self) {
		if let Some(index) = self.hovered.take() {
			self.nodes[index].on_hover_end(&mut self.scene, &mut self.tweens);
			self.subscribers.emit(&DishEvent::NodeOut);
		}
		if let Some(index) = self.nodes.iter().position(|n| n.is_selected) {
			self.unselect(index);
		}
		self.pointer = None;
		self.ray = None;
	}

	/// Linear scan per connection; ids with no node are skipped.
	fn select_connections(&mut self, selected: &Entity) {
		for connection in &selected.connections {
			match self.nodes.iter_mut().find(|n| n.id() == connection.id) {
				Some(node) => {
					node.is_connected = true;
					node.connect(Some(connection), &mut self.scene, &mut self.tweens);
				}
				None => log::debug!("{} links to unknown id {}", selected.id, connection.id),
			}
		}
	}

	pub fn reset_connections(&mut self) {
		for node in self.nodes.iter_mut().filter(|n| n.is_connected) {
			node.is_connected = false;
			node.on_mouse_out(&mut self.scene, &mut self.tweens);
		}
	}

	pub fn reset_entities(&mut self) {
		for node in self.nodes.iter_mut().filter(|n| n.is_selected) {
			node.is_selected = false;
			node.on_mouse_out(&mut self.scene, &mut self.tweens);
		}
	}

	fn restore_hover_tint(&mut self) {
		if let Some(index) = self.hovered {
			self.nodes[index].on_mouse_over(&mut self.scene);
		}
	}

	/// Tweens, world matrices, per-node billboards and boxes, then hover picking.
	pub fn update(&mut self, dt: f32, camera: &PerspectiveCamera) {
		self.tweens.advance(dt, &mut self.scene);
		self.scene.update_world_matrices();
		for node in &mut self.nodes {
			node.update(&mut self.scene, camera.position);
		}
		if let Some(ndc) = self.pointer {
			self.ray = Ray::from_camera(ndc, camera);
		}
		self.check_hover_position();
	}
}

#[cfg(test)]
impl DishController {
	pub fn slices(&self) -> &[Slice] {
		&self.slices
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id() == id)
	}

	pub fn selected(&self) -> Option<&Node> {
		self.nodes.iter().find(|n| n.is_selected)
	}

	pub fn connected_ids(&self) -> Vec<&str> {
		self.nodes
			.iter()
			.filter(|n| n.is_connected)
			.map(|n| n.id())
			.collect()
	}

	pub fn is_animating(&self) -> bool {
		!self.tweens.is_empty()
	}
}
