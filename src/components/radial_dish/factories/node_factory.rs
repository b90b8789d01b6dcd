use std::rc::Rc;

use glam::Vec3;

use super::primitives;
use crate::components::radial_dish::color::Color;
use crate::components::radial_dish::scene::{Material, Template};
use crate::components::radial_dish::types::EntityType;

pub const MODEL_GROUP: &str = "nodeModel";
pub const SHADOW_GROUP: &str = "shadow";

const GEOM_RADIUS: f32 = 0.5;
const SEGMENTS: u32 = 12;
const SHADOW_OPACITY: f32 = 0.7;

#[derive(Clone, Debug)]
struct NodeTemplates {
	character: Template,
	location: Template,
	object: Template,
	shadow: Template,
}

impl NodeTemplates {
	fn build() -> Self {
		log::debug!("building node templates");
		Self {
			character: character_model(),
			location: location_model(),
			object: object_model(),
			shadow: shadow_model(),
		}
	}
}

/// Builds the per-type node shapes once and hands out copies.
#[derive(Clone, Debug, Default)]
pub struct NodeFactory {
	templates: Option<NodeTemplates>,
}

impl NodeFactory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_built(&self) -> bool {
		self.templates.is_some()
	}

	pub fn create_meshes(&mut self) {
		if self.is_built() {
			return;
		}
		self.templates = Some(NodeTemplates::build());
	}

	/// Model group plus shadow for `kind`, ready to instantiate.
	pub fn node_model(&mut self, kind: EntityType) -> Template {
		let t = self.templates.get_or_insert_with(NodeTemplates::build);
		let model = match kind {
			EntityType::Character => &t.character,
			EntityType::Location => &t.location,
			EntityType::Object => &t.object,
		};
		Template::group("node")
			.with_child(model.clone())
			.with_child(t.shadow.clone())
	}
}

fn base_color(kind: EntityType) -> Color {
	match kind {
		EntityType::Character => Color::from_hex(0xff0000),
		EntityType::Location => Color::from_hex(0xffffff),
		EntityType::Object => Color::from_hex(0x0066ff),
	}
}

fn character_model() -> Template {
	let material = Material::lit(base_color(EntityType::Character));
	let head = Rc::new(primitives::uv_sphere(GEOM_RADIUS * 0.7, SEGMENTS, SEGMENTS / 2));
	let body = Rc::new(primitives::cylinder(
		GEOM_RADIUS * 0.5,
		GEOM_RADIUS * 0.5,
		1.0,
		SEGMENTS,
	));
	Template::group(MODEL_GROUP)
		.with_child(Template::mesh("head", head, material).with_translation(Vec3::new(0.0, 0.9, 0.0)))
		.with_child(Template::mesh("body", body, material).with_translation(Vec3::new(0.0, 0.2, 0.0)))
}

/// Pin: sphere on top of a downward cone.
fn location_model() -> Template {
	let material = Material::lit(base_color(EntityType::Location));
	let sphere = Rc::new(primitives::uv_sphere(GEOM_RADIUS * 0.65, SEGMENTS, SEGMENTS / 2));
	let cone = Rc::new(primitives::cylinder(GEOM_RADIUS * 0.7, 0.0, GEOM_RADIUS * 1.7, SEGMENTS));
	Template::group(MODEL_GROUP)
		.with_child(Template::mesh("sphere", sphere, material).with_translation(Vec3::new(0.0, 0.45, 0.0)))
		.with_child(Template::mesh("cone", cone, material))
}

fn object_model() -> Template {
	let material = Material::lit(base_color(EntityType::Object));
	let cube = Rc::new(primitives::cuboid(GEOM_RADIUS * 1.4));
	Template::group(MODEL_GROUP).with_child(Template::mesh("cube", cube, material))
}

fn shadow_model() -> Template {
	let disc = Rc::new(primitives::disc(GEOM_RADIUS * 1.5, SEGMENTS * 2));
	let material = Material::unlit(Color::BLACK).with_opacity(SHADOW_OPACITY);
	Template::group(SHADOW_GROUP)
		.with_translation(Vec3::new(0.0, 0.02, 0.0))
		.with_child(Template::mesh("shadowMesh", disc, material))
}
