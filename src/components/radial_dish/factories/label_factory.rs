use std::rc::Rc;

use glam::Vec3;

use super::font::Font;
use super::primitives;
use crate::components::radial_dish::color::Color;
use crate::components::radial_dish::error::{DishError, DishResult};
use crate::components::radial_dish::scene::{Material, ObjectKind, Template};

pub const TEXT: &str = "text";
pub const FRAME: &str = "frame";

const TEXT_SIZE: f32 = 0.15;
const TEXT_DEPTH: f32 = 0.01;
const FRAME_SCALE: f32 = 2.5;

/// Text billboards. Refuses to build anything until a font is set.
#[derive(Clone, Debug, Default)]
pub struct LabelFactory {
	font: Option<Rc<Font>>,
}

impl LabelFactory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn set_font(&mut self, font: Rc<Font>) {
		self.font = Some(font);
	}

	pub fn is_ready(&self) -> bool {
		self.font.is_some()
	}

	/// Group with the text centered over a frame sized to `half extents * 2.5`.
	pub fn label(&self, text: &str) -> DishResult<Template> {
		let font = self.font.as_ref().ok_or(DishError::FontNotReady)?;
		let half = font.measure(text, TEXT_SIZE, TEXT_DEPTH) * 0.5;
		let frame = primitives::plane(half.x * FRAME_SCALE, half.y * FRAME_SCALE);

		let text = Template {
			name: TEXT.into(),
			transform: Default::default(),
			kind: ObjectKind::Text {
				content: text.to_string(),
				size: TEXT_SIZE,
				family: font.family_name.clone(),
				color: Color::from_hex(0xff0000),
			},
			children: Vec::new(),
		}
		.with_translation(Vec3::new(0.0, 0.0, half.z));

		Ok(Template::group("label")
			.with_child(text)
			.with_child(
				Template::mesh(FRAME, Rc::new(frame), Material::unlit(Color::from_hex(0xff9100)))
					.with_translation(Vec3::new(0.0, 0.0, -0.01)),
			))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::radial_dish::factories::font::test_font;

	#[test]
	fn label_requires_font() {
		let factory = LabelFactory::new();
		assert!(!factory.is_ready());
		assert!(matches!(factory.label("x"), Err(DishError::FontNotReady)));
	}

	#[test]
	fn frame_scales_half_extents() {
		let mut factory = LabelFactory::new();
		factory.set_font(Rc::new(test_font()));
		let label = factory.label("A-A").unwrap();
		let ObjectKind::Mesh { geometry, .. } = &label.find(FRAME).unwrap().kind else {
			panic!("frame is a mesh");
		};
		let size = geometry.bounds.size();
		assert!((size.x - 0.225 * 0.5 * 2.5).abs() < 1e-5);
		assert!((size.y - 0.15 * 0.5 * 2.5).abs() < 1e-5);
		let ObjectKind::Text { content, .. } = &label.find(TEXT).unwrap().kind else {
			panic!("text node");
		};
		assert_eq!(content, "A-A");
	}
}
