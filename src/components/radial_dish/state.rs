use std::rc::Rc;

use super::camera::{OrbitControls, PerspectiveCamera, to_ndc};
use super::config::DishConfig;
use super::dish::{DishController, DishFactories};
use super::error::DishResult;
use super::events::DishEvent;
use super::factories::Font;
use super::layout::group_by_type;
use super::particles::Particles;
use super::types::Entity;

const ZOOM_STEP: f32 = 1.1;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
}

/// Camera, controls, backdrop and the dish, driven one tick per frame.
#[derive(Debug)]
pub struct MainScene {
	pub config: DishConfig,
	pub camera: PerspectiveCamera,
	pub controls: OrbitControls,
	pub particles: Particles,
	pub dish: Option<DishController>,
	pub drag: DragState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
}

impl MainScene {
	pub fn new(config: DishConfig, width: f64, height: f64, seed: u64) -> Self {
		let mut camera = PerspectiveCamera::new(
			config.camera_position,
			config.wide_fov,
			1.0,
			config.near,
			config.far,
		);
		camera.fit(width, height, config.wide_fov, config.tall_fov);
		let controls = OrbitControls::new(&camera, &config);
		let particles = Particles::from_config(&config, seed);
		Self {
			config,
			camera,
			controls,
			particles,
			dish: None,
			drag: DragState::default(),
			width,
			height,
			animation_running: true,
		}
	}

	/// Builds the dish from the dataset, replacing any previous one. The old
	/// dish ends its hover and selection first so listeners drop stale entities.
	/// Without a font the nodes come up unlabeled.
	pub fn set_data(&mut self, entities: &[Entity], font: Option<Rc<Font>>) -> DishResult<()> {
		if let Some(mut previous) = self.dish.take() {
			previous.release();
		}
		let sections = group_by_type(entities);
		let mut factories = DishFactories::new(&self.config, sections.len());
		if let Some(font) = font {
			factories.labels.set_font(font);
		}
		let mut dish = DishController::build(self.config.clone(), sections, &mut factories)?;
		dish.update(0.0, &self.camera);
		self.dish = Some(dish);
		Ok(())
	}

	/// Registers `listener` on the current dish. False when there is none.
	pub fn subscribe(&mut self, listener: impl FnMut(&DishEvent) + 'static) -> bool {
		match &mut self.dish {
			Some(dish) => {
				dish.subscribe(listener);
				true
			}
			None => false,
		}
	}

	/// Canvas cursor: grabbing while orbiting, a pointer over a node.
	pub fn cursor(&self) -> &'static str {
		if self.drag.active {
			"grabbing"
		} else if self.dish.as_ref().is_some_and(|d| d.hovered().is_some()) {
			"pointer"
		} else {
			"grab"
		}
	}

	pub fn tick(&mut self, dt: f32) {
		self.particles.update();
		self.controls.apply(&mut self.camera);
		if let Some(dish) = &mut self.dish {
			dish.update(dt, &self.camera);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.camera
			.fit(width, height, self.config.wide_fov, self.config.tall_fov);
	}

	pub fn on_mouse_down(&mut self, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			last_x: x,
			last_y: y,
		};
		let ndc = to_ndc(x, y, self.width, self.height);
		if let Some(dish) = &mut self.dish {
			dish.on_mouse_down(ndc, &self.camera);
		}
	}

	pub fn on_mouse_move(&mut self, x: f64, y: f64) {
		if self.drag.active {
			self.controls
				.rotate(x - self.drag.last_x, y - self.drag.last_y);
			self.drag.last_x = x;
			self.drag.last_y = y;
		}
		let ndc = to_ndc(x, y, self.width, self.height);
		if let Some(dish) = &mut self.dish {
			dish.on_mouse_move(ndc, &self.camera);
		}
	}

	pub fn on_mouse_up(&mut self) {
		self.drag.active = false;
	}

	pub fn on_mouse_leave(&mut self) {
		self.drag.active = false;
		if let Some(dish) = &mut self.dish {
			dish.on_mouse_leave();
		}
	}

	pub fn on_wheel(&mut self, delta_y: f64) {
		let factor = if delta_y > 0.0 {
			ZOOM_STEP
		} else {
			1.0 / ZOOM_STEP
		};
		self.controls.zoom(factor);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::radial_dish::factories::font::test_font;
	use crate::components::radial_dish::types::parse_entities;

	fn entities() -> Vec<Entity> {
		parse_entities(
			r#"[
			{"id":"e1","type":"Character","position":{"distance":0,"angle":0},
			 "connections":[{"id":"e2","relationship":"ally","strength":0.8}]},
			{"id":"e2","type":"Location","position":{"distance":1,"angle":60},"connections":[]}
		]"#,
		)
		.unwrap()
	}

	fn scene() -> MainScene {
		MainScene::new(DishConfig::default(), 800.0, 600.0, 42)
	}

	fn pixel_of(scene: &MainScene, id: &str) -> (f64, f64) {
		let dish = scene.dish.as_ref().unwrap();
		let center = dish.node(id).unwrap().bounding_box().center();
		let ndc = scene.camera.project(center).unwrap();
		(
			(ndc.x as f64 + 1.0) * 0.5 * scene.width,
			(1.0 - ndc.y as f64) * 0.5 * scene.height,
		)
	}

	#[test]
	fn fov_tracks_viewport() {
		let mut scene = scene();
		assert_eq!(scene.camera.fov_deg, 75.0);
		scene.resize(400.0, 900.0);
		assert_eq!(scene.camera.fov_deg, 120.0);
		assert_eq!((scene.width, scene.height), (400.0, 900.0));
	}

	#[test]
	fn builds_dish_with_and_without_font() {
		let mut scene = scene();
		scene.set_data(&entities(), Some(Rc::new(test_font()))).unwrap();
		let dish = scene.dish.as_ref().unwrap();
		assert_eq!(dish.nodes().len(), 2);
		assert!(dish.nodes().iter().all(|n| n.has_label()));

		scene.set_data(&entities(), None).unwrap();
		let dish = scene.dish.as_ref().unwrap();
		assert!(dish.nodes().iter().all(|n| !n.has_label()));
	}

	#[test]
	fn pointer_click_selects_node() {
		let mut scene = scene();
		scene.set_data(&entities(), None).unwrap();
		let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
		let sink = seen.clone();
		assert!(scene.subscribe(move |e| sink.borrow_mut().push(e.name())));

		let (x, y) = pixel_of(&scene, "e1");
		scene.on_mouse_down(x, y);
		scene.on_mouse_up();
		let dish = scene.dish.as_ref().unwrap();
		assert_eq!(dish.selected().map(|n| n.id()), Some("e1"));
		assert_eq!(dish.connected_ids(), vec!["e2"]);
		assert_eq!(seen.borrow().as_slice(), ["nodeSelected"]);
	}

	#[test]
	fn replacing_data_clears_hover_and_selection() {
		let mut scene = scene();
		assert!(!scene.subscribe(|_| {}));
		scene.set_data(&entities(), None).unwrap();
		let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
		let sink = seen.clone();
		scene.subscribe(move |e| sink.borrow_mut().push(e.name()));

		let (x, y) = pixel_of(&scene, "e1");
		scene.on_mouse_down(x, y);
		scene.on_mouse_up();
		scene.tick(0.0);
		assert_eq!(scene.cursor(), "pointer");
		assert_eq!(seen.borrow().as_slice(), ["nodeSelected", "nodeHover"]);

		scene.set_data(&entities(), None).unwrap();
		assert_eq!(
			seen.borrow().as_slice(),
			["nodeSelected", "nodeHover", "nodeOut", "nodeUnselected"]
		);
		let dish = scene.dish.as_ref().unwrap();
		assert!(dish.selected().is_none());
		assert!(dish.hovered().is_none());
		assert_eq!(scene.cursor(), "grab");
	}

	#[test]
	fn drag_orbits_and_wheel_zooms() {
		let mut scene = scene();
		let start = scene.camera.position;
		let radius = scene.controls.radius;
		scene.on_mouse_down(10.0, 10.0);
		assert_eq!(scene.cursor(), "grabbing");
		scene.on_mouse_move(110.0, 10.0);
		scene.on_mouse_up();
		scene.on_mouse_move(300.0, 10.0);
		scene.tick(0.016);
		assert_ne!(scene.camera.position, start);
		assert!((scene.camera.position.length() - radius).abs() < 1e-3);

		scene.on_wheel(120.0);
		scene.tick(0.016);
		assert!((scene.camera.position.length() - radius * ZOOM_STEP).abs() < 1e-3);
	}

	#[test]
	fn tick_drifts_particles() {
		let mut scene = scene();
		let before = scene.particles.positions[0].y;
		scene.tick(0.016);
		let after = scene.particles.positions[0].y;
		assert!(after > before || after < 0.0);
	}
}
