use std::collections::HashMap;

use super::scene::{ObjectId, SceneGraph};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenField {
	PositionY,
}

impl TweenField {
	fn read(self, scene: &SceneGraph, target: ObjectId) -> f32 {
		match self {
			TweenField::PositionY => scene.get(target).transform.translation.y,
		}
	}

	fn write(self, scene: &mut SceneGraph, target: ObjectId, value: f32) {
		match self {
			TweenField::PositionY => scene.get_mut(target).transform.translation.y = value,
		}
	}
}

#[derive(Clone, Debug)]
struct Tween {
	start: Option<f32>,
	end: f32,
	duration: f32,
	delay: f32,
	elapsed: f32,
}

fn ease_out_quad(t: f32) -> f32 {
	1.0 - (1.0 - t).powi(2)
}

/// Time-based property transitions, one per `(target, field)`.
/// Scheduling onto a pair that is already animating replaces the old request.
#[derive(Clone, Debug, Default)]
pub struct Tweener {
	active: HashMap<(ObjectId, TweenField), Tween>,
}

impl Tweener {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn schedule(
		&mut self,
		target: ObjectId,
		field: TweenField,
		end: f32,
		duration: f32,
		delay: f32,
	) {
		self.active.insert(
			(target, field),
			Tween {
				start: None,
				end,
				duration: duration.max(0.0),
				delay: delay.max(0.0),
				elapsed: 0.0,
			},
		);
	}

	#[cfg(test)]
	pub fn is_animating(&self, target: ObjectId, field: TweenField) -> bool {
		self.active.contains_key(&(target, field))
	}

	#[cfg(test)]
	pub fn len(&self) -> usize {
		self.active.len()
	}

	#[cfg(test)]
	pub fn is_empty(&self) -> bool {
		self.active.is_empty()
	}

	/// Writes the current interpolated values into `scene`; finished tweens are dropped.
	pub fn advance(&mut self, dt: f32, scene: &mut SceneGraph) {
		self.active.retain(|&(target, field), tween| {
			tween.elapsed += dt;
			let running = tween.elapsed - tween.delay;
			if running < 0.0 {
				return true;
			}
			// start is sampled once the delay is over
			let start = *tween.start.get_or_insert_with(|| field.read(scene, target));
			let t = if tween.duration <= 0.0 {
				1.0
			} else {
				(running / tween.duration).min(1.0)
			};
			field.write(scene, target, start + (tween.end - start) * ease_out_quad(t));
			t < 1.0
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scene_with_object() -> (SceneGraph, ObjectId) {
		let mut scene = SceneGraph::new();
		let id = scene.add_group("obj", None);
		(scene, id)
	}

	fn y(scene: &SceneGraph, id: ObjectId) -> f32 {
		scene.get(id).transform.translation.y
	}

	#[test]
	fn reaches_end_after_duration() {
		let (mut scene, id) = scene_with_object();
		let mut tweens = Tweener::new();
		tweens.schedule(id, TweenField::PositionY, 2.5, 0.3, 0.0);
		tweens.advance(0.15, &mut scene);
		let mid = y(&scene, id);
		assert!(mid > 1.25 && mid < 2.5, "eased midpoint {mid}");
		tweens.advance(0.2, &mut scene);
		assert_eq!(y(&scene, id), 2.5);
		assert!(tweens.is_empty());
	}

	#[test]
	fn delay_holds_value() {
		let (mut scene, id) = scene_with_object();
		let mut tweens = Tweener::new();
		tweens.schedule(id, TweenField::PositionY, 1.0, 0.3, 0.3);
		tweens.advance(0.2, &mut scene);
		assert_eq!(y(&scene, id), 0.0);
		assert!(tweens.is_animating(id, TweenField::PositionY));
		tweens.advance(0.5, &mut scene);
		assert_eq!(y(&scene, id), 1.0);
	}

	#[test]
	fn last_write_wins() {
		let (mut scene, id) = scene_with_object();
		let mut tweens = Tweener::new();
		tweens.schedule(id, TweenField::PositionY, 2.5, 0.3, 0.0);
		tweens.advance(0.1, &mut scene);
		let partial = y(&scene, id);
		tweens.schedule(id, TweenField::PositionY, 0.0, 0.3, 0.0);
		assert_eq!(tweens.len(), 1);
		tweens.advance(0.01, &mut scene);
		assert!(y(&scene, id) < partial);
		tweens.advance(1.0, &mut scene);
		assert_eq!(y(&scene, id), 0.0);
	}

	#[test]
	fn zero_duration_snaps() {
		let (mut scene, id) = scene_with_object();
		let mut tweens = Tweener::new();
		tweens.schedule(id, TweenField::PositionY, -1.0, 0.0, 0.0);
		tweens.advance(0.0, &mut scene);
		assert_eq!(y(&scene, id), -1.0);
	}
}
