use std::fmt;

use super::types::Entity;

/// Selection notifications. Payloads are copies taken at dispatch time.
#[derive(Clone, Debug, PartialEq)]
pub enum DishEvent {
	NodeSelected(Entity),
	NodeUnselected,
	NodeHover(Entity),
	NodeOut,
}

impl DishEvent {
	pub fn name(&self) -> &'static str {
		match self {
			DishEvent::NodeSelected(_) => "nodeSelected",
			DishEvent::NodeUnselected => "nodeUnselected",
			DishEvent::NodeHover(_) => "nodeHover",
			DishEvent::NodeOut => "nodeOut",
		}
	}

	pub fn entity(&self) -> Option<&Entity> {
		match self {
			DishEvent::NodeSelected(e) | DishEvent::NodeHover(e) => Some(e),
			DishEvent::NodeUnselected | DishEvent::NodeOut => None,
		}
	}
}

impl fmt::Display for DishEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.entity() {
			Some(entity) => write!(f, "{} id={}", self.name(), entity.id),
			None => f.write_str(self.name()),
		}
	}
}

type Listener = Box<dyn FnMut(&DishEvent)>;

/// Fire-and-forget fan-out to registered callbacks.
#[derive(Default)]
pub struct Subscribers {
	listeners: Vec<Listener>,
}

impl fmt::Debug for Subscribers {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscribers")
			.field("listeners", &self.listeners.len())
			.finish()
	}
}

impl Subscribers {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn subscribe(&mut self, listener: impl FnMut(&DishEvent) + 'static) {
		self.listeners.push(Box::new(listener));
	}

	pub fn emit(&mut self, event: &DishEvent) {
		log::debug!("{event}");
		for listener in &mut self.listeners {
			listener(event);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn fans_out_in_registration_order() {
		let seen = Rc::new(RefCell::new(Vec::new()));
		let mut subscribers = Subscribers::new();
		let (a, b) = (seen.clone(), seen.clone());
		subscribers.subscribe(move |e| a.borrow_mut().push(format!("a:{}", e.name())));
		subscribers.subscribe(move |e| b.borrow_mut().push(format!("b:{}", e.name())));

		subscribers.emit(&DishEvent::NodeOut);
		subscribers.emit(&DishEvent::NodeUnselected);

		assert_eq!(
			*seen.borrow(),
			vec!["a:nodeOut", "b:nodeOut", "a:nodeUnselected", "b:nodeUnselected"]
		);
	}
}
