use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Handles one mounted canvas shares between its effect, its frame callback
/// and its resize listener. Cloning shares the same slots.
///
/// `S` is the scene state, `F` the frame callback and `R` the resize listener.
pub struct FrameLoop<S, F, R> {
	pub state: Rc<RefCell<Option<S>>>,
	pub frame: Rc<RefCell<Option<F>>>,
	pub resize: Rc<RefCell<Option<R>>>,
	running: Arc<AtomicBool>,
}

impl<S, F, R> Clone for FrameLoop<S, F, R> {
	fn clone(&self) -> Self {
		Self {
			state: self.state.clone(),
			frame: self.frame.clone(),
			resize: self.resize.clone(),
			running: self.running.clone(),
		}
	}
}

impl<S, F, R> Default for FrameLoop<S, F, R> {
	fn default() -> Self {
		Self {
			state: Rc::new(RefCell::new(None)),
			frame: Rc::new(RefCell::new(None)),
			resize: Rc::new(RefCell::new(None)),
			running: Arc::new(AtomicBool::new(true)),
		}
	}
}

impl<S, F, R> FrameLoop<S, F, R> {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_running(&self) -> bool {
		self.running.load(Ordering::Relaxed)
	}

	/// Thread-safe switch for `on_cleanup`, which cannot hold the `Rc` slots.
	pub fn stopper(&self) -> impl Fn() + Send + Sync + 'static {
		let running = self.running.clone();
		move || running.store(false, Ordering::Relaxed)
	}

	/// Once stopped, hands the resize listener to `detach` and drops the
	/// state and the frame callback. Returns whether the loop should end.
	pub fn teardown(&self, detach: impl FnOnce(&R)) -> bool {
		if self.is_running() {
			return false;
		}
		if let Some(listener) = self.resize.borrow_mut().take() {
			detach(&listener);
		}
		*self.state.borrow_mut() = None;
		let frame = self.frame.borrow_mut().take();
		drop(frame);
		true
	}
}
