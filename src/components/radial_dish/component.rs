use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::config::DishConfig;
use super::events::DishEvent;
use super::factories::Font;
use super::frame_loop::FrameLoop;
use super::render;
use super::state::MainScene;
use super::types::Entity;

const MAX_FRAME_DT: f64 = 0.1;

type DishLoop = FrameLoop<MainScene, Closure<dyn FnMut(f64)>, Closure<dyn FnMut()>>;

fn viewport_size(window: &Window) -> (f64, f64) {
	let read = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		read(window.inner_width(), 800.0),
		read(window.inner_height(), 600.0),
	)
}

fn canvas_point(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Canvas hosting the radial dish. The dish is (re)built whenever `entities`
/// changes; `font` is read at that moment and labels are skipped without one.
#[component]
pub fn RadialDishCanvas(
	#[prop(into)] entities: Signal<Vec<Entity>>,
	#[prop(into)] font: Signal<Option<Font>>,
	#[prop(default = DishConfig::default())] config: DishConfig,
	#[prop(optional)] on_event: Option<Callback<DishEvent>>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let handles = DishLoop::new();
	let state = handles.state.clone();
	let (state_init, animate_init, resize_cb_init) = (
		handles.state.clone(),
		handles.frame.clone(),
		handles.resize.clone(),
	);

	let stop = handles.stopper();
	on_cleanup(move || {
		log::debug!("radial dish unmounted, stopping frame loop");
		stop();
	});

	Effect::new(move |_| {
		let entities = entities.get();
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		if state_init.borrow().is_none() {
			let (w, h) = if fullscreen {
				viewport_size(&window)
			} else {
				let parent = canvas.parent_element();
				(
					width.unwrap_or_else(|| {
						parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0)
					}),
					height.unwrap_or_else(|| {
						parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0)
					}),
				)
			};
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);
			let seed = js_sys::Date::now() as u64;
			*state_init.borrow_mut() = Some(MainScene::new(config.clone(), w, h, seed));
		}

		if let Some(s) = state_init.borrow_mut().as_mut() {
			let font = font.get_untracked().map(Rc::new);
			match s.set_data(&entities, font) {
				Ok(()) => {
					if let Some(callback) = on_event {
						s.subscribe(move |event| callback.run(event.clone()));
					}
				}
				Err(err) => log::error!("radial dish failed to assemble: {err}"),
			}
		}

		if animate_init.borrow().is_some() {
			return;
		}

		let ctx = match canvas.get_context("2d") {
			Ok(Some(ctx)) => ctx.dyn_into::<CanvasRenderingContext2d>().ok(),
			_ => None,
		};
		let Some(ctx) = ctx else {
			log::error!("canvas 2d context unavailable");
			return;
		};

		if fullscreen {
			let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = viewport_size(&win);
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				if let Some(s) = state_resize.borrow_mut().as_mut() {
					s.resize(nw, nh);
				}
			}));
			if let Some(cb) = resize_cb_init.borrow().as_ref() {
				let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let frame_loop = handles.clone();
		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		let mut last_frame: Option<f64> = None;
		let mut cursor = "";
		*animate_init.borrow_mut() = Some(Closure::new(move |now: f64| {
			let Some(win) = web_sys::window() else {
				return;
			};
			let torn_down = frame_loop.teardown(|cb| {
				let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			});
			if torn_down {
				log::info!("radial dish torn down");
				return;
			}
			let dt = last_frame.map_or(0.0, |last| ((now - last) / 1000.0).clamp(0.0, MAX_FRAME_DT));
			last_frame = Some(now);
			if let Some(s) = state_anim.borrow_mut().as_mut() {
				if s.animation_running {
					s.tick(dt as f32);
				}
				render::render(s, &ctx);
				if s.cursor() != cursor {
					cursor = s.cursor();
					let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
				}
			}
			if let Some(cb) = animate_inner.borrow().as_ref() {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(cb) = animate_init.borrow().as_ref() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(s) = state_md.borrow_mut().as_mut() {
			s.on_mouse_down(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get_untracked() else {
			return;
		};
		let (x, y) = canvas_point(&canvas, &ev);
		if let Some(s) = state_mm.borrow_mut().as_mut() {
			s.on_mouse_move(x, y);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(s) = state_mu.borrow_mut().as_mut() {
			s.on_mouse_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(s) = state_ml.borrow_mut().as_mut() {
			s.on_mouse_leave();
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(s) = state_wh.borrow_mut().as_mut() {
			s.on_wheel(ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="radial-dish-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
