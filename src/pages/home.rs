use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::node_description::NodeDescription;
use crate::components::radial_dish::factories::Font;
use crate::components::radial_dish::{DishConfig, DishEvent, Entity, RadialDishCanvas};

/// Raised into the page's error boundary when the dataset cannot be fetched.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("could not load the dataset: {0}")]
pub struct DataUnavailable(String);

fn load_status(error: Option<String>) -> Result<(), DataUnavailable> {
	error.map_or(Ok(()), |message| Err(DataUnavailable(message)))
}

#[derive(Clone, Debug)]
pub enum FontState {
	Loading,
	Ready(Font),
	Failed,
}

impl FontState {
	fn is_loading(&self) -> bool {
		matches!(self, FontState::Loading)
	}

	fn font(&self) -> Option<Font> {
		match self {
			FontState::Ready(font) => Some(font.clone()),
			FontState::Loading | FontState::Failed => None,
		}
	}
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = DishConfig::default();
	let entities = RwSignal::new(None::<Vec<Entity>>);
	let load_error = RwSignal::new(None::<String>);
	let font_state = RwSignal::new(FontState::Loading);
	let hovered = RwSignal::new(None::<Entity>);
	let selected = RwSignal::new(None::<Entity>);

	let data_url = config.data_url.clone();
	spawn_local(async move {
		match api::fetch_entities(&data_url).await {
			Ok(list) => entities.set(Some(list)),
			Err(err) => {
				log::error!("{err}");
				load_error.set(Some(err.to_string()));
			}
		}
	});

	let font_url = config.font_url.clone();
	spawn_local(async move {
		match api::fetch_font(&font_url).await {
			Ok(font) => font_state.set(FontState::Ready(font)),
			Err(err) => {
				log::warn!("{err}; labels disabled");
				font_state.set(FontState::Failed);
			}
		}
	});

	let ready = move || entities.with(Option::is_some) && !font_state.with(FontState::is_loading);
	let entity_list = Signal::derive(move || entities.get().unwrap_or_default());
	let font = Signal::derive(move || font_state.with(FontState::font));
	let shown = Signal::derive(move || hovered.get().or_else(|| selected.get()));

	let on_event = Callback::new(move |event: DishEvent| match event {
		DishEvent::NodeSelected(entity) => selected.set(Some(entity)),
		DishEvent::NodeUnselected => selected.set(None),
		DishEvent::NodeHover(entity) => hovered.set(Some(entity)),
		DishEvent::NodeOut => hovered.set(None),
	});

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			{move || load_status(load_error.get())}
			<div class="fullscreen-dish">
				<Show
					when=ready
					fallback=|| view! { <p class="dish-status">"Loading..."</p> }
				>
					<RadialDishCanvas
						entities=entity_list
						font=font
						config=config.clone()
						on_event=on_event
						fullscreen=true
					/>
				</Show>
				<div class="dish-overlay">
					<h1>"Radial Dish"</h1>
					<p class="subtitle">"Hover a node to inspect it. Click to select and reveal its connections. Drag to orbit, scroll to zoom."</p>
				</div>
				<NodeDescription entity=shown />
			</div>
		</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn failed_load_reaches_the_boundary() {
		assert_eq!(load_status(None), Ok(()));
		let err = load_status(Some("HTTP 404 Not Found".into())).unwrap_err();
		assert_eq!(err.to_string(), "could not load the dataset: HTTP 404 Not Found");
	}

	#[test]
	fn only_a_ready_font_is_handed_out() {
		assert!(FontState::Loading.is_loading());
		assert!(FontState::Failed.font().is_none());
		assert!(!FontState::Failed.is_loading());
	}
}
