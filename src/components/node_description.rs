use leptos::prelude::*;

use super::radial_dish::Entity;

/// Info panel for one entity; renders nothing while `entity` is `None`.
#[component]
pub fn NodeDescription(#[prop(into)] entity: Signal<Option<Entity>>) -> impl IntoView {
	move || {
		entity.get().map(|e| {
			let details = e
				.details
				.into_iter()
				.map(|(key, value)| {
					view! {
						<li>
							<span class="detail-key">{key}": "</span>
							{value}
						</li>
					}
				})
				.collect_view();
			let connections = e
				.connections
				.into_iter()
				.map(|c| {
					view! {
						<li>
							{c.relationship}" - "{c.id}
							<span class="strength">{format!(" ({:.2})", c.strength)}</span>
						</li>
					}
				})
				.collect_view();
			view! {
				<aside class="node-description">
					<h2>{e.name}<span class="node-id">{format!(" ({})", e.id)}</span></h2>
					<p class="node-type">{e.kind.to_string()}</p>
					<p class="node-text">{e.description}</p>
					<h3>"Details"</h3>
					<ul class="node-details">{details}</ul>
					<h3>"Connections"</h3>
					<ul class="node-connections">{connections}</ul>
				</aside>
			}
		})
	}
}
