//! Dataset and font loading over HTTP.

use gloo_net::http::Request;
use log::{info, warn};

use crate::components::radial_dish::error::{DishError, DishResult};
use crate::components::radial_dish::factories::Font;
use crate::components::radial_dish::types::{Entity, out_of_range_strengths, parse_entities};

async fn fetch_text(url: &str) -> DishResult<String> {
	let fetch_err = |source| DishError::Fetch {
		url: url.to_string(),
		source,
	};
	let resp = Request::get(url).send().await.map_err(fetch_err)?;
	if !resp.ok() {
		return Err(fetch_err(gloo_net::Error::GlooError(format!(
			"HTTP {} {}",
			resp.status(),
			resp.status_text()
		))));
	}
	resp.text().await.map_err(fetch_err)
}

/// Fetches and decodes the entity list. Strengths outside `[0, 1]` are
/// reported here once; they are clamped wherever they are used.
pub async fn fetch_entities(url: &str) -> DishResult<Vec<Entity>> {
	let text = fetch_text(url).await?;
	let entities = parse_entities(&text).map_err(|source| DishError::Decode {
		url: url.to_string(),
		source,
	})?;
	for (entity, target, strength) in out_of_range_strengths(&entities) {
		warn!("connection {entity} -> {target} has strength {strength} outside [0, 1], clamping");
	}
	info!("loaded {} entities from {url}", entities.len());
	Ok(entities)
}

pub async fn fetch_font(url: &str) -> DishResult<Font> {
	let text = fetch_text(url).await?;
	let font = Font::from_json(&text).map_err(|source| DishError::Decode {
		url: url.to_string(),
		source,
	})?;
	info!("loaded font {} ({} glyphs)", font.family_name, font.glyphs.len());
	Ok(font)
}
