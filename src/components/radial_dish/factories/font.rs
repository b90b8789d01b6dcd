use std::collections::HashMap;

use glam::Vec3;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct GlyphMetrics {
	pub ha: f32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontBounds {
	pub y_min: f32,
	pub y_max: f32,
}

/// Metrics half of a typeface JSON document (glyph outlines are ignored).
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
	pub family_name: String,
	pub resolution: f32,
	pub bounding_box: FontBounds,
	pub glyphs: HashMap<String, GlyphMetrics>,
}

impl Font {
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	fn advance(&self, c: char) -> f32 {
		let mut buf = [0u8; 4];
		self.glyphs
			.get(c.encode_utf8(&mut buf) as &str)
			.or_else(|| self.glyphs.get("?"))
			.map(|g| g.ha)
			.unwrap_or(self.resolution * 0.5)
	}

	/// Bounding box size of `text` set at `size` world units and extruded by `depth`.
	pub fn measure(&self, text: &str, size: f32, depth: f32) -> Vec3 {
		let scale = size / self.resolution.max(1.0);
		let width: f32 = text.chars().map(|c| self.advance(c)).sum::<f32>() * scale;
		let height = (self.bounding_box.y_max - self.bounding_box.y_min) * scale;
		Vec3::new(width, height, depth)
	}
}

/// Canvas `font` shorthand for text set in `family` at `px` pixels.
pub fn css_font(family: &str, px: f64) -> String {
	format!("{px:.1}px \"{family}\", sans-serif")
}

#[cfg(test)]
pub(crate) fn test_font() -> Font {
	Font::from_json(
		r#"{"familyName":"Kanit Medium","resolution":1000,
		"boundingBox":{"yMin":-300,"xMin":-100,"yMax":700,"xMax":1200},
		"glyphs":{"A":{"ha":600,"x_min":0,"o":"m 0 0"},"?":{"ha":500},"-":{"ha":300}," ":{"ha":200}}}"#,
	)
	.unwrap()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn measures_with_advances_and_fallback() {
		let font = test_font();
		let size = font.measure("A-A", 0.15, 0.01);
		assert!((size.x - 1.5 * 0.15).abs() < 1e-6);
		assert!((size.y - 0.15).abs() < 1e-6);
		assert_eq!(size.z, 0.01);
		let unknown = font.measure("Z", 1.0, 0.0);
		assert!((unknown.x - 0.5).abs() < 1e-6);
	}

	#[test]
	fn css_font_names_family() {
		let font = test_font();
		assert_eq!(css_font(&font.family_name, 12.0), "12.0px \"Kanit Medium\", sans-serif");
	}
}
