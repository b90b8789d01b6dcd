/// Linear RGB in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
	pub r: f32,
	pub g: f32,
	pub b: f32,
}

impl Color {
	pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
	pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

	pub const fn new(r: f32, g: f32, b: f32) -> Self {
		Self { r, g, b }
	}

	pub const fn from_hex(hex: u32) -> Self {
		Self {
			r: ((hex >> 16) & 0xff) as f32 / 255.0,
			g: ((hex >> 8) & 0xff) as f32 / 255.0,
			b: (hex & 0xff) as f32 / 255.0,
		}
	}

	pub fn scale(self, k: f32) -> Self {
		Self::new(self.r * k, self.g * k, self.b * k)
	}

	pub fn to_css(self, alpha: f32) -> String {
		let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
		format!(
			"rgba({}, {}, {}, {})",
			channel(self.r),
			channel(self.g),
			channel(self.b),
			alpha.clamp(0.0, 1.0)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_hex_and_formats_css() {
		let orange = Color::from_hex(0xff9100);
		assert_eq!(orange, Color::new(1.0, 145.0 / 255.0, 0.0));
		assert_eq!(orange.to_css(0.5), "rgba(255, 145, 0, 0.5)");
		assert_eq!(Color::WHITE.scale(2.0).to_css(1.0), "rgba(255, 255, 255, 1)");
	}
}
