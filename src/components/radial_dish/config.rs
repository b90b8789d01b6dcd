use glam::Vec3;

use super::color::Color;

/// Tunables for the dish, its camera and the backdrop.
#[derive(Clone, Debug, PartialEq)]
pub struct DishConfig {
	pub radius: f32,
	pub num_rings: u32,
	pub ring_width: f32,
	pub ring_segments: u32,
	/// Height of the rings above the disk.
	pub ring_offset: f32,
	pub slice_segments: u32,
	pub slice_colors: Vec<Color>,
	pub ring_color: Color,
	pub connect_color: Color,
	pub out_color: Color,
	pub selected_color: Color,
	pub camera_position: Vec3,
	pub wide_fov: f32,
	pub tall_fov: f32,
	pub near: f32,
	pub far: f32,
	pub min_distance: f32,
	pub max_distance: f32,
	pub max_polar_angle: f32,
	pub particle_count: usize,
	pub particle_box: f32,
	pub particle_speed: f32,
	pub data_url: String,
	pub font_url: String,
}

impl Default for DishConfig {
	fn default() -> Self {
		Self {
			radius: 8.0,
			num_rings: 4,
			ring_width: 0.05,
			ring_segments: 90,
			ring_offset: 0.01,
			slice_segments: 48,
			slice_colors: vec![
				Color::from_hex(0x002a4d),
				Color::from_hex(0x1a1a1a),
				Color::from_hex(0x999999),
			],
			ring_color: Color::from_hex(0x00f1ff),
			connect_color: Color::from_hex(0x00f1ff),
			out_color: Color::from_hex(0xffffff),
			selected_color: Color::from_hex(0xff9100),
			camera_position: Vec3::new(0.0, 6.0, 12.0),
			wide_fov: 75.0,
			tall_fov: 120.0,
			near: 1.0,
			far: 200.0,
			min_distance: 2.0,
			max_distance: 1500.0,
			max_polar_angle: std::f32::consts::PI * 0.4,
			particle_count: 2000,
			particle_box: 30.0,
			particle_speed: 0.01,
			data_url: "./data.json".into(),
			font_url: "./fonts/kanit_medium.typeface.json".into(),
		}
	}
}
