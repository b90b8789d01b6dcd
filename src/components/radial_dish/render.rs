use glam::{Vec2, Vec3};
use web_sys::CanvasRenderingContext2d;

use super::camera::PerspectiveCamera;
use super::color::Color;
use super::factories::font::css_font;
use super::scene::{ObjectKind, SceneGraph, Shading};
use super::state::MainScene;

pub const LIGHT_POSITION: Vec3 = Vec3::new(10.0, 5.0, 0.0);
const AMBIENT: f32 = 0.35;
const BACKGROUND: &str = "#000000";
const PARTICLE_SIZE: f64 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawItem {
	Triangle {
		points: [Vec2; 3],
		color: Color,
		opacity: f32,
	},
	Text {
		at: Vec2,
		content: String,
		px: f64,
		family: String,
		color: Color,
	},
}

/// A draw item with its NDC depth, larger is farther.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthItem {
	pub depth: f32,
	pub item: DrawItem,
}

fn to_screen(ndc: Vec3, width: f64, height: f64) -> Vec2 {
	Vec2::new(
		((ndc.x + 1.0) * 0.5) * width as f32,
		((1.0 - ndc.y) * 0.5) * height as f32,
	)
}

fn in_depth_range(ndc: Vec3) -> bool {
	(-1.0..=1.0).contains(&ndc.z)
}

/// Flat Lambert term, two sided.
fn lambert(triangle: &[Vec3; 3]) -> f32 {
	let normal = (triangle[1] - triangle[0])
		.cross(triangle[2] - triangle[0])
		.normalize_or_zero();
	let centroid = (triangle[0] + triangle[1] + triangle[2]) / 3.0;
	let to_light = (LIGHT_POSITION - centroid).normalize_or_zero();
	AMBIENT + (1.0 - AMBIENT) * normal.dot(to_light).abs()
}

/// Projects every visible mesh triangle and text object, sorted far to near.
pub fn build_draw_list(
	scene: &SceneGraph,
	camera: &PerspectiveCamera,
	width: f64,
	height: f64,
) -> Vec<DepthItem> {
	let mut items = Vec::new();
	let view_height = 2.0 * (camera.fov_deg.to_radians() * 0.5).tan();
	for (id, object) in scene.iter() {
		if !scene.is_visible(id) {
			continue;
		}
		let world = object.world();
		match &object.kind {
			ObjectKind::Group => {}
			ObjectKind::Mesh { geometry, material } => {
				if material.opacity <= 0.0 {
					continue;
				}
				for local in geometry.triangles() {
					let triangle = local.map(|p| world.transform_point3(p));
					let projected = triangle.map(|p| camera.project(p));
					let [Some(a), Some(b), Some(c)] = projected else {
						continue;
					};
					if !(in_depth_range(a) && in_depth_range(b) && in_depth_range(c)) {
						continue;
					}
					let color = match material.shading {
						Shading::Lit => material.color.scale(lambert(&triangle)),
						Shading::Unlit => material.color,
					};
					items.push(DepthItem {
						depth: (a.z + b.z + c.z) / 3.0,
						item: DrawItem::Triangle {
							points: [a, b, c].map(|p| to_screen(p, width, height)),
							color,
							opacity: material.opacity,
						},
					});
				}
			}
			ObjectKind::Text {
				content,
				size,
				family,
				color,
			} => {
				let position = scene.world_position(id);
				let Some(ndc) = camera.project(position).filter(|p| in_depth_range(*p)) else {
					continue;
				};
				let distance = (position - camera.position).length().max(f32::EPSILON);
				let px = f64::from(size / (distance * view_height)) * height;
				items.push(DepthItem {
					depth: ndc.z,
					item: DrawItem::Text {
						at: to_screen(ndc, width, height),
						content: content.clone(),
						px,
						family: family.clone(),
						color: *color,
					},
				});
			}
		}
	}
	items.sort_by(|a, b| b.depth.total_cmp(&a.depth));
	items
}

pub fn render(state: &MainScene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	draw_particles(state, ctx);
	if let Some(dish) = &state.dish {
		let items = build_draw_list(dish.scene(), &state.camera, state.width, state.height);
		for entry in &items {
			draw_item(&entry.item, ctx);
		}
	}
}

fn draw_particles(state: &MainScene, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.6)");
	for &p in &state.particles.positions {
		let Some(ndc) = state.camera.project(p).filter(|p| in_depth_range(*p)) else {
			continue;
		};
		let at = to_screen(ndc, state.width, state.height);
		ctx.fill_rect(at.x as f64, at.y as f64, PARTICLE_SIZE, PARTICLE_SIZE);
	}
}

fn draw_item(item: &DrawItem, ctx: &CanvasRenderingContext2d) {
	match item {
		DrawItem::Triangle {
			points,
			color,
			opacity,
		} => {
			let css = color.to_css(*opacity);
			ctx.begin_path();
			ctx.move_to(points[0].x as f64, points[0].y as f64);
			ctx.line_to(points[1].x as f64, points[1].y as f64);
			ctx.line_to(points[2].x as f64, points[2].y as f64);
			ctx.close_path();
			ctx.set_fill_style_str(&css);
			ctx.fill();
			// hairline in the fill color hides seams between neighbours
			if *opacity >= 1.0 {
				ctx.set_stroke_style_str(&css);
				ctx.set_line_width(0.5);
				ctx.stroke();
			}
		}
		DrawItem::Text {
			at,
			content,
			px,
			family,
			color,
		} => {
			if *px < 1.0 {
				return;
			}
			ctx.set_font(&css_font(family, *px));
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			ctx.set_fill_style_str(&color.to_css(1.0));
			let _ = ctx.fill_text(content, at.x as f64, at.y as f64);
		}
	}
}

#[cfg(test)]
mod tests {
	use std::rc::Rc;

	use super::*;
	use crate::components::radial_dish::factories::primitives;
	use crate::components::radial_dish::scene::{Material, Template};

	fn camera() -> PerspectiveCamera {
		PerspectiveCamera::new(Vec3::new(0.0, 6.0, 12.0), 75.0, 800.0 / 600.0, 1.0, 200.0)
	}

	fn quad(name: &str, at: Vec3, color: Color) -> Template {
		Template::mesh(name, Rc::new(primitives::plane(1.0, 1.0)), Material::unlit(color))
			.with_translation(at)
	}

	fn triangle_colors(items: &[DepthItem]) -> Vec<Color> {
		items
			.iter()
			.filter_map(|i| match &i.item {
				DrawItem::Triangle { color, .. } => Some(*color),
				DrawItem::Text { .. } => None,
			})
			.collect()
	}

	#[test]
	fn sorts_far_to_near() {
		let (near, far) = (Color::WHITE, Color::BLACK);
		let mut scene = SceneGraph::new();
		scene.instantiate(&quad("near", Vec3::new(0.0, 0.0, 4.0), near), None);
		scene.instantiate(&quad("far", Vec3::new(0.0, 0.0, -4.0), far), None);
		let items = build_draw_list(&scene, &camera(), 800.0, 600.0);
		assert_eq!(triangle_colors(&items), vec![far, far, near, near]);
		assert!(items.windows(2).all(|w| w[0].depth >= w[1].depth));
	}

	#[test]
	fn skips_hidden_and_behind_camera() {
		let mut scene = SceneGraph::new();
		let hidden = scene.instantiate(&quad("hidden", Vec3::ZERO, Color::WHITE), None);
		scene.get_mut(hidden).visible = false;
		scene.instantiate(&quad("behind", Vec3::new(0.0, 6.0, 20.0), Color::WHITE), None);
		assert!(build_draw_list(&scene, &camera(), 800.0, 600.0).is_empty());
	}

	#[test]
	fn lit_faces_are_darker_than_unlit() {
		let base = Color::from_hex(0xff0000);
		let mut scene = SceneGraph::new();
		let lit = Template::mesh("lit", Rc::new(primitives::plane(1.0, 1.0)), Material::lit(base));
		scene.instantiate(&lit, None);
		let items = build_draw_list(&scene, &camera(), 800.0, 600.0);
		let colors = triangle_colors(&items);
		assert_eq!(colors.len(), 2);
		assert!(colors.iter().all(|c| c.r < base.r && c.r >= base.r * AMBIENT));
	}

	#[test]
	fn text_projects_to_screen_center() {
		let mut scene = SceneGraph::new();
		scene.instantiate(
			&Template {
				name: "text".into(),
				transform: Default::default(),
				kind: ObjectKind::Text {
					content: "Object - o1".into(),
					size: 0.15,
					family: "Kanit Medium".into(),
					color: Color::WHITE,
				},
				children: Vec::new(),
			},
			None,
		);
		let items = build_draw_list(&scene, &camera(), 800.0, 600.0);
		let [DepthItem {
			item: DrawItem::Text { at, px, .. },
			..
		}] = items.as_slice()
		else {
			panic!("expected one text item, got {items:?}");
		};
		assert!((at.x - 400.0).abs() < 1e-2 && (at.y - 300.0).abs() < 1e-2);
		assert!(*px > 1.0 && *px < 20.0);
	}
}
