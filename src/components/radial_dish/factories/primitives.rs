//! Triangle-list builders for the shapes the factories assemble.
//! Flat shapes lie in the XZ plane (disk space) except `plane`, which faces +Z.

use std::f32::consts::TAU;

use glam::Vec3;

use crate::components::radial_dish::scene::Geometry;

pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Geometry {
	let (segments, rings) = (segments.max(3), rings.max(2));
	let mut positions = Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
	for r in 0..=rings {
		let phi = std::f32::consts::PI * r as f32 / rings as f32;
		for s in 0..=segments {
			let theta = TAU * s as f32 / segments as f32;
			positions.push(Vec3::new(
				radius * phi.sin() * theta.cos(),
				radius * phi.cos(),
				radius * phi.sin() * theta.sin(),
			));
		}
	}
	let stride = segments + 1;
	let mut indices = Vec::new();
	for r in 0..rings {
		for s in 0..segments {
			let a = r * stride + s;
			let b = a + stride;
			if r != 0 {
				indices.extend([a, b, a + 1]);
			}
			if r != rings - 1 {
				indices.extend([a + 1, b, b + 1]);
			}
		}
	}
	Geometry::new(positions, indices)
}

/// Capped cylinder along Y centered on the origin; a zero radius makes a cone.
pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, segments: u32) -> Geometry {
	let segments = segments.max(3);
	let half = height * 0.5;
	let mut positions = Vec::new();
	for s in 0..segments {
		let theta = TAU * s as f32 / segments as f32;
		let (sin, cos) = theta.sin_cos();
		positions.push(Vec3::new(radius_top * cos, half, radius_top * sin));
		positions.push(Vec3::new(radius_bottom * cos, -half, radius_bottom * sin));
	}
	let top_center = positions.len() as u32;
	positions.push(Vec3::new(0.0, half, 0.0));
	let bottom_center = top_center + 1;
	positions.push(Vec3::new(0.0, -half, 0.0));

	let mut indices = Vec::new();
	for s in 0..segments {
		let next = (s + 1) % segments;
		let (t0, b0, t1, b1) = (2 * s, 2 * s + 1, 2 * next, 2 * next + 1);
		indices.extend([t0, b0, t1, t1, b0, b1]);
		if radius_top > 0.0 {
			indices.extend([top_center, t1, t0]);
		}
		if radius_bottom > 0.0 {
			indices.extend([bottom_center, b0, b1]);
		}
	}
	Geometry::new(positions, indices)
}

pub fn cuboid(size: f32) -> Geometry {
	let h = size * 0.5;
	let positions = vec![
		Vec3::new(-h, -h, -h),
		Vec3::new(h, -h, -h),
		Vec3::new(h, h, -h),
		Vec3::new(-h, h, -h),
		Vec3::new(-h, -h, h),
		Vec3::new(h, -h, h),
		Vec3::new(h, h, h),
		Vec3::new(-h, h, h),
	];
	let faces: [[u32; 4]; 6] = [
		[0, 3, 2, 1], // back
		[4, 5, 6, 7], // front
		[0, 4, 7, 3], // left
		[1, 2, 6, 5], // right
		[3, 7, 6, 2], // top
		[0, 1, 5, 4], // bottom
	];
	let indices = faces
		.iter()
		.flat_map(|[a, b, c, d]| [*a, *b, *c, *a, *c, *d])
		.collect();
	Geometry::new(positions, indices)
}

/// Rectangle in the XY plane facing +Z.
pub fn plane(width: f32, height: f32) -> Geometry {
	let (w, h) = (width * 0.5, height * 0.5);
	Geometry::new(
		vec![
			Vec3::new(-w, -h, 0.0),
			Vec3::new(w, -h, 0.0),
			Vec3::new(w, h, 0.0),
			Vec3::new(-w, h, 0.0),
		],
		vec![0, 1, 2, 0, 2, 3],
	)
}

pub fn disc(radius: f32, segments: u32) -> Geometry {
	wedge(radius, 0.0, TAU, segments)
}

/// Pie slice from `start` to `end` radians, apex at the origin.
pub fn wedge(radius: f32, start: f32, end: f32, segments: u32) -> Geometry {
	let segments = segments.max(1);
	let mut positions = vec![Vec3::ZERO];
	for s in 0..=segments {
		let theta = start + (end - start) * s as f32 / segments as f32;
		positions.push(Vec3::new(radius * theta.cos(), 0.0, radius * theta.sin()));
	}
	let indices = (1..=segments).flat_map(|s| [0, s, s + 1]).collect();
	Geometry::new(positions, indices)
}

pub fn ring(inner: f32, outer: f32, segments: u32) -> Geometry {
	let segments = segments.max(3);
	let mut positions = Vec::with_capacity(2 * segments as usize);
	for s in 0..segments {
		let (sin, cos) = (TAU * s as f32 / segments as f32).sin_cos();
		positions.push(Vec3::new(inner * cos, 0.0, inner * sin));
		positions.push(Vec3::new(outer * cos, 0.0, outer * sin));
	}
	let mut indices = Vec::with_capacity(6 * segments as usize);
	for s in 0..segments {
		let next = (s + 1) % segments;
		let (i0, o0, i1, o1) = (2 * s, 2 * s + 1, 2 * next, 2 * next + 1);
		indices.extend([i0, o0, i1, i1, o0, o1]);
	}
	Geometry::new(positions, indices)
}
