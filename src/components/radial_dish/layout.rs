use std::f32::consts::TAU;

use super::types::{Entity, TypeSection};

/// Groups entities by type, one section per distinct type in first-seen order.
pub fn group_by_type(entities: &[Entity]) -> Vec<TypeSection> {
	let mut sections: Vec<TypeSection> = Vec::new();
	for entity in entities {
		match sections.iter_mut().find(|s| s.kind == entity.kind) {
			Some(section) => section.entities.push(entity.clone()),
			None => sections.push(TypeSection {
				id: format!("id_{}", sections.len()),
				kind: entity.kind,
				entities: vec![entity.clone()],
			}),
		}
	}
	sections
}

/// Angular width of one section in radians.
pub fn slice_angle(section_count: usize) -> f32 {
	if section_count == 0 {
		return TAU;
	}
	TAU / section_count as f32
}

/// Half-open arc `[start, end)` in radians covered by the section at `index`.
pub fn slice_arc(index: usize, section_count: usize) -> (f32, f32) {
	let angle = slice_angle(section_count);
	(index as f32 * angle, (index + 1) as f32 * angle)
}

/// Maps a normalized distance onto `[radius / ring_count, radius]`.
pub fn radial_distance(normalized: f32, ring_count: u32, radius: f32) -> f32 {
	let inner = radius / ring_count.max(1) as f32;
	normalized * (radius - inner) + inner
}

/// Section-relative polar coordinates to an `(x, z)` offset on the disk.
pub fn to_cartesian(angle_deg: f32, normalized: f32, ring_count: u32, radius: f32) -> (f32, f32) {
	let angle = angle_deg.to_radians();
	let distance = radial_distance(normalized, ring_count, radius);
	(angle.cos() * distance, angle.sin() * distance)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::radial_dish::types::{EntityType, PolarPosition};

	fn entity(id: &str, kind: EntityType) -> Entity {
		Entity {
			id: id.into(),
			kind,
			name: String::new(),
			description: String::new(),
			position: PolarPosition::default(),
			details: Default::default(),
			connections: vec![],
		}
	}

	#[test]
	fn grouping_keeps_first_seen_order_and_counts() {
		let input = vec![
			entity("a", EntityType::Object),
			entity("b", EntityType::Character),
			entity("c", EntityType::Object),
			entity("d", EntityType::Location),
			entity("e", EntityType::Character),
		];
		let sections = group_by_type(&input);
		let kinds: Vec<_> = sections.iter().map(|s| s.kind).collect();
		assert_eq!(
			kinds,
			vec![EntityType::Object, EntityType::Character, EntityType::Location]
		);
		let total: usize = sections.iter().map(|s| s.entities.len()).sum();
		assert_eq!(total, input.len());
		let ids: Vec<_> = sections[0].entities.iter().map(|e| e.id.as_str()).collect();
		assert_eq!(ids, vec!["a", "c"]);
		assert_eq!(sections[2].id, "id_2");
	}

	#[test]
	fn empty_input_has_no_sections() {
		assert!(group_by_type(&[]).is_empty());
	}

	#[test]
	fn arcs_partition_the_circle() {
		for k in 1..=6 {
			let widths: f32 = (0..k)
				.map(|i| {
					let (start, end) = slice_arc(i, k);
					end - start
				})
				.sum();
			assert!((widths - TAU).abs() < 1e-4);
			for i in 1..k {
				assert_eq!(slice_arc(i - 1, k).1, slice_arc(i, k).0);
			}
			assert!((slice_angle(k).to_degrees() - 360.0 / k as f32).abs() < 1e-3);
		}
	}

	#[test]
	fn radius_is_bounded_by_rings() {
		assert_eq!(radial_distance(0.0, 4, 8.0), 2.0);
		assert_eq!(radial_distance(1.0, 4, 8.0), 8.0);
		let mut last = 0.0;
		for step in 0..=10 {
			let r = radial_distance(step as f32 / 10.0, 4, 8.0);
			assert!(r >= last && (2.0..=8.0).contains(&r));
			last = r;
		}
	}

	#[test]
	fn cartesian_follows_angle() {
		let (x, z) = to_cartesian(0.0, 1.0, 4, 8.0);
		assert!((x - 8.0).abs() < 1e-5 && z.abs() < 1e-5);
		let (x, z) = to_cartesian(90.0, 0.0, 4, 8.0);
		assert!(x.abs() < 1e-5 && (z - 2.0).abs() < 1e-5);
	}
}
