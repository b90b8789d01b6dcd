use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
	Character,
	Location,
	Object,
}

impl EntityType {
	pub fn as_str(self) -> &'static str {
		match self {
			EntityType::Character => "Character",
			EntityType::Location => "Location",
			EntityType::Object => "Object",
		}
	}
}

impl fmt::Display for EntityType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Polar placement inside a section: `distance` in `[0, 1]`, `angle` in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarPosition {
	pub distance: f32,
	pub angle: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Connection {
	pub id: String,
	pub relationship: String,
	pub strength: f32,
}

impl Connection {
	pub fn opacity(&self) -> f32 {
		self.strength.clamp(0.0, 1.0)
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
	pub id: String,
	#[serde(rename = "type")]
	pub kind: EntityType,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub description: String,
	pub position: PolarPosition,
	#[serde(default)]
	pub details: BTreeMap<String, String>,
	#[serde(default)]
	pub connections: Vec<Connection>,
}

impl Entity {
	/// Text shown on the node's billboard.
	pub fn label(&self) -> String {
		format!("{} - {}", self.kind, self.id)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypeSection {
	pub id: String,
	pub kind: EntityType,
	pub entities: Vec<Entity>,
}

pub fn parse_entities(json: &str) -> Result<Vec<Entity>, serde_json::Error> {
	serde_json::from_str(json)
}

/// Strengths outside `[0, 1]` as `(entity id, target id, strength)`.
pub fn out_of_range_strengths(entities: &[Entity]) -> Vec<(String, String, f32)> {
	entities
		.iter()
		.flat_map(|e| {
			e.connections
				.iter()
				.filter(|c| !(0.0..=1.0).contains(&c.strength))
				.map(|c| (e.id.clone(), c.id.clone(), c.strength))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_dataset_records() {
		let json = r#"[
			{"id":"e1","type":"Character","name":"Ada","description":"A pilot",
			 "position":{"distance":0,"angle":0},
			 "details":{"role":"pilot"},
			 "connections":[{"id":"e2","relationship":"ally","strength":0.8}]},
			{"id":"e2","type":"Location","position":{"distance":1,"angle":60},"connections":[]}
		]"#;
		let entities = parse_entities(json).unwrap();
		assert_eq!(entities.len(), 2);
		assert_eq!(entities[0].kind, EntityType::Character);
		assert_eq!(entities[0].details["role"], "pilot");
		assert_eq!(entities[0].connections[0].strength, 0.8);
		assert_eq!(entities[1].name, "");
		assert_eq!(entities[1].position.angle, 60.0);
	}

	#[test]
	fn rejects_unknown_type() {
		let json = r#"[{"id":"x","type":"Vehicle","position":{"distance":0,"angle":0}}]"#;
		assert!(parse_entities(json).is_err());
	}

	#[test]
	fn label_joins_type_and_id() {
		let json = r#"[{"id":"o7","type":"Object","position":{"distance":0.5,"angle":10}}]"#;
		let entity = &parse_entities(json).unwrap()[0];
		assert_eq!(entity.label(), "Object - o7");
	}

	#[test]
	fn reports_and_clamps_out_of_range_strengths() {
		let json = r#"[{"id":"a","type":"Object","position":{"distance":0,"angle":0},
			"connections":[
				{"id":"b","relationship":"r","strength":2.5},
				{"id":"c","relationship":"r","strength":0.4},
				{"id":"d","relationship":"r","strength":-1}
			]}]"#;
		let entities = parse_entities(json).unwrap();
		let bad = out_of_range_strengths(&entities);
		assert_eq!(bad.len(), 2);
		assert_eq!(bad[0], ("a".to_string(), "b".to_string(), 2.5));
		let conns = &entities[0].connections;
		assert_eq!(conns[0].opacity(), 1.0);
		assert_eq!(conns[1].opacity(), 0.4);
		assert_eq!(conns[2].opacity(), 0.0);
	}
}
