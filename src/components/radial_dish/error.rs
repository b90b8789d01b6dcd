use thiserror::Error;

pub type DishResult<T> = Result<T, DishError>;

#[derive(Debug, Error)]
pub enum DishError {
	#[error("failed to fetch {url}: {source}")]
	Fetch {
		url: String,
		#[source]
		source: gloo_net::Error,
	},
	#[error("failed to decode {url}: {source}")]
	Decode {
		url: String,
		#[source]
		source: serde_json::Error,
	},
	#[error("font is not loaded yet, labels cannot be built")]
	FontNotReady,
	#[error("node template for entity {entity} has no mesh under its model group")]
	MissingMesh { entity: String },
	#[error("template is missing its `{name}` group")]
	MissingGroup { name: &'static str },
}
