//! Interactive radial dish: entities grouped by type into pie sections of a
//! disk, with 3D node markers, selection, connection highlighting and hover.

pub mod camera;
pub mod color;
mod component;
pub mod config;
pub mod dish;
pub mod error;
pub mod events;
pub mod factories;
mod frame_loop;
pub mod layout;
pub mod node;
pub mod particles;
mod render;
pub mod scene;
pub mod state;
pub mod tween;
pub mod types;

pub use component::RadialDishCanvas;
pub use config::DishConfig;
pub use events::DishEvent;
pub use types::Entity;
