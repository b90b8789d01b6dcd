pub mod node_description;
pub mod radial_dish;
