//! Template builders. Each factory is constructed once and shared by
//! reference; every request returns a copy the caller may mutate freely.

pub mod font;
pub mod label_factory;
pub mod node_factory;
pub mod primitives;
pub mod rings_factory;
pub mod slice_factory;

pub use font::Font;
pub use label_factory::LabelFactory;
pub use node_factory::NodeFactory;
pub use rings_factory::RingsFactory;
pub use slice_factory::SliceFactory;
