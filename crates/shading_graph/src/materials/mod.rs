//! Material system
//!
//! Materials with typed, named inputs, their snapshot iterators, and the
//! registry that owns them and walks their reference graph.

pub mod dirty_flag;
pub mod error;
pub mod input;
pub mod iterators;
pub mod material;
pub mod material_registry;
pub mod material_type;

// Re-export commonly used types
pub use dirty_flag::DirtyFlag;
pub use error::{MaterialError, MaterialResult};
pub use input::{Input, InputInfo, InputKind, InputKinds, InputValue};
pub use iterators::{InputIter, MaterialIter, TextureIter};
pub use material::Material;
pub use material_registry::MaterialRegistry;
pub use material_type::{BlendType, BxdfType, MaterialKind};
