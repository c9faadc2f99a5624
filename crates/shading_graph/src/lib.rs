//! # Shading Graph
//!
//! Materials for a renderer, modeled as an introspectable, typed property
//! graph.
//!
//! ## Features
//!
//! - **Declared Inputs**: Each material fixes a set of named inputs and the
//!   value kinds each one accepts
//! - **Checked Binds**: Values are validated against the declaration and
//!   rejected atomically
//! - **Dependency Walking**: Snapshot iterators over material and texture
//!   references, plus registry-level graph traversal
//! - **Change Tracking**: A per-material dirty flag for renderer caches
//!
//! ## Quick Start
//!
//! ```rust
//! use shading_graph::prelude::*;
//!
//! let mut registry = MaterialRegistry::new(MaterialConfig::default());
//! let diffuse = registry.insert(Material::single_bxdf(BxdfType::Lambert));
//! let gloss = registry.insert(Material::single_bxdf(BxdfType::MicrofacetGgx));
//! let root = registry.insert(Material::multi_bxdf(BlendType::Layered));
//!
//! registry.set_input_value(diffuse, "albedo", Vec4::new(0.8, 0.1, 0.1, 1.0))?;
//! registry.set_input_value(root, "base_material", diffuse)?;
//! registry.set_input_value(root, "top_material", gloss)?;
//!
//! // Recompile what changed, children first
//! for handle in registry.dirty_materials(root)? {
//!     let _material = registry.get(handle);
//! }
//! registry.clear_dirty(root)?;
//! # Ok::<(), MaterialError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod foundation;
pub mod materials;

#[cfg(test)]
mod tests;

/// Common imports for material users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, MaterialConfig},
        foundation::{
            collections::{MaterialHandle, TextureHandle},
            math::Vec4,
        },
        materials::{
            BlendType, BxdfType, Input, InputInfo, InputKind, InputKinds, InputValue, Material,
            MaterialError, MaterialKind, MaterialRegistry, MaterialResult,
        },
    };
}
