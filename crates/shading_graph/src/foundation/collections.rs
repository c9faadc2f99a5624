//! Specialized collection types
//!
//! Materials never own what they reference. Cross references are generational
//! slot map keys, so a handle that outlived its referent fails lookup instead
//! of pointing at freed memory.

pub use slotmap::{Key, SlotMap};

slotmap::new_key_type! {
    /// Weak handle to a material stored in a [`crate::materials::MaterialRegistry`]
    pub struct MaterialHandle;

    /// Weak handle to a texture owned by an external asset provider
    pub struct TextureHandle;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<K, V> = SlotMap<K, V>;
