//! Math utilities and types
//!
//! Vector inputs are stored as single-precision nalgebra vectors.

pub use nalgebra::Vector4;

/// 4D vector type, the payload of every `Float4` material input
pub type Vec4 = Vector4<f32>;

/// Build a [`Vec4`] with the same value in every component.
///
/// Scalar inputs such as `ior` or `roughness` are bound as splatted vectors.
pub fn splat(value: f32) -> Vec4 {
    Vec4::new(value, value, value, value)
}
