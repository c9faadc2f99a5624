//! Material input declarations and values
//!
//! An input pairs a declaration ([`InputInfo`]: name, description, accepted
//! kinds) with the value currently bound to it ([`InputValue`]).

use std::fmt;

use bitflags::bitflags;

use crate::foundation::collections::{MaterialHandle, TextureHandle};
use crate::foundation::math::Vec4;

/// Category of a value that can be bound to a material input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputKind {
    /// Four-component float vector (colors, scalars splatted to four lanes)
    Float4,
    /// Reference to a texture owned by the asset provider
    Texture,
    /// Reference to another material
    Material,
}

impl InputKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 3] = [Self::Float4, Self::Texture, Self::Material];

    /// The single-kind set containing this kind
    pub const fn as_flag(self) -> InputKinds {
        match self {
            Self::Float4 => InputKinds::FLOAT4,
            Self::Texture => InputKinds::TEXTURE,
            Self::Material => InputKinds::MATERIAL,
        }
    }

    /// Human readable kind name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Float4 => "Float4",
            Self::Texture => "Texture",
            Self::Material => "Material",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of kinds an input accepts
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InputKinds: u8 {
        /// Accepts [`InputKind::Float4`]
        const FLOAT4 = 1 << 0;
        /// Accepts [`InputKind::Texture`]
        const TEXTURE = 1 << 1;
        /// Accepts [`InputKind::Material`]
        const MATERIAL = 1 << 2;
    }
}

impl InputKinds {
    /// Check whether `kind` is in the set
    pub const fn supports(self, kind: InputKind) -> bool {
        self.contains(kind.as_flag())
    }

    /// Iterate the kinds in the set, in declaration order
    pub fn kinds(self) -> impl Iterator<Item = InputKind> {
        InputKind::ALL
            .into_iter()
            .filter(move |kind| self.supports(*kind))
    }
}

impl From<InputKind> for InputKinds {
    fn from(kind: InputKind) -> Self {
        kind.as_flag()
    }
}

impl FromIterator<InputKind> for InputKinds {
    fn from_iter<I: IntoIterator<Item = InputKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set | kind.as_flag())
    }
}

impl fmt::Display for InputKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, kind) in self.kinds().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(kind.name())?;
        }
        f.write_str("}")
    }
}

/// Declaration of a single material input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputInfo {
    /// Short name, unique within a material
    pub name: String,
    /// Description shown by tools
    pub description: String,
    /// Kinds the input accepts
    pub supported: InputKinds,
}

impl InputInfo {
    /// Create a new input declaration
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        supported: impl Into<InputKinds>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            supported: supported.into(),
        }
    }
}

/// Value currently bound to a material input
///
/// Texture and material variants are weak handles: holding one does not keep
/// the referent alive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputValue {
    /// Nothing bound since the input was declared
    #[default]
    Undefined,
    /// Four-component float vector
    Float4(Vec4),
    /// Texture reference
    Texture(TextureHandle),
    /// Material reference
    Material(MaterialHandle),
}

impl InputValue {
    /// Kind of the bound value, `None` while undefined
    pub const fn kind(&self) -> Option<InputKind> {
        match self {
            Self::Undefined => None,
            Self::Float4(_) => Some(InputKind::Float4),
            Self::Texture(_) => Some(InputKind::Texture),
            Self::Material(_) => Some(InputKind::Material),
        }
    }

    /// Whether a value has been bound
    pub const fn is_defined(&self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// The vector payload, if this is a `Float4` value
    pub const fn as_float4(&self) -> Option<Vec4> {
        match self {
            Self::Float4(v) => Some(*v),
            _ => None,
        }
    }

    /// The texture handle, if this is a `Texture` value
    pub const fn as_texture(&self) -> Option<TextureHandle> {
        match self {
            Self::Texture(t) => Some(*t),
            _ => None,
        }
    }

    /// The material handle, if this is a `Material` value
    pub const fn as_material(&self) -> Option<MaterialHandle> {
        match self {
            Self::Material(m) => Some(*m),
            _ => None,
        }
    }
}

impl From<Vec4> for InputValue {
    fn from(value: Vec4) -> Self {
        Self::Float4(value)
    }
}

impl From<[f32; 4]> for InputValue {
    fn from(value: [f32; 4]) -> Self {
        Self::Float4(Vec4::from(value))
    }
}

impl From<TextureHandle> for InputValue {
    fn from(texture: TextureHandle) -> Self {
        Self::Texture(texture)
    }
}

impl From<MaterialHandle> for InputValue {
    fn from(material: MaterialHandle) -> Self {
        Self::Material(material)
    }
}

/// Full input state: declaration plus bound value
#[derive(Debug, Clone, PartialEq)]
pub struct Input {
    /// Input declaration
    pub info: InputInfo,
    /// Currently bound value
    pub value: InputValue,
}

impl Input {
    /// Create an input with nothing bound yet
    pub const fn new(info: InputInfo) -> Self {
        Self {
            info,
            value: InputValue::Undefined,
        }
    }

    /// Input name
    pub fn name(&self) -> &str {
        &self.info.name
    }
}
