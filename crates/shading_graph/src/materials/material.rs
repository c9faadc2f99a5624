//! Material resource: declared inputs, bound values and bookkeeping
//!
//! A [`Material`] fixes its input shape when it is built. After that it only
//! changes through value binds, two-sidedness toggles, discriminant changes
//! and dirty-flag updates.

use std::collections::BTreeMap;

use super::dirty_flag::DirtyFlag;
use super::error::{MaterialError, MaterialResult};
use super::input::{Input, InputInfo, InputKinds, InputValue};
use super::iterators::{InputIter, MaterialIter, TextureIter};
use super::material_type::{BlendType, BxdfType, MaterialKind};
use crate::config::MaterialConfig;
use crate::foundation::collections::{MaterialHandle, TextureHandle};
use crate::foundation::math::Vec4;

/// Inputs declared by every single-BxDF material
const SINGLE_BXDF_INPUTS: [(&str, &str, InputKinds); 6] = [
    (
        "albedo",
        "Diffuse color",
        InputKinds::FLOAT4.union(InputKinds::TEXTURE),
    ),
    ("normal", "Normal map", InputKinds::TEXTURE),
    ("bump", "Bump map", InputKinds::TEXTURE),
    ("ior", "Index of refraction", InputKinds::FLOAT4),
    ("fresnel", "Fresnel flag", InputKinds::FLOAT4),
    (
        "roughness",
        "Roughness",
        InputKinds::FLOAT4.union(InputKinds::TEXTURE),
    ),
];

/// Inputs declared by every multi-BxDF material
const MULTI_BXDF_INPUTS: [(&str, &str, InputKinds); 4] = [
    ("base_material", "Base material", InputKinds::MATERIAL),
    ("top_material", "Top material", InputKinds::MATERIAL),
    ("ior", "Index of refraction", InputKinds::FLOAT4),
    (
        "weight",
        "Blend weight",
        InputKinds::FLOAT4.union(InputKinds::TEXTURE),
    ),
];

/// A shading description with typed, named inputs
///
/// Texture and material inputs hold weak handles; the material never keeps
/// what it references alive.
///
/// # Example
///
/// ```
/// use shading_graph::materials::{BxdfType, InputKind, Material};
///
/// let mut material = Material::single_bxdf(BxdfType::Lambert);
/// material.set_float4("albedo", [1.0, 0.0, 0.0, 1.0].into()).unwrap();
///
/// assert!(material.is_dirty());
/// assert_eq!(
///     material.input_value("albedo").unwrap().kind(),
///     Some(InputKind::Float4)
/// );
/// material.set_dirty(false);
/// ```
#[derive(Debug, Clone)]
pub struct Material {
    kind: MaterialKind,
    inputs: BTreeMap<String, Input>,
    two_sided: bool,
    dirty: DirtyFlag,
    config: MaterialConfig,
    name: Option<String>,
}

impl Material {
    /// Create a material with no declared inputs
    ///
    /// Declare the input shape with [`Material::declare_input`] before
    /// handing the material to consumers.
    pub fn new(kind: MaterialKind) -> Self {
        Self {
            kind,
            inputs: BTreeMap::new(),
            two_sided: false,
            dirty: DirtyFlag::default(),
            config: MaterialConfig::default(),
            name: None,
        }
    }

    /// Create a leaf material with the standard single-BxDF inputs
    pub fn single_bxdf(bxdf: BxdfType) -> Self {
        let mut material = Self::new(MaterialKind::SingleBxdf(bxdf));
        for (name, description, supported) in SINGLE_BXDF_INPUTS {
            material.declare_input(name, description, supported);
        }
        material
    }

    /// Create a composite material with the standard multi-BxDF inputs
    pub fn multi_bxdf(blend: BlendType) -> Self {
        let mut material = Self::new(MaterialKind::MultiBxdf(blend));
        for (name, description, supported) in MULTI_BXDF_INPUTS {
            material.declare_input(name, description, supported);
        }
        material
    }

    /// Set the material name for debugging
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replace the bookkeeping policy
    #[must_use]
    pub fn with_config(mut self, config: MaterialConfig) -> Self {
        self.config = config;
        self
    }

    /// Debug name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Bookkeeping policy in effect
    pub const fn config(&self) -> &MaterialConfig {
        &self.config
    }

    /// Discriminant of this material
    pub const fn kind(&self) -> MaterialKind {
        self.kind
    }

    /// Elementary function, for single-BxDF materials
    pub const fn bxdf_type(&self) -> Option<BxdfType> {
        match self.kind {
            MaterialKind::SingleBxdf(bxdf) => Some(bxdf),
            MaterialKind::MultiBxdf(_) => None,
        }
    }

    /// Blend strategy, for multi-BxDF materials
    pub const fn blend_type(&self) -> Option<BlendType> {
        match self.kind {
            MaterialKind::MultiBxdf(blend) => Some(blend),
            MaterialKind::SingleBxdf(_) => None,
        }
    }

    /// Change the elementary function of a single-BxDF material
    ///
    /// Returns `false` without touching anything on a multi-BxDF material.
    /// An actual change marks the material dirty.
    pub fn set_bxdf_type(&mut self, bxdf: BxdfType) -> bool {
        match &mut self.kind {
            MaterialKind::SingleBxdf(current) => {
                if *current != bxdf {
                    *current = bxdf;
                    self.dirty.mark();
                }
                true
            }
            MaterialKind::MultiBxdf(_) => false,
        }
    }

    /// Change the blend strategy of a multi-BxDF material
    ///
    /// Returns `false` without touching anything on a single-BxDF material.
    /// An actual change marks the material dirty.
    pub fn set_blend_type(&mut self, blend: BlendType) -> bool {
        match &mut self.kind {
            MaterialKind::MultiBxdf(current) => {
                if *current != blend {
                    *current = blend;
                    self.dirty.mark();
                }
                true
            }
            MaterialKind::SingleBxdf(_) => false,
        }
    }

    /// Declare an input, replacing any previous declaration of `name`
    ///
    /// The input starts (or restarts) with an undefined value. This belongs
    /// to material construction; redeclaring later fully overwrites the
    /// single input and leaves the others untouched.
    pub fn declare_input(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        supported: impl Into<InputKinds>,
    ) {
        let info = InputInfo::new(name, description, supported);
        log::trace!("Declaring input {} {} on {}", info.name, info.supported, self.kind);
        self.inputs.insert(info.name.clone(), Input::new(info));
    }

    /// Remove every declared input
    pub fn clear_inputs(&mut self) {
        self.inputs.clear();
    }

    /// Bind a value to a declared input
    ///
    /// Fails with [`MaterialError::UnknownInput`] for an undeclared name and
    /// with [`MaterialError::UnsupportedKind`] when the input does not accept
    /// the value's kind. A failed bind changes nothing; a successful one
    /// always marks the material dirty.
    pub fn set_input_value(
        &mut self,
        name: &str,
        value: impl Into<InputValue>,
    ) -> MaterialResult<()> {
        let value = value.into();
        let input = self
            .inputs
            .get_mut(name)
            .ok_or_else(|| MaterialError::UnknownInput {
                name: name.to_string(),
            })?;

        let supported = input.info.supported;
        match value.kind() {
            Some(kind) if supported.supports(kind) => {}
            kind => {
                return Err(MaterialError::UnsupportedKind {
                    name: name.to_string(),
                    kind,
                    supported,
                })
            }
        }

        log::trace!("Binding {name} = {value:?}");
        input.value = value;
        self.dirty.mark();
        Ok(())
    }

    /// Bind a four-component vector
    pub fn set_float4(&mut self, name: &str, value: Vec4) -> MaterialResult<()> {
        self.set_input_value(name, value)
    }

    /// Bind a texture reference
    pub fn set_texture(&mut self, name: &str, texture: TextureHandle) -> MaterialResult<()> {
        self.set_input_value(name, texture)
    }

    /// Bind a material reference
    ///
    /// No cycle check happens here; bind through
    /// [`crate::materials::MaterialRegistry::set_input_value`] for that.
    pub fn set_material(&mut self, name: &str, material: MaterialHandle) -> MaterialResult<()> {
        self.set_input_value(name, material)
    }

    /// Read the value bound to a declared input
    ///
    /// The value is [`InputValue::Undefined`] until a bind succeeds.
    pub fn input_value(&self, name: &str) -> MaterialResult<InputValue> {
        self.inputs
            .get(name)
            .map(|input| input.value)
            .ok_or_else(|| MaterialError::UnknownInput {
                name: name.to_string(),
            })
    }

    /// Declaration of an input
    pub fn input_info(&self, name: &str) -> Option<&InputInfo> {
        self.inputs.get(name).map(|input| &input.info)
    }

    /// Whether `name` is declared
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// Number of declared inputs
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Snapshot of every input
    pub fn input_iter(&self) -> InputIter {
        InputIter::snapshot(self.inputs.values())
    }

    /// Snapshot of the inputs bound to materials
    pub fn material_iter(&self) -> MaterialIter {
        MaterialIter::snapshot(self.inputs.values())
    }

    /// Snapshot of the inputs bound to textures
    pub fn texture_iter(&self) -> TextureIter {
        TextureIter::snapshot(self.inputs.values())
    }

    /// Referenced materials in name order, borrowed rather than copied
    pub(crate) fn material_refs(&self) -> impl DoubleEndedIterator<Item = MaterialHandle> + '_ {
        self.inputs.values().filter_map(|input| input.value.as_material())
    }

    /// Whether the surface normal orientation is ignored
    pub const fn is_two_sided(&self) -> bool {
        self.two_sided
    }

    /// Set two-sidedness
    ///
    /// Marks the material dirty on an actual change only when
    /// [`MaterialConfig::two_sided_marks_dirty`] is set.
    pub fn set_two_sided(&mut self, two_sided: bool) {
        if self.two_sided != two_sided && self.config.two_sided_marks_dirty {
            self.dirty.mark();
        }
        self.two_sided = two_sided;
    }

    /// Whether the compiled representation is stale
    pub fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    /// Set the dirty state
    ///
    /// Takes `&self`: renderers clear the flag on materials they only read.
    pub fn set_dirty(&self, dirty: bool) {
        self.dirty.set(dirty);
    }
}
