//! Material type definitions and enums
//!
//! A material is either a single elementary BxDF or a combination of other
//! materials. The variant set is closed; consumers match on [`MaterialKind`].

use std::fmt;

/// Elementary shading functions a leaf material can evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BxdfType {
    /// Absorbs everything
    Zero,
    /// Lambertian diffuse reflection
    Lambert,
    /// Perfect specular reflection
    IdealReflect,
    /// Perfect specular refraction
    IdealRefract,
    /// Blinn microfacet reflection
    MicrofacetBlinn,
    /// Beckmann microfacet reflection
    MicrofacetBeckmann,
    /// GGX microfacet reflection
    MicrofacetGgx,
    /// Light emitter
    Emissive,
    /// Lets rays pass through unchanged
    Passthrough,
    /// Diffuse transmission
    Translucent,
    /// GGX microfacet refraction
    MicrofacetRefractionGgx,
    /// Beckmann microfacet refraction
    MicrofacetRefractionBeckmann,
}

impl BxdfType {
    /// Every elementary function, in declaration order
    pub const ALL: [Self; 12] = [
        Self::Zero,
        Self::Lambert,
        Self::IdealReflect,
        Self::IdealRefract,
        Self::MicrofacetBlinn,
        Self::MicrofacetBeckmann,
        Self::MicrofacetGgx,
        Self::Emissive,
        Self::Passthrough,
        Self::Translucent,
        Self::MicrofacetRefractionGgx,
        Self::MicrofacetRefractionBeckmann,
    ];

    /// Stable identifier, suitable for shader variant keys
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Lambert => "lambert",
            Self::IdealReflect => "ideal_reflect",
            Self::IdealRefract => "ideal_refract",
            Self::MicrofacetBlinn => "microfacet_blinn",
            Self::MicrofacetBeckmann => "microfacet_beckmann",
            Self::MicrofacetGgx => "microfacet_ggx",
            Self::Emissive => "emissive",
            Self::Passthrough => "passthrough",
            Self::Translucent => "translucent",
            Self::MicrofacetRefractionGgx => "microfacet_refraction_ggx",
            Self::MicrofacetRefractionBeckmann => "microfacet_refraction_beckmann",
        }
    }

    /// Whether the function emits light
    pub const fn is_emissive(self) -> bool {
        matches!(self, Self::Emissive)
    }

    /// Whether the function transmits light through the surface
    pub const fn is_refractive(self) -> bool {
        matches!(
            self,
            Self::IdealRefract
                | Self::MicrofacetRefractionGgx
                | Self::MicrofacetRefractionBeckmann
                | Self::Translucent
                | Self::Passthrough
        )
    }

    /// Whether the function uses a microfacet distribution (reads `roughness`)
    pub const fn is_microfacet(self) -> bool {
        matches!(
            self,
            Self::MicrofacetBlinn
                | Self::MicrofacetBeckmann
                | Self::MicrofacetGgx
                | Self::MicrofacetRefractionGgx
                | Self::MicrofacetRefractionBeckmann
        )
    }
}

impl fmt::Display for BxdfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strategies for combining child materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendType {
    /// Top material layered over the base material
    Layered,
    /// Blend driven by the Fresnel term of `ior`
    FresnelBlend,
    /// Linear mix driven by `weight`
    Mix,
}

impl BlendType {
    /// Every blend strategy, in declaration order
    pub const ALL: [Self; 3] = [Self::Layered, Self::FresnelBlend, Self::Mix];

    /// Stable identifier, suitable for shader variant keys
    pub const fn name(self) -> &'static str {
        match self {
            Self::Layered => "layered",
            Self::FresnelBlend => "fresnel_blend",
            Self::Mix => "mix",
        }
    }
}

impl fmt::Display for BlendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Discriminant of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialKind {
    /// Leaf material evaluating one elementary function
    SingleBxdf(BxdfType),
    /// Composite material combining the materials bound to its inputs
    MultiBxdf(BlendType),
}

impl MaterialKind {
    /// Whether this is a composite material
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::MultiBxdf(_))
    }

    /// Shader variant name for this kind
    pub const fn shader_variant(self) -> &'static str {
        match self {
            Self::SingleBxdf(bxdf) => bxdf.name(),
            Self::MultiBxdf(blend) => blend.name(),
        }
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SingleBxdf(bxdf) => write!(f, "single({bxdf})"),
            Self::MultiBxdf(blend) => write!(f, "multi({blend})"),
        }
    }
}
