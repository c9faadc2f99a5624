//! A renderer's compile loop over a shared material graph

use std::collections::HashMap;

use crate::foundation::collections::HandleMap;
use crate::foundation::logging;
use crate::foundation::math::splat;
use crate::prelude::*;

/// Stand-in for a renderer's compiled material cache
#[derive(Default)]
struct CompiledCache {
    variants: HashMap<MaterialHandle, &'static str>,
    compile_count: usize,
}

impl CompiledCache {
    fn rebuild(&mut self, registry: &MaterialRegistry, root: MaterialHandle) -> MaterialResult<()> {
        for handle in registry.dirty_materials(root)? {
            let material = registry.get(handle).ok_or(MaterialError::InvalidHandle)?;

            // Composite inputs must already be compiled
            for child in material.material_iter().handles() {
                assert!(self.variants.contains_key(&child) || !registry.contains(child));
            }

            self.variants.insert(handle, material.kind().shader_variant());
            self.compile_count += 1;
            material.set_dirty(false);
        }
        Ok(())
    }
}

#[test]
fn test_incremental_recompile() {
    logging::init_for_tests();

    let mut textures: HandleMap<TextureHandle, &str> = HandleMap::with_key();
    let wood = textures.insert("wood.png");

    let mut registry = MaterialRegistry::default();
    let varnish = registry.insert(Material::single_bxdf(BxdfType::MicrofacetGgx));
    let base = registry.insert(Material::single_bxdf(BxdfType::Lambert));
    let root = registry.insert(Material::multi_bxdf(BlendType::FresnelBlend));

    registry.set_input_value(base, "albedo", wood).unwrap();
    registry.set_input_value(varnish, "roughness", splat(0.1)).unwrap();
    registry.set_input_value(root, "base_material", base).unwrap();
    registry.set_input_value(root, "top_material", varnish).unwrap();
    registry.set_input_value(root, "ior", splat(1.5)).unwrap();

    let mut cache = CompiledCache::default();
    cache.rebuild(&registry, root).unwrap();
    assert_eq!(cache.compile_count, 3);
    assert_eq!(cache.variants[&root], "fresnel_blend");
    assert!(!registry.is_graph_dirty(root).unwrap());
    assert_eq!(registry.textures(root).unwrap(), vec![wood]);

    // Only the touched leaf is rebuilt
    registry.set_input_value(varnish, "roughness", splat(0.3)).unwrap();
    cache.rebuild(&registry, root).unwrap();
    assert_eq!(cache.compile_count, 4);

    // Nothing changed, nothing rebuilt
    cache.rebuild(&registry, root).unwrap();
    assert_eq!(cache.compile_count, 4);
}

#[test]
fn test_cycle_rejected_during_editing() {
    let mut registry = MaterialRegistry::default();
    let outer = registry.insert(Material::multi_bxdf(BlendType::Layered));
    let inner = registry.insert(Material::multi_bxdf(BlendType::Mix));

    registry.set_input_value(outer, "base_material", inner).unwrap();
    let err = registry.set_input_value(inner, "top_material", outer).unwrap_err();

    assert_eq!(
        err,
        MaterialError::CycleDetected {
            name: "top_material".to_string()
        }
    );
    assert_eq!(registry.dependencies(outer).unwrap(), vec![inner, outer]);
}

#[test]
fn test_policy_from_config_file_contents() {
    let config = MaterialConfig::from_toml_str(
        "two_sided_marks_dirty = true\ndetect_cycles = true\n",
    )
    .unwrap();
    let mut registry = MaterialRegistry::new(config);
    let handle = registry.insert(Material::single_bxdf(BxdfType::Translucent));
    registry.set_dirty(handle, false).unwrap();

    registry.set_two_sided(handle, true).unwrap();
    assert!(registry.get(handle).unwrap().is_dirty());
}
