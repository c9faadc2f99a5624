//! Material registry for owning materials and walking their reference graph
//!
//! Materials reference each other through weak [`MaterialHandle`]s. The
//! registry is the arena those handles point into. It is also the only place
//! that can see the whole graph, so binds that would close a reference loop
//! are rejected here.

use std::collections::HashSet;

use super::error::{MaterialError, MaterialResult};
use super::input::{InputKind, InputValue};
use super::material::Material;
use crate::config::MaterialConfig;
use crate::foundation::collections::{HandleMap, MaterialHandle, TextureHandle};

/// Central owner of materials addressed by [`MaterialHandle`]
#[derive(Debug, Default)]
pub struct MaterialRegistry {
    /// All registered materials
    materials: HandleMap<MaterialHandle, Material>,
    /// Policy applied to every registered material
    config: MaterialConfig,
}

impl MaterialRegistry {
    /// Create an empty registry
    pub fn new(config: MaterialConfig) -> Self {
        Self {
            materials: HandleMap::with_key(),
            config,
        }
    }

    /// Policy applied to registered materials
    pub const fn config(&self) -> &MaterialConfig {
        &self.config
    }

    /// Register a material and return its handle
    ///
    /// The material adopts the registry's [`MaterialConfig`].
    pub fn insert(&mut self, material: Material) -> MaterialHandle {
        let material = material.with_config(self.config);
        let kind = material.kind();
        let handle = self.materials.insert(material);
        log::debug!("Registered material {:?} ({})", handle, kind);
        handle
    }

    /// Unregister a material
    ///
    /// Handles held by other materials are left dangling; traversals skip
    /// them.
    pub fn remove(&mut self, handle: MaterialHandle) -> Option<Material> {
        let removed = self.materials.remove(handle);
        if removed.is_some() {
            log::debug!("Removed material {:?}", handle);
        }
        removed
    }

    /// Get a material by handle
    pub fn get(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle)
    }

    /// Whether `handle` names a registered material
    pub fn contains(&self, handle: MaterialHandle) -> bool {
        self.materials.contains_key(handle)
    }

    /// Number of registered materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    /// Whether no material is registered
    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Handles of all registered materials
    pub fn handles(&self) -> impl Iterator<Item = MaterialHandle> + '_ {
        self.materials.keys()
    }

    /// All registered materials with their handles
    pub fn iter(&self) -> impl Iterator<Item = (MaterialHandle, &Material)> {
        self.materials.iter()
    }

    /// Bind a value to an input of a registered material
    ///
    /// Material references are checked for cycles first when
    /// [`MaterialConfig::detect_cycles`] is set. Otherwise behaves like
    /// [`Material::set_input_value`].
    pub fn set_input_value(
        &mut self,
        handle: MaterialHandle,
        name: &str,
        value: impl Into<InputValue>,
    ) -> MaterialResult<()> {
        let value = value.into();
        let material = self.get(handle).ok_or(MaterialError::InvalidHandle)?;

        if let Some(child) = value.as_material() {
            // Kind errors take precedence; only a bind that would succeed can close a loop
            let accepts_material = material
                .input_info(name)
                .is_some_and(|info| info.supported.supports(InputKind::Material));

            if accepts_material && self.config.detect_cycles && self.reaches(child, handle) {
                log::warn!(
                    "Rejected binding {:?} to input {} of {:?}: reference cycle",
                    child,
                    name,
                    handle
                );
                return Err(MaterialError::CycleDetected {
                    name: name.to_string(),
                });
            }
        }

        self.materials
            .get_mut(handle)
            .ok_or(MaterialError::InvalidHandle)?
            .set_input_value(name, value)
    }

    /// Set two-sidedness of a registered material
    pub fn set_two_sided(
        &mut self,
        handle: MaterialHandle,
        two_sided: bool,
    ) -> MaterialResult<()> {
        self.materials
            .get_mut(handle)
            .ok_or(MaterialError::InvalidHandle)?
            .set_two_sided(two_sided);
        Ok(())
    }

    /// Set the dirty state of a registered material
    pub fn set_dirty(&self, handle: MaterialHandle, dirty: bool) -> MaterialResult<()> {
        self.get(handle)
            .ok_or(MaterialError::InvalidHandle)?
            .set_dirty(dirty);
        Ok(())
    }

    /// Every material reachable from `root`, children before parents
    ///
    /// Each material appears once and `root` comes last, which is the order a
    /// renderer compiles them in. Dangling references are skipped.
    pub fn dependencies(&self, root: MaterialHandle) -> MaterialResult<Vec<MaterialHandle>> {
        if !self.contains(root) {
            return Err(MaterialError::InvalidHandle);
        }

        Ok(self.visit(root))
    }

    /// Unique textures referenced anywhere in the graph of `root`
    pub fn textures(&self, root: MaterialHandle) -> MaterialResult<Vec<TextureHandle>> {
        let mut seen = HashSet::new();
        let textures = self
            .dependencies(root)?
            .into_iter()
            .filter_map(|handle| self.get(handle))
            .flat_map(|material| material.texture_iter().handles())
            .filter(|texture| seen.insert(*texture))
            .collect();
        Ok(textures)
    }

    /// Dirty materials in the graph of `root`, children before parents
    pub fn dirty_materials(&self, root: MaterialHandle) -> MaterialResult<Vec<MaterialHandle>> {
        Ok(self
            .dependencies(root)?
            .into_iter()
            .filter(|handle| self.get(*handle).is_some_and(Material::is_dirty))
            .collect())
    }

    /// Whether any material in the graph of `root` is dirty
    pub fn is_graph_dirty(&self, root: MaterialHandle) -> MaterialResult<bool> {
        Ok(!self.dirty_materials(root)?.is_empty())
    }

    /// Mark the whole graph of `root` clean, returning how many were dirty
    pub fn clear_dirty(&self, root: MaterialHandle) -> MaterialResult<usize> {
        let dirty = self.dirty_materials(root)?;
        for handle in &dirty {
            if let Some(material) = self.get(*handle) {
                material.set_dirty(false);
            }
        }
        Ok(dirty.len())
    }

    /// Check whether `target` can be reached from `from` through material inputs
    fn reaches(&self, from: MaterialHandle, target: MaterialHandle) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![from];

        while let Some(current) = stack.pop() {
            if current == target {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(material) = self.get(current) {
                stack.extend(material.material_refs());
            }
        }

        false
    }

    /// Post-order walk from `root`, children in name order
    fn visit(&self, root: MaterialHandle) -> Vec<MaterialHandle> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        // (handle, children already pushed)
        let mut stack = vec![(root, false)];

        while let Some((handle, expanded)) = stack.pop() {
            if expanded {
                order.push(handle);
                continue;
            }
            if !visited.insert(handle) {
                continue;
            }
            let Some(material) = self.get(handle) else {
                log::warn!("Skipping dangling material reference {:?}", handle);
                continue;
            };
            stack.push((handle, true));
            // Reversed so the first input is popped first
            stack.extend(material.material_refs().rev().map(|child| (child, false)));
        }

        order
    }
}

impl Drop for MaterialRegistry {
    fn drop(&mut self) {
        log::debug!("MaterialRegistry dropping with {} materials", self.materials.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec4;
    use crate::materials::{BlendType, BxdfType};

    fn leaf(registry: &mut MaterialRegistry) -> MaterialHandle {
        registry.insert(Material::single_bxdf(BxdfType::Lambert))
    }

    fn mix(registry: &mut MaterialRegistry) -> MaterialHandle {
        registry.insert(Material::multi_bxdf(BlendType::Mix))
    }

    #[test]
    fn test_material_storage() {
        let mut registry = MaterialRegistry::default();
        assert!(registry.is_empty());

        let handle = leaf(&mut registry);
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(handle));
        assert_eq!(registry.get(handle).unwrap().bxdf_type(), Some(BxdfType::Lambert));
        assert_eq!(registry.handles().collect::<Vec<_>>(), vec![handle]);

        assert!(registry.remove(handle).is_some());
        assert!(registry.remove(handle).is_none());
        assert!(registry.get(handle).is_none());
    }

    #[test]
    fn test_invalid_handle() {
        let mut registry = MaterialRegistry::default();
        let handle = leaf(&mut registry);
        registry.remove(handle);

        assert_eq!(
            registry.set_input_value(handle, "albedo", Vec4::zeros()),
            Err(MaterialError::InvalidHandle)
        );
        assert_eq!(registry.set_two_sided(handle, true), Err(MaterialError::InvalidHandle));
        assert_eq!(registry.set_dirty(handle, false), Err(MaterialError::InvalidHandle));
        assert_eq!(registry.dependencies(handle), Err(MaterialError::InvalidHandle));
    }

    #[test]
    fn test_insert_applies_registry_config() {
        let mut registry = MaterialRegistry::new(MaterialConfig {
            two_sided_marks_dirty: true,
            detect_cycles: true,
        });
        let handle = leaf(&mut registry);
        registry.set_dirty(handle, false).unwrap();

        registry.set_two_sided(handle, true).unwrap();
        let material = registry.get(handle).unwrap();
        assert!(material.is_two_sided());
        assert!(material.is_dirty());
    }

    #[test]
    fn test_self_reference_is_rejected() {
        let mut registry = MaterialRegistry::default();
        let blend = mix(&mut registry);

        let err = registry
            .set_input_value(blend, "base_material", blend)
            .unwrap_err();
        assert_eq!(
            err,
            MaterialError::CycleDetected {
                name: "base_material".to_string()
            }
        );
        assert_eq!(
            registry.get(blend).unwrap().input_value("base_material").unwrap(),
            InputValue::Undefined
        );
    }

    #[test]
    fn test_indirect_cycle_is_rejected() {
        let mut registry = MaterialRegistry::default();
        let outer = mix(&mut registry);
        let inner = mix(&mut registry);
        let base = leaf(&mut registry);

        registry.set_input_value(outer, "base_material", inner).unwrap();
        registry.set_input_value(inner, "base_material", base).unwrap();
        registry.set_dirty(inner, false).unwrap();

        let err = registry
            .set_input_value(inner, "top_material", outer)
            .unwrap_err();
        assert!(matches!(err, MaterialError::CycleDetected { .. }));
        assert!(!registry.get(inner).unwrap().is_dirty());

        // Sharing a child is not a cycle
        registry.set_input_value(outer, "top_material", base).unwrap();
    }

    #[test]
    fn test_kind_errors_take_precedence_over_cycles() {
        let mut registry = MaterialRegistry::default();
        let blend = mix(&mut registry);

        let err = registry.set_input_value(blend, "ior", blend).unwrap_err();
        assert!(matches!(err, MaterialError::UnsupportedKind { .. }));

        let err = registry.set_input_value(blend, "missing", blend).unwrap_err();
        assert!(matches!(err, MaterialError::UnknownInput { .. }));
    }

    #[test]
    fn test_cycles_allowed_when_detection_disabled() {
        let mut registry = MaterialRegistry::new(MaterialConfig {
            detect_cycles: false,
            ..MaterialConfig::default()
        });
        let first = mix(&mut registry);
        let second = mix(&mut registry);

        registry.set_input_value(first, "base_material", second).unwrap();
        registry.set_input_value(second, "base_material", first).unwrap();

        // Traversal still terminates
        let deps = registry.dependencies(first).unwrap();
        assert_eq!(deps, vec![second, first]);
    }

    #[test]
    fn test_dependencies_are_children_first() {
        let mut registry = MaterialRegistry::default();
        let root = mix(&mut registry);
        let layer = mix(&mut registry);
        let diffuse = leaf(&mut registry);
        let gloss = registry.insert(Material::single_bxdf(BxdfType::MicrofacetGgx));

        registry.set_input_value(root, "base_material", layer).unwrap();
        registry.set_input_value(root, "top_material", gloss).unwrap();
        registry.set_input_value(layer, "base_material", diffuse).unwrap();
        registry.set_input_value(layer, "top_material", gloss).unwrap();

        let deps = registry.dependencies(root).unwrap();
        assert_eq!(deps.len(), 4);
        assert_eq!(deps.last(), Some(&root));

        let position = |h: MaterialHandle| deps.iter().position(|d| *d == h).unwrap();
        assert!(position(diffuse) < position(layer));
        assert!(position(gloss) < position(layer));
        assert!(position(layer) < position(root));
    }

    #[test]
    fn test_dangling_reference_is_skipped() {
        let mut registry = MaterialRegistry::default();
        let root = mix(&mut registry);
        let child = leaf(&mut registry);
        registry.set_input_value(root, "base_material", child).unwrap();

        registry.remove(child);
        assert_eq!(registry.dependencies(root).unwrap(), vec![root]);
    }

    #[test]
    fn test_textures_are_unique() {
        let mut textures: HandleMap<TextureHandle, &str> = HandleMap::with_key();
        let checker = textures.insert("checker.png");
        let noise = textures.insert("noise.png");

        let mut registry = MaterialRegistry::default();
        let root = mix(&mut registry);
        let first = leaf(&mut registry);
        let second = leaf(&mut registry);

        registry.set_input_value(root, "base_material", first).unwrap();
        registry.set_input_value(root, "top_material", second).unwrap();
        registry.set_input_value(root, "weight", noise).unwrap();
        registry.set_input_value(first, "albedo", checker).unwrap();
        registry.set_input_value(second, "albedo", checker).unwrap();

        let mut found = registry.textures(root).unwrap();
        found.sort();
        let mut expected = vec![checker, noise];
        expected.sort();
        assert_eq!(found, expected);
    }

    /// Layered materials each stacked on the previous one; returns (first, last)
    fn chain(registry: &mut MaterialRegistry, len: usize) -> (MaterialHandle, MaterialHandle) {
        let first = registry.insert(Material::multi_bxdf(BlendType::Layered));
        let mut last = first;
        for _ in 1..len {
            let mut material = Material::multi_bxdf(BlendType::Layered);
            material.set_material("base_material", last).unwrap();
            last = registry.insert(material);
        }
        (first, last)
    }

    #[test]
    fn test_deep_chain_walks_without_recursion() {
        const DEPTH: usize = 100_000;
        let mut registry = MaterialRegistry::default();
        let (first, last) = chain(&mut registry, DEPTH);

        let deps = registry.dependencies(last).unwrap();
        assert_eq!(deps.len(), DEPTH);
        assert_eq!(deps.first(), Some(&first));
        assert_eq!(deps.last(), Some(&last));

        assert_eq!(registry.clear_dirty(last).unwrap(), DEPTH);
        assert!(!registry.is_graph_dirty(last).unwrap());
    }

    #[test]
    fn test_deep_chain_cycle_is_rejected() {
        let mut registry = MaterialRegistry::default();
        let (first, last) = chain(&mut registry, 100_000);

        let err = registry
            .set_input_value(first, "base_material", last)
            .unwrap_err();
        assert!(matches!(err, MaterialError::CycleDetected { .. }));

        // Extending the chain is fine
        let top = mix(&mut registry);
        registry.set_input_value(top, "base_material", last).unwrap();
        assert_eq!(registry.dependencies(top).unwrap().len(), 100_001);
    }

    #[test]
    fn test_registry_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MaterialRegistry>();
        assert_send_sync::<Material>();
    }

    #[test]
    fn test_dirty_graph_bookkeeping() {
        let mut registry = MaterialRegistry::default();
        let root = mix(&mut registry);
        let child = leaf(&mut registry);
        registry.set_input_value(root, "base_material", child).unwrap();

        assert_eq!(registry.dirty_materials(root).unwrap(), vec![child, root]);
        assert_eq!(registry.clear_dirty(root).unwrap(), 2);
        assert!(!registry.is_graph_dirty(root).unwrap());

        registry
            .set_input_value(child, "albedo", Vec4::new(0.2, 0.2, 0.2, 1.0))
            .unwrap();
        assert!(registry.is_graph_dirty(root).unwrap());
        assert_eq!(registry.dirty_materials(root).unwrap(), vec![child]);
    }
}
