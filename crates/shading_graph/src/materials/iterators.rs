//! Snapshot iterators over material inputs
//!
//! Each iterator copies the matching inputs when it is created and never
//! borrows the material again. Binds made afterwards are invisible to it; a
//! new iterator must be created to observe them. The iterators are one-shot:
//! they are neither `Clone` nor restartable.

use std::iter::FusedIterator;
use std::vec;

use super::input::{Input, InputValue};
use crate::foundation::collections::{MaterialHandle, TextureHandle};

macro_rules! snapshot_iter {
    ($(#[$meta:meta])* $name:ident => $item:ty) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name {
            inner: vec::IntoIter<$item>,
        }

        impl Iterator for $name {
            type Item = $item;

            fn next(&mut self) -> Option<Self::Item> {
                self.inner.next()
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.inner.size_hint()
            }
        }

        impl ExactSizeIterator for $name {}

        impl FusedIterator for $name {}
    };
}

snapshot_iter! {
    /// Every declared input, in name order
    InputIter => Input
}

snapshot_iter! {
    /// Inputs currently bound to a material reference, as `(name, handle)`
    MaterialIter => (String, MaterialHandle)
}

snapshot_iter! {
    /// Inputs currently bound to a texture reference, as `(name, handle)`
    TextureIter => (String, TextureHandle)
}

impl InputIter {
    pub(crate) fn snapshot<'a>(inputs: impl Iterator<Item = &'a Input>) -> Self {
        Self {
            inner: inputs.cloned().collect::<Vec<_>>().into_iter(),
        }
    }
}

impl MaterialIter {
    pub(crate) fn snapshot<'a>(inputs: impl Iterator<Item = &'a Input>) -> Self {
        let refs: Vec<_> = inputs
            .filter_map(|input| match input.value {
                InputValue::Material(handle) => Some((input.info.name.clone(), handle)),
                _ => None,
            })
            .collect();
        Self {
            inner: refs.into_iter(),
        }
    }

    /// Drop the names, keeping only the referenced materials
    pub fn handles(self) -> impl Iterator<Item = MaterialHandle> {
        self.map(|(_, handle)| handle)
    }
}

impl TextureIter {
    pub(crate) fn snapshot<'a>(inputs: impl Iterator<Item = &'a Input>) -> Self {
        let refs: Vec<_> = inputs
            .filter_map(|input| match input.value {
                InputValue::Texture(handle) => Some((input.info.name.clone(), handle)),
                _ => None,
            })
            .collect();
        Self {
            inner: refs.into_iter(),
        }
    }

    /// Drop the names, keeping only the referenced textures
    pub fn handles(self) -> impl Iterator<Item = TextureHandle> {
        self.map(|(_, handle)| handle)
    }
}
