//! Lazily built icon caches owned by a single style.

use std::cell::RefCell;

use log::trace;

use bpmn_style_core::icon::IconRef;

/// A sub-icon built on first read and kept until invalidated.
///
/// Optional sub-icons use `IconSlot<Option<IconRef>>`.
#[derive(Debug)]
pub struct IconSlot<T = IconRef> {
    icon: RefCell<Option<T>>,
}

impl<T: Clone> IconSlot<T> {
    pub fn new() -> Self {
        Self {
            icon: RefCell::new(None),
        }
    }

    /// Returns the cached value, building it first if the slot is empty.
    pub fn get_or_build(&self, build: impl FnOnce() -> T) -> T {
        if let Some(icon) = self.icon.borrow().as_ref() {
            return icon.clone();
        }
        let icon = build();
        *self.icon.borrow_mut() = Some(icon.clone());
        icon
    }

    /// Drops the cached value so the next read rebuilds it.
    pub fn invalidate(&self) {
        self.icon.borrow_mut().take();
    }

    pub fn is_built(&self) -> bool {
        self.icon.borrow().is_some()
    }
}

impl<T: Clone> Default for IconSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for IconSlot<T> {
    /// Clones start empty; cached icons belong to the original style.
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// An icon cached together with the modification count it was built for.
///
/// Used where invalidation cannot be driven by setters alone, such as
/// choreographies whose participant lists change independently.
#[derive(Debug, Default)]
pub struct KeyedIconSlot {
    entry: RefCell<Option<(u64, IconRef)>>,
}

impl KeyedIconSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the icon cached for `key`, rebuilding it if the cached entry
    /// belongs to another key.
    pub fn get_or_build(&self, key: u64, build: impl FnOnce() -> IconRef) -> IconRef {
        if let Some((cached_key, icon)) = self.entry.borrow().as_ref() {
            if *cached_key == key {
                trace!(mod_count = key; "Icon cache hit");
                return IconRef::clone(icon);
            }
        }
        let icon = build();
        *self.entry.borrow_mut() = Some((key, IconRef::clone(&icon)));
        icon
    }

    /// Modification count of the cached icon, if any.
    pub fn cached_key(&self) -> Option<u64> {
        self.entry.borrow().as_ref().map(|(key, _)| *key)
    }
}

impl Clone for KeyedIconSlot {
    fn clone(&self) -> Self {
        Self::default()
    }
}
