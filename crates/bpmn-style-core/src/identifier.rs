//! Interned element identifiers.
//!
//! Scene elements and their labels are keyed by [`Id`], a copyable handle
//! into a process-wide string interner.

use std::{
    fmt,
    sync::{Mutex, OnceLock, PoisonError},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Runs `f` with exclusive access to the interner.
///
/// A poisoned lock is recovered: the interner is append-only, so a panic in
/// another thread cannot leave it half-updated.
fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    f(&mut interner)
}

/// Identifier of a diagram element.
///
/// # Examples
///
/// ```
/// use bpmn_style_core::identifier::Id;
///
/// let task = Id::new("approve_invoice");
/// assert_eq!(task, Id::from("approve_invoice"));
/// assert_eq!(task.to_string(), "approve_invoice");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Resolves the identifier to an owned string.
    pub fn name(&self) -> String {
        with_interner(|interner| interner.resolve(self.0).unwrap_or_default().to_owned())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_same_name_same_id() {
        let first = Id::new("gateway_1");
        let second = Id::new("gateway_1");
        assert_eq!(first, second);
        assert_ne!(first, Id::new("gateway_2"));
        assert_eq!(first, "gateway_1");
    }

    #[test]
    fn test_display_resolves_name() {
        let pool = Id::new("supplier");
        assert_eq!(pool.to_string(), "supplier");
        assert_eq!(pool.name(), "supplier");
    }

    #[test]
    fn test_as_map_key() {
        let mut styles = HashMap::new();
        styles.insert(Id::new("task"), 1);
        styles.insert(Id::new("event"), 2);
        assert_eq!(styles.get(&Id::from("task")), Some(&1));
    }
}
