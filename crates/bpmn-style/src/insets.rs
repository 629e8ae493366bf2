//! Padding reserved for markers, bands and headers.
//!
//! Generic layout and label code asks an [`InsetsProvider`] how much of an
//! element's layout rectangle is taken by BPMN decorations without knowing
//! what those decorations are. Insets are recomputed on every call.

use bpmn_style_core::geometry::{Bounds, Insets};

/// Derives the insets of an element from its active features.
pub trait InsetsProvider {
    /// The configured base insets.
    fn base_insets(&self) -> Insets;

    /// Extra padding of the currently active features. Never negative.
    fn feature_insets(&self) -> Insets {
        Insets::default()
    }

    /// Base insets extended by every active feature.
    fn insets(&self) -> Insets {
        self.base_insets().add(self.feature_insets())
    }

    /// The part of `layout` left for labels and child content.
    fn content_bounds(&self, layout: Bounds) -> Bounds {
        layout.inset_by(self.insets())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Banded {
        top: f64,
    }

    impl InsetsProvider for Banded {
        fn base_insets(&self) -> Insets {
            Insets::uniform(5.0)
        }

        fn feature_insets(&self) -> Insets {
            Insets::default().with_top(self.top)
        }
    }

    #[test]
    fn test_features_only_add() {
        let banded = Banded { top: 20.0 };
        assert_eq!(banded.insets(), Insets::new(25.0, 5.0, 5.0, 5.0));
        assert_eq!(
            banded.content_bounds(Bounds::from_xywh(0.0, 0.0, 100.0, 80.0)),
            Bounds::from_xywh(5.0, 25.0, 90.0, 50.0)
        );
    }
}
