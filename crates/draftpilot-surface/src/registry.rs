//! Registry of editable-surface implementations
//!
//! Host-specific surfaces are selected here by URL instead of through inline
//! conditionals in the trigger path. Registration order is priority order:
//! register specialized editor surfaces before the generic fallback.

use std::sync::Arc;

use crate::buffer::BufferSurface;
use crate::surface::EditorSurface;

/// Ordered registry of surface implementations
pub struct SurfaceRegistry {
    surfaces: Vec<Arc<dyn EditorSurface>>,
}

impl SurfaceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
        }
    }

    /// Create a registry with the built-in generic buffer surface
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(BufferSurface));
        registry
    }

    /// Register a surface implementation
    ///
    /// Later registrations have lower priority than earlier ones.
    pub fn register(&mut self, surface: Arc<dyn EditorSurface>) {
        self.surfaces.push(surface);
    }

    /// First surface claiming the given host URL
    pub fn for_host(&self, url: &str) -> Option<Arc<dyn EditorSurface>> {
        self.surfaces
            .iter()
            .find(|s| s.matches_host(url))
            .cloned()
    }

    /// Identifiers of all registered surfaces, in priority order
    pub fn ids(&self) -> Vec<&str> {
        self.surfaces.iter().map(|s| s.id()).collect()
    }
}

impl Default for SurfaceRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use crate::types::{ScreenPosition, SurfaceSnapshot};

    struct DocsOnlySurface;

    impl EditorSurface for DocsOnlySurface {
        fn id(&self) -> &str {
            "docs-only"
        }

        fn matches_host(&self, url: &str) -> bool {
            url.starts_with("https://docs.example.com/")
        }

        fn is_editable_target(&self, _target: &dyn Any) -> bool {
            false
        }

        fn snapshot(&self, _target: &dyn Any) -> Option<SurfaceSnapshot> {
            None
        }

        fn caret_position(&self, _target: &dyn Any) -> Option<ScreenPosition> {
            None
        }

        fn insert_at_caret(&self, _target: &mut dyn Any, _text: &str) -> bool {
            false
        }
    }

    #[test]
    fn builtin_buffer_surface_claims_any_host() {
        let registry = SurfaceRegistry::with_builtin();
        let surface = registry.for_host("https://anything.example/").unwrap();
        assert_eq!(surface.id(), "buffer");
    }

    #[test]
    fn specialized_surface_wins_when_registered_first() {
        let mut registry = SurfaceRegistry::new();
        registry.register(Arc::new(DocsOnlySurface));
        registry.register(Arc::new(BufferSurface));

        let docs = registry.for_host("https://docs.example.com/d/1").unwrap();
        assert_eq!(docs.id(), "docs-only");

        let other = registry.for_host("https://plain.example/").unwrap();
        assert_eq!(other.id(), "buffer");
    }

    #[test]
    fn empty_registry_matches_nothing() {
        let registry = SurfaceRegistry::new();
        assert!(registry.for_host("https://docs.example.com/").is_none());
        assert!(registry.ids().is_empty());
    }
}
