//! The host's fixed set of worlds, one per dimension.

use std::collections::BTreeMap;
use std::sync::Arc;

use playervault_provider::{StaticWorld, WorldFactory, WorldRef};
use playervault_types::Dimension;

/// Worlds the host has loaded, keyed by dimension.
#[derive(Debug, Clone, Default)]
pub struct WorldRegistry {
    worlds: BTreeMap<Dimension, WorldRef>,
}

impl WorldRegistry {
    /// An overworld, a nether and an end.
    pub fn standard() -> Self {
        let worlds = [
            ("world", Dimension::Overworld),
            ("world_nether", Dimension::Nether),
            ("world_the_end", Dimension::End),
        ]
        .into_iter()
        .map(|(name, dimension)| (dimension, StaticWorld::shared(name, dimension)))
        .collect();
        Self { worlds }
    }

    /// The loaded world for `dimension`, if any.
    pub fn resolve(&self, dimension: Dimension) -> Option<WorldRef> {
        self.worlds.get(&dimension).cloned()
    }

    /// The default-world factory handed to the provider. Any dimension the
    /// host has no world for gets a placeholder.
    pub fn fallback_factory() -> WorldFactory {
        Arc::new(|dimension: Dimension| {
            Some(StaticWorld::shared(format!("fallback_{dimension}"), dimension))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn standard_covers_every_dimension() {
        let registry = WorldRegistry::standard();
        for dimension in Dimension::ALL {
            assert_eq!(registry.resolve(dimension).unwrap().dimension(), dimension);
        }
        assert!(WorldRegistry::default().resolve(Dimension::End).is_none());
    }

    #[test]
    fn fallback_names_the_dimension() {
        let world = WorldRegistry::fallback_factory()(Dimension::Nether).unwrap();
        assert_eq!(world.name(), "fallback_nether");
    }
}
