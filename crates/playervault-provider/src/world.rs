//! World handles and world resolution.
//!
//! The host owns its worlds. The provider only needs to know which dimension
//! a world belongs to (to persist it) and how to find a world again for a
//! dimension (to restore it). Resolution tries the caller's resolver first
//! and falls back to the configured default-world factory.

use std::fmt;
use std::sync::Arc;

use playervault_types::Dimension;

/// A host world a player can be in.
pub trait World: Send + Sync + fmt::Debug {
    /// World name, used for logging.
    fn name(&self) -> &str;

    /// The dimension this world belongs to.
    fn dimension(&self) -> Dimension;
}

/// Shared handle to a host world.
pub type WorldRef = Arc<dyn World>;

/// Caller-supplied world lookup used on load.
pub type WorldResolver<'a> = dyn Fn(Dimension) -> Option<WorldRef> + Send + Sync + 'a;

/// Per-dimension default-world factory, consulted when the caller's resolver
/// has no world for a dimension.
pub type WorldFactory = Arc<dyn Fn(Dimension) -> Option<WorldRef> + Send + Sync>;

/// Resolve the world for `dimension`: the caller's resolver first, then the
/// default-world factory if one is configured.
pub fn resolve_world<R>(
    dimension: Dimension,
    resolver: &R,
    fallback: Option<&WorldFactory>,
) -> Option<WorldRef>
where
    R: Fn(Dimension) -> Option<WorldRef> + ?Sized,
{
    resolver(dimension).or_else(|| fallback.and_then(|factory| factory(dimension)))
}

/// A plain named world. Enough for hosts without their own world type, and
/// for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticWorld {
    name: String,
    dimension: Dimension,
}

impl StaticWorld {
    /// Create a world.
    pub fn new(name: impl Into<String>, dimension: Dimension) -> Self {
        Self {
            name: name.into(),
            dimension,
        }
    }

    /// Create a world already wrapped in a [`WorldRef`].
    pub fn shared(name: impl Into<String>, dimension: Dimension) -> WorldRef {
        Arc::new(Self::new(name, dimension))
    }
}

impl World for StaticWorld {
    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolver_wins_over_fallback() {
        let nether = StaticWorld::shared("nether", Dimension::Nether);
        let fallback: WorldFactory =
            Arc::new(|d: Dimension| Some(StaticWorld::shared("fallback", d)));
        let resolved = resolve_world(
            Dimension::Nether,
            &|_| Some(Arc::clone(&nether)),
            Some(&fallback),
        );
        assert_eq!(resolved.as_ref().map(|w| w.name()), Some("nether"));
    }

    #[test]
    fn fallback_used_when_resolver_has_nothing() {
        let fallback: WorldFactory =
            Arc::new(|d: Dimension| Some(StaticWorld::shared("fallback", d)));
        let resolved = resolve_world(Dimension::End, &|_| None, Some(&fallback));
        assert_eq!(resolved.as_ref().map(|w| w.name()), Some("fallback"));
        assert_eq!(resolved.map(|w| w.dimension()), Some(Dimension::End));
    }

    #[test]
    fn nothing_without_fallback() {
        assert!(resolve_world(Dimension::Overworld, &|_| None, None).is_none());
    }
}
