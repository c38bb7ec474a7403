//! The solving-strategy trait.
//!
//! Implemented by the agents in `itemforge-agents`; the harness only ever
//! sees `dyn Agent`.

use crate::error::AgentError;
use crate::model::{ChoiceId, Item};

/// A named, stateless strategy that picks one choice for an item.
///
/// Implementations must be deterministic: the same item always yields the
/// same id, in any process, with no state carried between calls.
pub trait Agent: Send + Sync {
    /// Registry name (e.g. "oracle").
    fn name(&self) -> &str;

    /// Select a choice id for the item.
    fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError>;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError> {
        (**self).choose(item)
    }
}

impl<A: Agent + ?Sized> Agent for std::sync::Arc<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn choose(&self, item: &Item) -> Result<ChoiceId, AgentError> {
        (**self).choose(item)
    }
}
