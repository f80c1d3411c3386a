mod add_errors;
mod add_messages;
mod map_merge;
mod reducer_registry;

pub use add_errors::AddErrors;
pub use add_messages::AddMessages;
pub use map_merge::MapMerge;
pub use reducer_registry::*;

use crate::node::NodePartial;
use crate::state::VersionedState;
use crate::types::ChannelType;
use miette::Diagnostic;
use thiserror::Error;

/// Unified reducer trait: every reducer mutates VersionedState using a NodePartial delta.
/// Channels currently implemented: messages (append) and extra (shallow JSON map merge).
pub trait Reducer: Send + Sync {
    fn apply(&self, state: &mut VersionedState, update: &NodePartial);
}

#[derive(Debug, Error, Diagnostic)]
pub enum ReducerError {
    #[error("no reducers registered for channel: {0:?}")]
    #[diagnostic(
        code(weavegraph::reducers::unknown_channel),
        help("Use GraphBuilder::with_reducer() to register a reducer for {0:?}")
    )]
    UnknownChannel(ChannelType),

    #[error("reducer apply failed for channel {channel:?}: {message}")]
    #[diagnostic(
        code(weavegraph::reducers::apply),
        help("Check that your reducer implementation correctly handles the NodePartial structure")
    )]
    Apply {
        channel: ChannelType,
        message: String,
    },

    /// A single-writer ("last value") key on channel `channel` received two
    /// conflicting writes within the same step. Spec-mandated diagnostic for
    /// the concurrent-write-conflict scenario: nodes scheduled in the same
    /// step must not disagree about the value of a shared key.
    #[error(
        "invalid concurrent graph update: channel {channel:?} key {key:?} written by both {first_node} and {second_node} in the same step"
    )]
    #[diagnostic(
        code(weavegraph::reducers::invalid_concurrent_graph_update),
        help(
            "A key written by more than one node in a single step must carry the same value from every writer, or be routed to distinct keys."
        )
    )]
    InvalidConcurrentGraphUpdate {
        channel: ChannelType,
        key: String,
        first_node: String,
        second_node: String,
    },
}
