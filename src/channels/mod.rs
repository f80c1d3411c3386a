//! Channel abstractions for versioned workflow state.
//!
//! Each channel is a named reducer cell: it holds a piece of state, a
//! monotonically non-decreasing version counter, and knows how to report its
//! own [`ChannelType`] for reducer dispatch. The concrete channels defined
//! here back [`crate::state::VersionedState`]'s three fixed slots.

pub mod errors;

pub use errors::{ErrorEvent, ErrorScope, LadderError};

use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::message::Message;
use crate::types::ChannelType;

/// Common contract implemented by every state channel.
///
/// A channel owns a single piece of versioned data (`Data`). Nodes never
/// mutate a channel directly; instead a [`crate::reducers::Reducer`] applies
/// a batch of writes and the barrier (`App::apply_barrier`) is responsible
/// for bumping [`Channel::version`] once the merge is observed to have
/// changed the channel's contents.
pub trait Channel: Send + Sync {
    /// The owned representation of this channel's contents.
    type Data: Clone;

    /// Borrow the current value.
    fn get(&self) -> &Self::Data;

    /// Mutably borrow the current value for in-place reducer updates.
    fn get_mut(&mut self) -> &mut Self::Data;

    /// Clone the current value out of the channel.
    fn snapshot(&self) -> Self::Data {
        self.get().clone()
    }

    /// Current version token.
    fn version(&self) -> u32;

    /// Overwrite the version token, e.g. when hydrating from a checkpoint.
    fn set_version(&mut self, version: u32);

    /// Number of elements held by the channel (list-like channels) or entries
    /// (map-like channels).
    fn len(&self) -> usize;

    /// Returns `true` if the channel currently holds no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Which [`ChannelType`] this channel implements, used by the reducer
    /// registry to route writes.
    fn get_channel_type(&self) -> ChannelType;

    /// Whether this channel's contents should be written into checkpoints.
    /// All of the built-in channels are persistent; the flag exists so
    /// ephemeral, step-scoped channels can opt out without changing the
    /// trait shape.
    fn persistent(&self) -> bool {
        true
    }
}

/// Append-only channel of conversation [`Message`]s.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessagesChannel {
    data: Vec<Message>,
    version: u32,
}

impl MessagesChannel {
    pub fn new(data: Vec<Message>, version: u32) -> Self {
        Self { data, version }
    }
}

impl Default for MessagesChannel {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            version: 1,
        }
    }
}

impl Channel for MessagesChannel {
    type Data = Vec<Message>;

    fn get(&self) -> &Vec<Message> {
        &self.data
    }

    fn get_mut(&mut self) -> &mut Vec<Message> {
        &mut self.data
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn get_channel_type(&self) -> ChannelType {
        ChannelType::Message
    }
}

/// Shallow key-value merge channel for node-produced metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtrasChannel {
    data: FxHashMap<String, Value>,
    version: u32,
}

impl ExtrasChannel {
    pub fn new(data: FxHashMap<String, Value>, version: u32) -> Self {
        Self { data, version }
    }
}

impl Default for ExtrasChannel {
    fn default() -> Self {
        Self {
            data: FxHashMap::default(),
            version: 1,
        }
    }
}

impl Channel for ExtrasChannel {
    type Data = FxHashMap<String, Value>;

    fn get(&self) -> &FxHashMap<String, Value> {
        &self.data
    }

    fn get_mut(&mut self) -> &mut FxHashMap<String, Value> {
        &mut self.data
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn get_channel_type(&self) -> ChannelType {
        ChannelType::Extra
    }
}

/// Append-only channel of [`ErrorEvent`]s accumulated during a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorsChannel {
    data: Vec<ErrorEvent>,
    version: u32,
}

impl ErrorsChannel {
    pub fn new(data: Vec<ErrorEvent>, version: u32) -> Self {
        Self { data, version }
    }
}

impl Default for ErrorsChannel {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            version: 1,
        }
    }
}

impl Channel for ErrorsChannel {
    type Data = Vec<ErrorEvent>;

    fn get(&self) -> &Vec<ErrorEvent> {
        &self.data
    }

    fn get_mut(&mut self) -> &mut Vec<ErrorEvent> {
        &mut self.data
    }

    fn version(&self) -> u32 {
        self.version
    }

    fn set_version(&mut self, version: u32) {
        self.version = version;
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn get_channel_type(&self) -> ChannelType {
        ChannelType::Error
    }
}
