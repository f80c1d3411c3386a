//! Node fixtures and registry builders shared across the integration tests.
//!
//! This module ships with the compiled crate (rather than living behind
//! `#[cfg(test)]`) so that `tests/*.rs` integration tests, which link against
//! `weavegraph` as an external crate, can reuse the same fixtures instead of
//! duplicating them per test file.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rustc_hash::FxHashMap;

use crate::message::Message;
use crate::node::{Node, NodeContext, NodeError, NodePartial};
use crate::state::StateSnapshot;
use crate::types::NodeKind;

/// Builds a [`StateSnapshot`] with empty data and the given channel versions.
#[must_use]
pub fn create_test_snapshot(messages_version: u32, extra_version: u32) -> StateSnapshot {
    StateSnapshot {
        messages: Vec::new(),
        messages_version,
        extra: FxHashMap::default(),
        extra_version,
        errors: Vec::new(),
        errors_version: 1,
    }
}

/// A node that appends a single assistant message naming itself.
pub struct TestNode {
    pub label: String,
}

impl TestNode {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl Node for TestNode {
    async fn run(
        &self,
        _snapshot: StateSnapshot,
        _ctx: NodeContext,
    ) -> Result<NodePartial, NodeError> {
        Ok(NodePartial::new().with_messages(vec![Message::assistant(&self.label)]))
    }
}

/// A node that sleeps briefly before returning, for exercising concurrent
/// scheduling without relying on real work.
pub struct DelayedNode {
    pub label: String,
    pub delay: Duration,
}

impl DelayedNode {
    #[must_use]
    pub fn new(label: impl Into<String>, delay: Duration) -> Self {
        Self {
            label: label.into(),
            delay,
        }
    }
}

#[async_trait]
impl Node for DelayedNode {
    async fn run(
        &self,
        _snapshot: StateSnapshot,
        _ctx: NodeContext,
    ) -> Result<NodePartial, NodeError> {
        tokio::time::sleep(self.delay).await;
        Ok(NodePartial::new().with_messages(vec![Message::assistant(&self.label)]))
    }
}

/// A node that always fails with [`NodeError::MissingInput`].
pub struct FailingNode {
    pub what: &'static str,
}

impl Default for FailingNode {
    fn default() -> Self {
        Self { what: "test_key" }
    }
}

#[async_trait]
impl Node for FailingNode {
    async fn run(
        &self,
        _snapshot: StateSnapshot,
        _ctx: NodeContext,
    ) -> Result<NodePartial, NodeError> {
        Err(NodeError::MissingInput { what: self.what })
    }
}

/// A node that emits events through its context in addition to producing a
/// message, for exercising the event-emission path end to end.
pub struct RichNode {
    pub label: String,
}

impl RichNode {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl Node for RichNode {
    async fn run(
        &self,
        _snapshot: StateSnapshot,
        ctx: NodeContext,
    ) -> Result<NodePartial, NodeError> {
        ctx.emit_diagnostic("rich_node", format!("{} running", self.label))?;
        Ok(NodePartial::new().with_messages(vec![Message::assistant(&self.label)]))
    }
}

/// Builds a registry with two immediate [`TestNode`]s, `"A"` and `"B"`.
#[must_use]
pub fn make_test_registry() -> FxHashMap<NodeKind, Arc<dyn Node>> {
    let mut nodes: FxHashMap<NodeKind, Arc<dyn Node>> = FxHashMap::default();
    nodes.insert(
        NodeKind::Custom("A".into()),
        Arc::new(TestNode::new("A")) as Arc<dyn Node>,
    );
    nodes.insert(
        NodeKind::Custom("B".into()),
        Arc::new(TestNode::new("B")) as Arc<dyn Node>,
    );
    nodes
}

/// Builds a registry with two [`DelayedNode`]s, `"A"` and `"B"`, so tests can
/// observe concurrent scheduling behavior.
#[must_use]
pub fn make_delayed_registry() -> FxHashMap<NodeKind, Arc<dyn Node>> {
    let mut nodes: FxHashMap<NodeKind, Arc<dyn Node>> = FxHashMap::default();
    nodes.insert(
        NodeKind::Custom("A".into()),
        Arc::new(DelayedNode::new("A", Duration::from_millis(20))) as Arc<dyn Node>,
    );
    nodes.insert(
        NodeKind::Custom("B".into()),
        Arc::new(DelayedNode::new("B", Duration::from_millis(5))) as Arc<dyn Node>,
    );
    nodes
}
