//! Graph compilation logic and validation.
//!
//! This module turns a [`GraphBuilder`](super::builder::GraphBuilder) into an
//! executable [`App`](crate::app::App). Compilation is where the builder's
//! loosely-checked topology gets validated once and for all: unknown edge
//! endpoints, unreachable nodes, and dead ends are all rejected here rather
//! than surfacing as confusing runtime failures mid-run.

use std::collections::VecDeque;

use miette::Diagnostic;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::app::App;
use crate::types::NodeKind;

use super::builder::GraphBuilder;

/// Errors produced while compiling a [`GraphBuilder`] into an [`App`].
///
/// These are purely structural: they catch graphs that could never execute
/// correctly (orphan nodes, broken edges) before a single superstep runs.
#[derive(Debug, Error, Diagnostic)]
pub enum GraphCompileError {
    /// The graph has no edges at all, so there is nothing to execute.
    #[error("graph has no edges; add at least one edge from Start")]
    #[diagnostic(
        code(weavegraph::graphs::empty_graph),
        help("Call add_edge(NodeKind::Start, ...) to give the graph an entry point.")
    )]
    EmptyGraph,

    /// An unconditional edge names a node that was never registered.
    #[error("edge {from:?} -> {to:?} references unregistered node {to:?}")]
    #[diagnostic(
        code(weavegraph::graphs::unknown_edge_target),
        help("Register the node with add_node before wiring edges to it.")
    )]
    UnknownEdgeTarget { from: NodeKind, to: NodeKind },

    /// A conditional edge originates from a node that was never registered
    /// (and is not `Start`).
    #[error("conditional edge source {0:?} is not a registered node")]
    #[diagnostic(
        code(weavegraph::graphs::unknown_conditional_source),
        help("Register the source node with add_node, or route from Start.")
    )]
    UnknownConditionalSource(NodeKind),

    /// A registered node is never reached by any deterministic edge and is
    /// not the source of any conditional edge either.
    #[error("node {0:?} is unreachable from Start")]
    #[diagnostic(
        code(weavegraph::graphs::unreachable_node),
        help("Add an edge (or conditional edge) that leads to this node.")
    )]
    Unreachable(NodeKind),

    /// A registered node has no way to ever advance the graph: no outgoing
    /// deterministic edge and no outgoing conditional edge.
    #[error("node {0:?} has no outgoing edge or conditional edge (dead end)")]
    #[diagnostic(
        code(weavegraph::graphs::dead_end),
        help("Add an edge from this node to another node or to End.")
    )]
    DeadEnd(NodeKind),
}

impl GraphBuilder {
    /// Compiles the graph into an executable application.
    ///
    /// Validates the graph configuration and converts it into an [`App`] that
    /// can execute workflows. Validation performs the following checks before
    /// any node runs:
    ///
    /// - the graph has at least one edge;
    /// - every deterministic edge references a registered node (or `Start`/`End`);
    /// - every conditional edge originates from a registered node or `Start`;
    /// - every registered node is reachable from `Start` (nodes that are
    ///   themselves a conditional-edge source are treated as reachable,
    ///   since their actual downstream targets are only known at runtime);
    /// - every registered node has somewhere to go: an outgoing deterministic
    ///   edge or at least one outgoing conditional edge.
    ///
    /// # Errors
    ///
    /// Returns [`GraphCompileError`] describing the first structural problem
    /// found. See the variant docs for what each one means.
    ///
    /// # Examples
    ///
    /// ```
    /// use weavegraph::graphs::GraphBuilder;
    /// use weavegraph::types::NodeKind;
    ///
    /// # struct MyNode;
    /// # #[async_trait::async_trait]
    /// # impl weavegraph::node::Node for MyNode {
    /// #     async fn run(&self, _: weavegraph::state::StateSnapshot, _: weavegraph::node::NodeContext) -> Result<weavegraph::node::NodePartial, weavegraph::node::NodeError> {
    /// #         Ok(weavegraph::node::NodePartial::default())
    /// #     }
    /// # }
    ///
    /// let app = GraphBuilder::new()
    ///     .add_node(NodeKind::Custom("process".into()), MyNode)
    ///     .add_edge(NodeKind::Start, NodeKind::Custom("process".into()))
    ///     .add_edge(NodeKind::Custom("process".into()), NodeKind::End)
    ///     .compile()
    ///     .expect("graph is well-formed");
    /// ```
    pub fn compile(self) -> Result<App, GraphCompileError> {
        validate(&self)?;
        let (nodes, edges, conditional_edges, runtime_config, reducer_registry) =
            self.into_parts();
        Ok(App::from_parts(
            nodes,
            edges,
            conditional_edges,
            reducer_registry,
            runtime_config,
        ))
    }
}

fn validate(gb: &GraphBuilder) -> Result<(), GraphCompileError> {
    let nodes = gb.nodes_ref();
    let edges = gb.edges_ref();
    let conditional_edges = gb.conditional_edges_ref();

    if edges.is_empty() && conditional_edges.is_empty() {
        return Err(GraphCompileError::EmptyGraph);
    }

    let node_exists = |k: &NodeKind| matches!(k, NodeKind::Start | NodeKind::End) || nodes.contains_key(k);

    for (from, tos) in edges.iter() {
        for to in tos {
            if !node_exists(from) || !node_exists(to) {
                return Err(GraphCompileError::UnknownEdgeTarget {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
        }
    }

    for ce in conditional_edges {
        if !node_exists(ce.from()) {
            return Err(GraphCompileError::UnknownConditionalSource(
                ce.from().clone(),
            ));
        }
    }

    // Reachability and dead-end analysis only make sense when the topology
    // is fully static. A conditional edge's predicate is an opaque closure
    // evaluated at runtime; its actual target set cannot be resolved here,
    // so any node could in principle be a conditional destination and any
    // conditional source could in principle lead anywhere. Once the graph
    // has at least one conditional edge we skip both checks rather than
    // reject graphs that are really just routed dynamically.
    if conditional_edges.is_empty() {
        let mut reachable: FxHashSet<NodeKind> = FxHashSet::default();
        reachable.insert(NodeKind::Start);
        let mut queue: VecDeque<NodeKind> = VecDeque::new();
        queue.push_back(NodeKind::Start);
        while let Some(current) = queue.pop_front() {
            if let Some(tos) = edges.get(&current) {
                for to in tos {
                    if reachable.insert(to.clone()) {
                        queue.push_back(to.clone());
                    }
                }
            }
        }

        for node in nodes.keys() {
            if !reachable.contains(node) {
                return Err(GraphCompileError::Unreachable(node.clone()));
            }
        }

        for node in nodes.keys() {
            let has_outgoing_edge = edges.get(node).is_some_and(|tos| !tos.is_empty());
            if !has_outgoing_edge {
                return Err(GraphCompileError::DeadEnd(node.clone()));
            }
        }
    }

    Ok(())
}
