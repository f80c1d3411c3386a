use std::sync::Arc;
use std::time::Duration;

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::event_bus::EventEmitter;
use crate::node::{Node, NodeContext, NodeError, NodePartial};
use crate::runtimes::CancellationSignal;
use crate::state::StateSnapshot;
use crate::types::NodeKind;

/// Per-node bookkeeping carried between supersteps so the scheduler can tell
/// whether a node has seen new input since it last ran.
///
/// Keyed by the node's encoded string form rather than [`NodeKind`] directly;
/// the low-level [`Scheduler::should_run`]/[`Scheduler::record_seen`] API is
/// string-keyed so callers that track nodes outside of the `NodeKind`
/// vocabulary (e.g. dynamically generated node ids) can use it too.
#[derive(Debug, Clone, Default)]
pub struct SchedulerState {
    versions_seen: FxHashMap<String, (u32, u32)>,
}

/// Result of running a single superstep.
#[derive(Debug, Clone, Default)]
pub struct StepRunResult {
    /// Nodes that were gated in (new input since last seen) and executed.
    /// Order matches the frontier's order, not completion order.
    pub ran_nodes: Vec<NodeKind>,
    /// Nodes that were not executed, either because they are [`NodeKind::End`]
    /// or because their watched channels haven't changed since last run.
    pub skipped_nodes: Vec<NodeKind>,
    /// Outputs produced by `ran_nodes`. Order is not guaranteed to match
    /// `ran_nodes`; nodes run concurrently and may finish in any order.
    pub outputs: Vec<(NodeKind, NodePartial)>,
}

/// Errors surfaced while running a superstep.
#[derive(Debug, Error, Diagnostic)]
pub enum SchedulerError {
    /// A node returned `Err` during execution.
    #[error("node {node} failed at step {step}")]
    #[diagnostic(code(weavegraph::schedulers::node_run))]
    NodeRun {
        node: NodeKind,
        step: u64,
        #[source]
        source: NodeError,
    },

    /// The frontier referenced a node with no registered implementation.
    #[error("no node registered for {node}")]
    #[diagnostic(code(weavegraph::schedulers::unknown_node))]
    UnknownNode { node: NodeKind },

    /// The step's configured [`RuntimeConfig::step_timeout`](crate::runtimes::RuntimeConfig::step_timeout)
    /// elapsed before every dispatched node finished; already-running node
    /// tasks were aborted and no checkpoint is committed for this step.
    #[error("step {step} exceeded its {duration:?} timeout")]
    #[diagnostic(code(weavegraph::schedulers::timeout))]
    Timeout { step: u64, duration: Duration },

    /// The run's [`CancellationSignal`] was already set when this superstep
    /// was about to dispatch tasks; nothing was scheduled.
    #[error("step {step} cancelled before dispatch")]
    #[diagnostic(code(weavegraph::schedulers::cancelled))]
    Cancelled { step: u64 },
}

/// Executes one BSP superstep: gates a frontier against prior versions seen,
/// runs the gated-in nodes concurrently (bounded by a permit count), and
/// reports what ran, what was skipped, and their outputs.
///
/// The scheduler never mutates [`crate::state::VersionedState`] itself;
/// merging `StepRunResult::outputs` into state is the barrier's job.
pub struct Scheduler {
    concurrency_limit: usize,
}

impl Scheduler {
    /// Creates a scheduler that runs at most `concurrency_limit` nodes at
    /// once within a single superstep. A limit of zero is treated as one.
    #[must_use]
    pub fn new(concurrency_limit: usize) -> Self {
        Self {
            concurrency_limit: concurrency_limit.max(1),
        }
    }

    /// Returns `true` if the node identified by `id` has not yet observed
    /// the channel versions carried by `snapshot`.
    #[must_use]
    pub fn should_run(&self, state: &SchedulerState, id: &str, snapshot: &StateSnapshot) -> bool {
        match state.versions_seen.get(id) {
            None => true,
            Some(&(messages_seen, extra_seen)) => {
                snapshot.messages_version > messages_seen || snapshot.extra_version > extra_seen
            }
        }
    }

    /// Records that the node identified by `id` has now observed the channel
    /// versions carried by `snapshot`.
    pub fn record_seen(&self, state: &mut SchedulerState, id: &str, snapshot: &StateSnapshot) {
        state.versions_seen.insert(
            id.to_string(),
            (snapshot.messages_version, snapshot.extra_version),
        );
    }

    /// Runs one superstep over `frontier`.
    ///
    /// [`NodeKind::End`] is always skipped. Every other node is gated via
    /// [`Scheduler::should_run`]; nodes that pass the gate are recorded via
    /// [`Scheduler::record_seen`] before execution, then run concurrently up
    /// to this scheduler's concurrency limit.
    ///
    /// If `cancellation` has already fired, returns [`SchedulerError::Cancelled`]
    /// without dispatching anything. If `step_timeout` is set and elapses
    /// before every dispatched node finishes, already-running node tasks are
    /// aborted and [`SchedulerError::Timeout`] is returned; no partial
    /// outputs are surfaced for that step.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::UnknownNode`] if the frontier names a node
    /// with no entry in `nodes`, or [`SchedulerError::NodeRun`] if a node's
    /// execution returns `Err`.
    #[allow(clippy::too_many_arguments)]
    pub async fn superstep(
        &self,
        state: &mut SchedulerState,
        nodes: &FxHashMap<NodeKind, Arc<dyn Node>>,
        frontier: Vec<NodeKind>,
        snapshot: StateSnapshot,
        step: u64,
        sender: Arc<dyn EventEmitter>,
        cancellation: CancellationSignal,
        step_timeout: Option<Duration>,
    ) -> Result<StepRunResult, SchedulerError> {
        if cancellation.is_cancelled() {
            return Err(SchedulerError::Cancelled { step });
        }

        let mut ran_nodes = Vec::new();
        let mut skipped_nodes = Vec::new();
        let mut to_run = Vec::new();

        for kind in frontier {
            if kind.is_end() {
                skipped_nodes.push(kind);
                continue;
            }
            let key = kind.encode();
            if self.should_run(state, &key, &snapshot) {
                self.record_seen(state, &key, &snapshot);
                ran_nodes.push(kind.clone());
                to_run.push(kind);
            } else {
                skipped_nodes.push(kind);
            }
        }

        let semaphore = Arc::new(Semaphore::new(self.concurrency_limit));
        let mut join_set: JoinSet<(NodeKind, Result<NodePartial, NodeError>)> = JoinSet::new();

        for kind in to_run {
            let node = nodes
                .get(&kind)
                .cloned()
                .ok_or_else(|| SchedulerError::UnknownNode { node: kind.clone() })?;
            let node_id = kind.encode();
            let snapshot = snapshot.clone();
            let sender = sender.clone();
            let semaphore = semaphore.clone();
            let task_kind = kind.clone();
            let cancellation = cancellation.clone();
            join_set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .expect("scheduler semaphore closed unexpectedly");
                let ctx = NodeContext {
                    node_id,
                    step,
                    event_emitter: sender,
                    cancellation,
                };
                let result = node.run(snapshot, ctx).await;
                (task_kind, result)
            });
        }

        let mut outputs = Vec::with_capacity(ran_nodes.len());
        match step_timeout {
            Some(duration) => {
                match tokio::time::timeout(
                    duration,
                    Self::drain_join_set(&mut join_set, &mut outputs, step),
                )
                .await
                {
                    Ok(result) => result?,
                    Err(_elapsed) => {
                        join_set.abort_all();
                        return Err(SchedulerError::Timeout { step, duration });
                    }
                }
            }
            None => Self::drain_join_set(&mut join_set, &mut outputs, step).await?,
        }

        Ok(StepRunResult {
            ran_nodes,
            skipped_nodes,
            outputs,
        })
    }

    /// Awaits every task in `join_set`, pushing successful outputs into
    /// `outputs` in completion order. Returns the first node failure, if any.
    async fn drain_join_set(
        join_set: &mut JoinSet<(NodeKind, Result<NodePartial, NodeError>)>,
        outputs: &mut Vec<(NodeKind, NodePartial)>,
        step: u64,
    ) -> Result<(), SchedulerError> {
        while let Some(joined) = join_set.join_next().await {
            let (kind, result) = joined.expect("scheduler node task panicked");
            match result {
                Ok(partial) => outputs.push((kind, partial)),
                Err(source) => {
                    return Err(SchedulerError::NodeRun {
                        node: kind,
                        step,
                        source,
                    });
                }
            }
        }
        Ok(())
    }
}
