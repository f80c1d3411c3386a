//! Bulk-synchronous-parallel execution of a single workflow step (a "superstep").
//!
//! A [`scheduler::Scheduler`] decides, for a given frontier of nodes, which
//! ones have actually seen new input since they last ran, executes the ones
//! that have concurrently (bounded by a configurable limit), and reports back
//! what ran, what was skipped, and what each node produced. Merging those
//! outputs into [`crate::state::VersionedState`] is the caller's job
//! (`App::apply_barrier`); the scheduler only decides and runs.

pub mod scheduler;

pub use scheduler::{Scheduler, SchedulerError, SchedulerState, StepRunResult};
