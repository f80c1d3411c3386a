//! Small, self-contained helpers shared across the crate.
//!
//! Nothing in here depends on graph, node, or runtime types; these modules
//! exist so that IDs, clocks, and JSON plumbing have one obvious home
//! instead of being reinvented at each call site.

pub mod clock;
pub mod collections;
pub mod deterministic_rng;
pub mod id_generator;
pub mod json_ext;
pub mod merge_inspector;
pub mod message_id_helpers;
pub mod testing;
pub mod type_guards;
