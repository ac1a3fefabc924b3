//! Grid-world topology for the treasure hunt task.
//!
//! [`GridWorld`] numbers the nodes of a `d x d` lattice `1..=d^2` in
//! row-major order and answers the one question both the transition
//! matrix builder and the task state machine ask: where does an action
//! take the agent, and is that move allowed at all?

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grid;

pub use grid::{ActionSet, GridWorld};
