//! Core types for the treasure hunt task model.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! value types shared by every other crate in the workspace: task
//! parameters and set cardinalities, actions, observations, node colors,
//! decoded states, and the configuration / task error enums.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod error;
pub mod observation;
pub mod params;
pub mod state;

pub use action::{Action, ReducedAction};
pub use error::{ConfigError, TaskError};
pub use observation::{NodeColor, Observation};
pub use params::TaskParams;
pub use state::{Node, State};
