//! State space and sparse matrix construction for the treasure hunt task.
//!
//! # Components
//!
//! - [`StateSet`]: the canonical, block-ordered table of all states for a
//!   `(d, n_h)` configuration, plus the fixed observation and action tables
//! - [`build_phi`]: one right-stochastic transition matrix per action
//! - [`build_omega`]: one 0/1 observation-consistency matrix per reduced action
//! - [`TaskModel`]: the assembled, read-only model shared by every game
//!
//! All matrices are [`CsrMatrix`] values built from per-block or per-rule
//! triplet arrays; nothing here ever materializes a dense `n_s x n_s` array.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod omega;
pub mod phi;
pub mod render;
pub mod sets;
pub mod sparse;
pub mod table;

pub use error::{ModelError, SparseError, TableError};
pub use model::{check_mask, check_transition, TaskModel};
pub use omega::{build_omega, consistent_observations};
pub use phi::build_phi;
pub use render::{MatrixRenderer, MatrixView};
pub use sets::{Combinations, StateSet};
pub use sparse::{CsrMatrix, Element, RowView};
pub use table::DenseTable;
