//! Benchmark profiles for the treasure hunt model generator.
//!
//! The benches live under `benches/`; this crate only holds the shared
//! configurations they sweep.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

use thunt_core::TaskParams;

/// `(d, n_h)` configurations swept by the construction benches, from 648
/// to 172_500 states.
pub const PROFILES: [(usize, usize); 4] = [(3, 2), (4, 2), (4, 3), (5, 3)];

/// Validated parameters of every profile.
pub fn profiles() -> Vec<TaskParams> {
    PROFILES
        .iter()
        .filter_map(|&(d, h)| TaskParams::new(d, h).ok())
        .collect()
}

/// Human-readable profile label, `d{d}_h{n_h}`.
pub fn label(params: &TaskParams) -> String {
    format!("d{}_h{}", params.dim(), params.n_hides())
}
