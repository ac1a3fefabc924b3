//! Content-addressed artifact keys.

use std::fmt;

use thunt_core::{Action, ReducedAction, TaskParams};

/// Identifies one artifact: a configuration `(d, n_h)` plus an artifact
/// name.
///
/// # Examples
///
/// ```
/// use thunt_cache::ArtifactKey;
/// use thunt_core::{Action, TaskParams};
///
/// let p = TaskParams::new(3, 2).unwrap();
/// let key = ArtifactKey::phi(&p, Action::North);
/// assert_eq!(key.namespace(), "dim-3_hide-2");
/// assert_eq!(key.file_name(), "phi_north.bin");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    dim: usize,
    n_hides: usize,
    name: String,
}

impl ArtifactKey {
    /// Key for an arbitrary artifact name.
    pub fn new(params: &TaskParams, name: impl Into<String>) -> Self {
        Self {
            dim: params.dim(),
            n_hides: params.n_hides(),
            name: name.into(),
        }
    }

    /// The state table `S`.
    pub fn states(params: &TaskParams) -> Self {
        Self::new(params, "S")
    }

    /// The observation table `O`.
    pub fn observations(params: &TaskParams) -> Self {
        Self::new(params, "O")
    }

    /// The action table `A`.
    pub fn actions(params: &TaskParams) -> Self {
        Self::new(params, "A")
    }

    /// Transition matrix `phi_{direction}`.
    pub fn phi(params: &TaskParams, action: Action) -> Self {
        Self::new(params, format!("phi_{}", action.name()))
    }

    /// Consistency matrix `omega_{drill|step}`.
    pub fn omega(params: &TaskParams, action: ReducedAction) -> Self {
        Self::new(params, format!("omega_{}", action.name()))
    }

    /// Grid side length.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Hiding-spot count.
    pub fn n_hides(&self) -> usize {
        self.n_hides
    }

    /// Artifact name within the namespace.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-configuration namespace, `dim-{d}_hide-{n_h}`.
    pub fn namespace(&self) -> String {
        format!("dim-{}_hide-{}", self.dim, self.n_hides)
    }

    /// File name of the artifact inside its namespace.
    pub fn file_name(&self) -> String {
        format!("{}.bin", self.name)
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_cover_every_artifact() {
        let p = TaskParams::new(2, 1).unwrap();
        let mut names: Vec<String> = vec![
            ArtifactKey::states(&p).name().to_string(),
            ArtifactKey::observations(&p).name().to_string(),
            ArtifactKey::actions(&p).name().to_string(),
        ];
        names.extend(Action::ALL.iter().map(|&a| ArtifactKey::phi(&p, a).name().to_string()));
        names.extend(
            ReducedAction::ALL
                .iter()
                .map(|&a| ArtifactKey::omega(&p, a).name().to_string()),
        );
        assert_eq!(
            names,
            vec![
                "S",
                "O",
                "A",
                "phi_drill",
                "phi_north",
                "phi_east",
                "phi_south",
                "phi_west",
                "omega_drill",
                "omega_step"
            ]
        );
    }

    #[test]
    fn display_is_namespaced() {
        let p = TaskParams::new(4, 3).unwrap();
        assert_eq!(ArtifactKey::states(&p).to_string(), "dim-4_hide-3/S");
    }

    #[test]
    fn keys_differ_across_configurations() {
        let a = TaskParams::new(3, 1).unwrap();
        let b = TaskParams::new(3, 2).unwrap();
        assert_ne!(ArtifactKey::states(&a), ArtifactKey::states(&b));
    }
}
