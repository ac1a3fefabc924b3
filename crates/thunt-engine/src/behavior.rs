//! Decision-to-action transform.
//!
//! With temperature `tau > 0` the action is drawn from
//! `p(a) ∝ exp(v(a) / tau)` over the legal actions. Without a temperature
//! (or with `tau == 0`) the decision is passed through unchanged.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use thunt_core::Action;

use crate::agent::Decision;
use crate::error::SimError;

/// Softmax action selector.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActionSelector {
    tau: Option<f64>,
}

impl ActionSelector {
    /// A selector with temperature `tau`.
    pub fn new(tau: Option<f64>) -> Self {
        Self { tau }
    }

    /// Whether decisions pass through unchanged.
    pub fn is_deterministic(&self) -> bool {
        !matches!(self.tau, Some(t) if t > 0.0)
    }

    /// Choice probabilities for `valences`, aligned with them.
    ///
    /// Shifted by the maximum valence before exponentiating so that large
    /// valences do not overflow. Uniform when the selector is
    /// deterministic.
    pub fn probabilities(&self, valences: &[f64]) -> Vec<f64> {
        let tau = match self.tau {
            Some(t) if t > 0.0 => t,
            _ => return vec![1.0 / valences.len() as f64; valences.len()],
        };
        let max = valences.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let weights: Vec<f64> = valences.iter().map(|v| ((v - max) / tau).exp()).collect();
        let total: f64 = weights.iter().sum();
        weights.into_iter().map(|w| w / total).collect()
    }

    /// Turn `decision` into an action among `legal`.
    ///
    /// Without valences the decision is encoded as indicator valences
    /// (1 for the decided action, 0 elsewhere).
    pub fn select<R: Rng + ?Sized>(
        &self,
        decision: &Decision,
        legal: &[Action],
        rng: &mut R,
    ) -> Result<Action, SimError> {
        if self.is_deterministic() {
            return Ok(decision.action);
        }
        let valences = match &decision.valences {
            Some(v) if v.len() != legal.len() => {
                return Err(SimError::ValenceMismatch {
                    expected: legal.len(),
                    found: v.len(),
                })
            }
            Some(v) => v.clone(),
            None => legal
                .iter()
                .map(|&a| if a == decision.action { 1.0 } else { 0.0 })
                .collect(),
        };
        if let Some(v) = valences.iter().find(|v| !v.is_finite()) {
            return Err(SimError::InvalidValences {
                reason: format!("non-finite valence {v}"),
            });
        }
        let dist = WeightedIndex::new(self.probabilities(&valences)).map_err(|e| {
            SimError::InvalidValences {
                reason: e.to_string(),
            }
        })?;
        Ok(legal[dist.sample(rng)])
    }
}
