//! Decision agents.
//!
//! An [`Agent`] sees only what a participant sees (its position, the
//! revealed node colors, the last observation and the legal actions) and
//! returns a [`Decision`]. It owns its own decision state and nothing
//! else.

use rand::seq::SliceRandom;
use rand::RngCore;
use thunt_core::{Action, Node, NodeColor, Observation};

/// What an agent observes at the start of a trial.
#[derive(Clone, Copy, Debug)]
pub struct TrialView<'a> {
    /// Round number, 1-based.
    pub round: usize,
    /// Trial number within the round, 1-based.
    pub trial: usize,
    /// Agent position.
    pub position: Node,
    /// Revealed node colors, indexed by `node - 1`.
    pub node_colors: &'a [NodeColor],
    /// Observation emitted after the previous action, if any.
    pub observation: Option<Observation>,
    /// Legal actions at `position`, in canonical order.
    pub legal: &'a [Action],
}

/// An agent decision, optionally with per-action valences.
#[derive(Clone, Debug, PartialEq)]
pub struct Decision {
    /// The decided action.
    pub action: Action,
    /// One valence per legal action, aligned with [`TrialView::legal`].
    pub valences: Option<Vec<f64>>,
}

impl Decision {
    /// A decision without valences.
    pub fn new(action: Action) -> Self {
        Self {
            action,
            valences: None,
        }
    }

    /// A decision with valences.
    pub fn with_valences(action: Action, valences: Vec<f64>) -> Self {
        Self {
            action,
            valences: Some(valences),
        }
    }
}

/// A pluggable decision source.
pub trait Agent {
    /// Name stamped on every trajectory this agent produces.
    fn name(&self) -> &str;

    /// Decide on an action for one trial.
    fn decide(&mut self, view: &TrialView<'_>, rng: &mut dyn RngCore) -> Decision;

    /// Called at the start of every game.
    fn reset(&mut self) {}
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn decide(&mut self, view: &TrialView<'_>, rng: &mut dyn RngCore) -> Decision {
        (**self).decide(view, rng)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

// ── RandomAgent ─────────────────────────────────────────────────

/// Chooses uniformly among the legal actions.
#[derive(Clone, Debug, Default)]
pub struct RandomAgent;

impl RandomAgent {
    /// A random agent.
    pub fn new() -> Self {
        Self
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, view: &TrialView<'_>, rng: &mut dyn RngCore) -> Decision {
        // Drill is legal everywhere, so the set is never empty.
        let action = view.legal.choose(rng).copied().unwrap_or(Action::Drill);
        Decision::new(action)
    }
}

// ── FixedPolicyAgent ────────────────────────────────────────────

/// Replays a fixed action sequence, cycling when it runs out.
///
/// The sequence restarts every game. It is not filtered by legality: a
/// policy that walks into a border aborts the game with an illegal action
/// error. An empty policy always drills.
#[derive(Clone, Debug)]
pub struct FixedPolicyAgent {
    policy: Vec<Action>,
    cursor: usize,
}

impl FixedPolicyAgent {
    /// An agent replaying `policy`.
    pub fn new(policy: Vec<Action>) -> Self {
        Self { policy, cursor: 0 }
    }

    /// The policy being replayed.
    pub fn policy(&self) -> &[Action] {
        &self.policy
    }
}

impl Agent for FixedPolicyAgent {
    fn name(&self) -> &str {
        "fixed"
    }

    fn decide(&mut self, _view: &TrialView<'_>, _rng: &mut dyn RngCore) -> Decision {
        if self.policy.is_empty() {
            return Decision::new(Action::Drill);
        }
        let action = self.policy[self.cursor % self.policy.len()];
        self.cursor += 1;
        Decision::new(action)
    }

    fn reset(&mut self) {
        self.cursor = 0;
    }
}

// ── FnAgent ─────────────────────────────────────────────────────

/// Wraps an externally supplied decision closure.
pub struct FnAgent<F> {
    name: String,
    decide: F,
}

impl<F> FnAgent<F>
where
    F: FnMut(&TrialView<'_>, &mut dyn RngCore) -> Decision,
{
    /// An agent named `name` that delegates to `decide`.
    pub fn new(name: impl Into<String>, decide: F) -> Self {
        Self {
            name: name.into(),
            decide,
        }
    }
}

impl<F> Agent for FnAgent<F>
where
    F: FnMut(&TrialView<'_>, &mut dyn RngCore) -> Decision,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn decide(&mut self, view: &TrialView<'_>, rng: &mut dyn RngCore) -> Decision {
        (self.decide)(view, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn view(legal: &[Action]) -> TrialView<'_> {
        TrialView {
            round: 1,
            trial: 1,
            position: 1,
            node_colors: &[],
            observation: None,
            legal,
        }
    }

    #[test]
    fn random_agent_stays_legal() {
        let legal = [Action::Drill, Action::East, Action::South];
        let mut agent = RandomAgent::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..100 {
            let d = agent.decide(&view(&legal), &mut rng);
            assert!(legal.contains(&d.action));
            assert!(d.valences.is_none());
        }
    }

    #[test]
    fn fixed_policy_cycles_and_resets() {
        let mut agent = FixedPolicyAgent::new(vec![Action::East, Action::South]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let v = view(&Action::ALL);
        let first: Vec<Action> = (0..3).map(|_| agent.decide(&v, &mut rng).action).collect();
        assert_eq!(first, vec![Action::East, Action::South, Action::East]);
        agent.reset();
        assert_eq!(agent.decide(&v, &mut rng).action, Action::East);
    }

    #[test]
    fn empty_policy_drills() {
        let mut agent = FixedPolicyAgent::new(Vec::new());
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(agent.decide(&view(&Action::ALL), &mut rng).action, Action::Drill);
    }

    #[test]
    fn fn_agent_delegates() {
        let mut agent = FnAgent::new("last", |v: &TrialView<'_>, _: &mut dyn RngCore| {
            Decision::new(*v.legal.last().unwrap())
        });
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(agent.name(), "last");
        assert_eq!(
            agent.decide(&view(&[Action::Drill, Action::West]), &mut rng).action,
            Action::West
        );
    }
}
