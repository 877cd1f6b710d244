//! Mdp trait compliance test helpers.
//!
//! These functions verify that an Mdp implementation satisfies the
//! invariants planners rely on. Reused by the GridworldMdp and
//! NStateMdp test modules.

use indexmap::IndexSet;
use ird_core::State;

use crate::distribution::PROBABILITY_TOLERANCE;
use crate::mdp::Mdp;

/// Assert that `states()` is deterministic, duplicate-free and ends
/// with the terminal sentinel.
pub fn assert_states_well_formed<M: Mdp>(mdp: &M) {
    let a = mdp.states();
    let b = mdp.states();
    assert_eq!(a, b, "states() is non-deterministic");
    let unique: IndexSet<_> = a.iter().copied().collect();
    assert_eq!(unique.len(), a.len(), "states() contains duplicates");
    assert_eq!(a.last(), Some(&State::Terminal), "terminal state must be last");
    assert!(
        unique.contains(&mdp.start_state()),
        "start state {:?} is not a state",
        mdp.start_state()
    );
}

/// Assert that terminal states have no actions and every other state
/// has at least one.
pub fn assert_actions_match_terminality<M: Mdp>(mdp: &M) {
    for s in mdp.states() {
        let actions = mdp.actions(s);
        if mdp.is_terminal(s) {
            assert!(actions.is_empty(), "terminal {s:?} has actions {actions:?}");
        } else {
            assert!(!actions.is_empty(), "non-terminal {s:?} has no actions");
        }
    }
}

/// Assert that every legal transition sums to one, has non-negative
/// mass and stays inside `states()`.
pub fn assert_transitions_normalized<M: Mdp>(mdp: &M) {
    let states: IndexSet<_> = mdp.states().into_iter().collect();
    for &s in &states {
        for a in mdp.actions(s) {
            let dist = mdp
                .transition(s, a)
                .unwrap_or_else(|e| panic!("transition({s:?}, {a:?}) failed: {e}"));
            let total = dist.total();
            assert!(
                (total - 1.0).abs() <= PROBABILITY_TOLERANCE,
                "transition({s:?}, {a:?}) sums to {total}"
            );
            for (next, p) in dist.iter() {
                assert!(p >= 0.0, "negative probability {p} for {next:?}");
                assert!(states.contains(&next), "{next:?} is not a state");
            }
        }
    }
}

/// Assert that every legal action has a finite reward under the
/// default parameters.
pub fn assert_rewards_defined<M: Mdp>(mdp: &M) {
    let params = mdp.default_params();
    mdp.check_params(params)
        .unwrap_or_else(|e| panic!("default params rejected: {e}"));
    for s in mdp.states() {
        for a in mdp.actions(s) {
            let r = mdp
                .reward(params, s, a)
                .unwrap_or_else(|e| panic!("reward({s:?}, {a:?}) failed: {e}"));
            assert!(r.is_finite(), "reward({s:?}, {a:?}) = {r}");
        }
    }
}

/// Assert that the terminal state rejects every action it could be
/// offered.
pub fn assert_terminal_rejects_actions<M: Mdp>(mdp: &M) {
    for s in mdp.states() {
        for a in mdp.actions(s) {
            assert!(
                mdp.transition(State::Terminal, a).is_err(),
                "terminal accepted {a:?}"
            );
        }
    }
}

/// Run all compliance checks.
pub fn run_full_compliance<M: Mdp>(mdp: &M) {
    assert_states_well_formed(mdp);
    assert_actions_match_terminality(mdp);
    assert_transitions_normalized(mdp);
    assert_rewards_defined(mdp);
    assert_terminal_rejects_actions(mdp);
}
