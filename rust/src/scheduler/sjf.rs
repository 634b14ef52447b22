//! Shortest job first, non-preemptive.

use super::ready::ReadySet;
use super::state::RunState;
use crate::{log_changes, log_checks};

/// Repeatedly run the shortest arrived job to completion.
///
/// Ties go to the lowest list index.
pub(crate) fn run(state: &mut RunState) {
    let bursts: Vec<_> = state.processes.iter().map(|p| p.burst_time).collect();
    let mut ready = ReadySet::new(&state.arrivals());

    while !state.is_done() {
        let admitted = ready.admit(state.clock, |i| bursts[i]);
        if admitted > 0 {
            log_checks!(state.verbosity, "t={} admitted {} process(es)", state.clock, admitted);
        }

        let Some(i) = ready.pop_min() else {
            if !state.idle_until_next_arrival() {
                break;
            }
            continue;
        };

        log_changes!(
            state.verbosity,
            "t={} dispatch P{} (burst={})",
            state.clock,
            state.processes[i].id,
            bursts[i]
        );
        state.run_for(i, bursts[i]);
    }
}
