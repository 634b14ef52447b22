//! Non-preemptive priority scheduling.

use super::ready::ReadySet;
use super::state::RunState;
use crate::{log_changes, log_checks};

/// Run the arrived process with the lowest priority value to completion.
///
/// Equal priorities go to the earlier arrival, then to the lowest list index.
pub(crate) fn run(state: &mut RunState) {
    let keys: Vec<(i32, _)> = state
        .processes
        .iter()
        .map(|p| (p.priority, p.arrival_time))
        .collect();
    let mut ready = ReadySet::new(&state.arrivals());

    while !state.is_done() {
        ready.admit(state.clock, |i| keys[i]);

        let Some(i) = ready.pop_min() else {
            if !state.idle_until_next_arrival() {
                break;
            }
            continue;
        };

        log_checks!(
            state.verbosity,
            "t={} selected P{} (priority={})",
            state.clock,
            state.processes[i].id,
            keys[i].0
        );
        log_changes!(state.verbosity, "t={} dispatch P{}", state.clock, state.processes[i].id);
        let burst = state.remaining(i);
        state.run_for(i, burst);
    }
}
