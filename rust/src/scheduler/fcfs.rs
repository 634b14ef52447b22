//! First-come-first-served.

use super::state::RunState;
use crate::log_changes;

/// Dispatch every process to completion in list order.
///
/// The list is not sorted here; ties and out-of-order arrivals are served in the
/// order given unless the run was configured with `sort_by_arrival`.
pub(crate) fn run(state: &mut RunState) {
    for i in 0..state.len() {
        let arrival = state.processes[i].arrival_time;
        if state.clock < arrival {
            state.clock = arrival;
        }
        log_changes!(
            state.verbosity,
            "t={} dispatch P{}",
            state.clock,
            state.processes[i].id
        );
        let burst = state.remaining(i);
        state.run_for(i, burst);
    }
}
