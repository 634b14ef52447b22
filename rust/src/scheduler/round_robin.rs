//! Round Robin with a fixed sweep order.
//!
//! Each sweep walks the list front to back and gives every arrived, unfinished
//! process at most one slice of up to `quantum` units. There is no rotating ready
//! queue: a process preempted at the end of its quantum is next served on the
//! following sweep at its list position, and a process that arrives mid-sweep is
//! served in the same sweep if its index has not been passed yet.

use super::state::RunState;
use crate::log_changes;
use crate::models::Ticks;

pub(crate) fn run(state: &mut RunState, quantum: Ticks) {
    while !state.is_done() {
        let mut dispatched = false;

        for i in 0..state.len() {
            if state.is_finished(i) || !state.has_arrived(i) {
                continue;
            }
            dispatched = true;
            let units = state.remaining(i).min(quantum);
            log_changes!(
                state.verbosity,
                "t={} dispatch P{} for {}",
                state.clock,
                state.processes[i].id,
                units
            );
            state.run_for(i, units);
        }

        if !dispatched && !state.idle_until_next_arrival() {
            break;
        }
    }
}
