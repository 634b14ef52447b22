//! Shortest remaining time, preemptive.

use super::ready::ReadySet;
use super::state::RunState;
use crate::models::Ticks;
use crate::{log_changes, log_debug};

/// Advance one unit at a time, always running the arrived process with the least
/// remaining work. Ties go to the lowest list index, so an equal newcomer never
/// preempts.
pub(crate) fn run(state: &mut RunState) {
    let mut ready: ReadySet<Ticks> = ReadySet::new(&state.arrivals());
    let mut running: Option<usize> = None;

    while !state.is_done() {
        ready.admit(state.clock, |i| state.remaining(i));

        let Some((remaining, i)) = ready.peek_min() else {
            running = None;
            if !state.idle_until_next_arrival() {
                break;
            }
            continue;
        };

        if running != Some(i) {
            log_changes!(
                state.verbosity,
                "t={} dispatch P{} (remaining={})",
                state.clock,
                state.processes[i].id,
                remaining
            );
            running = Some(i);
        }
        log_debug!(state.verbosity, "t={} tick P{}", state.clock, state.processes[i].id);

        let done = state.run_for(i, 1);
        let new_key = (!done).then(|| state.remaining(i));
        ready.rekey(i, remaining, new_key);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SimulationConfig;
    use crate::models::Process;
    use crate::policy::Policy;
    use crate::scheduler::schedule;

    #[test]
    fn test_preempts_for_shorter_arrival() {
        let batch = vec![
            Process::new(1, 0, 8, 0),
            Process::new(2, 1, 4, 0),
            Process::new(3, 2, 9, 0),
            Process::new(4, 3, 5, 0),
        ];
        let result = schedule(&batch, Policy::Srt, &SimulationConfig::default()).unwrap();

        let completion: Vec<_> = result.processes.iter().map(|p| p.completion_time).collect();
        let waiting: Vec<_> = result.processes.iter().map(|p| p.waiting_time).collect();
        assert_eq!(completion, vec![17, 5, 26, 10]);
        assert_eq!(waiting, vec![9, 0, 15, 2]);
        assert!((result.metrics.average_waiting - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_emits_unit_slices() {
        let batch = vec![Process::new(1, 0, 3, 0), Process::new(2, 0, 2, 0)];
        let result = schedule(&batch, Policy::Srt, &SimulationConfig::default()).unwrap();

        assert!(result.timeline.slices().iter().all(|s| s.duration == 1));
        assert_eq!(result.timeline.dispatch_order(), vec![2, 2, 1, 1, 1]);
        assert_eq!(result.timeline.coalesced().len(), 2);
        assert_eq!(result.timeline.total_duration(), 5);
    }

    #[test]
    fn test_equal_remaining_does_not_preempt_lower_index() {
        let batch = vec![Process::new(1, 0, 4, 0), Process::new(2, 1, 3, 0)];
        let result = schedule(&batch, Policy::Srt, &SimulationConfig::default()).unwrap();

        // At t=1 both have 3 units left; P1 keeps the processor
        assert_eq!(result.processes[0].completion_time, 4);
        assert_eq!(result.processes[1].completion_time, 7);
    }

    #[test]
    fn test_idle_gap_skipped() {
        let batch = vec![Process::new(1, 0, 1, 0), Process::new(2, 5, 2, 0)];
        let result = schedule(&batch, Policy::Srt, &SimulationConfig::default()).unwrap();

        assert_eq!(result.processes[1].completion_time, 7);
        assert_eq!(result.processes[1].waiting_time, 0);
        assert_eq!(result.timeline.total_duration(), 3);
    }
}
