//! Single-queue scheduler: the five policies and their shared run driver.
//!
//! Each policy works on a private [`state::RunState`] copy of the batch, so a run
//! never touches the caller's records. [`run_policy`] is the in-place variant that
//! writes the timing outputs back.

mod fcfs;
mod priority;
mod ready;
mod round_robin;
mod sjf;
mod srt;
mod state;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::log_changes;
use crate::models::{Process, ScheduleResult, Ticks};
use crate::policy::Policy;
use crate::validation::{validate_batch, validate_policy};

/// Run `policy` over `processes` starting at time 0.
///
/// Returns the records (in the caller's order) with waiting, turnaround and
/// completion times filled in, their averages, and the execution timeline.
pub fn schedule(
    processes: &[Process],
    policy: Policy,
    config: &SimulationConfig,
) -> Result<ScheduleResult, SimulationError> {
    schedule_from(processes, policy, 0, config)
}

/// Run `policy` with the clock starting at `start_time`.
pub(crate) fn schedule_from(
    processes: &[Process],
    policy: Policy,
    start_time: Ticks,
    config: &SimulationConfig,
) -> Result<ScheduleResult, SimulationError> {
    validate_batch(processes)?;
    validate_policy(policy)?;

    log_changes!(
        config.verbosity,
        "Running {} over {} process(es) from t={}",
        policy,
        processes.len(),
        start_time
    );

    let mut state = state::RunState::new(processes, start_time, config);
    match policy {
        Policy::Fcfs => fcfs::run(&mut state),
        Policy::Sjf => sjf::run(&mut state),
        Policy::Srt => srt::run(&mut state),
        Policy::RoundRobin { quantum } => round_robin::run(&mut state, quantum),
        Policy::Priority => priority::run(&mut state),
    }
    state.finish(policy)
}

/// Run `policy` and write the timing outputs into `processes`.
pub fn run_policy(
    processes: &mut [Process],
    policy: Policy,
    config: &SimulationConfig,
) -> Result<ScheduleResult, SimulationError> {
    let result = schedule(processes, policy, config)?;
    for (record, computed) in processes.iter_mut().zip(&result.processes) {
        record.waiting_time = computed.waiting_time;
        record.turnaround_time = computed.turnaround_time;
        record.completion_time = computed.completion_time;
    }
    Ok(result)
}

/// Run FCFS, SJF, Round Robin, Priority and SRT, each on an independent copy.
pub fn run_all(
    processes: &[Process],
    quantum: Ticks,
    config: &SimulationConfig,
) -> Result<Vec<ScheduleResult>, SimulationError> {
    Policy::all(quantum)?
        .into_iter()
        .map(|policy| schedule(processes, policy, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Process> {
        vec![
            Process::new(1, 0, 5, 2),
            Process::new(2, 1, 3, 1),
            Process::new(3, 2, 8, 3),
        ]
    }

    fn varied() -> Vec<Process> {
        vec![
            Process::new(1, 0, 7, 3),
            Process::new(2, 2, 4, 1),
            Process::new(3, 4, 1, 4),
            Process::new(4, 5, 4, 2),
            Process::new(5, 15, 2, 0),
        ]
    }

    #[test]
    fn test_invariants_hold_for_every_policy() {
        let config = SimulationConfig::default();
        for batch in [sample(), varied()] {
            let total_burst: Ticks = batch.iter().map(|p| p.burst_time).sum();
            for result in run_all(&batch, 3, &config).unwrap() {
                for p in &result.processes {
                    assert!(p.is_consistent(), "{} broke P{}", result.policy, p.id);
                }
                assert_eq!(result.timeline.total_duration(), total_burst);
                let last = result.processes.iter().map(|p| p.completion_time).max();
                assert_eq!(Some(result.finish_time), last);
            }
        }
    }

    /// A long job that a later short job preempts, then a medium one.
    fn late_short_job() -> Vec<Process> {
        vec![
            Process::new(1, 0, 10, 0),
            Process::new(2, 3, 2, 0),
            Process::new(3, 4, 6, 0),
        ]
    }

    /// Arrivals separated by an idle gap.
    fn gapped() -> Vec<Process> {
        vec![
            Process::new(1, 0, 3, 0),
            Process::new(2, 10, 5, 0),
            Process::new(3, 11, 1, 0),
        ]
    }

    #[test]
    fn test_srt_never_waits_longer_than_sjf() {
        let config = SimulationConfig::default();
        for batch in [sample(), varied(), late_short_job(), gapped()] {
            let sjf = schedule(&batch, Policy::Sjf, &config).unwrap();
            let srt = schedule(&batch, Policy::Srt, &config).unwrap();
            assert!(
                srt.metrics.average_waiting <= sjf.metrics.average_waiting,
                "SRT {} > SJF {}",
                srt.metrics.average_waiting,
                sjf.metrics.average_waiting
            );
        }
    }

    #[test]
    fn test_late_short_job_preempts_under_srt_only() {
        let config = SimulationConfig::default();
        let sjf = schedule(&late_short_job(), Policy::Sjf, &config).unwrap();
        let srt = schedule(&late_short_job(), Policy::Srt, &config).unwrap();

        let sjf_waiting: Vec<_> = sjf.processes.iter().map(|p| p.waiting_time).collect();
        let srt_waiting: Vec<_> = srt.processes.iter().map(|p| p.waiting_time).collect();
        assert_eq!(sjf_waiting, vec![0, 7, 8]);
        assert_eq!(srt_waiting, vec![8, 0, 1]);
        assert_eq!(srt.timeline.coalesced().dispatch_order(), vec![1, 2, 3, 1]);
        assert_eq!((sjf.metrics.total_waiting, srt.metrics.total_waiting), (15, 9));
    }

    #[test]
    fn test_run_all_order_and_isolation() {
        let batch = sample();
        let results = run_all(&batch, 2, &SimulationConfig::default()).unwrap();
        let names: Vec<String> = results.iter().map(|r| r.policy.to_string()).collect();
        assert_eq!(names, vec!["FCFS", "SJF", "RR(q=2)", "Priority", "SRT"]);

        // Input records are untouched
        assert!(batch.iter().all(|p| p.completion_time == 0));
    }

    #[test]
    fn test_run_policy_writes_back() {
        let mut batch = sample();
        run_policy(&mut batch, Policy::Fcfs, &SimulationConfig::default()).unwrap();
        let waiting: Vec<_> = batch.iter().map(|p| p.waiting_time).collect();
        assert_eq!(waiting, vec![0, 4, 6]);
        assert_eq!(batch[2].completion_time, 16);
    }

    #[test]
    fn test_rejects_invalid_input() {
        let config = SimulationConfig::default();
        assert_eq!(
            schedule(&[], Policy::Fcfs, &config).unwrap_err(),
            SimulationError::EmptyBatch
        );
        assert_eq!(
            schedule(&sample(), Policy::RoundRobin { quantum: 0 }, &config).unwrap_err(),
            SimulationError::InvalidQuantum(0)
        );
        assert_eq!(
            run_all(&sample(), -1, &config).unwrap_err(),
            SimulationError::InvalidQuantum(-1)
        );
    }

    #[test]
    fn test_stale_outputs_are_cleared() {
        let mut batch = sample();
        batch[0].waiting_time = 99;
        let result = schedule(&batch, Policy::Sjf, &SimulationConfig::default()).unwrap();
        assert_eq!(result.processes[0].waiting_time, 0);
    }
}
