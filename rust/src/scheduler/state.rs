//! Per-run scratch state shared by every single-queue policy.

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::metrics::compute_metrics;
use crate::models::{Process, ScheduleResult, Ticks, Timeline};
use crate::policy::Policy;
use crate::{log_changes, log_debug};

/// Working copy of a batch plus the clock, remaining work and timeline of one run.
///
/// Records are held in dispatch list order. `origin[i]` maps working index `i`
/// back to the caller's index so results are reported in the caller's order.
pub(crate) struct RunState {
    pub processes: Vec<Process>,
    origin: Vec<usize>,
    remaining: Vec<Ticks>,
    completed: usize,
    pub clock: Ticks,
    timeline: Timeline,
    pub verbosity: u8,
}

impl RunState {
    /// Copy `processes`, clearing stale outputs, with the clock at `start_time`.
    pub fn new(processes: &[Process], start_time: Ticks, config: &SimulationConfig) -> Self {
        let mut origin: Vec<usize> = (0..processes.len()).collect();
        if config.sort_by_arrival {
            origin.sort_by_key(|&i| processes[i].arrival_time);
        }

        let processes: Vec<Process> = origin
            .iter()
            .map(|&i| {
                let mut p = processes[i].clone();
                p.reset_outputs();
                p
            })
            .collect();
        let remaining = processes.iter().map(|p| p.burst_time).collect();

        Self {
            processes,
            origin,
            remaining,
            completed: 0,
            clock: start_time,
            timeline: Timeline::new(),
            verbosity: config.verbosity,
        }
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_done(&self) -> bool {
        self.completed == self.processes.len()
    }

    pub fn remaining(&self, i: usize) -> Ticks {
        self.remaining[i]
    }

    pub fn is_finished(&self, i: usize) -> bool {
        self.remaining[i] == 0
    }

    pub fn has_arrived(&self, i: usize) -> bool {
        self.processes[i].arrival_time <= self.clock
    }

    pub fn arrivals(&self) -> Vec<Ticks> {
        self.processes.iter().map(|p| p.arrival_time).collect()
    }

    /// Run process `i` for `units`, appending one slice. Returns true if it completed.
    pub fn run_for(&mut self, i: usize, units: Ticks) -> bool {
        let units = units.min(self.remaining[i]);
        let pid = self.processes[i].id;
        self.timeline.push(pid, self.clock, units);
        self.clock += units;
        self.remaining[i] -= units;

        if self.remaining[i] > 0 {
            return false;
        }

        self.processes[i].complete_at(self.clock);
        self.completed += 1;
        let p = &self.processes[i];
        log_changes!(
            self.verbosity,
            "t={} P{} completed (waiting={}, turnaround={})",
            self.clock,
            pid,
            p.waiting_time,
            p.turnaround_time
        );
        true
    }

    /// Earliest arrival strictly after the clock among unfinished processes.
    pub fn next_arrival(&self) -> Option<Ticks> {
        (0..self.len())
            .filter(|&i| !self.is_finished(i) && !self.has_arrived(i))
            .map(|i| self.processes[i].arrival_time)
            .min()
    }

    /// Advance an idle processor to the next arrival. Returns false if none is pending.
    pub fn idle_until_next_arrival(&mut self) -> bool {
        match self.next_arrival() {
            Some(t) => {
                log_debug!(self.verbosity, "t={} idle until t={}", self.clock, t);
                self.clock = t;
                true
            }
            None => false,
        }
    }

    /// Restore the caller's order and package the outcome.
    pub fn finish(self, policy: Policy) -> Result<ScheduleResult, SimulationError> {
        let mut ordered: Vec<Option<Process>> = vec![None; self.processes.len()];
        for (p, &slot) in self.processes.into_iter().zip(&self.origin) {
            debug_assert!(p.is_consistent(), "inconsistent times for P{}", p.id);
            ordered[slot] = Some(p);
        }
        let processes: Vec<Process> = ordered.into_iter().flatten().collect();

        Ok(ScheduleResult {
            metrics: compute_metrics(&processes)?,
            processes,
            timeline: self.timeline,
            finish_time: self.clock,
            policy,
        })
    }
}
