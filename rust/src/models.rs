//! Core data types for the simulator.

use pyo3::prelude::*;

use crate::policy::Policy;

/// Simulated time, in processor units.
pub type Ticks = i64;

/// Stable 1-based process identity.
pub type Pid = u32;

/// One simulated job and its timing outputs.
///
/// `arrival_time`, `burst_time` and `priority` are inputs. The remaining fields are
/// written by exactly one policy run and read as zero before that.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Process {
    #[pyo3(get)]
    pub id: Pid,
    #[pyo3(get, set)]
    pub arrival_time: Ticks,
    #[pyo3(get, set)]
    pub burst_time: Ticks,
    /// Lower value = higher priority.
    #[pyo3(get, set)]
    pub priority: i32,
    #[pyo3(get)]
    pub waiting_time: Ticks,
    #[pyo3(get)]
    pub turnaround_time: Ticks,
    #[pyo3(get)]
    pub completion_time: Ticks,
}

#[pymethods]
impl Process {
    #[new]
    #[pyo3(signature = (id, arrival_time, burst_time, priority=0))]
    pub fn new(id: Pid, arrival_time: Ticks, burst_time: Ticks, priority: i32) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority,
            waiting_time: 0,
            turnaround_time: 0,
            completion_time: 0,
        }
    }

    /// True when `turnaround = completion - arrival = waiting + burst`.
    pub fn is_consistent(&self) -> bool {
        self.turnaround_time == self.completion_time - self.arrival_time
            && self.turnaround_time == self.waiting_time + self.burst_time
    }

    fn __repr__(&self) -> String {
        format!(
            "Process(id={}, arrival={}, burst={}, priority={}, waiting={}, turnaround={})",
            self.id,
            self.arrival_time,
            self.burst_time,
            self.priority,
            self.waiting_time,
            self.turnaround_time
        )
    }
}

impl Process {
    /// Record completion at `completion_time` and derive turnaround and waiting time.
    pub(crate) fn complete_at(&mut self, completion_time: Ticks) {
        self.completion_time = completion_time;
        self.turnaround_time = completion_time - self.arrival_time;
        self.waiting_time = self.turnaround_time - self.burst_time;
    }

    /// Clear outputs left by a previous run.
    pub(crate) fn reset_outputs(&mut self) {
        self.waiting_time = 0;
        self.turnaround_time = 0;
        self.completion_time = 0;
    }
}

/// A contiguous stretch of processor time given to one process.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Slice {
    #[pyo3(get)]
    pub process_id: Pid,
    #[pyo3(get)]
    pub start: Ticks,
    #[pyo3(get)]
    pub duration: Ticks,
}

#[pymethods]
impl Slice {
    #[new]
    fn new(process_id: Pid, start: Ticks, duration: Ticks) -> Self {
        Self {
            process_id,
            start,
            duration,
        }
    }

    /// Clock value at which the slice ends.
    #[getter]
    pub fn end(&self) -> Ticks {
        self.start + self.duration
    }

    fn __repr__(&self) -> String {
        format!(
            "Slice(P{}, start={}, duration={})",
            self.process_id, self.start, self.duration
        )
    }
}

/// Append-only, chronologically ordered record of what ran.
///
/// Used for display only; metrics are never derived from it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    slices: Vec<Slice>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slice. Zero-length slices are dropped.
    pub fn push(&mut self, process_id: Pid, start: Ticks, duration: Ticks) {
        if duration > 0 {
            self.slices.push(Slice {
                process_id,
                start,
                duration,
            });
        }
    }

    /// Append every slice of `other`, preserving order.
    pub fn extend(&mut self, other: Timeline) {
        self.slices.extend(other.slices);
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    /// Sum of all slice durations.
    pub fn total_duration(&self) -> Ticks {
        self.slices.iter().map(|s| s.duration).sum()
    }

    /// Merge back-to-back slices of the same process.
    pub fn coalesced(&self) -> Timeline {
        let mut merged: Vec<Slice> = Vec::with_capacity(self.slices.len());
        for slice in &self.slices {
            match merged.last_mut() {
                Some(last) if last.process_id == slice.process_id && last.end() == slice.start => {
                    last.duration += slice.duration;
                }
                _ => merged.push(*slice),
            }
        }
        Timeline { slices: merged }
    }

    /// Process ids in the order they were dispatched, one entry per slice.
    pub fn dispatch_order(&self) -> Vec<Pid> {
        self.slices.iter().map(|s| s.process_id).collect()
    }
}

/// Batch averages.
#[pyclass]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    #[pyo3(get)]
    pub count: usize,
    #[pyo3(get)]
    pub total_waiting: Ticks,
    #[pyo3(get)]
    pub total_turnaround: Ticks,
    #[pyo3(get)]
    pub average_waiting: f64,
    #[pyo3(get)]
    pub average_turnaround: f64,
}

#[pymethods]
impl Metrics {
    fn __repr__(&self) -> String {
        format!(
            "Metrics(n={}, avg_waiting={:.2}, avg_turnaround={:.2})",
            self.count, self.average_waiting, self.average_turnaround
        )
    }
}

/// Outcome of one single-queue policy run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct ScheduleResult {
    /// Records in the caller's order with timing outputs filled in.
    #[pyo3(get)]
    pub processes: Vec<Process>,
    #[pyo3(get)]
    pub metrics: Metrics,
    pub timeline: Timeline,
    /// Clock value when the last process completed.
    #[pyo3(get)]
    pub finish_time: Ticks,
    pub policy: Policy,
}

#[pymethods]
impl ScheduleResult {
    #[getter(timeline)]
    fn py_timeline(&self) -> Vec<Slice> {
        self.timeline.slices().to_vec()
    }

    #[getter(policy)]
    fn py_policy(&self) -> String {
        self.policy.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleResult(policy={}, processes={}, slices={}, finish={})",
            self.policy,
            self.processes.len(),
            self.timeline.len(),
            self.finish_time
        )
    }
}

/// One class of a multilevel run: its policy and the batch indices it owns.
///
/// Queues run strictly in declaration order; queue 0 drains first.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueDescriptor {
    pub policy: Policy,
    /// 0-based indices into the global batch, in dispatch list order.
    #[pyo3(get)]
    pub process_indices: Vec<usize>,
}

#[pymethods]
impl QueueDescriptor {
    #[new]
    #[pyo3(signature = (policy, process_indices, quantum=None))]
    fn py_new(policy: &str, process_indices: Vec<usize>, quantum: Option<Ticks>) -> PyResult<Self> {
        Ok(Self::new(Policy::parse(policy, quantum)?, process_indices))
    }

    #[getter(policy)]
    fn py_policy(&self) -> String {
        self.policy.to_string()
    }

    #[getter]
    fn quantum(&self) -> Option<Ticks> {
        self.policy.quantum()
    }

    fn __repr__(&self) -> String {
        format!(
            "QueueDescriptor(policy={}, processes={:?})",
            self.policy, self.process_indices
        )
    }
}

impl QueueDescriptor {
    pub fn new(policy: Policy, process_indices: Vec<usize>) -> Self {
        Self {
            policy,
            process_indices,
        }
    }
}

/// Per-queue outcome inside a multilevel run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct QueueResult {
    #[pyo3(get)]
    pub queue: usize,
    pub policy: Policy,
    /// Sub-queue local records, arrivals clamped to `activation_time`.
    #[pyo3(get)]
    pub processes: Vec<Process>,
    #[pyo3(get)]
    pub metrics: Metrics,
    #[pyo3(get)]
    pub activation_time: Ticks,
    #[pyo3(get)]
    pub finish_time: Ticks,
}

#[pymethods]
impl QueueResult {
    #[getter(policy)]
    fn py_policy(&self) -> String {
        self.policy.to_string()
    }

    fn __repr__(&self) -> String {
        format!(
            "QueueResult(queue={}, policy={}, processes={}, active={}..{})",
            self.queue,
            self.policy,
            self.processes.len(),
            self.activation_time,
            self.finish_time
        )
    }
}

/// Outcome of a multilevel queue run.
#[pyclass]
#[derive(Clone, Debug)]
pub struct MultilevelResult {
    /// Global records in batch order after merging every queue's results.
    #[pyo3(get)]
    pub processes: Vec<Process>,
    #[pyo3(get)]
    pub metrics: Metrics,
    /// One entry per non-empty queue, in queue order.
    #[pyo3(get)]
    pub queues: Vec<QueueResult>,
    /// Indices of queues that had no processes.
    #[pyo3(get)]
    pub skipped_queues: Vec<usize>,
    pub timeline: Timeline,
    #[pyo3(get)]
    pub finish_time: Ticks,
}

#[pymethods]
impl MultilevelResult {
    #[getter(timeline)]
    fn py_timeline(&self) -> Vec<Slice> {
        self.timeline.slices().to_vec()
    }

    fn __repr__(&self) -> String {
        format!(
            "MultilevelResult(processes={}, queues={}, skipped={}, finish={})",
            self.processes.len(),
            self.queues.len(),
            self.skipped_queues.len(),
            self.finish_time
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_at_derives_times() {
        let mut p = Process::new(1, 2, 5, 0);
        p.complete_at(10);
        assert_eq!(p.completion_time, 10);
        assert_eq!(p.turnaround_time, 8);
        assert_eq!(p.waiting_time, 3);
        assert!(p.is_consistent());
    }

    #[test]
    fn test_timeline_drops_empty_slices() {
        let mut timeline = Timeline::new();
        timeline.push(1, 0, 0);
        timeline.push(1, 0, 2);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.total_duration(), 2);
    }

    #[test]
    fn test_timeline_coalesced_merges_adjacent_same_process() {
        let mut timeline = Timeline::new();
        timeline.push(1, 0, 1);
        timeline.push(1, 1, 1);
        timeline.push(2, 2, 3);
        timeline.push(1, 5, 1);
        // Gap between slices of the same process is not merged
        timeline.push(1, 8, 1);

        let merged = timeline.coalesced();
        assert_eq!(merged.dispatch_order(), vec![1, 2, 1, 1]);
        assert_eq!(merged.slices()[0].duration, 2);
        assert_eq!(merged.total_duration(), timeline.total_duration());
    }
}
