//! Multilevel queue orchestration.
//!
//! Queues are strict priority classes: queue `q` starts only after queue `q - 1`
//! has fully drained, and classes never interleave. Each queue runs one
//! single-queue policy over a private copy of its processes. The per-queue outputs
//! are collected as deltas keyed by global index and merged into the global batch
//! once every queue has finished.

use rustc_hash::FxHashMap;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::metrics::compute_metrics;
use crate::models::{MultilevelResult, Process, QueueDescriptor, QueueResult, Ticks, Timeline};
use crate::policy::Policy;
use crate::scheduler::schedule_from;
use crate::validation::{validate_batch, validate_queues};
use crate::{log_changes, log_checks};

/// Queue descriptors built from per-process queue numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueuePlan {
    pub queues: Vec<QueueDescriptor>,
    /// Process indices whose requested queue was out of range and went to queue 0.
    pub defaulted: Vec<usize>,
}

impl QueuePlan {
    /// Assign process `i` to queue `assignments[i]`, one queue per entry of `policies`.
    ///
    /// Out-of-range queue numbers are not an error: the process goes to queue 0.
    pub fn from_assignments(
        assignments: &[i64],
        policies: &[Policy],
        verbosity: u8,
    ) -> Result<Self, SimulationError> {
        if policies.is_empty() {
            return Err(SimulationError::NoQueues);
        }

        let mut queues: Vec<QueueDescriptor> = policies
            .iter()
            .map(|&policy| QueueDescriptor::new(policy, Vec::new()))
            .collect();
        let mut defaulted = Vec::new();

        for (i, &requested) in assignments.iter().enumerate() {
            let q = match usize::try_from(requested) {
                Ok(q) if q < queues.len() => q,
                _ => {
                    log_changes!(
                        verbosity,
                        "P{} requested queue {} (valid 0-{}), assigning to queue 0",
                        i + 1,
                        requested,
                        queues.len() - 1
                    );
                    defaulted.push(i);
                    0
                }
            };
            queues[q].process_indices.push(i);
        }

        Ok(Self { queues, defaulted })
    }
}

/// Run every queue in order and merge the results into the global batch.
///
/// Within queue `q`, any arrival earlier than the queue's activation time (the
/// clock left by queue `q - 1`, or 0) is clamped to it. Merged records carry that
/// effective arrival so `turnaround = completion - arrival` holds globally.
pub fn run_multilevel(
    processes: &[Process],
    queues: &[QueueDescriptor],
    config: &SimulationConfig,
) -> Result<MultilevelResult, SimulationError> {
    validate_batch(processes)?;
    validate_queues(queues, processes.len())?;
    let verbosity = config.verbosity;

    let mut clock: Ticks = 0;
    let mut timeline = Timeline::new();
    let mut deltas: FxHashMap<usize, Process> =
        FxHashMap::with_capacity_and_hasher(processes.len(), Default::default());
    let mut queue_results: Vec<QueueResult> = Vec::with_capacity(queues.len());
    let mut skipped_queues = Vec::new();

    for (q, queue) in queues.iter().enumerate() {
        if queue.process_indices.is_empty() {
            log_checks!(verbosity, "Queue {} ({}) is empty, skipping", q, queue.policy);
            skipped_queues.push(q);
            continue;
        }

        let activation_time = clock;
        log_changes!(
            verbosity,
            "t={} activating queue {} ({}) with {} process(es)",
            activation_time,
            q,
            queue.policy,
            queue.process_indices.len()
        );

        let local: Vec<Process> = queue
            .process_indices
            .iter()
            .map(|&idx| {
                let mut p = processes[idx].clone();
                if p.arrival_time < activation_time {
                    log_checks!(
                        verbosity,
                        "  P{} arrival {} clamped to {}",
                        p.id,
                        p.arrival_time,
                        activation_time
                    );
                    p.arrival_time = activation_time;
                }
                p
            })
            .collect();

        let result = schedule_from(&local, queue.policy, activation_time, config)?;

        for (&idx, record) in queue.process_indices.iter().zip(&result.processes) {
            deltas.insert(idx, record.clone());
        }
        timeline.extend(result.timeline);
        clock = result.finish_time;

        queue_results.push(QueueResult {
            queue: q,
            policy: queue.policy,
            processes: result.processes,
            metrics: result.metrics,
            activation_time,
            finish_time: result.finish_time,
        });
    }

    let merged = merge_deltas(processes, &deltas);
    let metrics = compute_metrics(&merged)?;

    Ok(MultilevelResult {
        processes: merged,
        metrics,
        queues: queue_results,
        skipped_queues,
        timeline,
        finish_time: clock,
    })
}

/// Copy per-queue outputs onto fresh copies of the global records.
fn merge_deltas(processes: &[Process], deltas: &FxHashMap<usize, Process>) -> Vec<Process> {
    processes
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let mut merged = p.clone();
            merged.reset_outputs();
            if let Some(delta) = deltas.get(&idx) {
                merged.arrival_time = delta.arrival_time;
                merged.waiting_time = delta.waiting_time;
                merged.turnaround_time = delta.turnaround_time;
                merged.completion_time = delta.completion_time;
            }
            merged
        })
        .collect()
}
