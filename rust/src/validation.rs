//! Boundary checks for batches, policies and queue partitions.

use rustc_hash::FxHashMap;

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::models::{Pid, Process, QueueDescriptor, Ticks};
use crate::policy::Policy;

/// Reject empty batches, negative arrivals, non-positive bursts, and batches whose
/// clock or summed timing outputs would not fit in [`Ticks`].
pub fn validate_batch(processes: &[Process]) -> Result<(), SimulationError> {
    if processes.is_empty() {
        return Err(SimulationError::EmptyBatch);
    }
    for p in processes {
        if p.arrival_time < 0 {
            return Err(SimulationError::InvalidArrival {
                pid: p.id,
                arrival: p.arrival_time,
            });
        }
        if p.burst_time <= 0 {
            return Err(SimulationError::InvalidBurst {
                pid: p.id,
                burst: p.burst_time,
            });
        }
    }
    if clock_horizon(processes).is_none() {
        return Err(SimulationError::ClockOverflow);
    }
    Ok(())
}

/// Upper bound on every clock value and on the summed turnaround of a run.
///
/// No run finishes later than the latest arrival plus the total burst, and each
/// turnaround is at most that finish time.
fn clock_horizon(processes: &[Process]) -> Option<Ticks> {
    let work = processes
        .iter()
        .try_fold(0 as Ticks, |acc, p| acc.checked_add(p.burst_time))?;
    let latest = processes.iter().map(|p| p.arrival_time).max()?;
    let finish = latest.checked_add(work)?;
    finish.checked_mul(Ticks::try_from(processes.len()).ok()?)
}

/// Reject Round Robin policies constructed with a non-positive quantum.
pub fn validate_policy(policy: Policy) -> Result<(), SimulationError> {
    match policy {
        Policy::RoundRobin { quantum } if quantum <= 0 => {
            Err(SimulationError::InvalidQuantum(quantum))
        }
        _ => Ok(()),
    }
}

/// Check that `queues` partitions `0..len`: every index in range and assigned exactly once.
pub fn validate_queues(queues: &[QueueDescriptor], len: usize) -> Result<(), SimulationError> {
    if queues.is_empty() {
        return Err(SimulationError::NoQueues);
    }

    let mut owner: FxHashMap<usize, usize> =
        FxHashMap::with_capacity_and_hasher(len, Default::default());
    for (q, queue) in queues.iter().enumerate() {
        validate_policy(queue.policy)?;
        for &index in &queue.process_indices {
            if index >= len {
                return Err(SimulationError::ProcessIndexOutOfRange {
                    queue: q,
                    index,
                    len,
                });
            }
            if let Some(&first) = owner.get(&index) {
                return Err(SimulationError::DuplicateAssignment {
                    index,
                    first,
                    second: q,
                });
            }
            owner.insert(index, q);
        }
    }

    if let Some(missing) = (0..len).find(|i| !owner.contains_key(i)) {
        return Err(SimulationError::UnassignedProcess(missing));
    }
    Ok(())
}

/// Build a validated batch from `(arrival, burst)` pairs.
///
/// Ids are 1-based in creation order. `priorities`, when given, must have one
/// entry per process; otherwise every process gets `config.default_priority`.
pub fn build_processes(
    timings: &[(Ticks, Ticks)],
    priorities: Option<&[i32]>,
    config: &SimulationConfig,
) -> Result<Vec<Process>, SimulationError> {
    if let Some(priorities) = priorities {
        if priorities.len() != timings.len() {
            return Err(SimulationError::PriorityCountMismatch {
                expected: timings.len(),
                got: priorities.len(),
            });
        }
    }

    let processes: Vec<Process> = timings
        .iter()
        .enumerate()
        .map(|(i, &(arrival, burst))| {
            let priority = priorities.map_or(config.default_priority, |p| p[i]);
            Process::new((i + 1) as Pid, arrival, burst, priority)
        })
        .collect();

    validate_batch(&processes)?;
    Ok(processes)
}
