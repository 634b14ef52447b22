//! Batch averages over completed process records.

use crate::error::SimulationError;
use crate::models::{Metrics, Process, Ticks};

/// Average waiting and turnaround time over `processes`.
///
/// Fails with `EmptyBatch` rather than dividing by zero.
pub fn compute_metrics(processes: &[Process]) -> Result<Metrics, SimulationError> {
    if processes.is_empty() {
        return Err(SimulationError::EmptyBatch);
    }

    let count = processes.len();
    let total_waiting: Ticks = processes.iter().map(|p| p.waiting_time).sum();
    let total_turnaround: Ticks = processes.iter().map(|p| p.turnaround_time).sum();

    Ok(Metrics {
        count,
        total_waiting,
        total_turnaround,
        average_waiting: total_waiting as f64 / count as f64,
        average_turnaround: total_turnaround as f64 / count as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished(id: u32, waiting: Ticks, turnaround: Ticks) -> Process {
        let mut p = Process::new(id, 0, turnaround - waiting, 0);
        p.complete_at(turnaround);
        p
    }

    #[test]
    fn test_averages() {
        let batch = vec![finished(1, 0, 5), finished(2, 4, 7), finished(3, 6, 14)];
        let metrics = compute_metrics(&batch).unwrap();

        assert_eq!(metrics.count, 3);
        assert_eq!(metrics.total_waiting, 10);
        assert_eq!(metrics.total_turnaround, 26);
        assert!((metrics.average_waiting - 10.0 / 3.0).abs() < 1e-9);
        assert!((metrics.average_turnaround - 26.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_batch_fails() {
        assert_eq!(compute_metrics(&[]), Err(SimulationError::EmptyBatch));
    }
}
