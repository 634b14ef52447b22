//! CPU scheduling simulator.
//!
//! Simulates FCFS, SJF, SRT, Round Robin and Priority scheduling over a fixed batch
//! of processes, plus multilevel queues composed from those policies, and reports
//! per-process and average waiting and turnaround times with an execution timeline.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use pyo3::prelude::*;

mod config;
mod error;
pub mod logging;
pub mod metrics;
mod models;
pub mod multilevel;
mod policy;
pub mod scheduler;
pub mod validation;

pub use config::SimulationConfig;
pub use error::SimulationError;
pub use metrics::compute_metrics;
pub use models::{
    Metrics, MultilevelResult, Pid, Process, QueueDescriptor, QueueResult, ScheduleResult, Slice,
    Ticks, Timeline,
};
pub use multilevel::{run_multilevel, QueuePlan};
pub use policy::Policy;
pub use scheduler::{run_all, run_policy, schedule};
pub use validation::build_processes;

impl From<SimulationError> for PyErr {
    fn from(err: SimulationError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}

/// Build a batch of processes from `(arrival_time, burst_time)` pairs.
///
/// Ids are assigned 1..=n in list order.
///
/// # Raises
/// * ValueError if the batch is empty, any timing is invalid, or `priorities`
///   does not have one entry per process
#[pyfunction]
#[pyo3(name = "build_processes", signature = (timings, priorities=None, config=None))]
fn py_build_processes(
    timings: Vec<(Ticks, Ticks)>,
    priorities: Option<Vec<i32>>,
    config: Option<SimulationConfig>,
) -> PyResult<Vec<Process>> {
    let config = config.unwrap_or_default();
    Ok(build_processes(&timings, priorities.as_deref(), &config)?)
}

/// Run one scheduling policy over a batch.
///
/// # Arguments
/// * `processes` - Batch of processes, dispatched in list order
/// * `policy` - One of "fcfs", "sjf", "srt", "rr", "priority"
/// * `quantum` - Time quantum, required for "rr"
/// * `config` - Simulation configuration
///
/// # Returns
/// * ScheduleResult with filled-in processes, averages and timeline
///
/// # Raises
/// * ValueError on unknown policy, missing or invalid quantum, or invalid batch
#[pyfunction]
#[pyo3(name = "run_policy", signature = (processes, policy, quantum=None, config=None))]
fn py_run_policy(
    processes: Vec<Process>,
    policy: &str,
    quantum: Option<Ticks>,
    config: Option<SimulationConfig>,
) -> PyResult<ScheduleResult> {
    let policy = Policy::parse(policy, quantum)?;
    let config = config.unwrap_or_default();
    Ok(schedule(&processes, policy, &config)?)
}

/// Run FCFS, SJF, Round Robin, Priority and SRT on independent copies of a batch.
#[pyfunction]
#[pyo3(name = "run_all_policies", signature = (processes, quantum, config=None))]
fn py_run_all_policies(
    processes: Vec<Process>,
    quantum: Ticks,
    config: Option<SimulationConfig>,
) -> PyResult<Vec<ScheduleResult>> {
    let config = config.unwrap_or_default();
    Ok(run_all(&processes, quantum, &config)?)
}

/// Build queue descriptors from a per-process queue number.
///
/// # Arguments
/// * `assignments` - Queue number for each process, in batch order
/// * `queue_policies` - `(policy, quantum)` for each queue, highest priority first
///
/// # Returns
/// * `(queues, defaulted)` where `defaulted` lists process indices whose queue
///   number was out of range and were placed in queue 0
#[pyfunction]
#[pyo3(name = "assign_queues", signature = (assignments, queue_policies, config=None))]
fn py_assign_queues(
    assignments: Vec<i64>,
    queue_policies: Vec<(String, Option<Ticks>)>,
    config: Option<SimulationConfig>,
) -> PyResult<(Vec<QueueDescriptor>, Vec<usize>)> {
    let config = config.unwrap_or_default();
    let policies = queue_policies
        .iter()
        .map(|(name, quantum)| Policy::parse(name, *quantum))
        .collect::<Result<Vec<_>, _>>()?;
    let plan = QueuePlan::from_assignments(&assignments, &policies, config.verbosity)?;
    Ok((plan.queues, plan.defaulted))
}

/// Run a multilevel queue simulation.
///
/// Queues run strictly in order; each drains before the next starts.
///
/// # Raises
/// * ValueError if the queues do not partition the batch or any input is invalid
#[pyfunction]
#[pyo3(name = "run_multilevel", signature = (processes, queues, config=None))]
fn py_run_multilevel(
    processes: Vec<Process>,
    queues: Vec<QueueDescriptor>,
    config: Option<SimulationConfig>,
) -> PyResult<MultilevelResult> {
    let config = config.unwrap_or_default();
    Ok(run_multilevel(&processes, &queues, &config)?)
}

/// Average waiting and turnaround time over completed processes.
#[pyfunction]
#[pyo3(name = "compute_averages")]
fn py_compute_averages(processes: Vec<Process>) -> PyResult<Metrics> {
    Ok(compute_metrics(&processes)?)
}

/// The cpusched.rust Python module.
#[pymodule]
fn rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Data types
    m.add_class::<Process>()?;
    m.add_class::<Slice>()?;
    m.add_class::<Metrics>()?;
    m.add_class::<ScheduleResult>()?;
    m.add_class::<QueueDescriptor>()?;
    m.add_class::<QueueResult>()?;
    m.add_class::<MultilevelResult>()?;

    // Config types
    m.add_class::<SimulationConfig>()?;

    // Simulation entry points
    m.add_function(wrap_pyfunction!(py_build_processes, m)?)?;
    m.add_function(wrap_pyfunction!(py_run_policy, m)?)?;
    m.add_function(wrap_pyfunction!(py_run_all_policies, m)?)?;
    m.add_function(wrap_pyfunction!(py_assign_queues, m)?)?;
    m.add_function(wrap_pyfunction!(py_run_multilevel, m)?)?;
    m.add_function(wrap_pyfunction!(py_compute_averages, m)?)?;

    Ok(())
}
