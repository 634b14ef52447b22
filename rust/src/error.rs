//! Error types for the simulator.

use thiserror::Error;

use crate::models::{Pid, Ticks};

/// Errors that can occur while validating input or running a simulation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Batch contains no processes")]
    EmptyBatch,
    #[error("Process {pid} has non-positive burst time {burst}")]
    InvalidBurst { pid: Pid, burst: Ticks },
    #[error("Process {pid} has negative arrival time {arrival}")]
    InvalidArrival { pid: Pid, arrival: Ticks },
    #[error("Round Robin quantum must be positive, got {0}")]
    InvalidQuantum(Ticks),
    #[error("Unknown scheduling policy: {0}")]
    UnknownPolicy(String),
    #[error("Multilevel run requires at least one queue")]
    NoQueues,
    #[error("Queue {queue} references process index {index}, but batch has {len} processes")]
    ProcessIndexOutOfRange {
        queue: usize,
        index: usize,
        len: usize,
    },
    #[error("Process index {index} assigned to both queue {first} and queue {second}")]
    DuplicateAssignment {
        index: usize,
        first: usize,
        second: usize,
    },
    #[error("Process index {0} is not assigned to any queue")]
    UnassignedProcess(usize),
    #[error("Batch timings exceed the representable clock range")]
    ClockOverflow,
    #[error("Got {got} priorities for {expected} processes")]
    PriorityCountMismatch { expected: usize, got: usize },
}
