//! Configuration for simulation runs.

use pyo3::prelude::*;

/// Knobs shared by single-queue and multilevel runs.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Stable-sort each run's working copy by arrival time before dispatch.
    /// Results are still reported in the caller's order.
    #[pyo3(get, set)]
    pub sort_by_arrival: bool,
    /// Priority assigned by `build_processes` when no priorities are supplied.
    #[pyo3(get, set)]
    pub default_priority: i32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            sort_by_arrival: false,
            default_priority: 0,
        }
    }
}

#[pymethods]
impl SimulationConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, sort_by_arrival=None, default_priority=None))]
    fn new(
        verbosity: Option<u8>,
        sort_by_arrival: Option<bool>,
        default_priority: Option<i32>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            sort_by_arrival: sort_by_arrival.unwrap_or(defaults.sort_by_arrival),
            default_priority: default_priority.unwrap_or(defaults.default_priority),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "SimulationConfig(verbosity={}, sort_by_arrival={}, default_priority={})",
            self.verbosity, self.sort_by_arrival, self.default_priority
        )
    }
}
