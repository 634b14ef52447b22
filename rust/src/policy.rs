//! Scheduling policy selection.

use std::fmt;

use crate::error::SimulationError;
use crate::models::Ticks;

/// A single-queue scheduling discipline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First-come-first-served, dispatched in list order.
    Fcfs,
    /// Shortest job first, non-preemptive.
    Sjf,
    /// Shortest remaining time, preemptive at every unit boundary.
    Srt,
    /// Fixed-sweep Round Robin with a positive quantum.
    RoundRobin { quantum: Ticks },
    /// Non-preemptive priority, lower value first.
    Priority,
}

impl Policy {
    /// Build a Round Robin policy, rejecting non-positive quanta.
    pub fn round_robin(quantum: Ticks) -> Result<Self, SimulationError> {
        if quantum <= 0 {
            return Err(SimulationError::InvalidQuantum(quantum));
        }
        Ok(Self::RoundRobin { quantum })
    }

    /// Parse a policy name. `quantum` is required for Round Robin and ignored otherwise.
    ///
    /// Accepted names (case-insensitive): `fcfs`, `sjf`, `srt`, `rr`, `round_robin`,
    /// `priority`.
    pub fn parse(name: &str, quantum: Option<Ticks>) -> Result<Self, SimulationError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "srt" | "srtf" => Ok(Self::Srt),
            "rr" | "round_robin" | "roundrobin" => Self::round_robin(quantum.unwrap_or(0)),
            "priority" => Ok(Self::Priority),
            _ => Err(SimulationError::UnknownPolicy(name.to_string())),
        }
    }

    /// Map a menu code to a policy: 1=FCFS, 2=SJF, 3=RR, 4=Priority, 5=SRT.
    pub fn from_code(code: i64, quantum: Option<Ticks>) -> Result<Self, SimulationError> {
        match code {
            1 => Ok(Self::Fcfs),
            2 => Ok(Self::Sjf),
            3 => Self::round_robin(quantum.unwrap_or(0)),
            4 => Ok(Self::Priority),
            5 => Ok(Self::Srt),
            _ => Err(SimulationError::UnknownPolicy(code.to_string())),
        }
    }

    /// Every policy in run-all order, Round Robin using `quantum`.
    pub fn all(quantum: Ticks) -> Result<[Self; 5], SimulationError> {
        Ok([
            Self::Fcfs,
            Self::Sjf,
            Self::round_robin(quantum)?,
            Self::Priority,
            Self::Srt,
        ])
    }

    pub fn quantum(&self) -> Option<Ticks> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "FCFS"),
            Self::Sjf => write!(f, "SJF"),
            Self::Srt => write!(f, "SRT"),
            Self::RoundRobin { quantum } => write!(f, "RR(q={})", quantum),
            Self::Priority => write!(f, "Priority"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(Policy::parse("FCFS", None), Ok(Policy::Fcfs));
        assert_eq!(Policy::parse(" sjf ", None), Ok(Policy::Sjf));
        assert_eq!(Policy::parse("srt", Some(4)), Ok(Policy::Srt));
        assert_eq!(
            Policy::parse("round_robin", Some(3)),
            Ok(Policy::RoundRobin { quantum: 3 })
        );
        assert!(matches!(
            Policy::parse("lottery", None),
            Err(SimulationError::UnknownPolicy(_))
        ));
    }

    #[test]
    fn test_round_robin_requires_positive_quantum() {
        assert_eq!(
            Policy::parse("rr", None),
            Err(SimulationError::InvalidQuantum(0))
        );
        assert_eq!(
            Policy::round_robin(-1),
            Err(SimulationError::InvalidQuantum(-1))
        );
    }

    #[test]
    fn test_menu_codes() {
        assert_eq!(Policy::from_code(1, None), Ok(Policy::Fcfs));
        assert_eq!(
            Policy::from_code(3, Some(2)),
            Ok(Policy::RoundRobin { quantum: 2 })
        );
        assert_eq!(Policy::from_code(5, None), Ok(Policy::Srt));
        assert!(Policy::from_code(7, None).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Policy::RoundRobin { quantum: 2 }.to_string(), "RR(q=2)");
        assert_eq!(Policy::Priority.to_string(), "Priority");
    }
}
