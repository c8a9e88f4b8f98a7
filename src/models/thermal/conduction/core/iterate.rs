//! Outer convergence loop.
//!
//! Each iteration solves the linear system once and reports the L2 norm of
//! the temperature change to an [`Observer`].
//! The loop ends when the norm falls to the tolerance, the iteration budget
//! runs out, or the observer returns [`Action::StopEarly`].

use twine_core::Observer;
use uom::si::{f64::TemperatureInterval, temperature_interval::kelvin};

use super::SolveError;

/// Emitted after every iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// One-based iteration number.
    pub iteration: usize,

    /// L2 norm of the temperature change over this iteration.
    pub change_norm: TemperatureInterval,
}

/// Control actions an observer can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop iterating and keep the current temperatures.
    StopEarly,
}

/// How the loop terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The change norm reached the tolerance.
    Converged,

    /// The iteration budget ran out first.
    MaxIterations,

    /// An observer returned [`Action::StopEarly`].
    StoppedByObserver,
}

/// When the system is rebuilt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reassembly {
    /// Assemble once up front.
    ///
    /// The coefficients never depend on temperature, so one solve is exact
    /// and the loop reports [`Status::Converged`] after the first iteration.
    #[default]
    Once,

    /// Re-assemble and re-apply conditions before every solve, and iterate
    /// until the change norm reaches the tolerance.
    EveryIteration,
}

/// Summary of a finished loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    pub iterations: usize,
    pub status: Status,

    /// Change norm of the last iteration, K.
    pub change_norm: f64,
}

/// Loop limits.
#[derive(Debug, Clone, Copy)]
pub(super) struct Limits {
    pub max_iterations: usize,
    pub tolerance: f64,
    pub reassembly: Reassembly,
}

/// Runs `step` until a stopping condition holds.
///
/// `step` receives the one-based iteration number and returns the change
/// norm in kelvin.
/// A converged iteration reports [`Status::Converged`] even if the observer
/// also asks to stop.
pub(super) fn iterate<F, Obs>(
    limits: Limits,
    mut step: F,
    mut observer: Obs,
) -> Result<Outcome, SolveError>
where
    F: FnMut(usize) -> Result<f64, SolveError>,
    Obs: Observer<Event, Action>,
{
    let mut change_norm = f64::INFINITY;

    for iteration in 1..=limits.max_iterations {
        change_norm = step(iteration)?;

        let event = Event {
            iteration,
            change_norm: TemperatureInterval::new::<kelvin>(change_norm),
        };
        let action = observer.observe(&event);

        let converged = match limits.reassembly {
            Reassembly::Once => true,
            Reassembly::EveryIteration => change_norm <= limits.tolerance,
        };
        let status = if converged {
            Some(Status::Converged)
        } else if let Some(Action::StopEarly) = action {
            Some(Status::StoppedByObserver)
        } else {
            None
        };

        if let Some(status) = status {
            return Ok(Outcome {
                iterations: iteration,
                status,
                change_norm,
            });
        }
    }

    Ok(Outcome {
        iterations: limits.max_iterations,
        status: Status::MaxIterations,
        change_norm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(max_iterations: usize, reassembly: Reassembly) -> Limits {
        Limits {
            max_iterations,
            tolerance: 1e-6,
            reassembly,
        }
    }

    /// Change norms that halve from 1 K each iteration.
    fn halving(iteration: usize) -> Result<f64, SolveError> {
        Ok(0.5_f64.powi(i32::try_from(iteration).unwrap() - 1))
    }

    #[test]
    fn once_stops_after_first_solve() {
        let outcome = iterate(limits(50, Reassembly::Once), halving, ()).unwrap();
        assert_eq!(outcome.iterations, 1);
        assert_eq!(outcome.status, Status::Converged);
        assert_eq!(outcome.change_norm, 1.0);
    }

    #[test]
    fn every_iteration_runs_to_tolerance() {
        let outcome = iterate(limits(50, Reassembly::EveryIteration), halving, ()).unwrap();
        // 0.5^20 < 1e-6 <= 0.5^19
        assert_eq!(outcome.iterations, 21);
        assert_eq!(outcome.status, Status::Converged);
        assert!(outcome.change_norm <= 1e-6);
    }

    #[test]
    fn budget_runs_out() {
        let outcome = iterate(limits(5, Reassembly::EveryIteration), halving, ()).unwrap();
        assert_eq!(outcome.iterations, 5);
        assert_eq!(outcome.status, Status::MaxIterations);
        assert_eq!(outcome.change_norm, 0.0625);
    }

    #[test]
    fn observer_sees_every_iteration_and_can_stop() {
        let mut seen = Vec::new();
        let observer = |event: &Event| {
            seen.push(event.iteration);
            (event.iteration == 3).then_some(Action::StopEarly)
        };

        let outcome = iterate(limits(50, Reassembly::EveryIteration), halving, observer).unwrap();
        assert_eq!(outcome.iterations, 3);
        assert_eq!(outcome.status, Status::StoppedByObserver);
        assert_eq!(seen, [1, 2, 3]);
    }

    #[test]
    fn convergence_wins_over_stop_request() {
        let observer = |_: &Event| Some(Action::StopEarly);
        let outcome = iterate(limits(50, Reassembly::Once), halving, observer).unwrap();
        assert_eq!(outcome.status, Status::Converged);
    }

    #[test]
    fn step_errors_propagate() {
        let failing = |iteration: usize| -> Result<f64, SolveError> {
            if iteration < 2 {
                Ok(1.0)
            } else {
                Err(SolveError::Singular {
                    iteration,
                    row: 0,
                    last_change_norm: None,
                })
            }
        };
        let result = iterate(limits(10, Reassembly::EveryIteration), failing, ());
        assert!(matches!(
            result,
            Err(SolveError::Singular { iteration: 2, .. })
        ));
    }
}
