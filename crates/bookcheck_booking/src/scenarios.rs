// --- File: crates/bookcheck_booking/src/scenarios.rs ---

use bookcheck_common::{internal_error, BookcheckError};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info, info_span, Instrument};

use crate::error::BookingError;
use crate::session::BookingSession;
use crate::workflow::BookingWorkflow;

/// An independent, ordered sequence of workflow calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// Create, read, token, update, partial update, delete, read deleted.
    CrudChain,
    ReadDeletedBooking,
    CreateWithInvalidHeaders,
    UpdateWithoutToken,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::CrudChain,
        Scenario::ReadDeletedBooking,
        Scenario::CreateWithInvalidHeaders,
        Scenario::UpdateWithoutToken,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::CrudChain => "crud-chain",
            Scenario::ReadDeletedBooking => "read-deleted-booking",
            Scenario::CreateWithInvalidHeaders => "create-with-invalid-headers",
            Scenario::UpdateWithoutToken => "update-without-token",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scenario| scenario.name() == name)
    }

    /// Runs the scenario with a fresh session, stopping at the first failure.
    ///
    /// Returns the session so callers can inspect what was produced.
    pub async fn run(self, workflow: &BookingWorkflow) -> Result<BookingSession, BookingError> {
        let mut session = BookingSession::new();
        let span = info_span!("scenario", scenario = self.name(), run_id = %session.run_id());

        async {
            self.steps(workflow, &mut session).await?;
            Ok::<_, BookingError>(session)
        }
        .instrument(span)
        .await
    }

    async fn steps(
        self,
        workflow: &BookingWorkflow,
        session: &mut BookingSession,
    ) -> Result<(), BookingError> {
        match self {
            Scenario::CrudChain => {
                workflow.create(session).await?;
                workflow.read(session).await?;
                workflow.generate_token(session).await?;
                workflow.update(session).await?;
                workflow.partial_update(session).await?;
                workflow.delete(session).await?;
                workflow.read_deleted(session).await?;
            }
            Scenario::ReadDeletedBooking => {
                workflow.create(session).await?;
                workflow.generate_token(session).await?;
                workflow.delete(session).await?;
                workflow.read_deleted(session).await?;
            }
            Scenario::CreateWithInvalidHeaders => {
                workflow.create_with_invalid_headers(session).await?;
            }
            Scenario::UpdateWithoutToken => {
                workflow.create(session).await?;
                workflow.update_without_token(session).await?;
                // The rejected update must not have touched the booking.
                workflow.read(session).await?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of one scenario run.
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub scenario: Scenario,
    pub elapsed: Duration,
    pub result: Result<(), BookcheckError>,
}

impl ScenarioOutcome {
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Runs each scenario as its own task and collects the outcomes in input
/// order. Scenarios share only the immutable workflow.
pub async fn run_concurrently(
    workflow: Arc<BookingWorkflow>,
    scenarios: &[Scenario],
) -> Vec<ScenarioOutcome> {
    let handles: Vec<_> = scenarios
        .iter()
        .map(|&scenario| {
            let workflow = Arc::clone(&workflow);
            let handle = tokio::spawn(async move {
                let started = Instant::now();
                let result = scenario.run(&workflow).await.map(|_| ());
                (started.elapsed(), result)
            });
            (scenario, handle)
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for (scenario, handle) in handles {
        let outcome = match handle.await {
            Ok((elapsed, result)) => ScenarioOutcome {
                scenario,
                elapsed,
                result: result.map_err(BookcheckError::from),
            },
            Err(join_error) => ScenarioOutcome {
                scenario,
                elapsed: Duration::ZERO,
                result: Err(internal_error(format!("scenario task failed: {}", join_error))),
            },
        };

        match &outcome.result {
            Ok(()) => info!("scenario {} passed in {:?}", scenario, outcome.elapsed),
            Err(err) => error!("scenario {} failed: {}", scenario, err),
        }
        outcomes.push(outcome);
    }
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for scenario in Scenario::ALL {
            assert_eq!(Scenario::from_name(scenario.name()), Some(scenario));
        }
        assert_eq!(Scenario::from_name("crud"), None);
    }
}
