//! The consumer side of the pipeline.

use crate::client::Client;
use crate::error::{CheckinError, Error};
use crate::limiter::Throttle;
use crate::queue::Receiver;

/// Why the worker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    /// The queue was closed and every request in it processed.
    Drained,
    /// The check-in ceiling was reached.
    CeilingReached,
}

/// What a run of the worker did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Searches performed.
    pub searches: usize,
    /// Venues returned across all searches, including unprocessed ones.
    pub venues: usize,
    /// Successful check-ins.
    pub checkins: usize,
    /// Check-ins which failed and were skipped.
    pub failed: usize,
    /// Why the run ended.
    pub stop: Stop,
}

/// Performs searches and check-ins one at a time, pacing every call through a
/// single shared throttle.
pub struct Worker<T> {
    client: Client,
    throttle: T,
    ceiling: usize,
    checkins: usize,
}

impl<T> Worker<T>
where
    T: Throttle,
{
    /// Construct a new worker which stops after `ceiling` successful check-ins.
    pub fn new(client: Client, throttle: T, ceiling: usize) -> Self {
        Self {
            client,
            throttle,
            ceiling,
            checkins: 0,
        }
    }

    /// Successful check-ins so far.
    pub fn checkins(&self) -> usize {
        self.checkins
    }

    fn exhausted(&self) -> bool {
        self.checkins >= self.ceiling
    }

    /// Consume searches until the queue is closed and drained or until the
    /// check-in ceiling is reached.
    ///
    /// Only check-ins answered with `200 OK` count towards the ceiling. A
    /// failing check-in is logged and skipped, while a failing search is
    /// returned as an error.
    pub async fn run(&mut self, mut rx: Receiver) -> Result<Summary, Error> {
        let mut summary = Summary {
            searches: 0,
            venues: 0,
            checkins: 0,
            failed: 0,
            stop: Stop::Drained,
        };

        if self.exhausted() {
            summary.stop = Stop::CeilingReached;
            return Ok(summary);
        }

        while let Some(request) = rx.recv().await {
            tracing::info!("waiting for throttle");
            self.throttle.acquire().await;

            tracing::info!(location = %request.location, "making venue request");
            let search = self.client.search(request).await?;
            summary.searches += 1;

            let venues = search.venues();
            summary.venues += venues.len();
            tracing::info!("iterating on {} venues", venues.len());

            for venue in venues {
                tracing::info!("waiting for throttle before check-in");
                self.throttle.acquire().await;

                tracing::info!(id = %venue.id, name = %venue.name, "checking in");

                if let Err(error) = self.client.checkin(&venue.id).await {
                    match &error {
                        CheckinError::Transport(source) => {
                            tracing::warn!(id = %venue.id, %error, %source, "check-in failed");
                        }
                        CheckinError::Status { status, body } => {
                            tracing::warn!(id = %venue.id, %status, %body, "check-in failed");
                        }
                    }

                    summary.failed += 1;
                    continue;
                }

                self.checkins += 1;
                summary.checkins += 1;

                if self.exhausted() {
                    tracing::info!(checkins = self.checkins, "check-in ceiling reached");
                    summary.stop = Stop::CeilingReached;
                    return Ok(summary);
                }
            }
        }

        Ok(summary)
    }
}
