use std::sync::Arc;

use anyhow::Context;

use crate::batcher::partition;
use crate::error::TrackingError;
use crate::models::TrackedEvent;
use crate::shipment::ShipmentClient;

/// Destination of decoded events
pub trait EventSink {
    fn emit(&mut self, event: &TrackedEvent);
}

/// Prints one line per event on stdout
#[derive(Debug, Default)]
pub struct StdoutSink;

impl EventSink for StdoutSink {
    fn emit(&mut self, event: &TrackedEvent) {
        println!("{}", event);
    }
}

impl EventSink for Vec<TrackedEvent> {
    fn emit(&mut self, event: &TrackedEvent) {
        self.push(event.clone());
    }
}

/// What happened to one batch of a run
#[derive(Debug)]
pub struct BatchReport {
    pub index: usize,
    pub size: usize,
    /// Number of events emitted, or the recoverable failure that dropped them
    pub outcome: Result<usize, TrackingError>,
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub batches: Vec<BatchReport>,
}

impl RunSummary {
    pub fn events(&self) -> usize {
        self.batches.iter().filter_map(|b| b.outcome.as_ref().ok()).sum()
    }

    pub fn failed_batches(&self) -> usize {
        self.batches.iter().filter(|b| b.outcome.is_err()).count()
    }
}

pub struct DataFetcher {
    shipment: Arc<ShipmentClient>,
    batch_size: usize,
}

impl DataFetcher {
    pub fn new(shipment: Arc<ShipmentClient>, batch_size: usize) -> Self {
        Self { shipment, batch_size }
    }

    /// Tracks every identifier, one batch after the other.
    ///
    /// Bad HTTP statuses and undecodable responses only drop the events of
    /// their own batch. Request build and transport failures stop the run
    /// and are returned as a [`TrackingError`] wrapped in the error chain.
    pub async fn run<S: EventSink>(&self, identifiers: &[String], sink: &mut S) -> anyhow::Result<RunSummary> {
        let batches = partition(identifiers, self.batch_size);
        let mut summary = RunSummary::default();

        tracing::info!(
            identifiers = identifiers.len(),
            batches = batches.len(),
            batch_size = self.batch_size,
            "Starting tracking run"
        );

        for batch in &batches {
            let outcome = match self.shipment.fetch_batch(batch).await {
                Ok(events) => {
                    for event in &events {
                        sink.emit(event);
                    }
                    Ok(events.len())
                }
                Err(e) if e.is_fatal() => {
                    return Err(e).with_context(|| {
                        format!("Tracking run aborted at batch {} of {}", batch.index() + 1, batches.len())
                    });
                }
                Err(e) => {
                    tracing::error!(batch = batch.index(), identifiers = ?batch.identifiers(), "Error querying objects: {}", e);
                    Err(e)
                }
            };

            summary.batches.push(BatchReport {
                index: batch.index(),
                size: batch.len(),
                outcome,
            });
        }

        tracing::info!(
            events = summary.events(),
            failed_batches = summary.failed_batches(),
            "Tracking run finished"
        );

        Ok(summary)
    }
}
