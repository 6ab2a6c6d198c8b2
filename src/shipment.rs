use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::envelope::{TrackingRequest, decode_report, decode_response};
use crate::error::TrackingError;
use crate::models::{Credentials, IdentifierBatch, TrackedEvent};
use crate::transport::{EnvelopeTransport, HttpTransport};

/// Client for the SRO tracking service, one round trip per batch
pub struct ShipmentClient {
    credentials: Credentials,
    transport: Arc<dyn EnvelopeTransport>,
}

impl ShipmentClient {
    pub fn new(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new(config.endpoint_url.clone(), config.http_timeout)?;

        Ok(Self::with_transport(config.credentials.clone(), Arc::new(transport)))
    }

    pub fn with_transport(credentials: Credentials, transport: Arc<dyn EnvelopeTransport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    /// Fetches the latest event of every identifier in `batch`.
    ///
    /// Every object the service lists yields one item, in document order,
    /// including objects reported with an `erro` instead of an event.
    pub async fn fetch_batch(&self, batch: &IdentifierBatch) -> Result<Vec<TrackedEvent>, TrackingError> {
        let envelope = TrackingRequest::for_batch(batch, &self.credentials).to_xml()?;

        tracing::debug!(batch = batch.index(), size = batch.len(), "Sending consultaSRO request");

        let response = self.transport.post(envelope).await?;

        if !response.is_success() {
            return Err(TrackingError::ServiceStatus {
                status: response.status,
                body: response.body,
            });
        }

        let outer = decode_response(&response.body)?;
        let report = decode_report(&outer.report_xml)?;

        tracing::debug!(
            batch = batch.index(),
            version = %report.version,
            declared = report.declared_count,
            objects = report.objects.len(),
            "Decoded tracking report"
        );

        let mut events = Vec::with_capacity(report.objects.len());
        for object in report.objects {
            if object.event.is_none() {
                tracing::warn!(
                    identifier = %object.identifier,
                    error = object.error.as_deref().unwrap_or("no event returned"),
                    "Object has no tracking event"
                );
            }
            events.push(TrackedEvent::from(object));
        }

        Ok(events)
    }
}
