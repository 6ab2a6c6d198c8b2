use std::fmt;

use serde::{Deserialize, Deserializer};

use crate::casing::title_case;

/// Ordered, non-empty group of identifiers sent in a single request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierBatch {
    index: usize,
    identifiers: Vec<String>,
}

impl IdentifierBatch {
    /// Returns `None` for an empty identifier list.
    pub fn new(index: usize, identifiers: Vec<String>) -> Option<Self> {
        if identifiers.is_empty() {
            return None;
        }
        Some(Self { index, identifiers })
    }

    /// Position of this batch within the run, starting at zero
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

/// Service account used in every request envelope
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// SRO `rastro` document (partial, only fields we need)
#[derive(Debug, Default, Deserialize)]
pub struct TrackingReport {
    #[serde(rename = "versao", default)]
    pub version: String,
    /// Declared by the service, not checked against `objects`
    #[serde(rename = "qtd", default)]
    pub declared_count: u32,
    #[serde(rename = "objeto", default)]
    pub objects: Vec<TrackedObject>,
}

/// One shipment and its most recent event
#[derive(Debug, Deserialize)]
pub struct TrackedObject {
    #[serde(rename = "numero")]
    pub identifier: String,
    #[serde(rename = "evento", default)]
    pub event: Option<TrackingEvent>,
    /// Set instead of `event` when the service does not know the identifier
    #[serde(rename = "erro", default)]
    pub error: Option<String>,
}

/// SRO tracking event (partial, only fields we need)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TrackingEvent {
    #[serde(rename = "cidade")]
    pub city: String,
    #[serde(rename = "tipo")]
    pub kind: String,       // e.g. "BDE", "RO", "DO"
    #[serde(deserialize_with = "blank_as_zero")]
    pub status: u8,
    #[serde(rename = "data")]
    pub date: String,       // dd/mm/yyyy
    #[serde(rename = "hora")]
    pub time: String,       // hh:mm
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "local")]
    pub place: Option<String>,
    #[serde(rename = "uf")]
    pub state: Option<String>,
}

/// Reads a numeric element, treating empty text as 0.
fn blank_as_zero<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse().map_err(serde::de::Error::custom)
}

/// An event paired with the identifier it belongs to, as handed to a sink
///
/// Objects the service could not track carry an empty event and the
/// service's `erro` text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedEvent {
    pub identifier: String,
    pub event: TrackingEvent,
    pub error: Option<String>,
}

impl From<TrackedObject> for TrackedEvent {
    fn from(object: TrackedObject) -> Self {
        Self {
            identifier: object.identifier,
            event: object.event.unwrap_or_default(),
            error: object.error,
        }
    }
}

impl fmt::Display for TrackedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(error) = &self.error {
            return write!(f, "{} -> {}", self.identifier, error);
        }
        write!(
            f,
            "{} -> {} dia {} às {} em {}",
            self.identifier,
            self.event.description,
            self.event.date,
            self.event.time,
            title_case(&self.event.city),
        )
    }
}
