//! SOAP envelopes exchanged with the SRO tracking service.
//!
//! The response carries the real payload, a `rastro` document, as escaped
//! text inside `consultaSROResponse/return`, so decoding takes two separate
//! passes: [`decode_response`] then [`decode_report`].

use serde::{Deserialize, Serialize};

use crate::error::{DecodeStage, TrackingError};
use crate::models::{Credentials, IdentifierBatch, TrackingReport};

pub const SOAP_ENVELOPE_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
pub const SRO_SERVICE_NS: &str = "http://cliente.bean.master.sigep.bsb.correios.com.br/";

/// `tipoConsulta`: query a list of identifiers
pub const QUERY_BY_LIST: &str = "L";
/// `tipoResultado`: only the most recent event of each object
pub const LATEST_EVENT_ONLY: &str = "U";

/// Logical payload of one `consultaSRO` call
#[derive(Debug, Clone)]
pub struct TrackingRequest<'a> {
    pub query_type: &'static str,
    pub result_type: &'static str,
    pub credentials: &'a Credentials,
    pub identifiers: &'a [String],
}

impl<'a> TrackingRequest<'a> {
    pub fn for_batch(batch: &'a IdentifierBatch, credentials: &'a Credentials) -> Self {
        Self {
            query_type: QUERY_BY_LIST,
            result_type: LATEST_EVENT_ONLY,
            credentials,
            identifiers: batch.identifiers(),
        }
    }

    /// Serializes the request into its SOAP envelope.
    pub fn to_xml(&self) -> Result<String, TrackingError> {
        let envelope = EnvelopeRequest {
            xmlns_soapenv: SOAP_ENVELOPE_NS,
            xmlns_cli: SRO_SERVICE_NS,
            header: EnvelopeHeader,
            body: EnvelopeBodyRequest {
                query: ConsultaSro {
                    query_type: self.query_type,
                    result_type: self.result_type,
                    username: &self.credentials.username,
                    password: &self.credentials.password,
                    identifiers: self.identifiers,
                },
            },
        };

        quick_xml::se::to_string(&envelope).map_err(|e| TrackingError::RequestBuild(e.to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename = "soapenv:Envelope")]
struct EnvelopeRequest<'a> {
    #[serde(rename = "@xmlns:soapenv")]
    xmlns_soapenv: &'static str,
    #[serde(rename = "@xmlns:cli")]
    xmlns_cli: &'static str,
    #[serde(rename = "soapenv:Header")]
    header: EnvelopeHeader,
    #[serde(rename = "soapenv:Body")]
    body: EnvelopeBodyRequest<'a>,
}

#[derive(Serialize)]
struct EnvelopeHeader;

#[derive(Serialize)]
struct EnvelopeBodyRequest<'a> {
    #[serde(rename = "cli:consultaSRO")]
    query: ConsultaSro<'a>,
}

#[derive(Serialize)]
struct ConsultaSro<'a> {
    #[serde(rename = "tipoConsulta")]
    query_type: &'a str,
    #[serde(rename = "tipoResultado")]
    result_type: &'a str,
    #[serde(rename = "usuarioSro")]
    username: &'a str,
    #[serde(rename = "senhaSro")]
    password: &'a str,
    #[serde(rename = "listaObjetos")]
    identifiers: &'a [String],
}

/// Decoded outer envelope of a `consultaSRO` answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingResponse {
    /// The inner `rastro` document, still as text
    pub report_xml: String,
}

// Element names are matched without their namespace prefix.
#[derive(Deserialize)]
struct EnvelopeResponse {
    #[serde(rename = "Body")]
    body: EnvelopeBodyResponse,
}

#[derive(Deserialize)]
struct EnvelopeBodyResponse {
    #[serde(rename = "consultaSROResponse")]
    response: ConsultaSroResponse,
}

#[derive(Deserialize)]
struct ConsultaSroResponse {
    #[serde(rename = "return", default)]
    report_xml: String,
}

/// First pass: extract the embedded document from the SOAP envelope.
pub fn decode_response(body: &str) -> Result<TrackingResponse, TrackingError> {
    let envelope: EnvelopeResponse =
        quick_xml::de::from_str(body).map_err(|e| TrackingError::ResponseDecode {
            stage: DecodeStage::Envelope,
            message: e.to_string(),
        })?;

    Ok(TrackingResponse {
        report_xml: envelope.body.response.report_xml,
    })
}

/// Second pass: parse the embedded `rastro` document.
pub fn decode_report(report_xml: &str) -> Result<TrackingReport, TrackingError> {
    quick_xml::de::from_str(report_xml).map_err(|e| TrackingError::ResponseDecode {
        stage: DecodeStage::Report,
        message: e.to_string(),
    })
}
