#![allow(dead_code)]

use anyhow::Result;
use serde::Deserialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use sro_tracker::error::TrackingError;
use sro_tracker::transport::{EnvelopeTransport, RawResponse};

/// Replays scripted answers in order and records every envelope sent
#[derive(Clone)]
pub struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<RawResponse, TrackingError>>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<RawResponse, TrackingError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl EnvelopeTransport for MockTransport {
    async fn post(&self, envelope: String) -> Result<RawResponse, TrackingError> {
        self.calls
            .lock()
            .map_err(|_| TrackingError::Transport("calls lock poisoned".to_string()))?
            .push(envelope);

        self.responses
            .lock()
            .map_err(|_| TrackingError::Transport("responses lock poisoned".to_string()))?
            .pop_front()
            .unwrap_or_else(|| Err(TrackingError::Transport("no scripted response left".to_string())))
    }
}

pub fn ok(body: String) -> Result<RawResponse, TrackingError> {
    Ok(RawResponse { status: 200, body })
}

pub fn status(code: u16) -> Result<RawResponse, TrackingError> {
    Ok(RawResponse {
        status: code,
        body: "<html>Internal Server Error</html>".to_string(),
    })
}

/// `rastro` document with one delivered event per identifier
pub fn rastro(identifiers: &[&str], city: &str) -> String {
    let mut xml = format!(
        "<?xml version=\"1.0\" encoding=\"ISO-8859-1\" ?><rastro><versao>2.0</versao><qtd>{}</qtd>",
        identifiers.len()
    );
    for id in identifiers {
        xml.push_str(&format!(
            concat!(
                "<objeto><numero>{}</numero><sigla>AA</sigla><nome>SEDEX</nome>",
                "<evento><tipo>BDE</tipo><status>01</status><data>18/03/2024</data><hora>14:05</hora>",
                "<descricao>Objeto entregue ao destinatário</descricao><local>CDD CENTRO</local>",
                "<codigo>01001000</codigo><cidade>{}</cidade><uf>SP</uf></evento></objeto>"
            ),
            id, city
        ));
    }
    xml.push_str("</rastro>");
    xml
}

/// Wraps an inner document in a `consultaSROResponse` envelope as escaped text
pub fn soap_response(inner: &str) -> String {
    format!(
        concat!(
            r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">"#,
            "<soap:Body>",
            r#"<ns2:consultaSROResponse xmlns:ns2="http://cliente.bean.master.sigep.bsb.correios.com.br/">"#,
            "<return>{}</return>",
            "</ns2:consultaSROResponse>",
            "</soap:Body>",
            "</soap:Envelope>"
        ),
        escape(inner)
    )
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[derive(Deserialize)]
struct SentEnvelope {
    #[serde(rename = "Body")]
    body: SentBody,
}

#[derive(Deserialize)]
struct SentBody {
    #[serde(rename = "consultaSRO")]
    query: SentQuery,
}

#[derive(Deserialize)]
struct SentQuery {
    #[serde(rename = "listaObjetos", default)]
    identifiers: Vec<String>,
}

/// Decodes the `listaObjetos` values back out of a sent envelope
pub fn sent_identifiers(envelope: &str) -> Result<Vec<String>> {
    let sent: SentEnvelope = quick_xml::de::from_str(envelope)?;
    Ok(sent.body.query.identifiers)
}
