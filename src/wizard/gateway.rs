use std::io::Write;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::GatewayError;

use super::payload::SurveyPayload;

/// Response reported by a gateway after sending the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayResponse {
    pub ok: bool,
    pub body: Value,
}

impl GatewayResponse {
    pub fn success(body: Value) -> Self {
        Self { ok: true, body }
    }

    pub fn failure(body: Value) -> Self {
        Self { ok: false, body }
    }

    /// Backend `error` message, when the body carries one.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(Value::as_str)
    }
}

/// Boundary to whatever transport delivers the survey to the backend.
///
/// Called exactly once per completed wizard pass. Implementations must not
/// retry on their own; resubmission is a new user action.
pub trait SubmissionGateway {
    fn submit(&mut self, payload: &SurveyPayload) -> Result<GatewayResponse, GatewayError>;
}

/// Writes the payload JSON to a writer and reports success.
pub struct DryRunGateway<W: Write> {
    out: W,
    redirect_url: String,
}

impl<W: Write> DryRunGateway<W> {
    pub fn new(out: W, redirect_url: impl Into<String>) -> Self {
        Self {
            out,
            redirect_url: redirect_url.into(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SubmissionGateway for DryRunGateway<W> {
    fn submit(&mut self, payload: &SurveyPayload) -> Result<GatewayResponse, GatewayError> {
        let body = payload.to_json_pretty()?;
        writeln!(self.out, "{}", body)?;
        self.out.flush()?;
        Ok(GatewayResponse::success(json!({
            "message": "Survey saved",
            "redirectURL": self.redirect_url,
        })))
    }
}
