use analyser_core::AnalysisResult;
use analyser_logging::{analyser_debug, analyser_warn};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use url::Url;

use crate::{AnalysisRequest, FailureKind, SubmitError};

/// Alert text when a failed response carries no usable `error` field.
pub const SERVER_FAILURE: &str = "An error occurred during analysis.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitSettings {
    pub base_url: String,
    pub analyze_path: String,
    pub resume_field: String,
    pub job_description_field: String,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            analyze_path: "/api/analyze".to_string(),
            resume_field: "resume".to_string(),
            job_description_field: "job_description".to_string(),
        }
    }
}

impl SubmitSettings {
    pub fn endpoint(&self) -> Result<Url, SubmitError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(&self.analyze_path))
            .map_err(|err| SubmitError::new(FailureKind::InvalidEndpoint, err.to_string()))
    }
}

#[async_trait::async_trait]
pub trait AnalysisClient: Send + Sync {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestAnalysisClient {
    settings: SubmitSettings,
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestAnalysisClient {
    pub fn new(settings: SubmitSettings) -> Result<Self, SubmitError> {
        let endpoint = settings.endpoint()?;
        // No timeout: the request runs until the HTTP stack gives up.
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            endpoint,
            client,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn build_form(&self, request: AnalysisRequest) -> Result<Form, SubmitError> {
        let resume = Part::bytes(request.content.to_vec())
            .file_name(request.file_name)
            .mime_str(&request.mime_type)
            .map_err(|err| SubmitError::new(FailureKind::InvalidFile, err.to_string()))?;
        Ok(Form::new()
            .part(self.settings.resume_field.clone(), resume)
            .text(
                self.settings.job_description_field.clone(),
                request.job_description,
            ))
    }
}

#[async_trait::async_trait]
impl AnalysisClient for ReqwestAnalysisClient {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, SubmitError> {
        analyser_debug!("POST {} {:?}", self.endpoint, request);
        let form = self.build_form(request)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let message = server_error_message(&body);
            analyser_warn!("analysis failed with {}: {}", status, message);
            return Err(SubmitError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        serde_json::from_slice(&body)
            .map_err(|err| SubmitError::new(FailureKind::Decode, err.to_string()))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// The `error` field of a failure body, or the generic message.
fn server_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.error)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| SERVER_FAILURE.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    SubmitError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_path_onto_base() {
        let settings = SubmitSettings {
            base_url: "https://analyser.example.com/app/".to_string(),
            ..SubmitSettings::default()
        };
        assert_eq!(
            settings.endpoint().unwrap().as_str(),
            "https://analyser.example.com/api/analyze"
        );
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let settings = SubmitSettings {
            base_url: "not a url".to_string(),
            ..SubmitSettings::default()
        };
        let err = ReqwestAnalysisClient::new(settings).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidEndpoint);
    }

    #[test]
    fn error_body_message_falls_back() {
        assert_eq!(server_error_message(br#"{"error":"Unsupported file"}"#), "Unsupported file");
        assert_eq!(server_error_message(br#"{"error":""}"#), SERVER_FAILURE);
        assert_eq!(server_error_message(br#"{"detail":"nope"}"#), SERVER_FAILURE);
        assert_eq!(server_error_message(br#"{"error":42}"#), SERVER_FAILURE);
        assert_eq!(server_error_message(b"<html>502</html>"), SERVER_FAILURE);
    }
}
