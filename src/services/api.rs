use crate::domain::constants::{HEADER_API_KEY, HEADER_SCANNER_TYPE, SCAN_ENDPOINT};
use crate::domain::errors::RelayError;
use crate::domain::models::{ScanRequest, ScanResponse};
use reqwest::header::CONTENT_TYPE;

/// Client for the analysis API. One request per run, no timeout and no retry.
pub struct ScanClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

impl ScanClient {
    pub fn new(api_url: &str) -> Result<Self, RelayError> {
        let endpoint = format!("{}{}", api_url, SCAN_ENDPOINT);
        let http = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(|source| RelayError::Request {
                url: endpoint.clone(),
                source,
            })?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn submit(
        &self,
        request: &ScanRequest<'_>,
        scanner_type: &str,
        api_key: &str,
    ) -> Result<ScanResponse, RelayError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(HEADER_SCANNER_TYPE, scanner_type)
            .header(HEADER_API_KEY, api_key)
            .json(request)
            .send()
            .map_err(|source| self.transport(source))?;

        let status = resp.status().as_u16();
        let body = resp.text().map_err(|source| self.transport(source))?;
        tracing::info!("API returned HTTP {}", status);

        parse_response(status, &body)
    }

    fn transport(&self, source: reqwest::Error) -> RelayError {
        RelayError::Request {
            url: self.endpoint.clone(),
            source,
        }
    }
}

/// Applies the status, decode and logical-error checks in that order.
pub fn parse_response(status: u16, body: &str) -> Result<ScanResponse, RelayError> {
    if status != 200 {
        return Err(RelayError::HttpStatus {
            status,
            body: body.to_string(),
        });
    }
    let parsed = serde_json::from_str(body)
        .map_err(|e| RelayError::InvalidResponse(e.to_string()))?;
    let response = ScanResponse {
        raw: body.to_string(),
        body: parsed,
    };
    if let Some(err) = response.error() {
        return Err(RelayError::Api(err));
    }
    Ok(response)
}
