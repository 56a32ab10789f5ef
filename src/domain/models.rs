use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Validated configuration for a single relay run.
#[derive(Debug, Clone)]
pub struct RelayInputs {
    pub scan_results_path: PathBuf,
    pub instruction_path: PathBuf,
    pub scanner_type: String,
    pub api_url: String,
    pub api_key: String,
    pub auto_commit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionDocument {
    /// Resolved file path; a directory input has already been narrowed to one entry.
    pub path: PathBuf,
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ScanRequest<'a> {
    pub scan_results: &'a Value,
    pub instructions: InstructionsPayload<'a>,
}

#[derive(Debug, Serialize)]
pub struct InstructionsPayload<'a> {
    pub filename: &'a str,
    pub content: &'a str,
}

impl<'a> ScanRequest<'a> {
    pub fn new(scan_results: &'a Value, doc: &'a InstructionDocument) -> Self {
        Self {
            scan_results,
            instructions: InstructionsPayload {
                filename: &doc.filename,
                content: &doc.content,
            },
        }
    }
}

/// Parsed API response. Only `error` and `updated_instructions` are read;
/// everything else is carried through as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResponse {
    /// Body text exactly as the API sent it.
    pub raw: String,
    pub body: Value,
}

impl ScanResponse {
    /// The `error` field when it signals a failure. Empty strings, `false`,
    /// zero and `null` do not.
    pub fn error(&self) -> Option<String> {
        match self.body.get("error")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }

    /// Replacement instruction content; an empty string counts as absent.
    pub fn updated_instructions(&self) -> Option<&str> {
        self.body
            .get("updated_instructions")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }
}

/// Pull-request details from the triggering event, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerMetadata {
    pub pr_number: Option<u64>,
    pub head_ref: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct EventPayload {
    #[serde(default)]
    pub pull_request: Option<PullRequestEvent>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestEvent {
    pub number: Option<u64>,
    #[serde(default)]
    pub head: Option<PullRequestHead>,
}

#[derive(Debug, Deserialize)]
pub struct PullRequestHead {
    #[serde(rename = "ref")]
    pub git_ref: Option<String>,
}

impl From<EventPayload> for TriggerMetadata {
    fn from(event: EventPayload) -> Self {
        match event.pull_request {
            Some(pr) => TriggerMetadata {
                pr_number: pr.number,
                head_ref: pr.head.and_then(|h| h.git_ref).filter(|r| !r.is_empty()),
            },
            None => TriggerMetadata::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published { branch: String },
    NoChange,
}

/// Values emitted by a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayReport {
    pub api_response: String,
    pub instruction_file: PathBuf,
    pub updated_instructions: Option<String>,
    pub publish: Option<PublishOutcome>,
}
