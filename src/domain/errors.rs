use std::path::PathBuf;

/// Every way a relay run can fail. All variants are fatal.
#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    #[error("Input required and not supplied: {0}")]
    MissingInput(&'static str),
    #[error("Failed to read or parse scan results from {path}: {reason}")]
    ScanResultsRead { path: PathBuf, reason: String },
    #[error("Failed to inspect instruction path {path}: {source}")]
    InstructionLookup {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("No markdown file found in directory: {dir}")]
    NoInstructionFile { dir: PathBuf },
    #[error("Failed to read instruction file {path}: {source}")]
    InstructionRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write updated instructions to {path}: {source}")]
    InstructionWrite {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("API request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },
    #[error("API call failed with HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("Invalid JSON response from API: {0}")]
    InvalidResponse(String),
    #[error("API returned error: {0}")]
    Api(String),
    #[error("Failed to set output {name}: {reason}")]
    Output { name: String, reason: String },
    #[error(transparent)]
    Publish(#[from] PublishError),
}

#[derive(thiserror::Error, Debug)]
pub enum PublishError {
    #[error("failed to run git {step}: {source}")]
    Spawn {
        step: String,
        source: std::io::Error,
    },
    #[error("git {step} failed with exit code {code}: {stderr}")]
    Command {
        step: String,
        code: i32,
        stderr: String,
    },
    #[error("could not determine the branch to push to")]
    UnknownBranch,
}
