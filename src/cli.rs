use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::constants::*;

/// Every input is also read from the `INPUT_*` variable the Actions runner sets.
#[derive(Parser, Debug, Default)]
#[command(
    name = "scan-relay",
    version,
    about = "Relay security scan results to the analysis API and publish updated instructions"
)]
pub struct Cli {
    #[arg(long, env = "INPUT_SCAN_RESULTS_PATH", help = "Path to the JSON scan results")]
    pub scan_results_path: Option<String>,
    #[arg(
        long,
        env = "INPUT_INSTRUCTION_FILE_PATH",
        help = "Instruction file, or a directory holding one markdown file"
    )]
    pub instruction_file_path: Option<String>,
    #[arg(long, env = "INPUT_SCANNER_TYPE", help = "Scanner identifier sent as X-Scanner-Type")]
    pub scanner_type: Option<String>,
    #[arg(long, env = "INPUT_API_URL", help = "API base URL; /scan is appended")]
    pub api_url: Option<String>,
    #[arg(long, env = "INPUT_API_KEY", hide_env_values = true, help = "API key sent as X-API-Key")]
    pub api_key: Option<String>,
    #[arg(
        long,
        env = "INPUT_AUTO_COMMIT",
        help = "Write and push updated instructions unless set to \"false\""
    )]
    pub auto_commit: Option<String>,
    #[arg(long, env = "GITHUB_EVENT_PATH", help = "Triggering event payload (JSON)")]
    pub event_path: Option<PathBuf>,
    #[arg(long, env = "GITHUB_OUTPUT", help = "File that receives step outputs")]
    pub output_file: Option<PathBuf>,
}

impl Cli {
    /// Inputs keyed by their action input name.
    pub fn inputs(&self) -> BTreeMap<String, String> {
        [
            (INPUT_SCAN_RESULTS_PATH, &self.scan_results_path),
            (INPUT_INSTRUCTION_FILE_PATH, &self.instruction_file_path),
            (INPUT_SCANNER_TYPE, &self.scanner_type),
            (INPUT_API_URL, &self.api_url),
            (INPUT_API_KEY, &self.api_key),
            (INPUT_AUTO_COMMIT, &self.auto_commit),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.clone().map(|v| (name.to_string(), v)))
        .collect()
    }
}
