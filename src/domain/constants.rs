pub const INPUT_SCAN_RESULTS_PATH: &str = "scan_results_path";
pub const INPUT_INSTRUCTION_FILE_PATH: &str = "instruction_file_path";
pub const INPUT_SCANNER_TYPE: &str = "scanner_type";
pub const INPUT_API_URL: &str = "api_url";
pub const INPUT_API_KEY: &str = "api_key";
pub const INPUT_AUTO_COMMIT: &str = "auto_commit";

pub const OUTPUT_API_RESPONSE: &str = "api_response";
pub const OUTPUT_INSTRUCTION_FILE: &str = "instruction_file";
pub const OUTPUT_UPDATED_INSTRUCTIONS: &str = "updated_instructions";

pub const SCAN_ENDPOINT: &str = "/scan";
pub const HEADER_SCANNER_TYPE: &str = "X-Scanner-Type";
pub const HEADER_API_KEY: &str = "X-API-Key";

pub const BOT_EMAIL: &str = "41898282+github-actions[bot]@users.noreply.github.com";
pub const BOT_NAME: &str = "github-actions[bot]";
pub const PUSH_REMOTE: &str = "origin";

pub const COMMIT_SUBJECT: &str = "Update instructions via Guardrails scan";
