use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use mockito::{Mock, Server, ServerGuard};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const RUNNER_VARS: &[&str] = &[
    "INPUT_SCAN_RESULTS_PATH",
    "INPUT_INSTRUCTION_FILE_PATH",
    "INPUT_SCANNER_TYPE",
    "INPUT_API_URL",
    "INPUT_API_KEY",
    "INPUT_AUTO_COMMIT",
    "GITHUB_EVENT_PATH",
    "GITHUB_OUTPUT",
    "GITHUB_WORKSPACE",
    "RUNNER_DEBUG",
    "SCAN_RELAY_LOG",
];

pub struct TestEnv {
    _tmp: TempDir,
    pub workspace: PathBuf,
    pub scan_results: PathBuf,
    pub instructions: PathBuf,
    pub output_file: PathBuf,
    pub server: ServerGuard,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let workspace = tmp.path().join("workspace");
        fs::create_dir_all(workspace.join(".guardrails")).expect("create workspace");

        let scan_results = workspace.join("semgrep.json");
        fs::write(
            &scan_results,
            serde_json::json!({
                "results": [
                    {"check_id": "python.lang.security.audit.eval", "path": "app.py", "start": {"line": 4}}
                ],
                "errors": []
            })
            .to_string(),
        )
        .expect("write scan results");

        let instructions = workspace.join(".guardrails/AGENTS.md");
        fs::write(&instructions, "# Agent rules\n\n- never call eval\n").expect("write instructions");

        let output_file = tmp.path().join("github_output");

        Self {
            _tmp: tmp,
            workspace,
            scan_results,
            instructions,
            output_file,
            server: Server::new(),
        }
    }

    /// Command with a clean runner environment and every required input set.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("scan-relay");
        for var in RUNNER_VARS {
            cmd.env_remove(var);
        }
        cmd.env("INPUT_SCAN_RESULTS_PATH", &self.scan_results)
            .env("INPUT_INSTRUCTION_FILE_PATH", &self.instructions)
            .env("INPUT_SCANNER_TYPE", "semgrep")
            .env("INPUT_API_URL", self.server.url())
            .env("INPUT_API_KEY", "secret-key")
            .env("GITHUB_OUTPUT", &self.output_file);
        cmd
    }

    pub fn respond(&mut self, status: usize, body: &str) -> Mock {
        self.server
            .mock("POST", "/scan")
            .match_header("x-scanner-type", "semgrep")
            .match_header("x-api-key", "secret-key")
            .with_status(status)
            .with_body(body)
            .create()
    }

    pub fn instructions_text(&self) -> String {
        fs::read_to_string(&self.instructions).expect("read instructions")
    }

    /// Parses the `name<<DELIM ... DELIM` entries of the output file.
    pub fn outputs(&self) -> BTreeMap<String, String> {
        let raw = fs::read_to_string(&self.output_file).unwrap_or_default();
        let mut out = BTreeMap::new();
        let mut lines = raw.lines();
        while let Some(header) = lines.next() {
            let Some((name, delim)) = header.split_once("<<") else {
                continue;
            };
            let mut value = Vec::new();
            for line in lines.by_ref() {
                if line == delim {
                    break;
                }
                value.push(line);
            }
            out.insert(name.to_string(), value.join("\n"));
        }
        out
    }
}
