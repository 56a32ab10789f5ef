//! Execution context: how the relay talks to the host runner.

use crate::domain::models::{EventPayload, TriggerMetadata};
use crate::services::output;
use std::cell::Cell;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

pub trait ActionContext {
    /// Trimmed input value; `None` when unset.
    fn get_input(&self, name: &str) -> Option<String>;
    fn info(&self, msg: &str);
    fn set_output(&self, name: &str, value: &str) -> anyhow::Result<()>;
    /// Masks `value` in any later log output.
    fn set_secret(&self, value: &str);
    fn set_failed(&self, message: &str);
    fn trigger(&self) -> &TriggerMetadata;
}

/// Context backed by the GitHub Actions runner conventions.
pub struct RunnerContext {
    inputs: BTreeMap<String, String>,
    output_file: Option<PathBuf>,
    delimiter: String,
    trigger: TriggerMetadata,
    failed: Cell<bool>,
}

impl RunnerContext {
    pub fn new(
        inputs: BTreeMap<String, String>,
        output_file: Option<PathBuf>,
        event_path: Option<&Path>,
    ) -> Self {
        let trigger = event_path.map(load_trigger).unwrap_or_default();
        Self {
            inputs,
            output_file,
            delimiter: output::new_delimiter(),
            trigger,
            failed: Cell::new(false),
        }
    }

    pub fn failed(&self) -> bool {
        self.failed.get()
    }
}

impl ActionContext for RunnerContext {
    fn get_input(&self, name: &str) -> Option<String> {
        self.inputs.get(name).map(|v| v.trim().to_string())
    }

    fn info(&self, msg: &str) {
        tracing::info!("{}", msg);
    }

    fn set_output(&self, name: &str, value: &str) -> anyhow::Result<()> {
        match &self.output_file {
            Some(path) => {
                let entry = output::file_entry(name, value, &self.delimiter)?;
                let mut f = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?;
                f.write_all(entry.as_bytes())?;
            }
            None => println!("{}", output::command("set-output", &[("name", name)], value)),
        }
        Ok(())
    }

    fn set_secret(&self, value: &str) {
        if !value.is_empty() {
            println!("{}", output::command("add-mask", &[], value));
        }
    }

    fn set_failed(&self, message: &str) {
        self.failed.set(true);
        println!("{}", output::command("error", &[], message));
    }

    fn trigger(&self) -> &TriggerMetadata {
        &self.trigger
    }
}

/// Reads PR details from the event payload. Missing or malformed payloads
/// mean "no metadata".
pub fn load_trigger(path: &Path) -> TriggerMetadata {
    if !path.exists() {
        tracing::warn!("event payload {} does not exist", path.display());
        return TriggerMetadata::default();
    }
    let parsed = std::fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|raw| Ok(serde_json::from_str::<EventPayload>(&raw)?));
    match parsed {
        Ok(event) => event.into(),
        Err(e) => {
            tracing::warn!("ignoring unreadable event payload {}: {}", path.display(), e);
            TriggerMetadata::default()
        }
    }
}
