//! ScanRelay: load inputs, exchange with the API, emit outputs, write back.

use crate::domain::constants::*;
use crate::domain::errors::RelayError;
use crate::domain::models::{
    PublishOutcome, RelayInputs, RelayReport, ScanRequest, TriggerMetadata,
};
use crate::services::api::ScanClient;
use crate::services::context::ActionContext;
use crate::services::instructions::{
    load_instruction_document, load_scan_results, resolve_instruction_path, write_instructions,
};
use crate::services::publisher::Publisher;
use std::path::PathBuf;

fn required(ctx: &dyn ActionContext, name: &'static str) -> Result<String, RelayError> {
    ctx.get_input(name)
        .filter(|v| !v.is_empty())
        .ok_or(RelayError::MissingInput(name))
}

pub fn read_inputs(ctx: &dyn ActionContext) -> Result<RelayInputs, RelayError> {
    let inputs = RelayInputs {
        scan_results_path: PathBuf::from(required(ctx, INPUT_SCAN_RESULTS_PATH)?),
        instruction_path: PathBuf::from(required(ctx, INPUT_INSTRUCTION_FILE_PATH)?),
        scanner_type: required(ctx, INPUT_SCANNER_TYPE)?,
        api_url: required(ctx, INPUT_API_URL)?,
        api_key: required(ctx, INPUT_API_KEY)?,
        auto_commit: ctx.get_input(INPUT_AUTO_COMMIT).as_deref() != Some("false"),
    };
    ctx.set_secret(&inputs.api_key);
    Ok(inputs)
}

pub fn commit_message(trigger: &TriggerMetadata) -> String {
    match trigger.pr_number {
        Some(n) => format!(
            "{}\n\nUpdated based on security scan results from PR #{}",
            COMMIT_SUBJECT, n
        ),
        None => COMMIT_SUBJECT.to_string(),
    }
}

fn emit(ctx: &dyn ActionContext, name: &str, value: &str) -> Result<(), RelayError> {
    ctx.set_output(name, value).map_err(|e| RelayError::Output {
        name: name.to_string(),
        reason: e.to_string(),
    })
}

pub fn run(ctx: &dyn ActionContext, publisher: &dyn Publisher) -> Result<RelayReport, RelayError> {
    let inputs = read_inputs(ctx)?;
    ctx.info(&format!(
        "Processing scan results with scanner type: {}",
        inputs.scanner_type
    ));

    ctx.info(&format!(
        "Reading scan results from: {}",
        inputs.scan_results_path.display()
    ));
    let scan_results = load_scan_results(&inputs.scan_results_path)?;

    if inputs.instruction_path.is_dir() {
        ctx.info(&format!(
            "Searching for instruction file in directory: {}",
            inputs.instruction_path.display()
        ));
    }
    let instruction_file = resolve_instruction_path(&inputs.instruction_path)?;
    ctx.info(&format!(
        "Reading instruction file: {}",
        instruction_file.display()
    ));
    let doc = load_instruction_document(&instruction_file)?;

    let client = ScanClient::new(&inputs.api_url)?;
    ctx.info(&format!("Calling Guardrails API at {}", client.endpoint()));
    let response = client.submit(
        &ScanRequest::new(&scan_results, &doc),
        &inputs.scanner_type,
        &inputs.api_key,
    )?;
    ctx.info("API call successful");

    let api_response = response.raw().to_string();
    emit(ctx, OUTPUT_API_RESPONSE, &api_response)?;
    emit(ctx, OUTPUT_INSTRUCTION_FILE, &doc.path.to_string_lossy())?;

    let mut report = RelayReport {
        api_response,
        instruction_file: doc.path.clone(),
        updated_instructions: None,
        publish: None,
    };

    let Some(updated) = response.updated_instructions() else {
        return Ok(report);
    };
    emit(ctx, OUTPUT_UPDATED_INSTRUCTIONS, updated)?;
    ctx.info("Updated instructions received from API");
    report.updated_instructions = Some(updated.to_string());

    if !inputs.auto_commit {
        return Ok(report);
    }

    ctx.info("Auto-commit enabled, writing and committing updated instructions");
    write_instructions(&doc.path, updated)?;
    ctx.info(&format!(
        "Updated instructions written to: {}",
        doc.path.display()
    ));

    let trigger = ctx.trigger();
    let outcome = publisher.publish(
        &doc.path,
        &commit_message(trigger),
        trigger.head_ref.as_deref(),
    )?;
    match &outcome {
        PublishOutcome::Published { branch } => {
            ctx.info("Changes committed");
            ctx.info(&format!("Changes pushed to branch: {}", branch));
        }
        PublishOutcome::NoChange => ctx.info("No changes to commit"),
    }
    report.publish = Some(outcome);
    Ok(report)
}

/// Runs the relay and routes any failure to the context's failure channel.
pub fn execute(ctx: &dyn ActionContext, publisher: &dyn Publisher) -> Option<RelayReport> {
    match run(ctx, publisher) {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::debug!("relay failed: {:?}", e);
            ctx.set_failed(&e.to_string());
            None
        }
    }
}
