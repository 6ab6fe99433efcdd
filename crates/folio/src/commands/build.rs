//! Full build command.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use folio_patch::PatchReport;
use folio_pipeline::Orchestrator;

use crate::config::load_config;

/// Command-line switches layered over the config file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub force_success: bool,
    pub no_retry: bool,
    pub clean: bool,
    pub skip_bundle: bool,
}

/// Run the build command. The process exits with the pipeline's exit code.
pub async fn run(config_path: &Path, overrides: Overrides) -> Result<ExitCode> {
    tracing::info!("Building site...");

    let file_config = load_config(config_path)?;
    let mut config = file_config.build_config();

    if overrides.force_success {
        config.policy.force_success = true;
    }
    if overrides.no_retry {
        config.policy.retry_compile = false;
    }
    if overrides.clean {
        config.policy.clean = true;
    }
    config.policy.skip_bundle = overrides.skip_bundle;

    let outcome = Orchestrator::new(config).run().await?;

    let patched = merge_reports(&outcome.patch_reports);

    if outcome.success() {
        tracing::info!(
            "Build succeeded after {} compile attempt(s), {} import attributes fixed in {} files",
            outcome.compile_attempts,
            patched.replacements(),
            patched.modified()
        );
    } else {
        tracing::error!(
            "Build failed with code {} after {} compile attempt(s)",
            outcome.exit_code,
            outcome.compile_attempts
        );
    }

    Ok(ExitCode::from(exit_byte(outcome.exit_code)))
}

/// Combine the reports of every patch pass.
fn merge_reports(reports: &[PatchReport]) -> PatchReport {
    let mut merged = PatchReport::default();
    for report in reports {
        merged.merge(report.clone());
    }
    merged
}

/// Map a child exit code onto a process exit status; out of range is 1.
fn exit_byte(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}
