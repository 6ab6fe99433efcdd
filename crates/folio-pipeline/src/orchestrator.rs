//! Compile → patch → bundle orchestration.

use std::fs;
use std::path::PathBuf;

use folio_patch::{ArtifactPatcher, PatchConfig, PatchReport};

use crate::process::{run_command, CommandSpec, StepStatus};
use crate::PipelineError;

/// Policies that change how failures are handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildPolicy {
    /// Retry a failed compile exactly once
    pub retry_compile: bool,

    /// Continue to the bundler when the compile still fails after patching
    pub force_success: bool,

    /// Remove generated and cache directories before compiling
    pub clean: bool,

    /// Stop after compile and patch without running the bundler
    pub skip_bundle: bool,
}

impl Default for BuildPolicy {
    fn default() -> Self {
        Self {
            retry_compile: true,
            force_success: false,
            clean: false,
            skip_bundle: false,
        }
    }
}

/// Configuration for a full build.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content compiler argv
    pub compiler: Vec<String>,

    /// Site bundler argv
    pub bundler: Vec<String>,

    /// Flags appended to NODE_OPTIONS for both children
    pub node_options: Vec<String>,

    /// Directories patched after each compile (generated output, cache)
    pub patch_roots: Vec<PathBuf>,

    pub patch: PatchConfig,

    pub policy: BuildPolicy,
}

impl Default for BuildConfig {
    fn default() -> Self {
        let node_flags = vec![
            "--experimental-json-modules".to_string(),
            "--no-warnings".to_string(),
        ];
        let node_command = |bin: &str| {
            let mut argv = vec!["node".to_string()];
            argv.extend(node_flags.iter().cloned());
            argv.push(bin.to_string());
            argv.push("build".to_string());
            argv
        };

        Self {
            compiler: node_command("./node_modules/.bin/contentlayer"),
            bundler: node_command("./node_modules/.bin/next"),
            node_options: node_flags.clone(),
            patch_roots: vec![
                PathBuf::from(".contentlayer/generated"),
                PathBuf::from(".contentlayer/.cache"),
            ],
            patch: PatchConfig::default(),
            policy: BuildPolicy::default(),
        }
    }
}

/// What a build run did.
#[derive(Debug)]
pub struct BuildOutcome {
    /// Number of compile runs (1, or 2 after a retry)
    pub compile_attempts: u32,

    /// Status of the last compile run
    pub compile_status: StepStatus,

    /// One report per patch pass
    pub patch_reports: Vec<PatchReport>,

    /// Bundler status, if the bundler ran
    pub bundle_status: Option<StepStatus>,

    /// Exit code the process should finish with
    pub exit_code: i32,
}

impl BuildOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs the build steps in order.
pub struct Orchestrator {
    config: BuildConfig,
    patcher: ArtifactPatcher,
}

impl Orchestrator {
    /// Create a new orchestrator.
    pub fn new(config: BuildConfig) -> Self {
        let patcher = ArtifactPatcher::new(config.patch.clone());
        Self { config, patcher }
    }

    /// Run clean (optional), compile, patch, retry (optional), and bundle.
    ///
    /// The patcher runs after every compile attempt whatever its exit code.
    /// Errors are returned only
    /// for misconfiguration, a failed clean, or a bundler that cannot start;
    /// process failures are reported through [`BuildOutcome::exit_code`].
    pub async fn run(&self) -> Result<BuildOutcome, PipelineError> {
        let compiler = CommandSpec::from_argv("compile", &self.config.compiler)?;
        let bundler = CommandSpec::from_argv("bundle", &self.config.bundler)?;
        let policy = &self.config.policy;

        if policy.clean {
            self.clean()?;
        }

        let mut patch_reports = Vec::new();
        let mut compile_attempts = 1;
        let mut compile_status = run_command(&compiler, &self.config.node_options).await;
        patch_reports.push(self.patch());

        if !compile_status.success() && policy.retry_compile {
            tracing::warn!(
                "Compile failed with code {}, retrying once",
                compile_status.code()
            );
            compile_attempts += 1;
            compile_status = run_command(&compiler, &self.config.node_options).await;
            patch_reports.push(self.patch());
        }

        let mut outcome = BuildOutcome {
            compile_attempts,
            compile_status,
            patch_reports,
            bundle_status: None,
            exit_code: 0,
        };

        if !outcome.compile_status.success() {
            if !policy.force_success {
                tracing::error!(
                    "Compile failed after {} attempt(s), not bundling",
                    outcome.compile_attempts
                );
                outcome.exit_code = outcome.compile_status.code();
                return Ok(outcome);
            }
            tracing::warn!(
                "Compile failed with code {}; continuing because force_success is enabled",
                outcome.compile_status.code()
            );
        }

        if policy.skip_bundle {
            tracing::info!("Skipping bundle step");
            return Ok(outcome);
        }

        let bundle_status = run_command(&bundler, &self.config.node_options).await;
        if let StepStatus::NotStarted(message) = &bundle_status {
            return Err(PipelineError::Spawn {
                program: bundler.program.clone(),
                message: message.clone(),
            });
        }

        outcome.exit_code = bundle_status.code();
        outcome.bundle_status = Some(bundle_status);
        Ok(outcome)
    }

    /// Patch every configured root.
    pub fn patch(&self) -> PatchReport {
        tracing::info!("Applying import attribute fixes...");
        self.patcher.patch_roots(&self.config.patch_roots)
    }

    /// Remove the generated and cache directories.
    pub fn clean(&self) -> Result<(), PipelineError> {
        for root in &self.config.patch_roots {
            if !root.exists() {
                tracing::debug!("{} not found, nothing to clean", root.display());
                continue;
            }
            tracing::info!("Cleaning {}", root.display());
            fs::remove_dir_all(root).map_err(|e| PipelineError::Clean {
                path: root.clone(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}
