//! Batch test runner
//!
//! Runs every test file of every file set in its own Vim process, one after
//! another, and reads each file's result document.

use std::path::Path;
use tracing::{debug, info, warn};

use super::error::BatchError;
use super::properties::Properties;
use crate::config::RunConfig;
use crate::models::{BatchReport, TestOutcome, Variable};
use crate::resources::{absolute, vim_path, RunnerScript};
use crate::results::{read_summary_file, result_file_path};
use crate::vim::{ProcessResult, VimCommand, VimRunner};

/// Variable the runner script reads its output directory from
pub const OUTPUT_DIR_VAR: &str = "g:VUnitOutputDir";

/// Something that can run a Vim command to completion
#[allow(async_fn_in_trait)]
pub trait Launcher {
    async fn launch(&self, command: &VimCommand) -> ProcessResult;
}

impl Launcher for VimRunner {
    async fn launch(&self, command: &VimCommand) -> ProcessResult {
        self.execute(command).await
    }
}

/// Failure bookkeeping threaded through the per-file loop
#[derive(Debug, Default)]
pub struct BatchState {
    outcomes: Vec<TestOutcome>,
    failed: bool,
    flagged: bool,
}

impl BatchState {
    /// Record an outcome, returning whether it failed
    pub fn record(&mut self, outcome: TestOutcome) -> bool {
        let failed = outcome.is_failure();
        self.failed |= failed;
        self.outcomes.push(outcome);
        failed
    }

    /// True exactly once, the first time it is asked after a failure
    pub fn take_flag(&mut self) -> bool {
        if self.failed && !self.flagged {
            self.flagged = true;
            return true;
        }
        false
    }

    pub fn into_report(self) -> BatchReport {
        BatchReport {
            outcomes: self.outcomes,
            failed: self.failed,
        }
    }
}

/// The per-test entry command run after the runner script is sourced
pub fn test_entry(basedir: &str, file: &str) -> String {
    format!("silent! call vunit#TestRunner('{basedir}', '{file}')")
}

/// Runs a configured batch through a launcher
pub struct BatchRunner<L> {
    config: RunConfig,
    launcher: L,
}

impl<L: Launcher> BatchRunner<L> {
    pub fn new(config: RunConfig, launcher: L) -> Self {
        Self { config, launcher }
    }

    /// Run every test file, stopping at the first fatal condition
    ///
    /// The failure property, when configured, is defined in `properties`
    /// unless the host already defined it.
    pub async fn run(&self, properties: &mut Properties) -> Result<BatchReport, BatchError> {
        let todir = absolute(self.config.validate()?);
        let script = RunnerScript::extract(self.config.runner_script.as_deref())?;
        let script_path = script.vim_path();

        info!(
            "Running {} test file(s) from {} file set(s)",
            self.config.file_count(),
            self.config.filesets.len()
        );

        let mut state = BatchState::default();

        for set in &self.config.filesets {
            if set.is_empty() {
                debug!("Skipping empty file set {}", set.basedir.display());
                continue;
            }
            let basedir = vim_path(&absolute(&set.basedir));

            for file in &set.includes {
                let file = file.replace('\\', "/");
                info!("Running: {}", file);

                let command = self.test_command(&todir, &script_path, &basedir, &file);
                let result = self.launcher.launch(&command).await;

                let stdout = result.stdout.trim();
                if !stdout.is_empty() {
                    info!("{}", stdout);
                }

                if !result.success() {
                    return Err(BatchError::ProcessFailed {
                        file,
                        code: result.exit_code,
                        message: result.stderr.trim().to_string(),
                    });
                }

                let result_file = result_file_path(&todir, &file);
                debug!("Reading results from {}", result_file.display());
                let summary = read_summary_file(&result_file).map_err(|source| {
                    BatchError::Results {
                        file: file.clone(),
                        source,
                    }
                })?;

                info!("{}", summary);
                if summary.is_failure() {
                    warn!("Test {} FAILED", summary.name);
                }

                if state.record(TestOutcome::new(file.clone(), summary)) {
                    self.flag_failure(&mut state, properties);

                    if self.config.halt_on_failure {
                        return Err(BatchError::TestFailed(file));
                    }
                }
            }
        }

        Ok(state.into_report())
    }

    /// Build the Vim command running one test file
    pub fn test_command(
        &self,
        todir: &Path,
        script_path: &str,
        basedir: &str,
        file: &str,
    ) -> VimCommand {
        let mut variables = vec![Variable::new(OUTPUT_DIR_VAR, vim_path(todir))];
        variables.extend(self.config.variables.iter().cloned());

        let command = VimCommand::new(self.config.vim.as_str())
            .variables(variables)
            .paths(self.config.paths.iter().cloned())
            .plugins(self.config.plugins.iter().cloned());

        self.config
            .pre_commands
            .iter()
            .fold(command, |command, cmd| command.pre_command(cmd.as_str()))
            .command(format!("source {script_path}"))
            .command(test_entry(basedir, file))
    }

    fn flag_failure(&self, state: &mut BatchState, properties: &mut Properties) {
        if !state.take_flag() {
            return;
        }

        if let Some(name) = &self.config.failure_property {
            if properties.set_new(name, "true") {
                debug!("Set failure property {}", name);
            } else {
                debug!("Failure property {} already defined, leaving it", name);
            }
        }
    }
}
