//! Vim process supervision
//!
//! Spawns one editor process, drains both output streams while waiting for
//! it to exit and reports exit code plus captured text.

use serde::{Deserialize, Serialize};
use std::process::Stdio;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use super::command::VimCommand;
use super::shell::{platform_shell, ShellWrapper};
use crate::utils::timer::Timer;

/// Exit code reported when the process could not be run at all
pub const SPAWN_FAILURE_CODE: i32 = 12;

/// How long to wait for each output drain once the process has exited
pub const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Exit code and captured output of one invocation
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessResult {
    pub fn spawn_failure(message: impl Into<String>) -> Self {
        Self {
            exit_code: SPAWN_FAILURE_CODE,
            stdout: String::new(),
            stderr: message.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Handle for terminating whatever process the runner currently supervises
#[derive(Clone, Debug, Default)]
pub struct KillSwitch {
    notify: Arc<Notify>,
}

impl KillSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request termination of the in-flight process, if any
    pub fn kill(&self) {
        self.notify.notify_waiters();
    }
}

/// Runs Vim invocations through a shell wrapper
pub struct VimRunner {
    shell: Box<dyn ShellWrapper>,
    drain_timeout: Duration,
    kill: KillSwitch,
}

impl Default for VimRunner {
    fn default() -> Self {
        Self::new(platform_shell())
    }
}

impl VimRunner {
    pub fn new(shell: Box<dyn ShellWrapper>) -> Self {
        Self {
            shell,
            drain_timeout: DRAIN_TIMEOUT,
            kill: KillSwitch::new(),
        }
    }

    #[allow(dead_code)]
    pub fn with_drain_timeout(mut self, timeout: Duration) -> Self {
        self.drain_timeout = timeout;
        self
    }

    pub fn kill_switch(&self) -> KillSwitch {
        self.kill.clone()
    }

    /// Best-effort termination of the running process
    #[allow(dead_code)]
    pub fn destroy(&self) {
        self.kill.kill();
    }

    /// Full argv for a command under this runner's shell
    pub fn argv(&self, command: &VimCommand) -> Vec<String> {
        command.build(self.shell.as_ref())
    }

    /// Run a Vim command to completion
    pub async fn execute(&self, command: &VimCommand) -> ProcessResult {
        let argv = self.argv(command);
        debug!("vunit ({}): {:?}", self.shell.name(), argv);
        self.run(&argv).await
    }

    /// Run an argv to completion, never failing
    ///
    /// Spawn and wait errors are logged and reported as
    /// [`SPAWN_FAILURE_CODE`] with the error text in `stderr`.
    pub async fn run(&self, argv: &[String]) -> ProcessResult {
        let timer = Timer::start(argv.first().map(String::as_str).unwrap_or("<empty>"));

        let result = match self.try_run(argv).await {
            Ok(result) => result,
            Err(e) => {
                error!("Failed to run command {:?}: {}", argv, e);
                ProcessResult::spawn_failure(e.to_string())
            }
        };

        timer.stop();
        result
    }

    async fn try_run(&self, argv: &[String]) -> std::io::Result<ProcessResult> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command line")
        })?;

        let killed = self.kill.notify.notified();
        tokio::pin!(killed);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdout = Arc::new(Mutex::new(Vec::new()));
        let stderr = Arc::new(Mutex::new(Vec::new()));

        let out_task = child
            .stdout
            .take()
            .map(|stream| tokio::spawn(drain(stream, stdout.clone())));
        let err_task = child
            .stderr
            .take()
            .map(|stream| tokio::spawn(drain(stream, stderr.clone())));

        let status = tokio::select! {
            status = child.wait() => status?,
            _ = &mut killed => {
                warn!("Terminating {} (pid {:?})", program, child.id());
                if let Err(e) = child.start_kill() {
                    debug!("Kill failed: {}", e);
                }
                child.wait().await?
            }
        };

        join_drain(out_task, self.drain_timeout, "stdout").await;
        join_drain(err_task, self.drain_timeout, "stderr").await;

        Ok(ProcessResult {
            exit_code: status.code().unwrap_or(-1),
            stdout: captured(&stdout),
            stderr: captured(&stderr),
        })
    }
}

/// Copy a stream into a shared buffer until EOF
async fn drain<R: AsyncRead + Unpin>(mut stream: R, buffer: Arc<Mutex<Vec<u8>>>) {
    let mut chunk = [0u8; 4096];
    loop {
        match stream.read(&mut chunk).await {
            Ok(0) => break,
            Ok(n) => {
                if let Ok(mut buf) = buffer.lock() {
                    buf.extend_from_slice(&chunk[..n]);
                }
            }
            Err(e) => {
                debug!("Output drain stopped: {}", e);
                break;
            }
        }
    }
}

/// Wait a bounded time for a drain; a slow one is abandoned, not awaited
async fn join_drain(task: Option<JoinHandle<()>>, limit: Duration, stream: &str) {
    let Some(task) = task else {
        return;
    };

    if tokio::time::timeout(limit, task).await.is_err() {
        warn!(
            "{} still draining after {}ms, output may be truncated",
            stream,
            limit.as_millis()
        );
    }
}

fn captured(buffer: &Mutex<Vec<u8>>) -> String {
    buffer
        .lock()
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default()
}
