//! Bounded execution of a single external command.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Program name plus arguments for one external tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub(crate) program: String,
    pub(crate) args: Vec<OsString>,
}

impl Invocation {
    pub(crate) fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
        }
    }

    pub(crate) fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub(crate) fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// File name of the program, as shown in status lines.
    fn name(&self) -> &str {
        Path::new(&self.program)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.program)
    }

    /// Run in `cwd`, returning stdout followed by stderr.
    ///
    /// Spawn failures, non-zero exits and timeouts are folded into the
    /// returned text under the program's file name, so the text does not
    /// depend on where the tool is installed. The child is killed when the
    /// limit elapses.
    pub(crate) async fn run(&self, cwd: &Path, limit: Duration) -> String {
        let child = Command::new(&self.program)
            .args(&self.args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let child = match child {
            Ok(child) => child,
            Err(err) => {
                warn!(program = %self.program, error = %err, "failed to spawn tool");
                return format!("failed to run {}: {err}\n", self.name());
            }
        };

        match timeout(limit, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                if !output.status.success() {
                    debug!(
                        program = %self.program,
                        status = %output.status,
                        "tool exited unsuccessfully"
                    );
                    if let Some(code) = output.status.code() {
                        text.push_str(&format!("{} exited with status {code}\n", self.name()));
                    } else {
                        text.push_str(&format!("{} was terminated\n", self.name()));
                    }
                }
                text
            }
            Ok(Err(err)) => {
                warn!(program = %self.program, error = %err, "failed to collect tool output");
                format!("failed to collect output of {}: {err}\n", self.name())
            }
            Err(_) => {
                warn!(program = %self.program, limit_ms = limit.as_millis(), "tool timed out");
                format!("{} timed out after {} ms\n", self.name(), limit.as_millis())
            }
        }
    }
}
