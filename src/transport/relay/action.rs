//! The external program woken for every accepted page.

use crate::config::WakeMode;
use crate::error::ActionError;
use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;

pub type ActionFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ActionError>> + Send + 'a>>;

/// Something that can be told about a relayed page.
pub trait WakeAction: Send + Sync {
    /// Name used in logs and error messages.
    fn program(&self) -> &str;

    /// Hand `text` to the assistant and wait for the outcome.
    fn invoke<'a>(&'a self, text: &'a str, mode: WakeMode) -> ActionFuture<'a>;
}

/// Runs `<program> system event --text <text> --mode <mode>`.
///
/// Output is discarded and only the exit status is observed. The child is
/// not killed if the request that started it goes away.
#[derive(Debug, Clone)]
pub struct CommandAction {
    program: String,
}

impl CommandAction {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn args<'a>(text: &'a str, mode: WakeMode) -> [&'a str; 6] {
        ["system", "event", "--text", text, "--mode", mode.as_str()]
    }
}

impl WakeAction for CommandAction {
    fn program(&self) -> &str {
        &self.program
    }

    fn invoke<'a>(&'a self, text: &'a str, mode: WakeMode) -> ActionFuture<'a> {
        Box::pin(async move {
            let status = tokio::process::Command::new(&self.program)
                .args(Self::args(text, mode))
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .map_err(|e| ActionError::StartFailed(e.to_string()))?;

            if status.success() {
                return Ok(());
            }
            match status.code() {
                Some(code) => Err(ActionError::ExitCode {
                    program: self.program.clone(),
                    code,
                }),
                None => Err(ActionError::Signaled {
                    program: self.program.clone(),
                }),
            }
        })
    }
}
