//! Line-oriented interactive shell
//!
//! Each edit re-renders the document and submits it to the pipeline, which
//! debounces and dispatches validation and cost calls in the background.
//! Failure notifications are printed before the next prompt.

use std::io::Write;

use hpc_blueprint::cost;
use hpc_blueprint::export::{self, DEFAULT_EXPORT_FILE};
use hpc_blueprint::{InstanceId, Session};
use hpc_orchestrator::{Notification, OrchestratorHandle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::commands;

const HELP: &str = "\
commands:
  catalog                       list available components
  add <component>               add a component instance
  set <instance> <option> <v>   change an option value
  rm <instance>                 remove an instance
  ls                            list configured instances
  show                          print the blueprint document
  cost                          local price table
  status                        latest validation and cost results
  wait                          wait for pending results, then print them
  export [path]                 write the document (default hpc-config.yaml)
  quit                          leave the shell
";

/// Interactive session over an input stream and an output sink
pub struct Shell<W> {
    session: Session,
    handle: OrchestratorHandle,
    notifications: broadcast::Receiver<Notification>,
    out: W,
    prompt: bool,
}

impl<W: Write> Shell<W> {
    /// Shell editing `session`, submitting documents to `handle`
    pub fn new(session: Session, handle: OrchestratorHandle, out: W) -> Self {
        let notifications = handle.notifications();
        Self {
            session,
            handle,
            notifications,
            out,
            prompt: false,
        }
    }

    /// Print a prompt before each line
    #[must_use]
    pub fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Read commands until `quit` or end of input; returns the final session
    ///
    /// # Errors
    /// Input/output failures or a stopped pipeline
    pub async fn run<R>(mut self, input: R) -> anyhow::Result<Session>
    where
        R: AsyncBufRead + Unpin,
    {
        if !self.session.store().is_empty() {
            self.handle.submit(self.session.document())?;
        }

        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(self.out, "hpc> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next_line().await? else {
                break;
            };
            self.drain_notifications()?;

            let words: Vec<&str> = line.split_whitespace().collect();
            match words.as_slice() {
                [] => {}
                ["quit" | "exit"] => break,
                ["help"] => write!(self.out, "{HELP}")?,
                ["catalog"] => commands::write_catalog(&mut self.out, self.session.catalog())?,
                ["add", definition] => self.add(definition)?,
                ["set", instance, option, _, ..] => {
                    self.set(instance, option, rest_after(&line, 3))?;
                }
                ["rm", instance] => self.remove(instance)?,
                ["ls"] => self.list()?,
                ["show"] => writeln!(self.out, "{}", self.session.document())?,
                ["cost"] => write!(
                    self.out,
                    "{}",
                    cost::estimate(self.session.store().list()).render()
                )?,
                ["status"] => commands::write_report(&mut self.out, &self.handle.snapshot())?,
                ["wait"] => {
                    let snapshot = self.handle.wait_until_settled(self.handle.revision()).await?;
                    commands::write_report(&mut self.out, &snapshot)?;
                }
                ["export"] => self.export(DEFAULT_EXPORT_FILE)?,
                ["export", path] => self.export(path)?,
                [command, ..] => writeln!(self.out, "unknown command: {command} (try `help`)")?,
            }
        }

        let Self {
            session, handle, ..
        } = self;
        handle.shutdown().await;
        Ok(session)
    }

    fn add(&mut self, definition: &str) -> anyhow::Result<()> {
        match self.session.add(definition) {
            Ok(id) => {
                writeln!(self.out, "added {id}")?;
                self.submit()
            }
            Err(e) => Ok(writeln!(self.out, "error: {e}")?),
        }
    }

    fn set(&mut self, instance: &str, option: &str, raw: &str) -> anyhow::Result<()> {
        let id = InstanceId::from(instance);
        match self.session.update_field_input(&id, option, raw) {
            Ok(None) => writeln!(self.out, "{id}.{option} = {raw}")?,
            Ok(Some(warning)) => writeln!(self.out, "warning: {warning}")?,
            Err(e) if e.is_benign() => {
                writeln!(self.out, "no such instance: {id}")?;
                return Ok(());
            }
            Err(e) => {
                writeln!(self.out, "error: {e}")?;
                return Ok(());
            }
        }
        self.submit()
    }

    fn remove(&mut self, instance: &str) -> anyhow::Result<()> {
        let id = InstanceId::from(instance);
        if self.session.remove(&id) {
            writeln!(self.out, "removed {id}")?;
            self.submit()
        } else {
            Ok(writeln!(self.out, "no such instance: {id}")?)
        }
    }

    fn list(&mut self) -> anyhow::Result<()> {
        if self.session.store().is_empty() {
            writeln!(self.out, "(nothing configured)")?;
        }
        for instance in self.session.store().list() {
            let values: Vec<String> = instance
                .values()
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            writeln!(
                self.out,
                "{:<24} {:<28} {}",
                instance.id(),
                instance.definition().source_path(),
                values.join(" ")
            )?;
        }
        Ok(())
    }

    fn export(&mut self, path: &str) -> anyhow::Result<()> {
        match export::write_document(path, &self.session.document()) {
            Ok(written) => writeln!(self.out, "wrote {}", written.display())?,
            Err(e) => writeln!(self.out, "error: {e}")?,
        }
        Ok(())
    }

    fn submit(&mut self) -> anyhow::Result<()> {
        self.handle.submit(self.session.document())?;
        Ok(())
    }

    fn drain_notifications(&mut self) -> std::io::Result<()> {
        loop {
            match self.notifications.try_recv() {
                Ok(note) => writeln!(self.out, "! {note}")?,
                Err(TryRecvError::Lagged(missed)) => {
                    tracing::debug!(missed, "notifications dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return Ok(()),
            }
        }
    }
}

/// Remainder of `line` after its first `n` whitespace-separated words
fn rest_after(line: &str, n: usize) -> &str {
    let mut rest = line.trim_start();
    for _ in 0..n {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        rest = rest[end..].trim_start();
    }
    rest
}
