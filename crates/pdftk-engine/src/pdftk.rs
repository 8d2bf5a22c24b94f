//! `pdftk` process invocation
//!
//! Every operation spawns one short-lived child process, bounded by the
//! configured timeout. Concurrent requests each get their own child; there
//! is no shared state between invocations.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::process::Command;
use tracing::debug;

use crate::error::EngineError;
use crate::fdf;
use crate::fields;
use crate::toolkit::{FieldRecord, FilledPdf, FormToolkit};

/// Default bound on a single toolkit invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// The real collaborator: shells out to the configured `pdftk` executable.
#[derive(Debug, Clone)]
pub struct Pdftk {
    binary: PathBuf,
    timeout: Duration,
}

impl Pdftk {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Probe the binary, returning the first line of its version banner.
    ///
    /// Used by the server bootstrap to log availability before serving.
    pub async fn version(&self) -> Result<String, EngineError> {
        let mut command = Command::new(&self.binary);
        command.arg("--version");
        let output = self.run(command).await?;

        let banner = String::from_utf8_lossy(&output.stdout);
        Ok(banner.lines().next().unwrap_or_default().trim().to_string())
    }

    async fn run(&self, mut command: Command) -> Result<Output, EngineError> {
        debug!("Running {:?}", command.as_std());
        command.kill_on_drop(true);

        let result = tokio::time::timeout(self.timeout, command.output())
            .await
            .map_err(|_| EngineError::Timeout(self.timeout.as_millis() as u64))?;

        let output = result.map_err(|source| EngineError::Spawn {
            binary: self.binary.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(EngineError::Toolkit {
                binary: self.binary.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

#[async_trait]
impl FormToolkit for Pdftk {
    async fn fill_form(
        &self,
        template: &Path,
        data: &Map<String, Value>,
    ) -> Result<FilledPdf, EngineError> {
        let scratch = tempfile::tempdir()?;
        let fdf_path = scratch.path().join("data.fdf");
        tokio::fs::write(&fdf_path, fdf::write_fdf(data)).await?;

        let filled_path = scratch.path().join("filled.pdf");
        let mut command = Command::new(&self.binary);
        command
            .arg(template)
            .arg("fill_form")
            .arg(&fdf_path)
            .arg("output")
            .arg(&filled_path)
            .arg("flatten");
        self.run(command).await?;

        Ok(FilledPdf::new(scratch, filled_path))
    }

    async fn dump_fields(&self, template: &Path) -> Result<Vec<FieldRecord>, EngineError> {
        let mut command = Command::new(&self.binary);
        command
            .arg(template)
            .arg("dump_data_fields_utf8")
            .arg("output")
            .arg("-");
        let output = self.run(command).await?;

        Ok(fields::parse_dump(&String::from_utf8_lossy(&output.stdout)))
    }
}
