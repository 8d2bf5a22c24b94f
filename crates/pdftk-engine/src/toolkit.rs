//! The external collaborator seam
//!
//! [`FormToolkit`] is the contract the server programs against. The real
//! implementation ([`crate::Pdftk`]) shells out to the binary; tests
//! substitute in-memory stubs.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tempfile::TempDir;

use crate::error::EngineError;

/// One fillable form field as reported by the toolkit.
///
/// Only the name and value are typed; everything else in the report
/// (`FieldType`, `FieldFlags`, `FieldStateOption`, ...) passes through
/// untouched so the JSON output matches what the toolkit said.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRecord {
    #[serde(rename = "FieldName")]
    pub name: String,

    /// Current value, when the toolkit reports one.
    #[serde(rename = "FieldValue", default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl FieldRecord {
    pub fn new(name: impl Into<String>, value: Option<String>) -> Self {
        Self {
            name: name.into(),
            value,
            meta: Map::new(),
        }
    }
}

/// A generated PDF together with the scratch directory it lives in.
///
/// Dropping the value removes the scratch directory, so keep it alive until
/// the file content has been read.
#[derive(Debug)]
pub struct FilledPdf {
    path: PathBuf,
    _dir: TempDir,
}

impl FilledPdf {
    pub fn new(dir: TempDir, path: PathBuf) -> Self {
        Self { path, _dir: dir }
    }

    /// Path of the generated file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Form-toolkit operations the HTTP layer delegates to
#[async_trait]
pub trait FormToolkit: Send + Sync {
    /// Fill `template` with `data`, returning the generated file.
    async fn fill_form(
        &self,
        template: &Path,
        data: &Map<String, Value>,
    ) -> Result<FilledPdf, EngineError>;

    /// Report the fillable fields of `template`, in report order.
    async fn dump_fields(&self, template: &Path) -> Result<Vec<FieldRecord>, EngineError>;
}
