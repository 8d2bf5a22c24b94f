//! Thin wrapper around the `pdftk` command-line toolkit
//!
//! This crate owns every interaction with the external binary:
//! - form filling (`fill_form` with generated FDF input)
//! - field introspection (`dump_data_fields` report parsing)
//! - template discovery (one folder scan at startup)
//!
//! The HTTP layer programs against the [`FormToolkit`] trait; [`Pdftk`] is
//! the real implementation, tests substitute stubs.

pub mod error;
pub mod fdf;
pub mod fields;
pub mod pdftk;
pub mod registry;
pub mod toolkit;

pub use error::EngineError;
pub use pdftk::Pdftk;
pub use registry::TemplateRegistry;
pub use toolkit::{FieldRecord, FilledPdf, FormToolkit};
