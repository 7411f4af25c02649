//! Embeddable core library for roimodel.
//!
//! Provides a clap-free, I/O-abstracted entry point suitable for linking into a web backend,
//! desktop shell, or the bundled CLI.
//!
//! # Port traits
//!
//! All I/O is abstracted behind port traits in [`ports`]:
//! - [`KeyValueStore`](ports::KeyValueStore) : string-keyed persistent storage for scenarios
//! - [`LogoSource`](ports::LogoSource) : asynchronous logo loading for PDF reports
//! - [`WritePort`](ports::WritePort) : write files and create directories
//!
//! The [`adapters`] module provides in-memory and filesystem-backed implementations.
//!
//! # Entry points
//!
//! - [`ScenarioBook`](scenarios::ScenarioBook) : save, load, delete, list, and compare scenarios
//! - [`run_export`](pipeline::run_export) : render a result in the requested formats

pub mod adapters;
pub mod pipeline;
pub mod ports;
pub mod scenarios;
pub mod settings;

// Re-export so embedders don't need roimodel-domain or roimodel-render directly.
pub use roimodel_domain::{CalcOptions, CostModel, InputStore};
pub use roimodel_render::{ExportError, ExportFormat};
