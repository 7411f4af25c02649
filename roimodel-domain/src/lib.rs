//! Domain logic: turn a department and its input snapshot into ROI figures.
//!
//! This crate owns *what* is computed. Persisting scenarios and rendering reports live in
//! `roimodel-core` and `roimodel-render`.

mod engine;
mod error;
mod inputs;
pub mod sensitivity;
pub mod templates;
mod warnings;

pub use engine::{CalcOptions, CostModel, calculate, calculate_with, required_headcount, roi};
pub use error::InputError;
pub use inputs::{InputStore, init_inputs, reconcile, set_field, set_unit_mode};
pub use sensitivity::{AxisRange, SensitivityAxis, SweepPoint};
pub use templates::{department_result_keys, get_template, registry_version};
pub use warnings::{DegenerateInput, DegenerateKind, degenerate_inputs};
