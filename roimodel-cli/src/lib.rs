//! Library half of the `roimodel` binary: configuration loading and argument helpers.

pub mod config;
