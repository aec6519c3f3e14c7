//! Data types for the analysis library.

pub mod config;
pub mod field;
pub mod input;
pub mod insights;
pub mod result;
