//! Core trait abstractions for the analysis library.

pub mod generator;
