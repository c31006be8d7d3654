//! Render pipeline construction.
//!
//! `basic` builds the pipelines programs use, from a set of [`basic::PipelineOptions`].

pub mod basic;
