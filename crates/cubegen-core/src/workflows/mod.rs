//! # Workflows Module
//!
//! High-level entry points that orchestrate one complete generation request.
//!
//! ## Overview
//!
//! Workflows are the top-level API for users of Cubegen. They drive the
//! pipeline state machine end to end (selection, grid ranges, provenance
//! header, voxel fill) or run the grid-free mesh ingestion path, and return
//! a deliverable result or the first error encountered. Recovery policy
//! (retrying with a different field type, reporting to the user) belongs to
//! the caller.

pub mod generate;
