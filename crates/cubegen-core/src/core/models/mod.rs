//! Data models exchanged between the pipeline layers.
//!
//! Every entity here is created at the start of one generation request and
//! discarded (or handed off to the consumer) at its end; none persist across
//! requests except the externally owned structure data, which is only ever
//! borrowed.

pub mod header;
pub mod mesh;
pub mod selection;
pub mod structure;
pub mod volume;
