//! # Domain Layer
//!
//! Records, identifiers and the aggregated profile. No I/O happens here.

pub mod entities;
pub mod value_objects;
