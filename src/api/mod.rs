//! # API Layer
//!
//! Inbound adapters.

pub mod rest;
