//! Web front end for the weather service.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Process wiring (config, logging, clients)
//! - HTTP routing and request handling

pub mod app;
pub mod cli;
