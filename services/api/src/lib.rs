//! services/api/src/lib.rs
//!
//! Library crate for the newsdesk API service. The `api` binary wires the
//! adapters together; everything else lives here so integration tests can
//! drive the router with stubbed ports.

pub mod adapters;
pub mod audio;
pub mod catalog;
pub mod config;
pub mod error;
pub mod web;
