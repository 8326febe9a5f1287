//! User Directory API Library
//!
//! This library provides the core functionality for the user directory
//! service: the user domain, the in-memory repository, and the HTTP API.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
