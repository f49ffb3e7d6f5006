//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store reads into caller-facing search and paging APIs.
//! - Keep callers decoupled from SQL and connection details.

pub mod member_search_service;
