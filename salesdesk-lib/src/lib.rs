//! Salesdesk API client library
//!
//! An async client for the Salesdesk CRM REST API, plus the headless engine
//! behind its record lists: query state (pagination, sorting, filters), the
//! fetch lifecycle with stale-response protection, field validation, and
//! the acting user's capability session.

pub mod api;
pub mod auth;
pub mod error;
pub mod fetch;
pub mod model;
pub mod query;
pub mod response;
pub mod session;
pub mod validation;

mod client;

pub use client::*;
