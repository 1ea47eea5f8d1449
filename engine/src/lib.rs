//! Management-plane API command engine
//!
//! A library for executing management API commands with support for:
//! - Typed parameter schemas validated before a command is built
//! - Synchronous commands answered with tagged response objects
//! - Asynchronous commands tracked as background jobs and queried later
//! - Entity-owner attribution and audit events for every command

// Module declarations
pub mod constants;

// Core architecture modules
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ApiDispatcher, AsyncJobManager, CommandRegistry};
pub use domain::{ApiError, ApiResponse, CallContext, Result};
