//! Application layer
//! Wires commands to collaborators and drives dispatch and async execution

pub mod dispatcher;
pub mod job_manager;
pub mod registry;

pub use dispatcher::ApiDispatcher;
pub use job_manager::AsyncJobManager;
pub use registry::{Collaborators, CommandRegistry};
