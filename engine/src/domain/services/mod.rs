//! Domain services

mod owner_resolver;
mod response_generator;

pub use owner_resolver::OwnerResolver;
pub use response_generator::ResponseGenerator;
