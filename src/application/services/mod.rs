//! Business logic services for the application layer.

pub mod allocator_service;
pub mod resolver_service;

pub use allocator_service::CodeAllocator;
pub use resolver_service::Resolver;
