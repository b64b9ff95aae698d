// Application layer - use cases that drive the catalog on top of the domain
pub mod dto;
pub mod errors;
pub mod services;
