// Domain layer - entities and the repository interfaces the backend must satisfy
pub mod errors;
pub mod models;
pub mod repositories;
