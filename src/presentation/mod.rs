// Presentation layer - HTTP commands over the catalog controller
pub mod commands;
pub mod errors;
