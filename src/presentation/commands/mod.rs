pub mod catalog_commands;
pub mod entity_commands;
pub mod helpers;
pub mod registry;
