// Data Transfer Objects
pub mod catalog_dto;
pub mod club_dto;
pub mod entity_form;
pub mod player_dto;
pub mod trophy_dto;
