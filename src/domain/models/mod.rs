pub mod club;
pub mod document;
pub mod entity;
pub mod image;
pub mod notification;
pub mod player;
pub mod trophy;
pub mod upload;
