pub mod document_repository;
pub mod object_storage_repository;
