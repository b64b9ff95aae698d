pub mod file_document_repository;
pub mod file_object_storage_repository;
