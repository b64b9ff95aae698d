pub mod catalog_controller;
pub mod catalog_service;
pub mod catalog_state;
pub mod notification_service;
pub mod upload_service;

#[cfg(test)]
pub(crate) mod test_support;
