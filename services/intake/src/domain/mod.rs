pub mod application_id;
pub mod attachment;
pub mod repository;
pub mod types;
