pub mod application;
pub mod user;
