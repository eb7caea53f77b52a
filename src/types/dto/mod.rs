// API DTOs - request and response models
pub mod admin;
pub mod auth;
pub mod common;
pub mod setup;
pub mod submission;
