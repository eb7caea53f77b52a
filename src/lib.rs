// Library exports for the binary and integration tests

pub mod api;
pub mod app_data;
pub mod backend;
pub mod cli;
pub mod config;
pub mod coordinators;
pub mod errors;
pub mod services;
pub mod stores;
pub mod types;
pub mod views;

#[cfg(test)]
pub mod test;
