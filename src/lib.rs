pub mod api;
pub mod app_state;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod services;
pub mod views;

#[cfg(test)]
pub mod test_utils;
