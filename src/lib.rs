pub mod admin;
pub mod auth;
pub mod config;
pub mod errors;
pub mod hash;
pub mod heal;
pub mod http;
pub mod logger;
pub mod utils;
pub mod version;
