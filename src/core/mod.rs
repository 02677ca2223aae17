pub mod config;
pub mod constants;
pub mod session;
pub mod transcript;
