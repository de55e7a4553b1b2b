pub mod bot;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod practicum;
pub mod telegram;
