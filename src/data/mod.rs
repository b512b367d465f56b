//! Data module for configuration management

mod config;

pub use config::{AppConfig, AudioConfig, GeneralConfig};
