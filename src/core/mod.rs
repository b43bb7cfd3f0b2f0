pub mod classify;
pub mod common;
pub mod config;
pub mod dataset;
pub mod index;

pub use self::config::Config;
