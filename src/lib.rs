pub mod analysis;
pub mod commands;
pub mod config;
pub mod download;
pub mod export;
pub mod formats;
pub mod metrics;
pub mod model;
pub mod states;
pub mod util;
