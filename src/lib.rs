pub mod common;
pub mod config;
pub mod data_loader;
pub mod demos;
pub mod export;
pub mod gallery;
pub mod scene;
pub mod server;
