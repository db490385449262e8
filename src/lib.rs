pub mod config;
pub mod fetcher;
pub mod network;
pub mod resource;
pub mod rule;
pub mod updater;
