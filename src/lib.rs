pub mod api;
pub mod client;
pub mod config;
pub mod controller;
pub mod data_models;
pub mod error;
pub mod render;
pub mod session;
pub mod shortcut;
pub mod view;
