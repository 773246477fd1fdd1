// src/lib.rs

pub mod album;
pub mod api;
pub mod app;
pub mod chat;
pub mod commands;
pub mod config;
pub mod errors;
pub mod key_handlers;
pub mod log_view;
pub mod logging;
pub mod models;
pub mod router;
pub mod status_indicator;
pub mod ui;
