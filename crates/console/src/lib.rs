pub mod app;
pub mod command;
pub mod config;
pub mod debounce;
pub mod error;
pub mod logging;
pub mod screens;
pub mod session;
pub mod view;
