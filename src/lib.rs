pub mod app;
pub mod audio;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod drag;
pub mod history;
pub mod logging;
pub mod model;
pub mod store;
pub mod ui;
pub mod volume;
