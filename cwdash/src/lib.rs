pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod pagination;
pub mod presenter;
pub mod relative_time;
pub mod services;
pub mod settings;
