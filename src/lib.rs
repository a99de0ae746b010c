// Core infrastructure modules
pub mod core;

// Feature-specific modules
pub mod cli;
pub mod config;
pub mod console;
pub mod menu;
pub mod operations;
pub mod results_grid;
pub mod statements;
