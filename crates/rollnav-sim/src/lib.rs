pub mod agent;
pub mod config;
pub mod path;
pub mod runner;
