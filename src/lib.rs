pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod locations;
pub mod pipeline;
pub mod preflight;
pub mod providers;
pub mod report;
