pub mod api;
pub mod bootstrap;
pub mod cli;
pub mod cors;
pub mod error;
pub mod runtime;
pub mod state;
