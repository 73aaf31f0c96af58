pub mod codegen;
pub mod config;
pub mod error;
pub mod spec;
pub mod state;
pub mod web;
