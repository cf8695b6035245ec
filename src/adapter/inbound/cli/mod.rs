//! CLI module graph.

pub mod assets;
pub mod command;
pub mod config;
pub mod output;
pub mod run;
pub mod score;
