//! Subcommand handlers

pub mod config;
pub mod home;
pub mod open;
pub mod search;
pub mod show;
