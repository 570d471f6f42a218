//! Command line front end for a Swiss-system tournament.
//!
//! Parses operator commands, loads configuration and renders results; all
//! tournament logic lives in [`swiss_tournament`].

pub mod commands;
pub mod config;
pub mod demo;
pub mod render;
