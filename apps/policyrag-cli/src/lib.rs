//! Command-line front end for loading a knowledge directory and querying it.
pub mod cli;
pub mod commands;
pub mod logging;
