//! Command implementations for the pherf installer CLI

pub mod install;
