//! Integration tests for the projection pipeline

#[path = "../common/mod.rs"]
mod common;

mod config_files;
mod inclusion;
mod layout;
mod plan;
mod projection;
