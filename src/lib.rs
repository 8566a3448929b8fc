//! Ladle - a terminal dashboard for food donation databases.
//!
//! This library exposes the core modules for use in integration tests.

pub mod chart;
pub mod config;
pub mod db;
pub mod error;
pub mod reports;
