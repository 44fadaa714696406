//! Core components, types, and utilities for the relay.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Greetings and status quotes sprinkled into notifications.
//! - Common types, errors, and result handling.

pub mod config;
pub mod error;
pub mod greetings;
pub mod types;
