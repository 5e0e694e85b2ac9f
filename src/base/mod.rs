//! Core components, types, and utilities for the notifier.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - Comment template rendering.
//! - Common types and result handling.

pub mod config;
pub mod template;
pub mod types;
