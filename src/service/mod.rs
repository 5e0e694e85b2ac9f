//! Service integrations for external APIs and clients.
//!
//! This module contains the remote services used by the notifier:
//! - Project services (reading project board items)
//! - Issue services (posting comments)
//!
//! Each service module defines both a generic trait and a GitHub implementation,
//! allowing for extensibility and easy testing.

pub mod issues;
pub mod project;

/// User agent sent with every GitHub request; the API rejects requests without one.
pub(crate) const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
