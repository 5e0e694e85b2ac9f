//! Project traversal and issue notification.
//!
//! This module coordinates the services:
//! - Walking every page of a project board's items
//! - Deciding which issues are due tomorrow
//! - Posting the rendered reminder comments

pub mod fetch;
pub mod reminder;
