//! Domain logic for relaying in-game bug reports to issue trackers.
//!
//! Everything in this crate is pure: payload types, repository URL
//! classification, issue body composition and moderation text assembly.
//! Outbound HTTP lives in `bugrelay-trackers`.

pub mod error;
pub mod issue;
pub mod issue_body;
pub mod moderation;
pub mod report;
pub mod repository;
