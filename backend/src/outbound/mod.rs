//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! The only infrastructure the tracker talks to is its SQLite store:
//!
//! - **persistence**: SQLite-backed repositories using Diesel ORM
//!
//! Adapters are thin translators that convert between domain types and
//! storage representations. Business rules live in the domain.

pub mod persistence;
