//! Outbound adapters implementing the repository ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel and `bb8`.
//! - **memory**: mutex-guarded in-process repositories, used when no
//!   database is configured and throughout the tests.

pub mod memory;
pub mod persistence;
