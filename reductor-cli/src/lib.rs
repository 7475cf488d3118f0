#![deny(missing_docs)]

//! # Reductor command line tool
//!
//! Encodes text lists of unsigned integers into delta-compressed sequences,
//! persists them, and reads them back. The library half of the crate holds
//! everything the `reductor` binary does so that it can be tested without
//! touching the filesystem.

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod wire;

pub use error::Error;
