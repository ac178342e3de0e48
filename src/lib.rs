//! Webvcr - VCR-style record-replay interception for browser-driven tests
//!
//! Records real responses the first time a scenario runs and deterministically
//! replays them on subsequent runs without touching the live network.

#![deny(unsafe_code)]
#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::cargo)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::multiple_crate_versions
)]

pub mod cassette;
pub mod config;
pub mod driver;
pub mod error;
pub mod fingerprint;
pub mod session;

pub use error::{Result, VcrError};
