//! Command-line front end for LAOS app routes.
//!
//! Parses `laos routes ...` invocations and runs them through
//! [`laos_client::Routes`].

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod command;
pub mod error;
