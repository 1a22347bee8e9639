//! # svcs
//!
//! A simple single-user version control system. The engine lives in
//! [`svcs_core`]; the `svcs` binary is built by the `svcs-cli` member.

pub use svcs_core::*;
