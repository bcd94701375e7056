//! Shell-facing pieces of the notion-md-sync binary.
//!
//! The conversion and upload logic lives in `notion-md-blocks`; this crate
//! only owns what depends on the process environment.

pub mod credentials;
