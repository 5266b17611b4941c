//! HTTP handlers.
//!
//! Each handler only decodes the request and maps the gateway result to a
//! response; all credential logic lives in [`crate::admin`].

pub mod admin;
pub mod health;
pub mod root;
