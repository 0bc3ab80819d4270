//! Gateway between ASCII art front ends and the rendering backend.
//!
//! Also home of the wire model shared with the `asciify` client.

pub mod backend;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod state;
