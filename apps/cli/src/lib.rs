//! Client-side sessions for the asciify gateway.
//!
//! Three independent sessions share one request/settle contract:
//! [`session::GeneratorSession`] for explicit generation, [`session::FontBrowser`] for
//! catalog browsing with live previews, and [`session::RandomSession`] for random art.

pub mod client;
pub mod errors;
pub mod session;

pub use asciify_api::models;
