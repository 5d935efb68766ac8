//! Client for the vehicle lookup API behind the car type selector.
//!
//! This crate provides:
//! - `LookupApi` - The makes / models / years / seat rows port
//! - `HttpLookupClient` - `reqwest` implementation with timeouts
//! - `StaticLookup` - In-memory catalogue for tests and offline use
//! - `parse_options` / `parse_seat_rows` - Lenient response decoding

mod api;
mod client;
mod error;
mod response;
mod stage;
mod timeout;

pub use api::*;
pub use client::*;
pub use error::*;
pub use response::*;
pub use stage::*;
pub use timeout::*;
