//! Port implementations.
//!
//! - `live`: real disk and HTTP.
//! - `recording`: wraps a live adapter and captures each call into a cassette.
//! - `replaying`: serves calls from a previously recorded cassette.

pub mod live;
pub mod recording;
pub mod replaying;
