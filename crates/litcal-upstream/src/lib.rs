//! Access to the Liturgical Calendar API.
//!
//! [`CalendarSource`] is the seam between the tool dispatcher and the
//! network; [`LitCalClient`] is the HTTP implementation.

pub mod client;
pub mod config;
pub mod error;
pub mod source;

pub use client::LitCalClient;
pub use config::{UpstreamConfig, default_user_agent, parse_base_url};
pub use error::{UpstreamError, UpstreamErrorCode, UpstreamResult};
pub use source::{BoxFuture, CalendarRequest, CalendarSource, EventsScope};
