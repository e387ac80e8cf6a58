//! Otter.ai API client
//!
//! This module provides the session-backed client for the private Otter API:
//! - `OtterClient` - login plus one method per remote endpoint
//! - `Session` - the stored user id and its validity guard
//! - `Envelope` - the normalized `{status, data}` shape every call returns
//! - `Transport` - the seam that performs a single HTTP exchange

mod client;
mod envelope;
mod session;
mod transport;

pub use client::{OtterClient, SpeechQuery};
pub use envelope::Envelope;
pub use session::Session;
pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};
