pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::{
    ApiRequest, Envelope, HttpTransport, OtterClient, RawResponse, Session, SpeechQuery, Transport,
};
pub use config::{ClientConfig, Config, Credentials};
pub use error::{OtterError, Result};
pub use models::{Speaker, Speech, User};
