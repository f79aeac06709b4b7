// airgrid-api: Async REST client for the airgrid WiFi management backend.

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::RestClient;
pub use error::Error;
pub use transport::TransportConfig;
