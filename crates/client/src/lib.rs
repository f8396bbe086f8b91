//! # Early Client
//!
//! Typed async client for the Early (Timeular) time tracking REST API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use early_client::{EarlyClient, EarlyConfig, EarlyResult};
//!
//! #[tokio::main]
//! async fn main() -> EarlyResult<()> {
//!     // Credentials from EARLY_API_KEY / EARLY_API_SECRET
//!     let config = EarlyConfig::from_env()?;
//!
//!     // Signs in and holds the bearer token for the client's lifetime
//!     let client = EarlyClient::connect(config).await?;
//!
//!     for activity in client.activities().await? {
//!         println!("{} ({})", activity.name, activity.id);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod notes;
pub mod timestamp;
pub mod types;

pub use client::EarlyClient;
pub use config::EarlyConfig;
pub use error::{EarlyError, EarlyResult};
pub use types::{
    Activity, CreateTimeEntryRequest, Mention, Note, NoteText, Tag, TimeEntry, TimeEntryPatch,
    TrackingPatch, TrackingSession,
};
