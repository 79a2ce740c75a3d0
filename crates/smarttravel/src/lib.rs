//! SmartTravel - a multi-agent AI travel concierge
//!
//! This crate can be used as a library to plan trips with specialized agents
//! that each wrap one prompt/response exchange with a hosted model.
//!
//! # Example
//!
//! ```no_run
//! use smarttravel::{Config, TravelConcierge, TravelRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let concierge = TravelConcierge::new(&config)?;
//!
//!     let request = TravelRequest {
//!         destination: "Paris".to_string(),
//!         origin: Some("NYC".to_string()),
//!         start_date: "2024-06-01".to_string(),
//!         end_date: "2024-06-07".to_string(),
//!         budget: Some(50_000.0),
//!         travelers: 2,
//!         preferences: Default::default(),
//!     };
//!
//!     let itinerary = concierge.plan_trip(&request).await?;
//!     println!("{}", itinerary.summary);
//!     Ok(())
//! }
//! ```

pub mod agents;
mod config;
mod llm;
pub mod prompts;
mod trip;

// Re-export the public API
pub use agents::{ConciergeStatus, LiveData, TravelConcierge};
pub use config::Config;
pub use llm::{GeminiClient, GenerationConfig};
pub use trip::{Preferences, TravelItinerary, TravelRequest, TripError};
