//! Flight agent: search and recommendations

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AgentStatus;
use crate::llm::GeminiClient;
use crate::prompts;

/// A bookable flight option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightOption {
    pub airline: String,
    pub departure_city: String,
    pub arrival_city: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub price: f64,
    pub duration_hours: f64,
    pub stops: u32,
}

/// Sorting preference when picking a flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlightSort {
    #[default]
    Price,
    Duration,
    Stops,
}

/// Agent specialized in flight search and recommendations
pub struct FlightAgent {
    client: GeminiClient,
    initialized_at: DateTime<Utc>,
}

impl FlightAgent {
    pub fn new(client: GeminiClient) -> Self {
        info!("FlightAgent initialized");
        Self {
            client: client.with_system_prompt(prompts::FLIGHT_SYSTEM_PROMPT),
            initialized_at: Utc::now(),
        }
    }

    /// Search for available flights
    ///
    /// Synthesized locally; a flight search provider would slot in here.
    pub fn search(
        &self,
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
        passengers: u32,
    ) -> Vec<FlightOption> {
        info!("Searching flights from {} to {}", origin, destination);

        let date = departure_date.format("%Y-%m-%d");
        vec![
            FlightOption {
                airline: "Mock Airlines".to_string(),
                departure_city: origin.to_string(),
                arrival_city: destination.to_string(),
                departure_time: format!("{}T08:00:00", date),
                arrival_time: format!("{}T12:00:00", date),
                price: 350.0 * f64::from(passengers),
                duration_hours: 4.0,
                stops: 0,
            },
            FlightOption {
                airline: "Budget Air".to_string(),
                departure_city: origin.to_string(),
                arrival_city: destination.to_string(),
                departure_time: format!("{}T14:00:00", date),
                arrival_time: format!("{}T20:00:00", date),
                price: 200.0 * f64::from(passengers),
                duration_hours: 6.0,
                stops: 1,
            },
        ]
    }

    /// Pick the best flight by the given preference; `None` for no options
    pub fn best<'a>(
        &self,
        flights: &'a [FlightOption],
        preference: FlightSort,
    ) -> Option<&'a FlightOption> {
        match preference {
            FlightSort::Price => flights
                .iter()
                .min_by(|a, b| a.price.total_cmp(&b.price)),
            FlightSort::Duration => flights
                .iter()
                .min_by(|a, b| a.duration_hours.total_cmp(&b.duration_hours)),
            FlightSort::Stops => flights.iter().min_by_key(|f| f.stops),
        }
    }

    /// Ask the model to recommend among the found options
    pub async fn recommend(&self, flights: &[FlightOption]) -> Result<String> {
        let options: Vec<String> = flights
            .iter()
            .map(|f| {
                format!(
                    "{} from {} to {}, departs {}, {} h, {} stop(s), ${:.2}",
                    f.airline,
                    f.departure_city,
                    f.arrival_city,
                    f.departure_time,
                    f.duration_hours,
                    f.stops,
                    f.price
                )
            })
            .collect();

        let prompt = format!(
            "These flight options are available:\n{}\n\nRecommend which to book and why, \
             considering price, total travel time, and connections. Two or three sentences.",
            options.join("\n")
        );

        self.client.generate(&prompt).await
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus::active("FlightAgent", self.initialized_at)
    }
}
