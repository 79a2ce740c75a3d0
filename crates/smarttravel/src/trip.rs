//! Travel request and itinerary models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::agents::{Attraction, DayPlan, FlightOption, FlightSort, HotelOption, HotelSort};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failures for a travel request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripError {
    #[error("destination must not be empty")]
    EmptyDestination,

    #[error("invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("end_date must be after start_date")]
    EndBeforeStart,

    #[error("travelers must be between 1 and 20, got {0}")]
    InvalidTravelers(u32),

    #[error("budget must be positive, got {0}")]
    InvalidBudget(f64),
}

/// Traveler preferences steering agent choices
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub cuisines: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    /// "$", "$$", "$$$" or "$$$$"
    pub price_range: Option<String>,
    pub flight_preference: FlightSort,
    pub hotel_preference: HotelSort,
}

/// A trip planning request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelRequest {
    pub destination: String,
    #[serde(default)]
    pub origin: Option<String>,
    /// YYYY-MM-DD
    pub start_date: String,
    /// YYYY-MM-DD
    pub end_date: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default = "default_travelers")]
    pub travelers: u32,
    #[serde(default)]
    pub preferences: Preferences,
}

fn default_travelers() -> u32 {
    1
}

impl TravelRequest {
    /// Validate the request fields
    pub fn validate(&self) -> Result<(), TripError> {
        if self.destination.trim().is_empty() {
            return Err(TripError::EmptyDestination);
        }

        let start = self.start()?;
        let end = self.end()?;
        if end <= start {
            return Err(TripError::EndBeforeStart);
        }

        if self.travelers < 1 || self.travelers > 20 {
            return Err(TripError::InvalidTravelers(self.travelers));
        }

        if let Some(budget) = self.budget {
            if budget <= 0.0 {
                return Err(TripError::InvalidBudget(budget));
            }
        }

        Ok(())
    }

    /// Parsed start date
    pub fn start(&self) -> Result<NaiveDate, TripError> {
        parse_date(&self.start_date)
    }

    /// Parsed end date
    pub fn end(&self) -> Result<NaiveDate, TripError> {
        parse_date(&self.end_date)
    }

    /// Trip duration in days, inclusive of both endpoints
    pub fn duration_days(&self) -> Result<u32, TripError> {
        let days = (self.end()? - self.start()?).num_days() + 1;
        Ok(days.max(0) as u32)
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, TripError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| TripError::InvalidDate(value.to_string()))
}

/// A complete assembled travel plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelItinerary {
    pub destination: String,
    pub duration_days: u32,
    pub flights: Vec<FlightOption>,
    pub accommodations: Vec<HotelOption>,
    pub attractions: Vec<Attraction>,
    pub daily_schedule: Vec<DayPlan>,
    pub total_estimated_cost: f64,
    /// Concatenated per-agent narrative sections
    pub summary: String,
}
