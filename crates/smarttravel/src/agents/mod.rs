//! Specialized travel agents and the concierge that coordinates them
//!
//! Every agent follows the same shape: deterministic domain operations over
//! structured data, plus an async operation that formats a domain prompt and
//! returns the model's text.

mod attraction;
mod budget;
mod concierge;
mod currency;
mod disruption;
mod flight;
mod hotel;
mod itinerary;
mod restaurant;
mod weather;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use attraction::{Attraction, AttractionAgent};
pub use budget::{
    BudgetBreakdown, BudgetOptimizationResult, BudgetOptimizerAgent, BudgetTier, OptimizedOption,
    PriorityCategory, ValueCandidate,
};
pub use concierge::{ConciergeStatus, TravelConcierge};
pub use currency::{
    CurrencyConversion, CurrencyConverterAgent, DailyCostEstimate, ExchangeRate,
    MultiBudgetBreakdown,
};
pub use disruption::{
    Disruption, DisruptionAgent, DisruptionKind, DisruptionReport, DisruptionSeverity,
    ItineraryChange, LiveData, RevisedItinerary, WeatherEvent,
};
pub use flight::{FlightAgent, FlightOption, FlightSort};
pub use hotel::{HotelAgent, HotelOption, HotelSort};
pub use itinerary::{Activity, DayPlan, Itinerary, ItineraryAgent};
pub use restaurant::{DiningDay, Meal, Restaurant, RestaurantAgent};
pub use weather::{ActivityAdvice, WeatherAgent, WeatherForecast, WeatherSummary};

/// Status report for a single agent
#[derive(Debug, Clone, Serialize)]
pub struct AgentStatus {
    pub agent: &'static str,
    pub status: &'static str,
    pub initialized_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<&'static str>,
}

impl AgentStatus {
    fn active(agent: &'static str, initialized_at: DateTime<Utc>) -> Self {
        Self {
            agent,
            status: "active",
            initialized_at,
            features: Vec::new(),
        }
    }

    fn with_features(mut self, features: &[&'static str]) -> Self {
        self.features = features.to_vec();
        self
    }
}
