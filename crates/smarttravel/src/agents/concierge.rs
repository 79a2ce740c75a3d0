//! Travel concierge: orchestrates the specialized agents
//!
//! The concierge runs the agents in a fixed order and aggregates their
//! structured outputs into one itinerary, concatenating the per-agent
//! narrative sections into the summary. No retry, caching, or consistency
//! logic lives at this layer.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::{
    AgentStatus, AttractionAgent, BudgetOptimizerAgent, CurrencyConverterAgent, DisruptionAgent,
    DisruptionReport, FlightAgent, HotelAgent, Itinerary, ItineraryAgent, LiveData,
    RestaurantAgent, RevisedItinerary, WeatherAgent,
};
use crate::config::Config;
use crate::llm::GeminiClient;
use crate::prompts;
use crate::trip::{TravelItinerary, TravelRequest};

/// Aggregate status of the concierge and all its agents
#[derive(Debug, Clone, Serialize)]
pub struct ConciergeStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub initialized_at: DateTime<Utc>,
    pub agents: Vec<AgentStatus>,
}

/// Everything gathered for one trip before aggregation
struct TripParts {
    duration: u32,
    forecasts: Vec<super::WeatherForecast>,
    flights: Vec<super::FlightOption>,
    hotels: Vec<super::HotelOption>,
    restaurants: Vec<super::Restaurant>,
    attractions: Vec<super::Attraction>,
    plan: Itinerary,
    total_cost: f64,
}

/// Main travel concierge agent
pub struct TravelConcierge {
    client: GeminiClient,
    weather: WeatherAgent,
    flights: FlightAgent,
    hotels: HotelAgent,
    restaurants: RestaurantAgent,
    attractions: AttractionAgent,
    itinerary: ItineraryAgent,
    budget: BudgetOptimizerAgent,
    currency: CurrencyConverterAgent,
    disruption: DisruptionAgent,
    initialized_at: DateTime<Utc>,
}

impl TravelConcierge {
    /// Create the concierge and every specialized agent
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config.api_key()?;
        let client = GeminiClient::new(
            api_key,
            config.llm.model.clone(),
            config.generation_config(),
            config.general.timeout_secs,
            config.general.max_retries,
        )
        .context("Failed to create model client")?;

        info!("TravelConcierge initialized");

        Ok(Self {
            weather: WeatherAgent::new(client.clone()),
            flights: FlightAgent::new(client.clone()),
            hotels: HotelAgent::new(client.clone()),
            restaurants: RestaurantAgent::new(client.clone()),
            attractions: AttractionAgent::new(client.clone()),
            itinerary: ItineraryAgent::new(client.clone()),
            budget: BudgetOptimizerAgent::new(client.clone()),
            currency: CurrencyConverterAgent::new(),
            disruption: DisruptionAgent::new(client.clone()),
            client: client.with_system_prompt(prompts::CONCIERGE_SYSTEM_PROMPT),
            initialized_at: Utc::now(),
        })
    }

    /// Run the structured agents in their fixed order
    fn gather(&self, request: &TravelRequest) -> Result<TripParts> {
        request.validate()?;

        let start = request.start()?;
        let end = request.end()?;
        let duration = request.duration_days()?;
        let preferences = &request.preferences;

        let forecasts = self.weather.forecast(&request.destination, start, end);

        let flights = match request.origin.as_deref() {
            Some(origin) => {
                self.flights
                    .search(origin, &request.destination, start, request.travelers)
            }
            None => Vec::new(),
        };

        let hotels = self.hotels.search(&request.destination);

        let restaurants = self.restaurants.discover(
            &request.destination,
            &preferences.cuisines,
            &preferences.dietary_restrictions,
            preferences.price_range.as_deref(),
            10,
        );

        let discovered = self.attractions.discover(&request.destination, &[], 10);
        let attractions = self.attractions.top(&discovered, 5);

        let plan = self
            .itinerary
            .create(&request.destination, start, end, &attractions);

        let total_cost = self.estimate_cost(request, duration, &flights, &hotels, &attractions);

        Ok(TripParts {
            duration,
            forecasts,
            flights,
            hotels,
            restaurants,
            attractions,
            plan,
            total_cost,
        })
    }

    /// Best-option trip cost: flight + stay + attractions + dining
    fn estimate_cost(
        &self,
        request: &TravelRequest,
        duration: u32,
        flights: &[super::FlightOption],
        hotels: &[super::HotelOption],
        attractions: &[super::Attraction],
    ) -> f64 {
        let preferences = &request.preferences;

        let flight_cost = self
            .flights
            .best(flights, preferences.flight_preference)
            .map(|f| f.price)
            .unwrap_or(0.0);

        let nights = duration.saturating_sub(1).max(1);
        let hotel_cost = self
            .hotels
            .best(hotels, preferences.hotel_preference)
            .map(|h| self.hotels.total_cost(h, nights, 1))
            .unwrap_or(0.0);

        let activities_cost =
            self.attractions.activities_cost(attractions) * f64::from(request.travelers);

        let dining_cost: f64 = self
            .restaurants
            .dining_plan(&request.destination, duration, preferences)
            .iter()
            .flat_map(|day| [&day.breakfast, &day.lunch, &day.dinner])
            .flatten()
            .map(|r| r.average_cost_per_person * f64::from(request.travelers))
            .sum();

        round2(flight_cost + hotel_cost + activities_cost + dining_cost)
    }

    /// Assemble a structured itinerary without consulting the model
    ///
    /// This is the deterministic core of `plan_trip`; it is also what the
    /// tests exercise.
    pub fn assemble(&self, request: &TravelRequest) -> Result<TravelItinerary> {
        info!("Processing travel request for {}", request.destination);

        let parts = self.gather(request)?;
        Ok(Self::into_itinerary(request, parts, None))
    }

    /// Plan a trip: assemble the itinerary, then collect each agent's
    /// narrative and concatenate the sections into the summary
    pub async fn plan_trip(&self, request: &TravelRequest) -> Result<TravelItinerary> {
        info!("Planning trip to {}", request.destination);

        let parts = self.gather(request)?;
        let mut sections: Vec<String> = Vec::new();

        let weather_text = self
            .weather
            .insights(&request.destination, &parts.forecasts)
            .await?;
        sections.push(section("Weather", &weather_text));

        if !parts.flights.is_empty() {
            let flight_text = self.flights.recommend(&parts.flights).await?;
            sections.push(section("Flights", &flight_text));
        }

        let nights = parts.duration.saturating_sub(1).max(1);
        let hotel_text = self.hotels.recommend(&parts.hotels, nights).await?;
        sections.push(section("Hotels", &hotel_text));

        let restaurant_text = self
            .restaurants
            .recommend(&request.destination, &parts.restaurants)
            .await?;
        sections.push(section("Dining", &restaurant_text));

        let attraction_text = self
            .attractions
            .recommend(&request.destination, &parts.attractions)
            .await?;
        sections.push(section("Attractions", &attraction_text));

        let narrative = self.itinerary.narrate(&parts.plan).await?;
        sections.push(section("Itinerary", &narrative));

        if let Some(budget) = request.budget {
            let breakdown = self.budget.optimize(budget, parts.duration, None);
            let budget_text = self
                .budget
                .advise(&request.destination, &breakdown, parts.duration)
                .await?;
            sections.push(section("Budget", &budget_text));

            // Budgets are quoted in INR, as in the public API
            if let Some(conversion) = self.currency.convert_budget_to_destination(
                budget,
                "INR",
                &request.destination,
            ) {
                sections.push(section(
                    "Currency",
                    &format!("Your budget converts to roughly {}.", conversion),
                ));
            }
        }

        let summary = sections.join("\n\n");
        Ok(Self::into_itinerary(request, parts, Some(summary)))
    }

    fn into_itinerary(
        request: &TravelRequest,
        parts: TripParts,
        summary: Option<String>,
    ) -> TravelItinerary {
        let summary = summary.unwrap_or_else(|| parts.plan.summary.clone());
        TravelItinerary {
            destination: request.destination.clone(),
            duration_days: parts.duration,
            flights: parts.flights,
            accommodations: parts.hotels,
            attractions: parts.attractions,
            daily_schedule: parts.plan.days,
            total_estimated_cost: parts.total_cost,
            summary,
        }
    }

    /// Answer a free-text travel query
    pub async fn answer(&self, query: &str) -> Result<String> {
        info!("Answering travel query");
        self.client.generate(query).await
    }

    /// Check an itinerary against live signals for disruptions
    pub fn detect_disruptions(
        &self,
        itinerary: &TravelItinerary,
        live_data: &LiveData,
    ) -> DisruptionReport {
        self.disruption.detect(itinerary, live_data)
    }

    /// Revise an itinerary to work around reported disruptions
    pub fn revise_itinerary(
        &self,
        itinerary: &TravelItinerary,
        report: &DisruptionReport,
    ) -> RevisedItinerary {
        self.disruption.revise(itinerary, report)
    }

    /// Aggregate status of the concierge and all agents
    pub fn status(&self) -> ConciergeStatus {
        ConciergeStatus {
            status: "active",
            version: env!("CARGO_PKG_VERSION"),
            initialized_at: self.initialized_at,
            agents: vec![
                self.weather.status(),
                self.flights.status(),
                self.hotels.status(),
                self.restaurants.status(),
                self.attractions.status(),
                self.itinerary.status(),
                self.budget.status(),
                self.currency.status(),
                self.disruption.status(),
            ],
        }
    }
}

fn section(title: &str, body: &str) -> String {
    format!("## {}\n{}", title, body.trim())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trip::Preferences;

    fn concierge() -> TravelConcierge {
        let mut config = Config::default();
        config.llm.api_key = Some("test-key".to_string());
        TravelConcierge::new(&config).unwrap()
    }

    fn request() -> TravelRequest {
        TravelRequest {
            destination: "Paris".to_string(),
            origin: Some("NYC".to_string()),
            start_date: "2024-06-01".to_string(),
            end_date: "2024-06-07".to_string(),
            budget: Some(2000.0),
            travelers: 2,
            preferences: Preferences::default(),
        }
    }

    #[test]
    fn test_assemble_populates_itinerary() {
        let itinerary = concierge().assemble(&request()).unwrap();
        assert_eq!(itinerary.destination, "Paris");
        assert_eq!(itinerary.duration_days, 7);
        assert!(!itinerary.flights.is_empty());
        assert!(!itinerary.accommodations.is_empty());
        assert_eq!(itinerary.attractions.len(), 5);
        assert_eq!(itinerary.daily_schedule.len(), 7);
        assert!(itinerary.total_estimated_cost > 0.0);
    }

    #[test]
    fn test_assemble_without_origin_skips_flights() {
        let mut request = request();
        request.origin = None;
        let itinerary = concierge().assemble(&request).unwrap();
        assert!(itinerary.flights.is_empty());
        assert!(itinerary.total_estimated_cost > 0.0);
    }

    #[test]
    fn test_assemble_rejects_invalid_request() {
        let mut request = request();
        request.end_date = "2024-05-01".to_string();
        assert!(concierge().assemble(&request).is_err());
    }

    #[test]
    fn test_disruption_round_trip() {
        let concierge = concierge();
        let itinerary = concierge.assemble(&request()).unwrap();

        let live = LiveData {
            flight_cancelled: true,
            ..Default::default()
        };
        let report = concierge.detect_disruptions(&itinerary, &live);
        assert!(report.requires_replanning);

        let revised = concierge.revise_itinerary(&itinerary, &report);
        assert!(!revised.new_flights.is_empty());
    }

    #[test]
    fn test_status_covers_all_agents() {
        let status = concierge().status();
        assert_eq!(status.status, "active");
        assert_eq!(status.agents.len(), 9);
        assert!(status.agents.iter().all(|a| a.status == "active"));
    }
}
