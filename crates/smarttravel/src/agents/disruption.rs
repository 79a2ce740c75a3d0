//! Disruption agent: detects travel disruptions and revises plans

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Activity, AgentStatus, DayPlan, FlightOption};
use crate::llm::GeminiClient;
use crate::prompts;
use crate::trip::TravelItinerary;

/// Kinds of travel disruptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisruptionKind {
    FlightCancelled,
    FlightDelayed,
    SevereWeather,
    HotelUnavailable,
    AttractionClosed,
    TransportationIssue,
    Other,
}

/// Severity levels for disruptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisruptionSeverity {
    /// Minor inconvenience, easy workaround
    Low,
    /// Requires replanning, moderate impact
    Medium,
    /// Significant impact, major replanning needed
    High,
    /// Trip-ending issue, immediate action required
    Critical,
}

impl DisruptionSeverity {
    fn weight(self) -> f64 {
        match self {
            Self::Low => 10.0,
            Self::Medium => 30.0,
            Self::High => 60.0,
            Self::Critical => 100.0,
        }
    }
}

/// A single detected disruption
#[derive(Debug, Clone, Serialize)]
pub struct Disruption {
    pub kind: DisruptionKind,
    pub severity: DisruptionSeverity,
    pub affected_date: String,
    pub description: String,
    /// e.g. ["flight", "day_1_activities"]
    pub affected_components: Vec<String>,
}

/// Complete report of all disruptions found
#[derive(Debug, Clone, Serialize)]
pub struct DisruptionReport {
    pub disruptions: Vec<Disruption>,
    /// 0-100 scale
    pub risk_score: f64,
    pub recommendations: Vec<String>,
    pub requires_replanning: bool,
}

/// A severe weather event reported by live data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherEvent {
    pub date: String,
    pub description: String,
}

/// Real-time signals fed into disruption detection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LiveData {
    pub flight_cancelled: bool,
    pub flight_delayed_hours: f64,
    pub severe_weather: Option<WeatherEvent>,
}

/// One concrete change made while revising an itinerary
#[derive(Debug, Clone, Serialize)]
pub struct ItineraryChange {
    pub kind: String,
    pub description: String,
    pub affected_date: String,
}

/// Revised itinerary after handling disruptions
#[derive(Debug, Clone, Serialize)]
pub struct RevisedItinerary {
    pub disruptions_addressed: Vec<Disruption>,
    pub changes: Vec<ItineraryChange>,
    pub new_flights: Vec<FlightOption>,
    pub new_daily_schedule: Vec<DayPlan>,
    pub estimated_additional_cost: f64,
    pub revision_notes: String,
}

/// Agent specialized in detecting and handling travel disruptions
pub struct DisruptionAgent {
    client: GeminiClient,
    initialized_at: DateTime<Utc>,
}

impl DisruptionAgent {
    pub fn new(client: GeminiClient) -> Self {
        info!("DisruptionAgent initialized");
        Self {
            client: client.with_system_prompt(prompts::DISRUPTION_SYSTEM_PROMPT),
            initialized_at: Utc::now(),
        }
    }

    /// Detect potential disruptions in an itinerary from live signals
    pub fn detect(&self, itinerary: &TravelItinerary, live_data: &LiveData) -> DisruptionReport {
        info!(
            "Checking itinerary for {} for disruptions",
            itinerary.destination
        );

        let start_date = itinerary
            .daily_schedule
            .first()
            .map(|d| d.date.clone())
            .unwrap_or_default();

        let mut disruptions = Vec::new();

        if live_data.flight_cancelled {
            disruptions.push(Disruption {
                kind: DisruptionKind::FlightCancelled,
                severity: DisruptionSeverity::High,
                affected_date: start_date.clone(),
                description: "Outbound flight has been cancelled".to_string(),
                affected_components: ["flight", "day_1_activities"].map(String::from).to_vec(),
            });
        }

        if live_data.flight_delayed_hours > 3.0 {
            disruptions.push(Disruption {
                kind: DisruptionKind::FlightDelayed,
                severity: DisruptionSeverity::Medium,
                affected_date: start_date.clone(),
                description: format!(
                    "Flight delayed by {} hours",
                    live_data.flight_delayed_hours
                ),
                affected_components: ["flight", "day_1_activities"].map(String::from).to_vec(),
            });
        }

        if let Some(ref weather) = live_data.severe_weather {
            let description = if weather.description.is_empty() {
                "Severe weather expected".to_string()
            } else {
                weather.description.clone()
            };
            disruptions.push(Disruption {
                kind: DisruptionKind::SevereWeather,
                severity: DisruptionSeverity::Medium,
                affected_date: weather.date.clone(),
                description,
                affected_components: vec!["outdoor_activities".to_string()],
            });
        }

        let risk_score = Self::risk_score(&disruptions);
        let recommendations = Self::recommendations(&disruptions);
        let requires_replanning = disruptions
            .iter()
            .any(|d| d.severity >= DisruptionSeverity::High);

        DisruptionReport {
            disruptions,
            risk_score,
            recommendations,
            requires_replanning,
        }
    }

    /// Generate a revised itinerary that addresses the reported disruptions
    pub fn revise(
        &self,
        itinerary: &TravelItinerary,
        report: &DisruptionReport,
    ) -> RevisedItinerary {
        info!("Generating revised itinerary");

        let mut changes = Vec::new();
        let mut new_flights = Vec::new();
        let mut new_daily_schedule = Vec::new();
        let mut additional_cost = 0.0;
        let mut notes = Vec::new();

        for disruption in &report.disruptions {
            match disruption.kind {
                DisruptionKind::FlightCancelled => {
                    new_flights = Self::alternative_flights(
                        &itinerary.flights,
                        &disruption.affected_date,
                    );
                    changes.push(ItineraryChange {
                        kind: "flight_replacement".to_string(),
                        description: "Booked alternative flight".to_string(),
                        affected_date: disruption.affected_date.clone(),
                    });
                    additional_cost += 200.0; // rebooking fee
                    notes.push("Flight rebooked to next available departure");
                }
                DisruptionKind::FlightDelayed => {
                    new_daily_schedule = Self::shift_for_delay(&itinerary.daily_schedule);
                    changes.push(ItineraryChange {
                        kind: "schedule_adjustment".to_string(),
                        description: "Day 1 activities rescheduled".to_string(),
                        affected_date: disruption.affected_date.clone(),
                    });
                    notes.push("First day activities postponed to accommodate delay");
                }
                DisruptionKind::SevereWeather => {
                    new_daily_schedule = Self::move_indoors(
                        &itinerary.daily_schedule,
                        &disruption.affected_date,
                    );
                    changes.push(ItineraryChange {
                        kind: "activity_replacement".to_string(),
                        description: "Outdoor activities replaced with indoor alternatives"
                            .to_string(),
                        affected_date: disruption.affected_date.clone(),
                    });
                    notes.push("Moved outdoor activities to indoor venues due to weather");
                }
                _ => {}
            }
        }

        let revision_notes = if notes.is_empty() {
            "Minor adjustments made".to_string()
        } else {
            notes.join(" | ")
        };

        RevisedItinerary {
            disruptions_addressed: report.disruptions.clone(),
            changes,
            new_flights,
            new_daily_schedule,
            estimated_additional_cost: additional_cost,
            revision_notes,
        }
    }

    /// Ask the model for contingency advice given a disruption report
    pub async fn assess(
        &self,
        destination: &str,
        report: &DisruptionReport,
    ) -> Result<String> {
        let issues: Vec<String> = report
            .disruptions
            .iter()
            .map(|d| format!("{} ({:?}): {}", d.affected_date, d.severity, d.description))
            .collect();

        let prompt = format!(
            "A trip to {} has these disruptions (risk score {}):\n{}\n\nAdvise the \
             traveler on immediate next steps and fallbacks. Keep it short and calm.",
            destination,
            report.risk_score,
            issues.join("\n")
        );

        self.client.generate(&prompt).await
    }

    /// Overall risk score, capped at 100
    fn risk_score(disruptions: &[Disruption]) -> f64 {
        let total: f64 = disruptions.iter().map(|d| d.severity.weight()).sum();
        total.min(100.0)
    }

    fn recommendations(disruptions: &[Disruption]) -> Vec<String> {
        let mut recommendations = Vec::new();

        for disruption in disruptions {
            match disruption.kind {
                DisruptionKind::FlightCancelled => {
                    recommendations
                        .push("Contact airline immediately for rebooking options".to_string());
                    recommendations
                        .push("Consider flexible accommodation if arrival is delayed".to_string());
                }
                DisruptionKind::SevereWeather => {
                    recommendations.push("Have backup indoor activities planned".to_string());
                    recommendations.push("Check local weather alerts regularly".to_string());
                }
                DisruptionKind::AttractionClosed => {
                    recommendations
                        .push("Research alternative attractions in the area".to_string());
                }
                _ => {}
            }
        }

        recommendations
    }

    /// Alternative flights for a cancelled departure
    fn alternative_flights(original: &[FlightOption], affected_date: &str) -> Vec<FlightOption> {
        let (departure_city, arrival_city) = original
            .first()
            .map(|f| (f.departure_city.clone(), f.arrival_city.clone()))
            .unwrap_or_default();

        vec![FlightOption {
            airline: "Alternative Airways".to_string(),
            departure_city,
            arrival_city,
            departure_time: format!("{}T14:00:00", affected_date),
            arrival_time: format!("{}T16:30:00", affected_date),
            price: 450.0,
            duration_hours: 2.5,
            stops: 0,
        }]
    }

    /// Drop the earliest activity from day 1 to absorb a delayed arrival
    fn shift_for_delay(daily_schedule: &[DayPlan]) -> Vec<DayPlan> {
        let mut adjusted = daily_schedule.to_vec();
        if let Some(day) = adjusted.first_mut() {
            if !day.activities.is_empty() {
                day.activities.remove(0);
            }
        }
        adjusted
    }

    /// Replace the affected day's activities with indoor alternatives
    fn move_indoors(daily_schedule: &[DayPlan], affected_date: &str) -> Vec<DayPlan> {
        let indoor = [
            ("10:00", "Visit local museum"),
            ("13:00", "Explore art gallery"),
            ("15:00", "Indoor market tour"),
            ("17:00", "Cooking class"),
        ];

        let mut adjusted = daily_schedule.to_vec();
        for day in &mut adjusted {
            if day.date == affected_date {
                day.activities = indoor
                    .iter()
                    .map(|(time, description)| Activity {
                        time: (*time).to_string(),
                        kind: "indoor".to_string(),
                        description: (*description).to_string(),
                    })
                    .collect();
                day.notes = "Schedule adjusted for indoor activities".to_string();
            }
        }
        adjusted
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus::active("DisruptionAgent", self.initialized_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerationConfig;

    fn agent() -> DisruptionAgent {
        let client = GeminiClient::new(
            "test-key".to_string(),
            "gemini-1.5-pro".to_string(),
            GenerationConfig::default(),
            30,
            0,
        )
        .unwrap();
        DisruptionAgent::new(client)
    }

    fn sample_itinerary() -> TravelItinerary {
        TravelItinerary {
            destination: "Paris".to_string(),
            duration_days: 2,
            flights: vec![FlightOption {
                airline: "Mock Airlines".to_string(),
                departure_city: "NYC".to_string(),
                arrival_city: "Paris".to_string(),
                departure_time: "2024-06-01T08:00:00".to_string(),
                arrival_time: "2024-06-01T12:00:00".to_string(),
                price: 350.0,
                duration_hours: 4.0,
                stops: 0,
            }],
            accommodations: vec![],
            attractions: vec![],
            daily_schedule: vec![
                DayPlan {
                    day_number: 1,
                    date: "2024-06-01".to_string(),
                    activities: vec![
                        Activity {
                            time: "09:00".to_string(),
                            kind: "breakfast".to_string(),
                            description: "Breakfast at hotel".to_string(),
                        },
                        Activity {
                            time: "10:00".to_string(),
                            kind: "exploration".to_string(),
                            description: "Explore Paris".to_string(),
                        },
                    ],
                    notes: String::new(),
                },
                DayPlan {
                    day_number: 2,
                    date: "2024-06-02".to_string(),
                    activities: vec![],
                    notes: String::new(),
                },
            ],
            total_estimated_cost: 0.0,
            summary: String::new(),
        }
    }

    #[test]
    fn test_detect_clean_itinerary() {
        let report = agent().detect(&sample_itinerary(), &LiveData::default());
        assert!(report.disruptions.is_empty());
        assert_eq!(report.risk_score, 0.0);
        assert!(!report.requires_replanning);
    }

    #[test]
    fn test_detect_cancelled_flight_requires_replanning() {
        let live = LiveData {
            flight_cancelled: true,
            ..Default::default()
        };
        let report = agent().detect(&sample_itinerary(), &live);
        assert_eq!(report.disruptions.len(), 1);
        assert_eq!(report.disruptions[0].kind, DisruptionKind::FlightCancelled);
        assert_eq!(report.risk_score, 60.0);
        assert!(report.requires_replanning);
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn test_detect_short_delay_is_ignored() {
        let live = LiveData {
            flight_delayed_hours: 2.0,
            ..Default::default()
        };
        let report = agent().detect(&sample_itinerary(), &live);
        assert!(report.disruptions.is_empty());
    }

    #[test]
    fn test_risk_score_caps_at_100() {
        let live = LiveData {
            flight_cancelled: true,
            flight_delayed_hours: 5.0,
            severe_weather: Some(WeatherEvent {
                date: "2024-06-02".to_string(),
                description: "Thunderstorms".to_string(),
            }),
        };
        let report = agent().detect(&sample_itinerary(), &live);
        assert_eq!(report.disruptions.len(), 3);
        assert_eq!(report.risk_score, 100.0f64.min(60.0 + 30.0 + 30.0));
    }

    #[test]
    fn test_revise_cancelled_flight() {
        let agent = agent();
        let itinerary = sample_itinerary();
        let live = LiveData {
            flight_cancelled: true,
            ..Default::default()
        };
        let report = agent.detect(&itinerary, &live);
        let revised = agent.revise(&itinerary, &report);

        assert_eq!(revised.new_flights.len(), 1);
        assert_eq!(revised.new_flights[0].airline, "Alternative Airways");
        assert_eq!(revised.new_flights[0].departure_city, "NYC");
        assert_eq!(revised.estimated_additional_cost, 200.0);
        assert!(revised.revision_notes.contains("rebooked"));
    }

    #[test]
    fn test_revise_weather_moves_day_indoors() {
        let agent = agent();
        let itinerary = sample_itinerary();
        let live = LiveData {
            severe_weather: Some(WeatherEvent {
                date: "2024-06-01".to_string(),
                description: String::new(),
            }),
            ..Default::default()
        };
        let report = agent.detect(&itinerary, &live);
        let revised = agent.revise(&itinerary, &report);

        let day1 = &revised.new_daily_schedule[0];
        assert!(day1.activities.iter().all(|a| a.kind == "indoor"));
        assert_eq!(day1.notes, "Schedule adjusted for indoor activities");
        // Other days untouched
        assert!(revised.new_daily_schedule[1].activities.is_empty());
    }

    #[test]
    fn test_revise_nothing_to_do() {
        let agent = agent();
        let itinerary = sample_itinerary();
        let report = agent.detect(&itinerary, &LiveData::default());
        let revised = agent.revise(&itinerary, &report);
        assert_eq!(revised.revision_notes, "Minor adjustments made");
    }
}
