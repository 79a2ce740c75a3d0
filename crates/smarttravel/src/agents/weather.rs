//! Weather agent: forecasts, warnings, and climate advice

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AgentStatus;
use crate::llm::GeminiClient;
use crate::prompts;

/// Forecast for a single day at a destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub date: String,
    pub location: String,
    pub temperature_high: f64,
    pub temperature_low: f64,
    /// e.g. "sunny", "rainy", "cloudy"
    pub condition: String,
    /// 0-100
    pub precipitation_chance: f64,
    /// 0-100
    pub humidity: f64,
    /// km/h
    pub wind_speed: f64,
    pub description: String,
}

/// Aggregate statistics over a trip's forecasts
#[derive(Debug, Clone, Serialize)]
pub struct WeatherSummary {
    pub average_high: f64,
    pub average_low: f64,
    pub max_precipitation_chance: f64,
    pub rainy_days: usize,
    pub total_days: usize,
}

/// Activity suitability advice for a single day
#[derive(Debug, Clone, Serialize)]
pub struct ActivityAdvice {
    pub outdoor_suitable: bool,
    pub indoor_recommended: bool,
    pub advice: Vec<String>,
}

/// Agent specialized in weather forecasts and climate recommendations
pub struct WeatherAgent {
    client: GeminiClient,
    initialized_at: DateTime<Utc>,
}

impl WeatherAgent {
    pub fn new(client: GeminiClient) -> Self {
        info!("WeatherAgent initialized");
        Self {
            client: client.with_system_prompt(prompts::WEATHER_SYSTEM_PROMPT),
            initialized_at: Utc::now(),
        }
    }

    /// Get the day-by-day forecast for a destination and date range
    ///
    /// Synthesized locally; a live weather provider would slot in here.
    pub fn forecast(
        &self,
        destination: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Vec<WeatherForecast> {
        info!("Fetching weather forecast for {}", destination);

        let days = (end_date - start_date).num_days() + 1;

        (0..days)
            .map(|i| {
                let date = start_date + Duration::days(i);
                let condition = if i % 2 == 0 { "sunny" } else { "partly cloudy" };
                WeatherForecast {
                    date: date.format("%Y-%m-%d").to_string(),
                    location: destination.to_string(),
                    temperature_high: 25.0 + (i % 5) as f64,
                    temperature_low: 18.0 + (i % 3) as f64,
                    condition: condition.to_string(),
                    precipitation_chance: 20.0 + (i * 5) as f64,
                    humidity: 60.0 + (i % 10) as f64,
                    wind_speed: 15.0 + (i % 8) as f64,
                    description: format!("Pleasant weather expected in {}", destination),
                }
            })
            .collect()
    }

    /// Aggregate forecast statistics for a trip; `None` for an empty forecast
    pub fn summary(&self, forecasts: &[WeatherForecast]) -> Option<WeatherSummary> {
        if forecasts.is_empty() {
            return None;
        }

        let total = forecasts.len() as f64;
        let avg_high = forecasts.iter().map(|f| f.temperature_high).sum::<f64>() / total;
        let avg_low = forecasts.iter().map(|f| f.temperature_low).sum::<f64>() / total;
        let max_precip = forecasts
            .iter()
            .map(|f| f.precipitation_chance)
            .fold(f64::MIN, f64::max);
        let rainy_days = forecasts
            .iter()
            .filter(|f| f.precipitation_chance > 50.0)
            .count();

        Some(WeatherSummary {
            average_high: round1(avg_high),
            average_low: round1(avg_low),
            max_precipitation_chance: round1(max_precip),
            rainy_days,
            total_days: forecasts.len(),
        })
    }

    /// Identify weather warnings across the forecast window
    pub fn warnings(&self, forecasts: &[WeatherForecast]) -> Vec<String> {
        let mut warnings = Vec::new();

        for forecast in forecasts {
            if forecast.precipitation_chance > 70.0 {
                warnings.push(format!(
                    "High chance of rain on {} ({}%)",
                    forecast.date, forecast.precipitation_chance
                ));
            }
            if forecast.temperature_high > 35.0 {
                warnings.push(format!(
                    "Extreme heat expected on {} ({}°C)",
                    forecast.date, forecast.temperature_high
                ));
            }
            if forecast.temperature_low < 5.0 {
                warnings.push(format!(
                    "Cold weather on {} ({}°C)",
                    forecast.date, forecast.temperature_low
                ));
            }
            if forecast.wind_speed > 40.0 {
                warnings.push(format!(
                    "Strong winds on {} ({} km/h)",
                    forecast.date, forecast.wind_speed
                ));
            }
        }

        warnings
    }

    /// Suggest activity adjustments for a single day's weather
    pub fn activity_adjustments(&self, forecast: &WeatherForecast) -> ActivityAdvice {
        let mut advice = ActivityAdvice {
            outdoor_suitable: true,
            indoor_recommended: false,
            advice: Vec::new(),
        };

        if forecast.precipitation_chance > 60.0 {
            advice.outdoor_suitable = false;
            advice.indoor_recommended = true;
            advice
                .advice
                .push("Consider indoor activities like museums".to_string());
        }
        if forecast.temperature_high > 32.0 {
            advice
                .advice
                .push("Stay hydrated and avoid midday sun".to_string());
            advice
                .advice
                .push("Plan outdoor activities for morning/evening".to_string());
        }
        if forecast.temperature_low < 10.0 {
            advice
                .advice
                .push("Bring warm clothing for cooler temperatures".to_string());
        }
        if advice.advice.is_empty() {
            advice
                .advice
                .push("Great day for outdoor exploration!".to_string());
        }

        advice
    }

    /// Ask the model for travel-relevant weather guidance
    pub async fn insights(
        &self,
        destination: &str,
        forecasts: &[WeatherForecast],
    ) -> Result<String> {
        let conditions: Vec<String> = forecasts
            .iter()
            .map(|f| {
                format!(
                    "{}: {} / high {}°C, low {}°C, {}% chance of rain",
                    f.date, f.condition, f.temperature_high, f.temperature_low,
                    f.precipitation_chance
                )
            })
            .collect();

        let prompt = format!(
            "The forecast for a trip to {} is:\n{}\n\nSummarize what this weather means \
             for the trip: what to pack, which days suit outdoor plans, and any days \
             better spent indoors. Keep it brief and practical.",
            destination,
            conditions.join("\n")
        );

        self.client.generate(&prompt).await
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus::active("WeatherAgent", self.initialized_at)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerationConfig;

    fn agent() -> WeatherAgent {
        let client = GeminiClient::new(
            "test-key".to_string(),
            "gemini-1.5-pro".to_string(),
            GenerationConfig::default(),
            30,
            0,
        )
        .unwrap();
        WeatherAgent::new(client)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_forecast_covers_every_day() {
        let agent = agent();
        let forecasts = agent.forecast("Paris", date("2024-06-01"), date("2024-06-07"));
        assert_eq!(forecasts.len(), 7);
        assert_eq!(forecasts[0].date, "2024-06-01");
        assert_eq!(forecasts[6].date, "2024-06-07");
        assert_eq!(forecasts[0].condition, "sunny");
        assert_eq!(forecasts[1].condition, "partly cloudy");
    }

    #[test]
    fn test_summary() {
        let agent = agent();
        let forecasts = agent.forecast("Paris", date("2024-06-01"), date("2024-06-07"));
        let summary = agent.summary(&forecasts).unwrap();
        assert_eq!(summary.total_days, 7);
        // Precipitation climbs 20, 25, ... 50; nothing above the rainy threshold
        assert_eq!(summary.rainy_days, 0);
        assert_eq!(summary.max_precipitation_chance, 50.0);
    }

    #[test]
    fn test_summary_empty() {
        assert!(agent().summary(&[]).is_none());
    }

    #[test]
    fn test_warnings_trigger_on_thresholds() {
        let agent = agent();
        let forecast = WeatherForecast {
            date: "2024-06-01".to_string(),
            location: "Paris".to_string(),
            temperature_high: 38.0,
            temperature_low: 2.0,
            condition: "stormy".to_string(),
            precipitation_chance: 85.0,
            humidity: 90.0,
            wind_speed: 50.0,
            description: String::new(),
        };

        let warnings = agent.warnings(&[forecast]);
        assert_eq!(warnings.len(), 4);
    }

    #[test]
    fn test_activity_adjustments_rainy_day() {
        let agent = agent();
        let forecasts = agent.forecast("Paris", date("2024-06-01"), date("2024-06-01"));
        let mut forecast = forecasts.into_iter().next().unwrap();
        forecast.precipitation_chance = 75.0;

        let advice = agent.activity_adjustments(&forecast);
        assert!(!advice.outdoor_suitable);
        assert!(advice.indoor_recommended);
    }

    #[test]
    fn test_activity_adjustments_clear_day() {
        let agent = agent();
        let forecasts = agent.forecast("Paris", date("2024-06-01"), date("2024-06-01"));
        let advice = agent.activity_adjustments(&forecasts[0]);
        assert!(advice.outdoor_suitable);
        assert_eq!(advice.advice, vec!["Great day for outdoor exploration!"]);
    }
}
