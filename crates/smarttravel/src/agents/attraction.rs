//! Attraction agent: local sights and activities

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AgentStatus;
use crate::llm::GeminiClient;
use crate::prompts;

/// A local attraction or activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attraction {
    pub name: String,
    /// e.g. "museum", "park", "landmark"
    pub category: String,
    pub location: String,
    pub description: String,
    pub rating: f64,
    pub price: f64,
    pub duration_hours: f64,
    pub open_hours: String,
}

/// Agent specialized in attraction discovery and recommendations
pub struct AttractionAgent {
    client: GeminiClient,
    initialized_at: DateTime<Utc>,
}

impl AttractionAgent {
    pub fn new(client: GeminiClient) -> Self {
        info!("AttractionAgent initialized");
        Self {
            client: client.with_system_prompt(prompts::ATTRACTION_SYSTEM_PROMPT),
            initialized_at: Utc::now(),
        }
    }

    /// Discover attractions in a destination
    ///
    /// Synthesized locally; a places provider would slot in here.
    pub fn discover(
        &self,
        destination: &str,
        categories: &[String],
        max_results: usize,
    ) -> Vec<Attraction> {
        info!("Discovering attractions in {}", destination);

        let mut attractions = catalog(destination);

        if !categories.is_empty() {
            attractions.retain(|a| categories.iter().any(|c| c == &a.category));
        }

        attractions.truncate(max_results);
        attractions
    }

    /// Top-rated attractions, best first
    pub fn top(&self, attractions: &[Attraction], count: usize) -> Vec<Attraction> {
        let mut sorted = attractions.to_vec();
        sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        sorted.truncate(count);
        sorted
    }

    /// Total entry cost for the selected attractions
    pub fn activities_cost(&self, attractions: &[Attraction]) -> f64 {
        attractions.iter().map(|a| a.price).sum()
    }

    /// Total hours needed for the selected attractions
    pub fn time_needed(&self, attractions: &[Attraction]) -> f64 {
        attractions.iter().map(|a| a.duration_hours).sum()
    }

    /// Ask the model which attractions deserve priority
    pub async fn recommend(
        &self,
        destination: &str,
        attractions: &[Attraction],
    ) -> Result<String> {
        let options: Vec<String> = attractions
            .iter()
            .map(|a| {
                format!(
                    "{} ({}, rating {}): {} - ${:.2}, ~{} h",
                    a.name, a.category, a.rating, a.description, a.price, a.duration_hours
                )
            })
            .collect();

        let prompt = format!(
            "A traveler is visiting {} and these attractions are nearby:\n{}\n\nSuggest \
             which to prioritize and how to group them. Keep it short.",
            destination,
            options.join("\n")
        );

        self.client.generate(&prompt).await
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus::active("AttractionAgent", self.initialized_at)
    }
}

/// The discovery catalog for a destination
fn catalog(destination: &str) -> Vec<Attraction> {
    vec![
        Attraction {
            name: format!("{} Museum of Art", destination),
            category: "museum".to_string(),
            location: format!("Cultural District, {}", destination),
            description: "World-renowned art museum with extensive collections".to_string(),
            rating: 4.7,
            price: 25.0,
            duration_hours: 3.0,
            open_hours: "09:00-18:00".to_string(),
        },
        Attraction {
            name: format!("{} Central Park", destination),
            category: "park".to_string(),
            location: format!("City Center, {}", destination),
            description: "Beautiful urban park perfect for relaxation".to_string(),
            rating: 4.5,
            price: 0.0,
            duration_hours: 2.0,
            open_hours: "09:00-18:00".to_string(),
        },
        Attraction {
            name: format!("Historic {} Tower", destination),
            category: "landmark".to_string(),
            location: format!("Old Town, {}", destination),
            description: "Iconic landmark with panoramic city views".to_string(),
            rating: 4.8,
            price: 15.0,
            duration_hours: 1.5,
            open_hours: "09:00-18:00".to_string(),
        },
        Attraction {
            name: format!("{} Food Market", destination),
            category: "food".to_string(),
            location: format!("Market District, {}", destination),
            description: "Vibrant food market with local specialties".to_string(),
            rating: 4.6,
            price: 0.0,
            duration_hours: 2.0,
            open_hours: "09:00-18:00".to_string(),
        },
        Attraction {
            name: format!("{} Walking Tour", destination),
            category: "tour".to_string(),
            location: format!("Various locations, {}", destination),
            description: "Guided walking tour through historic neighborhoods".to_string(),
            rating: 4.4,
            price: 35.0,
            duration_hours: 3.0,
            open_hours: "09:00-18:00".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerationConfig;

    fn agent() -> AttractionAgent {
        let client = GeminiClient::new(
            "test-key".to_string(),
            "gemini-1.5-pro".to_string(),
            GenerationConfig::default(),
            30,
            0,
        )
        .unwrap();
        AttractionAgent::new(client)
    }

    #[test]
    fn test_discover_attractions() {
        let attractions = agent().discover("Paris", &[], 10);
        assert_eq!(attractions.len(), 5);
    }

    #[test]
    fn test_discover_with_category_filter() {
        let attractions = agent().discover("Paris", &["museum".to_string()], 10);
        assert_eq!(attractions.len(), 1);
        assert_eq!(attractions[0].category, "museum");
    }

    #[test]
    fn test_top_sorts_by_rating() {
        let agent = agent();
        let attractions = agent.discover("Paris", &[], 10);
        let top = agent.top(&attractions, 2);
        assert_eq!(top[0].name, "Historic Paris Tower");
        assert_eq!(top[1].rating, 4.7);
    }

    #[test]
    fn test_costs_and_time() {
        let agent = agent();
        let attractions = agent.discover("Paris", &[], 10);
        assert_eq!(agent.activities_cost(&attractions), 75.0);
        assert_eq!(agent.time_needed(&attractions), 11.5);
    }
}
