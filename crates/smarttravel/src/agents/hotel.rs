//! Hotel agent: accommodation search and recommendations

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AgentStatus;
use crate::llm::GeminiClient;
use crate::prompts;

/// A bookable accommodation option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotelOption {
    pub name: String,
    pub location: String,
    pub star_rating: u8,
    pub price_per_night: f64,
    pub amenities: Vec<String>,
    pub guest_rating: f64,
    pub room_type: String,
}

/// Sorting preference when picking a hotel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotelSort {
    Price,
    #[default]
    Rating,
    Stars,
}

/// Agent specialized in hotel search and recommendations
pub struct HotelAgent {
    client: GeminiClient,
    initialized_at: DateTime<Utc>,
}

impl HotelAgent {
    pub fn new(client: GeminiClient) -> Self {
        info!("HotelAgent initialized");
        Self {
            client: client.with_system_prompt(prompts::HOTEL_SYSTEM_PROMPT),
            initialized_at: Utc::now(),
        }
    }

    /// Search for available hotels
    ///
    /// Synthesized locally; a booking provider would slot in here.
    pub fn search(&self, destination: &str) -> Vec<HotelOption> {
        info!("Searching hotels in {}", destination);

        vec![
            HotelOption {
                name: "Grand Hotel".to_string(),
                location: format!("Downtown {}", destination),
                star_rating: 5,
                price_per_night: 250.0,
                amenities: ["WiFi", "Pool", "Spa", "Restaurant", "Gym"]
                    .map(String::from)
                    .to_vec(),
                guest_rating: 4.8,
                room_type: "Deluxe".to_string(),
            },
            HotelOption {
                name: "City Inn".to_string(),
                location: format!("Central {}", destination),
                star_rating: 3,
                price_per_night: 95.0,
                amenities: ["WiFi", "Breakfast", "Parking"].map(String::from).to_vec(),
                guest_rating: 4.2,
                room_type: "Standard".to_string(),
            },
            HotelOption {
                name: "Budget Stay".to_string(),
                location: format!("{} Suburbs", destination),
                star_rating: 2,
                price_per_night: 55.0,
                amenities: ["WiFi", "Parking"].map(String::from).to_vec(),
                guest_rating: 3.8,
                room_type: "Basic".to_string(),
            },
        ]
    }

    /// Pick the best hotel by the given preference; `None` for no options
    pub fn best<'a>(
        &self,
        hotels: &'a [HotelOption],
        preference: HotelSort,
    ) -> Option<&'a HotelOption> {
        match preference {
            HotelSort::Price => hotels
                .iter()
                .min_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night)),
            HotelSort::Rating => hotels
                .iter()
                .max_by(|a, b| a.guest_rating.total_cmp(&b.guest_rating)),
            HotelSort::Stars => hotels.iter().max_by_key(|h| h.star_rating),
        }
    }

    /// Total accommodation cost for a stay
    pub fn total_cost(&self, hotel: &HotelOption, nights: u32, rooms: u32) -> f64 {
        hotel.price_per_night * f64::from(nights) * f64::from(rooms)
    }

    /// Ask the model to recommend among the found options
    pub async fn recommend(&self, hotels: &[HotelOption], nights: u32) -> Result<String> {
        let options: Vec<String> = hotels
            .iter()
            .map(|h| {
                format!(
                    "{} ({}★, guest rating {}) in {}, ${:.2}/night, amenities: {}",
                    h.name,
                    h.star_rating,
                    h.guest_rating,
                    h.location,
                    h.price_per_night,
                    h.amenities.join(", ")
                )
            })
            .collect();

        let prompt = format!(
            "These hotels are available for a {}-night stay:\n{}\n\nRecommend which to \
             book and why, weighing location, rating, and total cost. Two or three sentences.",
            nights,
            options.join("\n")
        );

        self.client.generate(&prompt).await
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus::active("HotelAgent", self.initialized_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerationConfig;

    fn agent() -> HotelAgent {
        let client = GeminiClient::new(
            "test-key".to_string(),
            "gemini-1.5-pro".to_string(),
            GenerationConfig::default(),
            30,
            0,
        )
        .unwrap();
        HotelAgent::new(client)
    }

    #[test]
    fn test_search_hotels() {
        let hotels = agent().search("Paris");
        assert_eq!(hotels.len(), 3);
        assert_eq!(hotels[0].name, "Grand Hotel");
        assert_eq!(hotels[0].location, "Downtown Paris");
    }

    #[test]
    fn test_best_by_each_preference() {
        let agent = agent();
        let hotels = agent.search("Paris");
        assert_eq!(
            agent.best(&hotels, HotelSort::Price).unwrap().name,
            "Budget Stay"
        );
        assert_eq!(
            agent.best(&hotels, HotelSort::Rating).unwrap().name,
            "Grand Hotel"
        );
        assert_eq!(agent.best(&hotels, HotelSort::Stars).unwrap().star_rating, 5);
    }

    #[test]
    fn test_best_empty_list() {
        assert!(agent().best(&[], HotelSort::Rating).is_none());
    }

    #[test]
    fn test_total_cost() {
        let agent = agent();
        let hotel = HotelOption {
            name: "Test Hotel".to_string(),
            location: "Test Location".to_string(),
            star_rating: 4,
            price_per_night: 100.0,
            amenities: vec!["WiFi".to_string()],
            guest_rating: 4.0,
            room_type: "Standard".to_string(),
        };
        assert_eq!(agent.total_cost(&hotel, 5, 2), 1000.0);
    }
}
