//! Restaurant agent: dining discovery and recommendations

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AgentStatus;
use crate::llm::GeminiClient;
use crate::prompts;
use crate::trip::Preferences;

/// A restaurant candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub cuisine: String,
    pub location: String,
    pub description: String,
    pub rating: f64,
    /// "$", "$$", "$$$" or "$$$$"
    pub price_range: String,
    pub average_cost_per_person: f64,
    /// e.g. "vegetarian", "vegan", "gluten-free"
    pub dietary_options: Vec<String>,
    pub open_hours: String,
    pub reservations_required: bool,
    pub distance_km: f64,
}

/// Meal slot within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
}

/// One day of dining picks
#[derive(Debug, Clone, Serialize)]
pub struct DiningDay {
    pub day_number: u32,
    pub breakfast: Option<Restaurant>,
    pub lunch: Option<Restaurant>,
    pub dinner: Option<Restaurant>,
}

/// Agent specialized in restaurant discovery and dining recommendations
pub struct RestaurantAgent {
    client: GeminiClient,
    initialized_at: DateTime<Utc>,
}

impl RestaurantAgent {
    pub fn new(client: GeminiClient) -> Self {
        info!("RestaurantAgent initialized");
        Self {
            client: client.with_system_prompt(prompts::RESTAURANT_SYSTEM_PROMPT),
            initialized_at: Utc::now(),
        }
    }

    /// Discover restaurants in a destination, applying the given filters
    ///
    /// Synthesized locally; a places provider would slot in here.
    pub fn discover(
        &self,
        destination: &str,
        cuisines: &[String],
        dietary_restrictions: &[String],
        price_range: Option<&str>,
        max_results: usize,
    ) -> Vec<Restaurant> {
        info!("Discovering restaurants in {}", destination);

        let mut restaurants = catalog(destination);

        if !cuisines.is_empty() {
            restaurants.retain(|r| cuisines.iter().any(|c| c == &r.cuisine));
        }
        if !dietary_restrictions.is_empty() {
            restaurants.retain(|r| {
                dietary_restrictions
                    .iter()
                    .any(|d| r.dietary_options.contains(d))
            });
        }
        if let Some(range) = price_range {
            restaurants.retain(|r| r.price_range == range);
        }

        restaurants.truncate(max_results);
        restaurants
    }

    /// Top-rated restaurants, best first
    pub fn top(&self, restaurants: &[Restaurant], count: usize) -> Vec<Restaurant> {
        let mut sorted = restaurants.to_vec();
        sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        sorted.truncate(count);
        sorted
    }

    /// Restaurants within a per-person budget
    pub fn budget_friendly(
        &self,
        restaurants: &[Restaurant],
        max_per_person: f64,
    ) -> Vec<Restaurant> {
        restaurants
            .iter()
            .filter(|r| r.average_cost_per_person <= max_per_person)
            .cloned()
            .collect()
    }

    /// Restaurants within walking distance
    pub fn nearby(&self, restaurants: &[Restaurant], max_distance_km: f64) -> Vec<Restaurant> {
        restaurants
            .iter()
            .filter(|r| r.distance_km <= max_distance_km)
            .cloned()
            .collect()
    }

    /// Total estimated dining cost for a party
    pub fn dining_cost(&self, restaurants: &[Restaurant], people: u32) -> f64 {
        restaurants
            .iter()
            .map(|r| r.average_cost_per_person * f64::from(people))
            .sum()
    }

    /// Top picks for one meal slot
    ///
    /// Breakfast defaults to american/french cuisine when the traveler has
    /// no stated preference.
    pub fn by_meal_type(
        &self,
        destination: &str,
        meal: Meal,
        preferences: &Preferences,
    ) -> Vec<Restaurant> {
        let breakfast_default = ["american".to_string(), "french".to_string()];
        let cuisines: &[String] = if preferences.cuisines.is_empty() && meal == Meal::Breakfast {
            &breakfast_default
        } else {
            &preferences.cuisines
        };

        let restaurants = self.discover(
            destination,
            cuisines,
            &preferences.dietary_restrictions,
            preferences.price_range.as_deref(),
            10,
        );
        self.top(&restaurants, 3)
    }

    /// One restaurant pick per meal per day
    pub fn dining_plan(
        &self,
        destination: &str,
        days: u32,
        preferences: &Preferences,
    ) -> Vec<DiningDay> {
        (1..=days)
            .map(|day_number| DiningDay {
                day_number,
                breakfast: self
                    .by_meal_type(destination, Meal::Breakfast, preferences)
                    .into_iter()
                    .next(),
                lunch: self
                    .by_meal_type(destination, Meal::Lunch, preferences)
                    .into_iter()
                    .next(),
                dinner: self
                    .by_meal_type(destination, Meal::Dinner, preferences)
                    .into_iter()
                    .next(),
            })
            .collect()
    }

    /// Ask the model to recommend among the found options
    pub async fn recommend(
        &self,
        destination: &str,
        restaurants: &[Restaurant],
    ) -> Result<String> {
        let options: Vec<String> = restaurants
            .iter()
            .map(|r| {
                format!(
                    "{} ({}, {}, rating {}): {} - avg ${:.2}/person",
                    r.name, r.cuisine, r.price_range, r.rating, r.description,
                    r.average_cost_per_person
                )
            })
            .collect();

        let prompt = format!(
            "A traveler is visiting {} and these restaurants stand out:\n{}\n\nSuggest \
             which are worth prioritizing and for which meals. Keep it short.",
            destination,
            options.join("\n")
        );

        self.client.generate(&prompt).await
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus::active("RestaurantAgent", self.initialized_at)
    }
}

/// The discovery catalog for a destination
fn catalog(destination: &str) -> Vec<Restaurant> {
    vec![
        Restaurant {
            name: format!("La Bella {}", destination),
            cuisine: "italian".to_string(),
            location: format!("Downtown, {}", destination),
            description: "Authentic Italian cuisine with fresh pasta and wood-fired pizzas"
                .to_string(),
            rating: 4.6,
            price_range: "$$".to_string(),
            average_cost_per_person: 35.0,
            dietary_options: ["vegetarian", "gluten-free"].map(String::from).to_vec(),
            open_hours: "11:00-22:00".to_string(),
            reservations_required: true,
            distance_km: 1.2,
        },
        Restaurant {
            name: format!("{} Sushi Bar", destination),
            cuisine: "japanese".to_string(),
            location: format!("Financial District, {}", destination),
            description: "Modern Japanese restaurant with sushi bar and omakase menu".to_string(),
            rating: 4.8,
            price_range: "$$$".to_string(),
            average_cost_per_person: 65.0,
            dietary_options: ["gluten-free"].map(String::from).to_vec(),
            open_hours: "11:00-22:00".to_string(),
            reservations_required: true,
            distance_km: 0.8,
        },
        Restaurant {
            name: format!("Spice of {}", destination),
            cuisine: "indian".to_string(),
            location: format!("Cultural Quarter, {}", destination),
            description: "Traditional Indian restaurant with regional specialties".to_string(),
            rating: 4.5,
            price_range: "$$".to_string(),
            average_cost_per_person: 30.0,
            dietary_options: ["vegetarian", "vegan", "gluten-free"]
                .map(String::from)
                .to_vec(),
            open_hours: "11:00-22:00".to_string(),
            reservations_required: false,
            distance_km: 2.1,
        },
        Restaurant {
            name: "Green Garden Bistro".to_string(),
            cuisine: "vegetarian".to_string(),
            location: format!("Arts District, {}", destination),
            description: "Plant-based restaurant with creative vegetarian dishes".to_string(),
            rating: 4.7,
            price_range: "$$".to_string(),
            average_cost_per_person: 28.0,
            dietary_options: ["vegetarian", "vegan", "gluten-free"]
                .map(String::from)
                .to_vec(),
            open_hours: "11:00-22:00".to_string(),
            reservations_required: false,
            distance_km: 1.5,
        },
        Restaurant {
            name: format!("{} Street Food Market", destination),
            cuisine: "international".to_string(),
            location: format!("Market Square, {}", destination),
            description: "Vibrant food market with diverse international cuisines".to_string(),
            rating: 4.4,
            price_range: "$".to_string(),
            average_cost_per_person: 15.0,
            dietary_options: ["vegetarian", "vegan", "halal"].map(String::from).to_vec(),
            open_hours: "11:00-22:00".to_string(),
            reservations_required: false,
            distance_km: 0.5,
        },
        Restaurant {
            name: format!("Le Gourmet {}", destination),
            cuisine: "french".to_string(),
            location: format!("Historic Center, {}", destination),
            description: "Fine dining French restaurant with Michelin-star experience".to_string(),
            rating: 4.9,
            price_range: "$$$$".to_string(),
            average_cost_per_person: 120.0,
            dietary_options: ["vegetarian"].map(String::from).to_vec(),
            open_hours: "11:00-22:00".to_string(),
            reservations_required: true,
            distance_km: 1.8,
        },
        Restaurant {
            name: "Taco Fiesta".to_string(),
            cuisine: "mexican".to_string(),
            location: format!("Beach District, {}", destination),
            description: "Casual Mexican eatery with authentic tacos and margaritas".to_string(),
            rating: 4.3,
            price_range: "$".to_string(),
            average_cost_per_person: 20.0,
            dietary_options: ["vegetarian", "vegan", "gluten-free"]
                .map(String::from)
                .to_vec(),
            open_hours: "11:00-22:00".to_string(),
            reservations_required: false,
            distance_km: 3.2,
        },
        Restaurant {
            name: format!("{} BBQ House", destination),
            cuisine: "american".to_string(),
            location: format!("Riverside, {}", destination),
            description: "American steakhouse with premium cuts and craft cocktails".to_string(),
            rating: 4.5,
            price_range: "$$$".to_string(),
            average_cost_per_person: 70.0,
            dietary_options: ["gluten-free"].map(String::from).to_vec(),
            open_hours: "11:00-22:00".to_string(),
            reservations_required: true,
            distance_km: 2.5,
        },
    ]
}
