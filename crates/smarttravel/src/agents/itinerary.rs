//! Itinerary agent: day-by-day trip planning

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{AgentStatus, Attraction};
use crate::llm::GeminiClient;
use crate::prompts;

/// A scheduled activity within a day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    /// "HH:MM"
    pub time: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// Plan for a single day of the trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPlan {
    pub day_number: u32,
    pub date: String,
    pub activities: Vec<Activity>,
    pub notes: String,
}

/// A complete day-by-day itinerary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Itinerary {
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<DayPlan>,
    pub total_budget: f64,
    pub summary: String,
}

/// Agent specialized in itinerary planning and scheduling
pub struct ItineraryAgent {
    client: GeminiClient,
    initialized_at: DateTime<Utc>,
}

impl ItineraryAgent {
    pub fn new(client: GeminiClient) -> Self {
        info!("ItineraryAgent initialized");
        Self {
            client: client.with_system_prompt(prompts::ITINERARY_SYSTEM_PROMPT),
            initialized_at: Utc::now(),
        }
    }

    /// Create a complete itinerary, distributing attractions across days
    pub fn create(
        &self,
        destination: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        attractions: &[Attraction],
    ) -> Itinerary {
        info!("Creating itinerary for {}", destination);

        let num_days = ((end_date - start_date).num_days() + 1).max(1) as usize;
        let per_day = if attractions.is_empty() {
            2
        } else {
            (attractions.len() / num_days).max(1)
        };

        let days = (0..num_days)
            .map(|i| {
                let date = start_date + Duration::days(i as i64);
                let day_attractions: &[Attraction] = attractions
                    .get(i * per_day..((i + 1) * per_day).min(attractions.len()))
                    .unwrap_or(&[]);

                let mut activities = vec![Activity {
                    time: "09:00".to_string(),
                    kind: "breakfast".to_string(),
                    description: "Breakfast at hotel".to_string(),
                }];

                let mut hour = 10;
                for attraction in day_attractions {
                    activities.push(Activity {
                        time: format!("{:02}:00", hour),
                        kind: "attraction".to_string(),
                        description: format!("Visit {}", attraction.name),
                    });
                    hour += 3;
                }

                if day_attractions.is_empty() {
                    activities.push(Activity {
                        time: "10:00".to_string(),
                        kind: "exploration".to_string(),
                        description: format!("Explore {}", destination),
                    });
                }

                activities.push(Activity {
                    time: "19:00".to_string(),
                    kind: "dinner".to_string(),
                    description: "Dinner at local restaurant".to_string(),
                });

                DayPlan {
                    day_number: (i + 1) as u32,
                    date: date.format("%Y-%m-%d").to_string(),
                    activities,
                    notes: format!("Day {} in {}", i + 1, destination),
                }
            })
            .collect();

        Itinerary {
            destination: destination.to_string(),
            start_date: start_date.format("%Y-%m-%d").to_string(),
            end_date: end_date.format("%Y-%m-%d").to_string(),
            days,
            total_budget: 0.0,
            summary: format!("{}-day trip to {}", num_days, destination),
        }
    }

    /// Add an activity to a day, keeping the schedule sorted by time
    ///
    /// Out-of-range day numbers leave the itinerary untouched.
    pub fn add_activity(&self, itinerary: &mut Itinerary, day_number: u32, activity: Activity) {
        let Some(day) = itinerary
            .days
            .get_mut(day_number.saturating_sub(1) as usize)
            .filter(|_| day_number >= 1)
        else {
            return;
        };
        day.activities.push(activity);
        day.activities.sort_by(|a, b| a.time.cmp(&b.time));
    }

    /// One-line summary of a day; `None` when out of range
    pub fn daily_summary(&self, itinerary: &Itinerary, day_number: u32) -> Option<String> {
        if day_number < 1 {
            return None;
        }
        let day = itinerary.days.get(day_number as usize - 1)?;
        let descriptions: Vec<&str> = day
            .activities
            .iter()
            .map(|a| a.description.as_str())
            .collect();
        Some(format!("Day {}: {}", day_number, descriptions.join(" → ")))
    }

    /// Ask the model for a narrative walkthrough of the plan
    pub async fn narrate(&self, itinerary: &Itinerary) -> Result<String> {
        let days: Vec<String> = (1..=itinerary.days.len() as u32)
            .filter_map(|n| self.daily_summary(itinerary, n))
            .collect();

        let prompt = format!(
            "Here is the draft schedule for a trip to {}:\n{}\n\nWrite a short, friendly \
             narrative of the trip, one sentence per day, noting the highlights.",
            itinerary.destination,
            days.join("\n")
        );

        self.client.generate(&prompt).await
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus::active("ItineraryAgent", self.initialized_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerationConfig;

    fn agent() -> ItineraryAgent {
        let client = GeminiClient::new(
            "test-key".to_string(),
            "gemini-1.5-pro".to_string(),
            GenerationConfig::default(),
            30,
            0,
        )
        .unwrap();
        ItineraryAgent::new(client)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_attraction(name: &str) -> Attraction {
        Attraction {
            name: name.to_string(),
            category: "museum".to_string(),
            location: "Paris".to_string(),
            description: String::new(),
            rating: 4.5,
            price: 10.0,
            duration_hours: 2.0,
            open_hours: "09:00-18:00".to_string(),
        }
    }

    #[test]
    fn test_create_itinerary() {
        let itinerary = agent().create("Paris", date("2024-06-01"), date("2024-06-07"), &[]);
        assert_eq!(itinerary.destination, "Paris");
        assert_eq!(itinerary.days.len(), 7);
        assert_eq!(itinerary.summary, "7-day trip to Paris");
    }

    #[test]
    fn test_empty_days_get_exploration() {
        let itinerary = agent().create("Paris", date("2024-06-01"), date("2024-06-01"), &[]);
        let kinds: Vec<&str> = itinerary.days[0]
            .activities
            .iter()
            .map(|a| a.kind.as_str())
            .collect();
        assert_eq!(kinds, vec!["breakfast", "exploration", "dinner"]);
    }

    #[test]
    fn test_attractions_distributed_across_days() {
        let attractions = vec![
            sample_attraction("Louvre"),
            sample_attraction("Orsay"),
            sample_attraction("Pompidou"),
            sample_attraction("Rodin"),
        ];
        let itinerary =
            agent().create("Paris", date("2024-06-01"), date("2024-06-02"), &attractions);

        assert_eq!(itinerary.days.len(), 2);
        let day1_visits: Vec<&str> = itinerary.days[0]
            .activities
            .iter()
            .filter(|a| a.kind == "attraction")
            .map(|a| a.description.as_str())
            .collect();
        assert_eq!(day1_visits, vec!["Visit Louvre", "Visit Orsay"]);
    }

    #[test]
    fn test_add_activity_keeps_order() {
        let agent = agent();
        let mut itinerary = agent.create("Paris", date("2024-06-01"), date("2024-06-01"), &[]);
        agent.add_activity(
            &mut itinerary,
            1,
            Activity {
                time: "15:00".to_string(),
                kind: "break".to_string(),
                description: "Coffee".to_string(),
            },
        );

        let times: Vec<&str> = itinerary.days[0]
            .activities
            .iter()
            .map(|a| a.time.as_str())
            .collect();
        assert_eq!(times, vec!["09:00", "10:00", "15:00", "19:00"]);
    }

    #[test]
    fn test_add_activity_out_of_range_is_noop() {
        let agent = agent();
        let mut itinerary = agent.create("Paris", date("2024-06-01"), date("2024-06-01"), &[]);
        let before = itinerary.days[0].activities.len();
        agent.add_activity(
            &mut itinerary,
            5,
            Activity {
                time: "15:00".to_string(),
                kind: "break".to_string(),
                description: "Coffee".to_string(),
            },
        );
        assert_eq!(itinerary.days[0].activities.len(), before);
    }

    #[test]
    fn test_daily_summary() {
        let agent = agent();
        let itinerary = agent.create("Paris", date("2024-06-01"), date("2024-06-03"), &[]);
        let summary = agent.daily_summary(&itinerary, 1).unwrap();
        assert!(summary.starts_with("Day 1:"));
        assert!(summary.contains("Breakfast at hotel"));
        assert!(agent.daily_summary(&itinerary, 9).is_none());
    }
}
