//! Budget optimizer agent: allocation, value analysis, and savings tips

use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::AgentStatus;
use crate::llm::GeminiClient;
use crate::prompts;

/// Budget allocation priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityCategory {
    Accommodation,
    Transportation,
    Food,
    Activities,
    Emergency,
}

/// Travel budget tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    /// Economy options
    Budget,
    /// Balanced value
    #[default]
    MidRange,
    /// Premium options
    Luxury,
}

/// Recommended budget allocation
#[derive(Debug, Clone, Serialize)]
pub struct BudgetBreakdown {
    pub total_budget: f64,
    pub accommodation: f64,
    pub transportation: f64,
    pub food: f64,
    pub activities: f64,
    pub emergency_fund: f64,
    pub remaining: f64,
}

impl BudgetBreakdown {
    fn new(
        total_budget: f64,
        accommodation: f64,
        transportation: f64,
        food: f64,
        activities: f64,
        emergency_fund: f64,
    ) -> Self {
        let allocated = accommodation + transportation + food + activities + emergency_fund;
        Self {
            total_budget,
            accommodation,
            transportation,
            food,
            activities,
            emergency_fund,
            remaining: total_budget - allocated,
        }
    }
}

/// An option under consideration for value scoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueCandidate {
    pub name: String,
    pub price: f64,
    pub rating: f64,
    pub features: Vec<String>,
}

/// A budget-optimized travel option
#[derive(Debug, Clone, Serialize)]
pub struct OptimizedOption {
    pub category: String,
    pub name: String,
    pub price: f64,
    /// Price-to-quality ratio, higher is better
    pub value_score: f64,
    /// Amount saved vs the category average
    pub savings: f64,
    pub features: Vec<String>,
    pub tier: BudgetTier,
}

/// Complete budget optimization results
#[derive(Debug, Clone, Serialize)]
pub struct BudgetOptimizationResult {
    pub breakdown: BudgetBreakdown,
    pub optimized_options: Vec<OptimizedOption>,
    pub money_saving_tips: Vec<String>,
    pub estimated_total: f64,
    pub potential_savings: f64,
}

/// Agent specialized in budget optimization and value maximization
pub struct BudgetOptimizerAgent {
    client: GeminiClient,
    initialized_at: DateTime<Utc>,
}

impl BudgetOptimizerAgent {
    pub fn new(client: GeminiClient) -> Self {
        info!("BudgetOptimizerAgent initialized");
        Self {
            client: client.with_system_prompt(prompts::BUDGET_SYSTEM_PROMPT),
            initialized_at: Utc::now(),
        }
    }

    /// Default allocation weight for a category
    fn default_weight(category: PriorityCategory) -> f64 {
        match category {
            PriorityCategory::Accommodation => 0.35,
            PriorityCategory::Transportation => 0.25,
            PriorityCategory::Food => 0.20,
            PriorityCategory::Activities => 0.15,
            PriorityCategory::Emergency => 0.05,
        }
    }

    /// Create an optimized budget breakdown
    ///
    /// Custom priority weights override the defaults per category.
    pub fn optimize(
        &self,
        total_budget: f64,
        duration_days: u32,
        priorities: Option<&HashMap<PriorityCategory, f64>>,
    ) -> BudgetBreakdown {
        info!(
            "Optimizing budget: ${} for {} days",
            total_budget, duration_days
        );

        let weight = |category| {
            priorities
                .and_then(|p| p.get(&category).copied())
                .unwrap_or_else(|| Self::default_weight(category))
        };

        BudgetBreakdown::new(
            total_budget,
            total_budget * weight(PriorityCategory::Accommodation),
            total_budget * weight(PriorityCategory::Transportation),
            total_budget * weight(PriorityCategory::Food),
            total_budget * weight(PriorityCategory::Activities),
            total_budget * weight(PriorityCategory::Emergency),
        )
    }

    /// Find the best value options within a category budget, best first
    ///
    /// Over-budget options are skipped. Value score is
    /// `(rating * (features + 1)) / price`.
    pub fn best_value(
        &self,
        options: &[ValueCandidate],
        budget: f64,
        category: &str,
    ) -> Vec<OptimizedOption> {
        let avg_price = if options.is_empty() {
            budget
        } else {
            options.iter().map(|o| o.price).sum::<f64>() / options.len() as f64
        };

        let mut optimized: Vec<OptimizedOption> = options
            .iter()
            .filter(|o| o.price <= budget)
            .map(|o| {
                let divisor = if o.price > 0.0 { o.price } else { 1.0 };
                let value_score = (o.rating * (o.features.len() + 1) as f64) / divisor;
                OptimizedOption {
                    category: category.to_string(),
                    name: o.name.clone(),
                    price: o.price,
                    value_score,
                    savings: (avg_price - o.price).max(0.0),
                    features: o.features.clone(),
                    tier: Self::tier_for_price(o.price, avg_price),
                }
            })
            .collect();

        optimized.sort_by(|a, b| b.value_score.total_cmp(&a.value_score));
        optimized
    }

    /// Generate personalized money-saving tips
    pub fn saving_tips(&self, duration_days: u32, tier: BudgetTier) -> Vec<String> {
        let mut tips = vec![
            "Book flights and accommodation in advance for better rates".to_string(),
            "Travel during off-peak season for significant savings".to_string(),
            "Use public transportation instead of taxis or rideshares".to_string(),
        ];

        match tier {
            BudgetTier::Budget => tips.extend(
                [
                    "Consider hostels or budget hotels for accommodation",
                    "Cook some meals instead of dining out for every meal",
                    "Look for free walking tours and attractions",
                    "Buy groceries from local markets instead of tourist areas",
                ]
                .map(String::from),
            ),
            BudgetTier::MidRange => tips.extend(
                [
                    "Mix budget and mid-range accommodation for balance",
                    "Have lunch at restaurants instead of dinner for lower prices",
                    "Book combination tickets for multiple attractions",
                    "Use hotel loyalty programs for perks and discounts",
                ]
                .map(String::from),
            ),
            BudgetTier::Luxury => {}
        }

        if duration_days >= 7 {
            tips.push("Consider weekly rental rates for accommodation".to_string());
            tips.push("Buy a multi-day transit pass for unlimited travel".to_string());
        }

        tips
    }

    /// Actual trip cost and how far under (or over) budget it lands
    pub fn trip_cost(
        &self,
        breakdown: &BudgetBreakdown,
        selected: &HashMap<String, f64>,
    ) -> (f64, f64) {
        let total: f64 = selected.values().sum();
        (total, breakdown.total_budget - total)
    }

    /// Create a complete budget-optimized result for a trip
    pub fn optimize_itinerary(
        &self,
        total_budget: f64,
        duration_days: u32,
        available: &HashMap<String, Vec<ValueCandidate>>,
    ) -> BudgetOptimizationResult {
        let breakdown = self.optimize(total_budget, duration_days, None);

        let mut optimized_options = Vec::new();
        for (category, category_budget) in [
            ("accommodation", breakdown.accommodation),
            ("transportation", breakdown.transportation),
            ("activities", breakdown.activities),
        ] {
            if let Some(options) = available.get(category) {
                let mut best = self.best_value(options, category_budget, category);
                best.truncate(3);
                optimized_options.extend(best);
            }
        }

        let tier = Self::tier_for_daily_budget(total_budget, duration_days);
        let tips = self.saving_tips(duration_days, tier);

        let estimated_total: f64 = optimized_options.iter().map(|o| o.price).sum();
        let potential_savings = total_budget - estimated_total;

        BudgetOptimizationResult {
            breakdown,
            optimized_options,
            money_saving_tips: tips,
            estimated_total,
            potential_savings,
        }
    }

    /// Ask the model for budget guidance over the computed breakdown
    pub async fn advise(
        &self,
        destination: &str,
        breakdown: &BudgetBreakdown,
        duration_days: u32,
    ) -> Result<String> {
        let prompt = format!(
            "A traveler has ${:.2} for {} days in {}. The recommended allocation is: \
             accommodation ${:.2}, transportation ${:.2}, food ${:.2}, activities ${:.2}, \
             emergency fund ${:.2}.\n\nComment on whether this is comfortable for the \
             destination and point out the best places to save. Keep it short.",
            breakdown.total_budget,
            duration_days,
            destination,
            breakdown.accommodation,
            breakdown.transportation,
            breakdown.food,
            breakdown.activities,
            breakdown.emergency_fund,
        );

        self.client.generate(&prompt).await
    }

    fn tier_for_price(price: f64, avg_price: f64) -> BudgetTier {
        if price < avg_price * 0.7 {
            BudgetTier::Budget
        } else if price > avg_price * 1.3 {
            BudgetTier::Luxury
        } else {
            BudgetTier::MidRange
        }
    }

    fn tier_for_daily_budget(total_budget: f64, duration_days: u32) -> BudgetTier {
        let daily = if duration_days > 0 {
            total_budget / f64::from(duration_days)
        } else {
            0.0
        };

        if daily < 100.0 {
            BudgetTier::Budget
        } else if daily > 300.0 {
            BudgetTier::Luxury
        } else {
            BudgetTier::MidRange
        }
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus::active("BudgetOptimizerAgent", self.initialized_at).with_features(&[
            "budget_optimization",
            "value_analysis",
            "savings_tips",
            "cost_estimation",
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::GenerationConfig;

    fn agent() -> BudgetOptimizerAgent {
        let client = GeminiClient::new(
            "test-key".to_string(),
            "gemini-1.5-pro".to_string(),
            GenerationConfig::default(),
            30,
            0,
        )
        .unwrap();
        BudgetOptimizerAgent::new(client)
    }

    #[test]
    fn test_optimize_uses_default_allocation() {
        let breakdown = agent().optimize(1000.0, 5, None);
        assert_eq!(breakdown.accommodation, 350.0);
        assert_eq!(breakdown.transportation, 250.0);
        assert_eq!(breakdown.food, 200.0);
        assert_eq!(breakdown.activities, 150.0);
        assert_eq!(breakdown.emergency_fund, 50.0);
        assert_eq!(breakdown.remaining, 0.0);
    }

    #[test]
    fn test_optimize_honors_custom_priorities() {
        let mut priorities = HashMap::new();
        priorities.insert(PriorityCategory::Accommodation, 0.5);
        let breakdown = agent().optimize(1000.0, 5, Some(&priorities));
        assert_eq!(breakdown.accommodation, 500.0);
        // Other categories keep their defaults, so remaining goes negative
        assert_eq!(breakdown.remaining, -150.0);
    }

    #[test]
    fn test_best_value_skips_over_budget() {
        let options = vec![
            ValueCandidate {
                name: "Affordable".to_string(),
                price: 80.0,
                rating: 4.0,
                features: vec!["WiFi".to_string()],
            },
            ValueCandidate {
                name: "Too Expensive".to_string(),
                price: 500.0,
                rating: 5.0,
                features: vec![],
            },
        ];
        let best = agent().best_value(&options, 100.0, "accommodation");
        assert_eq!(best.len(), 1);
        assert_eq!(best[0].name, "Affordable");
        // avg = 290, 80 < 0.7 * avg
        assert_eq!(best[0].tier, BudgetTier::Budget);
        assert_eq!(best[0].savings, 210.0);
    }

    #[test]
    fn test_best_value_sorted_by_score() {
        let options = vec![
            ValueCandidate {
                name: "Plain".to_string(),
                price: 50.0,
                rating: 3.0,
                features: vec![],
            },
            ValueCandidate {
                name: "Loaded".to_string(),
                price: 50.0,
                rating: 4.0,
                features: ["WiFi", "Pool", "Gym"].map(String::from).to_vec(),
            },
        ];
        let best = agent().best_value(&options, 100.0, "accommodation");
        assert_eq!(best[0].name, "Loaded");
    }

    #[test]
    fn test_saving_tips_scale_with_duration() {
        let agent = agent();
        let short = agent.saving_tips(3, BudgetTier::Budget);
        let long = agent.saving_tips(10, BudgetTier::Budget);
        assert_eq!(long.len(), short.len() + 2);
    }

    #[test]
    fn test_trip_cost() {
        let agent = agent();
        let breakdown = agent.optimize(1000.0, 5, None);
        let mut selected = HashMap::new();
        selected.insert("accommodation".to_string(), 300.0);
        selected.insert("food".to_string(), 150.0);

        let (total, savings) = agent.trip_cost(&breakdown, &selected);
        assert_eq!(total, 450.0);
        assert_eq!(savings, 550.0);
    }

    #[test]
    fn test_optimize_itinerary_takes_top_three_per_category() {
        let mut available = HashMap::new();
        available.insert(
            "accommodation".to_string(),
            (0..5)
                .map(|i| ValueCandidate {
                    name: format!("Hotel {}", i),
                    price: 50.0 + f64::from(i),
                    rating: 4.0,
                    features: vec![],
                })
                .collect(),
        );

        let result = agent().optimize_itinerary(1000.0, 5, &available);
        assert_eq!(result.optimized_options.len(), 3);
        assert!(result.estimated_total > 0.0);
        assert_eq!(
            result.potential_savings,
            1000.0 - result.estimated_total
        );
    }
}
