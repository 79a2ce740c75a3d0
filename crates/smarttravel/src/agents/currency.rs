//! Currency converter agent: exchange rates and multi-currency budgeting

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::AgentStatus;

/// Approximate exchange rates to INR. A live rates API would slot in here.
const EXCHANGE_RATES: &[(&str, f64)] = &[
    ("USD", 83.12),
    ("EUR", 90.45),
    ("GBP", 105.32),
    ("JPY", 0.56),
    ("INR", 1.00),
    ("AUD", 54.23),
    ("CAD", 61.45),
    ("CHF", 95.67),
    ("CNY", 11.54),
    ("AED", 22.63),
    ("SGD", 61.89),
    ("MYR", 18.67),
    ("THB", 2.35),
    ("KRW", 0.063),
];

/// Popular tourist destinations and their currencies
const DESTINATION_CURRENCIES: &[(&str, &str)] = &[
    ("USA", "USD"),
    ("United States", "USD"),
    ("Europe", "EUR"),
    ("UK", "GBP"),
    ("United Kingdom", "GBP"),
    ("London", "GBP"),
    ("Japan", "JPY"),
    ("Tokyo", "JPY"),
    ("India", "INR"),
    ("Australia", "AUD"),
    ("Canada", "CAD"),
    ("Switzerland", "CHF"),
    ("China", "CNY"),
    ("Dubai", "AED"),
    ("UAE", "AED"),
    ("Singapore", "SGD"),
    ("Malaysia", "MYR"),
    ("Thailand", "THB"),
    ("Bangkok", "THB"),
    ("South Korea", "KRW"),
    ("Seoul", "KRW"),
];

/// Exchange rate between two currencies
#[derive(Debug, Clone, Serialize)]
pub struct ExchangeRate {
    pub from_currency: String,
    pub to_currency: String,
    pub rate: f64,
}

impl ExchangeRate {
    /// Convert an amount using this rate
    pub fn convert(&self, amount: f64) -> f64 {
        amount * self.rate
    }
}

/// Result of a currency conversion
#[derive(Debug, Clone, Serialize)]
pub struct CurrencyConversion {
    pub original_amount: f64,
    pub original_currency: String,
    pub converted_amount: f64,
    pub converted_currency: String,
    pub exchange_rate: f64,
}

impl fmt::Display for CurrencyConversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.2} {} = {:.2} {}",
            self.original_amount,
            self.original_currency,
            self.converted_amount,
            self.converted_currency
        )
    }
}

/// Budget breakdown in multiple currencies
#[derive(Debug, Clone, Serialize)]
pub struct MultiBudgetBreakdown {
    pub base_amount: f64,
    pub base_currency: String,
    pub conversions: HashMap<String, f64>,
    pub exchange_rates: HashMap<String, f64>,
}

/// Per-category daily cost estimate in a destination's currency
#[derive(Debug, Clone, Serialize)]
pub struct DailyCostEstimate {
    pub destination: String,
    pub budget_tier: String,
    pub currency: String,
    pub accommodation: f64,
    pub food: f64,
    pub transportation: f64,
    pub activities: f64,
    pub total: f64,
}

/// Agent specialized in currency conversion and multi-currency budgeting
///
/// Conversion is pure table math; unlike its siblings this agent never
/// talks to the model.
pub struct CurrencyConverterAgent {
    initialized_at: DateTime<Utc>,
}

impl CurrencyConverterAgent {
    pub fn new() -> Self {
        info!("CurrencyConverterAgent initialized");
        Self {
            initialized_at: Utc::now(),
        }
    }

    fn rate_to_inr(currency: &str) -> f64 {
        EXCHANGE_RATES
            .iter()
            .find(|(code, _)| *code == currency)
            .map(|(_, rate)| *rate)
            .unwrap_or(1.0)
    }

    /// Convert an amount from one currency to another via the INR cross rate
    pub fn convert(&self, amount: f64, from_currency: &str, to_currency: &str) -> CurrencyConversion {
        let from_currency = from_currency.to_uppercase();
        let to_currency = to_currency.to_uppercase();

        info!("Converting {} {} to {}", amount, from_currency, to_currency);

        let from_rate = Self::rate_to_inr(&from_currency);
        let to_rate = Self::rate_to_inr(&to_currency);

        let amount_in_inr = amount * from_rate;
        let converted_amount = amount_in_inr / to_rate;

        CurrencyConversion {
            original_amount: amount,
            original_currency: from_currency,
            converted_amount,
            converted_currency: to_currency,
            exchange_rate: from_rate / to_rate,
        }
    }

    /// The primary currency for a destination, if known
    ///
    /// Exact match first, then case-insensitive substring match either way.
    pub fn destination_currency(&self, destination: &str) -> Option<&'static str> {
        if let Some((_, currency)) = DESTINATION_CURRENCIES
            .iter()
            .find(|(location, _)| *location == destination)
        {
            return Some(currency);
        }

        let destination_lower = destination.to_lowercase();
        DESTINATION_CURRENCIES
            .iter()
            .find(|(location, _)| {
                let location_lower = location.to_lowercase();
                destination_lower.contains(&location_lower)
                    || location_lower.contains(&destination_lower)
            })
            .map(|(_, currency)| *currency)
    }

    /// Convert a budget to the destination's local currency
    pub fn convert_budget_to_destination(
        &self,
        budget: f64,
        budget_currency: &str,
        destination: &str,
    ) -> Option<CurrencyConversion> {
        let Some(dest_currency) = self.destination_currency(destination) else {
            warn!("Could not determine currency for destination: {}", destination);
            return None;
        };

        Some(self.convert(budget, budget_currency, dest_currency))
    }

    /// Budget breakdown across several target currencies
    pub fn multi_currency_breakdown(
        &self,
        amount: f64,
        base_currency: &str,
        target_currencies: &[&str],
    ) -> MultiBudgetBreakdown {
        let base_currency = base_currency.to_uppercase();
        let mut breakdown = MultiBudgetBreakdown {
            base_amount: amount,
            base_currency: base_currency.clone(),
            conversions: HashMap::new(),
            exchange_rates: HashMap::new(),
        };

        for currency in target_currencies {
            let currency = currency.to_uppercase();
            if currency == base_currency {
                continue;
            }
            let conversion = self.convert(amount, &base_currency, &currency);
            breakdown
                .conversions
                .insert(currency.clone(), conversion.converted_amount);
            breakdown
                .exchange_rates
                .insert(currency, conversion.exchange_rate);
        }

        breakdown
    }

    /// Estimate daily costs in the destination's currency
    pub fn estimate_daily_costs(&self, destination: &str, tier: &str) -> DailyCostEstimate {
        let currency = self.destination_currency(destination).unwrap_or("USD");

        // Base estimates in USD
        let (accommodation, food, transportation, activities, total) = match tier {
            "budget" => (30.0, 20.0, 10.0, 15.0, 75.0),
            "luxury" => (200.0, 100.0, 50.0, 100.0, 450.0),
            _ => (80.0, 50.0, 25.0, 45.0, 200.0),
        };

        let to_local = |usd: f64| round2(self.convert(usd, "USD", currency).converted_amount);

        DailyCostEstimate {
            destination: destination.to_string(),
            budget_tier: tier.to_string(),
            currency: currency.to_string(),
            accommodation: to_local(accommodation),
            food: to_local(food),
            transportation: to_local(transportation),
            activities: to_local(activities),
            total: to_local(total),
        }
    }

    /// Current exchange rate between two currencies
    pub fn exchange_rate(&self, from_currency: &str, to_currency: &str) -> ExchangeRate {
        let from_currency = from_currency.to_uppercase();
        let to_currency = to_currency.to_uppercase();

        let rate = Self::rate_to_inr(&from_currency) / Self::rate_to_inr(&to_currency);

        ExchangeRate {
            from_currency,
            to_currency,
            rate,
        }
    }

    /// Currency-handling tips for a destination
    pub fn currency_tips(&self, destination: &str) -> Vec<String> {
        let mut tips = vec![
            "Notify your bank before traveling internationally".to_string(),
            "Use credit cards with no foreign transaction fees".to_string(),
            "Avoid airport currency exchanges (poor rates)".to_string(),
            "Use ATMs for better exchange rates than currency counters".to_string(),
            "Keep some cash for small vendors who don't accept cards".to_string(),
        ];

        if let Some(currency) = self.destination_currency(destination) {
            tips.insert(
                0,
                format!("The local currency in {} is {}", destination, currency),
            );
        }

        tips
    }

    pub fn status(&self) -> AgentStatus {
        AgentStatus::active("CurrencyConverterAgent", self.initialized_at).with_features(&[
            "currency_conversion",
            "multi_currency_budgeting",
            "exchange_rates",
            "destination_currency_detection",
            "daily_cost_estimation",
        ])
    }
}

impl Default for CurrencyConverterAgent {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent() -> CurrencyConverterAgent {
        CurrencyConverterAgent::new()
    }

    #[test]
    fn test_convert_via_inr_cross_rate() {
        let conversion = agent().convert(100.0, "USD", "INR");
        assert_eq!(conversion.converted_amount, 8312.0);
        assert_eq!(conversion.exchange_rate, 83.12);
    }

    #[test]
    fn test_convert_is_case_insensitive() {
        let conversion = agent().convert(100.0, "usd", "eur");
        assert_eq!(conversion.original_currency, "USD");
        assert_eq!(conversion.converted_currency, "EUR");
        assert!((conversion.exchange_rate - 83.12 / 90.45).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_currency_falls_back_to_unity() {
        let conversion = agent().convert(100.0, "XYZ", "INR");
        assert_eq!(conversion.converted_amount, 100.0);
    }

    #[test]
    fn test_destination_currency_lookup() {
        let agent = agent();
        assert_eq!(agent.destination_currency("Japan"), Some("JPY"));
        // Substring matching catches qualified destinations
        assert_eq!(agent.destination_currency("Tokyo, Japan"), Some("JPY"));
        assert_eq!(agent.destination_currency("Atlantis"), None);
    }

    #[test]
    fn test_convert_budget_to_destination() {
        let agent = agent();
        let conversion = agent
            .convert_budget_to_destination(50000.0, "INR", "Bangkok")
            .unwrap();
        assert_eq!(conversion.converted_currency, "THB");
        assert!(agent
            .convert_budget_to_destination(50000.0, "INR", "Atlantis")
            .is_none());
    }

    #[test]
    fn test_multi_currency_breakdown_skips_base() {
        let breakdown = agent().multi_currency_breakdown(1000.0, "USD", &["USD", "EUR", "GBP"]);
        assert_eq!(breakdown.conversions.len(), 2);
        assert!(!breakdown.conversions.contains_key("USD"));
    }

    #[test]
    fn test_estimate_daily_costs_tiers() {
        let agent = agent();
        let budget = agent.estimate_daily_costs("Japan", "budget");
        assert_eq!(budget.currency, "JPY");
        let luxury = agent.estimate_daily_costs("Japan", "luxury");
        assert!(luxury.total > budget.total);
    }

    #[test]
    fn test_currency_tips_lead_with_local_currency() {
        let tips = agent().currency_tips("Thailand");
        assert!(tips[0].contains("THB"));
        assert_eq!(tips.len(), 6);
    }

    #[test]
    fn test_conversion_display() {
        let conversion = agent().convert(100.0, "USD", "INR");
        assert_eq!(conversion.to_string(), "100.00 USD = 8312.00 INR");
    }
}
