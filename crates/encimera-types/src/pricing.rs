use serde::{Deserialize, Serialize};

/// Price breakdown returned by the pricing service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub total: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub lines: Vec<PriceLine>,
}

/// One line of a price breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLine {
    pub label: String,
    pub amount: f64,
}

fn default_currency() -> String {
    "EUR".to_string()
}
