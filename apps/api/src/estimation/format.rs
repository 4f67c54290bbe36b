use serde::Serialize;

use crate::models::prediction::PredictionResult;

const LAKH: u64 = 100_000;
const CRORE: u64 = 10_000_000;

/// Human-readable rupee amount: `₹1.5 Cr`, `₹14.9 L`, or `₹45,000`.
pub fn format_inr(amount: u64) -> String {
    if amount >= CRORE {
        format!("₹{:.1} Cr", amount as f64 / CRORE as f64)
    } else if amount >= LAKH {
        format!("₹{:.1} L", amount as f64 / LAKH as f64)
    } else {
        format!("₹{}", group_thousands(amount))
    }
}

fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[derive(Debug, Clone, Serialize)]
pub struct FormattedPrediction {
    pub point_estimate: String,
    pub display_range: String,
    pub monthly_estimate: String,
}

impl FormattedPrediction {
    pub fn new(result: &PredictionResult, monthly_estimate: u64) -> Self {
        Self {
            point_estimate: format_inr(result.point_estimate),
            display_range: format!(
                "{} - {}",
                format_inr(result.display_range_low),
                format_inr(result.display_range_high)
            ),
            monthly_estimate: format_inr(monthly_estimate),
        }
    }
}
