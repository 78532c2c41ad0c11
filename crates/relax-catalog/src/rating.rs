//! Rating extraction from a firm profile.

use serde_json::Value;

use crate::types::ProfileResponse;

/// Rating of one firm as reported by its profile.
///
/// `value` is `None` when the profile carries no rating or the rating is
/// not a finite decimal. Callers decide how to treat `None` versus `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Rating {
    pub business_id: String,
    pub value: Option<f64>,
}

impl Rating {
    #[must_use]
    pub fn from_profile(business_id: &str, profile: &ProfileResponse) -> Self {
        let value = profile
            .rating
            .as_ref()
            .and_then(|raw| parse_rating(business_id, raw));
        Self {
            business_id: business_id.to_owned(),
            value,
        }
    }

    /// The rating when present, finite and strictly positive.
    ///
    /// An explicit `0.0` counts the same as a missing rating: neither
    /// qualifies a firm.
    #[must_use]
    pub fn positive_value(&self) -> Option<f64> {
        self.value.filter(|v| v.is_finite() && *v > 0.0)
    }
}

/// Parses a raw rating value. Unparsable or non-finite input is logged and
/// yields `None`.
fn parse_rating(business_id: &str, raw: &Value) -> Option<f64> {
    let parsed = match raw {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        Value::Null => return None,
        _ => None,
    };

    match parsed {
        Some(v) if v.is_finite() => {
            tracing::debug!(business_id, rating = v, "parsed firm rating");
            Some(v)
        }
        _ => {
            tracing::warn!(business_id, raw = %raw, "ignoring unparsable firm rating");
            None
        }
    }
}
