//! Boundary rules for the numbers a marketer types in before estimates run.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Whole-dollar campaign budget, always within `[MIN, MAX]`. Deserializing
/// clamps, so an out-of-range document still yields a valid budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u32", from = "f64")]
pub struct Budget(u32);

impl Budget {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 1000;
    pub const DEFAULT: u32 = 100;

    pub fn clamp(value: i64) -> Self {
        Budget(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u32)
    }

    /// Clamp a fractional amount; the fraction is dropped first.
    pub fn clamp_f64(value: f64) -> Self {
        if value.is_nan() {
            return Budget(Self::MIN);
        }
        Self::clamp(value.trunc() as i64)
    }

    /// Read the leading integer of free text (`"250usd"` → 250). Text with
    /// no leading integer, and zero, fall back to the minimum.
    pub fn parse_clamped(raw: &str) -> Self {
        match leading_integer(raw) {
            Some(0) | None => Budget(Self::MIN),
            Some(value) => Self::clamp(value),
        }
    }

    pub fn dollars(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0)
    }
}

impl From<f64> for Budget {
    fn from(value: f64) -> Self {
        Self::clamp_f64(value)
    }
}

impl From<Budget> for u32 {
    fn from(budget: Budget) -> Self {
        budget.0
    }
}

impl Default for Budget {
    fn default() -> Self {
        Budget(Self::DEFAULT)
    }
}

fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Click-through-rate assumptions offered for estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CtrPreset {
    Conservative,
    #[default]
    Average,
    Optimistic,
}

impl CtrPreset {
    pub const ALL: [CtrPreset; 3] = [
        CtrPreset::Conservative,
        CtrPreset::Average,
        CtrPreset::Optimistic,
    ];

    pub fn rate(self) -> f64 {
        match self {
            CtrPreset::Conservative => 0.01,
            CtrPreset::Average => 0.015,
            CtrPreset::Optimistic => 0.02,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CtrPreset::Conservative => "1.0%",
            CtrPreset::Average => "1.5%",
            CtrPreset::Optimistic => "2.0%",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CtrPreset::Conservative => "Conservative",
            CtrPreset::Average => "Avg",
            CtrPreset::Optimistic => "Optimistic",
        }
    }

    pub fn from_rate(rate: f64) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.rate() == rate)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CtrPreset::Conservative => "conservative",
            CtrPreset::Average => "average",
            CtrPreset::Optimistic => "optimistic",
        }
    }

    /// The choices offered next to the budget, in display order.
    pub fn options() -> Vec<CtrOption> {
        Self::ALL
            .into_iter()
            .map(|preset| CtrOption {
                preset,
                rate: preset.rate(),
                label: preset.label(),
                description: preset.description(),
            })
            .collect()
    }
}

impl FromStr for CtrPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown CTR preset {s:?}"))
    }
}

/// One CTR choice as rendered for the marketer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CtrOption {
    pub preset: CtrPreset,
    pub rate: f64,
    pub label: &'static str,
    pub description: &'static str,
}

/// A CTR typed as a preset name (`optimistic`) or as a rate (`0.018`).
/// Rates must lie in `[0, 1]`.
pub fn parse_ctr(raw: &str) -> Result<f64, String> {
    if let Ok(preset) = raw.parse::<CtrPreset>() {
        return Ok(preset.rate());
    }
    match raw.trim().parse::<f64>() {
        Ok(rate) if (0.0..=1.0).contains(&rate) => Ok(rate),
        Ok(rate) => Err(format!("CTR {rate} is outside 0..=1")),
        Err(_) => Err(format!(
            "expected conservative, average, optimistic or a rate, got {raw:?}"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_clamp() {
        assert_eq!(Budget::clamp(5).dollars(), 10);
        assert_eq!(Budget::clamp(500).dollars(), 500);
        assert_eq!(Budget::clamp(5000).dollars(), 1000);
        assert_eq!(Budget::clamp(-3).dollars(), 10);
        assert_eq!(Budget::default().dollars(), 100);
    }

    #[test]
    fn test_budget_clamp_f64() {
        assert_eq!(Budget::clamp_f64(99.9).dollars(), 99);
        assert_eq!(Budget::clamp_f64(f64::NAN).dollars(), 10);
        assert_eq!(Budget::clamp_f64(f64::INFINITY).dollars(), 1000);
    }

    #[test]
    fn test_budget_parse() {
        assert_eq!(Budget::parse_clamped("250").dollars(), 250);
        assert_eq!(Budget::parse_clamped("  42").dollars(), 42);
        assert_eq!(Budget::parse_clamped("12abc").dollars(), 12);
        assert_eq!(Budget::parse_clamped("3.7").dollars(), 10);
        assert_eq!(Budget::parse_clamped("75.9").dollars(), 75);
        assert_eq!(Budget::parse_clamped("").dollars(), 10);
        assert_eq!(Budget::parse_clamped("abc").dollars(), 10);
        assert_eq!(Budget::parse_clamped("0").dollars(), 10);
        assert_eq!(Budget::parse_clamped("-40").dollars(), 10);
        assert_eq!(Budget::parse_clamped("99999999999999999999999").dollars(), 1000);
    }

    #[test]
    fn test_budget_serde_clamps() {
        let budget: Budget = serde_json::from_str("5000").unwrap();
        assert_eq!(budget.dollars(), 1000);
        let budget: Budget = serde_json::from_str("42.8").unwrap();
        assert_eq!(budget.dollars(), 42);
        assert_eq!(serde_json::to_string(&Budget::default()).unwrap(), "100");
    }

    #[test]
    fn test_ctr_presets() {
        assert_eq!(CtrPreset::default().rate(), 0.015);
        assert_eq!(CtrPreset::from_rate(0.02), Some(CtrPreset::Optimistic));
        assert_eq!(CtrPreset::from_rate(0.03), None);
        assert_eq!(CtrPreset::Conservative.label(), "1.0%");
    }

    #[test]
    fn test_ctr_preset_names() {
        assert_eq!("optimistic".parse::<CtrPreset>(), Ok(CtrPreset::Optimistic));
        assert_eq!(" Average ".parse::<CtrPreset>(), Ok(CtrPreset::Average));
        assert!("aggressive".parse::<CtrPreset>().is_err());
    }

    #[test]
    fn test_ctr_options_in_display_order() {
        let options = CtrPreset::options();
        let labels: Vec<&str> = options.iter().map(|o| o.label).collect();
        assert_eq!(labels, ["1.0%", "1.5%", "2.0%"]);
        assert_eq!(options[1].description, "Avg");
        let json = serde_json::to_value(&options[0]).unwrap();
        assert_eq!(json["preset"], "conservative");
        assert_eq!(json["rate"], 0.01);
    }

    #[test]
    fn test_parse_ctr() {
        assert_eq!(parse_ctr("conservative"), Ok(0.01));
        assert_eq!(parse_ctr("0.018"), Ok(0.018));
        assert!(parse_ctr("1.5").is_err());
        assert!(parse_ctr("-0.1").is_err());
        assert!(parse_ctr("lots").is_err());
    }
}
