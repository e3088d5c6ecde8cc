use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse category of ad inventory. Drives the CPM multiplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PublisherMix {
    /// Tier 1 publishers, high trust.
    #[default]
    Premium,
    /// Long-tail blogs, cheaper inventory.
    Niche,
    /// Any unrecognised mix; priced at the base rate.
    #[serde(other)]
    Standard,
}

impl PublisherMix {
    pub fn cpm_multiplier(self) -> f64 {
        match self {
            PublisherMix::Premium => 1.6,
            PublisherMix::Niche => 0.7,
            PublisherMix::Standard => 1.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PublisherMix::Premium => "Premium News",
            PublisherMix::Niche => "Niche Blogs",
            PublisherMix::Standard => "Standard",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PublisherMix::Premium => "premium",
            PublisherMix::Niche => "niche",
            PublisherMix::Standard => "standard",
        }
    }
}

impl fmt::Display for PublisherMix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublisherMix {
    type Err = std::convert::Infallible;

    /// Never fails: anything other than `premium` or `niche` is `Standard`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "premium" => PublisherMix::Premium,
            "niche" => PublisherMix::Niche,
            _ => PublisherMix::Standard,
        })
    }
}

/// A flagged claim found in ad copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PolicyWarning {
    pub word: String,
    pub message: String,
}

/// Themed bundle produced for a URL by the context generator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContextBundle {
    pub topics: Vec<String>,
    pub suggested_headline: String,
    pub suggested_description: String,
    #[serde(default)]
    pub warnings: Vec<PolicyWarning>,
}

/// Derived delivery estimates for one budget / mix / CTR combination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetricsResult {
    pub cpm: String,
    pub reach: u64,
    pub est_clicks: u64,
    pub cpc: String,
}

/// Projected return on ad spend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoasResult {
    pub est_sales: String,
    pub est_revenue: String,
    pub roas: String,
}

/// A launched campaign as stored in the persisted collection.
///
/// Never mutated once appended.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: String,
    pub url: String,
    pub keywords: Vec<String>,
    pub headline: String,
    pub description: String,
    pub budget: u32,
    pub publisher_mix: PublisherMix,
    pub cpm: String,
    pub reach: u64,
    pub est_clicks: u64,
    pub ctr: f64,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

/// `createdAt` is written as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_campaign() -> Campaign {
        Campaign {
            id: "1700000000123".to_string(),
            url: "mikes-coffee.com".to_string(),
            keywords: vec!["Coffee".to_string(), "Espresso".to_string()],
            headline: "Artisan Coffee at Your Doorstep".to_string(),
            description: "From bean to cup.".to_string(),
            budget: 100,
            publisher_mix: PublisherMix::Premium,
            cpm: "7.20".to_string(),
            reach: 13888,
            est_clicks: 208,
            ctr: 0.015,
            created_at: Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(),
        }
    }

    #[test]
    fn test_campaign_json_shape() {
        let value = serde_json::to_value(sample_campaign()).unwrap();
        assert_eq!(value["publisherMix"], "premium");
        assert_eq!(value["estClicks"], 208);
        assert_eq!(value["cpm"], "7.20");
        assert_eq!(value["createdAt"], "2023-11-14T22:13:20.123Z");
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_campaign_reads_stored_blob() {
        let raw = r#"{"id":"1","url":"a.com","keywords":[],"headline":"h","description":"d",
            "budget":10,"publisherMix":"niche","cpm":"3.15","reach":3174,"estClicks":48,
            "ctr":0.015,"createdAt":"2024-05-01T09:30:00.000Z"}"#;
        let campaign: Campaign = serde_json::from_str(raw).unwrap();
        assert_eq!(campaign.publisher_mix, PublisherMix::Niche);
        assert_eq!(campaign.created_at, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());
    }

    #[test]
    fn test_unknown_mix_is_standard() {
        let mix: PublisherMix = serde_json::from_str("\"broadcast\"").unwrap();
        assert_eq!(mix, PublisherMix::Standard);
        assert_eq!("broadcast".parse::<PublisherMix>().unwrap(), PublisherMix::Standard);
        assert_eq!("niche".parse::<PublisherMix>().unwrap(), PublisherMix::Niche);
    }

    #[test]
    fn test_mix_labels() {
        assert_eq!(PublisherMix::Premium.label(), "Premium News");
        assert_eq!(PublisherMix::Niche.label(), "Niche Blogs");
        assert_eq!(PublisherMix::default(), PublisherMix::Premium);
    }
}
