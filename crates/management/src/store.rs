//! Campaign repository persisted as one JSON array under a single key.
//!
//! Every write reads the whole collection, changes it and writes it back.
//! Writers inside this process are serialised; separate processes sharing a
//! data directory are not coordinated.

use std::sync::Arc;

use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::types::Campaign;
use parking_lot::Mutex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::kv::KeyValueStore;

pub const DEFAULT_CAMPAIGNS_KEY: &str = "medianet_campaigns";

pub trait CampaignRepository: Send + Sync {
    /// Append a campaign and return it as stored. Ids are unique within the
    /// collection; a colliding id is moved to the next free one.
    fn append(&self, campaign: Campaign) -> CampaignResult<Campaign>;
    /// All campaigns in insertion order.
    fn list_all(&self) -> CampaignResult<Vec<Campaign>>;
    fn get_by_id(&self, id: &str) -> CampaignResult<Option<Campaign>>;
    fn clear_all(&self) -> CampaignResult<()>;
}

pub struct CampaignStore {
    kv: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
}

impl CampaignStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn load(&self) -> CampaignResult<Vec<Campaign>> {
        self.load_records()?
            .into_iter()
            .map(|record| self.decode(record))
            .collect()
    }

    /// Stored records as written. Appends carry earlier records through
    /// untouched, so a field the model would normalise is never rewritten.
    fn load_records(&self) -> CampaignResult<Vec<Value>> {
        match self.kv.get(&self.key)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| self.unreadable(e)),
            None => Ok(Vec::new()),
        }
    }

    fn decode(&self, record: Value) -> CampaignResult<Campaign> {
        serde_json::from_value(record).map_err(|e| self.unreadable(e))
    }

    fn unreadable(&self, e: serde_json::Error) -> CampaignError {
        warn!(key = %self.key, error = %e, "stored campaign collection is unreadable");
        CampaignError::from(e)
    }

    fn save(&self, records: &[Value]) -> CampaignResult<()> {
        let raw = serde_json::to_string(records)?;
        self.kv.set(&self.key, &raw)
    }
}

impl CampaignRepository for CampaignStore {
    fn append(&self, mut campaign: Campaign) -> CampaignResult<Campaign> {
        let _guard = self.write_lock.lock();
        let mut records = self.load_records()?;
        let mut ids = Vec::with_capacity(records.len());
        for record in &records {
            ids.push(Campaign::deserialize(record).map_err(|e| self.unreadable(e))?.id);
        }

        if ids.contains(&campaign.id) {
            let requested = std::mem::take(&mut campaign.id);
            campaign.id = next_free_id(&requested, &ids);
            warn!(requested = %requested, assigned = %campaign.id, "campaign id collision");
        }

        records.push(serde_json::to_value(&campaign)?);
        self.save(&records)?;
        info!(id = %campaign.id, url = %campaign.url, total = records.len(), "campaign stored");
        Ok(campaign)
    }

    fn list_all(&self) -> CampaignResult<Vec<Campaign>> {
        self.load()
    }

    fn get_by_id(&self, id: &str) -> CampaignResult<Option<Campaign>> {
        Ok(self.load()?.into_iter().find(|c| c.id == id))
    }

    fn clear_all(&self) -> CampaignResult<()> {
        let _guard = self.write_lock.lock();
        self.kv.remove(&self.key)?;
        info!(key = %self.key, "campaign collection cleared");
        Ok(())
    }
}

/// Numeric ids count upward from the requested one until a free id turns
/// up; anything else, and a numeric id with no room left above it, gets a
/// `-N` suffix.
fn next_free_id(requested: &str, ids: &[String]) -> String {
    let taken = |id: &str| ids.iter().any(|existing| existing == id);

    if let Ok(mut n) = requested.parse::<u64>() {
        while let Some(next) = n.checked_add(1) {
            n = next;
            let candidate = n.to_string();
            if !taken(&candidate) {
                return candidate;
            }
        }
    }

    (2..)
        .map(|suffix| format!("{requested}-{suffix}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| requested.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::{FileKeyValueStore, MemoryKeyValueStore};
    use campaign_core::types::PublisherMix;
    use chrono::{TimeZone, Utc};

    fn campaign(id: &str) -> Campaign {
        Campaign {
            id: id.to_string(),
            url: format!("{id}.example.com"),
            keywords: vec!["Local Business".to_string()],
            headline: "Discover example Services".to_string(),
            description: "Expert example services.".to_string(),
            budget: 100,
            publisher_mix: PublisherMix::Premium,
            cpm: "7.20".to_string(),
            reach: 13888,
            est_clicks: 208,
            ctr: 0.015,
            created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
        }
    }

    fn memory_store() -> (Arc<MemoryKeyValueStore>, CampaignStore) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let store = CampaignStore::new(kv.clone(), DEFAULT_CAMPAIGNS_KEY);
        (kv, store)
    }

    #[test]
    fn test_append_and_list_in_order() {
        let (_, store) = memory_store();
        for id in ["3", "1", "2"] {
            store.append(campaign(id)).unwrap();
        }
        let ids: Vec<String> = store.list_all().unwrap().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["3", "1", "2"]);
    }

    #[test]
    fn test_clear_all() {
        let (kv, store) = memory_store();
        store.append(campaign("1")).unwrap();
        store.clear_all().unwrap();
        assert!(store.list_all().unwrap().is_empty());
        assert_eq!(kv.get(DEFAULT_CAMPAIGNS_KEY).unwrap(), None);
        store.clear_all().unwrap();
    }

    #[test]
    fn test_get_by_id() {
        let (_, store) = memory_store();
        store.append(campaign("10")).unwrap();
        store.append(campaign("11")).unwrap();
        assert_eq!(store.get_by_id("11").unwrap().map(|c| c.url), Some("11.example.com".to_string()));
        assert!(store.get_by_id("12").unwrap().is_none());
    }

    #[test]
    fn test_colliding_ids_stay_unique() {
        let (_, store) = memory_store();
        let first = store.append(campaign("1700000000000")).unwrap();
        let second = store.append(campaign("1700000000000")).unwrap();
        let third = store.append(campaign("1700000000000")).unwrap();
        assert_eq!(first.id, "1700000000000");
        assert_eq!(second.id, "1700000000001");
        assert_eq!(third.id, "1700000000002");

        store.append(campaign("legacy")).unwrap();
        assert_eq!(store.append(campaign("legacy")).unwrap().id, "legacy-2");
    }

    #[test]
    fn test_blob_shape() {
        let (kv, store) = memory_store();
        store.append(campaign("1")).unwrap();
        let raw = kv.get(DEFAULT_CAMPAIGNS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["publisherMix"], "premium");
        assert_eq!(entries[0]["createdAt"], "2023-11-14T22:13:20.000Z");
    }

    #[test]
    fn test_corrupt_blob_is_an_error() {
        let (kv, store) = memory_store();
        kv.set(DEFAULT_CAMPAIGNS_KEY, "{not json").unwrap();
        assert!(matches!(store.list_all(), Err(CampaignError::Serialization(_))));
        assert!(store.append(campaign("1")).is_err());
        assert_eq!(kv.get(DEFAULT_CAMPAIGNS_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_file_backed_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let kv = Arc::new(FileKeyValueStore::open(dir.path()).unwrap());
            let store = CampaignStore::new(kv, DEFAULT_CAMPAIGNS_KEY);
            store.append(campaign("1")).unwrap();
            store.append(campaign("2")).unwrap();
        }
        let kv = Arc::new(FileKeyValueStore::open(dir.path()).unwrap());
        let store = CampaignStore::new(kv, DEFAULT_CAMPAIGNS_KEY);
        assert_eq!(store.list_all().unwrap().len(), 2);
    }

    #[test]
    fn test_concurrent_appends_are_not_lost() {
        let (_, store) = memory_store();
        let store = Arc::new(store);
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for j in 0..10 {
                        store.append(campaign(&format!("{}", i * 100 + j))).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.list_all().unwrap().len(), 80);
    }

    #[test]
    fn test_collision_at_the_top_of_the_id_range() {
        let (_, store) = memory_store();
        let max = u64::MAX.to_string();
        assert_eq!(store.append(campaign(&max)).unwrap().id, max);
        assert_eq!(store.append(campaign(&max)).unwrap().id, format!("{max}-2"));
        assert_eq!(store.append(campaign(&max)).unwrap().id, format!("{max}-3"));
        store.clear_all().unwrap();
    }

    #[test]
    fn test_append_keeps_earlier_records_verbatim() {
        let (kv, store) = memory_store();
        let mut legacy = serde_json::to_value(campaign("1")).unwrap();
        legacy["publisherMix"] = "broadcast".into();
        legacy["source"] = "import".into();
        kv.set(DEFAULT_CAMPAIGNS_KEY, &serde_json::to_string(&[legacy.clone()]).unwrap())
            .unwrap();

        store.append(campaign("2")).unwrap();

        let raw = kv.get(DEFAULT_CAMPAIGNS_KEY).unwrap().unwrap();
        let records: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
        assert_eq!(records[0], legacy);
        assert_eq!(records[1]["id"], "2");
        assert_eq!(
            store.get_by_id("1").unwrap().map(|c| c.publisher_mix),
            Some(PublisherMix::Standard)
        );
    }

    #[test]
    fn test_malformed_record_blocks_append() {
        let (kv, store) = memory_store();
        kv.set(DEFAULT_CAMPAIGNS_KEY, r#"[{"id": "1"}]"#).unwrap();
        assert!(matches!(
            store.append(campaign("2")),
            Err(CampaignError::Serialization(_))
        ));
        assert_eq!(kv.get(DEFAULT_CAMPAIGNS_KEY).unwrap().as_deref(), Some(r#"[{"id": "1"}]"#));
    }
}
