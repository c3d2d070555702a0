use crate::errors::MoodError;
use crate::models::{DateKey, MoodLevel, MoodRecord};
use crate::storage::SnapshotSlot;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

const EVENT_CAPACITY: usize = 64;

/// Published to subscribers after the in-memory store changes.
#[derive(Debug, Clone, PartialEq)]
pub enum MoodEvent {
    Saved(MoodRecord),
    Hydrated { entries: usize },
}

/// Single source of truth for mood records, one per calendar day.
///
/// Mutations go through [`MoodStore::upsert`] and [`MoodStore::hydrate`] only.
/// When a [`SnapshotSlot`] is attached every upsert rewrites the whole snapshot;
/// write failures are logged and the in-memory state stays authoritative.
#[derive(Debug)]
pub struct MoodStore {
    records: BTreeMap<NaiveDate, MoodRecord>,
    slot: Option<SnapshotSlot>,
    events: broadcast::Sender<MoodEvent>,
}

impl Default for MoodStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl MoodStore {
    /// A store without durable backing.
    pub fn in_memory() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            records: BTreeMap::new(),
            slot: None,
            events,
        }
    }

    pub fn with_slot(slot: SnapshotSlot) -> Self {
        Self {
            slot: Some(slot),
            ..Self::in_memory()
        }
    }

    /// Opens a store on `slot` and hydrates it from the stored snapshot.
    ///
    /// The store is always returned. A read or parse failure leaves it empty
    /// and comes back as the second element so the caller can report it.
    pub async fn load(slot: SnapshotSlot) -> (Self, Option<MoodError>) {
        let raw = slot.read().await;
        let mut store = Self::with_slot(slot);
        let failure = match raw {
            Ok(Some(bytes)) => store.hydrate(&bytes).err(),
            Ok(None) => None,
            Err(err) => Some(err),
        };
        if let Some(err) = &failure {
            warn!("starting with an empty mood store: {err}");
        }
        (store, failure)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MoodEvent> {
        self.events.subscribe()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replaces the snapshot contents. On malformed input the store is left
    /// empty and the failure is returned instead of raised.
    pub fn hydrate(&mut self, raw: &[u8]) -> Result<usize, MoodError> {
        self.records.clear();
        let records = parse_snapshot(raw)?;
        let entries = records.len();
        self.records = records;
        info!(entries, "hydrated mood store");
        self.publish(MoodEvent::Hydrated { entries });
        Ok(entries)
    }

    /// Writes the record for `date`, replacing any previous one entirely.
    pub async fn upsert(
        &mut self,
        date: DateKey,
        mood: MoodLevel,
        note: Option<String>,
    ) -> MoodRecord {
        let record = MoodRecord {
            date: date.date(),
            mood,
            note: note.unwrap_or_default(),
            created_at: Utc::now().timestamp_millis(),
        };
        self.records.insert(record.date, record.clone());
        debug!(date = %date, mood = %mood, "saved mood");
        self.publish(MoodEvent::Saved(record.clone()));
        self.persist().await;
        record
    }

    pub fn get(&self, date: DateKey) -> Option<&MoodRecord> {
        self.records.get(&date.date())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.records.contains_key(&date)
    }

    /// All records, most recent date first. The vector is a fresh copy.
    pub fn list(&self) -> Vec<MoodRecord> {
        self.records.values().rev().cloned().collect()
    }

    /// Serialized snapshot keyed by canonical date string.
    pub fn snapshot(&self) -> Result<Vec<u8>, serde_json::Error> {
        let keyed: BTreeMap<String, &MoodRecord> = self
            .records
            .values()
            .map(|record| (record.key().to_string(), record))
            .collect();
        serde_json::to_vec_pretty(&keyed)
    }

    async fn persist(&self) {
        let Some(slot) = &self.slot else {
            return;
        };
        let payload = match self.snapshot() {
            Ok(payload) => payload,
            Err(err) => {
                warn!("failed to serialize mood snapshot: {err}");
                return;
            }
        };
        if let Err(err) = slot.write(&payload).await {
            warn!("{err}");
        }
    }

    fn publish(&self, event: MoodEvent) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }
}

fn parse_snapshot(raw: &[u8]) -> Result<BTreeMap<NaiveDate, MoodRecord>, MoodError> {
    let keyed: BTreeMap<String, MoodRecord> =
        serde_json::from_slice(raw).map_err(|source| MoodError::HydrationParse { source })?;

    let mut records = BTreeMap::new();
    for (raw_key, record) in keyed {
        let key = DateKey::parse(&raw_key).map_err(|_| MoodError::HydrationShape {
            reason: format!("'{raw_key}' is not a date key"),
        })?;
        if key != record.key() {
            return Err(MoodError::HydrationShape {
                reason: format!("record under '{raw_key}' is dated {}", record.date),
            });
        }
        records.insert(record.date, record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(raw: &str) -> DateKey {
        DateKey::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn upsert_replaces_existing_record() {
        let mut store = MoodStore::in_memory();
        store.upsert(key("2024-01-15"), MoodLevel::Bad, Some("rain".into())).await;
        let first = store.get(key("2024-01-15")).unwrap().created_at;
        store.upsert(key("2024-01-15"), MoodLevel::Great, None).await;

        let record = store.get(key("2024-01-15")).unwrap();
        assert_eq!(record.mood, MoodLevel::Great);
        assert_eq!(record.note, "");
        assert!(record.created_at >= first);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn list_is_most_recent_first_and_detached() {
        let mut store = MoodStore::in_memory();
        for date in ["2024-01-02", "2024-02-03", "2024-01-15"] {
            store.upsert(key(date), MoodLevel::Okay, None).await;
        }

        let mut listed = store.list();
        let dates: Vec<String> = listed.iter().map(|r| r.key().to_string()).collect();
        assert_eq!(dates, vec!["2024-02-03", "2024-01-15", "2024-01-02"]);

        listed.clear();
        assert_eq!(store.list().len(), 3);
    }

    #[tokio::test]
    async fn upsert_notifies_subscribers() {
        let mut store = MoodStore::in_memory();
        let mut rx = store.subscribe();
        let saved = store.upsert(key("2024-03-01"), MoodLevel::Good, Some("walk".into())).await;

        assert_eq!(rx.try_recv().unwrap(), MoodEvent::Saved(saved));
    }

    #[test]
    fn hydrate_rejects_malformed_snapshot() {
        let mut store = MoodStore::in_memory();
        let err = store.hydrate(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, MoodError::HydrationParse { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn hydrate_rejects_mismatched_keys() {
        let mut store = MoodStore::in_memory();
        let raw = br#"{"2024-01-15":{"date":"2024-01-16","mood":"good","note":"","createdAt":1}}"#;
        assert!(matches!(
            store.hydrate(raw),
            Err(MoodError::HydrationShape { .. })
        ));

        let raw = br#"{"yesterday":{"date":"2024-01-16","mood":"good","note":"","createdAt":1}}"#;
        assert!(store.hydrate(raw).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn failed_hydrate_discards_previous_contents() {
        let mut store = MoodStore::in_memory();
        let raw = br#"{"2024-01-15":{"date":"2024-01-15","mood":"good","note":"","createdAt":1}}"#;
        assert_eq!(store.hydrate(raw).unwrap(), 1);
        assert!(store.hydrate(b"not json").is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn snapshot_hydrates_into_equivalent_store() {
        let mut store = MoodStore::in_memory();
        store.upsert(key("2024-01-15"), MoodLevel::Terrible, Some("flu".into())).await;
        store.upsert(key("2023-12-31"), MoodLevel::Great, None).await;

        let mut restored = MoodStore::in_memory();
        let mut rx = restored.subscribe();
        restored.hydrate(&store.snapshot().unwrap()).unwrap();

        assert_eq!(restored.list(), store.list());
        assert_eq!(rx.try_recv().unwrap(), MoodEvent::Hydrated { entries: 2 });
    }

    #[tokio::test]
    async fn upsert_persists_to_slot() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SnapshotSlot::in_dir(dir.path());
        let mut store = MoodStore::with_slot(slot.clone());
        store.upsert(key("2024-05-05"), MoodLevel::Good, Some("sun".into())).await;

        let (reloaded, failure) = MoodStore::load(slot).await;
        assert!(failure.is_none());
        assert_eq!(reloaded.list(), store.list());
    }

    #[tokio::test]
    async fn load_reports_corrupt_snapshot_and_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SnapshotSlot::in_dir(dir.path());
        slot.write(b"{ truncated").await.unwrap();

        let (store, failure) = MoodStore::load(slot).await;
        assert!(store.is_empty());
        assert!(matches!(failure, Some(MoodError::HydrationParse { .. })));
    }

    #[tokio::test]
    async fn persistence_failure_keeps_memory_authoritative() {
        let dir = tempfile::tempdir().unwrap();
        let slot = SnapshotSlot::new(dir.path().join("missing").join("moods.json"));
        let mut store = MoodStore::with_slot(slot);
        store.upsert(key("2024-05-05"), MoodLevel::Okay, None).await;
        assert_eq!(store.get(key("2024-05-05")).unwrap().mood, MoodLevel::Okay);
    }
}
