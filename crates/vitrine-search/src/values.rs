//! Legal attribute values with TTL refresh and swap-on-complete snapshots

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::attribute::Attribute;
use crate::catalog::ValuesService;

/// How long a successfully loaded snapshot stays fresh
pub const DEFAULT_VALUES_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Minimum wait between refresh attempts after the values service failed
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(60);

/// Mapping from attribute to its complete, ordered legal vocabulary
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainValues {
    values: BTreeMap<Attribute, Vec<String>>,
}

impl DomainValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with<I, S>(mut self, attribute: Attribute, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(attribute, values.into_iter().map(Into::into).collect());
        self
    }

    pub fn set(&mut self, attribute: Attribute, values: Vec<String>) {
        self.values.insert(attribute, values);
    }

    /// Legal values for `attribute`; empty when the attribute was never loaded
    pub fn get(&self, attribute: Attribute) -> &[String] {
        self.values
            .get(&attribute)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Case-sensitive exact membership
    pub fn contains(&self, attribute: Attribute, value: &str) -> bool {
        self.get(attribute).iter().any(|v| v == value)
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.values.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Small representative vocabulary served when the values service has
    /// never answered.
    pub fn builtin() -> Self {
        Self::new()
            .with(Attribute::Gender, ["Men", "Women", "Boys", "Girls", "Unisex"])
            .with(
                Attribute::MasterCategory,
                ["Apparel", "Accessories", "Footwear", "Personal Care"],
            )
            .with(
                Attribute::SubCategory,
                [
                    "Topwear",
                    "Bottomwear",
                    "Shoes",
                    "Bags",
                    "Watches",
                    "Accessories",
                    "Gloves",
                    "Eyewear",
                    "Jewellery",
                ],
            )
            .with(
                Attribute::ArticleType,
                [
                    "Tshirts",
                    "Shirts",
                    "Jeans",
                    "Casual Shoes",
                    "Sports Shoes",
                    "Handbags",
                    "Watches",
                    "Sunglasses",
                ],
            )
            .with(
                Attribute::BaseColour,
                [
                    "Black", "White", "Blue", "Navy Blue", "Grey", "Green", "Olive", "Red",
                    "Pink", "Brown", "Beige",
                ],
            )
            .with(
                Attribute::Usage,
                ["Casual", "Formal", "Sports", "Ethnic", "Party"],
            )
            .with(Attribute::Season, ["Summer", "Winter", "Fall", "Spring"])
    }
}

/// Where the snapshot currently being served came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotSource {
    /// Nothing loaded yet
    Empty,
    /// Last successful values-service refresh
    Remote,
    /// Built-in vocabulary after a failed first refresh
    Builtin,
    /// Injected at construction; never refreshed
    Fixed,
}

#[derive(Debug)]
struct Snapshot {
    values: Arc<DomainValues>,
    source: SnapshotSource,
    loaded_at: Option<Instant>,
    /// Last failed refresh; suppresses retries for the retry interval
    failed_at: Option<Instant>,
}

/// Read-mostly cache of [`DomainValues`].
///
/// Readers clone an `Arc` to the current snapshot and never see a partially
/// written one: a refresh builds the new snapshot completely and swaps the
/// pointer under the write lock. Concurrent stale readers share one refresh.
pub struct DomainValueCache {
    service: Option<Arc<dyn ValuesService>>,
    ttl: Duration,
    retry_interval: Duration,
    current: RwLock<Arc<Snapshot>>,
    refresh_gate: Mutex<()>,
}

impl DomainValueCache {
    /// Cache backed by a values service with the default six hour TTL
    pub fn new(service: Arc<dyn ValuesService>) -> Self {
        Self::with_ttl(service, DEFAULT_VALUES_TTL)
    }

    pub fn with_ttl(service: Arc<dyn ValuesService>, ttl: Duration) -> Self {
        Self {
            service: Some(service),
            ttl,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            current: RwLock::new(Arc::new(Snapshot {
                values: Arc::new(DomainValues::new()),
                source: SnapshotSource::Empty,
                loaded_at: None,
                failed_at: None,
            })),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Cache that always serves `values` and never refreshes
    pub fn fixed(values: DomainValues) -> Self {
        Self {
            service: None,
            ttl: Duration::MAX,
            retry_interval: Duration::MAX,
            current: RwLock::new(Arc::new(Snapshot {
                values: Arc::new(values),
                source: SnapshotSource::Fixed,
                loaded_at: None,
                failed_at: None,
            })),
            refresh_gate: Mutex::new(()),
        }
    }

    /// Wait at least `interval` after a failed refresh before trying again
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Source of the snapshot currently held
    pub async fn source(&self) -> SnapshotSource {
        self.current.read().await.source
    }

    /// Legal values for one attribute, refreshing first if stale
    pub async fn get(&self, attribute: Attribute) -> Vec<String> {
        self.snapshot().await.get(attribute).to_vec()
    }

    /// Current snapshot, refreshing first if stale
    pub async fn snapshot(&self) -> Arc<DomainValues> {
        let current = self.current.read().await.clone();
        if !self.is_stale(&current) {
            return current.values.clone();
        }

        let _gate = self.refresh_gate.lock().await;
        // Another reader may have refreshed while we waited on the gate
        let current = self.current.read().await.clone();
        if !self.is_stale(&current) {
            return current.values.clone();
        }
        self.reload(&current).await
    }

    /// Refresh now regardless of age
    pub async fn refresh(&self) -> Arc<DomainValues> {
        let _gate = self.refresh_gate.lock().await;
        let current = self.current.read().await.clone();
        self.reload(&current).await
    }

    fn is_stale(&self, snapshot: &Snapshot) -> bool {
        if self.service.is_none() {
            return false;
        }
        if let Some(failed_at) = snapshot.failed_at {
            if failed_at.elapsed() < self.retry_interval {
                return false;
            }
        }
        match snapshot.loaded_at {
            Some(loaded_at) => loaded_at.elapsed() >= self.ttl,
            None => true,
        }
    }

    async fn reload(&self, current: &Snapshot) -> Arc<DomainValues> {
        let Some(service) = &self.service else {
            return current.values.clone();
        };

        match service.list_values(&Attribute::ALL).await {
            Ok(values) => {
                debug!(
                    "Loaded domain values for {} attributes",
                    values.attributes().count()
                );
                let snapshot = Arc::new(Snapshot {
                    values: Arc::new(values),
                    source: SnapshotSource::Remote,
                    loaded_at: Some(Instant::now()),
                    failed_at: None,
                });
                let values = snapshot.values.clone();
                *self.current.write().await = snapshot;
                values
            }
            Err(e) if current.source == SnapshotSource::Remote => {
                warn!("Values refresh failed, serving previous snapshot: {e}");
                // The TTL is not reset; only the retry is deferred
                let snapshot = Arc::new(Snapshot {
                    values: current.values.clone(),
                    source: SnapshotSource::Remote,
                    loaded_at: current.loaded_at,
                    failed_at: Some(Instant::now()),
                });
                let values = snapshot.values.clone();
                *self.current.write().await = snapshot;
                values
            }
            Err(e) => {
                warn!("Values refresh failed, serving built-in vocabulary: {e}");
                let snapshot = Arc::new(Snapshot {
                    values: Arc::new(DomainValues::builtin()),
                    source: SnapshotSource::Builtin,
                    loaded_at: None,
                    failed_at: Some(Instant::now()),
                });
                let values = snapshot.values.clone();
                *self.current.write().await = snapshot;
                values
            }
        }
    }
}
