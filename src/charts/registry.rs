//! Chart Registry
//!
//! Holds the live chart instance of each visual slot. The only way to put
//! a chart into a slot is `create_or_replace`, which destroys the previous
//! occupant and installs the new one under a single write lock, so a slot
//! never holds more than one instance.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use super::spec::ChartSpec;

/// A fixed visual region reserved for one chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    /// Pollutant breakdown bar chart
    Breakdown,
    /// Historical AQI line chart
    Trend,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 2] = [ChartSlot::Breakdown, ChartSlot::Trend];

    pub fn name(self) -> &'static str {
        match self {
            ChartSlot::Breakdown => "breakdown",
            ChartSlot::Trend => "trend",
        }
    }
}

impl std::fmt::Display for ChartSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Identifier of a chart instance, unique per registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartInstanceId(pub u64);

impl std::fmt::Display for ChartInstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "chart-{}", self.0)
    }
}

/// A chart occupying a slot
#[derive(Debug, Clone)]
pub struct ChartInstance {
    pub id: ChartInstanceId,
    pub slot: ChartSlot,
    pub spec: ChartSpec,
    pub created_at: DateTime<Utc>,
}

/// Registry counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub created: u64,
    pub destroyed: u64,
    pub live: usize,
}

impl std::fmt::Display for RegistryStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} live, {} created, {} destroyed",
            self.live, self.created, self.destroyed
        )
    }
}

/// Live chart instances keyed by slot
#[derive(Debug, Default)]
pub struct ChartRegistry {
    slots: RwLock<HashMap<ChartSlot, ChartInstance>>,
    created: AtomicU64,
    destroyed: AtomicU64,
}

impl ChartRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Destroy the chart in `slot`, if any, then install a new one
    pub async fn create_or_replace(&self, slot: ChartSlot, spec: ChartSpec) -> ChartInstanceId {
        let mut slots = self.slots.write().await;

        if let Some(previous) = slots.remove(&slot) {
            self.destroy(previous);
        }

        let id = ChartInstanceId(self.created.fetch_add(1, Ordering::SeqCst) + 1);
        slots.insert(
            slot,
            ChartInstance {
                id,
                slot,
                spec,
                created_at: Utc::now(),
            },
        );

        tracing::debug!(%slot, %id, "chart created");
        id
    }

    fn destroy(&self, instance: ChartInstance) {
        self.destroyed.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(slot = %instance.slot, id = %instance.id, "chart destroyed");
    }

    /// Current instance of a slot
    pub async fn get(&self, slot: ChartSlot) -> Option<ChartInstance> {
        self.slots.read().await.get(&slot).cloned()
    }

    /// Number of occupied slots
    pub async fn live_instances(&self) -> usize {
        self.slots.read().await.len()
    }

    pub async fn stats(&self) -> RegistryStats {
        let live = self.slots.read().await.len();
        RegistryStats {
            created: self.created.load(Ordering::SeqCst),
            destroyed: self.destroyed.load(Ordering::SeqCst),
            live,
        }
    }

    /// Destroy every live chart
    pub async fn clear(&self) {
        let mut slots = self.slots.write().await;
        for (_, instance) in slots.drain() {
            self.destroy(instance);
        }
    }
}
