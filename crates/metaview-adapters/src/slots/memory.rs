//! In-memory slots, for tests and terminal output.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock},
};

use tracing::trace;

use metaview_core::{
    application::{
        ApplicationError,
        ports::{SlotContent, SlotId, SlotSink},
    },
    error::MetaviewResult,
};

/// Keeps the latest content of every slot plus an update log.
#[derive(Debug, Clone, Default)]
pub struct MemorySlots {
    inner: Arc<RwLock<MemorySlotsInner>>,
}

#[derive(Debug, Default)]
struct MemorySlotsInner {
    current: BTreeMap<SlotId, SlotContent>,
    updates: usize,
}

impl MemorySlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: &SlotId) -> Option<SlotContent> {
        let inner = self.inner.read().ok()?;
        inner.current.get(slot).cloned()
    }

    /// Number of updates received across all slots.
    pub fn update_count(&self) -> usize {
        self.inner.read().map(|i| i.updates).unwrap_or_default()
    }

    pub fn snapshot(&self) -> Vec<(SlotId, SlotContent)> {
        self.inner
            .read()
            .map(|i| i.current.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
            .unwrap_or_default()
    }
}

impl SlotSink for MemorySlots {
    fn update(&self, slot: &SlotId, content: SlotContent) -> MetaviewResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        trace!(%slot, bytes = content.as_str().len(), "Slot updated");
        inner.current.insert(slot.clone(), content);
        inner.updates += 1;
        Ok(())
    }
}
