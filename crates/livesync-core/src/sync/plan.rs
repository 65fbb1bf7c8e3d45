//! Sync maps and plans

use serde::Serialize;

/// One changed host file and where it lands in the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncEntry {
    pub host: String,
    /// Container-absolute destinations, in rule declaration order
    pub destinations: Vec<String>,
}

/// Host file to container destinations, in change-batch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SyncMap {
    entries: Vec<SyncEntry>,
}

impl SyncMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record destinations for `host`, replacing any earlier record for it.
    pub fn insert(&mut self, host: impl Into<String>, destinations: Vec<String>) {
        let host = host.into();
        match self.entries.iter_mut().find(|e| e.host == host) {
            Some(entry) => entry.destinations = destinations,
            None => self.entries.push(SyncEntry { host, destinations }),
        }
    }

    pub fn get(&self, host: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|e| e.host == host)
            .map(|e| e.destinations.as_slice())
    }

    pub fn entries(&self) -> &[SyncEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SyncEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SyncMap {
    type Item = &'a SyncEntry;
    type IntoIter = std::slice::Iter<'a, SyncEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Everything one sync cycle will push into containers of one image.
///
/// Built fresh for each change batch and consumed by a single executor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncPlan {
    pub target_image_tag: String,
    pub copy: SyncMap,
    pub delete: SyncMap,
}

impl SyncPlan {
    /// Copy entries followed by delete entries.
    pub fn combined(&self) -> SyncMap {
        let mut combined = self.copy.clone();
        for entry in &self.delete {
            combined.insert(entry.host.clone(), entry.destinations.clone());
        }
        combined
    }

    pub fn is_empty(&self) -> bool {
        self.copy.is_empty() && self.delete.is_empty()
    }

    /// Number of host files touched by the plan.
    pub fn file_count(&self) -> usize {
        self.copy.len() + self.delete.len()
    }
}

/// Result of trying to build a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Nothing changed, or the artifact declares no sync rules
    NoChangeNeeded,
    /// Some changed file matches no rule; the caller should rebuild
    AbortRequiresRebuild,
    Plan(SyncPlan),
}

impl PlanOutcome {
    pub fn plan(&self) -> Option<&SyncPlan> {
        match self {
            PlanOutcome::Plan(plan) => Some(plan),
            _ => None,
        }
    }

    pub fn into_plan(self) -> Option<SyncPlan> {
        match self {
            PlanOutcome::Plan(plan) => Some(plan),
            _ => None,
        }
    }
}
