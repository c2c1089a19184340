//! Bounded in-memory feedback table. Callers provide the locking.

use std::collections::{BTreeMap, HashMap, VecDeque};

use chrono::{DateTime, Utc};

use veritas_core::models::{AppliedCorrection, FeedbackEntry, FeedbackOrigin, FeedbackStatus};

use crate::submission::{FeedbackFilter, FeedbackStatistics};

/// Result of trying to mark an entry applied.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ApplyState {
    Applied(FeedbackEntry),
    AlreadyApplied(FeedbackEntry),
    Ineligible { field: &'static str, reason: String },
}

/// Entries in insertion order, evicting the oldest past `capacity`, plus
/// the corrections applied to each reasoning step.
#[derive(Debug)]
pub(crate) struct FeedbackStore {
    capacity: usize,
    entries: HashMap<String, FeedbackEntry>,
    order: VecDeque<String>,
    applied: HashMap<String, Vec<AppliedCorrection>>,
}

impl FeedbackStore {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
            applied: HashMap::new(),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn get(&self, id: &str) -> Option<&FeedbackEntry> {
        self.entries.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut FeedbackEntry> {
        self.entries.get_mut(id)
    }

    /// Insert `entry`, returning whatever was evicted to make room.
    /// Re-inserting a known id replaces it in place.
    pub(crate) fn insert(&mut self, entry: FeedbackEntry) -> Vec<FeedbackEntry> {
        if let Some(existing) = self.entries.get_mut(&entry.id) {
            *existing = entry;
            return Vec::new();
        }
        let mut evicted = Vec::new();
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            if let Some(old) = self.entries.remove(&oldest) {
                self.forget_applied(&old);
                evicted.push(old);
            }
        }
        if entry.applied {
            self.applied
                .entry(entry.step_id.clone())
                .or_default()
                .push(AppliedCorrection::from_entry(&entry, entry.applied_at.unwrap_or(entry.updated_at)));
        }
        self.order.push_back(entry.id.clone());
        self.entries.insert(entry.id.clone(), entry);
        evicted
    }

    /// Check-and-set `applied`. `None` when the id is unknown.
    pub(crate) fn apply(
        &mut self,
        id: &str,
        require_verification: bool,
        auto: bool,
        at: DateTime<Utc>,
    ) -> Option<ApplyState> {
        let entry = self.entries.get_mut(id)?;
        if entry.applied {
            return Some(ApplyState::AlreadyApplied(entry.clone()));
        }
        if entry.status == FeedbackStatus::Rejected {
            return Some(ApplyState::Ineligible {
                field: "status",
                reason: "feedback was rejected".to_string(),
            });
        }
        if require_verification && !entry.verified {
            return Some(ApplyState::Ineligible {
                field: "verified",
                reason: "verification is required before applying".to_string(),
            });
        }
        entry.applied = true;
        entry.auto_applied = auto;
        entry.status = FeedbackStatus::Applied;
        entry.applied_at = Some(at);
        entry.updated_at = at;
        let applied = entry.clone();
        self.applied
            .entry(applied.step_id.clone())
            .or_default()
            .push(AppliedCorrection::from_entry(&applied, at));
        Some(ApplyState::Applied(applied))
    }

    pub(crate) fn applied_for(&self, step_id: &str) -> Vec<AppliedCorrection> {
        self.applied.get(step_id).cloned().unwrap_or_default()
    }

    /// Ids in insertion order.
    pub(crate) fn ids(&self) -> Vec<String> {
        self.order.iter().cloned().collect()
    }

    pub(crate) fn list(&self, filter: &FeedbackFilter) -> Vec<FeedbackEntry> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id))
            .filter(|e| filter.matches(e))
            .take(filter.limit)
            .cloned()
            .collect()
    }

    pub(crate) fn statistics(&self) -> FeedbackStatistics {
        let mut stats = FeedbackStatistics {
            total: self.entries.len(),
            ..FeedbackStatistics::default()
        };
        let mut by_category = BTreeMap::new();
        let mut confidence_sum = 0.0;
        for entry in self.entries.values() {
            match entry.status {
                FeedbackStatus::PendingVerification => stats.pending += 1,
                FeedbackStatus::Verified => stats.verified += 1,
                FeedbackStatus::Applied => stats.applied += 1,
                FeedbackStatus::Rejected => stats.rejected += 1,
            }
            if entry.auto_applied {
                stats.auto_applied += 1;
            }
            if entry.origin == FeedbackOrigin::System {
                stats.system += 1;
            }
            *by_category.entry(entry.category).or_insert(0) += 1;
            confidence_sum += entry.confidence;
        }
        stats.by_category = by_category;
        if stats.total > 0 {
            stats.average_confidence = confidence_sum / stats.total as f64;
        }
        stats
    }

    /// Drop everything, returning how many entries were removed.
    pub(crate) fn purge(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.applied.clear();
        removed
    }

    fn forget_applied(&mut self, entry: &FeedbackEntry) {
        if let Some(list) = self.applied.get_mut(&entry.step_id) {
            list.retain(|c| c.feedback_id != entry.id);
            if list.is_empty() {
                self.applied.remove(&entry.step_id);
            }
        }
    }
}
