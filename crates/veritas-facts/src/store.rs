//! FoundationFactsStore: the ground-truth table.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::{json, Value};
use tracing::{debug, info};

use veritas_core::errors::{FactsError, VeritasResult};
use veritas_core::events::{DomainEvent, FactChange};
use veritas_core::models::{Actor, AuditAction, FactCategory, FoundationFact, Outcome, Permission};
use veritas_core::traits::IEventBus;
use veritas_core::AccessGate;

use crate::contradiction::{self, ContradictionInfo, FactComparison};
use crate::defaults::default_facts;
use crate::payload::{FactPayload, FactUpdate};
use crate::table::FactTable;
use crate::transfer::{self, FactExport, ImportSummary};

/// Permission-gated store of foundation facts.
///
/// Every successful mutation bumps [`revision`](Self::revision) while the
/// write lock is held, then publishes `FoundationFactChanged` after the lock
/// is released.
pub struct FoundationFactsStore {
    table: RwLock<FactTable>,
    revision: AtomicU64,
    gate: AccessGate,
    events: Arc<dyn IEventBus>,
}

impl FoundationFactsStore {
    /// Create an empty store.
    pub fn new(gate: AccessGate, events: Arc<dyn IEventBus>) -> Self {
        Self::with_facts(gate, events, Vec::new())
    }

    /// Create a store seeded with the curated default facts.
    pub fn with_default_facts(gate: AccessGate, events: Arc<dyn IEventBus>) -> Self {
        Self::with_facts(gate, events, default_facts())
    }

    /// Create a store seeded with `facts`. Seeding is not a gated mutation.
    pub fn with_facts(
        gate: AccessGate,
        events: Arc<dyn IEventBus>,
        facts: Vec<FoundationFact>,
    ) -> Self {
        let mut table = FactTable::default();
        for fact in facts {
            table.upsert(fact);
        }
        Self {
            table: RwLock::new(table),
            revision: AtomicU64::new(0),
            gate,
            events,
        }
    }

    /// Monotonic mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> VeritasResult<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> VeritasResult<bool> {
        Ok(self.len()? == 0)
    }

    pub fn get(&self, id: &str) -> VeritasResult<Option<FoundationFact>> {
        Ok(self.read()?.get(id).cloned())
    }

    /// All facts, in id order.
    pub fn all(&self) -> VeritasResult<Vec<FoundationFact>> {
        Ok(self.read()?.iter().cloned().collect())
    }

    pub fn get_by_category(&self, category: FactCategory) -> VeritasResult<Vec<FoundationFact>> {
        let table = self.read()?;
        Ok(table
            .ids_in_category(category)
            .iter()
            .filter_map(|id| table.get(id).cloned())
            .collect())
    }

    /// Case-insensitive substring search over id, description, keywords and value.
    pub fn search(&self, keyword: &str) -> VeritasResult<Vec<FoundationFact>> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let table = self.read()?;
        Ok(table
            .iter()
            .filter(|f| {
                f.id.to_lowercase().contains(&needle)
                    || f.description.to_lowercase().contains(&needle)
                    || f.keywords.iter().any(|k| k.contains(&needle))
                    || f.normalized_value().contains(&needle)
            })
            .cloned()
            .collect())
    }

    /// Keyword-index search. With `match_all`, a fact must carry every keyword.
    pub fn search_by_keywords(
        &self,
        keywords: &[&str],
        match_all: bool,
    ) -> VeritasResult<Vec<FoundationFact>> {
        let table = self.read()?;
        let mut hits: Option<BTreeSet<String>> = None;
        for keyword in keywords {
            let ids = table.ids_for_keyword(&keyword.trim().to_lowercase());
            hits = Some(match hits {
                None => ids,
                Some(acc) if match_all => acc.intersection(&ids).cloned().collect(),
                Some(acc) => acc.union(&ids).cloned().collect(),
            });
        }
        Ok(hits
            .unwrap_or_default()
            .iter()
            .filter_map(|id| table.get(id).cloned())
            .collect())
    }

    /// Facts whose confidence lies in `[min, max]`.
    pub fn search_by_confidence(&self, min: f64, max: f64) -> VeritasResult<Vec<FoundationFact>> {
        let table = self.read()?;
        Ok(table
            .iter()
            .filter(|f| f.confidence >= min && f.confidence <= max)
            .cloned()
            .collect())
    }

    /// Facts attributed to `source`, compared case-insensitively.
    pub fn search_by_source(&self, source: &str) -> VeritasResult<Vec<FoundationFact>> {
        let wanted = source.trim().to_lowercase();
        if wanted.is_empty() {
            return Ok(Vec::new());
        }
        let table = self.read()?;
        Ok(table
            .iter()
            .filter(|f| f.source.trim().to_lowercase() == wanted)
            .cloned()
            .collect())
    }

    /// Compare `(key, value)` against the fact keyed by `key`.
    pub fn compare(&self, key: &str, value: &Value) -> VeritasResult<FactComparison> {
        let table = self.read()?;
        Ok(contradiction::compare(table.get(key), value))
    }

    /// The contradiction, if a fact keyed by `key` holds a different value.
    pub fn check_contradiction(
        &self,
        key: &str,
        value: &Value,
    ) -> VeritasResult<Option<ContradictionInfo>> {
        Ok(self.compare(key, value)?.contradiction())
    }

    /// Add a new fact. Requires `modify_foundation_facts`.
    pub async fn add(
        &self,
        actor: &Actor,
        payload: FactPayload,
    ) -> VeritasResult<Outcome<FoundationFact>> {
        let details = json!({ "fact_id": payload.id });
        self.gate
            .run(
                actor,
                Permission::ModifyFoundationFacts,
                AuditAction::FactAdded,
                details,
                move || async move { self.add_inner(payload) },
            )
            .await
    }

    /// Update an existing fact. Requires `modify_foundation_facts`.
    pub async fn update(
        &self,
        actor: &Actor,
        id: &str,
        changes: FactUpdate,
    ) -> VeritasResult<Outcome<FoundationFact>> {
        let details = json!({ "fact_id": id, "changes": changes });
        self.gate
            .run(
                actor,
                Permission::ModifyFoundationFacts,
                AuditAction::FactUpdated,
                details,
                move || async move { self.update_inner(id, &changes) },
            )
            .await
    }

    /// Remove a fact. Requires `modify_foundation_facts`.
    pub async fn remove(&self, actor: &Actor, id: &str) -> VeritasResult<Outcome<FoundationFact>> {
        let details = json!({ "fact_id": id });
        self.gate
            .run(
                actor,
                Permission::ModifyFoundationFacts,
                AuditAction::FactRemoved,
                details,
                move || async move { self.remove_inner(id) },
            )
            .await
    }

    /// Serialize the whole table.
    pub fn export_json(&self) -> VeritasResult<String> {
        let export = FactExport {
            exported_at: chrono::Utc::now(),
            revision: self.revision(),
            facts: self.all()?,
        };
        serde_json::to_string_pretty(&export)
            .map_err(|e| FactsError::ExportFailed(e.to_string()).into())
    }

    /// Load facts from an export document. Requires `modify_foundation_facts`.
    /// Existing ids are replaced only when `overwrite` is set.
    pub async fn import_json(
        &self,
        actor: &Actor,
        document: &str,
        overwrite: bool,
    ) -> VeritasResult<Outcome<ImportSummary>> {
        let details = json!({ "overwrite": overwrite });
        self.gate
            .run(
                actor,
                Permission::ModifyFoundationFacts,
                AuditAction::FactsImported,
                details,
                move || async move { self.import_inner(document, overwrite) },
            )
            .await
    }

    fn add_inner(&self, payload: FactPayload) -> VeritasResult<Outcome<FoundationFact>> {
        let fact = match payload.into_fact() {
            Ok(fact) => fact,
            Err(r) => return Ok(Outcome::rejected(r.field, r.reason)),
        };
        let revision = {
            let mut table = self.write()?;
            if table.contains(&fact.id) {
                return Ok(Outcome::rejected("id", format!("fact {} already exists", fact.id)));
            }
            table.upsert(fact.clone());
            self.bump()
        };
        info!(fact_id = %fact.id, category = %fact.category, revision, "foundation fact added");
        self.announce(&fact.id, FactChange::Added, revision);
        Ok(Outcome::Completed(fact))
    }

    fn update_inner(&self, id: &str, changes: &FactUpdate) -> VeritasResult<Outcome<FoundationFact>> {
        let (updated, revision) = {
            let mut table = self.write()?;
            let Some(current) = table.get(id) else {
                return Ok(Outcome::rejected("id", format!("fact {id} does not exist")));
            };
            let updated = match changes.apply_to(current) {
                Ok(updated) => updated,
                Err(r) => return Ok(Outcome::rejected(r.field, r.reason)),
            };
            table.upsert(updated.clone());
            (updated, self.bump())
        };
        info!(fact_id = %id, revision, "foundation fact updated");
        self.announce(id, FactChange::Updated, revision);
        Ok(Outcome::Completed(updated))
    }

    fn remove_inner(&self, id: &str) -> VeritasResult<Outcome<FoundationFact>> {
        let (removed, revision) = {
            let mut table = self.write()?;
            let Some(removed) = table.remove(id) else {
                return Ok(Outcome::rejected("id", format!("fact {id} does not exist")));
            };
            (removed, self.bump())
        };
        info!(fact_id = %id, revision, "foundation fact removed");
        self.announce(id, FactChange::Removed, revision);
        Ok(Outcome::Completed(removed))
    }

    fn import_inner(&self, document: &str, overwrite: bool) -> VeritasResult<Outcome<ImportSummary>> {
        let export: FactExport = match serde_json::from_str(document) {
            Ok(export) => export,
            Err(e) => return Ok(Outcome::rejected("document", e.to_string())),
        };
        let mut summary = ImportSummary::default();
        let revision = {
            let mut table = self.write()?;
            for mut fact in export.facts {
                if let Err(r) = transfer::check_imported(&fact) {
                    summary.invalid.push((fact.id.clone(), format!("{}: {}", r.field, r.reason)));
                    continue;
                }
                if table.contains(&fact.id) && !overwrite {
                    summary.skipped.push(fact.id.clone());
                    continue;
                }
                fact.refresh_keywords();
                table.upsert(fact);
                summary.imported += 1;
            }
            if summary.imported > 0 {
                Some(self.bump())
            } else {
                None
            }
        };
        info!(
            imported = summary.imported,
            skipped = summary.skipped.len(),
            invalid = summary.invalid.len(),
            "foundation facts imported"
        );
        if let Some(revision) = revision {
            self.announce("*", FactChange::Imported, revision);
        }
        Ok(Outcome::Completed(summary))
    }

    /// Increment the revision. Call with the write lock held.
    fn bump(&self) -> u64 {
        self.revision.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn announce(&self, fact_id: &str, change: FactChange, revision: u64) {
        debug!(fact_id = %fact_id, ?change, revision, "publishing fact change");
        self.events.publish(DomainEvent::FoundationFactChanged {
            fact_id: fact_id.to_string(),
            change,
            revision,
        });
    }

    fn read(&self) -> VeritasResult<RwLockReadGuard<'_, FactTable>> {
        self.table
            .read()
            .map_err(|e| FactsError::LockPoisoned(format!("read: {e}")).into())
    }

    fn write(&self) -> VeritasResult<RwLockWriteGuard<'_, FactTable>> {
        self.table
            .write()
            .map_err(|e| FactsError::LockPoisoned(format!("write: {e}")).into())
    }
}
