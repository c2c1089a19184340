//! In-memory fact table with category and keyword indexes.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use veritas_core::models::{FactCategory, FoundationFact};

#[derive(Debug, Default)]
pub(crate) struct FactTable {
    facts: BTreeMap<String, FoundationFact>,
    by_category: HashMap<FactCategory, BTreeSet<String>>,
    by_keyword: HashMap<String, BTreeSet<String>>,
}

impl FactTable {
    pub(crate) fn get(&self, id: &str) -> Option<&FoundationFact> {
        self.facts.get(id)
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.facts.contains_key(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.facts.len()
    }

    /// All facts in id order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &FoundationFact> {
        self.facts.values()
    }

    /// Insert or replace a fact, keeping indexes in step.
    pub(crate) fn upsert(&mut self, fact: FoundationFact) {
        if let Some(previous) = self.facts.remove(&fact.id) {
            self.unindex(&previous);
        }
        self.index(&fact);
        self.facts.insert(fact.id.clone(), fact);
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<FoundationFact> {
        let removed = self.facts.remove(id)?;
        self.unindex(&removed);
        Some(removed)
    }

    pub(crate) fn ids_in_category(&self, category: FactCategory) -> Vec<String> {
        self.by_category
            .get(&category)
            .map(|ids| ids.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub(crate) fn ids_for_keyword(&self, keyword: &str) -> BTreeSet<String> {
        self.by_keyword.get(keyword).cloned().unwrap_or_default()
    }

    fn index(&mut self, fact: &FoundationFact) {
        self.by_category
            .entry(fact.category)
            .or_default()
            .insert(fact.id.clone());
        for keyword in &fact.keywords {
            self.by_keyword
                .entry(keyword.clone())
                .or_default()
                .insert(fact.id.clone());
        }
    }

    fn unindex(&mut self, fact: &FoundationFact) {
        if let Some(ids) = self.by_category.get_mut(&fact.category) {
            ids.remove(&fact.id);
        }
        for keyword in &fact.keywords {
            if let Some(ids) = self.by_keyword.get_mut(keyword) {
                ids.remove(&fact.id);
                if ids.is_empty() {
                    self.by_keyword.remove(keyword);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fact(id: &str, category: FactCategory, description: &str) -> FoundationFact {
        FoundationFact::new(id, json!("v"), category, 1.0, description, "test")
    }

    #[test]
    fn replacing_a_fact_moves_its_index_entries() {
        let mut table = FactTable::default();
        table.upsert(fact("f1", FactCategory::Physics, "gravity pulls"));
        table.upsert(fact("f1", FactCategory::Logic, "modus ponens"));

        assert!(table.ids_in_category(FactCategory::Physics).is_empty());
        assert_eq!(table.ids_in_category(FactCategory::Logic), vec!["f1".to_string()]);
        assert!(table.ids_for_keyword("gravity").is_empty());
        assert!(table.ids_for_keyword("ponens").contains("f1"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn removal_clears_indexes() {
        let mut table = FactTable::default();
        table.upsert(fact("f1", FactCategory::Physics, "gravity pulls"));
        assert!(table.remove("f1").is_some());
        assert!(table.remove("f1").is_none());
        assert!(table.ids_in_category(FactCategory::Physics).is_empty());
        assert!(table.ids_for_keyword("gravity").is_empty());
    }
}
