//! JSON export and import of the fact table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use veritas_core::models::FoundationFact;

use crate::payload::{self, FieldRejection};

/// Serialized snapshot of the fact table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactExport {
    pub exported_at: DateTime<Utc>,
    pub revision: u64,
    pub facts: Vec<FoundationFact>,
}

/// What an import did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    /// Ids already present and left alone because overwrite was off.
    pub skipped: Vec<String>,
    /// Ids whose fields failed their checks, with the reason.
    pub invalid: Vec<(String, String)>,
}

/// Re-run the field checks on an imported fact.
pub(crate) fn check_imported(fact: &FoundationFact) -> Result<(), FieldRejection> {
    payload::check_required("id", &fact.id)?;
    payload::check_value(&fact.value)?;
    payload::check_confidence(fact.confidence)?;
    payload::check_required("description", &fact.description)?;
    payload::check_required("source", &fact.source)?;
    Ok(())
}
