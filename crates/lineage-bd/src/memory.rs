//! Canonical in-memory tree state and the [`FamilyStore`] implementation
//! the numbering kernel reads from.

use crate::jsonl::{JsonlError, read_records_from_path};
use crate::record::{FamilyRecord, IndividualRecord, Record};
use lineage_kernel::{FamilyStore, Person, PersonId, StoreError, Union};
use std::collections::BTreeMap;
use std::path::Path;

/// Errors raised while loading or building the memory store.
#[derive(Debug, thiserror::Error)]
pub enum MemoryStoreError {
    #[error(transparent)]
    Jsonl(#[from] JsonlError),

    #[error("family {family} lists {count} partners; at most two are allowed")]
    TooManyPartners { family: String, count: usize },
}

/// Individuals and families indexed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    individuals: BTreeMap<String, IndividualRecord>,
    families: BTreeMap<String, FamilyRecord>,
}

impl MemoryStore {
    /// Build a store from parsed records.
    ///
    /// Duplicate ids are resolved last-write-wins, so a later line in a
    /// tree file overrides an earlier one.
    pub fn from_records(records: Vec<Record>) -> Result<Self, MemoryStoreError> {
        let mut store = Self::default();
        for record in records {
            if let Some(previous) = store.upsert(record)? {
                tracing::debug!(id = previous.id(), "duplicate record replaced");
            }
        }
        Ok(store)
    }

    /// Load store state from a JSONL file.
    pub fn load_jsonl(path: impl AsRef<Path>) -> Result<Self, MemoryStoreError> {
        let path = path.as_ref();
        let store = Self::from_records(read_records_from_path(path)?)?;
        tracing::debug!(
            path = %path.display(),
            individuals = store.individuals.len(),
            families = store.families.len(),
            "tree loaded"
        );
        Ok(store)
    }

    /// Insert or replace a record. Returns the previous record with the
    /// same id and type, if any.
    fn upsert(&mut self, record: Record) -> Result<Option<Record>, MemoryStoreError> {
        Ok(match record {
            Record::Individual(individual) => self
                .individuals
                .insert(individual.id.clone(), individual)
                .map(Record::Individual),
            Record::Family(family) => {
                if family.partners.len() > 2 {
                    return Err(MemoryStoreError::TooManyPartners {
                        family: family.id,
                        count: family.partners.len(),
                    });
                }
                self.families
                    .insert(family.id.clone(), family)
                    .map(Record::Family)
            }
        })
    }

    pub fn individual_record(&self, id: &str) -> Option<&IndividualRecord> {
        self.individuals.get(id)
    }

    pub fn family_record(&self, id: &str) -> Option<&FamilyRecord> {
        self.families.get(id)
    }

    pub fn individual_count(&self) -> usize {
        self.individuals.len()
    }

    pub fn family_count(&self) -> usize {
        self.families.len()
    }
}

impl FamilyStore for MemoryStore {
    fn individual(&self, id: &PersonId) -> Result<Person, StoreError> {
        self.individuals
            .get(id.as_str())
            .map(IndividualRecord::to_person)
            .ok_or_else(|| StoreError::IndividualNotFound(id.to_string()))
    }

    fn spousal_unions(&self, person: &Person) -> Result<Vec<Union>, StoreError> {
        person
            .unions
            .iter()
            .map(|id| {
                self.families
                    .get(id.as_str())
                    .map(FamilyRecord::to_union)
                    .ok_or_else(|| StoreError::FamilyNotFound(id.to_string()))
            })
            .collect()
    }

    fn children(&self, union: &Union) -> Result<Vec<Option<Person>>, StoreError> {
        Ok(union
            .children
            .iter()
            .map(|slot| {
                let child = slot.as_ref()?;
                let resolved = self.individuals.get(child.as_str());
                if resolved.is_none() {
                    tracing::warn!(union = %union.id, child = %child, "child does not resolve; reported as empty slot");
                }
                resolved.map(IndividualRecord::to_person)
            })
            .collect())
    }
}
