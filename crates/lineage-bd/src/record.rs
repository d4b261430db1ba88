//! JSONL record types: one individual or one family per line.

use lineage_kernel::{Person, PersonId, SortDate, Union, UnionId};
use serde::Deserialize;

/// One line of a tree file, tagged by `"type"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    Individual(IndividualRecord),
    Family(FamilyRecord),
}

impl Record {
    pub fn id(&self) -> &str {
        match self {
            Self::Individual(individual) => &individual.id,
            Self::Family(family) => &family.id,
        }
    }
}

impl From<IndividualRecord> for Record {
    fn from(record: IndividualRecord) -> Self {
        Self::Individual(record)
    }
}

impl From<FamilyRecord> for Record {
    fn from(record: FamilyRecord) -> Self {
        Self::Family(record)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndividualRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth: Option<SortDate>,
    /// Spousal families, in source order.
    #[serde(default)]
    pub unions: Vec<String>,
}

impl IndividualRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            birth: None,
            unions: Vec::new(),
        }
    }

    pub fn to_person(&self) -> Person {
        Person {
            id: PersonId::new(self.id.clone()),
            name: self.name.clone(),
            birth: self.birth,
            unions: self.unions.iter().cloned().map(UnionId).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FamilyRecord {
    pub id: String,
    #[serde(default)]
    pub marriage: Option<SortDate>,
    /// `[first, second]`; either may be null or missing.
    #[serde(default)]
    pub partners: Vec<Option<String>>,
    /// Child slots; `null` is a known but unidentified child.
    #[serde(default)]
    pub children: Vec<Option<String>>,
}

impl FamilyRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            marriage: None,
            partners: Vec::new(),
            children: Vec::new(),
        }
    }

    fn partner(&self, position: usize) -> Option<PersonId> {
        self.partners
            .get(position)
            .cloned()
            .flatten()
            .map(PersonId)
    }

    pub fn to_union(&self) -> Union {
        Union {
            id: UnionId::new(self.id.clone()),
            marriage: self.marriage,
            first_partner: self.partner(0),
            second_partner: self.partner(1),
            children: self
                .children
                .iter()
                .map(|child| child.clone().map(PersonId))
                .collect(),
        }
    }
}
