//! Individuals, families and the store boundary.
//!
//! The kernel never owns genealogical data. It reads individuals and
//! spousal families through [`FamilyStore`] and keeps only keys plus the
//! few fields the numbering walk needs: a display name, ordering dates,
//! partners and child slots.

use crate::error::StoreError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stable key of an individual (an XREF in GEDCOM terms).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PersonId(pub String);

impl PersonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable key of a spousal family.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UnionId(pub String);

impl UnionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How much of a [`SortDate`] was actually recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DatePrecision {
    Year,
    Month,
    Day,
}

/// A possibly partial genealogical date used as an ordering key.
///
/// Accepts `YYYY`, `YYYY-MM` and `YYYY-MM-DD`. Missing parts sort as the
/// first month/day of the recorded period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SortDate {
    date: NaiveDate,
    precision: DatePrecision,
}

impl SortDate {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }
}

impl FromStr for SortDate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split('-').collect();
        let number = |part: &str| -> Result<u32, String> {
            part.parse::<u32>()
                .map_err(|_| format!("invalid date: {trimmed}"))
        };
        let year: i32 = parts
            .first()
            .filter(|part| !part.is_empty())
            .ok_or_else(|| format!("invalid date: {trimmed}"))?
            .parse()
            .map_err(|_| format!("invalid date: {trimmed}"))?;

        let (month, day, precision) = match parts.len() {
            1 => (1, 1, DatePrecision::Year),
            2 => (number(parts[1])?, 1, DatePrecision::Month),
            3 => (number(parts[1])?, number(parts[2])?, DatePrecision::Day),
            _ => return Err(format!("invalid date: {trimmed}")),
        };

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| format!("invalid date: {trimmed}"))?;
        Ok(Self { date, precision })
    }
}

impl TryFrom<String> for SortDate {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SortDate> for String {
    fn from(value: SortDate) -> Self {
        value.to_string()
    }
}

impl fmt::Display for SortDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            DatePrecision::Year => write!(f, "{:04}", self.date.year()),
            DatePrecision::Month => write!(f, "{:04}-{:02}", self.date.year(), self.date.month()),
            DatePrecision::Day => write!(f, "{}", self.date.format("%Y-%m-%d")),
        }
    }
}

/// An individual as seen by the numbering walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: PersonId,
    pub name: Option<String>,
    pub birth: Option<SortDate>,
    pub unions: Vec<UnionId>,
}

impl Person {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: PersonId::new(id),
            name: None,
            birth: None,
            unions: Vec::new(),
        }
    }
}

/// A spousal family: up to two partners and ordered child slots.
///
/// A `None` child slot is a child the store knows exists but cannot
/// resolve. It still occupies a position in the sibling count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Union {
    pub id: UnionId,
    pub marriage: Option<SortDate>,
    pub first_partner: Option<PersonId>,
    pub second_partner: Option<PersonId>,
    pub children: Vec<Option<PersonId>>,
}

impl Union {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: UnionId::new(id),
            marriage: None,
            first_partner: None,
            second_partner: None,
            children: Vec::new(),
        }
    }

    /// The partner of `person` in this union.
    ///
    /// `None` when `person` is not one of the partners or the other
    /// partner slot is empty.
    pub fn partner_of(&self, person: &PersonId) -> Option<&PersonId> {
        if self.first_partner.as_ref() == Some(person) {
            self.second_partner.as_ref()
        } else if self.second_partner.as_ref() == Some(person) {
            self.first_partner.as_ref()
        } else {
            None
        }
    }
}

/// Read access to the host genealogical data.
///
/// Implementations report invalid keys as [`StoreError`]. Child slots that
/// cannot be resolved are returned as `None` rather than as an error.
pub trait FamilyStore {
    /// Resolve one individual by key.
    fn individual(&self, id: &PersonId) -> Result<Person, StoreError>;

    /// Spousal families of `person`, in source order.
    fn spousal_unions(&self, person: &Person) -> Result<Vec<Union>, StoreError>;

    /// Child slots of `union`, in source order.
    fn children(&self, union: &Union) -> Result<Vec<Option<Person>>, StoreError>;
}

impl<T: FamilyStore + ?Sized> FamilyStore for &T {
    fn individual(&self, id: &PersonId) -> Result<Person, StoreError> {
        (**self).individual(id)
    }

    fn spousal_unions(&self, person: &Person) -> Result<Vec<Union>, StoreError> {
        (**self).spousal_unions(person)
    }

    fn children(&self, union: &Union) -> Result<Vec<Option<Person>>, StoreError> {
        (**self).children(union)
    }
}
