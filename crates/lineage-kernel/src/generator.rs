//! Descendant number generator.
//!
//! Walks the descendants of one ancestor depth-first, pre-order, asking a
//! [`NumberingStyle`] for every label:
//!
//! ```text
//! enter(person)
//!     spouse pass      unions sorted by marriage date, one spouse label each
//!     descendant pass  per union: children sorted by birth date,
//!                      empty slots keep their position
//!         label child  nth_child counts across all unions of `person`
//!         enter(child)
//! ```
//!
//! The walk keeps an explicit stack of frames instead of recursing, so
//! deep lines cannot exhaust the call stack. Frames resume exactly where
//! the recursive formulation would, which keeps order-sensitive styles
//! (the NGSQ counter) stable.

use crate::error::LineageError;
use crate::family::{FamilyStore, Person, PersonId, Union, UnionId};
use crate::labeling::{LabelEntry, LabelingResult, ResultKey};
use crate::params::NumberingParameters;
use crate::style::NumberingStyle;

/// Numbers the descendants of one ancestor with one style.
///
/// The result is computed on the first [`generate`](Self::generate) call
/// and cached. Changing the ancestor or the style drops the cache.
#[derive(Debug)]
pub struct DescendantNumberGenerator<S> {
    store: S,
    ancestor: Person,
    style: Box<dyn NumberingStyle>,
    numbering: Option<LabelingResult>,
}

impl<S: FamilyStore> DescendantNumberGenerator<S> {
    /// Resolve `ancestor` in `store`. Fails if the ancestor does not exist.
    pub fn new(
        store: S,
        ancestor: &PersonId,
        style: Box<dyn NumberingStyle>,
    ) -> Result<Self, LineageError> {
        let ancestor = store.individual(ancestor)?;
        Ok(Self {
            store,
            ancestor,
            style,
            numbering: None,
        })
    }

    pub fn ancestor(&self) -> &Person {
        &self.ancestor
    }

    pub fn style(&self) -> &dyn NumberingStyle {
        self.style.as_ref()
    }

    pub fn set_ancestor(&mut self, ancestor: &PersonId) -> Result<(), LineageError> {
        self.ancestor = self.store.individual(ancestor)?;
        self.numbering = None;
        Ok(())
    }

    pub fn set_style(&mut self, style: Box<dyn NumberingStyle>) {
        self.style = style;
        self.numbering = None;
    }

    /// Number every descendant (and, if the style wants them, spouses).
    pub fn generate(&mut self) -> Result<&LabelingResult, LineageError> {
        let numbering = match self.numbering.take() {
            Some(numbering) => numbering,
            None => walk(&self.store, &self.ancestor, self.style.as_mut())?,
        };
        Ok(self.numbering.insert(numbering))
    }
}

/// One person whose unions are being walked.
struct Frame {
    person: PersonId,
    label: String,
    depth: u32,
    unions: Vec<Union>,
    union_cursor: usize,
    slots: Vec<Option<Person>>,
    slots_loaded: bool,
    child_cursor: usize,
    cumulative: u32,
}

/// The next child slot of a frame, with its numbering parameters.
struct ChildSlot {
    union: UnionId,
    index: usize,
    child: Option<Person>,
    params: NumberingParameters,
}

impl Frame {
    fn next_slot(&mut self, store: &impl FamilyStore) -> Result<Option<ChildSlot>, LineageError> {
        loop {
            let Some(union) = self.unions.get(self.union_cursor) else {
                return Ok(None);
            };

            if !self.slots_loaded {
                self.slots = store.children(union)?;
                sort_children(&mut self.slots);
                self.slots_loaded = true;
                self.child_cursor = 0;
            }

            if self.child_cursor < self.slots.len() {
                let index = self.child_cursor;
                self.child_cursor += 1;
                return Ok(Some(ChildSlot {
                    union: union.id.clone(),
                    index,
                    child: self.slots[index].take(),
                    params: NumberingParameters {
                        nth_child: self.cumulative + index as u32 + 1,
                        nth_marriage: self.union_cursor as u32 + 1,
                        total_marriages: self.unions.len() as u32,
                        parent_label: Some(self.label.clone()),
                        depth: self.depth + 1,
                    },
                }));
            }

            self.cumulative += self.slots.len() as u32;
            self.union_cursor += 1;
            self.slots.clear();
            self.slots_loaded = false;
        }
    }
}

fn walk(
    store: &impl FamilyStore,
    ancestor: &Person,
    style: &mut dyn NumberingStyle,
) -> Result<LabelingResult, LineageError> {
    style.reset();
    let mut numbering = LabelingResult::new();

    let root_label = style.descendant_number(None)?;
    numbering.insert(
        ResultKey::Person(ancestor.id.clone()),
        LabelEntry {
            name: ancestor.name.clone(),
            label: root_label.clone(),
        },
    );

    let root = enter(store, &*style, &mut numbering, ancestor, root_label, 1)?;
    let mut stack = vec![root];

    while let Some(frame) = stack.last_mut() {
        let Some(slot) = frame.next_slot(store)? else {
            stack.pop();
            continue;
        };

        let label = style.descendant_number(Some(&slot.params))?;
        let Some(child) = slot.child else {
            tracing::debug!(union = %slot.union, slot = slot.index, %label, "missing child slot");
            numbering.insert(
                ResultKey::MissingChild {
                    union: slot.union,
                    slot: slot.index,
                },
                LabelEntry { name: None, label },
            );
            continue;
        };

        if stack.iter().any(|frame| frame.person == child.id) {
            return Err(LineageError::Cycle(child.id));
        }

        tracing::debug!(person = %child.id, %label, depth = slot.params.depth, "numbered descendant");
        numbering.insert(
            ResultKey::Person(child.id.clone()),
            LabelEntry {
                name: child.name.clone(),
                label: label.clone(),
            },
        );
        let frame = enter(
            store,
            &*style,
            &mut numbering,
            &child,
            label,
            slot.params.depth,
        )?;
        stack.push(frame);
    }

    tracing::info!(
        ancestor = %ancestor.id,
        style = style.id(),
        entries = numbering.len(),
        "descendant numbering generated"
    );
    Ok(numbering)
}

/// Sort `person`'s unions, run the spouse pass and open a frame.
fn enter(
    store: &impl FamilyStore,
    style: &dyn NumberingStyle,
    numbering: &mut LabelingResult,
    person: &Person,
    label: String,
    depth: u32,
) -> Result<Frame, LineageError> {
    let mut unions = store.spousal_unions(person)?;
    sort_absent_last(&mut unions, |union| union.marriage);

    for (position, union) in unions.iter().enumerate() {
        let Some(spouse_label) = style.spouse_number(&label, position as u32 + 1)? else {
            continue;
        };

        match resolve_spouse(store, person, union) {
            Some(spouse) => numbering.insert(
                ResultKey::Person(spouse.id),
                LabelEntry {
                    name: spouse.name,
                    label: spouse_label,
                },
            ),
            None => numbering.insert(
                ResultKey::UnresolvedSpouse {
                    person: person.id.clone(),
                    union: union.id.clone(),
                },
                LabelEntry {
                    name: None,
                    label: spouse_label,
                },
            ),
        };
    }

    Ok(Frame {
        person: person.id.clone(),
        label,
        depth,
        unions,
        union_cursor: 0,
        slots: Vec::new(),
        slots_loaded: false,
        child_cursor: 0,
        cumulative: 0,
    })
}

/// The partner of `person` in `union`, if it can be determined and loaded.
fn resolve_spouse(store: &impl FamilyStore, person: &Person, union: &Union) -> Option<Person> {
    let Some(spouse_id) = union.partner_of(&person.id) else {
        tracing::warn!(person = %person.id, union = %union.id, "spouse could not be determined");
        return None;
    };
    match store.individual(spouse_id) {
        Ok(spouse) => Some(spouse),
        Err(err) => {
            tracing::warn!(person = %person.id, union = %union.id, %err, "spouse could not be loaded");
            None
        }
    }
}

/// Sort resolved children by birth date. Empty slots keep their position,
/// so they still count toward the sibling ordinal where they were recorded.
fn sort_children(slots: &mut [Option<Person>]) {
    let positions: Vec<usize> = slots
        .iter()
        .enumerate()
        .filter_map(|(position, slot)| slot.is_some().then_some(position))
        .collect();
    let mut children: Vec<Person> = slots.iter_mut().filter_map(Option::take).collect();
    sort_absent_last(&mut children, |child| child.birth);
    for (position, child) in positions.into_iter().zip(children) {
        slots[position] = Some(child);
    }
}

/// Stable sort by an optional key; items without a key go last.
fn sort_absent_last<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> Option<K>) {
    items.sort_by_key(|item| {
        let key = key(item);
        (key.is_none(), key)
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_keys_sort_last_and_ties_keep_source_order() {
        let mut items = vec![
            ("a", None),
            ("b", Some(1890)),
            ("c", None),
            ("d", Some(1850)),
            ("e", Some(1890)),
        ];
        sort_absent_last(&mut items, |item| item.1);
        let order: Vec<&str> = items.iter().map(|item| item.0).collect();
        assert_eq!(order, vec!["d", "b", "e", "a", "c"]);
    }

    #[test]
    fn empty_child_slots_stay_in_place() {
        let born = |id: &str, year: &str| {
            let mut person = Person::new(id);
            person.birth = Some(year.parse().unwrap());
            person
        };
        let mut slots = vec![
            Some(born("late", "1890")),
            None,
            Some(Person::new("undated")),
            Some(born("early", "1880")),
        ];
        sort_children(&mut slots);
        let order: Vec<Option<&str>> = slots
            .iter()
            .map(|slot| slot.as_ref().map(|child| child.id.as_str()))
            .collect();
        assert_eq!(order, vec![Some("early"), None, Some("late"), Some("undated")]);
    }
}
