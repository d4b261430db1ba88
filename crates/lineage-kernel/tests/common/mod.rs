//! In-memory family tree used by the integration tests.

#![allow(dead_code)]

use lineage_kernel::{
    FamilyStore, LabelingResult, NumberingParameters, NumberingStyle, Person, PersonId, StoreError,
    StyleError, Union, UnionId,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Tree {
    people: HashMap<String, Person>,
    unions: HashMap<String, Union>,
    reads: Cell<usize>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person(mut self, id: &str, name: &str) -> Self {
        let mut person = Person::new(id);
        person.name = Some(name.to_string());
        self.people.insert(id.to_string(), person);
        self
    }

    pub fn born(mut self, id: &str, name: &str, birth: &str) -> Self {
        let mut person = Person::new(id);
        person.name = Some(name.to_string());
        person.birth = Some(birth.parse().expect("birth date"));
        self.people.insert(id.to_string(), person);
        self
    }

    /// Add a family and attach it to the partners already in the tree.
    pub fn family(
        mut self,
        id: &str,
        partners: [Option<&str>; 2],
        marriage: Option<&str>,
        children: &[Option<&str>],
    ) -> Self {
        let mut union = Union::new(id);
        union.marriage = marriage.map(|date| date.parse().expect("marriage date"));
        union.first_partner = partners[0].map(PersonId::new);
        union.second_partner = partners[1].map(PersonId::new);
        union.children = children.iter().map(|child| child.map(PersonId::new)).collect();
        for partner in partners.into_iter().flatten() {
            if let Some(person) = self.people.get_mut(partner) {
                person.unions.push(union.id.clone());
            }
        }
        self.unions.insert(id.to_string(), union);
        self
    }

    /// Attach a family to a person who is not one of its partners.
    pub fn attach(mut self, person: &str, union: &str) -> Self {
        if let Some(person) = self.people.get_mut(person) {
            person.unions.push(UnionId::new(union));
        }
        self
    }

    pub fn reads(&self) -> usize {
        self.reads.get()
    }

    fn touch(&self) {
        self.reads.set(self.reads.get() + 1);
    }
}

impl FamilyStore for Tree {
    fn individual(&self, id: &PersonId) -> Result<Person, StoreError> {
        self.touch();
        self.people
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::IndividualNotFound(id.to_string()))
    }

    fn spousal_unions(&self, person: &Person) -> Result<Vec<Union>, StoreError> {
        self.touch();
        person
            .unions
            .iter()
            .map(|id| {
                self.unions
                    .get(id.as_str())
                    .cloned()
                    .ok_or_else(|| StoreError::FamilyNotFound(id.to_string()))
            })
            .collect()
    }

    fn children(&self, union: &Union) -> Result<Vec<Option<Person>>, StoreError> {
        self.touch();
        Ok(union
            .children
            .iter()
            .map(|slot| slot.as_ref().and_then(|id| self.people.get(id.as_str()).cloned()))
            .collect())
    }
}

/// Anna (I1) with two husbands, three children and one grandchild.
///
/// ```text
/// I1 Anna ─┬─ F1 (1872) I2 Bernard ── I3 Clara (1873) ── F3 (1898) I7 Emil ── I8 Greta (1900)
///          │                       └─ I4 David (1875)
///          └─ F2 (1880) I5 Carl ───── I6 Frida (1881)
/// ```
///
/// F2 is attached to Anna before F1 so that marriage-date sorting is
/// observable.
pub fn anna() -> Tree {
    Tree::new()
        .born("I1", "Anna", "1850-03-01")
        .person("I2", "Bernard")
        .person("I5", "Carl")
        .born("I3", "Clara", "1873")
        .born("I4", "David", "1875-06")
        .born("I6", "Frida", "1881")
        .person("I7", "Emil")
        .born("I8", "Greta", "1900")
        .family("F2", [Some("I5"), Some("I1")], Some("1880"), &[Some("I6")])
        .family(
            "F1",
            [Some("I2"), Some("I1")],
            Some("1872-05-04"),
            &[Some("I4"), Some("I3")],
        )
        .family("F3", [Some("I7"), Some("I3")], Some("1898"), &[Some("I8")])
}

/// An ancestor with `count` children in one family, born a year apart.
pub fn many_children(count: usize) -> Tree {
    let mut ids = Vec::new();
    let mut tree = Tree::new().person("P", "Parent");
    for n in 1..=count {
        let id = format!("C{n}");
        tree = tree.born(&id, &format!("Child {n}"), &format!("{}", 1900 + n));
        ids.push(id);
    }
    let children: Vec<Option<&str>> = ids.iter().map(|id| Some(id.as_str())).collect();
    tree.family("F", [Some("P"), None], None, &children)
}

/// `(key, label)` pairs in result order.
pub fn labels(result: &LabelingResult) -> Vec<(String, String)> {
    result
        .iter()
        .map(|(key, entry)| (key.to_string(), entry.label.clone()))
        .collect()
}

pub fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
    expected
        .iter()
        .map(|(key, label)| (key.to_string(), label.to_string()))
        .collect()
}

/// Records every parameter set it is handed; labels are `parent/nth`.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub seen: Rc<RefCell<Vec<NumberingParameters>>>,
}

impl NumberingStyle for Recorder {
    fn id(&self) -> &'static str {
        "recorder"
    }

    fn name(&self) -> &'static str {
        "Recorder"
    }

    fn descendant_number(
        &mut self,
        params: Option<&NumberingParameters>,
    ) -> Result<String, StyleError> {
        let Some(params) = params else {
            return Ok("R".to_string());
        };
        self.seen.borrow_mut().push(params.clone());
        Ok(format!("{}/{}", params.parent_label(), params.nth_child))
    }
}
