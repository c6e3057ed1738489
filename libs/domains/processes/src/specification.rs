//! Statically typed predicates over process fields.
//!
//! A [`Specification`] is a flat list of [`Predicate`]s that must all hold.
//! It is evaluated directly against a [`Process`] by the in-memory repository
//! and rendered to a `sea_orm::Condition` by the PostgreSQL repository, so both
//! stores agree on which rows match.
//!
//! A NULL column only ever matches `Specified(false)`; every other predicate is
//! false for NULL, mirroring SQL comparison semantics.

use std::cmp::Ordering;

use crate::filter::{RangeFilter, StringFilter};
use crate::models::Process;

/// Filterable process columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessField {
    Id,
    Title,
    Code,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Int(i64),
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl FieldValue {
    fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => Some(a.cmp(b)),
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Equals(ProcessField, FieldValue),
    NotEquals(ProcessField, FieldValue),
    In(ProcessField, Vec<FieldValue>),
    NotIn(ProcessField, Vec<FieldValue>),
    /// `true` → IS NOT NULL, `false` → IS NULL
    Specified(ProcessField, bool),
    GreaterThan(ProcessField, FieldValue),
    LessThan(ProcessField, FieldValue),
    GreaterThanOrEqual(ProcessField, FieldValue),
    LessThanOrEqual(ProcessField, FieldValue),
    Contains(ProcessField, String),
    DoesNotContain(ProcessField, String),
}

impl Predicate {
    pub fn field(&self) -> ProcessField {
        match self {
            Predicate::Equals(field, _)
            | Predicate::NotEquals(field, _)
            | Predicate::In(field, _)
            | Predicate::NotIn(field, _)
            | Predicate::Specified(field, _)
            | Predicate::GreaterThan(field, _)
            | Predicate::LessThan(field, _)
            | Predicate::GreaterThanOrEqual(field, _)
            | Predicate::LessThanOrEqual(field, _)
            | Predicate::Contains(field, _)
            | Predicate::DoesNotContain(field, _) => *field,
        }
    }

    /// Evaluate against a single process.
    pub fn matches(&self, process: &Process) -> bool {
        let value = field_value(process, self.field());

        match (self, value) {
            (Predicate::Specified(_, specified), value) => value.is_some() == *specified,
            // Empty NOT IN is vacuously true, even for NULL
            (Predicate::NotIn(_, values), _) if values.is_empty() => true,
            (_, None) => false,
            (Predicate::Equals(_, expected), Some(value)) => value == *expected,
            (Predicate::NotEquals(_, expected), Some(value)) => value != *expected,
            (Predicate::In(_, values), Some(value)) => values.contains(&value),
            (Predicate::NotIn(_, values), Some(value)) => !values.contains(&value),
            (Predicate::GreaterThan(_, bound), Some(value)) => {
                value.compare(bound) == Some(Ordering::Greater)
            }
            (Predicate::LessThan(_, bound), Some(value)) => value.compare(bound) == Some(Ordering::Less),
            (Predicate::GreaterThanOrEqual(_, bound), Some(value)) => matches!(
                value.compare(bound),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            (Predicate::LessThanOrEqual(_, bound), Some(value)) => {
                matches!(value.compare(bound), Some(Ordering::Less | Ordering::Equal))
            }
            (Predicate::Contains(_, needle), Some(value)) => {
                text(&value).is_some_and(|t| t.contains(needle.as_str()))
            }
            (Predicate::DoesNotContain(_, needle), Some(value)) => {
                text(&value).is_some_and(|t| !t.contains(needle.as_str()))
            }
        }
    }
}

fn field_value(process: &Process, field: ProcessField) -> Option<FieldValue> {
    match field {
        ProcessField::Id => process.id.map(FieldValue::Int),
        ProcessField::Title => Some(FieldValue::Text(process.title.clone())),
        ProcessField::Code => process.code.clone().map(FieldValue::Text),
    }
}

fn text(value: &FieldValue) -> Option<&str> {
    match value {
        FieldValue::Text(t) => Some(t),
        FieldValue::Int(_) => None,
    }
}

/// Conjunction of predicates. An empty specification matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Specification {
    predicates: Vec<Predicate>,
}

impl Specification {
    /// Specification with no restrictions
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn and(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn and_all(mut self, predicates: impl IntoIterator<Item = Predicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_unrestricted(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn matches(&self, process: &Process) -> bool {
        self.predicates.iter().all(|p| p.matches(process))
    }
}

/// One predicate per populated sub-field of a range filter.
pub fn build_range_specification<T>(filter: &RangeFilter<T>, field: ProcessField) -> Vec<Predicate>
where
    T: Clone + Into<FieldValue>,
{
    let value = |v: &T| -> FieldValue { v.clone().into() };
    let values = |vs: &[T]| -> Vec<FieldValue> { vs.iter().map(value).collect() };
    let mut predicates = Vec::new();

    if let Some(v) = &filter.equals {
        predicates.push(Predicate::Equals(field, value(v)));
    }
    if let Some(v) = &filter.not_equals {
        predicates.push(Predicate::NotEquals(field, value(v)));
    }
    if let Some(vs) = &filter.in_list {
        predicates.push(Predicate::In(field, values(vs)));
    }
    if let Some(vs) = &filter.not_in_list {
        predicates.push(Predicate::NotIn(field, values(vs)));
    }
    if let Some(specified) = filter.specified {
        predicates.push(Predicate::Specified(field, specified));
    }
    if let Some(v) = &filter.greater_than {
        predicates.push(Predicate::GreaterThan(field, value(v)));
    }
    if let Some(v) = &filter.less_than {
        predicates.push(Predicate::LessThan(field, value(v)));
    }
    if let Some(v) = &filter.greater_than_or_equal {
        predicates.push(Predicate::GreaterThanOrEqual(field, value(v)));
    }
    if let Some(v) = &filter.less_than_or_equal {
        predicates.push(Predicate::LessThanOrEqual(field, value(v)));
    }

    predicates
}

/// One predicate per populated sub-field of a string filter.
pub fn build_string_specification(filter: &StringFilter, field: ProcessField) -> Vec<Predicate> {
    let text = |s: &String| FieldValue::Text(s.clone());
    let mut predicates = Vec::new();

    if let Some(v) = &filter.equals {
        predicates.push(Predicate::Equals(field, text(v)));
    }
    if let Some(v) = &filter.not_equals {
        predicates.push(Predicate::NotEquals(field, text(v)));
    }
    if let Some(vs) = &filter.in_list {
        predicates.push(Predicate::In(field, vs.iter().map(text).collect()));
    }
    if let Some(vs) = &filter.not_in_list {
        predicates.push(Predicate::NotIn(field, vs.iter().map(text).collect()));
    }
    if let Some(specified) = filter.specified {
        predicates.push(Predicate::Specified(field, specified));
    }
    if let Some(needle) = &filter.contains {
        predicates.push(Predicate::Contains(field, needle.clone()));
    }
    if let Some(needle) = &filter.does_not_contain {
        predicates.push(Predicate::DoesNotContain(field, needle.clone()));
    }

    predicates
}
