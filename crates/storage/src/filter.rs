//! Conjunctive field filters
//!
//! A [`Filter`] is a list of `(field, predicate)` pairs that must **all** hold.
//! The empty filter matches every document.
//!
//! # Comparison rules
//!
//! - Integers compare numerically (falling back to `f64` for non-integers).
//! - Strings compare lexically.
//! - Values of different kinds never satisfy a range bound.
//! - A predicate on a missing field never matches.

use std::cmp::Ordering;

use serde_json::Value;

use crate::document::Document;

/// Single field predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `field == value`
    Eq(Value),
    /// `gte <= field <= lte`, either bound optional
    Range {
        /// Inclusive lower bound
        gte: Option<Value>,
        /// Inclusive upper bound
        lte: Option<Value>,
    },
    /// `field ∈ values`
    In(Vec<Value>),
}

impl Predicate {
    /// Evaluate the predicate against a field value
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Predicate::Eq(expected) => values_equal(value, expected),
            Predicate::Range { gte, lte } => {
                let lower_ok = gte.as_ref().map_or(true, |bound| {
                    matches!(compare(value, bound), Some(Ordering::Greater | Ordering::Equal))
                });
                let upper_ok = lte.as_ref().map_or(true, |bound| {
                    matches!(compare(value, bound), Some(Ordering::Less | Ordering::Equal))
                });
                lower_ok && upper_ok
            }
            Predicate::In(candidates) => candidates.iter().any(|c| values_equal(value, c)),
        }
    }
}

/// Conjunction of field predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    predicates: Vec<(String, Predicate)>,
}

impl Filter {
    /// Filter matching every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Add an arbitrary predicate
    pub fn and(mut self, field: impl Into<String>, predicate: Predicate) -> Self {
        self.predicates.push((field.into(), predicate));
        self
    }

    /// Require `field == value`
    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.and(field, Predicate::Eq(value.into()))
    }

    /// Require `gte <= field <= lte`
    pub fn between(self, field: impl Into<String>, gte: impl Into<Value>, lte: impl Into<Value>) -> Self {
        self.and(
            field,
            Predicate::Range {
                gte: Some(gte.into()),
                lte: Some(lte.into()),
            },
        )
    }

    /// Require `field` to equal one of `values`
    pub fn one_of<I, V>(self, field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.and(field, Predicate::In(values.into_iter().map(Into::into).collect()))
    }

    /// The predicates, in insertion order
    pub fn predicates(&self) -> &[(String, Predicate)] {
        &self.predicates
    }

    /// Whether this filter has no predicates
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluate the filter against a document
    pub fn matches(&self, document: &Document) -> bool {
        self.predicates.iter().all(|(field, predicate)| {
            document
                .get(field)
                .map_or(false, |value| predicate.matches(value))
        })
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(_), Value::Number(_)) => compare(a, b) == Some(Ordering::Equal),
        _ => a == b,
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => match (x.as_i64(), y.as_i64()) {
            (Some(x), Some(y)) => Some(x.cmp(&y)),
            _ => x.as_f64()?.partial_cmp(&y.as_f64()?),
        },
        (Value::String(x), Value::String(y)) => Some(x.cmp(y)),
        _ => None,
    }
}
