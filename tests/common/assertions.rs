//! Predicates over git-cleanup console output

#![allow(dead_code)]

use predicates::prelude::*;

/// Matches a `<label>: <count>` report line
pub fn has_count(label: &str, count: usize) -> impl Predicate<str> {
    predicates::str::contains(format!("{label}: {count}"))
}

/// Matches the line written after a deletion command ran
pub fn deleted(name: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("Deleted: {name}"))
}

/// Matches a runner error line for an area
pub fn area_error(area: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{area}: error:"))
}

pub fn finished() -> impl Predicate<str> {
    predicates::str::contains("Cleanup finished")
}
