use std::collections::HashMap;

use serde_json::{Map, Value, json};

/// Sentinel grouping key for records whose relation traversal hit a missing
/// or null link. A single record's gap degrades to this key, never aborts
/// the batch.
pub const MISSING_KEY: &str = "N/A";

/// Fixed age bands: inclusive upper bounds, open-ended top band. Together
/// they partition the non-negative integers.
const AGE_BANDS: [(&str, u32); 4] = [("0-17", 17), ("18-30", 30), ("31-45", 45), ("46-60", 60)];
const AGE_BAND_TOP: &str = "60+";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Entry {
    count: u64,
    total: f64,
}

/// Grouping of records by a derived key. Keys keep insertion order so ranked
/// views can break ties deterministically and emitted summaries stay stable.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    order: Vec<String>,
    entries: HashMap<String, Entry>,
}

impl Bucket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Groups `records` by a named key accessor, counting occurrences.
    /// An accessor returning `None` files the record under [`MISSING_KEY`].
    pub fn group_by<T, F>(records: &[T], key: F) -> Self
    where
        F: Fn(&T) -> Option<String>,
    {
        let mut bucket = Self::new();
        for record in records {
            bucket.record(key(record));
        }
        bucket
    }

    /// Groups `records` by key, accumulating both count and an amount total.
    pub fn group_amounts<T, F, A>(records: &[T], key: F, amount: A) -> Self
    where
        F: Fn(&T) -> Option<String>,
        A: Fn(&T) -> f64,
    {
        let mut bucket = Self::new();
        for record in records {
            bucket.record_amount(key(record), amount(record));
        }
        bucket
    }

    pub fn record(&mut self, key: Option<String>) {
        self.record_amount(key, 0.0);
    }

    pub fn record_amount(&mut self, key: Option<String>, amount: f64) {
        let key = key.unwrap_or_else(|| MISSING_KEY.to_string());
        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        let entry = self.entries.entry(key).or_default();
        entry.count += 1;
        entry.total += amount;
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn count(&self, key: &str) -> u64 {
        self.entries.get(key).map(|e| e.count).unwrap_or(0)
    }

    /// Sum of all counts; equals the number of records grouped.
    pub fn total_count(&self) -> u64 {
        self.entries.values().map(|e| e.count).sum()
    }

    /// The first `n` entries by descending count. The sort is stable, so
    /// equal counts keep their insertion order.
    pub fn top_n(&self, n: usize) -> Vec<(String, u64)> {
        let mut pairs: Vec<(String, u64)> = self
            .order
            .iter()
            .map(|k| (k.clone(), self.entries[k].count))
            .collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs.truncate(n);
        pairs
    }

    /// Emits `key -> count` in insertion order.
    pub fn counts(&self) -> Value {
        let mut map = Map::new();
        for key in &self.order {
            map.insert(key.clone(), json!(self.entries[key].count));
        }
        Value::Object(map)
    }

    /// Emits `key -> {count, total}` in insertion order, totals rounded to
    /// cents.
    pub fn totals(&self) -> Value {
        let mut map = Map::new();
        for key in &self.order {
            let entry = &self.entries[key];
            map.insert(
                key.clone(),
                json!({ "count": entry.count, "total": round2(entry.total) }),
            );
        }
        Value::Object(map)
    }
}

/// Emits ranked `(key, count)` pairs as an ordered object.
pub fn ranking_value(pairs: &[(String, u64)]) -> Value {
    let mut map = Map::new();
    for (key, count) in pairs {
        map.insert(key.clone(), json!(count));
    }
    Value::Object(map)
}

/// Classifies ages into the five fixed bands. Every non-negative age lands
/// in exactly one band.
pub fn age_histogram(ages: impl IntoIterator<Item = u32>) -> Vec<(&'static str, u64)> {
    let mut counts = [0u64; 5];
    for age in ages {
        let band = AGE_BANDS
            .iter()
            .position(|(_, upper)| age <= *upper)
            .unwrap_or(4);
        counts[band] += 1;
    }

    AGE_BANDS
        .iter()
        .map(|(label, _)| *label)
        .chain(std::iter::once(AGE_BAND_TOP))
        .zip(counts)
        .collect()
}

/// Emits histogram bands as an ordered object.
pub fn histogram_value(bands: &[(&'static str, u64)]) -> Value {
    let mut map = Map::new();
    for (label, count) in bands {
        map.insert((*label).to_string(), json!(count));
    }
    Value::Object(map)
}

/// Lenient decimal parse: absent or non-numeric amounts fold to zero rather
/// than failing the batch.
pub fn parse_amount(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0)
}

/// Folds raw decimal amount fields into a sum.
pub fn sum_amounts<'a>(amounts: impl IntoIterator<Item = Option<&'a str>>) -> f64 {
    amounts.into_iter().map(parse_amount).sum()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
