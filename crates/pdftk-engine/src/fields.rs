//! Parsing of `dump_data_fields` reports
//!
//! The toolkit emits a line-oriented report: records separated by `---`
//! lines, each record a run of `Key: Value` lines. A key can repeat within
//! one record (`FieldStateOption`); repeats accumulate into an array.

use serde_json::{Map, Value};

use crate::toolkit::FieldRecord;

/// Parse a full report into field records, preserving report order.
pub fn parse_dump(report: &str) -> Vec<FieldRecord> {
    let mut records = Vec::new();
    let mut current = Map::new();

    for line in report.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim() == "---" {
            if let Some(record) = finish_record(std::mem::take(&mut current)) {
                records.push(record);
            }
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        push_entry(&mut current, key, value.trim());
    }

    if let Some(record) = finish_record(current) {
        records.push(record);
    }
    records
}

fn push_entry(record: &mut Map<String, Value>, key: &str, value: &str) {
    let value = Value::String(value.to_string());
    match record.get_mut(key) {
        None => {
            record.insert(key.to_string(), value);
        }
        Some(Value::Array(existing)) => existing.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
    }
}

/// A record without a `FieldName` cannot be addressed and is dropped.
fn finish_record(mut raw: Map<String, Value>) -> Option<FieldRecord> {
    if raw.is_empty() {
        return None;
    }
    let name = match raw.remove("FieldName") {
        Some(Value::String(name)) => name,
        _ => return None,
    };
    let value = raw.remove("FieldValue").and_then(|value| match value {
        Value::String(text) => Some(text),
        Value::Array(items) => items.into_iter().find_map(|item| match item {
            Value::String(text) => Some(text),
            _ => None,
        }),
        _ => None,
    });
    Some(FieldRecord {
        name,
        value,
        meta: raw,
    })
}
