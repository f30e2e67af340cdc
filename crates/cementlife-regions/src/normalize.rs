//! Normalization of region-lookup payloads into [`RegionEntry`] lists.
//!
//! Providers disagree on shape: some answer with a bare JSON array, others wrap
//! it in an object, and field names vary by provider and level. Each concern is
//! an ordered list of candidate keys, tried first to last.

use cementlife_core::{RegionEntry, RegionId};
use serde_json::Value;

/// Object keys that may hold the record list, in priority order.
pub const WRAPPER_KEYS: &[&str] = &["data", "results", "districts", "wards", "items"];

/// Record keys that may hold the identifier, in priority order.
pub const ID_KEYS: &[&str] = &["id", "code", "province_id", "district_id", "ward_id", "value"];

/// Record keys that may hold the display name, in priority order.
pub const NAME_KEYS: &[&str] = &[
    "name",
    "full_name",
    "name_with_type",
    "province_name",
    "district_name",
    "ward_name",
    "label",
];

/// Normalize a raw payload. Returns `None` when the payload holds no record
/// list at all; records without a usable id or name are dropped.
#[must_use]
pub fn normalize_regions(payload: &Value) -> Option<Vec<RegionEntry>> {
    let records = extract_records(payload)?;
    Some(records.iter().filter_map(map_record).collect())
}

fn extract_records(payload: &Value) -> Option<&Vec<Value>> {
    payload.as_array().or_else(|| {
        WRAPPER_KEYS
            .iter()
            .find_map(|key| payload.get(key).and_then(Value::as_array))
    })
}

fn map_record(record: &Value) -> Option<RegionEntry> {
    let id = first_present(record, ID_KEYS, value_as_id)?;
    let name = first_present(record, NAME_KEYS, value_as_name)?;
    Some(RegionEntry { id, name })
}

/// The first key whose value the accessor accepts. Keys holding `null`, empty
/// strings, or values of the wrong type count as absent.
fn first_present<T>(record: &Value, keys: &[&str], accessor: fn(&Value) -> Option<T>) -> Option<T> {
    keys.iter()
        .find_map(|key| record.get(key).and_then(accessor))
}

fn value_as_id(value: &Value) -> Option<RegionId> {
    if let Some(n) = value.as_i64() {
        return Some(RegionId::Number(n));
    }
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| RegionId::Text(s.to_string()))
}

fn value_as_name(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(id: RegionId, name: &str) -> RegionEntry {
        RegionEntry {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn bare_list_and_data_wrapper_normalize_identically() {
        let records = json!([
            { "id": 1, "name": "Hà Nội" },
            { "id": 79, "name": "Hồ Chí Minh" }
        ]);
        let wrapped = json!({ "error": 0, "data": records.clone() });

        let from_list = normalize_regions(&records).unwrap();
        let from_wrapper = normalize_regions(&wrapped).unwrap();

        assert_eq!(from_list, from_wrapper);
        assert_eq!(
            from_list,
            vec![
                entry(RegionId::Number(1), "Hà Nội"),
                entry(RegionId::Number(79), "Hồ Chí Minh")
            ]
        );
    }

    #[test]
    fn open_api_province_detail_uses_districts_key() {
        let payload = json!({
            "name": "Thành phố Hồ Chí Minh",
            "code": 79,
            "districts": [
                { "name": "Quận 1", "code": 760, "division_type": "quận" }
            ]
        });
        assert_eq!(
            normalize_regions(&payload).unwrap(),
            vec![entry(RegionId::Number(760), "Quận 1")]
        );
    }

    #[test]
    fn data_key_wins_over_later_wrappers() {
        let payload = json!({
            "data": [{ "id": "01", "name": "Hà Nội" }],
            "results": [{ "id": "02", "name": "Hà Giang" }]
        });
        let entries = normalize_regions(&payload).unwrap();
        assert_eq!(entries, vec![entry(RegionId::Text("01".into()), "Hà Nội")]);
    }

    #[test]
    fn id_aliases_are_tried_in_order() {
        let payload = json!([
            { "id": 5, "code": 6, "name": "A" },
            { "code": 7, "name": "B" },
            { "district_id": "D9", "district_name": "C" },
            { "id": null, "value": 11, "label": "D" }
        ]);
        let entries = normalize_regions(&payload).unwrap();
        assert_eq!(
            entries,
            vec![
                entry(RegionId::Number(5), "A"),
                entry(RegionId::Number(7), "B"),
                entry(RegionId::Text("D9".into()), "C"),
                entry(RegionId::Number(11), "D"),
            ]
        );
    }

    #[test]
    fn name_aliases_prefer_name_over_full_name() {
        let payload = json!([{ "id": "01", "name": "Hà Nội", "full_name": "Thành phố Hà Nội" }]);
        assert_eq!(normalize_regions(&payload).unwrap()[0].name, "Hà Nội");
    }

    #[test]
    fn records_missing_id_or_name_are_dropped() {
        let payload = json!([
            { "name": "no id" },
            { "id": 2 },
            { "id": "  ", "name": "blank id" },
            { "id": 3, "name": "   " },
            { "id": 4, "name": "kept" },
            "not an object",
            { "id": { "nested": true }, "name": "object id" }
        ]);
        assert_eq!(
            normalize_regions(&payload).unwrap(),
            vec![entry(RegionId::Number(4), "kept")]
        );
    }

    #[test]
    fn names_are_trimmed() {
        let payload = json!([{ "id": 1, "name": "  Huế  " }]);
        assert_eq!(normalize_regions(&payload).unwrap()[0].name, "Huế");
    }

    #[test]
    fn payload_without_list_is_none() {
        assert!(normalize_regions(&json!({ "error": 1, "message": "not found" })).is_none());
        assert!(normalize_regions(&json!("text")).is_none());
        assert!(normalize_regions(&json!({ "data": { "id": 1 } })).is_none());
    }

    #[test]
    fn empty_list_is_some_empty() {
        assert_eq!(normalize_regions(&json!({ "data": [] })), Some(vec![]));
    }
}
