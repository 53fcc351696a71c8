//! Key classification and dispatch.
//!
//! # Responsibilities
//! - Classify each key: known field, dynamic map field(s), dynamic scalar field, or dropped
//! - Resolve field paths to writable slots on the target
//! - Decode raw values into their destinations
//!
//! # Design Decisions
//! - Keys arrive in ascending order; scalar first-match-wins depends on it
//! - Known-field binding is checked first and short-circuits pattern tests
//! - A key may feed every matching map, then at most one unfilled scalar
//! - Stateless between calls; the first decode failure aborts, earlier writes stay

use std::collections::BTreeMap;

use serde_json::value::RawValue;

use crate::error::{Binding, DecodeError};
use crate::routing::table::{FieldPath, RoutingTable};
use crate::schema::{PatternStruct, Slot};

/// Counts of how keys were routed in one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteSummary {
    pub known: usize,
    pub dynamic_map: usize,
    pub dynamic_scalar: usize,
    pub dropped: usize,
}

/// Route every key of `object` into `target` according to `table`.
pub fn route(
    table: &RoutingTable,
    object: &BTreeMap<String, Box<RawValue>>,
    target: &mut dyn PatternStruct,
) -> Result<RouteSummary, DecodeError> {
    let type_name = table.type_name();
    let mut summary = RouteSummary::default();
    let mut filled = vec![false; table.dynamic_scalar_fields().len()];

    for (key, raw) in object {
        if let Some(path) = table.known_field(key) {
            tracing::trace!(key = key.as_str(), path = %path, "Known key");
            write_value(target, path, key, raw, Binding::Known, type_name)?;
            summary.known += 1;
            continue;
        }

        if table.is_exact_only() {
            tracing::trace!(key = key.as_str(), "Dropping unknown key");
            summary.dropped += 1;
            continue;
        }

        let mut routed = false;

        for dynamic in table.dynamic_map_fields() {
            if dynamic.rule.matches(key) {
                tracing::trace!(key = key.as_str(), path = %dynamic.path, rule = %dynamic.rule, "Dynamic map key");
                insert_entry(target, &dynamic.path, key, raw, type_name)?;
                summary.dynamic_map += 1;
                routed = true;
            }
        }

        for (is_filled, dynamic) in filled.iter_mut().zip(table.dynamic_scalar_fields()) {
            if *is_filled || !dynamic.rule.matches(key) {
                continue;
            }
            tracing::trace!(key = key.as_str(), path = %dynamic.path, rule = %dynamic.rule, "Dynamic scalar key");
            write_value(target, &dynamic.path, key, raw, Binding::DynamicScalar, type_name)?;
            *is_filled = true;
            summary.dynamic_scalar += 1;
            routed = true;
            break;
        }

        if !routed {
            tracing::trace!(key = key.as_str(), "Dropping unmatched key");
            summary.dropped += 1;
        }
    }

    Ok(summary)
}

/// Walk `path` through embedded structs to the addressed slot.
pub fn resolve<'a>(
    target: &'a mut dyn PatternStruct,
    path: &FieldPath,
    type_name: &'static str,
) -> Result<Slot<'a>, DecodeError> {
    let Some((last, parents)) = path.indices().split_last() else {
        return Err(invalid(type_name, "empty field path".to_string()));
    };

    let mut current = target;
    for &index in parents {
        current = match current.slot(index) {
            Some(Slot::Embedded(inner)) => inner,
            Some(other) => {
                return Err(invalid(
                    type_name,
                    format!("field {} on path {} is a {}, not an embedded struct", index, path, other.label()),
                ))
            }
            None => {
                return Err(invalid(
                    type_name,
                    format!("field {} on path {} is not writable", index, path),
                ))
            }
        };
    }

    current
        .slot(*last)
        .ok_or_else(|| invalid(type_name, format!("field {} is not writable", path)))
}

fn write_value(
    target: &mut dyn PatternStruct,
    path: &FieldPath,
    key: &str,
    raw: &RawValue,
    binding: Binding,
    type_name: &'static str,
) -> Result<(), DecodeError> {
    let result = match resolve(target, path, type_name)? {
        Slot::Value(slot) => slot.decode_raw(raw),
        Slot::Map(slot) => slot.replace_raw(raw),
        Slot::Embedded(_) => {
            return Err(invalid(
                type_name,
                format!("field {} is an embedded struct and cannot be written directly", path),
            ))
        }
    };

    result.map_err(|source| DecodeError::FieldDecode {
        key: key.to_string(),
        path: path.clone(),
        binding,
        source,
    })
}

fn insert_entry(
    target: &mut dyn PatternStruct,
    path: &FieldPath,
    key: &str,
    raw: &RawValue,
    type_name: &'static str,
) -> Result<(), DecodeError> {
    let slot = match resolve(target, path, type_name)? {
        Slot::Map(slot) => slot,
        other => {
            return Err(invalid(
                type_name,
                format!("field {} is a {}, expected a string-keyed map", path, other.label()),
            ))
        }
    };

    slot.insert_raw(key, raw).map_err(|source| DecodeError::FieldDecode {
        key: key.to_string(),
        path: path.clone(),
        binding: Binding::DynamicMap,
        source,
    })
}

fn invalid(type_name: &'static str, reason: String) -> DecodeError {
    DecodeError::InvalidTarget { type_name, reason }
}
