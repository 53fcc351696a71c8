//! Metrics collection.
//!
//! # Metrics
//! - `jsonpat_decode_total` (counter): decode calls by outcome
//! - `jsonpat_cache_lookups_total` (counter): routing table lookups by result
//! - `jsonpat_analysis_total` (counter): structure analyses by outcome
//! - `jsonpat_cached_types` (gauge): entries held by a metadata cache
//! - `jsonpat_dropped_keys_total` (counter): keys matching no field
//!
//! # Design Decisions
//! - Labels are static strings only; type names are not used as labels
//! - No exporter here; the host installs a recorder

/// Record the outcome of a decode call (`ok` or a `DecodeError::kind`).
pub fn record_decode(outcome: &'static str) {
    ::metrics::counter!("jsonpat_decode_total", "outcome" => outcome).increment(1);
}

/// Record a metadata cache lookup.
pub fn record_cache_lookup(hit: bool) {
    let result = if hit { "hit" } else { "miss" };
    ::metrics::counter!("jsonpat_cache_lookups_total", "result" => result).increment(1);
}

/// Record a structure analysis (`ok` or `error`).
pub fn record_analysis(outcome: &'static str) {
    ::metrics::counter!("jsonpat_analysis_total", "outcome" => outcome).increment(1);
}

/// Record the number of entries in a metadata cache.
pub fn record_cache_size(size: usize) {
    ::metrics::gauge!("jsonpat_cached_types").set(size as f64);
}

/// Record keys that matched no known or dynamic field.
pub fn record_dropped_keys(count: usize) {
    if count > 0 {
        ::metrics::counter!("jsonpat_dropped_keys_total").increment(count as u64);
    }
}
