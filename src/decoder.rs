//! Decode entry points.
//!
//! # Responsibilities
//! - Validate the target
//! - Resolve the routing table through the metadata cache
//! - Parse input into an ordered key → raw value map
//! - Hand off to the router and record the outcome

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::value::RawValue;

use crate::analysis::MetadataCache;
use crate::config::validation::validate_config;
use crate::config::{ConfigError, DecoderConfig};
use crate::error::{AnalysisError, DecodeError, DecodeResult};
use crate::observability::metrics;
use crate::routing::router;
use crate::routing::table::RoutingTable;
use crate::schema::{PatternStruct, StructKind};

static DEFAULT_DECODER: Lazy<Decoder> = Lazy::new(Decoder::default);

/// Decodes JSON objects into pattern-routed structs.
///
/// Owns its metadata cache; share one decoder (or use [`decode`]) so each
/// type is analyzed once.
#[derive(Debug, Default)]
pub struct Decoder {
    config: DecoderConfig,
    cache: MetadataCache,
}

impl Decoder {
    /// Create a decoder from a config, validating it first.
    pub fn new(config: DecoderConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(Self {
            cache: MetadataCache::new(config.analysis.clone()),
            config,
        })
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    /// Routing table for `T`, analyzing it on first use.
    pub fn table<T: PatternStruct>(&self) -> Result<Arc<RoutingTable>, AnalysisError> {
        self.cache.get::<T>()
    }

    /// Decode `data` into `target`.
    ///
    /// On error, `target` may hold values written before the failing key and
    /// should be discarded.
    pub fn decode<T: PatternStruct>(&self, data: &[u8], target: &mut T) -> DecodeResult<()> {
        let result = self.decode_object(data, target);
        match &result {
            Ok(()) => metrics::record_decode("ok"),
            Err(err) => {
                metrics::record_decode(err.kind());
                tracing::debug!(
                    type_name = std::any::type_name::<T>(),
                    kind = err.kind(),
                    key = ?err.key(),
                    error = %err,
                    "Decode failed"
                );
            }
        }
        result
    }

    fn decode_object<T: PatternStruct>(&self, data: &[u8], target: &mut T) -> DecodeResult<()> {
        let type_name = std::any::type_name::<T>();

        let kind = target.kind();
        if kind != StructKind::Named {
            return Err(DecodeError::InvalidTarget {
                type_name,
                reason: format!("expected a struct with named fields, found {:?}", kind),
            });
        }

        let table = self
            .cache
            .get::<T>()
            .map_err(|source| DecodeError::Analysis { type_name, source })?;

        let object: Option<BTreeMap<String, Box<RawValue>>> =
            serde_json::from_slice(data).map_err(DecodeError::MalformedInput)?;
        let Some(object) = object else {
            tracing::trace!(type_name, "Null document, nothing to decode");
            return Ok(());
        };

        let summary = router::route(&table, &object, target)?;
        metrics::record_dropped_keys(summary.dropped);

        tracing::debug!(
            type_name,
            keys = object.len(),
            known = summary.known,
            dynamic_map = summary.dynamic_map,
            dynamic_scalar = summary.dynamic_scalar,
            dropped = summary.dropped,
            "Decoded JSON object"
        );
        Ok(())
    }
}

/// The process-wide decoder used by [`decode`].
pub fn default_decoder() -> &'static Decoder {
    &DEFAULT_DECODER
}

/// Decode `data` into `target` using the process-wide decoder.
pub fn decode<T: PatternStruct>(data: &[u8], target: &mut T) -> DecodeResult<()> {
    DEFAULT_DECODER.decode(data, target)
}
