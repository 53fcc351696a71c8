//! Per-type routing table cache.
//!
//! # Responsibilities
//! - Run the analyzer once per structure type
//! - Publish the result with insert-if-absent semantics
//! - Optionally remember analysis failures
//!
//! # Design Decisions
//! - Keyed by `TypeId`; tables are shared as `Arc<RoutingTable>`
//! - Reads load an `ArcSwap` snapshot and take no lock
//! - Publishing copies the map and swaps it in with `rcu`; analysis runs
//!   before that, so a caller that loses the race drops its own table and
//!   returns the winner's
//! - No eviction; `clear` exists for tests and tooling

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::analysis::analyzer::analyze_decl;
use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::observability::metrics;
use crate::routing::table::RoutingTable;
use crate::schema::PatternStruct;

#[derive(Debug, Clone)]
enum CachedAnalysis {
    Ready(Arc<RoutingTable>),
    Failed(AnalysisError),
}

impl CachedAnalysis {
    fn to_result(&self) -> Result<Arc<RoutingTable>, AnalysisError> {
        match self {
            CachedAnalysis::Ready(table) => Ok(Arc::clone(table)),
            CachedAnalysis::Failed(err) => Err(err.clone()),
        }
    }
}

type Tables = HashMap<TypeId, CachedAnalysis>;

/// Thread-safe memo of routing tables.
pub struct MetadataCache {
    tables: ArcSwap<Tables>,
    config: AnalysisConfig,
}

impl MetadataCache {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            tables: ArcSwap::from_pointee(Tables::new()),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Routing table for `T`, analyzing it on first use.
    pub fn get<T: PatternStruct>(&self) -> Result<Arc<RoutingTable>, AnalysisError> {
        let type_id = TypeId::of::<T>();
        if let Some(entry) = self.tables.load().get(&type_id) {
            metrics::record_cache_lookup(true);
            return entry.to_result();
        }
        metrics::record_cache_lookup(false);

        let type_name = std::any::type_name::<T>();
        match analyze_decl(&T::describe(), &self.config) {
            Ok(table) => {
                metrics::record_analysis("ok");
                let candidate = Arc::new(table);
                let published =
                    self.publish(type_id, CachedAnalysis::Ready(Arc::clone(&candidate)));

                if let CachedAnalysis::Ready(winner) = &published {
                    if !Arc::ptr_eq(winner, &candidate) {
                        tracing::debug!(type_name, "Routing table already published, discarding duplicate");
                    }
                }
                published.to_result()
            }
            Err(err) => {
                metrics::record_analysis("error");
                tracing::warn!(type_name, error = %err, "Structure analysis failed");

                if self.config.cache_failures {
                    return self.publish(type_id, CachedAnalysis::Failed(err)).to_result();
                }
                Err(err)
            }
        }
    }

    /// Insert `candidate` unless an entry exists; returns the entry that stays.
    fn publish(&self, type_id: TypeId, candidate: CachedAnalysis) -> CachedAnalysis {
        let mut published = None;
        let mut size = 0;

        self.tables.rcu(|current| {
            if let Some(existing) = current.get(&type_id) {
                published = Some(existing.clone());
                size = current.len();
                return Arc::clone(current);
            }
            let mut next = Tables::clone(current);
            next.insert(type_id, candidate.clone());
            published = Some(candidate.clone());
            size = next.len();
            Arc::new(next)
        });

        metrics::record_cache_size(size);
        published.unwrap_or(candidate)
    }

    /// True if a result (table or cached failure) is held for `T`.
    pub fn contains<T: PatternStruct>(&self) -> bool {
        self.tables.load().contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.tables.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.load().is_empty()
    }

    /// Drop every cached entry.
    pub fn clear(&self) {
        self.tables.store(Arc::new(Tables::new()));
        metrics::record_cache_size(0);
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl fmt::Debug for MetadataCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataCache")
            .field("types", &self.len())
            .field("config", &self.config)
            .finish()
    }
}
