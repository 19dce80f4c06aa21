//! Deep merging of two object trees.
//!
//! [`DeepMerger`] walks the keys of the right-hand object and combines each
//! value with the left-hand value under the same key, using the first
//! [`Strategy`] that applies. When none does, the right-hand value wins.
//!
//! The merger is independent of path resolution and matching.
//!
//! # Example
//!
//! ```
//! use deepquill::merger::{CombineArrays, DeepMerger, MergeObjects};
//! use deepquill::document::node::Value;
//! use serde_json::json;
//!
//! let a = Value::from(json!({"name": "one", "tags": ["x"], "meta": {"a": 1}}));
//! let b = Value::from(json!({"name": "ONE", "tags": ["y"], "meta": {"b": 2}}));
//!
//! let merger = DeepMerger::new(vec![Box::new(CombineArrays), Box::new(MergeObjects)]);
//! let merged = merger.merge_values(&a, &b);
//!
//! assert_eq!(
//!     merged,
//!     Value::from(json!({"name": "ONE", "tags": ["x", "y"], "meta": {"a": 1, "b": 2}}))
//! );
//! ```

pub mod strategy;

pub use strategy::{
    CombineArrays, MergeArraysOfObjectsByKey, MergeArraysOfObjectsByPosition, MergeObjects,
    Strategy,
};

use crate::document::node::Value;
use indexmap::IndexMap;
use log::trace;
use std::fmt;

/// Merges objects key by key with an ordered list of strategies.
pub struct DeepMerger {
    strategies: Vec<Box<dyn Strategy>>,
}

impl DeepMerger {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        Self { strategies }
    }

    /// Merges `b` into a copy of `a`.
    ///
    /// Keys of `a` keep their position; keys only in `b` are appended.
    pub fn merge(
        &self,
        a: &IndexMap<String, Value>,
        b: &IndexMap<String, Value>,
    ) -> IndexMap<String, Value> {
        let mut result = a.clone();
        for (key, b_val) in b {
            let merged = match result.get(key) {
                Some(a_val) => self.merge_values(a_val, b_val),
                None => self.merge_values(&Value::Null, b_val),
            };
            result.insert(key.clone(), merged);
        }
        result
    }

    /// Combines two values with the first applicable strategy, or returns
    /// `b` when none applies.
    pub fn merge_values(&self, a: &Value, b: &Value) -> Value {
        match self.strategies.iter().find(|s| s.applies(a, b)) {
            Some(strategy) => {
                trace!("merging with {}", strategy.name());
                strategy.apply(a, b, self)
            }
            None => b.clone(),
        }
    }
}

impl Default for DeepMerger {
    fn default() -> Self {
        Self::new(vec![Box::new(MergeObjects)])
    }
}

impl fmt::Debug for DeepMerger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.strategies.iter().map(|s| s.name()))
            .finish()
    }
}
