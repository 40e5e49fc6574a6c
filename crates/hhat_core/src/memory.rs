// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

//! Quantum register indices and the scratch stack used while lowering.
//!
//! The `IndexManager` owns a fixed pool of indices. Each index is bound to at
//! most one `WorkingData` at a time, from `request` until `free`. All access
//! to the pool goes through one mutex, so a manager may be shared between
//! threads by reference.

use std::collections::BTreeSet;
use std::fmt;

use hashbrown::HashMap;
use parking_lot::Mutex;

use crate::data::WorkingData;

/// One quantum register slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Index(usize);

impl Index {
    pub fn new(value: usize) -> Index {
        Index(value)
    }

    pub fn value(self) -> usize {
        self.0
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("cannot allocate {requested} indices for '{data}': only {available} are free")]
    IndexExhausted {
        data: String,
        requested: usize,
        available: usize,
    },
    #[error("'{data}' is already bound to {count} indices")]
    IndexAlreadyBound { data: String, count: usize },
}

/// Read access to index bindings. Lowering only ever needs this view.
pub trait IndexLookup {
    /// The indices bound to `data`, in allocation order. Empty if unbound.
    fn in_use_by(&self, data: &WorkingData) -> Vec<Index>;
}

#[derive(Debug, Default)]
struct IndexPool {
    available: BTreeSet<Index>,
    in_use_by: HashMap<WorkingData, Vec<Index>>,
}

#[derive(Debug)]
pub struct IndexManager {
    max_num_index: usize,
    pool: Mutex<IndexPool>,
}

impl IndexManager {
    pub fn new(max_num_index: usize) -> IndexManager {
        let pool = IndexPool {
            available: (0..max_num_index).map(Index).collect(),
            in_use_by: HashMap::new(),
        };
        IndexManager {
            max_num_index,
            pool: Mutex::new(pool),
        }
    }

    pub fn max_num_index(&self) -> usize {
        self.max_num_index
    }

    /// Number of indices not bound to any data.
    pub fn available(&self) -> usize {
        self.pool.lock().available.len()
    }

    /// Bind the `num` lowest free indices to `data`. Fails without binding
    /// anything if `data` is already bound or not enough indices are free.
    pub fn request(&self, data: &WorkingData, num: usize) -> Result<Vec<Index>, IndexError> {
        let mut pool = self.pool.lock();
        if let Some(bound) = pool.in_use_by.get(data) {
            return Err(IndexError::IndexAlreadyBound {
                data: data.to_string(),
                count: bound.len(),
            });
        }
        if pool.available.len() < num {
            return Err(IndexError::IndexExhausted {
                data: data.to_string(),
                requested: num,
                available: pool.available.len(),
            });
        }
        let mut indices = Vec::with_capacity(num);
        for _ in 0..num {
            if let Some(index) = pool.available.pop_first() {
                indices.push(index);
            }
        }
        if !indices.is_empty() {
            pool.in_use_by.insert(data.clone(), indices.clone());
        }
        tracing::debug!(%data, ?indices, "indices bound");
        Ok(indices)
    }

    /// Release every index bound to `data` and return them.
    pub fn free(&self, data: &WorkingData) -> Vec<Index> {
        let mut pool = self.pool.lock();
        let released = pool.in_use_by.remove(data).unwrap_or_default();
        pool.available.extend(released.iter().copied());
        tracing::debug!(%data, ?released, "indices released");
        released
    }
}

impl IndexLookup for IndexManager {
    fn in_use_by(&self, data: &WorkingData) -> Vec<Index> {
        self.pool
            .lock()
            .in_use_by
            .get(data)
            .cloned()
            .unwrap_or_default()
    }
}

/// Scratch stack of data available to instructions while lowering.
pub trait QStack {
    fn push(&mut self, data: WorkingData);
    fn pop(&mut self) -> Option<WorkingData>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone, Debug, Default)]
pub struct DataStack {
    items: Vec<WorkingData>,
}

impl DataStack {
    pub fn new() -> DataStack {
        DataStack::default()
    }
}

impl QStack for DataStack {
    fn push(&mut self, data: WorkingData) {
        self.items.push(data);
    }

    fn pop(&mut self) -> Option<WorkingData> {
        self.items.pop()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}
