// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashSet;
use std::thread;

use hhat_core::{
    DataStack, HhatError, Index, IndexError, IndexLookup, IndexManager, QStack, WorkingData,
};

#[test]
fn request_binds_lowest_free_indices() {
    let manager = IndexManager::new(4);
    let q = WorkingData::new("@q");
    let r = WorkingData::new("@r");
    assert_eq!(manager.request(&q, 2).unwrap(), [Index::new(0), Index::new(1)]);
    assert_eq!(manager.request(&r, 1).unwrap(), [Index::new(2)]);
    assert_eq!(manager.available(), 1);
    assert_eq!(manager.in_use_by(&q), [Index::new(0), Index::new(1)]);
}

#[test]
fn data_is_bound_only_once() {
    let manager = IndexManager::new(4);
    let q = WorkingData::new("@q");
    manager.request(&q, 1).unwrap();
    let err = manager.request(&q, 1).unwrap_err();
    assert!(matches!(err, IndexError::IndexAlreadyBound { count: 1, .. }));
    assert_eq!(manager.available(), 3);
}

#[test]
fn exhaustion_binds_nothing() {
    let manager = IndexManager::new(2);
    let q = WorkingData::new("@q");
    let err = manager.request(&q, 3).unwrap_err();
    assert_eq!(
        err,
        IndexError::IndexExhausted {
            data: "@q".to_string(),
            requested: 3,
            available: 2,
        }
    );
    assert!(manager.in_use_by(&q).is_empty());
    assert_eq!(manager.available(), 2);
    assert_eq!(
        HhatError::from(err).kind(),
        hhat_core::ErrorKind::IndexExhausted
    );
}

#[test]
fn free_returns_indices_to_the_pool() {
    let manager = IndexManager::new(3);
    let q = WorkingData::new("@q");
    let r = WorkingData::new("@r");
    manager.request(&q, 2).unwrap();
    manager.request(&r, 1).unwrap();
    assert_eq!(manager.free(&q), [Index::new(0), Index::new(1)]);
    assert!(manager.free(&q).is_empty());
    assert_eq!(manager.available(), 2);
    // Freed indices are reused, lowest first.
    let s = WorkingData::new("@s");
    assert_eq!(manager.request(&s, 2).unwrap(), [Index::new(0), Index::new(1)]);
}

#[test]
fn indices_are_exclusive_across_threads() {
    let manager = IndexManager::new(64);
    let bound: Vec<Vec<Index>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let manager = &manager;
                scope.spawn(move || {
                    let data = WorkingData::new(format!("@q{i}"));
                    manager.request(&data, 8).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    let all: HashSet<Index> = bound.iter().flatten().copied().collect();
    assert_eq!(all.len(), 64);
    assert_eq!(manager.available(), 0);
}

#[test]
fn data_stack_is_lifo() {
    let mut stack = DataStack::new();
    assert!(stack.is_empty());
    stack.push(WorkingData::new("@a"));
    stack.push(WorkingData::new("b"));
    assert_eq!(stack.len(), 2);
    let top = stack.pop().unwrap();
    assert_eq!(top.name(), "b");
    assert!(!top.is_quantum());
    assert!(stack.pop().unwrap().is_quantum());
    assert_eq!(stack.pop(), None);
}
