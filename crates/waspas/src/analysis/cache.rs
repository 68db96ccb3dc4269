use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::domain::{Criterion, DecisionMatrix, Direction, NormalizedRow};

/// Content digest of everything normalization depends on.
///
/// Weights and display names are excluded: changing them leaves the normalized matrix intact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatrixFingerprint(pub String);

impl MatrixFingerprint {
    pub fn of(matrix: &DecisionMatrix, criteria: &[Criterion]) -> Self {
        let mut hasher = Sha256::new();

        for criterion in criteria {
            hasher.update(criterion.key.as_bytes());
            hasher.update([0u8]);
            hasher.update(match criterion.direction {
                Direction::Benefit => [1u8],
                Direction::Cost => [2u8],
            });
        }
        hasher.update([0xffu8]);

        for alternative in matrix.iter() {
            hasher.update(alternative.name.as_bytes());
            hasher.update([0u8]);
            for criterion in criteria {
                let bits = alternative
                    .value(&criterion.key)
                    .map(f64::to_bits)
                    .unwrap_or(u64::MAX);
                hasher.update(bits.to_le_bytes());
            }
        }

        Self(format!("{:x}", hasher.finalize()))
    }
}

impl fmt::Display for MatrixFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage for normalized matrices so repeated λ changes skip renormalization.
pub trait NormalizedMatrixStore: Send + Sync {
    fn fetch(&self, fingerprint: &MatrixFingerprint) -> Option<Arc<Vec<NormalizedRow>>>;
    fn insert(&self, fingerprint: MatrixFingerprint, rows: Arc<Vec<NormalizedRow>>);
    fn invalidate(&self, fingerprint: &MatrixFingerprint) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Matrices kept by [`InMemoryNormalizedStore::new`].
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Process-local store backed by a mutex-guarded map.
///
/// Holds at most `capacity` matrices; inserting past that evicts the oldest entry.
#[derive(Clone)]
pub struct InMemoryNormalizedStore {
    entries: Arc<Mutex<StoreEntries>>,
    capacity: usize,
}

#[derive(Default)]
struct StoreEntries {
    rows: HashMap<MatrixFingerprint, Arc<Vec<NormalizedRow>>>,
    order: VecDeque<MatrixFingerprint>,
}

impl InMemoryNormalizedStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(StoreEntries::default())),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryNormalizedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl NormalizedMatrixStore for InMemoryNormalizedStore {
    fn fetch(&self, fingerprint: &MatrixFingerprint) -> Option<Arc<Vec<NormalizedRow>>> {
        let guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        guard.rows.get(fingerprint).cloned()
    }

    fn insert(&self, fingerprint: MatrixFingerprint, rows: Arc<Vec<NormalizedRow>>) {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.rows.insert(fingerprint.clone(), rows).is_some() {
            return;
        }

        guard.order.push_back(fingerprint);
        while guard.order.len() > self.capacity {
            if let Some(oldest) = guard.order.pop_front() {
                guard.rows.remove(&oldest);
            }
        }
    }

    fn invalidate(&self, fingerprint: &MatrixFingerprint) -> bool {
        let mut guard = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        guard.order.retain(|entry| entry != fingerprint);
        guard.rows.remove(fingerprint).is_some()
    }

    fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .rows
            .len()
    }
}
