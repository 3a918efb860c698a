//! MinHash fingerprints and the approximate-similarity index.
//!
//! A fingerprint sketches the *set* of newline-delimited paragraphs of a
//! document with 128 permutations of a 64-bit item hash. The index buckets
//! signature bands for candidate lookup, then confirms candidates against
//! the estimated Jaccard similarity threshold.
use std::collections::{HashMap, HashSet};
use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use twox_hash::XxHash64;

use crate::error::Error;

/// Number of hash permutations per fingerprint.
pub const NUM_PERM: usize = 128;
/// Number of signature bands (16 rows each), tuned for a 0.9 threshold.
const NUM_BANDS: usize = 8;
/// Estimated-Jaccard threshold above which two documents are duplicates.
pub const SIMILARITY_THRESHOLD: f64 = 0.9;

// Permutations must be identical across runs: a resumed job replays
// fingerprints for records accepted before the interruption.
const PERMUTATION_SEED: u64 = 0x7473_6865_6721;

#[inline]
fn item_hash(item: &[u8]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    hasher.write(item);
    hasher.finish()
}

#[inline]
fn permute_hash(hash: u64, a: u64, b: u64) -> u32 {
    ((a.wrapping_mul(hash).wrapping_add(b)) >> 32) as u32
}

#[inline]
fn band_hash(band: &[u32]) -> u64 {
    let mut hasher = XxHash64::with_seed(0);
    for &value in band {
        hasher.write_u32(value);
    }
    hasher.finish()
}

/// Fixed-size MinHash sketch of a paragraph set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    hash_values: Vec<u32>,
}

impl Fingerprint {
    /// Estimated Jaccard similarity of the underlying sets.
    pub fn jaccard_estimate(&self, other: &Fingerprint) -> f64 {
        let equal = self
            .hash_values
            .iter()
            .zip(&other.hash_values)
            .filter(|(a, b)| a == b)
            .count();
        equal as f64 / self.hash_values.len() as f64
    }
}

/// Append-only similarity index over record fingerprints.
///
/// Owned by the orchestrating pipeline and passed by reference into each
/// batch call; never global state.
pub struct FingerprintIndex {
    permutations: Vec<(u64, u64)>,
    band_size: usize,
    threshold: f64,
    signatures: HashMap<usize, Fingerprint>,
    bands: Vec<HashMap<u64, Vec<usize>>>,
}

impl FingerprintIndex {
    pub fn new() -> Self {
        Self::with_threshold(SIMILARITY_THRESHOLD)
    }

    pub fn with_threshold(threshold: f64) -> Self {
        let mut rng = StdRng::seed_from_u64(PERMUTATION_SEED);
        let permutations = (0..NUM_PERM).map(|_| (rng.gen(), rng.gen())).collect();
        Self {
            permutations,
            band_size: NUM_PERM / NUM_BANDS,
            threshold,
            signatures: HashMap::new(),
            bands: vec![HashMap::new(); NUM_BANDS],
        }
    }

    /// Sketches the set of newline-delimited paragraphs of `text`.
    /// Repeated paragraphs contribute once; paragraph order is irrelevant.
    pub fn fingerprint_of(&self, text: &str) -> Fingerprint {
        let paragraphs: HashSet<&str> = text.split('\n').collect();
        let mut hash_values = vec![u32::MAX; NUM_PERM];
        for paragraph in paragraphs {
            let hash = item_hash(paragraph.as_bytes());
            for (i, &(a, b)) in self.permutations.iter().enumerate() {
                hash_values[i] = hash_values[i].min(permute_hash(hash, a, b));
            }
        }
        Fingerprint { hash_values }
    }

    /// True if some previously inserted fingerprint is estimated at least as
    /// similar as the threshold. Band buckets supply the candidates.
    pub fn has_similar(&self, fp: &Fingerprint) -> bool {
        let mut candidates: HashSet<usize> = HashSet::new();
        for (i, table) in self.bands.iter().enumerate() {
            let start = i * self.band_size;
            let end = start + self.band_size;
            if let Some(ids) = table.get(&band_hash(&fp.hash_values[start..end])) {
                candidates.extend(ids);
            }
        }
        candidates
            .into_iter()
            .any(|id| self.signatures[&id].jaccard_estimate(fp) >= self.threshold)
    }

    /// Records `fp` under `id`. Ids come from the monotonic corpus position
    /// and must be unique; reuse is an error.
    pub fn insert(&mut self, id: usize, fp: Fingerprint) -> Result<(), Error> {
        if self.signatures.contains_key(&id) {
            return Err(Error::Custom(format!("id {} already in the index", id)));
        }
        for (i, table) in self.bands.iter_mut().enumerate() {
            let start = i * self.band_size;
            let end = start + self.band_size;
            table
                .entry(band_hash(&fp.hash_values[start..end]))
                .or_insert_with(Vec::new)
                .push(id);
        }
        self.signatures.insert(id, fp);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}

impl Default for FingerprintIndex {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraph_set_semantics() {
        let index = FingerprintIndex::new();
        // repeated paragraphs and ordering do not change the sketch
        assert_eq!(
            index.fingerprint_of("ཀཁག\nངཅ\nཀཁག"),
            index.fingerprint_of("ངཅ\nཀཁག")
        );
    }

    #[test]
    fn identical_sets_estimate_one() {
        let index = FingerprintIndex::new();
        let a = index.fingerprint_of("ཀཁག\nངཅ");
        let b = index.fingerprint_of("ཀཁག\nངཅ");
        assert_eq!(a.jaccard_estimate(&b), 1.0);
    }

    #[test]
    fn disjoint_sets_estimate_low() {
        let index = FingerprintIndex::new();
        let a = index.fingerprint_of("ཀཁག\nངཅ");
        let b = index.fingerprint_of("ཆཇཉ\nཏཐད");
        assert!(a.jaccard_estimate(&b) < 0.5);
    }

    #[test]
    fn has_similar_after_insert() {
        let mut index = FingerprintIndex::new();
        let fp = index.fingerprint_of("ཀཁག\nངཅ");
        assert!(!index.has_similar(&fp));
        index.insert(0, fp.clone()).unwrap();
        assert!(index.has_similar(&fp));

        let other = index.fingerprint_of("ཆཇཉ\nཏཐད");
        assert!(!index.has_similar(&other));
    }

    #[test]
    fn insert_rejects_id_reuse() {
        let mut index = FingerprintIndex::new();
        let fp = index.fingerprint_of("ཀཁག");
        index.insert(3, fp.clone()).unwrap();
        assert!(index.insert(3, fp).is_err());
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn fingerprints_are_stable_across_index_instances() {
        // resume replays fingerprints in a fresh index; they must match
        let a = FingerprintIndex::new().fingerprint_of("ཀཁག\nངཅ");
        let b = FingerprintIndex::new().fingerprint_of("ཀཁག\nངཅ");
        assert_eq!(a, b);
    }
}
