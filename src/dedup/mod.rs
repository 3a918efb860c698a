/*!
# Near-duplicate detection

MinHash fingerprinting over paragraph sets, an approximate-similarity index,
and the checkpointed batch pipeline that partitions a corpus into unique and
duplicate records.
!*/
pub mod batch;
pub mod index;
pub mod runner;

pub use index::{Fingerprint, FingerprintIndex};
pub use runner::{Deduplication, RunSummary};
