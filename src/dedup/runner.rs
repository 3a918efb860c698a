//! Checkpointed deduplication pipeline.
//!
//! Drives [process_batch] over the whole corpus in fixed-size batches,
//! appending results to the two output files every few batches so that a
//! killed run can be re-invoked and resume at the right batch boundary.
use std::path::PathBuf;

use log::info;

use crate::dedup::batch::process_batch;
use crate::dedup::index::FingerprintIndex;
use crate::error::Error;
use crate::io::json;
use crate::pipelines::Pipeline;
use crate::types::Record;

pub const DEFAULT_BATCH_SIZE: usize = 1000;
pub const DEFAULT_CHECKPOINT_INTERVAL: usize = 5;

/// Final accounting of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub unique: usize,
    pub duplicates: usize,
}

pub struct Deduplication {
    src: PathBuf,
    dst_unique: PathBuf,
    dst_duplicates: PathBuf,
    batch_size: usize,
    checkpoint_interval: usize,
}

impl Deduplication {
    pub fn new(
        src: PathBuf,
        dst_unique: PathBuf,
        dst_duplicates: PathBuf,
        batch_size: usize,
        checkpoint_interval: usize,
    ) -> Self {
        Self {
            src,
            dst_unique,
            dst_duplicates,
            batch_size,
            checkpoint_interval,
        }
    }

    fn read_checkpoint(path: &std::path::Path) -> Result<Vec<Record>, Error> {
        json::read(path)
            .map_err(|e| Error::ResumeState(format!("{}: {}", path.display(), e)))
    }

    /// Determines the resume point and replays index state.
    ///
    /// When both output files exist, the number of fully processed batches is
    /// their combined length over the batch size, and fingerprints of the
    /// persisted unique records are re-inserted with ids `0..N-1` in file
    /// order. Otherwise both outputs are initialized empty.
    fn resume_state(
        &self,
        total: usize,
        index: &mut FingerprintIndex,
    ) -> Result<usize, Error> {
        if !(self.dst_unique.exists() && self.dst_duplicates.exists()) {
            json::write(&self.dst_unique, &Vec::<Record>::new())?;
            json::write(&self.dst_duplicates, &Vec::<Record>::new())?;
            return Ok(0);
        }

        let uniques = Self::read_checkpoint(&self.dst_unique)?;
        let duplicates = Self::read_checkpoint(&self.dst_duplicates)?;
        let processed_entries = uniques.len() + duplicates.len();
        if processed_entries > total {
            return Err(Error::ResumeState(format!(
                "{} persisted entries for a {}-record corpus",
                processed_entries, total
            )));
        }

        let processed_batches = processed_entries / self.batch_size;
        info!("resuming from batch {}", processed_batches + 1);

        for (idx, record) in uniques.iter().enumerate() {
            let fp = index.fingerprint_of(&record.source);
            index.insert(idx, fp)?;
        }

        Ok(processed_batches)
    }
}

impl Pipeline<RunSummary> for Deduplication {
    fn run(&self) -> Result<RunSummary, Error> {
        if self.batch_size == 0 || self.checkpoint_interval == 0 {
            return Err(Error::Custom(
                "batch size and checkpoint interval must be nonzero".to_string(),
            ));
        }

        let records: Vec<Record> = json::read(&self.src)?;
        let total = records.len();
        let total_batches =
            total / self.batch_size + usize::from(total % self.batch_size > 0);

        let mut index = FingerprintIndex::new();
        let processed_batches = self.resume_state(total, &mut index)?;
        info!(
            "total batches: {}, processed batches: {}",
            total_batches, processed_batches
        );

        let mut unique_buf: Vec<Record> = Vec::new();
        let mut duplicate_buf: Vec<Record> = Vec::new();

        for batch_num in processed_batches..total_batches {
            let start = batch_num * self.batch_size;
            let end = (start + self.batch_size).min(total);

            let (unique, duplicates) =
                process_batch(&records[start..end], start, &mut index)?;
            unique_buf.extend(unique);
            duplicate_buf.extend(duplicates);

            // flush on interval and on the final batch; buffers are cleared
            // afterwards so memory stays bounded to one interval's worth
            if (batch_num + 1) % self.checkpoint_interval == 0
                || batch_num == total_batches - 1
            {
                json::append_records(&self.dst_unique, &unique_buf)?;
                json::append_records(&self.dst_duplicates, &duplicate_buf)?;
                unique_buf.clear();
                duplicate_buf.clear();
                info!("checkpoint saved at batch {}/{}", batch_num + 1, total_batches);
            }
            info!("batch {}/{} done", batch_num + 1, total_batches);
        }

        let unique: Vec<Record> = json::read(&self.dst_unique)?;
        let duplicates: Vec<Record> = json::read(&self.dst_duplicates)?;
        let summary = RunSummary {
            total,
            unique: unique.len(),
            duplicates: duplicates.len(),
        };
        info!(
            "total input entries: {}, unique: {}, duplicates: {}",
            summary.total, summary.unique, summary.duplicates
        );
        Ok(summary)
    }
}
