//! # tsheg
//!
//! Tsheg prepares bilingual sentence-segmentation corpora: it validates that
//! target renderings with `<sent_br>` tokens faithfully reconstruct their
//! source texts, then deduplicates near-identical source documents with a
//! checkpointed MinHash pipeline that survives interruption.
//!
//! ## Getting started
//!
//! ```sh
//! tsheg 0.1.0
//! sentence-segmentation corpus preparation tool.
//!
//! USAGE:
//!     tsheg <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     dedup       Deduplicate a validated corpus
//!     help        Prints this message or the help of the given subcommand(s)
//!     validate    Validate source/target alignment of a JSONL corpus
//! ```
use log::{debug, info};
use structopt::StructOpt;

mod cli;

use tsheg::dedup::Deduplication;
use tsheg::error::Error;
use tsheg::pipelines::Pipeline;
use tsheg::validation::SentenceValidation;

fn main() -> Result<(), Error> {
    env_logger::init();

    let opt = cli::Tsheg::from_args();
    debug!("cli args\n{:#?}", opt);

    match opt {
        cli::Tsheg::Validate(v) => {
            let p = SentenceValidation::new(v.src, v.dst_valid, v.dst_invalid);
            let (valid, invalid) = p.run()?;
            info!("{} valid records, {} invalid records", valid, invalid);
        }
        cli::Tsheg::Dedup(d) => {
            let p = Deduplication::new(
                d.src,
                d.dst_unique,
                d.dst_duplicates,
                d.batch_size,
                d.checkpoint_interval,
            );
            let summary = p.run()?;
            info!(
                "{} records in, {} unique, {} duplicates",
                summary.total, summary.unique, summary.duplicates
            );
        }
    };
    Ok(())
}
