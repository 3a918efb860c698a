//! Command line arguments and parameters management/parsing.
use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "tsheg",
    about = "sentence-segmentation corpus preparation tool."
)]
/// Holds every command that is callable by the `tsheg` command.
pub enum Tsheg {
    #[structopt(about = "Validate source/target alignment of a JSONL corpus")]
    Validate(Validate),
    #[structopt(about = "Deduplicate a validated corpus")]
    Dedup(Dedup),
}

#[derive(Debug, StructOpt)]
/// Validate command and parameters.
pub struct Validate {
    #[structopt(parse(from_os_str), help = "corpus location (one record per line)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "valid records destination")]
    pub dst_valid: PathBuf,
    #[structopt(parse(from_os_str), help = "invalid records destination")]
    pub dst_invalid: PathBuf,
}

#[derive(Debug, StructOpt)]
/// Dedup command and parameters.
pub struct Dedup {
    #[structopt(parse(from_os_str), help = "corpus location (JSON array of records)")]
    pub src: PathBuf,
    #[structopt(parse(from_os_str), help = "unique records destination")]
    pub dst_unique: PathBuf,
    #[structopt(parse(from_os_str), help = "duplicate records destination")]
    pub dst_duplicates: PathBuf,
    #[structopt(
        help = "number of records per batch.",
        long = "batch-size",
        default_value = "1000",
        short = "s"
    )]
    pub batch_size: usize,
    #[structopt(
        help = "number of batches between checkpoints.",
        long = "checkpoint-interval",
        default_value = "5",
        short = "k"
    )]
    pub checkpoint_interval: usize,
}
