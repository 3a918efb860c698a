pub mod dedup;
pub mod error;
pub mod io;
pub mod pipelines;
pub mod types;
pub mod validation;
