/*!
# Alignment validation

Checks that a target rendering with `<sent_br>` tokens is a faithful,
whitespace-insensitive reconstruction of its source text.
!*/
pub mod alignment;
pub mod pipeline;

pub use pipeline::SentenceValidation;
