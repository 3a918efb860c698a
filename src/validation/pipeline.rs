//! Validation pass over a newline-delimited JSON corpus.
//!
//! Each line holds one record. Lines that fail to parse, lack the required
//! keys, or fail alignment validation are routed to the invalid output with
//! their line number attached; everything else goes to the valid output.
//! Record-level problems are classification outcomes, never aborts.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use log::{info, warn};
use serde_json::{json, Value};

use crate::error::Error;
use crate::io::json;
use crate::pipelines::Pipeline;
use crate::validation::alignment;

pub struct SentenceValidation {
    src: PathBuf,
    dst_valid: PathBuf,
    dst_invalid: PathBuf,
}

impl SentenceValidation {
    pub fn new(src: PathBuf, dst_valid: PathBuf, dst_invalid: PathBuf) -> Self {
        Self {
            src,
            dst_valid,
            dst_invalid,
        }
    }

    /// Classifies one already-parsed line. Returns `Ok` with the untouched
    /// value for valid records, `Err` with the value to route to the invalid
    /// output otherwise.
    fn classify(mut value: Value, line_number: usize) -> Result<Value, Value> {
        let aligned = match (
            value.get("source").and_then(Value::as_str),
            value.get("target").and_then(Value::as_str),
        ) {
            (Some(source), Some(target)) => alignment::validate(source, target),
            _ => {
                warn!("line {}: missing 'source' or 'target' keys", line_number);
                Self::tag_line_number(&mut value, line_number);
                return Err(value);
            }
        };

        if aligned {
            Ok(value)
        } else {
            Self::tag_line_number(&mut value, line_number);
            Err(value)
        }
    }

    fn tag_line_number(value: &mut Value, line_number: usize) {
        if let Some(obj) = value.as_object_mut() {
            obj.insert("line_number".to_string(), json!(line_number));
        }
    }

    /// Partitions the lines of a JSONL source into valid/invalid sets.
    /// Blank lines are skipped; line numbers start at 1.
    pub fn partition(
        lines: impl Iterator<Item = std::io::Result<String>>,
    ) -> Result<(Vec<Value>, Vec<Value>), Error> {
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for (line_number, line) in lines.enumerate().map(|(i, l)| (i + 1, l)) {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<Value>(line) {
                Ok(value) => match Self::classify(value, line_number) {
                    Ok(v) => valid.push(v),
                    Err(v) => invalid.push(v),
                },
                Err(e) => {
                    warn!("line {}: json decode failed: {}", line_number, e);
                    invalid.push(json!({
                        "line_number": line_number,
                        "error": e.to_string(),
                        "line": line,
                    }));
                }
            }
        }

        Ok((valid, invalid))
    }
}

impl Pipeline<(usize, usize)> for SentenceValidation {
    /// Runs the validation pass, returning `(valid, invalid)` counts.
    fn run(&self) -> Result<(usize, usize), Error> {
        let f = File::open(&self.src)?;
        let (valid, invalid) = Self::partition(BufReader::new(f).lines())?;

        json::write(&self.dst_valid, &valid)?;
        json::write(&self.dst_invalid, &invalid)?;

        info!(
            "validation done: {} valid, {} invalid",
            valid.len(),
            invalid.len()
        );
        Ok((valid.len(), invalid.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(s: &str) -> impl Iterator<Item = std::io::Result<String>> + '_ {
        s.lines().map(|l| Ok(l.to_string()))
    }

    #[test]
    fn partitions_valid_and_misaligned() {
        let src = concat!(
            r#"{"source": "ཀཁག\nངཅ", "target": "ཀཁག<sent_br>ངཅ"}"#,
            "\n",
            r#"{"source": "ཀཁག\nངཅ", "target": "ཀཁགངཅ"}"#,
        );
        let (valid, invalid) = SentenceValidation::partition(lines(src)).unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0]["line_number"], json!(2));
    }

    #[test]
    fn decode_failure_becomes_synthetic_record() {
        let src = "{not json\n";
        let (valid, invalid) = SentenceValidation::partition(lines(src)).unwrap();
        assert!(valid.is_empty());
        assert_eq!(invalid.len(), 1);
        assert_eq!(invalid[0]["line_number"], json!(1));
        assert!(invalid[0].get("error").is_some());
        assert_eq!(invalid[0]["line"], json!("{not json"));
    }

    #[test]
    fn missing_keys_are_invalid() {
        let src = r#"{"source": "ཀཁག"}"#;
        let (valid, invalid) = SentenceValidation::partition(lines(src)).unwrap();
        assert!(valid.is_empty());
        assert_eq!(invalid[0]["line_number"], json!(1));
        assert_eq!(invalid[0]["source"], json!("ཀཁག"));
    }

    #[test]
    fn blank_lines_are_skipped_but_counted() {
        let src = concat!(
            "\n",
            r#"{"source": "ཀཁག", "target": "ཀཁག"}"#,
            "\n\n",
            r#"{"source": "ང", "target": "ཅ"}"#,
        );
        let (valid, invalid) = SentenceValidation::partition(lines(src)).unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(invalid.len(), 1);
        // blank lines still advance the line counter
        assert_eq!(invalid[0]["line_number"], json!(4));
    }

    #[test]
    fn valid_records_pass_through_untouched() {
        let src = r#"{"source": "ཀཁག", "target": "ཀཁག", "filename": "vol01.txt"}"#;
        let (valid, _) = SentenceValidation::partition(lines(src)).unwrap();
        assert_eq!(valid[0]["filename"], json!("vol01.txt"));
        assert!(valid[0].get("line_number").is_none());
    }

    #[test]
    fn run_writes_both_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.jsonl");
        std::fs::write(
            &src,
            concat!(
                r#"{"source": "ཀཁག\nངཅ", "target": "ཀཁག<sent_br>ངཅ"}"#,
                "\n",
                "{oops\n",
            ),
        )
        .unwrap();

        let dst_valid = dir.path().join("valid.json");
        let dst_invalid = dir.path().join("invalid.json");
        let pipeline =
            SentenceValidation::new(src, dst_valid.clone(), dst_invalid.clone());
        let (nb_valid, nb_invalid) = pipeline.run().unwrap();

        assert_eq!((nb_valid, nb_invalid), (1, 1));
        let valid: Vec<Value> = json::read(&dst_valid).unwrap();
        let invalid: Vec<Value> = json::read(&dst_invalid).unwrap();
        assert_eq!(valid.len(), 1);
        assert_eq!(invalid.len(), 1);
    }
}
