//! Batch-level unique/duplicate partitioning.
use crate::dedup::index::FingerprintIndex;
use crate::error::Error;
use crate::types::Record;

/// Partitions one batch of records into unique and duplicate sets.
///
/// Record at offset `i` gets global id `start_id + i`. Processing follows
/// input order, so the first record of a similar pair encountered
/// corpus-wide is the one kept as unique; all later similar records are
/// classified duplicates. Mutates `index` in place (inserts for accepted
/// uniques), nothing else.
pub fn process_batch(
    records: &[Record],
    start_id: usize,
    index: &mut FingerprintIndex,
) -> Result<(Vec<Record>, Vec<Record>), Error> {
    let mut unique = Vec::new();
    let mut duplicates = Vec::new();

    for (offset, record) in records.iter().enumerate() {
        let fp = index.fingerprint_of(&record.source);
        if index.has_similar(&fp) {
            duplicates.push(record.clone());
        } else {
            index.insert(start_id + offset, fp)?;
            unique.push(record.clone());
        }
    }

    Ok((unique, duplicates))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str) -> Record {
        Record::new(source.to_string(), source.replace('\n', "<sent_br>"), None)
    }

    fn sources(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.source.as_str()).collect()
    }

    #[test]
    fn first_occurrence_wins() {
        let mut index = FingerprintIndex::new();
        let records = vec![
            record("ཀཁག\nངཅ"),
            record("ཆཇཉ\nཏཐད"),
            record("ཀཁག\nངཅ"),
        ];
        let (unique, duplicates) = process_batch(&records, 0, &mut index).unwrap();
        assert_eq!(sources(&unique), vec!["ཀཁག\nངཅ", "ཆཇཉ\nཏཐད"]);
        assert_eq!(sources(&duplicates), vec!["ཀཁག\nངཅ"]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn order_decides_the_canonical_record() {
        // same paragraph set, distinguishable by filename
        let mut a = record("ཀཁག\nངཅ\nཆཇཉ");
        a.filename = Some("a.txt".to_string());
        let mut b = record("ཀཁག\nངཅ\nཆཇཉ");
        b.filename = Some("b.txt".to_string());

        let mut index = FingerprintIndex::new();
        let (unique, duplicates) =
            process_batch(&[a.clone(), b.clone()], 0, &mut index).unwrap();
        assert_eq!(unique, vec![a.clone()]);
        assert_eq!(duplicates, vec![b.clone()]);

        let mut index = FingerprintIndex::new();
        let (unique, duplicates) = process_batch(&[b.clone(), a.clone()], 0, &mut index).unwrap();
        assert_eq!(unique, vec![b]);
        assert_eq!(duplicates, vec![a]);
    }

    #[test]
    fn partition_is_total_and_disjoint() {
        let mut index = FingerprintIndex::new();
        let records: Vec<Record> = (0..10)
            .map(|i| record(&format!("paragraph number {}\nshared tail", i % 4)))
            .collect();
        let (unique, duplicates) = process_batch(&records, 0, &mut index).unwrap();
        assert_eq!(unique.len() + duplicates.len(), records.len());
    }

    #[test]
    fn split_batches_match_single_batch() {
        let records: Vec<Record> = vec![
            record("ཀཁག\nངཅ"),
            record("ཆཇཉ\nཏཐད"),
            record("ཀཁག\nངཅ"),
            record("ནཔཕ\nབམཙ"),
            record("ཆཇཉ\nཏཐད"),
        ];

        let mut whole = FingerprintIndex::new();
        let (u1, d1) = process_batch(&records, 0, &mut whole).unwrap();

        let mut split = FingerprintIndex::new();
        let (mut u2, mut d2) = process_batch(&records[..2], 0, &mut split).unwrap();
        let (u, d) = process_batch(&records[2..], 2, &mut split).unwrap();
        u2.extend(u);
        d2.extend(d);

        assert_eq!(u1, u2);
        assert_eq!(d1, d2);
    }
}
