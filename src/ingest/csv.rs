use std::io::Read;

use tracing::warn;

use crate::ingest::row::RawRow;

/// Read a headered CSV into raw rows keyed by header name.
///
/// Only the table shape is checked here; every value stays text until the
/// batch validator types it. A record with the wrong number of fields, or
/// one that is not UTF-8, becomes a defective row so the validator can
/// reject it on its own. Only header and I/O failures fail the whole read.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut rows: Vec<RawRow> = vec![];
    for record in rdr.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) => {
                warn!("Unreadable CSV record {}: {}", rows.len() + 1, err);
                rows.push(RawRow::new().with_defect("record is not valid UTF-8"));
                continue;
            }
            Err(err) => return Err(err),
        };

        let row: RawRow = headers.iter().zip(record.iter()).collect();
        if record.len() == headers.len() {
            rows.push(row);
        } else {
            rows.push(row.with_defect(format!(
                "expected {} fields, found {}",
                headers.len(),
                record.len()
            )));
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_keyed_by_header() {
        let data = "property_id,city,price\n1, Springfield ,100\n2,Shelbyville,abc\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("city"), Some("Springfield"));
        // typing is left to the validator
        assert_eq!(rows[1].get("price"), Some("abc"));
        assert_eq!(rows[1].get("bedrooms"), None);
        assert!(rows.iter().all(|row| row.defect().is_none()));
    }

    #[test]
    fn ragged_rows_are_kept_but_marked() {
        let data = "a,b,c\n1,2,3\n4,5\n6,7,8,9\n10,11,12\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].defect(), None);
        assert_eq!(rows[1].defect(), Some("expected 3 fields, found 2"));
        assert_eq!(rows[1].get("a"), Some("4"));
        assert_eq!(rows[2].defect(), Some("expected 3 fields, found 4"));
        assert_eq!(rows[3].get("c"), Some("12"));
    }

    #[test]
    fn invalid_utf8_marks_only_that_row() {
        let mut data = b"a,b\n1,2\n".to_vec();
        data.extend_from_slice(b"\xff\xfe,3\n5,6\n");
        let rows = read_rows(data.as_slice()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].defect(), Some("record is not valid UTF-8"));
        assert_eq!(rows[2].get("b"), Some("6"));
    }
}
