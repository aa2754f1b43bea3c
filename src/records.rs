use csv::StringRecord;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// Reads a whitespace-separated text file where every line holds exactly
/// `columns` fields and deserializes each line into `T`.
///
/// Fields are split on any run of whitespace. A line with the wrong number of
/// fields, including a blank line, aborts the whole read.
pub fn read_records<T, P>(path: P, columns: usize) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        records.push(parse_record(&line, index + 1, columns)?);
    }

    Ok(records)
}

pub(crate) fn parse_record<T: DeserializeOwned>(line: &str, line_no: usize, columns: usize) -> Result<T> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != columns {
        return Err(Error::ColumnCount {
            line: line_no,
            expected: columns,
            found: fields.len(),
        });
    }

    StringRecord::from(fields)
        .deserialize(None)
        .map_err(|err| Error::Parse {
            line: line_no,
            reason: err.to_string(),
        })
}
