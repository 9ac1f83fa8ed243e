use crate::{
    constants::{FULL_WIDTH_COMMA, UTF8_BOM},
    error::Result,
    person::{Person, PersonId},
};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::path::Path;

/// One roster row: `name[,gender]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub name: String,
    pub raw_gender: String,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, raw_gender: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_gender: raw_gender.into(),
        }
    }
}

/// Reads a roster file
///
/// # Errors
/// Returns error if the file cannot be read or is not valid CSV
pub fn read_roster_file<P: AsRef<Path>>(path: P) -> Result<Vec<RosterEntry>> {
    let text = std::fs::read_to_string(path)?;
    parse_roster_text(&text)
}

/// Parse free roster text, one person per line.
/// - `,` and `，` both separate name and gender
/// - blank lines and rows without a name are skipped
/// - a missing gender column yields an empty token
/// - columns after the second are ignored
/// - quotes are literal; every line is one row
pub fn parse_roster_text(text: &str) -> Result<Vec<RosterEntry>> {
    let normalized = text
        .trim_start_matches(UTF8_BOM)
        .replace(FULL_WIDTH_COMMA, ",");

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .flexible(true)
        .quoting(false)
        .from_reader(normalized.as_bytes());

    let mut entries = Vec::new();
    for result in rdr.records() {
        let rec = result?;
        if let Some(entry) = parse_record(&rec) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

fn parse_record(rec: &StringRecord) -> Option<RosterEntry> {
    let name = rec.get(0).map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    let gender = rec.get(1).map(str::trim).unwrap_or_default();
    Some(RosterEntry::new(name, gender))
}

/// Turn roster rows into people, numbering them in input order
pub fn into_people(entries: Vec<RosterEntry>) -> Vec<Person> {
    entries
        .into_iter()
        .enumerate()
        .map(|(i, e)| Person::new(PersonId(i as u32), e.name, e.raw_gender))
        .collect()
}
