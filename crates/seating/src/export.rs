use crate::{
    constants::{DISABLED_SEAT_TOKEN, EMPTY_SEAT_TOKEN, UTF8_BOM},
    error::{Result, SeatingError},
    view::{DeskView, SeatView},
};
use chrono::Local;
use csv::{QuoteStyle, WriterBuilder};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

/// One exported seat, in traversal order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportRecord {
    Person { name: String, label: &'static str },
    Disabled,
    Empty,
}

impl ExportRecord {
    fn from_seat(seat: &SeatView) -> Self {
        match (&seat.occupant, seat.disabled) {
            (Some(p), _) => ExportRecord::Person {
                name: p.name.clone(),
                label: p.gender.label(),
            },
            (None, true) => ExportRecord::Disabled,
            (None, false) => ExportRecord::Empty,
        }
    }

    pub fn is_marker(&self) -> bool {
        !matches!(self, ExportRecord::Person { .. })
    }

    fn fields(&self) -> Vec<&str> {
        match self {
            ExportRecord::Person { name, label } => vec![name.as_str(), *label],
            ExportRecord::Disabled => vec![DISABLED_SEAT_TOKEN],
            ExportRecord::Empty => vec![EMPTY_SEAT_TOKEN],
        }
    }
}

/// One record per seat; trailing empty/disabled markers are dropped so the
/// file ends at the last seated person.
pub fn export_records(desks: &[DeskView]) -> Vec<ExportRecord> {
    let mut records: Vec<ExportRecord> = desks
        .iter()
        .flat_map(|desk| desk.seats())
        .map(ExportRecord::from_seat)
        .collect();

    let keep = records
        .iter()
        .rposition(|r| !r.is_marker())
        .map_or(0, |last| last + 1);
    records.truncate(keep);
    records
}

/// Write records as BOM-prefixed CSV that reads back as a roster
pub fn write_csv<W: Write>(records: &[ExportRecord], mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM.as_bytes())?;

    let mut builder = WriterBuilder::new();
    builder.flexible(true).quote_style(QuoteStyle::Never);
    #[cfg(windows)]
    builder.terminator(csv::Terminator::CRLF);

    let mut wtr = builder.from_writer(writer);
    for record in records {
        wtr.write_record(record.fields())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Export the seating to `<output_dir>/seating_<timestamp>.csv`
pub fn export_to_csv_with_path(desks: &[DeskView], output_dir: Option<&Path>) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
    let filename = format!("seating_{timestamp}.csv");

    let file_path = if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir).map_err(|e| SeatingError::CreateDir {
            path: dir.to_path_buf(),
            source: e,
        })?;
        dir.join(&filename)
    } else {
        filename.into()
    };

    let file = File::create(&file_path).map_err(|e| SeatingError::CreateFile {
        path: file_path.clone(),
        source: e,
    })?;

    write_csv(&export_records(desks), BufWriter::new(file))?;
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GridConfig,
        geometry::SeatId,
        person::{Person, PersonId},
        roster::parse_roster_text,
        state::SeatState,
        view::build_desks,
    };
    use std::collections::{HashMap, HashSet};
    use tempfile::TempDir;

    fn seat(id: &str) -> SeatId {
        id.parse().unwrap()
    }

    /// 2x1 grid: Alice | (disabled), (empty) | Bob, then a ragged tail on a 3x1 grid
    fn sample_desks(rows: usize) -> Vec<DeskView> {
        let state = SeatState::from_parts(
            HashSet::from([seat("desk-0-0-R"), seat("desk-2-0-L")]),
            HashMap::new(),
            HashMap::from([
                (seat("desk-0-0-L"), Some(Person::new(PersonId(1), "Alice", "f"))),
                (seat("desk-1-0-L"), None),
                (seat("desk-1-0-R"), Some(Person::new(PersonId(2), "Bob", "?"))),
            ]),
        );
        build_desks(&state, &GridConfig::new(rows, 1))
    }

    #[test]
    fn test_export_records() {
        let records = export_records(&sample_desks(2));
        assert_eq!(
            records,
            vec![
                ExportRecord::Person {
                    name: "Alice".to_string(),
                    label: "女"
                },
                ExportRecord::Disabled,
                ExportRecord::Empty,
                ExportRecord::Person {
                    name: "Bob".to_string(),
                    label: ""
                },
            ]
        );
    }

    #[test]
    fn test_trailing_markers_are_dropped() {
        // rows 3 adds a disabled and an empty seat after Bob
        assert_eq!(export_records(&sample_desks(3)), export_records(&sample_desks(2)));
    }

    #[test]
    fn test_empty_layout_exports_nothing() {
        let desks = build_desks(&SeatState::new(), &GridConfig::new(2, 2));
        assert!(export_records(&desks).is_empty());
    }

    #[test]
    fn test_csv_content_format() {
        let mut buf = Vec::new();
        write_csv(&export_records(&sample_desks(2)), &mut buf).unwrap();
        let content = String::from_utf8(buf).unwrap();

        let body = content.strip_prefix(UTF8_BOM).unwrap();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines, vec!["Alice,女", DISABLED_SEAT_TOKEN, EMPTY_SEAT_TOKEN, "Bob,"]);
    }

    #[test]
    fn test_csv_reads_back_as_roster() {
        let mut buf = Vec::new();
        write_csv(&export_records(&sample_desks(2)), &mut buf).unwrap();
        let entries = parse_roster_text(&String::from_utf8(buf).unwrap()).unwrap();

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", DISABLED_SEAT_TOKEN, EMPTY_SEAT_TOKEN, "Bob"]);
        assert_eq!(entries[0].raw_gender, "女");
    }

    #[test]
    fn test_quoted_name_reads_back_unchanged() {
        let records = vec![
            ExportRecord::Person {
                name: "\"Ann".to_string(),
                label: "女",
            },
            ExportRecord::Person {
                name: "Bob".to_string(),
                label: "男",
            },
        ];
        let mut buf = Vec::new();
        write_csv(&records, &mut buf).unwrap();
        let content = String::from_utf8(buf).unwrap();
        assert_eq!(content.strip_prefix(UTF8_BOM).unwrap().lines().next(), Some("\"Ann,女"));

        let entries = parse_roster_text(&content).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["\"Ann", "Bob"]);
    }

    #[test]
    fn test_export_to_csv_with_path() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("nested");

        let path = export_to_csv_with_path(&sample_desks(2), Some(&out_dir)).unwrap();
        let filename = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(filename.starts_with("seating_"));
        assert!(filename.ends_with(".csv"));
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Alice,女"));
    }

    #[test]
    fn test_invalid_output_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file.txt");
        std::fs::write(&blocker, "x").unwrap();

        let result = export_to_csv_with_path(&sample_desks(2), Some(&blocker.join("sub")));
        assert!(matches!(result, Err(SeatingError::CreateDir { .. })));
    }
}
