// tests/export_roundtrip.rs
//
// Exports read back: CSV through the loader, XLSX through calamine.
//
use std::io::Cursor;
use std::path::PathBuf;

use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};
use courtview::data::aggregate;
use courtview::data::export::{self, ExportFormat, ExportScope, SHEET_NAME};
use courtview::data::filter::{FilterCriteria, apply};
use courtview::data::loader::{load_datasets, load_file};
use courtview::data::model::{CellValue, Source, Table};

fn tmp(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("courtview_it_{}_{name}", std::process::id()));
    p
}

fn write(name: &str, contents: &str) -> PathBuf {
    let p = tmp(name);
    std::fs::write(&p, contents).unwrap();
    p
}

const REGULAR: &str = "\
Player,Team,G,MP,PTS,AST
\"Doe, John\",BOS,70,34.1,25.5,6.1
Ann Lee,LAL,65,30.0,18,4.0
Bo Kim,,12,8.5,,0.5
";

const PLAYOFFS: &str = "\
Player,Team,G,PTS
\"Doe, John\",BOS,15,28.0
";

#[test]
fn csv_export_reads_back_identically() {
    let r = write("rt_r.csv", REGULAR);
    let p = write("rt_p.csv", PLAYOFFS);
    let ds = load_datasets(&r, &p).unwrap();

    // Whole dataset, no filter, so the missing Team row survives.
    let original: &Table = &ds.regular.table;
    let out = tmp("rt_out.csv");
    std::fs::write(&out, export::to_delimited(original).unwrap()).unwrap();

    let back = load_file(&out, Source::RegularSeason).unwrap().table;
    assert_eq!(back.columns, original.columns);
    assert_eq!(back.len(), original.len());
    for (a, b) in back.rows.iter().zip(&original.rows) {
        for (x, y) in a.iter().zip(b) {
            match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => assert!((x - y).abs() < 1e-9),
                _ => assert_eq!(x, y),
            }
        }
    }
}

#[test]
fn filtered_export_drops_rows_without_team() {
    let r = write("flt_r.csv", REGULAR);
    let p = write("flt_p.csv", PLAYOFFS);
    let ds = load_datasets(&r, &p).unwrap();
    let view = apply(&ds.regular, &ds.playoffs, &FilterCriteria::default());

    let path = tmp(&ExportScope::Filtered.file_name(ExportFormat::Csv));
    export::write_export(&path, &view.table, ExportFormat::Csv).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.starts_with("Player,Team,G,MP,PTS,AST,Source"));
    assert!(!text.contains("Bo Kim"));
}

#[test]
fn spreadsheet_has_one_sheet_with_header() {
    let r = write("xl_r.csv", REGULAR);
    let p = write("xl_p.csv", PLAYOFFS);
    let ds = load_datasets(&r, &p).unwrap();
    let table = aggregate::compare_player(&ds.regular, &ds.playoffs, "Doe, John").unwrap();

    let bytes = export::to_spreadsheet(&table).unwrap();
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    let rows: Vec<&[Data]> = range.rows().collect();
    assert_eq!(rows.len(), 1 + aggregate::COMPARISON_METRICS.len());

    let header: Vec<String> = rows[0].iter().map(|c| c.to_string()).collect();
    assert_eq!(header, vec!["Stat", "Regular Season", "Playoffs"]);

    assert_eq!(rows[1][0], Data::String("PTS".into()));
    assert_eq!(rows[1][1], Data::Float(25.5));
    assert_eq!(rows[1][2], Data::Float(28.0));

    // AST exists only in the regular season file
    assert_eq!(rows[2][1], Data::Float(6.1));
    assert_eq!(rows[2][2], Data::Empty);
}

#[test]
fn top_scorers_export_keeps_player_as_first_column() {
    let r = write("top_r.csv", REGULAR);
    let p = write("top_p.csv", PLAYOFFS);
    let ds = load_datasets(&r, &p).unwrap();
    let view = apply(&ds.regular, &ds.playoffs, &FilterCriteria::default());
    let top = aggregate::top_scorers(&view, 10).unwrap();

    let text = String::from_utf8(export::to_delimited(&top).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["Player,PTS", "\"Doe, John\",25.5", "Ann Lee,18.0"]);
    assert_eq!(top.rows[1][1], CellValue::Float(18.0));
}
