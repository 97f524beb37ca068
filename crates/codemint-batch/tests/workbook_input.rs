use codemint_batch::{read_requests, run_batch, Cell, CodeService, RequestRow, SkipReason};
use codemint_generator::RandomGenerator;
use codemint_storage::{MemoryRegistry, MemoryStore};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn text(s: &str) -> Cell {
    Cell::Text(s.to_owned())
}

#[test]
fn workbook_header_is_skipped() {
    let rows = read_requests(&fixture("requests_header.xlsx")).unwrap();

    // Spreadsheet numbers arrive as floats.
    assert_eq!(
        rows,
        vec![
            RequestRow::new(2, vec![text("ABC"), Cell::Float(100.0)]),
            RequestRow::new(3, vec![text("xyz"), Cell::Float(5.0)]),
        ]
    );
    assert_eq!(rows[0].quantity().map(Cell::to_quantity), Some(100));
}

#[test]
fn headerless_workbook_keeps_first_row() {
    let rows = read_requests(&fixture("requests_headerless.xlsx")).unwrap();

    assert_eq!(
        rows,
        vec![
            RequestRow::new(1, vec![text("ABC"), Cell::Float(100.0)]),
            RequestRow::new(2, vec![text("DEF"), Cell::Float(3.0)]),
        ]
    );
}

#[test]
fn offset_sheet_keeps_sheet_rows_and_columns() {
    let rows = read_requests(&fixture("requests_offset.xlsx")).unwrap();

    assert_eq!(
        rows,
        vec![
            RequestRow::new(1, vec![]),
            RequestRow::new(2, vec![Cell::Empty, text("ABC"), Cell::Float(5.0)]),
            RequestRow::new(3, vec![Cell::Empty, text("DEF"), Cell::Float(7.0)]),
        ]
    );
}

#[test]
fn offset_sheet_rows_are_skipped_not_shifted() {
    let rows = read_requests(&fixture("requests_offset.xlsx")).unwrap();
    let service = CodeService::builder()
        .registry(MemoryRegistry::new())
        .store(MemoryStore::new())
        .build();

    let report = run_batch(&rows, &service, &mut RandomGenerator::seeded(12), None);

    assert_eq!(report.rows_processed(), 0);
    let skipped: Vec<_> = report.skipped().collect();
    assert_eq!(skipped.len(), 3);
    assert!(matches!(skipped[0], (1, SkipReason::MissingColumns { found: 0 })));
    assert!(matches!(skipped[1], (2, SkipReason::Invalid { .. })));
    assert!(service.store().is_empty());
}

#[test]
fn workbook_batch_issues_codes() {
    let rows = read_requests(&fixture("requests_header.xlsx")).unwrap();
    let service = CodeService::builder()
        .registry(MemoryRegistry::new())
        .store(MemoryStore::new())
        .build();

    let report = run_batch(&rows, &service, &mut RandomGenerator::seeded(13), None);

    assert_eq!(report.rows_processed(), 2);
    assert_eq!(service.store().batch("ABC.csv").unwrap().len(), 100);
    assert_eq!(service.store().batch("XYZ.csv").unwrap().len(), 5);
}
