//! Fuzz the table parser: arbitrary bytes must never panic, and every
//! accepted table must satisfy the validation invariants.

#![no_main]

use libfuzzer_sys::fuzz_target;
use skein_core::TableParser;

fuzz_target!(|data: &[u8]| {
    let parser = TableParser::new().max_records(4096);
    let Ok(table) = parser.parse(data) else {
        return;
    };

    // Accepted tables are rectangular, headed, and free of blank cells.
    assert!(table.row_count() >= 1);
    assert!(table.column_count() >= 2);

    let mut seen = std::collections::HashSet::new();
    for column in table.header() {
        assert_eq!(column, column.trim());
        assert!(!column.is_empty());
        assert!(seen.insert(column.as_str()), "duplicate header survived");
    }

    for row in table.rows() {
        assert_eq!(row.len(), table.column_count());
        for cell in row {
            assert_eq!(cell, cell.trim());
            assert!(!cell.is_empty());
        }
    }
});
