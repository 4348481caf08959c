use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use liftlog::calendar::{GRID_COLS, GRID_ROWS, build_month_grid, days_in_month, format_date, parse_date};

proptest! {
    #[test]
    fn grid_holds_every_day_in_order_from_the_first_weekday(year in 1600i32..2400, month0 in 0u32..12) {
        let grid = build_month_grid(year, month0);
        prop_assert_eq!(grid.len(), GRID_ROWS);
        prop_assert!(grid.iter().all(|row| row.len() == GRID_COLS));

        let days = days_in_month(year, month0).expect("days");
        let cells: Vec<(usize, u32)> = grid
            .iter()
            .flat_map(|row| row.iter().copied())
            .enumerate()
            .filter_map(|(i, cell)| cell.map(|d| (i, d)))
            .collect();

        let numbers: Vec<u32> = cells.iter().map(|(_, d)| *d).collect();
        prop_assert_eq!(numbers, (1..=days).collect::<Vec<_>>());

        let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1).expect("first");
        let (first_idx, _) = cells[0];
        prop_assert_eq!(first_idx, first.weekday().num_days_from_sunday() as usize);

        // Filled cells are contiguous.
        let (last_idx, _) = cells[cells.len() - 1];
        prop_assert_eq!(last_idx - first_idx + 1, days as usize);
    }

    #[test]
    fn formatted_dates_sort_chronologically(a in 0i64..200_000, b in 0i64..200_000) {
        let base = NaiveDate::from_ymd_opt(1900, 1, 1).expect("base");
        let da = base + chrono::Duration::days(a);
        let db = base + chrono::Duration::days(b);
        let sa = format_date(da.year(), da.month0(), da.day());
        let sb = format_date(db.year(), db.month0(), db.day());
        prop_assert_eq!(sa.cmp(&sb), da.cmp(&db));
        prop_assert_eq!(parse_date(&sa), Some(da));
    }
}
