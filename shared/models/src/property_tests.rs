//! Property-based tests for bomfetch domain models
//! 
//! Structural guarantees of `Table` construction, mode resolution and
//! tally accounting.

use proptest::option;
use proptest::prelude::*;

use crate::{DownloadMode, InvocationFailure, InvocationOutcome, InvocationSpec, ModeFlags, RunTally, Table};

prop_compose! {
    fn arb_headers()(names in prop::collection::vec("[A-Za-z ]{1,12}", 1..6)) -> Vec<String> {
        names
    }
}

prop_compose! {
    fn arb_rows()(
        rows in prop::collection::vec(
            prop::collection::vec(option::of("[A-Z0-9 ]{0,8}"), 0..8),
            0..20,
        )
    ) -> Vec<Vec<Option<String>>> {
        rows
    }
}

prop_compose! {
    fn arb_mode_flags()(
        full in any::<bool>(),
        symbol in any::<bool>(),
        footprint in any::<bool>(),
        model in any::<bool>()
    ) -> ModeFlags {
        ModeFlags { full, symbol, footprint, model }
    }
}

fn arb_outcome() -> impl Strategy<Value = InvocationOutcome> {
    prop_oneof![
        Just(InvocationOutcome::Succeeded),
        (any::<i32>(), "[a-z ]{0,20}").prop_map(|(code, stderr)| {
            InvocationOutcome::Failed(InvocationFailure::NonZeroExit {
                code: Some(code),
                stderr,
            })
        }),
    ]
}

proptest! {
    /// Every column of a built table has exactly `row_count` cells, no matter
    /// how ragged the input records are.
    #[test]
    fn property_table_columns_share_row_count(headers in arb_headers(), rows in arb_rows()) {
        let width = headers.len();
        let expected_rows = rows.len();
        let table = Table::from_rows(headers, rows);

        prop_assert_eq!(table.row_count(), expected_rows);
        prop_assert_eq!(table.columns().len(), width);
        for column in table.columns() {
            prop_assert_eq!(column.cells.len(), expected_rows);
        }
    }

    /// Cells are stored verbatim; nothing is coerced or trimmed.
    #[test]
    fn property_table_keeps_cells_verbatim(rows in arb_rows()) {
        let table = Table::from_rows(vec!["Supplier Part".to_string()], rows.clone());
        let column = table.column("Supplier Part").unwrap();

        for (row, cell) in rows.iter().zip(column.cells.iter()) {
            prop_assert_eq!(row.first().cloned().flatten(), cell.clone());
        }
    }

    /// `full` always wins, and the resolved mode token always leads the spec.
    #[test]
    fn property_mode_resolution(flags in arb_mode_flags(), overwrite in any::<bool>()) {
        let mode = flags.resolve();
        if flags.full || !(flags.symbol || flags.footprint || flags.model) {
            prop_assert_eq!(mode, DownloadMode::Full);
        }

        let spec = InvocationSpec::new(mode, overwrite, None);
        prop_assert_eq!(spec.tokens()[0].as_str(), mode.token());
        prop_assert_eq!(spec.tokens().len(), if overwrite { 2 } else { 1 });
    }

    #[test]
    fn property_tally_is_consistent(outcomes in prop::collection::vec(arb_outcome(), 0..50)) {
        let mut tally = RunTally::new();
        for outcome in &outcomes {
            tally.record(outcome);
        }

        prop_assert_eq!(tally.total, outcomes.len());
        prop_assert_eq!(tally.succeeded, outcomes.iter().filter(|o| o.is_success()).count());
        prop_assert_eq!(tally.succeeded + tally.failed(), tally.total);
    }
}
