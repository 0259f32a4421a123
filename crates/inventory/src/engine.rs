//! Batch stock-adjustment engine.
//!
//! Applies an ordered list of signed quantity deltas to an inventory
//! snapshot, all-or-nothing. Shared by spreadsheet imports, event completion,
//! and ad-hoc single transactions (a one-row batch).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use labelstock_core::{DomainError, DomainResult, LabelId};
use labelstock_ledger::{Transaction, TransactionKind};

use crate::label::LabelStock;

/// One batch line: signed deltas for a label.
///
/// Positive deltas add stock, negative deltas withdraw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentLine {
    pub label_id: LabelId,
    pub regular_delta: i64,
    pub sample_delta: i64,
}

impl AdjustmentLine {
    pub fn new(label_id: LabelId, regular_delta: i64, sample_delta: i64) -> Self {
        Self {
            label_id,
            regular_delta,
            sample_delta,
        }
    }
}

/// Result of a validated batch: the corrected snapshot and the transactions
/// to commit, in processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub inventory: BTreeMap<LabelId, LabelStock>,
    pub transactions: Vec<Transaction>,
    /// Number of input lines processed (zero-delta lines included).
    pub processed: usize,
}

/// User-facing row number for input line `index`.
///
/// Spreadsheet rows are 1-indexed and the first row is the header, so line
/// `i` is reported as row `i + 2`.
pub fn display_row(index: usize) -> usize {
    index + 2
}

/// Validate and apply a batch of adjustment lines against a snapshot.
///
/// Pure: the snapshot is cloned into a working map and the caller's state is
/// never touched. Lines are processed strictly in input order and the first
/// failure aborts the whole batch. On success, every synthesized transaction
/// corresponds to one non-zero line, in processing order; the caller commits
/// by replacing the store's mapping and prepending the transactions to the
/// ledger in reverse.
pub fn apply_batch(
    snapshot: &BTreeMap<LabelId, LabelStock>,
    lines: &[AdjustmentLine],
    now: DateTime<Utc>,
) -> DomainResult<BatchOutcome> {
    let mut working = snapshot.clone();
    let mut transactions = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let row = display_row(index);

        let Some(stock) = working.get_mut(&line.label_id) else {
            return Err(DomainError::UnknownLabel {
                row,
                label_id: line.label_id.clone(),
            });
        };

        let new_regular = stock.quantity + line.regular_delta;
        let new_sample = stock.sample_quantity + line.sample_delta;

        if new_regular < 0 {
            return Err(DomainError::InsufficientRegularStock {
                row,
                label_name: stock.name.clone(),
                attempted: -line.regular_delta,
                available: stock.quantity,
            });
        }
        if new_sample < 0 {
            return Err(DomainError::InsufficientSampleStock {
                row,
                label_name: stock.name.clone(),
                attempted: -line.sample_delta,
                available: stock.sample_quantity,
            });
        }

        stock.quantity = new_regular;
        stock.sample_quantity = new_sample;

        let regular_magnitude = line.regular_delta.abs();
        let sample_magnitude = line.sample_delta.abs();

        if regular_magnitude > 0 || sample_magnitude > 0 {
            // A line mixing a positive and a negative delta counts as a
            // withdrawal; only all-non-negative lines are additions.
            let kind = if line.regular_delta >= 0 && line.sample_delta >= 0 {
                TransactionKind::Addition
            } else {
                TransactionKind::Withdrawal
            };
            transactions.push(Transaction::new(
                line.label_id.clone(),
                stock.name.clone(),
                kind,
                regular_magnitude,
                sample_magnitude,
                now,
            ));
        }
    }

    Ok(BatchOutcome {
        inventory: working,
        transactions,
        processed: lines.len(),
    })
}

#[cfg(test)]
mod tests {
    use labelstock_core::Category;

    use super::*;

    fn snapshot(labels: Vec<LabelStock>) -> BTreeMap<LabelId, LabelStock> {
        labels
            .into_iter()
            .map(|label| (label.id.clone(), label))
            .collect()
    }

    fn label(id: &str, name: &str, quantity: i64, sample_quantity: i64) -> LabelStock {
        LabelStock::new(LabelId::new(id), name, Category::Body, quantity, sample_quantity)
    }

    fn line(id: &str, regular: i64, sample: i64) -> AdjustmentLine {
        AdjustmentLine::new(LabelId::new(id), regular, sample)
    }

    #[test]
    fn withdrawal_updates_stock_and_synthesizes_one_transaction() {
        let inventory = snapshot(vec![label("lbl-1", "Adhesive 5x5", 10, 0)]);

        let outcome = apply_batch(&inventory, &[line("lbl-1", -5, 0)], Utc::now()).unwrap();

        let updated = &outcome.inventory[&LabelId::new("lbl-1")];
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.sample_quantity, 0);

        assert_eq!(outcome.transactions.len(), 1);
        let tx = &outcome.transactions[0];
        assert_eq!(tx.kind, TransactionKind::Withdrawal);
        assert_eq!(tx.quantity, 5);
        assert_eq!(tx.sample_quantity, None);
        assert_eq!(tx.label_name, "Adhesive 5x5");
        assert_eq!(outcome.processed, 1);
    }

    #[test]
    fn overdraw_fails_with_attempted_and_available_amounts() {
        let inventory = snapshot(vec![label("lbl-1", "Thermal 10x8", 3, 0)]);

        let err = apply_batch(&inventory, &[line("lbl-1", -5, 0)], Utc::now()).unwrap_err();

        assert_eq!(
            err,
            DomainError::InsufficientRegularStock {
                row: 2,
                label_name: "Thermal 10x8".to_string(),
                attempted: 5,
                available: 3,
            }
        );
        // The caller's snapshot is untouched.
        assert_eq!(inventory[&LabelId::new("lbl-1")].quantity, 3);
    }

    #[test]
    fn sample_overdraw_fails_with_its_own_error() {
        let inventory = snapshot(vec![label("lbl-1", "Thermal 10x8", 10, 2)]);

        let err = apply_batch(&inventory, &[line("lbl-1", 0, -4)], Utc::now()).unwrap_err();

        assert_eq!(
            err,
            DomainError::InsufficientSampleStock {
                row: 2,
                label_name: "Thermal 10x8".to_string(),
                attempted: 4,
                available: 2,
            }
        );
    }

    #[test]
    fn unknown_label_aborts_with_the_offending_id() {
        let inventory = snapshot(vec![label("lbl-1", "Adhesive 5x5", 10, 0)]);

        let err = apply_batch(
            &inventory,
            &[line("lbl-1", 1, 0), line("lbl-9", 1, 0)],
            Utc::now(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::UnknownLabel {
                row: 3,
                label_id: LabelId::new("lbl-9"),
            }
        );
    }

    #[test]
    fn failure_on_line_index_i_reports_row_i_plus_2() {
        let inventory = snapshot(vec![label("lbl-1", "Adhesive 5x5", 100, 0)]);

        let first = apply_batch(&inventory, &[line("lbl-9", 1, 0)], Utc::now()).unwrap_err();
        assert!(matches!(first, DomainError::UnknownLabel { row: 2, .. }));

        let third = apply_batch(
            &inventory,
            &[line("lbl-1", 1, 0), line("lbl-1", 1, 0), line("lbl-9", 1, 0)],
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(third, DomainError::UnknownLabel { row: 4, .. }));
    }

    #[test]
    fn mixed_sign_line_is_classified_as_withdrawal() {
        let inventory = snapshot(vec![label("lbl-1", "Adhesive 5x5", 10, 10)]);

        let outcome = apply_batch(&inventory, &[line("lbl-1", 5, -2)], Utc::now()).unwrap();

        let tx = &outcome.transactions[0];
        assert_eq!(tx.kind, TransactionKind::Withdrawal);
        assert_eq!(tx.quantity, 5);
        assert_eq!(tx.sample_quantity, Some(2));
    }

    #[test]
    fn non_negative_line_is_classified_as_addition() {
        let inventory = snapshot(vec![label("lbl-1", "Adhesive 5x5", 10, 10)]);

        let outcome = apply_batch(&inventory, &[line("lbl-1", 5, 0)], Utc::now()).unwrap();

        assert_eq!(outcome.transactions[0].kind, TransactionKind::Addition);
    }

    #[test]
    fn zero_delta_line_synthesizes_no_transaction_but_counts_as_processed() {
        let inventory = snapshot(vec![label("lbl-1", "Adhesive 5x5", 10, 0)]);

        let outcome = apply_batch(
            &inventory,
            &[line("lbl-1", 0, 0), line("lbl-1", 3, 0)],
            Utc::now(),
        )
        .unwrap();

        assert_eq!(outcome.transactions.len(), 1);
        assert_eq!(outcome.processed, 2);
    }

    #[test]
    fn later_lines_see_earlier_lines_updates() {
        let inventory = snapshot(vec![label("lbl-1", "Adhesive 5x5", 0, 0)]);

        // The second line withdraws stock that only exists because the first
        // line deposited it into the working map.
        let outcome = apply_batch(
            &inventory,
            &[line("lbl-1", 10, 0), line("lbl-1", -10, 0)],
            Utc::now(),
        )
        .unwrap();

        assert_eq!(outcome.inventory[&LabelId::new("lbl-1")].quantity, 0);
        assert_eq!(outcome.transactions.len(), 2);
    }

    #[test]
    fn transactions_come_out_in_processing_order() {
        let inventory = snapshot(vec![
            label("lbl-1", "A", 10, 0),
            label("lbl-2", "B", 10, 0),
            label("lbl-3", "C", 10, 0),
        ]);

        let outcome = apply_batch(
            &inventory,
            &[line("lbl-1", 1, 0), line("lbl-2", 2, 0), line("lbl-3", 3, 0)],
            Utc::now(),
        )
        .unwrap();

        let names: Vec<&str> = outcome
            .transactions
            .iter()
            .map(|t| t.label_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        const LABEL_IDS: [&str; 4] = ["lbl-1", "lbl-2", "lbl-3", "lbl-4"];

        fn arb_inventory() -> impl Strategy<Value = BTreeMap<LabelId, LabelStock>> {
            proptest::collection::vec(0_i64..500, LABEL_IDS.len()).prop_flat_map(|quantities| {
                proptest::collection::vec(0_i64..50, LABEL_IDS.len()).prop_map(move |samples| {
                    LABEL_IDS
                        .iter()
                        .zip(quantities.iter().zip(samples.iter()))
                        .map(|(id, (&quantity, &sample))| {
                            let label = LabelStock::new(
                                LabelId::new(*id),
                                format!("Label {id}"),
                                Category::Facial,
                                quantity,
                                sample,
                            );
                            (label.id.clone(), label)
                        })
                        .collect::<BTreeMap<LabelId, LabelStock>>()
                })
            })
        }

        fn arb_lines() -> impl Strategy<Value = Vec<AdjustmentLine>> {
            proptest::collection::vec(
                (0..LABEL_IDS.len(), -200_i64..200, -40_i64..40)
                    .prop_map(|(index, regular, sample)| {
                        AdjustmentLine::new(LabelId::new(LABEL_IDS[index]), regular, sample)
                    }),
                0..12,
            )
        }

        proptest! {
            /// Success never leaves a negative quantity anywhere.
            #[test]
            fn success_preserves_non_negativity(
                inventory in arb_inventory(),
                lines in arb_lines(),
            ) {
                if let Ok(outcome) = apply_batch(&inventory, &lines, Utc::now()) {
                    for stock in outcome.inventory.values() {
                        prop_assert!(stock.quantity >= 0);
                        prop_assert!(stock.sample_quantity >= 0);
                    }
                }
            }

            /// Exactly the non-zero lines synthesize transactions, and the
            /// processed count is the input line count.
            #[test]
            fn transaction_count_matches_non_zero_lines(
                inventory in arb_inventory(),
                lines in arb_lines(),
            ) {
                if let Ok(outcome) = apply_batch(&inventory, &lines, Utc::now()) {
                    let non_zero = lines
                        .iter()
                        .filter(|l| l.regular_delta != 0 || l.sample_delta != 0)
                        .count();
                    prop_assert_eq!(outcome.transactions.len(), non_zero);
                    prop_assert_eq!(outcome.processed, lines.len());
                }
            }

            /// Failures are row-addressed within the input range, and the
            /// caller's snapshot is never mutated either way.
            #[test]
            fn failures_are_row_addressed_and_side_effect_free(
                inventory in arb_inventory(),
                lines in arb_lines(),
            ) {
                let before = inventory.clone();
                let result = apply_batch(&inventory, &lines, Utc::now());
                prop_assert_eq!(&inventory, &before);

                if let Err(err) = result {
                    let row = match err {
                        DomainError::UnknownLabel { row, .. }
                        | DomainError::InsufficientRegularStock { row, .. }
                        | DomainError::InsufficientSampleStock { row, .. } => row,
                        other => {
                            prop_assert!(false, "unexpected error variant: {other:?}");
                            unreachable!()
                        }
                    };
                    prop_assert!(row >= 2);
                    prop_assert!(row <= lines.len() + 1);
                }
            }

            /// A transaction is an addition iff both deltas of its line are
            /// non-negative.
            #[test]
            fn classification_follows_the_sign_rule(
                inventory in arb_inventory(),
                lines in arb_lines(),
            ) {
                if let Ok(outcome) = apply_batch(&inventory, &lines, Utc::now()) {
                    let non_zero: Vec<&AdjustmentLine> = lines
                        .iter()
                        .filter(|l| l.regular_delta != 0 || l.sample_delta != 0)
                        .collect();
                    for (line, tx) in non_zero.iter().zip(outcome.transactions.iter()) {
                        let expected = if line.regular_delta >= 0 && line.sample_delta >= 0 {
                            TransactionKind::Addition
                        } else {
                            TransactionKind::Withdrawal
                        };
                        prop_assert_eq!(tx.kind, expected);
                        prop_assert_eq!(tx.quantity, line.regular_delta.abs());
                    }
                }
            }
        }
    }
}
