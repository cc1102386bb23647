//! Property-based tests for the ledger service.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::service::LedgerService;
use super::types::{BankAccount, Operation, OperationKind};

/// (is income, amount in cents, day of year)
fn raw_operation() -> impl Strategy<Value = (bool, i64, u32)> {
    (any::<bool>(), 1i64..10_000_000, 1u32..=365)
}

fn build(account: &BankAccount, raw: &[(bool, i64, u32)]) -> Vec<Operation> {
    raw.iter()
        .map(|&(income, cents, day)| {
            let kind = if income {
                OperationKind::Income
            } else {
                OperationKind::Expense
            };
            let date = NaiveDate::from_yo_opt(2024, day).unwrap();
            Operation::new(account.id, kind, Decimal::new(cents, 2), "000", date)
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The statement's last running balance is the account balance.
    #[test]
    fn prop_statement_ends_on_balance(
        initial in -1_000_000i64..1_000_000,
        raw in prop::collection::vec(raw_operation(), 0..30),
    ) {
        let account = BankAccount::new("Courant", Decimal::new(initial, 2));
        let ops = build(&account, &raw);

        let statement = LedgerService::statement(&account, &ops);
        let balance = LedgerService::balance(&account, &ops);

        let last = statement
            .lines
            .last()
            .map_or(account.initial_balance, |l| l.running.current_balance);
        prop_assert_eq!(last, balance.balance);
        prop_assert_eq!(
            balance.balance,
            balance.initial + balance.income_total - balance.expense_total
        );
    }

    /// Statement lines are in non-decreasing date order.
    #[test]
    fn prop_statement_sorted_by_date(
        raw in prop::collection::vec(raw_operation(), 0..30),
    ) {
        let account = BankAccount::new("Courant", Decimal::ZERO);
        let ops = build(&account, &raw);

        let statement = LedgerService::statement(&account, &ops);

        prop_assert_eq!(statement.lines.len(), ops.len());
        for pair in statement.lines.windows(2) {
            prop_assert!(pair[0].operation.date <= pair[1].operation.date);
            prop_assert_eq!(pair[1].running.previous_balance, pair[0].running.current_balance);
        }
    }

    /// Only strictly positive amounts on known accounts validate.
    #[test]
    fn prop_validate_rejects_non_positive(cents in -1_000_000i64..=0) {
        let account = BankAccount::new("Courant", Decimal::ZERO);
        let op = Operation::new(
            account.id,
            OperationKind::Income,
            Decimal::new(cents, 2),
            "701",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        prop_assert!(LedgerService::validate_operation(&op, |_| true).is_err());
    }
}
