//! Property-based tests for the settlement engine.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::operation::OperationType;
use crate::service::LedgerService;
use crate::store::memory::InMemoryStore;
use crate::store::{LedgerStore, NewTransaction};

/// Amounts in cents, kept small enough that sums stay well inside Decimal.
fn cents(raw: i64) -> Decimal {
    Decimal::new(raw, 2)
}

proptest! {
    /// Conservation law: the credit amount equals the sum of offsets
    /// applied to outstanding debits plus the credit's recorded balance.
    /// Debit balances never flip sign and only move toward zero.
    #[test]
    fn prop_settlement_conserves_money(
        debit_cents in proptest::collection::vec(1_i64..=100_000, 0..12),
        credit_cents in 0_i64..=1_000_000,
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime");

        rt.block_on(async {
            let store = InMemoryStore::new();
            let account = store.insert_account("12345678901").await.unwrap().id;

            let mut debit_ids = Vec::with_capacity(debit_cents.len());
            for raw in &debit_cents {
                let amount = -cents(*raw);
                let tx = store
                    .insert_transaction(NewTransaction {
                        account_id: account,
                        operation: OperationType::NormalPurchase,
                        amount,
                        balance: amount,
                    })
                    .await
                    .unwrap();
                debit_ids.push(tx.id);
            }

            let credit = cents(credit_cents);
            let service = LedgerService::new(store);
            let recorded = service
                .record_transaction(account, 4, credit)
                .await
                .unwrap();

            let total_debt: Decimal = debit_cents.iter().map(|raw| cents(*raw)).sum();
            let expected_residual = (credit - total_debt).max(Decimal::ZERO);
            prop_assert_eq!(recorded.balance, expected_residual);

            let mut remaining_debt = Decimal::ZERO;
            for (id, raw) in debit_ids.iter().zip(&debit_cents) {
                let debit = service.store.transaction(*id).unwrap().unwrap();
                // Never pushed past zero, never away from zero.
                prop_assert!(debit.balance <= Decimal::ZERO);
                prop_assert!(debit.balance >= -cents(*raw));
                remaining_debt += -debit.balance;
            }

            // Conservation: what left the debits plus the recorded residual
            // is exactly the incoming credit.
            let applied_total = total_debt - remaining_debt;
            prop_assert_eq!(credit, applied_total + recorded.balance);

            Ok(())
        })?;
    }
}
