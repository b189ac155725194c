use proptest::prelude::*;

use ballot_forwarder::{BatchForwarder, BatchMode, PaymentAuthorization, TokenLedger};
use ballot_nullables::{NullAuthorizer, NullClock};
use ballot_types::{AccountId, Signature, Timestamp, TokenAmount, TokenId};

const PAYERS: u8 = 4;

fn account(n: u8) -> AccountId {
    AccountId::new([n; 32])
}

fn token() -> TokenId {
    TokenId::new([0x77; 32])
}

fn caller() -> AccountId {
    account(0xCA)
}

fn ledger(balances: &[u128]) -> TokenLedger {
    let mut ledger = TokenLedger::new();
    for (n, balance) in balances.iter().enumerate() {
        let payer = account(u8::try_from(n).unwrap());
        ledger.mint(&token(), &payer, TokenAmount::new(*balance)).unwrap();
    }
    ledger
}

fn records(pulls: &[(u8, u128)]) -> Vec<PaymentAuthorization> {
    pulls
        .iter()
        .map(|&(payer, amount)| PaymentAuthorization {
            payer: account(payer),
            amount: TokenAmount::new(amount),
            deadline: Timestamp::new(100),
            token: token(),
            signature: Signature::EMPTY,
        })
        .collect()
}

fn total_supply(ledger: &TokenLedger) -> u128 {
    (0..PAYERS)
        .map(account)
        .chain([caller()])
        .map(|a| ledger.balance_of(&token(), &a).raw())
        .sum()
}

fn pulls() -> impl Strategy<Value = Vec<(u8, u128)>> {
    prop::collection::vec((0..PAYERS, 0u128..40), 0..12)
}

fn balances() -> impl Strategy<Value = Vec<u128>> {
    prop::collection::vec(0u128..60, usize::from(PAYERS))
}

proptest! {
    /// An atomic batch either moves every record's amount or nothing at all.
    #[test]
    fn atomic_batch_is_all_or_nothing(balances in balances(), pulls in pulls()) {
        let start = ledger(&balances);
        let mut forwarder =
            BatchForwarder::with_clock(NullAuthorizer::new(), start.clone(), NullClock::new(1));

        let requested: u128 = pulls.iter().map(|(_, amount)| amount).sum();
        match forwarder.forward(&caller(), &records(&pulls)) {
            Ok(report) => {
                prop_assert_eq!(report.total.raw(), requested);
                prop_assert_eq!(
                    forwarder.transfer().balance_of(&token(), &caller()).raw(),
                    requested
                );
            }
            Err(_) => prop_assert_eq!(forwarder.transfer(), &start),
        }
        prop_assert_eq!(total_supply(forwarder.transfer()), total_supply(&start));
    }

    /// Per-record mode credits the caller exactly what the report says and
    /// never overdraws a payer.
    #[test]
    fn per_record_total_matches_ledger(balances in balances(), pulls in pulls()) {
        let mut forwarder =
            BatchForwarder::with_clock(NullAuthorizer::new(), ledger(&balances), NullClock::new(1))
                .with_mode(BatchMode::PerRecord);

        let report = forwarder.forward(&caller(), &records(&pulls)).unwrap();
        prop_assert_eq!(report.outcomes.len(), pulls.len());
        prop_assert_eq!(
            report.outcomes.iter().filter(|o| o.is_forwarded()).count(),
            report.forwarded
        );
        prop_assert_eq!(
            forwarder.transfer().balance_of(&token(), &caller()),
            report.total
        );
        for (n, start) in balances.iter().enumerate() {
            let payer = account(u8::try_from(n).unwrap());
            prop_assert!(forwarder.transfer().balance_of(&token(), &payer).raw() <= *start);
        }
    }
}
