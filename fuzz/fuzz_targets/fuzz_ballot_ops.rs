#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ballot_types::AccountId;
use ballot_voting::{Ballot, Operation};

#[derive(Arbitrary, Debug)]
enum FuzzOp {
    Grant { caller: u8, to: u8 },
    Delegate { caller: u8, to: u8 },
    Vote { caller: u8, proposal: u8 },
    Close { caller: u8 },
}

// Small account space so delegation chains and cycles actually form.
fn account(n: u8) -> AccountId {
    AccountId::new([n % 16; 32])
}

// Apply arbitrary operation sequences. Whatever is accepted or rejected,
// weight must stay conserved and no delegation chain may loop.
fuzz_target!(|ops: Vec<FuzzOp>| {
    let Ok(mut ballot) = Ballot::with_text_labels(account(0), &["a", "b", "c", "d"]) else {
        return;
    };

    for op in ops.iter().take(512) {
        let (caller, op) = match *op {
            FuzzOp::Grant { caller, to } => {
                (account(caller), Operation::GrantRight { to: account(to) })
            }
            FuzzOp::Delegate { caller, to } => {
                (account(caller), Operation::Delegate { to: account(to) })
            }
            FuzzOp::Vote { caller, proposal } => (
                account(caller),
                Operation::Vote {
                    proposal: usize::from(proposal % 6),
                },
            ),
            FuzzOp::Close { caller } => (account(caller), Operation::Close),
        };
        let before = ballot.snapshot();
        if ballot.apply(&caller, &op).is_err() {
            assert_eq!(ballot.snapshot(), before, "rejected {} changed state", op.name());
        }
        assert!(ballot.is_conserved());
    }

    for n in 0..16 {
        assert!(ballot.resolve_delegate(&account(n)).is_ok());
    }
});
