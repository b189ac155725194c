#![no_main]

use libfuzzer_sys::fuzz_target;

use ballot_voting::{Ballot, BallotSnapshot};

// Restoring a ballot from arbitrary bytes must never panic, and anything
// that loads must satisfy the same invariants as a live ballot.
fuzz_target!(|data: &[u8]| {
    let _ = bincode::deserialize::<BallotSnapshot>(data);

    if let Ok(ballot) = Ballot::load_state(data) {
        assert!(ballot.is_conserved());
        let _ = ballot.winning_proposal();
        let _ = ballot.winner_label();
        for (account, _) in ballot.registry().voters() {
            assert!(ballot.resolve_delegate(account).is_ok());
        }
    }
});
