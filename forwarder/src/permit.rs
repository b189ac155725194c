//! Payment authorizations and the digest their signatures cover.

use ballot_crypto::{blake2b_256_multi, sign_message};
use ballot_types::{AccountId, KeyPair, Signature, Timestamp, TokenAmount, TokenId};
use serde::{Deserialize, Serialize};

/// Domain tag mixed into every permit digest.
const PERMIT_DOMAIN: &[u8] = b"ballot/permit/v1";

/// One record of a batch: the payer's signed promise to let the batch caller
/// pull `amount` of `token` before `deadline`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentAuthorization {
    pub payer: AccountId,
    pub amount: TokenAmount,
    pub deadline: Timestamp,
    pub token: TokenId,
    pub signature: Signature,
}

/// What the authorizer is asked to accept for one record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermitRequest {
    pub owner: AccountId,
    /// The account allowed to spend: always the caller of the batch.
    pub spender: AccountId,
    pub amount: TokenAmount,
    pub deadline: Timestamp,
    pub token: TokenId,
    pub signature: Signature,
}

impl PermitRequest {
    pub fn new(record: &PaymentAuthorization, spender: &AccountId) -> Self {
        Self {
            owner: record.payer,
            spender: *spender,
            amount: record.amount,
            deadline: record.deadline,
            token: record.token,
            signature: record.signature.clone(),
        }
    }
}

/// The 32-byte message a payer signs to authorize one permit.
pub fn permit_digest(
    token: &TokenId,
    owner: &AccountId,
    spender: &AccountId,
    amount: TokenAmount,
    nonce: u64,
    deadline: Timestamp,
) -> [u8; 32] {
    blake2b_256_multi(&[
        PERMIT_DOMAIN,
        token.as_bytes(),
        owner.as_bytes(),
        spender.as_bytes(),
        &amount.to_le_bytes(),
        &nonce.to_le_bytes(),
        &deadline.as_secs().to_le_bytes(),
    ])
}

/// Sign a permit as `payer` for `spender`, using the payer's current `nonce`.
pub fn sign_permit(
    payer: &KeyPair,
    token: TokenId,
    spender: &AccountId,
    amount: TokenAmount,
    nonce: u64,
    deadline: Timestamp,
) -> PaymentAuthorization {
    let digest = permit_digest(&token, &payer.account, spender, amount, nonce, deadline);
    PaymentAuthorization {
        payer: payer.account,
        amount,
        deadline,
        token,
        signature: sign_message(&digest, &payer.private),
    }
}
