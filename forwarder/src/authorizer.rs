//! Signature-checking authorizer with per-owner nonces.

use crate::capability::Authorizer;
use crate::error::ForwardError;
use crate::permit::{permit_digest, PermitRequest};
use ballot_crypto::verify_signature;
use ballot_types::{AccountId, Timestamp, TokenId};
use std::collections::HashMap;

/// Accepts a permit when it is unexpired and signed by its owner over the
/// owner's current nonce for that token. Each accepted permit consumes the
/// nonce, so a record cannot be replayed.
#[derive(Clone, Debug, Default)]
pub struct PermitAuthorizer {
    nonces: HashMap<(TokenId, AccountId), u64>,
}

impl PermitAuthorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The nonce the next permit from `owner` on `token` must be signed with.
    pub fn nonce(&self, token: &TokenId, owner: &AccountId) -> u64 {
        self.nonces.get(&(*token, *owner)).copied().unwrap_or(0)
    }
}

impl Authorizer for PermitAuthorizer {
    fn authorize(&mut self, request: &PermitRequest, now: Timestamp) -> Result<(), ForwardError> {
        if request.deadline.is_before(now) {
            return Err(ForwardError::Expired {
                deadline: request.deadline,
                now,
            });
        }

        let nonce = self.nonce(&request.token, &request.owner);
        let digest = permit_digest(
            &request.token,
            &request.owner,
            &request.spender,
            request.amount,
            nonce,
            request.deadline,
        );
        if !verify_signature(&digest, &request.signature, &request.owner) {
            return Err(ForwardError::InvalidSignature);
        }

        let next = nonce.checked_add(1).ok_or(ForwardError::Overflow)?;
        self.nonces.insert((request.token, request.owner), next);
        Ok(())
    }

    fn name(&self) -> &str {
        "permit"
    }
}
