//! Batch payment forwarder.
//!
//! Each record in a batch carries a payer's signed permit. For every record,
//! in order, the forwarder asks an [`Authorizer`] to accept the permit and then
//! a [`TokenTransfer`] to move the amount from the payer to the batch caller.
//!
//! Both steps are injected capabilities, so the loop runs the same against the
//! in-memory implementations here ([`PermitAuthorizer`], [`TokenLedger`]) and
//! the fakes in `ballot-nullables`.

pub mod authorizer;
pub mod batch;
pub mod capability;
pub mod error;
pub mod ledger;
pub mod permit;

pub use authorizer::PermitAuthorizer;
pub use batch::{BatchForwarder, BatchMode, BatchReport, RecordOutcome};
pub use capability::{Authorizer, TokenTransfer};
pub use error::ForwardError;
pub use ledger::TokenLedger;
pub use permit::{permit_digest, sign_permit, PaymentAuthorization, PermitRequest};
