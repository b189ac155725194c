//! The forwarding loop.

use crate::capability::{Authorizer, TokenTransfer};
use crate::error::ForwardError;
use crate::permit::{PaymentAuthorization, PermitRequest};
use ballot_types::{AccountId, Clock, SystemClock, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

/// How a failing record affects the rest of its batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchMode {
    /// Any failing record aborts the batch and nothing is committed.
    #[default]
    Atomic,
    /// Each record commits or fails on its own; failures are reported.
    PerRecord,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    Forwarded {
        payer: AccountId,
        amount: TokenAmount,
    },
    Failed {
        payer: AccountId,
        error: ForwardError,
    },
}

impl RecordOutcome {
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Self::Forwarded { .. })
    }
}

/// Summary of one batch. `outcomes` has one entry per input record, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub forwarded: usize,
    pub total: TokenAmount,
    pub outcomes: Vec<RecordOutcome>,
}

/// Pulls signed payments from many payers to the batch caller.
pub struct BatchForwarder<A, T, C = SystemClock> {
    authorizer: A,
    transfer: T,
    clock: C,
    mode: BatchMode,
}

impl<A: Authorizer, T: TokenTransfer> BatchForwarder<A, T> {
    pub fn new(authorizer: A, transfer: T) -> Self {
        Self::with_clock(authorizer, transfer, SystemClock)
    }
}

impl<A: Authorizer, T: TokenTransfer, C: Clock> BatchForwarder<A, T, C> {
    pub fn with_clock(authorizer: A, transfer: T, clock: C) -> Self {
        Self {
            authorizer,
            transfer,
            clock,
            mode: BatchMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: BatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    pub fn authorizer(&self) -> &A {
        &self.authorizer
    }

    pub fn transfer(&self) -> &T {
        &self.transfer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Forward `records` to `caller`, reading the deadline reference from the clock.
    pub fn forward(
        &mut self,
        caller: &AccountId,
        records: &[PaymentAuthorization],
    ) -> Result<BatchReport, ForwardError> {
        let now = self.clock.now();
        self.forward_at(caller, records, now)
    }

    /// Forward `records` to `caller` as of `now`.
    ///
    /// In [`BatchMode::Atomic`] the first failing record is returned as
    /// `ForwardError::Record` and neither capability keeps any change.
    pub fn forward_at(
        &mut self,
        caller: &AccountId,
        records: &[PaymentAuthorization],
        now: Timestamp,
    ) -> Result<BatchReport, ForwardError> {
        let report = match self.mode {
            BatchMode::Atomic => self.forward_atomic(caller, records, now)?,
            BatchMode::PerRecord => self.forward_each(caller, records, now)?,
        };
        tracing::info!(
            caller = %caller.short(),
            records = records.len(),
            forwarded = report.forwarded,
            total = %report.total,
            authorizer = self.authorizer.name(),
            transfer = self.transfer.name(),
            "batch forwarded"
        );
        Ok(report)
    }

    fn forward_atomic(
        &mut self,
        caller: &AccountId,
        records: &[PaymentAuthorization],
        now: Timestamp,
    ) -> Result<BatchReport, ForwardError> {
        let mut authorizer = self.authorizer.clone();
        let mut transfer = self.transfer.clone();
        let mut report = BatchReport::default();

        for (index, record) in records.iter().enumerate() {
            forward_one(&mut authorizer, &mut transfer, caller, record, now)
                .and_then(|()| report.add_forwarded(record))
                .map_err(|err| {
                    tracing::warn!(
                        index,
                        payer = %record.payer.short(),
                        error = %err,
                        "batch aborted"
                    );
                    ForwardError::Record {
                        index,
                        source: Box::new(err),
                    }
                })?;
        }

        self.authorizer = authorizer;
        self.transfer = transfer;
        Ok(report)
    }

    fn forward_each(
        &mut self,
        caller: &AccountId,
        records: &[PaymentAuthorization],
        now: Timestamp,
    ) -> Result<BatchReport, ForwardError> {
        let mut report = BatchReport::default();

        for (index, record) in records.iter().enumerate() {
            let mut authorizer = self.authorizer.clone();
            let mut transfer = self.transfer.clone();
            let total = forward_one(&mut authorizer, &mut transfer, caller, record, now)
                .and_then(|()| {
                    report
                        .total
                        .checked_add(record.amount)
                        .ok_or(ForwardError::Overflow)
                });
            match total {
                Ok(total) => {
                    self.authorizer = authorizer;
                    self.transfer = transfer;
                    report.total = total;
                    report.forwarded += 1;
                    report.outcomes.push(RecordOutcome::Forwarded {
                        payer: record.payer,
                        amount: record.amount,
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        index,
                        payer = %record.payer.short(),
                        error = %error,
                        "record skipped"
                    );
                    report.outcomes.push(RecordOutcome::Failed {
                        payer: record.payer,
                        error,
                    });
                }
            }
        }
        Ok(report)
    }
}

impl BatchReport {
    fn add_forwarded(&mut self, record: &PaymentAuthorization) -> Result<(), ForwardError> {
        self.total = self
            .total
            .checked_add(record.amount)
            .ok_or(ForwardError::Overflow)?;
        self.forwarded += 1;
        self.outcomes.push(RecordOutcome::Forwarded {
            payer: record.payer,
            amount: record.amount,
        });
        Ok(())
    }
}

fn forward_one<A: Authorizer, T: TokenTransfer>(
    authorizer: &mut A,
    transfer: &mut T,
    caller: &AccountId,
    record: &PaymentAuthorization,
    now: Timestamp,
) -> Result<(), ForwardError> {
    authorizer.authorize(&PermitRequest::new(record, caller), now)?;
    transfer.transfer_from(&record.token, &record.payer, caller, record.amount)
}
