//! Replaying a session against a fresh ballot and reporting the result.

use crate::config::SessionConfig;
use anyhow::Context;
use ballot_types::AccountId;
use ballot_voting::{Ballot, BallotError, Operation, ProposalIndex, SharedBallot, TallyRow};
use serde::Serialize;
use std::collections::BTreeMap;

/// A step the ballot refused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedStep {
    pub index: usize,
    pub op: &'static str,
    pub error: String,
}

pub struct SessionOutcome {
    pub ballot: Ballot,
    pub applied: usize,
    pub rejected: Vec<RejectedStep>,
}

fn open_ballot(config: &SessionConfig) -> anyhow::Result<Ballot> {
    let chairperson = config.chairperson_account()?;
    Ballot::with_text_labels(chairperson, &config.proposals).context("opening ballot")
}

fn reject(index: usize, op: &Operation, error: &BallotError) -> RejectedStep {
    tracing::warn!(step = index, op = op.name(), %error, "step rejected");
    RejectedStep {
        index,
        op: op.name(),
        error: error.to_string(),
    }
}

/// Apply every step in file order. With `strict`, the first rejected step
/// ends the session with an error.
pub fn replay(config: &SessionConfig, strict: bool) -> anyhow::Result<SessionOutcome> {
    let mut ballot = open_ballot(config)?;
    let mut applied = 0;
    let mut rejected = Vec::new();

    for (index, (caller, op)) in config.operations()?.into_iter().enumerate() {
        match ballot.apply(&caller, &op) {
            Ok(()) => applied += 1,
            Err(err) if strict => {
                return Err(err).with_context(|| format!("step {index} ({})", op.name()));
            }
            Err(err) => rejected.push(reject(index, &op, &err)),
        }
    }

    Ok(SessionOutcome {
        ballot,
        applied,
        rejected,
    })
}

/// Submit each caller's steps from its own task against one shared ballot.
///
/// Steps from the same caller keep their file order; steps from different
/// callers interleave in whatever order the tasks reach the lock.
pub async fn replay_concurrent(
    config: &SessionConfig,
    strict: bool,
) -> anyhow::Result<SessionOutcome> {
    let shared = SharedBallot::new(open_ballot(config)?);

    let mut by_caller: BTreeMap<AccountId, Vec<(usize, Operation)>> = BTreeMap::new();
    for (index, (caller, op)) in config.operations()?.into_iter().enumerate() {
        by_caller.entry(caller).or_default().push((index, op));
    }

    let mut tasks = tokio::task::JoinSet::new();
    for (caller, steps) in by_caller {
        let shared = shared.clone();
        tasks.spawn(async move {
            let mut results = Vec::with_capacity(steps.len());
            for (index, op) in steps {
                let result = shared.apply(&caller, &op);
                results.push((index, op, result));
                tokio::task::yield_now().await;
            }
            results
        });
    }

    let mut results = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        results.extend(joined.context("submitter task failed")?);
    }
    results.sort_by_key(|(index, _, _)| *index);

    let mut applied = 0;
    let mut rejected = Vec::new();
    for (index, op, result) in results {
        match result {
            Ok(()) => applied += 1,
            Err(err) => rejected.push(reject(index, &op, &err)),
        }
    }
    if strict {
        if let Some(first) = rejected.first() {
            anyhow::bail!("step {} ({}) rejected: {}", first.index, first.op, first.error);
        }
    }

    Ok(SessionOutcome {
        ballot: shared.read(Ballot::clone),
        applied,
        rejected,
    })
}

/// What the CLI prints after a run or an inspection.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub winner: ProposalIndex,
    pub winner_label: String,
    pub turnout: u64,
    pub closed: bool,
    pub conserved: bool,
    pub tally: Vec<TallyRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedStep>,
}

impl Report {
    pub fn for_ballot(ballot: &Ballot) -> Self {
        Self {
            winner: ballot.winning_proposal(),
            winner_label: ballot.winner_label().text(),
            turnout: ballot.turnout().raw(),
            closed: ballot.is_closed(),
            conserved: ballot.is_conserved(),
            tally: ballot.tally(),
            applied: None,
            rejected: Vec::new(),
        }
    }

    pub fn for_session(outcome: &SessionOutcome) -> Self {
        Self {
            applied: Some(outcome.applied),
            rejected: outcome.rejected.clone(),
            ..Self::for_ballot(&outcome.ballot)
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in &self.tally {
            let marker = if row.index == self.winner { '*' } else { ' ' };
            out.push_str(&format!(
                "{marker} [{}] {:<32} {}\n",
                row.index, row.label, row.vote_count
            ));
        }
        out.push_str(&format!(
            "winner: {} ({}), turnout {}{}\n",
            self.winner,
            self.winner_label,
            self.turnout,
            if self.closed { ", closed" } else { "" }
        ));
        if let Some(applied) = self.applied {
            out.push_str(&format!(
                "steps: {applied} applied, {} rejected\n",
                self.rejected.len()
            ));
        }
        for step in &self.rejected {
            out.push_str(&format!("  step {} {}: {}\n", step.index, step.op, step.error));
        }
        out
    }
}
