//! TOML session files.

use anyhow::Context;
use ballot_crypto::account_from_name;
use ballot_types::AccountId;
use ballot_utils::LogFormat;
use ballot_voting::{Operation, ProposalIndex};
use serde::Deserialize;
use std::path::Path;

fn default_log_level() -> String {
    "info".to_string()
}

/// A scripted voting session: who chairs, what is on the ballot, and the
/// operations to submit in order.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    pub chairperson: String,
    pub proposals: Vec<String>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One submitted operation. `caller` and `to` are account names or
/// `acct_<hex>` identities.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Step {
    pub caller: String,
    #[serde(flatten)]
    pub action: StepAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StepAction {
    GrantRight { to: String },
    Delegate { to: String },
    Vote { proposal: ProposalIndex },
    Close,
}

impl SessionConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading session file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing session file {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn chairperson_account(&self) -> anyhow::Result<AccountId> {
        resolve_account(&self.chairperson)
    }

    /// Resolve every step to `(caller, operation)`.
    pub fn operations(&self) -> anyhow::Result<Vec<(AccountId, Operation)>> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| step.resolve().with_context(|| format!("step {index}")))
            .collect()
    }
}

impl Step {
    fn resolve(&self) -> anyhow::Result<(AccountId, Operation)> {
        let caller = resolve_account(&self.caller)?;
        let op = match &self.action {
            StepAction::GrantRight { to } => Operation::GrantRight {
                to: resolve_account(to)?,
            },
            StepAction::Delegate { to } => Operation::Delegate {
                to: resolve_account(to)?,
            },
            StepAction::Vote { proposal } => Operation::Vote {
                proposal: *proposal,
            },
            StepAction::Close => Operation::Close,
        };
        Ok((caller, op))
    }
}

/// Map a name to its deterministic account, or parse an `acct_<hex>` identity.
pub fn resolve_account(name: &str) -> anyhow::Result<AccountId> {
    if name.starts_with(AccountId::PREFIX) {
        return name
            .parse()
            .with_context(|| format!("invalid account identity {name:?}"));
    }
    anyhow::ensure!(!name.trim().is_empty(), "account name must not be empty");
    Ok(account_from_name(name).account)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = r#"
chairperson = "chair"
proposals = ["alpha", "beta"]

[[steps]]
caller = "chair"
op = "grant_right"
to = "bob"

[[steps]]
caller = "bob"
op = "delegate"
to = "chair"

[[steps]]
caller = "chair"
op = "vote"
proposal = 1

[[steps]]
caller = "chair"
op = "close"
"#;

    #[test]
    fn parses_steps_and_defaults() {
        let config = SessionConfig::parse(SESSION).unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.proposals, vec!["alpha", "beta"]);
        assert_eq!(config.steps.len(), 4);
        assert_eq!(
            config.steps[0],
            Step {
                caller: "chair".to_string(),
                action: StepAction::GrantRight {
                    to: "bob".to_string()
                },
            }
        );
        assert_eq!(config.steps[3].action, StepAction::Close);
    }

    #[test]
    fn resolves_names_consistently() {
        let config = SessionConfig::parse(SESSION).unwrap();
        let ops = config.operations().unwrap();
        let chair = config.chairperson_account().unwrap();
        let bob = resolve_account("bob").unwrap();

        assert_eq!(ops[0], (chair, Operation::GrantRight { to: bob }));
        assert_eq!(ops[1], (bob, Operation::Delegate { to: chair }));
        assert_eq!(ops[2], (chair, Operation::Vote { proposal: 1 }));
    }

    #[test]
    fn accepts_explicit_identities() {
        let id = AccountId::new([0xAB; 32]);
        assert_eq!(resolve_account(&id.to_string()).unwrap(), id);
        assert!(resolve_account("acct_zz").is_err());
        assert!(resolve_account("  ").is_err());
    }

    #[test]
    fn rejects_unknown_op() {
        let text = r#"
chairperson = "chair"
proposals = ["a"]

[[steps]]
caller = "chair"
op = "abstain"
"#;
        assert!(SessionConfig::parse(text).is_err());
    }

    #[test]
    fn json_log_format_parses() {
        let text = r#"
log_level = "debug"
log_format = "json"
chairperson = "chair"
proposals = ["a"]
"#;
        let config = SessionConfig::parse(text).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_level, "debug");
        assert!(config.steps.is_empty());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = SessionConfig::load(Path::new("/nonexistent/session.toml")).unwrap_err();
        assert!(err.to_string().contains("reading session file"));
    }
}
