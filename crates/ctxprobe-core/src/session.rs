//! Session continuity model for consecutive tool invocations.
//!
//! The external tool supports three continuity mechanisms: a caller-supplied
//! session identifier (`--session-id`), resuming its own latest conversation
//! (`--continue`), and probing for resumable state (`--resume`). A
//! [`SessionPlan`] decides which flag each step of a runner's sequence
//! carries.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session-related CLI flag attached to a single invocation.
///
/// At most one variant is ever active per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionFlag {
    /// Fully independent call; no continuity requested.
    None,

    /// Caller-generated session identifier, reused verbatim for every call
    /// in the same logical session.
    Id(String),

    /// Ask the tool to continue its most recently tracked conversation.
    Continue,

    /// Probe the tool for whatever it considers resumable.
    Resume,
}

impl SessionFlag {
    /// CLI tokens appended to the command line for this flag.
    ///
    /// This mapping is the single place flag strings are produced; call
    /// sites never interpolate flag text themselves.
    pub fn cli_args(&self) -> Vec<String> {
        match self {
            SessionFlag::None => Vec::new(),
            SessionFlag::Id(token) => vec!["--session-id".to_string(), token.clone()],
            SessionFlag::Continue => vec!["--continue".to_string()],
            SessionFlag::Resume => vec!["--resume".to_string()],
        }
    }
}

/// How consecutive invocations in one runner relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStrategy {
    /// Every invocation is independent.
    Stateless,

    /// One identifier generated up front and threaded through every call.
    PersistentId,

    /// First call starts fresh; later calls continue the tool's latest
    /// conversation.
    ContinueLatest,

    /// Exploratory: probe with a bare resume flag first, then degrade to
    /// continue-latest sequencing for the rest of the run.
    ResumeProbe,
}

/// Per-execution session state.
///
/// A plan is created at runner start and dropped when the runner finishes;
/// it never crosses runners or orchestrator runs. For [`SessionStrategy::PersistentId`]
/// the token is generated once here, before the first invocation, and reused
/// for every step.
#[derive(Debug, Clone)]
pub struct SessionPlan {
    strategy: SessionStrategy,
    token: Option<String>,
}

impl SessionPlan {
    /// Begin a session plan, generating the identifier if the strategy needs one.
    pub fn begin(strategy: SessionStrategy) -> Self {
        let token = match strategy {
            SessionStrategy::PersistentId => Some(Uuid::new_v4().to_string()),
            _ => None,
        };
        Self { strategy, token }
    }

    pub fn strategy(&self) -> SessionStrategy {
        self.strategy
    }

    /// The session token, present only for [`SessionStrategy::PersistentId`].
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Flag for the given zero-based step of this plan's sequence.
    ///
    /// Transitions only run forward: a plan never regains continuity it has
    /// given up, and `ResumeProbe` is the one strategy with a defined
    /// fallback (probe, then fresh start, then continue).
    pub fn flag_for_step(&self, step: usize) -> SessionFlag {
        match self.strategy {
            SessionStrategy::Stateless => SessionFlag::None,
            SessionStrategy::PersistentId => {
                SessionFlag::Id(self.token.clone().unwrap_or_default())
            }
            SessionStrategy::ContinueLatest => {
                if step == 0 {
                    SessionFlag::None
                } else {
                    SessionFlag::Continue
                }
            }
            SessionStrategy::ResumeProbe => match step {
                0 => SessionFlag::Resume,
                1 => SessionFlag::None,
                _ => SessionFlag::Continue,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stateless_never_sets_a_flag() {
        let plan = SessionPlan::begin(SessionStrategy::Stateless);
        for step in 0..4 {
            assert_eq!(plan.flag_for_step(step), SessionFlag::None);
        }
        assert!(plan.token().is_none());
    }

    #[test]
    fn persistent_id_reuses_the_same_token_every_step() {
        let plan = SessionPlan::begin(SessionStrategy::PersistentId);
        let token = plan.token().expect("token generated at begin").to_string();
        assert!(!token.is_empty());

        for step in 0..5 {
            assert_eq!(plan.flag_for_step(step), SessionFlag::Id(token.clone()));
        }
    }

    #[test]
    fn distinct_plans_get_distinct_tokens() {
        let a = SessionPlan::begin(SessionStrategy::PersistentId);
        let b = SessionPlan::begin(SessionStrategy::PersistentId);
        assert_ne!(a.token(), b.token());
    }

    #[test]
    fn continue_latest_starts_fresh_then_continues() {
        let plan = SessionPlan::begin(SessionStrategy::ContinueLatest);
        assert_eq!(plan.flag_for_step(0), SessionFlag::None);
        assert_eq!(plan.flag_for_step(1), SessionFlag::Continue);
        assert_eq!(plan.flag_for_step(2), SessionFlag::Continue);
    }

    #[test]
    fn resume_probe_degrades_to_continue_latest() {
        let plan = SessionPlan::begin(SessionStrategy::ResumeProbe);
        assert_eq!(plan.flag_for_step(0), SessionFlag::Resume);
        assert_eq!(plan.flag_for_step(1), SessionFlag::None);
        assert_eq!(plan.flag_for_step(2), SessionFlag::Continue);
        assert_eq!(plan.flag_for_step(3), SessionFlag::Continue);
    }

    #[test]
    fn cli_args_mapping() {
        assert!(SessionFlag::None.cli_args().is_empty());
        assert_eq!(
            SessionFlag::Id("abc-123".to_string()).cli_args(),
            vec!["--session-id", "abc-123"]
        );
        assert_eq!(SessionFlag::Continue.cli_args(), vec!["--continue"]);
        assert_eq!(SessionFlag::Resume.cli_args(), vec!["--resume"]);
    }
}
