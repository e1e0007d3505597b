use std::fmt;
use std::time::Duration;

/// The kind of DML statement being executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    Update,
    /// Anything else handed to an executor.
    Other,
}

impl StatementKind {
    /// Detect the statement kind from its leading keyword.
    pub fn from_sql(sql: &str) -> Self {
        let trimmed = sql.trim_start();
        if starts_with_keyword(trimmed, "INSERT") {
            StatementKind::Insert
        } else if starts_with_keyword(trimmed, "UPDATE") {
            StatementKind::Update
        } else {
            StatementKind::Other
        }
    }
}

fn starts_with_keyword(s: &str, keyword: &str) -> bool {
    match s.get(..keyword.len()) {
        Some(head) if head.eq_ignore_ascii_case(keyword) => !s[keyword.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

/// Context information about the statement being executed.
#[derive(Debug, Clone)]
pub struct StatementContext {
    /// The statement text handed to the executor.
    pub sql: String,
    /// Detected statement kind.
    pub kind: StatementKind,
}

impl StatementContext {
    pub fn new(sql: &str) -> Self {
        Self {
            sql: sql.to_string(),
            kind: StatementKind::from_sql(sql),
        }
    }
}

/// Maximum length for error messages in `StatementOutcome::Error`.
const MAX_ERROR_LEN: usize = 512;

/// Result of a statement execution, for monitoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementOutcome {
    /// Rows affected (0 when the warehouse reports no count).
    Affected(u64),
    /// Execution failed (message truncated to 512 bytes).
    Error(String),
}

impl StatementOutcome {
    /// Create an error outcome, truncating long messages.
    pub fn error(msg: String) -> Self {
        if msg.len() > MAX_ERROR_LEN {
            let truncated = super::truncate_sql_bytes(&msg, MAX_ERROR_LEN);
            Self::Error(format!("{truncated}..."))
        } else {
            Self::Error(msg)
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl fmt::Display for StatementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementOutcome::Affected(n) => write!(f, "{n} affected"),
            StatementOutcome::Error(e) => write!(f, "error: {e}"),
        }
    }
}

/// Action to take after a hook inspects a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookAction {
    /// Run the statement.
    Continue,
    /// Refuse to run the statement.
    Abort(String),
}

/// Hook into the statement execution lifecycle.
pub trait StatementHook: Send + Sync {
    /// Called before a statement is executed.
    fn before_statement(&self, ctx: &StatementContext) -> HookAction {
        let _ = ctx;
        HookAction::Continue
    }

    /// Called after a statement completes (success or failure).
    fn after_statement(
        &self,
        _ctx: &StatementContext,
        _duration: Duration,
        _outcome: &StatementOutcome,
    ) {
    }

    /// Called when a statement exceeds the slow threshold.
    fn on_slow_statement(&self, _ctx: &StatementContext, _duration: Duration) {}
}
