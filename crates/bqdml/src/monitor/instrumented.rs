use super::config::MonitorConfig;
use super::types::{HookAction, StatementContext, StatementHook, StatementOutcome};
use crate::error::{DmlError, DmlResult};
use crate::executor::Executor;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// An [`Executor`] wrapper that runs hooks, enforces a timeout and reports
/// slow statements.
///
/// Hooks run in the order they were added.
pub struct InstrumentedExecutor<E> {
    inner: E,
    hooks: Vec<Arc<dyn StatementHook>>,
    config: MonitorConfig,
}

impl<E: Executor> InstrumentedExecutor<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            hooks: Vec::new(),
            config: MonitorConfig::default(),
        }
    }

    /// Set the monitor configuration.
    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a hook.
    pub fn with_hook<H: StatementHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.push(Arc::new(hook));
        self
    }

    /// Add a hook from an Arc (e.g. a [`super::StatsHook`] you keep a handle to).
    pub fn with_hook_arc(mut self, hook: Arc<dyn StatementHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    /// Set the statement timeout.
    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.config.statement_timeout = Some(timeout);
        self
    }

    /// Set the slow statement threshold.
    pub fn with_slow_statement_threshold(mut self, threshold: Duration) -> Self {
        self.config.slow_statement_threshold = Some(threshold);
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }

    fn apply_hooks(&self, ctx: &StatementContext) -> DmlResult<()> {
        for hook in &self.hooks {
            if let HookAction::Abort(reason) = hook.before_statement(ctx) {
                return Err(DmlError::Aborted(reason));
            }
        }
        Ok(())
    }

    fn report(&self, ctx: &StatementContext, duration: Duration, outcome: &StatementOutcome) {
        for hook in &self.hooks {
            hook.after_statement(ctx, duration, outcome);
        }

        if let Some(threshold) = self.config.slow_statement_threshold {
            if duration >= threshold {
                for hook in &self.hooks {
                    hook.on_slow_statement(ctx, duration);
                }
            }
        }
    }

    async fn execute_with_timeout(&self, sql: &str) -> DmlResult<Option<u64>> {
        match self.config.statement_timeout {
            Some(timeout) => {
                let future = self.inner.execute(sql);
                tokio::pin!(future);
                tokio::select! {
                    result = &mut future => result,
                    _ = tokio::time::sleep(timeout) => Err(DmlError::Timeout(timeout)),
                }
            }
            None => self.inner.execute(sql).await,
        }
    }
}

impl<E: Executor> Executor for InstrumentedExecutor<E> {
    async fn execute(&self, statement: &str) -> DmlResult<Option<u64>> {
        let ctx = StatementContext::new(statement);
        self.apply_hooks(&ctx)?;

        let start = Instant::now();
        let result = self.execute_with_timeout(statement).await;
        let duration = start.elapsed();

        let outcome = match &result {
            Ok(affected) => StatementOutcome::Affected(affected.unwrap_or(0)),
            Err(DmlError::Timeout(d)) => StatementOutcome::Error(format!("timeout after {d:?}")),
            Err(e) => StatementOutcome::error(e.to_string()),
        };

        self.report(&ctx, duration, &outcome);
        result
    }
}
