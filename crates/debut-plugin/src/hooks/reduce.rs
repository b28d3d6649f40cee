//! Ordered reduction of one hook call across plugins.
//!
//! - Plugins are visited strictly in registration order, one at a time.
//!   The next handler starts only after the previous one resolved.
//! - A failing handler aborts the reduction; later plugins are not called.
//! - With `stop_on_skip`, the first [`HookAction::Skip`] ends the reduction
//!   and is reported in the [`ReduceOutcome`].
//!
//! Synchronous hooks use the same loop with steps that are already
//! resolved, so the future completes on its first poll.

use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;
use tracing::{debug, error, info, warn};

use debut_core::error::{AppError, ErrorKind};
use debut_core::result::AppResult;

use super::definitions::{HookAction, PluginHook};
use crate::registry::Plugin;

/// Per-call reduction settings.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ReducePolicy {
    /// End the reduction at the first skip.
    pub(crate) stop_on_skip: bool,
    /// Warn about handlers slower than this.
    pub(crate) slow_handler_warn: Option<Duration>,
}

/// What a reduction did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReduceOutcome {
    /// Number of plugins whose handler ran to completion.
    pub invoked: usize,
    /// Plugins whose handler exceeded the slow-handler limit.
    pub slow_handlers: Vec<String>,
    /// Plugin that vetoed, if any.
    pub skipped_by: Option<String>,
    /// Reason given by the vetoing plugin.
    pub reason: Option<String>,
}

impl ReduceOutcome {
    /// Returns whether a plugin asked the engine to skip the action.
    pub fn is_skip(&self) -> bool {
        self.skipped_by.is_some()
    }
}

fn is_slow(elapsed: Duration, limit: Option<Duration>) -> bool {
    limit.is_some_and(|limit| elapsed > limit)
}

/// Runs `step` for every plugin in order, applying `policy`.
pub(crate) async fn reduce<'a, F>(
    hook: PluginHook,
    plugins: &'a [Arc<dyn Plugin>],
    policy: ReducePolicy,
    mut step: F,
) -> AppResult<ReduceOutcome>
where
    F: FnMut(&'a dyn Plugin) -> BoxFuture<'a, AppResult<HookAction>>,
{
    let mut outcome = ReduceOutcome::default();

    if plugins.is_empty() {
        return Ok(outcome);
    }

    debug!(hook = %hook, handler_count = plugins.len(), "Reducing hook");

    for plugin in plugins {
        let name = plugin.name();
        let started = Instant::now();

        let action = step(plugin.as_ref()).await.map_err(|e| {
            error!(hook = %hook, plugin = %name, error = %e, "Hook handler failed");
            AppError::with_source(
                ErrorKind::Plugin,
                format!("Plugin '{name}' failed in {hook}: {}", e.message),
                e,
            )
        })?;

        let elapsed = started.elapsed();
        if is_slow(elapsed, policy.slow_handler_warn) {
            warn!(
                hook = %hook,
                plugin = %name,
                elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                "Slow hook handler"
            );
            outcome.slow_handlers.push(name.to_string());
        }

        outcome.invoked += 1;

        match action {
            HookAction::Continue => {
                debug!(hook = %hook, plugin = %name, "Handler returned Continue");
            }
            HookAction::Skip { reason } if policy.stop_on_skip => {
                info!(
                    hook = %hook,
                    plugin = %name,
                    reason = reason.as_deref().unwrap_or(""),
                    "Handler skipped action"
                );
                outcome.skipped_by = Some(name.to_string());
                outcome.reason = reason;
                break;
            }
            HookAction::Skip { .. } => {
                warn!(
                    hook = %hook,
                    plugin = %name,
                    "Handler returned Skip for a hook without skip semantics, ignoring"
                );
            }
        }
    }

    Ok(outcome)
}
