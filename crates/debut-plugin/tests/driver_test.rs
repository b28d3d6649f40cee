//! Integration tests for hook reduction order, skip semantics and failures.

mod helpers;

use std::sync::Arc;

use debut_plugin::prelude::*;
use debut_plugin::DriverPhase;

use helpers::{Recorder, candle, driver, entries, executed, new_log, order};

#[tokio::test(start_paused = true)]
async fn test_async_handlers_never_overlap() {
    let log = new_log();
    let driver = driver();
    driver
        .register(vec![
            Recorder::new("slow", &log).delay(30).arc(),
            Recorder::new("fast", &log).delay(10).arc(),
            Recorder::new("instant", &log).arc(),
        ])
        .unwrap();

    driver.async_reduce(AsyncHook::OnStart).await.unwrap();

    assert_eq!(
        entries(&log),
        vec![
            "slow.onStart>",
            "slow.onStart<",
            "fast.onStart>",
            "fast.onStart<",
            "instant.onStart>",
            "instant.onStart<",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_skip_reduction_is_sequential_too() {
    let log = new_log();
    let driver = driver();
    driver
        .register(vec![
            Recorder::new("a", &log).delay(20).arc(),
            Recorder::new("b", &log).delay(5).arc(),
        ])
        .unwrap();

    let tick = candle(1);
    let outcome = driver.async_skip_reduce(SkipHook::OnTick(&tick)).await.unwrap();

    assert!(!outcome.is_skip());
    assert_eq!(outcome.invoked, 2);
    assert_eq!(
        entries(&log),
        vec!["a.onTick>", "a.onTick<", "b.onTick>", "b.onTick<"]
    );
}

#[tokio::test]
async fn test_first_skip_wins_and_stops_reduction() {
    let log = new_log();
    let driver = driver();
    driver
        .register(vec![
            Recorder::new("A", &log).arc(),
            Recorder::new("B", &log)
                .skip_on(PluginHook::OnBeforeOpen)
                .arc(),
            Recorder::new("C", &log).arc(),
        ])
        .unwrap();

    let proposed = order(1.0);
    let outcome = driver
        .async_skip_reduce(SkipHook::OnBeforeOpen(&proposed))
        .await
        .unwrap();

    assert!(outcome.is_skip());
    assert_eq!(outcome.skipped_by.as_deref(), Some("B"));
    assert_eq!(outcome.reason.as_deref(), Some("B vetoed"));
    assert_eq!(
        entries(&log),
        vec![
            "A.onBeforeOpen>",
            "A.onBeforeOpen<",
            "B.onBeforeOpen>",
            "B.onBeforeOpen<",
        ]
    );
}

#[tokio::test]
async fn test_no_skip_when_every_handler_continues() {
    let log = new_log();
    let driver = driver();
    driver
        .register(vec![
            Recorder::new("A", &log).arc(),
            Recorder::new("B", &log).arc(),
        ])
        .unwrap();

    let proposed = order(1.0);
    let closing = executed(order(1.0));
    let outcome = driver
        .async_skip_reduce(SkipHook::OnBeforeClose(&proposed, &closing))
        .await
        .unwrap();

    assert!(!outcome.is_skip());
    assert_eq!(outcome.invoked, 2);
}

#[tokio::test]
async fn test_on_open_visits_every_plugin() {
    let log = new_log();
    let driver = driver();
    driver
        .register(vec![
            Recorder::new("a", &log).arc(),
            Recorder::new("b", &log).arc(),
        ])
        .unwrap();

    let filled = executed(order(2.0));
    driver.async_reduce(AsyncHook::OnOpen(&filled)).await.unwrap();

    assert_eq!(
        entries(&log),
        vec!["a.onOpen>", "a.onOpen<", "b.onOpen>", "b.onOpen<"]
    );
}

#[tokio::test]
async fn test_failing_handler_aborts_reduction() {
    let log = new_log();
    let driver = driver();
    driver
        .register(vec![
            Recorder::new("a", &log).arc(),
            Recorder::new("b", &log).fail_on(PluginHook::OnCandle).arc(),
            Recorder::new("c", &log).arc(),
        ])
        .unwrap();

    let closed = candle(60_000);
    let err = driver
        .async_reduce(AsyncHook::OnCandle(&closed))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Plugin);
    assert!(err.message.contains("'b'"));
    assert!(err.message.contains("onCandle"));
    assert!(std::error::Error::source(&err).is_some());
    assert!(!entries(&log).iter().any(|e| e.starts_with("c.")));
}

#[test]
fn test_failing_sync_handler_aborts_reduction() {
    let log = new_log();
    let driver = driver();
    driver
        .register(vec![
            Recorder::new("a", &log).fail_on(PluginHook::OnInit).arc(),
            Recorder::new("b", &log).arc(),
        ])
        .unwrap();

    let err = driver.sync_reduce(SyncHook::OnInit).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Plugin);
    assert_eq!(entries(&log), vec!["a.onInit"]);
}

/// Overrides `on_tick` without listing `OnTick` in its declared hooks.
#[derive(Debug)]
struct UndeclaredVeto;

#[async_trait]
impl Plugin for UndeclaredVeto {
    fn name(&self) -> &str {
        "risk"
    }

    fn registered_hooks(&self) -> Vec<PluginHook> {
        vec![PluginHook::OnCandle]
    }

    async fn on_tick(&self, _ctx: &PluginCtx, _tick: &Candle) -> AppResult<HookAction> {
        Ok(HookAction::skip("veto"))
    }
}

#[tokio::test]
async fn test_undeclared_override_still_vetoes() {
    let log = new_log();
    let driver = driver();
    driver
        .register(vec![
            Arc::new(UndeclaredVeto) as Arc<dyn Plugin>,
            Recorder::new("after", &log).arc(),
        ])
        .unwrap();

    let tick = candle(0);
    let outcome = driver.async_skip_reduce(SkipHook::OnTick(&tick)).await.unwrap();

    assert!(outcome.is_skip());
    assert_eq!(outcome.skipped_by.as_deref(), Some("risk"));
    assert_eq!(outcome.reason.as_deref(), Some("veto"));
    assert!(entries(&log).is_empty());
}

#[tokio::test]
async fn test_declared_hooks_only_drive_introspection() {
    let log = new_log();
    let driver = driver();
    driver
        .register(vec![
            Recorder::new("candles", &log)
                .hooks(&[PluginHook::OnCandle])
                .arc(),
            Recorder::new("ticks", &log).hooks(&[PluginHook::OnTick]).arc(),
        ])
        .unwrap();

    assert_eq!(driver.handler_count(PluginHook::OnTick), 1);
    assert!(!driver.has_handlers(PluginHook::OnOpen));

    let c = candle(0);
    let outcome = driver.async_skip_reduce(SkipHook::OnTick(&c)).await.unwrap();

    assert_eq!(outcome.invoked, 2);
    assert_eq!(
        entries(&log),
        vec![
            "candles.onTick>",
            "candles.onTick<",
            "ticks.onTick>",
            "ticks.onTick<",
        ]
    );
}

#[test]
fn test_try_sync_reduce_rejects_non_sync_hook() {
    let log = new_log();
    let driver = driver();
    driver.register(vec![Recorder::new("a", &log).arc()]).unwrap();

    let err = driver.try_sync_reduce(HookCall::OnStart).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Contract);
    assert!(entries(&log).is_empty());
}

#[tokio::test]
async fn test_try_async_reduce_rejects_skip_hook() {
    let log = new_log();
    let driver = driver();
    driver.register(vec![Recorder::new("a", &log).arc()]).unwrap();

    let tick = candle(0);
    let err = driver
        .try_async_reduce(HookCall::OnTick(&tick))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Contract);

    let err = driver
        .try_async_skip_reduce(HookCall::OnInit)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Contract);
    assert!(entries(&log).is_empty());
}

#[tokio::test]
async fn test_full_lifecycle_ends_disposed() {
    let log = new_log();
    let driver = driver();
    driver.register(vec![Recorder::new("a", &log).arc()]).unwrap();
    assert_eq!(driver.phase(), DriverPhase::Registered);

    driver.sync_reduce(SyncHook::OnInit).unwrap();
    driver.async_reduce(AsyncHook::OnStart).await.unwrap();
    let c = candle(0);
    driver.async_skip_reduce(SkipHook::OnTick(&c)).await.unwrap();
    driver.async_reduce(AsyncHook::OnCandle(&c)).await.unwrap();
    driver.async_reduce(AsyncHook::OnAfterCandle(&c)).await.unwrap();
    assert_eq!(driver.phase(), DriverPhase::Dispatching);

    driver.async_reduce(AsyncHook::OnDispose).await.unwrap();

    assert_eq!(driver.phase(), DriverPhase::Disposed);
    assert!(driver.is_empty());
    assert!(driver.find_plugin("a").is_none());

    let err = driver.async_reduce(AsyncHook::OnStart).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Contract);
    let err = driver.register(vec![Recorder::new("b", &log).arc()]).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Contract);
}

#[tokio::test]
async fn test_failed_dispose_keeps_plugins() {
    let log = new_log();
    let driver = driver();
    driver
        .register(vec![Recorder::new("a", &log).fail_on(PluginHook::OnDispose).arc()])
        .unwrap();

    assert!(driver.async_reduce(AsyncHook::OnDispose).await.is_err());
    assert_eq!(driver.phase(), DriverPhase::Dispatching);
    assert!(driver.find_plugin("a").is_some());
}

#[test]
fn test_registration_closed_after_first_dispatch() {
    let log = new_log();
    let driver = driver();
    driver.register(vec![Recorder::new("a", &log).arc()]).unwrap();
    driver.sync_reduce(SyncHook::OnInit).unwrap();

    let err = driver.register(vec![Recorder::new("b", &log).arc()]).unwrap_err();

    assert_eq!(err.kind, ErrorKind::Contract);
    assert_eq!(driver.plugin_names(), vec!["a"]);
}
