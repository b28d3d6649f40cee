//! Shared test helpers for driver integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use debut_plugin::prelude::*;

/// Shared event log: `"{plugin}.{hook}>"` on entry, `"{plugin}.{hook}<"` on exit.
pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

/// Minimal strategy the driver is attached to.
#[derive(Debug, Default)]
pub struct TestCore;

impl DebutCore for TestCore {
    fn ticker(&self) -> &str {
        "ETHUSDT"
    }

    fn orders(&self) -> Vec<ExecutedOrder> {
        Vec::new()
    }

    fn current_candle(&self) -> Option<Candle> {
        None
    }

    fn is_sandbox(&self) -> bool {
        true
    }
}

pub fn driver() -> PluginDriver {
    PluginDriver::new(Arc::new(TestCore))
}

/// Plugin that records every call and can be told to sleep, skip or fail.
#[derive(Debug)]
pub struct Recorder {
    name: String,
    hooks: Vec<PluginHook>,
    log: Log,
    delay: Option<Duration>,
    skip_on: Vec<PluginHook>,
    fail_on: Vec<PluginHook>,
    api: Option<PluginApi>,
}

impl Recorder {
    pub fn new(name: &str, log: &Log) -> Self {
        Self {
            name: name.to_string(),
            hooks: PluginHook::ALL.to_vec(),
            log: Arc::clone(log),
            delay: None,
            skip_on: Vec::new(),
            fail_on: Vec::new(),
            api: None,
        }
    }

    pub fn hooks(mut self, hooks: &[PluginHook]) -> Self {
        self.hooks = hooks.to_vec();
        self
    }

    pub fn delay(mut self, ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(ms));
        self
    }

    pub fn skip_on(mut self, hook: PluginHook) -> Self {
        self.skip_on.push(hook);
        self
    }

    pub fn fail_on(mut self, hook: PluginHook) -> Self {
        self.fail_on.push(hook);
        self
    }

    pub fn api<T: std::any::Any + Send + Sync>(mut self, api: T) -> Self {
        self.api = Some(Arc::new(api) as PluginApi);
        self
    }

    pub fn arc(self) -> Arc<dyn Plugin> {
        Arc::new(self)
    }

    async fn step(&self, hook: PluginHook) -> AppResult<HookAction> {
        self.log.lock().push(format!("{}.{hook}>", self.name));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.log.lock().push(format!("{}.{hook}<", self.name));

        if self.fail_on.contains(&hook) {
            return Err(AppError::internal(format!("{} refused {hook}", self.name)));
        }
        if self.skip_on.contains(&hook) {
            return Ok(HookAction::skip(format!("{} vetoed", self.name)));
        }
        Ok(HookAction::Continue)
    }

    async fn run(&self, hook: PluginHook) -> AppResult<()> {
        self.step(hook).await.map(|_| ())
    }
}

#[async_trait]
impl Plugin for Recorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn registered_hooks(&self) -> Vec<PluginHook> {
        self.hooks.clone()
    }

    fn api(&self) -> Option<PluginApi> {
        self.api.clone()
    }

    fn on_init(&self, _ctx: &PluginCtx) -> AppResult<()> {
        self.log.lock().push(format!("{}.onInit", self.name));
        if self.fail_on.contains(&PluginHook::OnInit) {
            return Err(AppError::internal(format!("{} refused onInit", self.name)));
        }
        Ok(())
    }

    async fn on_start(&self, _ctx: &PluginCtx) -> AppResult<()> {
        self.run(PluginHook::OnStart).await
    }

    async fn on_dispose(&self, _ctx: &PluginCtx) -> AppResult<()> {
        self.run(PluginHook::OnDispose).await
    }

    async fn on_before_open(&self, _ctx: &PluginCtx, _order: &OrderOptions) -> AppResult<HookAction> {
        self.step(PluginHook::OnBeforeOpen).await
    }

    async fn on_open(&self, _ctx: &PluginCtx, _order: &ExecutedOrder) -> AppResult<()> {
        self.run(PluginHook::OnOpen).await
    }

    async fn on_before_close(
        &self,
        _ctx: &PluginCtx,
        _order: &OrderOptions,
        _closing: &ExecutedOrder,
    ) -> AppResult<HookAction> {
        self.step(PluginHook::OnBeforeClose).await
    }

    async fn on_close(
        &self,
        _ctx: &PluginCtx,
        _order: &ExecutedOrder,
        _closing: &ExecutedOrder,
    ) -> AppResult<()> {
        self.run(PluginHook::OnClose).await
    }

    async fn on_tick(&self, _ctx: &PluginCtx, _tick: &Candle) -> AppResult<HookAction> {
        self.step(PluginHook::OnTick).await
    }

    async fn on_candle(&self, _ctx: &PluginCtx, _candle: &Candle) -> AppResult<()> {
        self.run(PluginHook::OnCandle).await
    }

    async fn on_after_candle(&self, _ctx: &PluginCtx, _candle: &Candle) -> AppResult<()> {
        self.run(PluginHook::OnAfterCandle).await
    }
}

pub fn entries(log: &Log) -> Vec<String> {
    log.lock().clone()
}

pub fn candle(time: i64) -> Candle {
    Candle::new(time, 100.0, 101.0, 99.5, 100.5, 12.0)
}

pub fn order(lots: f64) -> OrderOptions {
    OrderOptions {
        cid: 1,
        order_type: OrderType::Buy,
        ticker: "ETHUSDT".to_string(),
        price: 100.5,
        lots,
        sandbox: true,
        close: false,
        open_id: None,
        time: 0,
    }
}

pub fn executed(options: OrderOptions) -> ExecutedOrder {
    let price = options.price;
    let lots = options.lots;
    ExecutedOrder {
        options,
        order_id: "ex-1".to_string(),
        executed_price: price,
        executed_lots: lots,
        commission: 0.0,
    }
}
