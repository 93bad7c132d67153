//! Background refresher
//!
//! 私有页面打开期间的后台刷新任务：
//! - 启动时立即检查一次，之后按固定周期检查
//! - 实时通道的 `RefreshToken` 事件触发一次强制刷新
//! - 刷新失败不可恢复：停止计时器、断开实时通道、跳转登录页（只执行一次）
//!
//! Checks run as detached tasks. A check still pending when the refresher
//! stops is not aborted; its result is ignored.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use shared::Locale;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::{RealtimeChannel, RealtimeEvent, RefreshError, RefreshOutcome, RefreshRoutine};
use crate::Navigator;

/// Pages on which the refresher must not run (locale prefix stripped)
pub const UNAUTHENTICATED_PATHS: [&str; 3] = ["/login", "/logout", "/refresh-token"];

const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// What a timer tick does while an earlier check is still pending
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OverlapPolicy {
    /// Start another check anyway
    #[default]
    Allow,
    /// Skip the tick; forced checks still run
    SkipWhileInFlight,
}

#[derive(Debug, Clone)]
pub struct RefresherOptions {
    pub interval: Duration,
    pub overlap: OverlapPolicy,
}

impl Default for RefresherOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            overlap: OverlapPolicy::default(),
        }
    }
}

pub struct TokenRefresher {
    routine: Arc<dyn RefreshRoutine>,
    navigator: Arc<dyn Navigator>,
    locale: Locale,
    realtime: Option<Arc<dyn RealtimeChannel>>,
    options: RefresherOptions,
}

impl TokenRefresher {
    pub fn new(
        routine: Arc<dyn RefreshRoutine>,
        navigator: Arc<dyn Navigator>,
        locale: Locale,
    ) -> Self {
        Self {
            routine,
            navigator,
            locale,
            realtime: None,
            options: RefresherOptions::default(),
        }
    }

    pub fn with_realtime(mut self, realtime: Arc<dyn RealtimeChannel>) -> Self {
        self.realtime = Some(realtime);
        self
    }

    pub fn with_options(mut self, options: RefresherOptions) -> Self {
        self.options = options;
        self
    }

    /// Whether the refresher belongs on `pathname` (with or without locale prefix)
    pub fn should_run(pathname: &str) -> bool {
        let path = match Locale::strip_prefix(pathname) {
            Some((_, "")) => "/",
            Some((_, rest)) => rest,
            None => pathname,
        };
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        !UNAUTHENTICATED_PATHS.contains(&path)
    }

    /// Start the timer (and realtime listener); must be called inside a tokio runtime
    pub fn spawn(self) -> RefresherHandle {
        let shutdown = CancellationToken::new();
        let interval = self.options.interval.max(Duration::from_millis(1));
        let events = self.realtime.as_ref().map(|realtime| realtime.subscribe());

        let state = Arc::new(RefresherState {
            routine: self.routine,
            navigator: self.navigator,
            realtime: self.realtime,
            login_href: format!("/{}/login", self.locale),
            overlap: self.options.overlap,
            shutdown: shutdown.clone(),
            in_flight: AtomicUsize::new(0),
            escalated: AtomicBool::new(false),
        });

        let mut tasks = vec![tokio::spawn(run_timer(state.clone(), interval))];
        if let Some(events) = events {
            tasks.push(tokio::spawn(run_listener(state, events)));
        }

        RefresherHandle { shutdown, tasks }
    }
}

impl std::fmt::Debug for TokenRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRefresher")
            .field("locale", &self.locale)
            .field("realtime", &self.realtime.is_some())
            .field("options", &self.options)
            .finish()
    }
}

/// Stops the refresher when stopped or dropped
#[derive(Debug)]
pub struct RefresherHandle {
    shutdown: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl RefresherHandle {
    pub fn stop(&self) {
        self.shutdown.cancel();
    }

    /// True after `stop()` or after a failed refresh ended the session
    pub fn is_stopped(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Wait for the timer and listener to exit
    pub async fn join(mut self) {
        for task in std::mem::take(&mut self.tasks) {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Refresher task panicked");
            }
        }
    }
}

impl Drop for RefresherHandle {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

struct RefresherState {
    routine: Arc<dyn RefreshRoutine>,
    navigator: Arc<dyn Navigator>,
    realtime: Option<Arc<dyn RealtimeChannel>>,
    login_href: String,
    overlap: OverlapPolicy,
    shutdown: CancellationToken,
    in_flight: AtomicUsize,
    escalated: AtomicBool,
}

impl RefresherState {
    fn spawn_check(self: &Arc<Self>, force: bool) {
        if self.shutdown.is_cancelled() {
            return;
        }
        let skip_on_overlap = !force && self.overlap == OverlapPolicy::SkipWhileInFlight;
        if skip_on_overlap {
            if self
                .in_flight
                .compare_exchange(0, 1, Ordering::SeqCst, Ordering::SeqCst)
                .is_err()
            {
                tracing::trace!("Refresh check still pending, skipping tick");
                return;
            }
        } else {
            self.in_flight.fetch_add(1, Ordering::SeqCst);
        }

        let state = self.clone();
        tokio::spawn(async move {
            let result = state.routine.check_and_refresh(force).await;
            state.in_flight.fetch_sub(1, Ordering::SeqCst);

            if state.shutdown.is_cancelled() {
                tracing::debug!("Refresher stopped, ignoring late check result");
                return;
            }
            match result {
                Ok(RefreshOutcome::Refreshed) => tracing::debug!(force, "Credentials refreshed"),
                Ok(_) => {}
                Err(e) => state.escalate(&e),
            }
        });
    }

    fn escalate(&self, error: &RefreshError) {
        if self.escalated.swap(true, Ordering::SeqCst) {
            return;
        }
        tracing::warn!(error = %error, "Token refresh failed, ending session");
        self.shutdown.cancel();
        if let Some(realtime) = &self.realtime {
            realtime.disconnect();
        }
        self.navigator.navigate(&self.login_href);
    }
}

async fn run_timer(state: Arc<RefresherState>, interval: Duration) {
    tracing::debug!(interval_ms = interval.as_millis() as u64, "Token refresher started");

    // 立即检查一次
    state.spawn_check(false);

    let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = state.shutdown.cancelled() => {
                tracing::debug!("Token refresher stopped");
                return;
            }
            _ = ticker.tick() => state.spawn_check(false),
        }
    }
}

async fn run_listener(state: Arc<RefresherState>, mut events: broadcast::Receiver<RealtimeEvent>) {
    loop {
        tokio::select! {
            _ = state.shutdown.cancelled() => return,
            event = events.recv() => match event {
                Ok(RealtimeEvent::RefreshToken) => {
                    tracing::debug!("Forced refresh requested by server");
                    state.spawn_check(true);
                }
                Ok(RealtimeEvent::Connected { id }) => tracing::info!(%id, "Realtime connected"),
                Ok(RealtimeEvent::Disconnected) => tracing::info!("Realtime disconnected"),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Realtime listener lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return,
            },
        }
    }
}
