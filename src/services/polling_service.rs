use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::data::store::SharedStore;
use crate::models::record::{format_amount, ScanStatus};

/// What the result surface shows. `Analyzing` is rendered immediately on
/// activation; the other three end the wait for this surface's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayState {
    Analyzing,
    Completed { merchant: String, amount: f64 },
    Error { message: String },
    TimedOut,
}

impl DisplayState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Analyzing)
    }

    pub fn summary(&self) -> String {
        match self {
            Self::Analyzing => "分析中...".to_string(),
            Self::Completed { merchant, amount } => {
                format!("{merchant} {}", format_amount(*amount))
            }
            Self::Error { message } => message.clone(),
            Self::TimedOut => "识别超时，请重试".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    pub interval: Duration,
    pub ceiling: Duration,
}

impl Default for PollConfig {
    /// 200ms ticks for up to 30s. Shorter ceilings risk false timeouts given
    /// the backend's worst-case latency.
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(200),
            ceiling: Duration::from_secs(30),
        }
    }
}

/// Running poll loop. Dropping the handle does not stop the loop; call
/// `cancel()` on surface teardown.
pub struct PollerHandle {
    cancel_flag: Arc<AtomicBool>,
    states: watch::Receiver<DisplayState>,
    task: JoinHandle<DisplayState>,
}

impl PollerHandle {
    pub fn states(&self) -> watch::Receiver<DisplayState> {
        self.states.clone()
    }

    pub fn current(&self) -> DisplayState {
        self.states.borrow().clone()
    }

    /// Stops the loop at its next tick; no store access happens after that.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    pub async fn join(self) -> DisplayState {
        match self.task.await {
            Ok(state) => state,
            Err(e) => {
                warn!("poll task ended abnormally: {e}");
                self.states.borrow().clone()
            }
        }
    }
}

/// Starts polling the shared store for a scan result. The initial
/// `Analyzing` state is published before the first read — the consumer does
/// not assume the producer has started yet.
pub fn start_polling(store: SharedStore, config: PollConfig) -> PollerHandle {
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let (tx, rx) = watch::channel(DisplayState::Analyzing);
    let cancel = cancel_flag.clone();
    let task = tokio::spawn(async move { run_poll_loop(store, config, cancel, tx).await });
    PollerHandle {
        cancel_flag,
        states: rx,
        task,
    }
}

async fn run_poll_loop(
    store: SharedStore,
    config: PollConfig,
    cancel: Arc<AtomicBool>,
    tx: watch::Sender<DisplayState>,
) -> DisplayState {
    let deadline = Instant::now() + config.ceiling;
    let mut ticker = interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        if cancel.load(Ordering::Relaxed) {
            debug!("poller cancelled, stopping without a terminal state");
            return tx.borrow().clone();
        }

        // timeout is checked before the read, as the source UI does
        if Instant::now() >= deadline {
            info!("poll ceiling reached with no terminal record");
            // the record is intentionally left in place on timeout; a late
            // producer write lands in a slot nothing reads again
            let _ = tx.send(DisplayState::TimedOut);
            return DisplayState::TimedOut;
        }

        let Some(record) = store.load_record() else {
            continue;
        };

        match record.status {
            ScanStatus::Analyzing => {}
            ScanStatus::Completed => {
                info!(
                    "result observed: {} {}",
                    record.merchant,
                    format_amount(record.amount)
                );
                let state = DisplayState::Completed {
                    merchant: record.merchant,
                    amount: record.amount,
                };
                store.clear_record();
                let _ = tx.send(state.clone());
                return state;
            }
            ScanStatus::Error => {
                info!("error observed: {}", record.merchant);
                let state = DisplayState::Error {
                    message: record.merchant,
                };
                store.clear_record();
                let _ = tx.send(state.clone());
                return state;
            }
        }
    }
}
