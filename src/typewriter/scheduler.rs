use super::machine::{Snapshot, Typewriter};
use std::time::Duration;
use tokio::{runtime::Handle, sync::watch, task::JoinHandle};

/// Owns the timer task driving a typewriter.
///
/// Disposing the guard (explicitly or by dropping it) cancels the pending timer; no
/// snapshot is published afterwards. Disposing more than once is a no-op.
#[derive(Debug)]
pub(crate) struct TimerGuard {
    task: Option<JoinHandle<()>>,
}

impl TimerGuard {
    fn idle() -> Self {
        Self { task: None }
    }

    /// Whether a timer task is still owned by this guard.
    pub(crate) fn is_active(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    pub(crate) fn dispose(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("typewriter timer cancelled");
        }
    }
}

impl Drop for TimerGuard {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Start animating `typewriter` on `runtime`.
///
/// The returned receiver always holds the latest snapshot. An idle typewriter (empty
/// command list) never starts a timer; its receiver keeps the initial snapshot forever.
pub(crate) fn spawn(runtime: &Handle, mut typewriter: Typewriter) -> (TimerGuard, watch::Receiver<Snapshot>) {
    let (sender, receiver) = watch::channel(typewriter.snapshot());
    if typewriter.is_idle() {
        tracing::warn!("no commands to animate, typewriter not started");
        return (TimerGuard::idle(), receiver);
    }

    let first_delay = typewriter.timings().typing;
    let task = runtime.spawn(async move {
        let mut delay = first_delay;
        loop {
            sleep(delay).await;
            let Some(next) = typewriter.tick() else {
                break;
            };
            if sender.send(typewriter.snapshot()).is_err() {
                tracing::debug!("typewriter has no observers left");
                break;
            }
            delay = next;
        }
    });
    (TimerGuard { task: Some(task) }, receiver)
}

async fn sleep(delay: Duration) {
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
}
