//! Deferred typing sequencing.
//!
//! A typing request turns into two independently scheduled tasks on the
//! current-thread event loop, each carrying an absolute fire time computed
//! up front: keystroke injection at `inject_at`, and a completion signal at
//! `complete_at = inject_at + char_delay * char_count`. The completion
//! signal is purely time-based; it fires whether or not injection succeeded.

use std::time::Duration;

use tokio::task::{self, JoinHandle};
use tokio::time::{self, Instant};
use tracing::{debug, error};

use crate::config::Settings;
use crate::error::{AutoTyperError, Result};
use crate::injector::Inject;

/// One request to type a piece of text, consumed by [`spawn`].
///
/// The delays are copied out of [`Settings`] at construction time; later
/// settings edits do not affect a request already issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingRequest {
    /// Text to type, trimmed of surrounding whitespace.
    pub text: String,
    /// Delay before typing begins.
    pub start_delay: Duration,
    /// Pause between keystrokes.
    pub char_delay: Duration,
}

impl TypingRequest {
    /// Build a request from user text and the current settings.
    ///
    /// Fails with [`AutoTyperError::EmptyText`] when the text is empty after
    /// trimming; no timers exist for a rejected request.
    pub fn new(text: &str, settings: &Settings) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AutoTyperError::EmptyText);
        }
        Ok(Self {
            text: text.to_string(),
            start_delay: settings.start_delay_duration(),
            char_delay: settings.char_delay_duration(),
        })
    }

    /// Number of characters that will be typed.
    pub fn char_count(&self) -> u32 {
        self.text.chars().count() as u32
    }

    /// Wall-clock time the paced injection call is expected to consume.
    pub fn typing_duration(&self) -> Duration {
        self.char_delay * self.char_count()
    }
}

/// Absolute fire times for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// When keystroke injection starts.
    pub inject_at: Instant,
    /// When the completion signal fires.
    pub complete_at: Instant,
}

impl Schedule {
    /// Compute both fire times relative to `now`.
    ///
    /// `complete_at - inject_at` equals `char_delay * char_count` exactly,
    /// so `inject_at` never fires after `complete_at`.
    pub fn compute(request: &TypingRequest, now: Instant) -> Self {
        let inject_at = now + request.start_delay;
        let complete_at = inject_at + request.typing_duration();
        Self {
            inject_at,
            complete_at,
        }
    }
}

/// Handle to the two scheduled tasks of one request.
pub struct TypingHandle {
    /// The precomputed fire times.
    pub schedule: Schedule,
    injection: JoinHandle<()>,
    completion: JoinHandle<()>,
}

impl TypingHandle {
    /// Resolves when the completion timer fires.
    ///
    /// Purely time-based: this resolves at `complete_at` even if injection
    /// failed or is still running.
    pub async fn completed(&mut self) {
        let _ = (&mut self.completion).await;
    }

    /// Waits for the injection task itself to finish.
    ///
    /// The completion timer estimates the typing duration; when injection
    /// runs longer, waiting here keeps process teardown from cutting the
    /// typing short.
    pub async fn drained(self) {
        let _ = self.injection.await;
    }
}

/// Schedule injection and completion for `request`.
///
/// Spawns two independent local tasks and returns immediately; no queueing,
/// no coalescing, no cancellation. Issuing a second request before the
/// first completes is the caller's problem. Must be called from within a
/// [`tokio::task::LocalSet`].
pub fn spawn<I>(mut injector: I, request: TypingRequest) -> TypingHandle
where
    I: Inject + 'static,
{
    let schedule = Schedule::compute(&request, Instant::now());
    debug!(
        "scheduled {} chars: inject in {:?}, complete in {:?}",
        request.char_count(),
        request.start_delay,
        request.start_delay + request.typing_duration(),
    );

    let TypingRequest {
        text, char_delay, ..
    } = request;

    let inject_at = schedule.inject_at;
    let injection = task::spawn_local(async move {
        time::sleep_until(inject_at).await;
        if let Err(err) = injector.inject(&text, char_delay) {
            error!("{err}");
        }
    });

    let complete_at = schedule.complete_at;
    let completion = task::spawn_local(async move {
        time::sleep_until(complete_at).await;
    });

    TypingHandle {
        schedule,
        injection,
        completion,
    }
}
