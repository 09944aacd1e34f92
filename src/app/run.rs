// app/run.rs - Timed Capture Run
//
// A run is a bounded chain of ticks. Each tick captures once and asks the
// run how long to wait before the next one. The run value travels inside
// the timer message, so several runs can interleave on one event loop.

use std::time::Duration;

use chrono::{DateTime, Local};
use log::debug;

use crate::capture::{
    perform_capture_at, CaptureEngine, CaptureError, CaptureOutcome, ClipboardSink,
};
use crate::constants::timing;

use super::state::CaptureRequest;

/// Progress of one capture run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRun {
    request: CaptureRequest,
    /// Number of captures already taken
    index: u64,
}

impl CaptureRun {
    pub fn new(request: CaptureRequest) -> Self {
        Self { request, index: 0 }
    }

    pub fn request(&self) -> &CaptureRequest {
        &self.request
    }

    /// Captures taken so far
    pub fn completed(&self) -> u64 {
        self.index
    }

    /// True once `count` captures have been taken
    pub fn is_finished(&self) -> bool {
        self.index >= self.request.count
    }

    /// Record one capture.
    ///
    /// Returns the wait before the next capture, or `None` when the run is
    /// over. The wait sits between captures only; the first capture of a
    /// run never waits.
    pub fn advance(&mut self) -> Option<Duration> {
        if self.is_finished() {
            return None;
        }
        self.index += 1;
        if self.is_finished() {
            None
        } else {
            Some(self.request.interval())
        }
    }

    /// Take the next capture of the run.
    ///
    /// On success the capture is counted and the wait before the following
    /// one is returned alongside it (`None` once the run is complete). A
    /// failed capture is not counted; the caller ends the run.
    pub fn tick(
        &mut self,
        engine: &mut dyn CaptureEngine,
        clipboard: &mut dyn ClipboardSink,
    ) -> Result<(CaptureOutcome, Option<Duration>), CaptureError> {
        self.tick_at(engine, clipboard, &Local::now())
    }

    /// [`CaptureRun::tick`] with the file named after `at`
    pub fn tick_at(
        &mut self,
        engine: &mut dyn CaptureEngine,
        clipboard: &mut dyn ClipboardSink,
        at: &DateTime<Local>,
    ) -> Result<(CaptureOutcome, Option<Duration>), CaptureError> {
        let outcome = perform_capture_at(
            engine,
            clipboard,
            self.request.region,
            &self.request.save_dir,
            at,
        )?;
        let next = self.advance();
        debug!(
            "Capture {}/{} done, next in {:?}",
            self.index, self.request.count, next
        );
        Ok((outcome, next))
    }

    /// Timers to arm when the run is started from the main window
    pub fn start_timers(&self) -> StartTimers {
        if self.request.hide_window {
            StartTimers {
                first_capture: settle_delay(),
                restore_window: Some(settle_delay() + self.restore_deadline()),
            }
        } else {
            StartTimers {
                first_capture: Duration::ZERO,
                restore_window: None,
            }
        }
    }

    /// When a hidden main window comes back, measured from the first capture.
    ///
    /// This is `interval * count` plus a fixed margin and is not tied to
    /// the last capture actually finishing: slow captures push the real end
    /// of the run past this deadline.
    pub fn restore_deadline(&self) -> Duration {
        let total = self.request.interval_secs.saturating_mul(self.request.count);
        Duration::from_secs(total) + Duration::from_millis(timing::RESTORE_MARGIN_MS)
    }
}

/// Delays from pressing Start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartTimers {
    /// Until the first capture
    pub first_capture: Duration,
    /// Until the hidden main window is shown again, when it was hidden
    pub restore_window: Option<Duration>,
}

/// Pause between hiding the main window and the first capture
pub fn settle_delay() -> Duration {
    Duration::from_millis(timing::SETTLE_DELAY_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn run(interval_secs: u64, count: u64) -> CaptureRun {
        run_hidden(interval_secs, count, false)
    }

    fn run_hidden(interval_secs: u64, count: u64, hide_window: bool) -> CaptureRun {
        CaptureRun::new(CaptureRequest {
            save_dir: PathBuf::from("."),
            region: None,
            interval_secs,
            count,
            hide_window,
        })
    }

    #[test]
    fn run_of_n_takes_exactly_n_captures() {
        for count in [0, 1, 2, 7] {
            let mut run = run(1, count);
            let mut captures = 0;
            while !run.is_finished() {
                captures += 1;
                run.advance();
            }
            assert_eq!(captures, count);
            assert_eq!(run.completed(), count);
        }
    }

    #[test]
    fn waits_sit_between_captures() {
        let mut run = run(2, 3);
        assert_eq!(run.advance(), Some(Duration::from_secs(2)));
        assert_eq!(run.advance(), Some(Duration::from_secs(2)));
        assert_eq!(run.advance(), None);
        assert_eq!(run.advance(), None);
        assert_eq!(run.completed(), 3);
    }

    #[test]
    fn single_capture_never_waits() {
        let mut run = run(0, 1);
        assert!(!run.is_finished());
        assert_eq!(run.advance(), None);
        assert!(run.is_finished());
    }

    #[test]
    fn visible_run_starts_immediately_without_restore() {
        assert_eq!(
            run(4, 2).start_timers(),
            StartTimers {
                first_capture: Duration::ZERO,
                restore_window: None,
            }
        );
    }

    #[test]
    fn hidden_run_settles_then_restores_after_deadline() {
        assert_eq!(
            run_hidden(1, 3, true).start_timers(),
            StartTimers {
                first_capture: Duration::from_secs(1),
                restore_window: Some(Duration::from_millis(4500)),
            }
        );
    }

    #[test]
    fn restore_deadline_is_interval_times_count_plus_margin() {
        assert_eq!(run(1, 3).restore_deadline(), Duration::from_millis(3500));
        assert_eq!(run(0, 1).restore_deadline(), Duration::from_millis(500));
        assert_eq!(run(5, 10).restore_deadline(), Duration::from_millis(50_500));
    }

    #[test]
    fn settle_delay_is_one_second() {
        assert_eq!(settle_delay(), Duration::from_secs(1));
    }
}
