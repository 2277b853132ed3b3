/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Scoped timers that log how long a region took, together with
//! statistics aggregated over every run of that region.
//!
//! ```
//! use ndfactor::timer::ScopedLoggingTimer;
//! use ndfactor::timer::TimerStats;
//!
//! static STATS: TimerStats = TimerStats::new();
//!
//! fn align() {
//!     let _timer = ScopedLoggingTimer::new("align", true, file!(), line!(), &STATS);
//!     // ...
//! }
//!
//! align();
//! align();
//! assert_eq!(STATS.snapshot().times_called, 2);
//! ```

use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Instant;

use crate::format::human_readable_elapsed_time;

/// Aggregate statistics over all runs of a timed region.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimerSnapshot {
    pub cumulative_secs: f64,
    pub max_secs: f64,
    pub times_called: u64,
}

/// Shared, thread-safe [`TimerSnapshot`] accumulator. Typically a
/// `static` next to the timed region.
#[derive(Debug, Default)]
pub struct TimerStats {
    stats: Mutex<TimerSnapshot>,
}

impl TimerStats {
    pub const fn new() -> Self {
        Self {
            stats: Mutex::new(TimerSnapshot {
                cumulative_secs: 0.0,
                max_secs: 0.0,
                times_called: 0,
            }),
        }
    }

    /// A copy of the current statistics.
    pub fn snapshot(&self) -> TimerSnapshot {
        *self.stats.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, secs: f64) -> TimerSnapshot {
        let mut stats = self.stats.lock().unwrap_or_else(PoisonError::into_inner);
        stats.cumulative_secs += secs;
        if secs > stats.max_secs {
            stats.max_secs = secs;
        }
        stats.times_called += 1;
        *stats
    }
}

/// Measures the time from construction until [`stop_and_log`] or
/// drop, records it in a [`TimerStats`] and logs it at info level.
///
/// A disabled timer does nothing.
///
/// [`stop_and_log`]: ScopedLoggingTimer::stop_and_log
#[must_use = "the timer stops as soon as it is dropped"]
pub struct ScopedLoggingTimer<'a> {
    label: String,
    file: &'static str,
    line: u32,
    stats: &'a TimerStats,
    start: Option<Instant>,
}

impl<'a> ScopedLoggingTimer<'a> {
    pub fn new(
        label: impl Into<String>,
        enabled: bool,
        file: &'static str,
        line: u32,
        stats: &'a TimerStats,
    ) -> Self {
        Self {
            label: label.into(),
            file,
            line,
            stats,
            start: enabled.then(Instant::now),
        }
    }

    /// Stops the timer and logs the elapsed time. Only the first call
    /// has any effect.
    pub fn stop_and_log(&mut self) {
        let Some(start) = self.start.take() else {
            return;
        };
        let secs = start.elapsed().as_secs_f64();
        let stats = self.stats.record(secs);
        tracing::info!(
            file = self.file,
            line = self.line,
            "{} time: {} (cumulative: {}, max: {}, #called: {})",
            self.label,
            human_readable_elapsed_time(secs),
            human_readable_elapsed_time(stats.cumulative_secs),
            human_readable_elapsed_time(stats.max_secs),
            stats.times_called,
        );
    }
}

impl Drop for ScopedLoggingTimer<'_> {
    fn drop(&mut self) {
        self.stop_and_log();
    }
}

/// Starts a [`ScopedLoggingTimer`] at the call site. The timer is
/// enabled according to [`Config::timers_enabled`] unless `enabled`
/// is given explicitly.
///
/// ```
/// use ndfactor::scoped_logging_timer;
/// use ndfactor::timer::TimerStats;
///
/// static STATS: TimerStats = TimerStats::new();
/// {
///     let _timer = scoped_logging_timer!("convert", &STATS, enabled = true);
/// }
/// assert_eq!(STATS.snapshot().times_called, 1);
/// ```
///
/// [`Config::timers_enabled`]: crate::config::Config::timers_enabled
#[macro_export]
macro_rules! scoped_logging_timer {
    ($label:expr, $stats:expr) => {
        $crate::timer::ScopedLoggingTimer::new(
            $label,
            $crate::config::global().timers_enabled,
            file!(),
            line!(),
            $stats,
        )
    };
    ($label:expr, $stats:expr, enabled = $enabled:expr) => {
        $crate::timer::ScopedLoggingTimer::new($label, $enabled, file!(), line!(), $stats)
    };
}
