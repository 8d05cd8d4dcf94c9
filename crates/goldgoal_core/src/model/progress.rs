//! Trailing progress series for chart rendering.
//!
//! The core only supplies the raw per-window amounts; drawing, scaling and
//! label formatting belong to the presentation layer.

use crate::clock::Clock;
use crate::model::goal::Goal;
use crate::model::period::Period;
use crate::model::window::PeriodWindow;

/// Number of bars shown by the goal detail chart.
pub const DEFAULT_BAR_COUNT: u32 = 7;

/// Progress in one historical window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBar {
    pub window: PeriodWindow,
    /// `0` for the current window.
    pub periods_back: u32,
    pub amount: f64,
}

/// Bars ordered oldest to newest; the last bar is the current window.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSeries {
    pub period: Period,
    pub bars: Vec<ProgressBar>,
}

impl ProgressSeries {
    /// False when every bar is `<= 0` ("No Progress" placeholder).
    pub fn has_progress(&self) -> bool {
        self.bars.iter().any(|bar| bar.amount > 0.0)
    }

    /// Largest bar amount, or `0` for an empty series.
    pub fn max_amount(&self) -> f64 {
        self.bars
            .iter()
            .map(|bar| bar.amount)
            .fold(0.0, f64::max)
    }

    pub fn amounts(&self) -> Vec<f64> {
        self.bars.iter().map(|bar| bar.amount).collect()
    }
}

impl Goal {
    /// Builds `bar_count` trailing windows using the same rolling rules as
    /// `historical_window_progress`.
    pub fn progress_series<C: Clock + ?Sized>(&self, clock: &C, bar_count: u32) -> ProgressSeries {
        let now = clock.now();
        let bars = (0..bar_count)
            .rev()
            .map(|periods_back| {
                let window = PeriodWindow::historical(self.period, now, periods_back);
                ProgressBar {
                    window,
                    periods_back,
                    amount: self.progress_in_window(&window),
                }
            })
            .collect();

        ProgressSeries {
            period: self.period,
            bars,
        }
    }
}
