//! Simple moving average smoothing
//!
//! Stabilizes a jittery per-block magnitude signal over time. One filter
//! instance per frequency bin; each owns a bounded history of the most
//! recent display points and never resets for the life of the session.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SmaError {
    #[error("smoothing order must be at least 1, got {0}")]
    InvalidOrder(usize),

    #[error("history length {found} does not match order {order} + 1")]
    HistoryLength { order: usize, found: usize },
}

/// Moving-window smoothing filter over unsigned display points.
///
/// The history holds `order` retained inputs plus one reserved slot for the
/// most recent computed output, so its length is always `order + 1`. Every
/// feed call mutates the history in place; the filter is stateful, not a
/// pure function of its arguments.
///
/// Not safe for concurrent mutation; callers that share an instance across
/// threads must wrap it in a lock or keep a single-writer discipline.
#[derive(Debug, Clone)]
pub struct SmaFilter {
    order: usize,
    history: Vec<u16>,
}

impl SmaFilter {
    /// Create a filter with a zeroed history.
    ///
    /// # Panics
    /// If `order` is zero.
    pub fn new(order: usize) -> Self {
        assert!(order >= 1, "smoothing order must be at least 1");
        Self {
            order,
            history: vec![0; order + 1],
        }
    }

    /// Adopt an existing history buffer.
    ///
    /// # Returns
    /// [`SmaError::HistoryLength`] unless `history.len() == order + 1`; the
    /// invariant is checked here rather than trusted at feed time.
    pub fn from_history(order: usize, history: Vec<u16>) -> Result<Self, SmaError> {
        if order == 0 {
            return Err(SmaError::InvalidOrder(order));
        }
        if history.len() != order + 1 {
            return Err(SmaError::HistoryLength {
                order,
                found: history.len(),
            });
        }
        Ok(Self { order, history })
    }

    /// Feed one sample and return the integer-truncated mean of the `order`
    /// most recent samples (older slots start at zero).
    pub fn feed(&mut self, sample: u16) -> u16 {
        self.shift_in(sample);

        let sum: u32 = self.history[..self.order].iter().map(|&v| u32::from(v)).sum();
        let mean = (sum / self.order as u32) as u16;

        self.history[self.order] = mean;
        mean
    }

    /// Feed one sample and return the maximum of the retained window
    /// instead of the mean. Same ring update as [`feed`], so the output
    /// decays as soon as the peak sample ages out of the window.
    pub fn feed_peak(&mut self, sample: u16) -> u16 {
        self.shift_in(sample);

        // order >= 1, so the window is never empty
        let peak = self.history[..self.order].iter().copied().max().unwrap_or(0);

        self.history[self.order] = peak;
        peak
    }

    // Drop the oldest retained sample and insert the new one at the front.
    fn shift_in(&mut self, sample: u16) {
        self.history.copy_within(0..self.order - 1, 1);
        self.history[0] = sample;
    }

    /// Most recent computed output (the reserved history slot).
    pub fn output(&self) -> u16 {
        self.history[self.order]
    }

    pub fn order(&self) -> usize {
        self.order
    }
}
