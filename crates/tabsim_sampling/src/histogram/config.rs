//! Configuration for histogram resampling.

/// Configuration for [`HistogramResampler`](super::HistogramResampler).
///
/// # Default Values
///
/// | Parameter | Default | Description |
/// |-----------|---------|-------------|
/// | `max_iterations` | `None` | Bin draws allowed in the corrective pass |
///
/// With `None` the corrective pass runs until the target is met. On inputs
/// where no bin can accept an adjustment (every scaled count is zero but
/// the target is not) it never terminates.
///
/// # Examples
///
/// ```rust
/// use tabsim_sampling::histogram::ResampleConfig;
///
/// let config = ResampleConfig::new().with_max_iterations(1_000_000);
/// assert_eq!(config.max_iterations, Some(1_000_000));
/// assert_eq!(ResampleConfig::default().max_iterations, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResampleConfig {
    /// Upper bound on corrective-pass bin draws, or `None` for unbounded.
    pub max_iterations: Option<u64>,
}

impl ResampleConfig {
    /// Creates a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the corrective pass at `max_iterations` bin draws.
    pub fn with_max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Removes the cap.
    pub fn unbounded(mut self) -> Self {
        self.max_iterations = None;
        self
    }
}
