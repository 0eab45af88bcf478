//! Search progress reporting.

/// Receives `(min, max, value)` updates while a search runs.
///
/// Updates are delivered synchronously from inside the search.
pub trait ProgressSink {
    /// Reports the current position within `[min, max]`.
    fn report(&mut self, min: u32, max: u32, value: u32);
}

impl<F> ProgressSink for F
where
    F: FnMut(u32, u32, u32),
{
    fn report(&mut self, min: u32, max: u32, value: u32) {
        self(min, max, value);
    }
}

/// Discards progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&mut self, _min: u32, _max: u32, _value: u32) {}
}

/// Logs progress updates at trace level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn report(&mut self, min: u32, max: u32, value: u32) {
        tracing::trace!(min, max, value, "search progress");
    }
}

/// Counts steps against a fixed maximum, clamping at the maximum.
pub(crate) struct Meter<'a, P: ProgressSink> {
    sink: &'a mut P,
    max: u32,
    value: u32,
}

impl<'a, P: ProgressSink> Meter<'a, P> {
    pub(crate) fn start(sink: &'a mut P, max: u32) -> Self {
        sink.report(0, max, 0);
        Self { sink, max, value: 0 }
    }

    pub(crate) fn step(&mut self) {
        self.value = self.value.saturating_add(1).min(self.max);
        self.sink.report(0, self.max, self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_clamps_at_max() {
        let mut seen = Vec::new();
        let mut sink = |min: u32, max: u32, value: u32| seen.push((min, max, value));

        let mut meter = Meter::start(&mut sink, 2);
        meter.step();
        meter.step();
        meter.step();
        drop(meter);

        assert_eq!(seen, vec![(0, 2, 0), (0, 2, 1), (0, 2, 2), (0, 2, 2)]);
    }

    #[test]
    fn no_progress_accepts_anything() {
        let mut sink = NoProgress;
        sink.report(0, 0, 10);
        TracingProgress.report(0, 5, 1);
    }
}
