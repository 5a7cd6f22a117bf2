//! Collect-all accumulator pairing a value with a growing log.

/// A value together with the log entries produced while computing it.
///
/// Steps are chained with [`and_then`](Self::and_then); each step's log is
/// appended after the logs of the steps before it. A step that logs never
/// stops later steps from running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Writer<A, L> {
    value: A,
    log: Vec<L>,
}

impl<A, L> Writer<A, L> {
    /// A value with an empty log.
    #[must_use]
    pub fn success(value: A) -> Self {
        Self {
            value,
            log: Vec::new(),
        }
    }

    /// A value with an initial log.
    #[must_use]
    pub fn new(value: A, log: Vec<L>) -> Self {
        Self { value, log }
    }

    /// Runs `step` on the current value and appends its log.
    #[must_use]
    pub fn and_then<B, F>(self, step: F) -> Writer<B, L>
    where
        F: FnOnce(A) -> Writer<B, L>,
    {
        let Writer { value, mut log } = self;
        let next = step(value);
        log.extend(next.log);
        Writer {
            value: next.value,
            log,
        }
    }

    /// Appends entries to the log without touching the value.
    #[must_use]
    pub fn tell(mut self, entries: impl IntoIterator<Item = L>) -> Self {
        self.log.extend(entries);
        self
    }

    /// Runs every step in order, threading the value through and
    /// concatenating all logs.
    #[must_use]
    pub fn fold<I, F>(initial: A, steps: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(A) -> Writer<A, L>,
    {
        steps
            .into_iter()
            .fold(Self::success(initial), |acc, step| acc.and_then(step))
    }

    /// The current value.
    pub fn value(&self) -> &A {
        &self.value
    }

    /// The log so far.
    pub fn log(&self) -> &[L] {
        &self.log
    }

    /// Splits into the value and the accumulated log.
    #[must_use]
    pub fn into_parts(self) -> (A, Vec<L>) {
        (self.value, self.log)
    }

    /// Drops the value and returns the log.
    #[must_use]
    pub fn into_log(self) -> Vec<L> {
        self.log
    }
}
