//! Async state container for a remote query.
//!
//! A query is in one of three phases: pending (never resolved), resolved, or
//! failed. Independently it can be stale (invalidated, needs a re-fetch) and
//! fetching (a request is in flight). A re-fetch keeps the resolved value
//! visible until the new result lands.
//!
//! Which in-flight request is current is tracked by the task lifecycle
//! (`Tasks`), not here: results of superseded requests never reach a query.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryPhase<T> {
    Pending,
    Resolved(T),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query<T> {
    phase: QueryPhase<T>,
    stale: bool,
    fetching: bool,
}

impl<T> Default for Query<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Query<T> {
    /// A query that has never been fetched. Starts stale.
    pub fn new() -> Self {
        Self {
            phase: QueryPhase::Pending,
            stale: true,
            fetching: false,
        }
    }

    pub fn phase(&self) -> &QueryPhase<T> {
        &self.phase
    }

    /// Resolved value, if any.
    pub fn data(&self) -> Option<&T> {
        match &self.phase {
            QueryPhase::Resolved(value) => Some(value),
            QueryPhase::Pending | QueryPhase::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            QueryPhase::Failed(error) => Some(error),
            QueryPhase::Pending | QueryPhase::Resolved(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, QueryPhase::Pending)
    }

    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Marks the cached value stale. The value stays readable.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Records that a fetch was issued.
    pub fn start_fetch(&mut self) {
        self.fetching = true;
        self.stale = false;
    }

    pub fn resolve(&mut self, value: T) {
        self.phase = QueryPhase::Resolved(value);
        self.fetching = false;
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.phase = QueryPhase::Failed(error.into());
        self.fetching = false;
    }

    /// Applies a fetch outcome.
    pub fn settle(&mut self, result: Result<T, String>) {
        match result {
            Ok(value) => self.resolve(value),
            Err(error) => self.fail(error),
        }
    }
}
