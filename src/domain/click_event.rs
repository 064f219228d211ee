//! Click event model for asynchronous click tracking.

/// An in-memory click notification for async processing.
///
/// Passed from the resolver to the background worker via a bounded
/// channel, decoupling the redirect response from the store write. The
/// store owns the counter and last-access stamp, so the event only needs
/// to carry the code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub code: String,
}

impl ClickEvent {
    /// Creates a click event for the given short code.
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}
