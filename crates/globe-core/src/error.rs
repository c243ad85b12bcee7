/// Errors surfaced by the globe engine and its hosts.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum GlobeError {
    /// The host could not hand out a drawing context (fatal for the instance).
    #[error("rendering context unavailable: {0}")]
    ContextUnavailable(String),
    /// Presenting a rasterized frame failed.
    #[error("present failed: {0}")]
    Present(String),
    /// Registering pointer/resize listeners failed.
    #[error("listener registration failed: {0}")]
    Listener(String),
    /// The per-frame callback could not be scheduled.
    #[error("frame scheduling failed: {0}")]
    Scheduling(String),
    /// An inbound option could not be accepted.
    #[error("invalid option {name}: {value:?}")]
    InvalidOption { name: &'static str, value: String },
}
