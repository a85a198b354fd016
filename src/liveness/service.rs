// LivenessCheck trait for heartbeat-style monitoring.

/// A named heartbeat that a monitored component whacks to prove it is alive.
///
/// `expired() == true` is the failure condition everywhere in this crate.
pub trait LivenessCheck: Send + Sync {
    /// Registry key. Stable and never empty.
    fn name(&self) -> &str;

    /// Re-arms the window from now.
    fn reset(&self);

    /// Reports whether the window elapsed since the last reset.
    /// Must not re-arm the window.
    fn expired(&self) -> bool;
}
