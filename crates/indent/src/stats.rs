//! Counters for observing how much work the driver does.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DriverStats {
    /// Lines run through the formatter.
    pub lines_recomputed: u64,
    /// Lines whose cached state was accepted during a walk.
    pub cache_hits: u64,
    /// Cache entries marked stale because an earlier line's end state changed.
    pub invalidations: u64,
}
