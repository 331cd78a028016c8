//! Stable line identity.

/// Opaque identifier of a line within one [`Document`](crate::Document).
///
/// Line numbers shift when lines are inserted or removed above; a `LineId`
/// stays attached to the same line until it is removed. Ids are never reused
/// by a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(u64);

impl LineId {
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for LineId {
    #[inline]
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl From<LineId> for u64 {
    #[inline]
    fn from(id: LineId) -> Self {
        id.as_raw()
    }
}
