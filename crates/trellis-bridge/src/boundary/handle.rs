use std::fmt;

/// Engine-owned token forwarded verbatim into exactly one entry call.
///
/// The bridge never interprets, copies or frees the value behind it. The type
/// is neither `Clone` nor `Copy`: whichever entry receives it by
/// value consumes it, so a handle cannot be replayed into a second call.
#[derive(PartialEq, Eq)]
pub struct EntryHandle(u64);

impl EntryHandle {
    /// Wraps a raw token produced by engine code.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Gives the raw token back to the engine, consuming the handle.
    #[inline]
    pub fn into_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EntryHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryHandle({:#x})", self.0)
    }
}
