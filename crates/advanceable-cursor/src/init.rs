//! Written-byte tracking for uninitialized allocations.

const WORD_BITS: usize = u64::BITS as usize;

/// One bit per buffer byte, set once the byte has been written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InitMap {
    words: Vec<u64>,
    len: usize,
}

impl InitMap {
    /// A map of `len` bytes, none of them written.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Record `start..start + len` as written.
    pub(crate) fn mark(&mut self, start: usize, len: usize) {
        debug_assert!(start + len <= self.len);
        for index in start..start + len {
            self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
        }
    }

    /// First byte of `start..start + len` that was never written, if any.
    ///
    /// Bytes past the end of the map count as unwritten.
    pub(crate) fn first_unwritten(&self, start: usize, len: usize) -> Option<usize> {
        (start..start + len).find(|&index| !self.is_written(index))
    }

    fn is_written(&self, index: usize) -> bool {
        index < self.len && self.words[index / WORD_BITS] & (1u64 << (index % WORD_BITS)) != 0
    }
}
