//! Growable byte sinks the payload codec writes into.

use crate::error::{ChannelError, Result};

/// A destination that can be sized once and then filled in place.
///
/// Encoders call [`ByteSink::resize_exact`] with the final serialized size,
/// fill [`ByteSink::bytes_mut`], and call [`ByteSink::release`] if anything
/// after the resize fails, so a failed encode never leaves partial output
/// behind.
pub trait ByteSink {
    /// Discards the current contents and resizes to exactly `len` zeroed bytes.
    fn resize_exact(&mut self, len: usize) -> Result<()>;

    fn bytes_mut(&mut self) -> &mut [u8];

    /// Drops the contents and frees the storage.
    fn release(&mut self);
}

impl ByteSink for Vec<u8> {
    fn resize_exact(&mut self, len: usize) -> Result<()> {
        self.clear();
        self.try_reserve_exact(len)
            .map_err(|_| ChannelError::Allocation(len))?;
        self.resize(len, 0);
        Ok(())
    }

    fn bytes_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }

    fn release(&mut self) {
        *self = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_discards_previous_contents() {
        let mut sink = vec![1u8, 2, 3, 4, 5];
        sink.resize_exact(3).unwrap();
        assert_eq!(sink, vec![0, 0, 0]);
        sink.bytes_mut()[1] = 9;
        assert_eq!(sink, vec![0, 9, 0]);
    }

    #[test]
    fn test_release() {
        let mut sink = vec![7u8; 64];
        sink.release();
        assert!(sink.is_empty());
        assert_eq!(sink.capacity(), 0);
    }

    #[test]
    fn test_allocation_failure() {
        let mut sink = Vec::new();
        assert_eq!(
            sink.resize_exact(usize::MAX),
            Err(ChannelError::Allocation(usize::MAX))
        );
        assert!(sink.is_empty());
    }
}
