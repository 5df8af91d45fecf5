/// Per-connection counter handing out request sequence ids.
///
/// Starts at 1 and wraps around after `u32::MAX`, skipping 0 so a zeroed
/// header is never mistaken for a live request.
#[derive(Debug, Clone)]
pub struct SequenceId {
    next: u32,
}

impl Default for SequenceId {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceId {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    #[inline]
    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next = match self.next.wrapping_add(1) {
            0 => 1,
            n => n,
        };
        id
    }

    /// The id the next call to [`Self::next_id`] will return.
    pub fn peek(&self) -> u32 {
        self.next
    }
}
