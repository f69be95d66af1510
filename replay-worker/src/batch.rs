use crate::types::EnrichedRecord;

/// Buffers records for a single source file, handing back a full batch every
/// time the configured capacity is reached. One accumulator is created per
/// file and discarded at end of file, so a batch never mixes files.
pub struct BatchAccumulator {
    capacity: usize,
    buffer: Vec<EnrichedRecord>,
}

impl BatchAccumulator {
    /// Capacity must be positive; a zero batch size is rejected at
    /// configuration load, before any accumulator exists.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "batch capacity must be positive");
        Self {
            capacity,
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record. Returns the drained batch when it reaches capacity.
    pub fn push(&mut self, record: EnrichedRecord) -> Option<Vec<EnrichedRecord>> {
        self.buffer.push(record);
        if self.buffer.len() == self.capacity {
            let batch = std::mem::replace(&mut self.buffer, Vec::with_capacity(self.capacity));
            Some(batch)
        } else {
            None
        }
    }

    /// Hands back the final partial batch at end of file, if any rows remain.
    pub fn finish(self) -> Option<Vec<EnrichedRecord>> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.buffer)
        }
    }
}
