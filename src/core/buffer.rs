//! Input buffer
//!
//! Append-only byte store fed by the read loop. Capacity grows in fixed
//! chunks and never shrinks, so offsets recorded by the page index stay
//! valid for the whole session.

/// Default initial capacity in bytes
pub const BASE_CAPACITY: usize = 4096;

/// Default growth increment in bytes (also the default read size)
pub const CHUNK_SIZE: usize = 2048;

/// Growable, append-only input buffer
#[derive(Debug, Clone)]
pub struct InputBuffer {
    /// Bytes received so far
    data: Vec<u8>,
    /// Allocated capacity, always a base plus a whole number of chunks
    capacity: usize,
    /// Growth increment
    chunk: usize,
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBuffer {
    /// Create a buffer with the default base capacity and chunk size
    pub fn new() -> Self {
        Self::with_sizes(BASE_CAPACITY, CHUNK_SIZE)
    }

    /// Create a buffer with a custom base capacity and growth chunk
    pub fn with_sizes(base_capacity: usize, chunk: usize) -> Self {
        let chunk = chunk.max(1);
        let mut buffer = Self {
            data: Vec::new(),
            capacity: 0,
            chunk,
        };
        buffer.reserve_to(base_capacity.max(1));
        buffer
    }

    /// Number of bytes written
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if nothing has been written yet
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Growth increment
    pub fn chunk_size(&self) -> usize {
        self.chunk
    }

    /// All bytes written so far
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Append bytes to the end of the buffer.
    ///
    /// If the new length would reach the current capacity the buffer grows
    /// first, keeping at least one spare chunk of headroom for the next read.
    ///
    /// Aborts the process if the allocation fails.
    pub fn append(&mut self, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }

        let needed = self.data.len() + bytes.len();
        if needed >= self.capacity {
            let chunks = (needed - self.capacity) / self.chunk + 1;
            self.reserve_to(self.capacity + chunks * self.chunk);
        }

        self.data.extend_from_slice(bytes);
        debug_assert!(self.data.len() < self.capacity);
    }

    /// Grow the allocation to exactly `target` bytes
    fn reserve_to(&mut self, target: usize) {
        let additional = target - self.data.len();
        if let Err(e) = self.data.try_reserve_exact(additional) {
            tracing::error!(target, "input buffer allocation failed: {}", e);
            std::process::abort();
        }
        tracing::debug!(from = self.capacity, to = target, "input buffer grown");
        self.capacity = target;
    }
}
