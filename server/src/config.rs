use std::time::Duration;

/// Default scratch buffer size per connection (1 KiB)
pub const DEFAULT_BUFFER_CAPACITY: usize = 1 << 10;
/// Default starting capacity of a request's byte store (1 KiB)
pub const DEFAULT_INITIAL_REQUEST_CAPACITY: usize = 1 << 10;
/// Default ceiling on header plus body bytes (8 KiB)
pub const DEFAULT_MAX_REQUEST_SIZE: usize = 1 << 13;

/// Limits applied while reading a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadLimits {
    pub buffer_capacity: usize,
    pub initial_request_capacity: usize,
    pub max_request_size: usize,
    /// Deadline for each read from the client. `None` blocks indefinitely.
    pub read_timeout: Option<Duration>,
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            initial_request_capacity: DEFAULT_INITIAL_REQUEST_CAPACITY,
            max_request_size: DEFAULT_MAX_REQUEST_SIZE,
            read_timeout: None,
        }
    }
}

impl ReadLimits {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_initial_request_capacity(mut self, capacity: usize) -> Self {
        self.initial_request_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_max_request_size(mut self, size: usize) -> Self {
        self.max_request_size = size;
        self
    }

    #[must_use]
    pub fn with_read_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.read_timeout = timeout;
        self
    }
}
