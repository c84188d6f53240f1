use std::{collections::TryReserveError, ops::Deref};

/// Growable byte store holding everything consumed for one request.
///
/// Capacity starts at the configured size and doubles whenever an append
/// does not fit. It never shrinks.
#[derive(Debug, Clone)]
pub struct RequestBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl RequestBuffer {
    pub fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        let capacity = capacity.max(1);
        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;
        Ok(Self { data, capacity })
    }

    pub fn append(&mut self, bytes: &[u8]) -> Result<(), TryReserveError> {
        let needed = self.data.len().saturating_add(bytes.len());
        if needed > self.capacity {
            let mut capacity = self.capacity;
            while capacity < needed {
                capacity = capacity.saturating_mul(2);
            }
            self.data.try_reserve_exact(capacity - self.data.len())?;
            self.capacity = capacity;
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl Deref for RequestBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl PartialEq for RequestBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Eq for RequestBuffer {}
