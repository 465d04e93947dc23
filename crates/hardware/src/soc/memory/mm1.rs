//! MM1 memory module: a zero-initialised byte array of 16, 32 or 64 KiB.

use super::{MemoryKind, MemoryModule};

/// Capacities an MM1 module is manufactured in.
pub const MM1_CAPACITIES: [usize; 3] = [16 * 1024, 32 * 1024, 64 * 1024];

/// MM1 byte-array memory module.
#[derive(Clone, PartialEq, Eq)]
pub struct Mm1 {
    data: Box<[u8]>,
}

impl std::fmt::Debug for Mm1 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mm1").field("capacity", &self.data.len()).finish()
    }
}

impl Mm1 {
    /// Creates a module of `capacity` bytes, `None` unless it is one of [`MM1_CAPACITIES`].
    pub fn with_capacity(capacity: usize) -> Option<Self> {
        MM1_CAPACITIES.contains(&capacity).then(|| Self {
            data: vec![0; capacity].into_boxed_slice(),
        })
    }

    /// 16 KiB module.
    pub fn new_16k() -> Self {
        Self {
            data: vec![0; MM1_CAPACITIES[0]].into_boxed_slice(),
        }
    }

    /// 32 KiB module.
    pub fn new_32k() -> Self {
        Self {
            data: vec![0; MM1_CAPACITIES[1]].into_boxed_slice(),
        }
    }

    /// 64 KiB module.
    pub fn new_64k() -> Self {
        Self {
            data: vec![0; MM1_CAPACITIES[2]].into_boxed_slice(),
        }
    }

    /// Raw view of the whole module.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn block_range(&self, address: usize, len: usize) -> Option<std::ops::Range<usize>> {
        let end = address.checked_add(len)?;
        (len > 0 && end < self.data.len()).then_some(address..end)
    }
}

impl MemoryModule for Mm1 {
    fn kind(&self) -> MemoryKind {
        MemoryKind::Mm1
    }

    fn capacity(&self) -> usize {
        self.data.len()
    }

    fn get(&self, address: usize) -> Option<u8> {
        self.data.get(address).copied()
    }

    fn set(&mut self, address: usize, value: u8) -> bool {
        self.data.get_mut(address).map(|byte| *byte = value).is_some()
    }

    fn get_block(&self, address: usize, out: &mut [u8]) -> bool {
        let Some(range) = self.block_range(address, out.len()) else {
            return false;
        };
        out.copy_from_slice(&self.data[range]);
        true
    }

    fn set_block(&mut self, address: usize, data: &[u8]) -> bool {
        let Some(range) = self.block_range(address, data.len()) else {
            return false;
        };
        self.data[range].copy_from_slice(data);
        true
    }
}
