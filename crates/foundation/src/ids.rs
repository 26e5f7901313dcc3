/// Session-unique identifier. Never reused by the allocator that issued it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u64);

impl Id {
    pub const fn new(n: u64) -> Self {
        Id(n)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic id source. The first id issued is `Id(1)`.
#[derive(Debug, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> Id {
        self.last = self.last.wrapping_add(1);
        Id(self.last)
    }
}
