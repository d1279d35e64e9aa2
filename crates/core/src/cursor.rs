//! Virtual cursor position
//!
//! While cursor calls are suppressed the host still gets a consistent
//! cursor: whatever it last set is what it reads back. Both coordinates
//! share one atomic word so a reader never sees x from one write and y from
//! another.

use std::sync::atomic::{AtomicU64, Ordering};

use inputgate_sdk::Point;

fn pack(point: Point) -> u64 {
    ((point.x as u32 as u64) << 32) | point.y as u32 as u64
}

fn unpack(bits: u64) -> Point {
    Point::new((bits >> 32) as u32 as i32, bits as u32 as i32)
}

/// Last cursor position the host tried to set while suppressed
#[derive(Debug, Default)]
pub struct VirtualCursor {
    bits: AtomicU64,
}

impl VirtualCursor {
    /// Starts at the origin
    pub const fn new() -> Self {
        Self {
            bits: AtomicU64::new(0),
        }
    }

    pub fn store(&self, point: Point) {
        self.bits.store(pack(point), Ordering::Release);
    }

    pub fn load(&self) -> Point {
        unpack(self.bits.load(Ordering::Acquire))
    }
}
