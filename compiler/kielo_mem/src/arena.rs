//! Region-based bump arena over a caller-supplied buffer.
//!
//! The arena advances a single cursor (`offset`) through a fixed buffer.
//! Individual blocks are never reclaimed, with two exceptions:
//!
//! - The most recent allocation can grow or shrink in place
//!   ([`Arena::resize_in_place`]), because its size is implied by the cursor.
//! - An [`ArenaRegion`] checkpoint rewinds the cursor when it ends, dropping
//!   everything allocated inside it at once.
//!
//! # Layout
//!
//! ```text
//! data: [ live blocks ... | padding | last block | free ............ ]
//!        0                          ^            ^                   ^
//!                            last_allocation   offset            capacity
//! ```
//!
//! # Faults
//!
//! Calling-code defects (bad alignment, foreign blocks, region discipline
//! violations, relocating with open regions) panic. Running out of space is an
//! ordinary [`AllocError::OutOfMemory`].

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU32, Ordering};

use crate::allocator::{AllocError, Allocator, Block};

/// Minimum alignment of every arena block: twice the pointer width.
///
/// Requests with a smaller alignment are raised to this value so any block
/// can hold any primitive.
pub const MIN_ALIGNMENT: usize = 2 * std::mem::size_of::<usize>();

static NEXT_ARENA_ID: AtomicU32 = AtomicU32::new(1);

/// Round `addr` up to the next multiple of `align` (a power of two).
#[inline]
fn align_forward(addr: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two());
    let rem = addr & (align - 1);
    if rem == 0 {
        addr
    } else {
        addr + (align - rem)
    }
}

/// Bump allocator over a borrowed byte buffer.
///
/// The buffer stays owned by the caller; the arena never grows past it.
pub struct Arena<'buf> {
    data: &'buf mut [u8],
    /// Bytes in use, including alignment padding.
    offset: usize,
    /// Start of the most recent live allocation.
    last_allocation: Option<usize>,
    /// Number of open [`ArenaRegion`]s.
    region_count: u32,
    id: u32,
}

impl<'buf> Arena<'buf> {
    /// Create an arena over `data`. Capacity is `data.len()`.
    pub fn new(data: &'buf mut [u8]) -> Self {
        Self {
            data,
            offset: 0,
            last_allocation: None,
            region_count: 0,
            id: NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Identity stamped into every block this arena hands out.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Bytes in use.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total size of the backing buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes still available (before alignment padding).
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.offset
    }

    /// Offset of the most recent live allocation, if any.
    #[inline]
    pub fn last_allocation(&self) -> Option<usize> {
        self.last_allocation
    }

    /// Number of currently open regions.
    #[inline]
    pub fn region_count(&self) -> u32 {
        self.region_count
    }

    /// Open a region. Everything allocated through the returned guard is
    /// released when the region ends.
    ///
    /// Blocks allocated before the region cannot be resized in place while it
    /// is open. Once it ends, the last of them becomes resizable again.
    pub fn region(&mut self) -> ArenaRegion<'_, 'buf> {
        let saved_offset = self.offset;
        let saved_last = self.last_allocation.take();
        self.region_count += 1;
        tracing::trace!(
            arena = self.id,
            saved_offset,
            depth = self.region_count,
            "region begin"
        );
        ArenaRegion {
            arena: self,
            saved_offset,
            saved_last,
            ended: false,
        }
    }

    /// Grow or shrink `block` without moving it.
    ///
    /// Only the most recent allocation can be resized; every other block
    /// returns `false`. On success `block.len()` is updated.
    ///
    /// # Panics
    ///
    /// Panics if `block` was not allocated by this arena.
    pub fn resize_in_place(&mut self, block: &mut Block, new_size: usize) -> bool {
        self.assert_owned(block);

        let Some(last) = self.last_allocation else {
            return false;
        };
        if block.offset() != last {
            return false;
        }

        let current_size = self.offset - last;
        if new_size > self.capacity() - last {
            return false;
        }

        if new_size >= current_size {
            self.offset += new_size - current_size;
        } else {
            self.offset -= current_size - new_size;
        }
        block.set_len(new_size);
        true
    }

    /// Move the arena's state into a new value, leaving `self` empty.
    ///
    /// # Panics
    ///
    /// Panics if any region is open: regions refer back to this arena.
    pub fn relocate(&mut self) -> Arena<'buf> {
        assert!(
            self.region_count == 0,
            "cannot relocate arena {} with {} open region(s)",
            self.id,
            self.region_count
        );
        let moved = Arena {
            data: std::mem::take(&mut self.data),
            offset: self.offset,
            last_allocation: self.last_allocation.take(),
            region_count: 0,
            id: self.id,
        };
        self.offset = 0;
        self.id = NEXT_ARENA_ID.fetch_add(1, Ordering::Relaxed);
        moved
    }

    fn assert_owned(&self, block: &Block) {
        assert!(
            block.owner() == self.id,
            "block owned by arena {} used with arena {}",
            block.owner(),
            self.id
        );
        assert!(
            block.end() <= self.capacity(),
            "block {}..{} lies outside arena {} (capacity {})",
            block.offset(),
            block.end(),
            self.id,
            self.capacity()
        );
    }
}

impl Allocator for Arena<'_> {
    fn alloc(&mut self, size: usize, align: usize) -> Result<Block, AllocError> {
        assert!(
            align.is_power_of_two(),
            "alignment must be a power of two greater than 0, got {align}"
        );
        let align = align.max(MIN_ALIGNMENT);

        let base = self.data.as_ptr() as usize;
        let current = base + self.offset;
        let padding = align_forward(current, align) - current;
        let available = self.remaining();

        let required = match padding.checked_add(size) {
            Some(required) if required <= available => required,
            _ => {
                tracing::debug!(
                    arena = self.id,
                    size,
                    align,
                    available,
                    "arena exhausted"
                );
                return Err(AllocError::OutOfMemory {
                    requested: size,
                    available,
                });
            }
        };

        let start = self.offset + padding;
        self.offset += required;
        self.last_allocation = Some(start);
        self.data[start..start + size].fill(0);
        Ok(Block::new(self.id, start, size))
    }

    fn realloc(
        &mut self,
        block: Block,
        new_size: usize,
        align: usize,
    ) -> Result<Block, AllocError> {
        let old_size = block.len();

        let mut resized = block;
        if self.resize_in_place(&mut resized, new_size) {
            if new_size > old_size {
                self.data[block.offset() + old_size..resized.end()].fill(0);
            }
            return Ok(resized);
        }

        let fresh = self.alloc(new_size, align)?;
        let keep = old_size.min(new_size);
        self.data
            .copy_within(block.offset()..block.offset() + keep, fresh.offset());
        Ok(fresh)
    }

    /// Individual blocks are not reclaimed; see [`Arena::resize_in_place`]
    /// and [`ArenaRegion`].
    fn free(&mut self, _block: Block, _align: usize) {}

    /// Reset the cursor to zero. Bytes are re-zeroed lazily by later
    /// allocations.
    ///
    /// # Panics
    ///
    /// Panics if any region is open.
    fn free_all(&mut self) {
        assert!(
            self.region_count == 0,
            "arena {} has {} dangling region(s)",
            self.id,
            self.region_count
        );
        self.offset = 0;
        self.last_allocation = None;
    }

    fn bytes(&self, block: &Block) -> &[u8] {
        self.assert_owned(block);
        &self.data[block.offset()..block.end()]
    }

    fn bytes_mut(&mut self, block: &Block) -> &mut [u8] {
        self.assert_owned(block);
        &mut self.data[block.offset()..block.end()]
    }
}

impl fmt::Debug for Arena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("offset", &self.offset)
            .field("capacity", &self.capacity())
            .field("last_allocation", &self.last_allocation)
            .field("region_count", &self.region_count)
            .finish_non_exhaustive()
    }
}

/// A checkpoint on an [`Arena`].
///
/// Dereferences to the arena, so allocations and nested regions are made
/// through the guard. Ending the region (explicitly with [`end`](Self::end)
/// or by dropping it) rewinds the arena to the checkpoint. Regions nest LIFO;
/// the borrow on the arena rules out any other order.
pub struct ArenaRegion<'a, 'buf> {
    arena: &'a mut Arena<'buf>,
    saved_offset: usize,
    /// `last_allocation` outside the region, restored on end.
    saved_last: Option<usize>,
    ended: bool,
}

impl ArenaRegion<'_, '_> {
    /// Arena offset when the region began.
    pub fn saved_offset(&self) -> usize {
        self.saved_offset
    }

    /// End the region, releasing everything allocated inside it.
    ///
    /// # Panics
    ///
    /// Panics if the arena's region counter is not positive, or if its offset
    /// fell below the checkpoint while the region was open.
    pub fn end(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let arena = &mut *self.arena;
        assert!(
            arena.region_count > 0,
            "arena {} has an improper region counter",
            arena.id
        );
        assert!(
            arena.offset >= self.saved_offset,
            "arena {} offset {} is below region checkpoint {}",
            arena.id,
            arena.offset,
            self.saved_offset
        );

        arena.offset = self.saved_offset;
        arena.region_count -= 1;
        arena.last_allocation = self.saved_last;
        self.ended = true;
        tracing::trace!(
            arena = arena.id,
            offset = arena.offset,
            depth = arena.region_count,
            "region end"
        );
    }
}

impl<'buf> Deref for ArenaRegion<'_, 'buf> {
    type Target = Arena<'buf>;

    fn deref(&self) -> &Self::Target {
        &*self.arena
    }
}

impl DerefMut for ArenaRegion<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.arena
    }
}

impl Drop for ArenaRegion<'_, '_> {
    fn drop(&mut self) {
        // A fault already unwinding through this region leaves the arena as is.
        if self.ended || std::thread::panicking() {
            return;
        }
        self.release();
    }
}
