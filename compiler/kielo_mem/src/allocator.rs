//! The allocation capability.
//!
//! An [`Allocator`] hands out [`Block`] handles. Four operations form the
//! core contract (`alloc`, `realloc`, `free`, `free_all`) and two accessors
//! expose a block's bytes. Everything typed is built on top as provided
//! methods, so callers never track size/alignment pairs by hand:
//!
//! ```text
//! make::<T>()          -> alloc(T::SIZE, T::ALIGN) + store(T::default())
//! make_slice::<T>(n)   -> alloc(n * T::SIZE, T::ALIGN) + n defaults
//! destroy(typed)       -> free(block, T::ALIGN)
//! ```

use std::marker::PhantomData;

use crate::plain::Plain;

/// Handle to a block of allocator-owned memory.
///
/// `owner` identifies the allocator that produced the block; `offset` and
/// `len` locate it inside that allocator's storage. Handles are plain data:
/// copying one does not copy the memory it names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    owner: u32,
    offset: usize,
    len: usize,
}

impl Block {
    /// Create a handle. Allocator implementations call this; users receive
    /// blocks from [`Allocator::alloc`].
    #[inline]
    pub const fn new(owner: u32, offset: usize, len: usize) -> Self {
        Self { owner, offset, len }
    }

    /// Identity of the allocator that owns this block.
    #[inline]
    pub const fn owner(&self) -> u32 {
        self.owner
    }

    /// Byte offset of the block inside its allocator's storage.
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Size of the block in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the block is zero-sized.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the block.
    #[inline]
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }

    #[inline]
    pub(crate) fn set_len(&mut self, len: usize) {
        self.len = len;
    }
}

/// Recoverable allocation failures.
///
/// Running out of a fixed-size arena is an expected outcome, so it is a value
/// the caller handles rather than a fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AllocError {
    /// Not enough space left for the request (including alignment padding).
    #[error("out of memory: requested {requested} bytes, {available} available")]
    OutOfMemory { requested: usize, available: usize },
    /// `count * size` does not fit in `usize`.
    #[error("allocation size overflow: {count} elements of {size} bytes")]
    SizeOverflow { count: usize, size: usize },
}

/// A single `T` stored in allocator memory.
#[derive(Debug, PartialEq, Eq)]
pub struct Typed<T> {
    block: Block,
    _marker: PhantomData<T>,
}

// Manual impls: a handle is copyable regardless of `T`.
impl<T> Clone for Typed<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Typed<T> {}

impl<T> Typed<T> {
    fn new(block: Block) -> Self {
        Self {
            block,
            _marker: PhantomData,
        }
    }

    /// The untyped block backing this value.
    pub fn block(&self) -> Block {
        self.block
    }
}

/// `len` consecutive `T`s stored in allocator memory.
#[derive(Debug, PartialEq, Eq)]
pub struct TypedSlice<T> {
    block: Block,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> Clone for TypedSlice<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedSlice<T> {}

impl<T> TypedSlice<T> {
    fn new(block: Block, len: usize) -> Self {
        Self {
            block,
            len,
            _marker: PhantomData,
        }
    }

    /// The untyped block backing this slice.
    pub fn block(&self) -> Block {
        self.block
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the slice holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// The allocation capability.
///
/// The typed helpers are provided methods bounded by `Self: Sized`, which
/// keeps the core operations usable through `&mut dyn Allocator`.
pub trait Allocator {
    /// Allocate `size` zero-filled bytes aligned to at least `align`.
    ///
    /// # Panics
    ///
    /// Implementations panic when `align` is zero or not a power of two.
    fn alloc(&mut self, size: usize, align: usize) -> Result<Block, AllocError>;

    /// Resize `block` to `new_size`, moving it if needed.
    ///
    /// The first `min(block.len(), new_size)` bytes are preserved and any
    /// added bytes are zero.
    fn realloc(&mut self, block: Block, new_size: usize, align: usize)
        -> Result<Block, AllocError>;

    /// Release a block. `align` must match the one passed to `alloc`.
    fn free(&mut self, block: Block, align: usize);

    /// Release every block at once.
    fn free_all(&mut self);

    /// Bytes of a live block.
    fn bytes(&self, block: &Block) -> &[u8];

    /// Mutable bytes of a live block.
    fn bytes_mut(&mut self, block: &Block) -> &mut [u8];

    /// Allocate one `T` initialised to `T::default()`.
    fn make<T: Plain>(&mut self) -> Result<Typed<T>, AllocError>
    where
        Self: Sized,
    {
        let block = self.alloc(T::SIZE, T::ALIGN)?;
        let value = Typed::new(block);
        self.store(&value, T::default());
        Ok(value)
    }

    /// Allocate `count` values of `T`, each initialised to `T::default()`.
    fn make_slice<T: Plain>(&mut self, count: usize) -> Result<TypedSlice<T>, AllocError>
    where
        Self: Sized,
    {
        let size = count
            .checked_mul(T::SIZE)
            .ok_or(AllocError::SizeOverflow {
                count,
                size: T::SIZE,
            })?;
        let block = self.alloc(size, T::ALIGN)?;
        let slice = TypedSlice::new(block, count);
        let default = T::default();
        for index in 0..count {
            self.set(&slice, index, default);
        }
        Ok(slice)
    }

    /// Read the value behind a typed handle.
    fn load<T: Plain>(&self, value: &Typed<T>) -> T
    where
        Self: Sized,
    {
        T::read_from(self.bytes(&value.block))
    }

    /// Overwrite the value behind a typed handle.
    fn store<T: Plain>(&mut self, value: &Typed<T>, new_value: T)
    where
        Self: Sized,
    {
        new_value.write_to(self.bytes_mut(&value.block));
    }

    /// Read element `index` of a typed slice.
    ///
    /// # Panics
    ///
    /// Panics if `index >= slice.len()`.
    fn get<T: Plain>(&self, slice: &TypedSlice<T>, index: usize) -> T
    where
        Self: Sized,
    {
        assert!(
            index < slice.len,
            "index {index} out of bounds for typed slice of length {}",
            slice.len
        );
        let start = index * T::SIZE;
        T::read_from(&self.bytes(&slice.block)[start..start + T::SIZE])
    }

    /// Overwrite element `index` of a typed slice.
    ///
    /// # Panics
    ///
    /// Panics if `index >= slice.len()`.
    fn set<T: Plain>(&mut self, slice: &TypedSlice<T>, index: usize, new_value: T)
    where
        Self: Sized,
    {
        assert!(
            index < slice.len,
            "index {index} out of bounds for typed slice of length {}",
            slice.len
        );
        let start = index * T::SIZE;
        new_value.write_to(&mut self.bytes_mut(&slice.block)[start..start + T::SIZE]);
    }

    /// Tear down a value and release its memory with the layout it was made with.
    ///
    /// `Plain` values are `Copy`, so there is no destructor to run before
    /// the release.
    fn destroy<T: Plain>(&mut self, value: Typed<T>)
    where
        Self: Sized,
    {
        self.free(value.block, T::ALIGN);
    }

    /// Tear down every element of a slice and release its memory.
    fn destroy_slice<T: Plain>(&mut self, slice: TypedSlice<T>)
    where
        Self: Sized,
    {
        self.free(slice.block, T::ALIGN);
    }
}

#[cfg(test)]
mod tests;
