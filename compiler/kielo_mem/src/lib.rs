//! Memory services for the Kielo compiler front-end.
//!
//! Two layers:
//! - [`Allocator`]: the capability every allocator implements, with typed
//!   helpers ([`Allocator::make`], [`Allocator::make_slice`],
//!   [`Allocator::destroy`]) layered over four core operations.
//! - [`Arena`]: a bump allocator over a caller-supplied buffer with nested
//!   [`ArenaRegion`] checkpoints and in-place resize of the last block.
//!
//! Allocations are [`Block`] handles (`owner`, `offset`, `len`) rather than
//! raw pointers. Bytes are reached through the allocator that owns them.
//!
//! There is no global allocator handle. Components that need memory take an
//! allocator by reference.

mod allocator;
mod arena;
mod plain;

pub use allocator::{AllocError, Allocator, Block, Typed, TypedSlice};
pub use arena::{Arena, ArenaRegion, MIN_ALIGNMENT};
pub use plain::Plain;
