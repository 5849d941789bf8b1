use pretty_assertions::assert_eq;

use super::*;
use crate::Arena;

fn with_arena<R>(f: impl FnOnce(&mut Arena<'_>) -> R) -> R {
    let mut storage = [0u8; 512];
    let mut arena = Arena::new(&mut storage);
    f(&mut arena)
}

// === Block ===

#[test]
fn block_accessors() {
    let block = Block::new(7, 32, 10);
    assert_eq!(block.owner(), 7);
    assert_eq!(block.offset(), 32);
    assert_eq!(block.len(), 10);
    assert_eq!(block.end(), 42);
    assert!(!block.is_empty());
    assert!(Block::new(7, 0, 0).is_empty());
}

#[test]
fn alloc_error_messages() {
    let oom = AllocError::OutOfMemory {
        requested: 64,
        available: 12,
    };
    assert_eq!(
        oom.to_string(),
        "out of memory: requested 64 bytes, 12 available"
    );
    let overflow = AllocError::SizeOverflow {
        count: usize::MAX,
        size: 8,
    };
    assert!(overflow.to_string().starts_with("allocation size overflow"));
}

// === Typed helpers ===

#[test]
fn make_stores_default_value() {
    with_arena(|arena| {
        let value = arena.make::<u64>().expect("fits");
        assert_eq!(arena.load(&value), 0);
        assert_eq!(value.block().len(), 8);
    });
}

#[test]
fn make_uses_type_layout() {
    with_arena(|arena| {
        let value = arena.make::<u32>().expect("fits");
        let address = arena.bytes(&value.block()).as_ptr() as usize;
        assert_eq!(address % std::mem::align_of::<u32>(), 0);
        assert_eq!(value.block().len(), std::mem::size_of::<u32>());
    });
}

#[test]
fn store_then_load() {
    with_arena(|arena| {
        let value = arena.make::<i32>().expect("fits");
        arena.store(&value, -1234);
        assert_eq!(arena.load(&value), -1234);

        let flag = arena.make::<bool>().expect("fits");
        assert!(!arena.load(&flag));
        arena.store(&flag, true);
        assert!(arena.load(&flag));

        let letter = arena.make::<char>().expect("fits");
        arena.store(&letter, 'λ');
        assert_eq!(arena.load(&letter), 'λ');
    });
}

#[test]
fn make_slice_fills_defaults() {
    with_arena(|arena| {
        let slice = arena.make_slice::<f64>(6).expect("fits");
        assert_eq!(slice.len(), 6);
        assert_eq!(slice.block().len(), 6 * 8);
        for index in 0..slice.len() {
            assert_eq!(arena.get(&slice, index), 0.0);
        }
    });
}

#[test]
fn slice_elements_are_independent() {
    with_arena(|arena| {
        let slice = arena.make_slice::<u16>(4).expect("fits");
        for (index, value) in [10u16, 20, 30, 40].into_iter().enumerate() {
            arena.set(&slice, index, value);
        }
        let read: Vec<u16> = (0..4).map(|i| arena.get(&slice, i)).collect();
        assert_eq!(read, vec![10, 20, 30, 40]);
    });
}

#[test]
fn empty_slice_is_valid() {
    with_arena(|arena| {
        let slice = arena.make_slice::<u64>(0).expect("fits");
        assert!(slice.is_empty());
    });
}

#[test]
fn make_slice_size_overflow_is_reported() {
    with_arena(|arena| {
        let err = arena
            .make_slice::<u64>(usize::MAX)
            .expect_err("size overflows");
        assert_eq!(
            err,
            AllocError::SizeOverflow {
                count: usize::MAX,
                size: 8,
            }
        );
    });
}

#[test]
fn make_reports_exhaustion() {
    let mut storage = [0u8; 8];
    let mut arena = Arena::new(&mut storage);
    assert!(matches!(
        arena.make_slice::<u64>(4),
        Err(AllocError::OutOfMemory { .. })
    ));
}

#[test]
#[should_panic(expected = "out of bounds")]
fn slice_index_is_checked() {
    with_arena(|arena| {
        let slice = arena.make_slice::<u8>(2).expect("fits");
        let _ = arena.get(&slice, 2);
    });
}

#[test]
fn destroy_releases_through_free() {
    with_arena(|arena| {
        let value = arena.make::<u64>().expect("fits");
        let slice = arena.make_slice::<u8>(3).expect("fits");
        let offset = arena.offset();
        arena.destroy(value);
        arena.destroy_slice(slice);
        // Arena `free` is a no-op; the bytes stay claimed until `free_all`.
        assert_eq!(arena.offset(), offset);
    });
}

// === Dynamic dispatch ===

#[test]
fn core_operations_work_through_dyn() {
    with_arena(|arena| {
        let alloc: &mut dyn Allocator = arena;
        let block = alloc.alloc(4, 4).expect("fits");
        alloc.bytes_mut(&block).copy_from_slice(b"kiel");
        let grown = alloc.realloc(block, 5, 4).expect("fits");
        assert_eq!(alloc.bytes(&grown), b"kiel\0");
        alloc.free(grown, 4);
        alloc.free_all();
    });
}
