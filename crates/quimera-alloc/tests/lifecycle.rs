//! Integration test: pool lifecycle through the public API.
//!
//! Fills a pool, frees part of it, grows it and copies it, checking slot
//! reuse order and byte accounting at every step.

use quimera_alloc::{Alignment, AllocError, PoolAllocator, PoolConfig};

#[test]
fn fill_free_grow_reuse() {
    let mut pool: PoolAllocator<u64> = PoolAllocator::with_capacity(3);
    let slots: Vec<usize> = (0..3).map(|v| pool.allocate(v * 10).unwrap()).collect();
    assert_eq!(slots, vec![0, 1, 2]);
    assert_eq!(pool.allocate(99), Err(AllocError::Exhausted { capacity: 3 }));

    assert_eq!(pool.deallocate(1), 10);
    assert_eq!(pool.allocated_bytes(), 2 * 8);

    pool.reserve_slots(PoolConfig::grown_capacity(pool.capacity() + 1));
    assert_eq!(pool.capacity(), 6);
    assert_eq!(pool.pool_size(), 6 * 8);

    // The released slot comes back before any grown slot.
    assert_eq!(pool.allocate(11).unwrap(), 1);
    assert_eq!(pool.allocate(30).unwrap(), 3);
    assert_eq!(pool.get(0), Some(&0));
    assert_eq!(pool.get(2), Some(&20));
    assert_eq!(pool.allocated_count(), 4);
    assert_eq!(pool.allocated_bytes(), 4 * 8);
}

#[test]
fn copy_into_larger_pool_keeps_slots() {
    let mut source: PoolAllocator<String> = PoolAllocator::with_capacity(2);
    source.allocate("a".to_string()).unwrap();
    source.allocate("b".to_string()).unwrap();

    let mut dest: PoolAllocator<String> = PoolAllocator::with_capacity(4);
    dest.allocate("stale".to_string()).unwrap();
    source.copy_to(&mut dest);

    assert_eq!(dest.capacity(), 4);
    assert_eq!(dest.allocated_count(), 2);
    assert_eq!(dest.get(0).map(String::as_str), Some("a"));
    assert_eq!(dest.get(1).map(String::as_str), Some("b"));
    assert_eq!(dest.allocate("c".to_string()).unwrap(), 2);
    assert_eq!(dest.allocate("d".to_string()).unwrap(), 3);
    assert!(!dest.can_allocate());
}

#[test]
fn explicit_geometry() {
    let config = PoolConfig::new(64, 16, Alignment::new(8).unwrap()).unwrap();
    assert_eq!(config.slots(), 4);
    assert!(matches!(
        PoolConfig::new(60, 16, Alignment::BYTE),
        Err(AllocError::InvalidConfig { .. })
    ));
}
