//! Allocation behaviour of element access
//!
//! Installs a counting global allocator, so these tests live in their own
//! test binary. Counts are kept per thread to stay independent of the other
//! tests running in parallel.

use ndfix_core::{dims, NDArray};
use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::hint::black_box;

struct CountingAlloc;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

// SAFETY: every call is forwarded unchanged to the system allocator.
unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

fn allocations_during<F: FnOnce()>(f: F) -> usize {
    let before = ALLOCATIONS.with(Cell::get);
    f();
    ALLOCATIONS.with(Cell::get) - before
}

type Rank7 = NDArray<u8, dims![2, 2, 2, 2, 2, 2, 2]>;

#[test]
fn test_checked_access_at_rank_seven_does_not_allocate() {
    let mut array = Rank7::from_fn(|offset| offset as u8);

    let count = allocations_during(|| {
        for _ in 0..1000 {
            assert_eq!(array.at(black_box([1; 7])), Ok(&127));
            assert!(array.at(black_box([0, 0, 0, 0, 0, 0, 2])).is_err());
            assert_eq!(array.view().get(black_box([0, 0, 0, 0, 0, 0, 1])), Some(&1));
        }
        *array.at_mut([1, 0, 0, 0, 0, 0, 0]).unwrap() = 0;
        *array.view_mut().at_mut([0, 1, 0, 0, 0, 0, 0]).unwrap() = 0;
    });
    assert_eq!(count, 0);
    assert_eq!(array[1][0][0][0][0][0][0], 0);
}

#[test]
fn test_indexed_iteration_at_rank_eight_does_not_allocate() {
    let array = NDArray::<u16, dims![2, 1, 2, 1, 2, 1, 2, 1]>::from_fn(|offset| offset as u16);

    let count = allocations_during(|| {
        let visited = array
            .indexed_iter()
            .filter(|(coords, _)| coords[6] == 1)
            .count();
        assert_eq!(visited, 8);
    });
    assert_eq!(count, 0);
}
