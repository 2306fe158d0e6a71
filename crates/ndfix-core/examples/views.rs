//! Non-owning view examples.
//!
//! This example demonstrates:
//! - Viewing owned arrays, nested literals and slices
//! - Writing through mutable views
//! - Windows over the leading dimension
//! - Reinterpreting plain-data views as bytes
//!
//! Run with:
//! ```bash
//! cargo run --example views
//! ```

use ndfix_core::{dims, NDArray, NDView};

fn main() {
    println!("=== ndfix-core: Views ===\n");

    example_views();
    example_mutable_views();
    example_windows();
    example_bytes();

    println!("\n=== All examples completed successfully! ===");
}

fn example_views() {
    println!("--- Example 1: Shared Views ---");

    let array = NDArray::<i32, dims![2, 3]>::from_fn(|offset| offset as i32 * 10);
    let view = array.view();
    println!("view shape {:?}, row 1 = {:?}", view.size(), view.peel(1).as_slice());
    println!("view == array: {}", view == array);

    let nested = [[1.0f64, 2.0], [3.0, 4.0]];
    let over_nested = NDView::<f64, dims![2, 2]>::from_nested(&nested);
    println!("nested view back = {:?}", over_nested.back());

    let buffer: Vec<u32> = (0..8).collect();
    if let Some(over_slice) = NDView::<u32, dims![2, 2, 2]>::from_slice(&buffer) {
        for (coords, value) in over_slice.indexed_iter() {
            println!("  {:?} -> {}", coords, value);
        }
    }

    let unbound = NDView::<i32, dims![2, 3]>::default();
    println!("default view bound: {}", unbound.is_bound());
    println!();
}

fn example_mutable_views() {
    println!("--- Example 2: Mutable Views ---");

    let mut array = NDArray::<i32, dims![3, 2]>::default();
    {
        let mut view = array.view_mut();
        view.peel_mut(0).fill(1);
        *view.peel_mut(2).peel_mut(1) = 7;
        for value in view.iter_mut() {
            *value += 1;
        }
    }
    println!("array after writes: {:?}", array.as_slice());
    println!();
}

fn example_windows() {
    println!("--- Example 3: Windows ---");

    let array = NDArray::<u8, dims![6, 2]>::from_fn(|offset| offset as u8);
    let view = array.view();
    println!("first::<2>()     = {:?}", view.first::<2>().as_slice());
    println!("last::<2>()      = {:?}", view.last::<2>().as_slice());
    println!("subspan::<1, 3>() = {:?}", view.subspan::<1, 3>().as_slice());

    let copy = view.subspan::<4, 2>().to_ndarray();
    println!("copied window: {:?}", copy);
    println!();
}

fn example_bytes() {
    println!("--- Example 4: Byte Views ---");

    let array = NDArray::<u16, dims![2, 2]>::new([[0x0102, 0x0304], [0x0506, 0x0708]]);
    let bytes = array.view().as_bytes::<4>();
    println!("byte view shape {:?}", bytes.size());
    for row in 0..2 {
        println!("  row {}: {:02x?}", row, bytes.peel(row).as_slice());
    }

    let mut target = NDArray::<u16, dims![1, 2]>::default();
    target.view_mut().as_bytes_mut::<4>().fill(0xff);
    println!("after filling bytes: {:?}", target.as_slice());
}
