//! Basic fixed-shape array examples.
//!
//! This example demonstrates:
//! - Creating arrays from nested literals and generator functions
//! - Checked access with `at` and its error report
//! - Peeling the leading dimension with `[]`
//! - Fill, swap and compile-time reflection
//!
//! Run with:
//! ```bash
//! cargo run --example basic_ndarray
//! ```

use ndfix_core::{dims, Extent, NDArray, NdError, Shape};

fn main() -> anyhow::Result<()> {
    println!("=== ndfix-core: Basic Arrays ===\n");

    example_creation();
    example_checked_access()?;
    example_peeling();
    example_fill_swap();
    example_reflection();

    println!("\n=== All examples completed successfully! ===");
    Ok(())
}

fn example_creation() {
    println!("--- Example 1: Creation ---");

    let literal = NDArray::<i32, dims![2, 3]>::new([[1, 2, 3], [4, 5, 6]]);
    println!("From nested literal: {:?}", literal);

    let generated = NDArray::<usize, dims![2, 2, 2]>::from_fn(|offset| offset * offset);
    println!("From generator: {:?}", generated.as_slice());

    let constant = NDArray::<f32, dims![3]>::from_elem(0.5);
    println!("Constant: {:?}", constant.as_slice());
    println!();
}

fn example_checked_access() -> anyhow::Result<()> {
    println!("--- Example 2: Checked Access ---");

    let mut array = NDArray::<i32, dims![2, 3]>::from_fn(|offset| offset as i32);
    println!("at([1, 2]) = {}", array.at([1, 2])?);

    *array.at_mut([0, 1])? = 100;
    println!("after at_mut([0, 1]): {:?}", array.as_slice());

    match array.at([0, 3]) {
        Err(NdError::OutOfRange {
            axis,
            index,
            extent,
        }) => println!("rejected axis {}: {} is not below {}", axis, index, extent),
        Ok(v) => println!("unexpected element {}", v),
    }
    if let Err(err) = array.at([5, 5]) {
        println!("error message: {}", err);
    }
    println!();
    Ok(())
}

fn example_peeling() {
    println!("--- Example 3: Peeling ---");

    let mut array = NDArray::<u8, dims![2, 2, 3]>::from_fn(|offset| offset as u8);
    let plane = &array[1];
    println!("array[1] has shape {:?}: {:?}", plane.size(), plane.as_slice());
    println!("array[1][0] = {:?}", array[1][0].as_slice());
    println!("array[1][0][2] = {}", array[1][0][2]);

    array[0][1][0] = 99;
    println!("after array[0][1][0] = 99: {:?}", array.as_slice());
    println!();
}

fn example_fill_swap() {
    println!("--- Example 4: Fill and Swap ---");

    let mut a = NDArray::<char, dims![2, 2]>::default();
    let mut b = NDArray::<char, dims![2, 2]>::default();
    a.fill('a');
    b.fill('b');
    a.swap(&mut b);
    println!("a = {:?}", a.as_slice());
    println!("b = {:?}", b.as_slice());
    println!();
}

fn example_reflection() {
    println!("--- Example 5: Compile-Time Reflection ---");

    type S = dims![4, 5, 6];
    println!("rank = {}", S::RANK);
    println!("element count = {}", S::LEN);
    println!("extent of axis 2 = {}", <S as Extent<2>>::EXTENT);
    println!("extents = {:?}", S::extents());
}
