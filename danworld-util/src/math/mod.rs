use num_traits::{One, PrimInt, Zero};

pub mod position;
pub mod selection;
pub mod vector3;

/// Side length of a section cube, in blocks.
pub const SECTION_SIZE: i32 = 16;

#[inline]
pub fn ceil_div<T>(x: T, y: T) -> T
where
    T: PrimInt + Zero + One,
{
    let div = x / y;
    if (x ^ y) >= T::zero() && div * y != x {
        div + T::one()
    } else {
        div
    }
}
