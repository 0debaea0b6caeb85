/// Read-only cell access used by the ray caster.
///
/// Cells are addressed by `(row, col)`; rows grow along world +y and columns along +x.
pub trait Grid {
    type Cell;

    fn rows(&self) -> u32;
    fn cols(&self) -> u32;

    /// Get the cell with bounds checking.
    fn get(&self, row: u32, col: u32) -> Option<&Self::Cell>;
}

impl<G: Grid + ?Sized> Grid for &G {
    type Cell = G::Cell;

    fn rows(&self) -> u32 {
        (**self).rows()
    }

    fn cols(&self) -> u32 {
        (**self).cols()
    }

    fn get(&self, row: u32, col: u32) -> Option<&Self::Cell> {
        (**self).get(row, col)
    }
}

/// Default obstacle predicate: a cell blocks a ray when it holds a "truthy" value.
pub trait Occupancy {
    fn is_obstacle(&self) -> bool;
}

impl Occupancy for bool {
    #[inline]
    fn is_obstacle(&self) -> bool {
        *self
    }
}

impl<T> Occupancy for Option<T> {
    #[inline]
    fn is_obstacle(&self) -> bool {
        self.is_some()
    }
}

macro_rules! impl_integer_occupancy {
    ($($ty:ty),*) => {
        $(
            impl Occupancy for $ty {
                #[inline]
                fn is_obstacle(&self) -> bool {
                    *self != 0
                }
            }
        )*
    };
}

impl_integer_occupancy!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);
