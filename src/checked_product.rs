//! Overflow-checked products of iterators, the multiplicative counterpart to [`checked_sum`].

use num_traits::{CheckedMul, One};

/// Iterator extension multiplying its items together, giving `None` on overflow.
pub trait CheckedProduct<T> {
    fn checked_product(self) -> Option<T>;
}

impl<T, I> CheckedProduct<T> for I
where
    T: CheckedMul + One,
    I: IntoIterator<Item = T>,
{
    fn checked_product(self) -> Option<T> {
        self.into_iter()
            .try_fold(T::one(), |product, value| product.checked_mul(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplies_every_item() {
        assert_eq!([2u32, 3, 7].checked_product(), Some(42));
    }

    #[test]
    fn empty_product_is_one() {
        assert_eq!(Vec::<i64>::new().checked_product(), Some(1));
    }

    #[test]
    fn overflow_gives_none_in_either_order() {
        assert_eq!([200u8, 2].checked_product(), None);
        assert_eq!([2u8, 200].checked_product(), None);
        assert_eq!([-1i8, i8::MIN].checked_product(), None);
    }
}
