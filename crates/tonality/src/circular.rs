//! Fixed-size sequences indexed modulo their length.

use std::ops::Index;

use serde::{Serialize, Serializer};

/// Reduce `n` into `[0, m)`.
///
/// Negative inputs are reflected through `m - bound_modulo(m, -n)` instead of
/// relying on `%`, which keeps the sign of the dividend in Rust.
pub const fn bound_modulo(m: i32, n: i32) -> i32 {
    if n < 0 {
        (m - bound_modulo(m, -n)) % m
    } else {
        n % m
    }
}

/// A fixed-size sequence whose `get` wraps any integer index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CircularSet<T, const N: usize> {
    items: [T; N],
}

impl<T, const N: usize> CircularSet<T, N> {
    pub const fn new(items: [T; N]) -> Self {
        Self { items }
    }

    /// Element at `index mod N`; negative indices count backwards from the end.
    pub fn get(&self, index: i32) -> &T {
        &self.items[bound_modulo(N as i32, index) as usize]
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T, const N: usize> Index<i32> for CircularSet<T, N> {
    type Output = T;

    fn index(&self, index: i32) -> &T {
        self.get(index)
    }
}

impl<T: Serialize, const N: usize> Serialize for CircularSet<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a CircularSet<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_modulo_positive() {
        assert_eq!(bound_modulo(12, 0), 0);
        assert_eq!(bound_modulo(12, 5), 5);
        assert_eq!(bound_modulo(12, 14), 2);
        assert_eq!(bound_modulo(7, 7), 0);
        assert_eq!(bound_modulo(7, 21), 0);
    }

    #[test]
    fn bound_modulo_negative() {
        assert_eq!(bound_modulo(12, -1), 11);
        assert_eq!(bound_modulo(12, -13), 11);
        assert_eq!(bound_modulo(7, -8), 6);
        // Multiples of m must land on 0, not m
        assert_eq!(bound_modulo(12, -12), 0);
        assert_eq!(bound_modulo(7, -14), 0);
    }

    #[test]
    fn bound_modulo_always_in_range() {
        for m in 1..=13 {
            for n in -50..=50 {
                let r = bound_modulo(m, n);
                assert!((0..m).contains(&r), "bound_modulo({m}, {n}) = {r}");
                assert_eq!(r, n.rem_euclid(m));
            }
        }
    }

    #[test]
    fn get_wraps_both_directions() {
        let set = CircularSet::new(['a', 'b', 'c']);
        assert_eq!(*set.get(0), 'a');
        assert_eq!(*set.get(4), 'b');
        assert_eq!(*set.get(-1), 'c');
        assert_eq!(set[-4], 'c');
        assert_eq!(set.len(), 3);
    }
}
