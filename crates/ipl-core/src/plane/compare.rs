//! Plane comparison and counting

use super::{FOREGROUND, Plane, PlaneMut};

impl Plane {
    /// Count foreground samples.
    pub fn count_foreground(&self) -> usize {
        self.data().iter().filter(|&&s| s == FOREGROUND).count()
    }

    /// Check whether two planes have the same size and identical samples.
    pub fn equals(&self, other: &Plane) -> bool {
        self.sizes_equal(other) && self.data() == other.data()
    }

    /// Count pixels that differ between two planes of the same size.
    ///
    /// Returns `None` if the sizes differ.
    pub fn count_differences(&self, other: &Plane) -> Option<usize> {
        if !self.sizes_equal(other) {
            return None;
        }
        Some(
            self.data()
                .iter()
                .zip(other.data())
                .filter(|(a, b)| a != b)
                .count(),
        )
    }
}

impl PlaneMut {
    /// Count foreground samples.
    pub fn count_foreground(&self) -> usize {
        self.data().iter().filter(|&&s| s == FOREGROUND).count()
    }
}

impl PartialEq for Plane {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Plane {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_and_equals() {
        let a = Plane::from_fn(5, 5, |x, y| (x + y) % 2 == 0).unwrap();
        let b = a.deep_clone();
        assert_eq!(a.count_foreground(), 13);
        assert!(a.equals(&b));
        assert_eq!(a, b);
        assert_eq!(a.count_differences(&b), Some(0));

        let c = Plane::new(5, 5).unwrap();
        assert_ne!(a, c);
        assert_eq!(a.count_differences(&c), Some(13));
    }

    #[test]
    fn test_different_sizes_never_equal() {
        let a = Plane::new(4, 5).unwrap();
        let b = Plane::new(5, 4).unwrap();
        assert!(!a.equals(&b));
        assert_eq!(a.count_differences(&b), None);
    }
}
