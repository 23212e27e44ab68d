//! Pagination utilities for service layer
//!
//! Listings are windows `[position, position + size)` over a sorted sequence.

/// Offset/size window
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    /// 0-based index of the first item
    pub position: usize,
    /// maximum number of items
    pub size: usize,
}

impl Window {
    pub fn new(position: usize, size: usize) -> Self { Self { position, size } }

    /// Slice `items` to this window; out-of-range windows yield an empty result.
    pub fn slice<T: Clone>(self, items: &[T]) -> Vec<T> {
        let start = self.position.min(items.len());
        let end = self.position.saturating_add(self.size).min(items.len());
        items[start..end].to_vec()
    }
}

impl Default for Window {
    fn default() -> Self { Self { position: 0, size: 25 } }
}

#[cfg(test)]
mod tests {
    use super::Window;

    #[test]
    fn slice_within_bounds() {
        let items = [1, 2, 3, 4, 5];
        assert_eq!(Window::new(1, 2).slice(&items), vec![2, 3]);
    }

    #[test]
    fn slice_clamps_past_end() {
        let items = [1, 2, 3];
        assert_eq!(Window::new(2, 10).slice(&items), vec![3]);
        assert!(Window::new(7, 2).slice(&items).is_empty());
        assert!(Window::new(0, 0).slice(&items).is_empty());
    }

    #[test]
    fn huge_size_does_not_overflow() {
        let items = [1, 2];
        assert_eq!(Window::new(1, usize::MAX).slice(&items), vec![2]);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Window::default();
        assert_eq!(d.position, 0);
        assert_eq!(d.size, 25);
    }
}
