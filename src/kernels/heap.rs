//! Binary max-heap of row indices stored in a caller-owned buffer
//!
//! Both the matrix-vector product and the support canonicalization need
//! to turn a set of distinct row indices into an ascending list without
//! allocating. The heap lives in the prefix of a slice; draining it moves
//! the current maximum to the end of the shrinking heap, which leaves the
//! prefix sorted in ascending order.

/// A max-heap over the prefix `slots[..len]` of a borrowed buffer
pub struct IndexHeap<'a> {
    slots: &'a mut [usize],
    len: usize,
}

impl<'a> IndexHeap<'a> {
    /// Creates an empty heap backed by `slots`
    pub fn new(slots: &'a mut [usize]) -> Self {
        Self { slots, len: 0 }
    }

    /// Treats every element of `slots` as an entry and restores the heap property
    pub fn from_slice(slots: &'a mut [usize]) -> Self {
        let n = slots.len();
        let mut heap = Self { slots, len: 0 };
        for hole in 0..n {
            let value = heap.slots[hole];
            heap.len = hole;
            heap.push(value);
        }
        heap
    }

    /// Number of entries currently in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the heap holds no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a value, sifting it up from the first free slot
    ///
    /// # Panics
    ///
    /// Panics if the backing buffer is full.
    pub fn push(&mut self, value: usize) {
        assert!(self.len < self.slots.len(), "index heap buffer is full");
        let mut hole = self.len;
        self.len += 1;
        while hole > 0 {
            let parent = (hole - 1) / 2;
            let above = self.slots[parent];
            if value < above {
                break;
            }
            self.slots[hole] = above;
            hole = parent;
        }
        self.slots[hole] = value;
    }

    /// Drains the heap in place, leaving `slots[..len]` ascending
    ///
    /// Returns the number of sorted entries.
    pub fn into_sorted(self) -> usize {
        let n = self.len;
        let slots = self.slots;
        for end in (1..n).rev() {
            // Take the last entry out and move the maximum into its slot
            let value = slots[end];
            slots[end] = slots[0];

            // Sift `value` down through the heap of size `end`
            let mut hole = 0;
            loop {
                let mut child = 2 * hole + 1;
                if child >= end {
                    break;
                }
                if child + 1 < end && slots[child + 1] > slots[child] {
                    child += 1;
                }
                let below = slots[child];
                if value >= below {
                    break;
                }
                slots[hole] = below;
                hole = child;
            }
            slots[hole] = value;
        }
        n
    }
}

/// Sorts row indices ascending in place with heapsort
pub fn heap_sort(values: &mut [usize]) {
    IndexHeap::from_slice(values).into_sorted();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heap_sort_small_cases() {
        let mut empty: Vec<usize> = vec![];
        heap_sort(&mut empty);
        assert!(empty.is_empty());

        let mut one = vec![7];
        heap_sort(&mut one);
        assert_eq!(one, vec![7]);

        let mut two = vec![9, 2];
        heap_sort(&mut two);
        assert_eq!(two, vec![2, 9]);
    }

    #[test]
    fn test_heap_sort_unsorted_rows() {
        let mut rows = vec![12, 3, 40, 0, 7, 5, 19, 1, 33];
        heap_sort(&mut rows);
        assert_eq!(rows, vec![0, 1, 3, 5, 7, 12, 19, 33, 40]);
    }

    #[test]
    fn test_heap_sort_already_sorted_and_reversed() {
        let mut ascending: Vec<usize> = (0..20).collect();
        heap_sort(&mut ascending);
        assert_eq!(ascending, (0..20).collect::<Vec<_>>());

        let mut descending: Vec<usize> = (0..20).rev().collect();
        heap_sort(&mut descending);
        assert_eq!(descending, (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn test_push_then_drain_uses_prefix_only() {
        let mut buf = vec![usize::MAX; 6];
        let mut heap = IndexHeap::new(&mut buf);
        for row in [5, 1, 4] {
            heap.push(row);
        }
        assert_eq!(heap.len(), 3);

        let n = heap.into_sorted();
        assert_eq!(n, 3);
        assert_eq!(&buf[..3], &[1, 4, 5]);
        assert_eq!(buf[3], usize::MAX);
    }

    #[test]
    #[should_panic(expected = "index heap buffer is full")]
    fn test_push_past_capacity() {
        let mut buf = vec![0; 1];
        let mut heap = IndexHeap::new(&mut buf);
        heap.push(1);
        heap.push(2);
    }
}
