//! Ordered set of disjoint half-open ranges

use std::ops::Range;

/// Disjoint, sorted, non-adjacent ranges over buffer offsets
///
/// Every mutation leaves the set in canonical form: ranges are non-empty,
/// sorted by start, and separated by at least one uncovered offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkerSet {
    ranges: Vec<Range<usize>>,
}

impl MarkerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The canonical ranges, sorted by start
    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Whether the character starting at `offset` is covered
    pub fn contains(&self, offset: usize) -> bool {
        let idx = self.ranges.partition_point(|r| r.end <= offset);
        self.ranges.get(idx).is_some_and(|r| r.start <= offset)
    }

    /// Cover `range`, merging with overlapping or adjacent ranges
    pub fn add(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        // First range that ends at or after range.start (touching counts)
        let first = self.ranges.partition_point(|r| r.end < range.start);
        // One past the last range that starts at or before range.end
        let last = self.ranges.partition_point(|r| r.start <= range.end);

        let mut merged = range;
        if first < last {
            merged.start = merged.start.min(self.ranges[first].start);
            merged.end = merged.end.max(self.ranges[last - 1].end);
        }
        self.ranges.splice(first..last, std::iter::once(merged));
    }

    /// Uncover `range`, splitting ranges that straddle its ends
    pub fn remove(&mut self, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        let first = self.ranges.partition_point(|r| r.end <= range.start);
        let last = self.ranges.partition_point(|r| r.start < range.end);
        if first >= last {
            return;
        }

        let mut kept = Vec::with_capacity(2);
        let head = &self.ranges[first];
        if head.start < range.start {
            kept.push(head.start..range.start);
        }
        let tail = &self.ranges[last - 1];
        if tail.end > range.end {
            kept.push(range.end..tail.end);
        }
        self.ranges.splice(first..last, kept);
    }

    /// Shift ranges for `len` bytes inserted at `at`
    ///
    /// Insertion strictly inside a range extends it. Insertion at a range's
    /// start pushes the range right, insertion at its end leaves it alone.
    pub fn adjust_for_insert(&mut self, at: usize, len: usize) {
        if len == 0 {
            return;
        }
        for r in &mut self.ranges {
            if at <= r.start {
                r.start += len;
                r.end += len;
            } else if at < r.end {
                r.end += len;
            }
        }
    }

    /// Shrink or drop ranges for the deleted span `deleted`
    pub fn adjust_for_delete(&mut self, deleted: Range<usize>) {
        if deleted.is_empty() {
            return;
        }
        let len = deleted.end - deleted.start;
        let map = |x: usize| {
            if x <= deleted.start {
                x
            } else if x >= deleted.end {
                x - len
            } else {
                deleted.start
            }
        };

        let old = std::mem::take(&mut self.ranges);
        for r in old {
            let mapped = map(r.start)..map(r.end);
            if mapped.is_empty() {
                continue;
            }
            // Neighbours can become adjacent once the gap between them is gone
            match self.ranges.last_mut() {
                Some(prev) if prev.end >= mapped.start => prev.end = prev.end.max(mapped.end),
                _ => self.ranges.push(mapped),
            }
        }
    }

    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}
