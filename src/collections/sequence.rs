use std::cmp::Ordering;
use std::collections::TryReserveError;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("cannot append an absent element")]
    Absent,

    #[error("allocation failed: {0}")]
    Allocation(#[from] TryReserveError),
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    next: Option<usize>,
}

/// Singly-linked list whose nodes live in an index arena.
///
/// `first` and `last` are slot indices into `slots`; vacated slots are kept in
/// `vacant` and reused by later appends. Appending is O(1) through the tail
/// index, positional access walks the chain.
///
/// Filtering and range copies return `Sequence<&T>`: new node chains over
/// the same elements, so dropping them never touches the records they point at.
#[derive(Clone)]
pub struct Sequence<T> {
    slots: Vec<Option<Node<T>>>,
    vacant: Vec<usize>,
    first: Option<usize>,
    last: Option<usize>,
    len: usize,
}

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            first: None,
            last: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.first.is_none()
    }

    /// Appends at the tail. Accepts any value.
    pub fn push(&mut self, value: T) {
        let idx = self.alloc(Node { value, next: None });

        match self.last {
            Some(tail) => {
                if let Some(node) = self.node_mut(tail) {
                    node.next = Some(idx);
                }
            }
            None => self.first = Some(idx),
        }

        self.last = Some(idx);
        self.len += 1;
    }

    /// Strict append: refuses an absent element and reports allocation
    /// failure instead of aborting.
    pub fn try_push(&mut self, value: Option<T>) -> Result<(), SequenceError> {
        let value = value.ok_or(SequenceError::Absent)?;
        self.try_reserve(1)?;
        self.push(value);
        Ok(())
    }

    /// Makes sure the next `additional` appends will not allocate.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), SequenceError> {
        let reusable = self.vacant.len();
        if additional > reusable {
            self.slots.try_reserve(additional - reusable)?;
        }
        Ok(())
    }

    pub fn first(&self) -> Option<&T> {
        self.first.and_then(|idx| self.node(idx)).map(|node| &node.value)
    }

    pub fn last(&self) -> Option<&T> {
        self.last.and_then(|idx| self.node(idx)).map(|node| &node.value)
    }

    /// Element at zero-based `index`, walking the chain from the head.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.slot_at(index)
            .and_then(|idx| self.node(idx))
            .map(|node| &node.value)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let idx = self.slot_at(index)?;
        self.node_mut(idx).map(|node| &mut node.value)
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            sequence: self,
            cursor: self.first,
            remaining: self.len,
        }
    }

    pub fn for_each<F>(&self, action: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(action);
    }

    /// New sequence holding every element accepted by `predicate`, in order.
    pub fn search_all<P>(&self, mut predicate: P) -> Sequence<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().filter(|value| predicate(value)).collect()
    }

    pub fn find_first<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|value| predicate(value))
    }

    pub fn find_first_mut<P>(&mut self, predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        let (_, idx) = self.find_slot(predicate)?;
        self.node_mut(idx).map(|node| &mut node.value)
    }

    /// Unlinks the first element accepted by `predicate` and hands it back.
    /// `None` means nothing matched and the sequence is unchanged.
    pub fn remove_first<P>(&mut self, predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let (previous, idx) = self.find_slot(predicate)?;
        let node = self.slots.get_mut(idx)?.take()?;

        match previous {
            Some(prev) => {
                if let Some(prev_node) = self.node_mut(prev) {
                    prev_node.next = node.next;
                }
            }
            None => self.first = node.next,
        }

        if self.last == Some(idx) {
            self.last = previous;
        }

        self.release(idx);
        Some(node.value)
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let idx = self.first?;
        let node = self.slots.get_mut(idx)?.take()?;

        self.first = node.next;
        if self.first.is_none() {
            self.last = None;
        }

        self.release(idx);
        Some(node.value)
    }

    /// All-pairs exchange sort. Every ordered pair of positions `(a, b)` is
    /// visited in nested loops and the payloads swap when `compare(a, b)` is
    /// `Greater`. Nodes keep their place in the chain; only values move.
    ///
    /// The result is in non-increasing order under `compare`.
    pub fn exchange_sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let chain = self.chain();

        for &a in &chain {
            for &b in &chain {
                if a == b {
                    continue;
                }

                let ordering = match (self.node(a), self.node(b)) {
                    (Some(x), Some(y)) => compare(&x.value, &y.value),
                    _ => continue,
                };

                if ordering == Ordering::Greater {
                    self.swap_values(a, b);
                }
            }
        }
    }

    /// Fresh node chain over the elements at positions `[start, end)`.
    ///
    /// `None` when the sequence is empty or the range does not fit.
    pub fn copy_range(&self, start: usize, end: usize) -> Option<Sequence<&T>> {
        if self.is_empty() || end < start || end > self.len {
            return None;
        }

        Some(self.iter().skip(start).take(end - start).collect())
    }

    /// Consumes the sequence, handing every element to `destroyer` in order.
    pub fn destroy_with<F>(self, destroyer: F)
    where
        F: FnMut(T),
    {
        self.into_iter().for_each(destroyer);
    }

    fn node(&self, idx: usize) -> Option<&Node<T>> {
        self.slots.get(idx).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<T>> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn alloc(&mut self, node: Node<T>) -> usize {
        match self.vacant.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, idx: usize) {
        self.len -= 1;

        if self.len == 0 {
            self.slots.clear();
            self.vacant.clear();
        } else {
            self.vacant.push(idx);
        }
    }

    fn slot_at(&self, position: usize) -> Option<usize> {
        if position >= self.len {
            return None;
        }

        let mut cursor = self.first;
        for _ in 0..position {
            cursor = cursor.and_then(|idx| self.node(idx)).and_then(|node| node.next);
        }
        cursor
    }

    fn find_slot<P>(&self, mut predicate: P) -> Option<(Option<usize>, usize)>
    where
        P: FnMut(&T) -> bool,
    {
        let mut previous = None;
        let mut cursor = self.first;

        while let Some(idx) = cursor {
            let node = self.node(idx)?;
            if predicate(&node.value) {
                return Some((previous, idx));
            }
            previous = Some(idx);
            cursor = node.next;
        }

        None
    }

    fn chain(&self) -> Vec<usize> {
        let mut chain = Vec::with_capacity(self.len);
        let mut cursor = self.first;

        while let Some(idx) = cursor {
            chain.push(idx);
            cursor = self.node(idx).and_then(|node| node.next);
        }

        chain
    }

    fn swap_values(&mut self, a: usize, b: usize) {
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.slots.split_at_mut(high);

        if let (Some(Some(x)), Some(Some(y))) = (head.get_mut(low), tail.first_mut()) {
            std::mem::swap(&mut x.value, &mut y.value);
        }
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Sequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Sequence::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

pub struct Iter<'a, T> {
    sequence: &'a Sequence<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let sequence: &'a Sequence<T> = self.sequence;
        let node = sequence.node(self.cursor?)?;

        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

pub struct IntoIter<T>(Sequence<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(values: &[i32]) -> Sequence<i32> {
        values.iter().copied().collect()
    }

    fn to_vec<T: Copy>(sequence: &Sequence<T>) -> Vec<T> {
        sequence.iter().copied().collect()
    }

    #[test]
    fn test_new_sequence_is_empty() {
        let sequence: Sequence<i32> = Sequence::new();

        assert!(sequence.is_empty());
        assert_eq!(sequence.len(), 0);
        assert_eq!(sequence.first(), None);
        assert_eq!(sequence.last(), None);
        assert_eq!(sequence.get(0), None);
    }

    #[test]
    fn test_push_grows_by_one_and_sets_last() {
        let mut sequence = Sequence::new();

        for value in [7, 3, 9] {
            let before = sequence.len();
            sequence.push(value);
            assert_eq!(sequence.len(), before + 1);
            assert_eq!(sequence.last(), Some(&value));
        }

        assert_eq!(sequence.first(), Some(&7));
        assert_eq!(to_vec(&sequence), vec![7, 3, 9]);
    }

    #[test]
    fn test_try_push_rejects_absent_element() {
        let mut sequence = numbers(&[1]);

        let result = sequence.try_push(None);

        assert!(matches!(result, Err(SequenceError::Absent)));
        assert_eq!(sequence.len(), 1);

        sequence.try_push(Some(2)).unwrap();
        assert_eq!(sequence.last(), Some(&2));
    }

    #[test]
    fn test_get_by_index() {
        let sequence = numbers(&[10, 20]);

        assert_eq!(sequence.get(0), Some(&10));
        assert_eq!(sequence.get(1), Some(&20));
        assert_eq!(sequence.get(2), None);
    }

    #[test]
    fn test_get_mut_updates_in_place() {
        let mut sequence = numbers(&[1, 2, 3]);

        if let Some(value) = sequence.get_mut(1) {
            *value = 20;
        }

        assert_eq!(to_vec(&sequence), vec![1, 20, 3]);
    }

    #[test]
    fn test_search_all_keeps_order_and_shares_elements() {
        let sequence = numbers(&[1, 2, 3, 4, 5, 6]);

        let even = sequence.search_all(|value| value % 2 == 0);

        assert_eq!(even.len(), 3);
        let found: Vec<i32> = even.iter().map(|value| **value).collect();
        assert_eq!(found, vec![2, 4, 6]);
        assert!(std::ptr::eq(*even.first().unwrap(), sequence.get(1).unwrap()));
    }

    #[test]
    fn test_search_all_without_matches_is_empty() {
        let sequence = numbers(&[1, 3]);

        assert!(sequence.search_all(|value| *value > 10).is_empty());
    }

    #[test]
    fn test_for_each_visits_in_order() {
        let sequence = numbers(&[4, 5, 6]);
        let mut seen = Vec::new();

        sequence.for_each(|value| seen.push(*value));

        assert_eq!(seen, vec![4, 5, 6]);
    }

    #[test]
    fn test_find_first_returns_earliest_match() {
        let sequence = numbers(&[5, 8, 10, 12]);

        assert_eq!(sequence.find_first(|value| value % 2 == 0), Some(&8));
        assert_eq!(sequence.find_first(|value| *value > 100), None);
    }

    #[test]
    fn test_find_first_mut() {
        let mut sequence = numbers(&[5, 8, 10]);

        if let Some(value) = sequence.find_first_mut(|value| *value == 8) {
            *value = 80;
        }

        assert_eq!(to_vec(&sequence), vec![5, 80, 10]);
    }

    #[test]
    fn test_remove_first_match_then_find_is_absent() {
        let mut sequence = numbers(&[1, 2, 3]);

        let removed = sequence.remove_first(|value| *value == 2);

        assert_eq!(removed, Some(2));
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.find_first(|value| *value == 2), None);
        assert_eq!(to_vec(&sequence), vec![1, 3]);
    }

    #[test]
    fn test_remove_head_relinks_first() {
        let mut sequence = numbers(&[1, 2, 3]);

        assert_eq!(sequence.remove_first(|value| *value == 1), Some(1));

        assert_eq!(sequence.first(), Some(&2));
        assert_eq!(sequence.last(), Some(&3));
        assert_eq!(to_vec(&sequence), vec![2, 3]);
    }

    #[test]
    fn test_remove_tail_relinks_last() {
        let mut sequence = numbers(&[1, 2, 3]);

        assert_eq!(sequence.remove_first(|value| *value == 3), Some(3));
        assert_eq!(sequence.last(), Some(&2));

        sequence.push(4);
        assert_eq!(to_vec(&sequence), vec![1, 2, 4]);
    }

    #[test]
    fn test_remove_only_element_empties_sequence() {
        let mut sequence = numbers(&[42]);

        assert_eq!(sequence.remove_first(|value| *value == 42), Some(42));

        assert!(sequence.is_empty());
        assert_eq!(sequence.len(), 0);
        assert_eq!(sequence.first(), None);
        assert_eq!(sequence.last(), None);

        sequence.push(7);
        assert_eq!(sequence.first(), Some(&7));
        assert_eq!(sequence.last(), Some(&7));
    }

    #[test]
    fn test_remove_first_only_removes_one() {
        let mut sequence = numbers(&[2, 2, 2]);

        sequence.remove_first(|value| *value == 2);

        assert_eq!(sequence.len(), 2);
    }

    #[test]
    fn test_remove_without_match_is_noop() {
        let mut sequence = numbers(&[1, 2]);

        assert_eq!(sequence.remove_first(|value| *value == 9), None);
        assert_eq!(to_vec(&sequence), vec![1, 2]);
    }

    #[test]
    fn test_vacant_slots_are_reused_in_chain_order() {
        let mut sequence = numbers(&[1, 2, 3, 4]);

        sequence.remove_first(|value| *value == 2);
        sequence.remove_first(|value| *value == 1);
        sequence.push(5);
        sequence.push(6);

        assert_eq!(to_vec(&sequence), vec![3, 4, 5, 6]);
        assert_eq!(sequence.get(3), Some(&6));
        assert_eq!(sequence.last(), Some(&6));
    }

    #[test]
    fn test_pop_front() {
        let mut sequence = numbers(&[1, 2]);

        assert_eq!(sequence.pop_front(), Some(1));
        assert_eq!(sequence.pop_front(), Some(2));
        assert_eq!(sequence.pop_front(), None);
        assert!(sequence.is_empty());
    }

    #[test]
    fn test_exchange_sort_orders_descending() {
        let mut sequence = numbers(&[3, 1, 2, 5, 4]);

        sequence.exchange_sort_by(|a, b| a.cmp(b));

        assert_eq!(to_vec(&sequence), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_exchange_sort_with_reversed_comparator_orders_ascending() {
        let mut sequence = numbers(&[3, 1, 2]);

        sequence.exchange_sort_by(|a, b| b.cmp(a));

        assert_eq!(to_vec(&sequence), vec![1, 2, 3]);
    }

    #[test]
    fn test_exchange_sort_is_idempotent() {
        let mut once = numbers(&[9, 2, 7, 2, 5, 1]);
        once.exchange_sort_by(|a, b| a.cmp(b));
        let sorted = to_vec(&once);

        once.exchange_sort_by(|a, b| a.cmp(b));

        assert_eq!(to_vec(&once), sorted);
        assert_eq!(sorted, vec![9, 7, 5, 2, 2, 1]);
    }

    #[test]
    fn test_exchange_sort_after_removals() {
        let mut sequence = numbers(&[4, 8, 1, 6]);
        sequence.remove_first(|value| *value == 8);
        sequence.push(3);

        sequence.exchange_sort_by(|a, b| a.cmp(b));

        assert_eq!(to_vec(&sequence), vec![6, 4, 3, 1]);
        assert_eq!(sequence.last(), Some(&1));
    }

    #[test]
    fn test_exchange_sort_on_empty_and_single() {
        let mut empty: Sequence<i32> = Sequence::new();
        empty.exchange_sort_by(|a, b| a.cmp(b));
        assert!(empty.is_empty());

        let mut single = numbers(&[1]);
        single.exchange_sort_by(|a, b| a.cmp(b));
        assert_eq!(to_vec(&single), vec![1]);
    }

    #[test]
    fn test_copy_range_matches_source_slice() {
        let sequence = numbers(&[10, 20, 30, 40, 50]);

        let copy = sequence.copy_range(1, 4).unwrap();

        assert_eq!(copy.len(), 3);
        let copied: Vec<i32> = copy.iter().map(|value| **value).collect();
        assert_eq!(copied, vec![20, 30, 40]);

        drop(copy);
        assert_eq!(to_vec(&sequence), vec![10, 20, 30, 40, 50]);
    }

    #[test]
    fn test_copy_range_bounds() {
        let sequence = numbers(&[1, 2, 3]);

        assert!(sequence.copy_range(0, 3).is_some());
        assert!(sequence.copy_range(2, 1).is_none());
        assert!(sequence.copy_range(0, 4).is_none());
        assert_eq!(sequence.copy_range(1, 1).map(|copy| copy.len()), Some(0));

        let empty: Sequence<i32> = Sequence::new();
        assert!(empty.copy_range(0, 0).is_none());
    }

    #[test]
    fn test_destroy_with_visits_every_element() {
        let sequence = numbers(&[1, 2, 3]);
        let mut destroyed = Vec::new();

        sequence.destroy_with(|value| destroyed.push(value));

        assert_eq!(destroyed, vec![1, 2, 3]);
    }

    #[test]
    fn test_dropping_borrowed_results_leaves_source_intact() {
        let sequence: Sequence<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

        {
            let found = sequence.search_all(|value| value != "b");
            assert_eq!(found.len(), 2);
        }

        assert_eq!(sequence.len(), 3);
        assert_eq!(sequence.get(1).map(String::as_str), Some("b"));
    }

    #[test]
    fn test_into_iter_and_equality() {
        let sequence = numbers(&[1, 2, 3]);
        let cloned = sequence.clone();

        assert_eq!(sequence, cloned);
        assert_eq!(sequence.into_iter().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(format!("{:?}", cloned), "[1, 2, 3]");
    }
}
