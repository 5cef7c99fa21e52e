use hashbrown::HashMap;

use super::{SwapKey, TabuList};

/// Bounded FIFO of forbidden exchanges.
#[derive(Debug, Clone)]
pub struct FifoTabuList {
    /// Next slot to overwrite. (circular buffer)
    cur_idx: usize,
    /// Array of tabu list items, `None` until first written.
    tabu: Vec<Option<SwapKey>>,
    /// Multiplicity of every key present in `tabu`, for O(1) lookup.
    tabu_search: HashMap<SwapKey, usize>,
    len: usize,
}

impl FifoTabuList {
    pub fn new(length: usize) -> Self {
        Self {
            cur_idx: 0,
            tabu: vec![None; length],
            tabu_search: HashMap::with_capacity(length),
            len: 0,
        }
    }

    /// Entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = SwapKey> + '_ {
        let capacity = self.tabu.len();

        (0..capacity).filter_map(move |offset| self.tabu[(self.cur_idx + offset) % capacity])
    }
}

impl TabuList for FifoTabuList {
    fn contains(&self, key: SwapKey) -> bool {
        self.tabu_search.contains_key(&key)
    }

    fn push(&mut self, key: SwapKey) {
        let Some(slot) = self.tabu.get_mut(self.cur_idx) else {
            return;
        };

        if let Some(evicted) = slot.replace(key) {
            if let Some(count) = self.tabu_search.get_mut(&evicted) {
                *count -= 1;
                if *count == 0 {
                    self.tabu_search.remove(&evicted);
                }
            }
        } else {
            self.len += 1;
        }

        *self.tabu_search.entry(key).or_insert(0) += 1;
        self.cur_idx = (self.cur_idx + 1) % self.tabu.len();
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.tabu.len()
    }
}

#[cfg(test)]
mod tests {
    use super::FifoTabuList;
    use crate::tabu_list::{swap_key, TabuList};

    #[test]
    fn keys_are_unordered() {
        assert_eq!(swap_key(4, 1), (1, 4));
        assert_eq!(swap_key(1, 4), (1, 4));
    }

    #[test]
    fn evicts_oldest_first() {
        let mut tabu_list = FifoTabuList::new(2);
        assert!(tabu_list.is_empty());

        tabu_list.push((0, 1));
        tabu_list.push((1, 2));
        assert_eq!(tabu_list.len(), 2);
        assert!(tabu_list.contains((0, 1)));

        tabu_list.push((2, 3));
        assert_eq!(tabu_list.len(), 2);
        assert!(!tabu_list.contains((0, 1)));
        assert!(tabu_list.contains((1, 2)));
        assert!(tabu_list.contains((2, 3)));
        assert_eq!(tabu_list.iter().collect::<Vec<_>>(), vec![(1, 2), (2, 3)]);
    }

    #[test]
    fn duplicate_entries_survive_partial_eviction() {
        let mut tabu_list = FifoTabuList::new(3);

        tabu_list.push((0, 1));
        tabu_list.push((0, 1));
        tabu_list.push((2, 3));
        tabu_list.push((4, 5));

        // first (0, 1) evicted, second still held
        assert!(tabu_list.contains((0, 1)));
        assert_eq!(
            tabu_list.iter().collect::<Vec<_>>(),
            vec![(0, 1), (2, 3), (4, 5)]
        );
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut tabu_list = FifoTabuList::new(5);

        for i in 0..50 {
            tabu_list.push((i, i + 1));
            assert!(tabu_list.len() <= tabu_list.capacity());
        }
        assert_eq!(tabu_list.len(), 5);
        assert_eq!(tabu_list.iter().next(), Some((45, 46)));
    }

    #[test]
    fn zero_length_list_forbids_nothing() {
        let mut tabu_list = FifoTabuList::new(0);

        tabu_list.push((0, 1));

        assert!(!tabu_list.contains((0, 1)));
        assert_eq!(tabu_list.len(), 0);
    }
}
