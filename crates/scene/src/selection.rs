use crate::occurrence::OccurrenceId;

/// Deterministic set of occurrences backed by a bitset.
///
/// Ordering contract:
/// - Iteration yields ids in ascending index order, which is also dataset
///   order, so "first encountered" tie-breaks stay stable.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    words: Vec<u64>,
    len: usize,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every id in `0..count`.
    pub fn full(count: usize) -> Self {
        let mut s = Self::default();
        for index in 0..count {
            s.insert_index(index as u32);
        }
        s
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, id: OccurrenceId) -> bool {
        let (word, bit) = word_bit(id.index());
        self.words
            .get(word)
            .is_some_and(|w| (w & (1u64 << bit)) != 0)
    }

    /// Returns `true` if the set changed.
    pub fn insert(&mut self, id: OccurrenceId) -> bool {
        self.insert_index(id.index())
    }

    fn insert_index(&mut self, index: u32) -> bool {
        self.ensure_capacity(index);
        let (word, bit) = word_bit(index);
        let mask = 1u64 << bit;
        let w = &mut self.words[word];
        if (*w & mask) != 0 {
            return false;
        }
        *w |= mask;
        self.len += 1;
        true
    }

    /// Returns `true` if the set changed.
    pub fn remove(&mut self, id: OccurrenceId) -> bool {
        let (word, bit) = word_bit(id.index());
        let Some(w) = self.words.get_mut(word) else {
            return false;
        };
        let mask = 1u64 << bit;
        if (*w & mask) == 0 {
            return false;
        }
        *w &= !mask;
        self.len -= 1;
        true
    }

    /// Keeps only the ids for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(OccurrenceId) -> bool) {
        let drop: Vec<OccurrenceId> = self.iter().filter(|id| !keep(*id)).collect();
        for id in drop {
            self.remove(id);
        }
    }

    pub fn intersect(&self, other: &Self) -> Self {
        let mut out = self.clone();
        let min_words = other.words.len().min(out.words.len());
        for idx in 0..min_words {
            out.words[idx] &= other.words[idx];
        }
        for idx in min_words..out.words.len() {
            out.words[idx] = 0;
        }
        out.recount_len();
        out
    }

    /// Iterates ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = OccurrenceId> + '_ {
        SelectionIter {
            words: &self.words,
            word_index: 0,
            current_word: 0,
            base_index: 0,
        }
        .map(OccurrenceId)
    }

    fn ensure_capacity(&mut self, index: u32) {
        let (word, _bit) = word_bit(index);
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
    }

    fn recount_len(&mut self) {
        self.len = self.words.iter().map(|w| w.count_ones() as usize).sum();
    }
}

// Trailing zero words must not affect equality.
impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for SelectionSet {}

impl FromIterator<OccurrenceId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = OccurrenceId>>(iter: I) -> Self {
        let mut s = Self::new();
        for id in iter {
            s.insert(id);
        }
        s
    }
}

fn word_bit(index: u32) -> (usize, u32) {
    let word = (index / 64) as usize;
    let bit = index % 64;
    (word, bit)
}

struct SelectionIter<'a> {
    words: &'a [u64],
    word_index: usize,
    current_word: u64,
    base_index: u32,
}

impl Iterator for SelectionIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current_word != 0 {
                let tz = self.current_word.trailing_zeros();
                self.current_word &= !(1u64 << tz);
                return Some(self.base_index + tz);
            }

            let w = *self.words.get(self.word_index)?;
            self.current_word = w;
            self.base_index = (self.word_index as u32) * 64;
            self.word_index += 1;
        }
    }
}
