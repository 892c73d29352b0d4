use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use num_traits::Bounded;

use crate::error::{Error, Result};

/// Ordered breakpoint table without any synchronization.
///
/// An entry `(k, v)` maps every key from `k` up to (excluding) the next
/// breakpoint to `v`; the last entry extends to the top of the key space.
/// The table always starts at `K::min_value()` and never holds two adjacent
/// entries with equal values.
#[derive(Debug, Clone)]
pub(crate) struct Breakpoints<K, V> {
    /// Breakpoint key -> value holding from that key on
    table: BTreeMap<K, V>,
    /// Value supplied at construction, restored by `reset`
    default: V,
}

impl<K, V> Breakpoints<K, V> {
    /// Iterate breakpoints in ascending key order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.table.iter()
    }

    pub(crate) fn len(&self) -> usize {
        self.table.len()
    }

    pub(crate) fn default_value(&self) -> &V {
        &self.default
    }
}

impl<K, V> Breakpoints<K, V>
where
    K: Ord + Clone + Bounded,
    V: PartialEq + Clone,
{
    /// Create a table mapping the whole key space to `default`.
    pub(crate) fn new(default: V) -> Self {
        let mut table = BTreeMap::new();
        let _ignore = table.insert(K::min_value(), default.clone());
        Self { table, default }
    }

    /// Build a table from breakpoints that are already in canonical form.
    pub(crate) fn from_entries<I>(default: V, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        match entries.first() {
            Some((key, _)) if *key == K::min_value() => {}
            _ => return Err(Error::MissingMinimum),
        }
        for pair in entries.windows(2) {
            let ((lkey, lvalue), (rkey, rvalue)) = (&pair[0], &pair[1]);
            if lkey >= rkey {
                return Err(Error::Unordered);
            }
            if lvalue == rvalue {
                return Err(Error::NotCanonical);
            }
        }
        Ok(Self {
            table: entries.into_iter().collect(),
            default,
        })
    }

    /// Assign `value` to every key in `[begin, end)` and restore canonical form.
    ///
    /// Nothing is touched when `begin >= end`. Every call into `K::clone`,
    /// `V::clone` and `V::eq` happens before the first mutation, so a panic in
    /// one of them leaves the table as it was.
    pub(crate) fn assign(&mut self, begin: K, end: K, value: V) -> Result<()> {
        if begin >= end {
            return Err(Error::InvalidRange);
        }

        // Keys at and after `end` keep the value they have now.
        let right = self.floor(&end).1.clone();
        let interior = self.keys_between(&begin, &end);

        // With the interior gone only two neighbour pairs can hold equal
        // values: (predecessor, begin) and (begin, end).
        let keep_end = right != value;
        let keep_begin = self
            .predecessor(&begin)
            .map_or(true, |(_, prev)| *prev != value);

        if keep_end {
            let _ignore = self.table.insert(end, right);
        } else {
            let _ignore = self.table.remove(&end);
        }
        if keep_begin {
            let _ignore = self.table.insert(begin, value);
        } else {
            let _ignore = self.table.remove(&begin);
        }
        for key in interior {
            let _ignore = self.table.remove(&key);
        }
        Ok(())
    }

    /// Restore the construction state.
    pub(crate) fn reset(&mut self) {
        let default = self.default.clone();
        self.table.clear();
        let _ignore = self.table.insert(K::min_value(), default);
    }

    /// The breakpoint with the greatest key `<= key`.
    pub(crate) fn floor(&self, key: &K) -> (&K, &V) {
        self.table
            .range(..=key)
            .next_back()
            .expect("breakpoint table always holds the minimum key")
    }

    /// The exclusive upper bound of the interval containing `key`.
    ///
    /// The last interval has no successor breakpoint and reaches up to
    /// `K::max_value()`, which is returned in that case.
    pub(crate) fn end_point(&self, key: &K) -> K {
        self.table
            .range((Excluded(key), Unbounded))
            .next()
            .map_or_else(K::max_value, |(k, _)| k.clone())
    }

    fn predecessor(&self, key: &K) -> Option<(&K, &V)> {
        self.table.range(..key).next_back()
    }

    /// Keys of every breakpoint strictly inside `(begin, end)`.
    fn keys_between(&self, begin: &K, end: &K) -> Vec<K> {
        self.table
            .range((Excluded(begin), Excluded(end)))
            .map(|(k, _)| k.clone())
            .collect()
    }
}
