use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use num_traits::Bounded;
use tracing::{debug, trace};

use crate::breakpoints::Breakpoints;
use crate::error::Result;
use crate::interval::Interval;

/// A thread-safe map from half-open key intervals to values.
///
/// Every key of `K` is mapped: keys never assigned hold the default value
/// given to [`CanonicalIntervalMap::new`]. The map is stored as an ordered
/// list of breakpoints and is kept minimal after every write, so two
/// neighbouring intervals never hold equal values.
///
/// All operations take a single lock for their whole duration. Lookups hand
/// out owned copies, never references into the map.
pub struct CanonicalIntervalMap<K, V> {
    /// The breakpoint table, behind one exclusive lock
    inner: Mutex<Breakpoints<K, V>>,
}

impl<K, V> CanonicalIntervalMap<K, V>
where
    K: Ord + Clone + Bounded,
    V: PartialEq + Clone,
{
    /// Create a map that sends every key to `default`.
    ///
    /// # Example
    /// ```rust
    /// use canonical_interval_map::CanonicalIntervalMap;
    ///
    /// let map = CanonicalIntervalMap::<i64, &str>::new("none");
    /// assert_eq!(map.lookup(&42), "none");
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn new(default: V) -> Self {
        Self {
            inner: Mutex::new(Breakpoints::new(default)),
        }
    }

    /// Create a map from breakpoints in ascending key order.
    ///
    /// The first breakpoint must be `K::min_value()`, keys must be strictly
    /// increasing and neighbouring breakpoints must hold different values.
    /// `default` is only used by [`CanonicalIntervalMap::clear`]. Like `clear`,
    /// this is a convenience outside the insert contract; after construction
    /// the table only changes through inserts and `clear`.
    ///
    /// # Example
    /// ```rust
    /// use canonical_interval_map::{CanonicalIntervalMap, Error};
    ///
    /// let map = CanonicalIntervalMap::from_breakpoints(0, vec![(u8::MIN, 0), (10, 1)]).unwrap();
    /// assert_eq!(map.lookup(&12), 1);
    ///
    /// let err = CanonicalIntervalMap::from_breakpoints(0, vec![(u8::MIN, 0), (10, 0)]);
    /// assert_eq!(err.err(), Some(Error::NotCanonical));
    /// ```
    #[inline]
    pub fn from_breakpoints<I>(default: V, breakpoints: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Ok(Self {
            inner: Mutex::new(Breakpoints::from_entries(default, breakpoints)?),
        })
    }

    /// Assign `value` to every key in `[begin, end)`.
    ///
    /// Returns `false` and leaves the map untouched when `begin >= end`.
    ///
    /// # Example
    /// ```rust
    /// use canonical_interval_map::CanonicalIntervalMap;
    ///
    /// let map = CanonicalIntervalMap::new('d');
    /// assert!(map.insert(5, 10, 'x'));
    /// assert!(!map.insert(10, 5, 'y'));
    /// assert_eq!(map.lookup(&7), 'x');
    /// assert_eq!(map.lookup(&10), 'd');
    /// ```
    #[inline]
    pub fn insert(&self, begin: K, end: K, value: V) -> bool {
        self.try_insert(begin, end, value).is_ok()
    }

    /// Assign `value` to every key in `[begin, end)`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidRange` when `begin >= end`; the map is not touched.
    #[inline]
    pub fn try_insert(&self, begin: K, end: K, value: V) -> Result<()> {
        let mut table = self.lock();
        match table.assign(begin, end, value) {
            Ok(()) => {
                trace!(breakpoints = table.len(), "interval assigned");
                Ok(())
            }
            Err(err) => {
                debug!(%err, "interval assignment rejected");
                Err(err)
            }
        }
    }

    /// Assign `value` to every key in `interval`.
    ///
    /// # Errors
    ///
    /// `Interval` has public bounds, so `low >= high` can still reach this
    /// call; it is rejected with `Error::InvalidRange` like `try_insert`.
    ///
    /// # Example
    /// ```rust
    /// use canonical_interval_map::{CanonicalIntervalMap, Error, Interval};
    ///
    /// let map = CanonicalIntervalMap::new(0);
    /// map.assign(Interval::new(1, 3), 9).unwrap();
    /// assert_eq!(map.breakpoints(), vec![(i32::MIN, 0), (1, 9), (3, 0)]);
    ///
    /// let mut int = Interval::new(1, 3);
    /// int.low = 9;
    /// assert_eq!(map.assign(int, 5), Err(Error::InvalidRange));
    /// ```
    #[inline]
    pub fn assign(&self, interval: Interval<K>, value: V) -> Result<()> {
        let Interval { low, high } = interval;
        self.try_insert(low, high, value)
    }

    /// Return the exclusive upper bound of the interval containing `key`.
    ///
    /// For keys in the last interval this is `K::max_value()`.
    ///
    /// # Example
    /// ```rust
    /// use canonical_interval_map::CanonicalIntervalMap;
    ///
    /// let map = CanonicalIntervalMap::new(0);
    /// map.insert(0, 5, 1);
    /// assert_eq!(map.end_point(&2), 5);
    /// assert_eq!(map.end_point(&5), i32::MAX);
    /// ```
    #[inline]
    pub fn end_point(&self, key: &K) -> K {
        self.lock().end_point(key)
    }

    /// Return the inclusive lower bound of the interval containing `key`.
    ///
    /// # Example
    /// ```rust
    /// use canonical_interval_map::CanonicalIntervalMap;
    ///
    /// let map = CanonicalIntervalMap::new(0);
    /// map.insert(0, 5, 1);
    /// assert_eq!(map.begin_point(&2), 0);
    /// assert_eq!(map.begin_point(&-2), i32::MIN);
    /// ```
    #[inline]
    pub fn begin_point(&self, key: &K) -> K {
        self.lock().floor(key).0.clone()
    }

    /// Return both bounds of the interval containing `key`, read under one lock.
    #[inline]
    pub fn range_of(&self, key: &K) -> (K, K) {
        let table = self.lock();
        (table.floor(key).0.clone(), table.end_point(key))
    }

    /// Return a copy of the value of the interval containing `key`.
    #[inline]
    pub fn lookup(&self, key: &K) -> V {
        self.lock().floor(key).1.clone()
    }

    /// Return a shared snapshot of the value of the interval containing `key`.
    ///
    /// The snapshot is detached from the map: later writes do not show up in it.
    ///
    /// # Example
    /// ```rust
    /// use canonical_interval_map::CanonicalIntervalMap;
    ///
    /// let map = CanonicalIntervalMap::new(String::from("idle"));
    /// let before = map.lookup_shared(&3);
    /// map.insert(0, 10, String::from("busy"));
    /// assert_eq!(*before, "idle");
    /// assert_eq!(*map.lookup_shared(&3), "busy");
    /// ```
    #[inline]
    pub fn lookup_shared(&self, key: &K) -> Arc<V> {
        Arc::new(self.lookup(key))
    }

    /// Return an owned copy of all breakpoints in ascending key order.
    #[inline]
    #[must_use]
    pub fn breakpoints(&self) -> Vec<(K, V)> {
        self.lock()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Return the value given at construction.
    #[inline]
    #[must_use]
    pub fn default_value(&self) -> V {
        self.lock().default_value().clone()
    }

    /// Map every key back to the default value.
    ///
    /// This is a reset on top of the insert contract: it drops every
    /// breakpoint written so far in one locked step, leaving only
    /// `(K::min_value(), default)`.
    #[inline]
    pub fn clear(&self) {
        self.lock().reset();
    }
}

impl<K, V> CanonicalIntervalMap<K, V> {
    /// Return the number of breakpoints, which is at least one.
    #[inline]
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Acquire the table lock, recovering it if a previous holder panicked.
    ///
    /// Writes call every user `Clone` and `PartialEq` impl before touching the
    /// table, so a panic in one of them poisons the lock over an unchanged,
    /// canonical table.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Breakpoints<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> fmt::Display for CanonicalIntervalMap<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    /// Render every breakpoint as `[key:value]` in ascending key order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.lock().iter() {
            write!(f, "[{key}:{value}]")?;
        }
        Ok(())
    }
}

impl<K, V> fmt::Debug for CanonicalIntervalMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.lock().iter()).finish()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use num_traits::Bounded;
    use serde::de::{self, Deserialize, Deserializer};
    use serde::ser::{Serialize, SerializeStruct, Serializer};

    use super::CanonicalIntervalMap;
    use crate::breakpoints::Breakpoints;

    /// Breakpoints serialized as a sequence of `[key, value]` pairs
    struct Entries<'a, K, V>(&'a Breakpoints<K, V>);

    impl<K: Serialize, V: Serialize> Serialize for Entries<'_, K, V> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.0.iter())
        }
    }

    impl<K: Serialize, V: Serialize> Serialize for CanonicalIntervalMap<K, V> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let table = self.lock();
            let mut state = serializer.serialize_struct("CanonicalIntervalMap", 2)?;
            state.serialize_field("default", table.default_value())?;
            state.serialize_field("breakpoints", &Entries(&*table))?;
            state.end()
        }
    }

    #[derive(serde::Deserialize)]
    #[serde(rename = "CanonicalIntervalMap")]
    struct Repr<K, V> {
        default: V,
        breakpoints: Vec<(K, V)>,
    }

    impl<'de, K, V> Deserialize<'de> for CanonicalIntervalMap<K, V>
    where
        K: Deserialize<'de> + Ord + Clone + Bounded,
        V: Deserialize<'de> + PartialEq + Clone,
    {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let repr = Repr::<K, V>::deserialize(deserializer)?;
            Self::from_breakpoints(repr.default, repr.breakpoints).map_err(de::Error::custom)
        }
    }
}
