use std::fmt;

use canonical_interval_map::CanonicalIntervalMap;

/// A sample reading that starts to hold at `time_stamp`
#[derive(Debug, Clone, PartialEq, Eq)]
struct TimeVariantData {
    time_stamp: i64,
    value: i32,
}

impl TimeVariantData {
    fn new(time_stamp: i64, value: i32) -> Self {
        Self { time_stamp, value }
    }
}

impl fmt::Display for TimeVariantData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "time stamp: {} / value: {}", self.time_stamp, self.value)
    }
}

fn main() {
    // Returned for every time before the first reading
    let map = CanonicalIntervalMap::new(TimeVariantData::new(-1, -1));

    map.insert(0, i64::MAX, TimeVariantData::new(0, 1));
    map.insert(5, i64::MAX, TimeVariantData::new(5, 2));
    map.insert(10, i64::MAX, TimeVariantData::new(10, 3));

    println!("{map}");

    for key in [0, 3, 5, 11, -2] {
        println!("{}", map.lookup_shared(&key));
    }

    assert_eq!(map.lookup(&3), TimeVariantData::new(0, 1));
    assert_eq!(map.lookup(&-2), TimeVariantData::new(-1, -1));

    println!("{}", map.end_point(&2));
    println!("{}", map.begin_point(&2));
}
