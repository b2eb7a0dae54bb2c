use quince::HashSet;

#[test]
fn new() {
    let set: HashSet<usize> = HashSet::new();
    assert_eq!(set.len(), 0);
    assert!(set.is_empty());
    assert_eq!(set.capacity(), 16);
}

#[test]
fn capacity_is_normalized() {
    let set: HashSet<usize> = HashSet::with_capacity(10);
    assert_eq!(set.capacity(), 16);

    let set: HashSet<usize> = HashSet::with_capacity_and_load_factor(10, 0.5).unwrap();
    assert_eq!(set.capacity(), 16);
    assert_eq!(set.threshold(), 8);
    assert_eq!(set.load_factor(), 0.5);
}

#[test]
fn rejects_illegal_load_factors() {
    assert!(HashSet::<usize>::with_capacity_and_load_factor(16, 0.0).is_err());
    assert!(HashSet::<usize>::with_capacity_and_load_factor(16, f32::NAN).is_err());
}

#[test]
fn insert() {
    let mut set = HashSet::new();
    assert!(set.insert(42));
    assert!(!set.insert(42));
    assert_eq!(set.len(), 1);
}

#[test]
fn contains() {
    let mut set = HashSet::new();
    set.insert("a");
    assert!(set.contains("a"));
    assert!(!set.contains("b"));
}

#[test]
fn get() {
    let mut set = HashSet::new();
    set.insert("a".to_owned());
    assert_eq!(set.get("a"), Some(&"a".to_owned()));
    assert_eq!(set.get("b"), None);
}

#[test]
fn remove() {
    let mut set = HashSet::new();
    set.insert(42);
    assert!(set.remove(&42));
    assert!(!set.remove(&42));
    assert!(set.is_empty());
}

#[test]
fn take() {
    let mut set = HashSet::new();
    set.insert("a".to_owned());
    assert_eq!(set.take("a"), Some("a".to_owned()));
    assert_eq!(set.take("a"), None);
}

#[test]
fn clear() {
    let mut set = HashSet::new();
    for i in 0..100 {
        set.insert(i);
    }

    let capacity = set.capacity();
    set.clear();

    assert!(set.is_empty());
    assert!(!set.contains(&1));
    assert_eq!(set.capacity(), capacity);
}

#[test]
fn growth_keeps_values() {
    let mut set = HashSet::with_capacity(1);
    for i in 0..10_000usize {
        set.insert(i);
    }

    assert_eq!(set.len(), 10_000);
    assert!(set.capacity().is_power_of_two());
    for i in 0..10_000usize {
        assert!(set.contains(&i));
    }
}

#[test]
fn iter() {
    let mut set = HashSet::new();
    for i in 0..64usize {
        set.insert(i);
    }

    let mut seen: Vec<usize> = set.iter().copied().collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..64).collect::<Vec<_>>());
}

#[test]
fn into_iter() {
    let set: HashSet<usize> = (0..8).collect();
    let mut values: Vec<usize> = set.into_iter().collect();
    values.sort_unstable();
    assert_eq!(values, (0..8).collect::<Vec<_>>());
}

#[test]
fn from_iter_and_extend() {
    let mut set: HashSet<usize> = (0..10).collect();
    set.extend(5..15);
    assert_eq!(set.len(), 15);
}

#[test]
fn clone_and_eq() {
    let set: HashSet<usize> = (0..100).collect();
    let clone = set.clone();
    assert_eq!(set, clone);

    let mut other = clone;
    other.insert(100);
    assert_ne!(set, other);
}

#[test]
fn debug() {
    let mut set = HashSet::new();
    set.insert("a");
    assert_eq!(format!("{set:?}"), r#"{"a"}"#);
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
    let set: HashSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

    let json = serde_json::to_string(&set).unwrap();
    let parsed: HashSet<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(set, parsed);
}
