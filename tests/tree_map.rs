use std::{borrow::Borrow, collections::HashSet};

use rand::{seq::SliceRandom, thread_rng, Rng};
use tree234::tree_map::TreeMap;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn tree_map_works() {
    init();
    let mut map = TreeMap::<i32, i32>::new();

    for i in 0..1000 {
        assert_eq!(map.put(i, i + 1), None);
    }

    for i in 0..1000 {
        assert_eq!(map.get(&i), Some(&(i + 1)));
    }

    assert_eq!(map.get(&12), Some(&13));
    assert_eq!(map.remove(&12), Some(13));
    assert!(map.get(&12).is_none());
    assert_eq!(map.put(12, 24), None);
    assert_eq!(map.get(&12), Some(&24));
    assert_eq!(map.put(12, 36), Some(24));
    assert_eq!(map.len(), 1000);
    assert_eq!(map.put(999, 0), Some(1000));
    assert_eq!(map.put(999, 1000), Some(0));

    for i in 0..1000 {
        if i == 12 {
            assert_eq!(map.get(&i), Some(&36));
        } else {
            assert_eq!(map.get(&i), Some(&(i + 1)));
        }
    }
    assert_eq!(map.first(), Some((&0, &1)));
    assert_eq!(map.last(), Some((&999, &1000)));
}

#[test]
fn works_on_owned_strings() {
    init();
    let mut map = TreeMap::<String, String>::new();
    assert_eq!(map.get(&"test".into()), None);
    map.put("test".into(), "test2".into());
    assert_eq!(map.get(&"test".into()), Some(&("test2".to_string())));
    for i in 0..100 {
        map.put(i.to_string(), (i + 1).to_string());
    }
    for i in 0..100 {
        assert_eq!(
            map.get(i.to_string().borrow()),
            Some((i + 1).to_string().borrow()),
        );
    }
    let keys: Vec<&String> = map.iter().map(|(key, _)| key).collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn take_leaves_map_empty() {
    init();
    let mut map: TreeMap<u8, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into_iter().collect();
    let taken = map.take();
    assert!(map.is_empty());
    assert_eq!(map.get(&1), None);
    assert_eq!(taken.len(), 3);
    assert_eq!(
        taken.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
        vec![(1, 'a'), (2, 'b'), (3, 'c')]
    );
    map.put(9, 'z');
    assert!(map.contains_key(&9));
    assert!(!taken.contains_key(&9));
}

#[test]
fn equality_ignores_insertion_order() {
    let forward: TreeMap<i32, i32> = (0..50).map(|i| (i, -i)).collect();
    let backward: TreeMap<i32, i32> = (0..50).rev().map(|i| (i, -i)).collect();
    assert_eq!(forward, backward);

    let mut changed = backward.clone();
    changed.put(7, 7);
    assert_ne!(forward, changed);
}

#[test]
fn random_op_test() {
    init();
    let mut map = TreeMap::<i32, i32>::new();

    let n = 50000;

    let mut rng = thread_rng();

    let mut keys = HashSet::new();
    while keys.len() < n {
        keys.insert(rng.gen::<u16>() as i32);
    }
    let mut keys: Vec<_> = keys.into_iter().collect();

    for &key in keys.iter() {
        map.put(key, key + 1);
    }

    for &key in keys.iter() {
        assert_eq!(map.get(&key), Some(&(key + 1)));
    }

    keys.shuffle(&mut rng);
    let removed_keys = keys.split_off(n / 2);
    for &key in removed_keys.iter() {
        assert_eq!(map.remove(&key), Some(key + 1));
    }

    for &key in removed_keys.iter() {
        assert!(map.get(&key).is_none());
    }

    map.rebalance();
    assert_eq!(map.len(), keys.len());
    for &key in keys.iter() {
        assert_eq!(map.get(&key), Some(&(key + 1)));
    }
}
