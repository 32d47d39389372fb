use hashdex_core::{KeyedTable, Strategy, Table, TableError};

fn tables<V>() -> Vec<Table<V>> {
    Strategy::ALL.iter().map(|&s| Table::with_capacity(s, 2)).collect()
}

fn words(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("w{i}x{}", i * 7 % 13)).collect()
}

#[test]
fn put_then_get_and_contains() {
    for mut t in tables() {
        t.put("cat".to_string(), 3u32);
        assert_eq!(t.get("cat"), Ok(&3), "{}", t.strategy());
        assert!(t.contains("cat"));
        assert!(!t.contains("dog"));
        assert_eq!(t.size(), 1);
    }
}

#[test]
fn missing_keys_fail_with_key_not_found() {
    for mut t in tables::<u32>() {
        assert_eq!(t.get("ghost"), Err(TableError::KeyNotFound("ghost".into())));
        assert_eq!(t.remove("ghost"), Err(TableError::KeyNotFound("ghost".into())));
    }
}

#[test]
fn probing_load_factor_bounded_and_capacity_grows() {
    for mut t in tables() {
        let mut capacity = t.capacity();
        let mut resizes = 0;
        for (i, w) in words(300).into_iter().enumerate() {
            t.put(w, i);
            if t.strategy() != Strategy::Chaining {
                assert!(t.load_factor() <= 0.75, "{} at {}", t.strategy(), t.load_factor());
            }
            assert!(t.capacity() >= capacity);
            if t.capacity() > capacity {
                resizes += 1;
            }
            capacity = t.capacity();
        }
        assert!(resizes > 0);
        assert_eq!(t.size(), 300);
    }
}

#[test]
fn remove_leaves_other_keys_intact() {
    for mut t in tables() {
        let keys = words(120);
        for (i, k) in keys.iter().enumerate() {
            t.put(k.clone(), i);
        }
        for (i, k) in keys.iter().enumerate().filter(|(i, _)| i % 3 == 0) {
            assert_eq!(t.remove(k), Ok((k.clone(), i)));
        }
        for (i, k) in keys.iter().enumerate() {
            if i % 3 == 0 {
                assert!(matches!(t.get(k), Err(TableError::KeyNotFound(_))));
            } else {
                assert_eq!(t.get(k), Ok(&i), "{} lost {}", t.strategy(), k);
            }
        }
        assert_eq!(t.size(), 80);
    }
}

#[test]
fn last_put_wins_regardless_of_order() {
    let pairs: Vec<(String, u32)> = words(40).into_iter().zip(0..).collect();
    for strategy in Strategy::ALL {
        let mut forward = Table::with_capacity(strategy, 3);
        let mut backward = Table::with_capacity(strategy, 3);
        for (k, v) in &pairs {
            forward.put(k.clone(), *v);
            forward.put(k.clone(), v + 100);
        }
        for (k, v) in pairs.iter().rev() {
            backward.put(k.clone(), *v);
            backward.put(k.clone(), v + 100);
        }
        for (k, v) in &pairs {
            assert_eq!(forward.get(k), Ok(&(v + 100)));
            assert_eq!(backward.get(k), Ok(&(v + 100)));
        }
        assert_eq!(forward.size(), pairs.len());
        assert_eq!(backward.size(), pairs.len());
    }
}

#[test]
fn contains_does_not_mutate() {
    for mut t in tables() {
        t.put("a".to_string(), 1u8);
        let before = t.stats();
        for _ in 0..5 {
            assert!(t.contains("a"));
            assert!(!t.contains("b"));
        }
        assert_eq!(t.stats(), before);
    }
}

#[test]
fn reinsert_after_remove() {
    for mut t in tables() {
        for k in words(20) {
            t.put(k, 0u8);
        }
        for round in 1..4u8 {
            for k in words(20) {
                t.remove(&k).unwrap();
                t.put(k, round);
            }
        }
        assert_eq!(t.size(), 20);
        assert!(t.iter().all(|(_, v)| *v == 3));
    }
}

#[test]
fn nested_tables() {
    for strategy in Strategy::ALL {
        let mut outer: Table<Table<u32>> = Table::new(strategy);
        outer.put("cat".to_string(), Table::new(strategy));
        outer.get_mut("cat").unwrap().put("a.txt".to_string(), 1);
        *outer.get_mut("cat").unwrap().get_mut("a.txt").unwrap() += 1;
        assert_eq!(outer.get("cat").unwrap().get("a.txt"), Ok(&2));
    }
}

#[test]
fn put_remove_churn_keeps_capacity_steady() {
    for mut t in tables() {
        let live = words(8);
        for (i, w) in live.iter().enumerate() {
            t.put(w.clone(), i);
        }
        t.put("tmp0".to_string(), 0);
        t.remove("tmp0").unwrap();
        let settled = t.capacity();

        for i in 1..10_000 {
            let key = format!("tmp{i}");
            t.put(key.clone(), i);
            assert_eq!(t.remove(&key), Ok((key, i)));
        }
        assert_eq!(t.capacity(), settled, "{} grew under churn", t.strategy());
        assert_eq!(t.size(), 8);
        for (i, w) in live.iter().enumerate() {
            assert_eq!(t.get(w), Ok(&i), "{}", t.strategy());
        }
        let mut keys: Vec<&str> = t.keys().collect();
        keys.sort_unstable();
        let mut expected: Vec<&str> = live.iter().map(String::as_str).collect();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }
}
