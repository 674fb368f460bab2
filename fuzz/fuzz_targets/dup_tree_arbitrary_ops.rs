#![no_main]

use std::collections::BTreeMap;

use countkit::ds::{DuplicateTree, SlotId};
use libfuzzer_sys::fuzz_target;

// Fuzz DuplicateTree against a BTreeMap model
//
// Also tracks the id handed out for each key and checks it keeps naming the
// same key across structural deletions of other nodes.
fuzz_target!(|data: &[u8]| {
    let mut tree: DuplicateTree<u8, ()> = DuplicateTree::new();
    let mut model: BTreeMap<u8, u64> = BTreeMap::new();
    let mut ids: BTreeMap<u8, SlotId> = BTreeMap::new();

    for chunk in data.chunks_exact(2) {
        let op = chunk[0] % 5;
        let key = chunk[1] % 48;
        let n_copy = u64::from(chunk[0] >> 4) + 1;

        match op {
            0 => {
                let id = tree.insert(key, (), n_copy).unwrap();
                *model.entry(key).or_default() += n_copy;
                if let Some(old) = ids.insert(key, id) {
                    assert_eq!(old, id);
                }
            },
            1 => {
                let got = tree.insert_duplicate(&key, n_copy).unwrap();
                assert_eq!(got.is_some(), model.contains_key(&key));
                if let Some(count) = model.get_mut(&key) {
                    *count += n_copy;
                }
            },
            2 => {
                let expected = model.get(&key).map(|&c| c.saturating_sub(n_copy));
                assert_eq!(tree.remove(&key, n_copy).unwrap(), expected);
                match expected {
                    Some(0) => {
                        model.remove(&key);
                        ids.remove(&key);
                    },
                    Some(left) => {
                        model.insert(key, left);
                    },
                    None => {},
                }
            },
            3 => {
                assert_eq!(tree.remove_node(&key), model.remove(&key).is_some());
                ids.remove(&key);
            },
            4 => {
                let is_max = key % 2 == 0;
                let expected = if is_max {
                    model.keys().next_back()
                } else {
                    model.keys().next()
                };
                assert_eq!(tree.find_extreme(is_max).map(|n| n.key()), expected);
            },
            _ => unreachable!(),
        }

        for (key, id) in &ids {
            assert_eq!(tree.node(*id).map(|n| *n.key()), Some(*key));
        }
    }

    tree.check_invariants().unwrap();
    assert_eq!(tree.total_count(), model.values().sum::<u64>());
    assert_eq!(tree.iter().len() as u64, tree.total_count());
});
