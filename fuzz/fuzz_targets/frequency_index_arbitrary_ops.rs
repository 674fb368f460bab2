#![no_main]

use countkit::index::FrequencyIndex;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on FrequencyIndex
//
// Each op is three bytes: opcode, key, argument. A narrow key space keeps
// duplicates and deletions of interior nodes frequent.
fuzz_target!(|data: &[u8]| {
    let mut index: FrequencyIndex<u8, u8> = FrequencyIndex::new(10);

    for chunk in data.chunks_exact(3) {
        let op = chunk[0] % 7;
        let key = chunk[1] % 64;
        let arg = chunk[2];
        let n_copy = u64::from(arg % 4);

        match op {
            0 => {
                let before = index.lookup(&key);
                match index.insert(key, arg, n_copy) {
                    Ok(_) => assert_eq!(index.lookup(&key), before + n_copy),
                    Err(_) => {
                        assert_eq!(n_copy, 0);
                        assert_eq!(index.lookup(&key), before);
                    },
                }
            },
            1 => {
                let before = index.lookup(&key);
                let size = index.size();
                match index.remove(&key, n_copy) {
                    Ok(found) => {
                        assert_eq!(found, before > 0);
                        let after = before.saturating_sub(n_copy);
                        assert_eq!(index.lookup(&key), after);
                        assert_eq!(index.size(), size - (before - after));
                        assert_eq!(index.contains(&key), after > 0);
                    },
                    Err(_) => assert_eq!(n_copy, 0),
                }
            },
            2 => {
                let present = index.contains(&key);
                assert_eq!(index.remove_all(&key), present);
                assert_eq!(index.lookup(&key), 0);
            },
            3 => {
                let present = index.contains(&key);
                assert_eq!(index.update(&key, arg), present);
                if present {
                    assert_eq!(index.get_data(&key), Some(&arg));
                }
            },
            4 => {
                let lower = key;
                let upper = arg % 64;
                let keys = index.get_unique_keys_in_range(&lower, &upper);
                for k in &keys {
                    assert!(lower < *k && *k < upper);
                    assert_eq!(index.lookup(k), 1);
                }
            },
            5 => {
                let all = index.get_all_keys(true);
                assert_eq!(all.len() as u64, index.size());
                assert_eq!(all.first(), index.get_min_key());
                assert_eq!(all.last(), index.get_max_key());
            },
            6 => {
                if arg == 0 {
                    index.clear();
                    assert!(index.is_empty());
                }
            },
            _ => unreachable!(),
        }
    }

    index.check_invariants().unwrap();
});
