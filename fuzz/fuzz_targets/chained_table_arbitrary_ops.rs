#![no_main]

use std::collections::HashMap;

use countkit::ds::ChainedHashTable;
use libfuzzer_sys::fuzz_target;

// Fuzz ChainedHashTable against std's HashMap
//
// insert never overwrites and update requires an existing key.
fuzz_target!(|data: &[u8]| {
    let mut table: ChainedHashTable<u16, u8> = ChainedHashTable::new(10);
    let mut model: HashMap<u16, u8> = HashMap::new();

    for chunk in data.chunks_exact(3) {
        let op = chunk[0] % 4;
        let key = u16::from_le_bytes([chunk[1], chunk[0] >> 6]);
        let value = chunk[2];

        match op {
            0 => {
                let fresh = !model.contains_key(&key);
                assert_eq!(table.insert(key, value), fresh);
                model.entry(key).or_insert(value);
            },
            1 => {
                let present = model.contains_key(&key);
                assert_eq!(table.update(&key, value), present);
                if present {
                    model.insert(key, value);
                }
            },
            2 => {
                assert_eq!(table.remove(&key), model.remove(&key));
            },
            3 => {
                assert_eq!(table.lookup(&key), model.get(&key));
            },
            _ => unreachable!(),
        }
        assert!(table.len() * 3 <= table.capacity() * 2);
    }

    assert_eq!(table.len(), model.len());
    table.check_invariants().unwrap();
});
