//! Example demonstrating ChainedHashTable's insert/update contract and growth.
//!
//! Run with: cargo run --example basic_chained_table

use countkit::ds::{ChainedHashTable, MIN_CAPACITY};

fn main() {
    println!("=== ChainedHashTable Example ===\n");

    println!("1. Capacity validation");
    match ChainedHashTable::<u32, &str>::try_with_capacity(4) {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   capacity 4 rejected: {}", e),
    }
    println!();

    println!("2. insert never overwrites, update requires the key");
    let mut table = ChainedHashTable::new(MIN_CAPACITY);
    println!("   insert(1, \"one\")  -> {}", table.insert(1, "one"));
    println!("   insert(1, \"uno\")  -> {}", table.insert(1, "uno"));
    println!("   lookup(1)         -> {:?}", table.lookup(&1));
    println!("   update(1, \"uno\")  -> {}", table.update(&1, "uno"));
    println!("   update(2, \"two\")  -> {}", table.update(&2, "two"));
    println!("   lookup(1)         -> {:?}", table.lookup(&1));
    println!();

    println!("3. Growth at load factor 2/3");
    let mut table = ChainedHashTable::new(MIN_CAPACITY);
    for key in 0..30u32 {
        let before = table.capacity();
        table.insert(key, key * key);
        if table.capacity() != before {
            println!(
                "   insert #{:<2} grew {} -> {} buckets",
                table.len(),
                before,
                table.capacity()
            );
        }
    }
    println!(
        "   len {}, capacity {}, load {:.2}",
        table.len(),
        table.capacity(),
        table.load_factor()
    );
    let longest = (0..table.capacity())
        .map(|b| table.bucket_len(b))
        .max()
        .unwrap_or(0);
    println!("   longest chain: {}", longest);
}
