//! Example demonstrating FrequencyIndex as a word-frequency counter.
//!
//! Run with: cargo run --example basic_frequency_index

use countkit::index::FrequencyIndex;

const TEXT: &str = "the quick brown fox jumps over the lazy dog \
                    the dog barks and the fox runs over the hill";

fn main() {
    println!("=== FrequencyIndex Example ===\n");

    let mut words: FrequencyIndex<&str, usize> = FrequencyIndex::new(16);
    for (position, word) in TEXT.split_whitespace().enumerate() {
        // payload records the first position a word was seen at
        words.insert(word, position, 1).unwrap();
    }

    println!("1. Counts");
    println!("   total words:    {}", words.size());
    println!("   distinct words: {}", words.distinct_len());
    println!("   \"the\" x{}", words.lookup("the"));
    println!("   \"fox\" x{}", words.lookup("fox"));
    println!("   \"cat\" x{} (absent)", words.lookup("cat"));
    println!();

    println!("2. Ordered queries");
    println!("   first word: {:?}", words.get_min_key());
    println!("   last word:  {:?}", words.get_max_key());
    println!("   seen once:  {:?}", words.get_all_keys(false));
    println!(
        "   seen once between \"c\" and \"l\": {:?}",
        words.get_unique_keys_in_range("c", "l")
    );
    println!();

    println!("3. Entries (word, first position, count)");
    for (word, first, count) in words.entries() {
        println!("   {:<6} @{:<3} x{}", word, first, count);
    }
    println!();

    println!("4. Removing copies");
    words.remove("the", 3).unwrap();
    println!("   \"the\" after removing 3: x{}", words.lookup("the"));
    words.remove_all("the");
    println!("   \"the\" after remove_all: x{}", words.lookup("the"));
    println!("   total words now: {}", words.size());

    match words.insert("zero", 0, 0) {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   rejected: {}", e),
    }
}
