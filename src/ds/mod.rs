pub mod chained_table;
pub mod dup_tree;
pub mod slot_arena;

pub use chained_table::{ChainedHashTable, MIN_CAPACITY};
pub use dup_tree::{DuplicateTree, Iter, NodeIter, TreeNode};
pub use slot_arena::{SlotArena, SlotId};
