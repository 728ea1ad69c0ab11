pub mod skiplist;

pub use skiplist::{
    level_generator::{GeometricLevelGenerator, LevelGenerator},
    node::Node,
    skiplist_options::SkipListOptions,
    SkipList,
};
