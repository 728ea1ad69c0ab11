use std::{cmp::Ordering, fmt};

use anyhow::Result;
use log::{debug, trace};

use level_generator::{GeometricLevelGenerator, LevelGenerator};
use node::{Node, NodeId, HEADER};
use skiplist_options::SkipListOptions;

pub mod level_generator;
pub mod node;
pub mod skiplist_options;

// Ordered set of unique positive integers.
//
// Nodes live in an arena and link to each other by index. Slot 0 is the
// header: a sentinel with nominal value 0 whose tower spans every level, so
// it is the starting point of each top-down scan. Slots of deleted nodes are
// handed out again by later inserts.
//
// Mutation takes `&mut self`; callers sharing a list between threads have to
// wrap it in a lock themselves.
pub struct SkipList<G: LevelGenerator = GeometricLevelGenerator> {
    nodes: Vec<Node>,
    free_slots: Vec<NodeId>,
    // number of levels in use, always in 1..=max_levels
    height: usize,
    count: usize,
    level_generator: G,
}

impl SkipList {
    pub fn new() -> Self {
        Self::with_level_generator(GeometricLevelGenerator::default())
    }

    pub fn with_options(options: SkipListOptions) -> Result<Self> {
        options.validate()?;
        let level_generator = match options.seed {
            Some(seed) => GeometricLevelGenerator::with_seed(
                options.max_levels,
                options.promotion_probability,
                seed,
            )?,
            None => {
                GeometricLevelGenerator::new(options.max_levels, options.promotion_probability)?
            }
        };
        Ok(Self::with_level_generator(level_generator))
    }
}

impl Default for SkipList {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: LevelGenerator> SkipList<G> {
    pub fn with_level_generator(level_generator: G) -> Self {
        let max_levels = level_generator.total().max(1);
        Self {
            nodes: vec![Node::new(0, max_levels)],
            free_slots: Vec::new(),
            height: 1,
            count: 0,
            level_generator,
        }
    }

    pub fn insert(&mut self, value: i64) -> bool {
        if value <= 0 {
            trace!("rejected non-positive value {}", value);
            return false;
        }

        // rightmost node before the insertion point, per level
        let mut update = vec![HEADER; self.max_levels()];
        let mut cursor = HEADER;
        for level in (0..self.height).rev() {
            while let Some(next) = self.node(cursor).tower.next(level) {
                match self.node(next).value().cmp(&value) {
                    Ordering::Less => cursor = next,
                    Ordering::Equal => {
                        trace!("rejected duplicate value {}", value);
                        return false;
                    }
                    Ordering::Greater => break,
                }
            }
            update[level] = cursor;
        }

        let level = self.level_generator.random().clamp(1, self.max_levels());
        if level > self.height {
            // update[] above the old height already points at the header
            trace!("height {} -> {}", self.height, level);
            self.height = level;
        }

        let id = self.allocate(Node::new(value, level));
        for (i, prev) in update.into_iter().enumerate().take(level) {
            let successor = self.node(prev).tower.next(i);
            self.node_mut(id).tower.set(i, successor);
            self.node_mut(prev).tower.set(i, Some(id));
        }

        self.count += 1;
        debug!("inserted {} at level {}", value, level);
        true
    }

    pub fn search(&self, value: i64) -> Option<&Node> {
        // the header's nominal value must never match
        if value <= 0 {
            return None;
        }

        let mut cursor = HEADER;
        for level in (0..self.height).rev() {
            while let Some(next) = self.node(cursor).tower.next(level) {
                if self.node(next).value() > value {
                    break;
                }
                cursor = next;
            }
            // levels are sorted, so a hit on an upper level is final
            if cursor != HEADER && self.node(cursor).value() == value {
                return Some(self.node(cursor));
            }
        }
        None
    }

    pub fn contains(&self, value: i64) -> bool {
        self.search(value).is_some()
    }

    pub fn delete(&mut self, value: i64) -> bool {
        let mut last = vec![HEADER; self.height];
        let mut target: Option<NodeId> = None;
        let mut cursor = HEADER;
        for level in (0..self.height).rev() {
            while let Some(next) = self.node(cursor).tower.next(level) {
                match self.node(next).value().cmp(&value) {
                    Ordering::Less => cursor = next,
                    Ordering::Equal => {
                        debug_assert!(target.map_or(true, |found| found == next));
                        target = Some(next);
                        break;
                    }
                    Ordering::Greater => break,
                }
            }
            last[level] = cursor;
        }

        let target = match target {
            Some(target) => target,
            None => {
                trace!("nothing to delete for {}", value);
                return false;
            }
        };

        for level in 0..self.node(target).level() {
            let successor = self.node_mut(target).tower.take(level);
            self.node_mut(last[level]).tower.set(level, successor);
        }

        // towers have no gaps, so the first empty header level is the new height
        let height = self.node(HEADER).tower.first_empty_level().max(1);
        if height != self.height {
            trace!("height {} -> {}", self.height, height);
            self.height = height;
        }

        self.free_slots.push(target);
        self.count -= 1;
        debug!("deleted {}", value);
        true
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn max_levels(&self) -> usize {
        self.node(HEADER).level()
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        match self.free_slots.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }
}

// one line per level in use, top level first: `L1: 3 -> 9`
impl<G: LevelGenerator> fmt::Display for SkipList<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in (0..self.height).rev() {
            write!(f, "L{}:", level)?;
            let mut cursor = self.node(HEADER).tower.next(level);
            if cursor.is_none() {
                write!(f, " -")?;
            }
            let mut first = true;
            while let Some(id) = cursor {
                if first {
                    write!(f, " {}", self.node(id).value())?;
                    first = false;
                } else {
                    write!(f, " -> {}", self.node(id).value())?;
                }
                cursor = self.node(id).tower.next(level);
            }
            if level > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
