/// Index of a node inside the list's arena. Slot 0 is always the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeId(pub(crate) usize);

pub(crate) const HEADER: NodeId = NodeId(0);

/// Forward links of a node, one per level it participates in. Levels are
/// always contiguous from 0.
#[derive(Debug, Clone)]
pub(crate) struct Tower {
    links: Vec<Option<NodeId>>,
}

impl Tower {
    pub(crate) fn new(height: usize) -> Self {
        Self {
            links: vec![None; height],
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.links.len()
    }

    pub(crate) fn next(&self, level: usize) -> Option<NodeId> {
        self.links[level]
    }

    pub(crate) fn set(&mut self, level: usize, link: Option<NodeId>) {
        self.links[level] = link;
    }

    pub(crate) fn take(&mut self, level: usize) -> Option<NodeId> {
        self.links[level].take()
    }

    // first level without a forward link, or the full height if all are set
    pub(crate) fn first_empty_level(&self) -> usize {
        self.links
            .iter()
            .position(|link| link.is_none())
            .unwrap_or(self.links.len())
    }
}

/// A stored key and its tower.
#[derive(Debug)]
pub struct Node {
    value: i64,
    pub(crate) tower: Tower,
}

impl Node {
    pub(crate) fn new(value: i64, level: usize) -> Self {
        Self {
            value,
            tower: Tower::new(level),
        }
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Number of levels this node is linked into.
    pub fn level(&self) -> usize {
        self.tower.height()
    }
}

#[cfg(test)]
mod tests {
    use super::{Node, NodeId, Tower};

    #[test]
    fn test_tower_links() {
        let mut tower = Tower::new(3);
        assert_eq!(tower.height(), 3);
        assert_eq!(tower.first_empty_level(), 0);

        tower.set(0, Some(NodeId(4)));
        tower.set(1, Some(NodeId(9)));
        assert_eq!(tower.next(0), Some(NodeId(4)));
        assert_eq!(tower.first_empty_level(), 2);

        tower.set(2, Some(NodeId(9)));
        assert_eq!(tower.first_empty_level(), 3);

        assert_eq!(tower.take(1), Some(NodeId(9)));
        assert_eq!(tower.next(1), None);
        assert_eq!(tower.first_empty_level(), 1);
    }

    #[test]
    fn test_node_accessors() {
        let node = Node::new(17, 5);
        assert_eq!(node.value(), 17);
        assert_eq!(node.level(), 5);
        assert!((0..5).all(|level| node.tower.next(level).is_none()));
    }
}
