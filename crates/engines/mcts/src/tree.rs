//! Search tree with arena allocation.
//!
//! Nodes live in a contiguous Vec and refer to each other by [`NodeId`].
//! Parent links are plain indices, so walking up for backpropagation needs no
//! shared ownership. The root is always `NodeId(0)`.

use game_core::GameState;

use crate::node::{NodeId, SearchNode};

#[derive(Debug)]
pub struct SearchTree<G: GameState> {
    nodes: Vec<SearchNode<G>>,
}

impl<G: GameState> SearchTree<G> {
    pub fn new(root: G) -> Self {
        Self {
            nodes: vec![SearchNode::new_root(root)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<G> {
        &self.nodes[id.idx()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<G> {
        &mut self.nodes[id.idx()]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Appends a child reached by `mv` and links it under `parent`.
    pub fn add_child(&mut self, parent: NodeId, mv: G::Move, position: G) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SearchNode::new_child(parent, mv, position));
        self.get_mut(parent).children.push(id);
        id
    }

    /// Selection score of `child` under `parent`.
    ///
    /// Unvisited children score `+inf`. Under a root-like parent (no
    /// grandparent, or one that was never visited) there is no meaningful
    /// `ln(N)` yet, so the score is the damped mean `W / (n + 1)`. Elsewhere
    /// it is UCT: `W / n + w * sqrt(ln(N) / n)`.
    pub fn uct_score(&self, parent: NodeId, child: NodeId, exploration_weight: f64) -> f64 {
        let p = self.get(parent);
        let c = self.get(child);

        if c.visit_count == 0 {
            return f64::INFINITY;
        }

        let root_like = match p.parent {
            None => true,
            Some(grandparent) => self.get(grandparent).visit_count == 0,
        };
        let n = c.visit_count as f64;

        if root_like {
            c.total_score / (n + 1.0)
        } else {
            let exploration = ((p.visit_count as f64).ln() / n).sqrt();
            c.total_score / n + exploration_weight * exploration
        }
    }

    /// Child with the greatest selection score; the first one wins ties.
    pub fn select_child(&self, parent: NodeId, exploration_weight: f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child in &self.get(parent).children {
            let score = self.uct_score(parent, child, exploration_weight);
            let better = match best {
                None => true,
                Some((_, best_score)) => score > best_score,
            };
            if better {
                best = Some((child, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Descends from the root through fully expanded, non-terminal nodes.
    pub fn select_leaf(&self, exploration_weight: f64) -> NodeId {
        let mut current = self.root();
        loop {
            let node = self.get(current);
            if node.terminal || !node.is_fully_expanded() {
                return current;
            }
            match self.select_child(current, exploration_weight) {
                Some(child) => current = child,
                None => return current,
            }
        }
    }

    /// Adds one visit and `result` to every node from `from` up to the root.
    /// Results are already oriented to the root side, so they are not negated
    /// per ply.
    pub fn backpropagate(&mut self, from: NodeId, result: f64) {
        let mut current = Some(from);
        while let Some(id) = current {
            let node = self.get_mut(id);
            node.visit_count += 1;
            node.total_score += result;
            current = node.parent;
        }
    }

    /// Child with the most visits; the first one wins ties.
    pub fn most_visited_child(&self, parent: NodeId) -> Option<NodeId> {
        let mut best: Option<NodeId> = None;
        for &child in &self.get(parent).children {
            let better = match best {
                None => true,
                Some(current) => self.get(child).visit_count > self.get(current).visit_count,
            };
            if better {
                best = Some(child);
            }
        }
        best
    }

    /// Move leading to the most visited root child.
    pub fn best_move(&self) -> Option<G::Move> {
        self.most_visited_child(self.root())
            .and_then(|id| self.get(id).incoming_move)
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tree_tests;
