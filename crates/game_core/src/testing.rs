//! Synthetic games for exercising the engines without a rules engine.
//!
//! - [`TreeGame`]: an explicit game tree with fixed leaf values, for checking
//!   search results against hand-computed minimax values.
//! - [`ForcedLineGame`]: a line of positions with exactly one legal move each,
//!   with a textual notation so it can drive the protocol session.

use std::cell::Cell;
use std::rc::Rc;

use crate::error::NotationError;
use crate::types::{GameState, Notation, Outcome, Side};
use crate::Evaluator;

// =============================================================================
// TreeGame
// =============================================================================

/// Shape of a [`TreeGame`] tree.
#[derive(Debug, Clone)]
pub enum Shape {
    Leaf(f64),
    Node(Vec<Shape>),
}

pub fn leaf(value: f64) -> Shape {
    Shape::Leaf(value)
}

pub fn node(children: Vec<Shape>) -> Shape {
    Shape::Node(children)
}

#[derive(Debug)]
struct TreeNode {
    children: Vec<usize>,
    value: f64,
    depth: usize,
}

/// A position in a fixed game tree. Moves are child indices.
///
/// White moves at even depths. Leaves are terminal; a positive leaf value is
/// a White win, a negative one a Black win, zero a draw.
#[derive(Debug, Clone)]
pub struct TreeGame {
    nodes: Rc<Vec<TreeNode>>,
    current: usize,
}

impl TreeGame {
    pub fn new(shape: Shape) -> Self {
        fn build(shape: &Shape, depth: usize, out: &mut Vec<TreeNode>) -> usize {
            let id = out.len();
            out.push(TreeNode {
                children: Vec::new(),
                value: 0.0,
                depth,
            });
            match shape {
                Shape::Leaf(v) => out[id].value = *v,
                Shape::Node(children) => {
                    for child in children {
                        let child_id = build(child, depth + 1, out);
                        out[id].children.push(child_id);
                    }
                }
            }
            id
        }

        let mut nodes = Vec::new();
        build(&shape, 0, &mut nodes);
        Self {
            nodes: Rc::new(nodes),
            current: 0,
        }
    }

    /// A complete tree with `branching` children per node and `leaves` read
    /// left to right at the given depth.
    pub fn uniform(branching: usize, depth: usize, leaves: &[f64]) -> Self {
        fn shape(branching: usize, depth: usize, leaves: &mut std::slice::Iter<'_, f64>) -> Shape {
            if depth == 0 {
                return leaf(*leaves.next().expect("not enough leaf values"));
            }
            node((0..branching).map(|_| shape(branching, depth - 1, leaves)).collect())
        }
        assert_eq!(leaves.len(), branching.pow(depth as u32));
        Self::new(shape(branching, depth, &mut leaves.iter()))
    }

    /// Static value of the current node (0 for interior nodes).
    pub fn value(&self) -> f64 {
        self.nodes[self.current].value
    }

    pub fn depth(&self) -> usize {
        self.nodes[self.current].depth
    }
}

impl GameState for TreeGame {
    type Move = usize;

    fn legal_moves(&self) -> Vec<usize> {
        (0..self.nodes[self.current].children.len()).collect()
    }

    fn apply(&self, mv: usize) -> Self {
        Self {
            nodes: Rc::clone(&self.nodes),
            current: self.nodes[self.current].children[mv],
        }
    }

    fn is_terminal(&self) -> bool {
        self.nodes[self.current].children.is_empty()
    }

    fn outcome(&self) -> Option<Outcome> {
        if !self.is_terminal() {
            return None;
        }
        let v = self.value();
        Some(if v > 0.0 {
            Outcome::Win(Side::White)
        } else if v < 0.0 {
            Outcome::Win(Side::Black)
        } else {
            Outcome::Draw
        })
    }

    fn to_move(&self) -> Side {
        if self.depth() % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }
}

/// Scores a [`TreeGame`] node by its static value.
#[derive(Debug, Default)]
pub struct LeafValue {
    calls: Cell<u64>,
}

impl LeafValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of positions scored so far.
    pub fn calls(&self) -> u64 {
        self.calls.get()
    }
}

impl Evaluator<TreeGame> for LeafValue {
    fn score(&self, pos: &TreeGame) -> f64 {
        self.calls.set(self.calls.get() + 1);
        pos.value()
    }
}

// =============================================================================
// ForcedLineGame
// =============================================================================

/// A game of `length` plies where every position has exactly one legal move.
/// The move leading to ply `n` is written `m<n>`; positions are `line:<ply>/<length>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForcedLineGame {
    pub ply: u32,
    pub length: u32,
}

impl GameState for ForcedLineGame {
    type Move = u32;

    fn legal_moves(&self) -> Vec<u32> {
        if self.ply < self.length {
            vec![self.ply + 1]
        } else {
            Vec::new()
        }
    }

    fn apply(&self, mv: u32) -> Self {
        Self {
            ply: mv,
            length: self.length,
        }
    }

    fn is_terminal(&self) -> bool {
        self.ply >= self.length
    }

    fn outcome(&self) -> Option<Outcome> {
        self.is_terminal().then_some(Outcome::Draw)
    }

    fn to_move(&self) -> Side {
        if self.ply % 2 == 0 {
            Side::White
        } else {
            Side::Black
        }
    }
}

impl Notation for ForcedLineGame {
    fn initial() -> Self {
        Self { ply: 0, length: 4 }
    }

    fn encode(&self) -> String {
        format!("line:{}/{}", self.ply, self.length)
    }

    fn decode(text: &str) -> Result<Self, NotationError> {
        let invalid = |reason: &str| NotationError::InvalidPosition {
            text: text.to_string(),
            reason: reason.to_string(),
        };
        let body = text.strip_prefix("line:").ok_or_else(|| invalid("missing 'line:' prefix"))?;
        let (ply, length) = body.split_once('/').ok_or_else(|| invalid("expected <ply>/<length>"))?;
        let ply: u32 = ply.parse().map_err(|_| invalid("bad ply"))?;
        let length: u32 = length.parse().map_err(|_| invalid("bad length"))?;
        if ply > length {
            return Err(invalid("ply beyond end of line"));
        }
        Ok(Self { ply, length })
    }

    fn encode_move(&self, mv: u32) -> String {
        format!("m{mv}")
    }

    fn decode_move(&self, text: &str) -> Result<u32, NotationError> {
        let mv: u32 = text
            .strip_prefix('m')
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| NotationError::InvalidMove(text.to_string()))?;
        if self.legal_moves().contains(&mv) {
            Ok(mv)
        } else {
            Err(NotationError::IllegalMove(text.to_string()))
        }
    }
}
