//! Search tree node representation.

use game_core::GameState;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub(crate) fn idx(self) -> usize {
        self.0 as usize
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<G: GameState> {
    pub position: G,

    /// Move that led here from the parent (None for the root)
    pub incoming_move: Option<G::Move>,

    /// Parent node (None for the root)
    pub parent: Option<NodeId>,

    /// Children in expansion order
    pub children: Vec<NodeId>,

    /// Legal moves not expanded yet. Empty once the node is fully expanded.
    pub untried: Vec<G::Move>,

    /// Whether no move can be played from here
    pub terminal: bool,

    /// Number of simulations that passed through this node
    pub visit_count: u32,

    /// Sum of simulation results, from the root side's point of view
    pub total_score: f64,
}

impl<G: GameState> SearchNode<G> {
    pub fn new_root(position: G) -> Self {
        let untried = position.legal_moves();
        Self {
            terminal: untried.is_empty(),
            position,
            incoming_move: None,
            parent: None,
            children: Vec::new(),
            untried,
            visit_count: 0,
            total_score: 0.0,
        }
    }

    /// Game-over positions (draw rules included) get no untried moves.
    pub fn new_child(parent: NodeId, mv: G::Move, position: G) -> Self {
        let terminal = position.is_terminal();
        let untried = if terminal {
            Vec::new()
        } else {
            position.legal_moves()
        };
        Self {
            terminal: terminal || untried.is_empty(),
            position,
            incoming_move: Some(mv),
            parent: Some(parent),
            children: Vec::new(),
            untried,
            visit_count: 0,
            total_score: 0.0,
        }
    }

    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }
}
