//! A* over sliding puzzle positions, with unsolvability detected by racing
//! the board against its twin.
//!
//! Both searches advance one node per round. Exactly one of the two boards
//! is solvable, so exactly one search reaches the goal, and the total work
//! stays within about twice the cost of solving that board.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use tracing::{debug, instrument, trace};

use crate::board::{Board, Move};

/// How often (in rounds) frontier sizes are traced.
const TRACE_INTERVAL: usize = 10_000;

/// Which of the two searches reached its goal first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The initial board reached the goal.
    Solved,
    /// The twin reached the goal, so the initial board cannot.
    TwinSolved,
}

/// Counters gathered over both searches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub rounds: usize,
    pub expanded: usize,
    pub enqueued: usize,
    /// Largest combined size of the two frontiers.
    pub max_frontier: usize,
}

/// Index of a node in its search's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

struct SearchNode {
    board: Board,
    parent: Option<NodeId>,
    moves: usize,
}

/// Heap key for a node.
///
/// Lowest `priority` (moves + manhattan) first. Among equal priorities the
/// node with the smaller heuristic, i.e. the deeper one, wins, and remaining
/// ties go to whichever was enqueued first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Frontier {
    priority: usize,
    heuristic: usize,
    seq: u64,
    node: NodeId,
}

/// Reversed so `BinaryHeap` pops the minimum.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.heuristic.cmp(&self.heuristic))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One A* search: an arena of every node created plus the open frontier.
struct Search {
    nodes: Vec<SearchNode>,
    queue: BinaryHeap<Frontier>,
    seq: u64,
}

impl Search {
    fn new(root: Board) -> Self {
        let mut search = Self {
            nodes: Vec::new(),
            queue: BinaryHeap::new(),
            seq: 0,
        };
        search.push(root, None, 0);
        search
    }

    fn push(&mut self, board: Board, parent: Option<NodeId>, moves: usize) {
        let node = NodeId(self.nodes.len());
        let heuristic = board.manhattan();
        self.queue.push(Frontier {
            priority: moves + heuristic,
            heuristic,
            seq: self.seq,
            node,
        });
        self.seq += 1;
        self.nodes.push(SearchNode {
            board,
            parent,
            moves,
        });
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.queue.pop().map(|entry| entry.node)
    }

    fn node(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Enqueues every neighbor except the board this node came from.
    /// Returns how many children were pushed.
    fn expand(&mut self, id: NodeId) -> usize {
        let node = self.node(id);
        let previous = node.parent.map(|p| &self.node(p).board);
        let moves = node.moves + 1;

        let children: Vec<Board> = node
            .board
            .neighbors()
            .filter(|b| previous != Some(b))
            .collect();

        let count = children.len();
        for child in children {
            self.push(child, Some(id), moves);
        }
        count
    }

    /// Boards from the root to `id`, in play order.
    fn path_to(&self, id: NodeId) -> Vec<Board> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            path.push(node.board.clone());
            current = node.parent;
        }
        path.reverse();
        path
    }

    fn frontier(&self) -> usize {
        self.queue.len()
    }
}

/// Solves a board on construction; every query afterwards is a read.
#[derive(Debug, Clone)]
pub struct Solver {
    outcome: Outcome,
    solution: Option<Vec<Board>>,
    stats: SearchStats,
}

impl Solver {
    #[instrument(skip_all, fields(dimension = initial.dimension(), manhattan = initial.manhattan()))]
    pub fn new(initial: Board) -> Self {
        let twin = initial.twin();
        let mut primary = Search::new(initial);
        let mut shadow = Search::new(twin);
        let mut stats = SearchStats {
            enqueued: 2,
            max_frontier: 2,
            ..SearchStats::default()
        };

        let (outcome, solution) = loop {
            let (current, current_twin) = match (primary.pop(), shadow.pop()) {
                (Some(a), Some(b)) => (a, b),
                // Only reachable for a board with no moves at all, which is
                // never the case for a valid board that isn't already solved.
                (None, _) => break (Outcome::TwinSolved, None),
                (Some(a), None) => {
                    if primary.node(a).board.is_goal() {
                        break (Outcome::Solved, Some(primary.path_to(a)));
                    }
                    break (Outcome::TwinSolved, None);
                }
            };
            stats.rounds += 1;

            if primary.node(current).board.is_goal() {
                break (Outcome::Solved, Some(primary.path_to(current)));
            }
            if shadow.node(current_twin).board.is_goal() {
                break (Outcome::TwinSolved, None);
            }

            stats.enqueued += primary.expand(current);
            stats.enqueued += shadow.expand(current_twin);
            stats.expanded += 2;
            stats.max_frontier = stats
                .max_frontier
                .max(primary.frontier() + shadow.frontier());

            if stats.rounds % TRACE_INTERVAL == 0 {
                trace!(
                    rounds = stats.rounds,
                    frontier = primary.frontier(),
                    twin_frontier = shadow.frontier(),
                    depth = primary.node(current).moves,
                    "searching"
                );
            }
        };

        debug!(
            ?outcome,
            moves = ?solution.as_ref().map(|path| path.len() - 1),
            rounds = stats.rounds,
            expanded = stats.expanded,
            enqueued = stats.enqueued,
            max_frontier = stats.max_frontier,
            "search finished"
        );

        Self {
            outcome,
            solution,
            stats,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_solvable(&self) -> bool {
        self.outcome == Outcome::Solved
    }

    /// Length of a shortest solution, or `None` if the board is unsolvable.
    pub fn moves(&self) -> Option<usize> {
        self.solution.as_ref().map(|path| path.len() - 1)
    }

    /// Boards from the initial one to the goal, inclusive.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }

    /// The solution as tile slides, one per consecutive pair of boards.
    pub fn steps(&self) -> Option<Vec<Move>> {
        let path = self.solution.as_ref()?;
        path.windows(2).map(|pair| pair[0].move_to(&pair[1])).collect()
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}
