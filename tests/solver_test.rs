use std::collections::{HashMap, VecDeque};

use npuzzle::{Board, Outcome, Solver};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn board(tiles: [u32; 9]) -> Board {
    Board::from_tiles(3, tiles.to_vec()).unwrap()
}

/// Exact distance to the goal for every reachable board of dimension `n`.
fn distances_from_goal(n: usize) -> HashMap<Board, usize> {
    let goal = Board::goal(n);
    let mut dist = HashMap::from([(goal.clone(), 0)]);
    let mut queue = VecDeque::from([goal]);

    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        for next in current.neighbors() {
            if !dist.contains_key(&next) {
                dist.insert(next.clone(), d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

fn permutations(items: &[u32]) -> Vec<Vec<u32>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

fn assert_valid_solution(solver: &Solver) {
    let path = solver.solution().unwrap();
    let steps = solver.steps().unwrap();
    assert_eq!(path.len(), steps.len() + 1);
    assert_eq!(Some(steps.len()), solver.moves());

    let mut replay = path[0].clone();
    for (step, expected) in steps.iter().zip(&path[1..]) {
        replay = replay.slide(*step).unwrap();
        assert_eq!(&replay, expected);
    }
    assert!(replay.is_goal());
}

#[test]
fn test_goal_scenario() {
    let goal = board([1, 2, 3, 4, 5, 6, 7, 8, 0]);
    let solver = Solver::new(goal.clone());
    assert!(solver.is_solvable());
    assert_eq!(solver.moves(), Some(0));
    assert_eq!(solver.solution(), Some(&[goal][..]));
}

#[test]
fn test_unsolvable_scenario() {
    let solver = Solver::new(board([1, 2, 3, 4, 5, 6, 8, 7, 0]));
    assert!(!solver.is_solvable());
    assert_eq!(solver.outcome(), Outcome::TwinSolved);
    assert_eq!(solver.moves(), None);
    assert!(solver.solution().is_none());
}

#[test]
fn test_single_cell_scenario() {
    let solver = Solver::new(Board::new(vec![vec![0]]).unwrap());
    assert!(solver.is_solvable());
    assert_eq!(solver.moves(), Some(0));
}

#[test]
fn test_known_optimal_lengths() {
    let fixtures = [
        ([0, 1, 3, 4, 2, 5, 7, 8, 6], 4),
        ([8, 1, 3, 4, 0, 2, 7, 6, 5], 14),
        ([7, 1, 6, 0, 2, 8, 3, 5, 4], 19),
        ([8, 0, 4, 7, 3, 1, 6, 5, 2], 21),
        ([7, 4, 5, 6, 2, 3, 8, 0, 1], 23),
        ([5, 0, 7, 8, 1, 6, 3, 2, 4], 25),
        ([2, 4, 0, 8, 3, 7, 5, 6, 1], 26),
    ];

    for (tiles, expected) in fixtures {
        let solver = Solver::new(board(tiles));
        assert_eq!(solver.moves(), Some(expected), "board {:?}", tiles);
        assert_valid_solution(&solver);

        let twin = Solver::new(board(tiles).twin());
        assert!(!twin.is_solvable(), "twin of {:?}", tiles);
    }
}

#[test]
#[ignore = "slow without optimizations"]
fn test_hardest_eight_puzzle() {
    let solver = Solver::new(board([8, 6, 7, 2, 5, 4, 3, 0, 1]));
    assert_eq!(solver.moves(), Some(31));
    assert_valid_solution(&solver);
}

#[test]
fn test_every_two_by_two_board() {
    let dist = distances_from_goal(2);
    assert_eq!(dist.len(), 12);

    for tiles in permutations(&[0, 1, 2, 3]) {
        let b = Board::from_tiles(2, tiles).unwrap();
        let solver = Solver::new(b.clone());
        let twin = Solver::new(b.twin());

        assert_ne!(solver.is_solvable(), twin.is_solvable(), "board {:?}", b.tiles());
        assert_eq!(solver.moves(), dist.get(&b).copied(), "board {:?}", b.tiles());
        if solver.is_solvable() {
            assert_valid_solution(&solver);
        }
    }
}

#[test]
fn test_sampled_three_by_three_boards_match_bfs() {
    let dist = distances_from_goal(3);
    assert_eq!(dist.len(), 181_440);

    let mut rng = StdRng::seed_from_u64(89);
    let mut tiles: Vec<u32> = (0..9).collect();
    for _ in 0..16 {
        tiles.shuffle(&mut rng);
        let b = Board::from_tiles(3, tiles.clone()).unwrap();
        let solver = Solver::new(b.clone());
        let twin = Solver::new(b.twin());

        assert_ne!(solver.is_solvable(), twin.is_solvable(), "board {:?}", tiles);
        assert_eq!(solver.moves(), dist.get(&b).copied(), "board {:?}", tiles);
        assert_eq!(twin.moves(), dist.get(&b.twin()).copied(), "twin of {:?}", tiles);
    }
}

#[test]
fn test_scrambled_four_by_four() {
    let mut rng = StdRng::seed_from_u64(15);
    for steps in [6, 12, 18] {
        let b = Board::scrambled(4, steps, &mut rng);
        let solver = Solver::new(b.clone());
        let moves = solver.moves().unwrap();
        assert!(moves <= steps);
        assert!(moves >= b.manhattan());
        assert_eq!(moves % 2, steps % 2);
        assert_valid_solution(&solver);
    }
}

#[test]
fn test_stats_are_counted() {
    let solver = Solver::new(board([8, 1, 3, 4, 0, 2, 7, 6, 5]));
    let stats = solver.stats();
    assert!(stats.rounds > 1);
    assert_eq!(stats.expanded, 2 * (stats.rounds - 1));
    assert!(stats.enqueued >= stats.expanded);
    assert!(stats.max_frontier > 2);
}
