use crate::graph::{DungeonGraph, RoomNode};
use crate::room::RoomId;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

#[derive(Clone, Copy, PartialEq, Eq)]
struct ScoredNode {
    room: RoomId,
    f_score: i64, // g_score + heuristic
}

// BinaryHeap is a max-heap, so we reverse the ordering for min-heap behavior.
// Ties go to the lower room id so results are deterministic.
impl Ord for ScoredNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_score
            .cmp(&self.f_score)
            .then_with(|| other.room.cmp(&self.room))
    }
}

impl PartialOrd for ScoredNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a route from start to goal using A* over the room graph.
/// Every edge costs one step; the heuristic is Manhattan distance between node coordinates.
/// Returns the rooms visited in order, including both `start` and `goal`.
/// Returns an empty path if either room is unknown or no route exists.
pub fn find_path(graph: &DungeonGraph, start: RoomId, goal: RoomId) -> Vec<RoomId> {
    let (Some(start_node), Some(goal_node)) = (graph.node(start), graph.node(goal)) else {
        return Vec::new();
    };

    let mut open_set = BinaryHeap::new();
    let mut closed: HashSet<RoomId> = HashSet::new();
    let mut came_from: HashMap<RoomId, RoomId> = HashMap::new();
    let mut g_score: HashMap<RoomId, i64> = HashMap::new();

    g_score.insert(start, 0);
    open_set.push(ScoredNode {
        room: start,
        f_score: heuristic(start_node, goal_node),
    });

    while let Some(current) = open_set.pop() {
        if current.room == goal {
            return reconstruct_path(&came_from, current.room);
        }
        // Stale heap entries for already expanded rooms
        if !closed.insert(current.room) {
            continue;
        }
        let Some(node) = graph.node(current.room) else {
            continue;
        };

        let current_g = *g_score.get(&current.room).unwrap_or(&i64::MAX);

        for &neighbor in node.neighbors() {
            if closed.contains(&neighbor) {
                continue;
            }
            let Some(neighbor_node) = graph.node(neighbor) else {
                continue;
            };

            let tentative_g = current_g + 1;
            let neighbor_g = *g_score.get(&neighbor).unwrap_or(&i64::MAX);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.room);
                g_score.insert(neighbor, tentative_g);
                open_set.push(ScoredNode {
                    room: neighbor,
                    f_score: tentative_g + heuristic(neighbor_node, goal_node),
                });
            }
        }
    }

    Vec::new() // No path found
}

/// Get just the next room toward a goal.
/// Returns None if no path exists or already there.
pub fn next_step_toward(graph: &DungeonGraph, start: RoomId, goal: RoomId) -> Option<RoomId> {
    if start == goal {
        return None;
    }

    find_path(graph, start, goal).get(1).copied()
}

/// Manhattan distance heuristic
fn heuristic(from: &RoomNode, to: &RoomNode) -> i64 {
    from.manhattan(to)
}

/// Reconstruct the path from came_from map
fn reconstruct_path(came_from: &HashMap<RoomId, RoomId>, mut current: RoomId) -> Vec<RoomId> {
    let mut path = vec![current];

    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }

    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: RoomId = 1;
    const B: RoomId = 2;
    const C: RoomId = 3;
    const D: RoomId = 4;

    fn chain() -> DungeonGraph {
        let mut graph = DungeonGraph::new();
        graph.add_room(A, 0, 0);
        graph.add_room(B, 1, 0);
        graph.add_room(C, 2, 0);
        graph.add_room(D, 5, 5);
        graph.add_neighbor(A, B);
        graph.add_neighbor(B, C);
        graph
    }

    #[test]
    fn test_linear_chain() {
        assert_eq!(find_path(&chain(), A, C), vec![A, B, C]);
        assert_eq!(find_path(&chain(), C, A), vec![C, B, A]);
    }

    #[test]
    fn test_disconnected_is_empty() {
        assert!(find_path(&chain(), A, D).is_empty());
    }

    #[test]
    fn test_self_path() {
        assert_eq!(find_path(&chain(), A, A), vec![A]);
        assert_eq!(find_path(&chain(), D, D), vec![D]);
    }

    #[test]
    fn test_unknown_rooms() {
        assert!(find_path(&chain(), A, 99).is_empty());
        assert!(find_path(&chain(), 99, A).is_empty());
    }

    #[test]
    fn test_prefers_fewest_hops() {
        // A square with a long detour: 1-2-3-4 and a shortcut 1-4.
        let mut graph = DungeonGraph::new();
        graph.add_room(1, 0, 0);
        graph.add_room(2, 0, 1);
        graph.add_room(3, 1, 1);
        graph.add_room(4, 1, 0);
        graph.add_neighbor(1, 2);
        graph.add_neighbor(2, 3);
        graph.add_neighbor(3, 4);
        graph.add_neighbor(1, 4);
        assert_eq!(find_path(&graph, 1, 4), vec![1, 4]);
        assert_eq!(find_path(&graph, 1, 3).len(), 3);
    }

    #[test]
    fn test_next_step() {
        assert_eq!(next_step_toward(&chain(), A, C), Some(B));
        assert_eq!(next_step_toward(&chain(), A, A), None);
        assert_eq!(next_step_toward(&chain(), A, D), None);
    }
}
