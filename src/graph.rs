//! Abstract room-adjacency graph used for route finding.
//!
//! Kept apart from the playable [`Room`](crate::room::Room)s: nodes only carry
//! an id, grid coordinates for the search heuristic, and their neighbours.

use std::collections::{BTreeMap, VecDeque};

use crate::geometry::Direction;
use crate::repository::RoomRepository;
use crate::room::RoomId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomNode {
    pub id: RoomId,
    pub x: i32,
    pub y: i32,
    neighbors: Vec<RoomId>,
}

impl RoomNode {
    pub fn new(id: RoomId, x: i32, y: i32) -> Self {
        Self {
            id,
            x,
            y,
            neighbors: Vec::new(),
        }
    }

    pub fn neighbors(&self) -> &[RoomId] {
        &self.neighbors
    }

    /// Manhattan distance between node coordinates.
    pub fn manhattan(&self, other: &RoomNode) -> i64 {
        (self.x as i64 - other.x as i64).abs() + (self.y as i64 - other.y as i64).abs()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DungeonGraph {
    nodes: BTreeMap<RoomId, RoomNode>,
}

impl DungeonGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, replacing any previous node (and its edges) with the same id.
    pub fn add_room(&mut self, id: RoomId, x: i32, y: i32) {
        if self.nodes.insert(id, RoomNode::new(id, x, y)).is_some() {
            for node in self.nodes.values_mut() {
                node.neighbors.retain(|&n| n != id);
            }
        }
    }

    /// Connect two rooms both ways. Returns false when either id is unknown
    /// or the ids are equal.
    pub fn add_neighbor(&mut self, a: RoomId, b: RoomId) -> bool {
        if a == b || !self.nodes.contains_key(&a) || !self.nodes.contains_key(&b) {
            return false;
        }
        for (from, to) in [(a, b), (b, a)] {
            if let Some(node) = self.nodes.get_mut(&from) {
                if !node.neighbors.contains(&to) {
                    node.neighbors.push(to);
                }
            }
        }
        true
    }

    pub fn node(&self, id: RoomId) -> Option<&RoomNode> {
        self.nodes.get(&id)
    }

    pub fn contains(&self, id: RoomId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &RoomNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Derive the graph from the doors of every stored room.
    ///
    /// Coordinates come from walking doors outward from `root` (north is
    /// `y + 1`, east is `x + 1`). Rooms unreachable from `root` are laid out
    /// the same way from their own lowest id, shifted right of everything
    /// placed so far. Doors to rooms the repository lacks are ignored.
    pub fn from_repository<R: RoomRepository + ?Sized>(repo: &R, root: RoomId) -> Self {
        let mut coords: BTreeMap<RoomId, (i32, i32)> = BTreeMap::new();
        let mut seeds: Vec<RoomId> = Vec::new();
        if repo.exists(root) {
            seeds.push(root);
        }
        seeds.extend(repo.ids().into_iter().filter(|&id| id != root));

        for seed in seeds {
            if coords.contains_key(&seed) {
                continue;
            }
            let origin_x = coords.values().map(|&(x, _)| x + 2).max().unwrap_or(0);
            coords.insert(seed, (origin_x, 0));
            let mut queue = VecDeque::from([seed]);

            while let Some(id) = queue.pop_front() {
                let (Some(room), Some(&(x, y))) = (repo.find(id), coords.get(&id)) else {
                    continue;
                };
                for direction in Direction::ALL {
                    let Some(door) = room.door(direction) else { continue };
                    let target = door.target();
                    if !repo.exists(target) || coords.contains_key(&target) {
                        continue;
                    }
                    let (dx, dy) = direction.offset();
                    coords.insert(target, (x + dx, y + dy));
                    queue.push_back(target);
                }
            }
        }

        let mut graph = DungeonGraph::new();
        for (&id, &(x, y)) in &coords {
            graph.add_room(id, x, y);
        }
        for id in repo.ids() {
            if let Some(room) = repo.find(id) {
                for door in room.doors() {
                    graph.add_neighbor(id, door.target());
                }
            }
        }
        log::debug!("room graph built with {} nodes", graph.len());
        graph
    }
}
