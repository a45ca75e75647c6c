//! A cost-ordered frontier for grid searches that tolerates duplicate costs
//! and repeated insertion of the same coordinate.
//!
//! Entries live in an arena and are addressed by generation-checked
//! [EntryHandle]s. Each distinct cost owns one node of an unbalanced binary
//! search tree; entries sharing that cost hang off the node as a doubly
//! linked tie list, yielded in insertion order.

use ordered_float::OrderedFloat;

use crate::coord::GridCoord;

type NodeId = usize;
type EntryId = usize;

/// A pending candidate: the cost it was inserted at and its coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostCell {
    pub cost: f64,
    pub coord: GridCoord,
}

/// Stable reference to an entry in a [Frontier].
///
/// Handles go stale once their entry is removed; a stale handle is ignored
/// by every operation that takes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Entry {
    cell: CostCell,
    generation: u32,
    live: bool,
    node: NodeId,
    prev_tie: Option<EntryId>,
    next_tie: Option<EntryId>,
}

#[derive(Debug, Clone)]
struct Node {
    key: OrderedFloat<f64>,
    lower: Option<NodeId>,
    higher: Option<NodeId>,
    above: Option<NodeId>,
    first_tie: EntryId,
    last_tie: EntryId,
}

/// The frontier itself.
///
/// # Example
/// ```rust
/// use multicost::*;
///
/// let mut frontier = Frontier::new();
/// frontier.insert(2.0, GridCoord::base(0, 2));
/// let stale = frontier.insert(5.0, GridCoord::base(0, 5));
/// frontier.insert(2.0, GridCoord::base(1, 2));
///
/// frontier.remove(stale);
///
/// assert_eq!(GridCoord::base(0, 2), frontier.pop_min().unwrap().coord);
/// assert_eq!(GridCoord::base(1, 2), frontier.pop_min().unwrap().coord);
/// assert!(frontier.is_empty());
/// ```
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    entries: Vec<Entry>,
    free_entries: Vec<EntryId>,
    nodes: Vec<Node>,
    free_nodes: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Number of pending entries, ties included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Remove every entry. Outstanding handles go stale.
    pub fn clear(&mut self) {
        self.free_entries.clear();
        for (id, entry) in self.entries.iter_mut().enumerate() {
            if entry.live {
                entry.live = false;
                entry.generation = entry.generation.wrapping_add(1);
            }
            self.free_entries.push(id);
        }
        self.nodes.clear();
        self.free_nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Add a pending entry. Duplicate costs and duplicate coordinates are
    /// both accepted.
    pub fn insert(&mut self, cost: f64, coord: GridCoord) -> EntryHandle {
        let key = OrderedFloat(cost);
        let id = self.alloc_entry(CostCell { cost, coord });
        self.len += 1;

        let mut parent = None;
        let mut cur = self.root;
        let mut goes_lower = false;
        while let Some(n) = cur {
            let node = &self.nodes[n];
            match key.cmp(&node.key) {
                std::cmp::Ordering::Equal => {
                    self.append_tie(n, id);
                    return self.handle(id);
                }
                std::cmp::Ordering::Less => {
                    goes_lower = true;
                    cur = node.lower;
                }
                std::cmp::Ordering::Greater => {
                    goes_lower = false;
                    cur = node.higher;
                }
            }
            parent = Some(n);
        }

        let n = self.alloc_node(Node {
            key,
            lower: None,
            higher: None,
            above: parent,
            first_tie: id,
            last_tie: id,
        });
        self.entries[id].node = n;
        match parent {
            None => self.root = Some(n),
            Some(p) if goes_lower => self.nodes[p].lower = Some(n),
            Some(p) => self.nodes[p].higher = Some(n),
        }
        self.handle(id)
    }

    /// The entry with the lowest cost; the earliest inserted among ties.
    pub fn peek_min(&self) -> Option<(EntryHandle, CostCell)> {
        let n = self.minimum(self.root?);
        let id = self.nodes[n].first_tie;
        Some((self.handle(id), self.entries[id].cell))
    }

    /// Remove and return the lowest cost entry.
    pub fn pop_min(&mut self) -> Option<CostCell> {
        let (handle, _) = self.peek_min()?;
        self.remove(handle)
    }

    /// The entry behind `handle`, if it is still pending.
    pub fn get(&self, handle: EntryHandle) -> Option<CostCell> {
        self.live_entry(handle).map(|id| self.entries[id].cell)
    }

    /// Remove a specific entry. Returns `None` for a stale handle.
    pub fn remove(&mut self, handle: EntryHandle) -> Option<CostCell> {
        let id = self.live_entry(handle)?;
        let Entry {
            cell,
            node,
            prev_tie,
            next_tie,
            ..
        } = self.entries[id].clone();

        match prev_tie {
            Some(p) => self.entries[p].next_tie = next_tie,
            None => {
                if let Some(next) = next_tie {
                    self.nodes[node].first_tie = next;
                }
            }
        }
        match next_tie {
            Some(nx) => self.entries[nx].prev_tie = prev_tie,
            None => {
                if let Some(prev) = prev_tie {
                    self.nodes[node].last_tie = prev;
                }
            }
        }
        if prev_tie.is_none() && next_tie.is_none() {
            self.delete_node(node);
        }

        let entry = &mut self.entries[id];
        entry.live = false;
        entry.generation = entry.generation.wrapping_add(1);
        entry.prev_tie = None;
        entry.next_tie = None;
        self.free_entries.push(id);
        self.len -= 1;
        Some(cell)
    }

    /// Locate a pending entry by exact cost and coordinate.
    pub fn find(&self, cost: f64, coord: GridCoord) -> Option<EntryHandle> {
        let key = OrderedFloat(cost);
        let mut cur = self.root;
        while let Some(n) = cur {
            let node = &self.nodes[n];
            match key.cmp(&node.key) {
                std::cmp::Ordering::Less => cur = node.lower,
                std::cmp::Ordering::Greater => cur = node.higher,
                std::cmp::Ordering::Equal => {
                    let mut tie = Some(node.first_tie);
                    while let Some(id) = tie {
                        if self.entries[id].cell.coord == coord {
                            return Some(self.handle(id));
                        }
                        tie = self.entries[id].next_tie;
                    }
                    return None;
                }
            }
        }
        None
    }

    /// Walk the whole structure and report the first broken link or
    /// ordering violation.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen = 0;
        let mut stack: Vec<(NodeId, Option<OrderedFloat<f64>>, Option<OrderedFloat<f64>>)> =
            Vec::new();
        if let Some(root) = self.root {
            if self.nodes[root].above.is_some() {
                return Err(format!("root node {root} has a parent"));
            }
            stack.push((root, None, None));
        }

        while let Some((n, lo, hi)) = stack.pop() {
            let node = &self.nodes[n];
            if lo.is_some_and(|lo| node.key <= lo) || hi.is_some_and(|hi| node.key >= hi) {
                return Err(format!("node {n} with cost {} is out of order", node.key));
            }

            let mut prev = None;
            let mut tie = Some(node.first_tie);
            while let Some(id) = tie {
                let entry = &self.entries[id];
                if !entry.live {
                    return Err(format!("node {n} links removed entry {id}"));
                }
                if entry.node != n {
                    return Err(format!("entry {id} points at node {} not {n}", entry.node));
                }
                if OrderedFloat(entry.cell.cost) != node.key {
                    return Err(format!("entry {id} cost differs from node {n}"));
                }
                if entry.prev_tie != prev {
                    return Err(format!("entry {id} has a broken back link"));
                }
                seen += 1;
                prev = Some(id);
                tie = entry.next_tie;
            }
            if prev != Some(node.last_tie) {
                return Err(format!("node {n} tail does not match its tie list"));
            }

            for (child, lo, hi) in [
                (node.lower, lo, Some(node.key)),
                (node.higher, Some(node.key), hi),
            ] {
                if let Some(c) = child {
                    if self.nodes[c].above != Some(n) {
                        return Err(format!("node {c} does not point back at parent {n}"));
                    }
                    stack.push((c, lo, hi));
                }
            }
        }

        if seen != self.len {
            return Err(format!("reachable entries {seen} != len {}", self.len));
        }
        Ok(())
    }

    fn handle(&self, id: EntryId) -> EntryHandle {
        EntryHandle {
            index: id as u32,
            generation: self.entries[id].generation,
        }
    }

    fn live_entry(&self, handle: EntryHandle) -> Option<EntryId> {
        let id = handle.index as usize;
        let entry = self.entries.get(id)?;
        (entry.live && entry.generation == handle.generation).then_some(id)
    }

    fn alloc_entry(&mut self, cell: CostCell) -> EntryId {
        match self.free_entries.pop() {
            Some(id) => {
                let entry = &mut self.entries[id];
                entry.cell = cell;
                entry.live = true;
                entry.prev_tie = None;
                entry.next_tie = None;
                id
            }
            None => {
                self.entries.push(Entry {
                    cell,
                    generation: 0,
                    live: true,
                    node: 0,
                    prev_tie: None,
                    next_tie: None,
                });
                self.entries.len() - 1
            }
        }
    }

    fn alloc_node(&mut self, node: Node) -> NodeId {
        match self.free_nodes.pop() {
            Some(n) => {
                self.nodes[n] = node;
                n
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn append_tie(&mut self, n: NodeId, id: EntryId) {
        let last = self.nodes[n].last_tie;
        self.entries[last].next_tie = Some(id);
        let entry = &mut self.entries[id];
        entry.prev_tie = Some(last);
        entry.node = n;
        self.nodes[n].last_tie = id;
    }

    fn minimum(&self, mut n: NodeId) -> NodeId {
        while let Some(lower) = self.nodes[n].lower {
            n = lower;
        }
        n
    }

    /// Replace the subtree rooted at `u` with the one rooted at `v`.
    fn transplant(&mut self, u: NodeId, v: Option<NodeId>) {
        let above = self.nodes[u].above;
        match above {
            None => self.root = v,
            Some(p) if self.nodes[p].lower == Some(u) => self.nodes[p].lower = v,
            Some(p) => self.nodes[p].higher = v,
        }
        if let Some(v) = v {
            self.nodes[v].above = above;
        }
    }

    fn delete_node(&mut self, z: NodeId) {
        let (lower, higher) = (self.nodes[z].lower, self.nodes[z].higher);
        match (lower, higher) {
            (None, _) => self.transplant(z, higher),
            (_, None) => self.transplant(z, lower),
            (Some(lower), Some(higher)) => {
                let y = self.minimum(higher);
                if self.nodes[y].above != Some(z) {
                    let y_higher = self.nodes[y].higher;
                    self.transplant(y, y_higher);
                    self.nodes[y].higher = Some(higher);
                    self.nodes[higher].above = Some(y);
                }
                self.transplant(z, Some(y));
                self.nodes[y].lower = Some(lower);
                self.nodes[lower].above = Some(y);
            }
        }
        let node = &mut self.nodes[z];
        node.lower = None;
        node.higher = None;
        node.above = None;
        self.free_nodes.push(z);
    }
}
