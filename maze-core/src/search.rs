//! The per-net best-first search: §4.3 of the routing specification.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use maze_common::{Cell, Direction};
use tracing::{debug, warn};

use crate::cost::{step_cost, Penalties, Step};
use crate::grid::Grid;
use crate::net::Net;

/// Outcome of routing a single net.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Routed(Vec<Cell>),
    /// The search exhausted the reachable state space, or the net's
    /// start pin was already blocked — both are reported the same way
    /// (§7, `Unroutable`); the distinction is only in the log message.
    Unroutable,
}

/// One entry in the priority queue. Ordering is by `(cost, seq)` only —
/// `cell`, `parent`, and `prev_dir` ride along as payload. `seq` is a
/// monotonically increasing counter assigned at push time, giving a
/// deterministic tie-break: the reference leaves tie order unspecified,
/// but requires that identical input produce identical output, so ties
/// are broken by insertion order rather than left to hash or pointer
/// order.
struct QueueEntry {
    cost: u64,
    seq: u64,
    cell: Cell,
    parent: Option<Cell>,
    prev_dir: Option<Direction>,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}
impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, and we want the smallest
        // cost (then smallest seq) to come out first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Route one net against the current grid. Does not mutate the grid —
/// the caller (net scheduler) commits the returned path.
pub fn route_net(grid: &Grid, penalties: &Penalties, net: &Net) -> SearchOutcome {
    let source = net.source();
    let targets: HashSet<Cell> = net.targets().iter().copied().collect();

    if grid.status(source.layer, source.row, source.col).is_blocked() {
        warn!(net = %net.name, cell = %source, "start pin already blocked, unroutable");
        return SearchOutcome::Unroutable;
    }

    let mut heap: BinaryHeap<QueueEntry> = BinaryHeap::new();
    let mut seq = 0u64;
    let mut closed: HashSet<Cell> = HashSet::new();
    let mut parents: HashMap<Cell, Cell> = HashMap::new();

    heap.push(QueueEntry {
        cost: 0,
        seq,
        cell: source,
        parent: None,
        prev_dir: None,
    });
    seq += 1;

    let via_cell = source.via();
    if !grid.status(via_cell.layer, via_cell.row, via_cell.col).is_blocked() {
        heap.push(QueueEntry {
            cost: penalties.via_penalty as u64,
            seq,
            cell: via_cell,
            parent: Some(source),
            prev_dir: None,
        });
        seq += 1;
    }

    while let Some(entry) = heap.pop() {
        if closed.contains(&entry.cell) {
            continue;
        }
        closed.insert(entry.cell);
        if let Some(parent) = entry.parent {
            parents.insert(entry.cell, parent);
        }

        if path_covers_all_targets(&parents, entry.cell, &targets) {
            let path = reconstruct_path(&parents, entry.cell);
            debug!(net = %net.name, cost = entry.cost, len = path.len(), "routed");
            return SearchOutcome::Routed(path);
        }

        push_successors(grid, penalties, &closed, &entry, &mut heap, &mut seq);
    }

    warn!(net = %net.name, "search exhausted without covering all pins");
    SearchOutcome::Unroutable
}

fn push_successors(
    grid: &Grid,
    penalties: &Penalties,
    closed: &HashSet<Cell>,
    entry: &QueueEntry,
    heap: &mut BinaryHeap<QueueEntry>,
    seq: &mut u64,
) {
    let (rows, cols) = grid.size();
    let _ = (rows, cols); // bounds are checked via Direction::apply + Grid::in_bounds

    for dir in Direction::ALL {
        if let Some((nr, nc)) = dir.apply(entry.cell.row, entry.cell.col) {
            if !grid.in_bounds(nr, nc) {
                continue;
            }
            let neighbor = Cell::new(entry.cell.layer, nr, nc);
            if closed.contains(&neighbor) || grid.status(neighbor.layer, nr, nc).is_blocked() {
                continue;
            }
            let cost = entry.cost
                + step_cost(penalties, entry.cell.layer, entry.prev_dir, Step::OnLayer(dir)) as u64;
            heap.push(QueueEntry {
                cost,
                seq: *seq,
                cell: neighbor,
                parent: Some(entry.cell),
                prev_dir: Some(dir),
            });
            *seq += 1;
        }
    }

    let via = entry.cell.via();
    if !closed.contains(&via) && !grid.status(via.layer, via.row, via.col).is_blocked() {
        let cost = entry.cost + step_cost(penalties, entry.cell.layer, entry.prev_dir, Step::Via) as u64;
        heap.push(QueueEntry {
            cost,
            seq: *seq,
            cell: via,
            parent: Some(entry.cell),
            prev_dir: None,
        });
        *seq += 1;
    }
}

/// Whether every target pin lies on the unique ancestor chain from
/// `cell` back to the search root(s). Closing a cell elsewhere in the
/// tree (a different branch) does not count — only this walk's own
/// path does, matching the reference's per-entry path tracking.
fn path_covers_all_targets(parents: &HashMap<Cell, Cell>, cell: Cell, targets: &HashSet<Cell>) -> bool {
    if targets.is_empty() {
        return true;
    }
    let mut remaining: HashSet<Cell> = targets.clone();
    let mut cur = cell;
    loop {
        remaining.remove(&cur);
        if remaining.is_empty() {
            return true;
        }
        match parents.get(&cur) {
            Some(&parent) => cur = parent,
            None => return false,
        }
    }
}

fn reconstruct_path(parents: &HashMap<Cell, Cell>, terminal: Cell) -> Vec<Cell> {
    let mut path = vec![terminal];
    let mut cur = terminal;
    while let Some(&parent) = parents.get(&cur) {
        path.push(parent);
        cur = parent;
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::Net;

    fn penalties(bend: u32, via: u32) -> Penalties {
        Penalties {
            bend_penalty: bend,
            via_penalty: via,
        }
    }

    #[test]
    fn straight_horizontal_run_on_empty_grid() {
        let grid = Grid::new(3, 3);
        let net = Net::new("netA", vec![Cell::new(0, 1, 0), Cell::new(0, 1, 2)]).unwrap();
        let result = route_net(&grid, &penalties(5, 20), &net);
        match result {
            SearchOutcome::Routed(path) => {
                assert_eq!(
                    path,
                    vec![Cell::new(0, 1, 0), Cell::new(0, 1, 1), Cell::new(0, 1, 2)]
                );
            }
            SearchOutcome::Unroutable => panic!("expected a route"),
        }
    }

    #[test]
    fn cheap_via_is_preferred_over_expensive_bend() {
        let grid = Grid::new(3, 3);
        let net = Net::new("netA", vec![Cell::new(0, 0, 0), Cell::new(1, 0, 0)]).unwrap();
        let result = route_net(&grid, &penalties(100, 1), &net);
        match result {
            SearchOutcome::Routed(path) => {
                assert_eq!(path, vec![Cell::new(0, 0, 0), Cell::new(1, 0, 0)]);
            }
            SearchOutcome::Unroutable => panic!("expected a route"),
        }
    }

    #[test]
    fn obstacle_forces_a_detour() {
        let mut grid = Grid::new(5, 5);
        grid.mark_obstacle(0, 2, 2);
        let net = Net::new("netA", vec![Cell::new(0, 2, 0), Cell::new(0, 2, 4)]).unwrap();
        let result = route_net(&grid, &penalties(0, 100), &net);
        match result {
            SearchOutcome::Routed(path) => {
                assert_eq!(path.len(), 7);
                assert_eq!(path.first(), Some(&Cell::new(0, 2, 0)));
                assert_eq!(path.last(), Some(&Cell::new(0, 2, 4)));
                assert!(!path.contains(&Cell::new(0, 2, 2)));
            }
            SearchOutcome::Unroutable => panic!("expected a route"),
        }
    }

    #[test]
    fn fully_walled_target_is_unroutable() {
        let mut grid = Grid::new(3, 3);
        for col in 0..3 {
            grid.mark_obstacle(0, 1, col);
            grid.mark_obstacle(1, 1, col);
        }
        let net = Net::new("netA", vec![Cell::new(0, 0, 0), Cell::new(0, 2, 2)]).unwrap();
        let result = route_net(&grid, &penalties(0, 100), &net);
        assert!(matches!(result, SearchOutcome::Unroutable));
    }

    #[test]
    fn three_pin_net_visits_every_pin_in_one_walk() {
        let grid = Grid::new(5, 5);
        let net = Net::new(
            "netA",
            vec![Cell::new(0, 0, 0), Cell::new(0, 0, 4), Cell::new(0, 4, 4)],
        )
        .unwrap();
        let result = route_net(&grid, &penalties(0, 100), &net);
        match result {
            SearchOutcome::Routed(path) => {
                assert_eq!(path.first(), Some(&Cell::new(0, 0, 0)));
                assert!(path.contains(&Cell::new(0, 0, 4)));
                assert!(path.contains(&Cell::new(0, 4, 4)));
            }
            SearchOutcome::Unroutable => panic!("expected a route"),
        }
    }

    #[test]
    fn cost_sanity_pure_horizontal_run_length() {
        let grid = Grid::new(1, 10);
        let k = 7;
        let net = Net::new("netA", vec![Cell::new(0, 0, 0), Cell::new(0, 0, k)]).unwrap();
        let result = route_net(&grid, &penalties(5, 20), &net);
        match result {
            SearchOutcome::Routed(path) => {
                assert_eq!(path.len() as u32, k + 1);
                for (i, cell) in path.iter().enumerate() {
                    assert_eq!(cell.layer, 0);
                    assert_eq!(cell.row, 0);
                    assert_eq!(cell.col, i as u32);
                }
            }
            SearchOutcome::Unroutable => panic!("expected a route"),
        }
    }

    #[test]
    fn start_pin_on_committed_cell_is_unroutable() {
        let mut grid = Grid::new(3, 3);
        grid.commit_cell(0, 0, 0);
        let net = Net::new("netA", vec![Cell::new(0, 0, 0), Cell::new(0, 2, 2)]).unwrap();
        let result = route_net(&grid, &penalties(0, 100), &net);
        assert!(matches!(result, SearchOutcome::Unroutable));
    }
}
