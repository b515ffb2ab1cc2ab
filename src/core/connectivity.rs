use crate::core::{ComponentKind, ConnectivityCheck, ConnectivityMode, Coord, Orientation, Snapshot};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::unionfind::UnionFind;
use std::collections::HashMap;

/// 只要有任何一條導線就視為已連接
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyWire;

impl ConnectivityCheck for AnyWire {
    fn is_connected(&self, snapshot: &Snapshot) -> bool {
        !snapshot.wires.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Wire(Orientation),
    Battery,
    Resistor,
}

impl CellKind {
    fn reaches(&self, dx: isize, dy: isize) -> bool {
        match self {
            CellKind::Wire(Orientation::Horizontal) => dy == 0,
            CellKind::Wire(Orientation::Vertical) => dx == 0,
            CellKind::Battery | CellKind::Resistor => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Cell {
    kind: CellKind,
    has_wire: bool,
}

/// 以圖的可達性判斷連接
///
/// 每個有東西的格子是一個節點，上下左右相鄰且彼此朝向對方時連一條邊。
/// 元件四個方向都通，水平導線只通左右，垂直導線只通上下；
/// 同一格有元件又有導線時當作元件。所有電池與電阻落在同一群，
/// 且該群含有導線，才算已連接。
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphTrace;

impl GraphTrace {
    fn build_graph(snapshot: &Snapshot) -> (UnGraph<Cell, ()>, HashMap<Coord, NodeIndex>) {
        let mut cells: HashMap<Coord, Cell> = HashMap::new();
        for wire in &snapshot.wires {
            cells.insert(
                wire.at,
                Cell {
                    kind: CellKind::Wire(wire.orientation),
                    has_wire: true,
                },
            );
        }
        for component in &snapshot.components {
            let kind = match component.kind() {
                ComponentKind::Battery => CellKind::Battery,
                ComponentKind::Resistor => CellKind::Resistor,
            };
            let has_wire = cells.get(&component.at).is_some_and(|c| c.has_wire);
            cells.insert(component.at, Cell { kind, has_wire });
        }

        let mut graph = UnGraph::with_capacity(cells.len(), cells.len() * 2);
        let mut lookup = HashMap::with_capacity(cells.len());
        for (&at, &cell) in &cells {
            lookup.insert(at, graph.add_node(cell));
        }

        // 只往右、往下看，避免重複加邊
        for (&at, &cell) in &cells {
            for (dx, dy) in [(1isize, 0isize), (0, 1)] {
                let (Some(x), Some(y)) = (
                    at.x.checked_add(dx as usize),
                    at.y.checked_add(dy as usize),
                ) else {
                    continue;
                };
                let neighbour = Coord::new(x, y);
                let Some(other) = cells.get(&neighbour) else {
                    continue;
                };
                if cell.kind.reaches(dx, dy) && other.kind.reaches(-dx, -dy) {
                    graph.add_edge(lookup[&at], lookup[&neighbour], ());
                }
            }
        }

        (graph, lookup)
    }
}

impl ConnectivityCheck for GraphTrace {
    fn is_connected(&self, snapshot: &Snapshot) -> bool {
        if snapshot.wires.is_empty() || snapshot.components.is_empty() {
            return false;
        }

        let (graph, lookup) = Self::build_graph(snapshot);
        let mut groups = UnionFind::new(graph.node_count());
        for edge in graph.raw_edges() {
            groups.union(edge.source().index(), edge.target().index());
        }

        let root = groups.find(lookup[&snapshot.components[0].at].index());
        let all_together = snapshot
            .components
            .iter()
            .all(|c| groups.find(lookup[&c.at].index()) == root);
        let wired = graph
            .node_indices()
            .any(|n| graph[n].has_wire && groups.find(n.index()) == root);

        tracing::debug!(
            "Trace: {} cells, {} links, components together: {}, wired: {}",
            graph.node_count(),
            graph.edge_count(),
            all_together,
            wired
        );
        all_together && wired
    }
}

pub fn for_mode(mode: ConnectivityMode) -> Box<dyn ConnectivityCheck> {
    match mode {
        ConnectivityMode::AnyWire => Box::new(AnyWire),
        ConnectivityMode::Trace => Box::new(GraphTrace),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Component, Wire};

    fn hwire(x: usize, y: usize) -> Wire {
        Wire {
            at: Coord::new(x, y),
            orientation: Orientation::Horizontal,
        }
    }

    fn vwire(x: usize, y: usize) -> Wire {
        Wire {
            at: Coord::new(x, y),
            orientation: Orientation::Vertical,
        }
    }

    #[test]
    fn test_any_wire_ignores_geometry() {
        let snapshot = Snapshot::new(
            10,
            vec![hwire(9, 9)],
            vec![
                Component::battery(Coord::new(0, 0), 9.0),
                Component::resistor(Coord::new(5, 0), 10.0),
            ],
        );
        assert!(AnyWire.is_connected(&snapshot));
        assert!(!AnyWire.is_connected(&Snapshot::new(10, vec![], snapshot.components.clone())));
    }

    #[test]
    fn test_trace_follows_horizontal_run() {
        let snapshot = Snapshot::new(
            10,
            vec![hwire(1, 2), hwire(2, 2), hwire(3, 2)],
            vec![
                Component::battery(Coord::new(0, 2), 9.0),
                Component::resistor(Coord::new(4, 2), 10.0),
            ],
        );
        assert!(GraphTrace.is_connected(&snapshot));
    }

    #[test]
    fn test_trace_detects_gap() {
        let snapshot = Snapshot::new(
            10,
            vec![hwire(1, 2), hwire(3, 2)],
            vec![
                Component::battery(Coord::new(0, 2), 9.0),
                Component::resistor(Coord::new(4, 2), 10.0),
            ],
        );
        assert!(!GraphTrace.is_connected(&snapshot));
        assert!(AnyWire.is_connected(&snapshot));
    }

    #[test]
    fn test_horizontal_wire_does_not_link_vertically() {
        let stacked = Snapshot::new(
            10,
            vec![hwire(0, 1)],
            vec![
                Component::battery(Coord::new(0, 0), 9.0),
                Component::resistor(Coord::new(0, 2), 10.0),
            ],
        );
        assert!(!GraphTrace.is_connected(&stacked));

        let vertical = Snapshot::new(10, vec![vwire(0, 1)], stacked.components.clone());
        assert!(GraphTrace.is_connected(&vertical));
    }

    #[test]
    fn test_adjacent_components_need_a_wire() {
        let components = vec![
            Component::battery(Coord::new(3, 3), 9.0),
            Component::resistor(Coord::new(4, 3), 10.0),
        ];
        let unwired = Snapshot::new(10, vec![hwire(8, 8)], components.clone());
        assert!(!GraphTrace.is_connected(&unwired));

        let wired = Snapshot::new(10, vec![hwire(5, 3)], components);
        assert!(GraphTrace.is_connected(&wired));
    }

    #[test]
    fn test_cells_at_coordinate_limit_do_not_overflow() {
        let snapshot = Snapshot::new(
            10,
            vec![hwire(usize::MAX - 1, usize::MAX)],
            vec![
                Component::battery(Coord::new(usize::MAX, usize::MAX), 9.0),
                Component::resistor(Coord::new(usize::MAX - 2, usize::MAX), 10.0),
            ],
        );
        assert!(GraphTrace.is_connected(&snapshot));
    }

    #[test]
    fn test_wire_under_component_counts() {
        let snapshot = Snapshot::new(
            10,
            vec![hwire(3, 3)],
            vec![
                Component::battery(Coord::new(3, 3), 9.0),
                Component::resistor(Coord::new(3, 4), 10.0),
            ],
        );
        assert!(GraphTrace.is_connected(&snapshot));
    }
}
