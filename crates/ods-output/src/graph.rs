//! Route diagram as a Graphviz digraph.
//!
//! The depot is a large double circle; trip stops are coloured by direction.
//! Trips on the route are chained in visiting order and back to the depot;
//! rejected trips are drawn dashed and unconnected.  Nodes are pinned to
//! their region coordinates (`pos="x,y!"`), so render with `neato -n`.

use std::fmt;

use ods_core::{Direction, Point, ReservationStatus};
use ods_sim::{RunRecord, ScenarioRun};

pub const DEPOT_COLOR: &str = "#8DB1E2";
pub const INBOUND_COLOR: &str = "#C4D6A0";
pub const OUTBOUND_COLOR: &str = "#FFC000";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopKind {
    Depot,
    Inbound,
    Outbound,
}

impl StopKind {
    pub fn color(self) -> &'static str {
        match self {
            StopKind::Depot => DEPOT_COLOR,
            StopKind::Inbound => INBOUND_COLOR,
            StopKind::Outbound => OUTBOUND_COLOR,
        }
    }
}

impl From<Direction> for StopKind {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Inbound => StopKind::Inbound,
            Direction::Outbound => StopKind::Outbound,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    /// Graphviz node id.
    pub key:      String,
    pub label:    String,
    pub position: Point,
    pub kind:     StopKind,
    /// `false` for rejected trips.
    pub routed:   bool,
}

/// Nodes plus directed edges (indices into `nodes`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<(usize, usize)>,
}

impl RouteGraph {
    /// Diagram of a solved run; `None` if the run has no route.
    pub fn from_run(run: &ScenarioRun) -> Option<Self> {
        let summary = run.record().and_then(RunRecord::summary)?;
        let trips = run.trips();

        let mut graph = RouteGraph::default();
        graph.nodes.push(GraphNode {
            key:      "depot".into(),
            label:    format!("depot {}", run.region().fixed_stop().0),
            position: run.region().fixed_stop_position(),
            kind:     StopKind::Depot,
            routed:   true,
        });

        for id in summary.route.iter().filter_map(|s| s.trip) {
            let trip = &trips[id.position()];
            let prev = graph.nodes.len() - 1;
            graph.nodes.push(trip_node(trip.id.0, trip.location, trip.direction, true));
            graph.edges.push((prev, graph.nodes.len() - 1));
        }
        if graph.nodes.len() > 1 {
            graph.edges.push((graph.nodes.len() - 1, 0));
        }

        for trip in trips.iter().filter(|t| t.status() == ReservationStatus::Rejected) {
            graph.nodes.push(trip_node(trip.id.0, trip.location, trip.direction, false));
        }
        Some(graph)
    }

    /// Render as DOT source.
    pub fn to_dot(&self) -> String {
        self.to_string()
    }
}

fn trip_node(id: u32, position: Point, direction: Direction, routed: bool) -> GraphNode {
    GraphNode {
        key: format!("trip_{id}"),
        label: id.to_string(),
        position,
        kind: direction.into(),
        routed,
    }
}

impl fmt::Display for RouteGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph route {{")?;
        writeln!(f, "    node [shape=circle, style=filled, fontcolor=black, width=0.5];")?;
        writeln!(f, "    edge [color=gray, arrowhead=normal];")?;
        for node in &self.nodes {
            let (shape, width) = match node.kind {
                StopKind::Depot => ("doublecircle", 1.2),
                StopKind::Inbound | StopKind::Outbound => ("circle", 0.5),
            };
            let style = if node.routed { "filled" } else { "filled,dashed" };
            writeln!(
                f,
                "    {} [label=\"{}\", pos=\"{},{}!\", shape={shape}, width={width}, style=\"{style}\", fillcolor=\"{}\"];",
                node.key,
                node.label,
                node.position.x,
                node.position.y,
                node.kind.color(),
            )?;
        }
        for &(from, to) in &self.edges {
            writeln!(f, "    {} -> {};", self.nodes[from].key, self.nodes[to].key)?;
        }
        writeln!(f, "}}")
    }
}
