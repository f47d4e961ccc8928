use std::collections::HashMap;

use aoc_framework::parsing::parse_input_lines;
use aoc_framework::runner::solution_runner;
use aoc_framework::{DynamicResult, ParseData, PartOne, Solution};
use petgraph::algo::ford_fulkerson;
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use petgraph::visit::{Bfs, EdgeFiltered, EdgeRef};
use thiserror::Error;
use tracing::debug;

#[solution_runner(name = "Day 25: Snowverload", parsed = Wiring, part_one = Day25)]
impl super::Day<25> {}

#[derive(Error, Debug)]
enum WiringError {
    #[error("expected a colon (':') between a component and its connections")]
    MissingColon,

    #[error("no set of three wires splits the components in two")]
    NoThreeWireCut,
}

/*
Each line names a component, `: `, then the components it is wired to. Wires are undirected and may
be listed from either end.
*/

#[derive(Debug)]
struct Wiring {
    graph: UnGraph<String, ()>,
}

impl ParseData for Wiring {
    fn parse(input: &str) -> DynamicResult<Self> {
        let mut graph = UnGraph::default();
        let mut nodes: HashMap<String, NodeIndex> = HashMap::new();

        let wires: Vec<(&str, Vec<&str>)> = parse_input_lines(input, |_, line| {
            let (component, connections) = line.split_once(':').ok_or(WiringError::MissingColon)?;
            Ok((component.trim(), connections.split_whitespace().collect()))
        })
        .collect::<Result<_, _>>()?;

        for (component, connections) in wires {
            let mut node = |name: &str| {
                *nodes
                    .entry(name.to_owned())
                    .or_insert_with(|| graph.add_node(name.to_owned()))
            };
            let from = node(component);
            let targets: Vec<_> = connections.into_iter().map(&mut node).collect();
            for to in targets {
                // a wire listed from both ends is still one wire
                graph.update_edge(from, to, ());
            }
        }
        Ok(Self { graph })
    }
}

/*
For part 1, disconnect three wires to split the components into two groups, and multiply the sizes
of the groups.

Fix one component as the source. Any component in the other group is separated from it by exactly
three wires, so the maximum flow between them is three, while components in the same group are joined
by at least four paths. Once a flow of three is found, the components still reachable from the
source over wires with spare capacity form the source's group.
*/

const CUT_SIZE: u32 = 3;

impl Wiring {
    /// Every wire as two opposite arcs of capacity one, arc `2k + 1` running against arc `2k`.
    fn flow_network(&self) -> DiGraph<(), u32> {
        let mut network =
            DiGraph::with_capacity(self.graph.node_count(), 2 * self.graph.edge_count());
        for _ in self.graph.node_indices() {
            network.add_node(());
        }
        for wire in self.graph.edge_references() {
            network.add_edge(wire.source(), wire.target(), 1);
            network.add_edge(wire.target(), wire.source(), 1);
        }
        network
    }

    fn group_sizes(&self) -> Result<(usize, usize), WiringError> {
        let network = self.flow_network();
        let mut nodes = network.node_indices();
        let source = nodes.next().ok_or(WiringError::NoThreeWireCut)?;
        for sink in nodes {
            let (max_flow, flows) = ford_fulkerson(&network, source, sink);
            if max_flow != CUT_SIZE {
                continue;
            }
            // an arc has spare capacity unless it is full and its twin carries nothing back
            let residual = EdgeFiltered::from_fn(&network, |arc| {
                let index = arc.id().index();
                flows[index] < *arc.weight() || flows[index ^ 1] > 0
            });
            let mut search = Bfs::new(&residual, source);
            let mut group = 0;
            while search.next(&residual).is_some() {
                group += 1;
            }
            debug!(sink = %self.graph[sink], group, "three-wire cut found");
            return Ok((group, self.graph.node_count() - group));
        }
        Err(WiringError::NoThreeWireCut)
    }
}

struct Day25;

impl Solution<PartOne> for Day25 {
    type Input = Wiring;
    type Output = usize;

    fn solve(input: &Wiring) -> DynamicResult<usize> {
        let (first, second) = input.group_sizes()?;
        Ok(first
            .checked_mul(second)
            .ok_or("product of group sizes overflowed")?)
    }
}
