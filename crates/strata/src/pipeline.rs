//! Stage driver: build, then rank, order and position, strictly in that sequence.

use crate::error::{Error, Result};
use crate::model::{EdgeLabel, InputGraph, LayoutGraph, NodeLabel, Point};
use crate::normalize::{self, VirtualChain};
use crate::options::LayoutOptions;
use crate::order::{self, Layering, OrderOutcome};
use crate::position;
use crate::rank::{self, SimplexOutcome};
use crate::result::{EdgeLayout, LayoutResult, NodeLayout};
use crate::text_metrics::TextMetrics;
use crate::util::IdGenerator;
use indexmap::IndexMap;
use std::fmt;
use strata_graph::{EdgeIx, NodeIx, alg};
use tracing::{debug, debug_span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Built,
    Ranked,
    Ordered,
    Positioned,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Built => "built",
            Stage::Ranked => "ranked",
            Stage::Ordered => "ordered",
            Stage::Positioned => "positioned",
        })
    }
}

#[derive(Debug, Clone)]
struct InputEdge {
    edge: EdgeIx,
    source: NodeIx,
    target: NodeIx,
    label: Option<String>,
}

/// One layout run over a private copy of the input graph.
pub struct LayoutPipeline<'m> {
    graph: LayoutGraph,
    options: LayoutOptions,
    metrics: &'m dyn TextMetrics,
    ids: IdGenerator,
    stage: Stage,
    nodes: Vec<NodeIx>,
    edges: Vec<InputEdge>,
    chains: Vec<VirtualChain>,
    rank_outcome: Option<SimplexOutcome>,
    order_outcome: Option<OrderOutcome>,
    position_outcome: Option<SimplexOutcome>,
}

impl<'m> LayoutPipeline<'m> {
    /// Validates `input` and copies it into a layout graph.
    ///
    /// The input must be non-empty, acyclic and weakly connected, and every edge needs
    /// `min_length >= 1`.
    pub fn new(
        input: &InputGraph,
        options: &LayoutOptions,
        metrics: &'m dyn TextMetrics,
    ) -> Result<Self> {
        options.validate()?;
        if input.is_empty() {
            return Err(Error::InvalidArgument(
                "cannot lay out a graph without nodes".to_string(),
            ));
        }
        let name = |v: NodeIx| input.node_name(v).unwrap_or_default().to_string();
        for (e, spec) in input.edges() {
            if spec.min_length == 0 {
                let (s, t) = input.endpoints(e).unwrap_or((NodeIx::new(0), NodeIx::new(0)));
                return Err(Error::InvalidArgument(format!(
                    "edge {} -> {} has min_length 0; it must be at least 1",
                    name(s),
                    name(t)
                )));
            }
        }
        if let Some(cycle) = alg::find_cycle(input) {
            return Err(Error::Cyclic {
                cycle: cycle.into_iter().map(name).collect(),
            });
        }
        let components = alg::components(input).len();
        if components > 1 {
            return Err(Error::Disconnected { components });
        }

        let mut graph = LayoutGraph::new();
        let mut mirror: Vec<Option<NodeIx>> = vec![None; input.node_bound()];
        let mut nodes = Vec::with_capacity(input.node_count());
        for (v, spec) in input.nodes() {
            let label = NodeLabel::sized(
                spec.width.unwrap_or(options.default_node_width),
                spec.height.unwrap_or(options.default_node_height),
            );
            let ix = graph.add_node(name(v), label);
            mirror[v.index()] = Some(ix);
            nodes.push(ix);
        }

        let mut edges = Vec::with_capacity(input.edge_count());
        for (e, spec) in input.edges() {
            let Some((s, t)) = input.endpoints(e) else {
                continue;
            };
            let (Some(source), Some(target)) = (mirror[s.index()], mirror[t.index()]) else {
                continue;
            };
            let label = EdgeLabel {
                weight: spec.weight,
                min_length: spec.min_length,
                is_virtual: false,
                label: spec.label.clone(),
            };
            let Some(edge) = graph.add_edge(source, target, label) else {
                continue;
            };
            edges.push(InputEdge {
                edge,
                source,
                target,
                label: spec.label.clone(),
            });
        }

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built layout graph"
        );
        Ok(Self {
            graph,
            options: options.clone(),
            metrics,
            ids: IdGenerator::new(),
            stage: Stage::Built,
            nodes,
            edges,
            chains: Vec::new(),
            rank_outcome: None,
            order_outcome: None,
            position_outcome: None,
        })
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn graph(&self) -> &LayoutGraph {
        &self.graph
    }

    /// Current layering; empty until the order stage has run.
    pub fn layering(&self) -> &[Vec<NodeIx>] {
        self.order_outcome
            .as_ref()
            .map_or(&[][..], |o| o.layering.as_slice())
    }

    pub fn chains(&self) -> &[VirtualChain] {
        &self.chains
    }

    pub fn order_outcome(&self) -> Option<&OrderOutcome> {
        self.order_outcome.as_ref()
    }

    pub fn node(&self, name: &str) -> Option<&NodeLabel> {
        self.graph.node_ix(name).and_then(|v| self.graph.node(v))
    }

    fn enter(&mut self, expected: Stage, requested: Stage) -> Result<()> {
        if self.stage != expected {
            return Err(Error::Stage {
                requested,
                current: self.stage,
            });
        }
        Ok(())
    }

    pub fn rank(&mut self) -> Result<SimplexOutcome> {
        self.enter(Stage::Built, Stage::Ranked)?;
        let _span = debug_span!("rank", nodes = self.graph.node_count()).entered();
        let outcome = rank::rank(&mut self.graph, &self.options.rank_simplex())?;
        self.rank_outcome = Some(outcome);
        self.stage = Stage::Ranked;
        Ok(outcome)
    }

    pub fn order(&mut self) -> Result<&OrderOutcome> {
        self.enter(Stage::Ranked, Stage::Ordered)?;
        let _span = debug_span!("order").entered();
        self.chains = normalize::run(
            &mut self.graph,
            &mut self.ids,
            self.metrics,
            &self.options,
        );
        let outcome = order::order(&mut self.graph, self.options.order_iterations);
        self.stage = Stage::Ordered;
        let outcome = self.order_outcome.insert(outcome);
        Ok(&*outcome)
    }

    pub fn position(&mut self) -> Result<SimplexOutcome> {
        self.enter(Stage::Ordered, Stage::Positioned)?;
        let _span = debug_span!("position").entered();
        let layering: Layering = self.layering().to_vec();
        let outcome = position::position(&mut self.graph, &layering, &self.options, &mut self.ids)?;
        self.position_outcome = Some(outcome);
        self.stage = Stage::Positioned;
        Ok(outcome)
    }

    /// Runs whatever stages are left and assembles the result.
    pub fn finish(mut self) -> Result<LayoutResult> {
        if self.stage == Stage::Built {
            self.rank()?;
        }
        if self.stage == Stage::Ranked {
            self.order()?;
        }
        if self.stage == Stage::Ordered {
            self.position()?;
        }
        Ok(self.result())
    }

    fn center(&self, v: NodeIx) -> Point {
        self.graph
            .node(v)
            .map_or_else(Point::default, |n| Point { x: n.x, y: n.y })
    }

    fn result(&self) -> LayoutResult {
        let g = &self.graph;
        let name = |v: NodeIx| g.node_name(v).unwrap_or_default().to_string();

        let mut nodes = IndexMap::with_capacity(self.nodes.len());
        for &v in &self.nodes {
            let Some(n) = g.node(v) else {
                continue;
            };
            nodes.insert(
                name(v),
                NodeLayout {
                    rank: n.rank,
                    order: n.order,
                    x: n.x,
                    y: n.y,
                    width: n.width(),
                    height: n.height,
                },
            );
        }

        let edges = self
            .edges
            .iter()
            .map(|input| {
                let chain = self.chains.iter().find(|c| c.edge == input.edge);
                let mut points = vec![self.center(input.source)];
                if let Some(chain) = chain {
                    points.extend(chain.nodes.iter().map(|&v| self.center(v)));
                }
                points.push(self.center(input.target));

                let label_position = input.label.as_ref().map(|_| {
                    match chain.and_then(|c| c.label_node) {
                        Some(v) => self.center(v),
                        None => {
                            let (a, b) = (self.center(input.source), self.center(input.target));
                            Point {
                                x: (a.x + b.x) / 2.0,
                                y: (a.y + b.y) / 2.0,
                            }
                        }
                    }
                });
                EdgeLayout {
                    source: name(input.source),
                    target: name(input.target),
                    label: input.label.clone(),
                    points,
                    label_position,
                }
            })
            .collect();

        let (mut width, mut height) = (0.0f64, 0.0f64);
        for (_, n) in g.nodes() {
            width = width.max(n.x + n.right_width);
            height = height.max(n.y + n.height / 2.0);
        }

        let converged = |o: Option<SimplexOutcome>| o.is_none_or(|o| o.converged);
        LayoutResult {
            nodes,
            edges,
            width,
            height,
            crossings: self.order_outcome.as_ref().map_or(0, |o| o.crossings),
            best_effort: !(converged(self.rank_outcome) && converged(self.position_outcome)),
        }
    }
}
