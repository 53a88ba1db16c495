use rustc_hash::FxBuildHasher;
use std::fmt;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Stable node id. Ids are never reused after a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIx(usize);

impl NodeIx {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Stable edge id. Ids are never reused after a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeIx(usize);

impl EdgeIx {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for EdgeIx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct NodeEntry<N> {
    name: String,
    label: N,
    out_edges: Vec<EdgeIx>,
    in_edges: Vec<EdgeIx>,
}

#[derive(Debug, Clone)]
struct EdgeEntry<E> {
    source: NodeIx,
    target: NodeIx,
    label: E,
}

/// A directed multigraph with named nodes.
///
/// Removed nodes and edges leave an empty slot behind, so ids handed out earlier stay valid for
/// everything that was not removed. `node_bound`/`edge_bound` give the slot counts for callers that
/// keep dense side tables indexed by id.
#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<Option<NodeEntry<N>>>,
    edges: Vec<Option<EdgeEntry<E>>>,
    node_index: HashMap<String, NodeIx>,
    node_count: usize,
    edge_count: usize,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            node_index: HashMap::default(),
            node_count: 0,
            edge_count: 0,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    pub fn node_bound(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    fn entry(&self, v: NodeIx) -> Option<&NodeEntry<N>> {
        self.nodes.get(v.0).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, v: NodeIx) -> Option<&mut NodeEntry<N>> {
        self.nodes.get_mut(v.0).and_then(Option::as_mut)
    }

    fn edge_entry(&self, e: EdgeIx) -> Option<&EdgeEntry<E>> {
        self.edges.get(e.0).and_then(Option::as_ref)
    }

    /// Inserts a node, or replaces the label of the node already registered under `name`.
    pub fn add_node(&mut self, name: impl Into<String>, label: N) -> NodeIx {
        let name = name.into();
        if let Some(&ix) = self.node_index.get(&name) {
            if let Some(entry) = self.entry_mut(ix) {
                entry.label = label;
            }
            return ix;
        }
        let ix = NodeIx(self.nodes.len());
        self.node_index.insert(name.clone(), ix);
        self.nodes.push(Some(NodeEntry {
            name,
            label,
            out_edges: Vec::new(),
            in_edges: Vec::new(),
        }));
        self.node_count += 1;
        ix
    }

    pub fn ensure_node(&mut self, name: &str) -> NodeIx
    where
        N: Default,
    {
        match self.node_ix(name) {
            Some(ix) => ix,
            None => self.add_node(name, N::default()),
        }
    }

    /// Removes a node together with every edge incident to it.
    pub fn remove_node(&mut self, v: NodeIx) -> Option<N> {
        let entry = self.nodes.get_mut(v.0)?.take()?;
        self.node_index.remove(&entry.name);
        self.node_count -= 1;
        for &e in entry.out_edges.iter().chain(entry.in_edges.iter()) {
            self.remove_edge(e);
        }
        Some(entry.label)
    }

    pub fn node_ix(&self, name: &str) -> Option<NodeIx> {
        self.node_index.get(name).copied()
    }

    pub fn contains_node(&self, v: NodeIx) -> bool {
        self.entry(v).is_some()
    }

    pub fn node(&self, v: NodeIx) -> Option<&N> {
        self.entry(v).map(|n| &n.label)
    }

    pub fn node_mut(&mut self, v: NodeIx) -> Option<&mut N> {
        self.entry_mut(v).map(|n| &mut n.label)
    }

    pub fn node_name(&self, v: NodeIx) -> Option<&str> {
        self.entry(v).map(|n| n.name.as_str())
    }

    /// Live node ids in ascending order.
    pub fn node_ixs(&self) -> impl Iterator<Item = NodeIx> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| NodeIx(i))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIx, &N)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeIx(i), &n.label)))
    }

    /// Adds an edge between two existing nodes. Returns `None` when an endpoint is missing.
    pub fn add_edge(&mut self, source: NodeIx, target: NodeIx, label: E) -> Option<EdgeIx> {
        if !self.contains_node(source) || !self.contains_node(target) {
            return None;
        }
        let ix = EdgeIx(self.edges.len());
        self.edges.push(Some(EdgeEntry {
            source,
            target,
            label,
        }));
        if let Some(entry) = self.entry_mut(source) {
            entry.out_edges.push(ix);
        }
        if let Some(entry) = self.entry_mut(target) {
            entry.in_edges.push(ix);
        }
        self.edge_count += 1;
        Some(ix)
    }

    /// Adds an edge by node names, creating missing endpoints with a default label.
    pub fn add_named_edge(&mut self, source: &str, target: &str, label: E) -> EdgeIx
    where
        N: Default,
    {
        let s = self.ensure_node(source);
        let t = self.ensure_node(target);
        let ix = EdgeIx(self.edges.len());
        self.edges.push(Some(EdgeEntry {
            source: s,
            target: t,
            label,
        }));
        if let Some(entry) = self.entry_mut(s) {
            entry.out_edges.push(ix);
        }
        if let Some(entry) = self.entry_mut(t) {
            entry.in_edges.push(ix);
        }
        self.edge_count += 1;
        ix
    }

    /// Chains `names` with default-labelled edges, creating nodes as needed.
    pub fn set_path(&mut self, names: &[&str])
    where
        N: Default,
        E: Default,
    {
        for pair in names.windows(2) {
            self.add_named_edge(pair[0], pair[1], E::default());
        }
    }

    pub fn remove_edge(&mut self, e: EdgeIx) -> Option<E> {
        let entry = self.edges.get_mut(e.0)?.take()?;
        if let Some(source) = self.entry_mut(entry.source) {
            source.out_edges.retain(|&x| x != e);
        }
        if let Some(target) = self.entry_mut(entry.target) {
            target.in_edges.retain(|&x| x != e);
        }
        self.edge_count -= 1;
        Some(entry.label)
    }

    pub fn contains_edge(&self, e: EdgeIx) -> bool {
        self.edge_entry(e).is_some()
    }

    pub fn edge(&self, e: EdgeIx) -> Option<&E> {
        self.edge_entry(e).map(|x| &x.label)
    }

    pub fn edge_mut(&mut self, e: EdgeIx) -> Option<&mut E> {
        self.edges
            .get_mut(e.0)
            .and_then(Option::as_mut)
            .map(|x| &mut x.label)
    }

    pub fn endpoints(&self, e: EdgeIx) -> Option<(NodeIx, NodeIx)> {
        self.edge_entry(e).map(|x| (x.source, x.target))
    }

    pub fn source(&self, e: EdgeIx) -> Option<NodeIx> {
        self.edge_entry(e).map(|x| x.source)
    }

    pub fn target(&self, e: EdgeIx) -> Option<NodeIx> {
        self.edge_entry(e).map(|x| x.target)
    }

    /// The endpoint of `e` that is not `v`.
    pub fn opposite(&self, e: EdgeIx, v: NodeIx) -> Option<NodeIx> {
        let x = self.edge_entry(e)?;
        if x.source == v {
            Some(x.target)
        } else if x.target == v {
            Some(x.source)
        } else {
            None
        }
    }

    /// Live edge ids in ascending order.
    pub fn edge_ixs(&self) -> impl Iterator<Item = EdgeIx> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EdgeIx(i))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIx, &E)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EdgeIx(i), &e.label)))
    }

    /// Outgoing edges of `v` in insertion order.
    pub fn out_edges(&self, v: NodeIx) -> &[EdgeIx] {
        self.entry(v).map_or(&[][..], |n| n.out_edges.as_slice())
    }

    /// Incoming edges of `v` in insertion order.
    pub fn in_edges(&self, v: NodeIx) -> &[EdgeIx] {
        self.entry(v).map_or(&[][..], |n| n.in_edges.as_slice())
    }

    pub fn out_degree(&self, v: NodeIx) -> usize {
        self.out_edges(v).len()
    }

    pub fn in_degree(&self, v: NodeIx) -> usize {
        self.in_edges(v).len()
    }

    /// Targets of the outgoing edges of `v`; repeated once per parallel edge.
    pub fn successors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        self.out_edges(v).iter().filter_map(|&e| self.target(e))
    }

    /// Sources of the incoming edges of `v`; repeated once per parallel edge.
    pub fn predecessors(&self, v: NodeIx) -> impl Iterator<Item = NodeIx> + '_ {
        self.in_edges(v).iter().filter_map(|&e| self.source(e))
    }
}
