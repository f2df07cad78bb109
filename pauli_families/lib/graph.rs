//! Commutation graphs over a collection of Pauli strings.
//!
//! Nodes are the (deduplicated) strings, indexed in order of first
//! appearance, and an edge joins every pair that commutes under a chosen
//! [`Commutation`] rule. Each edge carries an [`EdgeTag`] recording whether
//! the pair also qubit-wise commutes, which is what distinguishes the two
//! kinds of edges in a general-commutation graph.

use std::{
    fs,
    io::{ self, Write },
    path::Path,
};
use itertools::Itertools;
use ndarray as nd;
use rustc_hash::FxHashMap;
use crate::pauli::{ Commutation, PauliString };

/// Classification of a single edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EdgeTag {
    /// The pair qubit-wise commutes (and hence also generally commutes).
    AlsoQwc,
    /// The pair generally commutes, but not qubit-wise.
    GcOnly,
}

impl EdgeTag {
    /// Return `true` if `self` is `AlsoQwc`.
    pub fn is_qwc(self) -> bool { matches!(self, Self::AlsoQwc) }

    // blue for qubit-wise, red otherwise
    fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::AlsoQwc => (40, 80, 220),
            Self::GcOnly => (215, 40, 40),
        }
    }
}

/// A single undirected edge, stored with `a < b`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub tag: EdgeTag,
}

/// An undirected simple graph whose nodes are Pauli strings and whose edges
/// connect commuting pairs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommutationGraph {
    rule: Commutation,
    nodes: Vec<PauliString>,
    index: FxHashMap<PauliString, usize>,
    // symmetric; `None` on the diagonal
    adj: nd::Array2<Option<EdgeTag>>,
    // insertion order
    edges: Vec<Edge>,
}

impl CommutationGraph {
    fn with_nodes<'a, I>(rule: Commutation, strings: I) -> Self
    where I: IntoIterator<Item = &'a PauliString>
    {
        let mut nodes: Vec<PauliString> = Vec::new();
        let mut index: FxHashMap<PauliString, usize> = FxHashMap::default();
        for ps in strings.into_iter() {
            if index.contains_key(ps) {
                tracing::debug!(
                    string = %ps,
                    "duplicate Pauli string merged into a single node",
                );
                continue;
            }
            index.insert(ps.clone(), nodes.len());
            nodes.push(ps.clone());
        }
        let n = nodes.len();
        Self {
            rule,
            nodes,
            index,
            adj: nd::Array2::from_elem((n, n), None),
            edges: Vec::new(),
        }
    }

    fn connect_pairs<F>(mut self, mut tag_of: F) -> Self
    where F: FnMut(&PauliString, &PauliString) -> Option<EdgeTag>
    {
        // each unordered pair exactly once, never a node with itself
        for (a, b) in (0..self.nodes.len()).tuple_combinations() {
            if let Some(tag) = tag_of(&self.nodes[a], &self.nodes[b]) {
                self.adj[[a, b]] = Some(tag);
                self.adj[[b, a]] = Some(tag);
                self.edges.push(Edge { a, b, tag });
            }
        }
        self
    }

    /// Build the qubit-wise commutation graph.
    pub fn build_qwc<'a, I>(strings: I) -> Self
    where I: IntoIterator<Item = &'a PauliString>
    {
        Self::with_nodes(Commutation::Qwc, strings)
            .connect_pairs(|a, b| {
                a.qwc_commutes(b).then_some(EdgeTag::AlsoQwc)
            })
    }

    /// Build the general commutation graph.
    ///
    /// With `exclude_qwc`, pairs that also qubit-wise commute are left
    /// unconnected, so that every edge is tagged [`EdgeTag::GcOnly`].
    pub fn build_gc<'a, I>(strings: I, exclude_qwc: bool) -> Self
    where I: IntoIterator<Item = &'a PauliString>
    {
        Self::with_nodes(Commutation::Gc, strings)
            .connect_pairs(|a, b| {
                a.gc_commutes(b, exclude_qwc)
                    .then(|| {
                        if a.qwc_commutes(b) {
                            EdgeTag::AlsoQwc
                        } else {
                            EdgeTag::GcOnly
                        }
                    })
            })
    }

    /// Build the graph for `rule`, including all qubit-wise commuting pairs
    /// in the general case.
    pub fn build<'a, I>(strings: I, rule: Commutation) -> Self
    where I: IntoIterator<Item = &'a PauliString>
    {
        match rule {
            Commutation::Qwc => Self::build_qwc(strings),
            Commutation::Gc => Self::build_gc(strings, false),
        }
    }

    /// Return the rule used to build `self`.
    pub fn rule(&self) -> Commutation { self.rule }

    pub fn num_nodes(&self) -> usize { self.nodes.len() }

    pub fn num_edges(&self) -> usize { self.edges.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// Return all nodes, ordered by index.
    pub fn nodes(&self) -> &[PauliString] { &self.nodes }

    /// Return the string labeling a node.
    pub fn node(&self, node: usize) -> Option<&PauliString> {
        self.nodes.get(node)
    }

    /// Return the index of the node labeled by `ps`.
    pub fn index_of(&self, ps: &PauliString) -> Option<usize> {
        self.index.get(ps).copied()
    }

    /// Return the tag of the edge between `a` and `b`, if there is one.
    ///
    /// Out-of-bounds indices give `None`.
    pub fn edge_tag(&self, a: usize, b: usize) -> Option<EdgeTag> {
        self.adj.get([a, b]).copied().flatten()
    }

    /// Return `true` if `a` and `b` share an edge.
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edge_tag(a, b).is_some()
    }

    /// Like [`has_edge`][Self::has_edge], but looking nodes up by label.
    pub fn has_edge_between(&self, a: &PauliString, b: &PauliString) -> bool {
        self.index_of(a).zip(self.index_of(b))
            .is_some_and(|(i, j)| self.has_edge(i, j))
    }

    /// Return all edges in the order they were added.
    pub fn edges(&self) -> &[Edge] { &self.edges }

    /// Return the edge tags, positionally aligned with
    /// [`edges`][Self::edges].
    pub fn edge_tags(&self) -> Vec<EdgeTag> {
        self.edges.iter().map(|e| e.tag).collect()
    }

    /// Return an iterator over the indices of all nodes who share an edge
    /// with `node`.
    ///
    /// The iterator is empty if the node doesn't exist.
    pub fn neighbors_of(&self, node: usize)
        -> impl Iterator<Item = usize> + '_
    {
        let row
            = (node < self.nodes.len())
            .then(|| self.adj.row(node));
        row.into_iter()
            .flat_map(|row| {
                row.into_iter()
                    .enumerate()
                    .filter_map(|(k, tag)| tag.is_some().then_some(k))
            })
    }

    /// Return the number of neighbors of `node`.
    pub fn degree(&self, node: usize) -> usize {
        self.neighbors_of(node).count()
    }

    /// Return an object containing an encoding of `self` in the [dot
    /// language][dot-lang], with edges colored by their tags.
    ///
    /// [dot-lang]: https://en.wikipedia.org/wiki/DOT_(graph_description_language)
    pub fn to_graphviz(&self, name: &str) -> tabbycat::Graph {
        use tabbycat::attributes::{ color, Color };

        let mut statements = dot_header();
        for (k, ps) in self.nodes.iter().enumerate() {
            statements
                = statements.add_node(k.into(), None, Some(dot_node(ps)));
        }
        for edge in self.edges.iter() {
            let (r, g, b) = edge.tag.rgb();
            statements
                = statements.add_edge(
                    tabbycat::Edge::head_node(edge.a.into(), None)
                        .line_to_node(edge.b.into(), None)
                        .add_attrpair(color(Color::Rgb(r, g, b)))
                );
        }
        dot_graph(name, statements)
    }

    /// Like [`to_graphviz`][Self::to_graphviz], but render directly to a
    /// string and write it to `path`.
    pub fn save_graphviz<P>(&self, name: &str, path: P)
        -> Result<&Self, io::Error>
    where P: AsRef<Path>
    {
        write_dot(&self.to_graphviz(name), path)?;
        Ok(self)
    }
}

const FONT: &str = "DejaVu Sans";
const FONTSIZE: f64 = 10.0; // pt
const NODE_MARGIN: f64 = 0.025; // in
const NODE_HEIGHT: f64 = 0.200; // in
const NODE_COLOR: (u8, u8, u8) = (173, 216, 230);

pub(crate) fn dot_header() -> tabbycat::StmtList {
    use tabbycat::{ AttrList, AttrType, StmtList };
    use tabbycat::attributes::{ fontname, fontsize, margin, rankdir, RankDir };

    StmtList::new()
        .add_attr(
            AttrType::Graph,
            AttrList::new().add_pair(rankdir(RankDir::LR)),
        )
        .add_attr(
            AttrType::Node,
            AttrList::new()
                .add_pair(fontname(FONT))
                .add_pair(fontsize(FONTSIZE))
                .add_pair(margin(NODE_MARGIN))
                ,
        )
}

pub(crate) fn dot_node(ps: &PauliString) -> tabbycat::AttrList {
    use tabbycat::AttrList;
    use tabbycat::attributes::{
        fillcolor, height, label, shape, style, Color, Shape, Style };

    let (r, g, b) = NODE_COLOR;
    AttrList::new()
        .add_pair(label(ps.to_string()))
        .add_pair(shape(Shape::Circle))
        .add_pair(height(NODE_HEIGHT))
        .add_pair(style(Style::Filled))
        .add_pair(fillcolor(Color::Rgb(r, g, b)))
}

pub(crate) fn dot_graph(name: &str, statements: tabbycat::StmtList)
    -> tabbycat::Graph
{
    use tabbycat::{ GraphBuilder, GraphType, Identity };

    GraphBuilder::default()
        .graph_type(GraphType::Graph)
        .strict(false)
        .id(Identity::quoted(name))
        .stmts(statements)
        .build()
        .expect("graph type, strictness, id, and statements are all set")
}

pub(crate) fn write_dot<P>(graph: &tabbycat::Graph, path: P)
    -> Result<(), io::Error>
where P: AsRef<Path>
{
    fs::OpenOptions::new()
        .write(true)
        .append(false)
        .create(true)
        .truncate(true)
        .open(path)?
        .write_all(format!("{}", graph).as_bytes())
}

#[cfg(test)]
mod test {
    use super::*;

    fn strings(s: &[&str]) -> Vec<PauliString> {
        s.iter().map(|k| k.parse().unwrap()).collect()
    }

    fn ps(s: &str) -> PauliString { s.parse().unwrap() }

    #[test]
    fn qwc_graph_literal_set() {
        let input = strings(&["ZZII", "IIZI", "XXYY", "YYXX"]);
        let g = CommutationGraph::build_qwc(&input);
        assert_eq!(g.num_nodes(), 4);
        // ZZII/IIZI agree or hit identities everywhere
        assert!(g.has_edge_between(&ps("ZZII"), &ps("IIZI")));
        // X/Y and Y/X on every qubit: anticommute everywhere
        assert!(!g.has_edge_between(&ps("XXYY"), &ps("YYXX")));
        // Z/X on the first two qubits
        assert!(!g.has_edge_between(&ps("ZZII"), &ps("XXYY")));
        // Z/Y on the third qubit
        assert!(!g.has_edge_between(&ps("IIZI"), &ps("XXYY")));
        assert_eq!(g.num_edges(), 1);
        assert!(g.edge_tags().iter().all(|t| t.is_qwc()));
    }

    #[test]
    fn gc_graph_literal_set() {
        let input = strings(&["ZZII", "IIZI", "XXYY", "YYXX"]);
        let g = CommutationGraph::build_gc(&input, false);
        // four anticommuting qubits
        assert_eq!(g.edge_tag(2, 3), Some(EdgeTag::GcOnly));
        // two anticommuting qubits
        assert_eq!(g.edge_tag(0, 2), Some(EdgeTag::GcOnly));
        // one anticommuting qubit
        assert!(!g.has_edge(1, 2));
        assert_eq!(g.edge_tag(0, 1), Some(EdgeTag::AlsoQwc));

        let strict = CommutationGraph::build_gc(&input, true);
        assert!(!strict.has_edge(0, 1));
        assert!(strict.edges().iter().all(|e| e.tag == EdgeTag::GcOnly));
    }

    #[test]
    fn two_qubit_example() {
        let input = strings(&["XX", "YY", "ZZ", "II"]);
        let qwc = CommutationGraph::build_qwc(&input);
        let gc = CommutationGraph::build_gc(&input, false);
        // only the identity connects under QWC
        assert_eq!(qwc.num_edges(), 3);
        assert_eq!(qwc.degree(3), 3);
        // everything commutes under GC
        assert_eq!(gc.num_edges(), 6);
        assert_eq!(
            gc.edge_tags().iter().filter(|t| **t == EdgeTag::GcOnly).count(),
            3,
        );
    }

    #[test]
    fn gc_edges_contain_qwc_edges() {
        let input = strings(&[
            "ZZ11", "111Z", "11Z1", "1Z11", "Z111", "Z1Z1", "1ZZ1", "Z11Z",
            "1Z1Z", "11ZZ", "XXYY", "YXXY", "XYYX", "YYXX",
        ]);
        let qwc = CommutationGraph::build(&input, Commutation::Qwc);
        let gc = CommutationGraph::build(&input, Commutation::Gc);
        assert_eq!(qwc.rule(), Commutation::Qwc);
        assert_eq!(gc.rule(), Commutation::Gc);
        for e in qwc.edges() {
            assert_eq!(gc.edge_tag(e.a, e.b), Some(EdgeTag::AlsoQwc));
        }
        assert!(gc.num_edges() >= qwc.num_edges());
    }

    #[test]
    fn no_self_loops_and_symmetric() {
        let input = strings(&["XI", "IX", "XX", "ZZ", "YY"]);
        let g = CommutationGraph::build_gc(&input, false);
        for a in 0..g.num_nodes() {
            assert!(!g.has_edge(a, a));
            for b in 0..g.num_nodes() {
                assert_eq!(g.has_edge(a, b), g.has_edge(b, a));
            }
        }
        for e in g.edges() {
            assert!(e.a < e.b);
        }
    }

    #[test]
    fn duplicates_merge() {
        let input = strings(&["XZ", "ZX", "XZ"]);
        let g = CommutationGraph::build_qwc(&input);
        assert_eq!(g.num_nodes(), 2);
        assert_eq!(g.index_of(&ps("ZX")), Some(1));
        assert_eq!(g.node(0), Some(&ps("XZ")));
    }

    #[test]
    fn neighbors_out_of_bounds() {
        let g = CommutationGraph::build_qwc(&strings(&["X", "I"]));
        assert_eq!(g.neighbors_of(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(g.neighbors_of(7).count(), 0);
        assert!(!g.has_edge(0, 7));
    }

    #[test]
    fn graphviz_mentions_labels() {
        let g = CommutationGraph::build_gc(&strings(&["XX", "YY"]), false);
        let dot = format!("{}", g.to_graphviz("gc"));
        assert!(dot.contains("XX"));
        assert!(dot.contains("YY"));
    }

    #[test]
    fn graphviz_written_to_disk() {
        let input = strings(&["XX", "YY", "ZZ", "XI"]);
        let g = CommutationGraph::build_gc(&input, false);
        let families = crate::cover::partition(&g);
        let dir = std::env::temp_dir()
            .join(format!("pauli_families_dot_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let graph_path = dir.join("gc_graph.gv");
        let families_path = dir.join("gc_families.gv");
        g.save_graphviz("gc graph", &graph_path).unwrap();
        families.save_graphviz("gc families", &families_path).unwrap();

        let graph_dot = fs::read_to_string(&graph_path).unwrap();
        let families_dot = fs::read_to_string(&families_path).unwrap();
        fs::remove_dir_all(&dir).unwrap();
        assert!(graph_dot.contains("gc graph"));
        assert!(graph_dot.contains("rankdir"));
        assert!(families_dot.contains("gc families"));
        for ps in input.iter() {
            let label = ps.to_string();
            assert!(graph_dot.contains(&label));
            assert!(families_dot.contains(&label));
        }
    }
}
