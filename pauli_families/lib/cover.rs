//! Greedy clique covers of a [`CommutationGraph`].
//!
//! Finding a minimum clique cover is NP-hard, so families are extracted one
//! round at a time: enumerate the maximal cliques of whatever is left of the
//! graph, keep one of them as the next family, delete its nodes, and repeat
//! until no nodes remain. The result is a valid partition into mutually
//! commuting families, but not necessarily one with the fewest families.
//!
//! # Example
//! ```
//! use pauli_families::{
//!     cover::partition,
//!     graph::CommutationGraph,
//!     pauli::PauliString,
//! };
//!
//! let strings: Vec<PauliString>
//!     = ["XX", "YY", "ZZ", "II"].iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let qwc = partition(&CommutationGraph::build_qwc(&strings));
//! let gc = partition(&CommutationGraph::build_gc(&strings, false));
//! assert_eq!(qwc.len(), 3);
//! assert_eq!(gc.len(), 1);
//! ```

use std::{ fmt, ops::ControlFlow };
use itertools::Itertools;
use crate::{
    graph::{ self, CommutationGraph },
    pauli::PauliString,
};

/// How to pick the clique kept in each round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Keep the first maximal clique found by enumeration. This is not
    /// necessarily the largest one.
    #[default]
    FirstMaximal,
    /// Keep the largest maximal clique, taking the first one found among
    /// ties.
    Largest,
}

// Bron-Kerbosch with pivoting, restricted to the nodes in `cand` and
// `excl`. Candidates are always visited in ascending index order, so the
// enumeration order is deterministic.
fn bron_kerbosch<F>(
    graph: &CommutationGraph,
    clique: &mut Vec<usize>,
    cand: Vec<usize>,
    mut excl: Vec<usize>,
    visit: &mut F,
) -> ControlFlow<()>
where F: FnMut(&[usize]) -> ControlFlow<()>
{
    if cand.is_empty() {
        if excl.is_empty() { return visit(clique); }
        return ControlFlow::Continue(());
    }
    // ties go to the lowest index
    let Some(pivot)
        = cand.iter().chain(excl.iter())
        .copied()
        .max_by_key(|u| {
            let deg = cand.iter().filter(|v| graph.has_edge(*u, **v)).count();
            (deg, std::cmp::Reverse(*u))
        })
        else { unreachable!() };
    let branches: Vec<usize>
        = cand.iter()
        .copied()
        .filter(|v| !graph.has_edge(pivot, *v))
        .collect();
    let mut cand = cand;
    for v in branches {
        let cand_v: Vec<usize>
            = cand.iter().copied().filter(|u| graph.has_edge(v, *u)).collect();
        let excl_v: Vec<usize>
            = excl.iter().copied().filter(|u| graph.has_edge(v, *u)).collect();
        clique.push(v);
        bron_kerbosch(graph, clique, cand_v, excl_v, visit)?;
        clique.pop();
        cand.retain(|u| *u != v);
        excl.push(v);
    }
    ControlFlow::Continue(())
}

fn for_each_maximal_clique<F>(
    graph: &CommutationGraph,
    active: &[bool],
    mut visit: F,
)
where F: FnMut(&[usize]) -> ControlFlow<()>
{
    let cand: Vec<usize>
        = active.iter().enumerate()
        .filter_map(|(k, a)| a.then_some(k))
        .collect();
    let mut clique: Vec<usize> = Vec::new();
    let _ = bron_kerbosch(graph, &mut clique, cand, Vec::new(), &mut visit);
}

/// Enumerate all maximal cliques of the subgraph induced by the nodes for
/// which `active` is `true`, as lists of ascending node indices.
///
/// Nodes past the end of `active` are treated as inactive. As with any
/// maximal-clique enumeration, the empty subgraph has exactly one maximal
/// clique, the empty one.
///
/// *Worst-case exponential in the number of active nodes.*
pub fn maximal_cliques(graph: &CommutationGraph, active: &[bool])
    -> Vec<Vec<usize>>
{
    let active: Vec<bool>
        = (0..graph.num_nodes())
        .map(|k| active.get(k).copied().unwrap_or(false))
        .collect();
    let mut cliques: Vec<Vec<usize>> = Vec::new();
    for_each_maximal_clique(graph, &active, |clique| {
        cliques.push(clique.iter().copied().sorted().collect());
        ControlFlow::Continue(())
    });
    cliques
}

/// Like [`maximal_cliques`], but over the whole graph.
pub fn all_maximal_cliques(graph: &CommutationGraph) -> Vec<Vec<usize>> {
    maximal_cliques(graph, &vec![true; graph.num_nodes()])
}

fn pick_clique(graph: &CommutationGraph, active: &[bool], strategy: Strategy)
    -> Vec<usize>
{
    let mut picked: Vec<usize> = Vec::new();
    match strategy {
        Strategy::FirstMaximal => {
            for_each_maximal_clique(graph, active, |clique| {
                picked.extend_from_slice(clique);
                ControlFlow::Break(())
            });
        },
        Strategy::Largest => {
            for_each_maximal_clique(graph, active, |clique| {
                if clique.len() > picked.len() {
                    picked.clear();
                    picked.extend_from_slice(clique);
                }
                ControlFlow::Continue(())
            });
        },
    }
    picked.sort_unstable();
    picked
}

/// Partition the nodes of `graph` into cliques using
/// [`Strategy::FirstMaximal`].
///
/// Every node of `graph` ends up in exactly one family and every family is
/// pairwise commuting under the rule the graph was built with. `graph`
/// itself is left untouched.
pub fn partition(graph: &CommutationGraph) -> FamilyPartition {
    partition_with(graph, Strategy::FirstMaximal)
}

/// Partition the nodes of `graph` into cliques, choosing each round's clique
/// according to `strategy`.
pub fn partition_with(graph: &CommutationGraph, strategy: Strategy)
    -> FamilyPartition
{
    let mut active: Vec<bool> = vec![true; graph.num_nodes()];
    let mut remaining: usize = graph.num_nodes();
    let mut families: Vec<Vec<PauliString>> = Vec::new();
    while remaining > 0 {
        let clique = pick_clique(graph, &active, strategy);
        // any non-empty subgraph has a non-empty maximal clique
        debug_assert!(!clique.is_empty());
        for &k in clique.iter() {
            active[k] = false;
        }
        remaining -= clique.len();
        tracing::trace!(
            round = families.len(),
            size = clique.len(),
            remaining,
            "extracted family",
        );
        families.push(
            clique.into_iter()
                .filter_map(|k| graph.node(k).cloned())
                .collect()
        );
    }
    tracing::debug!(
        rule = %graph.rule(),
        ?strategy,
        nodes = graph.num_nodes(),
        families = families.len(),
        "clique cover complete",
    );
    FamilyPartition(families)
}

/// An ordered list of disjoint, mutually commuting families of Pauli strings.
///
/// Families appear in the order they were extracted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FamilyPartition(Vec<Vec<PauliString>>);

impl IntoIterator for FamilyPartition {
    type Item = Vec<PauliString>;
    type IntoIter = <Vec<Vec<PauliString>> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a> IntoIterator for &'a FamilyPartition {
    type Item = &'a Vec<PauliString>;
    type IntoIter = <&'a Vec<Vec<PauliString>> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl fmt::Display for FamilyPartition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.0.len();
        for (k, family) in self.0.iter().enumerate() {
            write!(f, "{}: {}", k, family.iter().join(" "))?;
            if k < n - 1 { writeln!(f)?; }
        }
        Ok(())
    }
}

impl FamilyPartition {
    /// Return the number of families.
    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn families(&self) -> &[Vec<PauliString>] { &self.0 }

    pub fn iter(&self) -> std::slice::Iter<'_, Vec<PauliString>> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Vec<PauliString>> { self.0 }

    /// Return the total number of strings across all families.
    pub fn num_members(&self) -> usize { self.0.iter().map(Vec::len).sum() }

    /// Return `true` if `self` is a clique cover of `graph`: every node
    /// appears in exactly one family, and every family is a clique.
    pub fn is_cover_of(&self, graph: &CommutationGraph) -> bool {
        let mut seen: Vec<bool> = vec![false; graph.num_nodes()];
        for family in self.0.iter() {
            let mut idx: Vec<usize> = Vec::with_capacity(family.len());
            for ps in family.iter() {
                let Some(k) = graph.index_of(ps) else { return false; };
                if seen[k] { return false; }
                seen[k] = true;
                idx.push(k);
            }
            let is_clique
                = idx.iter().tuple_combinations()
                .all(|(a, b)| graph.has_edge(*a, *b));
            if !is_clique { return false; }
        }
        seen.into_iter().all(|s| s)
    }

    /// Return an object containing an encoding of `self` in the [dot
    /// language][dot-lang], with each family drawn as its own cycle.
    ///
    /// [dot-lang]: https://en.wikipedia.org/wiki/DOT_(graph_description_language)
    pub fn to_graphviz(&self, name: &str) -> tabbycat::Graph {
        use tabbycat::Edge;

        let mut statements = graph::dot_header();
        let mut id: usize = 0;
        for family in self.0.iter() {
            let start = id;
            for ps in family.iter() {
                statements
                    = statements.add_node(id.into(), None, Some(graph::dot_node(ps)));
                id += 1;
            }
            let edges: Vec<(usize, usize)>
                = match family.len() {
                    0 | 1 => Vec::new(),
                    2 => vec![(start, start + 1)],
                    m => (start..start + m).circular_tuple_windows().collect(),
                };
            for (a, b) in edges {
                statements
                    = statements.add_edge(
                        Edge::head_node(a.into(), None)
                            .line_to_node(b.into(), None)
                    );
            }
        }
        graph::dot_graph(name, statements)
    }

    /// Like [`to_graphviz`][Self::to_graphviz], but render directly to a
    /// string and write it to `path`.
    pub fn save_graphviz<P>(&self, name: &str, path: P)
        -> Result<&Self, std::io::Error>
    where P: AsRef<std::path::Path>
    {
        graph::write_dot(&self.to_graphviz(name), path)?;
        Ok(self)
    }
}
