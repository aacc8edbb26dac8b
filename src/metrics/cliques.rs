/*!
# Maximal Clique Enumeration

The teacher's `approximation::clique` only approximates a single large clique
greedily; `spec.md` §4.6 calls for exact enumeration of every maximal clique,
so this is new code, kept in the teacher's `HashSet<NodeId>`-neighbor-cache
idiom (see `approximation::clique::max_clique`'s `neighbor_cache`) rather than
borrowed wholesale.
*/

use std::collections::HashSet;
use std::hash::Hash;

use crate::core::graph::Graph;
use crate::core::progress::Progress;

/// Enumerates every maximal clique via Bron–Kerbosch with pivoting, filtered
/// to cliques of at least `min_size` nodes. Each clique is a sorted `Vec` of
/// dense node indices (`spec.md` §4.6).
pub fn maximal_cliques<Id>(
    graph: &Graph<Id>,
    min_size: usize,
    progress: &Progress<'_>,
) -> Vec<Vec<usize>>
where
    Id: Eq + Hash + Clone,
{
    let n = graph.node_count();
    let neighbor_cache: Vec<HashSet<usize>> = graph
        .node_indices()
        .map(|i| graph.neighbors(i).iter().map(|&(j, _)| j).collect())
        .collect();

    let mut cliques = Vec::new();
    let all: HashSet<usize> = (0..n).collect();

    bron_kerbosch(
        &neighbor_cache,
        HashSet::new(),
        all,
        HashSet::new(),
        &mut cliques,
        min_size,
    );

    cliques.iter_mut().for_each(|clique| clique.sort_unstable());
    cliques.sort();

    progress.report(1.0);

    cliques
}

fn bron_kerbosch(
    neighbor_cache: &[HashSet<usize>],
    r: HashSet<usize>,
    mut p: HashSet<usize>,
    mut x: HashSet<usize>,
    out: &mut Vec<Vec<usize>>,
    min_size: usize,
) {
    if p.is_empty() && x.is_empty() {
        if r.len() >= min_size {
            out.push(r.into_iter().collect());
        }
        return;
    }

    // Pivot on the candidate in P ∪ X with the most neighbors in P, to
    // minimize the branching factor.
    let pivot = p
        .iter()
        .chain(x.iter())
        .max_by_key(|&&u| neighbor_cache[u].intersection(&p).count())
        .copied();
    let candidates: Vec<usize> = match pivot {
        Some(pivot) => p.difference(&neighbor_cache[pivot]).copied().collect(),
        None => p.iter().copied().collect(),
    };

    for v in candidates {
        let neighbors_v = &neighbor_cache[v];
        let mut r_next = r.clone();
        r_next.insert(v);
        let p_next: HashSet<usize> = p.intersection(neighbors_v).copied().collect();
        let x_next: HashSet<usize> = x.intersection(neighbors_v).copied().collect();

        bron_kerbosch(neighbor_cache, r_next, p_next, x_next, out, min_size);

        p.remove(&v);
        x.insert(v);
    }
}
