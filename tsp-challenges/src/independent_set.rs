/// `adj_list[u]` holds the neighbours of vertex `u`. On the wire this is a
/// json array of arrays, e.g. `[[1], [0, 2], [1]]`.
pub type AdjacencyList = Vec<Vec<usize>>;

/// First ordered pair `(u, v)` of distinct vertices in `vertices` where `v`
/// is listed as a neighbour of `u`. Vertices missing from `adj_list` have no
/// neighbours.
pub fn find_conflict(adj_list: &[Vec<usize>], vertices: &[usize]) -> Option<(usize, usize)> {
    for &u in vertices {
        let neighbours = match adj_list.get(u) {
            Some(neighbours) => neighbours,
            None => continue,
        };
        for &v in vertices {
            if u != v && neighbours.contains(&v) {
                return Some((u, v));
            }
        }
    }
    None
}

pub fn is_independent_set(adj_list: &[Vec<usize>], vertices: &[usize]) -> bool {
    find_conflict(adj_list, vertices).is_none()
}
