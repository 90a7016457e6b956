use anyhow::Result;
use tsp_challenges::{DistanceMatrix, Tour};

/// Greedy baseline: start at city 0 and always move to the closest unvisited
/// city reachable over a finite edge, lowest id on ties. When every remaining
/// edge is forbidden the lowest unvisited id is taken, leaving the tour to fail
/// validation.
pub fn solve_challenge(matrix: &DistanceMatrix) -> Result<Option<Tour>> {
    let num_nodes = matrix.num_cities();
    if num_nodes == 0 {
        return Ok(Some(Vec::new()));
    }
    let mut visited = vec![false; num_nodes];
    let mut route = Vec::with_capacity(num_nodes);
    let mut current_node = 0;
    visited[current_node] = true;
    route.push(current_node);
    while route.len() < num_nodes {
        let next_node = (0..num_nodes)
            .filter(|&node| !visited[node] && !matrix.is_forbidden(current_node, node))
            .min_by(|&a, &b| {
                matrix.rows()[current_node][a].total_cmp(&matrix.rows()[current_node][b])
            })
            .or_else(|| (0..num_nodes).find(|&node| !visited[node]));
        match next_node {
            Some(node) => {
                visited[node] = true;
                route.push(node);
                current_node = node;
            }
            None => break,
        }
    }
    Ok(Some(route))
}
