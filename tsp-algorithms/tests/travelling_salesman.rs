use tsp_algorithms::*;
use tsp_challenges::*;

const INF: f64 = f64::INFINITY;

fn matrix(rows: Vec<Vec<f64>>) -> DistanceMatrix {
    DistanceMatrix::new(rows).unwrap()
}

#[test]
fn test_registry() {
    for name in ALGORITHMS {
        assert!(get_algorithm(name).is_some(), "{} is not registered", name);
    }
    assert!(get_algorithm("simulated_annealing").is_none());
}

#[test]
fn test_improved_tsp_approximation_is_unimplemented() {
    let solve = get_algorithm("improved_tsp_approximation").unwrap();
    let m = matrix(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
    assert_eq!(solve(&m).unwrap_err().to_string(), "Not implemented");
}

#[test]
fn test_identity() {
    let m = matrix(vec![vec![0.0; 4]; 4]);
    assert_eq!(
        tsp_algorithms::travelling_salesman::identity::solve_challenge(&m).unwrap(),
        Some(vec![0, 1, 2, 3])
    );
}

#[test]
fn test_nearest_neighbour() {
    let m = matrix(vec![
        vec![0.0, 9.0, 1.0, 5.0],
        vec![9.0, 0.0, 2.0, 3.0],
        vec![1.0, 2.0, 0.0, 7.0],
        vec![5.0, 3.0, 7.0, 0.0],
    ]);
    let tour = tsp_algorithms::travelling_salesman::nearest_neighbour::solve_challenge(&m)
        .unwrap()
        .unwrap();
    assert_eq!(tour, vec![0, 2, 1, 3]);
    assert_eq!(verify_tour(&m, &tour), Ok(11.0));
}

#[test]
fn test_nearest_neighbour_ties_take_lowest_id() {
    let m = matrix(vec![
        vec![0.0, 1.0, 1.0],
        vec![1.0, 0.0, 1.0],
        vec![1.0, 1.0, 0.0],
    ]);
    let tour = tsp_algorithms::travelling_salesman::nearest_neighbour::solve_challenge(&m)
        .unwrap()
        .unwrap();
    assert_eq!(tour, vec![0, 1, 2]);
    assert_eq!(verify_tour(&m, &tour), Ok(3.0));
}

#[test]
fn test_nearest_neighbour_avoids_forbidden_edges() {
    let m = matrix(vec![
        vec![0.0, 1.0, INF, 4.0],
        vec![1.0, 0.0, 1.0, INF],
        vec![INF, 1.0, 0.0, 1.0],
        vec![4.0, INF, 1.0, 0.0],
    ]);
    let tour = tsp_algorithms::travelling_salesman::nearest_neighbour::solve_challenge(&m)
        .unwrap()
        .unwrap();
    assert_eq!(tour, vec![0, 1, 2, 3]);
    assert_eq!(validate_tour(&tour, &m), 7.0);
}

#[test]
fn test_nearest_neighbour_dead_end_still_permutation() {
    let m = matrix(vec![
        vec![0.0, 1.0, INF],
        vec![1.0, 0.0, INF],
        vec![INF, INF, 0.0],
    ]);
    let tour = tsp_algorithms::travelling_salesman::nearest_neighbour::solve_challenge(&m)
        .unwrap()
        .unwrap();
    assert_eq!(tour, vec![0, 1, 2]);
    assert!(validate_tour_basic(&m, &tour).is_ok());
    assert_eq!(validate_tour(&tour, &m), INVALID_TOUR_COST);
}

#[test]
fn test_nearest_neighbour_on_generated_instance() {
    let difficulty = Difficulty {
        size: 30,
        forbidden_edges_percent: 0,
    };
    let m = DistanceMatrix::generate_instance(&[5; 32], &difficulty).unwrap();
    let tour = tsp_algorithms::travelling_salesman::nearest_neighbour::solve_challenge(&m)
        .unwrap()
        .unwrap();
    let cost = verify_tour(&m, &tour).unwrap();
    let identity = validate_tour(&(0..30).collect::<Vec<_>>(), &m);
    assert!(cost <= identity);
}
