use proptest::prelude::*;
use tsp_challenges::*;

const INF: f64 = f64::INFINITY;

fn matrix(rows: Vec<Vec<f64>>) -> DistanceMatrix {
    DistanceMatrix::new(rows).unwrap()
}

fn line_matrix() -> DistanceMatrix {
    matrix(vec![
        vec![0.0, 1.0, 2.0],
        vec![1.0, 0.0, 1.0],
        vec![2.0, 1.0, 0.0],
    ])
}

#[test]
fn test_validate_tour_sums_cyclic_edges() {
    // matrix[2][0] + matrix[0][1] + matrix[1][2]
    assert_eq!(validate_tour(&[0, 1, 2], &line_matrix()), 4.0);
}

#[test]
fn test_validate_tour_infinite_edge() {
    let m = matrix(vec![vec![0.0, INF], vec![INF, 0.0]]);
    assert_eq!(validate_tour(&[0, 1], &m), INVALID_TOUR_COST);
    assert_eq!(
        tour_cost(&[0, 1], &m),
        Err(TourError::InfiniteEdge { from: 1, to: 0 })
    );
}

#[test]
fn test_validate_tour_ignores_permutation() {
    let m = line_matrix();
    assert_eq!(validate_tour(&[0, 1], &m), 2.0);
    assert_eq!(validate_tour(&[0, 0, 1], &m), 2.0);
    assert_eq!(validate_tour(&[], &m), 0.0);
}

#[test]
fn test_validate_tour_out_of_range_city() {
    let m = line_matrix();
    assert_eq!(validate_tour(&[0, 5], &m), INVALID_TOUR_COST);
    assert_eq!(
        tour_cost(&[0, 5], &m),
        Err(TourError::CityOutOfRange {
            city: 5,
            num_cities: 3
        })
    );
}

#[test]
fn test_validate_tour_basic_repeated_city() {
    assert_eq!(
        validate_tour_basic(&line_matrix(), &[0, 0, 1]),
        Err(TourError::NotAPermutation {
            missing: vec![2],
            repeated: vec![0],
            out_of_range: vec![],
        })
    );
}

#[test]
fn test_validate_tour_basic_wrong_length() {
    let err = validate_tour_basic(&line_matrix(), &[0, 1]).unwrap_err();
    assert_eq!(
        err,
        TourError::WrongLength {
            expected: 3,
            actual: 2
        }
    );
    assert_eq!(
        err.to_string(),
        "Tour visits the wrong number of cities. Expected: '3', Actual: '2'"
    );
}

#[test]
fn test_validate_tour_basic_out_of_range() {
    assert_eq!(
        validate_tour_basic(&line_matrix(), &[0, 1, 5]),
        Err(TourError::NotAPermutation {
            missing: vec![2],
            repeated: vec![],
            out_of_range: vec![5],
        })
    );
}

#[test]
fn test_verify_tour() {
    let m = line_matrix();
    assert_eq!(verify_tour(&m, &[2, 1, 0]), Ok(4.0));
    assert!(verify_tour(&m, &[0, 0, 1]).is_err());
    let m = matrix(vec![vec![0.0, INF], vec![INF, 0.0]]);
    assert_eq!(
        verify_tour(&m, &[0, 1]),
        Err(TourError::InfiniteEdge { from: 1, to: 0 })
    );
}

#[test]
fn test_non_square_matrix() {
    assert_eq!(
        DistanceMatrix::new(vec![vec![0.0, 1.0], vec![1.0]]),
        Err(TourError::NonSquareMatrix {
            row: 1,
            expected: 2,
            actual: 1
        })
    );
    assert!(serde_json::from_str::<DistanceMatrix>("[[0, 1, 2], [1, 0, 3]]").is_err());
}

#[test]
fn test_matrix_json_infinity() {
    let m: DistanceMatrix = serde_json::from_str(r#"[[0, null], ["inf", 0.5]]"#).unwrap();
    assert_eq!(m.num_cities(), 2);
    assert!(m.is_forbidden(0, 1));
    assert!(m.is_forbidden(1, 0));
    assert_eq!(m.get(1, 1), Some(0.5));
    assert_eq!(
        serde_json::to_string(&m).unwrap(),
        "[[0.0,null],[null,0.5]]"
    );
    assert!(serde_json::from_str::<DistanceMatrix>(r#"[["far"]]"#).is_err());
}

#[test]
fn test_generate_instance_is_deterministic() {
    let difficulty = Difficulty {
        size: 20,
        forbidden_edges_percent: 30,
    };
    let a = DistanceMatrix::generate_instance(&[7; 32], &difficulty).unwrap();
    let b = DistanceMatrix::generate_instance(&[7; 32], &difficulty).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.num_cities(), 20);
    for i in 0..20 {
        assert_eq!(a.get(i, i), Some(0.0));
        for j in 0..20 {
            assert_eq!(a.get(i, j), a.get(j, i));
        }
    }
}

#[test]
fn test_generate_instance_keeps_a_cycle() {
    let difficulty = Difficulty {
        size: 12,
        forbidden_edges_percent: 100,
    };
    let m = DistanceMatrix::generate_instance(&[3; 32], &difficulty).unwrap();
    for i in 0..12 {
        let finite = (0..12).filter(|&j| j != i && !m.is_forbidden(i, j)).count();
        assert_eq!(finite, 2);
    }
}

#[test]
fn test_generate_instance_without_forbidden_edges() {
    let difficulty = Difficulty {
        size: 8,
        forbidden_edges_percent: 0,
    };
    let m = DistanceMatrix::generate_instance(&[1; 32], &difficulty).unwrap();
    assert!(m.rows().iter().flatten().all(|d| d.is_finite()));
}

#[test]
fn test_generate_instance_rejects_bad_difficulty() {
    let too_small = Difficulty {
        size: 2,
        forbidden_edges_percent: 0,
    };
    assert!(DistanceMatrix::generate_instance(&[0; 32], &too_small).is_err());
    let too_many = Difficulty {
        size: 5,
        forbidden_edges_percent: 101,
    };
    assert!(DistanceMatrix::generate_instance(&[0; 32], &too_many).is_err());
}

fn finite_matrix_and_tour() -> impl Strategy<Value = (Vec<Vec<f64>>, Vec<usize>, usize)> {
    (1usize..8).prop_flat_map(|n| {
        (
            prop::collection::vec(prop::collection::vec((0u32..100).prop_map(f64::from), n), n),
            Just((0..n).collect::<Vec<usize>>()).prop_shuffle(),
            0..n,
        )
    })
}

proptest! {
    #[test]
    fn prop_cost_is_cyclic_sum((rows, tour, _) in finite_matrix_and_tour()) {
        let n = tour.len();
        let expected: f64 = (0..n).map(|i| rows[tour[(i + n - 1) % n]][tour[i]]).sum();
        let m = matrix(rows);
        let cost = validate_tour(&tour, &m);
        prop_assert_eq!(cost, expected);
        prop_assert_ne!(cost, INVALID_TOUR_COST);
        prop_assert_eq!(validate_tour(&tour, &m), cost);
        prop_assert!(validate_tour_basic(&m, &tour).is_ok());
    }

    #[test]
    fn prop_infinite_edge_is_invalid((mut rows, tour, k) in finite_matrix_and_tour()) {
        let n = tour.len();
        rows[tour[(k + n - 1) % n]][tour[k]] = INF;
        prop_assert_eq!(validate_tour(&tour, &matrix(rows)), INVALID_TOUR_COST);
    }

    #[test]
    fn prop_basic_validator_accepts_only_permutations(
        n in 0usize..6,
        tour in prop::collection::vec(0usize..8, 0..8),
    ) {
        let m = matrix(vec![vec![1.0; n]; n]);
        let mut sorted = tour.clone();
        sorted.sort();
        let is_permutation = sorted == (0..n).collect::<Vec<_>>();
        prop_assert_eq!(validate_tour_basic(&m, &tour).is_ok(), is_permutation);
    }
}
