use ndarray::{array, Array1, Array2, Array3};

use ndarray_label::{label, BoundaryCondition, LabelError};

#[test]
fn one_dimensional_two_segments() {
    let input = Array1::from_vec(vec![true, true, false, true, true]);
    let (out, n) = label(&input, 1, 0, 0, &[]).unwrap();
    assert_eq!(out, Array1::from_vec(vec![1, 1, 0, 2, 2]));
    assert_eq!(n, 2);
}

#[test]
fn two_dimensional_four_isolated_corners() {
    let input = array![[true, false, true], [false, false, false], [true, false, true]];

    let (_, n1) = label(&input, 1, 0, 0, &[]).unwrap();
    assert_eq!(n1, 4);

    // Diagonal neighbors are not within one displacement of each other under full 2-D
    // connectivity either: each corner is two steps (Chebyshev) from every other corner.
    let (_, n2) = label(&input, 2, 0, 0, &[]).unwrap();
    assert_eq!(n2, 4);
}

#[test]
fn two_dimensional_single_connected_shape() {
    let input = array![[true, true, false], [false, true, false], [false, true, true]];
    let (out, n) = label(&input, 1, 0, 0, &[]).unwrap();
    assert_eq!(n, 1);
    for (&o, &f) in out.iter().zip(input.iter()) {
        assert_eq!(o != 0, f);
    }
    assert!(out.iter().filter(|&&v| v != 0).all(|&v| v == 1));
}

#[test]
fn min_size_filter_drops_small_regions() {
    let input = Array1::from_vec(vec![true, true, true, false]);

    let (out, n) = label(&input, 1, 2, 0, &[]).unwrap();
    assert_eq!(out, Array1::from_vec(vec![1, 1, 1, 0]));
    assert_eq!(n, 1);

    let (out, n) = label(&input, 1, 4, 0, &[]).unwrap();
    assert_eq!(out, Array1::from_vec(vec![0, 0, 0, 0]));
    assert_eq!(n, 0);
}

#[test]
fn max_size_filter_drops_large_regions() {
    let input = array![[true, true, true], [false, false, false], [true, false, false]];
    let (out, n) = label(&input, 1, 0, 2, &[]).unwrap();
    assert_eq!(n, 1);
    assert_eq!(out[[2, 0]], 1);
    assert!(out.slice(ndarray::s![0, ..]).iter().all(|&v| v == 0));
}

#[test]
fn periodic_boundary_merges_opposite_faces_1d() {
    let input = Array1::from_vec(vec![true, false, false, false, true]);
    let (out, n) = label(&input, 1, 0, 0, &[BoundaryCondition::Periodic]).unwrap();
    assert_eq!(out, Array1::from_vec(vec![1, 0, 0, 0, 1]));
    assert_eq!(n, 1);
}

#[test]
fn periodic_boundary_merges_opposite_faces_2d() {
    let input = array![[false, false, false], [true, false, true], [false, false, false]];
    let (no_wrap, n0) = label(&input, 1, 0, 0, &[]).unwrap();
    assert_eq!(n0, 2);
    assert_ne!(no_wrap[[1, 0]], no_wrap[[1, 2]]);

    let (wrapped, n1) =
        label(&input, 1, 0, 0, &[BoundaryCondition::AddZeros, BoundaryCondition::Periodic]).unwrap();
    assert_eq!(n1, 1);
    assert_eq!(wrapped[[1, 0]], wrapped[[1, 2]]);
}

#[test]
fn ring_around_a_hole_stays_one_region() {
    let input = array![
        [true, true, true, true, true],
        [true, false, false, false, true],
        [true, false, false, false, true],
        [true, false, false, false, true],
        [true, true, true, true, true],
    ];
    let (out, n) = label(&input, 1, 0, 0, &[]).unwrap();
    assert_eq!(n, 1);
    assert_eq!(out[[2, 2]], 0);
    assert_eq!(out[[0, 0]], out[[4, 4]]);
    assert_eq!(out[[0, 4]], out[[4, 0]]);
}

#[test]
fn three_dimensional_full_diagonal_needs_full_connectivity() {
    let mut input = Array3::from_elem((3, 3, 3), false);
    input[[0, 0, 0]] = true;
    input[[1, 1, 1]] = true;

    let (_, n_face) = label(&input, 1, 0, 0, &[]).unwrap();
    assert_eq!(n_face, 2);

    let (_, n_corner) = label(&input, 3, 0, 0, &[]).unwrap();
    assert_eq!(n_corner, 1);
}

#[test]
fn connectivity_is_monotonic_in_region_count() {
    let input = array![[true, false, true], [false, true, false], [true, false, true]];
    let mut previous = None;
    for k in 1..=2 {
        let (_, n) = label(&input, k, 0, 0, &[]).unwrap();
        if let Some(p) = previous {
            assert!(n <= p, "nLabel should not increase with connectivity");
        }
        previous = Some(n);
    }
}

#[test]
fn dense_labels_cover_one_through_n_label() {
    let input = array![[true, false, true], [false, false, false], [true, false, true]];
    let (out, n) = label(&input, 1, 0, 0, &[]).unwrap();
    let mut values: Vec<u32> = out.iter().copied().filter(|&v| v != 0).collect();
    values.sort_unstable();
    values.dedup();
    let expected: Vec<u32> = (1..=n as u32).collect();
    assert_eq!(values, expected);
}

#[test]
fn size_filter_then_relabel_is_idempotent() {
    let input = array![[true, true, false], [false, true, false], [false, true, true]];
    let (once, _) = label(&input, 1, 0, 0, &[]).unwrap();
    let refiltered = once.mapv(|v| v != 0);
    let (twice, _) = label(&refiltered, 1, 0, 0, &[]).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn boundary_condition_is_irrelevant_away_from_every_face() {
    let input: Array2<bool> =
        array![[false, false, false], [false, true, false], [false, false, false]];
    let (add_zeros, n0) = label(&input, 1, 0, 0, &[BoundaryCondition::AddZeros]).unwrap();
    let (periodic, n1) = label(&input, 1, 0, 0, &[BoundaryCondition::Periodic]).unwrap();
    assert_eq!(add_zeros, periodic);
    assert_eq!(n0, n1);
}

#[test]
fn rejects_zero_length_axis() {
    let input = Array2::from_shape_vec((0, 4), vec![]).unwrap();
    let err = label(&input, 1, 0, 0, &[]).unwrap_err();
    assert_eq!(err, LabelError::ImageNotForged { shape: vec![0, 4] });
}

#[test]
fn rejects_connectivity_above_rank() {
    let input = Array2::from_elem((2, 2), true);
    let err = label(&input, 3, 0, 0, &[]).unwrap_err();
    assert_eq!(err, LabelError::ParameterOutOfRange { connectivity: 3, rank: 2 });
}

#[test]
fn rejects_zero_connectivity() {
    let input = Array1::from_vec(vec![true, true, true]);
    let err = label(&input, 0, 0, 0, &[]).unwrap_err();
    assert_eq!(err, LabelError::ParameterOutOfRange { connectivity: 0, rank: 1 });
}

#[test]
fn rejects_boundary_condition_longer_than_rank() {
    let input = Array1::from_vec(vec![true, true]);
    let err =
        label(&input, 1, 0, 0, &[BoundaryCondition::AddZeros, BoundaryCondition::AddZeros]).unwrap_err();
    assert_eq!(err, LabelError::BoundaryConditionLength { given: 2, rank: 1 });
}
