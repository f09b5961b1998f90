use super::*;
use crate::shapes::rand::{draw_radial, RadialCfg, ReplayToken, VertexCount};
use crate::shapes::{regular, square_with_holes, Polygon};

const SQUARE_WITH_HOLE: [[f64; 2]; 8] = [
    [0.0, 0.0],
    [10.0, 0.0],
    [10.0, 10.0],
    [0.0, 10.0],
    [3.0, 3.0],
    [7.0, 3.0],
    [7.0, 7.0],
    [3.0, 7.0],
];

fn sorted(t: &[u32]) -> Vec<u32> {
    let mut t = t.to_vec();
    t.sort_unstable();
    t
}

fn centroid(points: &[[f64; 2]], t: [u32; 3]) -> [f64; 2] {
    let [a, b, c] = t.map(|i| points[i as usize]);
    [(a[0] + b[0] + c[0]) / 3.0, (a[1] + b[1] + c[1]) / 3.0]
}

#[test]
fn triangle_keeps_its_indices() {
    let tri = triangulate(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]], &[3u32]).unwrap();
    assert_eq!(tri, vec![1, 2, 0]);
}

#[test]
fn clockwise_input_is_accepted() {
    let tri = triangulate(&[[1.0, 1.0], [1.0, 0.0], [0.0, 0.0]], &[3u32]).unwrap();
    assert_eq!(tri.len(), 3);
    assert_eq!(sorted(&tri), vec![0, 1, 2]);
}

#[test]
fn square_clips_from_the_last_vertex() {
    let sq = &SQUARE_WITH_HOLE[..4];
    assert_eq!(triangulate(sq, &[4u32]).unwrap(), vec![2, 3, 0, 0, 1, 2]);
}

#[test]
fn square_with_hole_leaves_the_hole_open() {
    let tri = triangulate(&SQUARE_WITH_HOLE, &[4u32, 8]).unwrap();
    assert_eq!(tri.len(), 8 * 3);
    for t in triples(&tri) {
        let c = centroid(&SQUARE_WITH_HOLE, t);
        let in_hole = (3.0..=7.0).contains(&c[0]) && (3.0..=7.0).contains(&c[1]);
        assert!(!in_hole, "triangle {t:?} covers the hole");
    }
    assert_eq!(deviation(&SQUARE_WITH_HOLE, &[4u32, 8], &tri).unwrap(), 0.0);
    // Deterministic across runs.
    assert_eq!(triangulate(&SQUARE_WITH_HOLE, &[4u32, 8]).unwrap(), tri);
}

#[test]
fn trivial_inputs_yield_nothing() {
    let none: [u32; 0] = [];
    assert!(triangulate::<f64, _>(&[], &none).unwrap().is_empty());
    assert!(triangulate(&[[0.0, 0.0]], &[1u32]).unwrap().is_empty());
    assert!(triangulate(&[[0.0, 0.0], [1.0, 1.0]], &[2u32]).unwrap().is_empty());
    // Zero area.
    let line = [[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]];
    assert!(triangulate(&line, &[4u32]).unwrap().is_empty());
    // All points equal.
    assert!(triangulate(&[[5.0, 5.0]; 4], &[4u32]).unwrap().is_empty());
}

#[test]
fn malformed_ring_ends_are_rejected() {
    let tri = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0]];
    let none: [i64; 0] = [];
    assert_eq!(
        triangulate(&tri, &none),
        Err(RingBoundaryError::Empty { points: 3 })
    );
    assert!(triangulate(&tri, &[5i64]).is_err());
    assert!(triangulate(&tri, &[2i64]).is_err());
    assert!(triangulate(&tri, &[-1i64]).is_err());
    assert!(triangulate(&tri, &[3i64, 0, 3]).is_err());
    assert!(triangulate(&tri, &[3i64, 3]).is_err());
}

#[test]
fn flat_buffer_matches_point_pairs() {
    let flat: Vec<f64> = SQUARE_WITH_HOLE.iter().flatten().copied().collect();
    assert_eq!(
        triangulate_flat(&flat, &[4u32, 8]).unwrap(),
        triangulate(&SQUARE_WITH_HOLE, &[4u32, 8]).unwrap()
    );
    assert_eq!(
        triangulate_flat(&flat[..5], &[2u32]),
        Err(RingBoundaryError::UnpairedCoordinate { len: 5 })
    );
}

#[test]
fn every_coordinate_type_agrees() {
    let f64_tri = triangulate(&SQUARE_WITH_HOLE, &[4u32, 8]).unwrap();
    let as_i32: Vec<[i32; 2]> = SQUARE_WITH_HOLE.iter().map(|p| [p[0] as i32, p[1] as i32]).collect();
    let as_i64: Vec<[i64; 2]> = SQUARE_WITH_HOLE.iter().map(|p| [p[0] as i64, p[1] as i64]).collect();
    let as_f32: Vec<[f32; 2]> = SQUARE_WITH_HOLE.iter().map(|p| [p[0] as f32, p[1] as f32]).collect();
    assert_eq!(triangulate(&as_i32, &[4u32, 8]).unwrap(), f64_tri);
    assert_eq!(triangulate(&as_i64, &[4u32, 8]).unwrap(), f64_tri);
    assert_eq!(triangulate(&as_f32, &[4u32, 8]).unwrap(), f64_tri);
}

#[test]
fn large_integer_coordinates_stay_exact() {
    let s = 1i64 << 40;
    // Trapezoid 2^41 wide and one unit tall.
    let pts = [[-s, 0], [s, 0], [s - 1, 1], [-s, 1]];
    let tri = triangulate(&pts, &[4u32]).unwrap();
    assert_eq!(tri.len(), 6);
    assert_eq!(deviation(&pts, &[4u32], &tri).unwrap(), 0.0);
}

#[test]
fn full_i64_range_triangulates_without_overflow() {
    let corner = [[i64::MIN, i64::MIN], [i64::MAX, i64::MIN], [i64::MAX, i64::MAX]];
    let tri = triangulate(&corner, &[3u32]).unwrap();
    assert_eq!(tri, vec![1, 2, 0]);
    assert!(deviation(&corner, &[3u32], &tri).unwrap() < 1e-12);

    let s = 1i64 << 62;
    let square = [[-s, -s], [s, -s], [s, s], [-s, s]];
    let tri = triangulate(&square, &[4u32]).unwrap();
    assert_eq!(tri, vec![2, 3, 0, 0, 1, 2]);
    assert!(deviation(&square, &[4u32], &tri).unwrap() < 1e-12);
}

#[test]
fn hole_near_the_i64_limits_matches_small_coordinates() {
    let unit = 1i64 << 59;
    let scaled: Vec<[i64; 2]> = SQUARE_WITH_HOLE
        .iter()
        .map(|p| [(p[0] as i64 - 5) * unit, (p[1] as i64 - 5) * unit])
        .collect();
    let tri = triangulate(&scaled, &[4u32, 8]).unwrap();
    assert_eq!(tri, triangulate(&SQUARE_WITH_HOLE, &[4u32, 8]).unwrap());
}

#[test]
fn reusable_engine_gives_identical_results() {
    let mut earcut = Earcut::new();
    let mut out = Vec::new();
    earcut.triangulate_into(&SQUARE_WITH_HOLE, &[4u32, 8], &mut out).unwrap();
    let first = out.clone();
    earcut.triangulate_into(&SQUARE_WITH_HOLE[..3], &[3u32], &mut out).unwrap();
    assert_eq!(out, vec![1, 2, 0]);
    earcut.triangulate_into(&SQUARE_WITH_HOLE, &[4u32, 8], &mut out).unwrap();
    assert_eq!(out, first);
    assert!(earcut.triangulate_into(&SQUARE_WITH_HOLE, &[9u32], &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn hashed_and_linear_scans_agree_on_coverage() {
    let p = draw_radial(
        RadialCfg {
            vertex_count: VertexCount::Fixed(300),
            ..RadialCfg::default()
        },
        ReplayToken { seed: 11, index: 0 },
    );
    let hashed = p.triangulate().unwrap();
    let linear = triangulate_with(
        &p.points,
        &p.ring_ends,
        EarcutCfg {
            hash_threshold: usize::MAX,
            ..EarcutCfg::default()
        },
    )
    .unwrap();
    assert_eq!(hashed.len(), 298 * 3);
    assert_eq!(linear.len(), 298 * 3);
    assert!(p.deviation(&hashed).unwrap() < 1e-9);
    assert!(p.deviation(&linear).unwrap() < 1e-9);
}

#[test]
fn large_regular_polygon_uses_the_index() {
    let p = regular(500, 100.0);
    let tri = p.triangulate().unwrap();
    assert_eq!(tri.len(), 498 * 3);
    assert!(p.deviation(&tri).unwrap() < 1e-9);
}

#[test]
fn many_holes() {
    let p = square_with_holes(100.0, 6, 0.4);
    let tri = p.triangulate().unwrap();
    assert!(p.deviation(&tri).unwrap() < 1e-9);
    assert!(tri.iter().all(|&i| (i as usize) < p.len()));
}

#[test]
fn hole_touching_the_outer_ring() {
    // Hole vertex (0, 5) lies on the outer left edge.
    let pts = [
        [0.0, 0.0],
        [10.0, 0.0],
        [10.0, 10.0],
        [0.0, 10.0],
        [0.0, 5.0],
        [4.0, 3.0],
        [4.0, 7.0],
    ];
    let tri = triangulate(&pts, &[4u32, 7]).unwrap();
    assert!(deviation(&pts, &[4u32, 7], &tri).unwrap() < 1e-12);
}

#[test]
fn self_intersecting_input_terminates() {
    // Figure eight with a repeated vertex.
    let pts = [
        [0.0, 0.0],
        [2.0, 2.0],
        [4.0, 0.0],
        [4.0, 4.0],
        [2.0, 2.0],
        [0.0, 4.0],
    ];
    for recover in [true, false] {
        let cfg = EarcutCfg {
            recover,
            ..EarcutCfg::default()
        };
        let tri = triangulate_with(&pts, &[6u32], cfg).unwrap();
        assert_eq!(tri.len() % 3, 0);
        assert!(tri.iter().all(|&i| i < 6));
    }
}

#[test]
fn single_point_hole_as_steiner_vertex() {
    let pts = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [5.0, 5.0]];
    let skipped = triangulate(&pts, &[4u32, 5]).unwrap();
    assert_eq!(skipped.len(), 2 * 3);
    assert!(!skipped.contains(&4));

    let cfg = EarcutCfg {
        steiner_points: true,
        ..EarcutCfg::default()
    };
    let pinned = triangulate_with(&pts, &[4u32, 5], cfg).unwrap();
    assert_eq!(pinned.len(), 4 * 3);
    assert!(pinned.contains(&4));
    assert_eq!(deviation(&pts, &[4u32, 5], &pinned).unwrap(), 0.0);
}

#[test]
fn equal_angle_bridge_candidates_resolve_to_the_rightmost() {
    let pts = [
        [-10.0, -10.0],
        [-2.0, -10.0],
        [1.0, 1.0],
        [3.0, 3.0],
        [4.0, -10.0],
        [20.0, -10.0],
        [20.0, 20.0],
        [-10.0, 20.0],
        [5.0, 5.0],
        [8.0, 5.0],
        [8.0, 8.0],
        [6.0, 8.0],
    ];
    let tri = triangulate(&pts, &[8u32, 12]).unwrap();
    assert!(deviation(&pts, &[8u32, 12], &tri).unwrap() < 1e-12);
    // The bridge edge (5, 5)-(3, 3) ends up in a triangle; the farther
    // candidate (-10, -10) on the same ray does not connect.
    assert!(triples(&tri).any(|t| t.contains(&8) && t.contains(&3)));
    assert!(!triples(&tri).any(|t| t.contains(&8) && t.contains(&0)));
}

#[test]
fn empty_polygon_type() {
    let p = Polygon::new();
    assert!(p.is_empty());
    assert!(p.triangulate().unwrap().is_empty());
}
