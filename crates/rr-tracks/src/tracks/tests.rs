use super::*;
use crate::error::Error;
use crate::points::Position;
use proptest::prelude::*;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_target(false)
        .try_init();
}

fn pts(coords: &[(i32, i32)]) -> Vec<Position> {
    coords.iter().map(|&c| c.into()).collect()
}

fn col(x: i32, y_low: i32, y_high: i32) -> Track {
    Track {
        axis: Axis::Y,
        x_low: x,
        x_high: x,
        y_low,
        y_high,
    }
}

fn row(y: i32, x_low: i32, x_high: i32) -> Track {
    Track {
        axis: Axis::X,
        x_low,
        x_high,
        y_low: y,
        y_high: y,
    }
}

fn minimized(coords: &[(i32, i32)]) -> (Vec<i32>, Vec<i32>) {
    decompose_points_into_tracks(&pts(coords), TrackCfg::default()).unwrap()
}

const PLUS: [(i32, i32); 5] = [(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)];

const LADDER: [(i32, i32); 12] = [
    (1, 1),
    (3, 1),
    (1, 2),
    (2, 2),
    (3, 2),
    (1, 3),
    (3, 3),
    (1, 4),
    (2, 4),
    (3, 4),
    (1, 5),
    (3, 5),
];

const LADDER_H: [(i32, i32); 11] = [
    (1, 1),
    (3, 1),
    (1, 2),
    (3, 2),
    (1, 3),
    (3, 3),
    (1, 4),
    (2, 4),
    (3, 4),
    (1, 5),
    (3, 5),
];

const TAIL: [(i32, i32); 11] = [
    (68, 48),
    (69, 48),
    (68, 49),
    (69, 49),
    (69, 50),
    (69, 51),
    (69, 52),
    (69, 53),
    (70, 53),
    (71, 53),
    (72, 53),
];

#[test]
fn cfg_validation() {
    assert!(TrackCfg::default().validate().is_ok());
    assert!(TrackCfg::bounded(6, 6).validate().is_ok());
    assert!(matches!(
        TrackCfg::bounded(1, 6).validate(),
        Err(Error::InvalidConfig { .. })
    ));
    let half = TrackCfg {
        grid_width: Some(10),
        ..TrackCfg::default()
    };
    assert!(matches!(half.validate(), Err(Error::InvalidConfig { .. })));
    assert!(matches!(
        decompose_points_into_tracks(&pts(&PLUS), half),
        Err(Error::InvalidConfig { .. })
    ));
    assert!(TrackCfg::default().with_right_only().right_only);
}

#[test]
fn plus_keeps_one_line_each_way() {
    init_logging();
    assert_eq!(minimized(&PLUS), (vec![2], vec![2]));
    assert_eq!(
        decompose_points_into_tracks(&pts(&PLUS), TrackCfg::bounded(6, 6)).unwrap(),
        (vec![2], vec![2])
    );
}

#[test]
fn plus_attachments_before_reduction() {
    let m = TrackMinimizer::new(&pts(&PLUS), TrackCfg::default()).unwrap();
    assert_eq!(m.attachments(Pool::Columns), vec![(0, 1), (1, 4), (2, 4), (3, 1)]);
    assert_eq!(m.attachments(Pool::Rows), vec![(0, 1), (1, 4), (2, 4), (3, 1)]);
}

#[test]
fn points_on_the_bottom_edge_use_a_row() {
    assert_eq!(minimized(&[(1, 0)]), (vec![], vec![0]));
    assert_eq!(minimized(&[(1, 0), (2, 0)]), (vec![], vec![0]));
}

#[test]
fn short_column_collapses_to_the_shared_row() {
    // Column 1 and row 2 tie at the end; the column goes first.
    assert_eq!(minimized(&[(1, 2), (1, 3)]), (vec![], vec![2]));
}

#[test]
fn cross_at_the_edge() {
    assert_eq!(
        minimized(&[(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)]),
        (vec![0], vec![0])
    );
}

#[test]
fn corner_shape_needs_only_the_left_column() {
    assert_eq!(minimized(&[(0, 1), (1, 1), (1, 2)]), (vec![0], vec![]));
}

#[test]
fn going_around_a_corner() {
    assert_eq!(
        minimized(&[(1, 0), (2, 0), (3, 0), (4, 0), (0, 1)]),
        (vec![0], vec![0])
    );
}

#[test]
fn three_parallel_columns_share_one_column() {
    let points = [
        (1, 0),
        (0, 1),
        (2, 1),
        (0, 2),
        (1, 2),
        (0, 3),
        (1, 3),
        (2, 3),
        (0, 4),
        (1, 4),
        (0, 5),
        (2, 5),
        (0, 6),
        (1, 6),
    ];
    assert_eq!(minimized(&points), (vec![0], vec![0, 3, 5]));
}

#[test]
fn h_shapes() {
    let open_bottom = [
        (2, 0),
        (0, 1),
        (2, 1),
        (0, 2),
        (2, 2),
        (0, 3),
        (1, 3),
        (2, 3),
        (0, 4),
        (2, 4),
    ];
    assert_eq!(minimized(&open_bottom), (vec![0], vec![0, 2, 3]));
    assert_eq!(minimized(&LADDER_H), (vec![1, 2], vec![4]));

    // The extra point at (1, 1) must not pull in another line.
    let with_stub = [
        (2, 0),
        (0, 1),
        (1, 1),
        (2, 1),
        (0, 2),
        (2, 2),
        (0, 3),
        (1, 3),
        (2, 3),
        (0, 4),
        (2, 4),
    ];
    assert_eq!(minimized(&with_stub), (vec![0], vec![0, 2, 3]));
}

#[test]
fn crosses_with_two_bars() {
    let even = [
        (1, 0),
        (0, 1),
        (1, 1),
        (2, 1),
        (3, 1),
        (0, 2),
        (1, 2),
        (2, 2),
        (3, 2),
        (1, 3),
    ];
    assert_eq!(minimized(&even), (vec![0], vec![0, 1]));
    let uneven = [
        (1, 0),
        (0, 1),
        (1, 1),
        (2, 1),
        (3, 1),
        (0, 2),
        (1, 2),
        (2, 2),
        (1, 3),
    ];
    assert_eq!(minimized(&uneven), (vec![0], vec![0, 1]));
}

#[test]
fn sparse_layouts() {
    assert_eq!(
        minimized(&[(1, 0), (0, 1), (10, 1), (1, 5)]),
        (vec![0], vec![0])
    );
    assert_eq!(
        minimized(&[(1, 0), (2, 0), (3, 0), (0, 1), (0, 2)]),
        (vec![0], vec![0])
    );
    assert_eq!(
        minimized(&[(10, 0), (12, 0), (13, 0), (14, 1), (14, 2)]),
        (vec![14], vec![0])
    );
    assert_eq!(minimized(&[(0, 16), (1, 17)]), (vec![0], vec![]));
}

#[test]
fn tall_column_minimizes_to_one_crossing() {
    assert_eq!(minimized(&TAIL), (vec![68], vec![52]));
}

#[test]
fn extreme_coordinates_do_not_overflow() {
    assert_eq!(
        decompose_points_into_tracks(&pts(&[(i32::MIN, 3)]), TrackCfg::default()),
        Err(Error::Uncovered {
            pos: Position::new(i32::MIN, 3)
        })
    );
    assert_eq!(minimized(&[(i32::MAX, 5)]), (vec![], vec![5]));
}

#[test]
fn right_only_never_attaches_rows() {
    let points = pts(&[(1, 1), (1, 2), (3, 1)]);
    let cfg = TrackCfg::default().with_right_only();
    let m = TrackMinimizer::new(&points, cfg).unwrap();
    assert!(m.attachments(Pool::Rows).iter().all(|&(_, n)| n == 0));
    assert_eq!(
        m.attachments(Pool::Columns),
        vec![(0, 0), (1, 2), (2, 0), (3, 1)]
    );
    assert_eq!(m.minimize().unwrap(), (vec![1, 3], vec![2]));
}

#[test]
fn corner_points_are_rejected() {
    assert_eq!(
        decompose_points_into_tracks(&pts(&[(0, 0), (1, 1)]), TrackCfg::default()),
        Err(Error::CornerPoint {
            pos: Position::new(0, 0)
        })
    );
    for corner in [(9, 0), (0, 9), (9, 9)] {
        let err = TrackMinimizer::new(&pts(&[(4, 4), corner]), TrackCfg::bounded(10, 10))
            .unwrap_err();
        assert_eq!(err, Error::CornerPoint { pos: corner.into() });
    }
    // Unbounded grids only forbid the origin.
    assert!(TrackMinimizer::new(&pts(&[(9, 0)]), TrackCfg::default()).is_ok());
}

#[test]
fn minimizer_rejects_empty_input() {
    assert_eq!(
        decompose_points_into_tracks(&[], TrackCfg::default()),
        Err(Error::Empty)
    );
}

#[test]
fn ladder_tracks_and_hub_connections() {
    let (tracks, conns) =
        make_tracks(&[1, 3], &[2, 4], &pts(&LADDER), TrackCfg::default()).unwrap();
    assert_eq!(
        tracks,
        vec![col(1, 1, 5), col(3, 1, 5), row(2, 1, 3), row(4, 1, 3)]
    );
    assert_eq!(conns, vec![(2, 0), (2, 1), (3, 0)]);
}

#[test]
fn tall_column_with_a_tail() {
    let points = pts(&TAIL);
    let (tracks, conns) = make_tracks(&[68, 69], &[53], &points, TrackCfg::default()).unwrap();
    assert_eq!(
        tracks,
        vec![col(68, 48, 53), col(69, 48, 53), row(53, 68, 72)]
    );
    assert_eq!(conns, vec![(2, 0), (2, 1)]);
    assert!(Tracks::new(tracks, conns).verify().is_ok());
}

#[test]
fn right_only_tracks_wire_through_the_cross_bar() {
    let points = pts(&[(1, 1), (1, 2), (3, 1)]);
    let cfg = TrackCfg::default().with_right_only();
    let (xs, ys) = decompose_points_into_tracks(&points, cfg).unwrap();
    let (tracks, conns) = make_tracks(&xs, &ys, &points, cfg).unwrap();
    assert_eq!(tracks, vec![col(1, 1, 2), col(3, 1, 2), row(2, 1, 3)]);
    assert_eq!(conns, vec![(2, 0), (2, 1)]);
}

#[test]
fn make_tracks_edge_cases() {
    let (tracks, conns) = make_tracks(&[2], &[], &pts(&[(2, 1), (2, 4)]), TrackCfg::default())
        .unwrap();
    assert_eq!(tracks, vec![col(2, 1, 4)]);
    assert!(conns.is_empty());

    assert_eq!(
        make_tracks(&[1], &[], &pts(&[(1, 1), (5, 5)]), TrackCfg::default()),
        Err(Error::Uncovered {
            pos: Position::new(5, 5)
        })
    );
    assert!(matches!(
        make_tracks(&[1, 2], &[], &pts(&[(1, 1), (2, 1)]), TrackCfg::default()),
        Err(Error::Invariant { .. })
    ));
    // Bounded height clips the column below its only point.
    assert!(matches!(
        make_tracks(&[2], &[], &pts(&[(2, 5)]), TrackCfg::bounded(8, 6)),
        Err(Error::Invariant { .. })
    ));
    assert_eq!(
        make_tracks(&[], &[], &[], TrackCfg::default()),
        Err(Error::Empty)
    );
}

#[test]
fn plus_pipeline_verifies() {
    let points = pts(&PLUS);
    let (xs, ys) = decompose_points_into_tracks(&points, TrackCfg::default()).unwrap();
    let (tracks, conns) = make_tracks(&xs, &ys, &points, TrackCfg::default()).unwrap();
    assert_eq!(tracks, vec![col(2, 1, 3), row(2, 1, 3)]);
    assert_eq!(conns, vec![(1, 0)]);
    assert!(Tracks::new(tracks, conns).verify().is_ok());
}

#[test]
fn verify_reports_bad_wiring() {
    let same = Tracks::new(vec![row(1, 1, 3), row(2, 1, 3)], vec![(0, 1)]);
    assert_eq!(same.verify(), Err(Error::SameAxis { a: 0, b: 1 }));

    let apart = Tracks::new(vec![row(1, 1, 3), col(2, 1, 3)], vec![]);
    assert_eq!(apart.verify(), Err(Error::Disconnected { components: 2 }));

    let dangling = Tracks::new(vec![row(1, 1, 3)], vec![(0, 4)]);
    assert!(matches!(dangling.verify(), Err(Error::Invariant { .. })));

    // A redundant same-axis pair inside one component is skipped.
    let redundant = Tracks::new(
        vec![row(1, 1, 3), col(2, 1, 3), row(3, 1, 3)],
        vec![(0, 1), (2, 1), (0, 2)],
    );
    assert!(redundant.verify().is_ok());
}

#[test]
fn pin_sides() {
    let index = Tracks::new(
        vec![col(1, 1, 5), col(3, 1, 5), row(2, 1, 3), row(4, 1, 3)],
        vec![(2, 0), (2, 1), (3, 0)],
    );
    let at = |i, x, y| index.is_wire_adjacent_to_track(i, Position::new(x, y));
    assert_eq!(at(2, 2, 2), Some(Direction::Top));
    assert_eq!(at(2, 2, 3), Some(Direction::Bottom));
    assert_eq!(at(2, 2, 4), Some(Direction::NoSide));
    assert_eq!(at(2, 4, 2), Some(Direction::NoSide));
    assert_eq!(at(0, 1, 3), Some(Direction::Right));
    assert_eq!(at(0, 2, 3), Some(Direction::Left));
    assert_eq!(at(0, 2, 6), Some(Direction::NoSide));
    assert_eq!(at(7, 1, 1), None);
}

#[test]
fn pin_sides_at_the_integer_limits() {
    let index = Tracks::new(
        vec![
            row(5, 1, 3),
            row(i32::MAX, 1, 3),
            col(i32::MAX, 1, 3),
            row(i32::MAX - 1, 1, 3),
        ],
        vec![],
    );
    let at = |i, x, y| index.is_wire_adjacent_to_track(i, Position::new(x, y));
    assert_eq!(at(0, 2, i32::MIN), Some(Direction::NoSide));
    assert_eq!(at(1, 2, i32::MIN), Some(Direction::NoSide));
    assert_eq!(at(2, i32::MIN, 2), Some(Direction::NoSide));
    assert_eq!(at(1, 2, i32::MAX), Some(Direction::Top));
    assert_eq!(at(3, 2, i32::MAX), Some(Direction::Bottom));
}

#[test]
fn tracks_for_wire_are_memoized() {
    let mut index = Tracks::new(
        vec![col(1, 1, 5), col(3, 1, 5), row(2, 1, 3), row(4, 1, 3)],
        vec![(2, 0), (2, 1), (3, 0)],
    );
    let first = index.get_tracks_for_wire_at_coord(Position::new(2, 3)).clone();
    assert_eq!(
        first.into_iter().collect::<Vec<_>>(),
        vec![(Direction::Left, 0), (Direction::Bottom, 2)]
    );
    let again = index.get_tracks_for_wire_at_coord(Position::new(2, 3)).clone();
    assert_eq!(again.len(), 2);

    let other = index.get_tracks_for_wire_at_coord(Position::new(3, 4));
    assert_eq!(
        other.iter().map(|(&d, &i)| (d, i)).collect::<Vec<_>>(),
        vec![(Direction::Right, 1), (Direction::Top, 3)]
    );
    assert!(index
        .get_tracks_for_wire_at_coord(Position::new(9, 9))
        .is_empty());
}

#[test]
fn later_tracks_win_a_side() {
    let mut index = Tracks::new(vec![col(1, 1, 5), col(1, 2, 4)], vec![]);
    let sides = index.get_tracks_for_wire_at_coord(Position::new(1, 3));
    assert_eq!(sides.get(&Direction::Right), Some(&1));
}

#[test]
fn channel_entries_per_axis() {
    let index = Tracks::new(
        vec![col(1, 1, 5), col(3, 1, 5), row(2, 1, 3), row(4, 1, 3)],
        vec![(2, 0), (2, 1), (3, 0)],
    );
    assert_eq!(index.channel_entries(Axis::Y), vec![(1, 5, 0), (1, 5, 1)]);
    assert_eq!(index.channel_entries(Axis::X), vec![(1, 3, 2), (1, 3, 3)]);
}

#[test]
fn track_serializes_flat() {
    let json = serde_json::to_value(row(2, 1, 3)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"axis": "X", "x_low": 1, "x_high": 3, "y_low": 2, "y_high": 2})
    );
    let back: Track = serde_json::from_value(json).unwrap();
    assert_eq!(back.fixed(), 2);
    assert_eq!(back.span(), (1, 3));
}

/// Whether a retained column or row reaches `p` (own index or the one before).
fn reached(p: Position, xs: &[i32], ys: &[i32]) -> bool {
    let near = |lines: &[i32], c: i32| lines.contains(&c) || lines.contains(&(c - 1));
    near(xs, p.x) || near(ys, p.y)
}

proptest! {
    #[test]
    fn no_retained_line_can_be_dropped(
        raw in prop::collection::btree_set((1i32..12, 1i32..12), 1..40),
    ) {
        let points: Vec<Position> = raw.iter().map(|&c| c.into()).collect();
        let (xs, ys) = decompose_points_into_tracks(&points, TrackCfg::default()).unwrap();
        for (own, other, flip) in [(&xs, &ys, false), (&ys, &xs, true)] {
            for &line in own.iter() {
                let crossing_lost = own.len() <= 1 && other.len() > 1;
                let rest: Vec<i32> = own.iter().copied().filter(|&c| c != line).collect();
                let (cols, rows) = if flip {
                    (other.as_slice(), rest.as_slice())
                } else {
                    (rest.as_slice(), other.as_slice())
                };
                let stranded = points.iter().any(|&p| !reached(p, cols, rows));
                prop_assert!(
                    crossing_lost || stranded,
                    "line {} could still go from {:?} / {:?}", line, xs, ys
                );
            }
        }
    }

    #[test]
    fn minimized_tracks_cover_and_connect(
        raw in prop::collection::btree_set((1i32..12, 1i32..12), 1..40),
        right_only in any::<bool>(),
    ) {
        let points: Vec<Position> = raw.iter().map(|&c| c.into()).collect();
        let cfg = if right_only {
            TrackCfg::default().with_right_only()
        } else {
            TrackCfg::default()
        };
        let (xs, ys) = decompose_points_into_tracks(&points, cfg).unwrap();
        prop_assert!(xs.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(ys.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(
            decompose_points_into_tracks(&points, cfg).unwrap(),
            (xs.clone(), ys.clone())
        );

        let (tracks, conns) = make_tracks(&xs, &ys, &points, cfg).unwrap();
        prop_assert_eq!(tracks.len(), xs.len() + ys.len());
        let mut index = Tracks::new(tracks, conns);
        prop_assert!(index.verify().is_ok());

        for &p in &points {
            prop_assert!(!index.get_tracks_for_wire_at_coord(p).is_empty(), "{}", p);
        }
    }
}
