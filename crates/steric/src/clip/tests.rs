use super::*;
use crate::geom::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

fn pt(x: f64, y: f64) -> Steric {
    Steric::point(x, y)
}

fn ln(pts: &[[f64; 2]]) -> Steric {
    Steric::line(pts.iter().copied())
}

fn poly(rings: &[&[[f64; 2]]]) -> Steric {
    Steric::polygon(rings.iter().map(|r| r.iter().copied()))
}

fn coll(items: Vec<Steric>) -> Steric {
    Steric::Collection(items)
}

#[track_caller]
fn assert_close(name: &str, got: &Steric, want: &Steric) {
    assert!(
        got.proximity(want, TOL) || (got.is_empty() && want.is_empty()),
        "{name}: got {got:?}, want {want:?}"
    );
}

const SQ_A: &[[f64; 2]] = &[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]];
const SQ_B: &[[f64; 2]] = &[[5.0, 5.0], [15.0, 5.0], [15.0, 15.0], [5.0, 15.0], [5.0, 5.0]];
const SQ_B_CW: &[[f64; 2]] = &[[5.0, 5.0], [5.0, 15.0], [15.0, 15.0], [15.0, 5.0], [5.0, 5.0]];
const FRAME_HOLE: &[[f64; 2]] = &[[1.0, 1.0], [9.0, 1.0], [9.0, 9.0], [1.0, 9.0], [1.0, 1.0]];
const BIG: &[[f64; 2]] = &[[90.0, 90.0], [90.0, 101.0], [101.0, 101.0], [101.0, 90.0], [90.0, 90.0]];
const CORNER: &[[f64; 2]] = &[
    [100.0, 100.0],
    [100.0, 101.0],
    [101.0, 101.0],
    [101.0, 100.0],
    [100.0, 100.0],
];
const FAR: &[[f64; 2]] = &[
    [105.0, 105.0],
    [105.0, 101.0],
    [101.0, 101.0],
    [101.0, 105.0],
    [105.0, 105.0],
];

#[test]
fn overlapping_squares() {
    let a = poly(&[SQ_A]);
    let b = poly(&[SQ_B]);
    let inter = intersection(&a, &b).unwrap();
    assert_close(
        "intersection",
        &inter,
        &poly(&[&[[5.0, 10.0], [10.0, 10.0], [10.0, 5.0], [5.0, 5.0], [5.0, 10.0]]]),
    );
    let diff = difference(&a, &b).unwrap();
    assert_close(
        "difference",
        &diff,
        &poly(&[&[
            [5.0, 10.0],
            [0.0, 10.0],
            [0.0, 0.0],
            [10.0, 0.0],
            [10.0, 5.0],
            [5.0, 5.0],
            [5.0, 10.0],
        ]]),
    );
    assert!((inter.area() - 25.0).abs() < TOL);
    assert!((diff.area() - 75.0).abs() < TOL);
    // Shells come out counterclockwise.
    if let Steric::Polygon(rings) = &diff {
        assert!(crate::geom::signed_area(&rings[0]) > 0.0);
    }
}

#[test]
fn point_intersections() {
    let cases = [
        ("point point0", pt(100.0, 100.0), pt(100.0, 100.0), pt(100.0, 100.0)),
        ("point point1", pt(100.0, 100.0), pt(100.0, 101.0), Steric::empty()),
        (
            "point line0",
            pt(100.0, 100.0),
            ln(&[[100.0, 100.0], [100.0, 101.0]]),
            pt(100.0, 100.0),
        ),
        (
            "point line1",
            pt(100.0, 100.0),
            ln(&[[100.0, 105.0], [100.0, 101.0]]),
            Steric::empty(),
        ),
        ("point poly1", pt(100.0, 100.0), poly(&[BIG]), pt(100.0, 100.0)),
        ("point poly2", pt(100.0, 100.0), poly(&[CORNER]), pt(100.0, 100.0)),
        ("point poly3", pt(100.0, 100.0), poly(&[FAR]), Steric::empty()),
    ];
    for (name, a, b, want) in cases {
        assert_close(name, &intersection(&a, &b).unwrap(), &want);
        assert_close(name, &intersection(&b, &a).unwrap(), &want);
    }
}

#[test]
fn point_union_and_difference() {
    let p = pt(100.0, 100.0);
    let l = ln(&[[100.0, 100.0], [100.0, 101.0]]);
    assert_close("absorbed", &union(&l, &p).unwrap(), &l);
    assert_close("absorbed", &union(&p, &l).unwrap(), &l);
    let q = pt(0.0, 0.0);
    assert_close("apart", &union(&p, &q).unwrap(), &coll(vec![p.clone(), q.clone()]));
    assert!(difference(&p, &l).unwrap().is_empty());
    assert_close("kept", &difference(&q, &l).unwrap(), &q);
    assert_close("line keeps", &difference(&l, &p).unwrap(), &l);
}

#[test]
fn line_unions() {
    let seg = || ln(&[[100.0, 100.0], [100.0, 101.0]]);
    let cases = [
        ("line point0", seg(), pt(100.0, 100.0), seg()),
        ("line line0", seg(), seg(), seg()),
        (
            "line line1",
            seg(),
            ln(&[[100.0, 100.0], [90.0, 102.0]]),
            coll(vec![seg(), ln(&[[100.0, 100.0], [90.0, 102.0]])]),
        ),
        (
            "line poly1",
            ln(&[[100.0, 100.0], [101.0, 101.0]]),
            poly(&[BIG]),
            poly(&[BIG]),
        ),
        ("line poly2", seg(), poly(&[CORNER]), poly(&[CORNER])),
        ("line poly3", seg(), poly(&[FAR]), coll(vec![seg(), poly(&[FAR])])),
    ];
    for (name, a, b, want) in cases {
        assert_close(name, &union(&a, &b).unwrap(), &want);
    }
}

#[test]
fn line_crossing_polygon_union_keeps_outside_parts() {
    let l = ln(&[[-5.0, 5.0], [15.0, 5.0]]);
    let sq = poly(&[SQ_A]);
    let got = union(&l, &sq).unwrap();
    let want = coll(vec![
        ln(&[[-5.0, 5.0], [0.0, 5.0]]),
        ln(&[[10.0, 5.0], [15.0, 5.0]]),
        sq.clone(),
    ]);
    assert_close("line first", &got, &want);
    let Steric::Collection(items) = union(&sq, &l).unwrap() else {
        panic!("expected a collection");
    };
    assert_eq!(items[0].shape(), Shape::Polygon);
}

#[test]
fn line_intersections() {
    let seg = || ln(&[[100.0, 100.0], [100.0, 101.0]]);
    let cases = [
        ("line point0", seg(), pt(100.0, 100.0), pt(100.0, 100.0)),
        ("line line0", seg(), seg(), seg()),
        (
            "line line1",
            seg(),
            ln(&[[100.0, 100.0], [90.0, 102.0]]),
            pt(100.0, 100.0),
        ),
        (
            "line poly1",
            ln(&[[100.0, 100.0], [101.0, 101.0]]),
            poly(&[BIG]),
            ln(&[[100.0, 100.0], [101.0, 101.0]]),
        ),
        ("line poly2", seg(), poly(&[CORNER]), seg()),
        ("line poly3", seg(), poly(&[FAR]), Steric::empty()),
        (
            "poly line1",
            poly(&[FAR]),
            ln(&[[100.0, 100.0], [90.0, 101.0]]),
            Steric::empty(),
        ),
    ];
    for (name, a, b, want) in cases {
        assert_close(name, &intersection(&a, &b).unwrap(), &want);
    }
}

#[test]
fn line_chord_and_touch() {
    let sq = poly(&[SQ_A]);
    let chord = ln(&[[-5.0, 5.0], [15.0, 5.0]]);
    assert_close(
        "chord",
        &intersection(&chord, &sq).unwrap(),
        &ln(&[[0.0, 5.0], [10.0, 5.0]]),
    );
    let touch = ln(&[[-5.0, 5.0], [0.0, 5.0], [-5.0, 8.0]]);
    assert_close("touch", &intersection(&touch, &sq).unwrap(), &pt(0.0, 5.0));
    let a = ln(&[[0.0, 0.0], [4.0, 0.0]]);
    let b = ln(&[[2.0, 0.0], [6.0, 0.0]]);
    assert_close(
        "overlap",
        &intersection(&a, &b).unwrap(),
        &ln(&[[2.0, 0.0], [4.0, 0.0]]),
    );
}

#[test]
fn line_differences() {
    let hook = || ln(&[[50.0, 100.0], [50.0, 200.0], [60.0, 200.0]]);
    let cases = [
        (
            "line line0",
            hook(),
            ln(&[[50.0, 50.0], [50.0, 150.0]]),
            ln(&[[50.0, 150.0], [50.0, 200.0], [60.0, 200.0]]),
        ),
        (
            "line line1",
            hook(),
            ln(&[[50.0, 120.0], [50.0, 150.0]]),
            coll(vec![
                ln(&[[50.0, 100.0], [50.0, 120.0]]),
                ln(&[[50.0, 150.0], [50.0, 200.0], [60.0, 200.0]]),
            ]),
        ),
        (
            "line line2",
            hook(),
            ln(&[[50.0, 150.0], [50.0, 250.0]]),
            coll(vec![
                ln(&[[50.0, 100.0], [50.0, 150.0]]),
                ln(&[[50.0, 200.0], [60.0, 200.0]]),
            ]),
        ),
        (
            "line line3",
            hook(),
            ln(&[[50.0, 100.0], [50.0, 150.0]]),
            ln(&[[50.0, 150.0], [50.0, 200.0], [60.0, 200.0]]),
        ),
        (
            "line line4",
            hook(),
            ln(&[[50.0, 150.0], [50.0, 200.0]]),
            coll(vec![
                ln(&[[50.0, 100.0], [50.0, 150.0]]),
                ln(&[[50.0, 200.0], [60.0, 200.0]]),
            ]),
        ),
        (
            "line line5",
            ln(&[[50.0, 100.0], [50.0, 200.0]]),
            ln(&[[50.0, 50.0], [50.0, 250.0]]),
            Steric::empty(),
        ),
        (
            "line line6",
            hook(),
            ln(&[[50.0, 50.0], [50.0, 250.0]]),
            ln(&[[50.0, 200.0], [60.0, 200.0]]),
        ),
        (
            "line line7",
            ln(&[[50.0, 100.0], [50.0, 200.0]]),
            ln(&[[30.0, 30.0], [30.0, 150.0]]),
            ln(&[[50.0, 100.0], [50.0, 200.0]]),
        ),
        (
            "line line8",
            hook(),
            ln(&[[30.0, 150.0], [60.0, 150.0]]),
            coll(vec![
                ln(&[[50.0, 100.0], [50.0, 150.0]]),
                ln(&[[50.0, 150.0], [50.0, 200.0], [60.0, 200.0]]),
            ]),
        ),
        (
            "line poly6",
            ln(&[[200.0, 300.0], [500.0, 300.0], [500.0, 600.0], [800.0, 900.0]]),
            poly(&[&[
                [300.0, 300.0],
                [500.0, 300.0],
                [500.0, 500.0],
                [300.0, 500.0],
                [300.0, 300.0],
            ]]),
            coll(vec![
                ln(&[[200.0, 300.0], [300.0, 300.0]]),
                ln(&[[500.0, 500.0], [500.0, 600.0], [800.0, 900.0]]),
            ]),
        ),
    ];
    for (name, a, b, want) in cases {
        assert_close(name, &difference(&a, &b).unwrap(), &want);
    }
    let sq = poly(&[SQ_A]);
    assert_close("poly line", &difference(&sq, &hook()).unwrap(), &sq);
}

#[test]
fn polygon_intersections() {
    let ring5: &[[f64; 2]] = &[
        [9.0, 9.0],
        [9.0, 5.0],
        [10.0, 5.0],
        [10.0, 10.0],
        [5.0, 10.0],
        [5.0, 9.0],
        [9.0, 9.0],
    ];
    let inner: &[[f64; 2]] = &[[5.0, 10.0], [10.0, 10.0], [10.0, 5.0], [5.0, 5.0], [5.0, 10.0]];
    let cases = [
        ("poly poly1", poly(&[CORNER]), poly(&[BIG]), poly(&[CORNER])),
        (
            "poly poly2",
            poly(&[&[
                [105.0, 105.0],
                [105.0, 103.0],
                [103.0, 103.0],
                [103.0, 105.0],
                [105.0, 105.0],
            ]]),
            poly(&[CORNER]),
            Steric::empty(),
        ),
        ("poly poly3", poly(&[SQ_A]), poly(&[SQ_B]), poly(&[inner])),
        ("poly poly3-1", poly(&[SQ_A]), poly(&[SQ_B_CW]), poly(&[inner])),
        (
            "poly poly4",
            poly(&[&[
                [111.30523681640625, 38.117271658305],
                [112.34344482421875, 38.11727165830543],
                [112.34344482421875, 38.89103282648846],
                [111.30523681640625, 38.89103282648846],
                [111.30523681640625, 38.117271658305],
            ]]),
            poly(&[&[
                [111.50848388671875, 37.6359849542696],
                [112.64007568359375, 37.6359849542696],
                [112.64007568359375, 38.35027253825765],
                [111.50848388671875, 38.35027253825765],
                [111.50848388671875, 37.6359849542696],
            ]]),
            poly(&[&[
                [112.34344482421875, 38.35027253825765],
                [112.34344482421875, 38.11727165830543],
                [111.50848388671875, 38.11727165830543],
                [111.50848388671875, 38.35027253825765],
                [112.34344482421875, 38.35027253825765],
            ]]),
        ),
        (
            "poly poly5",
            poly(&[SQ_A, FRAME_HOLE]),
            poly(&[SQ_B]),
            poly(&[ring5]),
        ),
        (
            "poly poly5-1",
            poly(&[SQ_B]),
            poly(&[SQ_A, FRAME_HOLE]),
            poly(&[ring5]),
        ),
        (
            "poly point0",
            poly(&[BIG]),
            pt(100.0, 100.0),
            pt(100.0, 100.0),
        ),
    ];
    for (name, a, b, want) in cases {
        assert_close(name, &intersection(&a, &b).unwrap(), &want);
    }
}

#[test]
fn polygon_unions() {
    let merged: &[[f64; 2]] = &[
        [5.0, 10.0],
        [0.0, 10.0],
        [0.0, 0.0],
        [10.0, 0.0],
        [10.0, 5.0],
        [15.0, 5.0],
        [15.0, 15.0],
        [5.0, 15.0],
        [5.0, 10.0],
    ];
    let merged_hole: &[[f64; 2]] = &[
        [5.0, 9.0],
        [1.0, 9.0],
        [1.0, 1.0],
        [9.0, 1.0],
        [9.0, 5.0],
        [5.0, 5.0],
        [5.0, 9.0],
    ];
    let r = |x0: f64, y0: f64, x1: f64, y1: f64| {
        poly(&[&[[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]])
    };
    let cases = [
        ("poly poly", poly(&[SQ_A]), poly(&[SQ_B]), poly(&[merged])),
        ("poly poly01", poly(&[SQ_A]), poly(&[SQ_B_CW]), poly(&[merged])),
        (
            "poly poly02",
            poly(&[SQ_A, FRAME_HOLE]),
            poly(&[SQ_B]),
            poly(&[merged, merged_hole]),
        ),
        (
            "poly poly03",
            poly(&[SQ_B]),
            poly(&[SQ_A, FRAME_HOLE]),
            poly(&[merged, merged_hole]),
        ),
        ("poly poly1", poly(&[CORNER]), poly(&[BIG]), poly(&[BIG])),
        (
            "poly 1",
            r(1.0, 1.0, 2.0, 2.0),
            r(3.0, 1.0, 5.0, 2.0),
            coll(vec![r(1.0, 1.0, 2.0, 2.0), r(3.0, 1.0, 5.0, 2.0)]),
        ),
        (
            "poly 2",
            r(1.0, 1.0, 2.0, 2.0),
            r(2.0, 1.0, 5.0, 2.0),
            poly(&[&[
                [2.0, 2.0],
                [1.0, 2.0],
                [1.0, 1.0],
                [2.0, 1.0],
                [5.0, 1.0],
                [5.0, 2.0],
                [2.0, 2.0],
            ]]),
        ),
        (
            "poly 3",
            r(1.0, 1.0, 2.0, 2.0),
            r(2.0, 2.0, 5.0, 3.0),
            coll(vec![r(1.0, 1.0, 2.0, 2.0), r(2.0, 2.0, 5.0, 3.0)]),
        ),
        (
            "poly 4",
            r(1.0, 2.0, 3.0, 3.0),
            r(2.0, 1.0, 5.0, 5.0),
            poly(&[&[
                [2.0, 2.0],
                [1.0, 2.0],
                [1.0, 3.0],
                [2.0, 3.0],
                [2.0, 5.0],
                [5.0, 5.0],
                [5.0, 1.0],
                [2.0, 1.0],
                [2.0, 2.0],
            ]]),
        ),
        ("poly 5", r(1.0, 1.0, 5.0, 5.0), r(2.0, 2.0, 3.0, 3.0), r(1.0, 1.0, 5.0, 5.0)),
        ("poly 6", r(1.0, 1.0, 2.0, 2.0), r(1.0, 1.0, 5.0, 3.0), r(1.0, 1.0, 5.0, 3.0)),
        (
            "poly x1",
            poly(&[&[
                [1.0, 1.0],
                [2.0, 1.0],
                [5.0, 1.0],
                [5.0, 2.0],
                [2.0, 2.0],
                [1.0, 2.0],
                [1.0, 1.0],
            ]]),
            r(2.0, 1.0, 5.0, 2.0),
            poly(&[&[
                [1.0, 1.0],
                [2.0, 1.0],
                [5.0, 1.0],
                [5.0, 2.0],
                [2.0, 2.0],
                [1.0, 2.0],
                [1.0, 1.0],
            ]]),
        ),
    ];
    for (name, a, b, want) in cases {
        assert_close(name, &union(&a, &b).unwrap(), &want);
    }
}

#[test]
fn polygon_differences() {
    let cases = [
        ("poly poly1", poly(&[CORNER]), poly(&[BIG]), Steric::empty()),
        (
            "poly poly2",
            poly(&[BIG]),
            poly(&[CORNER]),
            poly(&[&[
                [100.0, 101.0],
                [90.0, 101.0],
                [90.0, 90.0],
                [101.0, 90.0],
                [101.0, 100.0],
                [100.0, 100.0],
                [100.0, 101.0],
            ]]),
        ),
        (
            "poly poly3",
            poly(&[&[[1.0, 1.0], [5.0, 1.0], [5.0, 5.0], [1.0, 5.0], [1.0, 1.0]]]),
            poly(&[&[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 3.0], [2.0, 2.0]]]),
            poly(&[
                &[[1.0, 1.0], [5.0, 1.0], [5.0, 5.0], [1.0, 5.0], [1.0, 1.0]],
                &[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 3.0], [2.0, 2.0]],
            ]),
        ),
        ("disjoint", poly(&[CORNER]), poly(&[SQ_A]), poly(&[CORNER])),
    ];
    for (name, a, b, want) in cases {
        assert_close(name, &difference(&a, &b).unwrap(), &want);
    }
    let outer = poly(&[&[[1.0, 1.0], [5.0, 1.0], [5.0, 5.0], [1.0, 5.0], [1.0, 1.0]]]);
    let inner = poly(&[&[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 3.0], [2.0, 2.0]]]);
    let holed = difference(&outer, &inner).unwrap();
    assert!((holed.area() - 15.0).abs() < TOL);
}

#[test]
fn polygon_sym_differences() {
    let notch: &[[f64; 2]] = &[
        [90.0, 90.0],
        [101.0, 90.0],
        [101.0, 100.0],
        [100.0, 100.0],
        [100.0, 101.0],
        [90.0, 101.0],
        [90.0, 90.0],
    ];
    let got = sym_difference(&poly(&[SQ_A]), &poly(&[SQ_B])).unwrap();
    let want = coll(vec![
        poly(&[&[
            [0.0, 0.0],
            [0.0, 10.0],
            [5.0, 10.0],
            [5.0, 5.0],
            [10.0, 5.0],
            [10.0, 0.0],
            [0.0, 0.0],
        ]]),
        poly(&[&[
            [5.0, 10.0],
            [5.0, 15.0],
            [15.0, 15.0],
            [15.0, 5.0],
            [10.0, 5.0],
            [10.0, 10.0],
            [5.0, 10.0],
        ]]),
    ]);
    assert_close("poly poly", &got, &want);
    assert_close(
        "poly poly0",
        &sym_difference(&poly(&[CORNER]), &poly(&[BIG])).unwrap(),
        &poly(&[notch]),
    );
    assert_close(
        "poly poly1",
        &sym_difference(&poly(&[BIG]), &poly(&[CORNER])).unwrap(),
        &poly(&[notch]),
    );
    let a = poly(&[SQ_A]);
    assert!(sym_difference(&a, &a).unwrap().is_empty());
}

fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Steric {
    poly(&[&[[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]]])
}

fn parts_of(g: &Steric) -> usize {
    g.flatten().len()
}

#[test]
fn holed_frames_meeting_at_a_vertex() {
    let a = poly(&[
        &[[4.0, 1.0], [9.0, 1.0], [9.0, 6.0], [4.0, 6.0], [4.0, 1.0]],
        &[[5.0, 2.0], [5.0, 5.0], [8.0, 5.0], [8.0, 2.0], [5.0, 2.0]],
    ]);
    let b = poly(&[
        &[[1.0, 4.0], [6.0, 4.0], [6.0, 9.0], [1.0, 9.0], [1.0, 4.0]],
        &[[2.0, 5.0], [2.0, 8.0], [5.0, 8.0], [5.0, 5.0], [2.0, 5.0]],
    ]);
    let inter = intersection(&a, &b).unwrap();
    assert_close(
        "intersection",
        &inter,
        &coll(vec![rect(4.0, 4.0, 5.0, 5.0), rect(5.0, 5.0, 6.0, 6.0)]),
    );
    let diff = difference(&a, &b).unwrap();
    assert!((diff.area() - 14.0).abs() < TOL, "{diff:?}");
    assert_eq!(parts_of(&diff), 2);
    assert!((union(&a, &b).unwrap().area() - 30.0).abs() < TOL);
}

#[test]
fn line_along_an_edge_where_a_hole_touches_the_shell() {
    let a = poly(&[
        &[[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
        &[[5.0, 0.0], [3.0, 4.0], [7.0, 4.0], [5.0, 0.0]],
    ]);
    let line = ln(&[[-1.0, 0.0], [11.0, 0.0]]);
    let inter = intersection(&line, &a).unwrap();
    assert!((inter.length() - 10.0).abs() < TOL, "{inter:?}");
    let diff = difference(&line, &a).unwrap();
    assert_close(
        "difference",
        &diff,
        &coll(vec![ln(&[[-1.0, 0.0], [0.0, 0.0]]), ln(&[[10.0, 0.0], [11.0, 0.0]])]),
    );
}

#[test]
fn self_crossing_line_against_a_square() {
    let line = ln(&[[1.0, 2.0], [5.0, 4.0], [5.0, 3.0], [0.0, 3.0]]);
    let sq = rect(0.0, 3.0, 5.0, 8.0);
    let inter = intersection(&line, &sq).unwrap();
    let diff = difference(&line, &sq).unwrap();
    let slant = 5f64.sqrt();
    assert!((inter.length() - (slant + 6.0)).abs() < TOL, "{inter:?}");
    assert!((diff.length() - slant).abs() < TOL, "{diff:?}");
    assert!((inter.length() + diff.length() - line.length()).abs() < TOL);
}

#[test]
fn touching_polygons_intersect_in_their_boundary() {
    let a = poly(&[SQ_A]);
    let beside = rect(10.0, 0.0, 20.0, 10.0);
    let diagonal = rect(10.0, 10.0, 20.0, 20.0);
    assert_close(
        "edge",
        &intersection(&a, &beside).unwrap(),
        &ln(&[[10.0, 0.0], [10.0, 10.0]]),
    );
    assert_close("corner", &intersection(&a, &diagonal).unwrap(), &pt(10.0, 10.0));
    assert_close(
        "edge swapped",
        &intersection(&beside, &a).unwrap(),
        &ln(&[[10.0, 10.0], [10.0, 0.0]]),
    );
    assert_close("difference", &difference(&a, &beside).unwrap(), &a);
    assert!(intersection(&a, &poly(&[FAR])).unwrap().is_empty());
}

/// Geographic squares sharing an edge to within a few 1e-9 degrees.
#[test]
fn near_coincident_geographic_union() {
    let a = poly(&[&[
        [113.58272043315301, 34.737572973722635],
        [113.60467185859878, 34.7375632566498],
        [113.60467414450156, 34.75955780700805],
        [113.58272272415182, 34.75956752361057],
        [113.58272043315301, 34.737572973722635],
    ]]);
    let b = poly(&[&[
        [113.58270814000005, 34.71557888104119],
        [113.58271043000005, 34.73757297104119],
        [113.58271336086447, 34.737580042999575],
        [113.5827204344234, 34.737582969999025],
        [113.6046718644234, 34.737573259999024],
        [113.60467893299956, 34.73757032913553],
        [113.60468185999994, 34.737563258958815],
        [113.60468185999994, 34.737563258958815],
        [113.60467663913391, 34.715562086998816],
        [113.60466956557204, 34.71555916000098],
        [113.58271813557204, 34.71556888000098],
        [113.58271106699881, 34.71557181086609],
        [113.58270814000005, 34.71557888104119],
    ]]);
    let want = poly(&[&[
        [113.60467185963843, 34.73757326000114],
        [113.60467414450156, 34.75955780700805],
        [113.58272272415182, 34.75956752361057],
        [113.58272043419424, 34.7375829699042],
        [113.58271336086447, 34.737580042999575],
        [113.58271043000005, 34.73757297104119],
        [113.58270814000005, 34.71557888104119],
        [113.58271106699881, 34.71557181086609],
        [113.58271813557204, 34.71556888000098],
        [113.60466956557204, 34.71555916000098],
        [113.60467663913391, 34.715562086998816],
        [113.60468185999994, 34.737563258958815],
        [113.60467893299956, 34.73757032913553],
        [113.6046718644234, 34.737573259999024],
        [113.60467185963843, 34.73757326000114],
    ]]);
    // One crossing lies 2.5e-10 from a vertex of B, inside the default
    // equality tolerance, so this pair needs a finer one.
    let cfg = GeomCfg {
        eps_equal: 1e-12,
        eps_link: 4e-12,
        ..GeomCfg::default()
    };
    assert_close("poly g1", &union_with_cfg(&a, &b, cfg).unwrap(), &want);
}

#[test]
fn union_is_idempotent() {
    let shapes = [
        pt(1.0, 2.0),
        ln(&[[0.0, 0.0], [1.0, 1.0], [2.0, 0.0]]),
        poly(&[SQ_A, FRAME_HOLE]),
    ];
    for g in &shapes {
        assert_close("self", &union(g, g).unwrap(), g);
        assert_close("self", &intersection(g, g).unwrap(), g);
    }
}

#[test]
fn covered_operand_is_absorbed() {
    let a = poly(&[SQ_A]);
    let inside = [
        poly(&[&[[2.0, 2.0], [4.0, 2.0], [4.0, 4.0], [2.0, 4.0], [2.0, 2.0]]]),
        poly(&[&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]]),
        ln(&[[1.0, 1.0], [9.0, 9.0]]),
        ln(&[[0.0, 0.0], [10.0, 0.0]]),
        pt(5.0, 5.0),
    ];
    for b in &inside {
        assert!(crate::relate::relate(&a, b).unwrap().is_covers());
        assert_close("covered", &union(&a, b).unwrap(), &a);
    }
}

#[test]
fn empty_operands() {
    let a = poly(&[SQ_A]);
    let none = Steric::empty();
    assert_close("union", &union(&a, &none).unwrap(), &a);
    assert_close("union", &union(&none, &a).unwrap(), &a);
    assert!(intersection(&a, &none).unwrap().is_empty());
    assert!(intersection(&none, &a).unwrap().is_empty());
    assert_close("difference", &difference(&a, &none).unwrap(), &a);
    assert!(difference(&none, &a).unwrap().is_empty());
    assert_close("sym", &sym_difference(&none, &a).unwrap(), &a);
}

#[test]
fn collections_reduce_part_by_part() {
    let a = poly(&[SQ_A]);
    let far = poly(&[CORNER]);
    let b = poly(&[SQ_B]);
    let got = union(&coll(vec![a.clone(), far.clone()]), &b).unwrap();
    let merged = union(&a, &b).unwrap();
    assert_close("union", &got, &coll(vec![far.clone(), merged]));

    let got = intersection(&coll(vec![a.clone(), far.clone()]), &b).unwrap();
    assert_close("intersection", &got, &intersection(&a, &b).unwrap());

    let got = difference(&coll(vec![a.clone(), far.clone()]), &b).unwrap();
    assert_close(
        "difference",
        &got,
        &coll(vec![difference(&a, &b).unwrap(), far.clone()]),
    );

    let nested = coll(vec![coll(vec![a.clone()]), far.clone()]);
    assert_close("nested", &union(&nested, &Steric::empty()).unwrap(), &nested);
}

#[test]
fn unary_union_halves() {
    let r = |x0: f64| poly(&[&[[x0, 0.0], [x0 + 2.0, 0.0], [x0 + 2.0, 1.0], [x0, 1.0], [x0, 0.0]]]);
    let g = coll(vec![r(0.0), r(1.0), r(10.0)]);
    let got = unary_union(&g).unwrap();
    let Steric::Collection(parts) = &got else {
        panic!("expected two parts, got {got:?}");
    };
    assert_eq!(parts.len(), 2);
    assert!((got.area() - 5.0).abs() < TOL);
    assert_close("single", &unary_union(&coll(vec![r(0.0)])).unwrap(), &r(0.0));
    assert!(unary_union(&coll(vec![])).unwrap().is_empty());
    assert!(matches!(unary_union(&r(0.0)), Err(Error::UnknownType { .. })));
}

#[test]
fn line_merge_joins_shared_endpoints() {
    let g = coll(vec![
        ln(&[[0.0, 0.0], [1.0, 0.0]]),
        ln(&[[2.0, 0.0], [1.0, 0.0]]),
        ln(&[[5.0, 5.0], [6.0, 6.0]]),
    ]);
    assert_close(
        "merge",
        &line_merge(&g).unwrap(),
        &coll(vec![
            ln(&[[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]),
            ln(&[[5.0, 5.0], [6.0, 6.0]]),
        ]),
    );
    let mixed = coll(vec![ln(&[[0.0, 0.0], [1.0, 0.0]]), pt(3.0, 3.0)]);
    assert_eq!(
        line_merge(&mixed),
        Err(Error::NotMatchType {
            op: "line_merge",
            a: Shape::Point,
            b: Shape::Line
        })
    );
}

#[test]
fn overlay_dispatches_every_op() {
    let a = poly(&[SQ_A]);
    let b = poly(&[SQ_B]);
    let cfg = GeomCfg::default();
    for op in OverlayOp::ALL {
        let direct = match op {
            OverlayOp::Union => union_with_cfg(&a, &b, cfg),
            OverlayOp::Intersection => intersection_with_cfg(&a, &b, cfg),
            OverlayOp::Difference => difference_with_cfg(&a, &b, cfg),
            OverlayOp::SymDifference => sym_difference_with_cfg(&a, &b, cfg),
        }
        .unwrap();
        assert_close(op.name(), &overlay(&a, &b, op, cfg).unwrap(), &direct);
    }
    assert_eq!(OverlayOp::SymDifference.to_string(), "sym_difference");
}

#[test]
fn clip_exposes_graph_and_matrix() {
    let clip = Clip::new(&poly(&[SQ_A]), &poly(&[SQ_B]), GeomCfg::default()).unwrap();
    assert_eq!(clip.matrix().to_string(), "212101212");
    assert_eq!(clip.shared_points().len(), 2);
    // Two fragments per ring.
    assert_eq!(clip.pieces(|_| true).len(), 4);
    assert_eq!(clip.topology().chains.len(), 2);
    assert_close("sym", &clip.sym_difference().unwrap(), &sym_difference(clip.a(), clip.b()).unwrap());
}

#[test]
fn overlay_errors() {
    let a = poly(&[SQ_A]);
    assert!(matches!(
        Clip::new(&coll(vec![a.clone()]), &a, GeomCfg::default()),
        Err(Error::NotSupportCollection { .. })
    ));
    let bad = Steric::Polygon(vec![vec![Coord::new(0.0, 0.0), Coord::new(1.0, 0.0)]]);
    assert!(matches!(union(&bad, &a), Err(Error::InvalidGeometry { .. })));
    assert!(matches!(
        intersection(&a, &Steric::Line(vec![])),
        Err(Error::InvalidGeometry { .. })
    ));
}

/// Integer square of side `size` at `(x, y)`; with a hole, a frame one unit
/// wide whose hole runs clockwise.
fn frame(x: i32, y: i32, size: i32, holed: bool) -> Steric {
    let (x0, y0, x1, y1) = (x as f64, y as f64, (x + size) as f64, (y + size) as f64);
    let shell: &[[f64; 2]] = &[[x0, y0], [x1, y0], [x1, y1], [x0, y1], [x0, y0]];
    if !holed {
        return poly(&[shell]);
    }
    let (i0, j0, i1, j1) = (x0 + 1.0, y0 + 1.0, x1 - 1.0, y1 - 1.0);
    poly(&[shell, &[[i0, j0], [i0, j1], [i1, j1], [i1, j0], [i0, j0]]])
}

fn radial(seed: u64, index: u64, cx: f64, cy: f64) -> Steric {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Uniform { min: 5, max: 10 },
        center: Coord::new(cx, cy),
        ..RadialCfg::default()
    };
    draw_polygon_radial(cfg, ReplayToken { seed, index })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn difference_and_intersection_partition_a(
        seed in any::<u64>(),
        dx in -1.5f64..1.5,
        dy in -1.5f64..1.5,
    ) {
        let a = radial(seed, 0, 0.0, 0.0);
        let b = radial(seed, 1, dx, dy);
        let diff = difference(&a, &b).unwrap();
        let inter = intersection(&a, &b).unwrap();
        let total = a.area();
        prop_assert!((diff.area() + inter.area() - total).abs() <= 1e-7 * total.max(1.0));
        let joined = union(&a, &b).unwrap();
        prop_assert!((joined.area() - (total + b.area() - inter.area())).abs() <= 1e-7 * total.max(1.0));
    }

    #[test]
    fn grid_frames_keep_area_additive(
        sa in 3i32..7,
        sb in 3i32..7,
        dx in -7i32..8,
        dy in -7i32..8,
        holed_a in any::<bool>(),
        holed_b in any::<bool>(),
    ) {
        let a = frame(0, 0, sa, holed_a);
        let b = frame(dx, dy, sb, holed_b);
        let diff = difference(&a, &b).unwrap();
        let inter = intersection(&a, &b).unwrap();
        prop_assert!((diff.area() + inter.area() - a.area()).abs() <= 1e-9, "{:?} {:?}", diff, inter);
        let joined = union(&a, &b).unwrap();
        prop_assert!((joined.area() - (a.area() + b.area() - inter.area())).abs() <= 1e-9);
    }
}
