use h5mark_core::{Dataset, Error, Mark, MarkCollection, Rgba, Session, SpanSelection};

fn xy(xs: &[f64]) -> Dataset {
    let rows: Vec<Vec<f64>> = xs.iter().map(|&x| vec![x, x * x]).collect();
    Dataset::from_rows(vec!["x".to_string(), "x^2".to_string()], &rows).unwrap()
}

fn assert_pairwise_disjoint(marks: &MarkCollection) {
    for (i, a) in marks.iter().enumerate() {
        for b in marks.iter().skip(i + 1) {
            assert!(!a.overlaps(b), "{a} overlaps {b}");
        }
    }
}

#[test]
fn test_overlapping_add_is_rejected() {
    let mut marks = MarkCollection::new();
    marks.add(Mark::new(1.0, 3.0, Rgba::RED).unwrap()).unwrap();

    let err = marks
        .add(Mark::new(2.0, 4.0, Rgba::BLUE).unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::Collision { existing: 0, .. }));
    assert_eq!(marks.len(), 1);
}

#[test]
fn test_touching_marks_are_accepted() {
    let mut marks = MarkCollection::new();
    marks.add(Mark::new(1.0, 2.0, Rgba::RED).unwrap()).unwrap();
    marks.add(Mark::new(2.0, 3.0, Rgba::BLUE).unwrap()).unwrap();
    assert_eq!(marks.len(), 2);
}

#[test]
fn test_reversed_bounds_never_reach_the_collection() {
    let err = Mark::new(3.0, 1.0, Rgba::RED).unwrap_err();
    assert_eq!(err, Error::InvalidBounds { xmin: 3.0, xmax: 1.0 });
}

#[test]
fn test_delete_shifts_later_marks() {
    let spans = [(0.0, 1.0), (2.0, 3.0), (4.0, 5.0), (6.0, 7.0)];
    let mut marks = MarkCollection::new();
    for (xmin, xmax) in spans {
        marks.add(Mark::new(xmin, xmax, Rgba::GRAY).unwrap()).unwrap();
    }

    let removed = marks.delete(1).unwrap();
    assert_eq!((removed.xmin(), removed.xmax()), (2.0, 3.0));
    let remaining: Vec<(f64, f64)> = marks.iter().map(|m| (m.xmin(), m.xmax())).collect();
    assert_eq!(remaining, vec![(0.0, 1.0), (4.0, 5.0), (6.0, 7.0)]);
    assert!(matches!(marks.delete(3), Err(Error::IndexOutOfRange { index: 3, len: 3 })));
}

#[test]
fn test_random_sequence_keeps_marks_disjoint() {
    // Deterministic pseudo-random walk over adds and deletes.
    let mut marks = MarkCollection::new();
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..500 {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let start = f64::from(seed % 100);
        let width = f64::from((seed >> 8) % 7);
        if seed % 5 == 0 && !marks.is_empty() {
            let index = (seed >> 16) as usize % marks.len();
            marks.delete(index).unwrap();
        } else {
            let before = marks.clone();
            let mark = Mark::new(start, start + width, Rgba::RED).unwrap();
            if marks.add(mark).is_err() {
                assert_eq!(marks, before);
            }
        }
        assert_pairwise_disjoint(&marks);
    }
}

#[test]
fn test_drag_edit_commit_flow() {
    let mut session = Session::default();
    session.load_dataset(xy(&[0.0, 1.0, 2.0, 3.0, 4.0]));

    let mut selection = SpanSelection::new();
    selection.begin(3.2);
    selection.update(0.8);
    assert_eq!(selection.release(), Some((0.8, 3.2)));

    let tentative = selection.propose(Rgba::ORANGE, session.marks()).unwrap();
    let edited = tentative.with_bounds(1.0, 2.0).unwrap().with_color(Rgba::CYAN);
    session.commit_selection(&mut selection, edited).unwrap();

    let highlighted: Vec<Option<Rgba>> = session
        .index()
        .iter()
        .map(|m| m.map(Mark::color))
        .collect();
    assert_eq!(
        highlighted,
        vec![None, Some(Rgba::CYAN), Some(Rgba::CYAN), None, None]
    );

    session.delete_mark(0).unwrap();
    assert_eq!(session.index().marked_count(), 0);
}

#[test]
fn test_reload_clears_highlighting() {
    let mut session = Session::default();
    session.load_dataset(xy(&[1.0, 2.0]));
    session
        .add_mark(Mark::new(0.0, 5.0, Rgba::RED).unwrap())
        .unwrap();
    assert_eq!(session.index().marked_count(), 2);

    session.load_dataset(xy(&[1.0, 2.0]));
    assert!(session.marks().is_empty());
    assert!(session.index().iter().all(|m| m.is_none()));
}
