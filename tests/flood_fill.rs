use snapdoodle::{BoundaryMap, FillOutcome, FloodFill, Pixel, PixelBuffer, Rgb};

const BLUE: Rgb = Rgb::new(0, 0, 255);

// White 100x100 page with a one-pixel black square outline from (20,20) to (80,80)
fn square_outline() -> BoundaryMap {
    let mut layer = PixelBuffer::filled(100, 100, Pixel::WHITE);
    for i in 20..=80 {
        for (x, y) in [(i, 20), (i, 80), (20, i), (80, i)] {
            layer.set(x, y, Pixel::BLACK).unwrap();
        }
    }
    BoundaryMap::with_default_threshold(layer)
}

fn is_interior(x: u32, y: u32) -> bool {
    (21..80).contains(&x) && (21..80).contains(&y)
}

#[test]
fn test_fills_exactly_the_enclosed_square() {
    let boundary = square_outline();
    let mut paint = PixelBuffer::new(100, 100);

    let outcome = FloodFill::default()
        .fill(&mut paint, &boundary, 50, 50, Some(BLUE))
        .unwrap();
    assert_eq!(outcome, FillOutcome::Filled { pixels: 59 * 59 });

    for y in 0..100 {
        for x in 0..100 {
            let expected = if is_interior(x, y) {
                BLUE.opaque()
            } else {
                Pixel::TRANSPARENT
            };
            assert_eq!(paint.get(x, y).unwrap(), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn test_containment_does_not_depend_on_the_seed() {
    let boundary = square_outline();
    let mut reference = PixelBuffer::new(100, 100);
    FloodFill::default()
        .fill(&mut reference, &boundary, 50, 50, Some(BLUE))
        .unwrap();

    for (x, y) in [(21, 21), (79, 79), (21, 79), (60, 33)] {
        let mut paint = PixelBuffer::new(100, 100);
        FloodFill::default()
            .fill(&mut paint, &boundary, x, y, Some(BLUE))
            .unwrap();
        assert_eq!(paint, reference, "seed ({x}, {y})");
    }
}

#[test]
fn test_outside_fill_stops_at_the_outline() {
    let boundary = square_outline();
    let mut paint = PixelBuffer::new(100, 100);
    let outcome = FloodFill::default()
        .fill(&mut paint, &boundary, 5, 5, Some(BLUE))
        .unwrap();

    // Everything except the outline (4 * 60 pixels) and its interior.
    assert_eq!(outcome, FillOutcome::Filled { pixels: 100 * 100 - 61 * 61 });
    assert_eq!(paint.get(50, 50).unwrap(), Pixel::TRANSPARENT);
    assert_eq!(paint.get(20, 50).unwrap(), Pixel::TRANSPARENT);
    assert_eq!(paint.get(19, 50).unwrap(), BLUE.opaque());
}

#[test]
fn test_refill_with_same_color_is_idempotent() {
    let boundary = square_outline();
    let mut paint = PixelBuffer::new(100, 100);
    let fill = FloodFill::default();

    fill.fill(&mut paint, &boundary, 50, 50, Some(BLUE)).unwrap();
    let after_first = paint.clone();

    let outcome = fill.fill(&mut paint, &boundary, 30, 70, Some(BLUE)).unwrap();
    assert_eq!(outcome, FillOutcome::AlreadyFilled);
    assert_eq!(paint, after_first);
}

#[test]
fn test_refill_with_new_color_replaces_region() {
    let boundary = square_outline();
    let mut paint = PixelBuffer::new(100, 100);
    let fill = FloodFill::default();
    let green = Rgb::new(0, 255, 0);

    fill.fill(&mut paint, &boundary, 50, 50, Some(BLUE)).unwrap();
    let outcome = fill.fill(&mut paint, &boundary, 50, 50, Some(green)).unwrap();
    assert_eq!(outcome, FillOutcome::Filled { pixels: 59 * 59 });
    assert_eq!(paint.get(21, 21).unwrap(), green.opaque());
    assert_eq!(paint.get(10, 10).unwrap(), Pixel::TRANSPARENT);
}

#[test]
fn test_click_on_ink_changes_nothing() {
    let boundary = square_outline();
    let mut paint = PixelBuffer::new(100, 100);

    for (x, y) in [(20, 20), (50, 80), (80, 33)] {
        let outcome = FloodFill::default()
            .fill(&mut paint, &boundary, x, y, Some(BLUE))
            .unwrap();
        assert_eq!(outcome, FillOutcome::OnBoundary);
    }
    assert!(paint.is_transparent());
}

#[test]
fn test_tolerance_is_configurable() {
    let boundary = square_outline();
    let mut paint = PixelBuffer::new(100, 100);
    paint.set(50, 50, Pixel::rgba(0, 0, 240, 255)).unwrap();

    let strict = FloodFill::new(0);
    assert!(strict.fill(&mut paint, &boundary, 50, 50, Some(BLUE)).unwrap().changed());

    paint.set(50, 50, Pixel::rgba(0, 0, 240, 255)).unwrap();
    let loose = FloodFill::new(20);
    assert_eq!(
        loose.fill(&mut paint, &boundary, 50, 50, Some(BLUE)).unwrap(),
        FillOutcome::AlreadyFilled
    );
}

#[test]
fn test_anti_aliased_gray_edges_stay_fillable() {
    // A light gray ring (luminance 245) is not ink at the default threshold.
    let mut layer = PixelBuffer::filled(10, 10, Pixel::WHITE);
    for i in 0..10 {
        layer.set(i, 5, Pixel::rgba(245, 245, 245, 255)).unwrap();
    }
    let mut paint = PixelBuffer::new(10, 10);
    let outcome = FloodFill::default()
        .fill(&mut paint, &BoundaryMap::with_default_threshold(layer.clone()), 0, 0, Some(BLUE))
        .unwrap();
    assert_eq!(outcome, FillOutcome::Filled { pixels: 100 });

    // With a stricter threshold the same ring splits the canvas in two.
    let mut paint = PixelBuffer::new(10, 10);
    let outcome = FloodFill::default()
        .fill(&mut paint, &BoundaryMap::new(layer, 250.0), 0, 0, Some(BLUE))
        .unwrap();
    assert_eq!(outcome, FillOutcome::Filled { pixels: 50 });
}
