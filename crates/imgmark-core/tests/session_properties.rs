//! End-to-end behaviour of drawing sessions driven through the controller.

use image::{Rgba, RgbaImage};
use imgmark_core::{
    Canvas, KeyEvent, MemoryCodec, PixelPoint, PointerEvent, SaveError, SessionController,
    SessionOutcome, SessionStatus, Shape, ToolKind,
};
use imgmark_core::shapes::{Circle, Line};
use proptest::prelude::*;
use tempfile::tempdir;

const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);

fn checkerboard() -> RgbaImage {
    RgbaImage::from_fn(128, 128, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgba([200, 200, 200, 255])
        } else {
            Rgba([40, 40, 40, 255])
        }
    })
}

fn controller() -> SessionController {
    SessionController::new(Canvas::from_image(checkerboard()))
}

fn p(x: i32, y: i32) -> PixelPoint {
    PixelPoint::new(x, y)
}

fn drag(ctl: &mut SessionController, tool: ToolKind, from: PixelPoint, to: PixelPoint) {
    ctl.begin(tool).unwrap();
    ctl.handle_pointer(PointerEvent::Down(from));
    ctl.handle_pointer(PointerEvent::Move(to));
    ctl.handle_pointer(PointerEvent::Up(to));
}

#[test]
fn rectangle_commits_stroke_between_corners() {
    let mut ctl = controller();
    drag(&mut ctl, ToolKind::Rectangle, p(10, 10), p(50, 40));
    assert!(matches!(
        ctl.handle_key(KeyEvent::Confirm),
        Some(SessionOutcome::Committed(Shape::Rectangle(_)))
    ));

    let committed = ctl.canvas().committed();
    for (x, y) in [(10, 10), (50, 40), (10, 40), (50, 10), (30, 10), (50, 25)] {
        assert_eq!(*committed.get_pixel(x, y), GREEN, "no stroke at ({x}, {y})");
    }
    assert_eq!(committed.get_pixel(30, 25), checkerboard().get_pixel(30, 25));
}

#[test]
fn rectangle_is_independent_of_corner_order() {
    let mut forward = controller();
    drag(&mut forward, ToolKind::Rectangle, p(10, 10), p(50, 40));
    forward.handle_key(KeyEvent::Confirm);

    let mut backward = controller();
    drag(&mut backward, ToolKind::Rectangle, p(50, 40), p(10, 10));
    backward.handle_key(KeyEvent::Confirm);

    assert_eq!(forward.canvas().committed(), backward.canvas().committed());
}

#[test]
fn rectangle_release_without_move_uses_release_point() {
    let mut ctl = controller();
    ctl.begin(ToolKind::Rectangle).unwrap();
    ctl.handle_pointer(PointerEvent::Down(p(10, 10)));
    ctl.handle_pointer(PointerEvent::Up(p(50, 40)));
    ctl.handle_key(KeyEvent::Confirm);

    assert_eq!(*ctl.canvas().committed().get_pixel(50, 40), GREEN);
}

#[test]
fn line_commits_segment_between_clicks() {
    let mut ctl = controller();
    ctl.begin(ToolKind::Line).unwrap();
    ctl.handle_pointer(PointerEvent::Down(p(0, 0)));
    ctl.handle_pointer(PointerEvent::Up(p(0, 0)));
    ctl.handle_pointer(PointerEvent::Down(p(100, 100)));

    let outcome = ctl.handle_key(KeyEvent::Confirm);
    assert_eq!(
        outcome,
        Some(SessionOutcome::Committed(Shape::Line(Line::new(p(0, 0), p(100, 100)))))
    );

    let committed = ctl.canvas().committed();
    for i in [0, 25, 50, 75, 100] {
        assert_eq!(*committed.get_pixel(i, i), GREEN);
    }
    assert_eq!(committed.get_pixel(100, 10), checkerboard().get_pixel(100, 10));
}

#[test]
fn line_cancel_after_one_point_leaves_committed() {
    let mut ctl = controller();
    ctl.begin(ToolKind::Line).unwrap();
    ctl.handle_pointer(PointerEvent::Down(p(30, 30)));
    assert_ne!(ctl.canvas().preview(), ctl.canvas().committed());

    assert_eq!(ctl.handle_key(KeyEvent::Confirm), None);
    assert_eq!(ctl.handle_key(KeyEvent::Cancel), Some(SessionOutcome::Cancelled));
    assert_eq!(ctl.canvas().committed(), &checkerboard());
    // The marker never reaches the committed image.
    assert_eq!(ctl.canvas().preview(), &checkerboard());
}

#[test]
fn circle_commits_with_dragged_radius() {
    let mut ctl = controller();
    drag(&mut ctl, ToolKind::Circle, p(20, 20), p(20, 25));

    let outcome = ctl.handle_key(KeyEvent::Confirm);
    assert_eq!(
        outcome,
        Some(SessionOutcome::Committed(Shape::Circle(Circle::new(p(20, 20), 5))))
    );
    let committed = ctl.canvas().committed();
    assert_eq!(*committed.get_pixel(25, 20), GREEN);
    assert_eq!(*committed.get_pixel(20, 15), GREEN);
    assert_eq!(committed.get_pixel(20, 20), checkerboard().get_pixel(20, 20));
}

#[test]
fn zero_radius_circle_waits_for_a_real_radius() {
    let mut ctl = controller();
    drag(&mut ctl, ToolKind::Circle, p(20, 20), p(20, 20));

    for _ in 0..3 {
        assert_eq!(ctl.handle_key(KeyEvent::Confirm), None);
    }
    assert_eq!(
        ctl.session().map(|s| s.status()),
        Some(SessionStatus::AwaitingConfirm)
    );
    assert_eq!(ctl.canvas().committed(), &checkerboard());

    ctl.handle_pointer(PointerEvent::Down(p(20, 20)));
    ctl.handle_pointer(PointerEvent::Up(p(23, 24)));
    assert!(matches!(
        ctl.handle_key(KeyEvent::Confirm),
        Some(SessionOutcome::Committed(Shape::Circle(Circle { radius: 5, .. })))
    ));
}

#[test]
fn reset_is_idempotent_after_commits() {
    let mut ctl = controller();
    drag(&mut ctl, ToolKind::Rectangle, p(5, 5), p(60, 60));
    ctl.handle_key(KeyEvent::Confirm);
    drag(&mut ctl, ToolKind::Circle, p(64, 64), p(64, 90));
    ctl.handle_key(KeyEvent::Confirm);
    assert_ne!(ctl.canvas().committed(), ctl.canvas().original());

    ctl.reset();
    assert_eq!(ctl.canvas().committed(), &checkerboard());
    ctl.reset();
    assert_eq!(ctl.canvas().committed(), &checkerboard());
    assert_eq!(ctl.canvas().original(), &checkerboard());
}

#[test]
fn blank_filename_never_reaches_codec() {
    let codec = MemoryCodec::new();
    let mut ctl = controller();
    drag(&mut ctl, ToolKind::Rectangle, p(10, 10), p(20, 20));
    ctl.handle_key(KeyEvent::Confirm);

    for name in ["", "   ", "\t", " \n "] {
        assert!(matches!(ctl.save_with(&codec, name), Err(SaveError::EmptyFilename)));
    }
    assert!(codec.is_empty());

    ctl.save_with(&codec, "kept.png").unwrap();
    assert_eq!(codec.len(), 1);
}

#[test]
fn extreme_coordinates_do_not_panic() {
    let mut ctl = controller();
    drag(&mut ctl, ToolKind::Circle, p(i32::MIN, 0), p(i32::MAX, 0));
    assert_eq!(
        ctl.handle_key(KeyEvent::Confirm),
        Some(SessionOutcome::Committed(Shape::Circle(Circle::new(
            p(i32::MIN, 0),
            u32::MAX
        ))))
    );

    drag(&mut ctl, ToolKind::Rectangle, p(i32::MIN, i32::MIN), p(i32::MAX, i32::MAX));
    assert!(matches!(
        ctl.handle_key(KeyEvent::Confirm),
        Some(SessionOutcome::Committed(Shape::Rectangle(_)))
    ));

    ctl.begin(ToolKind::Line).unwrap();
    ctl.handle_pointer(PointerEvent::Down(p(i32::MAX, i32::MIN)));
    ctl.handle_pointer(PointerEvent::Down(p(i32::MIN, i32::MAX)));
    assert!(matches!(
        ctl.handle_key(KeyEvent::Confirm),
        Some(SessionOutcome::Committed(Shape::Line(_)))
    ));

    assert_eq!(ctl.canvas().original(), &checkerboard());
    assert_eq!(ctl.canvas().committed().dimensions(), (128, 128));
}

#[test]
fn saved_file_matches_committed() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("annotated.png");
    let mut ctl = controller();
    drag(&mut ctl, ToolKind::Rectangle, p(10, 10), p(20, 20));
    ctl.handle_key(KeyEvent::Confirm);

    ctl.save(&path).unwrap();
    let reloaded = Canvas::load(&path).unwrap();
    assert_eq!(reloaded.original(), ctl.canvas().committed());
}

#[derive(Debug, Clone)]
enum Step {
    Pointer(PointerEvent),
    Confirm,
}

fn arb_point() -> impl Strategy<Value = PixelPoint> {
    (-10i32..140, -10i32..140).prop_map(|(x, y)| PixelPoint::new(x, y))
}

fn arb_pointer() -> impl Strategy<Value = PointerEvent> {
    prop_oneof![
        arb_point().prop_map(PointerEvent::Down),
        arb_point().prop_map(PointerEvent::Move),
        arb_point().prop_map(PointerEvent::Up),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => arb_pointer().prop_map(Step::Pointer),
        1 => Just(Step::Confirm),
    ]
}

fn arb_tool() -> impl Strategy<Value = ToolKind> {
    prop_oneof![
        Just(ToolKind::Rectangle),
        Just(ToolKind::Line),
        Just(ToolKind::Circle),
    ]
}

proptest! {
    #[test]
    fn prop_cancelled_session_leaves_committed(
        tool in arb_tool(),
        pointer in prop::collection::vec(arb_pointer(), 0..12),
    ) {
        let mut ctl = controller();
        drag(&mut ctl, ToolKind::Rectangle, p(3, 3), p(40, 40));
        ctl.handle_key(KeyEvent::Confirm);
        let before = ctl.canvas().committed().clone();

        ctl.begin(tool).unwrap();
        for event in pointer {
            ctl.handle_pointer(event);
        }
        prop_assert_eq!(ctl.cancel(), Some(SessionOutcome::Cancelled));
        prop_assert_eq!(ctl.canvas().committed(), &before);
        prop_assert!(ctl.is_idle());
    }

    #[test]
    fn prop_commit_publishes_preview(
        tool in arb_tool(),
        steps in prop::collection::vec(arb_step(), 0..16),
    ) {
        let mut ctl = controller();
        let before = ctl.canvas().committed().clone();
        ctl.begin(tool).unwrap();

        let mut committed = false;
        for step in steps {
            match step {
                Step::Pointer(event) => {
                    ctl.handle_pointer(event);
                }
                Step::Confirm => {
                    let preview = ctl.canvas().preview().clone();
                    if let Some(outcome) = ctl.handle_key(KeyEvent::Confirm) {
                        prop_assert!(matches!(outcome, SessionOutcome::Committed(_)));
                        prop_assert_eq!(ctl.canvas().committed(), &preview);
                        committed = true;
                        break;
                    }
                    prop_assert_eq!(ctl.canvas().committed(), &before);
                }
            }
        }

        prop_assert_eq!(ctl.canvas().original(), &checkerboard());
        if !committed {
            prop_assert_eq!(ctl.canvas().committed(), &before);
        }
    }

    #[test]
    fn prop_preview_and_committed_keep_dimensions(
        tool in arb_tool(),
        pointer in prop::collection::vec(arb_pointer(), 0..12),
    ) {
        let mut ctl = controller();
        ctl.begin(tool).unwrap();
        for event in pointer {
            ctl.handle_pointer(event);
            prop_assert_eq!(ctl.canvas().preview().dimensions(), ctl.canvas().committed().dimensions());
        }
    }
}
