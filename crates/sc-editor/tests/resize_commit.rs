//! The capture → revert → commit protocol across the resize-kind
//! gestures: previews never leak into the history, no-delta gestures
//! push nothing, and undo/redo round-trips land exactly on the captured
//! values.

use kurbo::Rect;
use pretty_assertions::assert_eq;
use sc_core::geometry::CardinalPoint;
use sc_core::{
    NodeId, NodeKind, Orientation, PropertyId, PropertyValue, SceneGraph, SceneNode, Track,
    Viewport,
};
use sc_editor::commands::CommandStack;
use sc_editor::document::Document;
use sc_editor::gesture::divider::AdjustDividerGesture;
use sc_editor::gesture::resize::ResizeGesture;
use sc_editor::gesture::tracks::ResizeColumnGesture;
use sc_editor::gesture::{EditContext, GestureObserver, GestureOutcome};
use sc_editor::input::{InputEvent, Key, Modifiers, PointerEvent};
use sc_editor::selection::Selection;
use sc_editor::InputSurface;
use std::cell::RefCell;
use std::rc::Rc;

struct Recorder(Rc<RefCell<Vec<GestureOutcome>>>);

impl GestureObserver for Recorder {
    fn gesture_did_terminate(&mut self, outcome: GestureOutcome) {
        self.0.borrow_mut().push(outcome);
    }
}

fn doc() -> Document {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut g = SceneGraph::new();
    let split = g.add_node(
        g.root,
        SceneNode::at(
            NodeId::intern("rc_split"),
            NodeKind::Split {
                orientation: Orientation::Horizontal,
                width: 200.0,
                height: 100.0,
                dividers: vec![0.5],
            },
            0.0,
            200.0,
        ),
    );
    g.add_node(split, SceneNode::new(NodeId::intern("rc_l"), NodeKind::Group));
    g.add_node(split, SceneNode::new(NodeId::intern("rc_r"), NodeKind::Group));
    g.add_node(
        g.root,
        SceneNode::at(
            NodeId::intern("rc_box"),
            NodeKind::Rect {
                width: 100.0,
                height: 50.0,
            },
            10.0,
            10.0,
        ),
    );
    g.add_node(
        g.root,
        SceneNode::at(
            NodeId::intern("rc_grid"),
            NodeKind::Grid {
                columns: vec![Track::bounded(100.0, 40.0, 160.0), Track::fixed(80.0)],
                rows: vec![Track::fixed(50.0)],
            },
            400.0,
            10.0,
        ),
    );
    Document::new(g, Viewport::default())
}

fn press(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerPressed(PointerEvent::new(x, y))
}

fn moved(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerMoved(PointerEvent::new(x, y))
}

fn released(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerReleased(PointerEvent::new(x, y))
}

fn escape() -> InputEvent {
    InputEvent::KeyPressed {
        key: Key::Escape,
        modifiers: Modifiers::NONE,
    }
}

fn dividers(doc: &Document) -> Vec<f64> {
    doc.property(NodeId::intern("rc_split"), PropertyId::Dividers)
        .unwrap()
        .as_floats()
        .unwrap()
        .to_vec()
}

#[test]
fn divider_half_to_seventy_percent() {
    let mut doc = doc();
    let mut selection = Selection::new();
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };

    // Split spans x in [0, 200] at y in [200, 300]
    let gesture = AdjustDividerGesture::new(ctx.doc, NodeId::intern("rc_split"), 0).unwrap();
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut surface = InputSurface::new();
    surface
        .begin(
            &mut ctx,
            &press(100.0, 250.0),
            Box::new(gesture),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    surface.dispatch(&mut ctx, &moved(140.0, 250.0)).unwrap();
    surface.dispatch(&mut ctx, &released(140.0, 250.0)).unwrap();

    assert_eq!(dividers(ctx.doc), vec![0.7]);
    assert_eq!(*outcomes.borrow(), vec![GestureOutcome::Completed]);

    // One undoable step, round-trippable
    assert_eq!(ctx.history.undo(ctx.doc).unwrap().as_deref(), Some("Adjust Divider"));
    assert_eq!(dividers(ctx.doc), vec![0.5]);
    ctx.history.redo(ctx.doc).unwrap();
    assert_eq!(dividers(ctx.doc), vec![0.7]);
}

#[test]
fn divider_released_in_place_pushes_nothing() {
    let mut doc = doc();
    let mut selection = Selection::new();
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };

    let gesture = AdjustDividerGesture::new(ctx.doc, NodeId::intern("rc_split"), 0).unwrap();
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut surface = InputSurface::new();
    surface
        .begin(
            &mut ctx,
            &press(100.0, 250.0),
            Box::new(gesture),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    // Wander and come back to the starting fraction
    surface.dispatch(&mut ctx, &moved(140.0, 250.0)).unwrap();
    surface.dispatch(&mut ctx, &moved(100.0, 250.0)).unwrap();
    surface.dispatch(&mut ctx, &released(100.0, 250.0)).unwrap();

    assert_eq!(dividers(ctx.doc), vec![0.5]);
    assert!(!ctx.history.can_undo());
    assert_eq!(*outcomes.borrow(), vec![GestureOutcome::Completed]);
}

#[test]
fn cancelled_resize_keeps_width_100() {
    let mut doc = doc();
    let mut selection = Selection::new();
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };

    let gesture = ResizeGesture::new(ctx.doc, NodeId::intern("rc_box"), CardinalPoint::E).unwrap();
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut surface = InputSurface::new();
    surface
        .begin(
            &mut ctx,
            &press(110.0, 35.0),
            Box::new(gesture),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    surface.dispatch(&mut ctx, &moved(180.0, 35.0)).unwrap();
    assert_eq!(
        ctx.doc.bounds_of(NodeId::intern("rc_box")).unwrap().width(),
        170.0
    );

    surface.dispatch(&mut ctx, &escape()).unwrap();
    assert_eq!(
        ctx.doc.property(NodeId::intern("rc_box"), PropertyId::Width),
        Ok(PropertyValue::Float(100.0))
    );
    assert_eq!(
        ctx.doc.bounds_of(NodeId::intern("rc_box")).unwrap(),
        Rect::new(10.0, 10.0, 110.0, 60.0)
    );
    assert!(!ctx.history.can_undo());
    assert_eq!(*outcomes.borrow(), vec![GestureOutcome::Cancelled]);
}

#[test]
fn resize_commit_matches_last_preview() {
    let mut doc = doc();
    let mut selection = Selection::new();
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };

    let gesture = ResizeGesture::new(ctx.doc, NodeId::intern("rc_box"), CardinalPoint::SE).unwrap();
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut surface = InputSurface::new();
    surface
        .begin(
            &mut ctx,
            &press(110.0, 60.0),
            Box::new(gesture),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    surface.dispatch(&mut ctx, &moved(150.0, 90.0)).unwrap();
    let preview = ctx.doc.bounds_of(NodeId::intern("rc_box")).unwrap();
    surface.dispatch(&mut ctx, &released(150.0, 90.0)).unwrap();

    // Revert-then-commit lands exactly where the preview left off
    assert_eq!(ctx.doc.bounds_of(NodeId::intern("rc_box")).unwrap(), preview);

    ctx.history.undo(ctx.doc).unwrap();
    assert_eq!(
        ctx.doc.bounds_of(NodeId::intern("rc_box")).unwrap(),
        Rect::new(10.0, 10.0, 110.0, 60.0)
    );
    ctx.history.redo(ctx.doc).unwrap();
    assert_eq!(ctx.doc.bounds_of(NodeId::intern("rc_box")).unwrap(), preview);
}

#[test]
fn column_resize_commits_within_track_limits() {
    let mut doc = doc();
    let mut selection = Selection::new();
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };

    let gesture = ResizeColumnGesture::new(ctx.doc, NodeId::intern("rc_grid"), 0).unwrap();
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut surface = InputSurface::new();
    surface
        .begin(
            &mut ctx,
            &press(500.0, 35.0),
            Box::new(gesture),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    // Delta +200 clamps to the track max of 160
    surface.dispatch(&mut ctx, &moved(700.0, 35.0)).unwrap();
    surface.dispatch(&mut ctx, &released(700.0, 35.0)).unwrap();

    assert_eq!(
        ctx.doc
            .property(NodeId::intern("rc_grid"), PropertyId::ColumnWidth(0)),
        Ok(PropertyValue::Float(160.0))
    );
    assert_eq!(ctx.history.undo(ctx.doc).unwrap().as_deref(), Some("Resize Column"));
    assert_eq!(
        ctx.doc
            .property(NodeId::intern("rc_grid"), PropertyId::ColumnWidth(0)),
        Ok(PropertyValue::Float(100.0))
    );
}
