//! The press decision table for select-and-move, marquee click behavior,
//! and drag-export packaging.

use kurbo::Vec2;
use pretty_assertions::assert_eq;
use sc_core::{NodeId, NodeKind, PropertyId, PropertyValue, SceneGraph, SceneNode, Viewport};
use sc_editor::commands::CommandStack;
use sc_editor::document::Document;
use sc_editor::gesture::drag::{DragDriver, DragExportGesture};
use sc_editor::gesture::marquee::MarqueeGesture;
use sc_editor::gesture::select::SelectAndMoveGesture;
use sc_editor::gesture::{EditContext, GestureObserver, GestureOutcome};
use sc_editor::input::{InputEvent, Modifiers, PointerEvent};
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

/// A group holding one child, plus two free rects under the root.
fn doc() -> Document {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut g = SceneGraph::new();
    let group = g.add_node(
        g.root,
        SceneNode::new(NodeId::intern("tbl_grp"), NodeKind::Group),
    );
    g.add_node(
        group,
        SceneNode::at(
            NodeId::intern("tbl_child"),
            NodeKind::Rect {
                width: 30.0,
                height: 30.0,
            },
            20.0,
            300.0,
        ),
    );
    for (name, x) in [("tbl_a", 100.0), ("tbl_b", 200.0)] {
        g.add_node(
            g.root,
            SceneNode::at(
                NodeId::intern(name),
                NodeKind::Rect {
                    width: 40.0,
                    height: 40.0,
                },
                x,
                100.0,
            ),
        );
    }
    Document::new(g, Viewport::default())
}

/// Run a full press-release click through the surface.
fn click(
    surface: &mut InputSurface,
    ctx: &mut EditContext,
    hit: NodeId,
    pos: (f64, f64),
    mods: Modifiers,
) {
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    surface
        .begin(
            ctx,
            &InputEvent::PointerPressed(PointerEvent::with_modifiers(pos.0, pos.1, mods)),
            Box::new(SelectAndMoveGesture::new(hit)),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    surface
        .dispatch(
            ctx,
            &InputEvent::PointerReleased(PointerEvent::with_modifiers(pos.0, pos.1, mods)),
        )
        .unwrap();
    assert_eq!(*outcomes.borrow(), vec![GestureOutcome::Completed]);
}

#[test]
fn plain_click_on_unselected_replaces_selection() {
    let mut doc = doc();
    let mut selection = Selection::new();
    selection.replace([NodeId::intern("tbl_b")]);
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };
    let mut surface = InputSurface::new();

    click(&mut surface, &mut ctx, NodeId::intern("tbl_a"), (110.0, 110.0), Modifiers::NONE);
    assert_eq!(ctx.selection.items(), &[NodeId::intern("tbl_a")]);
}

#[test]
fn plain_click_under_selected_ancestor_keeps_selection() {
    let mut doc = doc();
    let mut selection = Selection::new();
    selection.replace([NodeId::intern("tbl_grp")]);
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };
    let mut surface = InputSurface::new();

    click(&mut surface, &mut ctx, NodeId::intern("tbl_child"), (30.0, 310.0), Modifiers::NONE);
    assert_eq!(ctx.selection.items(), &[NodeId::intern("tbl_grp")]);
}

#[test]
fn plain_click_on_selected_keeps_selection() {
    let mut doc = doc();
    let mut selection = Selection::new();
    selection.replace([NodeId::intern("tbl_a"), NodeId::intern("tbl_b")]);
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };
    let mut surface = InputSurface::new();

    click(&mut surface, &mut ctx, NodeId::intern("tbl_a"), (110.0, 110.0), Modifiers::NONE);
    assert_eq!(
        ctx.selection.items(),
        &[NodeId::intern("tbl_a"), NodeId::intern("tbl_b")]
    );
}

#[test]
fn extend_click_on_selected_toggles_out() {
    let mut doc = doc();
    let mut selection = Selection::new();
    selection.replace([NodeId::intern("tbl_a"), NodeId::intern("tbl_b")]);
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };
    let mut surface = InputSurface::new();

    click(&mut surface, &mut ctx, NodeId::intern("tbl_a"), (110.0, 110.0), Modifiers::SHIFT);
    assert_eq!(ctx.selection.items(), &[NodeId::intern("tbl_b")]);
}

#[test]
fn extend_click_on_unselected_toggles_in() {
    let mut doc = doc();
    let mut selection = Selection::new();
    selection.replace([NodeId::intern("tbl_a")]);
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };
    let mut surface = InputSurface::new();

    click(&mut surface, &mut ctx, NodeId::intern("tbl_b"), (210.0, 110.0), Modifiers::SHIFT);
    assert_eq!(
        ctx.selection.items(),
        &[NodeId::intern("tbl_a"), NodeId::intern("tbl_b")]
    );
}

#[test]
fn extend_click_under_selected_ancestor_still_toggles_in() {
    let mut doc = doc();
    let mut selection = Selection::new();
    selection.replace([NodeId::intern("tbl_grp")]);
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };
    let mut surface = InputSurface::new();

    click(&mut surface, &mut ctx, NodeId::intern("tbl_child"), (30.0, 310.0), Modifiers::SHIFT);
    assert_eq!(
        ctx.selection.items(),
        &[NodeId::intern("tbl_grp"), NodeId::intern("tbl_child")]
    );
}

#[test]
fn extend_click_never_starts_a_move() {
    let mut doc = doc();
    let mut selection = Selection::new();
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };
    let mut surface = InputSurface::new();

    let outcomes = Rc::new(RefCell::new(Vec::new()));
    surface
        .begin(
            &mut ctx,
            &InputEvent::PointerPressed(PointerEvent::with_modifiers(
                110.0,
                110.0,
                Modifiers::SHIFT,
            )),
            Box::new(SelectAndMoveGesture::new(NodeId::intern("tbl_a"))),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    surface
        .dispatch(
            &mut ctx,
            &InputEvent::PointerMoved(PointerEvent::new(170.0, 150.0)),
        )
        .unwrap();
    surface
        .dispatch(
            &mut ctx,
            &InputEvent::PointerReleased(PointerEvent::new(170.0, 150.0)),
        )
        .unwrap();

    assert_eq!(
        ctx.doc.property(NodeId::intern("tbl_a"), PropertyId::X),
        Ok(PropertyValue::Float(100.0))
    );
    assert!(!ctx.history.can_undo());
}

#[test]
fn multi_parent_selection_refuses_relocation() {
    let mut doc = doc();
    let mut selection = Selection::new();
    selection.replace([NodeId::intern("tbl_child"), NodeId::intern("tbl_a")]);
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };
    let mut surface = InputSurface::new();

    let outcomes = Rc::new(RefCell::new(Vec::new()));
    surface
        .begin(
            &mut ctx,
            &InputEvent::PointerPressed(PointerEvent::new(110.0, 110.0)),
            Box::new(SelectAndMoveGesture::new(NodeId::intern("tbl_a"))),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    surface
        .dispatch(
            &mut ctx,
            &InputEvent::PointerMoved(PointerEvent::new(180.0, 160.0)),
        )
        .unwrap();
    surface
        .dispatch(
            &mut ctx,
            &InputEvent::PointerReleased(PointerEvent::new(180.0, 160.0)),
        )
        .unwrap();

    // Neither node moved, nothing was committed
    assert_eq!(
        ctx.doc.property(NodeId::intern("tbl_a"), PropertyId::X),
        Ok(PropertyValue::Float(100.0))
    );
    assert_eq!(
        ctx.doc.property(NodeId::intern("tbl_child"), PropertyId::X),
        Ok(PropertyValue::Float(20.0))
    );
    assert!(!ctx.history.can_undo());
    assert_eq!(*outcomes.borrow(), vec![GestureOutcome::Completed]);
}

#[test]
fn marquee_zero_drag_selects_hit_or_clears() {
    let mut doc = doc();
    let mut selection = Selection::new();
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };
    let mut surface = InputSurface::new();

    // Click on tbl_b without moving
    let outcomes = Rc::new(RefCell::new(Vec::new()));
    surface
        .begin(
            &mut ctx,
            &InputEvent::PointerPressed(PointerEvent::new(210.0, 110.0)),
            Box::new(MarqueeGesture::new(NodeId::intern("root"))),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    surface
        .dispatch(
            &mut ctx,
            &InputEvent::PointerReleased(PointerEvent::new(210.0, 110.0)),
        )
        .unwrap();
    assert_eq!(ctx.selection.items(), &[NodeId::intern("tbl_b")]);

    // Click on the background clears
    surface
        .begin(
            &mut ctx,
            &InputEvent::PointerPressed(PointerEvent::new(700.0, 500.0)),
            Box::new(MarqueeGesture::new(NodeId::intern("root"))),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    surface
        .dispatch(
            &mut ctx,
            &InputEvent::PointerReleased(PointerEvent::new(700.0, 500.0)),
        )
        .unwrap();
    assert!(ctx.selection.is_empty());
}

#[test]
fn drag_export_requires_common_parent() {
    let mut doc = doc();
    let mut selection = Selection::new();
    selection.replace([NodeId::intern("tbl_a"), NodeId::intern("tbl_b")]);
    let mut history = CommandStack::new(100);
    let mut ctx = EditContext {
        doc: &mut doc,
        selection: &mut selection,
        history: &mut history,
    };

    let outcomes = Rc::new(RefCell::new(Vec::new()));
    let mut driver = DragDriver::new();
    driver
        .start(
            &mut ctx,
            &InputEvent::PointerPressed(PointerEvent::new(110.0, 110.0)),
            DragExportGesture::new(),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    let handler = driver
        .dispatch(
            &mut ctx,
            &InputEvent::PointerMoved(PointerEvent::new(120.0, 110.0)),
        )
        .unwrap();

    // Both rects live under the root, so the export is allowed
    let payload = handler.unwrap().take_payload().unwrap();
    assert_eq!(
        payload.nodes,
        vec![NodeId::intern("tbl_a"), NodeId::intern("tbl_b")]
    );
    // Union origin is tbl_a's corner (100, 100); grab was (120, 110)
    assert_eq!(payload.grab_offset, Vec2::new(20.0, 10.0));
    assert_eq!(*outcomes.borrow(), vec![GestureOutcome::Completed]);

    // A cross-parent selection yields no payload
    ctx.selection
        .replace([NodeId::intern("tbl_child"), NodeId::intern("tbl_a")]);
    let mut driver = DragDriver::new();
    driver
        .start(
            &mut ctx,
            &InputEvent::PointerPressed(PointerEvent::new(110.0, 110.0)),
            DragExportGesture::new(),
            Box::new(Recorder(outcomes.clone())),
        )
        .unwrap();
    let handler = driver
        .dispatch(
            &mut ctx,
            &InputEvent::PointerMoved(PointerEvent::new(120.0, 110.0)),
        )
        .unwrap();
    assert!(handler.unwrap().take_payload().is_none());
}
