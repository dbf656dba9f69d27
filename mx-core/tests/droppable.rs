// SPDX-License-Identifier: LGPL-3.0-only
use mx_core::actor::ActorId;
use mx_core::config::MxConfig;
use mx_core::dnd::{CaptureListener, DragOver, DropEvent};
use mx_core::event::{Modifiers, PointerEvent};
use mx_core::layout::{FixedLayout, FixedSize};
use mx_core::stage::Stage;
use nalgebra::Point2;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    In(ActorId),
    Out(ActorId),
    Drop(DropEvent),
}

type Log = Rc<RefCell<Vec<Seen>>>;

fn actor_at(stage: &mut Stage, parent: ActorId, x: f32, y: f32, w: f32, h: f32) -> ActorId {
    let actor = stage.create_actor(FixedSize::new(w, h));
    stage.add_child(parent, actor).unwrap();
    stage.set_position(actor, Point2::new(x, y));
    actor
}

fn watch(stage: &mut Stage, target: ActorId, log: &Log) {
    stage.enable_drop(target);
    let droppable = stage.droppable_mut(target).unwrap();

    let l = log.clone();
    droppable
        .over_in
        .connect(move |e: &DragOver| l.borrow_mut().push(Seen::In(e.target)));
    let l = log.clone();
    droppable
        .over_out
        .connect(move |e: &DragOver| l.borrow_mut().push(Seen::Out(e.target)));
    let l = log.clone();
    droppable.drop.connect(move |e| l.borrow_mut().push(Seen::Drop(*e)));
}

/// A 200x200 drop target at (300, 100) and a 50x50 draggable at the origin.
fn setup() -> (Stage, ActorId, ActorId, Log) {
    let mut stage = Stage::new(MxConfig::default());
    let root = stage.root();
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let target = actor_at(&mut stage, root, 300.0, 100.0, 200.0, 200.0);
    watch(&mut stage, target, &log);

    let dragged = actor_at(&mut stage, root, 0.0, 0.0, 50.0, 50.0);
    stage.enable_drag(dragged);
    stage.draggable_mut(dragged).unwrap().set_threshold(0);

    (stage, target, dragged, log)
}

#[test]
fn test_over_in_out_and_drop() {
    let (mut stage, target, dragged, log) = setup();

    stage.handle_event(PointerEvent::press(10.0, 10.0, 1));
    stage.handle_event(PointerEvent::drag_motion(350.0, 150.0));
    stage.handle_event(PointerEvent::drag_motion(360.0, 160.0));
    stage.handle_event(PointerEvent::drag_motion(10.0, 500.0));
    stage.handle_event(PointerEvent::drag_motion(350.0, 150.0));
    stage.handle_event(PointerEvent::release(400.0, 200.0, 1).with_modifiers(Modifiers::CONTROL));

    assert_eq!(
        *log.borrow(),
        vec![
            Seen::In(target),
            Seen::Out(target),
            Seen::In(target),
            Seen::Drop(DropEvent {
                target,
                draggable: dragged,
                position: Point2::new(100.0, 100.0),
                button: 1,
                modifiers: Modifiers::BUTTON1 | Modifiers::CONTROL,
            }),
        ]
    );
    assert_eq!(stage.drop_context().unwrap().current_target(), None);
    assert_eq!(stage.dragged_actor(), None);
}

#[test]
fn test_no_events_without_drag() {
    let (mut stage, _target, _dragged, log) = setup();

    stage.handle_event(PointerEvent::motion(350.0, 150.0, Modifiers::BUTTON1));
    stage.handle_event(PointerEvent::release(350.0, 150.0, 1));

    assert!(log.borrow().is_empty());
}

#[test]
fn test_dragged_actor_is_looked_through() {
    let (mut stage, target, dragged, log) = setup();
    stage.set_position(dragged, Point2::new(320.0, 120.0));

    stage.handle_event(PointerEvent::press(330.0, 130.0, 1));
    assert_eq!(stage.dragged_actor(), Some(dragged));

    stage.handle_event(PointerEvent::drag_motion(335.0, 135.0));
    assert_eq!(*log.borrow(), vec![Seen::In(target)]);
    assert!(stage.is_visible(dragged));
}

#[test]
fn test_over_in_is_exclusive() {
    let (mut stage, first, _dragged, log) = setup();
    let root = stage.root();
    let second = actor_at(&mut stage, root, 500.0, 100.0, 200.0, 200.0);
    watch(&mut stage, second, &log);

    stage.handle_event(PointerEvent::press(10.0, 10.0, 1));
    for x in [350.0, 450.0, 550.0, 650.0, 450.0, 350.0] {
        stage.handle_event(PointerEvent::drag_motion(x, 150.0));
    }

    let log = log.borrow();
    assert_eq!(
        *log,
        vec![
            Seen::In(first),
            Seen::Out(first),
            Seen::In(second),
            Seen::Out(second),
            Seen::In(first),
        ]
    );

    for pair in log.windows(2) {
        assert!(!matches!(pair, [Seen::In(_), Seen::In(_)]));
    }
}

#[test]
fn test_ancestor_receives_drop_for_plain_child() {
    let mut stage = Stage::new(MxConfig::default());
    let root = stage.root();
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let outer = stage.create_actor(FixedLayout::new());
    stage.add_child(root, outer).unwrap();
    stage.set_position(outer, Point2::new(300.0, 100.0));
    let inner = actor_at(&mut stage, outer, 0.0, 0.0, 100.0, 100.0);
    watch(&mut stage, outer, &log);

    let dragged = actor_at(&mut stage, root, 0.0, 0.0, 50.0, 50.0);
    stage.enable_drag(dragged);
    stage.draggable_mut(dragged).unwrap().set_threshold(0);

    stage.handle_event(PointerEvent::press(10.0, 10.0, 1));
    stage.handle_event(PointerEvent::drag_motion(350.0, 150.0));
    assert_eq!(stage.actor_at(Point2::new(350.0, 150.0)), Some(inner));
    assert_eq!(*log.borrow(), vec![Seen::In(outer)]);
}

#[test]
fn test_refusing_target_occludes_ancestor() {
    let mut stage = Stage::new(MxConfig::default());
    let root = stage.root();
    let log: Log = Rc::new(RefCell::new(Vec::new()));

    let outer = stage.create_actor(FixedLayout::new());
    stage.add_child(root, outer).unwrap();
    stage.set_position(outer, Point2::new(300.0, 100.0));
    let inner = actor_at(&mut stage, outer, 0.0, 0.0, 100.0, 100.0);
    let _spacer = actor_at(&mut stage, outer, 100.0, 100.0, 100.0, 100.0);
    watch(&mut stage, outer, &log);
    watch(&mut stage, inner, &log);
    stage.droppable_mut(inner).unwrap().set_accept(|_| false);

    let dragged = actor_at(&mut stage, root, 0.0, 0.0, 50.0, 50.0);
    stage.enable_drag(dragged);
    stage.draggable_mut(dragged).unwrap().set_threshold(0);

    stage.handle_event(PointerEvent::press(10.0, 10.0, 1));
    stage.handle_event(PointerEvent::drag_motion(350.0, 150.0));
    stage.handle_event(PointerEvent::release(350.0, 150.0, 1));
    assert!(log.borrow().is_empty());
}

#[test]
fn test_accept_filters_by_draggable() {
    let (mut stage, target, dragged, log) = setup();
    let root = stage.root();
    let other = actor_at(&mut stage, root, 0.0, 60.0, 50.0, 50.0);
    stage.enable_drag(other);
    stage.draggable_mut(other).unwrap().set_threshold(0);
    stage
        .droppable_mut(target)
        .unwrap()
        .set_accept(move |candidate| candidate == dragged);

    stage.handle_event(PointerEvent::press(10.0, 70.0, 1));
    stage.handle_event(PointerEvent::drag_motion(350.0, 150.0));
    stage.handle_event(PointerEvent::release(350.0, 150.0, 1));
    assert!(log.borrow().is_empty());

    stage.handle_event(PointerEvent::press(10.0, 10.0, 1));
    stage.handle_event(PointerEvent::drag_motion(350.0, 150.0));
    assert_eq!(*log.borrow(), vec![Seen::In(target)]);
}

#[test]
fn test_enable_disable_idempotent() {
    let (mut stage, target, _dragged, _log) = setup();
    let root = stage.root();
    let second = actor_at(&mut stage, root, 500.0, 100.0, 50.0, 50.0);

    stage.enable_drop(target);
    stage.enable_drop(second);
    assert_eq!(stage.drop_context().unwrap().targets(), &[target, second]);
    assert_eq!(stage.capture_listeners(), &[CaptureListener::DropTargets]);

    stage.disable_drop(target);
    stage.disable_drop(target);
    assert_eq!(stage.drop_context().unwrap().targets(), &[second]);

    stage.disable_drop(second);
    assert!(stage.drop_context().is_none());
    assert!(stage.capture_listeners().is_empty());

    stage.disable_drop(second);
    assert!(stage.drop_context().is_none());
}

#[test]
fn test_destroying_last_target_removes_tracking() {
    let (mut stage, target, _dragged, _log) = setup();

    stage.destroy(target).unwrap();
    assert!(stage.drop_context().is_none());
    assert!(!stage.capture_listeners().contains(&CaptureListener::DropTargets));
}
