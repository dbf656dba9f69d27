// SPDX-License-Identifier: LGPL-3.0-only
use mx_core::actor::ActorId;
use mx_core::config::MxConfig;
use mx_core::dnd::{DragMotion, DragOver, DropEvent};
use mx_core::event::{Modifiers, PointerEvent};
use mx_core::geometry::ActorBox;
use mx_core::layout::FixedSize;
use mx_core::stage::Stage;
use mx_widgets::bin::{Bin, BinExt};
use mx_widgets::table::{Table, TableExt};
use nalgebra::{Point2, Vector2};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    In(ActorId),
    Out(ActorId),
    Drop(DropEvent),
}

struct Scene {
    stage: Stage,
    inbox: ActorId,
    archive: ActorId,
    tile: ActorId,
    seen: Rc<RefCell<Vec<Seen>>>,
    moves: Rc<RefCell<Vec<Vector2<f32>>>>,
}

fn zone(stage: &mut Stage, table: ActorId, seen: &Rc<RefCell<Vec<Seen>>>) -> ActorId {
    let zone = stage.create_actor(Bin::new().with_fill(true, true));
    let body = stage.create_actor(FixedSize::new(150.0, 150.0));
    stage.table_attach(table, zone, 0, -1).unwrap();
    stage.bin_set_child(zone, Some(body)).unwrap();
    stage.enable_drop(zone);

    let droppable = stage.droppable_mut(zone).unwrap();
    let s = seen.clone();
    droppable
        .over_in
        .connect(move |e: &DragOver| s.borrow_mut().push(Seen::In(e.target)));
    let s = seen.clone();
    droppable
        .over_out
        .connect(move |e: &DragOver| s.borrow_mut().push(Seen::Out(e.target)));
    let s = seen.clone();
    droppable.drop.connect(move |e| s.borrow_mut().push(Seen::Drop(*e)));

    zone
}

/// Two 150x150 drop zones at (200, 100) and (370, 100), and a 60x60 tile at (20, 20).
fn scene() -> Scene {
    let mut stage = Stage::new(MxConfig::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let moves = Rc::new(RefCell::new(Vec::new()));

    let table = stage.create_actor(Table::new().with_spacing(0.0, 20.0));
    stage.add_child(stage.root(), table).unwrap();
    stage.set_position(table, Point2::new(200.0, 100.0));
    let inbox = zone(&mut stage, table, &seen);
    let archive = zone(&mut stage, table, &seen);

    let tile = stage.create_actor(FixedSize::new(60.0, 60.0));
    stage.add_child(stage.root(), tile).unwrap();
    stage.set_position(tile, Point2::new(20.0, 20.0));
    stage.enable_drag(tile);

    let m = moves.clone();
    stage
        .draggable_mut(tile)
        .unwrap()
        .drag_motion
        .connect(move |e: &DragMotion| m.borrow_mut().push(e.delta));

    stage.layout();
    Scene {
        stage,
        inbox,
        archive,
        tile,
        seen,
        moves,
    }
}

impl Scene {
    fn send(&mut self, event: PointerEvent) {
        self.stage.handle_event(event);
        for delta in self.moves.borrow_mut().drain(..) {
            self.stage.move_by(self.tile, delta);
        }
    }
}

#[test]
fn test_table_places_zones() {
    let scene = scene();
    assert_eq!(
        scene.stage.stage_box(scene.inbox),
        Some(ActorBox::new(200.0, 100.0, 350.0, 250.0))
    );
    assert_eq!(
        scene.stage.stage_box(scene.archive),
        Some(ActorBox::new(370.0, 100.0, 520.0, 250.0))
    );
}

#[test]
fn test_drag_tile_across_zones() {
    let mut scene = scene();
    let tile = scene.tile;
    scene
        .stage
        .droppable_mut(scene.archive)
        .unwrap()
        .set_accept(move |dragged| dragged != tile);

    scene.send(PointerEvent::press(40.0, 40.0, 1));
    scene.send(PointerEvent::drag_motion(44.0, 42.0));
    scene.send(PointerEvent::drag_motion(120.0, 60.0));
    scene.send(PointerEvent::drag_motion(260.0, 160.0));
    scene.send(PointerEvent::drag_motion(440.0, 160.0));
    scene.send(PointerEvent::drag_motion(450.0, 170.0));
    scene.send(PointerEvent::drag_motion(280.0, 180.0));
    scene.send(PointerEvent::release(280.0, 180.0, 1));

    let inbox = scene.inbox;
    assert_eq!(
        *scene.seen.borrow(),
        vec![
            Seen::In(inbox),
            Seen::Out(inbox),
            Seen::In(inbox),
            Seen::Drop(DropEvent {
                target: inbox,
                draggable: tile,
                position: Point2::new(80.0, 80.0),
                button: 1,
                modifiers: Modifiers::BUTTON1,
            }),
        ]
    );

    scene.stage.layout();
    assert_eq!(scene.stage.stage_box(tile).map(|b| b.origin()), Some(Point2::new(260.0, 160.0)));
    assert_eq!(scene.stage.dragged_actor(), None);
}
