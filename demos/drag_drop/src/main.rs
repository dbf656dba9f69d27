use mx::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

fn config() -> MxConfig {
    let mut config = MxConfig::default();

    match SettingsRegistry::from_xdg() {
        Ok(registry) => {
            if let Err(err) = registry.apply(&mut config) {
                log::warn!("Ignoring settings: {}", err);
            }
        },
        Err(err) => log::warn!("Settings unavailable: {:#}", err),
    }

    config.apply_env();
    config
}

/// A bin with a square body, attached to the table and registered as drop target.
fn drop_zone(stage: &mut Stage, table: ActorId, name: &str, column: i32) -> anyhow::Result<ActorId> {
    let zone = stage.create_actor(Bin::new().with_fill(true, true));
    let body = stage.create_actor(FixedSize::new(150.0, 150.0));
    stage.set_name(zone, name);
    stage.table_attach(table, zone, 0, column)?;
    stage.bin_set_child(zone, Some(body))?;
    stage.enable_drop(zone);
    Ok(zone)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut stage = Stage::new(config());
    let root = stage.root();

    let table = stage.create_actor(Table::new().with_spacing(0.0, 20.0));
    stage.add_child(root, table)?;
    stage.set_position(table, Point2::new(200.0, 100.0));

    let inbox = drop_zone(&mut stage, table, "inbox", -1)?;
    let archive = drop_zone(&mut stage, table, "archive", -1)?;

    let tile = stage.create_actor(FixedSize::new(60.0, 60.0));
    stage.set_name(tile, "tile");
    stage.add_child(root, tile)?;
    stage.set_position(tile, Point2::new(20.0, 20.0));
    stage.enable_drag(tile);

    // The archive only takes other archives.
    if let Some(droppable) = stage.droppable_mut(archive) {
        droppable.set_accept(move |dragged| dragged != tile);
    }

    for zone in [inbox, archive] {
        let droppable = stage
            .droppable_mut(zone)
            .ok_or(MxError::UnknownActor(zone))?;
        droppable
            .over_in
            .connect(|e: &DragOver| log::info!("{} entered {}", e.draggable, e.target));
        droppable
            .over_out
            .connect(|e: &DragOver| log::info!("{} left {}", e.draggable, e.target));
        droppable.drop.connect(|e: &DropEvent| {
            log::info!(
                "{} dropped on {} at ({}, {}) with {:?}",
                e.draggable,
                e.target,
                e.position.x,
                e.position.y,
                e.modifiers
            )
        });
    }

    let moves: Rc<RefCell<Vec<Vector2<f32>>>> = Rc::new(RefCell::new(Vec::new()));
    let draggable = stage
        .draggable_mut(tile)
        .ok_or(MxError::UnknownActor(tile))?;
    draggable
        .drag_begin
        .connect(|e: &DragBegin| log::info!("Drag started at ({}, {})", e.position.x, e.position.y));
    let pending = moves.clone();
    draggable
        .drag_motion
        .connect(move |e: &DragMotion| pending.borrow_mut().push(e.delta));
    draggable
        .drag_end
        .connect(|e: &DragEnd| log::info!("Drag ended at ({}, {})", e.position.x, e.position.y));

    let script = [
        PointerEvent::press(40.0, 40.0, 1),
        PointerEvent::drag_motion(44.0, 42.0),
        PointerEvent::drag_motion(120.0, 60.0),
        PointerEvent::drag_motion(260.0, 160.0),
        PointerEvent::drag_motion(440.0, 160.0),
        PointerEvent::drag_motion(450.0, 170.0),
        PointerEvent::drag_motion(280.0, 180.0),
        PointerEvent::release(280.0, 180.0, 1),
    ];

    for event in script {
        let update = stage.handle_event(event);
        log::debug!("{:?} -> {:?}", event.kind, update);

        // The tile follows the pointer.
        for delta in moves.borrow_mut().drain(..) {
            stage.move_by(tile, delta);
        }
    }

    stage.layout();
    if let Some(bounds) = stage.stage_box(tile) {
        log::info!("Tile rests at ({}, {})", bounds.x1, bounds.y1);
    }

    Ok(())
}
