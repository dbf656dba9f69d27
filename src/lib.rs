#![warn(missing_docs)]

//! Lay out actor trees and drag actors between drop targets.

pub use nalgebra as math;

pub use mx_core as core;
#[cfg(feature = "settings")]
pub use mx_services as services;
pub use mx_widgets as widgets;

/// A "prelude" for users of the mx toolkit.
///
/// Importing this module brings into scope the most common types
/// needed to build and drive a stage.
///
/// ```rust
/// use mx::prelude::*;
///
/// let mut stage = Stage::new(MxConfig::default());
/// let bin = stage.create_actor(Bin::new());
/// stage.add_child(stage.root(), bin).unwrap();
/// assert!(stage.is_on_stage(bin));
/// ```
pub mod prelude {
    pub use crate::core::actor::{Actor, ActorId};
    pub use crate::core::config::MxConfig;
    pub use crate::core::error::{MxError, Result};
    pub use crate::core::event::{Modifiers, PointerEvent, PointerEventKind};
    pub use crate::core::geometry::{ActorBox, Align, Orientation, Padding};
    pub use crate::core::layout::{
        allocate_align_fill, FixedLayout, FixedSize, LayoutCx, LayoutManager, RequestMode, SizeRequest,
    };
    pub use crate::core::signal::{HandlerId, Handlers};
    pub use crate::core::stage::Stage;
    pub use crate::core::update::Update;

    // Drag and drop
    pub use crate::core::dnd::draggable::{DragState, Draggable};
    pub use crate::core::dnd::droppable::Droppable;
    pub use crate::core::dnd::{
        DragAxis, DragBegin, DragContainment, DragEnd, DragMotion, DragOver, DropEvent,
    };

    // Math
    pub use nalgebra::{Point2, Vector2};

    // Containers
    pub use crate::widgets::bin::{Bin, BinExt};
    pub use crate::widgets::box_layout::{BoxChild, BoxLayout, BoxLayoutExt};
    pub use crate::widgets::expander::{Expander, ExpanderExt};
    pub use crate::widgets::grid::Grid;
    pub use crate::widgets::stack::{Stack, StackChild, StackExt};
    pub use crate::widgets::table::{Table, TableChild, TableExt};

    #[cfg(feature = "settings")]
    pub use crate::services::SettingsRegistry;
}
