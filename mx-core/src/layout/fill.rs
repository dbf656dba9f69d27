// SPDX-License-Identifier: LGPL-3.0-only
use super::{LayoutCx, RequestMode, SizeRequest};
use crate::actor::ActorId;
use crate::geometry::{ActorBox, Align};

/// Fit a request into the available extent.
///
/// Natural if it fits, the available extent if the minimum still fits, the minimum otherwise.
pub fn clamp_to_available(request: SizeRequest, available: f32) -> f32 {
    let available = available.max(0.0);
    if request.natural <= available {
        request.natural
    } else if request.min <= available {
        available
    } else {
        request.min
    }
}

/// Compute the box of `child` inside `slot`.
///
/// A filled axis takes the whole slot extent. Otherwise the child's preferred size is
/// negotiated in its request mode, clamped with [clamp_to_available] and positioned by
/// the alignment factor. The returned box is in the same coordinates as `slot`.
pub fn allocate_align_fill(
    cx: &LayoutCx<'_>,
    child: ActorId,
    slot: ActorBox,
    x_align: Align,
    y_align: Align,
    x_fill: bool,
    y_fill: bool,
) -> ActorBox {
    let available_width = slot.width();
    let available_height = slot.height();

    if x_fill && y_fill {
        return slot;
    }

    let (width, height) = match cx.request_mode(child) {
        RequestMode::HeightForWidth => {
            let width = if x_fill {
                available_width
            } else {
                let request = cx.preferred_width(child, Some(available_height));
                clamp_to_available(request, available_width)
            };

            let height = if y_fill {
                available_height
            } else {
                let request = cx.preferred_height(child, Some(width));
                clamp_to_available(request, available_height)
            };

            (width, height)
        },
        RequestMode::WidthForHeight => {
            let height = if y_fill {
                available_height
            } else {
                let request = cx.preferred_height(child, Some(available_width));
                clamp_to_available(request, available_height)
            };

            let width = if x_fill {
                available_width
            } else {
                let request = cx.preferred_width(child, Some(height));
                clamp_to_available(request, available_width)
            };

            (width, height)
        },
    };

    let x1 = if x_fill {
        slot.x1
    } else {
        slot.x1 + (available_width - width) * x_align.factor()
    };

    let y1 = if y_fill {
        slot.y1
    } else {
        slot.y1 + (available_height - height) * y_align.factor()
    };

    ActorBox::new(x1, y1, x1 + width, y1 + height)
}
