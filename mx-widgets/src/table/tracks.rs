// SPDX-License-Identifier: LGPL-3.0-only
use mx_core::layout::SizeRequest;

/// A row or a column of a table.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct Track {
    pub min: f32,
    pub natural: f32,
    pub expand: bool,
    pub visible: bool,
    pub size: f32,
}

/// What one child asks of the tracks it spans.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TrackRequest {
    pub start: usize,
    pub span: usize,
    pub request: SizeRequest,
    pub expand: bool,
}

/// Size tracks from the requests of the children placed in them.
///
/// Single-track children set the track requests. Spanning children then grow the
/// tracks they cover when those are too small for them, preferring expanding tracks.
pub(crate) fn measure(count: usize, requests: &[TrackRequest], spacing: f32) -> Vec<Track> {
    let mut tracks = vec![Track::default(); count];

    for r in requests.iter().filter(|r| r.span == 1) {
        let Some(track) = tracks.get_mut(r.start) else {
            continue;
        };
        track.visible = true;
        track.expand |= r.expand;
        track.min = track.min.max(r.request.min);
        track.natural = track.natural.max(r.request.natural);
    }

    for r in requests.iter().filter(|r| r.span > 1) {
        let end = (r.start + r.span).min(count);
        if r.start >= end {
            continue;
        }

        let spanned = &mut tracks[r.start..end];
        for track in spanned.iter_mut() {
            track.visible = true;
        }

        let gaps = spacing * (spanned.len() - 1) as f32;
        let min_sum: f32 = spanned.iter().map(|t| t.min).sum::<f32>() + gaps;
        if r.request.min > min_sum {
            grow(spanned, r.request.min - min_sum, |t| &mut t.min);
        }

        let natural_sum: f32 = spanned.iter().map(|t| t.natural).sum::<f32>() + gaps;
        if r.request.natural > natural_sum {
            grow(spanned, r.request.natural - natural_sum, |t| &mut t.natural);
        }

        for track in spanned.iter_mut() {
            track.natural = track.natural.max(track.min);
        }
    }

    tracks
}

/// Spread an amount evenly over the expanding tracks, or over all of them if none expands.
fn grow(tracks: &mut [Track], amount: f32, field: fn(&mut Track) -> &mut f32) {
    let n_expand = tracks.iter().filter(|t| t.expand).count();
    let receivers = if n_expand > 0 { n_expand } else { tracks.len() };
    let share = amount / receivers as f32;

    for track in tracks.iter_mut() {
        if n_expand == 0 || track.expand {
            *field(track) += share;
        }
    }
}

/// Total `(min, natural)` extent of the visible tracks, spacing included.
pub(crate) fn total(tracks: &[Track], spacing: f32) -> SizeRequest {
    let visible = tracks.iter().filter(|t| t.visible);
    let count = visible.clone().count();
    let gaps = spacing * count.saturating_sub(1) as f32;

    SizeRequest::new(
        visible.clone().map(|t| t.min).sum::<f32>() + gaps,
        visible.map(|t| t.natural).sum::<f32>() + gaps,
    )
}

/// Assign final sizes to the tracks for the available extent.
///
/// Below the minimum every track gets its minimum. Between minimum and natural,
/// tracks shrink evenly from natural without going below their minimum. Above
/// natural, expanding tracks share the leftover evenly. Hidden tracks get nothing.
pub(crate) fn distribute(tracks: &mut [Track], available: Option<f32>, spacing: f32) {
    for track in tracks.iter_mut() {
        track.size = if track.visible { track.natural } else { 0.0 };
    }

    let Some(available) = available else {
        return;
    };

    let visible = tracks.iter().filter(|t| t.visible).count();
    let available = (available - spacing * visible.saturating_sub(1) as f32).max(0.0);
    let min_total: f32 = tracks.iter().filter(|t| t.visible).map(|t| t.min).sum();
    let natural_total: f32 = tracks.iter().filter(|t| t.visible).map(|t| t.natural).sum();

    if available <= min_total {
        for track in tracks.iter_mut().filter(|t| t.visible) {
            track.size = track.min;
        }
    } else if available < natural_total {
        shrink(tracks, natural_total - available);
    } else {
        let n_expand = tracks.iter().filter(|t| t.visible && t.expand).count();
        if n_expand > 0 {
            let share = (available - natural_total) / n_expand as f32;
            for track in tracks.iter_mut().filter(|t| t.visible && t.expand) {
                track.size += share;
            }
        }
    }
}

/// Take `deficit` away from the tracks, evenly, never going below a track minimum.
fn shrink(tracks: &mut [Track], mut deficit: f32) {
    const EPSILON: f32 = 1e-4;

    for _ in 0..=tracks.len() {
        let shrinkable = tracks
            .iter()
            .filter(|t| t.visible && t.size > t.min + EPSILON)
            .count();
        if shrinkable == 0 || deficit <= EPSILON {
            break;
        }

        let share = deficit / shrinkable as f32;
        for track in tracks.iter_mut().filter(|t| t.visible && t.size > t.min + EPSILON) {
            let cut = share.min(track.size - track.min);
            track.size -= cut;
            deficit -= cut;
        }
    }
}

/// Start offset of every track.
pub(crate) fn offsets(tracks: &[Track], start: f32, spacing: f32) -> Vec<f32> {
    let mut cursor = start;
    tracks
        .iter()
        .map(|track| {
            let offset = cursor;
            if track.visible {
                cursor += track.size + spacing;
            }
            offset
        })
        .collect()
}

/// Extent covered by a span of tracks, spacing between visible tracks included.
pub(crate) fn span_extent(tracks: &[Track], start: usize, span: usize, spacing: f32) -> f32 {
    let end = (start + span).min(tracks.len());
    let Some(spanned) = tracks.get(start..end) else {
        return 0.0;
    };

    let visible = spanned.iter().filter(|t| t.visible).count();
    spanned.iter().filter(|t| t.visible).map(|t| t.size).sum::<f32>()
        + spacing * visible.saturating_sub(1) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(start: usize, span: usize, min: f32, natural: f32, expand: bool) -> TrackRequest {
        TrackRequest {
            start,
            span,
            request: SizeRequest::new(min, natural),
            expand,
        }
    }

    #[test]
    fn test_single_span_takes_max() {
        let tracks = measure(
            2,
            &[
                request(0, 1, 10.0, 20.0, false),
                request(0, 1, 15.0, 18.0, true),
                request(1, 1, 5.0, 5.0, false),
            ],
            0.0,
        );

        assert_eq!((tracks[0].min, tracks[0].natural, tracks[0].expand), (15.0, 20.0, true));
        assert_eq!((tracks[1].min, tracks[1].natural, tracks[1].expand), (5.0, 5.0, false));
    }

    #[test]
    fn test_span_grows_expanding_tracks() {
        let tracks = measure(
            3,
            &[
                request(0, 1, 10.0, 10.0, false),
                request(1, 1, 10.0, 10.0, true),
                request(2, 1, 10.0, 10.0, true),
                request(0, 3, 30.0, 70.0, false),
            ],
            5.0,
        );

        // natural sum 30 + 10 spacing = 40, 30 short, split over the two expanding tracks
        assert_eq!(tracks[0].natural, 10.0);
        assert_eq!(tracks[1].natural, 25.0);
        assert_eq!(tracks[2].natural, 25.0);
        assert_eq!(tracks[1].min, 10.0);
    }

    #[test]
    fn test_span_grows_all_without_expand() {
        let tracks = measure(2, &[request(0, 2, 40.0, 40.0, false)], 0.0);
        assert_eq!(tracks[0].min, 20.0);
        assert_eq!(tracks[1].natural, 20.0);
        assert!(tracks.iter().all(|t| t.visible));
    }

    #[test]
    fn test_distribute() {
        let mut tracks = measure(
            3,
            &[
                request(0, 1, 10.0, 50.0, false),
                request(1, 1, 40.0, 50.0, true),
                request(2, 1, 0.0, 0.0, false),
            ],
            10.0,
        );

        distribute(&mut tracks, Some(200.0), 10.0);
        assert_eq!(tracks.iter().map(|t| t.size).collect::<Vec<_>>(), vec![50.0, 130.0, 0.0]);

        // 80 available after spacing, 20 to shrink: the second track stops at its min
        distribute(&mut tracks, Some(100.0), 10.0);
        assert!((tracks[0].size - 40.0).abs() < 1e-3);
        assert!((tracks[1].size - 40.0).abs() < 1e-3);

        distribute(&mut tracks, Some(10.0), 10.0);
        assert_eq!(tracks.iter().map(|t| t.size).collect::<Vec<_>>(), vec![10.0, 40.0, 0.0]);
    }

    #[test]
    fn test_hidden_tracks_collapse() {
        let mut tracks = measure(3, &[request(0, 1, 10.0, 10.0, false), request(2, 1, 10.0, 10.0, false)], 5.0);
        distribute(&mut tracks, None, 5.0);

        assert!(!tracks[1].visible);
        assert_eq!(total(&tracks, 5.0), SizeRequest::fixed(25.0));
        assert_eq!(offsets(&tracks, 0.0, 5.0), vec![0.0, 15.0, 15.0]);
        assert_eq!(span_extent(&tracks, 0, 3, 5.0), 25.0);
    }
}
