//! Finite enumeration of the periodic faces near a rectangle.
//!
//! The union of the base faces' bounding boxes is moved period by period,
//! starting at `(0, 0)`. A period stays live while the moved union still
//! intersects the query rectangle; live periods propose their neighbours
//! (the eight unit offsets plus the periods of faces touching a base face,
//! which matter when the lattice vectors are nearly parallel). Inside each
//! live period every face whose own moved bounding box intersects the
//! query is kept.

use indexmap::IndexSet;
use std::collections::VecDeque;
use tessel_core::{FaceId, FaceKey, Period, PeriodMatrix, Rect};

const UNIT_OFFSETS: [Period; 8] = [
    Period::new(-1, -1),
    Period::new(-1, 0),
    Period::new(-1, 1),
    Period::new(0, -1),
    Period::new(0, 1),
    Period::new(1, -1),
    Period::new(1, 0),
    Period::new(1, 1),
];

/// Every `(face, bounding box)` whose box intersects `rect`.
///
/// `face_rects` holds the bounding box of each base face at period
/// `(0, 0)`; `touching` yields the periods of faces touching any base face
/// (repeats are fine). `rect` must intersect a face at period `(0, 0)`,
/// otherwise the search has nowhere to start and returns an empty or
/// partial answer. Periods whose offset would overflow `i32` are not
/// explored.
pub fn find_face_cover<I>(
    rect: Rect,
    matrix: &PeriodMatrix,
    face_rects: &[(FaceId, Rect)],
    touching: I,
) -> Vec<(FaceKey, Rect)>
where
    I: IntoIterator<Item = Period>,
{
    let Some(all_faces) = face_rects.iter().map(|(_, r)| *r).reduce(|a, b| a.union(&b)) else {
        return Vec::new();
    };

    let mut neighbours: IndexSet<Period> = UNIT_OFFSETS.into_iter().collect();
    neighbours.extend(touching.into_iter().filter(|p| !p.is_zero()));

    let mut live = Vec::new();
    let mut seen: IndexSet<Period> = IndexSet::new();
    let mut queue = VecDeque::from([Period::ZERO]);
    seen.insert(Period::ZERO);
    while let Some(period) = queue.pop_front() {
        if !all_faces.translate(matrix.offset(period)).intersects(&rect) {
            continue;
        }
        live.push(period);
        for &step in &neighbours {
            let Some(next) = period.checked_add(step) else {
                continue;
            };
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }

    let mut cover = Vec::new();
    for &period in &live {
        let offset = matrix.offset(period);
        for &(face, face_rect) in face_rects {
            let moved = face_rect.translate(offset);
            if moved.intersects(&rect) {
                cover.push((FaceKey { period, face }, moved));
            }
        }
    }
    tracing::debug!(
        periods_explored = seen.len(),
        periods_live = live.len(),
        faces = cover.len(),
        "computed face cover"
    );
    cover
}
