//! 2D rotation and reflection utilities.
//!
//! A polyomino has at most 8 orientations in the plane: 4 quarter turns,
//! each with or without a horizontal mirror. Every transform here is pure,
//! allocates a new shape and renormalizes it so the bounding box touches the
//! origin.

use rustc_hash::FxHashSet;

use crate::pieces::Coord;

/// Number of distinct quarter turns.
pub const NUM_ROTATIONS: u8 = 4;

/// Rotates a shape 90 degrees clockwise: `(x, y) -> (y, -x)`.
pub fn rotate_clockwise_90(shape: &[Coord]) -> Vec<Coord> {
    normalize_to_origin(shape.iter().map(|&(x, y)| (y, -x)).collect())
}

/// Mirrors a shape across the vertical axis: `(x, y) -> (-x, y)`.
pub fn mirror_horizontal(shape: &[Coord]) -> Vec<Coord> {
    normalize_to_origin(shape.iter().map(|&(x, y)| (-x, y)).collect())
}

/// Applies an orientation to a canonical shape.
///
/// The mirror is applied first, then `rotation % 4` clockwise turns. Deriving
/// from the same `(rotation, mirrored)` pair always yields the same cells in
/// the same order.
pub fn derive_current_shape(canonical: &[Coord], rotation: u8, mirrored: bool) -> Vec<Coord> {
    let mut shape = if mirrored {
        mirror_horizontal(canonical)
    } else {
        normalize_to_origin(canonical.to_vec())
    };
    for _ in 0..rotation % NUM_ROTATIONS {
        shape = rotate_clockwise_90(&shape);
    }
    shape
}

/// Translates coordinates so the minimum x and y values are both zero,
/// then sorts them.
///
/// Sorting gives every shape a single canonical cell order, so two shapes that
/// differ only by translation or cell order compare equal.
pub fn normalize_to_origin(mut cells: Vec<Coord>) -> Vec<Coord> {
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);

    for (x, y) in &mut cells {
        *x -= min_x;
        *y -= min_y;
    }

    cells.sort_unstable();
    cells
}

/// Returns true if both shapes cover the same cells once normalized.
pub fn same_shape(a: &[Coord], b: &[Coord]) -> bool {
    a.len() == b.len() && normalize_to_origin(a.to_vec()) == normalize_to_origin(b.to_vec())
}

/// Offsets every cell of a shape by `anchor`.
///
/// Saturates instead of overflowing: an anchor near the `i32` limits yields
/// cells pinned at the limit, which no board can contain.
#[inline]
pub fn translate(shape: &[Coord], anchor: Coord) -> impl Iterator<Item = Coord> + '_ {
    shape
        .iter()
        .map(move |&(x, y)| (x.saturating_add(anchor.0), y.saturating_add(anchor.1)))
}

/// One distinct orientation of a shape, with the first `(rotation, mirrored)`
/// pair that produces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Orientation {
    pub rotation: u8,
    pub mirrored: bool,
    pub cells: Vec<Coord>,
}

/// Generates all unique orientations of a shape.
///
/// Pairs are visited unmirrored first, each with rotations 0 through 3, and a
/// pair is kept only if its cells differ from every earlier one. Symmetric
/// shapes have fewer than 8 orientations.
pub fn distinct_orientations(shape: &[Coord]) -> Vec<Orientation> {
    let mut seen: FxHashSet<Vec<Coord>> = FxHashSet::default();
    let mut orientations = Vec::with_capacity(8);

    for mirrored in [false, true] {
        for rotation in 0..NUM_ROTATIONS {
            let cells = derive_current_shape(shape, rotation, mirrored);
            if seen.insert(cells.clone()) {
                orientations.push(Orientation {
                    rotation,
                    mirrored,
                    cells,
                });
            }
        }
    }

    orientations
}
