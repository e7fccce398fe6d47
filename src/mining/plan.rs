//! Boustrophedon excavation plan over an axis-aligned region.
//!
//! The plan walks a primary horizontal axis away from the first corner,
//! sweeps the secondary axis in alternating directions to avoid long
//! reversals, and empties each column top to bottom.

use crate::core::BlockPos;

/// Inclusive walk from `from` to `to` in either direction.
fn walk(from: i32, to: i32) -> impl Iterator<Item = i32> {
    let step = if to >= from { 1 } else { -1 };
    let len = (to - from).abs() + 1;
    (0..len).map(move |i| from + i * step)
}

/// Generate the ordered cell sequence for the box spanned by two corners.
///
/// Deterministic and total: any two corners, distinct or coincident,
/// produce a plan covering each cell of their bounding box exactly once.
/// The walk starts at `pos1`'s end of the primary axis.
pub fn generate_plan(pos1: BlockPos, pos2: BlockPos) -> Vec<BlockPos> {
    let min = BlockPos::new(
        pos1.x.min(pos2.x),
        pos1.y.min(pos2.y),
        pos1.z.min(pos2.z),
    );
    let max = BlockPos::new(
        pos1.x.max(pos2.x),
        pos1.y.max(pos2.y),
        pos1.z.max(pos2.z),
    );

    let x_span = (pos2.x - pos1.x).abs();
    let z_span = (pos2.z - pos1.z).abs();
    // Ties walk along z.
    let walk_along_z = z_span >= x_span;

    let mut plan = Vec::with_capacity(box_volume(min, max));

    if walk_along_z {
        for (slice, z) in walk(pos1.z, pos2.z).enumerate() {
            let reverse = slice % 2 == 1;
            let (from, to) = if reverse { (max.x, min.x) } else { (min.x, max.x) };
            for x in walk(from, to) {
                for y in walk(max.y, min.y) {
                    plan.push(BlockPos::new(x, y, z));
                }
            }
        }
    } else {
        for (slice, x) in walk(pos1.x, pos2.x).enumerate() {
            let reverse = slice % 2 == 1;
            let (from, to) = if reverse { (max.z, min.z) } else { (min.z, max.z) };
            for z in walk(from, to) {
                for y in walk(max.y, min.y) {
                    plan.push(BlockPos::new(x, y, z));
                }
            }
        }
    }

    plan
}

/// Cell count of the box spanned by ordered corners, saturating instead
/// of overflowing: large corner spans overflow `i32` well before they
/// exhaust an address space, and this value only sizes an allocation.
fn box_volume(min: BlockPos, max: BlockPos) -> usize {
    let sx = (i64::from(max.x) - i64::from(min.x) + 1) as usize;
    let sy = (i64::from(max.y) - i64::from(min.y) + 1) as usize;
    let sz = (i64::from(max.z) - i64::from(min.z) + 1) as usize;
    sx.saturating_mul(sy).saturating_mul(sz)
}

/// Bounding box of the original two corners.
///
/// Used only to judge whether an incidentally found obstructing cell is in
/// scope for opportunistic mining.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perimeter {
    min: BlockPos,
    max: BlockPos,
}

impl Perimeter {
    /// Build the perimeter from two unordered corners.
    pub fn new(pos1: BlockPos, pos2: BlockPos) -> Self {
        Self {
            min: BlockPos::new(
                pos1.x.min(pos2.x),
                pos1.y.min(pos2.y),
                pos1.z.min(pos2.z),
            ),
            max: BlockPos::new(
                pos1.x.max(pos2.x),
                pos1.y.max(pos2.y),
                pos1.z.max(pos2.z),
            ),
        }
    }

    /// Whether a cell lies inside the box.
    #[inline]
    pub fn contains(&self, pos: BlockPos) -> bool {
        pos.x >= self.min.x
            && pos.x <= self.max.x
            && pos.y >= self.min.y
            && pos.y <= self.max.y
            && pos.z >= self.min.z
            && pos.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_plan_covers_box_exactly_once() {
        let plan = generate_plan(BlockPos::new(0, 70, 0), BlockPos::new(2, 68, 2));
        assert_eq!(plan.len(), 27);

        let unique: HashSet<_> = plan.iter().copied().collect();
        assert_eq!(unique.len(), 27);
        for x in 0..=2 {
            for y in 68..=70 {
                for z in 0..=2 {
                    assert!(unique.contains(&BlockPos::new(x, y, z)));
                }
            }
        }
    }

    #[test]
    fn test_first_column_top_to_bottom() {
        let plan = generate_plan(BlockPos::new(0, 70, 0), BlockPos::new(2, 68, 2));
        assert_eq!(
            &plan[..3],
            &[
                BlockPos::new(0, 70, 0),
                BlockPos::new(0, 69, 0),
                BlockPos::new(0, 68, 0)
            ]
        );
    }

    #[test]
    fn test_boustrophedon_alternation() {
        // 4x1x3 slab walked along x (x span 3 > z span 2).
        let plan = generate_plan(BlockPos::new(0, 64, 0), BlockPos::new(3, 64, 2));
        let slice_z: Vec<Vec<i32>> = (0..=3)
            .map(|x| {
                plan.iter()
                    .filter(|p| p.x == x)
                    .map(|p| p.z)
                    .collect::<Vec<_>>()
            })
            .collect();
        assert_eq!(slice_z[0], vec![0, 1, 2]);
        assert_eq!(slice_z[1], vec![2, 1, 0]);
        assert_eq!(slice_z[2], vec![0, 1, 2]);
        assert_eq!(slice_z[3], vec![2, 1, 0]);
    }

    #[test]
    fn test_walk_starts_at_first_corner() {
        // pos1 at the high-z end: the walk must start there.
        let plan = generate_plan(BlockPos::new(0, 64, 5), BlockPos::new(0, 64, 0));
        assert_eq!(plan[0], BlockPos::new(0, 64, 5));
        assert_eq!(plan.last(), Some(&BlockPos::new(0, 64, 0)));
    }

    #[test]
    fn test_box_volume_survives_huge_spans() {
        // Spans whose product overflows i32 must not panic the sizing.
        let min = BlockPos::new(0, 0, 0);
        assert_eq!(
            box_volume(min, BlockPos::new(46340, 0, 46341)),
            46_341 * 46_342
        );
        // Full-range corners saturate rather than wrap.
        assert_eq!(
            box_volume(
                BlockPos::new(i32::MIN, i32::MIN, i32::MIN),
                BlockPos::new(i32::MAX, i32::MAX, i32::MAX)
            ),
            usize::MAX
        );
    }

    #[test]
    fn test_coincident_corners() {
        let p = BlockPos::new(7, -3, 7);
        assert_eq!(generate_plan(p, p), vec![p]);
    }

    #[test]
    fn test_perimeter_membership() {
        let perimeter = Perimeter::new(BlockPos::new(2, 68, 0), BlockPos::new(0, 70, 2));
        assert!(perimeter.contains(BlockPos::new(1, 69, 1)));
        assert!(perimeter.contains(BlockPos::new(0, 68, 0)));
        assert!(!perimeter.contains(BlockPos::new(3, 69, 1)));
        assert!(!perimeter.contains(BlockPos::new(1, 71, 1)));
    }
}
