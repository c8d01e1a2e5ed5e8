/// Octant bit layout shared by construction, lookup and proxy descent.
///
/// Child index bits: 4 = X ≥ mid, 2 = Y ≥ mid, 1 = Z ≥ mid.

use glam::Vec3;

/// Bit set when the point lies on the high side of the X midpoint
pub const OCTANT_X: usize = 4;
/// Bit set when the point lies on the high side of the Y midpoint
pub const OCTANT_Y: usize = 2;
/// Bit set when the point lies on the high side of the Z midpoint
pub const OCTANT_Z: usize = 1;

/// Child octant (0–7) of `point` relative to `midpoint`.
#[inline]
pub fn octant_of(point: Vec3, midpoint: Vec3) -> usize {
    let mut k = 0;
    if point.x >= midpoint.x {
        k |= OCTANT_X;
    }
    if point.y >= midpoint.y {
        k |= OCTANT_Y;
    }
    if point.z >= midpoint.z {
        k |= OCTANT_Z;
    }
    k
}
