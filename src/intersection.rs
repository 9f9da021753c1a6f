use geo::{Coord, CoordNum, Rect};

/// Pairwise relations between axis aligned rectangles.
pub trait Overlap {
    /// Whether the interiors intersect. Rectangles that only share
    /// an edge or a corner do not overlap.
    fn overlaps(&self, rhs: &Self) -> bool;

    /// Smallest rectangle containing both.
    fn union(&self, rhs: &Self) -> Self;
}

impl<T: CoordNum> Overlap for Rect<T> {
    fn overlaps(&self, rhs: &Self) -> bool {
        let (lhs_min, lhs_max) = (self.min(), self.max());
        let (rhs_min, rhs_max) = (rhs.min(), rhs.max());
        (lhs_min.x < rhs_max.x)
            & (lhs_max.x > rhs_min.x)
            & (lhs_min.y < rhs_max.y)
            & (lhs_max.y > rhs_min.y)
    }

    fn union(&self, rhs: &Self) -> Self {
        let min = operate(self.min(), rhs.min(), |x, y| if x < y { x } else { y });
        let max = operate(self.max(), rhs.max(), |x, y| if x > y { x } else { y });
        Rect::new(min, max)
    }
}

fn operate<T: CoordNum>(lhs: Coord<T>, rhs: Coord<T>, op: impl Fn(T, T) -> T) -> Coord<T> {
    Coord {
        x: op(lhs.x, rhs.x),
        y: op(lhs.y, rhs.y),
    }
}
