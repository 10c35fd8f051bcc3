pub mod dcel;
pub mod polygon;

use nalgebra::Point2;
use std::fmt;

/// Integer mesh coordinates as they appear in the input files.
pub type Point = Point2<i64>;

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub usize);

        impl $name {
            /// Builds an id from the 1-based number used in the text formats.
            pub fn from_number(number: usize) -> Self {
                debug_assert!(number > 0);
                Self(number - 1)
            }

            /// 1-based number used in the text formats.
            pub fn number(self) -> usize {
                self.0 + 1
            }

            pub fn index(self) -> usize {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.number())
            }
        }
    };
}

arena_id!(
    /// Position of a vertex in its mesh.
    VertexId
);
arena_id!(
    /// Position of a half-edge in its DCEL.
    HalfEdgeId
);
arena_id!(
    /// Position of a face in its mesh.
    FaceId
);

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Bounds {
    /// Box around `points`, or the unit square when there are none.
    pub fn of<'a>(points: impl IntoIterator<Item = &'a Point>) -> Self {
        let mut points = points.into_iter().map(|p| Point2::new(p.x as f64, p.y as f64));
        let Some(first) = points.next() else {
            return Self {
                min: Point2::new(0., 0.),
                max: Point2::new(1., 1.),
            };
        };

        points.fold(Self { min: first, max: first }, |b, p| Self {
            min: Point2::new(b.min.x.min(p.x), b.min.y.min(p.y)),
            max: Point2::new(b.max.x.max(p.x), b.max.y.max(p.y)),
        })
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

pub(crate) fn to_world(p: &Point) -> Point2<f64> {
    Point2::new(p.x as f64, p.y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_one_based() {
        assert_eq!(VertexId(0).to_string(), "1");
        assert_eq!(HalfEdgeId::from_number(8), HalfEdgeId(7));
        assert_eq!(FaceId(2).number(), 3);
    }

    #[test]
    fn bounds_cover_all_points() {
        let pts = [Point::new(3, -1), Point::new(-2, 4), Point::new(0, 0)];
        let b = Bounds::of(&pts);
        assert_eq!(b.min, Point2::new(-2., -1.));
        assert_eq!(b.max, Point2::new(3., 4.));
        assert_eq!(b.width(), 5.);
        assert_eq!(b.height(), 5.);
    }

    #[test]
    fn empty_bounds_fall_back_to_unit_square() {
        let b = Bounds::of(std::iter::empty());
        assert_eq!(b.width(), 1.);
        assert_eq!(b.height(), 1.);
    }
}
