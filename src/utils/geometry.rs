use crate::mesh::Point;
use itertools::Itertools;
use std::cmp::Ordering;
use std::ops::{Add, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Collinear,
    Clockwise,
    CounterClockwise,
}

/// Signed integer of 256 bits, `hi * 2^128 + lo`.
///
/// Coordinate differences need 65 bits, so their products and sums do not fit in `i128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Wide {
    hi: i128,
    lo: u128,
}

impl Wide {
    const ZERO: Wide = Wide { hi: 0, lo: 0 };

    fn product(a: i128, b: i128) -> Self {
        const LOW: u128 = u64::MAX as u128;
        let (x, y) = (a.unsigned_abs(), b.unsigned_abs());
        let (x0, x1, y0, y1) = (x & LOW, x >> 64, y & LOW, y >> 64);

        let p00 = x0 * y0;
        let p01 = x0 * y1;
        let p10 = x1 * y0;
        let p11 = x1 * y1;
        let mid = (p00 >> 64) + (p01 & LOW) + (p10 & LOW);

        let magnitude = Wide {
            hi: (p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64)) as i128,
            lo: (p00 & LOW) | ((mid & LOW) << 64),
        };
        if (a < 0) != (b < 0) { -magnitude } else { magnitude }
    }

    fn signum(self) -> Ordering {
        match self.hi.cmp(&0) {
            Ordering::Equal if self.lo != 0 => Ordering::Greater,
            ord => ord,
        }
    }
}

impl Neg for Wide {
    type Output = Wide;

    fn neg(self) -> Wide {
        Wide {
            hi: (!self.hi).wrapping_add((self.lo == 0) as i128),
            lo: (!self.lo).wrapping_add(1),
        }
    }
}

impl Add for Wide {
    type Output = Wide;

    fn add(self, rhs: Wide) -> Wide {
        let (lo, carry) = self.lo.overflowing_add(rhs.lo);
        Wide {
            hi: self.hi + rhs.hi + carry as i128,
            lo,
        }
    }
}

impl Sub for Wide {
    type Output = Wide;

    fn sub(self, rhs: Wide) -> Wide {
        self + -rhs
    }
}

fn diff(a: i64, b: i64) -> i128 {
    a as i128 - b as i128
}

/// Turn made by going from `p` through `q` to `r`.
pub fn orientation(p: &Point, q: &Point, r: &Point) -> Orientation {
    let val = Wide::product(diff(q.y, p.y), diff(r.x, q.x))
        - Wide::product(diff(q.x, p.x), diff(r.y, q.y));
    match val.signum() {
        Ordering::Equal => Orientation::Collinear,
        Ordering::Greater => Orientation::Clockwise,
        Ordering::Less => Orientation::CounterClockwise,
    }
}

/// True if `p` lies on the closed segment `ab`.
pub fn on_segment(a: &Point, b: &Point, p: &Point) -> bool {
    a.x.min(b.x) <= p.x
        && p.x <= a.x.max(b.x)
        && a.y.min(b.y) <= p.y
        && p.y <= a.y.max(b.y)
        && orientation(a, b, p) == Orientation::Collinear
}

/// True if the closed segments `p1q1` and `p2q2` share at least one point.
pub fn segments_intersect(p1: &Point, q1: &Point, p2: &Point, q2: &Point) -> bool {
    let o1 = orientation(p1, q1, p2);
    let o2 = orientation(p1, q1, q2);
    let o3 = orientation(p2, q2, p1);
    let o4 = orientation(p2, q2, q1);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(p1, q1, p2))
        || (o2 == Orientation::Collinear && on_segment(p1, q1, q2))
        || (o3 == Orientation::Collinear && on_segment(p2, q2, p1))
        || (o4 == Orientation::Collinear && on_segment(p2, q2, q1))
}

/// Sign of the shoelace sum: `Greater` for counter-clockwise, `Less` for clockwise and
/// `Equal` for a polygon without area.
pub fn area_sign(polygon: &[Point]) -> Ordering {
    polygon
        .iter()
        .circular_tuple_windows::<(&Point, &Point)>()
        .map(|(a, b)| Wide::product(a.x as i128, b.y as i128) - Wide::product(b.x as i128, a.y as i128))
        .fold(Wide::ZERO, |sum, term| sum + term)
        .signum()
}

pub fn on_polygon_border(p: &Point, polygon: &[Point]) -> bool {
    polygon
        .iter()
        .circular_tuple_windows::<(&Point, &Point)>()
        .any(|(a, b)| on_segment(a, b, p))
}

/// Ray casting towards +x. Points on the border are not reliably classified;
/// test them with [`on_polygon_border`] first.
pub fn inside_polygon(p: &Point, polygon: &[Point]) -> bool {
    let crossings = polygon
        .iter()
        .circular_tuple_windows::<(&Point, &Point)>()
        .filter(|(a, b)| {
            if (a.y > p.y) == (b.y > p.y) {
                return false;
            }
            // p.x < a.x + (b.x - a.x) * (p.y - a.y) / (b.y - a.y), without division
            let den = diff(b.y, a.y);
            let lhs = Wide::product(diff(p.x, a.x), den);
            let rhs = Wide::product(diff(b.x, a.x), diff(p.y, a.y));
            let ord = (lhs - rhs).signum();
            if den > 0 { ord == Ordering::Less } else { ord == Ordering::Greater }
        })
        .count();

    crossings % 2 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
        ]
    }

    #[test]
    fn orientation_of_turns() {
        let (a, b) = (Point::new(0, 0), Point::new(1, 0));
        assert_eq!(orientation(&a, &b, &Point::new(1, 1)), Orientation::CounterClockwise);
        assert_eq!(orientation(&a, &b, &Point::new(1, -1)), Orientation::Clockwise);
        assert_eq!(orientation(&a, &b, &Point::new(3, 0)), Orientation::Collinear);
    }

    #[test]
    fn crossing_and_touching_segments() {
        let p = |x, y| Point::new(x, y);
        assert!(segments_intersect(&p(0, 0), &p(2, 2), &p(0, 2), &p(2, 0)));
        assert!(segments_intersect(&p(0, 0), &p(2, 0), &p(1, 0), &p(1, 3)));
        assert!(segments_intersect(&p(0, 0), &p(2, 0), &p(1, 0), &p(3, 0)));
        assert!(!segments_intersect(&p(0, 0), &p(1, 0), &p(2, 0), &p(3, 0)));
        assert!(!segments_intersect(&p(0, 0), &p(1, 1), &p(0, 1), &p(0, 3)));
    }

    #[test]
    fn shoelace_sign_follows_orientation() {
        let mut sq = square();
        assert_eq!(area_sign(&sq), Ordering::Greater);
        sq.reverse();
        assert_eq!(area_sign(&sq), Ordering::Less);
        assert_eq!(
            area_sign(&[Point::new(0, 0), Point::new(1, 1), Point::new(2, 2)]),
            Ordering::Equal
        );
    }

    #[test]
    fn wide_products_are_exact() {
        let max = i64::MAX as i128 - i64::MIN as i128;
        let sq = Wide::product(max, max);
        assert_eq!(sq.signum(), Ordering::Greater);
        assert_eq!((sq - sq).signum(), Ordering::Equal);
        assert_eq!(Wide::product(-max, max), -sq);
        assert_eq!((Wide::product(max, max - 1) - sq).signum(), Ordering::Less);
        assert_eq!(Wide::product(-3, 4) + Wide::product(3, 4), Wide::ZERO);
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let (lo, hi) = (i64::MIN, i64::MAX);
        let sq = vec![
            Point::new(lo, lo),
            Point::new(hi, lo),
            Point::new(hi, hi),
            Point::new(lo, hi),
        ];
        assert_eq!(area_sign(&sq), Ordering::Greater);
        assert_eq!(orientation(&sq[0], &sq[1], &sq[2]), Orientation::CounterClockwise);
        assert_eq!(orientation(&sq[0], &sq[2], &Point::new(0, 0)), Orientation::Collinear);
        assert!(inside_polygon(&Point::new(0, 0), &sq));
        let tri = [sq[0], sq[1], sq[3]];
        assert!(!inside_polygon(&Point::new(1, 1), &tri));
        assert!(inside_polygon(&Point::new(-1, -1), &tri));
        assert!(on_polygon_border(&Point::new(hi, 7), &sq));
        assert!(segments_intersect(&sq[0], &sq[2], &sq[1], &sq[3]));
    }

    #[test]
    fn point_classification() {
        let sq = square();
        assert!(inside_polygon(&Point::new(2, 2), &sq));
        assert!(!inside_polygon(&Point::new(5, 2), &sq));
        assert!(!inside_polygon(&Point::new(-1, 0), &sq));
        assert!(on_polygon_border(&Point::new(4, 2), &sq));
        assert!(on_polygon_border(&Point::new(0, 0), &sq));
        assert!(!on_polygon_border(&Point::new(2, 2), &sq));
    }

    #[test]
    fn inside_concave_polygon() {
        // U shape opening upwards
        let u = vec![
            Point::new(0, 0),
            Point::new(6, 0),
            Point::new(6, 6),
            Point::new(4, 6),
            Point::new(4, 2),
            Point::new(2, 2),
            Point::new(2, 6),
            Point::new(0, 6),
        ];
        assert!(inside_polygon(&Point::new(1, 4), &u));
        assert!(!inside_polygon(&Point::new(3, 4), &u));
        assert!(inside_polygon(&Point::new(3, 1), &u));
    }
}
