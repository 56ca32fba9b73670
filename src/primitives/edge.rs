//! Unordered 2D edge.

use super::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// An undirected edge between two points.
///
/// The endpoints are stored lexicographically sorted, so `Edge::new(a, b)`
/// and `Edge::new(b, a)` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Edge<F> {
    start: Point2<F>,
    end: Point2<F>,
}

impl<F: Float> Edge<F> {
    /// Creates the canonical edge joining `a` and `b`.
    #[inline]
    pub fn new(a: Point2<F>, b: Point2<F>) -> Self {
        if b.lex_cmp(&a) == Ordering::Less {
            Self { start: b, end: a }
        } else {
            Self { start: a, end: b }
        }
    }

    /// The lexicographically smaller endpoint.
    #[inline]
    pub fn start(&self) -> Point2<F> {
        self.start
    }

    /// The lexicographically larger endpoint.
    #[inline]
    pub fn end(&self) -> Point2<F> {
        self.end
    }

    /// Lexicographic ordering by start, then end, for sorting an edge buffer.
    #[inline]
    pub fn lex_cmp(&self, other: &Self) -> Ordering {
        self.start
            .lex_cmp(&other.start)
            .then_with(|| self.end.lex_cmp(&other.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_is_unordered() {
        let a = Point2::new(1.0_f64, 0.0);
        let b = Point2::new(0.0, 2.0);
        assert_eq!(Edge::new(a, b), Edge::new(b, a));
        assert_eq!(Edge::new(a, b).start(), b);
        assert_eq!(Edge::new(a, b).end(), a);
    }

    #[test]
    fn test_edge_sorting_groups_duplicates() {
        let p = |x: f64, y: f64| Point2::new(x, y);
        let mut edges = vec![
            Edge::new(p(1.0, 1.0), p(0.0, 0.0)),
            Edge::new(p(2.0, 0.0), p(0.0, 0.0)),
            Edge::new(p(0.0, 0.0), p(1.0, 1.0)),
        ];
        edges.sort_by(Edge::lex_cmp);
        assert_eq!(edges[0], edges[1]);
        assert_ne!(edges[1], edges[2]);
    }
}
