use pathviz_core::Point;

/// Manhattan (L1) distance between two points — the shortest possible hop
/// count between them under cardinal movement.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_basics() {
        assert_eq!(manhattan(Point::new(0, 0), Point::new(0, 0)), 0);
        assert_eq!(manhattan(Point::new(1, 2), Point::new(4, 6)), 7);
        assert_eq!(manhattan(Point::new(4, 6), Point::new(1, 2)), 7);
    }
}
