use serde::{Deserialize, Serialize};

/// Axial hex-grid coordinate, supplied per area by the world builder.
/// The core never derives these from geometry; it only walks them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Axial {
    pub q: i32,
    pub r: i32,
}

impl Axial {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    fn offset(self, dir: (i32, i32), steps: i32) -> Self {
        Self {
            q: self.q + dir.0 * steps,
            r: self.r + dir.1 * steps,
        }
    }
}

/// The six axial neighbor directions, in the order the spiral walks them.
const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (1, -1), (0, -1), (-1, 0), (-1, 1), (0, 1)];

/// Deterministic outward spiral over hex coordinates: the center first, then
/// ring 1, ring 2, and so on. Each ring starts at the south-western cell and
/// walks the six directions in order. `next()` never ends; callers bound
/// their own retry budget.
#[derive(Debug, Clone, PartialEq)]
pub struct HexSpiral {
    center: Axial,
    current: Axial,
    radius: i32,
    leg: usize,
    step: i32,
    emitted_in_ring: i32,
    started: bool,
}

impl HexSpiral {
    pub fn new(center: Axial) -> Self {
        Self {
            center,
            current: center,
            radius: 0,
            leg: 0,
            step: 0,
            emitted_in_ring: 0,
            started: false,
        }
    }

    /// Restart the spiral from a (possibly new) center.
    pub fn set_center(&mut self, center: Axial) {
        *self = Self::new(center);
    }

    pub fn center(&self) -> Axial {
        self.center
    }

    /// The next coordinate of the spiral.
    pub fn next(&mut self) -> Axial {
        if !self.started {
            self.started = true;
            return self.center;
        }
        if self.radius == 0 || self.emitted_in_ring == 6 * self.radius {
            self.radius += 1;
            self.current = self.center.offset(DIRECTIONS[4], self.radius);
            self.leg = 0;
            self.step = 0;
            self.emitted_in_ring = 1;
            return self.current;
        }
        self.current = self.current.offset(DIRECTIONS[self.leg], 1);
        self.step += 1;
        if self.step == self.radius {
            self.leg += 1;
            self.step = 0;
        }
        self.emitted_in_ring += 1;
        self.current
    }
}

impl Default for HexSpiral {
    fn default() -> Self {
        Self::new(Axial::default())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn hex_distance(a: Axial, b: Axial) -> i32 {
        let dq = a.q - b.q;
        let dr = a.r - b.r;
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }

    #[test]
    fn first_cell_is_the_center() {
        let mut spiral = HexSpiral::new(Axial::new(3, -2));
        assert_eq!(spiral.next(), Axial::new(3, -2));
    }

    #[test]
    fn first_ring_is_the_six_neighbors() {
        let center = Axial::new(0, 0);
        let mut spiral = HexSpiral::new(center);
        spiral.next();
        let ring: BTreeSet<Axial> = (0..6).map(|_| spiral.next()).collect();
        assert_eq!(ring.len(), 6);
        for cell in &ring {
            assert_eq!(hex_distance(*cell, center), 1);
        }
    }

    #[test]
    fn rings_grow_and_do_not_repeat() {
        let center = Axial::new(1, 1);
        let mut spiral = HexSpiral::new(center);
        let mut seen = BTreeSet::new();
        // center + rings 1..=4: 1 + 6 + 12 + 18 + 24 cells
        for _ in 0..61 {
            let cell = spiral.next();
            assert!(seen.insert(cell), "repeated cell {cell:?}");
            assert!(hex_distance(cell, center) <= 4);
        }
        // Ring 4 fully covered
        let ring4 = seen.iter().filter(|c| hex_distance(**c, center) == 4).count();
        assert_eq!(ring4, 24);
    }

    #[test]
    fn set_center_restarts() {
        let mut spiral = HexSpiral::new(Axial::new(0, 0));
        for _ in 0..10 {
            spiral.next();
        }
        spiral.set_center(Axial::new(5, 5));
        assert_eq!(spiral.next(), Axial::new(5, 5));
    }
}
