/// Two particle indices that may be touching.
///
/// The order is the order the broad phase found them in and is kept as is:
/// the contact normal points from `a` to `b`, and resolution results depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    pub a: usize,
    pub b: usize,
}

impl CollisionPair {
    /// Creates a new collision pair
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Checks if this collision pair contains the specified particle
    pub fn contains(&self, particle: usize) -> bool {
        self.a == particle || self.b == particle
    }

    /// Returns the other particle in the pair
    pub fn other(&self, particle: usize) -> Option<usize> {
        if self.a == particle {
            Some(self.b)
        } else if self.b == particle {
            Some(self.a)
        } else {
            None
        }
    }

    /// The same pair with the smaller index first, for order-independent comparison
    pub fn unordered(&self) -> (usize, usize) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}
