//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic per seed, so a whole race can be replayed.

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Uniform integer in the half-open range [low, high).
    ///
    /// # Panics
    /// If `high <= low`: an empty range has no value to return.
    pub fn range(&mut self, low: i32, high: i32) -> i32 {
        assert!(high > low, "Rng::range: empty range [{}, {})", low, high);
        let span = (high as i64 - low as i64) as u64;
        (low as i64 + (self.next_u64() % span) as i64) as i32
    }

    /// Pick an element of a slice, or None if it is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        items.get(self.next_int(items.len() as u32) as usize)
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(1)
    }
}
