//! Seed derivation and seeded shuffling.
//!
//! Both must reproduce previously generated contexts bit for bit, so the
//! arithmetic is pinned: the hash runs over UTF-16 code units with signed
//! 32-bit wraparound, and the shuffle draws from a fixed LCG.

/// Rolling `h * 31 + c` hash over UTF-16 code units, wrapping at 32 bits,
/// returned as the magnitude of the final signed value.
pub fn hash_string(input: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit));
    }
    hash.unsigned_abs()
}

/// Linear congruential generator yielding uniform values in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    const MULTIPLIER: u64 = 9301;
    const INCREMENT: u64 = 49297;
    const MODULUS: u64 = 233_280;

    pub fn new(seed: u32) -> Self {
        Self {
            state: u64::from(seed),
        }
    }

    pub fn next_unit(&mut self) -> f64 {
        self.state = (self.state * Self::MULTIPLIER + Self::INCREMENT) % Self::MODULUS;
        self.state as f64 / Self::MODULUS as f64
    }
}

/// Fisher–Yates shuffle driven by [`SeededRandom`], walking from the back.
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: u32) -> Vec<T> {
    let mut out = items.to_vec();
    let mut rng = SeededRandom::new(seed);
    let mut current = out.len();

    while current != 0 {
        let pick = (rng.next_unit() * current as f64).floor() as usize;
        current -= 1;
        out.swap(current, pick);
    }

    out
}
