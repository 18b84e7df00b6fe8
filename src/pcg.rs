use rand::{RngCore, SeedableRng};

/// Permuted congruential generator with a 64-bit state and 32-bit output.
///
/// The stream is plain data owned by whoever draws from it. Two streams built
/// from the same seed yield the same sequence forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
}

impl Pcg32 {
    pub const MULTIPLIER: u64 = 6364136223846793005;
    pub const INCREMENT: u64 = 1442695040888963407;

    /// State used when no seed is given.
    pub const DEFAULT_STATE: u64 = 0x4d59_5df4_d0f3_3173;

    /// Seed a new stream.
    ///
    /// One output is discarded so the first returned value is not a direct
    /// function of the raw seed.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32 {
            state: seed.wrapping_add(Self::INCREMENT),
        };
        rng.advance();
        rng
    }

    pub fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    /// Uniform float in `[0, 1]`, both ends included.
    pub fn next_f32(&mut self) -> f32 {
        self.advance() as f32 / u32::MAX as f32
    }

    fn advance(&mut self) -> u32 {
        let old = self.state;
        let count = (old >> 59) as u32;
        self.state = old
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT);
        let xorshifted = ((old ^ (old >> 18)) >> 27) as u32;
        xorshifted.rotate_right(count)
    }
}

impl Default for Pcg32 {
    fn default() -> Self {
        Pcg32 {
            state: Self::DEFAULT_STATE,
        }
    }
}

impl RngCore for Pcg32 {
    fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.advance() as u64;
        let hi = self.advance() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let word = self.advance().to_le_bytes();
            chunk.copy_from_slice(&word[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Pcg32 {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Pcg32::new(u64::from_le_bytes(seed))
    }

    fn seed_from_u64(state: u64) -> Self {
        Pcg32::new(state)
    }
}
