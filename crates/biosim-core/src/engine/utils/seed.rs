//! Input-derived seeds.
//!
//! Every random stream in the engines is seeded from a hash of the request, so that the
//! same inputs always reproduce the same output.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Incremental 64-bit FNV-1a hasher over request fields.
///
/// Fields are separated by a unit-separator byte so that `("ab", "c")` and `("a", "bc")`
/// hash differently.
#[derive(Debug, Clone, Copy)]
pub struct SeedBuilder {
    state: u64,
}

impl Default for SeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedBuilder {
    pub fn new() -> Self {
        Self {
            state: FNV_OFFSET_BASIS,
        }
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    fn field(mut self, bytes: &[u8]) -> Self {
        self.write(bytes);
        self.write(&[0x1f]);
        self
    }

    pub fn with_str(self, value: &str) -> Self {
        self.field(value.as_bytes())
    }

    pub fn with_u64(self, value: u64) -> Self {
        self.field(&value.to_le_bytes())
    }

    /// Hashes the bit pattern; `-0.0` is folded into `0.0`.
    pub fn with_f64(self, value: f64) -> Self {
        let value = if value == 0.0 { 0.0 } else { value };
        self.field(&value.to_bits().to_le_bytes())
    }

    pub fn finish(&self) -> u64 {
        self.state
    }
}

/// Derives the seed of the `index`-th independent stream of a run (SplitMix64 finaliser).
pub fn stream_seed(base: u64, index: u64) -> u64 {
    let mut z = base.wrapping_add(index.wrapping_add(1).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
