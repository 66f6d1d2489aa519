use tracing::debug;

use crate::error::{NoiseError, Result};
use crate::rng::{RandomSource, UniformInt};

pub const TABLE_SIZE: usize = 256;

// Random permutation of 0..=255 stored twice (512 entries)
// Doubling lets `perm[perm[x] + y]` skip a modulo on the inner index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; TABLE_SIZE * 2],
}

impl PermutationTable {
    // Top-down Fisher–Yates: for j = 255..=0 swap perm[j] with perm[gen_int(0, j)].
    // The draw order is fixed so a seeded source always yields the same table.
    pub fn shuffled<R: UniformInt + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut p = [0u8; TABLE_SIZE];
        for (i, v) in p.iter_mut().enumerate() {
            *v = i as u8;
        }
        for i in 0..TABLE_SIZE {
            let j = TABLE_SIZE - 1 - i;
            // j == 0 draws from [0, 0]
            let idx = rng.gen_int(0, j as i64)? as usize;
            p.swap(j, idx);
        }
        Ok(Self::doubled(&p))
    }

    // Convenience for the common case of a concrete RandomSource
    pub fn from_source(rng: &mut RandomSource) -> Result<Self> {
        let table = Self::shuffled(rng)?;
        debug!(seed = ?rng.seed(), "built permutation table");
        Ok(table)
    }

    // Build from a caller-supplied 256-entry permutation
    pub fn from_base(base: &[u8]) -> Result<Self> {
        if base.len() != TABLE_SIZE {
            return Err(NoiseError::InvalidPermutation(format!(
                "expected {} entries, got {}",
                TABLE_SIZE,
                base.len()
            )));
        }
        let mut seen = [false; TABLE_SIZE];
        for &v in base {
            if seen[v as usize] {
                return Err(NoiseError::InvalidPermutation(format!(
                    "value {} appears more than once",
                    v
                )));
            }
            seen[v as usize] = true;
        }
        let mut p = [0u8; TABLE_SIZE];
        p.copy_from_slice(base);
        Ok(Self::doubled(&p))
    }

    fn doubled(p: &[u8; TABLE_SIZE]) -> Self {
        let mut perm = [0u8; TABLE_SIZE * 2];
        for i in 0..TABLE_SIZE * 2 {
            perm[i] = p[i & 255];
        }
        Self { perm }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.perm
    }

    // Lattice hash of corner (x, y); coordinates are taken mod 256
    #[inline]
    pub fn hash(&self, x: usize, y: usize) -> u8 {
        self.perm[self.perm[x & 255] as usize + (y & 255)]
    }
}
