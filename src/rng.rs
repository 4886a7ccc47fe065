use std::collections::HashMap;

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const SEEDING_STREAM: &str = "seeding";
pub const SIMULATION_STREAM: &str = "simulation";

/// Named, independent random streams derived from one master seed.
///
/// A stream's seed depends only on the master seed and the stream name, so
/// the order in which streams are first requested does not matter.
pub struct RngManager {
    seed: u64,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            streams: HashMap::new(),
        }
    }

    /// Seeds from OS entropy. The chosen seed is available through [`RngManager::seed`].
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn stream(&mut self, name: &str) -> StreamRng<'_> {
        let seed = derive_seed(self.seed, name);
        let inner = self
            .streams
            .entry(name.to_string())
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(seed));
        StreamRng { inner }
    }
}

fn derive_seed(master: u64, name: &str) -> u64 {
    let mut seed = master
        .wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407);
    for byte in name.bytes() {
        seed ^= byte as u64;
        seed = seed.wrapping_mul(0x100000001b3);
    }
    seed
}

pub struct StreamRng<'a> {
    inner: &'a mut ChaCha8Rng,
}

impl<'a> RngCore for StreamRng<'a> {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}

/// Replays a fixed sequence of unit-interval draws, then repeats the last one.
///
/// `rng.gen::<f64>()` on this source yields (to within 2^-53) the scripted
/// values, which makes every probabilistic decision in the simulation
/// controllable from tests.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    draws: Vec<u64>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(draws: &[f64]) -> Self {
        assert!(!draws.is_empty(), "scripted rng needs at least one draw");
        let draws = draws
            .iter()
            .map(|&unit| {
                let unit = unit.clamp(0.0, 1.0 - f64::EPSILON);
                ((unit * (1u64 << 53) as f64) as u64) << 11
            })
            .collect();
        Self { draws, cursor: 0 }
    }

    /// Every draw is `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(&[value])
    }

    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RngCore for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let index = self.cursor.min(self.draws.len() - 1);
        self.cursor += 1;
        self.draws[index]
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}
