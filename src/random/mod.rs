//! Seedable, named random streams.
//!
//! Every stochastic operation in the engine draws from a stream identified by a type declared
//! with [`define_rng!`]. Streams are created lazily and seeded from a single base seed offset by
//! a hash of the stream's name, so adding draws to one stream never perturbs another.
mod macros;

use std::any::{Any, TypeId};
use std::cell::{RefCell, RefMut};

use log::trace;

pub use macros::define_rng;

use crate::hashing::{hash_str, HashMap};
use crate::rand::distr::uniform::{SampleRange, SampleUniform};
use crate::rand::seq::SliceRandom;
use crate::rand::{Rng, SeedableRng};

pub trait RngId: Copy + Clone {
    type RngType: SeedableRng + 'static;
    fn get_name() -> &'static str;
}

// This is a wrapper that allows for future support for different types of
// random number generators (anything that implements SeedableRng is valid).
struct RngHolder {
    rng: Box<dyn Any>,
}

/// Holds a base seed and the set of streams derived from it. The streams live in a
/// `RefCell` so that sampling only needs a shared borrow of the holder.
pub struct RandomStreams {
    base_seed: u64,
    rng_holders: RefCell<HashMap<TypeId, RngHolder>>,
}

impl RandomStreams {
    #[must_use]
    pub fn new(base_seed: u64) -> Self {
        RandomStreams {
            base_seed,
            rng_holders: RefCell::new(HashMap::default()),
        }
    }

    /// Sets a new base seed. Existing streams are dropped so that they get re-seeded the
    /// next time they are used.
    pub fn init(&mut self, base_seed: u64) {
        trace!("initializing random streams (seed={base_seed})");
        self.base_seed = base_seed;
        self.rng_holders.get_mut().clear();
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    fn get_rng<R: RngId + 'static>(&self) -> RefMut<'_, R::RngType> {
        let base_seed = self.base_seed;
        // Streams are never borrowed across a call back into this holder.
        let rng_holders = self.rng_holders.borrow_mut();
        RefMut::map(rng_holders, |holders| {
            holders
                .entry(TypeId::of::<R>())
                .or_insert_with(|| {
                    trace!(
                        "creating new RNG (seed={}) for stream {}",
                        base_seed,
                        R::get_name()
                    );
                    let seed_offset = hash_str(R::get_name());
                    RngHolder {
                        rng: Box::new(R::RngType::seed_from_u64(
                            base_seed.wrapping_add(seed_offset),
                        )),
                    }
                })
                .rng
                .downcast_mut::<R::RngType>()
                .expect("rng stream registered under a mismatched type")
        })
    }

    /// Applies `sampler` to the generator of the stream `R`. The sampler must not call back
    /// into this `RandomStreams`.
    pub fn sample<R: RngId + 'static, T>(
        &self,
        _rng_id: R,
        sampler: impl FnOnce(&mut R::RngType) -> T,
    ) -> T {
        let mut rng = self.get_rng::<R>();
        sampler(&mut rng)
    }

    /// Gets a random sample within `range` from the stream `R`.
    pub fn sample_range<R: RngId + 'static, S, T>(&self, rng_id: R, range: S) -> T
    where
        R::RngType: Rng,
        S: SampleRange<T>,
        T: SampleUniform,
    {
        self.sample(rng_id, |rng| rng.random_range(range))
    }

    /// Returns true with probability `p`, which must lie in `[0, 1]`.
    pub fn sample_bool<R: RngId + 'static>(&self, rng_id: R, p: f64) -> bool
    where
        R::RngType: Rng,
    {
        self.sample(rng_id, |rng| rng.random_bool(p))
    }

    /// Shuffles `items` in place using the stream `R`.
    pub fn shuffle<R: RngId + 'static, T>(&self, rng_id: R, items: &mut [T])
    where
        R::RngType: Rng,
    {
        self.sample(rng_id, |rng| items.shuffle(rng));
    }
}

impl Default for RandomStreams {
    fn default() -> Self {
        RandomStreams::new(0)
    }
}
