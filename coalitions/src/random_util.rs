// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


//! Some utility routines using pseudo-random numbers. All randomness in this crate
//! is injected through these types rather than taken from implicit global state,
//! so that simulations can be made reproducible and partitioned across threads.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// The source of randomness used for the stochastic choices in the pipeline:
/// the posterior draws, and breaking exact ties in seat apportionment.
pub enum Randomness {
    /// Take everything from the given PRNG. Seed it for reproducibility.
    PRNG(ChaCha20Rng),
    /// Never consume randomness; break all ties in favour of whatever is listed
    /// earlier. Useful for tests and callers wanting stable output; it biases
    /// exact-tie cases, which have negligible probability for real vote shares.
    FavourEarlier,
}

impl Randomness {
    /// A seeded PRNG source.
    pub fn from_seed(seed:u64) -> Self {
        Randomness::PRNG(ChaCha20Rng::seed_from_u64(seed))
    }

    /// Make a boolean array of length len such that num_true of them are true.
    /// The PRNG variant chooses the true positions uniformly; FavourEarlier puts
    /// them all at the start.
    /// ```
    /// use coalitions::random_util::Randomness;
    /// let a4_10 = Randomness::from_seed(1).make_array_with_some_randomly_true(10,4);
    /// assert_eq!(10,a4_10.len());
    /// assert_eq!(4,a4_10.iter().filter(|v|**v).count());
    /// assert_eq!(Randomness::FavourEarlier.make_array_with_some_randomly_true(5,2),vec![true,true,false,false,false]);
    /// ```
    pub fn make_array_with_some_randomly_true(&mut self,len:usize,num_true:usize) -> Vec<bool> {
        match self {
            Randomness::PRNG(rng) => make_array_with_some_randomly_true(len,num_true,rng),
            Randomness::FavourEarlier => {
                let mut res = vec![false;len];
                for e in res.iter_mut().take(num_true) { *e=true; }
                res
            }
        }
    }
}

/// Make a boolean array of length len such that num_true of them are true,
/// with the true positions chosen uniformly at random.
pub fn make_array_with_some_randomly_true<R:RngCore + ?Sized>(len:usize,num_true:usize,rng:&mut R) -> Vec<bool> {
    let inverse = num_true>len/2;
    let mut res = vec![inverse;len];
    let mut togo = if inverse {len-num_true} else {num_true};
    while togo>0 {
        let pos = rng.random_range(0..len);
        if res[pos]==inverse { res[pos]=!inverse; togo-=1; }
    }
    res
}

/// An independent PRNG sub-stream for one simulation of a run with the given
/// master seed. Simulation `sim` always gets the same stream, whichever thread
/// it runs on, so a run is bit-identical however the work is partitioned.
pub fn simulation_rng(seed:u64,sim:u64) -> ChaCha20Rng {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    rng.set_stream(1+sim); // stream 0 is left for anything drawing from the master stream directly.
    rng
}
