// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


//! Turn a vote-share vector into an integer seat allocation with a highest-averages
//! divisor method. The method (the divisor sequence) is pluggable; the default used
//! by the pipeline is Sainte-Laguë/Schepers, the rule of the German Bundestag.
//!
//! This module does no electoral-threshold filtering; callers must remove
//! ineligible parties before apportioning.

use serde::{Serialize,Deserialize};
use thiserror::Error;
use crate::random_util::Randomness;

#[derive(Error,Debug)]
pub enum ApportionmentError {
    #[error("Cannot apportion seats among zero parties.")]
    NoParties,
    #[error("Party at index {party} has invalid vote value {votes}; votes must be finite and non-negative.")]
    BadVotes{ party : usize, votes : f64 },
    #[error("Total seats must be at least 1, asked for {0}.")]
    TooFewSeats(usize),
}

/// A highest-averages apportionment rule, characterized by its divisor sequence.
/// A party already holding `seat_index` seats competes for its next seat with the
/// quotient votes/divisor(seat_index).
pub trait DivisorMethod {
    fn divisor(&self,seat_index:usize) -> f64;
    fn name(&self) -> &'static str;
}

/// Sainte-Laguë/Schepers: divisors 1,3,5,7,…
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct SainteLague;
impl DivisorMethod for SainteLague {
    fn divisor(&self,seat_index:usize) -> f64 { (2*seat_index+1) as f64 }
    fn name(&self) -> &'static str { "Sainte-Laguë/Schepers" }
}

/// D'Hondt: divisors 1,2,3,4,… Favours larger parties relative to Sainte-Laguë.
#[derive(Debug,Clone,Copy,Serialize,Deserialize)]
pub struct DHondt;
impl DivisorMethod for DHondt {
    fn divisor(&self,seat_index:usize) -> f64 { (seat_index+1) as f64 }
    fn name(&self) -> &'static str { "D'Hondt" }
}

/// Allocate `total_seats` seats to parties in proportion to `votes` under the given
/// divisor method. The result has one entry per party, in the same order as `votes`,
/// and always sums to exactly `total_seats`.
///
/// Quotients that are exactly tied at the cutoff rank are broken through
/// `randomness` - uniformly at random for the PRNG variant. Callers wanting
/// reproducible output should seed the PRNG (or use `Randomness::FavourEarlier`).
/// ```
/// use coalitions::apportionment::{apportion, SainteLague};
/// use coalitions::random_util::Randomness;
/// let seats = apportion(&SainteLague,&[8.0,5.0,2.0],10,&mut Randomness::FavourEarlier).unwrap();
/// assert_eq!(seats,vec![6,3,1]);
/// ```
pub fn apportion<M:DivisorMethod+?Sized>(method:&M,votes:&[f64],total_seats:usize,randomness:&mut Randomness) -> Result<Vec<usize>,ApportionmentError> {
    if votes.is_empty() { return Err(ApportionmentError::NoParties); }
    if total_seats<1 { return Err(ApportionmentError::TooFewSeats(total_seats)); }
    for (party,&v) in votes.iter().enumerate() {
        if !(v.is_finite()&&v>=0.0) { return Err(ApportionmentError::BadVotes{party,votes:v}); }
    }
    // Pool (party,quotient) pairs over the first total_seats divisors of every party;
    // no party can win more seats than that.
    let mut pool : Vec<(usize,f64)> = Vec::with_capacity(votes.len()*total_seats);
    for (party,&v) in votes.iter().enumerate() {
        for seat_index in 0..total_seats {
            pool.push((party,v/method.divisor(seat_index)));
        }
    }
    // Stable sort, so pairs with equal quotients stay in party-then-divisor order,
    // which is what FavourEarlier tie-breaking relies on.
    pool.sort_by(|a,b|b.1.total_cmp(&a.1));
    let mut seats = vec![0;votes.len()];
    let cutoff = pool[total_seats-1].1;
    let clearly_in = pool.iter().position(|&(_,q)|q==cutoff).unwrap(); // position exists: pool[total_seats-1] itself matches.
    for &(party,_) in &pool[..clearly_in] { seats[party]+=1; }
    // Everything with quotient above the cutoff value is in; the remaining seats are
    // drawn from the pairs exactly equal to it.
    let tied : Vec<usize> = pool[clearly_in..].iter().take_while(|&&(_,q)|q==cutoff).map(|&(party,_)|party).collect();
    let chosen = randomness.make_array_with_some_randomly_true(tied.len(),total_seats-clearly_in);
    for (party,&take) in tied.iter().zip(chosen.iter()) {
        if take { seats[*party]+=1; }
    }
    let allocated : usize = seats.iter().sum();
    assert_eq!(allocated,total_seats,"apportionment assigned {} seats instead of {}; this indicates a ranking or tie-break bug",allocated,total_seats);
    Ok(seats)
}
