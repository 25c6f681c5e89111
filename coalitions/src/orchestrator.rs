// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


//! The pipeline composing everything: posterior draws, per-draw seat allocation,
//! majority evaluation, and aggregation into the final probability table for one
//! survey. Intermediate draws, seats and majority tables are discarded; only the
//! probabilities and the survey's identifying metadata are returned.

use std::thread;
use serde::{Serialize,Deserialize};
use thiserror::Error;
use crate::apportionment::{apportion, ApportionmentError, DivisorMethod};
use crate::coalition::{Coalition, CoalitionError};
use crate::majority::SeatAllocations;
use crate::posterior::{Posterior, PosteriorError};
use crate::probability::{probabilities, CoalitionProbability};
use crate::random_util::{simulation_rng, Randomness};
use crate::scenario::{Scenario, ScenarioError};
use crate::survey::{Survey, SurveyError, SurveyMetadata};

/// Anything that can go wrong producing a survey's probability table. There is no
/// partial success: either the whole table is produced or one of these comes back.
#[derive(Error,Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Survey(#[from] SurveyError),
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    #[error(transparent)]
    Posterior(#[from] PosteriorError),
    #[error(transparent)]
    Apportionment(#[from] ApportionmentError),
    #[error(transparent)]
    Coalition(#[from] CoalitionError),
    #[error("In simulation {simulation} no party reached the electoral threshold, so no seats could be allocated.")]
    NoEligibleParties{ simulation : usize },
}

/// The terminal output for one survey: its metadata and one probability per
/// coalition of the catalogue.
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct CoalitionProbabilities {
    pub survey : SurveyMetadata,
    pub probabilities : Vec<CoalitionProbability>,
}

/// Run the whole pipeline for one survey: `scenario.nsim` posterior draws, a seat
/// allocation for each under `method`, majority evaluation against `coalitions`
/// (the default catalogue if None), and aggregation into percentages.
pub fn simulate_survey<M:DivisorMethod>(survey:&Survey,coalitions:Option<&[Coalition]>,method:&M,scenario:&Scenario) -> Result<CoalitionProbabilities,SimulationError> {
    survey.validate()?;
    scenario.validate()?;
    let posterior = Posterior::from_survey(survey,scenario.correction)?;
    let seats = allocate_seat_range(survey,&posterior,method,scenario,0,scenario.nsim)?;
    aggregate(survey,coalitions,scenario,seats)
}

/// As [simulate_survey], with the simulations split over `num_threads` threads.
/// Each simulation has its own random sub-stream, so this produces bit-identical
/// results to the single-threaded version.
pub fn simulate_survey_multithreaded<M:DivisorMethod+Sync>(survey:&Survey,coalitions:Option<&[Coalition]>,method:&M,scenario:&Scenario,num_threads:usize) -> Result<CoalitionProbabilities,SimulationError> {
    survey.validate()?;
    scenario.validate()?;
    let num_threads = num_threads.max(1);
    let posterior = Posterior::from_survey(survey,scenario.correction)?;
    let mut partials : Vec<Result<Vec<Vec<usize>>,SimulationError>> = vec![];
    thread::scope(|scope|{
        let mut handles = vec![];
        let mut first_sim = 0;
        for thread_no in 0..num_threads {
            let num_to_do = scenario.nsim/num_threads + (if scenario.nsim%num_threads>thread_no {1} else {0});
            let posterior = &posterior;
            let handle = scope.spawn(move||allocate_seat_range(survey,posterior,method,scenario,first_sim,num_to_do));
            handles.push(handle);
            first_sim += num_to_do;
        }
        for handle in handles {
            partials.push(handle.join().expect("simulation worker panicked"));
        }
    });
    let mut seats = Vec::with_capacity(scenario.nsim);
    for partial in partials { seats.extend(partial?); }
    aggregate(survey,coalitions,scenario,seats)
}

/// Seat allocations for the simulations `first_sim..first_sim+num_sims`, one row
/// per simulation aligned with the survey's party order.
fn allocate_seat_range<M:DivisorMethod>(survey:&Survey,posterior:&Posterior,method:&M,scenario:&Scenario,first_sim:usize,num_sims:usize) -> Result<Vec<Vec<usize>>,SimulationError> {
    let excluded : Vec<bool> = survey.entries.iter().map(|e|scenario.excluded_parties.iter().any(|x|*x==e.party)).collect();
    let mut res = Vec::with_capacity(num_sims);
    for sim in first_sim..first_sim+num_sims {
        let mut rng = simulation_rng(scenario.seed,sim as u64);
        let shares = posterior.draw_shares(&mut rng);
        // The electoral threshold is judged against this draw's shares, over all
        // parties including excluded pseudo-parties.
        let eligible : Vec<usize> = (0..shares.len()).filter(|&i|!excluded[i]&&shares[i]>=scenario.electoral_threshold).collect();
        if eligible.is_empty() { return Err(SimulationError::NoEligibleParties{simulation:sim}); }
        let eligible_shares : Vec<f64> = eligible.iter().map(|&i|shares[i]).collect();
        let allocated = apportion(method,&eligible_shares,scenario.total_seats,&mut Randomness::PRNG(rng))?;
        let mut row = vec![0;shares.len()];
        for (&party,&seats) in eligible.iter().zip(allocated.iter()) { row[party]=seats; }
        res.push(row);
    }
    Ok(res)
}

/// The synchronization barrier of the pipeline: only once every simulation's seats
/// are known are majorities evaluated and probabilities computed.
fn aggregate(survey:&Survey,coalitions:Option<&[Coalition]>,scenario:&Scenario,seats:Vec<Vec<usize>>) -> Result<CoalitionProbabilities,SimulationError> {
    let default_catalogue;
    let coalitions = match coalitions {
        Some(c) => c,
        None => { default_catalogue = crate::coalition::default_catalogue(); default_catalogue.as_slice() }
    };
    let allocations = SeatAllocations{ parties : survey.parties(), seats };
    let table = allocations.has_majorities(coalitions,scenario.majority_threshold)?;
    let probabilities = probabilities(&table,coalitions,scenario.exclude_smaller_alternatives)?;
    Ok(CoalitionProbabilities{ survey : survey.metadata.clone(), probabilities })
}
