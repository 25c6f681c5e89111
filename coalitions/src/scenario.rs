// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


//! The parameters of the legislature being simulated and of the simulation itself.

use serde::{Serialize,Deserialize};
use thiserror::Error;

#[derive(Error,Debug)]
pub enum ScenarioError {
    #[error("Total seats must be at least 1, got {0}.")]
    TooFewSeats(usize),
    #[error("Majority threshold {threshold} cannot exceed the total of {total_seats} seats.")]
    MajorityThresholdTooLarge{ threshold : usize, total_seats : usize },
    #[error("Electoral threshold {0} must be a share in [0,1).")]
    BadElectoralThreshold(f64),
    #[error("Need at least 1 simulation, asked for {0}.")]
    TooFewSimulations(usize),
    #[error("Overdispersion correction {0} must be a finite non-negative number.")]
    BadCorrection(f64),
}

/// What is being simulated: the legislature's rules and the simulation controls.
/// [Scenario::bundestag] gives the defaults for the German federal parliament;
/// all fields are plain data and can be overridden by the caller.
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct Scenario {
    /// seats in the legislature
    pub total_seats : usize,
    /// seats needed to command a majority
    pub majority_threshold : usize,
    /// share of the vote below which a party gets no seats (applied per simulated
    /// draw, so a party near the threshold is in for some draws and out for others)
    pub electoral_threshold : f64,
    /// pseudo-parties never eligible for seats, e.g. the "others" remainder row
    /// that pollsters publish
    pub excluded_parties : Vec<String>,
    /// number of simulated parallel elections
    pub nsim : usize,
    /// master seed for the random source; same seed, same results
    pub seed : u64,
    /// extra-binomial overdispersion of the survey, see [crate::posterior::Posterior::from_survey]
    pub correction : f64,
    /// when computing a coalition's probability, drop simulations where one of its
    /// proper subsets already has a majority
    pub exclude_smaller_alternatives : bool,
}

impl Scenario {
    /// The German Bundestag at its regular size: 598 seats, majority at 300, 5%
    /// electoral threshold, the "others" row excluded from seat allocation.
    pub fn bundestag() -> Self {
        Scenario {
            total_seats : 598,
            majority_threshold : 300,
            electoral_threshold : 0.05,
            excluded_parties : vec!["others".to_string()],
            nsim : 10_000,
            seed : 1,
            correction : 0.0,
            exclude_smaller_alternatives : true,
        }
    }

    pub fn validate(&self) -> Result<(),ScenarioError> {
        if self.total_seats<1 { return Err(ScenarioError::TooFewSeats(self.total_seats)); }
        if self.majority_threshold>self.total_seats { return Err(ScenarioError::MajorityThresholdTooLarge{threshold:self.majority_threshold,total_seats:self.total_seats}); }
        if !(self.electoral_threshold.is_finite()&&(0.0..1.0).contains(&self.electoral_threshold)) { return Err(ScenarioError::BadElectoralThreshold(self.electoral_threshold)); }
        if self.nsim<1 { return Err(ScenarioError::TooFewSimulations(self.nsim)); }
        if !(self.correction.is_finite()&&self.correction>=0.0) { return Err(ScenarioError::BadCorrection(self.correction)); }
        Ok(())
    }
}

impl Default for Scenario {
    fn default() -> Self { Scenario::bundestag() }
}
