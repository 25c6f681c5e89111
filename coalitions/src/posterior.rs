// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


//! Draw simulated "parallel elections" from the posterior distribution of the vote
//! shares given a survey. The posterior is Dirichlet with a Jeffreys prior of ½ per
//! party; a draw is taken as per-party Gamma(α,1) samples normalized to shares.

use rand::Rng;
use rand_distr::{Distribution, Gamma};
use thiserror::Error;
use crate::random_util::simulation_rng;
use crate::survey::{Survey, SurveyError};

#[derive(Error,Debug)]
pub enum PosteriorError {
    #[error(transparent)]
    Survey(#[from] SurveyError),
    #[error("Need at least 1 simulation, asked for {0}.")]
    TooFewSimulations(usize),
    #[error("Overdispersion correction {0} must be a finite non-negative number.")]
    BadCorrection(f64),
}

/// The posterior over vote shares for one survey, ready to be sampled from any
/// number of times.
pub struct Posterior {
    /// one Gamma(α,1) distribution per party, in survey order
    gammas : Vec<Gamma<f64>>,
}

impl Posterior {
    /// Compute the posterior for a survey. `correction` models extra-binomial
    /// overdispersion (house/design effects): the concentration is shrunk by
    /// 1/(1+correction), inflating the variance of each simulated share relative
    /// to naive multinomial sampling. 0 means plain multinomial sampling noise.
    pub fn from_survey(survey:&Survey,correction:f64) -> Result<Self,PosteriorError> {
        survey.validate()?;
        if !(correction.is_finite()&&correction>=0.0) { return Err(PosteriorError::BadCorrection(correction)); }
        let shrink = 1.0/(1.0+correction);
        let gammas = survey.entries.iter().map(|e|{
            let alpha = e.votes*shrink+0.5; // Jeffreys prior keeps the shape positive even for zero-vote parties.
            Gamma::new(alpha,1.0).expect("gamma shape is positive")
        }).collect();
        Ok(Posterior{gammas})
    }

    /// Number of parties.
    pub fn len(&self) -> usize { self.gammas.len() }
    pub fn is_empty(&self) -> bool { self.gammas.is_empty() }

    /// One simulated election: a vector of vote shares, one per party in survey
    /// order, non-negative and summing to 1.
    pub fn draw_shares<R:Rng>(&self,rng:&mut R) -> Vec<f64> {
        let mut shares : Vec<f64> = self.gammas.iter().map(|g|g.sample(rng)).collect();
        let total : f64 = shares.iter().sum();
        for s in &mut shares { *s/=total; }
        shares
    }
}

/// Draw `nsim` simulated vote-share vectors for a survey. Each simulation uses an
/// independent sub-stream of the seed, so two calls with the same arguments give
/// bit-identical results on the same platform.
pub fn draw_from_posterior(survey:&Survey,nsim:usize,seed:u64,correction:f64) -> Result<Vec<Vec<f64>>,PosteriorError> {
    if nsim<1 { return Err(PosteriorError::TooFewSimulations(nsim)); }
    let posterior = Posterior::from_survey(survey,correction)?;
    let mut res = Vec::with_capacity(nsim);
    for sim in 0..nsim {
        let mut rng = simulation_rng(seed,sim as u64);
        res.push(posterior.draw_shares(&mut rng));
    }
    Ok(res)
}
