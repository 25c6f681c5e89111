// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


//! Aggregate the per-simulation majority table into one probability per coalition.
//!
//! The subtle part is the treatment of smaller alternative coalitions: when asked
//! for the probability of, say, cdu_fdp_greens being the decisive choice, a
//! simulation where cdu_fdp alone already has a majority should not count - the
//! bigger coalition is not needed there. Such rows are removed from the numerator,
//! but the denominator always stays the original simulation count.

use serde::{Serialize,Deserialize};
use crate::coalition::{Coalition, CoalitionError, NAME_SEPARATOR};
use crate::majority::MajorityTable;

/// The probability, as a percentage in [0,100], that the named coalition has a
/// majority; when `exclude_smaller_alternatives` is set, that it has a majority in
/// a simulation where no proper subset of it already does.
///
/// Asking about a coalition the table has no column for is an error.
pub fn probability(table:&MajorityTable,coalition_name:&str,exclude_smaller_alternatives:bool) -> Result<f64,CoalitionError> {
    let target = table.column(coalition_name).ok_or_else(||CoalitionError::UnknownCoalition(coalition_name.to_string()))?;
    let n_all = table.num_simulations(); // fixed denominator, captured before any filtering.
    let mut excluded = vec![false;n_all];
    if exclude_smaller_alternatives {
        let coalition = Coalition::new(coalition_name.split(NAME_SEPARATOR))?;
        for subset_name in coalition.proper_subsets() {
            if let Some(column) = table.column(&subset_name) {
                for (e,&v) in excluded.iter_mut().zip(column.iter()) { *e=*e||v; }
            }
        }
    }
    let count = target.iter().zip(excluded.iter()).filter(|&(&t,&e)|t&&!e).count();
    Ok(count as f64*100.0/n_all as f64)
}

/// One row of the final output: a coalition and its probability of majority.
#[derive(Debug,Serialize,Deserialize,Clone,PartialEq)]
pub struct CoalitionProbability {
    /// canonical coalition name
    pub coalition : String,
    /// percentage in [0,100]
    pub probability : f64,
}

/// [probability] for each coalition of a catalogue, in catalogue order.
pub fn probabilities(table:&MajorityTable,coalitions:&[Coalition],exclude_smaller_alternatives:bool) -> Result<Vec<CoalitionProbability>,CoalitionError> {
    coalitions.iter().map(|c|{
        let coalition = c.name();
        let probability = probability(table,&coalition,exclude_smaller_alternatives)?;
        Ok(CoalitionProbability{coalition,probability})
    }).collect()
}
