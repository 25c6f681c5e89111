// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


//! Evaluate, for every simulation and every coalition of interest, whether the
//! coalition's combined seats clear the majority threshold, assembling the answers
//! into a boolean table with one named column per coalition.

use serde::{Serialize,Deserialize};
use crate::coalition::{check_no_duplicate_names, Coalition, CoalitionError};

/// The seat allocations for all simulations of one survey.
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct SeatAllocations {
    /// the parties, in survey order
    pub parties : Vec<String>,
    /// one row per simulation, aligned with `parties`. Every row sums to the
    /// legislature's total seat count.
    pub seats : Vec<Vec<usize>>,
}

impl SeatAllocations {
    pub fn num_simulations(&self) -> usize { self.seats.len() }

    fn party_index(&self,party:&str) -> Option<usize> {
        self.parties.iter().position(|p|p==party)
    }

    /// Does the coalition hold at least `majority_threshold` seats, per simulation?
    /// A coalition party that was not in the survey holds no seats, so it simply
    /// never contributes.
    pub fn has_majority(&self,coalition:&Coalition,majority_threshold:usize) -> Vec<bool> {
        let indices : Vec<usize> = coalition.parties().iter().filter_map(|p|self.party_index(p)).collect();
        self.seats.iter().map(|row|{
            let seats : usize = indices.iter().map(|&i|row[i]).sum();
            seats>=majority_threshold
        }).collect()
    }

    /// Evaluate every coalition of a catalogue, producing the majority table. The
    /// catalogue must not contain two coalitions with the same canonical name.
    pub fn has_majorities(&self,coalitions:&[Coalition],majority_threshold:usize) -> Result<MajorityTable,CoalitionError> {
        check_no_duplicate_names(coalitions)?;
        let columns = coalitions.iter().map(|c|MajorityColumn{
            coalition : c.name(),
            has_majority : self.has_majority(c,majority_threshold),
        }).collect();
        Ok(MajorityTable{ num_simulations : self.num_simulations(), columns })
    }
}

/// One column of a [MajorityTable].
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct MajorityColumn {
    /// canonical coalition name
    pub coalition : String,
    /// one entry per simulation
    pub has_majority : Vec<bool>,
}

/// Boolean matrix: rows are simulations, columns are coalitions, entries say
/// whether that coalition had a majority in that simulation. Built once per survey
/// and then only read; the probability aggregator filters it through views, never
/// by mutation.
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct MajorityTable {
    num_simulations : usize,
    columns : Vec<MajorityColumn>,
}

impl MajorityTable {
    /// Assemble a table directly from named boolean columns, which must all have
    /// the same length and distinct names.
    pub fn from_columns(num_simulations:usize,columns:Vec<MajorityColumn>) -> Result<Self,CoalitionError> {
        let mut names : Vec<&str> = columns.iter().map(|c|c.coalition.as_str()).collect();
        names.sort_unstable();
        for pair in names.windows(2) {
            if pair[0]==pair[1] { return Err(CoalitionError::DuplicateCoalitionName(pair[0].to_string())); }
        }
        assert!(columns.iter().all(|c|c.has_majority.len()==num_simulations),"all columns of a majority table must have one entry per simulation");
        Ok(MajorityTable{num_simulations,columns})
    }

    /// The number of simulation rows, as created - this never changes, whatever
    /// filtering a probability query applies.
    pub fn num_simulations(&self) -> usize { self.num_simulations }

    /// The column for the named coalition, if present.
    pub fn column(&self,coalition_name:&str) -> Option<&[bool]> {
        self.columns.iter().find(|c|c.coalition==coalition_name).map(|c|c.has_majority.as_slice())
    }

    /// Column names in catalogue order.
    pub fn coalition_names(&self) -> impl Iterator<Item=&str> {
        self.columns.iter().map(|c|c.coalition.as_str())
    }
}
