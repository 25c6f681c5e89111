// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


//! Coalitions of parties, their canonical names, and enumeration of the smaller
//! alternative coalitions (proper subsets) of a coalition.

use std::fmt;
use serde::{Serialize,Deserialize};
use thiserror::Error;

/// Parties of a canonical coalition name are joined with this.
pub const NAME_SEPARATOR : &str = "_";

#[derive(Error,Debug)]
pub enum CoalitionError {
    #[error("A coalition must contain at least one party.")]
    NoParties,
    #[error("Party {0} appears more than once in one coalition.")]
    DuplicateParty(String),
    #[error("Party identifier {0} contains the separator {NAME_SEPARATOR}, which would make coalition names ambiguous.")]
    PartyContainsSeparator(String),
    #[error("Two coalitions in the catalogue have the same canonical name {0}.")]
    DuplicateCoalitionName(String),
    #[error("There is no coalition named {0} in the majority table.")]
    UnknownCoalition(String),
}

/// A set of parties considered as a potential governing bloc. Canonicalized on
/// construction: parties are sorted alphabetically, so two coalitions with the
/// same party set are equal and get the same name whatever order they were given in.
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
pub struct Coalition {
    parties : Vec<String>,
}

impl Coalition {
    /// Make a coalition from a list of party identifiers.
    /// ```
    /// use coalitions::coalition::Coalition;
    /// let c1 = Coalition::new(["greens","cdu","fdp"]).unwrap();
    /// let c2 = Coalition::new(["fdp","greens","cdu"]).unwrap();
    /// assert_eq!(c1,c2);
    /// assert_eq!(c1.name(),"cdu_fdp_greens");
    /// ```
    pub fn new<S:Into<String>>(parties:impl IntoIterator<Item=S>) -> Result<Self,CoalitionError> {
        let mut parties : Vec<String> = parties.into_iter().map(|s|s.into()).collect();
        if parties.is_empty() { return Err(CoalitionError::NoParties); }
        for party in &parties {
            if party.contains(NAME_SEPARATOR) { return Err(CoalitionError::PartyContainsSeparator(party.clone())); }
        }
        parties.sort_unstable();
        for pair in parties.windows(2) {
            if pair[0]==pair[1] { return Err(CoalitionError::DuplicateParty(pair[0].clone())); }
        }
        Ok(Coalition{parties})
    }

    /// The parties, alphabetically sorted.
    pub fn parties(&self) -> &[String] { &self.parties }

    pub fn len(&self) -> usize { self.parties.len() }
    pub fn is_empty(&self) -> bool { self.parties.is_empty() }

    /// The canonical name: sorted parties joined by [NAME_SEPARATOR].
    pub fn name(&self) -> String { self.parties.join(NAME_SEPARATOR) }

    /// The canonical names of every smaller alternative coalition: all non-empty
    /// proper subsets of this coalition's parties, by increasing size, and within a
    /// size in combination order over the sorted party list.
    /// ```
    /// use coalitions::coalition::Coalition;
    /// let c = Coalition::new(["a","b","c"]).unwrap();
    /// assert_eq!(c.proper_subsets(),vec!["a","b","c","a_b","a_c","b_c"]);
    /// ```
    pub fn proper_subsets(&self) -> Vec<String> {
        let mut res = vec![];
        for size in 1..self.parties.len() {
            for combination in combinations(self.parties.len(),size) {
                let subset : Vec<&str> = combination.iter().map(|&i|self.parties[i].as_str()).collect();
                res.push(subset.join(NAME_SEPARATOR));
            }
        }
        res
    }
}

impl fmt::Display for Coalition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f,"{}",self.name()) }
}

/// All size-`take` combinations of the indices 0..n, in lexicographic order.
fn combinations(n:usize,take:usize) -> Vec<Vec<usize>> {
    let mut res = vec![];
    if take==0 || take>n { return res; }
    let mut current : Vec<usize> = (0..take).collect();
    loop {
        res.push(current.clone());
        // advance the rightmost index that still has room to move
        let mut pos = take;
        loop {
            if pos==0 { return res; }
            pos-=1;
            if current[pos]<n-(take-pos) { break; }
        }
        current[pos]+=1;
        for i in pos+1..take { current[i]=current[i-1]+1; }
    }
}

/// The coalition catalogue used when a caller does not supply one: the blocs
/// conventionally discussed for the German Bundestag.
pub fn default_catalogue() -> Vec<Coalition> {
    [
        vec!["cdu"],
        vec!["cdu","fdp"],
        vec!["cdu","fdp","greens"],
        vec!["spd"],
        vec!["spd","left"],
        vec!["spd","greens"],
        vec!["spd","left","greens"],
    ].into_iter().map(|parties|Coalition::new(parties).expect("default catalogue is well formed")).collect()
}

/// Check a coalition catalogue has no two coalitions with the same canonical name.
pub fn check_no_duplicate_names(coalitions:&[Coalition]) -> Result<(),CoalitionError> {
    let mut names : Vec<String> = coalitions.iter().map(|c|c.name()).collect();
    names.sort_unstable();
    for pair in names.windows(2) {
        if pair[0]==pair[1] { return Err(CoalitionError::DuplicateCoalitionName(pair[0].clone())); }
    }
    Ok(())
}
