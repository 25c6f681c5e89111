// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


//! Information about a single opinion survey, such as who was asked and what they said.

use serde::{Serialize,Deserialize};
use thiserror::Error;

/// Things that can be wrong with a survey as provided by the caller. All of these
/// are detected before any stochastic work starts, and are recoverable by fixing
/// the input and retrying.
#[derive(Error,Debug)]
pub enum SurveyError {
    #[error("Survey contains no parties.")]
    NoParties,
    #[error("Party {party} has a negative vote count {votes}.")]
    NegativeVotes{ party : String, votes : f64 },
    #[error("Party {0} has a vote count that is not a finite number.")]
    NonFiniteVotes(String),
    #[error("Party {0} appears more than once in the survey.")]
    DuplicateParty(String),
    #[error("Survey claims {0} respondents; need at least 1.")]
    TooFewRespondents(u32),
}

/// Identifying information about a survey, passed through to the final
/// probability table unchanged so the presentation layer can display it.
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct SurveyMetadata {
    /// the organisation that ran the poll, e.g. "forsa"
    pub pollster : String,
    /// date the survey was published, ISO 8601
    pub published : Option<String>,
    /// first day of field work, ISO 8601
    pub begin : Option<String>,
    /// last day of field work, ISO 8601
    pub end : Option<String>,
    /// number of people asked
    pub respondents : u32,
}

/// One party's result in a survey.
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct SurveyEntry {
    pub party : String,
    /// estimated number of respondents voting for this party. Need not be an integer;
    /// published percentages rarely convert to whole respondents.
    pub votes : f64,
}

/// A single opinion survey: who asked, and an ordered list of (party, votes).
/// This is the sole input to the simulation pipeline; it is never modified.
#[derive(Debug,Serialize,Deserialize,Clone)]
pub struct Survey {
    pub metadata : SurveyMetadata,
    pub entries : Vec<SurveyEntry>,
}

impl Survey {
    /// Make a survey from per-party vote counts.
    pub fn from_votes(metadata:SurveyMetadata,votes:Vec<(String,f64)>) -> Self {
        let entries = votes.into_iter().map(|(party,votes)|SurveyEntry{party,votes}).collect();
        Survey{ metadata, entries }
    }

    /// Make a survey from the published percentages, converting each into an
    /// (in general fractional) number of respondents.
    /// ```
    /// use coalitions::survey::{Survey, SurveyMetadata};
    /// let metadata = SurveyMetadata{ pollster:"forsa".to_string(), published:None, begin:None, end:None, respondents:2000 };
    /// let survey = Survey::from_percentages(metadata,vec![("cdu".to_string(),35.0),("spd".to_string(),25.0)]);
    /// assert_eq!(survey.entries[0].votes,700.0);
    /// assert_eq!(survey.entries[1].votes,500.0);
    /// ```
    pub fn from_percentages(metadata:SurveyMetadata,percentages:Vec<(String,f64)>) -> Self {
        let respondents = metadata.respondents as f64;
        let votes = percentages.into_iter().map(|(party,percent)|(party,percent*respondents/100.0)).collect();
        Self::from_votes(metadata,votes)
    }

    /// Total number of (possibly fractional) votes over all parties.
    pub fn total_votes(&self) -> f64 {
        self.entries.iter().map(|e|e.votes).sum()
    }

    /// The parties in survey order.
    pub fn parties(&self) -> Vec<String> {
        self.entries.iter().map(|e|e.party.clone()).collect()
    }

    /// Check the survey is usable before doing any work with it.
    pub fn validate(&self) -> Result<(),SurveyError> {
        if self.entries.is_empty() { return Err(SurveyError::NoParties); }
        if self.metadata.respondents<1 { return Err(SurveyError::TooFewRespondents(self.metadata.respondents)); }
        for entry in &self.entries {
            if !entry.votes.is_finite() { return Err(SurveyError::NonFiniteVotes(entry.party.clone())); }
            if entry.votes<0.0 { return Err(SurveyError::NegativeVotes{party:entry.party.clone(),votes:entry.votes}); }
        }
        let mut names : Vec<&str> = self.entries.iter().map(|e|e.party.as_str()).collect();
        names.sort_unstable();
        for pair in names.windows(2) {
            if pair[0]==pair[1] { return Err(SurveyError::DuplicateParty(pair[0].to_string())); }
        }
        Ok(())
    }
}
