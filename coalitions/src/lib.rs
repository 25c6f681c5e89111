// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


//! Estimate, from a single opinion survey, the probability that each of a set of
//! candidate party coalitions would hold a parliamentary majority. The survey's
//! sampling uncertainty is propagated by drawing many simulated elections from the
//! Dirichlet posterior of the vote shares, allocating seats to each with a
//! highest-averages divisor method, and aggregating majorities across simulations.

pub mod survey;
pub mod random_util;
pub mod posterior;
pub mod apportionment;
pub mod coalition;
pub mod majority;
pub mod probability;
pub mod scenario;
pub mod orchestrator;
