// Copyright 2025-2026 Andrew Conway.
// This file is part of ConcreteCoalitions.
// ConcreteCoalitions is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteCoalitions is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteCoalitions.  If not, see <https://www.gnu.org/licenses/>.


use coalitions::apportionment::SainteLague;
use coalitions::orchestrator::{simulate_survey, simulate_survey_multithreaded, CoalitionProbabilities, SimulationError};
use coalitions::posterior::{draw_from_posterior, PosteriorError};
use coalitions::scenario::Scenario;
use coalitions::survey::{Survey, SurveyError, SurveyMetadata};

fn metadata(respondents:u32) -> SurveyMetadata {
    SurveyMetadata {
        pollster : "forsa".to_string(),
        published : Some("2024-09-17".to_string()),
        begin : Some("2024-09-10".to_string()),
        end : Some("2024-09-16".to_string()),
        respondents,
    }
}

/// A plausible German federal poll, percentages summing to 100.
fn typical_survey() -> Survey {
    Survey::from_percentages(metadata(2508),vec![
        ("cdu".to_string(),32.0),
        ("spd".to_string(),16.0),
        ("greens".to_string(),22.0),
        ("fdp".to_string(),5.0),
        ("left".to_string(),9.0),
        ("afd".to_string(),10.0),
        ("others".to_string(),6.0),
    ])
}

fn fast_scenario() -> Scenario {
    Scenario{ nsim : 2000, ..Scenario::bundestag() }
}

#[test]
fn test_posterior_draws_are_reproducible() {
    let survey = typical_survey();
    let a = draw_from_posterior(&survey,50,3,0.0).unwrap();
    let b = draw_from_posterior(&survey,50,3,0.0).unwrap();
    assert_eq!(a,b);
    let c = draw_from_posterior(&survey,50,4,0.0).unwrap();
    assert_ne!(a,c);
}

#[test]
fn test_posterior_draws_are_shares() {
    let survey = typical_survey();
    for draw in draw_from_posterior(&survey,100,1,0.0).unwrap() {
        assert_eq!(draw.len(),survey.entries.len());
        assert!(draw.iter().all(|&s|s>=0.0));
        let total : f64 = draw.iter().sum();
        assert!((total-1.0).abs()<1e-9);
    }
}

/// The overdispersion correction must inflate the sampling variance of the shares.
/// With a correction of 5 the variance is about six times larger, so the sample
/// variances over 4000 draws are far apart.
#[test]
fn test_correction_inflates_variance() {
    let survey = typical_survey();
    let variance_of_first_share = |correction:f64| {
        let draws = draw_from_posterior(&survey,4000,1,correction).unwrap();
        let shares : Vec<f64> = draws.iter().map(|d|d[0]).collect();
        let mean = shares.iter().sum::<f64>()/shares.len() as f64;
        shares.iter().map(|s|(s-mean)*(s-mean)).sum::<f64>()/(shares.len()-1) as f64
    };
    let plain = variance_of_first_share(0.0);
    let corrected = variance_of_first_share(5.0);
    println!("variance of cdu share: plain={:e} corrected={:e}",plain,corrected);
    assert!(corrected>3.0*plain);
}

#[test]
fn test_posterior_validation() {
    let survey = typical_survey();
    assert!(matches!(draw_from_posterior(&survey,0,1,0.0),Err(PosteriorError::TooFewSimulations(0))));
    assert!(matches!(draw_from_posterior(&survey,10,1,-1.0),Err(PosteriorError::BadCorrection(_))));
    let empty = Survey::from_votes(metadata(2508),vec![]);
    assert!(matches!(draw_from_posterior(&empty,10,1,0.0),Err(PosteriorError::Survey(SurveyError::NoParties))));
    let negative = Survey::from_votes(metadata(2508),vec![("cdu".to_string(),-5.0)]);
    assert!(matches!(draw_from_posterior(&negative,10,1,0.0),Err(PosteriorError::Survey(SurveyError::NegativeVotes{..}))));
}

#[test]
fn test_pipeline_produces_sane_probabilities() {
    let survey = typical_survey();
    let result = simulate_survey(&survey,None,&SainteLague,&fast_scenario()).unwrap();
    assert_eq!(result.survey.pollster,"forsa");
    assert_eq!(result.probabilities.len(),7); // the default catalogue
    for row in &result.probabilities {
        assert!((0.0..=100.0).contains(&row.probability),"{} has probability {}",row.coalition,row.probability);
    }
}

fn probability_of(result:&CoalitionProbabilities,coalition:&str) -> f64 {
    result.probabilities.iter().find(|r|r.coalition==coalition).map(|r|r.probability).unwrap()
}

/// Without the smaller-alternative exclusion a coalition can never be hurt by
/// adding a party, so probabilities are monotone in the subset order.
#[test]
fn test_superset_monotonicity_without_exclusion() {
    let survey = typical_survey();
    let scenario = Scenario{ exclude_smaller_alternatives : false, ..fast_scenario() };
    let result = simulate_survey(&survey,None,&SainteLague,&scenario).unwrap();
    let cdu = probability_of(&result,"cdu");
    let cdu_fdp = probability_of(&result,"cdu_fdp");
    let cdu_fdp_greens = probability_of(&result,"cdu_fdp_greens");
    assert!(cdu<=cdu_fdp);
    assert!(cdu_fdp<=cdu_fdp_greens);
    let spd = probability_of(&result,"spd");
    let spd_greens = probability_of(&result,"spd_greens");
    assert!(spd<=spd_greens);
}

#[test]
fn test_landslide_survey_gives_near_certainty() {
    let survey = Survey::from_percentages(metadata(2000),vec![
        ("cdu".to_string(),70.0),
        ("spd".to_string(),20.0),
        ("others".to_string(),10.0),
    ]);
    let result = simulate_survey(&survey,None,&SainteLague,&fast_scenario()).unwrap();
    assert!(probability_of(&result,"cdu")>99.0);
    // cdu alone nearly always suffices, so the bigger coalitions are rarely needed
    assert!(probability_of(&result,"cdu_fdp")<1.0);
}

#[test]
fn test_multithreaded_matches_sequential_exactly() {
    let survey = typical_survey();
    let scenario = Scenario{ nsim : 500, ..Scenario::bundestag() };
    let sequential = simulate_survey(&survey,None,&SainteLague,&scenario).unwrap();
    for num_threads in [1,3,8] {
        let parallel = simulate_survey_multithreaded(&survey,None,&SainteLague,&scenario,num_threads).unwrap();
        assert_eq!(sequential.probabilities,parallel.probabilities,"{} threads changed the result",num_threads);
    }
}

#[test]
fn test_simulation_is_reproducible_end_to_end() {
    let survey = typical_survey();
    let scenario = Scenario{ nsim : 300, ..Scenario::bundestag() };
    let a = simulate_survey(&survey,None,&SainteLague,&scenario).unwrap();
    let b = simulate_survey(&survey,None,&SainteLague,&scenario).unwrap();
    assert_eq!(a.probabilities,b.probabilities);
}

#[test]
fn test_scenario_validation_happens_before_any_work() {
    let survey = typical_survey();
    let scenario = Scenario{ nsim : 0, ..Scenario::bundestag() };
    assert!(matches!(simulate_survey(&survey,None,&SainteLague,&scenario),Err(SimulationError::Scenario(_))));
    let scenario = Scenario{ majority_threshold : 599, ..Scenario::bundestag() };
    assert!(matches!(simulate_survey(&survey,None,&SainteLague,&scenario),Err(SimulationError::Scenario(_))));
    let empty = Survey::from_votes(metadata(2508),vec![]);
    assert!(matches!(simulate_survey(&empty,None,&SainteLague,&fast_scenario()),Err(SimulationError::Survey(SurveyError::NoParties))));
}

#[test]
fn test_result_serializes() {
    let survey = typical_survey();
    let scenario = Scenario{ nsim : 100, ..Scenario::bundestag() };
    let result = simulate_survey(&survey,None,&SainteLague,&scenario).unwrap();
    let json = serde_json::to_string_pretty(&result).unwrap();
    let back : CoalitionProbabilities = serde_json::from_str(&json).unwrap();
    assert_eq!(result.probabilities,back.probabilities);
    assert_eq!(result.survey.pollster,back.survey.pollster);
}
