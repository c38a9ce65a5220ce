//! Search slice: the criteria record and server-side search results.
//!
//! The criteria live independently of the result set they produced, and a
//! clear resets them as a unit.

use crate::models::{FilterCriteria, MatchProfile};

#[derive(Debug, Default)]
pub struct SearchState {
    pub criteria: FilterCriteria,
    pub term: String,
    pub results: Vec<MatchProfile>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum SearchAction {
    Pending,
    CriteriaSet(FilterCriteria),
    TermSet(String),
    /// Reset criteria and term in one step, leaving any results on screen.
    CriteriaCleared,
    ResultsLoaded(Vec<MatchProfile>),
    Rejected(String),
}

pub fn reduce(state: &mut SearchState, action: SearchAction) {
    match action {
        SearchAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        SearchAction::CriteriaSet(criteria) => {
            state.criteria = criteria;
        }
        SearchAction::TermSet(term) => {
            state.term = term;
        }
        SearchAction::CriteriaCleared => {
            state.criteria = FilterCriteria::default();
            state.term.clear();
        }
        SearchAction::ResultsLoaded(results) => {
            state.loading = false;
            state.results = results;
        }
        SearchAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_criteria_and_term_as_a_unit() {
        let mut state = SearchState::default();
        reduce(
            &mut state,
            SearchAction::CriteriaSet(FilterCriteria {
                religion: Some("hindu".into()),
                age_range: Some((25, 30)),
                ..Default::default()
            }),
        );
        reduce(&mut state, SearchAction::TermSet("doctor".into()));

        reduce(&mut state, SearchAction::CriteriaCleared);
        assert!(state.criteria.is_empty());
        assert!(state.term.is_empty());
    }
}
