use serde_json::json;

use saathi_shared::error::Result;
use saathi_store::search::SearchAction;
use saathi_store::{Action, FilterCriteria, MatchProfile};

use crate::SaathiClient;

impl SaathiClient {
    /// Server-side search over the whole member base, as opposed to the
    /// client-side narrowing of the already-loaded match list.
    pub async fn search_profiles(
        &self,
        criteria: &FilterCriteria,
        term: &str,
    ) -> Result<Vec<MatchProfile>> {
        self.dispatch(Action::Search(SearchAction::CriteriaSet(criteria.clone())));
        self.dispatch(Action::Search(SearchAction::TermSet(term.to_string())));
        self.dispatch(Action::Search(SearchAction::Pending));

        let body = json!({ "filters": criteria, "searchTerm": term });

        match self
            .api()
            .post::<Vec<MatchProfile>>("/search", &body, "Search failed")
            .await
        {
            Ok(results) => {
                self.dispatch(Action::Search(SearchAction::ResultsLoaded(
                    results.clone(),
                )));
                Ok(results)
            }
            Err(e) => {
                self.fail(&e, Action::Search(SearchAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    /// Resets criteria and term as one unit; no network call.
    pub fn clear_search(&self) {
        self.dispatch(Action::Search(SearchAction::CriteriaCleared));
    }
}
