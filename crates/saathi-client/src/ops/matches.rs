use serde_json::json;
use tracing::info;

use saathi_shared::error::Result;
use saathi_shared::types::UserId;
use saathi_store::matches::MatchesAction;
use saathi_store::{Action, FilterCriteria, MatchProfile, SortKey};

use crate::SaathiClient;

impl SaathiClient {
    pub async fn fetch_matches(&self) -> Result<Vec<MatchProfile>> {
        self.dispatch(Action::Matches(MatchesAction::Pending));

        match self
            .api()
            .get::<Vec<MatchProfile>>("/matches", "Failed to load matches")
            .await
        {
            Ok(matches) => {
                self.dispatch(Action::Matches(MatchesAction::Loaded(matches.clone())));
                Ok(matches)
            }
            Err(e) => {
                self.fail(&e, Action::Matches(MatchesAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    pub async fn fetch_daily_recommendation(&self) -> Result<MatchProfile> {
        self.dispatch(Action::Matches(MatchesAction::Pending));

        match self
            .api()
            .get::<MatchProfile>("/matches/daily", "Failed to load today's match")
            .await
        {
            Ok(profile) => {
                self.dispatch(Action::Matches(MatchesAction::DailyLoaded(
                    profile.clone(),
                )));
                Ok(profile)
            }
            Err(e) => {
                self.fail(&e, Action::Matches(MatchesAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    /// Tells the other side this user is interested. The local flag flips
    /// on success and is never flipped back this session.
    pub async fn show_interest(&self, id: &UserId) -> Result<()> {
        match self
            .api()
            .post_ack(
                &format!("/matches/{id}/interest"),
                &json!({}),
                "Failed to send interest",
            )
            .await
        {
            Ok(()) => {
                info!(profile = %id, "Interest sent");
                self.dispatch(Action::Matches(MatchesAction::InterestShown(id.clone())));
                Ok(())
            }
            Err(e) => {
                self.fail(&e, Action::Matches(MatchesAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    pub async fn show_super_interest(&self, id: &UserId) -> Result<()> {
        match self
            .api()
            .post_ack(
                &format!("/matches/{id}/super-interest"),
                &json!({}),
                "Failed to send super interest",
            )
            .await
        {
            Ok(()) => {
                info!(profile = %id, "Super interest sent");
                self.dispatch(Action::Matches(MatchesAction::SuperInterestShown(
                    id.clone(),
                )));
                Ok(())
            }
            Err(e) => {
                self.fail(&e, Action::Matches(MatchesAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    /// Shortlist-then-verify: the only two-call operation. The shortlist
    /// is recorded, then the profile is re-fetched to confirm the server
    /// sees the flag before the local one flips.
    pub async fn shortlist(&self, id: &UserId) -> Result<MatchProfile> {
        self.dispatch(Action::Matches(MatchesAction::Pending));

        let result = async {
            self.api()
                .post_ack(
                    &format!("/matches/{id}/shortlist"),
                    &json!({}),
                    "Failed to shortlist profile",
                )
                .await?;
            self.api()
                .get::<MatchProfile>(
                    &format!("/matches/{id}"),
                    "Failed to confirm shortlist",
                )
                .await
        }
        .await;

        match result {
            Ok(profile) => {
                info!(profile = %id, "Shortlisted");
                self.dispatch(Action::Matches(MatchesAction::Shortlisted(id.clone())));
                Ok(profile)
            }
            Err(e) => {
                self.fail(&e, Action::Matches(MatchesAction::Rejected(e.to_string())));
                Err(e)
            }
        }
    }

    // Local mutations: each re-derives the visible list synchronously.

    pub fn set_filters(&self, filters: FilterCriteria) {
        self.dispatch(Action::Matches(MatchesAction::FiltersSet(filters)));
    }

    pub fn set_search_term(&self, term: impl Into<String>) {
        self.dispatch(Action::Matches(MatchesAction::SearchTermSet(term.into())));
    }

    pub fn set_sort(&self, sort: SortKey) {
        self.dispatch(Action::Matches(MatchesAction::SortSet(sort)));
    }

    pub fn clear_filters(&self) {
        self.dispatch(Action::Matches(MatchesAction::FiltersCleared));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{client_with, log_in, ScriptedTransport};
    use saathi_api::Method;

    const MATCHES_BODY: &str = r#"{"success":true,"data":[
        {"id":"p1","fullName":"Ravi","birthDate":"1996-06-15",
         "religion":"hindu","joinedAt":"2024-01-10T00:00:00Z","matchScore":80},
        {"id":"p2","fullName":"Imran","birthDate":"1984-02-01",
         "religion":"muslim","joinedAt":"2024-02-20T00:00:00Z","matchScore":60}
    ]}"#;

    #[tokio::test]
    async fn test_show_interest_flips_flag_on_success_only() {
        let transport = ScriptedTransport::new(vec![
            (200, MATCHES_BODY),
            (200, r#"{"success":true,"message":"sent"}"#),
        ]);
        let client = client_with(transport);
        log_in(&client, "u1");

        client.fetch_matches().await.unwrap();
        client.show_interest(&"p1".into()).await.unwrap();

        let state = client.store().lock().unwrap();
        let p1 = state.matches.all.iter().find(|p| p.id == "p1".into()).unwrap();
        assert!(p1.has_shown_interest);
        let p2 = state.matches.all.iter().find(|p| p.id == "p2".into()).unwrap();
        assert!(!p2.has_shown_interest);
    }

    #[tokio::test]
    async fn test_failed_interest_leaves_flag_unset() {
        let transport = ScriptedTransport::new(vec![
            (200, MATCHES_BODY),
            (403, r#"{"success":false,"message":"Upgrade to premium"}"#),
        ]);
        let client = client_with(transport);
        log_in(&client, "u1");

        client.fetch_matches().await.unwrap();
        let out = client.show_interest(&"p1".into()).await;
        assert!(out.is_err());

        let state = client.store().lock().unwrap();
        assert!(!state.matches.all[0].has_shown_interest);
        assert_eq!(state.matches.error.as_deref(), Some("Upgrade to premium"));
    }

    #[tokio::test]
    async fn test_shortlist_makes_exactly_two_calls() {
        let transport = ScriptedTransport::new(vec![
            (200, r#"{"success":true,"message":"ok"}"#),
            (
                200,
                r#"{"success":true,"data":
                    {"id":"p1","fullName":"Ravi","birthDate":"1996-06-15",
                     "joinedAt":"2024-01-10T00:00:00Z","isShortlisted":true}
                }"#,
            ),
        ]);
        let client = client_with(transport.clone());
        log_in(&client, "u1");

        client.shortlist(&"p1".into()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].0, Method::Post);
        assert!(requests[0].1.ends_with("/matches/p1/shortlist"));
        assert_eq!(requests[1].0, Method::Get);
        assert!(requests[1].1.ends_with("/matches/p1"));
    }

    #[tokio::test]
    async fn test_local_filter_edits_rederive_visible() {
        let transport = ScriptedTransport::new(vec![(200, MATCHES_BODY)]);
        let client = client_with(transport);
        log_in(&client, "u1");
        client.fetch_matches().await.unwrap();

        client.set_filters(FilterCriteria {
            religion: Some("hindu".into()),
            ..Default::default()
        });

        let state = client.store().lock().unwrap();
        assert_eq!(state.matches.visible.len(), 1);
        assert_eq!(state.matches.visible[0].id, "p1".into());
        drop(state);

        client.clear_filters();
        let state = client.store().lock().unwrap();
        assert_eq!(state.matches.visible.len(), 2);
    }
}
