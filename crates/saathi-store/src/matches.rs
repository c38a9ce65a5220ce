//! Matches slice: the browsable candidate list.
//!
//! The slice keeps the full unfiltered list as loaded from the server and a
//! derived `visible` list, recomputed by [`apply_filters`] whenever the
//! list, the criteria, the search term, or the sort key changes. Interaction
//! flags only ever flip `false -> true` within a session.

use std::cmp::Reverse;

use saathi_shared::types::UserId;

use crate::models::{FilterCriteria, MatchProfile, SortKey};

#[derive(Debug, Default)]
pub struct MatchesState {
    /// Everything the server returned, untouched by filtering.
    pub all: Vec<MatchProfile>,
    /// The filtered + sorted view.
    pub visible: Vec<MatchProfile>,
    pub filters: FilterCriteria,
    pub search_term: String,
    pub sort: SortKey,
    pub daily: Option<MatchProfile>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum MatchesAction {
    Pending,
    Loaded(Vec<MatchProfile>),
    DailyLoaded(MatchProfile),
    FiltersSet(FilterCriteria),
    SearchTermSet(String),
    SortSet(SortKey),
    FiltersCleared,
    InterestShown(UserId),
    SuperInterestShown(UserId),
    Shortlisted(UserId),
    Rejected(String),
}

pub fn reduce(state: &mut MatchesState, action: MatchesAction) {
    match action {
        MatchesAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        MatchesAction::Loaded(matches) => {
            state.loading = false;
            state.all = matches;
            rederive(state);
        }
        MatchesAction::DailyLoaded(profile) => {
            state.loading = false;
            state.daily = Some(profile);
        }
        MatchesAction::FiltersSet(filters) => {
            state.filters = filters;
            rederive(state);
        }
        MatchesAction::SearchTermSet(term) => {
            state.search_term = term;
            rederive(state);
        }
        MatchesAction::SortSet(sort) => {
            state.sort = sort;
            rederive(state);
        }
        MatchesAction::FiltersCleared => {
            state.filters = FilterCriteria::default();
            state.search_term.clear();
            rederive(state);
        }
        MatchesAction::InterestShown(id) => {
            set_flag(state, &id, |p| p.has_shown_interest = true);
        }
        MatchesAction::SuperInterestShown(id) => {
            set_flag(state, &id, |p| p.has_shown_super_interest = true);
        }
        MatchesAction::Shortlisted(id) => {
            set_flag(state, &id, |p| p.is_shortlisted = true);
        }
        MatchesAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}

fn rederive(state: &mut MatchesState) {
    state.visible = apply_filters(&state.all, &state.filters, &state.search_term, state.sort);
}

/// Interaction flags are one-way: the closure only ever sets a flag to
/// true, and every copy of the profile (full list, visible list, daily
/// pick) is updated so no view disagrees.
fn set_flag(state: &mut MatchesState, id: &UserId, flip: impl Fn(&mut MatchProfile)) {
    for profile in state
        .all
        .iter_mut()
        .chain(state.visible.iter_mut())
        .chain(state.daily.iter_mut())
    {
        if profile.id == *id {
            flip(profile);
        }
    }
}

/// Pure derivation of the visible match list.
///
/// Predicates are AND-composed equality/range/substring checks; the source
/// list is never mutated. Calling this twice with identical inputs yields
/// identical ordered output.
pub fn apply_filters(
    all: &[MatchProfile],
    filters: &FilterCriteria,
    search_term: &str,
    sort: SortKey,
) -> Vec<MatchProfile> {
    let term = search_term.trim().to_lowercase();

    let mut visible: Vec<MatchProfile> = all
        .iter()
        .filter(|p| matches_criteria(p, filters))
        .filter(|p| term.is_empty() || p.full_name.to_lowercase().contains(&term))
        .cloned()
        .collect();

    match sort {
        SortKey::Name => visible.sort_by(|a, b| a.full_name.cmp(&b.full_name)),
        SortKey::Newest => visible.sort_by_key(|p| Reverse(p.joined_at)),
        // stable sort: verified profiles first, original order otherwise
        SortKey::VerifiedFirst => visible.sort_by_key(|p| !p.is_verified),
        SortKey::MatchScore => visible.sort_by_key(|p| Reverse(p.match_score)),
    }

    visible
}

fn matches_criteria(profile: &MatchProfile, filters: &FilterCriteria) -> bool {
    if let Some((min, max)) = filters.age_range {
        let age = profile.age();
        if age < min || age > max {
            return false;
        }
    }
    if let Some((min, max)) = filters.height_range {
        match profile.height_cm {
            Some(height) if height >= min && height <= max => {}
            _ => return false,
        }
    }
    if !optional_eq(&filters.religion, &profile.religion) {
        return false;
    }
    if !optional_eq(&filters.caste, &profile.caste) {
        return false;
    }
    if !optional_eq(&filters.location, &profile.location) {
        return false;
    }
    if !optional_eq(&filters.marital_status, &profile.marital_status) {
        return false;
    }
    true
}

/// An inactive filter passes everything; an active one requires a
/// case-insensitive match.
fn optional_eq(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual
            .as_ref()
            .is_some_and(|actual| actual.eq_ignore_ascii_case(wanted)),
    }
}
