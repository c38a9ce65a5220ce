//! Profile slice: the logged-in user's own editable profile.

use crate::models::ProfileDetails;

#[derive(Debug, Default)]
pub struct ProfileState {
    pub details: Option<ProfileDetails>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ProfileAction {
    Pending,
    Loaded(ProfileDetails),
    /// Profile update accepted by the server; the response replaces the
    /// local copy.
    Updated(ProfileDetails),
    PhotoAdded(String),
    Rejected(String),
}

pub fn reduce(state: &mut ProfileState, action: ProfileAction) {
    match action {
        ProfileAction::Pending => {
            state.loading = true;
            state.error = None;
        }
        ProfileAction::Loaded(details) | ProfileAction::Updated(details) => {
            state.loading = false;
            state.details = Some(details);
        }
        ProfileAction::PhotoAdded(url) => {
            state.loading = false;
            if let Some(ref mut details) = state.details {
                details.photos.push(url);
            }
        }
        ProfileAction::Rejected(message) => {
            state.loading = false;
            state.error = Some(message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn details() -> ProfileDetails {
        ProfileDetails {
            id: "u1".into(),
            full_name: "Asha".into(),
            birth_date: NaiveDate::from_ymd_opt(1995, 2, 1).unwrap(),
            gender: None,
            religion: Some("hindu".into()),
            caste: None,
            occupation: None,
            location: Some("Pune".into()),
            marital_status: None,
            height_cm: Some(162),
            about: None,
            photos: vec!["a.jpg".into()],
        }
    }

    #[test]
    fn test_update_replaces_details() {
        let mut state = ProfileState::default();
        reduce(&mut state, ProfileAction::Loaded(details()));

        let mut changed = details();
        changed.location = Some("Mumbai".into());
        reduce(&mut state, ProfileAction::Updated(changed));

        assert_eq!(
            state.details.unwrap().location.as_deref(),
            Some("Mumbai")
        );
    }

    #[test]
    fn test_photo_added_appends() {
        let mut state = ProfileState::default();
        reduce(&mut state, ProfileAction::Loaded(details()));
        reduce(&mut state, ProfileAction::PhotoAdded("b.jpg".into()));
        assert_eq!(state.details.unwrap().photos, vec!["a.jpg", "b.jpg"]);
    }
}
