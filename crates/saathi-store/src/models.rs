//! Domain model structs mirrored from the saathi REST API.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names so it maps 1:1 onto the JSON the backend returns.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use saathi_shared::types::{MessageId, NotificationId, OrderId, UserId};

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The authenticated user record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    /// Admin console access.
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub profile_complete: bool,
    pub photo_url: Option<String>,
}

/// Session lifecycle. The user record and the authenticated flag cannot
/// diverge: holding a `UserAccount` IS being authenticated.
///
/// `Unchecked` means persisted credentials have not been looked at yet;
/// `Anonymous` means they were checked and nobody is logged in.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Unchecked,
    Anonymous,
    Authenticated(UserAccount),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// Whether the persisted-credential check has happened at all.
    pub fn initialized(&self) -> bool {
        !matches!(self, Session::Unchecked)
    }

    pub fn user(&self) -> Option<&UserAccount> {
        match self {
            Session::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Messaging
// ---------------------------------------------------------------------------

/// One conversation as listed in the chat overview: the counterpart plus
/// the latest message preview and the unread counter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatRoom {
    pub peer_id: UserId,
    pub peer_name: String,
    pub peer_photo_url: Option<String>,
    #[serde(default)]
    pub peer_online: bool,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub unread: u32,
}

/// Delivery state of a message as seen by this client. Everything the
/// server returns is `Confirmed`; only locally appended optimistic entries
/// are `Pending` until the send call resolves.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DeliveryState {
    Pending,
    Confirmed,
}

impl Default for DeliveryState {
    fn default() -> Self {
        DeliveryState::Confirmed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub emoji: String,
    pub count: u32,
}

/// A single chat message. Belongs to exactly one counterpart-keyed bucket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub delivery: DeliveryState,
    /// Client-generated id used to reconcile an optimistic entry with the
    /// server's response. Never serialised.
    #[serde(skip)]
    pub local_id: Option<Uuid>,
}

impl Message {
    /// The participant that is not `self_id`, i.e. the bucket this message
    /// belongs under.
    pub fn counterpart(&self, self_id: &UserId) -> UserId {
        if self.sender_id == *self_id {
            self.receiver_id.clone()
        } else {
            self.sender_id.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// Denormalised read-only snapshot of another user's public profile, plus
/// the per-viewer interaction flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchProfile {
    pub id: UserId,
    pub full_name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub photos: Vec<String>,
    pub religion: Option<String>,
    pub caste: Option<String>,
    pub occupation: Option<String>,
    pub location: Option<String>,
    pub marital_status: Option<String>,
    pub height_cm: Option<u32>,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub match_score: u32,
    #[serde(default)]
    pub is_verified: bool,
    // Interaction flags flip false -> true only, never back, within a
    // session.
    #[serde(default)]
    pub has_shown_interest: bool,
    #[serde(default)]
    pub has_shown_super_interest: bool,
    #[serde(default)]
    pub is_shortlisted: bool,
}

impl MatchProfile {
    pub fn age(&self) -> u32 {
        self.age_on(Utc::now().date_naive())
    }

    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let mut age = today.year() - self.birth_date.year();
        if (today.month(), today.day()) < (self.birth_date.month(), self.birth_date.day()) {
            age -= 1;
        }
        age.max(0) as u32
    }
}

/// Flat record of optional search constraints. Cleared as a unit.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    pub age_range: Option<(u32, u32)>,
    /// Height range in centimetres.
    pub height_range: Option<(u32, u32)>,
    pub religion: Option<String>,
    pub caste: Option<String>,
    pub location: Option<String>,
    pub marital_status: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Lexical by display name.
    Name,
    /// Most recent join date first.
    Newest,
    /// Verified profiles first, original order otherwise.
    VerifiedFirst,
    /// Descending match score.
    #[default]
    MatchScore,
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

/// The fixed notification vocabulary. Anything the server adds later lands
/// on `Other`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    MatchOfDay,
    ProfileLive,
    ProfileView,
    InterestReceived,
    PremiumReminder,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub read: bool,
    pub related_user: Option<UserId>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Profile (own)
// ---------------------------------------------------------------------------

/// The logged-in user's own editable profile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDetails {
    pub id: UserId,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub gender: Option<String>,
    pub religion: Option<String>,
    pub caste: Option<String>,
    pub occupation: Option<String>,
    pub location: Option<String>,
    pub marital_status: Option<String>,
    pub height_cm: Option<u32>,
    pub about: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub currency: String,
    pub duration_days: u32,
    #[serde(default)]
    pub features: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum PaymentStatus {
    Created,
    Paid,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub plan_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    IdProof,
    AddressProof,
    Selfie,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum VerificationState {
    NotSubmitted,
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentStatus {
    pub kind: DocumentKind,
    pub state: VerificationState,
    pub note: Option<String>,
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_users: u64,
    pub active_users: u64,
    pub premium_users: u64,
    pub pending_verifications: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AccountStatus {
    PendingApproval,
    Active,
    Suspended,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdminUserRow {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub status: AccountStatus,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub is_premium: bool,
}
