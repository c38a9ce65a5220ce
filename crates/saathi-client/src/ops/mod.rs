//! Asynchronous operations, grouped by domain slice.
//!
//! Every operation follows the same lifecycle: dispatch the pending
//! transition, perform its one network call (two for shortlist-then-verify),
//! then settle the slice — a fulfilled merge on success, the extracted
//! message on failure. Local mutations (active chat, filter edits,
//! optimistic appends) dispatch immediately without a network call.

mod admin;
mod auth;
mod matches;
mod messaging;
mod notification;
mod profile;
mod search;
mod subscription;
mod verification;
