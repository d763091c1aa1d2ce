// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use decom_domain::{ActivityAggregate, ActivityId, DomainError, PartyId};

/// The entity performing an action.
///
/// Actors are passed explicitly into every mutating operation; nothing reads
/// a "current user" from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "user", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Returns this actor as a party reference, for `assignedBy` stamping.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor id is blank.
    pub fn party_id(&self) -> Result<PartyId, DomainError> {
        PartyId::new(&self.id)
    }
}

/// The reason or trigger for an action (e.g. a request id).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause.
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// The specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SaveSurvey`", "`CompleteDismantling`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A summary of an activity at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the activity state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// Captures the summary of an activity aggregate.
    #[must_use]
    pub fn of_activity(activity: &ActivityAggregate) -> Self {
        Self::new(activity.summary())
    }
}

/// An immutable audit event recording one mutation of an activity.
///
/// Every successful mutation produces exactly one audit event, capturing:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The activity before and after the mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The persisted event id, if this event has been stored.
    pub event_id: Option<i64>,
    /// The activity this event belongs to.
    pub activity_id: ActivityId,
    /// The actor who initiated this change.
    pub actor: Actor,
    /// The cause or reason for this change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The activity before the mutation.
    pub before: StateSnapshot,
    /// The activity after the mutation.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    #[must_use]
    pub const fn new(
        activity_id: ActivityId,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            activity_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }

    /// Creates an `AuditEvent` read back from storage.
    #[must_use]
    pub const fn with_id(
        event_id: i64,
        activity_id: ActivityId,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: Some(event_id),
            activity_id,
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}
