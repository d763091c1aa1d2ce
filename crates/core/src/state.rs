// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::update::ActivityUpdate;
use decom_audit::AuditEvent;
use decom_domain::ActivityAggregate;

/// The result of a successful command application.
///
/// `update` is what the store persists. `new_activity` is the aggregate the
/// store is expected to hold afterwards, and `audit_event` is written in the
/// same transaction as the update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The partial update to persist.
    pub update: ActivityUpdate,
    /// The aggregate after the update.
    pub new_activity: ActivityAggregate,
    /// The audit event describing this transition.
    pub audit_event: AuditEvent,
}
