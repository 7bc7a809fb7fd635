//! The threshold monitor policy engine.
//!
//! [`ThresholdMonitor::run`] executes two candidate passes (warnings
//! first, then limits) sharing one [`RunState`] so the send cap spans
//! both. Candidate selection (threshold comparison, reset-epoch and
//! cooldown idempotency) is delegated to the [`FixtureSource`]; this
//! module owns everything after that: owner-email validation, CC
//! composition with engineer escalation, best-effort lookups, dispatch,
//! throttling, and the append-only outcome log.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use fixtrack_core::issue::{critical_overshoot_floor, IssueType, NotificationStatus};
use fixtrack_core::recipients::{compose_cc, is_dispatchable_email};
use fixtrack_core::roles::{ROLE_ENGINEER, ROLE_TECHNICIAN};
use fixtrack_core::types::{DbId, Timestamp};
use fixtrack_db::models::fixture::FixtureCandidate;
use serde::Serialize;
use uuid::Uuid;

use crate::seams::{
    FixtureSource, Notifier, NotificationLog, ProbeLine, ProbeInventory, RecipientDirectory,
    ThresholdMessage, TRIGGERED_BY,
};

// ---------------------------------------------------------------------------
// Configuration & summary types
// ---------------------------------------------------------------------------

/// Monitor tuning knobs.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Cooldown window in hours. Zero or negative disables the window: the
    /// cutoff becomes the Unix epoch and any post-reset SENT record
    /// suppresses a resend, however old.
    pub window_hours: i64,
    /// Run-wide cap on successfully sent emails, spanning both passes.
    pub max_emails_per_run: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_hours: 24,
            max_emails_per_run: 1000,
        }
    }
}

/// Per-pass outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PassCounters {
    pub sent: u32,
    pub failed: u32,
    pub skipped_invalid: u32,
    pub skipped_throttled: u32,
}

/// Result of one monitor run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub emails_sent: u32,
    pub window_hours: i64,
    pub max_emails_per_run: u32,
    pub warning: PassCounters,
    pub limit: PassCounters,
}

/// Fatal monitor failure. Everything below candidate selection degrades per
/// candidate instead of surfacing here.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("candidate query failed for {issue} pass: {message}")]
    CandidateQuery { issue: IssueType, message: String },
}

// ---------------------------------------------------------------------------
// RunState
// ---------------------------------------------------------------------------

/// Mutable state scoped to a single `run()` invocation.
///
/// Holds the cross-pass send counter and memoized lookups so one run never
/// resolves the same CC group, display name, or probe list twice. Created
/// at the start of `run()` and discarded at the end -- never shared across
/// runs.
#[derive(Default)]
struct RunState {
    emails_sent: u32,
    role_emails: HashMap<(String, String), Vec<String>>,
    display_names: HashMap<String, Option<String>>,
    probe_lists: HashMap<DbId, Vec<ProbeLine>>,
}

// ---------------------------------------------------------------------------
// ThresholdMonitor
// ---------------------------------------------------------------------------

/// The threshold-crossing notification engine.
pub struct ThresholdMonitor<S, L, D, P, N> {
    source: S,
    log: L,
    directory: D,
    probes: P,
    notifier: N,
    config: MonitorConfig,
}

impl<S, L, D, P, N> ThresholdMonitor<S, L, D, P, N>
where
    S: FixtureSource,
    L: NotificationLog,
    D: RecipientDirectory,
    P: ProbeInventory,
    N: Notifier,
{
    pub fn new(source: S, log: L, directory: D, probes: P, notifier: N, config: MonitorConfig) -> Self {
        Self {
            source,
            log,
            directory,
            probes,
            notifier,
            config,
        }
    }

    /// Execute one monitor run: scan warnings, then limits.
    ///
    /// Warnings run first so that cap accounting is deterministic when both
    /// passes compete for the remaining send allowance. Only a candidate-query
    /// failure aborts; all other errors are absorbed into the counters.
    pub async fn run(&self) -> Result<RunSummary, MonitorError> {
        let run_id = Uuid::new_v4();
        let cutoff = self.cooldown_cutoff(Utc::now());
        let mut state = RunState::default();

        let warning = self.scan(IssueType::Warning, cutoff, &mut state).await?;
        let limit = self.scan(IssueType::Limit, cutoff, &mut state).await?;

        let summary = RunSummary {
            run_id,
            emails_sent: state.emails_sent,
            window_hours: self.config.window_hours,
            max_emails_per_run: self.config.max_emails_per_run,
            warning,
            limit,
        };

        tracing::info!(
            run_id = %summary.run_id,
            emails_sent = summary.emails_sent,
            warning_sent = warning.sent,
            warning_failed = warning.failed,
            limit_sent = limit.sent,
            limit_failed = limit.failed,
            "Threshold monitor run complete"
        );

        Ok(summary)
    }

    /// The timestamp a suppressing SENT record must be newer than.
    fn cooldown_cutoff(&self, now: Timestamp) -> Timestamp {
        if self.config.window_hours > 0 {
            now - Duration::hours(self.config.window_hours)
        } else {
            DateTime::UNIX_EPOCH
        }
    }

    /// One candidate pass for the given issue tier.
    async fn scan(
        &self,
        issue: IssueType,
        cutoff: Timestamp,
        state: &mut RunState,
    ) -> Result<PassCounters, MonitorError> {
        let candidates = match issue {
            IssueType::Warning => self.source.warning_candidates(cutoff).await,
            IssueType::Limit => self.source.limit_candidates(cutoff).await,
        }
        .map_err(|e| MonitorError::CandidateQuery {
            issue,
            message: e.to_string(),
        })?;

        let mut counters = PassCounters::default();

        for candidate in &candidates {
            if state.emails_sent >= self.config.max_emails_per_run {
                counters.skipped_throttled += 1;
                continue;
            }

            let owner = match candidate.owner_email.as_deref() {
                Some(email) if is_dispatchable_email(email) => email.to_string(),
                _ => {
                    tracing::debug!(
                        fixture = %candidate.key(),
                        "Skipping candidate without dispatchable owner email"
                    );
                    counters.skipped_invalid += 1;
                    continue;
                }
            };

            let message = self.compose(issue, candidate, &owner, state).await;

            match self.notifier.send(issue, &message).await {
                Ok(()) => {
                    counters.sent += 1;
                    state.emails_sent += 1;
                    self.record(candidate.id, issue, NotificationStatus::Sent, &owner)
                        .await;
                }
                Err(e) => {
                    tracing::warn!(
                        fixture = %candidate.key(),
                        issue = %issue,
                        error = %e,
                        "Notification dispatch failed"
                    );
                    counters.failed += 1;
                    self.record(candidate.id, issue, NotificationStatus::Failed, &owner)
                        .await;
                }
            }
        }

        tracing::info!(
            issue = %issue,
            candidates = candidates.len(),
            sent = counters.sent,
            failed = counters.failed,
            skipped_invalid = counters.skipped_invalid,
            skipped_throttled = counters.skipped_throttled,
            "Monitor pass complete"
        );

        Ok(counters)
    }

    /// Assemble the outgoing message for one candidate, with best-effort
    /// lookups: a failed CC, display-name, or probe resolution degrades to
    /// an empty/default value and never blocks dispatch.
    async fn compose(
        &self,
        issue: IssueType,
        candidate: &FixtureCandidate,
        owner: &str,
        state: &mut RunState,
    ) -> ThresholdMessage {
        let technicians = self
            .role_emails(&candidate.plant, ROLE_TECHNICIAN, state)
            .await;

        let cc = match issue {
            IssueType::Warning => compose_cc(owner, &[&technicians]),
            IssueType::Limit => {
                let escalate = candidate
                    .contacts_limit
                    .is_some_and(|limit| candidate.contacts >= critical_overshoot_floor(limit));
                if escalate {
                    let engineers = self
                        .role_emails(&candidate.plant, ROLE_ENGINEER, state)
                        .await;
                    compose_cc(owner, &[&technicians, &engineers])
                } else {
                    compose_cc(owner, &[&technicians])
                }
            }
        };

        let owner_name = self.owner_name(owner, state).await;
        let probes = self.probe_list(candidate.id, state).await;

        let threshold = match issue {
            IssueType::Warning => candidate.warning_at,
            IssueType::Limit => candidate.contacts_limit,
        }
        .unwrap_or_default();

        ThresholdMessage {
            to: owner.to_string(),
            cc,
            fixture: candidate.key(),
            project_name: candidate.project_name.clone(),
            owner_name,
            contacts: candidate.contacts,
            threshold,
            probes,
            triggered_by: TRIGGERED_BY,
        }
    }

    /// Cached role-group lookup; failures degrade to an empty list.
    async fn role_emails(&self, plant: &str, role: &str, state: &mut RunState) -> Vec<String> {
        let key = (plant.to_string(), role.to_string());
        if let Some(cached) = state.role_emails.get(&key) {
            return cached.clone();
        }
        let emails = match self.directory.emails_for_plant_role(plant, role).await {
            Ok(emails) => emails,
            Err(e) => {
                tracing::warn!(plant, role, error = %e, "CC group lookup failed, sending without group");
                Vec::new()
            }
        };
        state.role_emails.insert(key, emails.clone());
        emails
    }

    /// Cached display-name lookup; failures degrade to `None`.
    async fn owner_name(&self, email: &str, state: &mut RunState) -> Option<String> {
        if let Some(cached) = state.display_names.get(email) {
            return cached.clone();
        }
        let name = match self.directory.owner_display_name(email).await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(email, error = %e, "Owner name lookup failed, using generic greeting");
                None
            }
        };
        state.display_names.insert(email.to_string(), name.clone());
        name
    }

    /// Cached probe lookup; failures degrade to an empty list.
    async fn probe_list(&self, fixture_id: DbId, state: &mut RunState) -> Vec<ProbeLine> {
        if let Some(cached) = state.probe_lists.get(&fixture_id) {
            return cached.clone();
        }
        let probes = match self.probes.probes_for_fixture(fixture_id).await {
            Ok(probes) => probes,
            Err(e) => {
                tracing::warn!(fixture_id, error = %e, "Probe lookup failed, sending without probe list");
                Vec::new()
            }
        };
        state.probe_lists.insert(fixture_id, probes.clone());
        probes
    }

    /// Append the dispatch outcome to the notification log. Log failures
    /// are soft: the attempt already happened, so the loop carries on.
    async fn record(&self, fixture_id: DbId, issue: IssueType, status: NotificationStatus, recipient: &str) {
        if let Err(e) = self.log.append(fixture_id, issue, status, recipient).await {
            tracing::warn!(
                fixture_id,
                issue = %issue,
                status = status.as_str(),
                error = %e,
                "Failed to append notification log record"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;
    use async_trait::async_trait;

    use super::*;
    use crate::seams::SeamError;

    fn candidate(id: DbId, owner: Option<&str>, contacts: i64) -> FixtureCandidate {
        FixtureCandidate {
            id,
            plant: "Timisoara".to_string(),
            adapter_code: format!("A{id}"),
            fixture_type: "ICT".to_string(),
            project_name: "Proj".to_string(),
            owner_email: owner.map(|s| s.to_string()),
            contacts,
            warning_at: Some(90),
            contacts_limit: Some(150),
        }
    }

    #[derive(Default)]
    struct FakeSource {
        warning: Vec<FixtureCandidate>,
        limit: Vec<FixtureCandidate>,
        fail: bool,
        cutoffs: Mutex<Vec<Timestamp>>,
    }

    #[async_trait]
    impl FixtureSource for FakeSource {
        async fn warning_candidates(
            &self,
            cutoff: Timestamp,
        ) -> Result<Vec<FixtureCandidate>, SeamError> {
            self.cutoffs.lock().unwrap().push(cutoff);
            if self.fail {
                return Err("db unreachable".into());
            }
            Ok(self.warning.clone())
        }

        async fn limit_candidates(
            &self,
            cutoff: Timestamp,
        ) -> Result<Vec<FixtureCandidate>, SeamError> {
            self.cutoffs.lock().unwrap().push(cutoff);
            if self.fail {
                return Err("db unreachable".into());
            }
            Ok(self.limit.clone())
        }
    }

    #[derive(Default)]
    struct FakeLog {
        fail: bool,
        rows: Mutex<Vec<(DbId, IssueType, NotificationStatus, String)>>,
    }

    #[async_trait]
    impl NotificationLog for FakeLog {
        async fn append(
            &self,
            fixture_id: DbId,
            issue: IssueType,
            status: NotificationStatus,
            recipient: &str,
        ) -> Result<(), SeamError> {
            if self.fail {
                return Err("log insert failed".into());
            }
            self.rows
                .lock()
                .unwrap()
                .push((fixture_id, issue, status, recipient.to_string()));
            Ok(())
        }
    }

    #[derive(Default)]
    struct FakeDirectory {
        technicians: Vec<String>,
        engineers: Vec<String>,
        names: Vec<(String, String)>,
        fail: bool,
        lookups: Mutex<u32>,
    }

    #[async_trait]
    impl RecipientDirectory for FakeDirectory {
        async fn emails_for_plant_role(
            &self,
            _plant: &str,
            role: &str,
        ) -> Result<Vec<String>, SeamError> {
            *self.lookups.lock().unwrap() += 1;
            if self.fail {
                return Err("directory unavailable".into());
            }
            match role {
                ROLE_TECHNICIAN => Ok(self.technicians.clone()),
                ROLE_ENGINEER => Ok(self.engineers.clone()),
                _ => Ok(Vec::new()),
            }
        }

        async fn owner_display_name(&self, email: &str) -> Result<Option<String>, SeamError> {
            if self.fail {
                return Err("directory unavailable".into());
            }
            Ok(self
                .names
                .iter()
                .find(|(e, _)| e == email)
                .map(|(_, n)| n.clone()))
        }
    }

    #[derive(Default)]
    struct FakeProbes {
        probes: Vec<ProbeLine>,
        fail: bool,
    }

    #[async_trait]
    impl ProbeInventory for FakeProbes {
        async fn probes_for_fixture(&self, _fixture_id: DbId) -> Result<Vec<ProbeLine>, SeamError> {
            if self.fail {
                return Err("inventory unavailable".into());
            }
            Ok(self.probes.clone())
        }
    }

    #[derive(Default)]
    struct FakeNotifier {
        fail: bool,
        sent: Mutex<Vec<(IssueType, ThresholdMessage)>>,
    }

    #[async_trait]
    impl Notifier for FakeNotifier {
        async fn send(
            &self,
            issue: IssueType,
            message: &ThresholdMessage,
        ) -> Result<(), SeamError> {
            if self.fail {
                return Err("smtp refused".into());
            }
            self.sent.lock().unwrap().push((issue, message.clone()));
            Ok(())
        }
    }

    fn emails(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn monitor(
        source: FakeSource,
        directory: FakeDirectory,
        notifier: FakeNotifier,
        config: MonitorConfig,
    ) -> ThresholdMonitor<FakeSource, FakeLog, FakeDirectory, FakeProbes, FakeNotifier> {
        ThresholdMonitor::new(
            source,
            FakeLog::default(),
            directory,
            FakeProbes::default(),
            notifier,
            config,
        )
    }

    #[tokio::test]
    async fn single_warning_candidate_dispatches_once() {
        let source = FakeSource {
            warning: vec![candidate(1, Some("owner@x.com"), 95)],
            ..Default::default()
        };
        let directory = FakeDirectory {
            technicians: emails(&["tech1@x.com", "tech2@x.com"]),
            names: vec![("owner@x.com".to_string(), "Ana Pop".to_string())],
            ..Default::default()
        };
        let m = monitor(source, directory, FakeNotifier::default(), MonitorConfig::default());

        let summary = m.run().await.unwrap();

        assert_eq!(summary.emails_sent, 1);
        assert_eq!(summary.warning.sent, 1);
        assert_eq!(summary.limit, PassCounters::default());

        let sent = m.notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (issue, msg) = &sent[0];
        assert_eq!(*issue, IssueType::Warning);
        assert_eq!(msg.to, "owner@x.com");
        assert_eq!(msg.cc, emails(&["tech1@x.com", "tech2@x.com"]));
        assert_eq!(msg.owner_name.as_deref(), Some("Ana Pop"));
        assert_eq!(msg.threshold, 90);
        assert_eq!(msg.triggered_by, TRIGGERED_BY);

        let rows = m.log.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], (1, IssueType::Warning, NotificationStatus::Sent, "owner@x.com".to_string()));
    }

    #[tokio::test]
    async fn throttle_cuts_off_in_candidate_order() {
        let source = FakeSource {
            warning: vec![
                candidate(1, Some("a@x.com"), 95),
                candidate(2, Some("b@x.com"), 96),
                candidate(3, Some("c@x.com"), 97),
            ],
            ..Default::default()
        };
        let config = MonitorConfig {
            max_emails_per_run: 2,
            ..Default::default()
        };
        let m = monitor(source, FakeDirectory::default(), FakeNotifier::default(), config);

        let summary = m.run().await.unwrap();

        assert_eq!(summary.warning.sent, 2);
        assert_eq!(summary.warning.skipped_throttled, 1);
        assert_eq!(summary.emails_sent, 2);

        let sent = m.notifier.sent.lock().unwrap();
        let recipients: Vec<&str> = sent.iter().map(|(_, m)| m.to.as_str()).collect();
        assert_eq!(recipients, vec!["a@x.com", "b@x.com"]);
    }

    #[tokio::test]
    async fn cap_spans_both_passes() {
        let source = FakeSource {
            warning: vec![candidate(1, Some("a@x.com"), 95)],
            limit: vec![candidate(2, Some("b@x.com"), 150)],
            ..Default::default()
        };
        let config = MonitorConfig {
            max_emails_per_run: 1,
            ..Default::default()
        };
        let m = monitor(source, FakeDirectory::default(), FakeNotifier::default(), config);

        let summary = m.run().await.unwrap();

        assert_eq!(summary.warning.sent, 1);
        assert_eq!(summary.limit.sent, 0);
        assert_eq!(summary.limit.skipped_throttled, 1);

        let sent = m.notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, IssueType::Warning);
    }

    #[tokio::test]
    async fn invalid_owner_emails_are_skipped_before_dispatch() {
        let source = FakeSource {
            warning: vec![
                candidate(1, None, 95),
                candidate(2, Some("not-an-email"), 96),
                candidate(3, Some("ok@x.com"), 97),
            ],
            ..Default::default()
        };
        let m = monitor(source, FakeDirectory::default(), FakeNotifier::default(), MonitorConfig::default());

        let summary = m.run().await.unwrap();

        assert_eq!(summary.warning.skipped_invalid, 2);
        assert_eq!(summary.warning.sent, 1);

        // Nothing was attempted for the invalid candidates: no log rows.
        let rows = m.log.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, 3);
    }

    #[tokio::test]
    async fn directory_failure_degrades_to_empty_cc() {
        let source = FakeSource {
            warning: vec![candidate(1, Some("owner@x.com"), 95)],
            ..Default::default()
        };
        let directory = FakeDirectory {
            fail: true,
            ..Default::default()
        };
        let m = monitor(source, directory, FakeNotifier::default(), MonitorConfig::default());

        let summary = m.run().await.unwrap();

        assert_eq!(summary.warning.sent, 1);
        let sent = m.notifier.sent.lock().unwrap();
        assert!(sent[0].1.cc.is_empty());
        assert_eq!(sent[0].1.owner_name, None);
    }

    #[tokio::test]
    async fn notifier_failure_is_recorded_and_loop_continues() {
        let source = FakeSource {
            warning: vec![
                candidate(1, Some("a@x.com"), 95),
                candidate(2, Some("b@x.com"), 96),
            ],
            ..Default::default()
        };
        let notifier = FakeNotifier {
            fail: true,
            ..Default::default()
        };
        let m = monitor(source, FakeDirectory::default(), notifier, MonitorConfig::default());

        let summary = m.run().await.unwrap();

        assert_eq!(summary.warning.failed, 2);
        assert_eq!(summary.warning.sent, 0);
        assert_eq!(summary.emails_sent, 0);

        // Both attempts were logged as failed.
        let rows = m.log.rows.lock().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.2 == NotificationStatus::Failed));
    }

    #[tokio::test]
    async fn log_append_failure_does_not_abort_the_run() {
        let source = FakeSource {
            warning: vec![candidate(1, Some("owner@x.com"), 95)],
            ..Default::default()
        };
        let m = ThresholdMonitor::new(
            source,
            FakeLog {
                fail: true,
                ..Default::default()
            },
            FakeDirectory::default(),
            FakeProbes::default(),
            FakeNotifier::default(),
            MonitorConfig::default(),
        );

        let summary = m.run().await.unwrap();
        assert_eq!(summary.warning.sent, 1);
    }

    #[tokio::test]
    async fn limit_pass_escalates_to_engineers_at_overshoot_floor() {
        let mut over = candidate(1, Some("owner@x.com"), 110);
        over.contacts_limit = Some(100);
        let source = FakeSource {
            limit: vec![over],
            ..Default::default()
        };
        let directory = FakeDirectory {
            technicians: emails(&["tech@x.com"]),
            engineers: emails(&["eng@x.com"]),
            ..Default::default()
        };
        let m = monitor(source, directory, FakeNotifier::default(), MonitorConfig::default());

        m.run().await.unwrap();

        let sent = m.notifier.sent.lock().unwrap();
        assert_eq!(sent[0].1.cc, emails(&["tech@x.com", "eng@x.com"]));
    }

    #[tokio::test]
    async fn limit_pass_below_overshoot_floor_stays_technician_only() {
        let mut near = candidate(1, Some("owner@x.com"), 109);
        near.contacts_limit = Some(100);
        let source = FakeSource {
            limit: vec![near],
            ..Default::default()
        };
        let directory = FakeDirectory {
            technicians: emails(&["tech@x.com"]),
            engineers: emails(&["eng@x.com"]),
            ..Default::default()
        };
        let m = monitor(source, directory, FakeNotifier::default(), MonitorConfig::default());

        m.run().await.unwrap();

        let sent = m.notifier.sent.lock().unwrap();
        assert_eq!(sent[0].1.cc, emails(&["tech@x.com"]));
    }

    #[tokio::test]
    async fn cc_excludes_owner_and_deduplicates() {
        let source = FakeSource {
            warning: vec![candidate(1, Some("owner@x.com"), 95)],
            ..Default::default()
        };
        let directory = FakeDirectory {
            technicians: emails(&["tech@x.com", "owner@x.com", "tech@x.com"]),
            ..Default::default()
        };
        let m = monitor(source, directory, FakeNotifier::default(), MonitorConfig::default());

        m.run().await.unwrap();

        let sent = m.notifier.sent.lock().unwrap();
        assert_eq!(sent[0].1.cc, emails(&["tech@x.com"]));
    }

    #[tokio::test]
    async fn group_lookup_is_cached_per_run() {
        let source = FakeSource {
            warning: vec![
                candidate(1, Some("a@x.com"), 95),
                candidate(2, Some("b@x.com"), 96),
            ],
            ..Default::default()
        };
        let directory = FakeDirectory {
            technicians: emails(&["tech@x.com"]),
            ..Default::default()
        };
        let m = monitor(source, directory, FakeNotifier::default(), MonitorConfig::default());

        m.run().await.unwrap();

        // Two candidates in the same plant: one technician-group lookup.
        assert_eq!(*m.directory.lookups.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn source_failure_aborts_the_run() {
        let source = FakeSource {
            fail: true,
            ..Default::default()
        };
        let m = monitor(source, FakeDirectory::default(), FakeNotifier::default(), MonitorConfig::default());

        let err = m.run().await.unwrap_err();
        assert_matches!(err, MonitorError::CandidateQuery { issue: IssueType::Warning, .. });
    }

    #[tokio::test]
    async fn disabled_window_passes_epoch_cutoff_to_source() {
        let source = FakeSource::default();
        let config = MonitorConfig {
            window_hours: 0,
            ..Default::default()
        };
        let m = monitor(source, FakeDirectory::default(), FakeNotifier::default(), config);

        m.run().await.unwrap();

        let cutoffs = m.source.cutoffs.lock().unwrap();
        assert_eq!(cutoffs.len(), 2);
        assert!(cutoffs.iter().all(|c| *c == DateTime::UNIX_EPOCH));
    }

    #[tokio::test]
    async fn active_window_passes_recent_cutoff_to_source() {
        let source = FakeSource::default();
        let m = monitor(source, FakeDirectory::default(), FakeNotifier::default(), MonitorConfig::default());

        let before = Utc::now() - Duration::hours(24);
        m.run().await.unwrap();
        let after = Utc::now() - Duration::hours(24);

        let cutoffs = m.source.cutoffs.lock().unwrap();
        assert!(cutoffs.iter().all(|c| *c >= before && *c <= after));
    }

    #[tokio::test]
    async fn probe_failure_degrades_to_empty_list() {
        let source = FakeSource {
            warning: vec![candidate(1, Some("owner@x.com"), 95)],
            ..Default::default()
        };
        let m = ThresholdMonitor::new(
            source,
            FakeLog::default(),
            FakeDirectory::default(),
            FakeProbes {
                fail: true,
                ..Default::default()
            },
            FakeNotifier::default(),
            MonitorConfig::default(),
        );

        let summary = m.run().await.unwrap();
        assert_eq!(summary.warning.sent, 1);
        assert!(m.notifier.sent.lock().unwrap()[0].1.probes.is_empty());
    }
}
