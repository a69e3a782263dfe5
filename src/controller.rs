//! # Module: Workflow Controller
//!
//! ## Responsibility
//! Owns the dashboard application state and drives its two workflows:
//! the full load (six concurrent retrievals, then store/render/chart update)
//! and the triage action (submit, then full-refresh reconciliation).
//!
//! ## Guarantees
//! - The dataset is replaced only here (single writer)
//! - One failing source degrades only its own widget
//! - A triage action without an identifiable target never reaches the network
//! - A successful triage closes the detail panel and triggers a full reload
//!
//! ## NOT Responsible For
//! - Drawing (see `tui`)
//! - Request mechanics or failure notices (see `transport::Gateway`)

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::chart::{self, ChartHandle, ChartKind, ChartSurface, DisplayOptions};
use crate::dataset::{self, Dataset, SortColumn, View};
use crate::format::format_clock;
use crate::model::{
    decode_records, AggregateSeries, AppId, AppRecord, BehaviorInsights, Resolution,
    ResolveResponse, SummaryStats,
};
use crate::notifier::{Notifier, Severity};
use crate::transport::{Endpoint, Gateway};
use crate::view::{table_body, CollectionState, TableBody, ViewState, ViewTransition};

/// Notice posted when a triage action has no target record or outcome.
pub const MISSING_TARGET: &str = "Error identifying app or action.";

/// KPI header text while a load is in flight.
pub const UPDATING: &str = "Updating...";

/// Lifecycle phase of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Constructed, nothing requested yet.
    #[default]
    Idle,
    /// A load batch is in flight.
    Loading,
    /// The last load batch has settled.
    Ready,
}

/// An in-flight triage submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Record being resolved.
    pub target: AppId,
    /// Requested outcome.
    pub outcome: Resolution,
    /// Whether the triggering control is disabled.
    pub control_disabled: bool,
    /// Transient indicator text.
    pub indicator: String,
}

/// A validated triage request ready to be submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveCall {
    /// Target record.
    pub id: AppId,
    /// Requested outcome.
    pub outcome: Resolution,
}

impl ResolveCall {
    /// Resolver endpoint for the target record.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::Resolve(self.id.clone())
    }

    /// JSON request body.
    pub fn body(&self) -> Value {
        json!({ "resolution_status": self.outcome })
    }
}

/// Settled results of one load batch; `None` marks a failed source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    /// `/api/summary_stats`
    pub stats: Option<Value>,
    /// `/api/apps`
    pub apps: Option<Value>,
    /// `/api/behavior_insights`
    pub behavior: Option<Value>,
    /// `/api/chart_data/risk_distribution`
    pub risk_distribution: Option<Value>,
    /// `/api/chart_data/spend_by_category`
    pub spend_by_category: Option<Value>,
    /// `/api/chart_data/usage_trend`
    pub usage_trend: Option<Value>,
}

/// Issues the six load retrievals as one concurrent batch and waits for all
/// of them to settle.
pub async fn fetch_all(gateway: &Gateway) -> LoadOutcome {
    let (stats, apps, behavior, risk_distribution, spend_by_category, usage_trend) = tokio::join!(
        gateway.retrieve(&Endpoint::SummaryStats),
        gateway.retrieve(&Endpoint::Apps),
        gateway.retrieve(&Endpoint::BehaviorInsights),
        gateway.retrieve(&Endpoint::RiskDistribution),
        gateway.retrieve(&Endpoint::SpendByCategory),
        gateway.retrieve(&Endpoint::UsageTrend),
    );
    LoadOutcome {
        stats,
        apps,
        behavior,
        risk_distribution,
        spend_by_category,
        usage_trend,
    }
}

/// Result delivered by a background workflow task.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// A load batch settled.
    Loaded(LoadOutcome),
    /// A triage submission settled; `None` means it failed.
    Resolved(Option<Value>),
}

/// The explicit application state of the dashboard.
#[derive(Debug)]
pub struct Dashboard {
    dataset: Dataset,
    view_state: ViewState,
    view: View,
    collection: CollectionState,
    stats: SummaryStats,
    insights: BehaviorInsights,
    risk_chart: Option<ChartHandle>,
    spend_chart: Option<ChartHandle>,
    trend_chart: Option<ChartHandle>,
    phase: Phase,
    last_updated: Option<String>,
    submission: Option<Submission>,
    notifier: Notifier,
}

impl Dashboard {
    /// Creates an empty dashboard reporting to `notifier`.
    pub fn new(notifier: Notifier) -> Self {
        Self {
            dataset: Dataset::new(),
            view_state: ViewState::default(),
            view: Vec::new(),
            collection: CollectionState::Loading,
            stats: SummaryStats::default(),
            insights: BehaviorInsights::default(),
            risk_chart: None,
            spend_chart: None,
            trend_chart: None,
            phase: Phase::Idle,
            last_updated: None,
            submission: None,
            notifier,
        }
    }

    // ── Read access ────────────────────────────────────────────────────────

    /// Canonical dataset.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Current view state.
    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    /// Current filtered and sorted projection.
    pub fn view(&self) -> &[Arc<AppRecord>] {
        &self.view
    }

    /// Number of records in the current projection.
    pub fn visible_count(&self) -> usize {
        self.view.len()
    }

    /// Load state of the record collection.
    pub fn collection(&self) -> CollectionState {
        self.collection
    }

    /// Table body for the current projection.
    pub fn table(&self) -> TableBody {
        table_body(&self.view, self.collection)
    }

    /// Last successfully loaded KPI summary (defaults before the first).
    pub fn stats(&self) -> &SummaryStats {
        &self.stats
    }

    /// Behavior insight lists.
    pub fn insights(&self) -> &BehaviorInsights {
        &self.insights
    }

    /// Chart bound to `surface`, once constructed.
    pub fn chart(&self, surface: ChartSurface) -> Option<&ChartHandle> {
        match surface {
            ChartSurface::RiskDistribution => self.risk_chart.as_ref(),
            ChartSurface::SpendByCategory => self.spend_chart.as_ref(),
            ChartSurface::UsageTrend => self.trend_chart.as_ref(),
        }
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// In-flight triage submission.
    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    /// The notifier this dashboard reports to.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// KPI header marker: `Updating...` while loading, `Updated: HH:MM:SS`
    /// after a load, empty before the first.
    pub fn updated_label(&self) -> String {
        match (self.phase, &self.last_updated) {
            (Phase::Loading, _) => UPDATING.to_string(),
            (_, Some(clock)) => format!("Updated: {clock}"),
            (_, None) => String::new(),
        }
    }

    /// Record under the selection cursor.
    pub fn selected_record(&self) -> Option<Arc<AppRecord>> {
        self.view.get(self.view_state.selected).cloned()
    }

    /// Record shown in the detail panel, resolved through the identifier map.
    pub fn detail_record(&self) -> Option<Arc<AppRecord>> {
        self.view_state
            .detail
            .as_ref()
            .and_then(|id| self.dataset.get(id))
    }

    // ── View interactions ──────────────────────────────────────────────────

    fn reproject(&mut self) {
        // a failed collection shows no rows, so nothing stale stays selectable
        self.view = if self.collection == CollectionState::Failed {
            Vec::new()
        } else {
            dataset::project(
                self.dataset.records(),
                &self.view_state.filter,
                self.view_state.sort,
            )
        };
        self.view_state.clamp_selection(self.view.len());
    }

    /// Replaces the filter text and re-derives the view.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.view_state
            .apply(ViewTransition::FilterChanged(text.into()));
        self.reproject();
    }

    /// Activates a sortable column header.
    pub fn click_sort(&mut self, column: SortColumn) {
        self.view_state.apply(ViewTransition::SortClicked(column));
        debug!(column = column.field(), sort = ?self.view_state.sort, "sort changed");
        self.reproject();
    }

    /// Moves the selection up.
    pub fn select_prev(&mut self) {
        self.view_state.select_prev();
    }

    /// Moves the selection down.
    pub fn select_next(&mut self) {
        self.view_state.select_next(self.view.len());
    }

    /// Opens the detail panel for the selected row. Returns whether it opened.
    pub fn open_selected(&mut self) -> bool {
        match self.selected_record() {
            Some(record) => {
                self.view_state
                    .apply(ViewTransition::OpenDetail(record.id.clone()));
                true
            }
            None => false,
        }
    }

    /// Opens the detail panel for a specific record.
    pub fn open_detail(&mut self, id: AppId) {
        self.view_state.apply(ViewTransition::OpenDetail(id));
    }

    /// Closes the detail panel.
    pub fn close_detail(&mut self) {
        self.view_state.apply(ViewTransition::CloseDetail);
    }

    // ── Load workflow ──────────────────────────────────────────────────────

    /// `Idle/Ready → Loading`.
    pub fn begin_load(&mut self) {
        info!(previous = ?self.phase, "dashboard load started");
        self.phase = Phase::Loading;
    }

    fn decode<T: DeserializeOwned>(&self, endpoint: &Endpoint, value: Value) -> Option<T> {
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(endpoint = %endpoint, error = %e, "unexpected document shape");
                self.notifier.notify(
                    format!("Unexpected data from {endpoint}."),
                    Severity::Danger,
                );
                None
            }
        }
    }

    fn present_chart(
        &mut self,
        surface: ChartSurface,
        kind: ChartKind,
        options: DisplayOptions,
        endpoint: Endpoint,
        document: Option<Value>,
    ) {
        let Some(value) = document else {
            return;
        };
        let Some(series) = self.decode::<AggregateSeries>(&endpoint, value) else {
            return;
        };
        let slot = match surface {
            ChartSurface::RiskDistribution => &mut self.risk_chart,
            ChartSurface::SpendByCategory => &mut self.spend_chart,
            ChartSurface::UsageTrend => &mut self.trend_chart,
        };
        *slot = Some(chart::present(slot.take(), surface, kind, &series, options));
    }

    /// `Loading → Ready`: applies every settled source independently.
    pub fn apply_load(&mut self, outcome: LoadOutcome) {
        if let Some(value) = outcome.stats {
            if let Some(stats) = self.decode::<SummaryStats>(&Endpoint::SummaryStats, value) {
                self.stats = stats;
            }
        }

        match outcome.apps.map(decode_records) {
            Some(Ok(batch)) => {
                info!(
                    records = batch.records.len(),
                    skipped = batch.skipped,
                    "dataset replaced"
                );
                if batch.skipped > 0 {
                    self.notifier.notify(
                        format!("Skipped {} malformed application record(s).", batch.skipped),
                        Severity::Warning,
                    );
                }
                self.dataset.replace(batch.records);
                self.collection = CollectionState::Ready;
            }
            Some(Err(e)) => {
                warn!(error = %e, "application collection is not a list");
                self.notifier.notify(
                    format!("Unexpected data from {}.", Endpoint::Apps),
                    Severity::Danger,
                );
                self.collection = CollectionState::Failed;
            }
            None => self.collection = CollectionState::Failed,
        }
        self.view_state.apply(ViewTransition::Reload);
        self.reproject();

        self.present_chart(
            ChartSurface::RiskDistribution,
            ChartKind::Donut,
            DisplayOptions::risk_distribution(),
            Endpoint::RiskDistribution,
            outcome.risk_distribution,
        );
        self.present_chart(
            ChartSurface::SpendByCategory,
            ChartKind::Bar,
            DisplayOptions::spend_by_category(),
            Endpoint::SpendByCategory,
            outcome.spend_by_category,
        );
        self.present_chart(
            ChartSurface::UsageTrend,
            ChartKind::Line,
            DisplayOptions::usage_trend(),
            Endpoint::UsageTrend,
            outcome.usage_trend,
        );

        self.insights = match outcome.behavior {
            Some(value) => BehaviorInsights::from_value(&value),
            None => BehaviorInsights::failed(),
        };

        self.last_updated = Some(format_clock(&chrono::Local::now()));
        self.phase = Phase::Ready;
        info!(visible = self.view.len(), "dashboard ready");
    }

    // ── Triage workflow ────────────────────────────────────────────────────

    /// `Ready → Submitting`: validates the target and disables the control.
    ///
    /// Returns `None` (after a danger notice) when no detail record or no
    /// outcome is identifiable, and `None` silently while another submission
    /// holds the control.
    pub fn begin_resolve(&mut self, outcome: Option<Resolution>) -> Option<ResolveCall> {
        if self.submission.is_some() {
            debug!("triage control disabled; ignoring action");
            return None;
        }
        let target = self.view_state.detail.clone();
        let (Some(id), Some(outcome)) = (target, outcome) else {
            warn!("triage action without target record or outcome");
            self.notifier.notify(MISSING_TARGET, Severity::Danger);
            return None;
        };
        info!(app_id = %id, %outcome, "submitting resolution");
        self.submission = Some(Submission {
            target: id.clone(),
            outcome,
            control_disabled: true,
            indicator: format!("Updating to {outcome}..."),
        });
        Some(ResolveCall { id, outcome })
    }

    /// `Submitting → Ready`: re-enables the control and reconciles.
    ///
    /// Returns `true` when the update succeeded and a full reload must follow.
    pub fn finish_resolve(&mut self, response: Option<Value>) -> bool {
        let submission = self.submission.take();
        let Some(value) = response else {
            // the gateway already reported the failure
            return false;
        };
        let parsed = serde_json::from_value::<ResolveResponse>(value).unwrap_or_default();
        if parsed.success {
            info!(app_id = ?submission.map(|s| s.target), "resolution applied");
            self.notifier.notify(parsed.message, Severity::Success);
            self.view_state.apply(ViewTransition::CloseDetail);
            true
        } else {
            warn!(message = %parsed.message, "resolver reported failure");
            let message = if parsed.message.is_empty() {
                "Update was not applied.".to_string()
            } else {
                format!("API Error on update: {}", parsed.message)
            };
            self.notifier.notify(message, Severity::Danger);
            false
        }
    }

    /// Applies a background workflow result. Returns `true` when a full
    /// reload must be started.
    pub fn handle(&mut self, event: WorkflowEvent) -> bool {
        match event {
            WorkflowEvent::Loaded(outcome) => {
                self.apply_load(outcome);
                false
            }
            WorkflowEvent::Resolved(response) => self.finish_resolve(response),
        }
    }
}

/// Composes the workflow transitions with the network.
#[derive(Debug, Clone)]
pub struct Controller {
    gateway: Gateway,
}

impl Controller {
    /// Creates a controller over `gateway`.
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// The gateway used for every request.
    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Runs a full load sequence to completion.
    pub async fn load(&self, dashboard: &mut Dashboard) {
        dashboard.begin_load();
        let outcome = fetch_all(&self.gateway).await;
        dashboard.apply_load(outcome);
    }

    /// Runs a triage action, followed by a full reload on success.
    ///
    /// Returns whether the resolution was applied.
    pub async fn resolve(&self, dashboard: &mut Dashboard, outcome: Option<Resolution>) -> bool {
        let Some(call) = dashboard.begin_resolve(outcome) else {
            return false;
        };
        let response = self.gateway.submit(&call.endpoint(), &call.body()).await;
        if dashboard.finish_resolve(response) {
            self.load(dashboard).await;
            true
        } else {
            false
        }
    }

    /// Starts a load batch on a background task.
    pub fn spawn_load(&self, events: mpsc::UnboundedSender<WorkflowEvent>) {
        let gateway = self.gateway.clone();
        tokio::spawn(async move {
            let outcome = fetch_all(&gateway).await;
            if events.send(WorkflowEvent::Loaded(outcome)).is_err() {
                debug!("dashboard closed before load settled");
            }
        });
    }

    /// Submits a validated triage request on a background task.
    pub fn spawn_resolve(&self, call: ResolveCall, events: mpsc::UnboundedSender<WorkflowEvent>) {
        let gateway = self.gateway.clone();
        tokio::spawn(async move {
            let response = gateway.submit(&call.endpoint(), &call.body()).await;
            if events.send(WorkflowEvent::Resolved(response)).is_err() {
                debug!("dashboard closed before resolution settled");
            }
        });
    }
}
