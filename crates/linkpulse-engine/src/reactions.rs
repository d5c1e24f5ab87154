//! Reaction aggregation.
//!
//! One invocation fetches the current reaction set for every tracked
//! activity and folds it into a single report. There is no watermark: the
//! full current set is returned each time. Failures are isolated per
//! target while the pass runs; [`collect_reactions`] then raises the first
//! one, [`aggregate_reactions`] keeps the partial view instead.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use linkpulse_linkedin::{LinkedinClient, ReactionElement, ReactionsPage};

use crate::error::EngineError;
use crate::window::datetime_from_millis;

/// One reaction on a tracked activity.
#[derive(Debug, Clone, Serialize)]
pub struct Reaction {
    pub target: String,
    pub reaction_id: String,
    pub reaction_type: Option<String>,
    pub actor_urn: Option<String>,
    pub root_urn: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub last_modified_at: Option<DateTime<Utc>>,
    pub impersonator_urn: Option<String>,
}

/// Reaction data for one target, or the error that prevented fetching it.
///
/// When `error` is set the counts are zero and the lists empty; the other
/// targets' reports are unaffected.
#[derive(Debug, Clone, Serialize)]
pub struct TargetReport {
    pub target: String,
    pub total_reactions: u64,
    pub reactions: Vec<Reaction>,
    pub reactions_by_type: HashMap<String, u64>,
    pub error: Option<String>,
}

/// Aggregated reaction analytics across all targets.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub targets: Vec<TargetReport>,
    pub total_targets: usize,
    pub total_reactions: u64,
}

/// Fetches and aggregates reactions for every target, keeping per-target
/// failures inline.
///
/// A failed target's report carries the error message with zeroed counts
/// while the remaining targets are still fetched and parsed. This is the
/// partial-results view; [`collect_reactions`] layers whole-call failure
/// semantics on top of the same pass.
pub async fn aggregate_reactions(client: &LinkedinClient, targets: &[String]) -> AnalyticsReport {
    let (reports, _) = run_targets(client, targets).await;
    build_report(reports)
}

/// Fetches and aggregates reactions for every target, then fails with the
/// first per-target error once all targets have been attempted.
///
/// Every target is still fetched before the error is raised, so provider
/// load and logging match [`aggregate_reactions`]; only the return value
/// differs.
///
/// # Errors
///
/// Returns [`EngineError::ReactionFetch`] for the lowest-indexed failed
/// target, discarding the partial report. Callers that need the partial
/// view use [`aggregate_reactions`].
pub async fn collect_reactions(
    client: &LinkedinClient,
    targets: &[String],
) -> Result<AnalyticsReport, EngineError> {
    let (reports, first_error) = run_targets(client, targets).await;
    match first_error {
        Some(err) => Err(err),
        None => Ok(build_report(reports)),
    }
}

/// One fail-open pass over the targets: every target is attempted, failures
/// are recorded inline, and the first failure is handed back separately for
/// the caller to raise or ignore.
async fn run_targets(
    client: &LinkedinClient,
    targets: &[String],
) -> (Vec<TargetReport>, Option<EngineError>) {
    let mut reports = Vec::with_capacity(targets.len());
    let mut first_error: Option<EngineError> = None;

    for target in targets {
        match client.fetch_reactions(target).await {
            Ok(page) => reports.push(report_for_target(target, &page)),
            Err(source) => {
                tracing::warn!(target = %target, error = %source, "failed to fetch reactions");
                reports.push(TargetReport {
                    target: target.clone(),
                    total_reactions: 0,
                    reactions: Vec::new(),
                    reactions_by_type: HashMap::new(),
                    error: Some(format!("Failed: {source}")),
                });
                if first_error.is_none() {
                    first_error = Some(EngineError::ReactionFetch {
                        target: target.clone(),
                        source,
                    });
                }
            }
        }
    }

    (reports, first_error)
}

/// Parses and tallies one target's reaction page.
///
/// `total_reactions` trusts the provider's `paging.total` when present
/// (the page may be truncated), falling back to the parsed element count.
fn report_for_target(target: &str, page: &ReactionsPage) -> TargetReport {
    let reactions: Vec<Reaction> = page
        .elements
        .iter()
        .filter_map(|element| parse_reaction(target, element))
        .collect();

    let total_reactions = match page.paging.and_then(|p| p.total) {
        Some(total) => total,
        None => reactions.len() as u64,
    };

    TargetReport {
        target: target.to_string(),
        total_reactions,
        reactions_by_type: tally_reactions(&reactions),
        reactions,
        error: None,
    }
}

/// Parses one raw element into a [`Reaction`].
///
/// Only the id is required; an element without one is dropped. Every other
/// field is best-effort, so a sparse element still parses.
fn parse_reaction(target: &str, element: &ReactionElement) -> Option<Reaction> {
    let reaction_id = element.id.clone()?;
    let created = element.created.as_ref();

    Some(Reaction {
        target: target.to_string(),
        reaction_id,
        reaction_type: element.reaction_type.clone(),
        actor_urn: created.and_then(|c| c.actor.clone()),
        root_urn: element.root.clone(),
        created_at: created.and_then(|c| c.time).and_then(datetime_from_millis),
        last_modified_at: element
            .last_modified
            .as_ref()
            .and_then(|m| m.time)
            .and_then(datetime_from_millis),
        impersonator_urn: created.and_then(|c| c.impersonator.clone()),
    })
}

/// Counts reactions per type. A reaction without a type contributes to the
/// list but not to any count.
fn tally_reactions(reactions: &[Reaction]) -> HashMap<String, u64> {
    let mut by_type = HashMap::new();
    for reaction in reactions {
        if let Some(kind) = &reaction.reaction_type {
            *by_type.entry(kind.clone()).or_insert(0) += 1;
        }
    }
    by_type
}

fn build_report(targets: Vec<TargetReport>) -> AnalyticsReport {
    let total_targets = targets.len();
    let total_reactions = targets.iter().map(|t| t.total_reactions).sum();
    AnalyticsReport {
        targets,
        total_targets,
        total_reactions,
    }
}
