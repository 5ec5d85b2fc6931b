//! Human-readable diff between two application snapshots
//!
//! `diff(old, new)` walks both snapshot trees and reports every created,
//! deleted, and modified entity at every nesting level. Entities with an id
//! are matched across snapshots by id, never by name or position; entities
//! keyed by name (pipeline parameters, values) are matched by name. A
//! new-side entity with an empty id has not been deployed yet, so it gets a
//! placeholder id before matching and always classifies as created.
//!
//! The report is fully deterministic: fields compare in declaration order,
//! collections enumerate in input slice order, and string sets in sorted
//! order. Opaque documents compare as text, so two payloads that differ only
//! in key order or whitespace are reported as modified.
//!
//! Every function here is total; there is no error path.

use std::collections::HashMap;

use super::{App, AuthProvider, Pipeline, PipelineParameter, Service, ServiceRule, Value, Webhook};
use super::raw_text;
use crate::ui::{self, Highlight};

/// Compare two snapshots and render their differences as a bullet-styled
/// multi-line report. Returns the empty string when nothing differs.
pub fn diff(old: &App, new: &App) -> String {
    let mut ctx = DiffContext::default();
    let mut lines = Vec::new();

    // group, app id, and client id are immutable, never diffed
    lines.extend(diff_string(&old.name, &new.name, "name"));
    lines.extend(diff_services(&mut ctx, &old.services, &new.services));
    lines.extend(diff_pipelines(&mut ctx, &old.pipelines, &new.pipelines));
    lines.extend(diff_values(&mut ctx, &old.values, &new.values));
    lines.extend(diff_auth_providers(
        &mut ctx,
        &old.auth_providers,
        &new.auth_providers,
    ));

    if lines.len() > 1 {
        lines[0] = format!("* {}", lines[0]);
    }
    lines.join("\n* ")
}

// ============================================================================
// Reconciliation Context
// ============================================================================

/// Allocates placeholder ids for new-side entities that have none yet.
///
/// Scoped to a single `diff` call, so concurrent calls cannot race and the
/// numbering always starts at 1 for each report.
#[derive(Debug, Default)]
struct DiffContext {
    next_uid: u64,
}

impl DiffContext {
    fn placeholder_id(&mut self) -> String {
        self.next_uid += 1;
        format!("__uid_{}", self.next_uid)
    }
}

// ============================================================================
// Collection Differ
// ============================================================================

/// An entity that can be matched across two snapshots.
trait Keyed {
    /// Matching key for this entity within its sibling collection.
    fn key(&self) -> &str;

    /// Whether an empty key means "not yet assigned" and should be replaced
    /// with a placeholder before matching. Name-keyed entities opt out:
    /// their name is the matching key as-is.
    const SYNTHESIZE_PLACEHOLDER: bool = true;
}

impl Keyed for Service {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Webhook {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for ServiceRule {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for Pipeline {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for AuthProvider {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for PipelineParameter {
    fn key(&self) -> &str {
        &self.name
    }
    const SYNTHESIZE_PLACEHOLDER: bool = false;
}

impl Keyed for Value {
    fn key(&self) -> &str {
        &self.name
    }
    const SYNTHESIZE_PLACEHOLDER: bool = false;
}

/// Partition two sibling collections into deleted / created / matched and
/// emit their lines in that order.
///
/// Deletions enumerate the old slice and creations the new slice — never the
/// lookup maps — so the report order tracks input order. Matched pairs
/// recurse through `matched` in new-slice order.
fn diff_collection<T: Keyed>(
    ctx: &mut DiffContext,
    old: &[T],
    new: &[T],
    deleted_line: impl Fn(&T) -> String,
    created_line: impl Fn(&T) -> String,
    mut matched: impl FnMut(&mut DiffContext, &T, &T) -> Vec<String>,
) -> Vec<String> {
    let old_keys: Vec<&str> = old.iter().map(Keyed::key).collect();
    let new_keys: Vec<String> = new
        .iter()
        .map(|entity| {
            if T::SYNTHESIZE_PLACEHOLDER && entity.key().is_empty() {
                ctx.placeholder_id()
            } else {
                entity.key().to_string()
            }
        })
        .collect();

    let old_index: HashMap<&str, usize> = old_keys
        .iter()
        .enumerate()
        .map(|(i, key)| (*key, i))
        .collect();
    let new_index: HashMap<&str, usize> = new_keys
        .iter()
        .enumerate()
        .map(|(i, key)| (key.as_str(), i))
        .collect();

    let mut lines = Vec::new();
    for (entity, key) in old.iter().zip(&old_keys) {
        if !new_index.contains_key(*key) {
            lines.push(deleted_line(entity));
        }
    }
    for (entity, key) in new.iter().zip(&new_keys) {
        if !old_index.contains_key(key.as_str()) {
            lines.push(created_line(entity));
        }
    }
    for (entity, key) in new.iter().zip(&new_keys) {
        if let Some(&i) = old_index.get(key.as_str()) {
            lines.extend(matched(ctx, &old[i], entity));
        }
    }
    lines
}

// ============================================================================
// Scalar and Set Comparators
// ============================================================================

fn diff_string(old: &str, new: &str, label: &str) -> Vec<String> {
    if old == new {
        return Vec::new();
    }
    vec![format!(
        "modified {} from \"{}\" to \"{}\"",
        label,
        ui::highlight(Highlight::Removed, old),
        ui::highlight(Highlight::Added, new),
    )]
}

fn diff_bool(old: bool, new: bool, label: &str) -> Vec<String> {
    diff_string(bool_str(old), bool_str(new), label)
}

fn bool_str(b: bool) -> &'static str {
    if b { "true" } else { "false" }
}

/// Compare two unordered string sets with a sorted two-cursor merge.
///
/// Reports exactly the set differences, deduplicated: all deletions first in
/// sorted order, then all additions in sorted order.
fn diff_string_set(old: &[String], new: &[String], item_label: &str) -> Vec<String> {
    let mut old_sorted: Vec<&str> = old.iter().map(String::as_str).collect();
    let mut new_sorted: Vec<&str> = new.iter().map(String::as_str).collect();
    old_sorted.sort_unstable();
    old_sorted.dedup();
    new_sorted.sort_unstable();
    new_sorted.dedup();

    let mut deleted = Vec::new();
    let mut created = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < old_sorted.len() && j < new_sorted.len() {
        if old_sorted[i] == new_sorted[j] {
            i += 1;
            j += 1;
        } else if old_sorted[i] < new_sorted[j] {
            deleted.push(old_sorted[i]);
            i += 1;
        } else {
            created.push(new_sorted[j]);
            j += 1;
        }
    }
    deleted.extend_from_slice(&old_sorted[i..]);
    created.extend_from_slice(&new_sorted[j..]);

    let mut lines = Vec::new();
    for item in deleted {
        lines.push(format!(
            "deleted {}: \"{}\"",
            item_label,
            ui::highlight(Highlight::Removed, item),
        ));
    }
    for item in created {
        lines.push(format!(
            "created {}: \"{}\"",
            item_label,
            ui::highlight(Highlight::Added, item),
        ));
    }
    lines
}

// ============================================================================
// Services
// ============================================================================

fn diff_services(ctx: &mut DiffContext, old: &[Service], new: &[Service]) -> Vec<String> {
    diff_collection(
        ctx,
        old,
        new,
        |svc| {
            format!(
                "deleted service \"{}\"",
                ui::highlight(Highlight::Removed, &svc.name)
            )
        },
        |svc| {
            format!(
                "created service \"{}\"",
                ui::highlight(Highlight::Added, &svc.name)
            )
        },
        diff_service,
    )
}

fn diff_service(ctx: &mut DiffContext, old: &Service, new: &Service) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(diff_string(
        &old.name,
        &new.name,
        &format!("name of service \"{}\"", old.id),
    ));
    lines.extend(diff_string(
        &old.service_type,
        &new.service_type,
        &format!("type of service {}", new.name),
    ));
    lines.extend(diff_string(
        raw_text(&old.config),
        raw_text(&new.config),
        &format!("config of service {}", new.name),
    ));
    lines.extend(diff_webhooks(ctx, &old.webhooks, &new.webhooks, &new.name));
    lines.extend(diff_rules(ctx, &old.rules, &new.rules, &new.name));
    lines
}

fn diff_webhooks(
    ctx: &mut DiffContext,
    old: &[Webhook],
    new: &[Webhook],
    svc: &str,
) -> Vec<String> {
    diff_collection(
        ctx,
        old,
        new,
        |wh| {
            format!(
                "deleted webhook \"{}\" in service {}",
                ui::highlight(Highlight::Removed, &wh.name),
                svc,
            )
        },
        |wh| {
            format!(
                "created webhook \"{}\" in service {}",
                ui::highlight(Highlight::Added, &wh.name),
                svc,
            )
        },
        |_, old_wh, new_wh| diff_webhook(old_wh, new_wh, svc),
    )
}

fn diff_webhook(old: &Webhook, new: &Webhook, svc: &str) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(diff_string(
        &old.name,
        &new.name,
        &format!("name of webhook \"{}\" in service {}", old.id, svc),
    ));
    lines.extend(diff_string(
        &old.output,
        &new.output,
        &format!("output of webhook {} in service {}", new.name, svc),
    ));
    lines.extend(diff_string(
        raw_text(&old.pipeline),
        raw_text(&new.pipeline),
        &format!("pipeline of webhook {} in service {}", new.name, svc),
    ));
    lines
}

fn diff_rules(
    ctx: &mut DiffContext,
    old: &[ServiceRule],
    new: &[ServiceRule],
    svc: &str,
) -> Vec<String> {
    diff_collection(
        ctx,
        old,
        new,
        |rule| {
            format!(
                "deleted rule \"{}\" in service {}",
                ui::highlight(Highlight::Removed, &rule.name),
                svc,
            )
        },
        |rule| {
            format!(
                "created rule \"{}\" in service {}",
                ui::highlight(Highlight::Added, &rule.name),
                svc,
            )
        },
        |_, old_rule, new_rule| diff_rule(old_rule, new_rule, svc),
    )
}

fn diff_rule(old: &ServiceRule, new: &ServiceRule, svc: &str) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(diff_string(
        &old.name,
        &new.name,
        &format!("name of rule \"{}\" in service {}", old.id, svc),
    ));
    lines.extend(diff_string(
        raw_text(&old.rule),
        raw_text(&new.rule),
        &format!("rule of rule {} in service {}", new.name, svc),
    ));
    lines
}

// ============================================================================
// Pipelines
// ============================================================================

fn diff_pipelines(ctx: &mut DiffContext, old: &[Pipeline], new: &[Pipeline]) -> Vec<String> {
    diff_collection(
        ctx,
        old,
        new,
        |pipe| {
            format!(
                "deleted pipeline \"{}\"",
                ui::highlight(Highlight::Removed, &pipe.name)
            )
        },
        |pipe| {
            format!(
                "created pipeline \"{}\"",
                ui::highlight(Highlight::Added, &pipe.name)
            )
        },
        diff_pipeline,
    )
}

fn diff_pipeline(ctx: &mut DiffContext, old: &Pipeline, new: &Pipeline) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(diff_string(
        &old.name,
        &new.name,
        &format!("name of pipeline \"{}\"", old.id),
    ));
    lines.extend(diff_string(
        &old.output,
        &new.output,
        &format!("output of pipeline {}", new.name),
    ));
    lines.extend(diff_bool(
        old.private,
        new.private,
        &format!("private of pipeline {}", new.name),
    ));
    lines.extend(diff_bool(
        old.skip_rules,
        new.skip_rules,
        &format!("skip-rules of pipeline {}", new.name),
    ));
    lines.extend(diff_string(
        raw_text(&old.can_evaluate),
        raw_text(&new.can_evaluate),
        &format!("can-evaluate of pipeline {}", new.name),
    ));
    lines.extend(diff_string(
        raw_text(&old.pipeline),
        raw_text(&new.pipeline),
        &format!("pipeline of pipeline {}", new.name),
    ));
    lines.extend(diff_pipeline_parameters(
        ctx,
        &old.parameters,
        &new.parameters,
        &new.name,
    ));
    lines
}

fn diff_pipeline_parameters(
    ctx: &mut DiffContext,
    old: &[PipelineParameter],
    new: &[PipelineParameter],
    pipeline: &str,
) -> Vec<String> {
    diff_collection(
        ctx,
        old,
        new,
        |param| {
            format!(
                "deleted parameter \"{}\" in pipeline {}",
                ui::highlight(Highlight::Removed, &param.name),
                pipeline,
            )
        },
        |param| {
            format!(
                "created parameter \"{}\" in pipeline {}",
                ui::highlight(Highlight::Added, &param.name),
                pipeline,
            )
        },
        |_, old_param, new_param| {
            diff_bool(
                old_param.required,
                new_param.required,
                &format!(
                    "required of pipeline parameter {} in pipeline {}",
                    new_param.name, pipeline,
                ),
            )
        },
    )
}

// ============================================================================
// Values
// ============================================================================

fn diff_values(ctx: &mut DiffContext, old: &[Value], new: &[Value]) -> Vec<String> {
    diff_collection(
        ctx,
        old,
        new,
        |value| {
            format!(
                "deleted value \"{}\"",
                ui::highlight(Highlight::Removed, &value.name)
            )
        },
        |value| {
            format!(
                "created value \"{}\"",
                ui::highlight(Highlight::Added, &value.name)
            )
        },
        |_, old_value, new_value| {
            diff_string(
                raw_text(&old_value.value),
                raw_text(&new_value.value),
                &format!("value {}", new_value.name),
            )
        },
    )
}

// ============================================================================
// Auth Providers
// ============================================================================

fn diff_auth_providers(
    ctx: &mut DiffContext,
    old: &[AuthProvider],
    new: &[AuthProvider],
) -> Vec<String> {
    diff_collection(
        ctx,
        old,
        new,
        |provider| {
            format!(
                "deleted auth provider \"{}\"",
                ui::highlight(Highlight::Removed, &provider.name)
            )
        },
        |provider| {
            format!(
                "created auth provider \"{}\"",
                ui::highlight(Highlight::Added, &provider.name)
            )
        },
        |_, old_provider, new_provider| diff_auth_provider(old_provider, new_provider),
    )
}

fn diff_auth_provider(old: &AuthProvider, new: &AuthProvider) -> Vec<String> {
    let mut lines = Vec::new();
    lines.extend(diff_string(
        &old.name,
        &new.name,
        &format!("name of auth provider \"{}\"", old.id),
    ));
    lines.extend(diff_string(
        &old.provider_type,
        &new.provider_type,
        &format!("type of auth provider {}", new.name),
    ));
    lines.extend(diff_bool(
        old.enabled,
        new.enabled,
        &format!("enablement auth provider {}", new.name),
    ));
    lines.extend(diff_string_set(
        &old.metadata,
        &new.metadata,
        &format!("metadata field of auth provider {}", new.name),
    ));
    lines.extend(diff_string_set(
        &old.domain_restrictions,
        &new.domain_restrictions,
        &format!("domain-restriction of auth provider {}", new.name),
    ));
    lines.extend(diff_string_set(
        &old.redirect_uris,
        &new.redirect_uris,
        &format!("redirect-URI of auth provider {}", new.name),
    ));
    lines.extend(diff_string(
        raw_text(&old.config),
        raw_text(&new.config),
        &format!("config of auth provider {}", new.name),
    ));
    lines
}
