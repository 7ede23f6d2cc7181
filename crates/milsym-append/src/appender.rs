//! Military feature append orchestrator.
//!
//! An append run goes through these phases:
//!
//! 1. [`MilitaryFeatureAppender::classify`] reads the input once. It buckets
//!    every feature by the routing rule its SIDC and geometry match.
//! 2. [`MilitaryFeatureAppender::append`] resolves each matched rule's
//!    output class. It checks the schema locks of all of them before any
//!    write.
//! 3. One edit session per output class then writes the mapped records.
//!
//! Run-level failures return a [`RunError`]. A bad record is logged and
//! skipped.

use crate::backfill::Backfill;
use crate::mapping::{FieldMapping, RULE_FIELD_NAMES, SIDC_FIELD_NAMES};
use crate::memory::MemoryWorkspace;
use crate::registry::{RuleRegistry, NO_RULE};
use crate::session::EditSession;
use crate::store::{ClassHandle, ClassInfo, Feature, FeatureStore, FieldValue};
use milsym_core::{BackfillPolicy, FeatureError, Result, RunError};
use milsym_router::{FieldAliases, RuleTable, NOT_FOUND};
use milsym_sidc::{is_valid, SymbolComposer};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Input feature routed to a rule.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub feature: Feature,
    pub sidc: String,
}

/// Input features grouped by matched rule name, input order kept per rule.
#[derive(Debug, Clone, Default)]
pub struct MatchedRules {
    buckets: BTreeMap<String, Vec<Candidate>>,
}

impl MatchedRules {
    /// Matched rule names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    /// Candidates for a rule, in input order.
    pub fn candidates(&self, rule: &str) -> &[Candidate] {
        self.buckets.get(rule).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, rule: &str) -> bool {
        self.buckets.contains_key(rule)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Result of appending one rule's features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleSummary {
    pub rule: String,
    pub feature_class: String,
    pub features_written: usize,
    pub rules_added: usize,
}

/// Result of an append run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppendSummary {
    pub matched_rules: Vec<String>,
    pub processed: Vec<RuleSummary>,
    /// Rules skipped for a missing output class or a geometry mismatch
    pub skipped: Vec<String>,
}

impl AppendSummary {
    pub fn features_written(&self) -> usize {
        self.processed.iter().map(|r| r.features_written).sum()
    }
}

/// Result of recalculating rule ids on an output class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CalcSummary {
    pub feature_class: String,
    pub features_updated: usize,
    pub features_skipped: usize,
    pub rules_added: usize,
}

struct ResolvedRule<'a> {
    rule: &'a str,
    class: ClassHandle,
    info: ClassInfo,
}

/// Copies military features into output feature classes and assigns their
/// representation rules.
#[derive(Debug, Clone)]
pub struct MilitaryFeatureAppender {
    rules: RuleTable,
    aliases: FieldAliases,
    composer: SymbolComposer,
    backfill: BackfillPolicy,
}

impl MilitaryFeatureAppender {
    pub fn new(rules: RuleTable, aliases: FieldAliases, composer: SymbolComposer) -> Self {
        Self {
            rules,
            aliases,
            composer,
            backfill: BackfillPolicy::default(),
        }
    }

    pub fn with_backfill(mut self, policy: BackfillPolicy) -> Self {
        self.backfill = policy;
        self
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn composer(&self) -> &SymbolComposer {
        &self.composer
    }

    /// Buckets the input features by matched rule.
    ///
    /// # Errors
    ///
    /// [`RunError::InputFieldMissing`] if the input has no `sidc_field`,
    /// [`RunError::NoMatchingFeatures`] if no feature matched a rule.
    pub fn classify<I: FeatureStore + ?Sized>(
        &self,
        input: &I,
        class: &ClassHandle,
        sidc_field: &str,
    ) -> Result<MatchedRules> {
        let info = input.class_info(class)?;
        let Some(field) = info.find_field(sidc_field) else {
            error!(field = %sidc_field, input = %class, "Could not find SIDC field in input");
            return Err(RunError::input_field_missing(sidc_field).into());
        };
        let class_geometry = info.shape_type.geometry_kind();

        let mut matched = MatchedRules::default();
        for feature in input.read_all(class)? {
            let Some(sidc) = feature.get(&field.name).as_str().map(str::to_owned) else {
                debug!(feature = feature.id, "Skipping feature without a SIDC");
                continue;
            };

            let geometry = feature
                .geometry
                .as_ref()
                .map_or(class_geometry, |g| g.shape.geometry_kind());
            let rule = self.rules.rule_name_from_symbol_id_and_geometry(&sidc, geometry);
            if rule == NOT_FOUND {
                debug!(sidc = %sidc, geometry = %geometry, "No rule for feature");
                continue;
            }

            matched
                .buckets
                .entry(rule.to_string())
                .or_default()
                .push(Candidate { feature, sidc });
        }

        if matched.is_empty() {
            error!(input = %class, "No matching military features found in input");
            return Err(RunError::NoMatchingFeatures {
                name: class.to_string(),
            }
            .into());
        }

        info!(
            rules = ?matched.names().collect::<Vec<_>>(),
            "Applicable rules"
        );

        Ok(matched)
    }

    /// Writes every matched feature to its output class.
    ///
    /// # Errors
    ///
    /// [`RunError::SchemaLockDenied`] if any output class is locked. Nothing
    /// is written in that case.
    pub fn append<O: FeatureStore + ?Sized>(
        &self,
        matched: &MatchedRules,
        input_info: &ClassInfo,
        output: &mut O,
        sidc_field: &str,
    ) -> Result<AppendSummary> {
        let mut summary = AppendSummary {
            matched_rules: matched.names().map(str::to_string).collect(),
            ..AppendSummary::default()
        };

        let mut resolved = Vec::new();
        for rule in matched.names() {
            let target = self.rules.map_rule_name_to_feature_type(rule);
            info!(
                rule = %rule,
                dataset = %target.dataset,
                class = %target.feature_class,
                geometry = %target.geometry,
                "Processing rule"
            );

            let Some(class) = output.open_feature_class(&target.dataset, &target.feature_class)
            else {
                warn!(rule = %rule, class = %target.feature_class, "No output feature class found for rule");
                summary.skipped.push(rule.to_string());
                continue;
            };

            if !output.schema_lock_available(&class) {
                error!(rule = %rule, class = %class, "Exclusive schema lock can not be obtained");
                return Err(RunError::schema_lock_denied(class.to_string()).into());
            }

            let info = output.class_info(&class)?;
            if target.geometry_kind() != Some(info.shape_type.geometry_kind()) {
                warn!(
                    rule = %rule,
                    class = %class,
                    geometry = %target.geometry,
                    shape = %info.shape_type,
                    "Geometry does not match output feature class"
                );
                summary.skipped.push(rule.to_string());
                continue;
            }

            resolved.push(ResolvedRule { rule, class, info });
        }

        for target in &resolved {
            let rule_summary =
                self.append_rule(matched.candidates(target.rule), target, input_info, output, sidc_field)?;
            summary.processed.push(rule_summary);
        }

        Ok(summary)
    }

    fn append_rule<O: FeatureStore + ?Sized>(
        &self,
        candidates: &[Candidate],
        target: &ResolvedRule<'_>,
        input_info: &ClassInfo,
        output: &mut O,
        sidc_field: &str,
    ) -> Result<RuleSummary> {
        let mapping = FieldMapping::build(input_info, &target.info, sidc_field, &self.aliases);
        let rule_field = target
            .info
            .first_field(&RULE_FIELD_NAMES)
            .map(|field| field.name.clone());
        if rule_field.is_none() {
            warn!(class = %target.class, "Could not find rule id field in output");
        }

        let mut registry = RuleRegistry::load(&*output, &target.class)?;
        let mut backfill = Backfill::new(self.backfill);
        let mut session = EditSession::begin(&mut *output)?;

        for (n, candidate) in candidates.iter().enumerate() {
            debug!(n = n + 1, sidc = %candidate.sidc, rule = %target.rule, "Processing matching feature");

            let mut record = Feature::new();
            record.geometry = candidate.feature.geometry.clone();
            mapping.apply(&candidate.feature, &mut record, &target.info);
            if let Some(field) = &rule_field {
                self.assign_rule_id(&mut registry, &mut record, field, &candidate.sidc);
            }
            backfill.apply(&mut record, &target.info, &candidate.sidc, &self.composer);

            session.insert(&target.class, record)?;
        }

        registry.flush(&mut *session, &target.class)?;
        session.commit()?;

        let summary = RuleSummary {
            rule: target.rule.to_string(),
            feature_class: target.class.to_string(),
            features_written: candidates.len(),
            rules_added: registry.added(),
        };
        info!(
            rule = %summary.rule,
            class = %summary.feature_class,
            features = summary.features_written,
            rules_added = summary.rules_added,
            "Rule processed"
        );

        Ok(summary)
    }

    /// Classifies `input` and appends it to `output`.
    pub fn process<I, O>(
        &self,
        input: &I,
        input_class: &ClassHandle,
        output: &mut O,
        sidc_field: &str,
    ) -> Result<AppendSummary>
    where
        I: FeatureStore + ?Sized,
        O: FeatureStore + ?Sized,
    {
        let matched = self.classify(input, input_class, sidc_field)?;
        let input_info = input.class_info(input_class)?;
        self.append(&matched, &input_info, output, sidc_field)
    }

    /// Full append run over workspace files.
    ///
    /// `input` is `workspace.json` or `workspace.json#Class`. The checks run
    /// in the order their error codes are reported: input, SIDC field,
    /// matches, output, locks.
    pub fn process_workspaces(
        &self,
        input: &str,
        output: &Path,
        sidc_field: &str,
    ) -> Result<AppendSummary> {
        let Some((input_ws, input_class)) = MemoryWorkspace::open_feature_class_from_string(input)
        else {
            error!(input = %input, "Could not open input feature class");
            return Err(RunError::input_not_found(input).into());
        };
        info!(input = %input_class, "Opened input feature class");

        let matched = self.classify(&input_ws, &input_class, sidc_field)?;

        let mut output_ws = MemoryWorkspace::open(output).map_err(|e| {
            error!(output = %output.display(), error = %e, "Output workspace could not be opened");
            RunError::output_not_found(output.display().to_string())
        })?;

        let input_info = input_ws.class_info(&input_class)?;
        self.append(&matched, &input_info, &mut output_ws, sidc_field)
    }

    /// Recalculates the rule id of every feature in an output class from its
    /// SIDC.
    ///
    /// The SIDC is read from `sic`, or from `sidc_field` when there is no
    /// `sic` field.
    pub fn calculate_rep_rules<O: FeatureStore + ?Sized>(
        &self,
        output: &mut O,
        class: &ClassHandle,
        sidc_field: &str,
    ) -> Result<CalcSummary> {
        if !output.schema_lock_available(class) {
            error!(class = %class, "Exclusive schema lock can not be obtained");
            return Err(RunError::schema_lock_denied(class.to_string()).into());
        }

        let info = output.class_info(class)?;
        let Some(sidc_name) = info
            .first_field(&[SIDC_FIELD_NAMES[0], sidc_field])
            .map(|field| field.name.clone())
        else {
            error!(class = %class, "Could not find SIDC field in output");
            return Err(RunError::input_field_missing(sidc_field).into());
        };

        let mut summary = CalcSummary {
            feature_class: class.to_string(),
            ..CalcSummary::default()
        };

        let Some(rule_field) = info
            .first_field(&RULE_FIELD_NAMES)
            .map(|field| field.name.clone())
        else {
            warn!(class = %class, "Could not find rule id field in output");
            return Ok(summary);
        };

        let features: Vec<Feature> = output.read_all(class)?.collect();
        let mut registry = RuleRegistry::load(&*output, class)?;
        let mut session = EditSession::begin(&mut *output)?;

        for mut feature in features {
            let sidc = feature.get(&sidc_name).as_str().unwrap_or_default().to_string();
            if !is_valid(&sidc) {
                if sidc.is_empty() {
                    debug!(feature = feature.id, "Skipping empty SIDC");
                } else {
                    debug!(feature = feature.id, sidc = %sidc, "Skipping invalid SIDC");
                }
                summary.features_skipped += 1;
                continue;
            }

            self.assign_rule_id(&mut registry, &mut feature, &rule_field, &sidc);
            session.update_in_place(class, &feature)?;
            summary.features_updated += 1;
        }

        registry.flush(&mut *session, class)?;
        session.commit()?;
        summary.rules_added = registry.added();

        info!(
            class = %class,
            updated = summary.features_updated,
            skipped = summary.features_skipped,
            rules_added = summary.rules_added,
            "Representation rules calculated"
        );

        Ok(summary)
    }

    /// Calculates rule ids on a class of a workspace file.
    pub fn calculate_rep_rules_in_workspace(
        &self,
        output: &str,
        sidc_field: &str,
    ) -> Result<CalcSummary> {
        let Some((mut workspace, class)) = MemoryWorkspace::open_feature_class_from_string(output)
        else {
            error!(output = %output, "Output feature class could not be found or opened");
            return Err(RunError::output_not_found(output).into());
        };

        self.calculate_rep_rules(&mut workspace, &class, sidc_field)
    }

    fn assign_rule_id(
        &self,
        registry: &mut RuleRegistry,
        record: &mut Feature,
        rule_field: &str,
        sidc: &str,
    ) {
        let name = self.composer.rule_name_from_sidc(sidc);
        let id = registry.resolve_or_create(&name, || self.composer.symbol_layers(sidc));

        if id == NO_RULE {
            let err = FeatureError::RuleResolution {
                name: if name.is_empty() { sidc.to_string() } else { name },
            };
            warn!(sidc = %sidc, error = %err, "Could not create representation rule");
            return;
        }

        record.set(rule_field, FieldValue::Integer(i64::from(id)));
    }
}
