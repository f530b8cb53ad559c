//! Individual rewrite rules over query sections.

use serde_json::Value;

use super::errors::TemplateResult;
use super::query::shape;
use super::vocabulary::TemplateVocabulary;

const IN_PROPERTY: &str = "/Condition/In/Expressions/0/Column/Property";
const IN_LITERAL: &str = "/Condition/In/Values/0/0/Literal/Value";
const NOT_MEASURE_PROPERTY: &str = "/Condition/Not/Expression/In/Expressions/0/Measure/Property";
const COLUMN_SOURCE: &str = "/Column/Expression/SourceRef/Source";

fn requested<D: AsRef<str>>(dimensions: &[D], name: &str) -> bool {
    dimensions.iter().any(|d| d.as_ref() == name)
}

/// Latest-day queries carry no calendar source.
pub fn drop_date_entity(from: Vec<Value>, vocabulary: &TemplateVocabulary) -> Vec<Value> {
    from.into_iter()
        .filter(|entry| {
            entry.get("Entity").and_then(Value::as_str) != Some(vocabulary.date_entity.as_str())
        })
        .collect()
}

pub fn retain_sources<D: AsRef<str>>(
    from: Vec<Value>,
    dimensions: &[D],
    vocabulary: &TemplateVocabulary,
) -> TemplateResult<Vec<Value>> {
    let mut kept = Vec::with_capacity(from.len());
    for (i, entry) in from.into_iter().enumerate() {
        let name = entry
            .get("Name")
            .and_then(Value::as_str)
            .ok_or_else(|| shape(format!("From[{i}].Name"), "string"))?;
        if requested(dimensions, name) || vocabulary.is_fixed_source(name) {
            kept.push(entry);
        }
    }
    Ok(kept)
}

/// Keeps measures and the columns of requested dimensions.
pub fn retain_columns<D: AsRef<str>>(
    select: Vec<Value>,
    dimensions: &[D],
) -> TemplateResult<Vec<Value>> {
    let mut kept = Vec::with_capacity(select.len());
    for (i, entry) in select.into_iter().enumerate() {
        if entry.get("Measure").is_some() {
            kept.push(entry);
            continue;
        }
        if entry.get("Column").is_none() {
            continue;
        }
        let source = entry
            .pointer(COLUMN_SOURCE)
            .and_then(Value::as_str)
            .ok_or_else(|| shape(format!("Select[{i}]{COLUMN_SOURCE}"), "string"))?;
        if requested(dimensions, source) {
            kept.push(entry);
        }
    }
    Ok(kept)
}

/// Points every selected measure at the last-day measure.
pub fn use_last_day_measure(
    select: Vec<Value>,
    vocabulary: &TemplateVocabulary,
) -> TemplateResult<Vec<Value>> {
    select
        .into_iter()
        .enumerate()
        .map(|(i, mut entry)| {
            if entry.get("Measure").is_none() {
                return Ok(entry);
            }
            let measure = entry
                .get_mut("Measure")
                .and_then(Value::as_object_mut)
                .ok_or_else(|| shape(format!("Select[{i}].Measure"), "object"))?;
            measure.insert(
                "Property".to_string(),
                Value::String(vocabulary.last_day_measure.clone()),
            );
            let entry_obj = entry
                .as_object_mut()
                .ok_or_else(|| shape(format!("Select[{i}]"), "object"))?;
            entry_obj.insert(
                "Name".to_string(),
                Value::String(vocabulary.last_day_measure_name()),
            );
            Ok(entry)
        })
        .collect()
}

/// One projection per dimension plus one for the measure.
pub fn dense_projections(dimension_count: usize) -> Vec<usize> {
    (0..=dimension_count).collect()
}

fn is_inclusion(condition: &Value) -> bool {
    condition
        .get("Condition")
        .is_some_and(|c| c.get("In").is_some())
}

fn is_negated(condition: &Value) -> bool {
    condition
        .get("Condition")
        .is_some_and(|c| c.get("Not").is_some())
}

/// Latest-day filters: inclusion lists go, negated inclusions follow the
/// last-day measure.
pub fn conditions_for_latest(
    conditions: Vec<Value>,
    vocabulary: &TemplateVocabulary,
) -> TemplateResult<Vec<Value>> {
    conditions
        .into_iter()
        .filter(|c| !is_inclusion(c))
        .enumerate()
        .map(|(i, mut condition)| {
            if is_negated(&condition) {
                let property = condition.pointer_mut(NOT_MEASURE_PROPERTY).ok_or_else(|| {
                    shape(format!("Where[{i}]{NOT_MEASURE_PROPERTY}"), "measure property")
                })?;
                *property = Value::String(vocabulary.last_day_measure.clone());
            }
            Ok(condition)
        })
        .collect()
}

pub fn conditions_for_period(
    conditions: Vec<Value>,
    vocabulary: &TemplateVocabulary,
    year: Option<i32>,
    month: Option<&str>,
) -> TemplateResult<Vec<Value>> {
    let year_literal = year.map(|y| format!("{y}L"));
    let month_literal = month.map(|m| format!("'{m}'"));

    rewrite_inclusions(conditions, |property| {
        if property == vocabulary.year_property {
            year_literal.clone()
        } else if property == vocabulary.month_property {
            month_literal.clone()
        } else {
            None
        }
    })
}

pub fn conditions_for_date(
    conditions: Vec<Value>,
    vocabulary: &TemplateVocabulary,
    date: &str,
) -> TemplateResult<Vec<Value>> {
    rewrite_inclusions(conditions, |property| {
        (property == vocabulary.date_property).then(|| format!("'{date}'"))
    })
}

/// Overwrites the first literal of each inclusion-list condition whose column
/// property maps to a new literal.
fn rewrite_inclusions<F>(conditions: Vec<Value>, literal_for: F) -> TemplateResult<Vec<Value>>
where
    F: Fn(&str) -> Option<String>,
{
    conditions
        .into_iter()
        .enumerate()
        .map(|(i, mut condition)| {
            if !is_inclusion(&condition) {
                return Ok(condition);
            }
            let property = condition
                .pointer(IN_PROPERTY)
                .and_then(Value::as_str)
                .unwrap_or_default();
            let Some(literal) = literal_for(property) else {
                return Ok(condition);
            };
            let slot = condition
                .pointer_mut(IN_LITERAL)
                .ok_or_else(|| shape(format!("Where[{i}]{IN_LITERAL}"), "literal value"))?;
            *slot = Value::String(literal);
            Ok(condition)
        })
        .collect()
}
