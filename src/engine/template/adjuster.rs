use serde_json::Value;
use tracing::debug;

use super::errors::TemplateResult;
use super::query::{QuerySections, QueryTemplate};
use super::rules::{
    conditions_for_date, conditions_for_latest, conditions_for_period, dense_projections,
    drop_date_entity, retain_columns, retain_sources, use_last_day_measure,
};
use super::vocabulary::TemplateVocabulary;

#[derive(Debug, Clone, Default)]
pub struct TemplateAdjuster {
    vocabulary: TemplateVocabulary,
}

impl TemplateAdjuster {
    pub fn new(vocabulary: TemplateVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Payload for a dimension slice of one month, or of the latest published
    /// day when neither `year` nor `month` is given.
    pub fn for_period<D: AsRef<str>>(
        &self,
        template: &QueryTemplate,
        dimensions: &[D],
        year: Option<i32>,
        month: Option<&str>,
    ) -> TemplateResult<Value> {
        let latest = year.is_none() && month.is_none();
        let sections = template.sections()?;
        let v = &self.vocabulary;

        let from = if latest {
            drop_date_entity(sections.from, v)
        } else {
            sections.from
        };
        let from = retain_sources(from, dimensions, v)?;

        let select = retain_columns(sections.select, dimensions)?;
        let select = if latest {
            use_last_day_measure(select, v)?
        } else {
            select
        };

        let conditions = if latest {
            conditions_for_latest(sections.conditions, v)?
        } else {
            conditions_for_period(sections.conditions, v, year, month)?
        };

        debug!(
            target: "pilgrim_stats::template",
            dimensions = dimensions.len(),
            ?year,
            ?month,
            "Adjusted template for period"
        );

        template.build(QuerySections {
            from,
            select,
            projections: dense_projections(dimensions.len()),
            conditions,
        })
    }

    /// Payload for a dimension slice of one calendar day (`DD/MM/YYYY`).
    pub fn for_date<D: AsRef<str>>(
        &self,
        template: &QueryTemplate,
        dimensions: &[D],
        date: &str,
    ) -> TemplateResult<Value> {
        let sections = template.sections()?;
        let v = &self.vocabulary;

        let from = retain_sources(sections.from, dimensions, v)?;
        let select = retain_columns(sections.select, dimensions)?;
        let conditions = conditions_for_date(sections.conditions, v, date)?;

        debug!(
            target: "pilgrim_stats::template",
            dimensions = dimensions.len(),
            date,
            "Adjusted template for date"
        );

        template.build(QuerySections {
            from,
            select,
            projections: dense_projections(dimensions.len()),
            conditions,
        })
    }
}

pub fn adjust_for_period<D: AsRef<str>>(
    template: &QueryTemplate,
    dimensions: &[D],
    year: Option<i32>,
    month: Option<&str>,
) -> TemplateResult<Value> {
    TemplateAdjuster::default().for_period(template, dimensions, year, month)
}

pub fn adjust_for_date<D: AsRef<str>>(
    template: &QueryTemplate,
    dimensions: &[D],
    date: &str,
) -> TemplateResult<Value> {
    TemplateAdjuster::default().for_date(template, dimensions, date)
}
