use serde::Deserialize;

/// Names the query templates use for entities, measures and filter fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TemplateVocabulary {
    /// Entity of the calendar source, dropped from latest-day queries.
    pub date_entity: String,
    /// `From` names kept regardless of the requested dimensions.
    pub fixed_sources: Vec<String>,
    /// Measure reporting the latest published day.
    pub last_day_measure: String,
    /// Table alias measures are qualified with in `Select` names.
    pub measure_table: String,
    pub year_property: String,
    pub month_property: String,
    pub date_property: String,
}

impl Default for TemplateVocabulary {
    fn default() -> Self {
        Self {
            date_entity: "date".to_string(),
            fixed_sources: vec!["m".to_string(), "ym".to_string()],
            last_day_measure: "Peregrinos Ultimo Dia Prueba 2".to_string(),
            measure_table: "Medidas".to_string(),
            year_property: "Año".to_string(),
            month_property: "Mes".to_string(),
            date_property: "Date".to_string(),
        }
    }
}

impl TemplateVocabulary {
    pub fn last_day_measure_name(&self) -> String {
        format!("{}.{}", self.measure_table, self.last_day_measure)
    }

    pub fn is_fixed_source(&self, name: &str) -> bool {
        self.fixed_sources.iter().any(|s| s == name)
    }
}
