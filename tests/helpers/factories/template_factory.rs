use crate::engine::template::QueryTemplate;
use serde_json::{Value, json};

const DIMENSIONS: [(&str, &str, &str); 7] = [
    ("d1", "camino", "Camino"),
    ("d2", "medio", "Medio"),
    ("d3", "genero", "Sexo"),
    ("d4", "procedencia", "Procedencia"),
    ("d5", "pais", "País"),
    ("d6", "motivo", "Motivo"),
    ("d7", "edad", "Edad"),
];

/// Builds report query templates shaped like the ones kept in storage.
pub struct TemplateFactory {
    payload: Value,
}

impl TemplateFactory {
    /// All dimensions, monthly measure, year and month filters.
    pub fn year_month() -> Self {
        let conditions = vec![
            inclusion("ym", "Año", "2023L"),
            inclusion("ym", "Mes", "'enero'"),
            not_null_measure("Peregrinos Mes"),
        ];
        Self {
            payload: command(from_all(), select_all("Peregrinos Mes"), conditions),
        }
    }

    /// All dimensions, daily measure, date filter.
    pub fn any_day() -> Self {
        let conditions = vec![
            inclusion("ym", "Date", "'01/01/2024'"),
            not_null_measure("Peregrinos Dia"),
        ];
        Self {
            payload: command(from_all(), select_all("Peregrinos Dia"), conditions),
        }
    }

    /// Headline query for the latest published day.
    pub fn last_day() -> Self {
        let from = vec![json!({ "Name": "m", "Entity": "Medidas", "Type": 0 })];
        let select = vec![measure("Peregrinos Ultimo Dia")];
        Self {
            payload: command(from, select, Vec::new()),
        }
    }

    pub fn without_where(mut self) -> Self {
        if let Some(query) = self.query_mut() {
            query.remove("Where");
        }
        self
    }

    pub fn with_condition(mut self, condition: Value) -> Self {
        if let Some(Value::Array(conditions)) =
            self.query_mut().and_then(|q| q.get_mut("Where"))
        {
            conditions.push(condition);
        }
        self
    }

    pub fn create(self) -> Value {
        self.payload
    }

    pub fn create_template(self) -> QueryTemplate {
        QueryTemplate::new(self.payload).expect("factory template is well formed")
    }

    fn query_mut(&mut self) -> Option<&mut serde_json::Map<String, Value>> {
        self.payload
            .pointer_mut("/queries/0/Query/Commands/0/SemanticQueryDataShapeCommand/Query")
            .and_then(Value::as_object_mut)
    }
}

pub fn inclusion(source: &str, property: &str, literal: &str) -> Value {
    json!({
        "Condition": {
            "In": {
                "Expressions": [{
                    "Column": {
                        "Expression": { "SourceRef": { "Source": source } },
                        "Property": property,
                    }
                }],
                "Values": [[{ "Literal": { "Value": literal } }]],
            }
        }
    })
}

pub fn not_null_measure(property: &str) -> Value {
    json!({
        "Condition": {
            "Not": {
                "Expression": {
                    "In": {
                        "Expressions": [{
                            "Measure": {
                                "Expression": { "SourceRef": { "Source": "m" } },
                                "Property": property,
                            }
                        }],
                        "Values": [[{ "Literal": { "Value": "null" } }]],
                    }
                }
            }
        }
    })
}

fn from_all() -> Vec<Value> {
    let mut from: Vec<Value> = DIMENSIONS
        .iter()
        .map(|(name, entity, _)| json!({ "Name": name, "Entity": entity, "Type": 0 }))
        .collect();
    from.push(json!({ "Name": "m", "Entity": "Medidas", "Type": 0 }));
    from.push(json!({ "Name": "ym", "Entity": "date", "Type": 0 }));
    from
}

fn select_all(measure_property: &str) -> Vec<Value> {
    let mut select: Vec<Value> = DIMENSIONS
        .iter()
        .map(|(name, entity, property)| {
            json!({
                "Column": {
                    "Expression": { "SourceRef": { "Source": name } },
                    "Property": property,
                },
                "Name": format!("{entity}.{property}"),
            })
        })
        .collect();
    select.push(measure(measure_property));
    select
}

fn measure(property: &str) -> Value {
    json!({
        "Measure": {
            "Expression": { "SourceRef": { "Source": "m" } },
            "Property": property,
        },
        "Name": format!("Medidas.{property}"),
    })
}

fn command(from: Vec<Value>, select: Vec<Value>, conditions: Vec<Value>) -> Value {
    let projections: Vec<usize> = (0..select.len()).collect();
    json!({
        "version": "1.0.0",
        "queries": [{
            "Query": {
                "Commands": [{
                    "SemanticQueryDataShapeCommand": {
                        "Query": {
                            "Version": 2,
                            "From": from,
                            "Select": select,
                            "Where": conditions,
                        },
                        "Binding": {
                            "Primary": { "Groupings": [{ "Projections": projections }] },
                            "DataReduction": {
                                "DataVolume": 4,
                                "Primary": { "Window": { "Count": 1000 } },
                            },
                            "Version": 1,
                        },
                        "ExecutionMetricsKind": 1,
                    }
                }]
            },
            "QueryId": "",
        }],
        "cancelQueries": [],
        "modelId": 4263108,
    })
}
