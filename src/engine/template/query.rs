use serde_json::{Map, Value};

use super::errors::{TemplateError, TemplateResult};

const COMMAND: &str = "/queries/0/Query/Commands/0/SemanticQueryDataShapeCommand";
const QUERY: &str = "/queries/0/Query/Commands/0/SemanticQueryDataShapeCommand/Query";
const GROUPING: &str =
    "/queries/0/Query/Commands/0/SemanticQueryDataShapeCommand/Binding/Primary/Groupings/0";

/// The four parts of a query that slice adjustments rewrite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySections {
    pub from: Vec<Value>,
    pub select: Vec<Value>,
    pub projections: Vec<usize>,
    pub conditions: Vec<Value>,
}

/// A report query payload. Never modified; adjustments build new payloads
/// from it.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryTemplate {
    payload: Value,
}

impl QueryTemplate {
    pub fn new(payload: Value) -> TemplateResult<Self> {
        if payload.pointer(COMMAND).is_none() {
            return Err(TemplateError::MissingSection(COMMAND));
        }
        Ok(Self { payload })
    }

    pub fn parse(json: &str) -> TemplateResult<Self> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    pub fn sections(&self) -> TemplateResult<QuerySections> {
        let query = self
            .payload
            .pointer(QUERY)
            .ok_or(TemplateError::MissingSection(QUERY))?;

        let from = array_at(query, "From")?.ok_or(TemplateError::MissingSection("Query.From"))?;
        let select =
            array_at(query, "Select")?.ok_or(TemplateError::MissingSection("Query.Select"))?;
        let conditions = array_at(query, "Where")?.unwrap_or_default();

        let grouping = self
            .payload
            .pointer(GROUPING)
            .ok_or(TemplateError::MissingSection("Binding.Primary.Groupings[0]"))?;
        let projections = match grouping.get("Projections") {
            None => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|p| p.as_u64().map(|p| p as usize))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| shape("Projections", "array of indices"))?,
            Some(_) => return Err(shape("Projections", "array of indices")),
        };

        Ok(QuerySections {
            from,
            select,
            projections,
            conditions,
        })
    }

    /// A copy of the payload with its sections replaced.
    pub fn build(&self, sections: QuerySections) -> TemplateResult<Value> {
        let mut payload = self.payload.clone();

        let query = payload
            .pointer_mut(QUERY)
            .and_then(Value::as_object_mut)
            .ok_or(TemplateError::MissingSection(QUERY))?;
        query.insert("From".to_string(), Value::Array(sections.from));
        query.insert("Select".to_string(), Value::Array(sections.select));
        query.insert("Where".to_string(), Value::Array(sections.conditions));

        let grouping: &mut Map<String, Value> = payload
            .pointer_mut(GROUPING)
            .and_then(Value::as_object_mut)
            .ok_or(TemplateError::MissingSection("Binding.Primary.Groupings[0]"))?;
        grouping.insert(
            "Projections".to_string(),
            Value::Array(sections.projections.into_iter().map(Value::from).collect()),
        );

        Ok(payload)
    }
}

fn array_at(query: &Value, key: &'static str) -> TemplateResult<Option<Vec<Value>>> {
    match query.get(key) {
        None => Ok(None),
        Some(Value::Array(items)) => Ok(Some(items.clone())),
        Some(_) => Err(shape(key, "array")),
    }
}

pub(super) fn shape(path: impl Into<String>, expected: &'static str) -> TemplateError {
    TemplateError::UnexpectedShape {
        path: path.into(),
        expected,
    }
}
