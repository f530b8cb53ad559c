use serde_json::{Map, Value, json};

/// Builds Power BI query responses in the compressed `DSR` layout.
pub struct ResponseFactory {
    select: Vec<Value>,
    column_types: Vec<Value>,
    rows: Vec<Value>,
    dicts: Map<String, Value>,
}

impl ResponseFactory {
    pub fn new() -> Self {
        Self {
            select: Vec::new(),
            column_types: Vec::new(),
            rows: Vec::new(),
            dicts: Map::new(),
        }
    }

    pub fn with_group_key(mut self, entity: &str, property: &str) -> Self {
        let id = format!("G{}", self.select.len());
        self.select.push(group_key(&id, entity, property));
        self.column_types.push(json!({ "N": id, "T": 1 }));
        self
    }

    pub fn with_coded_group_key(mut self, entity: &str, property: &str, dictionary: &str) -> Self {
        let id = format!("G{}", self.select.len());
        self.select.push(group_key(&id, entity, property));
        self.column_types
            .push(json!({ "N": id, "T": 1, "DN": dictionary }));
        self
    }

    pub fn with_measure(mut self, value: &str) -> Self {
        self.select.push(json!({
            "Kind": 2,
            "Value": value,
            "Format": "#,0",
            "Name": "Medidas.Peregrinos Mes",
        }));
        self.column_types.push(json!({ "N": value, "T": 4 }));
        self
    }

    pub fn with_dictionary(mut self, name: &str, values: &[&str]) -> Self {
        self.dicts.insert(name.to_string(), json!(values));
        self
    }

    /// Adds a raw `DM0` entry, e.g. `{"C": [..], "R": 2}`.
    pub fn with_row(mut self, row: Value) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_cells(self, cells: Vec<Value>) -> Self {
        self.with_row(json!({ "C": cells }))
    }

    pub fn create(self) -> Value {
        let mut rows = self.rows;
        if let Some(Value::Object(first)) = rows.first_mut() {
            first.insert("S".to_string(), Value::Array(self.column_types));
        }

        let mut source = json!({
            "N": "DS0",
            "PH": [{ "DM0": rows }],
            "IC": true,
        });
        if !self.dicts.is_empty() {
            source["ValueDicts"] = Value::Object(self.dicts);
        }

        wrap(json!({
            "timestamp": "2024-10-15T08:00:00.000Z",
            "descriptor": { "Select": self.select, "Version": 2 },
            "dsr": { "Version": 2, "MinorVersion": 1, "DS": [source] },
        }))
    }

    /// Response of the last-day headline query.
    pub fn last_day(label: &str, count: Value) -> Value {
        wrap(json!({
            "descriptor": {
                "Select": [{ "Kind": 2, "Value": "M0", "Name": "Medidas.Peregrinos Ultimo Dia" }]
            },
            "dsr": {
                "Version": 2,
                "MinorVersion": 1,
                "DS": [{
                    "N": "DS0",
                    "M1": label,
                    "PH": [{ "DM0": [{ "M0": count }] }],
                }],
            },
        }))
    }
}

fn group_key(id: &str, entity: &str, property: &str) -> Value {
    json!({
        "Kind": 1,
        "Depth": 0,
        "Value": id,
        "GroupKeys": [{
            "Source": { "Entity": entity, "Property": property },
            "Calc": id,
            "IsSameAsSelect": true,
        }],
        "Name": format!("{entity}.{property}"),
    })
}

fn wrap(data: Value) -> Value {
    json!({
        "jobIds": ["5f1f4b9e-0000-0000-0000-000000000000"],
        "results": [{
            "jobId": "5f1f4b9e-0000-0000-0000-000000000000",
            "result": { "data": data },
        }],
        "version": "1.0.0",
    })
}
