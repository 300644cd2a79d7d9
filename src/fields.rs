use std::fmt;

/// The closed set of measurement fields clients may query. The wire name of a
/// variant doubles as its column name in the `measurements` table, so this
/// enum is the single authority for both; registering a new field is adding a
/// variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementField {
    Field1,
    Field2,
    Field3,
}

impl MeasurementField {
    pub const ALL: [MeasurementField; 3] = [
        MeasurementField::Field1,
        MeasurementField::Field2,
        MeasurementField::Field3,
    ];

    /// Resolves a raw request value to a registered field. Exact match only:
    /// unknown names, other casings, and padded input all resolve to `None`.
    pub fn parse(raw: &str) -> Option<MeasurementField> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == raw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MeasurementField::Field1 => "field1",
            MeasurementField::Field2 => "field2",
            MeasurementField::Field3 => "field3",
        }
    }

    /// Human-readable list of the registered fields ("field1, field2, or
    /// field3"), used in rejection messages.
    pub fn allowed_list() -> String {
        let names: Vec<&str> = Self::ALL.iter().map(|field| field.as_str()).collect();
        match names.as_slice() {
            [] => String::new(),
            [only] => (*only).to_string(),
            [head @ .., last] => format!("{}, or {last}", head.join(", ")),
        }
    }
}

impl fmt::Display for MeasurementField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
