use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Field names of the feature vector, in the order the model was trained on.
pub const FEATURE_FIELDS: [&str; 4] = [
    "sepal_length",
    "sepal_width",
    "petal_length",
    "petal_width",
];

/// One iris measurement set, all values in centimeters.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IrisFeatures {
    pub sepal_length: f32,
    pub sepal_width: f32,
    pub petal_length: f32,
    pub petal_width: f32,
}

impl IrisFeatures {
    /// Builds a feature vector from a raw JSON document, collecting every
    /// offending field so the caller can report all of them at once.
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut values = [0f32; 4];

        for (i, name) in FEATURE_FIELDS.iter().enumerate() {
            match body.get(name) {
                None => errors.push(FieldError::missing(name)),
                Some(v) => match Self::numeric(v) {
                    Some(x) => values[i] = x as f32,
                    None => errors.push(FieldError::not_numeric(name)),
                },
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(IrisFeatures {
            sepal_length: values[0],
            sepal_width: values[1],
            petal_length: values[2],
            petal_width: values[3],
        })
    }

    /// Measurements arrive either as JSON numbers or, from permissive
    /// clients, as numeric strings like `"5.1"`.
    fn numeric(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn to_array(&self) -> [f32; 4] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }
}

/// Detail for one request field that failed validation.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn missing(field: &str) -> Self {
        FieldError {
            field: field.to_string(),
            message: "field is required".to_string(),
        }
    }

    fn not_numeric(field: &str) -> Self {
        FieldError {
            field: field.to_string(),
            message: "expected a number".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Welcome {
    pub message: &'static str,
}

impl Welcome {
    pub fn new() -> Self {
        Welcome {
            message: "Welcome to the Iris Classifier API!",
        }
    }
}

impl Default for Welcome {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct Prediction {
    pub predicted_class: String,
}

/// Error payload returned for every non-2xx response. `fields` is only
/// populated for validation failures.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl ErrorBody {
    pub fn message(error: &str) -> Self {
        ErrorBody {
            error: error.to_string(),
            fields: Vec::new(),
        }
    }

    pub fn validation(fields: Vec<FieldError>) -> Self {
        ErrorBody {
            error: "validation failed".to_string(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_body() -> Value {
        json!({
            "sepal_length": 5.1,
            "sepal_width": 3.5,
            "petal_length": 1.4,
            "petal_width": 0.2
        })
    }

    #[test]
    fn accepts_complete_numeric_body() {
        let features = IrisFeatures::from_json(&full_body()).unwrap();
        assert_eq!(features.to_array(), [5.1, 3.5, 1.4, 0.2]);
    }

    #[test]
    fn accepts_integer_measurements() {
        let mut body = full_body();
        body["sepal_length"] = json!(5);
        let features = IrisFeatures::from_json(&body).unwrap();
        assert_eq!(features.sepal_length, 5.0);
    }

    #[test]
    fn accepts_numeric_strings() {
        let mut body = full_body();
        body["sepal_length"] = json!("5.1");
        body["petal_width"] = json!(" 0.2 ");
        let features = IrisFeatures::from_json(&body).unwrap();
        assert_eq!(features.sepal_length, 5.1);
        assert_eq!(features.petal_width, 0.2);
    }

    #[test]
    fn reports_each_missing_field() {
        for name in FEATURE_FIELDS {
            let mut body = full_body();
            body.as_object_mut().unwrap().remove(name);
            let errors = IrisFeatures::from_json(&body).unwrap_err();
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, name);
            assert_eq!(errors[0].message, "field is required");
        }
    }

    #[test]
    fn reports_all_missing_fields_together() {
        let errors = IrisFeatures::from_json(&json!({})).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, FEATURE_FIELDS);
    }

    #[test]
    fn rejects_non_numeric_field() {
        let mut body = full_body();
        body["petal_width"] = json!("narrow");
        let errors = IrisFeatures::from_json(&body).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "petal_width");
        assert_eq!(errors[0].message, "expected a number");
    }

    #[test]
    fn mixes_missing_and_non_numeric_errors() {
        let body = json!({
            "sepal_length": 5.1,
            "sepal_width": "wide",
            "petal_width": 0.2
        });
        let errors = IrisFeatures::from_json(&body).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["sepal_width", "petal_length"]);
    }

    #[test]
    fn non_object_body_reports_every_field() {
        let errors = IrisFeatures::from_json(&json!([5.1, 3.5, 1.4, 0.2])).unwrap_err();
        assert_eq!(errors.len(), 4);
    }
}
