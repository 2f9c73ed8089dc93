use crate::domain::recommendation::{RecommendationItem, RecommendationResponse};
use serde_json::Value;
use std::fmt;

const REQUIRED_KEYS: [&str; 4] = [
    "nationalInvestments",
    "internationalInvestments",
    "summary",
    "warnings",
];

/// Provider output parsed as JSON but does not have the recommendation shape.
#[derive(Debug, Clone)]
pub struct ContractViolation {
    pub detail: String,
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "upstream contract violation: {}", self.detail)
    }
}

impl std::error::Error for ContractViolation {}

fn violation(detail: impl Into<String>) -> anyhow::Error {
    ContractViolation {
        detail: detail.into(),
    }
    .into()
}

/// Checks the parsed provider value against the recommendation schema. Extra
/// keys are tolerated; the caller keeps passing the original value through.
pub fn validate_recommendations(value: &Value) -> anyhow::Result<RecommendationResponse> {
    let Some(object) = value.as_object() else {
        return Err(violation("expected a JSON object at the top level"));
    };

    for key in REQUIRED_KEYS {
        if !object.contains_key(key) {
            return Err(violation(format!("missing key `{key}`")));
        }
    }

    let response = serde_json::from_value::<RecommendationResponse>(value.clone())
        .map_err(|e| violation(e.to_string()))?;

    check_items("nationalInvestments", &response.national_investments)?;
    check_items("internationalInvestments", &response.international_investments)?;

    Ok(response)
}

fn check_items(field: &str, items: &[RecommendationItem]) -> anyhow::Result<()> {
    for (idx, item) in items.iter().enumerate() {
        if item.name.trim().is_empty() {
            return Err(violation(format!("{field}[{idx}].name must be non-empty")));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "nationalInvestments": [
                {"name": "Tesouro IPCA+", "type": "Renda fixa", "allocation": 50, "expectedReturn": "IPCA + 6% a.a.", "risk": "Baixo", "description": "Proteção contra inflação"}
            ],
            "internationalInvestments": [
                {"name": "IVVB11", "type": "ETF", "allocation": 20}
            ],
            "summary": "Carteira moderada",
            "warnings": ["Rentabilidade passada não garante resultados futuros"]
        })
    }

    fn violation_detail(err: anyhow::Error) -> String {
        err.downcast_ref::<ContractViolation>()
            .expect("expected ContractViolation")
            .detail
            .clone()
    }

    #[test]
    fn accepts_valid_response() {
        let parsed = validate_recommendations(&valid()).unwrap();
        assert_eq!(parsed.national_investments.len(), 1);
        assert_eq!(parsed.international_investments[0].name, "IVVB11");
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn accepts_empty_lists_and_extra_keys() {
        let mut v = valid();
        v["nationalInvestments"] = json!([]);
        v["disclaimer"] = json!("extra");
        assert!(validate_recommendations(&v).is_ok());
    }

    #[test]
    fn rejects_non_object() {
        let err = validate_recommendations(&json!([1, 2, 3])).unwrap_err();
        assert!(violation_detail(err).contains("object"));
    }

    #[test]
    fn rejects_missing_key() {
        let mut v = valid();
        v.as_object_mut().unwrap().remove("warnings");
        let err = validate_recommendations(&v).unwrap_err();
        assert_eq!(violation_detail(err), "missing key `warnings`");
    }

    #[test]
    fn rejects_wrong_types() {
        let mut v = valid();
        v["summary"] = json!(42);
        assert!(validate_recommendations(&v).is_err());

        let mut v = valid();
        v["warnings"] = json!("just one");
        assert!(validate_recommendations(&v).is_err());
    }

    #[test]
    fn rejects_item_without_name() {
        let mut v = valid();
        v["internationalInvestments"] = json!([{"name": "  "}]);
        let err = validate_recommendations(&v).unwrap_err();
        assert!(violation_detail(err).starts_with("internationalInvestments[0]"));

        let mut v = valid();
        v["nationalInvestments"] = json!([{"type": "ETF"}]);
        assert!(validate_recommendations(&v).is_err());
    }
}
