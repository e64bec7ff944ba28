use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::ProspectQuery;

/// Request to match a prospect against the case catalog
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchCaseRequest {
    #[validate(length(min = 1, max = 100))]
    pub industry: String,
    #[serde(alias = "employee_count", rename = "employeeCount", default)]
    pub employee_count: Option<u32>,
    #[validate(length(min = 1, max = 2000))]
    pub challenges: String,
    #[serde(alias = "exclude_ids", rename = "excludeIds", default)]
    pub exclude_ids: Vec<i32>,
}

impl MatchCaseRequest {
    pub fn into_query(self) -> ProspectQuery {
        ProspectQuery {
            industry: self.industry,
            employee_count: self.employee_count,
            challenges: self.challenges,
            exclude_ids: self.exclude_ids.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let req: MatchCaseRequest = serde_json::from_str(
            r#"{"industry":"IT","employeeCount":120,"challenges":"健康","excludeIds":[3,1,3]}"#,
        )
        .unwrap();

        assert!(req.validate().is_ok());
        let query = req.into_query();
        assert_eq!(query.employee_count, Some(120));
        assert_eq!(query.exclude_ids.into_iter().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_optional_fields_default() {
        let req: MatchCaseRequest =
            serde_json::from_str(r#"{"industry":"IT","employeeCount":null,"challenges":"採用"}"#).unwrap();

        assert_eq!(req.employee_count, None);
        assert!(req.exclude_ids.is_empty());
    }

    #[test]
    fn test_negative_employee_count_is_rejected() {
        let parsed = serde_json::from_str::<MatchCaseRequest>(
            r#"{"industry":"IT","employeeCount":-5,"challenges":"採用"}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_blank_industry_fails_validation() {
        let req = MatchCaseRequest {
            industry: String::new(),
            employee_count: None,
            challenges: "健康".to_string(),
            exclude_ids: vec![],
        };
        assert!(req.validate().is_err());
    }
}
