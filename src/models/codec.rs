use thiserror::Error;

use crate::models::domain::{CaseLists, CaseRecord, StoredCase};

/// A list field of a stored case could not be decoded
#[derive(Debug, Error)]
#[error("case {case_id}: malformed {field} field: {source}")]
pub struct RecordDecodeError {
    pub case_id: i32,
    pub field: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Decode a JSON string array. Missing or blank text decodes to an empty list.
pub fn decode_list(raw: Option<&str>) -> Result<Vec<String>, serde_json::Error> {
    match raw {
        Some(text) if !text.trim().is_empty() => serde_json::from_str(text),
        _ => Ok(Vec::new()),
    }
}

/// Encode a list as a JSON string array
pub fn encode_list(items: &[String]) -> String {
    // Serializing a slice of strings cannot fail
    serde_json::to_string(items).unwrap_or_else(|_| "[]".to_string())
}

impl StoredCase {
    /// Decode all three list fields, failing on the first malformed one
    pub fn decode_lists(&self) -> Result<CaseLists, RecordDecodeError> {
        let decode = |field: &'static str, raw: &Option<String>| {
            decode_list(raw.as_deref()).map_err(|source| RecordDecodeError {
                case_id: self.id,
                field,
                source,
            })
        };

        Ok(CaseLists {
            challenges: decode("challenges", &self.challenges)?,
            reasons: decode("reasons", &self.reasons)?,
            effects: decode("effects", &self.effects)?,
        })
    }

    /// Combine the scalar fields with already decoded lists.
    ///
    /// A negative stored employee count is treated as unknown.
    pub fn into_record(self, lists: CaseLists) -> CaseRecord {
        CaseRecord {
            id: self.id,
            company_name: self.company_name,
            url: self.url,
            industry: self.industry,
            employee_count: self.employee_count.and_then(|n| u32::try_from(n).ok()),
            challenges: lists.challenges,
            reasons: lists.reasons,
            effects: lists.effects,
            usage_scale: self.usage_scale,
        }
    }

    /// Write-side codec used when seeding a store
    pub fn encode(record: &CaseRecord) -> Self {
        Self {
            id: record.id,
            company_name: record.company_name.clone(),
            url: record.url.clone(),
            industry: record.industry.clone(),
            employee_count: record.employee_count.and_then(|n| i32::try_from(n).ok()),
            challenges: Some(encode_list(&record.challenges)),
            reasons: Some(encode_list(&record.reasons)),
            effects: Some(encode_list(&record.effects)),
            usage_scale: record.usage_scale.clone(),
        }
    }
}
