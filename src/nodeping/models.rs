//! NodePing API document types.
//!
//! Only the fields the exporter reads are decoded. Each of them accepts a
//! missing key or an explicit `null` and falls back to the type's default, so
//! one odd document never fails a whole response.

use serde::{Deserialize, Deserializer};

/// A monitored check as returned by `GET /checks`, keyed there by its identifier.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Check {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub check_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: CheckParameters,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckParameters {
    #[serde(default, deserialize_with = "null_as_default")]
    pub target: String,
}

/// One entry of `GET /results/{id}`.
///
/// NodePing uses abbreviated keys for result documents.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CheckResult {
    #[serde(rename = "t", default, deserialize_with = "null_as_default")]
    pub check_type: String,
    #[serde(rename = "tg", default, deserialize_with = "null_as_default")]
    pub target: String,
    #[serde(rename = "sc", default, deserialize_with = "null_as_default")]
    pub result: String,
    #[serde(rename = "m", default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(rename = "su", default, deserialize_with = "null_as_default")]
    pub success: bool,
    /// Run time in milliseconds
    #[serde(rename = "rt", default, deserialize_with = "null_as_default")]
    pub duration_ms: u64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_decode_check_ignores_unknown_fields() {
        let body = r#"{
            "201205050153W2Q4C-0J2HSIRF": {
                "_id": "201205050153W2Q4C-0J2HSIRF",
                "_rev": "37-8776f919267df3973fdb33cba0a8dd09",
                "label": "Site 1",
                "interval": 1,
                "notifications": [],
                "type": "HTTP",
                "enable": "active",
                "public": false,
                "parameters": {"target": "http://www.example.com/", "threshold": 5, "sens": 2},
                "state": 0
            }
        }"#;
        let checks: HashMap<String, Check> = serde_json::from_str(body).unwrap();
        let check = &checks["201205050153W2Q4C-0J2HSIRF"];
        assert_eq!(check.label, "Site 1");
        assert_eq!(check.check_type, "HTTP");
        assert_eq!(check.parameters.target, "http://www.example.com/");
    }

    #[test]
    fn test_decode_check_with_nulls() {
        let body = r#"{"_id": "B", "label": null, "type": null, "enable": null,
            "state": null, "parameters": null}"#;
        let check: Check = serde_json::from_str(body).unwrap();
        assert_eq!(check.label, "");
        assert_eq!(check.check_type, "");
        assert_eq!(check.parameters.target, "");
    }

    #[test]
    fn test_decode_result_short_keys() {
        let body = r#"[{"ci": "12345", "t": "SSL", "tg": "http://www.example.com/",
            "sc": "valid", "su": true, "rt": 165, "m": "Valid cert"}]"#;
        let results: Vec<CheckResult> = serde_json::from_str(body).unwrap();
        assert_eq!(
            results[0],
            CheckResult {
                check_type: "SSL".to_string(),
                target: "http://www.example.com/".to_string(),
                result: "valid".to_string(),
                message: "Valid cert".to_string(),
                success: true,
                duration_ms: 165,
            }
        );
    }

    #[test]
    fn test_decode_down_result_without_run_time() {
        let results: Vec<CheckResult> =
            serde_json::from_str(r#"[{"su": false, "rt": null, "m": null}]"#).unwrap();
        assert!(!results[0].success);
        assert_eq!(results[0].duration_ms, 0);
        assert_eq!(results[0].message, "");
    }
}
