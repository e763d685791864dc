//! JSON Schema for the configuration file.

use crate::config::SoftScreenConfig;

/// Generates the JSON Schema for [`SoftScreenConfig`].
#[must_use]
pub fn generate_schema() -> schemars::Schema {
    let mut schema = schemars::schema_for!(SoftScreenConfig);

    if let Some(obj) = schema.as_object_mut() {
        obj.insert(
            "$id".to_string(),
            serde_json::json!(
                "https://raw.githubusercontent.com/softscreen/softscreen/main/softscreen.schema.json"
            ),
        );
    }

    schema
}

/// Generates the schema as pretty-printed JSON.
#[must_use]
pub fn generate_schema_json() -> String {
    serde_json::to_string_pretty(&generate_schema()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_describes_config_keys() {
        let parsed: serde_json::Value = serde_json::from_str(&generate_schema_json()).unwrap();

        assert!(parsed["$id"].as_str().unwrap().contains("softscreen.schema.json"));
        assert_eq!(parsed["title"], "SoftScreenConfig");
        for key in ["display", "deferTicks", "alwaysOnTop", "background", "headless"] {
            assert!(parsed["properties"][key].is_object(), "missing {key}");
        }
    }
}
