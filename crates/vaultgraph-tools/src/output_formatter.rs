//! Output formatting for terminal and machine consumers
//!
//! JSON is the canonical form. Human and text renderings are derived from the
//! same JSON value so every tool response formats without per-tool code.

use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// How the CLI renders a query response on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The response object itself, pretty-printed
    #[default]
    Json,
    /// Scalar fields as `Label: value`, then each result list indented
    Human,
    /// One tab-separated row per result, for `cut`, `sort` and friends
    Text,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [Self::Json, Self::Human, Self::Text];

    /// Name accepted on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
            OutputFormat::Text => "text",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|f| f.as_str()).collect();
                format!("unsupported output format '{}' (expected {})", s, names.join(", "))
            })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Formatter for converting responses to different formats
pub struct ResponseFormatter;

impl ResponseFormatter {
    /// Format a JSON response according to the output format preference
    pub fn format(response: &Value, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::format_json(response),
            OutputFormat::Human => Self::format_human(response),
            OutputFormat::Text => Self::format_text(response),
        }
    }

    fn format_json(response: &Value) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| response.to_string())
    }

    /// Scalars first as `key: value`, then each list as an indented block
    fn format_human(response: &Value) -> String {
        let Some(obj) = response.as_object() else {
            return Self::format_json(response);
        };

        let mut output = String::new();

        for (key, value) in obj {
            if !value.is_array() {
                output.push_str(&format!("{}: {}\n", label(key), scalar(value)));
            }
        }

        for (key, value) in obj {
            let Some(items) = value.as_array() else {
                continue;
            };
            output.push_str(&format!("\n{} ({}):\n", label(key), items.len()));
            if items.is_empty() {
                output.push_str("  (none)\n");
            }
            for item in items {
                match item.as_object() {
                    Some(fields) => output.push_str(&format!("  - {}\n", inline_fields(fields))),
                    None => output.push_str(&format!("  - {}\n", scalar(item))),
                }
            }
        }

        output
    }

    /// One line per list item with tab-separated field values; scalar-only
    /// responses print one `key<TAB>value` line per field
    fn format_text(response: &Value) -> String {
        let Some(obj) = response.as_object() else {
            return Self::format_json(response);
        };

        let lists: Vec<&Vec<Value>> = obj.values().filter_map(Value::as_array).collect();
        let mut output = String::new();

        if lists.is_empty() {
            for (key, value) in obj {
                output.push_str(&format!("{}\t{}\n", key, scalar(value)));
            }
            return output;
        }

        for items in lists {
            for item in items {
                let row = match item.as_object() {
                    Some(fields) => fields.values().map(scalar).collect::<Vec<_>>().join("\t"),
                    None => scalar(item),
                };
                output.push_str(&row);
                output.push('\n');
            }
        }

        output
    }
}

fn label(key: &str) -> String {
    let mut chars = key.replace('_', " ").chars().collect::<Vec<_>>();
    if let Some(first) = chars.first_mut() {
        *first = first.to_ascii_uppercase();
    }
    chars.into_iter().collect()
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        Value::Array(items) => format!("[{} items]", items.len()),
        other => other.to_string(),
    }
}

fn inline_fields(fields: &Map<String, Value>) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", k, scalar(v)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("Human").unwrap(), OutputFormat::Human);
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);

        let err = OutputFormat::from_str("yaml").unwrap_err();
        assert!(err.contains("json, human, text"));

        for format in OutputFormat::ALL {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
        assert_eq!(OutputFormat::Human.to_string(), "human");
    }

    #[test]
    fn test_format_json() {
        let response = json!({"count": 0, "documents": []});
        let formatted = ResponseFormatter::format(&response, OutputFormat::Json);
        assert!(formatted.contains("\"count\": 0"));
    }

    #[test]
    fn test_format_human() {
        let response = json!({
            "target": "B",
            "count": 1,
            "results": [{"source": "A", "kind": "direct", "line": 3}]
        });
        let formatted = ResponseFormatter::format(&response, OutputFormat::Human);
        assert!(formatted.contains("Target: B"));
        assert!(formatted.contains("Results (1):"));
        assert!(formatted.contains("source=A kind=direct line=3"));
    }

    #[test]
    fn test_format_human_empty_list() {
        let response = json!({"count": 0, "documents": []});
        let formatted = ResponseFormatter::format(&response, OutputFormat::Human);
        assert!(formatted.contains("(none)"));
    }

    #[test]
    fn test_format_text_rows() {
        let response = json!({
            "threshold": 1,
            "count": 2,
            "documents": [
                {"id": "B", "connection_count": 2},
                {"id": "A", "connection_count": 1}
            ]
        });
        let formatted = ResponseFormatter::format(&response, OutputFormat::Text);
        assert_eq!(formatted, "B\t2\nA\t1\n");
    }

    #[test]
    fn test_format_text_scalars() {
        let response = json!({"total_documents": 3, "total_links": 2});
        let formatted = ResponseFormatter::format(&response, OutputFormat::Text);
        assert_eq!(formatted, "total_documents\t3\ntotal_links\t2\n");
    }
}
