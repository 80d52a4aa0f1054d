//! Rendering of a single record into an apidoc comment block.

use std::fmt::Write;

use serde_json::Value;

use crate::error::RenderError;
use crate::record::EndpointRecord;
use crate::render::pretty::pretty_json;
use crate::status::status_line;

/// Prefix of every line inside a block.
const LINE_PREFIX: &str = "* ";

/// Indentation of the `HTTP/1.1` status line under an example tag.
const STATUS_INDENT: &str = "    ";

/// Writes the doc block for one [`EndpointRecord`].
///
/// Sections are emitted in a fixed order: the `@api` tag, name,
/// description, group, request example, success fields and example, then
/// the error tag and example. Sections whose source field is unset are
/// skipped.
pub struct BlockRenderer<'a> {
    record: &'a EndpointRecord,
    label: String,
}

/// Example values already broken into lines.
struct Examples {
    request: Option<String>,
    success: Option<String>,
    error: Option<String>,
}

impl<'a> BlockRenderer<'a> {
    pub fn new(record: &'a EndpointRecord) -> Self {
        Self {
            record,
            label: record.label(),
        }
    }

    /// Appends the complete block, including the `/**` and `*/` markers,
    /// to `out`. Nothing is appended on failure.
    pub fn render_into(&self, out: &mut String) -> Result<(), RenderError> {
        let examples = Examples {
            request: self.pretty("request", self.record.request_example())?,
            success: self.pretty("success", self.record.success_example())?,
            error: self.pretty("error", self.record.error_example())?,
        };

        let mut block = String::new();
        self.write_block(&mut block, &examples)
            .map_err(|source| RenderError::Format {
                endpoint: self.label.clone(),
                source,
            })?;
        out.push_str(&block);
        Ok(())
    }

    fn pretty(&self, section: &'static str, value: Option<&Value>) -> Result<Option<String>, RenderError> {
        value
            .map(|value| {
                pretty_json(value).map_err(|source| RenderError::Serialize {
                    endpoint: self.label.clone(),
                    section,
                    source,
                })
            })
            .transpose()
    }

    fn write_block(&self, out: &mut String, examples: &Examples) -> std::fmt::Result {
        let record = self.record;

        writeln!(out, "/**")?;
        self.api_line(out)?;

        if let Some(name) = record.name() {
            tag(out, &format!("@apiName {name}"))?;
        }
        if let Some(description) = record.description() {
            tag(out, &format!("@apiDescription {description}"))?;
        }
        if let Some(group) = record.group() {
            tag(out, &format!("@apiGroup {group}"))?;
        }

        if let Some(text) = &examples.request {
            writeln!(out, "{LINE_PREFIX}@apiParamExample {{json}} Request-Example:")?;
            example(out, text, record.http_success_code())?;
        }

        if let (Some(value), Some(text)) = (record.success_example(), &examples.success) {
            self.success_fields(out, value)?;
            writeln!(out, "{LINE_PREFIX}@apiSuccessExample {{json}} Success-Response:")?;
            example(out, text, record.http_success_code())?;
        }

        if let Some(text) = &examples.error {
            match record.error_description() {
                Some(description) => tag(out, &format!("@apiError {description}"))?,
                None => writeln!(out, "{LINE_PREFIX}@apiError")?,
            }
            writeln!(out, "{LINE_PREFIX}@apiErrorExample {{json}} Error-Response:")?;
            example(out, text, record.http_error_code())?;
        }

        writeln!(out, "*/")
    }

    /// `* @api {get} /api/user [title]`
    fn api_line(&self, out: &mut String) -> std::fmt::Result {
        let record = self.record;
        let mut line = format!(
            "@api {{{}}} {}",
            record.method().apidoc_verb(),
            record.endpoint()
        );
        if let Some(title) = record.title() {
            line.push(' ');
            line.push_str(title);
        }
        tag(out, &line)
    }

    /// One `@apiSuccess` line per top-level key of an object example, in
    /// the example's key order.
    fn success_fields(&self, out: &mut String, example: &Value) -> std::fmt::Result {
        let Value::Object(fields) = example else {
            return Ok(());
        };

        for (key, value) in fields {
            let mut line = format!("@apiSuccess {{{}}} {key}", field_type(value));
            if let Some(description) = self.record.success_field_description(key) {
                line.push(' ');
                line.push_str(description);
            }
            tag(out, &line)?;
        }
        Ok(())
    }
}

/// Writes free text as block lines. Every line, including continuation
/// lines of multi-line text, gets the `* ` prefix, and `*/` is written as
/// `*\/` so the text cannot end the comment.
fn tag(out: &mut String, text: &str) -> std::fmt::Result {
    let text = text.replace("*/", "*\\/");
    for line in text.lines() {
        if line.is_empty() {
            writeln!(out, "*")?;
        } else {
            writeln!(out, "{LINE_PREFIX}{line}")?;
        }
    }
    Ok(())
}

/// Optional status line followed by the example text, one prefixed line each.
fn example(out: &mut String, text: &str, status: Option<u16>) -> std::fmt::Result {
    if let Some(code) = status {
        writeln!(out, "{LINE_PREFIX}{STATUS_INDENT}{}", status_line(code))?;
    }
    for line in text.lines() {
        writeln!(out, "{LINE_PREFIX}{line}")?;
    }
    Ok(())
}

/// apidoc type name for a JSON value.
fn field_type(value: &Value) -> &'static str {
    match value {
        Value::String(_) => "String",
        Value::Number(_) => "Number",
        Value::Bool(_) => "Boolean",
        Value::Array(_) => "Array",
        Value::Object(_) | Value::Null => "Object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::method::RestMethod;
    use serde_json::json;
    use std::collections::HashMap;

    fn render_one(record: &EndpointRecord) -> String {
        let mut out = String::new();
        BlockRenderer::new(record).render_into(&mut out).unwrap();
        out
    }

    #[test]
    fn test_minimal_block() {
        let record = EndpointRecord::new(RestMethod::Get, "/health");
        assert_eq!(render_one(&record), "/**\n* @api {get} /health\n*/\n");
    }

    #[test]
    fn test_title_follows_path() {
        let mut record = EndpointRecord::new(RestMethod::Post, "/api/login");
        record.title = Some("Log in".to_string());
        let text = render_one(&record);
        assert!(text.contains("* @api {post} /api/login Log in\n"));
    }

    #[test]
    fn test_header_tag_order() {
        let mut record = EndpointRecord::new(RestMethod::Get, "/api/user");
        record.group = Some("User".to_string());
        record.description = Some("returns session csrfToken".to_string());
        record.name = Some("GetCSRF".to_string());

        assert_eq!(
            render_one(&record),
            "/**\n\
             * @api {get} /api/user\n\
             * @apiName GetCSRF\n\
             * @apiDescription returns session csrfToken\n\
             * @apiGroup User\n\
             */\n"
        );
    }

    #[test]
    fn test_success_fields_are_typed_and_described() {
        let mut record = EndpointRecord::new(RestMethod::Get, "/api/user");
        record.success_example = Some(json!({
            "name": "ada",
            "age": 36,
            "admin": true,
            "tags": ["x"],
            "profile": {"bio": null},
        }));
        record.success_fields = Some(HashMap::from([("name".to_string(), "Display name".to_string())]));

        let text = render_one(&record);
        let fields: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("* @apiSuccess {"))
            .collect();

        assert_eq!(
            fields,
            vec![
                "* @apiSuccess {String} name Display name",
                "* @apiSuccess {Number} age",
                "* @apiSuccess {Boolean} admin",
                "* @apiSuccess {Array} tags",
                "* @apiSuccess {Object} profile",
            ]
        );
    }

    #[test]
    fn test_non_object_success_example_has_no_field_lines() {
        let mut record = EndpointRecord::new(RestMethod::Get, "/api/ids");
        record.success_example = Some(json!([1, 2]));
        let text = render_one(&record);

        assert!(!text.contains("@apiSuccess {"));
        assert!(text.contains("* @apiSuccessExample {json} Success-Response:\n* [1,\n* 2]\n"));
    }

    #[test]
    fn test_request_example_uses_success_code() {
        let mut record = EndpointRecord::new(RestMethod::Post, "/api/user");
        record.request_example = Some(json!({"user": "a"}));
        record.http_success_code = Some(201);

        let text = render_one(&record);
        assert!(text.contains(
            "* @apiParamExample {json} Request-Example:\n\
             *     HTTP/1.1 201 Created\n\
             * {\n\
             * \"user\":\"a\"\n\
             * }\n"
        ));
    }

    #[test]
    fn test_status_line_omitted_when_unknown() {
        let mut record = EndpointRecord::new(RestMethod::Get, "/a");
        record.success_example = Some(json!({"ok": true}));
        let text = render_one(&record);
        assert!(!text.contains("HTTP/1.1"));
    }

    #[test]
    fn test_error_section() {
        let mut record = EndpointRecord::new(RestMethod::Delete, "/api/user/9");
        record.error_example = Some(json!({"error": "missing"}));
        record.error_description = Some("User not found".to_string());
        record.http_error_code = Some(404);
        record.http_success_code = Some(200);

        let text = render_one(&record);
        assert!(text.contains(
            "* @apiError User not found\n\
             * @apiErrorExample {json} Error-Response:\n\
             *     HTTP/1.1 404 Not Found\n\
             * {\n\
             * \"error\":\"missing\"\n\
             * }\n\
             */\n"
        ));
    }

    #[test]
    fn test_error_tag_without_description() {
        let mut record = EndpointRecord::new(RestMethod::Get, "/a");
        record.error_example = Some(json!({}));
        let text = render_one(&record);
        assert!(text.contains("* @apiError\n* @apiErrorExample {json} Error-Response:\n* {}\n"));
    }

    #[test]
    fn test_multi_line_text_keeps_line_prefix() {
        let mut record = EndpointRecord::new(RestMethod::Get, "/api/user");
        record.title = Some("Fetch\nuser".to_string());
        record.description = Some("line one\nline two\n\nline four".to_string());
        record.error_example = Some(json!({}));
        record.error_description = Some("Not found\nor hidden".to_string());

        let text = render_one(&record);
        assert!(text.contains(
            "* @apiDescription line one\n\
             * line two\n\
             *\n\
             * line four\n"
        ));
        assert!(text.contains("* @api {get} /api/user Fetch\n* user\n"));
        assert!(text.contains("* @apiError Not found\n* or hidden\n"));

        let lines: Vec<&str> = text.lines().collect();
        let (last, inner) = lines[1..].split_last().unwrap();
        assert_eq!(lines[0], "/**");
        assert_eq!(*last, "*/");
        for line in inner {
            assert!(*line == "*" || line.starts_with("* "), "bad line {line:?}");
        }
    }

    #[test]
    fn test_comment_terminator_never_leaks() {
        let mut record = EndpointRecord::new(RestMethod::Get, "/files/*/");
        record.name = Some("List*/Files".to_string());
        record.description = Some("Matches */* globs".to_string());
        record.success_example = Some(json!({"accept": "*/*"}));
        record.success_fields = Some(HashMap::from([(
            "accept".to_string(),
            "Echoed */* header".to_string(),
        )]));
        record.error_example = Some(json!({"*/": "x"}));

        let text = render_one(&record);
        assert_eq!(text.matches("*/").count(), 1);
        assert!(text.ends_with("*/\n"));
        assert!(text.contains("* @apiDescription Matches *\\/* globs\n"));
        assert!(text.contains("* \"accept\":\"*\\/*\"\n"));
    }

    #[test]
    fn test_no_trailing_whitespace() {
        let mut record = EndpointRecord::new(RestMethod::Get, "/api/user");
        record.name = Some("GetUser".to_string());
        record.success_example = Some(json!({"id": 1}));
        record.http_success_code = Some(200);

        for line in render_one(&record).lines() {
            assert_eq!(line, line.trim_end(), "trailing whitespace in {line:?}");
        }
    }
}
