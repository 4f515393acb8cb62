use std::io::{self, Write};

use serde_json::Value;

use crate::api::Rs;

/// Falsy payloads (null, false, zero, empty string/array/object) print as "no data".
fn has_content(data: &Value) -> bool {
    match data {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Renders an [`Rs`] for humans: the error line, the payload, or a "no data" notice.
pub fn write_response<W>(rs: &Rs, out: &mut W) -> io::Result<()>
where
    W: Write,
{
    if let Some(message) = rs.error() {
        return writeln!(out, "Error: {message}");
    }

    match rs.data().filter(|data| has_content(data)) {
        Some(data) => {
            writeln!(
                out,
                "Response received successfully! Status code: {}",
                rs.status_code()
            )?;
            writeln!(out, "Response data:")?;
            let json = serde_json::to_string_pretty(data).map_err(io::Error::other)?;
            writeln!(out, "{json}")
        }
        None => writeln!(out, "No response data to process"),
    }
}

pub fn process_response(rs: &Rs) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = write_response(rs, &mut out) {
        tracing::warn!(error = %err, "Failed to print response");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(rs: &Rs) -> String {
        let mut buf = Vec::new();
        write_response(rs, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_process_response_success() {
        let rs = Rs::Success {
            status: 200,
            data: Some(json!({"status": "success"})),
        };

        assert_eq!(
            render(&rs),
            "Response received successfully! Status code: 200\n\
             Response data:\n\
             {\n  \"status\": \"success\"\n}\n"
        );
    }

    #[test]
    fn test_process_response_error() {
        let rs = Rs::failure(Some(404), "Not Found");
        assert_eq!(render(&rs), "Error: Not Found\n");
    }

    #[test]
    fn test_process_response_empty() {
        let rs = Rs::Success {
            status: 200,
            data: None,
        };
        assert_eq!(render(&rs), "No response data to process\n");
    }

    #[test]
    fn falsy_payloads_count_as_no_data() {
        for data in [json!({}), json!([]), Value::Null, json!(false), json!(0), json!(0.0), json!("")] {
            let rs = Rs::Success {
                status: 200,
                data: Some(data),
            };
            assert_eq!(render(&rs), "No response data to process\n");
        }
    }

    #[test]
    fn truthy_scalars_are_printed() {
        for (data, shown) in [(json!(true), "true"), (json!(7), "7"), (json!("ok"), "\"ok\"")] {
            let rs = Rs::Success {
                status: 200,
                data: Some(data),
            };
            assert_eq!(
                render(&rs),
                format!("Response received successfully! Status code: 200\nResponse data:\n{shown}\n")
            );
        }
    }

    #[test]
    fn rendering_twice_is_identical() {
        let cases = [
            Rs::Success {
                status: 201,
                data: Some(json!({"id": 1, "status": "created"})),
            },
            Rs::failure(None, "connection refused"),
            Rs::Success {
                status: 204,
                data: None,
            },
        ];
        for rs in &cases {
            assert_eq!(render(rs), render(rs));
        }
    }
}
