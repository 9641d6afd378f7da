use std::fmt::{self, Write};

use bencodec::{Integer, Value};

/// Formats a Value as human-readable ASCII text.
///
/// Byte strings that are valid UTF-8 print as quoted literals; anything else
/// prints as `hex"..."`.
pub fn to_ascii(value: &Value) -> String {
    Ascii(value).to_string()
}

struct Ascii<'a>(&'a Value);

impl fmt::Display for Ascii<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_value(f, self.0, 0)
    }
}

/// Formats a value with the given indentation level.
fn format_value(output: &mut impl Write, value: &Value, indent: usize) -> fmt::Result {
    let indent_str = "  ".repeat(indent);

    match value {
        Value::Integer(Integer::Signed(n)) => write!(output, "{}", n),
        Value::Integer(Integer::Unsigned(n)) => write!(output, "{}", n),
        Value::Bytes(b) => format_bytes(output, b),

        Value::List(items) => {
            output.write_char('[')?;
            if !items.is_empty() {
                output.write_char('\n')?;
                for item in items {
                    write!(output, "{}  ", indent_str)?;
                    format_value(output, item, indent + 1)?;
                    output.write_str(",\n")?;
                }
                output.write_str(&indent_str)?;
            }
            output.write_char(']')
        }

        Value::Dict(dict) => {
            output.write_char('{')?;
            if !dict.is_empty() {
                output.write_char('\n')?;
                for (k, v) in dict {
                    write!(output, "{}  ", indent_str)?;
                    format_bytes(output, k)?;
                    output.write_str(": ")?;
                    format_value(output, v, indent + 1)?;
                    output.write_str(",\n")?;
                }
                output.write_str(&indent_str)?;
            }
            output.write_char('}')
        }
    }
}

fn format_bytes(output: &mut impl Write, b: &[u8]) -> fmt::Result {
    match std::str::from_utf8(b) {
        Ok(s) => format_string_literal(output, s),
        Err(_) => {
            output.write_str("hex\"")?;
            for byte in b {
                write!(output, "{:02x}", byte)?;
            }
            output.write_char('"')
        }
    }
}

/// Formats a string as a quoted literal with escapes.
fn format_string_literal(output: &mut impl Write, s: &str) -> fmt::Result {
    output.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => output.write_str("\\\"")?,
            '\\' => output.write_str("\\\\")?,
            '\n' => output.write_str("\\n")?,
            '\r' => output.write_str("\\r")?,
            '\t' => output.write_str("\\t")?,
            c if c.is_ascii_control() => write!(output, "\\x{:02x}", c as u32)?,
            c => output.write_char(c)?,
        }
    }
    output.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::{Value, to_ascii};
    use bencodec::{Dictionary, Integer};

    #[test]
    fn test_format_integers() {
        assert_eq!(to_ascii(&Value::from(42)), "42");
        assert_eq!(to_ascii(&Value::from(-42)), "-42");
        assert_eq!(
            to_ascii(&Value::Integer(Integer::Unsigned(u64::MAX))),
            "18446744073709551615"
        );
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(to_ascii(&Value::from("Hello")), "\"Hello\"");
        assert_eq!(to_ascii(&Value::from("Hello\nWorld")), "\"Hello\\nWorld\"");
        assert_eq!(to_ascii(&Value::from("a\0b")), "\"a\\x00b\"");
        assert_eq!(to_ascii(&Value::from(vec![0xFFu8, 0x00])), "hex\"ff00\"");
        assert_eq!(to_ascii(&Value::from("")), "\"\"");
    }

    #[test]
    fn test_format_list() {
        let list = Value::List(vec![Value::from(1), Value::from("two")]);
        assert_eq!(to_ascii(&list), "[\n  1,\n  \"two\",\n]");
        assert_eq!(to_ascii(&Value::List(vec![])), "[]");
    }

    #[test]
    fn test_format_dict() {
        let dict: Dictionary = [("b", Value::from(2)), ("a", Value::List(vec![]))]
            .into_iter()
            .collect();
        assert_eq!(to_ascii(&Value::Dict(dict)), "{\n  \"a\": [],\n  \"b\": 2,\n}");
    }

    #[test]
    fn test_format_nested_indent() {
        let inner: Dictionary = [(&b"\xFE"[..], Value::from(vec![0x01u8, 0xAB]))]
            .into_iter()
            .collect();
        let list = Value::List(vec![Value::Dict(inner), Value::from("tab\t")]);
        assert_eq!(
            to_ascii(&list),
            "[\n  {\n    hex\"fe\": hex\"01ab\",\n  },\n  \"tab\\t\",\n]"
        );
    }
}
