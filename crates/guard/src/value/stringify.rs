//! Fail-safe stringification of values for diagnostics
//!
//! Unlike JSON serialization this never fails and never drops anything:
//! values with no JSON form get a distinguishable textual form instead.
//!
//! | Value              | Rendered as         |
//! |--------------------|---------------------|
//! | `undefined`        | `undefined`         |
//! | string             | `"quoted"`          |
//! | `NaN`, `±Infinity` | `NaN`, `Infinity`   |
//! | big integer        | `10n`               |
//! | symbol             | `Symbol(desc)`      |
//! | function           | `[Function name]`   |

use std::fmt::{self, Write};

use super::Value;

/// Renders any value as a display string.
///
/// # Examples
///
/// ```rust
/// use vigil_guard::value::{stringify, Symbol, Value};
///
/// assert_eq!(stringify(&Value::from("a")), r#""a""#);
/// assert_eq!(stringify(&Value::BigInt(10)), "10n");
/// assert_eq!(stringify(&Value::from(Symbol::new("id"))), "Symbol(id)");
/// assert_eq!(
///     stringify(&Value::array([Value::from(1), Value::Number(f64::NAN)])),
///     "[1,NaN]"
/// );
/// ```
pub fn stringify(value: &Value) -> String {
    value.to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write_number(f, *n),
            Value::BigInt(n) => write!(f, "{n}n"),
            Value::String(s) => write_quoted(f, s),
            Value::Symbol(symbol) => write!(f, "Symbol({})", symbol.description().unwrap_or("")),
            Value::Function(name) if name.is_empty() => f.write_str("[Function (anonymous)]"),
            Value::Function(name) => write!(f, "[Function {name}]"),
            Value::Array(items) => {
                f.write_char('[')?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_char(']')
            }
            Value::Object(map) => {
                f.write_char('{')?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_char(',')?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ":{item}")?;
                }
                f.write_char('}')
            }
        }
    }
}

fn write_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        f.write_str("NaN")
    } else if n.is_infinite() {
        f.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // -0 renders as 0
        f.write_char('0')
    } else {
        write!(f, "{n}")
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    match serde_json::to_string(s) {
        Ok(quoted) => f.write_str(&quoted),
        Err(_) => write!(f, "{s:?}"),
    }
}
