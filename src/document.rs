use {
    crate::error::{Error, Result},
    serde_yaml::{Mapping, Value},
    std::{convert::TryFrom, fs, path::Path, str::FromStr},
};

/// Source document: a mapping from option names to scalar values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    mapping: Mapping,
}

impl Document {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();

        let text = fs::read_to_string(path).map_err(|e| Error::Source {
            origin: origin.clone(),
            reason: e.to_string(),
        })?;

        parse(&text).map_err(|reason| Error::Source { origin, reason })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.mapping.get(&Value::String(key.to_owned()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        parse(text).map_err(|reason| Error::Source {
            origin: "<string>".to_owned(),
            reason,
        })
    }
}

impl From<Mapping> for Document {
    fn from(mapping: Mapping) -> Self {
        Document { mapping }
    }
}

fn parse(text: &str) -> std::result::Result<Document, String> {
    // serde_yaml rejects a stream without any document, treat it as an empty mapping
    if text.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    }) {
        return Ok(Document::default());
    }

    match serde_yaml::from_str::<Value>(text).map_err(|e| e.to_string())? {
        Value::Mapping(mapping) => Ok(Document { mapping }),
        Value::Null => Ok(Document::default()),
        other => Err(format!(
            "expected a mapping at the top level, found {}",
            describe(&other)
        )),
    }
}

/// Conversion of a document scalar into the declared type of an option.
///
/// Scalars are treated as text that may be reinterpreted, so `"64"` is a valid
/// unsigned value and `64` a valid string. Nulls and collections never coerce.
pub trait Coerce: Sized {
    /// Name of the declared type used in error messages
    const EXPECTED: &'static str;

    fn coerce(value: &Value) -> Option<Self>;
}

impl Coerce for usize {
    const EXPECTED: &'static str = "an unsigned integer";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl Coerce for f64 {
    const EXPECTED: &'static str = "a real number";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl Coerce for bool {
    const EXPECTED: &'static str = "a boolean";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => parse_bool(s.trim()),
            _ => None,
        }
    }
}

impl Coerce for String {
    const EXPECTED: &'static str = "a string";

    fn coerce(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }
}

/// YAML 1.1 style booleans: y/yes/true/on and n/no/false/off, either all lower
/// case, all upper case or capitalised
fn parse_bool(s: &str) -> Option<bool> {
    let lower = s.to_ascii_lowercase();
    let capitalised = s
        .get(..1)
        .map(|head| head.to_ascii_uppercase() + &lower[1..]);

    if s != lower && s != s.to_ascii_uppercase() && Some(s) != capitalised.as_deref() {
        return None;
    }

    match lower.as_str() {
        "y" | "yes" | "true" | "on" => Some(true),
        "n" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

/// Coerces `value` for option `key`, failing with a type error naming the key
pub fn coerce<T: Coerce>(key: &str, value: &Value) -> Result<T> {
    T::coerce(value).ok_or_else(|| Error::Type {
        key: key.to_owned(),
        expected: T::EXPECTED,
        found: describe(value),
    })
}

pub(crate) fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(s) => format!("string {:?}", s),
        Value::Sequence(_) => "a sequence".to_owned(),
        Value::Mapping(_) => "a mapping".to_owned(),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_document_is_empty_mapping() {
        assert_eq!("".parse::<Document>().unwrap(), Document::default());
        assert_eq!("---\n".parse::<Document>().unwrap(), Document::default());
        assert_eq!("# comment\n".parse::<Document>().unwrap(), Document::default());
        assert_eq!(
            "# header\n\n---\n  # indented\n...\n".parse::<Document>().unwrap(),
            Document::default()
        );
    }

    #[test]
    fn top_level_sequence_is_source_error() {
        match "- 1\n- 2\n".parse::<Document>() {
            Err(Error::Source { reason, .. }) => assert!(reason.contains("sequence")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn unparsable_yaml_is_source_error() {
        assert!(matches!(
            "GridLength: [64".parse::<Document>(),
            Err(Error::Source { .. })
        ));
    }

    #[test]
    fn missing_file_is_source_error() {
        match Document::load("src/testdata/does_not_exist.yaml") {
            Err(Error::Source { origin, .. }) => assert!(origin.ends_with("does_not_exist.yaml")),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn keys_are_case_sensitive() {
        let doc = "GridLength: 64\ngridlength: 32\n".parse::<Document>().unwrap();
        assert!(doc.contains("GridLength"));
        assert!(!doc.contains("GRIDLENGTH"));
        assert_eq!(coerce::<usize>("GridLength", doc.get("GridLength").unwrap()).unwrap(), 64);
    }

    #[test]
    fn unsigned_coercion() {
        assert_eq!(usize::coerce(&Value::from(64)), Some(64));
        assert_eq!(usize::coerce(&Value::from("128")), Some(128));
        assert_eq!(usize::coerce(&Value::from(-1)), None);
        assert_eq!(usize::coerce(&Value::from(1.5)), None);
        assert_eq!(usize::coerce(&Value::from(true)), None);
    }

    #[test]
    fn real_coercion() {
        assert_eq!(f64::coerce(&Value::from(3)), Some(3.0));
        assert_eq!(f64::coerce(&Value::from(0.25)), Some(0.25));
        assert_eq!(f64::coerce(&Value::from("1e-3")), Some(1.0e-3));
        assert_eq!(f64::coerce(&Value::Null), None);
    }

    #[test]
    fn bool_and_string_coercion() {
        assert_eq!(bool::coerce(&Value::from(false)), Some(false));
        assert_eq!(bool::coerce(&Value::from("true")), Some(true));
        assert_eq!(bool::coerce(&Value::from(1)), None);
        for &yes in &["y", "Y", "yes", "Yes", "YES", "True", "TRUE", "on", "On", "ON"] {
            assert_eq!(bool::coerce(&Value::from(yes)), Some(true), "{}", yes);
        }
        for &no in &["n", "N", "no", "No", "NO", "False", "FALSE", "off", "Off", "OFF"] {
            assert_eq!(bool::coerce(&Value::from(no)), Some(false), "{}", no);
        }
        assert_eq!(bool::coerce(&Value::from("tRUE")), None);
        assert_eq!(bool::coerce(&Value::from("yEs")), None);
        assert_eq!(bool::coerce(&Value::from("maybe")), None);

        assert_eq!(String::coerce(&Value::from("Jet")), Some("Jet".to_owned()));
        assert_eq!(String::coerce(&Value::from(7)), Some("7".to_owned()));
        assert_eq!(String::coerce(&Value::Sequence(vec![])), None);
    }

    #[test]
    fn type_error_names_key() {
        match coerce::<usize>("GridLength", &Value::from("abc")) {
            Err(Error::Type { key, expected, found }) => {
                assert_eq!(key, "GridLength");
                assert_eq!(expected, usize::EXPECTED);
                assert_eq!(found, "string \"abc\"");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
