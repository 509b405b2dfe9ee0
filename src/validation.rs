use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

pub fn valid_email(value: &str) -> bool {
    email_regex().is_match(value)
}

type CustomCheck = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Declarative checks for one form field.
///
/// Checks run in a fixed order (required, email, min length, max length, number,
/// min, max, pattern, custom) and the first failure is the field's only error.
#[derive(Clone, Default)]
pub struct FieldRules {
    pub required: bool,
    pub email: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub number: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<Regex>,
    pub pattern_message: Option<String>,
    pub custom: Option<CustomCheck>,
    pub custom_message: Option<String>,
    pub label: Option<String>,
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("required", &self.required)
            .field("email", &self.email)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("number", &self.number)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("custom", &self.custom.is_some())
            .field("label", &self.label)
            .finish()
    }
}

impl FieldRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn max_length(mut self, length: usize) -> Self {
        self.max_length = Some(length);
        self
    }

    pub fn number(mut self) -> Self {
        self.number = true;
        self
    }

    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn pattern_message(mut self, message: impl Into<String>) -> Self {
        self.pattern_message = Some(message.into());
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }

    pub fn custom_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    fn label_or<'a>(&'a self, field: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(field)
    }

    /// The first failing check for `value`, if any
    fn check(&self, field: &str, value: Option<&Value>) -> Option<String> {
        let label = self.label_or(field);

        if self.required && is_missing(value) {
            return Some(format!("{} is required", label));
        }

        let value = match value {
            Some(Value::Null) | None => return None,
            Some(value) => value,
        };
        let text = value.as_str();

        if self.email && text.is_some_and(|s| !valid_email(s)) {
            return Some("Please enter a valid email address".to_string());
        }

        if let (Some(min_length), Some(s)) = (self.min_length, text) {
            if s.chars().count() < min_length {
                return Some(format!(
                    "{} must be at least {} characters",
                    label, min_length
                ));
            }
        }

        if let (Some(max_length), Some(s)) = (self.max_length, text) {
            if s.chars().count() > max_length {
                return Some(format!(
                    "{} must be less than {} characters",
                    label, max_length
                ));
            }
        }

        let number = as_number(value);

        if self.number && number.is_none() {
            return Some(format!("{} must be a number", label));
        }

        if let (Some(min), Some(n)) = (self.min, number) {
            if n < min {
                return Some(format!("{} must be at least {}", label, format_number(min)));
            }
        }

        if let (Some(max), Some(n)) = (self.max, number) {
            if n > max {
                return Some(format!("{} must be less than {}", label, format_number(max)));
            }
        }

        if let (Some(pattern), Some(s)) = (&self.pattern, text) {
            if !pattern.is_match(s) {
                return Some(
                    self.pattern_message
                        .clone()
                        .unwrap_or_else(|| format!("{} is invalid", label)),
                );
            }
        }

        if let Some(custom) = &self.custom {
            if !custom(value) {
                return Some(
                    self.custom_message
                        .clone()
                        .unwrap_or_else(|| format!("{} is invalid", label)),
                );
            }
        }

        None
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Numeric reading of a form value; `None` when it is not a number
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric_text(s),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

/// Reads text the way a browser's `Number()` does: blank is 0, `0x`/`0o`/`0b`
/// prefixes are integers, and only the exact spelling `Infinity` is infinite.
fn parse_numeric_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix)
            .ok()
            .map(|n| n as f64);
    }

    // Rust also accepts "inf", "infinity" and "nan" in any case
    if trimmed.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Rules for a whole form, keyed by field name
#[derive(Debug, Clone, Default)]
pub struct FormRules {
    fields: BTreeMap<String, FieldRules>,
}

impl FormRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
        self.fields.insert(name.into(), rules);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldRules> {
        self.fields.get(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationResult {
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

/// Check every field named in `rules` against `data`. Fields of `data` without
/// rules are ignored.
pub fn validate_form(data: &Map<String, Value>, rules: &FormRules) -> ValidationResult {
    let errors: BTreeMap<String, String> = rules
        .fields
        .iter()
        .filter_map(|(field, field_rules)| {
            field_rules
                .check(field, data.get(field))
                .map(|message| (field.clone(), message))
        })
        .collect();

    ValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Rule sets for the dashboard's forms
pub mod presets {
    use super::{FieldRules, FormRules};
    use regex::Regex;

    pub fn post_form() -> FormRules {
        FormRules::new()
            .field("title", FieldRules::new().required().label("Title").min_length(5))
            .field("body", FieldRules::new().required().label("Content").min_length(20))
    }

    pub fn comment_form() -> FormRules {
        FormRules::new()
            .field("body", FieldRules::new().required().label("Comment"))
            .field(
                "userId",
                FieldRules::new().required().label("User ID").number().min(1.0),
            )
    }

    pub fn user_form() -> FormRules {
        FormRules::new()
            .field("firstName", FieldRules::new().required().label("First Name"))
            .field("lastName", FieldRules::new().required().label("Last Name"))
            .field("email", FieldRules::new().required().label("Email").email())
            .field(
                "age",
                FieldRules::new().required().label("Age").number().min(13.0),
            )
            .field("gender", FieldRules::new().required().label("Gender"))
            .field(
                "username",
                FieldRules::new().required().label("Username").min_length(4),
            )
    }

    pub fn contact_form(phone_contact: bool) -> FormRules {
        let rules = FormRules::new()
            .field("name", FieldRules::new().required().label("Name"))
            .field("email", FieldRules::new().required().label("Email").email())
            .field("subject", FieldRules::new().required().label("Subject"))
            .field(
                "message",
                FieldRules::new()
                    .required()
                    .label("Message")
                    .min_length(20),
            );

        if phone_contact {
            rules.field(
                "phone",
                FieldRules::new()
                    .required()
                    .label("Phone")
                    .pattern(Regex::new(r"^\d{10}$").unwrap())
                    .pattern_message("Please enter a valid 10-digit phone number"),
            )
        } else {
            rules
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_required_uses_label() {
        let rules = FormRules::new().field("name", FieldRules::new().required().label("Name"));
        let result = validate_form(&form(json!({ "name": "" })), &rules);

        assert!(!result.is_valid);
        assert_eq!(result.error("name"), Some("Name is required"));
    }

    #[test]
    fn test_required_without_label_uses_field_name() {
        let rules = FormRules::new().field("title", FieldRules::new().required());
        let result = validate_form(&form(json!({})), &rules);
        assert_eq!(result.error("title"), Some("title is required"));
    }

    #[test]
    fn test_required_rejects_blank_null_and_empty_list() {
        let rules = FormRules::new()
            .field("a", FieldRules::new().required())
            .field("b", FieldRules::new().required())
            .field("c", FieldRules::new().required())
            .field("d", FieldRules::new().required());
        let result = validate_form(
            &form(json!({ "a": "   ", "b": null, "c": [], "d": 0 })),
            &rules,
        );

        assert!(result.error("a").is_some());
        assert!(result.error("b").is_some());
        assert!(result.error("c").is_some());
        assert!(result.error("d").is_none());
    }

    #[test]
    fn test_email_rule() {
        let rules = FormRules::new().field("email", FieldRules::new().email());

        let bad = validate_form(&form(json!({ "email": "not-an-email" })), &rules);
        assert_eq!(bad.error("email"), Some("Please enter a valid email address"));

        let good = validate_form(&form(json!({ "email": "a@b.co" })), &rules);
        assert!(good.is_valid);
        assert!(good.error("email").is_none());
    }

    #[test]
    fn test_absent_optional_field_is_skipped() {
        let rules = FormRules::new().field(
            "age",
            FieldRules::new()
                .number()
                .min(13.0)
                .custom(|_| false),
        );
        let result = validate_form(&form(json!({ "other": "x" })), &rules);
        assert!(result.is_valid);
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let rules = FormRules::new().field(
            "username",
            FieldRules::new()
                .label("Username")
                .min_length(4)
                .pattern(Regex::new(r"^[a-z]+$").unwrap())
                .custom(|_| false)
                .custom_message("taken"),
        );

        let short = validate_form(&form(json!({ "username": "AB" })), &rules);
        assert_eq!(
            short.error("username"),
            Some("Username must be at least 4 characters")
        );

        let bad_pattern = validate_form(&form(json!({ "username": "ABCDE" })), &rules);
        assert_eq!(bad_pattern.error("username"), Some("Username is invalid"));

        let custom = validate_form(&form(json!({ "username": "abcde" })), &rules);
        assert_eq!(custom.error("username"), Some("taken"));
    }

    #[test]
    fn test_max_length() {
        let rules = FormRules::new().field("title", FieldRules::new().label("Title").max_length(5));
        let result = validate_form(&form(json!({ "title": "too long" })), &rules);
        assert_eq!(
            result.error("title"),
            Some("Title must be less than 5 characters")
        );
    }

    #[test]
    fn test_number_min_max() {
        let rules = FormRules::new().field(
            "age",
            FieldRules::new().label("Age").number().min(13.0).max(120.0),
        );

        let not_number = validate_form(&form(json!({ "age": "abc" })), &rules);
        assert_eq!(not_number.error("age"), Some("Age must be a number"));

        let too_young = validate_form(&form(json!({ "age": "12" })), &rules);
        assert_eq!(too_young.error("age"), Some("Age must be at least 13"));

        let too_old = validate_form(&form(json!({ "age": 121 })), &rules);
        assert_eq!(too_old.error("age"), Some("Age must be less than 120"));

        let ok = validate_form(&form(json!({ "age": 30 })), &rules);
        assert!(ok.is_valid);
    }

    #[test]
    fn test_number_text_reads_like_a_browser() {
        let rules = FormRules::new().field(
            "age",
            FieldRules::new().label("Age").number().min(13.0),
        );

        for text in ["inf", "infinity", "INF", "NaN", "-inf", "12abc"] {
            let result = validate_form(&form(json!({ "age": text })), &rules);
            assert_eq!(result.error("age"), Some("Age must be a number"), "{}", text);
        }

        for text in ["Infinity", "0x10", " 42 ", "1e3", ".5e2"] {
            let result = validate_form(&form(json!({ "age": text })), &rules);
            assert!(result.is_valid, "{}", text);
        }

        assert_eq!(as_number(&json!("0x10")), Some(16.0));
        assert_eq!(as_number(&json!("0b101")), Some(5.0));
        assert_eq!(as_number(&json!("-Infinity")), Some(f64::NEG_INFINITY));
        assert_eq!(as_number(&json!("0xZZ")), None);
        assert_eq!(as_number(&json!("   ")), Some(0.0));
    }

    #[test]
    fn test_min_skips_non_numeric_values() {
        let rules = FormRules::new().field("tags", FieldRules::new().min(1.0));
        let result = validate_form(&form(json!({ "tags": ["a"] })), &rules);
        assert!(result.is_valid);
    }

    #[test]
    fn test_errors_accumulate_per_field() {
        let result = validate_form(
            &form(json!({ "title": "Hi", "body": "" })),
            &presets::post_form(),
        );

        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(
            result.error("title"),
            Some("Title must be at least 5 characters")
        );
        assert_eq!(result.error("body"), Some("Content is required"));
    }

    #[test]
    fn test_comment_preset() {
        let rules = presets::comment_form();

        let ok = validate_form(&form(json!({ "body": "Nice post", "userId": 5 })), &rules);
        assert!(ok.is_valid);

        let bad = validate_form(&form(json!({ "body": "Nice", "userId": 0 })), &rules);
        assert_eq!(bad.error("userId"), Some("User ID must be at least 1"));
    }

    #[test]
    fn test_user_preset() {
        let result = validate_form(
            &form(json!({
                "firstName": "Emily",
                "lastName": "Johnson",
                "email": "emily@x",
                "age": 12,
                "gender": "female",
                "username": "emi"
            })),
            &presets::user_form(),
        );

        assert_eq!(result.error("email"), Some("Please enter a valid email address"));
        assert_eq!(result.error("age"), Some("Age must be at least 13"));
        assert_eq!(
            result.error("username"),
            Some("Username must be at least 4 characters")
        );
        assert!(result.error("firstName").is_none());
    }

    #[test]
    fn test_contact_preset_phone_only_when_selected() {
        let data = form(json!({
            "name": "Ann",
            "email": "ann@example.com",
            "subject": "Hello",
            "message": "This message is long enough to pass.",
            "phone": "12345"
        }));

        assert!(validate_form(&data, &presets::contact_form(false)).is_valid);

        let with_phone = validate_form(&data, &presets::contact_form(true));
        assert_eq!(
            with_phone.error("phone"),
            Some("Please enter a valid 10-digit phone number")
        );
    }

    #[test]
    fn test_valid_email_edge_cases() {
        assert!(valid_email("first.last@sub.example.org"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("a b@c.de"));
        assert!(!valid_email("@c.de"));
        assert!(!valid_email(""));
    }
}
