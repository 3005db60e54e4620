//! # User Schema Validation
//!
//! Builds the rule table for the user record from a [`SchemaConfig`] and runs
//! it over [`RawInput`].
//!
//! | Field | Chain | Transform |
//! |-------|-------|-----------|
//! | `name` | string → non-blank | capitalize words |
//! | `email` | string → non-empty → email shape | lowercase |
//! | `password` | string → min length | — |
//! | `techs` | list → each entry → min length | — |
//! | `techs[i].title` | string → non-blank | — |
//! | `techs[i].knowledge` | coerce → finite → range | coerced number |
//!
//! Every field is checked. A field's chain stops at its first failure, but
//! failures are collected across fields, and entry failures are reported
//! together with a list-length failure.

use serde_json::Value;
use techform_core::{
    FieldErrors, FieldKey, Knowledge, TechEntry, TechField, UserRecord, ValidationOutcome,
};

use crate::config::{ConfigError, SchemaConfig};
use crate::raw::RawInput;
use crate::rules::RuleChain;
use crate::transform::{coerce_knowledge, is_email_shape, transform_email, transform_name};

pub const NAME_NOT_STRING: &str = "name must be a string";
pub const NAME_REQUIRED: &str = "name is required";
pub const EMAIL_NOT_STRING: &str = "email must be a string";
pub const EMAIL_REQUIRED: &str = "email is required";
pub const EMAIL_INVALID: &str = "invalid email format";
pub const PASSWORD_NOT_STRING: &str = "password must be a string";
pub const TECHS_NOT_LIST: &str = "techs must be a list";
pub const ENTRY_NOT_OBJECT: &str = "technology entry must be an object";
pub const TITLE_NOT_STRING: &str = "title must be a string";
pub const TITLE_REQUIRED: &str = "title is required";
pub const KNOWLEDGE_NOT_NUMBER: &str = "knowledge must be a number";

/// A string field: shape check, rule chain, optional transform.
struct TextField {
    type_message: &'static str,
    rules: RuleChain<str>,
    transform: Option<fn(&str) -> String>,
}

impl TextField {
    fn apply(&self, raw: Option<&Value>) -> Result<String, String> {
        // A form input always submits a string; absent means empty.
        let text = match raw {
            None | Some(Value::Null) => "",
            Some(Value::String(s)) => s.as_str(),
            Some(_) => return Err(self.type_message.to_string()),
        };
        self.rules.check(text).map_err(str::to_string)?;
        Ok(match self.transform {
            Some(transform) => transform(text),
            None => text.to_string(),
        })
    }
}

/// A numeric field: coercion, then rule chain over the coerced value.
struct NumberField {
    type_message: &'static str,
    rules: RuleChain<f64>,
}

impl NumberField {
    fn apply(&self, raw: Option<&Value>) -> Result<f64, String> {
        let value = coerce_knowledge(raw).ok_or_else(|| self.type_message.to_string())?;
        self.rules.check(&value).map_err(str::to_string)?;
        Ok(value)
    }
}

/// The user record schema.
pub struct UserSchema {
    config: SchemaConfig,
    name: TextField,
    email: TextField,
    password: TextField,
    title: TextField,
    knowledge: NumberField,
    length_message: String,
}

impl std::fmt::Debug for UserSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserSchema")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for UserSchema {
    fn default() -> Self {
        Self::build(SchemaConfig::default())
    }
}

impl UserSchema {
    /// Build the schema for a validated configuration.
    pub fn new(config: SchemaConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SchemaConfig) -> Self {
        let password_min = config.password_min_len;
        let (knowledge_min, knowledge_max) = (config.knowledge_min, config.knowledge_max);

        let name = TextField {
            type_message: NAME_NOT_STRING,
            rules: RuleChain::new().rule(NAME_REQUIRED, |s: &str| !s.trim().is_empty()),
            transform: Some(transform_name),
        };
        let email = TextField {
            type_message: EMAIL_NOT_STRING,
            rules: RuleChain::new()
                .rule(EMAIL_REQUIRED, |s: &str| !s.is_empty())
                .rule(EMAIL_INVALID, is_email_shape),
            transform: Some(transform_email),
        };
        let password = TextField {
            type_message: PASSWORD_NOT_STRING,
            rules: RuleChain::new().rule(
                format!("password must be at least {password_min} characters"),
                move |s: &str| s.chars().count() >= password_min,
            ),
            transform: None,
        };
        let title = TextField {
            type_message: TITLE_NOT_STRING,
            rules: RuleChain::new().rule(TITLE_REQUIRED, |s: &str| !s.trim().is_empty()),
            transform: None,
        };
        let knowledge = NumberField {
            type_message: KNOWLEDGE_NOT_NUMBER,
            rules: RuleChain::new()
                .rule(KNOWLEDGE_NOT_NUMBER, |v: &f64| v.is_finite())
                .rule(
                    format!(
                        "knowledge must be between {} and {}",
                        Knowledge::new(knowledge_min),
                        Knowledge::new(knowledge_max),
                    ),
                    move |v: &f64| (knowledge_min..=knowledge_max).contains(v),
                ),
        };
        let length_message = format!("insert at least {} technologies", config.min_techs);

        Self {
            config,
            name,
            email,
            password,
            title,
            knowledge,
            length_message,
        }
    }

    /// The limits this schema was built with.
    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Validate raw input, returning the transformed record or every failure.
    pub fn validate(&self, raw: &RawInput) -> ValidationOutcome {
        let mut errors = FieldErrors::new();

        let name = collect(
            &mut errors,
            FieldKey::Name,
            self.name.apply(raw.get("name")),
        );
        let email = collect(
            &mut errors,
            FieldKey::Email,
            self.email.apply(raw.get("email")),
        );
        let password = collect(
            &mut errors,
            FieldKey::Password,
            self.password.apply(raw.get("password")),
        );
        let techs = self.validate_techs(raw.get("techs"), &mut errors);

        let outcome = match (name, email, password, techs) {
            (Some(name), Some(email), Some(password), Some(techs)) if errors.is_empty() => {
                ValidationOutcome::Success(UserRecord {
                    name,
                    email,
                    password,
                    techs,
                })
            }
            _ => ValidationOutcome::Failure(errors),
        };

        match &outcome {
            ValidationOutcome::Success(record) => {
                tracing::debug!(techs = record.techs.len(), "submission valid");
            }
            ValidationOutcome::Failure(errors) => {
                let failed: Vec<String> = errors.keys().map(ToString::to_string).collect();
                tracing::debug!(failed = ?failed, "submission rejected");
            }
        }
        outcome
    }

    fn validate_techs(
        &self,
        raw: Option<&Value>,
        errors: &mut FieldErrors,
    ) -> Option<Vec<TechEntry>> {
        let items: &[Value] = match raw {
            None | Some(Value::Null) => &[],
            Some(Value::Array(items)) => items.as_slice(),
            Some(_) => {
                errors.insert(FieldKey::Techs, TECHS_NOT_LIST);
                return None;
            }
        };

        let mut entries = Vec::with_capacity(items.len());
        let mut all_valid = true;
        for (index, item) in items.iter().enumerate() {
            match self.validate_entry(index, item, errors) {
                Some(entry) => entries.push(entry),
                None => all_valid = false,
            }
        }

        if items.len() < self.config.min_techs {
            errors.insert(FieldKey::Techs, self.length_message.as_str());
            all_valid = false;
        }

        all_valid.then_some(entries)
    }

    fn validate_entry(
        &self,
        index: usize,
        item: &Value,
        errors: &mut FieldErrors,
    ) -> Option<TechEntry> {
        let Value::Object(fields) = item else {
            errors.insert(FieldKey::tech(index, TechField::Title), ENTRY_NOT_OBJECT);
            return None;
        };

        let title = collect(
            errors,
            FieldKey::tech(index, TechField::Title),
            self.title.apply(fields.get("title")),
        );
        let knowledge = collect(
            errors,
            FieldKey::tech(index, TechField::Knowledge),
            self.knowledge.apply(fields.get("knowledge")),
        );

        Some(TechEntry {
            title: title?,
            knowledge: Knowledge::new(knowledge?),
        })
    }
}

fn collect<T>(errors: &mut FieldErrors, key: FieldKey, result: Result<T, String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(message) => {
            errors.insert(key, message);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawInput {
        RawInput::from_json(value).unwrap()
    }

    fn valid_input() -> Value {
        json!({
            "name": "ana",
            "email": "ana@x.com",
            "password": "123456",
            "techs": [
                {"title": "React", "knowledge": "80"},
                {"title": "Node", "knowledge": "70"}
            ]
        })
    }

    fn errors_of(outcome: ValidationOutcome) -> FieldErrors {
        match outcome {
            ValidationOutcome::Failure(errors) => errors,
            ValidationOutcome::Success(record) => panic!("Expected Failure, got: {record:?}"),
        }
    }

    #[test]
    fn test_valid_submission_is_transformed() {
        let outcome = UserSchema::default().validate(&raw(valid_input()));
        let record = outcome.record().expect("valid input");
        assert_eq!(record.name, "Ana");
        assert_eq!(record.email, "ana@x.com");
        assert_eq!(record.password, "123456");
        assert_eq!(record.techs.len(), 2);
        assert_eq!(record.techs[0].title, "React");
        assert_eq!(record.techs[0].knowledge, Knowledge::new(80.0));
        assert_eq!(record.techs[1].knowledge, Knowledge::new(70.0));
    }

    #[test]
    fn test_failures_collected_across_fields() {
        let outcome = UserSchema::default().validate(&raw(json!({
            "name": "maria silva",
            "email": "M@X.COM",
            "password": "12345",
            "techs": [{"title": "React", "knowledge": "80"}]
        })));
        let errors = errors_of(outcome);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get(&FieldKey::Password),
            Some("password must be at least 6 characters")
        );
        assert_eq!(
            errors.get(&FieldKey::Techs),
            Some("insert at least 2 technologies")
        );
        assert!(!errors.contains(&FieldKey::Name));
        assert!(!errors.contains(&FieldKey::Email));
    }

    #[test]
    fn test_email_first_failing_rule_wins() {
        let schema = UserSchema::default();
        let mut input = valid_input();
        input["email"] = json!("");
        assert_eq!(
            schema.validate(&raw(input.clone())).message(&FieldKey::Email),
            Some(EMAIL_REQUIRED)
        );
        input["email"] = json!("not-an-email");
        assert_eq!(
            schema.validate(&raw(input)).message(&FieldKey::Email),
            Some(EMAIL_INVALID)
        );
    }

    #[test]
    fn test_missing_and_blank_name() {
        let schema = UserSchema::default();
        let mut input = valid_input();
        input.as_object_mut().unwrap().remove("name");
        assert_eq!(
            schema.validate(&raw(input.clone())).message(&FieldKey::Name),
            Some(NAME_REQUIRED)
        );
        input["name"] = json!("   ");
        assert_eq!(
            schema.validate(&raw(input)).message(&FieldKey::Name),
            Some(NAME_REQUIRED)
        );
    }

    #[test]
    fn test_wrong_shapes_are_field_errors() {
        let outcome = UserSchema::default().validate(&raw(json!({
            "name": 42,
            "email": ["a@b.co"],
            "password": true,
            "techs": "React"
        })));
        let errors = errors_of(outcome);
        assert_eq!(errors.get(&FieldKey::Name), Some(NAME_NOT_STRING));
        assert_eq!(errors.get(&FieldKey::Email), Some(EMAIL_NOT_STRING));
        assert_eq!(errors.get(&FieldKey::Password), Some(PASSWORD_NOT_STRING));
        assert_eq!(errors.get(&FieldKey::Techs), Some(TECHS_NOT_LIST));
    }

    #[test]
    fn test_knowledge_out_of_range_keyed_by_position() {
        let mut input = valid_input();
        input["techs"][0]["knowledge"] = json!("150");
        let errors = errors_of(UserSchema::default().validate(&raw(input)));
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(&FieldKey::tech(0, TechField::Knowledge)),
            Some("knowledge must be between 1 and 100")
        );
    }

    #[test]
    fn test_knowledge_bounds_inclusive() {
        let schema = UserSchema::default();
        for (value, ok) in [
            ("1", true),
            ("100", true),
            ("0", false),
            ("100.5", false),
            ("", false),
        ] {
            let mut input = valid_input();
            input["techs"][1]["knowledge"] = json!(value);
            assert_eq!(schema.validate(&raw(input)).is_success(), ok, "knowledge {value:?}");
        }
    }

    #[test]
    fn test_knowledge_not_a_number() {
        let schema = UserSchema::default();
        for value in [json!("lots"), json!("NaN"), json!("inf"), json!(false)] {
            let mut input = valid_input();
            input["techs"][0]["knowledge"] = value.clone();
            assert_eq!(
                schema
                    .validate(&raw(input))
                    .message(&FieldKey::tech(0, TechField::Knowledge)),
                Some(KNOWLEDGE_NOT_NUMBER),
                "knowledge {value}"
            );
        }
    }

    #[test]
    fn test_entry_errors_and_length_error_reported_together() {
        let errors = errors_of(UserSchema::default().validate(&raw(json!({
            "name": "ana",
            "email": "ana@x.com",
            "password": "123456",
            "techs": [{"title": "", "knowledge": 0}]
        }))));
        assert_eq!(errors.get(&FieldKey::tech(0, TechField::Title)), Some(TITLE_REQUIRED));
        assert!(errors.contains(&FieldKey::tech(0, TechField::Knowledge)));
        assert!(errors.contains(&FieldKey::Techs));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_non_object_entry() {
        let mut input = valid_input();
        input["techs"][1] = json!("Node");
        let errors = errors_of(UserSchema::default().validate(&raw(input)));
        assert_eq!(errors.get(&FieldKey::tech(1, TechField::Title)), Some(ENTRY_NOT_OBJECT));
        assert!(!errors.contains(&FieldKey::Techs));
    }

    #[test]
    fn test_missing_techs_fails_length() {
        let mut input = valid_input();
        input.as_object_mut().unwrap().remove("techs");
        let errors = errors_of(UserSchema::default().validate(&raw(input)));
        assert_eq!(errors.get(&FieldKey::Techs), Some("insert at least 2 technologies"));
    }

    #[test]
    fn test_transforms_do_not_run_on_failure() {
        let mut input = valid_input();
        input["password"] = json!("123");
        let outcome = UserSchema::default().validate(&raw(input));
        assert!(outcome.record().is_none());
        assert!(!outcome.errors().unwrap().contains(&FieldKey::Name));
    }

    #[test]
    fn test_password_counts_characters() {
        let mut input = valid_input();
        input["password"] = json!("ééééé");
        assert!(UserSchema::default().validate(&raw(input.clone())).errors().is_some());
        input["password"] = json!("éééééé");
        assert!(UserSchema::default().validate(&raw(input)).is_success());
    }

    #[test]
    fn test_configured_limits_render_into_messages() {
        let config = SchemaConfig {
            password_min_len: 8,
            min_techs: 3,
            knowledge_min: 0.0,
            knowledge_max: 10.0,
        };
        let schema = UserSchema::new(config).unwrap();
        let mut input = valid_input();
        input["password"] = json!("1234567");
        input["techs"][0]["knowledge"] = json!("11");
        let errors = errors_of(schema.validate(&raw(input)));
        assert_eq!(
            errors.get(&FieldKey::Password),
            Some("password must be at least 8 characters")
        );
        assert_eq!(errors.get(&FieldKey::Techs), Some("insert at least 3 technologies"));
        assert_eq!(
            errors.get(&FieldKey::tech(0, TechField::Knowledge)),
            Some("knowledge must be between 0 and 10")
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SchemaConfig {
            knowledge_min: 5.0,
            knowledge_max: 1.0,
            ..SchemaConfig::default()
        };
        assert!(UserSchema::new(config).is_err());
    }
}
