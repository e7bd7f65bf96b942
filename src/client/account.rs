//! Account payloads and server error normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registration form submitted to `POST /user`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl Account {
    /// Create an account form whose confirmation matches the password.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            name: name.into(),
            email: email.into(),
            password_confirmation: password.clone(),
            password,
        }
    }

    pub fn with_confirmation(mut self, confirmation: impl Into<String>) -> Self {
        self.password_confirmation = confirmation.into();
        self
    }
}

/// Per-field account errors. Every field is always present, possibly empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountErrors {
    pub name: Vec<String>,
    pub email: Vec<String>,
    pub password: Vec<String>,
    pub password_confirmation: Vec<String>,
    /// Messages not tied to a form field.
    pub base: Vec<String>,
}

impl AccountErrors {
    /// Normalize a failed response body.
    ///
    /// Accepts a field mapping (top-level or under `error.details`) or a flat
    /// array of full messages. Anything else becomes a single `base` message.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => Self::from_object(map, body),
            Ok(Value::Array(items)) => Self {
                base: items.iter().map(message_text).collect(),
                ..Self::default()
            },
            _ => Self::base_only(body),
        }
    }

    fn base_only(message: &str) -> Self {
        Self {
            base: vec![message.to_string()],
            ..Self::default()
        }
    }

    fn from_object(mut map: Map<String, Value>, body: &str) -> Self {
        let envelope = match map.remove("error") {
            Some(Value::Object(envelope)) => envelope,
            Some(other) => return Self::base_only(&message_text(&other)),
            None => {
                let errors = Self::from_fields(map);
                return if errors.is_empty() {
                    Self::base_only(body)
                } else {
                    errors
                };
            }
        };

        if let Some(Value::Object(details)) = envelope.get("details") {
            let errors = Self::from_fields(details.clone());
            if !errors.is_empty() {
                return errors;
            }
        }
        match envelope.get("message") {
            Some(message) => Self::base_only(&message_text(message)),
            None => Self::base_only(body),
        }
    }

    fn from_fields(map: Map<String, Value>) -> Self {
        let mut errors = Self::default();
        for (field, value) in map {
            let messages = messages(&value);
            match field.as_str() {
                "name" => errors.name.extend(messages),
                "email" => errors.email.extend(messages),
                "password" => errors.password.extend(messages),
                "password_confirmation" => errors.password_confirmation.extend(messages),
                "base" => errors.base.extend(messages),
                other => errors
                    .base
                    .extend(messages.into_iter().map(|m| format!("{} {}", humanize(other), m))),
            }
        }
        errors
    }

    /// Whether no messages are present.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.email.is_empty()
            && self.password.is_empty()
            && self.password_confirmation.is_empty()
            && self.base.is_empty()
    }

    /// All messages, with field messages prefixed by the field label.
    pub fn full_messages(&self) -> Vec<String> {
        let fields = [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Password", &self.password),
            ("Password confirmation", &self.password_confirmation),
        ];
        let mut out: Vec<String> = fields
            .iter()
            .flat_map(|(label, msgs)| msgs.iter().map(move |m| format!("{label} {m}")))
            .collect();
        out.extend(self.base.iter().cloned());
        out
    }
}

impl std::fmt::Display for AccountErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

fn messages(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().map(message_text).collect(),
        Value::Null => vec![],
        other => vec![message_text(other)],
    }
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn humanize(field: &str) -> String {
    let spaced = field.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => spaced,
    }
}
