use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::UsageError;

static SLUG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("slug separator pattern is valid"));

/// Content declared between a field's tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ChildContent {
    /// Plain text: used as the label and slugified into the field name.
    Text(String),
    /// A fragment whose parts carry the name and label separately.
    Parts(Vec<ChildPart>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChildPart {
    Name(String),
    Label(String),
    Placeholder(String),
    Text(String),
}

impl From<&str> for ChildContent {
    fn from(value: &str) -> Self {
        ChildContent::Text(value.to_string())
    }
}

impl From<String> for ChildContent {
    fn from(value: String) -> Self {
        ChildContent::Text(value)
    }
}

impl From<Vec<ChildPart>> for ChildContent {
    fn from(parts: Vec<ChildPart>) -> Self {
        ChildContent::Parts(parts)
    }
}

/// Declarative identity input for one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldDescription {
    pub explicit_name: Option<String>,
    pub explicit_label: Option<String>,
    pub explicit_placeholder: Option<String>,
    pub children: Option<ChildContent>,
}

impl FieldDescription {
    pub fn new(children: impl Into<ChildContent>) -> Self {
        Self {
            children: Some(children.into()),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.explicit_name = Some(name.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.explicit_label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.explicit_placeholder = Some(placeholder.into());
        self
    }
}

/// Resolved `{ fieldName, label, placeholder }` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIdentity {
    pub field_name: String,
    pub label: String,
    pub placeholder: Option<String>,
}

#[derive(Debug, Default)]
struct InferredParts {
    name: Option<String>,
    label: Option<String>,
    placeholder: Option<String>,
}

/// Resolve a field's identity. Explicit values win over anything inferred
/// from the children.
pub fn parse_description(description: &FieldDescription) -> Result<FieldIdentity, UsageError> {
    let explicit_name = non_empty(description.explicit_name.as_deref());
    let inferred = match description.children.as_ref() {
        Some(children) => infer_parts(children),
        None => InferredParts::default(),
    };

    if explicit_name.is_none() && inferred.name.is_none() && inferred.label.is_none() {
        return Err(UsageError::MissingChildren);
    }

    let explicit_label = non_empty(description.explicit_label.as_deref()).map(str::to_string);

    // The name follows the children; an explicit label only renames the display.
    let field_name = match explicit_name {
        Some(name) => name.to_string(),
        None => match inferred.name {
            Some(name) => name,
            None => {
                let source = inferred.label.clone().unwrap_or_default();
                let slug = slugify(&source);
                if slug.is_empty() {
                    return Err(UsageError::UnderivableName(source));
                }
                slug
            }
        },
    };

    let label = explicit_label.or(inferred.label);
    let placeholder = non_empty(description.explicit_placeholder.as_deref())
        .map(str::to_string)
        .or(inferred.placeholder);

    Ok(FieldIdentity {
        label: label.unwrap_or_else(|| field_name.clone()),
        field_name,
        placeholder,
    })
}

fn infer_parts(children: &ChildContent) -> InferredParts {
    match children {
        ChildContent::Text(text) => InferredParts {
            label: non_empty(Some(text.as_str())).map(str::to_string),
            ..InferredParts::default()
        },
        ChildContent::Parts(parts) => {
            let mut inferred = InferredParts::default();
            let mut loose_text = Vec::new();
            for part in parts {
                match part {
                    ChildPart::Name(name) => {
                        if inferred.name.is_none() {
                            inferred.name = non_empty(Some(name.as_str())).map(str::to_string);
                        }
                    }
                    ChildPart::Label(label) => {
                        if inferred.label.is_none() {
                            inferred.label = non_empty(Some(label.as_str())).map(str::to_string);
                        }
                    }
                    ChildPart::Placeholder(placeholder) => {
                        if inferred.placeholder.is_none() {
                            inferred.placeholder =
                                non_empty(Some(placeholder.as_str())).map(str::to_string);
                        }
                    }
                    ChildPart::Text(text) => {
                        if let Some(text) = non_empty(Some(text.as_str())) {
                            loose_text.push(text);
                        }
                    }
                }
            }
            if inferred.label.is_none() && !loose_text.is_empty() {
                inferred.label = Some(loose_text.join(" "));
            }
            inferred
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Lowercase the alphanumeric runs of `text` and join them with `_`.
///
/// `"Email Address"` becomes `"email_address"`.
pub fn slugify(text: &str) -> String {
    SLUG_SEPARATORS
        .split(text)
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_child_yields_label_and_slug() {
        let identity = parse_description(&FieldDescription::new("Email Address")).unwrap();
        assert_eq!(identity.field_name, "email_address");
        assert_eq!(identity.label, "Email Address");
        assert_eq!(identity.placeholder, None);
    }

    #[test]
    fn slug_is_deterministic_and_strips_punctuation() {
        assert_eq!(slugify("  First -- Name?! "), "first_name");
        assert_eq!(slugify("Zip Code 2"), "zip_code_2");
        assert_eq!(slugify("Größe"), "größe");
        assert_eq!(slugify("Email Address"), slugify("Email Address"));
    }

    #[test]
    fn explicit_values_win() {
        let description = FieldDescription::new("Email Address")
            .with_name("email")
            .with_label("E-mail")
            .with_placeholder("you@example.com");
        let identity = parse_description(&description).unwrap();
        assert_eq!(identity.field_name, "email");
        assert_eq!(identity.label, "E-mail");
        assert_eq!(identity.placeholder.as_deref(), Some("you@example.com"));
    }

    #[test]
    fn explicit_label_keeps_the_name_derived_from_children() {
        let description = FieldDescription::new("Email Address").with_label("E-mail");
        let identity = parse_description(&description).unwrap();
        assert_eq!(identity.field_name, "email_address");
        assert_eq!(identity.label, "E-mail");
    }

    #[test]
    fn structured_children_are_read_part_by_part() {
        let description = FieldDescription::new(vec![
            ChildPart::Label("Favourite colours".into()),
            ChildPart::Name("colors".into()),
            ChildPart::Placeholder("pick some".into()),
        ]);
        let identity = parse_description(&description).unwrap();
        assert_eq!(identity.field_name, "colors");
        assert_eq!(identity.label, "Favourite colours");
        assert_eq!(identity.placeholder.as_deref(), Some("pick some"));
    }

    #[test]
    fn structured_children_without_name_slug_the_label() {
        let description = FieldDescription::new(vec![
            ChildPart::Text("Home".into()),
            ChildPart::Text("Phone".into()),
        ]);
        let identity = parse_description(&description).unwrap();
        assert_eq!(identity.field_name, "home_phone");
        assert_eq!(identity.label, "Home Phone");
    }

    #[test]
    fn explicit_name_alone_is_enough() {
        let description = FieldDescription::default().with_name("token");
        let identity = parse_description(&description).unwrap();
        assert_eq!(identity.field_name, "token");
        assert_eq!(identity.label, "token");
    }

    #[test]
    fn missing_children_and_name_is_a_usage_error() {
        assert_eq!(
            parse_description(&FieldDescription::default()),
            Err(UsageError::MissingChildren)
        );
        assert_eq!(
            parse_description(&FieldDescription::new("   ")),
            Err(UsageError::MissingChildren)
        );
        assert_eq!(
            parse_description(&FieldDescription::new(Vec::<ChildPart>::new())),
            Err(UsageError::MissingChildren)
        );
    }

    #[test]
    fn punctuation_only_label_cannot_name_a_field() {
        assert_eq!(
            parse_description(&FieldDescription::new("???")),
            Err(UsageError::UnderivableName("???".into()))
        );
    }
}
