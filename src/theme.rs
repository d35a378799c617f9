use std::{fmt, str::FromStr};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Built-in class tables. Anything else falls back to [`ThemeName::Default`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Default,
    Bootstrap,
    Spectre,
}

impl ThemeName {
    /// Lenient lookup used by the config channel: unknown or missing names map
    /// to the default theme.
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::debug!(theme = raw, "unrecognized theme, using default classes");
                ThemeName::Default
            }),
            None => ThemeName::Default,
        }
    }

    pub fn classes(self) -> ClassSet {
        let mut classes = ClassSet {
            group: "",
            label: "ez-label",
            control: "ez-field",
            invalid_control: "ez-field-error",
            error: "ez-error",
        };
        match self {
            ThemeName::Default => {}
            ThemeName::Bootstrap => {
                classes.group = "form-group";
                classes.control = "form-control";
                classes.invalid_control = "is-invalid";
                classes.error = "invalid-feedback";
            }
            ThemeName::Spectre => {
                classes.group = "form-group";
                classes.label = "form-label";
                classes.control = "form-input";
                classes.invalid_control = "is-error";
                classes.error = "form-input-hint";
            }
        }
        classes
    }
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "default" => Ok(ThemeName::Default),
            "bootstrap" => Ok(ThemeName::Bootstrap),
            "spectre" => Ok(ThemeName::Spectre),
            other => Err(format!("unknown theme '{other}'")),
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Default => write!(f, "default"),
            ThemeName::Bootstrap => write!(f, "bootstrap"),
            ThemeName::Spectre => write!(f, "spectre"),
        }
    }
}

/// Class names applied to the structural parts of a rendered field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassSet {
    pub group: &'static str,
    pub label: &'static str,
    pub control: &'static str,
    pub invalid_control: &'static str,
    pub error: &'static str,
}

/// Resolve the class table for a theme identifier. Total: never fails.
pub fn resolve_classes(theme: Option<&str>) -> ClassSet {
    ThemeName::resolve(theme).classes()
}

/// Extra classes appended to the theme defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CssOverrides {
    pub label: Option<String>,
    pub control: Option<String>,
    pub error: Option<String>,
}

/// Final class strings for one field after theme and overrides are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldClasses {
    pub group: String,
    pub label: String,
    pub control: String,
    pub invalid_control: String,
    pub error: String,
}

impl FieldClasses {
    /// Per-field overrides beat the per-form bag; whichever is chosen is
    /// appended to the theme default.
    pub fn resolve(base: ClassSet, form: &CssOverrides, field: &CssOverrides) -> Self {
        Self {
            group: base.group.to_string(),
            label: append_extra(base.label, pick(&field.label, &form.label)),
            control: append_extra(base.control, pick(&field.control, &form.control)),
            invalid_control: base.invalid_control.to_string(),
            error: append_extra(base.error, pick(&field.error, &form.error)),
        }
    }
}

fn pick<'a>(primary: &'a Option<String>, fallback: &'a Option<String>) -> Option<&'a str> {
    primary
        .as_deref()
        .filter(|value| !value.is_empty())
        .or_else(|| fallback.as_deref().filter(|value| !value.is_empty()))
}

fn append_extra(base: &str, extra: Option<&str>) -> String {
    match extra {
        Some(extra) => join_classes([base, extra]),
        None => base.to_string(),
    }
}

/// Join class names with single spaces, skipping empty entries.
pub(crate) fn join_classes<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_set() -> ClassSet {
        ClassSet {
            group: "",
            label: "ez-label",
            control: "ez-field",
            invalid_control: "ez-field-error",
            error: "ez-error",
        }
    }

    #[test]
    fn unknown_and_missing_themes_use_defaults() {
        assert_eq!(resolve_classes(None), default_set());
        for name in ["", "Bootstrap", "material", "spectre ", "default"] {
            assert_eq!(resolve_classes(Some(name)), default_set(), "{name:?}");
        }
    }

    #[test]
    fn bootstrap_keeps_default_label() {
        let classes = resolve_classes(Some("bootstrap"));
        assert_eq!(
            classes,
            ClassSet {
                group: "form-group",
                label: "ez-label",
                control: "form-control",
                invalid_control: "is-invalid",
                error: "invalid-feedback",
            }
        );
    }

    #[test]
    fn spectre_overrides_every_part() {
        let classes = resolve_classes(Some("spectre"));
        assert_eq!(
            classes,
            ClassSet {
                group: "form-group",
                label: "form-label",
                control: "form-input",
                invalid_control: "is-error",
                error: "form-input-hint",
            }
        );
    }

    #[test]
    fn field_override_wins_over_form_bag() {
        let form = CssOverrides {
            label: Some("form-wide".into()),
            control: Some("wide-control".into()),
            error: None,
        };
        let field = CssOverrides {
            label: Some("mine".into()),
            control: Some(String::new()),
            error: Some("loud".into()),
        };
        let classes = FieldClasses::resolve(default_set(), &form, &field);
        assert_eq!(classes.label, "ez-label mine");
        assert_eq!(classes.control, "ez-field wide-control");
        assert_eq!(classes.error, "ez-error loud");
    }

    #[test]
    fn no_overrides_leave_theme_defaults() {
        let classes = FieldClasses::resolve(
            resolve_classes(Some("bootstrap")),
            &CssOverrides::default(),
            &CssOverrides::default(),
        );
        assert_eq!(classes.control, "form-control");
        assert_eq!(classes.group, "form-group");
    }
}
