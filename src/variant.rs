use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Variant selectors as declared on a field. Several may be set at once; the
/// winner is decided by [`VariantFlags::classify`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct VariantFlags {
    pub file: bool,
    pub checkbox: bool,
    pub radio: bool,
    pub radios: bool,
    pub checkboxes: bool,
    pub textarea: bool,
    pub select: bool,
    pub number: bool,
    pub password: bool,
    pub date: bool,
}

/// The render branch a field follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    File,
    Checkbox,
    Radio,
    RadioGroup,
    CheckboxGroup,
    Input(InputKind),
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::File => "file",
            Variant::Checkbox => "checkbox",
            Variant::Radio => "radio",
            Variant::RadioGroup => "radios",
            Variant::CheckboxGroup => "checkboxes",
            Variant::Input(_) => "input",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ElementKind {
    #[default]
    Input,
    Textarea,
    Select,
}

impl ElementKind {
    pub fn tag(self) -> &'static str {
        match self {
            ElementKind::Input => "input",
            ElementKind::Textarea => "textarea",
            ElementKind::Select => "select",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputType {
    #[default]
    Text,
    Number,
    Password,
    Date,
}

impl InputType {
    pub fn as_str(self) -> &'static str {
        match self {
            InputType::Text => "text",
            InputType::Number => "number",
            InputType::Password => "password",
            InputType::Date => "date",
        }
    }
}

/// Rendering hints for the generic branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputKind {
    pub element: ElementKind,
    pub input_type: InputType,
}

impl VariantFlags {
    pub fn file() -> Self {
        Self {
            file: true,
            ..Self::default()
        }
    }

    pub fn checkbox() -> Self {
        Self {
            checkbox: true,
            ..Self::default()
        }
    }

    pub fn radio() -> Self {
        Self {
            radio: true,
            ..Self::default()
        }
    }

    pub fn radios() -> Self {
        Self {
            radios: true,
            ..Self::default()
        }
    }

    pub fn checkboxes() -> Self {
        Self {
            checkboxes: true,
            ..Self::default()
        }
    }

    /// First match wins: file, checkbox, radio, radio group, checkbox group,
    /// then the generic input. Groups only activate with options present.
    pub fn classify(&self, has_options: bool) -> Variant {
        let radio_group = self.radios && has_options;
        let checkbox_group = self.checkboxes && has_options;
        match (
            self.file,
            self.checkbox,
            self.radio,
            radio_group,
            checkbox_group,
        ) {
            (true, _, _, _, _) => Variant::File,
            (false, true, _, _, _) => Variant::Checkbox,
            (false, false, true, _, _) => Variant::Radio,
            (false, false, false, true, _) => Variant::RadioGroup,
            (false, false, false, false, true) => Variant::CheckboxGroup,
            (false, false, false, false, false) => Variant::Input(self.input_kind()),
        }
    }

    fn input_kind(&self) -> InputKind {
        let element = match (self.select, self.textarea) {
            (true, _) => ElementKind::Select,
            (false, true) => ElementKind::Textarea,
            (false, false) => ElementKind::Input,
        };
        let input_type = match (self.date, self.password, self.number) {
            (true, _, _) => InputType::Date,
            (false, true, _) => InputType::Password,
            (false, false, true) => InputType::Number,
            (false, false, false) => InputType::Text,
        };
        InputKind {
            element,
            input_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkbox_beats_radio_group() {
        let flags = VariantFlags {
            checkbox: true,
            radios: true,
            ..VariantFlags::default()
        };
        assert_eq!(flags.classify(true), Variant::Checkbox);
    }

    #[test]
    fn file_beats_everything() {
        let flags = VariantFlags {
            file: true,
            checkbox: true,
            radio: true,
            radios: true,
            checkboxes: true,
            textarea: true,
            ..VariantFlags::default()
        };
        assert_eq!(flags.classify(true), Variant::File);
    }

    #[test]
    fn groups_need_options() {
        assert_eq!(
            VariantFlags::radios().classify(false),
            Variant::Input(InputKind::default())
        );
        assert_eq!(VariantFlags::radios().classify(true), Variant::RadioGroup);
        assert_eq!(
            VariantFlags::checkboxes().classify(true),
            Variant::CheckboxGroup
        );
        let both = VariantFlags {
            radios: true,
            checkboxes: true,
            ..VariantFlags::default()
        };
        assert_eq!(both.classify(true), Variant::RadioGroup);
    }

    #[test]
    fn generic_modifiers_set_hints() {
        let flags = VariantFlags {
            textarea: true,
            select: true,
            number: true,
            date: true,
            ..VariantFlags::default()
        };
        assert_eq!(
            flags.classify(false),
            Variant::Input(InputKind {
                element: ElementKind::Select,
                input_type: InputType::Date,
            })
        );
        let password = VariantFlags {
            password: true,
            number: true,
            ..VariantFlags::default()
        };
        assert_eq!(
            password.classify(false),
            Variant::Input(InputKind {
                element: ElementKind::Input,
                input_type: InputType::Password,
            })
        );
    }
}
