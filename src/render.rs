use serde_json::Value;

use crate::{
    binding::{Binding, Interaction, checkbox_checked, projected_value, radio_checked},
    descriptor::{FieldDescription, FieldIdentity, parse_description},
    error::UsageError,
    markup::Element,
    props::{ChangeCallback, FieldOption, FieldProps},
    store::{FormStore, StoreSnapshot},
    theme::{FieldClasses, join_classes, resolve_classes},
    variant::{ElementKind, InputKind, Variant},
    visibility::error_visible,
};

const GROUP_WRAPPER_CLASS: &str = "ez-field-full";

/// One rendered field block plus what is needed to route interactions back
/// into the store.
#[derive(Clone)]
pub struct RenderedField {
    pub identity: FieldIdentity,
    pub variant: Variant,
    pub classes: FieldClasses,
    pub error_visible: bool,
    pub root: Element,
    on_change: Option<ChangeCallback>,
}

impl std::fmt::Debug for RenderedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedField")
            .field("identity", &self.identity)
            .field("variant", &self.variant)
            .field("classes", &self.classes)
            .field("error_visible", &self.error_visible)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl RenderedField {
    /// Every element carrying a binding, in document order.
    pub fn controls(&self) -> Vec<&Element> {
        self.root
            .descendants()
            .into_iter()
            .filter(|element| element.binding.is_some())
            .collect()
    }

    /// Checkbox or radio control owning `option`.
    pub fn control_for(&self, option: &Value) -> Option<&Element> {
        self.controls().into_iter().find(|element| {
            element
                .binding
                .as_ref()
                .and_then(Binding::option_value)
                .is_some_and(|value| value == option)
        })
    }

    pub fn binding_for(&self, option: &Value) -> Option<&Binding> {
        self.control_for(option)
            .and_then(|element| element.binding.as_ref())
    }

    /// Binding of the first control, e.g. the plain input of a generic field.
    pub fn primary_binding(&self) -> Option<&Binding> {
        self.controls()
            .into_iter()
            .find_map(|element| element.binding.as_ref())
    }

    /// Route an interaction through the binders and the field's `on_change`.
    pub fn interact(
        &self,
        store: &mut dyn FormStore,
        binding: &Binding,
        interaction: Interaction,
    ) -> Result<Value, UsageError> {
        binding.dispatch(store, interaction, self.on_change.as_ref())
    }

    pub fn error_message<'a>(&self, snapshot: &'a StoreSnapshot) -> Option<&'a str> {
        if self.error_visible {
            snapshot.error(&self.identity.field_name)
        } else {
            None
        }
    }

    pub fn to_html(&self) -> String {
        self.root.to_html()
    }
}

struct RenderContext<'a> {
    snapshot: &'a StoreSnapshot,
    identity: &'a FieldIdentity,
    classes: &'a FieldClasses,
    props: &'a FieldProps,
    error_visible: bool,
}

impl RenderContext<'_> {
    fn name(&self) -> &str {
        &self.identity.field_name
    }

    fn label(&self) -> Element {
        Element::new("label")
            .attr("for", self.name())
            .class(self.classes.label.clone())
            .text(self.identity.label.clone())
    }

    fn invalid_class(&self) -> &str {
        if self.error_visible {
            &self.classes.invalid_control
        } else {
            ""
        }
    }

    fn file(&self) -> Element {
        Element::new("input")
            .attr("type", "file")
            .attr("id", self.name())
            .attr("name", self.name())
            .class(self.classes.control.clone())
            .bind(Binding::File {
                field: self.name().to_string(),
            })
    }

    fn checkbox(&self, option: Value, label: &str) -> Element {
        let checked = checkbox_checked(self.snapshot, self.name(), &option);
        self.choice("checkbox", checked, label, Binding::Toggle {
            field: self.name().to_string(),
            value: option,
        })
    }

    fn radio(&self, option: Value, label: &str) -> Element {
        let checked = radio_checked(self.snapshot, self.name(), &option);
        self.choice("radio", checked, label, Binding::Choose {
            field: self.name().to_string(),
            value: option,
        })
    }

    fn choice(&self, kind: &'static str, checked: bool, label: &str, binding: Binding) -> Element {
        let value = binding.option_value().map(value_text).unwrap_or_default();
        let input = Element::new("input")
            .attr("type", kind)
            .attr("name", self.name())
            .attr("value", value)
            .flag("checked", checked)
            .bind(binding);
        Element::new("label")
            .child(input)
            .text(format!("\u{a0}{label}"))
    }

    fn group(&self, build: impl Fn(&Self, &FieldOption) -> Element) -> Vec<Element> {
        let items = self
            .props
            .options
            .iter()
            .map(|option| build(self, option))
            .collect::<Vec<_>>();
        vec![
            self.label(),
            Element::new("div")
                .class(join_classes([GROUP_WRAPPER_CLASS, self.invalid_class()]))
                .children(items),
        ]
    }

    fn generic(&self, kind: InputKind) -> Vec<Element> {
        let current = projected_value(self.snapshot, self.name());
        let mut control = Element::new(kind.element.tag());
        if kind.element == ElementKind::Input {
            control = control.attr("type", kind.input_type.as_str());
        }
        control = control.attr("id", self.name()).attr("name", self.name());
        if kind.element != ElementKind::Select
            && let Some(placeholder) = &self.identity.placeholder
        {
            control = control.attr("placeholder", placeholder.clone());
        }
        control = match kind.element {
            ElementKind::Input => control.attr("value", current),
            ElementKind::Textarea => control.text(current),
            ElementKind::Select => control.children(self.props.options.iter().map(|option| {
                let selected = radio_checked(self.snapshot, self.name(), &option.value.to_value());
                Element::new("option")
                    .attr("value", option.value.to_string())
                    .flag("selected", selected)
                    .text(option.label.clone())
            })),
        };
        control = control
            .class(join_classes([
                self.classes.control.as_str(),
                self.invalid_class(),
            ]))
            .bind(Binding::Change {
                field: self.name().to_string(),
                validator: self.props.validate.clone(),
            });
        vec![self.label(), control]
    }
}

/// Render one field against the current store state.
///
/// Fails with [`UsageError`] when the description yields no field name.
pub fn render_field(
    store: &dyn FormStore,
    description: &FieldDescription,
    props: &FieldProps,
) -> Result<RenderedField, UsageError> {
    let identity = parse_description(description)?;
    let snapshot = store.snapshot();
    let variant = props.flags.classify(!props.options.is_empty());
    let classes = FieldClasses::resolve(
        resolve_classes(snapshot.config.ez_use.as_deref()),
        &snapshot.config.ez_css,
        &props.css,
    );
    let visible = error_visible(snapshot, &identity.field_name);
    tracing::debug!(
        field = %identity.field_name,
        variant = variant.name(),
        error_visible = visible,
        "rendering field"
    );

    let ctx = RenderContext {
        snapshot,
        identity: &identity,
        classes: &classes,
        props,
        error_visible: visible,
    };
    let body = match variant {
        Variant::File => vec![ctx.file()],
        Variant::Checkbox => vec![ctx.checkbox(props.own_value(), &identity.label)],
        Variant::Radio => vec![ctx.radio(props.own_value(), &identity.label)],
        Variant::RadioGroup => {
            ctx.group(|ctx, option| ctx.radio(option.value.to_value(), &option.label))
        }
        Variant::CheckboxGroup => {
            ctx.group(|ctx, option| ctx.checkbox(option.value.to_value(), &option.label))
        }
        Variant::Input(kind) => ctx.generic(kind),
    };

    let mut root = Element::new("div").class(classes.group.clone()).children(body);
    if visible && let Some(message) = snapshot.error(&identity.field_name) {
        root = root.child(
            Element::new("span")
                .class(classes.error.clone())
                .text(message),
        );
    }

    Ok(RenderedField {
        identity,
        variant,
        classes,
        error_visible: visible,
        root,
        on_change: props.on_change.clone(),
    })
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
