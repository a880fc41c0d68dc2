//! Property name tables and attribute value serialization.
//!
//! Every property name on a component falls into one of three groups:
//! recognized tag attributes, event handler names, or structural names owned
//! by the toolkit itself. Any other name denotes an inline named child when
//! the implicit child protocol is in effect.

use indexmap::IndexMap;
use smartstring::{LazyCompact, SmartString};

pub type ClassSet = IndexMap<SmartString<LazyCompact>, bool>;

/// Value of a recognized tag attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(SmartString<LazyCompact>),
    Number(f64),
    Flag(bool),
    /// Named classes toggled on or off; serialized as a space-joined `class`
    /// attribute containing the enabled names.
    ClassSet(ClassSet),
}

impl AttrValue {
    /// Rendered attribute value, or `None` when the attribute is omitted
    /// entirely (a flag set to false).
    pub fn render(&self) -> Option<SmartString<LazyCompact>> {
        match self {
            AttrValue::Text(text) => Some(text.clone()),
            AttrValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(SmartString::from(format!("{}", *n as i64)))
                } else {
                    Some(SmartString::from(format!("{n}")))
                }
            }
            AttrValue::Flag(true) => Some(SmartString::from("true")),
            AttrValue::Flag(false) => None,
            AttrValue::ClassSet(classes) => {
                let mut out = SmartString::new();
                for (name, enabled) in classes {
                    if !enabled {
                        continue;
                    }
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push_str(name);
                }
                Some(out)
            }
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(SmartString::from(value))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(SmartString::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Number(value)
    }
}

impl From<i32> for AttrValue {
    fn from(value: i32) -> Self {
        AttrValue::Number(value as f64)
    }
}

impl From<u32> for AttrValue {
    fn from(value: u32) -> Self {
        AttrValue::Number(value as f64)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Flag(value)
    }
}

/// Property names the toolkit consumes itself. Never attributes, never
/// children.
pub fn is_structural_name(name: &str) -> bool {
    matches!(
        name,
        "id" | "style"
            | "content"
            | "child_set"
            | "child_list"
            | "dynamic_handlers"
            | "skip_top_node"
            | "skip_existing_children"
            | "only_child_keys"
    )
}

/// Recognized event handler property names.
pub fn is_handler_name(name: &str) -> bool {
    matches!(
        name,
        "on_click"
            | "on_double_click"
            | "on_mouse_down"
            | "on_mouse_up"
            | "on_mouse_over"
            | "on_mouse_out"
            | "on_mouse_move"
            | "on_key_down"
            | "on_key_up"
            | "on_key_press"
            | "on_change"
            | "on_focus"
            | "on_blur"
            | "on_submit"
            | "on_scroll"
    )
}

/// Recognized tag attribute property names.
pub fn is_tag_attr_name(name: &str) -> bool {
    matches!(
        name,
        "class_set"
            | "width"
            | "height"
            | "value"
            | "href"
            | "src"
            | "alt"
            | "title"
            | "placeholder"
            | "name"
            | "input_type"
            | "checked"
            | "disabled"
            | "tab_index"
            | "cols"
            | "rows"
            | "colspan"
            | "rowspan"
    )
}

/// Whether `name` is reserved, i.e. cannot denote an inline named child.
pub fn is_reserved_name(name: &str) -> bool {
    is_structural_name(name) || is_handler_name(name) || is_tag_attr_name(name)
}

/// Markup-facing name for a recognized attribute property.
pub fn rendered_attr_name(name: &str) -> &str {
    match name {
        "class_set" => "class",
        "input_type" => "type",
        "tab_index" => "tabindex",
        other => other,
    }
}
