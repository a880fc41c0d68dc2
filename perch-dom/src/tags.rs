//! Native tag component factories.
//!
//! Properties injected into these constructors correspond to tag attributes,
//! style, event handlers, or contained children. Children may be given under
//! any non-reserved name, or through `child_set` / `child_list`; `child_set`
//! is the most expressive form since keys carry identity across renders.

use crate::component::{Component, Props, TagDef};

pub fn div(props: Props) -> Component {
    Component::new(TagDef::new("div"), props)
}

pub fn span(props: Props) -> Component {
    Component::new(TagDef::new("span"), props)
}

pub fn p(props: Props) -> Component {
    Component::new(TagDef::new("p"), props)
}

pub fn pre(props: Props) -> Component {
    Component::new(TagDef::new("pre"), props)
}

pub fn ul(props: Props) -> Component {
    Component::new(TagDef::new("ul"), props)
}

pub fn ol(props: Props) -> Component {
    Component::new(TagDef::new("ol"), props)
}

pub fn li(props: Props) -> Component {
    Component::new(TagDef::new("li"), props)
}

pub fn dl(props: Props) -> Component {
    Component::new(TagDef::new("dl"), props)
}

pub fn dt(props: Props) -> Component {
    Component::new(TagDef::new("dt"), props)
}

pub fn dd(props: Props) -> Component {
    Component::new(TagDef::new("dd"), props)
}

pub fn h1(props: Props) -> Component {
    Component::new(TagDef::new("h1"), props)
}

pub fn h2(props: Props) -> Component {
    Component::new(TagDef::new("h2"), props)
}

pub fn h3(props: Props) -> Component {
    Component::new(TagDef::new("h3"), props)
}

pub fn h4(props: Props) -> Component {
    Component::new(TagDef::new("h4"), props)
}

pub fn h5(props: Props) -> Component {
    Component::new(TagDef::new("h5"), props)
}

pub fn h6(props: Props) -> Component {
    Component::new(TagDef::new("h6"), props)
}

pub fn a(props: Props) -> Component {
    Component::new(TagDef::new("a"), props)
}

pub fn i(props: Props) -> Component {
    Component::new(TagDef::new("i"), props)
}

pub fn img(props: Props) -> Component {
    Component::new(TagDef::new("img"), props)
}

pub fn label(props: Props) -> Component {
    Component::new(TagDef::new("label"), props)
}

pub fn button(props: Props) -> Component {
    Component::new(TagDef::new("button"), props)
}

pub fn input(props: Props) -> Component {
    Component::new(TagDef::new("input"), props)
}

pub fn text_input(props: Props) -> Component {
    Component::new(TagDef::with_tag_text("input", " type='text'"), props)
}

pub fn textarea(props: Props) -> Component {
    Component::new(TagDef::new("textarea"), props)
}

pub fn table(props: Props) -> Component {
    Component::new(TagDef::new("table"), props)
}

pub fn tr(props: Props) -> Component {
    Component::new(TagDef::new("tr"), props)
}

pub fn th(props: Props) -> Component {
    Component::new(TagDef::new("th"), props)
}

pub fn td(props: Props) -> Component {
    Component::new(TagDef::new("td"), props)
}

pub fn iframe(props: Props) -> Component {
    Component::new(TagDef::new("iframe"), props)
}

pub fn hr(props: Props) -> Component {
    Component::new(TagDef::new("hr"), props)
}

pub fn br(props: Props) -> Component {
    Component::new(TagDef::new("br"), props)
}
