//! Maps the `type` keyword of a JSON element to its constructor.

use serde_json::Value;

use crate::document::Fields;
use crate::elements::{
    Button, Element, Group, ImageElement, List, NullElement, Slider, TextElement,
};
use crate::error::{LayoutError, Result};

type Constructor = fn(&Fields<'_>) -> Result<Element>;

/// Every element kind the compiler understands, keyed by `type`.
const REGISTRY: &[(&str, Constructor)] = &[
    ("Root", build_root),
    ("Image", build_image),
    ("Mask", build_mask),
    ("Group", build_group),
    ("Text", build_text),
    ("Button", build_button),
    ("List", build_list),
    ("Slider", build_slider),
    ("Null", build_null),
];

/// Parses one element (and, for group-likes, its whole subtree).
pub fn generate(value: &Value) -> Result<Element> {
    let fields = Fields::new(value)?;
    let type_name = fields.str("type")?;
    let Some(&(_, construct)) = REGISTRY.iter().find(|(name, _)| *name == type_name) else {
        return Err(LayoutError::UnknownType { type_name: type_name.to_string() });
    };
    log::debug!("generate {type_name} {:?}", fields.element());
    construct(&fields)
}

/// The registered `type` keywords, in registry order.
pub fn known_types() -> impl Iterator<Item = &'static str> {
    REGISTRY.iter().map(|(name, _)| *name)
}

// ── constructors ──────────────────────────────────────────────────────────

fn build_root(f: &Fields<'_>) -> Result<Element> {
    Group::from_fields(f).map(Element::Root)
}

fn build_group(f: &Fields<'_>) -> Result<Element> {
    Group::from_fields(f).map(Element::Group)
}

fn build_image(f: &Fields<'_>) -> Result<Element> {
    ImageElement::from_fields(f).map(Element::Image)
}

fn build_mask(f: &Fields<'_>) -> Result<Element> {
    ImageElement::from_fields(f).map(Element::Mask)
}

fn build_text(f: &Fields<'_>) -> Result<Element> {
    TextElement::from_fields(f).map(Element::Text)
}

fn build_button(f: &Fields<'_>) -> Result<Element> {
    Button::from_fields(f).map(Element::Button)
}

fn build_list(f: &Fields<'_>) -> Result<Element> {
    List::from_fields(f).map(Element::List)
}

fn build_slider(f: &Fields<'_>) -> Result<Element> {
    Slider::from_fields(f).map(Element::Slider)
}

fn build_null(f: &Fields<'_>) -> Result<Element> {
    NullElement::from_fields(f).map(Element::Null)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn every_keyword_round_trips_to_its_variant() {
        for name in known_types() {
            let value = match name {
                "Image" | "Mask" => json!({ "type": name, "name": "n", "image": "icon",
                                            "x": 0, "y": 0, "w": 1, "h": 1, "opacity": 100 }),
                "Text" => json!({ "type": name, "name": "n", "text": "", "font": "Body", "size": 10,
                                  "align": "left", "color": "#ffffff", "x": 0, "y": 0, "w": 1, "h": 1, "vh": 1 }),
                "List" => json!({ "type": name, "name": "n", "elements": [
                    { "type": "Image", "name": "Area", "image": "area", "x": 0, "y": 0, "w": 1, "h": 1, "opacity": 100 },
                    { "type": "Group", "name": "Item", "elements": [] },
                ]}),
                "Null" => json!({ "type": name, "name": "n" }),
                _ => json!({ "type": name, "name": "n", "elements": [] }),
            };
            let el = generate(&value).unwrap();
            assert_eq!(el.type_name(), name);
            assert_eq!(el.name(), "n");
        }
        assert_eq!(known_types().count(), 9);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let err = generate(&json!({ "type": "Sprite", "name": "x" })).unwrap_err();
        assert!(matches!(err, LayoutError::UnknownType { ref type_name } if type_name == "Sprite"));
    }

    #[test]
    fn missing_type_is_a_missing_field() {
        let err = generate(&json!({ "name": "x" })).unwrap_err();
        assert!(matches!(
            err,
            LayoutError::MissingField { ref element, ref field } if element == "x" && field == "type"
        ));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(matches!(generate(&json!([1, 2])), Err(LayoutError::WrongFieldType { .. })));
        let err = generate(&json!({ "type": "Group", "name": "G", "elements": [3] })).unwrap_err();
        assert!(matches!(err, LayoutError::WrongFieldType { ref field, .. } if field == "element"));
    }

    #[test]
    fn child_errors_abort_the_parent() {
        let err = generate(&json!({
            "type": "Group", "name": "G", "elements": [
                { "type": "Null", "name": "ok" },
                { "type": "Bogus", "name": "bad" },
            ]
        }))
        .unwrap_err();
        assert!(matches!(err, LayoutError::UnknownType { .. }));
    }

    #[test]
    fn elements_must_be_an_array() {
        let err = generate(&json!({ "type": "Group", "name": "G", "elements": {} })).unwrap_err();
        assert!(matches!(err, LayoutError::WrongFieldType { ref field, .. } if field == "elements"));
    }
}
