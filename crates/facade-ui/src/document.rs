use facade_engine::coords::Vec2;
use facade_engine::paint::Color;
use serde_json::{Map, Value};

use crate::elements::Element;
use crate::error::{LayoutError, Result, UNNAMED};

// ── Fields ────────────────────────────────────────────────────────────────

/// Typed, error-reporting view over one element's JSON object.
///
/// Every accessor names the element (when its `name` is readable) and the
/// field in the error it returns, so a malformed export can be traced back
/// to the offending layer.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
    element: &'a str,
}

impl<'a> Fields<'a> {
    /// View over a layout element. A non-object is reported as field `element`.
    pub fn new(value: &'a Value) -> Result<Self> {
        Self::at(value, "element")
    }

    /// View over the object found at `field`, which names it if it is not
    /// an object.
    pub fn at(value: &'a Value, field: &str) -> Result<Self> {
        let Some(map) = value.as_object() else {
            return Err(LayoutError::WrongFieldType {
                element: UNNAMED.to_string(),
                field: field.to_string(),
                expected: "an object",
            });
        };
        let element = map.get("name").and_then(Value::as_str).unwrap_or(UNNAMED);
        Ok(Self { map, element })
    }

    /// The element name used in error messages.
    pub fn element(&self) -> &'a str {
        self.element
    }

    fn raw(&self, key: &str) -> Option<&'a Value> {
        self.map.get(key).filter(|v| !v.is_null())
    }

    fn required(&self, key: &str) -> Result<&'a Value> {
        self.raw(key).ok_or_else(|| LayoutError::MissingField {
            element: self.element.to_string(),
            field: key.to_string(),
        })
    }

    fn wrong(&self, key: &str, expected: &'static str) -> LayoutError {
        LayoutError::WrongFieldType {
            element: self.element.to_string(),
            field: key.to_string(),
            expected,
        }
    }

    // ── strings ───────────────────────────────────────────────────────────

    pub fn str(&self, key: &str) -> Result<&'a str> {
        self.required(key)?.as_str().ok_or_else(|| self.wrong(key, "a string"))
    }

    /// Absent and `null` both read as `None`.
    pub fn opt_str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.raw(key) {
            None => Ok(None),
            Some(v) => v.as_str().map(Some).ok_or_else(|| self.wrong(key, "a string")),
        }
    }

    // ── numbers ───────────────────────────────────────────────────────────

    pub fn f32(&self, key: &str) -> Result<f32> {
        self.required(key)?
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| self.wrong(key, "a number"))
    }

    /// A non-negative integer; fractional exports are rounded.
    pub fn u32(&self, key: &str) -> Result<u32> {
        let v = self.required(key)?.as_f64().ok_or_else(|| self.wrong(key, "a number"))?;
        if v < 0.0 || v > u32::MAX as f64 {
            return Err(self.wrong(key, "a non-negative integer"));
        }
        Ok(v.round() as u32)
    }

    pub fn vec2(&self, kx: &str, ky: &str) -> Result<Vec2> {
        Ok(Vec2::new(self.f32(kx)?, self.f32(ky)?))
    }

    // ── others ────────────────────────────────────────────────────────────

    pub fn opt_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.raw(key) {
            None => Ok(None),
            Some(v) => v.as_bool().map(Some).ok_or_else(|| self.wrong(key, "a boolean")),
        }
    }

    pub fn array(&self, key: &str) -> Result<&'a [Value]> {
        self.required(key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.wrong(key, "an array"))
    }

    pub fn color(&self, key: &str) -> Result<Color> {
        let s = self.str(key)?;
        Color::from_hex(s).map_err(|_| LayoutError::InvalidColor {
            element: self.element.to_string(),
            value: s.to_string(),
        })
    }
}

// ── Document ──────────────────────────────────────────────────────────────

/// A parsed layout file.
///
/// Accepts either a bare root element, or an envelope that also records the
/// canvas the layout was exported against:
///
/// ```json
/// { "info": { "canvas": { "size": { "w": 1136, "h": 640 } } },
///   "root": { "type": "Root", "name": "Title", "elements": [] } }
/// ```
#[derive(Debug)]
pub struct Document {
    pub canvas_size: Option<Vec2>,
    pub root: Element,
}

impl Document {
    pub fn from_value(value: &Value) -> Result<Self> {
        let Some(root) = value.get("root") else {
            return Ok(Self { canvas_size: None, root: Element::generate(value)? });
        };
        let canvas_size = match value.pointer("/info/canvas/size") {
            Some(size) => {
                let fields = Fields::at(size, "info.canvas.size")?;
                Some(fields.vec2("w", "h")?)
            }
            None => None,
        };
        Ok(Self { canvas_size, root: Element::generate(root)? })
    }

    pub fn parse_str(src: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(src)?;
        Self::from_value(&value)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn required_and_optional_strings() {
        let v = json!({ "name": "Title", "pivot": null });
        let f = Fields::new(&v).unwrap();
        assert_eq!(f.element(), "Title");
        assert_eq!(f.str("name").unwrap(), "Title");
        assert_eq!(f.opt_str("pivot").unwrap(), None);
        assert_eq!(f.opt_str("scroll").unwrap(), None);
    }

    #[test]
    fn missing_field_names_element() {
        let v = json!({ "name": "Icon", "x": 1 });
        let err = Fields::new(&v).unwrap().vec2("x", "y").unwrap_err();
        assert!(matches!(
            err,
            LayoutError::MissingField { ref element, ref field } if element == "Icon" && field == "y"
        ));
    }

    #[test]
    fn wrong_shape_is_reported() {
        let v = json!({ "name": 7, "w": "wide", "background": "yes" });
        let f = Fields::new(&v).unwrap();
        assert_eq!(f.element(), UNNAMED);
        assert!(matches!(f.str("name"), Err(LayoutError::WrongFieldType { .. })));
        assert!(matches!(f.f32("w"), Err(LayoutError::WrongFieldType { .. })));
        assert!(matches!(f.opt_bool("background"), Err(LayoutError::WrongFieldType { .. })));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = Fields::new(&json!([1, 2])).unwrap_err();
        assert!(matches!(err, LayoutError::WrongFieldType { ref field, .. } if field == "element"));
        assert_eq!(err.to_string(), "<unnamed>: field \"element\" must be an object");
    }

    #[test]
    fn non_object_canvas_names_its_path() {
        let err = Document::from_value(&json!({
            "info": { "canvas": { "size": [640, 480] } },
            "root": { "type": "Root", "name": "Screen", "elements": [] }
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            LayoutError::WrongFieldType { ref field, .. } if field == "info.canvas.size"
        ));
    }

    #[test]
    fn non_object_document_is_not_blamed_on_elements() {
        let err = Document::from_value(&json!("Screen")).unwrap_err();
        assert!(matches!(err, LayoutError::WrongFieldType { ref field, .. } if field == "element"));
    }

    #[test]
    fn font_size_rounds() {
        let v = json!({ "size": 23.6 });
        assert_eq!(Fields::new(&v).unwrap().u32("size").unwrap(), 24);
        let v = json!({ "size": -1 });
        assert!(Fields::new(&v).unwrap().u32("size").is_err());
    }

    #[test]
    fn color_field() {
        let v = json!({ "name": "Label", "color": "#ff0000", "bad": "#12" });
        let f = Fields::new(&v).unwrap();
        assert_eq!(f.color("color").unwrap().r, 1.0);
        assert!(matches!(f.color("bad"), Err(LayoutError::InvalidColor { .. })));
    }

    #[test]
    fn envelope_carries_canvas_size() {
        let doc = Document::parse_str(
            r#"{ "info": { "canvas": { "size": { "w": 640, "h": 480 } } },
                 "root": { "type": "Root", "name": "Screen", "elements": [] } }"#,
        )
        .unwrap();
        assert_eq!(doc.canvas_size, Some(Vec2::new(640.0, 480.0)));
        assert_eq!(doc.root.name(), "Screen");
    }

    #[test]
    fn bare_root_has_no_canvas() {
        let doc = Document::from_value(&json!({ "type": "Root", "name": "Screen", "elements": [] }))
            .unwrap();
        assert_eq!(doc.canvas_size, None);
    }

    #[test]
    fn malformed_text() {
        assert!(matches!(Document::parse_str("{ nope"), Err(LayoutError::Json(_))));
    }
}
