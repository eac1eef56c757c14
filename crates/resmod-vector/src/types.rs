//! Vector and element types with their indexing rules.

use resmod_core::NameConvention;
use serde::Serialize;

/// Vector format of a resource. Only SVG is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorType {
    #[default]
    Svg,
}

impl VectorType {
    /// Detect the vector format of raw markup.
    pub fn detect(raw: &str) -> Option<Self> {
        raw.contains("<svg").then_some(Self::Svg)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
        }
    }
}

/// SVG element kinds the scanner knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SvgElementType {
    Svg,
    Filter,
    Mask,
    ClipPath,
    #[serde(rename = "g")]
    Group,
    Defs,
    Text,
    Rect,
    Circle,
    Polygon,
    Polyline,
    Line,
    Path,
    Ellipse,
    /// Any element without indexing rules (`tspan`, `title`, `linearGradient`, ...)
    #[default]
    Other,
}

/// Indexing rules of an element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementMeta {
    /// Attributes whose value is indexed into the resource module
    pub attributes: &'static [&'static str],

    /// The element must not contain child elements
    pub childless: bool,

    /// Matched attributes of direct children are indexed
    pub child_module: bool,
}

const CONTAINER: ElementMeta = ElementMeta {
    attributes: &["id"],
    childless: false,
    child_module: false,
};

const SHAPE: ElementMeta = ElementMeta {
    attributes: &["id"],
    childless: true,
    child_module: false,
};

const MODULE_ROOT: ElementMeta = ElementMeta {
    attributes: &[],
    childless: false,
    child_module: true,
};

impl SvgElementType {
    /// Resolve an element type from a tag name, ignoring case.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "svg" => Self::Svg,
            "filter" => Self::Filter,
            "mask" => Self::Mask,
            "clippath" => Self::ClipPath,
            "g" => Self::Group,
            "defs" => Self::Defs,
            "text" => Self::Text,
            "rect" => Self::Rect,
            "circle" => Self::Circle,
            "polygon" => Self::Polygon,
            "polyline" => Self::Polyline,
            "line" => Self::Line,
            "path" => Self::Path,
            "ellipse" => Self::Ellipse,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Filter => "filter",
            Self::Mask => "mask",
            Self::ClipPath => "clippath",
            Self::Group => "g",
            Self::Defs => "defs",
            Self::Text => "text",
            Self::Rect => "rect",
            Self::Circle => "circle",
            Self::Polygon => "polygon",
            Self::Polyline => "polyline",
            Self::Line => "line",
            Self::Path => "path",
            Self::Ellipse => "ellipse",
            Self::Other => "other",
        }
    }

    /// Indexing rules for this element, `None` for unlisted elements.
    pub fn meta(&self) -> Option<ElementMeta> {
        match self {
            Self::Filter | Self::Mask | Self::ClipPath | Self::Group | Self::Text => Some(CONTAINER),
            Self::Rect
            | Self::Circle
            | Self::Polygon
            | Self::Polyline
            | Self::Line
            | Self::Path
            | Self::Ellipse => Some(SHAPE),
            Self::Svg | Self::Defs => Some(MODULE_ROOT),
            Self::Other => None,
        }
    }

    /// Whether the value of `attribute` on this element is indexed.
    pub fn indexes(&self, attribute: &str) -> bool {
        self.meta()
            .is_some_and(|meta| meta.attributes.contains(&attribute))
    }

    pub fn is_childless(&self) -> bool {
        self.meta().is_some_and(|meta| meta.childless)
    }

    /// Whether direct children of this element feed the resource module.
    pub fn is_child_module(&self) -> bool {
        self.meta().is_some_and(|meta| meta.child_module)
    }

    /// Whether the element can be wrapped in a `<symbol>` when sprites are merged.
    pub fn is_symbolable(&self) -> bool {
        matches!(
            self,
            Self::Circle
                | Self::Rect
                | Self::Polygon
                | Self::Polyline
                | Self::Ellipse
                | Self::Path
                | Self::Line
                | Self::Text
                | Self::Group
        )
    }

    /// Built-in key prefix for this element under the given convention.
    pub fn prefix(&self, convention: NameConvention) -> &'static str {
        let (camel, pascal, snake, upper) = match self {
            Self::Filter => ("filter", "Filter", "filter_", "FILTER_"),
            Self::Mask => ("mask", "Mask", "mask_", "MASK_"),
            Self::ClipPath => ("clip", "Clip", "clip_", "CLIP_"),
            Self::Group => ("group", "Group", "group_", "GROUP_"),
            Self::Text => ("txt", "Txt", "txt_", "TXT_"),
            Self::Rect => ("rect", "Rect", "rect_", "RECT_"),
            Self::Circle => ("circle", "Circle", "circle_", "CIRCLE_"),
            Self::Polygon => ("polygon", "Polygon", "polygon_", "POLYGON_"),
            Self::Polyline => ("polyline", "Polyline", "polyline_", "POLYLINE_"),
            Self::Line => ("line", "Line", "line_", "LINE_"),
            Self::Path => ("path", "Path", "path_", "PATH_"),
            Self::Ellipse => ("ellipse", "Ellipse", "ellipse_", "ELLIPSE_"),
            Self::Svg | Self::Defs | Self::Other => return "",
        };
        match convention {
            NameConvention::Camel => camel,
            NameConvention::Pascal => pascal,
            NameConvention::Snake => snake,
            NameConvention::UpperSnake => upper,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_tags_case_insensitively() {
        assert_eq!(SvgElementType::from_tag("clipPath"), SvgElementType::ClipPath);
        assert_eq!(SvgElementType::from_tag("G"), SvgElementType::Group);
        assert_eq!(SvgElementType::from_tag("tspan"), SvgElementType::Other);
    }

    #[test]
    fn element_table() {
        assert!(SvgElementType::Rect.is_childless());
        assert!(!SvgElementType::Group.is_childless());
        assert!(SvgElementType::Svg.is_child_module());
        assert!(SvgElementType::Defs.is_child_module());
        assert!(!SvgElementType::Mask.is_child_module());
        assert!(SvgElementType::Path.indexes("id"));
        assert!(!SvgElementType::Path.indexes("d"));
        assert!(!SvgElementType::Svg.indexes("id"));
        assert!(SvgElementType::Other.meta().is_none());
    }

    #[test]
    fn prefix_table() {
        assert_eq!(SvgElementType::Rect.prefix(NameConvention::Camel), "rect");
        assert_eq!(SvgElementType::ClipPath.prefix(NameConvention::Pascal), "Clip");
        assert_eq!(SvgElementType::Text.prefix(NameConvention::Snake), "txt_");
        assert_eq!(SvgElementType::Group.prefix(NameConvention::UpperSnake), "GROUP_");
        assert_eq!(SvgElementType::Defs.prefix(NameConvention::Camel), "");
    }

    #[test]
    fn detects_svg() {
        assert_eq!(VectorType::detect("  <svg></svg>"), Some(VectorType::Svg));
        assert_eq!(VectorType::detect("<png/>"), None);
    }
}
