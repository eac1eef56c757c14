//! Write an svg element tree back to markup.

use crate::metadata::SvgMetadata;
use crate::types::SvgElementType;

/// Errors that can occur while serializing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializeError {
    #[error("an id must be provided when use_given_id is set")]
    MissingId,
}

/// Serialization settings.
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Drop `id` from nested elements, used when several files are merged
    pub merge: bool,

    /// Substitute id for top-level elements
    pub id: Option<String>,

    /// Emit the children of the root `svg` instead of the root itself
    pub skip_svg: bool,

    /// Indentation unit
    pub tab: String,

    /// Always use `id`, even for elements that have their own
    pub use_given_id: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            merge: false,
            id: None,
            skip_svg: true,
            tab: "   ".to_string(),
            use_given_id: false,
        }
    }
}

/// Serialize an element tree.
///
/// With `skip_svg` the root's children are written on their own. If the root
/// also carries `viewBox`, `width` and `height`, every symbolable child is
/// wrapped in a `<symbol>` taking over the child's id and the root's geometry.
pub fn serialize_svg(root: &SvgMetadata, options: &SerializeOptions) -> Result<String, SerializeError> {
    if options.use_given_id && options.id.is_none() {
        return Err(SerializeError::MissingId);
    }

    let (nodes, symbol) = if options.skip_svg
        && root.element_type == SvgElementType::Svg
        && !root.children.is_empty()
    {
        let geometry = match (
            root.attribute("width"),
            root.attribute("height"),
            root.attribute("viewBox"),
        ) {
            (Some(width), Some(height), Some(view_box)) => Some(SymbolGeometry {
                width,
                height,
                view_box,
            }),
            _ => None,
        };
        (root.children.as_slice(), geometry)
    } else {
        (std::slice::from_ref(root), None)
    };

    let writer = Writer { options, symbol };
    let mut out = String::new();
    for node in nodes {
        writer.top_level(&mut out, node);
    }
    Ok(out)
}

/// Wrap serialized elements in a hidden sprite container.
pub fn wrap_merged_svg(body: &str) -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" style=\"display: none;\">\n{body}</svg>\n"
    )
}

struct SymbolGeometry<'a> {
    width: &'a str,
    height: &'a str,
    view_box: &'a str,
}

struct Writer<'a> {
    options: &'a SerializeOptions,
    symbol: Option<SymbolGeometry<'a>>,
}

impl Writer<'_> {
    fn top_level(&self, out: &mut String, node: &SvgMetadata) {
        let id = match (&self.options.id, node.id()) {
            (Some(given), _) if self.options.use_given_id => Some(given.as_str()),
            (_, Some(own)) => Some(own),
            (given, None) => given.as_deref(),
        };

        match &self.symbol {
            Some(geometry) if node.element_type.is_symbolable() => {
                out.push_str("<symbol");
                if let Some(id) = id {
                    push_attribute(out, "id", id);
                }
                push_attribute(out, "width", geometry.width);
                push_attribute(out, "height", geometry.height);
                push_attribute(out, "viewBox", geometry.view_box);
                out.push_str(">\n");
                self.element(out, node, &self.options.tab, None, true);
                out.push_str("</symbol>\n");
            }
            Some(_) => self.element(out, node, &self.options.tab, id, true),
            None => self.element(out, node, "", id, true),
        }
    }

    /// Write one element and its subtree. `id` replaces the element's own id
    /// when `top` is set.
    fn element(&self, out: &mut String, node: &SvgMetadata, indent: &str, id: Option<&str>, top: bool) {
        out.push_str(&format!("{indent}<{}", node.name));
        if let Some(id) = id {
            push_attribute(out, "id", id);
        }
        for (name, value) in &node.attributes {
            if name == "id" && (top || self.options.merge) {
                continue;
            }
            push_attribute(out, name, value);
        }

        if !node.children.is_empty() {
            out.push_str(">\n");
            let child_indent = format!("{indent}{}", self.options.tab);
            for child in &node.children {
                self.element(out, child, &child_indent, None, false);
            }
            out.push_str(&format!("{indent}</{}>\n", node.name));
        } else if let Some(text) = &node.ctext {
            out.push_str(&format!(">{text}</{}>\n", node.name));
        } else {
            out.push_str(&format!("></{}>\n", node.name));
        }
    }
}

fn push_attribute(out: &mut String, name: &str, value: &str) {
    if value.contains('"') {
        out.push_str(&format!(" {name}='{value}'"));
    } else {
        out.push_str(&format!(" {name}=\"{value}\""));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::VectorParseOptions;
    use crate::scanner::parse_vector;
    use pretty_assertions::assert_eq;

    fn parse(raw: &str) -> SvgMetadata {
        let options = VectorParseOptions {
            include_meta: true,
            ..Default::default()
        };
        parse_vector(raw, &options).unwrap().unwrap().metadata
    }

    #[test]
    fn writes_whole_tree() {
        let root = parse(r#"<svg viewBox="0 0 10 10"><g id="grp" fill="red"><rect x="1" y="1"/></g><text id="t">Hello</text></svg>"#);
        let options = SerializeOptions {
            skip_svg: false,
            ..Default::default()
        };
        let out = serialize_svg(&root, &options).unwrap();
        assert_eq!(
            out,
            concat!(
                "<svg viewBox=\"0 0 10 10\">\n",
                "   <g id=\"grp\" fill=\"red\">\n",
                "      <rect x=\"1\" y=\"1\"></rect>\n",
                "   </g>\n",
                "   <text id=\"t\">Hello</text>\n",
                "</svg>\n",
            )
        );
    }

    #[test]
    fn round_trip_keeps_tree() {
        let raw = r#"<svg viewBox="0 0 24 24" width="24" height="24">
            <defs><clipPath id="clip"><circle r="4"/></clipPath></defs>
            <g id="layer" font-family='"Fira Sans"'>
               <path id="stroke" d="M0 0 L24 24"/>
               <text x="2">Label <tspan>bold</tspan></text>
            </g>
         </svg>"#;
        let root = parse(raw);
        let options = SerializeOptions {
            skip_svg: false,
            ..Default::default()
        };
        let out = serialize_svg(&root, &options).unwrap();
        assert_eq!(parse(&out), root);
    }

    #[test]
    fn round_trip_of_children_keeps_tree() {
        let raw = r#"<svg viewBox="0 0 24 24">
            <defs><clipPath id="clip"><circle r="4"/></clipPath></defs>
            <g id="layer" fill="none">
               <path id="stroke" d="M0 0 L24 24"/>
               <text x="2">Label</text>
            </g>
            <rect width="2" height="2"/>
         </svg>"#;
        let root = parse(raw);
        let body = serialize_svg(&root, &SerializeOptions::default()).unwrap();
        let wrapped = format!("<svg viewBox=\"0 0 24 24\">\n{body}</svg>");
        assert_eq!(parse(&wrapped), root);
    }

    #[test]
    fn wraps_shapes_in_symbols() {
        let root = parse(r#"<svg width="24" height="24" viewBox="0 0 24 24"><path id="arrow" d="M0 0"/><defs><mask id="m"/></defs></svg>"#);
        let out = serialize_svg(&root, &SerializeOptions::default()).unwrap();
        assert_eq!(
            out,
            concat!(
                "<symbol id=\"arrow\" width=\"24\" height=\"24\" viewBox=\"0 0 24 24\">\n",
                "   <path d=\"M0 0\"></path>\n",
                "</symbol>\n",
                "   <defs>\n",
                "      <mask id=\"m\"></mask>\n",
                "   </defs>\n",
            )
        );
    }

    #[test]
    fn given_id_replaces_own_id() {
        let root = parse(r#"<svg width="16" height="16" viewBox="0 0 16 16"><g id="inner"><rect id="r"/></g></svg>"#);
        let options = SerializeOptions {
            merge: true,
            id: Some("iconHome".to_string()),
            use_given_id: true,
            ..Default::default()
        };
        let out = serialize_svg(&root, &options).unwrap();
        assert_eq!(
            out,
            concat!(
                "<symbol id=\"iconHome\" width=\"16\" height=\"16\" viewBox=\"0 0 16 16\">\n",
                "   <g>\n",
                "      <rect></rect>\n",
                "   </g>\n",
                "</symbol>\n",
            )
        );
    }

    #[test]
    fn substitute_id_fills_missing_id() {
        let root = parse(r#"<svg viewBox="0 0 1 1"><circle r="1"/></svg>"#);
        let options = SerializeOptions {
            id: Some("dot".to_string()),
            ..Default::default()
        };
        let out = serialize_svg(&root, &options).unwrap();
        assert_eq!(out, "<circle id=\"dot\" r=\"1\"></circle>\n");
    }

    #[test]
    fn use_given_id_requires_id() {
        let root = SvgMetadata::new("svg");
        let options = SerializeOptions {
            use_given_id: true,
            ..Default::default()
        };
        assert_eq!(serialize_svg(&root, &options), Err(SerializeError::MissingId));
    }

    #[test]
    fn wraps_sprite() {
        assert_eq!(
            wrap_merged_svg("<symbol></symbol>\n"),
            "<svg xmlns=\"http://www.w3.org/2000/svg\" style=\"display: none;\">\n<symbol></symbol>\n</svg>\n"
        );
    }
}
