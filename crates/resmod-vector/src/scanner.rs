//! SVG module scanner.

use resmod_core::convention::lowercase_char;
use resmod_core::{ParseError, RawValue, ResourceModule, ResourceParser, ResourceType, Resources};

use crate::attr::SvgAttributeScanner;
use crate::metadata::SvgMetadata;
use crate::options::VectorParseOptions;
use crate::types::{SvgElementType, VectorType};

/// Resources produced by the svg scanner.
pub type VectorResources = Resources<SvgMetadata>;

/// Tag names are lowercased; namespaced names like `sodipodi:namedview` pass.
fn tag_char(ch: char) -> Result<char, ParseError> {
    match ch {
        ':' | '_' | '.' => Ok(ch),
        _ => lowercase_char(ch, true),
    }
}

/// Scans raw svg markup into an element tree and a resource module.
#[derive(Debug)]
pub struct SvgModuleScanner {
    include_meta: bool,
    attributes: SvgAttributeScanner,
    tag: RawValue,
}

/// Mutable state of a single scan.
struct ScanState {
    stack: Vec<SvgMetadata>,
    root: Option<SvgMetadata>,
    module: ResourceModule,
    /// Text collected for the innermost element, if it holds text
    text: Option<String>,
}

impl ScanState {
    /// Attach a finished element to its parent, or make it the root.
    fn attach(&mut self, node: SvgMetadata) -> Result<(), ParseError> {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
            return Ok(());
        }
        if self.root.is_some() {
            return Err(ParseError::Hierarchy {
                expected: "end of document".to_string(),
                found: node.name,
            });
        }
        if node.element_type != SvgElementType::Svg {
            return Err(ParseError::Hierarchy {
                expected: "svg".to_string(),
                found: node.name,
            });
        }
        self.root = Some(node);
        Ok(())
    }
}

impl SvgModuleScanner {
    pub fn new(options: VectorParseOptions) -> Self {
        Self {
            include_meta: options.include_meta,
            attributes: SvgAttributeScanner::new(options),
            tag: RawValue::new(Some(tag_char)),
        }
    }

    /// Scan raw svg markup.
    ///
    /// Returns `None` when no id was indexed, unless metadata was requested.
    pub fn scan(&mut self, raw: &str) -> Result<Option<VectorResources>, ParseError> {
        let chars: Vec<char> = raw.chars().collect();
        let mut state = ScanState {
            stack: Vec::new(),
            root: None,
            module: ResourceModule::new(),
            text: None,
        };
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i];
            if ch != '<' {
                if let Some(text) = state.text.as_mut() {
                    text.push(ch);
                }
                i += 1;
                continue;
            }

            i = if starts_with(&chars, i, "<!--") {
                skip_past(&chars, i + 4, "-->")?
            } else if starts_with(&chars, i, "<![CDATA[") {
                skip_past(&chars, i + 9, "]]>")?
            } else if starts_with(&chars, i, "<?") {
                skip_past(&chars, i + 2, "?>")?
            } else if starts_with(&chars, i, "<!") {
                skip_past(&chars, i + 2, ">")?
            } else if starts_with(&chars, i, "</") {
                self.close_tag(&chars, i + 2, &mut state)?
            } else {
                self.open_tag(&chars, i + 1, &mut state)?
            };
        }

        if let Some(open) = state.stack.last() {
            return Err(ParseError::Hierarchy {
                expected: format!("</{}>", open.name),
                found: "end of input".to_string(),
            });
        }
        let Some(root) = state.root else {
            return Err(ParseError::UnsupportedVector);
        };

        if !self.include_meta && state.module.is_empty() {
            return Ok(None);
        }

        Ok(Some(Resources {
            module: state.module,
            metadata: root,
            resource_type: ResourceType::Svg,
            extensions: vec![VectorType::Svg.as_str().to_string()],
        }))
    }

    /// Read a start tag beginning at `start` (just past `<`) and return the
    /// index following it.
    fn open_tag(&mut self, chars: &[char], start: usize, state: &mut ScanState) -> Result<usize, ParseError> {
        self.tag.reset();
        let mut i = start;
        while let Some(&ch) = chars.get(i) {
            if ch.is_whitespace() || ch == '/' || ch == '>' {
                break;
            }
            self.tag.append(ch)?;
            i += 1;
        }
        let Some(&delimiter) = chars.get(i) else {
            return Err(ParseError::UnexpectedEof);
        };
        if self.tag.is_empty() {
            return Err(ParseError::UnexpectedCharacter {
                ch: delimiter,
                offset: i,
            });
        }

        let mut child_module = false;
        if let Some(parent) = state.stack.last() {
            if parent.element_type.is_childless() {
                return Err(ParseError::ChildlessElement(parent.name.clone()));
            }
            child_module = parent.element_type.is_child_module();
        }
        // text and child elements never mix
        state.text = None;

        let mut node = SvgMetadata::new(self.tag.raw_str());
        if delimiter.is_whitespace() {
            let module = if child_module {
                Some(&mut state.module)
            } else {
                None
            };
            i = self.attributes.scan(chars, i, &mut node, module)?;
        }

        match chars.get(i) {
            Some('/') => {
                if chars.get(i + 1) != Some(&'>') {
                    return Err(ParseError::UnexpectedCharacter { ch: '/', offset: i });
                }
                state.attach(node)?;
                Ok(i + 2)
            }
            Some('>') => {
                if node.holds_text() {
                    state.text = Some(String::new());
                }
                state.stack.push(node);
                Ok(i + 1)
            }
            _ => Err(ParseError::UnexpectedEof),
        }
    }

    /// Read an end tag beginning at `start` (just past `</`) and return the
    /// index following it.
    fn close_tag(&mut self, chars: &[char], start: usize, state: &mut ScanState) -> Result<usize, ParseError> {
        self.tag.reset();
        let mut i = start;
        loop {
            match chars.get(i) {
                Some('>') => break,
                Some(ch) if ch.is_whitespace() => {}
                Some(&ch) => {
                    self.tag.append(ch)?;
                }
                None => return Err(ParseError::UnexpectedEof),
            }
            i += 1;
        }

        let Some(mut node) = state.stack.pop() else {
            return Err(ParseError::Hierarchy {
                expected: "svg".to_string(),
                found: format!("</{}>", self.tag.raw_str()),
            });
        };
        if !node.name.eq_ignore_ascii_case(self.tag.raw_str()) {
            return Err(ParseError::Hierarchy {
                expected: node.name,
                found: self.tag.raw_str().to_string(),
            });
        }

        if let Some(text) = state.text.take() {
            let text = text.trim();
            if !text.is_empty() && node.children.is_empty() {
                node.ctext = Some(text.to_string());
            }
        }
        state.attach(node)?;
        Ok(i + 1)
    }
}

impl ResourceParser for SvgModuleScanner {
    type Metadata = SvgMetadata;

    fn parse(&mut self, raw: &str) -> Result<Option<VectorResources>, ParseError> {
        self.scan(raw)
    }
}

/// Parse raw vector markup. Only svg is supported.
pub fn parse_vector(raw: &str, options: &VectorParseOptions) -> Result<Option<VectorResources>, ParseError> {
    let raw = raw.trim();
    match VectorType::detect(raw) {
        Some(VectorType::Svg) => SvgModuleScanner::new(options.clone()).scan(raw),
        None => Err(ParseError::UnsupportedVector),
    }
}

fn starts_with(chars: &[char], at: usize, pattern: &str) -> bool {
    let mut i = at;
    for expected in pattern.chars() {
        if chars.get(i) != Some(&expected) {
            return false;
        }
        i += 1;
    }
    true
}

/// Index just past the next occurrence of `pattern` at or after `from`.
fn skip_past(chars: &[char], from: usize, pattern: &str) -> Result<usize, ParseError> {
    let len = pattern.chars().count();
    (from..chars.len())
        .find(|&i| starts_with(chars, i, pattern))
        .map(|i| i + len)
        .ok_or(ParseError::UnexpectedEof)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use resmod_core::NameConvention;
    use std::sync::Arc;

    const MASK_SVG: &str = r#"
      <svg viewBox="-10 -10 120 120">
      <mask id="myMask">
         <!-- Everything under a white pixel will be visible -->
         <rect x="0" y="0" width="100" height="100" fill="white" />

         <!-- Everything under a black pixel will be invisible -->
         <path d="M10,35 A20,20,0,0,1,50,35 A20,20,0,0,1,90,35 Q90,65,50,95 Q10,65,10,35 Z" fill="black" />
      </mask>

      <polygon id="poly_id" points="-10,110 110,110 110,-10" fill="orange" />

      <!-- with this mask applied, we "punch" a heart shape hole into the circle -->
      <circle id="simple-circle" cx="50" cy="50" r="50" />
      </svg>"#;

    fn keys(resources: &VectorResources) -> Vec<&str> {
        resources.module.keys().collect()
    }

    #[test]
    fn indexes_direct_children_of_svg() {
        let raw = r#"<svg><rect id="box-one" x="0" y="0"/></svg>"#;
        let res = parse_vector(raw, &VectorParseOptions::default()).unwrap().unwrap();
        assert_eq!(res.module.iter().collect::<Vec<_>>(), vec![("boxOne", "box-one")]);
        assert_eq!(res.resource_type, ResourceType::Svg);
        assert_eq!(res.extensions, vec!["svg".to_string()]);

        let rect = &res.metadata.children[0];
        assert_eq!(rect.element_type, SvgElementType::Rect);
        assert_eq!(rect.attribute("x"), Some("0"));
    }

    #[test]
    fn builds_element_tree() {
        let res = parse_vector(MASK_SVG, &VectorParseOptions::default()).unwrap().unwrap();
        let root = &res.metadata;
        assert_eq!(root.name, "svg");
        assert_eq!(root.attribute("viewBox"), Some("-10 -10 120 120"));

        let names: Vec<&str> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["mask", "polygon", "circle"]);

        let mask = &root.children[0];
        let inner: Vec<SvgElementType> = mask.children.iter().map(|c| c.element_type).collect();
        assert_eq!(inner, vec![SvgElementType::Rect, SvgElementType::Path]);
        assert_eq!(mask.children[1].attribute("fill"), Some("black"));
    }

    #[test]
    fn children_of_groups_are_not_indexed() {
        let raw = r#"<svg><g id="outer"><rect id="inner"/></g><defs><path id="shared"/></defs></svg>"#;
        let res = parse_vector(raw, &VectorParseOptions::default()).unwrap().unwrap();
        assert_eq!(keys(&res), vec!["outer", "shared"]);
        assert_eq!(res.metadata.children[0].children[0].id(), Some("inner"));
    }

    #[test]
    fn nested_ids_are_not_validated() {
        let raw = r#"<svg><g id="grp"><path id="Path 1" d="M0 0"/></g></svg>"#;
        let res = parse_vector(raw, &VectorParseOptions::default()).unwrap().unwrap();
        assert_eq!(keys(&res), vec!["grp"]);
        assert_eq!(res.metadata.children[0].children[0].id(), Some("Path 1"));
    }

    #[test]
    fn nothing_indexed_yields_none() {
        let raw = r#"<svg viewBox="0 0 1 1"><path d="M0 0"/></svg>"#;
        assert!(parse_vector(raw, &VectorParseOptions::default()).unwrap().is_none());

        let options = VectorParseOptions {
            include_meta: true,
            ..Default::default()
        };
        let res = parse_vector(raw, &options).unwrap().unwrap();
        assert!(res.module.is_empty());
        assert_eq!(res.metadata.children.len(), 1);
    }

    #[test]
    fn keeps_first_duplicate() {
        let raw = r#"<svg><rect id="dup" x="1"/><circle id="dup"/></svg>"#;
        let res = parse_vector(raw, &VectorParseOptions::default()).unwrap().unwrap();
        assert_eq!(res.module.iter().collect::<Vec<_>>(), vec![("dup", "dup")]);
        assert_eq!(res.metadata.children.len(), 2);
    }

    #[test]
    fn collects_text_content() {
        let raw = "<svg><text id=\"title\" x=\"0\">\n   Hello world  \n</text><text id=\"rich\">A <tspan>B</tspan></text></svg>";
        let res = parse_vector(raw, &VectorParseOptions::default()).unwrap().unwrap();
        let title = &res.metadata.children[0];
        assert_eq!(title.ctext.as_deref(), Some("Hello world"));

        let rich = &res.metadata.children[1];
        assert_eq!(rich.ctext, None);
        assert_eq!(rich.children[0].name, "tspan");
        assert_eq!(rich.children[0].ctext.as_deref(), Some("B"));
    }

    #[test]
    fn skips_prolog_doctype_and_cdata() {
        let raw = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN" "http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd">
<svg xmlns="http://www.w3.org/2000/svg"><style><![CDATA[ .a > b { } ]]></style><circle id="dot" r="1"/></svg>"#;
        let res = parse_vector(raw, &VectorParseOptions::default()).unwrap().unwrap();
        assert_eq!(keys(&res), vec!["dot"]);
        assert_eq!(res.metadata.children[0].name, "style");
    }

    #[test]
    fn preserves_tag_case_in_metadata() {
        let raw = r#"<svg><clipPath id="clip-a"><rect/></clipPath></svg>"#;
        let res = parse_vector(raw, &VectorParseOptions::default()).unwrap().unwrap();
        let clip = &res.metadata.children[0];
        assert_eq!(clip.name, "clipPath");
        assert_eq!(clip.element_type, SvgElementType::ClipPath);
        assert_eq!(keys(&res), vec!["clipA"]);
    }

    #[test]
    fn mismatched_close_is_hierarchy_error() {
        let err = parse_vector("<svg><g></svg>", &VectorParseOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ParseError::Hierarchy {
                expected: "g".to_string(),
                found: "svg".to_string()
            }
        );
    }

    #[test]
    fn root_must_be_svg() {
        let mut scanner = SvgModuleScanner::new(VectorParseOptions::default());
        let err = scanner.parse(r#"<g id="a"></g>"#).unwrap_err();
        assert_eq!(
            err,
            ParseError::Hierarchy {
                expected: "svg".to_string(),
                found: "g".to_string()
            }
        );
    }

    #[test]
    fn unclosed_elements_are_hierarchy_error() {
        let err = parse_vector("<svg><g>", &VectorParseOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::Hierarchy { .. }));
    }

    #[test]
    fn childless_element_with_child_fails() {
        let raw = r#"<svg><rect id="a"><circle/></rect></svg>"#;
        let err = parse_vector(raw, &VectorParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseError::ChildlessElement("rect".to_string()));
    }

    #[test]
    fn rejects_non_svg_input() {
        let err = parse_vector("<png></png>", &VectorParseOptions::default()).unwrap_err();
        assert_eq!(err, ParseError::UnsupportedVector);
    }

    #[test]
    fn rejects_invalid_id_characters() {
        let raw = r#"<svg><rect id="a.b"/></svg>"#;
        let err = parse_vector(raw, &VectorParseOptions::default()).unwrap_err();
        assert!(matches!(err, ParseError::InvalidCharacter { ch: '.', .. }));
    }

    #[test]
    fn applies_prefix_table() {
        let raw = r#"<svg><rect id="box"/><text id="label">x</text></svg>"#;
        let options = VectorParseOptions {
            prefix: true,
            convention: NameConvention::Snake,
            ..Default::default()
        };
        let res = parse_vector(raw, &options).unwrap().unwrap();
        assert_eq!(keys(&res), vec!["rect_box", "txt_label"]);
    }

    #[test]
    fn applies_prefix_callback() {
        let options = VectorParseOptions {
            convention: NameConvention::Camel,
            prefix: true,
            prefix_cb: Some(Arc::new(|vector: VectorType, element: SvgElementType| {
                let element = match element {
                    SvgElementType::Mask => "MaSK",
                    SvgElementType::Polygon => "Poly",
                    SvgElementType::Circle => "cIcLE",
                    _ => "---",
                };
                format!("{}_{}", vector.as_str(), element)
            })),
            ..Default::default()
        };
        let res = parse_vector(MASK_SVG, &options).unwrap().unwrap();
        assert_eq!(
            keys(&res),
            vec!["svg_MaSKMymask", "svg_PolyPoly_id", "svg_cIcLESimpleCircle"]
        );
    }

    #[test]
    fn convention_callback_receives_raw_id() {
        let options = VectorParseOptions {
            convention_cb: Some(Arc::new(|name: &str| {
                format!("{}-{}", name[..2].to_uppercase(), name[2..].to_lowercase())
            })),
            ..Default::default()
        };
        let res = parse_vector(MASK_SVG, &options).unwrap().unwrap();
        assert_eq!(keys(&res), vec!["MY-mask", "PO-ly_id", "SI-mple-circle"]);
        assert_eq!(res.module.get("MY-mask"), Some("myMask"));
    }

    #[test]
    fn scanner_is_reusable() {
        let mut scanner = SvgModuleScanner::new(VectorParseOptions::default());
        let raw = r#"<svg><rect id="a"/></svg>"#;
        let first = scanner.parse(raw).unwrap();
        let second = scanner.parse(raw).unwrap();
        assert_eq!(first, second);
    }
}
