//! 生成済みSVGの後処理
//!
//! 描画ライブラリ側で指定できないドット半径の縮小を、
//! SVGをパースして `<circle>` の `r` 属性を書き換えることで行う。
//! 出力はXML宣言と名前空間付きルート要素を持つ単独のSVG文書。

use super::svg::{fmt_num, SVG_NAMESPACE};
use crate::error::Result;
use roxmltree::{Document, Node, NodeType};
use std::fmt::Write;

/// ドット半径の縮小率
pub const DOT_SCALE: f64 = 0.8;

/// 書き出すSVG文書の先頭に付けるXML宣言
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" standalone=\"no\"?>\r\n";

/// すべての `<circle>` の半径を `factor` 倍にした文書を返す
pub fn scale_circles(svg: &str, factor: f64) -> Result<String> {
    let doc = Document::parse(svg)?;
    let root = doc.root_element();

    let mut out = String::with_capacity(svg.len() + XML_DECLARATION.len());
    out.push_str(XML_DECLARATION);
    write_element(&mut out, root, factor, true);
    Ok(out)
}

fn write_element(out: &mut String, node: Node, factor: f64, is_root: bool) {
    let name = qualified_name(node, node.tag_name().namespace(), node.tag_name().name());
    out.push('<');
    out.push_str(&name);

    if is_root {
        write_namespaces(out, node);
    }

    let is_circle = node.tag_name().name() == "circle";
    for attr in node.attributes() {
        let attr_name = qualified_name(node, attr.namespace(), attr.name());
        let value = match (is_circle, attr.name(), attr.value().trim().parse::<f64>()) {
            (true, "r", Ok(r)) => fmt_num(r * factor),
            _ => attr.value().to_string(),
        };
        let _ = write!(out, r#" {}="{}""#, attr_name, escape(&value, true));
    }

    if !node.has_children() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => write_element(out, child, factor, false),
            NodeType::Text => out.push_str(&escape(child.text().unwrap_or_default(), false)),
            NodeType::Comment => {
                let _ = write!(out, "<!--{}-->", child.text().unwrap_or_default());
            }
            _ => {}
        }
    }
    let _ = write!(out, "</{}>", name);
}

/// ルート要素に名前空間宣言を書く（既定名前空間が無ければSVGを補う）
fn write_namespaces(out: &mut String, node: Node) {
    let mut has_default = false;
    for ns in node.namespaces() {
        match ns.name() {
            Some("xml") => {}
            Some(prefix) => {
                let _ = write!(out, r#" xmlns:{}="{}""#, prefix, escape(ns.uri(), true));
            }
            None => {
                has_default = true;
                let _ = write!(out, r#" xmlns="{}""#, escape(ns.uri(), true));
            }
        }
    }
    if !has_default {
        let _ = write!(out, r#" xmlns="{}""#, SVG_NAMESPACE);
    }
}

fn qualified_name(node: Node, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, local),
        _ => local.to_string(),
    }
}

fn escape(value: &str, in_attribute: bool) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if in_attribute => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
