//! The Markdown emitter.
//!
//! Walks a parsed [`Node`] tree and renders Markdown text. Dispatch is
//! a single closed match over normalized tag names; unrecognized
//! elements are transparent (children rendered, no markup added), so
//! the emitter never fails on a structurally valid tree.

use crate::node::{Element, Node};
use crate::utilities::{chomp, collapse_whitespace, escape_markdown};

/// Tags whose subtrees produce no output at all.
const REMOVED_ELEMENTS: &[&str] = &["script", "style", "meta", "link"];

/// One open `<ul>`/`<ol>` during traversal.
#[derive(Debug, Clone, Copy)]
struct ListFrame {
    ordered: bool,
    item_index: usize,
}

/// Transient emission state threaded through the recursive walk.
///
/// Created fresh per `convert` call; the frame stack depth always
/// equals the HTML list nesting depth at the current node.
#[derive(Debug, Default)]
struct Context {
    list_stack: Vec<ListFrame>,
    in_pre: bool,
    // Depth of enclosing inline wrappers. Inline buffers start empty
    // without being a block boundary, so leading whitespace survives
    // until the wrapper hoists it outside its markers.
    inline_depth: usize,
}

/// Convert a parsed HTML tree to a Markdown string.
///
/// Pure and deterministic: identical trees yield byte-identical
/// output. Never fails; an empty tree yields an empty string. Safe to
/// call repeatedly and concurrently on independent trees.
pub fn convert(root: &Node) -> String {
    let mut ctx = Context::default();
    let mut out = String::new();
    emit_node(root, &mut out, &mut ctx);
    finalize(&out)
}

fn emit_node(node: &Node, out: &mut String, ctx: &mut Context) {
    match node {
        Node::Text(text) => emit_text(text, out, ctx),
        Node::Element(el) => emit_element(el, out, ctx),
    }
}

fn emit_children(el: &Element, out: &mut String, ctx: &mut Context) {
    for child in el.children() {
        emit_node(child, out, ctx);
    }
}

fn emit_element(el: &Element, out: &mut String, ctx: &mut Context) {
    let tag = el.tag();

    if REMOVED_ELEMENTS.contains(&tag) {
        return;
    }

    match tag {
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
            let level = tag[1..].parse::<usize>().unwrap_or(1);
            emit_heading(el, level, out, ctx);
        }
        "p" => emit_paragraph(el, out, ctx),
        "blockquote" => emit_blockquote(el, out, ctx),
        "pre" => emit_pre(el, out, ctx),
        "ul" => emit_list(el, false, out, ctx),
        "ol" => emit_list(el, true, out, ctx),
        "li" => emit_list_item(el, out, ctx),
        "strong" | "b" => emit_wrapped(el, "**", out, ctx),
        "em" | "i" => emit_wrapped(el, "*", out, ctx),
        "code" => emit_code(el, out, ctx),
        "a" => emit_link(el, out, ctx),
        "br" => out.push_str("  \n"),
        "hr" => {
            ensure_block_sep(out);
            out.push_str("---\n\n");
        }
        // Pass-through: children rendered, the element adds no markup.
        _ => emit_children(el, out, ctx),
    }
}

fn emit_text(text: &str, out: &mut String, ctx: &mut Context) {
    if ctx.in_pre {
        out.push_str(text);
        return;
    }

    let collapsed = collapse_whitespace(text);

    // Whitespace adjacent to a block boundary carries no meaning.
    let at_boundary =
        ctx.inline_depth == 0 && (out.is_empty() || out.ends_with('\n'));
    let content = if at_boundary {
        collapsed.trim_start()
    } else {
        collapsed.as_str()
    };

    if content.is_empty() {
        return;
    }

    out.push_str(&escape_markdown(content));
}

fn emit_heading(el: &Element, level: usize, out: &mut String, ctx: &mut Context) {
    let mut inner = String::new();
    emit_children(el, &mut inner, ctx);

    let collapsed = collapse_whitespace(&inner);
    let text = collapsed.trim();
    if text.is_empty() {
        return;
    }

    ensure_block_sep(out);
    for _ in 0..level {
        out.push('#');
    }
    out.push(' ');
    out.push_str(text);
    out.push_str("\n\n");
}

fn emit_paragraph(el: &Element, out: &mut String, ctx: &mut Context) {
    let mut inner = String::new();
    emit_children(el, &mut inner, ctx);

    let text = inner.trim();
    if text.is_empty() {
        return;
    }

    ensure_block_sep(out);
    out.push_str(text);
    out.push_str("\n\n");
}

fn emit_blockquote(el: &Element, out: &mut String, ctx: &mut Context) {
    let mut inner = String::new();
    emit_children(el, &mut inner, ctx);

    let body = inner.trim();
    if body.is_empty() {
        return;
    }

    ensure_block_sep(out);
    for (i, line) in body.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push('>');
        if !line.is_empty() {
            out.push(' ');
            out.push_str(line);
        }
    }
    out.push_str("\n\n");
}

fn emit_pre(el: &Element, out: &mut String, ctx: &mut Context) {
    let mut inner = String::new();
    ctx.in_pre = true;
    emit_children(el, &mut inner, ctx);
    ctx.in_pre = false;

    if inner.trim().is_empty() {
        return;
    }

    // Verbatim content: no escaping, no whitespace collapsing. Only
    // the newlines hugging the fences are dropped.
    let code = inner.trim_matches('\n');

    ensure_block_sep(out);
    out.push_str("```\n");
    out.push_str(code);
    out.push_str("\n```\n\n");
}

fn emit_list(el: &Element, ordered: bool, out: &mut String, ctx: &mut Context) {
    let nested = !ctx.list_stack.is_empty();
    if nested {
        // A nested list starts on its own line under the current item.
        if !out.is_empty() && !out.ends_with('\n') {
            out.push('\n');
        }
    } else {
        ensure_block_sep(out);
    }

    ctx.list_stack.push(ListFrame {
        ordered,
        item_index: 0,
    });
    emit_children(el, out, ctx);
    ctx.list_stack.pop();

    if ctx.list_stack.is_empty() {
        ensure_block_sep(out);
    }
}

fn emit_list_item(el: &Element, out: &mut String, ctx: &mut Context) {
    // An <li> outside any list renders transparently.
    let Some(frame) = ctx.list_stack.last_mut() else {
        emit_children(el, out, ctx);
        return;
    };
    frame.item_index += 1;
    let ordered = frame.ordered;
    let index = frame.item_index;
    let depth = ctx.list_stack.len();

    let mut inner = String::new();
    emit_children(el, &mut inner, ctx);
    let body = inner.trim();

    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    for _ in 0..depth.saturating_sub(1) {
        out.push_str("  ");
    }
    if ordered {
        out.push_str(&format!("{index}. "));
    } else {
        out.push_str("- ");
    }
    out.push_str(body);
    out.push('\n');
}

fn emit_wrapped(el: &Element, marker: &str, out: &mut String, ctx: &mut Context) {
    let mut inner = String::new();
    ctx.inline_depth += 1;
    emit_children(el, &mut inner, ctx);
    ctx.inline_depth -= 1;

    if inner.trim().is_empty() {
        out.push_str(&inner);
        return;
    }

    let (lead, core, trail) = chomp(&inner);
    out.push_str(lead);
    out.push_str(marker);
    out.push_str(core);
    out.push_str(marker);
    out.push_str(trail);
}

fn emit_code(el: &Element, out: &mut String, ctx: &mut Context) {
    // <code> inside <pre> is transparent; the fence already delimits.
    if ctx.in_pre {
        emit_children(el, out, ctx);
        return;
    }

    let collapsed = collapse_whitespace(&el.text_content());
    let content = collapsed.trim();
    if content.is_empty() {
        return;
    }

    out.push('`');
    out.push_str(content);
    out.push('`');
}

fn emit_link(el: &Element, out: &mut String, ctx: &mut Context) {
    let mut inner = String::new();
    ctx.inline_depth += 1;
    emit_children(el, &mut inner, ctx);
    ctx.inline_depth -= 1;

    let href = el.attr("href").map(str::trim).unwrap_or("");
    if href.is_empty() || inner.trim().is_empty() {
        // Degrade to plain inline text.
        out.push_str(&inner);
        return;
    }

    let (lead, core, trail) = chomp(&inner);
    out.push_str(lead);
    out.push('[');
    out.push_str(core);
    out.push_str("](");
    out.push_str(href);
    out.push(')');
    out.push_str(trail);
}

/// Make `out` end at a block boundary with exactly one blank line.
/// Consecutive blank lines are never duplicated.
fn ensure_block_sep(out: &mut String) {
    while out.ends_with([' ', '\t', '\n']) {
        out.pop();
    }
    if out.is_empty() {
        return;
    }
    out.push_str("\n\n");
}

/// Collapse runs of three or more newlines, trim surrounding
/// whitespace, and end non-empty output with exactly one newline.
fn finalize(out: &str) -> String {
    let trimmed = out.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(trimmed.len() + 1);
    let mut newlines = 0;
    for c in trimmed.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines <= 2 {
                result.push(c);
            }
        } else {
            newlines = 0;
            result.push(c);
        }
    }
    result.push('\n');
    result
}
