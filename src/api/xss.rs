//! Output filter for user-supplied text that the client renders as HTML.
//!
//! Markup is escaped unless the tag is on a small whitelist of formatting
//! tags. Whitelisted tags are rebuilt from scratch with only their permitted
//! attributes, so event handlers and `javascript:` URLs never survive.
//! Comments are dropped. Text outside tags only has `<` and `>` escaped.

use once_cell::sync::Lazy;
use regex::Regex;

static COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment regex"));

static TAG_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\s*(/?)\s*([A-Za-z][A-Za-z0-9]*)").expect("tag name regex"));

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("attribute regex")
});

const SAFE_URL_PREFIXES: [&str; 10] = [
    "#", "/", "./", "../", "http://", "https://", "ftp://", "mailto:", "tel:", "data:image/",
];

/// Filter a stored string for safe display
pub fn filter_xss(input: &str) -> String {
    let html = COMMENT.replace_all(input, "");
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    let mut tag_start: Option<usize> = None;

    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match tag_start {
            None => {
                if c == b'<' {
                    tag_start = Some(i);
                }
            }
            Some(start) => match c {
                // A second `<` means the first one never opened a tag
                b'<' => {
                    out.push_str(&escape_html(&html[last..i]));
                    last = i;
                    tag_start = Some(i);
                }
                b'>' => {
                    out.push_str(&escape_html(&html[last..start]));
                    out.push_str(&filter_tag(&html[start..=i]));
                    last = i + 1;
                    tag_start = None;
                }
                // Skip over quoted attribute values so a `>` inside them
                // does not close the tag
                b'"' | b'\'' if i > 0 && bytes[i - 1] == b'=' => {
                    if let Some(offset) = html[i + 1..].find(c as char) {
                        i += offset + 1;
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }

    out.push_str(&escape_html(&html[last..]));
    out
}

fn escape_html(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

fn filter_tag(tag: &str) -> String {
    let Some(caps) = TAG_NAME.captures(tag) else {
        return escape_html(tag);
    };
    let closing = !caps[1].is_empty();
    let name = caps[2].to_ascii_lowercase();

    let Some(allowed) = allowed_attributes(&name) else {
        return escape_html(tag);
    };
    if closing {
        return format!("</{}>", name);
    }

    let name_end = caps.get(0).map_or(0, |m| m.end());
    let mut rest = tag[name_end..tag.len() - 1].trim_end();
    let self_closing = rest.ends_with('/');
    if self_closing {
        rest = &rest[..rest.len() - 1];
    }

    let attributes: Vec<String> = ATTRIBUTE
        .captures_iter(rest)
        .filter_map(|a| {
            let attr = a[1].to_ascii_lowercase();
            if !allowed.contains(&attr.as_str()) {
                return None;
            }
            let raw = a
                .get(2)
                .or_else(|| a.get(3))
                .or_else(|| a.get(4))
                .map_or("", |m| m.as_str());
            let value = safe_attribute_value(&attr, raw);
            Some(if value.is_empty() {
                attr
            } else {
                format!("{}=\"{}\"", attr, value)
            })
        })
        .collect();

    let mut out = format!("<{}", name);
    if !attributes.is_empty() {
        out.push(' ');
        out.push_str(&attributes.join(" "));
    }
    if self_closing {
        out.push_str(" /");
    }
    out.push('>');
    out
}

fn safe_attribute_value(attr: &str, value: &str) -> String {
    let value = value.trim();
    if matches!(attr, "href" | "src" | "cite") && !is_safe_url(value) {
        return String::new();
    }
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

fn is_safe_url(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    SAFE_URL_PREFIXES.iter().any(|p| lower.starts_with(p))
}

/// Permitted attributes for a whitelisted tag, `None` for anything else
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    let attributes: &'static [&'static str] = match tag {
        "a" => &["target", "href", "title"],
        "abbr" => &["title"],
        "area" => &["shape", "coords", "href", "alt"],
        "audio" => &["autoplay", "controls", "loop", "preload", "src"],
        "bdi" | "bdo" => &["dir"],
        "blockquote" => &["cite"],
        "col" | "colgroup" => &["align", "valign", "span", "width"],
        "del" | "ins" => &["datetime"],
        "details" => &["open"],
        "font" => &["color", "size", "face"],
        "img" => &["src", "alt", "title", "width", "height"],
        "table" => &["width", "border", "align", "valign"],
        "td" | "th" => &["width", "rowspan", "colspan", "align", "valign"],
        "tr" => &["rowspan", "align", "valign"],
        "video" => &["autoplay", "controls", "loop", "preload", "src", "height", "width"],
        "address" | "article" | "aside" | "b" | "big" | "br" | "caption" | "center" | "cite"
        | "code" | "dd" | "div" | "dl" | "dt" | "em" | "figcaption" | "figure" | "footer"
        | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "header" | "hr" | "i" | "li" | "mark"
        | "nav" | "ol" | "p" | "pre" | "s" | "section" | "small" | "span" | "sub" | "summary"
        | "sup" | "strong" | "strike" | "tbody" | "tfoot" | "thead" | "tt" | "u" | "ul" => &[],
        _ => return None,
    };
    Some(attributes)
}
