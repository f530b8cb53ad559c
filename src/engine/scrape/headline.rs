use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<(/?)([A-Za-z][A-Za-z0-9-]*)([^>]*)>").expect("valid tag pattern")
});
static CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bclass\s*=\s*["']([^"']*)["']"#).expect("valid class pattern")
});
static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid markup pattern"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digits pattern"));

const WRAPPER_CLASS: &str = "wpb_wrapper";

/// Elements that never hold children.
const VOID: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Block elements whose start tag ends an open `<p>`.
const CLOSES_PARAGRAPH: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "fieldset", "footer", "form",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "main", "nav", "ol", "p", "pre",
    "section", "table", "ul",
];

struct Element {
    name: String,
    wrapper: bool,
}

/// First run of digits found in an `<h1>` that is a direct child of a
/// `div.wpb_wrapper`, trying each such heading in document order.
pub fn headline_number(html: &str) -> Option<i64> {
    wrapped_headings(html)
        .into_iter()
        .find_map(|text| DIGITS.find(&text)?.as_str().parse().ok())
}

/// Text of every `div.wpb_wrapper > h1`, markup stripped.
fn wrapped_headings(html: &str) -> Vec<String> {
    let mut open: Vec<Element> = Vec::new();
    let mut headings = Vec::new();
    // Stack index of the heading being read and where its content starts.
    let mut reading: Option<(usize, usize)> = None;

    for caps in TAG.captures_iter(html) {
        let Some(tag) = caps.get(0) else { continue };
        let name = caps[2].to_ascii_lowercase();

        if caps[1].is_empty() {
            let attrs = &caps[3];
            if CLOSES_PARAGRAPH.contains(&name.as_str())
                && open.last().is_some_and(|e| e.name == "p")
            {
                open.pop();
            }
            if VOID.contains(&name.as_str()) || attrs.trim_end().ends_with('/') {
                continue;
            }
            if name == "h1" && reading.is_none() && open.last().is_some_and(|e| e.wrapper) {
                reading = Some((open.len(), tag.end()));
            }
            let wrapper = name == "div" && has_class(attrs, WRAPPER_CLASS);
            open.push(Element { name, wrapper });
        } else {
            // Stray end tags are ignored; a matched one closes everything above it.
            let Some(index) = open.iter().rposition(|e| e.name == name) else {
                continue;
            };
            if let Some((heading, start)) = reading {
                if index <= heading {
                    headings.push(MARKUP.replace_all(&html[start..tag.start()], "").into_owned());
                    reading = None;
                }
            }
            open.truncate(index);
        }
    }
    headings
}

fn has_class(attrs: &str, class: &str) -> bool {
    CLASS
        .captures(attrs)
        .is_some_and(|caps| caps[1].split_whitespace().any(|c| c == class))
}
