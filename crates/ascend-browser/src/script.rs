//! JavaScript evaluated in the page (or a frame's isolated world) to resolve
//! and act on elements.
//!
//! Every element script returns `{ found, value }` so a missing element can be
//! told apart from an element whose value is `null`.

use ascend_core::Pattern;
use serde::Deserialize;
use serde_json::Value;

/// What to do with the resolved element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementAction {
    Exists,
    Click,
    Focus,
    Clear,
    Text,
    Attribute(String),
}

/// Result of an element script
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Probe {
    pub found: bool,
    #[serde(default)]
    pub value: Value,
}

/// Script resolving `pattern` against `document` and applying `action`
pub fn element_script(pattern: &Pattern, action: &ElementAction) -> String {
    let body = match action {
        ElementAction::Exists => "return { found: true, value: null };".to_string(),
        ElementAction::Click => "el.scrollIntoView({ block: 'center' }); el.click(); \
             return { found: true, value: null };"
            .to_string(),
        ElementAction::Focus => "el.focus(); return { found: true, value: null };".to_string(),
        ElementAction::Clear => "el.value = ''; \
             el.dispatchEvent(new Event('input', { bubbles: true })); \
             return { found: true, value: null };"
            .to_string(),
        ElementAction::Text => "return { found: true, value: el.textContent };".to_string(),
        // Live boolean state (a radio checked by the user) shows up as an empty value
        ElementAction::Attribute(name) => {
            let name = js_string(name);
            format!(
                "const attr = el.getAttribute({name}); \
                 return {{ found: true, value: attr !== null ? attr : (el[{name}] === true ? '' : null) }};"
            )
        }
    };

    format!(
        "(() => {{ const el = {}; if (!el) {{ return {{ found: false, value: null }}; }} {} }})()",
        resolve(pattern),
        body
    )
}

/// Expression evaluating to the frame element itself, or `null`
pub fn frame_element(frame_selector: &str) -> String {
    format!("document.querySelector({})", js_string(frame_selector))
}

fn resolve(pattern: &Pattern) -> String {
    match pattern {
        Pattern::Css(selector) => format!("document.querySelector({})", js_string(selector)),
        Pattern::XPath(expression) => format!(
            "document.evaluate({}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue",
            js_string(expression)
        ),
    }
}

/// Quote `value` as a JavaScript string literal
fn js_string(value: &str) -> String {
    Value::String(value.to_string()).to_string()
}
