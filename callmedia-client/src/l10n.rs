//! Minimal string catalog and placeholder resolution for user-facing prompts.
//!
//! Prompt bodies carry named `{placeholder}` markers (line breaks, link
//! anchors) that are resolved to HTML fragments before the content leaves the
//! crate, so subscribers receive ready-to-render markup.

#[derive(Clone, Copy, Debug)]
pub enum StringId {
    ModalNoCameraTitle,
    ModalNoCameraMessage,
}

pub fn text(id: StringId) -> &'static str {
    match id {
        StringId::ModalNoCameraTitle => "No camera found",
        StringId::ModalNoCameraMessage => {
            "Calls will use your microphone only.{br}\
             See {helpLink}our camera troubleshooting guide{/helpLink} \
             to enable your camera."
        }
    }
}

/// Resolve named `{key}` placeholders in `template`.
///
/// Unknown placeholders are left untouched so a missing replacement shows up
/// in the rendered prompt instead of silently vanishing.
pub fn resolve(template: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in replacements {
        out = out.replace(&format!("{{{key}}}"), value);
    }
    out
}
