//! Shaping of the script block: plain text or speakable markup.

use super::model::RenderRequest;

const EXPRESS_AS_MARKER: &str = "<mstts:express-as";
const SPEAK_ROOT: &str = "<speak";
const FALLBACK_LOCALE: &str = "en-US";

/// Script text as it will be sent, plus the voice it is spoken with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPayload {
    pub input: String,
    pub ssml: bool,
    pub voice_id: String,
}

impl ScriptPayload {
    /// Derive the payload for a request spoken by `voice_id`.
    ///
    /// Markup mode is on when the caller asked for it or picked a speaking style.
    /// In markup mode the text is enclosed in a `<speak>` root unless it already has one.
    pub fn from_request(request: &RenderRequest, voice_id: &str) -> Self {
        let mut input = request.script_text.clone();
        let style = request.style_tag();

        if let Some(style) = style {
            if !input.contains(EXPRESS_AS_MARKER) {
                input = wrap_in_style(&input, style);
            }
        }

        let ssml = request.use_markup || style.is_some();
        if ssml && !has_speak_root(&input) {
            input = wrap_in_speak(&input, voice_id);
        }

        Self {
            input,
            ssml,
            voice_id: voice_id.to_string(),
        }
    }
}

/// Content sniffing for callers that don't say whether their text is markup.
/// Only the HTTP boundary uses this; the service trusts `RenderRequest::use_markup`.
pub fn looks_like_markup(text: &str) -> bool {
    text.contains(EXPRESS_AS_MARKER) || has_speak_root(text)
}

fn has_speak_root(text: &str) -> bool {
    text.trim_start().starts_with(SPEAK_ROOT)
}

fn wrap_in_style(text: &str, style: &str) -> String {
    format!(
        r#"<mstts:express-as style="{}">{}</mstts:express-as>"#,
        escape_xml(style),
        escape_xml(text)
    )
}

fn wrap_in_speak(text: &str, voice_id: &str) -> String {
    format!(
        r#"<speak version="1.0" xmlns="http://www.w3.org/2001/10/synthesis" xmlns:mstts="https://www.w3.org/2001/mstts" xml:lang="{}"><voice name="{}">{}</voice></speak>"#,
        locale_for_voice(voice_id),
        escape_xml(voice_id),
        text
    )
}

/// Locale prefix of a neural voice id, e.g. `hi-IN` for `hi-IN-SwaraNeural`
pub fn locale_for_voice(voice_id: &str) -> String {
    let mut parts = voice_id.split('-');
    match (parts.next(), parts.next()) {
        (Some(language), Some(region))
            if (2..=3).contains(&language.len())
                && language.chars().all(|c| c.is_ascii_lowercase())
                && region.len() == 2
                && region.chars().all(|c| c.is_ascii_uppercase()) =>
        {
            format!("{}-{}", language, region)
        }
        _ => FALLBACK_LOCALE.to_string(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
