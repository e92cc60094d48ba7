//! Content edits: choose the layout, then regenerate structured slide content.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::llm::{self, LlmError, LlmMessage, ResponseSchema, StructuredLlm};
use crate::models::presentation::{PresentationLayout, SlideLayoutSpec};
use crate::models::slide::Slide;
use crate::templates_structs::{EditSlideSystemPrompt, EditSlideUserPrompt, SelectLayoutUserPrompt};

const SELECT_LAYOUT_SYSTEM_PROMPT: &str = include_str!("../../templates/prompts/select_layout_system.txt");

pub const SPEAKER_NOTE_KEY: &str = "__speaker_note__";

#[derive(Debug, Deserialize)]
pub struct SelectedLayout {
    pub index: i64,
}

impl SelectedLayout {
    pub fn schema() -> ResponseSchema {
        ResponseSchema::new(
            "SelectedLayout",
            json!({
                "type": "object",
                "properties": { "index": { "type": "integer" } },
                "required": ["index"],
                "additionalProperties": false
            }),
        )
    }
}

fn pretty(content: &Value) -> String {
    serde_json::to_string_pretty(content).unwrap_or_else(|_| content.to_string())
}

fn describe_layouts(layout: &PresentationLayout) -> String {
    layout
        .slides
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let name = s.name.as_deref().unwrap_or(&s.id);
            match s.description.as_deref() {
                Some(d) if !d.is_empty() => format!("{i}: {name} ({}) - {d}", s.id),
                _ => format!("{i}: {name} ({})", s.id),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Layout to fall back on: the slide's current one, else the first on offer.
fn current_or_first<'a>(layout: &'a PresentationLayout, slide: &Slide) -> Option<&'a SlideLayoutSpec> {
    layout.find(&slide.layout).or_else(|| layout.slides.first())
}

/// Pick the layout for an edit. A single-layout descriptor needs no model
/// call; otherwise the model picks an index, and an index outside the list
/// falls back to the current layout.
pub async fn select_slide_layout<'a>(
    llm: &dyn StructuredLlm,
    prompt: &str,
    layout: &'a PresentationLayout,
    slide: &Slide,
) -> Result<Option<&'a SlideLayoutSpec>, LlmError> {
    if layout.slides.len() <= 1 {
        return Ok(layout.slides.first());
    }

    let user = SelectLayoutUserPrompt {
        prompt,
        current_layout: &slide.layout,
        content: pretty(&slide.content),
        layouts: describe_layouts(layout),
    };
    let messages = [
        LlmMessage::system(SELECT_LAYOUT_SYSTEM_PROMPT),
        LlmMessage::user(user.to_string()),
    ];
    let selected: SelectedLayout = llm::generate(llm, &messages, &SelectedLayout::schema()).await?;

    let chosen = usize::try_from(selected.index)
        .ok()
        .and_then(|i| layout.slides.get(i));
    match chosen {
        Some(spec) => Ok(Some(spec)),
        None => {
            log::warn!(
                "Layout selection returned index {} outside 0..{}; keeping current layout",
                selected.index,
                layout.slides.len()
            );
            Ok(current_or_first(layout, slide))
        }
    }
}

/// The layout's content schema plus a required `__speaker_note__` string.
pub fn content_schema(spec: &SlideLayoutSpec) -> ResponseSchema {
    let mut schema = spec.json_schema.clone();
    if !schema.is_object() {
        schema = json!({ "type": "object", "properties": {} });
    }
    if let Some(obj) = schema.as_object_mut() {
        let properties = obj.entry("properties").or_insert_with(|| json!({}));
        if let Some(props) = properties.as_object_mut() {
            props.insert(
                SPEAKER_NOTE_KEY.to_string(),
                json!({ "type": "string", "description": "Presenter notes for this slide" }),
            );
        }
        let required = obj.entry("required").or_insert_with(|| json!([]));
        if let Some(list) = required.as_array_mut() {
            if !list.iter().any(|v| v == SPEAKER_NOTE_KEY) {
                list.push(Value::String(SPEAKER_NOTE_KEY.to_string()));
            }
        }
    }
    ResponseSchema::new("SlideContent", schema).lenient()
}

/// Regenerate the slide's structured content for `spec` following `prompt`.
/// The result is always a JSON object and carries the speaker note under
/// [`SPEAKER_NOTE_KEY`].
pub async fn edit_slide_content(
    llm: &dyn StructuredLlm,
    prompt: &str,
    slide: &Slide,
    language: &str,
    spec: &SlideLayoutSpec,
) -> Result<Value, LlmError> {
    let system = EditSlideSystemPrompt {
        language,
        layout_name: spec.name.as_deref().unwrap_or(&spec.id),
        layout_description: spec.description.as_deref().unwrap_or(""),
    };
    let user = EditSlideUserPrompt { prompt, content: pretty(&slide.content) };
    let messages = [LlmMessage::system(system.to_string()), LlmMessage::user(user.to_string())];

    let content = llm.generate_structured(&messages, &content_schema(spec)).await?;
    if !content.is_object() {
        return Err(LlmError::Contract {
            schema: "SlideContent",
            reason: "expected a JSON object".to_string(),
        });
    }
    Ok(content)
}

/// Remove and return the speaker note from generated content. The note is
/// stored in its own column, not in the content.
pub fn take_speaker_note(content: &mut Value) -> String {
    content
        .as_object_mut()
        .and_then(|obj| obj.remove(SPEAKER_NOTE_KEY))
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}
