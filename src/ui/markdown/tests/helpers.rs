use chrono::{Local, TimeZone};

use crate::core::message::SenderKind;
use crate::ui::markdown::{MessageRegion, RenderContext, RenderEngine};
use crate::ui::span::StyleName;

/// Context with labels off so buffer offsets equal message offsets.
pub fn bare_context() -> RenderContext {
    RenderContext::default().with_sender_labels(false)
}

pub fn render_assistant(text: &str) -> (RenderEngine, MessageRegion) {
    let mut engine = RenderEngine::default();
    let region = engine.render(text, SenderKind::Assistant, &bare_context());
    (engine, region)
}

/// Every buffer substring carrying `style`, in commit order.
pub fn styled_texts(engine: &RenderEngine, style: StyleName) -> Vec<String> {
    let text = engine.buffer().as_str();
    engine
        .spans()
        .iter()
        .filter(|s| s.style == style)
        .map(|s| text[s.span.as_range()].to_string())
        .collect()
}

pub fn fixed_time() -> chrono::DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 5, 17, 9, 4, 30)
        .single()
        .expect("unambiguous local time")
}
