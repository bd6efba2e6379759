//! Page updates expressed as calls into the page script's `folio` helpers.
//!
//! Nothing here touches the webview: calls are queued and the event loop
//! evaluates them in one batch after each message.

use serde_json::{json, Value};

use crate::carousel::{CarouselView, ImageState};

#[derive(Debug, Default)]
pub struct ScriptBuffer {
    calls: Vec<String>,
}

impl ScriptBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `function(args...)`. Arguments are JSON encoded, so strings
    /// are always safely quoted.
    pub fn call(&mut self, function: &str, args: &[Value]) {
        let args: Vec<String> = args.iter().map(Value::to_string).collect();
        self.calls.push(format!("{function}({});", args.join(",")));
    }

    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Drain everything queued into one script.
    pub fn take(&mut self) -> Option<String> {
        if self.calls.is_empty() {
            return None;
        }
        Some(self.calls.drain(..).collect::<Vec<_>>().join("\n"))
    }
}

/// [`CarouselView`] backed by the modal helpers in the page script.
#[derive(Debug, Default)]
pub struct ScriptView {
    buffer: ScriptBuffer,
}

impl ScriptView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &ScriptBuffer {
        &self.buffer
    }

    pub fn take(&mut self) -> Option<String> {
        self.buffer.take()
    }
}

impl CarouselView for ScriptView {
    fn show_modal(&mut self, open: bool) {
        self.buffer.call("folio.modal.show", &[json!(open)]);
    }

    fn mount_image(&mut self, generation: u64, slot: usize, src: &str, alt: &str) {
        self.buffer
            .call("folio.modal.mount", &[json!(generation), json!(slot), json!(src), json!(alt)]);
    }

    fn set_image_state(&mut self, slot: usize, state: &ImageState) {
        match state {
            ImageState::Loaded => self.buffer.call("folio.modal.loaded", &[json!(slot)]),
            ImageState::Failed {
                placeholder,
                alt,
                tooltip,
            } => self.buffer.call(
                "folio.modal.failed",
                &[json!(slot), json!(placeholder), json!(alt), json!(tooltip)],
            ),
        }
    }

    fn set_offset(&mut self, percent: i64) {
        self.buffer.call("folio.modal.offset", &[json!(percent)]);
    }

    fn set_indicators(&mut self, count: usize, active: usize) {
        self.buffer
            .call("folio.modal.indicators", &[json!(count), json!(active)]);
    }

    fn set_controls_hidden(&mut self, hidden: bool) {
        self.buffer.call("folio.modal.controlsHidden", &[json!(hidden)]);
    }

    fn clear(&mut self) {
        self.buffer.call("folio.modal.clear", &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_quotes_arguments() {
        let mut buffer = ScriptBuffer::new();
        buffer.call("folio.modal.mount", &[json!(1), json!(0), json!("a\"b</script>"), json!("Vista 1")]);
        assert_eq!(
            buffer.calls(),
            &[r#"folio.modal.mount(1,0,"a\"b</script>","Vista 1");"#.to_string()]
        );
    }

    #[test]
    fn test_take_drains() {
        let mut view = ScriptView::new();
        view.set_offset(-100);
        view.set_controls_hidden(true);
        assert_eq!(
            view.take().as_deref(),
            Some("folio.modal.offset(-100);\nfolio.modal.controlsHidden(true);")
        );
        assert!(view.take().is_none());
        assert!(view.buffer().is_empty());
    }
}
