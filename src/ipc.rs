//! Messages posted by the page script through `window.ipc.postMessage`.

use serde::Deserialize;

use crate::contact::{ContactForm, Field};
use crate::page::behavior::ScrollMetrics;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageMessage {
    OpenProject { card: usize },
    ModalPrev,
    ModalNext,
    ModalGoto { index: usize },
    ModalClose,
    ModalBackdrop,
    ImageLoaded { generation: u64, slot: usize },
    ImageFailed { generation: u64, slot: usize },
    Key { key: String },
    GalleryPrev { card: usize },
    GalleryNext { card: usize },
    Scroll(ScrollMetrics),
    Anchor { href: String, element_top: f64, page_offset: f64 },
    BackToTop,
    MenuToggle,
    MenuLink,
    ReadMoreMeasured { card: usize, height: u32 },
    ReadMoreToggle { card: usize, height: u32 },
    Reveal { kind: RevealKind, index: usize, #[serde(default)] progress: String },
    IntroDismiss,
    FieldBlur { field: Field, value: String },
    FieldInput { field: Field, value: String, had_error: bool },
    Submit(ContactForm),
    ExternalLink { url: String },
    CloseWindow,
    QuitApp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealKind {
    Skill,
    Fade,
}

#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("malformed page message {body:?}: {source}")]
    Malformed {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PageMessage {
    pub fn parse(body: &str) -> Result<Self, IpcError> {
        serde_json::from_str(body).map_err(|source| IpcError::Malformed {
            body: body.chars().take(200).collect(),
            source,
        })
    }
}
