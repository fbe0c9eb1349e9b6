//! UI commands and the canned texts they expand to.
//!
//! The view never calls into the controller ad hoc; every button, menu
//! entry and key binding maps to one `UiCommand`.

use popup_types::config::ChatModel;
use popup_types::page::PageSnapshot;
use crate::capture::truncate_chars;

pub const NOTIFICATION_TITLE: &str = "Page Assistant";
pub const STATUS_BUSY: &str = "Elaborazione...";
pub const STATUS_READY: &str = "Pronto";
pub const CAPTURE_FAILED: &str = "Non posso catturare il contenuto di questa pagina";
pub const COPIED: &str = "Messaggio copiato!";
pub const CODE_COPIED: &str = "Codice copiato!";

pub const WELCOME: &str = "👋 Benvenuto in Page Assistant!

Ecco cosa puoi fare:
• Chatta con l'assistente direttamente dal browser
• Cattura e analizza il contenuto delle pagine web
• Seleziona testo su qualsiasi pagina e chiedi spiegazioni
• Cerca informazioni sul web (configurabile)

Inizia con una domanda o usa i pulsanti rapidi sopra!";

const CAPTURE_PREVIEW_CHARS: usize = 500;
const ATTACHMENT_PREVIEW_CHARS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
pub enum UiCommand {
    /// Load conversations, tab info, selection and first-run state
    Init,
    Send(String),
    NewConversation,
    SelectConversation(String),
    CapturePage,
    AskAboutSelection(SelectionAction),
    QuickAction(QuickAction),
    ToggleWebSearch,
    CopyMessage(String),
    /// Copy the `block`-th fenced code block of a stored message
    CopyCode { message_id: String, block: usize },
    /// Resend the last user message of the active conversation
    Regenerate,
    AttachText { name: String, content: String },
    SelectModel(ChatModel),
    OpenOptions,
}

/// Actions offered on a page selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionAction {
    Explain,
    Summarize,
    Translate,
}

impl SelectionAction {
    pub fn all() -> &'static [SelectionAction] {
        &[SelectionAction::Explain, SelectionAction::Summarize, SelectionAction::Translate]
    }

    pub fn label(&self) -> &'static str {
        match self {
            SelectionAction::Explain => "💡 Spiega",
            SelectionAction::Summarize => "📝 Riassumi",
            SelectionAction::Translate => "🌐 Traduci",
        }
    }

    pub fn prompt(&self, selection: &str) -> String {
        match self {
            SelectionAction::Explain => format!("Spiega questo testo:\n\n\"{}\"", selection),
            SelectionAction::Summarize => format!("Riassumi questo testo:\n\n\"{}\"", selection),
            SelectionAction::Translate => {
                format!("Traduci questo testo in italiano:\n\n\"{}\"", selection)
            }
        }
    }
}

/// Page-level shortcuts that prefill the input box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickAction {
    Summarize,
    Explain,
    Translate,
    Improve,
    Code,
    Analyze,
}

impl QuickAction {
    pub fn all() -> &'static [QuickAction] {
        &[
            QuickAction::Summarize,
            QuickAction::Explain,
            QuickAction::Translate,
            QuickAction::Improve,
            QuickAction::Code,
            QuickAction::Analyze,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickAction::Summarize => "Riassumi",
            QuickAction::Explain => "Spiega",
            QuickAction::Translate => "Traduci",
            QuickAction::Improve => "Migliora",
            QuickAction::Code => "Codice",
            QuickAction::Analyze => "Analizza",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            QuickAction::Summarize => "Riassumi il contenuto di questa pagina",
            QuickAction::Explain => "Spiega cosa fa questa pagina",
            QuickAction::Translate => "Traduci il contenuto principale di questa pagina in italiano",
            QuickAction::Improve => "Come posso migliorare questo contenuto?",
            QuickAction::Code => "Genera del codice basato su questa pagina",
            QuickAction::Analyze => "Analizza questa pagina e fornisci insights",
        }
    }
}

pub fn capture_preview(page: &PageSnapshot) -> String {
    format!(
        "📷 Contenuto catturato da: {}\n\n{}...",
        page.title,
        truncate_chars(&page.content, CAPTURE_PREVIEW_CHARS)
    )
}

pub fn capture_prompt(page: &PageSnapshot) -> String {
    format!("Analizza questo contenuto dalla pagina \"{}\":\n\n{}", page.title, page.content)
}

pub fn attachment_prompt(name: &str, content: &str) -> String {
    format!(
        "Analizza questo file ({}):\n\n{}...",
        name,
        truncate_chars(content, ATTACHMENT_PREVIEW_CHARS)
    )
}

pub fn web_search_notice(enabled: bool) -> String {
    format!("Ricerca web {}", if enabled { "attivata" } else { "disattivata" })
}

/// Bodies of the fenced (```) code blocks in `text`, without the fence
/// lines and their language tag. A fence left open runs to the end of the
/// text; blank blocks are skipped.
pub fn code_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut open: Option<Vec<&str>> = None;
    for line in text.lines() {
        let fence = line.trim_start().starts_with("```");
        match open.take() {
            None if fence => open = Some(Vec::new()),
            None => {}
            Some(lines) if fence => blocks.push(lines.join("\n")),
            Some(mut lines) => {
                lines.push(line);
                open = Some(lines);
            }
        }
    }
    if let Some(lines) = open {
        blocks.push(lines.join("\n"));
    }
    blocks.retain(|b| !b.trim().is_empty());
    blocks
}
