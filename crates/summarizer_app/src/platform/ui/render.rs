use summarizer_core::{
    AppViewModel, BulletBlock, FileBlockView, FileBodyView, SummaryLength, NOT_AVAILABLE,
};

/// What the console surface should show; applied by `Console`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    SetStatus(String),
    SetSummaryLength(SummaryLength),
    SetSubmitEnabled(bool),
    SetLoading(Option<String>),
    ShowResults { html: String, text: String },
    HideResults,
}

pub fn render(view: &AppViewModel, generated_at: &str) -> Vec<UiCommand> {
    let mut cmds = vec![
        UiCommand::SetStatus(view.status_label.clone()),
        UiCommand::SetSummaryLength(view.summary_length),
        UiCommand::SetSubmitEnabled(view.submit_enabled),
        UiCommand::SetLoading(view.loading.clone()),
    ];

    if view.results_visible {
        cmds.push(UiCommand::ShowResults {
            html: results_document(&view.results, generated_at),
            text: results_text(&view.results),
        });
    } else {
        cmds.push(UiCommand::HideResults);
    }

    cmds
}

pub fn results_document(blocks: &[FileBlockView], generated_at: &str) -> String {
    let mut out = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>File summaries</title>\n\
         <style>.file-summary{margin-bottom:1.5em}.error{color:red}</style>\n\
         </head>\n<body>\n<div id=\"result\">\n<div id=\"fileSummaries\">\n",
    );
    for block in blocks {
        out.push_str(&file_block_html(block));
        out.push('\n');
    }
    out.push_str("</div>\n</div>\n");
    out.push_str(&format!("<!-- generated {} -->\n", escape_html(generated_at)));
    out.push_str("</body>\n</html>\n");
    out
}

pub fn file_block_html(block: &FileBlockView) -> String {
    let name = escape_html(&block.name);
    match &block.body {
        FileBodyView::Error(error) => format!(
            "<div class=\"file-summary\"><h3>{name}</h3><p class=\"error\">{}</p></div>",
            escape_html(error)
        ),
        FileBodyView::Analyzed {
            preview,
            summary_label,
            summary,
            suggestions,
        } => format!(
            "<div class=\"file-summary\">\
             <h3>{name}</h3>\
             <p><strong>Preview:</strong> {}</p>\
             <p><strong>{}</strong></p>\
             {}\
             <p><strong>Improvement Suggestions:</strong></p>\
             {}\
             </div>",
            escape_html(preview),
            escape_html(summary_label),
            bullets_html(summary),
            bullets_html(suggestions)
        ),
    }
}

pub fn bullets_html(block: &BulletBlock) -> String {
    match block {
        BulletBlock::NotAvailable => format!("<p>{NOT_AVAILABLE}</p>"),
        BulletBlock::Paragraph(text) => format!("<p>{}</p>", escape_html(text)),
        BulletBlock::List(items) => {
            let items: String = items
                .iter()
                .map(|item| format!("<li>{}</li>", escape_html(item)))
                .collect();
            format!("<ul>{items}</ul>")
        }
    }
}

pub fn results_text(blocks: &[FileBlockView]) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&format!("== {} ==\n", block.name));
        match &block.body {
            FileBodyView::Error(error) => out.push_str(&format!("  ERROR: {error}\n")),
            FileBodyView::Analyzed {
                preview,
                summary_label,
                summary,
                suggestions,
            } => {
                out.push_str(&format!("Preview: {preview}\n"));
                out.push_str(&format!("{summary_label}\n"));
                push_bullets_text(&mut out, summary);
                out.push_str("Improvement Suggestions:\n");
                push_bullets_text(&mut out, suggestions);
            }
        }
    }
    out
}

fn push_bullets_text(out: &mut String, block: &BulletBlock) {
    match block {
        BulletBlock::NotAvailable => out.push_str(&format!("  {NOT_AVAILABLE}\n")),
        BulletBlock::Paragraph(text) => out.push_str(&format!("  {}\n", text.trim_end())),
        BulletBlock::List(items) => {
            for item in items {
                out.push_str(&format!("  • {item}\n"));
            }
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
