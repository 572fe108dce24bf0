//! Server-rendered listing page for the journal (`GET /`).

use crate::journal::models::{Mood, MoodEntryRow};
use crate::journal::strategies::CopingStrategy;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M UTC";

/// Endpoint the journal form posts to.
pub const SUBMIT_ENDPOINT: &str = "/api/mood";

/// Selecting a mood enables Save; Save posts `{mood, note}` and reloads.
const FORM_SCRIPT: &str = r#"<script>
document.addEventListener('DOMContentLoaded', () => {
    let selectedMood = null;
    const buttons = document.querySelectorAll('#mood-buttons button');
    const note = document.getElementById('mood-note');
    const save = document.getElementById('save-mood');

    buttons.forEach(button => {
        button.addEventListener('click', () => {
            buttons.forEach(b => b.classList.remove('selected'));
            button.classList.add('selected');
            selectedMood = button.dataset.mood;
            save.disabled = false;
        });
    });

    save.addEventListener('click', async () => {
        if (!selectedMood) return;
        try {
            const response = await fetch('{endpoint}', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ mood: selectedMood, note: note.value })
            });
            if (response.ok) {
                window.location.reload();
            } else {
                const body = await response.json();
                alert(body.error ? body.error.message : 'Could not save mood');
            }
        } catch (error) {
            console.error('Error saving mood:', error);
        }
    });
});
</script>
"#;

pub fn render_index(entries: &[MoodEntryRow], strategies: &[CopingStrategy]) -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Mood Journal</title>\n</head>\n<body>\n<h1>Mood Journal</h1>\n",
    );

    html.push_str("<form id=\"mood-form\">\n<div id=\"mood-buttons\">\n");
    for mood in Mood::ALL {
        html.push_str(&format!(
            "<button type=\"button\" data-mood=\"{0}\">{0}</button>\n",
            mood.as_str()
        ));
    }
    html.push_str(
        "</div>\n<textarea id=\"mood-note\" maxlength=\"2000\"></textarea>\n\
         <button type=\"button\" id=\"save-mood\" disabled>Save</button>\n</form>\n",
    );

    html.push_str("<h2>Coping Strategies</h2>\n<ul class=\"strategies\">\n");
    for strategy in strategies {
        html.push_str(&format!(
            "<li><strong>{}</strong> {}</li>\n",
            escape_html(strategy.title),
            escape_html(strategy.description)
        ));
    }
    html.push_str("</ul>\n");

    html.push_str("<h2>Recent Entries</h2>\n");
    if entries.is_empty() {
        html.push_str("<p class=\"empty\">No entries yet.</p>\n");
    } else {
        html.push_str("<ul class=\"entries\">\n");
        for entry in entries {
            html.push_str(&format!(
                "<li><time>{}</time> <span class=\"mood\">{}</span>",
                entry.timestamp.format(TIMESTAMP_FORMAT),
                escape_html(&entry.mood)
            ));
            if let Some(note) = &entry.note {
                html.push_str(&format!(" <p class=\"note\">{}</p>", escape_html(note)));
            }
            html.push_str("</li>\n");
        }
        html.push_str("</ul>\n");
    }

    html.push_str(&FORM_SCRIPT.replace("{endpoint}", SUBMIT_ENDPOINT));
    html.push_str("</body>\n</html>\n");
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
