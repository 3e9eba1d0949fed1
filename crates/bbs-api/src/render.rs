use std::fmt::Write;

use bbs_types::api::Notice;
use bbs_types::models::Message;

use crate::state::BoardInfo;

/// Values used to refill the submission form after a redirect.
pub struct FormDefaults<'a> {
    pub name: &'a str,
    pub seed: &'a str,
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn listing_page(
    board: &BoardInfo,
    messages: &[Message],
    form: &FormDefaults<'_>,
    notice: Option<Notice>,
) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape_html(&board.topic));
    html.push_str("</head>\n<body>\n");

    let _ = writeln!(html, "<h1>{}</h1>", escape_html(&board.topic));
    if let Some(maxim) = &board.maxim {
        let _ = writeln!(html, "<p class=\"maxim\">{}</p>", escape_html(maxim));
    }
    if let Some(notice) = notice {
        let _ = writeln!(
            html,
            "<div class=\"notice {}\">{}</div>",
            notice.as_str(),
            escape_html(notice.text())
        );
    }

    html.push_str("<form action=\"/post\" method=\"post\">\n");
    let _ = writeln!(
        html,
        "<input type=\"text\" name=\"name\" placeholder=\"name\" value=\"{}\" required>",
        escape_html(form.name)
    );
    let _ = writeln!(
        html,
        "<input type=\"text\" name=\"seed\" placeholder=\"seed\" value=\"{}\">",
        escape_html(form.seed)
    );
    html.push_str("<textarea name=\"message\" placeholder=\"message\" required></textarea>\n");
    html.push_str("<button type=\"submit\">post</button>\n</form>\n");
    html.push_str("<p><a href=\"/bbs/how\">how to use</a></p>\n");

    html.push_str("<ul class=\"messages\">\n");
    for msg in messages {
        let _ = write!(
            html,
            "<li id=\"post-{id}\"><span class=\"id\">{id}</span> <span class=\"username\">{}</span>",
            escape_html(&msg.username),
            id = msg.id,
        );
        if let Some(seed) = &msg.seed {
            let _ = write!(html, " <span class=\"seed\">◆{}</span>", escape_html(seed));
        }
        let _ = writeln!(
            html,
            " <time>{}</time><p class=\"body\">{}</p></li>",
            msg.timestamp.format("%Y-%m-%d %H:%M:%S"),
            escape_html(&msg.message_content)
        );
    }
    html.push_str("</ul>\n</body>\n</html>\n");

    html
}

pub fn how_to_use_page() -> &'static str {
    "<h1>How to use (coming soon)</h1>\
     <p>Instructions for the board will be available here.</p>\
     <a href='/'>Back to the board</a>"
}
