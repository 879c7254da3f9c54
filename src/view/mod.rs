//! Server-rendered client view.
//!
//! `GET /` renders the current list directly into the page so it is readable without
//! JavaScript; the embedded script (`assets/app.js`) then owns the page: it submits excuses and
//! votes through the JSON API and re-fetches `GET /excuses` after every mutation.

mod time;

pub use time::relative_time;

use chrono::{DateTime, Utc};
use excuse_schema::{Excuse, SortKey};
use std::fmt::Write as _;

const STYLE: &str = include_str!("../../assets/style.css");
const SCRIPT: &str = include_str!("../../assets/app.js");

pub const EMPTY_LIST_MESSAGE: &str = "No excuses yet. Be the first to submit one!";

/// Escapes text for use in HTML element content and double/single-quoted attributes.
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

fn sort_button(key: SortKey, label: &str, active: SortKey) -> String {
    let class = if key == active {
        "sort-btn active"
    } else {
        "sort-btn"
    };
    format!(
        r#"<button type="button" class="{class}" data-sort="{sort}">{label}</button>"#,
        sort = key.as_str(),
    )
}

/// Renders the list section body: either the empty-state message or one item per excuse.
pub fn render_list(excuses: &[Excuse], now: DateTime<Utc>) -> String {
    if excuses.is_empty() {
        return format!(r#"<div class="empty">{EMPTY_LIST_MESSAGE}</div>"#);
    }

    let mut html = String::new();
    for excuse in excuses {
        let _ = write!(
            html,
            r#"<div class="excuse" data-id="{id}">
  <div class="vote-controls">
    <button type="button" class="vote-btn up" data-id="{id}" data-delta="1" aria-label="Upvote">&#9650;</button>
    <div class="vote-count">{votes}</div>
    <button type="button" class="vote-btn down" data-id="{id}" data-delta="-1" aria-label="Downvote">&#9660;</button>
  </div>
  <div class="excuse-body">
    <p class="excuse-text">{text}</p>
    <p class="excuse-meta" data-created-at="{created_at}">Submitted {age}</p>
  </div>
</div>
"#,
            id = excuse.id,
            votes = excuse.votes,
            text = escape_html(&excuse.text),
            created_at = excuse.created_at.to_rfc3339(),
            age = relative_time(excuse.created_at, now),
        );
    }
    html
}

/// Renders the whole page for the given list and active sort key.
pub fn render_page(excuses: &[Excuse], sort: SortKey, now: DateTime<Utc>) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Late Assignment Excuse Voter</title>
<style>{STYLE}</style>
</head>
<body data-sort="{sort}">
<main>
  <h1>&#127891; Late Assignment Excuse Voter</h1>

  <section class="card">
    <h2>Submit Your Excuse</h2>
    <form id="submit-form">
      <textarea id="excuse-text" name="text" placeholder="Enter your creative excuse for being late..." required></textarea>
      <button type="submit" id="submit-btn">Submit Excuse</button>
    </form>
  </section>

  <section class="card">
    <div class="list-header">
      <h2>Vote on Excuses</h2>
      <div class="sort-toggle">
        {votes_btn}
        {recent_btn}
      </div>
    </div>
    <div id="excuse-list">
{list}    </div>
  </section>
</main>
<script>{SCRIPT}</script>
</body>
</html>
"#,
        sort = sort.as_str(),
        votes_btn = sort_button(SortKey::Votes, "Top Voted", sort),
        recent_btn = sort_button(SortKey::Recent, "Most Recent", sort),
        list = render_list(excuses, now),
    )
}
