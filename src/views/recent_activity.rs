// ============================================================================
// RECENT ACTIVITY - Lista "Recent Updates" (más nuevo primero)
// ============================================================================

use chrono::Utc;
use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, clear_children, set_hidden, ElementBuilder};
use crate::models::{BtSubmission, PiecesSubmission, RecentList};
use crate::utils::time::{format_local, format_relative};
use crate::views::form_helpers::card;

/// Tarjeta vacía; se rellena con `paint_pieces` / `paint_bt`
pub fn render_recent_card() -> Result<(Element, Element), JsValue> {
    let (card, content) = card("Recent Updates", None)?;
    card.class_list().add_1("recent-card")?;
    let list = ElementBuilder::new("ul")?.class("recent-list").build();
    append_child(&content, &list)?;
    Ok((card, list))
}

pub fn paint_pieces(card: &Element, list: &Element, recent: &RecentList<PiecesSubmission>) -> Result<(), JsValue> {
    clear_children(list);
    set_hidden(card, recent.is_empty())?;
    let now = Utc::now();
    for submission in recent.iter() {
        let mut meta = vec![format_relative(submission.timestamp, now)];
        if let Some(actor) = submission.actor_label() {
            meta.push(actor);
        }
        let row = render_row(
            &submission.mawb,
            &meta,
            &format_local(submission.timestamp),
            &format!("{} pcs", submission.pcs_received),
        )?;
        append_child(list, &row)?;
    }
    Ok(())
}

pub fn paint_bt(card: &Element, list: &Element, recent: &RecentList<BtSubmission>) -> Result<(), JsValue> {
    clear_children(list);
    set_hidden(card, recent.is_empty())?;
    let now = Utc::now();
    for submission in recent.iter() {
        let meta = vec![
            format!("Flight {}", submission.flight_number),
            format_relative(submission.timestamp, now),
        ];
        let row = render_row(
            &submission.mawb,
            &meta,
            &format_local(submission.timestamp),
            &format!("BT {}", submission.bt_number),
        )?;
        append_child(list, &row)?;
    }
    Ok(())
}

fn render_row(primary: &str, meta: &[String], exact_time: &str, badge: &str) -> Result<Element, JsValue> {
    let title = ElementBuilder::new("div")?.class("recent-primary").text(primary).build();
    let details = ElementBuilder::new("div")?
        .class("recent-meta")
        .attr("title", exact_time)?
        .text(&meta.join(" • "))
        .build();
    let text = ElementBuilder::new("div")?.children([&title, &details])?.build();
    let badge = ElementBuilder::new("span")?.class("badge").text(badge).build();
    Ok(ElementBuilder::new("li")?
        .class("recent-item")
        .children([&text, &badge])?
        .build())
}
