// Contadores del dashboard del checker (hoy / total)

use wasm_bindgen::prelude::*;
use web_sys::Element;
use crate::dom::{append_child, clear_children, ElementBuilder};
use crate::models::ActivityStats;

/// Tarjetas en orden de aparición: (etiqueta, valor)
pub fn stat_entries(stats: &ActivityStats) -> [(&'static str, usize); 2] {
    [("Today", stats.updated_today), ("Total", stats.total_updated)]
}

pub fn paint_stats(container: &Element, stats: &ActivityStats) -> Result<(), JsValue> {
    clear_children(container);
    for (label, value) in stat_entries(stats) {
        let card = stat_card(label, value)?;
        append_child(container, &card)?;
    }
    Ok(())
}

fn stat_card(label: &str, value: usize) -> Result<Element, JsValue> {
    let label = ElementBuilder::new("div")?.class("stat-label").text(label).build();
    let value = ElementBuilder::new("div")?.class("stat-value").text(&value.to_string()).build();
    let caption = ElementBuilder::new("div")?.class("stat-caption").text("Updated entries").build();
    Ok(ElementBuilder::new("div")?
        .class("card stat-card")
        .children([&label, &value, &caption])?
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_card_comes_before_total() {
        let stats = ActivityStats { updated_today: 2, total_updated: 5 };
        assert_eq!(stat_entries(&stats), [("Today", 2), ("Total", 5)]);
    }
}
