//! Card Export
//!
//! Renders the in-memory grid to a PNG in a popup window, and downloads the
//! server's stored record as a `.json` file. Neither path writes to the
//! server.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::{
    Blob, BlobPropertyBag, CanvasRenderingContext2d, Document, HtmlAnchorElement,
    HtmlCanvasElement, HtmlImageElement, Url, Window,
};

use crate::api;
use crate::grid;
use crate::models::{Prediction, TriState};

const PADDING: f64 = 24.0;
const GAP: f64 = 8.0;
const TITLE_HEIGHT: f64 = 60.0;
const MIN_CELL: f64 = 80.0;
const MAX_CELL: f64 = 240.0;
const MAX_CONTENT_WIDTH: f64 = 1200.0;
/// Canvas backing-store scale for a crisper PNG.
const SCALE: f64 = 2.0;
const LINE_HEIGHT: f64 = 16.0;
const BADGE_SIZE: f64 = 18.0;

// Theme colors, matching the stylesheet.
const PAGE_BG: &str = "#071226";
const CARD_BG: &str = "#0f1722";
const CELL_BG: &str = "rgba(255,255,255,0.02)";
const CELL_BORDER: &str = "rgba(255,255,255,0.04)";
const CELL_TEXT: &str = "#e6eef6";
const TITLE_TEXT: &str = "#dff7fb";
const TRUE_BADGE: &str = "#34d399";
const FALSE_BADGE: &str = "#ef4444";

/// Canvas geometry for a given cell count, sized to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportLayout {
    pub columns: usize,
    pub cell: f64,
    pub grid_width: f64,
    pub canvas_w: f64,
    pub canvas_h: f64,
}

impl ExportLayout {
    pub fn for_count(n: usize, viewport_width: f64) -> Self {
        let columns = grid::columns(n.max(1));
        let usable = MAX_CONTENT_WIDTH.min(viewport_width * 0.9) - PADDING * 2.0;
        let cell = (usable / columns as f64).floor().clamp(MIN_CELL, MAX_CELL);
        let grid_width = cell * columns as f64 + (columns as f64 - 1.0) * GAP;
        let canvas_w = grid_width + PADDING * 2.0;
        let canvas_h = TITLE_HEIGHT + grid_width + PADDING * 2.0;
        Self {
            columns,
            cell,
            grid_width,
            canvas_w,
            canvas_h,
        }
    }

    /// Top-left corner of cell `index`.
    pub fn cell_origin(&self, index: usize) -> (f64, f64) {
        let row = index / self.columns;
        let col = index % self.columns;
        (
            PADDING + col as f64 * (self.cell + GAP),
            PADDING + TITLE_HEIGHT + row as f64 * (self.cell + GAP),
        )
    }
}

/// Greedy word wrap against a width-measuring function. Always returns at
/// least one (possibly empty) line; a single overlong word gets its own
/// line rather than being split.
pub fn wrap_lines<F: Fn(&str) -> f64>(text: &str, max_width: f64, measure: F) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if measure(&candidate) > max_width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

/// Draw the current in-memory grid to a PNG and open it in a new window
/// with a download link. A blocked popup aborts with an error the caller
/// surfaces to the status area.
pub fn export_image(card_name: &str, predictions: &[Prediction]) -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document not available".to_string())?;

    let viewport = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(MAX_CONTENT_WIDTH);
    let layout = ExportLayout::for_count(predictions.len(), viewport);

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| format!("create canvas failed: {e:?}"))?
        .dyn_into()
        .map_err(|_| "canvas element cast failed".to_string())?;
    canvas.set_width((layout.canvas_w * SCALE) as u32);
    canvas.set_height((layout.canvas_h * SCALE) as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| format!("get 2d context failed: {e:?}"))?
        .ok_or_else(|| "2d context unavailable".to_string())?
        .dyn_into()
        .map_err(|_| "2d context cast failed".to_string())?;
    ctx.scale(SCALE, SCALE)
        .map_err(|e| format!("scale failed: {e:?}"))?;

    let title = if card_name.is_empty() {
        "Bingo Card"
    } else {
        card_name
    };
    draw_card(&ctx, &layout, title, predictions)?;

    let url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|e| format!("canvas encode failed: {e:?}"))?;

    let popup = window
        .open_with_url("about:blank")
        .map_err(|e| format!("window.open failed: {e:?}"))?
        .ok_or_else(|| "Popup blocked — allow popups to export image.".to_string())?;
    present_image(&popup, title, &url)
}

fn draw_card(
    ctx: &CanvasRenderingContext2d,
    layout: &ExportLayout,
    title: &str,
    predictions: &[Prediction],
) -> Result<(), String> {
    ctx.set_fill_style_str(PAGE_BG);
    ctx.fill_rect(0.0, 0.0, layout.canvas_w, layout.canvas_h);

    ctx.set_fill_style_str(CARD_BG);
    fill_round_rect(
        ctx,
        PADDING,
        PADDING,
        layout.canvas_w - PADDING * 2.0,
        layout.canvas_h - PADDING * 2.0,
        12.0,
    )?;

    ctx.set_fill_style_str(TITLE_TEXT);
    ctx.set_font("bold 20px sans-serif");
    ctx.set_text_align("center");
    ctx.fill_text(title, layout.canvas_w / 2.0, PADDING + 30.0)
        .map_err(|e| format!("draw title failed: {e:?}"))?;

    ctx.set_text_baseline("middle");
    for (i, pred) in predictions.iter().enumerate() {
        draw_cell(ctx, layout, i, pred)?;
    }
    Ok(())
}

fn draw_cell(
    ctx: &CanvasRenderingContext2d,
    layout: &ExportLayout,
    index: usize,
    pred: &Prediction,
) -> Result<(), String> {
    let (x, y) = layout.cell_origin(index);

    ctx.set_fill_style_str(CELL_BG);
    fill_round_rect(ctx, x, y, layout.cell, layout.cell, 8.0)?;
    ctx.set_stroke_style_str(CELL_BORDER);
    ctx.set_line_width(1.0);
    ctx.stroke_rect(x + 0.5, y + 0.5, layout.cell - 1.0, layout.cell - 1.0);

    if pred.state != TriState::Unmarked {
        let bx = x + layout.cell - BADGE_SIZE - 6.0;
        let by = y + 6.0;
        ctx.begin_path();
        ctx.arc(
            bx + BADGE_SIZE / 2.0,
            by + BADGE_SIZE / 2.0,
            BADGE_SIZE / 2.0,
            0.0,
            std::f64::consts::TAU,
        )
        .map_err(|e| format!("draw badge failed: {e:?}"))?;
        ctx.set_fill_style_str(if pred.state == TriState::ConfirmedTrue {
            TRUE_BADGE
        } else {
            FALSE_BADGE
        });
        ctx.fill();
        ctx.close_path();

        ctx.set_fill_style_str("#fff");
        ctx.set_font("bold 14px sans-serif");
        ctx.fill_text(
            pred.state.glyph(),
            bx + BADGE_SIZE / 2.0,
            by + BADGE_SIZE / 2.0 + 1.0,
        )
        .map_err(|e| format!("draw badge glyph failed: {e:?}"))?;
    }

    ctx.set_fill_style_str(CELL_TEXT);
    ctx.set_font("12px sans-serif");
    let label = if pred.name.is_empty() {
        &pred.description
    } else {
        &pred.name
    };
    let lines = wrap_lines(label, layout.cell - 16.0, |s| {
        ctx.measure_text(s).map(|m| m.width()).unwrap_or(0.0)
    });
    let block_height = lines.len() as f64 * LINE_HEIGHT;
    let mut line_y = y + layout.cell / 2.0 - block_height / 2.0 + LINE_HEIGHT / 2.0;
    for line in &lines {
        ctx.fill_text(line, x + layout.cell / 2.0, line_y)
            .map_err(|e| format!("draw cell text failed: {e:?}"))?;
        line_y += LINE_HEIGHT;
    }
    Ok(())
}

fn fill_round_rect(
    ctx: &CanvasRenderingContext2d,
    x: f64,
    y: f64,
    w: f64,
    h: f64,
    r: f64,
) -> Result<(), String> {
    let arc = |e: JsValue| format!("round rect failed: {e:?}");
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.arc_to(x + w, y, x + w, y + h, r).map_err(arc)?;
    ctx.arc_to(x + w, y + h, x, y + h, r).map_err(arc)?;
    ctx.arc_to(x, y + h, x, y, r).map_err(arc)?;
    ctx.arc_to(x, y, x + w, y, r).map_err(arc)?;
    ctx.close_path();
    ctx.fill();
    Ok(())
}

fn present_image(popup: &Window, title: &str, data_url: &str) -> Result<(), String> {
    let document: Document = popup
        .document()
        .ok_or_else(|| "popup document unavailable".to_string())?;
    document.set_title(&format!("{title}.png"));
    let body = document
        .body()
        .ok_or_else(|| "popup body unavailable".to_string())?;
    body.style()
        .set_property("margin", "0")
        .map_err(|e| format!("popup style failed: {e:?}"))?;
    body.style()
        .set_property("background", "#ffffff")
        .map_err(|e| format!("popup style failed: {e:?}"))?;

    let image: HtmlImageElement = document
        .create_element("img")
        .map_err(|e| format!("create img failed: {e:?}"))?
        .dyn_into()
        .map_err(|_| "img element cast failed".to_string())?;
    image.set_src(data_url);
    body.append_child(&image)
        .map_err(|e| format!("append img failed: {e:?}"))?;

    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("create link failed: {e:?}"))?
        .dyn_into()
        .map_err(|_| "anchor element cast failed".to_string())?;
    link.set_href(data_url);
    link.set_download(&format!("{title}.png"));
    link.set_text_content(Some("Download image"));
    link.style()
        .set_property("display", "block")
        .map_err(|e| format!("link style failed: {e:?}"))?;
    link.style()
        .set_property("margin", "8px")
        .map_err(|e| format!("link style failed: {e:?}"))?;
    body.append_child(&link)
        .map_err(|e| format!("append link failed: {e:?}"))?;
    Ok(())
}

/// Re-fetch the stored record and download it as `{id}.json`, pretty
/// printed. Read-only with respect to the server.
pub async fn download_card_json(id: &str) -> Result<(), String> {
    let body = api::fetch_card_raw(id).await?;
    let pretty = match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(value) => serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?,
        Err(_) => body,
    };

    let window = web_sys::window().ok_or_else(|| "window not available".to_string())?;
    let document = window
        .document()
        .ok_or_else(|| "document not available".to_string())?;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&pretty));
    let options = BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|e| format!("blob failed: {e:?}"))?;
    let url =
        Url::create_object_url_with_blob(&blob).map_err(|e| format!("object url failed: {e:?}"))?;

    let link: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("create link failed: {e:?}"))?
        .dyn_into()
        .map_err(|_| "anchor element cast failed".to_string())?;
    link.set_href(&url);
    link.set_download(&format!("{id}.json"));
    let body_el = document
        .body()
        .ok_or_else(|| "document body unavailable".to_string())?;
    body_el
        .append_child(&link)
        .map_err(|e| format!("append link failed: {e:?}"))?;
    link.click();
    link.remove();
    Url::revoke_object_url(&url).map_err(|e| format!("revoke url failed: {e:?}"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_caps_cell_size_on_wide_viewports() {
        let layout = ExportLayout::for_count(9, 1400.0);
        assert_eq!(layout.columns, 3);
        assert_eq!(layout.cell, MAX_CELL);
        assert_eq!(layout.grid_width, 240.0 * 3.0 + 2.0 * GAP);
        assert_eq!(layout.canvas_w, layout.grid_width + 2.0 * PADDING);
        assert_eq!(
            layout.canvas_h,
            TITLE_HEIGHT + layout.grid_width + 2.0 * PADDING
        );
    }

    #[test]
    fn layout_floors_cell_size_on_narrow_viewports() {
        let layout = ExportLayout::for_count(25, 100.0);
        assert_eq!(layout.columns, 5);
        assert_eq!(layout.cell, MIN_CELL);
    }

    #[test]
    fn cell_origins_walk_the_grid() {
        let layout = ExportLayout::for_count(9, 1400.0);
        let step = layout.cell + GAP;
        assert_eq!(layout.cell_origin(0), (PADDING, PADDING + TITLE_HEIGHT));
        assert_eq!(
            layout.cell_origin(4),
            (PADDING + step, PADDING + TITLE_HEIGHT + step)
        );
        assert_eq!(
            layout.cell_origin(8),
            (PADDING + 2.0 * step, PADDING + TITLE_HEIGHT + 2.0 * step)
        );
    }

    #[test]
    fn wrap_is_greedy_by_measured_width() {
        let by_chars = |s: &str| s.chars().count() as f64;
        assert_eq!(
            wrap_lines("aaaa bbbb cccc", 10.0, by_chars),
            vec!["aaaa bbbb", "cccc"]
        );
        assert_eq!(wrap_lines("short", 10.0, by_chars), vec!["short"]);
        // an overlong single word still gets a line of its own
        assert_eq!(
            wrap_lines("unbreakablelongword next", 10.0, by_chars),
            vec!["unbreakablelongword", "next"]
        );
        assert_eq!(wrap_lines("", 10.0, by_chars), vec![""]);
    }
}
