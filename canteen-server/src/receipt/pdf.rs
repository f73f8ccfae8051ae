//! A4 receipt layout (printpdf, builtin Helvetica)
//!
//! Coordinates are millimetres from the bottom-left corner. Text is drawn
//! with the current fill colour, so every block resets it.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};
use shared::error::ErrorCode;

use super::Receipt;
use crate::utils::money::format_amount;
use crate::utils::time::format_datetime;
use crate::utils::{AppError, AppResult};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN: f32 = 20.0;
const ROW_H: f32 = 8.0;
const GRID: f32 = 0.3;
const QR_SIZE: f32 = 50.0;

/// Column widths for the two-column info tables and the items table
const INFO_COLS: [f32; 2] = [50.0, 100.0];
const ITEM_COLS: [f32; 4] = [75.0, 25.0, 35.0, 35.0];

/// Longest item name that fits the first items column at 10pt
const MAX_ITEM_NAME_CHARS: usize = 38;

fn pdf_error(err: impl std::fmt::Display) -> AppError {
    AppError::with_message(ErrorCode::RenderFailed, format!("PDF rendering failed: {err}"))
}

fn rgb(hex: u32) -> Color {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Color::Rgb(Rgb::new(channel(16), channel(8), channel(0), None))
}

const BLACK: u32 = 0x000000;
const WHITE: u32 = 0xffffff;
const TITLE: u32 = 0x1a1f2e;
const HEADING: u32 = 0x2c3e50;
const LABEL_BG: u32 = 0xecf0f1;
const HEADER_BG: u32 = 0x34495e;
const STRIPE_BG: u32 = 0xf8f9fa;
const GRID_COLOR: u32 = 0x808080;

#[derive(Clone, Copy)]
enum RowStyle {
    /// Bold first cell on a light background (label/value tables)
    Info,
    /// White bold text on a dark background
    Header,
    Body { striped: bool },
}

/// Top-down page writer that starts a new page when it runs out of room
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl PageWriter {
    fn new(title: &str) -> AppResult<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_W), Mm(PAGE_H), "Receipt");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_H - MARGIN,
        })
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN {
            let (page, layer) = self.doc.add_page(Mm(PAGE_W), Mm(PAGE_H), "Receipt");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_H - MARGIN;
        }
    }

    fn gap(&mut self, height: f32) {
        self.y -= height;
    }

    fn fill_rect(&self, x: f32, y: f32, w: f32, h: f32, color: u32) {
        self.layer.set_fill_color(rgb(color));
        self.layer.add_rect(Rect::new(Mm(x), Mm(y), Mm(x + w), Mm(y + h)));
    }

    fn text_at(&self, text: &str, size: f32, x: f32, y: f32, bold: bool, color: u32) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(rgb(color));
        self.layer.use_text(text, size, Mm(x), Mm(y), font);
    }

    /// Rough Helvetica advance width, good enough for centring headings
    fn approx_width(text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.5 * 0.3528
    }

    fn centered(&mut self, text: &str, size: f32, bold: bool, color: u32) {
        let line_h = size * 0.3528 * 1.6;
        self.ensure_space(line_h);
        self.y -= line_h;
        let x = ((PAGE_W - Self::approx_width(text, size)) / 2.0).max(MARGIN);
        self.text_at(text, size, x, self.y, bold, color);
    }

    fn heading(&mut self, text: &str) {
        self.ensure_space(10.0);
        self.y -= 8.0;
        self.text_at(text, 14.0, MARGIN, self.y, true, HEADING);
        self.y -= 2.0;
    }

    fn row(&mut self, cells: &[&str], widths: &[f32], style: RowStyle) {
        self.ensure_space(ROW_H);
        let top = self.y;
        let bottom = top - ROW_H;
        let total: f32 = widths.iter().sum();

        match style {
            RowStyle::Header => self.fill_rect(MARGIN, bottom, total, ROW_H, HEADER_BG),
            RowStyle::Info => self.fill_rect(MARGIN, bottom, widths[0], ROW_H, LABEL_BG),
            RowStyle::Body { striped: true } => {
                self.fill_rect(MARGIN, bottom, total, ROW_H, STRIPE_BG)
            }
            RowStyle::Body { striped: false } => {}
        }

        let mut x = MARGIN;
        for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
            let (bold, color) = match style {
                RowStyle::Header => (true, WHITE),
                RowStyle::Info => (i == 0, BLACK),
                RowStyle::Body { .. } => (false, BLACK),
            };
            self.text_at(cell, 10.0, x + 2.0, bottom + 2.7, bold, color);
            x += width;
        }

        // grid: top and bottom rules, then one vertical rule per column edge
        self.fill_rect(MARGIN, top - GRID / 2.0, total, GRID, GRID_COLOR);
        self.fill_rect(MARGIN, bottom - GRID / 2.0, total, GRID, GRID_COLOR);
        let mut edge = MARGIN;
        self.fill_rect(edge - GRID / 2.0, bottom, GRID, ROW_H, GRID_COLOR);
        for width in widths {
            edge += width;
            self.fill_rect(edge - GRID / 2.0, bottom, GRID, ROW_H, GRID_COLOR);
        }

        self.y = bottom;
    }

    fn small_note(&mut self, text: &str) {
        self.ensure_space(5.0);
        self.y -= 4.5;
        self.text_at(text, 8.0, MARGIN + 2.0, self.y, false, GRID_COLOR);
    }

    /// Dark modules as filled squares, `QR_SIZE` mm wide including the quiet zone
    fn qr(&mut self, width: u32, modules: &[bool]) {
        let quiet = crate::payment::qr::QUIET_ZONE;
        let module = QR_SIZE / (width + 2 * quiet) as f32;
        self.ensure_space(QR_SIZE);
        let top = self.y;

        self.layer.set_fill_color(rgb(BLACK));
        for row in 0..width {
            for col in 0..width {
                if !modules[(row * width + col) as usize] {
                    continue;
                }
                let x = MARGIN + (col + quiet) as f32 * module;
                let y = top - (row + quiet + 1) as f32 * module;
                self.layer
                    .add_rect(Rect::new(Mm(x), Mm(y), Mm(x + module), Mm(y + module)));
            }
        }
        self.y = top - QR_SIZE;
    }

    fn finish(self) -> AppResult<Vec<u8>> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    let mut short: String = name.chars().take(max.saturating_sub(3)).collect();
    short.push_str("...");
    short
}

/// Render a receipt as PDF bytes
pub fn render_receipt(receipt: &Receipt<'_>) -> AppResult<Vec<u8>> {
    let order = receipt.order;
    let mut w = PageWriter::new(&format!("Receipt - Order {}", order.id))?;

    w.centered("CANTEEN PAYMENT SYSTEM", 24.0, true, TITLE);
    w.gap(4.0);
    w.centered("OFFICIAL RECEIPT", 14.0, true, HEADING);
    w.gap(8.0);

    let order_id = order.id.to_string();
    let placed_at = format_datetime(order.created_at, receipt.tz);
    for (label, value) in [
        ("Order ID:", order_id.as_str()),
        ("Token Number:", order.token_number.as_str()),
        ("Date & Time:", placed_at.as_str()),
        ("Status:", order.status.as_str()),
        ("Payment:", order.payment_status.as_str()),
    ] {
        w.row(&[label, value], &INFO_COLS, RowStyle::Info);
    }

    w.heading("Customer Details");
    w.row(&["Customer Name:", receipt.customer_name], &INFO_COLS, RowStyle::Info);
    w.row(&["Customer ID:", receipt.customer_id], &INFO_COLS, RowStyle::Info);

    w.heading("Ordered Items");
    w.row(
        &["Item Name", "Quantity", "Unit Price (Rs)", "Total (Rs)"],
        &ITEM_COLS,
        RowStyle::Header,
    );
    for (i, item) in order.items.iter().enumerate() {
        let name = truncate(&item.item_name, MAX_ITEM_NAME_CHARS);
        let qty = item.qty.to_string();
        let unit = format_amount(item.unit_price);
        let total = format_amount(item.line_total);
        w.row(
            &[name.as_str(), qty.as_str(), unit.as_str(), total.as_str()],
            &ITEM_COLS,
            RowStyle::Body { striped: i % 2 == 1 },
        );
        if let Some(desc) = &item.offer_desc {
            w.small_note(&format!(
                "{desc} (was Rs {})",
                format_amount(item.original_price)
            ));
        }
    }

    w.ensure_space(12.0);
    w.gap(10.0);
    let total_line = format!("Total Amount: Rs {}", format_amount(order.total_amount));
    let x = MARGIN + ITEM_COLS.iter().sum::<f32>() - PageWriter::approx_width(&total_line, 12.0);
    w.text_at(&total_line, 12.0, x, w.y, true, HEADING);
    w.gap(6.0);

    if let Some(qr) = receipt.qr {
        w.heading("Transaction QR Code");
        w.qr(qr.width(), &qr.modules());
    }

    w.gap(10.0);
    w.centered("Thank you for your order!", 10.0, false, BLACK);
    w.centered("This is a computer-generated receipt.", 8.0, false, GRID_COLOR);

    w.finish()
}
