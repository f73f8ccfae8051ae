//! XLSX encoding: sheet `Orders`, styled header, numeric cells

use rust_xlsxwriter::{Format, FormatAlign, Workbook};

use super::{ExportRow, HEADERS, export_error};
use crate::utils::AppResult;
use crate::utils::money::format_amount;

const MAX_COLUMN_WIDTH: usize = 50;
const HEADER_FILL: u32 = 0x366092;

/// Display text per cell, used for column widths
fn cell_texts(row: &ExportRow) -> [String; 11] {
    [
        row.order_id.to_string(),
        row.user_id.clone(),
        row.token_number.clone(),
        row.status.clone(),
        row.payment_status.clone(),
        row.date_time.clone(),
        row.item_name.clone(),
        row.qty.to_string(),
        format_amount(row.unit_price),
        format_amount(row.line_total),
        format_amount(row.order_total),
    ]
}

/// `min(longest cell + 2, 50)` per column, header included
pub(crate) fn column_widths(rows: &[ExportRow]) -> [usize; 11] {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, text) in widths.iter_mut().zip(cell_texts(row)) {
            *width = (*width).max(text.chars().count());
        }
    }
    widths.map(|w| (w + 2).min(MAX_COLUMN_WIDTH))
}

pub fn write_xlsx(rows: &[ExportRow]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new()
        .set_bold()
        .set_font_color(0xFFFFFF)
        .set_background_color(HEADER_FILL)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter);
    let money = Format::new().set_num_format("0.00");

    let sheet = workbook.add_worksheet();
    sheet.set_name("Orders").map_err(export_error)?;

    for (col, title) in HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *title, &header)
            .map_err(export_error)?;
    }

    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_number(r, 0, row.order_id as f64).map_err(export_error)?;
        sheet.write_string(r, 1, &row.user_id).map_err(export_error)?;
        sheet.write_string(r, 2, &row.token_number).map_err(export_error)?;
        sheet.write_string(r, 3, &row.status).map_err(export_error)?;
        sheet.write_string(r, 4, &row.payment_status).map_err(export_error)?;
        sheet.write_string(r, 5, &row.date_time).map_err(export_error)?;
        sheet.write_string(r, 6, &row.item_name).map_err(export_error)?;
        sheet.write_number(r, 7, row.qty as f64).map_err(export_error)?;
        sheet
            .write_number_with_format(r, 8, row.unit_price, &money)
            .map_err(export_error)?;
        sheet
            .write_number_with_format(r, 9, row.line_total, &money)
            .map_err(export_error)?;
        sheet
            .write_number_with_format(r, 10, row.order_total, &money)
            .map_err(export_error)?;
    }

    for (col, width) in column_widths(rows).iter().enumerate() {
        sheet
            .set_column_width(col as u16, *width as f64)
            .map_err(export_error)?;
    }

    workbook.save_to_buffer().map_err(export_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_rows;

    #[test]
    fn test_xlsx_is_zip() {
        let bytes = write_xlsx(&sample_rows()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        let empty = write_xlsx(&[]).unwrap();
        assert_eq!(&empty[..2], b"PK");
    }

    #[test]
    fn test_column_widths() {
        let widths = column_widths(&sample_rows());
        // "Order ID" header (8) beats "2"
        assert_eq!(widths[0], 10);
        // "Mar 05, 2025 01:30 PM" (21)
        assert_eq!(widths[5], 23);

        let mut long = sample_rows();
        long[0].item_name = "x".repeat(80);
        assert_eq!(column_widths(&long)[6], MAX_COLUMN_WIDTH);
    }
}
