//! CSV encoding; money columns as two-decimal text

use super::{ExportRow, HEADERS, export_error};
use crate::utils::AppResult;
use crate::utils::money::format_amount;

pub fn write_csv(rows: &[ExportRow]) -> AppResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS).map_err(export_error)?;

    for row in rows {
        writer
            .write_record([
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
            ])
            .map_err(export_error)?;
    }

    writer.into_inner().map_err(export_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_rows;

    #[test]
    fn test_header_only_when_empty() {
        let bytes = write_csv(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Order ID,User ID,Token Number,Status,Payment Status,Date & Time,Item Name,\
             Quantity,Unit Price,Item Total,Order Total\n"
        );
    }

    #[test]
    fn test_one_row_per_item() {
        let text = String::from_utf8(write_csv(&sample_rows()).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "2,21CS042,4821,PLACED,PENDING,\"Mar 05, 2025 01:30 PM\",Masala Dosa,2,45.00,90.00,100.00"
        );
        assert!(lines[2].contains(",Tea,1,10.00,10.00,100.00"));
    }
}
