use chrono::{DateTime, Local};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use tcu_types::models::MessageInfo;

use crate::dates::{format_joined_date, format_timestamp};

pub const EXTENSION: &str = ".xlsx";
pub const CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const HEADERS: [&str; 7] = ["#", "Name", "Email", "Company Name", "Country", "Phone", "Sent At"];
const WIDTHS: [f64; 7] = [5.0, 20.0, 35.0, 30.0, 20.0, 20.0, 20.0];

pub fn file_name(now: &DateTime<Local>) -> String {
    format!("{}_customer_inquiries{}", format_timestamp(now), EXTENSION)
}

pub fn report_title(now: &DateTime<Local>) -> String {
    format!("Customer Inquiries Report ({})", format_joined_date(&format_timestamp(now)))
}

/// Build the customer-inquiries workbook: a merged title row, a header row,
/// then one row per message.
pub fn customer_inquiries(messages: &[MessageInfo], now: &DateTime<Local>) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Messages")?;

    let last_col = (HEADERS.len() - 1) as u16;
    sheet.merge_range(0, 0, 0, last_col, &report_title(now), &bold)?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(1, col as u16, *header, &bold)?;
    }
    for (col, width) in WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }

    for (index, message) in messages.iter().enumerate() {
        let row = (index + 2) as u32;
        sheet.write_number(row, 0, (index + 1) as f64)?;
        sheet.write_string(row, 1, message.full_name())?;
        sheet.write_string(row, 2, &message.email)?;
        sheet.write_string(row, 3, &message.company_name)?;
        sheet.write_string(row, 4, &message.country)?;
        sheet.write_string(row, 5, &message.phone)?;
        sheet.write_string(row, 6, format_joined_date(&message.created_at))?;
    }

    workbook.save_to_buffer()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 1, 10, 15, 0).unwrap()
    }

    fn message(id: &str) -> MessageInfo {
        MessageInfo {
            id: id.into(),
            first_name: "Aye".into(),
            last_name: "Chan".into(),
            email: "aye@example.com".into(),
            phone: "+95912345".into(),
            company_name: "TCU".into(),
            country: "Myanmar".into(),
            job_title: "Install".into(),
            job_details: None,
            read: false,
            created_at: "20250301101500".into(),
        }
    }

    #[test]
    fn names_follow_timestamp() {
        assert_eq!(file_name(&now()), "20250301101500_customer_inquiries.xlsx");
        assert_eq!(report_title(&now()), "Customer Inquiries Report (01 Mar 2025)");
    }

    #[test]
    fn workbook_is_a_zip_container() {
        let bytes = customer_inquiries(&[message("m1"), message("m2")], &now()).unwrap();
        assert!(bytes.len() > 100);
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn empty_export_still_has_headers() {
        let bytes = customer_inquiries(&[], &now()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
