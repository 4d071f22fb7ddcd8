// Copyright (c) 2026 Billbook. All Rights Reserved.

//! CSV export of fetched records.

use std::io::Write;

use chrono::NaiveDate;

use serde_json::Value;

use bb;
use bb::model::Record;

/// A CSV column: the record field it reads and the header it prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub key: &'static str,
    pub header: &'static str,
}

pub const CUSTOMER_COLUMNS: &[Column] = &[
    Column { key: "customerId", header: "Customer ID" },
    Column { key: "name", header: "Name" },
    Column { key: "phone", header: "Phone" },
    Column { key: "email", header: "Email" },
    Column { key: "address", header: "Address" },
    Column { key: "outstandingBalance", header: "Outstanding Balance" },
];

pub const BILL_COLUMNS: &[Column] = &[
    Column { key: "billNumber", header: "Bill Number" },
    Column { key: "customerName", header: "Customer" },
    Column { key: "billDate", header: "Bill Date" },
    Column { key: "dueDate", header: "Due Date" },
    Column { key: "amount", header: "Amount" },
    Column { key: "paidAmount", header: "Paid" },
    Column { key: "balanceAmount", header: "Balance" },
    Column { key: "status", header: "Status" },
];

pub const PAYMENT_COLUMNS: &[Column] = &[
    Column { key: "paymentId", header: "Payment ID" },
    Column { key: "billNumber", header: "Bill Number" },
    Column { key: "customerName", header: "Customer" },
    Column { key: "paymentDate", header: "Payment Date" },
    Column { key: "amount", header: "Amount" },
    Column { key: "paymentMode", header: "Mode" },
    Column { key: "cleared", header: "Cleared" },
];

/// Quote a field if it holds a comma, quote, CR or LF, doubling any quotes.
pub fn escape_field(field: &str) -> String {
    if field.contains(|c: char| c == ',' || c == '"' || c == '\r' || c == '\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Scalars print as text. Nested and missing values print empty.
fn cell(value: Option<&Value>) -> String {
    match value {
        Some(&Value::String(ref s)) => s.clone(),
        Some(&Value::Number(ref n)) => n.to_string(),
        Some(&Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn line<I: Iterator<Item = String>>(fields: I) -> String {
    fields.map(|f| escape_field(&f)).collect::<Vec<_>>().join(",")
}

/// Write a header row and one row per record.
pub fn write_csv<W: Write>(out: &mut W, columns: &[Column], rows: &[Record]) -> bb::Result<()> {
    writeln!(out, "{}", line(columns.iter().map(|c| c.header.to_string())))?;
    for row in rows {
        writeln!(out, "{}", line(columns.iter().map(|c| cell(row.get(c.key)))))?;
    }
    Ok(())
}

pub fn to_csv(columns: &[Column], rows: &[Record]) -> String {
    let mut buf = Vec::new();
    // Writing to a Vec cannot fail.
    let _ = write_csv(&mut buf, columns, rows);
    String::from_utf8_lossy(&buf).into_owned()
}

/// The download name for an export, e.g. `customers_2026-10-19.csv`.
pub fn export_file_name(prefix: &str, on: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, on.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_with_commas_are_quoted() {
        assert_eq!(escape_field("Acme, Inc."), "\"Acme, Inc.\"");
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(escape_field("cr\r"), "\"cr\r\"");
    }

    #[test]
    fn rows_follow_the_column_order() {
        let rows = vec![
            json!({
                "customerId": 7,
                "name": "Acme, Inc.",
                "phone": "9845012345",
                "email": null,
                "address": {"line1": "nested"},
                "outstandingBalance": 1250.5
            }),
            json!({"name": "Rao Traders"}),
        ];

        let csv = to_csv(CUSTOMER_COLUMNS, &rows);

        assert_eq!(
            csv,
            "Customer ID,Name,Phone,Email,Address,Outstanding Balance\n\
             7,\"Acme, Inc.\",9845012345,,,1250.5\n\
             ,Rao Traders,,,,\n"
        );
    }

    #[test]
    fn booleans_print_as_text() {
        let csv = to_csv(
            &PAYMENT_COLUMNS[5..],
            &[json!({"paymentMode": "Cheque", "cleared": false})],
        );
        assert_eq!(csv, "Mode,Cleared\nCheque,false\n");
    }

    #[test]
    fn export_names_carry_the_date() {
        let on = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(export_file_name("bills", on), "bills_2026-10-19.csv");
    }
}
