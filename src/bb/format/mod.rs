// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Presentation helpers over already-fetched records: dates, money, CSV
//! export and printable documents. Nothing here touches the network or
//! the session.

pub mod csv;
pub mod currency;
pub mod date;
pub mod pdf;
pub mod pdf_document;

// Re-export
pub use self::csv::{escape_field, to_csv, write_csv, Column};
pub use self::currency::{format_amount, format_currency};
pub use self::date::{format_date, format_date_time, format_relative, format_relative_str, parse_timestamp};
pub use self::pdf::{render_invoice, render_statement, Canvas, Invoice, Statement};
pub use self::pdf_document::{render_invoice_pdf, render_statement_pdf, PdfCanvas};
