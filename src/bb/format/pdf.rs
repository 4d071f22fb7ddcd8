// Copyright (c) 2026 Billbook. All Rights Reserved.

//! Invoice and customer statement layout.
//!
//! Documents are laid out as fixed-position drawing calls against a
//! `Canvas`, in millimetres from the top-left corner of an A4 page.
//! `pdf_document::PdfCanvas` turns those calls into a PDF file.

use serde_json::Value;

use bb::format::currency::format_amount;
use bb::format::date::format_date;
use bb::model::Record;

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 15.0;
/// Nothing is drawn below this line; rows that would cross it start a new
/// page.
pub const BOTTOM: f32 = PAGE_HEIGHT - MARGIN;

const RIGHT: f32 = PAGE_WIDTH - MARGIN;
const BAND_HEIGHT: f32 = 28.0;
const ROW_HEIGHT: f32 = 8.0;
const LINE_HEIGHT: f32 = 5.0;
const BASELINE: f32 = 5.5;
const CURRENCY: &str = "Rs. ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub bold: bool,
    pub align: Align,
    pub color: Color,
}

impl TextStyle {
    pub fn body() -> Self {
        Self {
            size: 10.0,
            bold: false,
            align: Align::Left,
            color: BLACK,
        }
    }

    pub fn size(self, size: f32) -> Self {
        Self { size, ..self }
    }

    pub fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub fn align(self, align: Align) -> Self {
        Self { align, ..self }
    }

    pub fn color(self, color: Color) -> Self {
        Self { color, ..self }
    }
}

/// An RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

pub const BLACK: Color = Color(0, 0, 0);
pub const WHITE: Color = Color(255, 255, 255);
pub const BRAND: Color = Color(41, 98, 255);
pub const HEADER_FILL: Color = Color(230, 236, 245);
pub const STRIPE_FILL: Color = Color(247, 247, 247);

/// The drawing surface a document is laid out on.
pub trait Canvas {
    /// Draw `text` with its baseline at `y`. `x` is the left edge, centre or
    /// right edge depending on `style.align`.
    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle);

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);

    fn filled_rect(&mut self, x: f32, y: f32, width: f32, height: f32, fill: Color);

    /// Start a fresh page. Later coordinates are relative to it.
    fn new_page(&mut self);
}

// =============================================================================

fn text_field(record: &Record, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| match record.get(*k) {
            Some(&Value::String(ref s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(&Value::Number(ref n)) => Some(n.to_string()),
            _ => None,
        })
        .next()
}

fn number_field(record: &Record, keys: &[&str]) -> f64 {
    keys.iter()
        .filter_map(|k| match record.get(*k) {
            Some(&Value::Number(ref n)) => n.as_f64(),
            Some(&Value::String(ref s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        })
        .next()
        .unwrap_or(0.0)
}

fn money(amount: f64) -> String {
    format!("{}{}", CURRENCY, format_amount(amount))
}

/// A name and the lines printed under it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Party {
    pub name: String,
    pub details: Vec<String>,
}

impl Party {
    /// The seller, from the stored business information.
    pub fn business(info: &Record) -> Self {
        let mut details = Vec::new();
        details.extend(text_field(info, &["address"]));
        details.extend(text_field(info, &["phone"]).map(|p| format!("Phone: {}", p)));
        details.extend(text_field(info, &["email"]));
        details.extend(text_field(info, &["gstin", "gstNumber"]).map(|g| format!("GSTIN: {}", g)));
        Self {
            name: text_field(info, &["businessName", "organizationName"]).unwrap_or_default(),
            details,
        }
    }

    /// The buyer. Accepts a customer record or a bill carrying
    /// `customer*` fields.
    pub fn customer(record: &Record) -> Self {
        let mut details = Vec::new();
        details.extend(text_field(record, &["customerAddress", "address"]));
        details.extend(text_field(record, &["customerPhone", "phone"]).map(|p| format!("Phone: {}", p)));
        details.extend(text_field(record, &["customerEmail", "email"]));
        Self {
            name: text_field(record, &["customerName", "name"]).unwrap_or_default(),
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaymentLine {
    pub date: Option<String>,
    pub mode: String,
    pub reference: String,
    pub amount: f64,
}

impl PaymentLine {
    pub fn from_record(payment: &Record) -> Self {
        Self {
            date: text_field(payment, &["paymentDate", "createdAt"]),
            mode: text_field(payment, &["paymentMode", "mode"]).unwrap_or_default(),
            reference: text_field(payment, &["chequeNumber", "referenceNumber"]).unwrap_or_default(),
            amount: number_field(payment, &["amount"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub number: String,
    pub bill_date: Option<String>,
    pub due_date: Option<String>,
    pub status: String,
    pub description: String,
    pub amount: f64,
    pub business: Party,
    pub customer: Party,
    pub payments: Vec<PaymentLine>,
}

impl Invoice {
    pub fn from_records(bill: &Record, business: &Record, payments: &[Record]) -> Self {
        Self {
            number: text_field(bill, &["billNumber", "billId", "id"]).unwrap_or_default(),
            bill_date: text_field(bill, &["billDate", "createdAt"]),
            due_date: text_field(bill, &["dueDate"]),
            status: text_field(bill, &["status"]).unwrap_or_default(),
            description: text_field(bill, &["description"]).unwrap_or_else(|| "Bill amount".to_string()),
            amount: number_field(bill, &["amount", "totalAmount"]),
            business: Party::business(business),
            customer: Party::customer(bill),
            payments: payments.iter().map(PaymentLine::from_record).collect(),
        }
    }

    pub fn paid(&self) -> f64 {
        self.payments.iter().map(|p| p.amount).sum()
    }

    pub fn balance(&self) -> f64 {
        self.amount - self.paid()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatementEntry {
    pub date: Option<String>,
    pub particulars: String,
    pub debit: f64,
    pub credit: f64,
}

impl StatementEntry {
    pub fn from_record(entry: &Record) -> Self {
        Self {
            date: text_field(entry, &["date", "createdAt"]),
            particulars: text_field(entry, &["particulars", "description"]).unwrap_or_default(),
            debit: number_field(entry, &["debit"]),
            credit: number_field(entry, &["credit"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub business: Party,
    pub customer: Party,
    pub generated_on: Option<String>,
    pub opening_balance: f64,
    pub entries: Vec<StatementEntry>,
}

impl Statement {
    /// Build from a customer statement report and the stored business
    /// information.
    pub fn from_records(statement: &Record, business: &Record) -> Self {
        let customer = statement.get("customer").unwrap_or(statement);
        let entries = match statement.get("entries") {
            Some(&Value::Array(ref entries)) => entries.iter().map(StatementEntry::from_record).collect(),
            _ => Vec::new(),
        };
        Self {
            business: Party::business(business),
            customer: Party::customer(customer),
            generated_on: text_field(statement, &["generatedOn"]),
            opening_balance: number_field(statement, &["openingBalance"]),
            entries,
        }
    }

    /// The balance after each entry, in order.
    pub fn running_balances(&self) -> Vec<f64> {
        let mut balance = self.opening_balance;
        self.entries
            .iter()
            .map(|e| {
                balance += e.debit - e.credit;
                balance
            })
            .collect()
    }

    pub fn closing_balance(&self) -> f64 {
        self.running_balances()
            .last()
            .cloned()
            .unwrap_or(self.opening_balance)
    }
}

// =============================================================================

struct TableColumn {
    header: &'static str,
    x: f32,
    align: Align,
}

// Tracks the vertical cursor and breaks pages.
struct Layout<'a, C: 'a + Canvas> {
    canvas: &'a mut C,
    y: f32,
}

impl<'a, C: 'a + Canvas> Layout<'a, C> {
    fn new(canvas: &'a mut C) -> Self {
        Self { canvas, y: MARGIN }
    }

    fn text(&mut self, x: f32, text: &str, style: TextStyle) {
        self.canvas.text(x, self.y, text, style);
    }

    // Returns true if a new page was started.
    fn ensure(&mut self, height: f32) -> bool {
        if self.y + height > BOTTOM {
            self.canvas.new_page();
            self.y = MARGIN;
            true
        } else {
            false
        }
    }

    fn band(&mut self, title: &str, business: &Party) {
        self.canvas.filled_rect(0.0, 0.0, PAGE_WIDTH, BAND_HEIGHT, BRAND);
        let style = TextStyle::body().size(18.0).bold().color(WHITE);
        self.canvas.text(MARGIN, 16.0, &business.name, style);
        self.canvas.text(RIGHT, 16.0, title, style.align(Align::Right));
        self.y = BAND_HEIGHT + 8.0;
        for detail in &business.details {
            self.text(MARGIN, detail, TextStyle::body().size(9.0));
            self.y += LINE_HEIGHT;
        }
        self.y += 4.0;
    }

    fn party(&mut self, label: &str, party: &Party, facts: &[(&str, String)]) {
        let top = self.y;
        self.text(MARGIN, label, TextStyle::body().bold());
        self.y += LINE_HEIGHT + 1.0;
        self.text(MARGIN, &party.name, TextStyle::body().size(11.0).bold());
        for detail in &party.details {
            self.y += LINE_HEIGHT;
            self.text(MARGIN, detail, TextStyle::body().size(9.0));
        }
        let left_bottom = self.y;

        self.y = top;
        for &(name, ref value) in facts {
            self.text(RIGHT - 45.0, name, TextStyle::body().bold().align(Align::Right));
            self.text(RIGHT, value, TextStyle::body().align(Align::Right));
            self.y += LINE_HEIGHT + 1.0;
        }
        self.y = self.y.max(left_bottom) + 8.0;
    }

    fn table_header(&mut self, columns: &[TableColumn]) {
        self.canvas.filled_rect(MARGIN, self.y, RIGHT - MARGIN, ROW_HEIGHT, HEADER_FILL);
        for col in columns {
            let style = TextStyle::body().bold().align(col.align);
            self.canvas.text(col.x, self.y + BASELINE, col.header, style);
        }
        self.y += ROW_HEIGHT;
    }

    fn table(&mut self, columns: &[TableColumn], rows: &[Vec<String>]) {
        self.ensure(ROW_HEIGHT * 2.0);
        self.table_header(columns);
        for (i, row) in rows.iter().enumerate() {
            if self.ensure(ROW_HEIGHT) {
                self.table_header(columns);
            }
            if i % 2 == 1 {
                self.canvas.filled_rect(MARGIN, self.y, RIGHT - MARGIN, ROW_HEIGHT, STRIPE_FILL);
            }
            for (col, cell) in columns.iter().zip(row) {
                let style = TextStyle::body().align(col.align);
                self.canvas.text(col.x, self.y + BASELINE, cell, style);
            }
            self.y += ROW_HEIGHT;
        }
        self.canvas.line(MARGIN, self.y, RIGHT, self.y);
        self.y += 6.0;
    }

    fn totals(&mut self, lines: &[(&str, f64)]) {
        self.ensure(ROW_HEIGHT * lines.len() as f32);
        for (i, &(label, amount)) in lines.iter().enumerate() {
            let mut style = TextStyle::body().align(Align::Right);
            if i + 1 == lines.len() {
                style = style.bold().size(11.0);
            }
            self.canvas.text(RIGHT - 45.0, self.y + BASELINE, label, style);
            self.canvas.text(RIGHT, self.y + BASELINE, &money(amount), style);
            self.y += ROW_HEIGHT;
        }
    }

    fn footer(&mut self, note: &str) {
        self.ensure(ROW_HEIGHT * 2.0);
        self.y += ROW_HEIGHT;
        let style = TextStyle::body().size(9.0).align(Align::Center);
        self.text(PAGE_WIDTH / 2.0, note, style);
    }
}

/// Lay out a single-bill invoice with its payments and balance due.
pub fn render_invoice<C: Canvas>(canvas: &mut C, invoice: &Invoice) {
    let mut page = Layout::new(canvas);
    page.band("INVOICE", &invoice.business);

    let mut facts = vec![
        ("Invoice No:", invoice.number.clone()),
        ("Date:", format_date(invoice.bill_date.as_ref().map(String::as_str))),
    ];
    if invoice.due_date.is_some() {
        facts.push(("Due Date:", format_date(invoice.due_date.as_ref().map(String::as_str))));
    }
    if !invoice.status.is_empty() {
        facts.push(("Status:", invoice.status.clone()));
    }
    page.party("Bill To", &invoice.customer, &facts);

    let items = [
        TableColumn { header: "#", x: MARGIN + 2.0, align: Align::Left },
        TableColumn { header: "Description", x: MARGIN + 12.0, align: Align::Left },
        TableColumn { header: "Amount", x: RIGHT - 2.0, align: Align::Right },
    ];
    page.table(
        &items,
        &[vec!["1".to_string(), invoice.description.clone(), money(invoice.amount)]],
    );

    if !invoice.payments.is_empty() {
        let columns = [
            TableColumn { header: "Paid On", x: MARGIN + 2.0, align: Align::Left },
            TableColumn { header: "Mode", x: MARGIN + 45.0, align: Align::Left },
            TableColumn { header: "Reference", x: MARGIN + 85.0, align: Align::Left },
            TableColumn { header: "Amount", x: RIGHT - 2.0, align: Align::Right },
        ];
        let rows: Vec<Vec<String>> = invoice
            .payments
            .iter()
            .map(|p| {
                vec![
                    format_date(p.date.as_ref().map(String::as_str)),
                    p.mode.clone(),
                    p.reference.clone(),
                    money(p.amount),
                ]
            })
            .collect();
        page.table(&columns, &rows);
    }

    page.totals(&[
        ("Bill Amount", invoice.amount),
        ("Amount Paid", invoice.paid()),
        ("Balance Due", invoice.balance()),
    ]);
    page.footer("Thank you for your business!");
}

/// Lay out a customer statement with a running balance column.
pub fn render_statement<C: Canvas>(canvas: &mut C, statement: &Statement) {
    let mut page = Layout::new(canvas);
    page.band("STATEMENT", &statement.business);

    let mut facts = Vec::new();
    if statement.generated_on.is_some() {
        facts.push((
            "Generated:",
            format_date(statement.generated_on.as_ref().map(String::as_str)),
        ));
    }
    page.party("Statement For", &statement.customer, &facts);

    let columns = [
        TableColumn { header: "Date", x: MARGIN + 2.0, align: Align::Left },
        TableColumn { header: "Particulars", x: MARGIN + 30.0, align: Align::Left },
        TableColumn { header: "Debit", x: RIGHT - 62.0, align: Align::Right },
        TableColumn { header: "Credit", x: RIGHT - 32.0, align: Align::Right },
        TableColumn { header: "Balance", x: RIGHT - 2.0, align: Align::Right },
    ];
    let blank_zero = |v: f64| if v == 0.0 { String::new() } else { money(v) };
    let mut rows = vec![vec![
        String::new(),
        "Opening Balance".to_string(),
        String::new(),
        String::new(),
        money(statement.opening_balance),
    ]];
    for (entry, balance) in statement.entries.iter().zip(statement.running_balances()) {
        rows.push(vec![
            format_date(entry.date.as_ref().map(String::as_str)),
            entry.particulars.clone(),
            blank_zero(entry.debit),
            blank_zero(entry.credit),
            money(balance),
        ]);
    }
    page.table(&columns, &rows);

    page.totals(&[("Closing Balance", statement.closing_balance())]);
}
