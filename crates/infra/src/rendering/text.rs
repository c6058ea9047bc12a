//! Fixed-width plain-text documents.

use std::fs;
use std::path::PathBuf;

use crate::export::safe_file_stem;

use super::{DocumentKind, DocumentRenderer, RenderError, RenderRequest};

/// Default line width in characters.
pub const DEFAULT_WIDTH: usize = 64;

/// Writes `invoice_<number>.txt` / `order_form_<number>.txt` into a directory.
#[derive(Debug, Clone)]
pub struct TextRenderer {
    output_dir: PathBuf,
    width: usize,
}

impl TextRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            width: DEFAULT_WIDTH,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(40);
        self
    }
}

impl DocumentRenderer for TextRenderer {
    fn render(&self, request: &RenderRequest<'_>, kind: DocumentKind) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!(
            "{}_{}.txt",
            kind.file_prefix(),
            safe_file_stem(&request.meta.invoice_number)
        ));
        fs::write(&path, render_document(request, kind, self.width))?;
        tracing::info!(kind = kind.title(), "document written to {:?}", path);
        Ok(path)
    }
}

/// Document body as text. Pure: same request, same output.
pub fn render_document(request: &RenderRequest<'_>, kind: DocumentKind, width: usize) -> String {
    let mut doc = TextLayout::new(width);
    let store = request.store;
    let school = request.school;

    doc.sep_double();
    doc.center(kind.title());
    doc.center(&store.name);
    doc.center(&join_present(&[store.phone.as_str(), store.email.as_str()], " | "));
    doc.sep_double();

    doc.line_lr(
        &format!("Invoice #: {}", request.meta.invoice_number),
        &format!("Delivery: {}", request.meta.formatted_date),
    );
    doc.line(&format!("School: {}", school.name));
    if !school.address.is_empty() {
        doc.line(&format!("Address: {}", school.address));
    }
    let contact = join_present(&[school.contact_name.as_str(), school.contact_email.as_str()], " ");
    if !contact.is_empty() {
        doc.line(&format!("Contact: {contact}"));
    }
    if !school.manager_name.is_empty() || !school.phone.is_empty() {
        doc.line(&format!(
            "Manager: {}",
            join_present(&[school.manager_name.as_str(), school.phone.as_str()], " ")
        ));
    }
    if !school.delivery_time_description.is_empty() {
        doc.line(&format!("Delivery window: {}", school.delivery_time_only()));
    }
    doc.sep_single();

    let show_prices = kind.shows_prices();
    if show_prices {
        doc.row(["Qty", "Item", "Unit", "Total"]);
    } else {
        doc.row(["Qty", "Item", "", ""]);
    }
    doc.sep_single();

    for line in &request.lines {
        let qty = line.quantity.to_string();
        let item = if line.label == line.code {
            line.code.clone()
        } else {
            format!("{} {}", line.code, line.label)
        };
        if show_prices {
            let unit = format!("${}", line.unit_price);
            let total = format!("${}", line.line_total);
            doc.row([qty.as_str(), item.as_str(), unit.as_str(), total.as_str()]);
        } else {
            doc.row([qty.as_str(), item.as_str(), "", ""]);
        }
    }
    doc.sep_single();

    if show_prices {
        let order = request.order;
        doc.line_lr("Subtotal", &format!("${}", order.subtotal()));
        doc.line_lr("Delivery", &format!("${}", order.delivery_fee()));
        doc.line_lr("Total", &format!("${}", order.total()));
    } else {
        let count: u64 = request.lines.iter().map(|l| u64::from(l.quantity)).sum();
        doc.line_lr("Total items", &count.to_string());
    }
    doc.sep_double();

    doc.build()
}

fn join_present(parts: &[&str], sep: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(sep)
}

/// Line-oriented text builder with a fixed width.
struct TextLayout {
    buf: String,
    width: usize,
}

impl TextLayout {
    fn new(width: usize) -> Self {
        Self {
            buf: String::with_capacity(2048),
            width,
        }
    }

    fn line(&mut self, s: &str) {
        self.buf.push_str(s.trim_end());
        self.buf.push('\n');
    }

    fn center(&mut self, s: &str) {
        let len = s.chars().count();
        let pad = self.width.saturating_sub(len) / 2;
        self.line(&format!("{}{}", " ".repeat(pad), s));
    }

    fn sep_double(&mut self) {
        self.line(&"=".repeat(self.width));
    }

    fn sep_single(&mut self) {
        self.line(&"-".repeat(self.width));
    }

    /// Left text left-aligned, right text right-aligned.
    fn line_lr(&mut self, left: &str, right: &str) {
        let used = left.chars().count() + right.chars().count();
        if used >= self.width {
            self.line(&format!("{left} {right}"));
        } else {
            self.line(&format!("{left}{}{right}", " ".repeat(self.width - used)));
        }
    }

    /// Qty | item | unit | total, with the item column absorbing the slack.
    fn row(&mut self, cols: [&str; 4]) {
        const QTY: usize = 5;
        const MONEY: usize = 11;
        let item_width = self.width.saturating_sub(QTY + 2 * MONEY).max(10);
        let item: String = cols[1].chars().take(item_width).collect();
        self.line(&format!(
            "{:<qty$}{:<item_w$}{:>money$}{:>money$}",
            cols[0],
            item,
            cols[2],
            cols[3],
            qty = QTY,
            item_w = item_width,
            money = MONEY,
        ));
    }

    fn build(self) -> String {
        self.buf
    }
}
