//! Payment receipt generation.
//!
//! Receipts are self-contained HTML documents with embedded styles so
//! they render and print anywhere without the application present.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::config::APP_NAME;
use crate::models::Bill;

#[derive(Debug, Clone)]
pub struct Receipt {
    pub filename: String,
    pub html: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ReceiptError {
    #[error("Failed to write receipt: {0}")]
    Io(#[from] io::Error),
}

impl Receipt {
    /// Write the receipt under `dir`, creating it as needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ReceiptError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(&self.filename);
        fs::write(&path, &self.html)?;
        Ok(path)
    }
}

/// Render a receipt for a paid bill.
///
/// The receipt number embeds the bill id and the payment timestamp so
/// re-rendering a receipt never collides with an earlier one.
pub fn render(bill: &Bill, paid_on: NaiveDateTime) -> Receipt {
    let receipt_number = format!("RCP-{}-{}", bill.id, paid_on.and_utc().timestamp_millis());
    let filename = format!(
        "receipt-{}-{}.html",
        bill.patient_name.trim().replace(' ', "-"),
        bill.id
    );

    let mut rows = String::new();
    if bill.doctor_fee > 0.0 {
        rows.push_str(&row("Doctor Fee", "", bill.doctor_fee));
    }
    if bill.room_charge > 0.0 {
        rows.push_str(&row("Room Charge", "", bill.room_charge));
    }
    if bill.medicines.is_empty() {
        if bill.medicine_total > 0.0 {
            rows.push_str(&row("Medicines", "", bill.medicine_total));
        }
    } else {
        for line in &bill.medicines {
            let detail = format!(
                "Quantity: {} \u{d7} \u{20b9}{:.2}",
                line.quantity, line.unit_price
            );
            rows.push_str(&row(&line.medicine_name, &detail, line.total_price));
        }
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Receipt {receipt_number}</title>
<style>
  body {{ font-family: Arial, Helvetica, sans-serif; color: #1f2937; margin: 40px; }}
  .header {{ border-bottom: 2px solid #2563eb; padding-bottom: 12px; margin-bottom: 24px; }}
  .header h1 {{ margin: 0; color: #2563eb; }}
  .meta {{ margin-bottom: 24px; }}
  .meta div {{ margin: 4px 0; }}
  table {{ width: 100%; border-collapse: collapse; }}
  th, td {{ text-align: left; padding: 8px 12px; border-bottom: 1px solid #e5e7eb; }}
  td.amount {{ text-align: right; }}
  tr.total td {{ font-weight: bold; border-top: 2px solid #1f2937; border-bottom: none; }}
  .paid {{ display: inline-block; padding: 4px 12px; background: #dcfce7; color: #166534;
           border-radius: 4px; font-weight: bold; }}
  .footer {{ margin-top: 32px; font-size: 12px; color: #6b7280; }}
</style>
</head>
<body>
<div class="header">
  <h1>{APP_NAME}</h1>
  <div>Payment Receipt</div>
</div>
<div class="meta">
  <div><strong>Receipt No:</strong> {receipt_number}</div>
  <div><strong>Bill No:</strong> {bill_id}</div>
  <div><strong>Patient:</strong> {patient}</div>
  <div><strong>Description:</strong> {description}</div>
  <div><strong>Due Date:</strong> {due_date}</div>
  <div><strong>Paid On:</strong> {paid_on}</div>
  <div><span class="paid">PAID</span></div>
</div>
<table>
  <tr><th>Item</th><th>Details</th><th style="text-align:right">Amount</th></tr>
{rows}  <tr class="total"><td>Total (incl. 18% GST)</td><td></td>
    <td class="amount">&#8377;{total:.2}</td></tr>
</table>
<div class="footer">Generated by {APP_NAME}. This is a computer-generated receipt.</div>
</body>
</html>
"#,
        bill_id = bill.id,
        patient = bill.patient_name,
        description = bill.description,
        due_date = bill.due_date,
        paid_on = paid_on.format("%Y-%m-%d %H:%M"),
        total = bill.total_amount,
    );

    Receipt { filename, html }
}

fn row(item: &str, detail: &str, amount: f64) -> String {
    format!(
        "  <tr><td>{item}</td><td>{detail}</td><td class=\"amount\">&#8377;{amount:.2}</td></tr>\n"
    )
}
