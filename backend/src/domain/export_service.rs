//! Export service domain logic for the shop books tracker.
//!
//! Produces the two report surfaces: a tab-separated download of the
//! selected month (opens in spreadsheet apps) and a print-formatted HTML
//! report. Both are derived strictly from the month window and its summary.

use chrono::NaiveDate;
use shared::{ExportFile, MonthRef, MonthlySummary, Transaction, TransactionType};

/// Export service that renders month reports
#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Tab-separated month report with a UTF-8 BOM so spreadsheet imports
    /// pick up the Thai text, expense amounts negated, and a summary footer.
    pub fn tsv_report(
        &self,
        month: MonthRef,
        month_data: &[Transaction],
        summary: &MonthlySummary,
    ) -> ExportFile {
        let mut content = String::from("\u{FEFF}");
        content.push_str("วันที่\tประเภท\tรายการ\tหมวดหมู่\tจำนวนเงิน\n");

        for transaction in month_data {
            let (type_label, signed_amount) = match transaction.transaction_type {
                TransactionType::Income => ("รายรับ", transaction.amount),
                TransactionType::Expense => ("รายจ่าย", -transaction.amount),
            };
            content.push_str(&format!(
                "{}\t{}\t{}\t{}\t{}\n",
                self.display_date(&transaction.date),
                type_label,
                transaction.description,
                transaction.category,
                signed_amount,
            ));
        }

        content.push('\n');
        content.push_str(&format!("\t\tรวมรายรับ\t\t{}\n", summary.income));
        content.push_str(&format!("\t\tรวมรายจ่าย\t\t{}\n", summary.expense));
        content.push_str(&format!("\t\tกำไรสุทธิ\t\t{}\n", summary.balance));

        ExportFile {
            filename: format!("business-report-{:04}-{:02}.xls", month.year, month.month),
            content_type: "text/tab-separated-values; charset=utf-8".to_string(),
            content,
        }
    }

    /// Print-formatted HTML month report
    pub fn print_report(
        &self,
        month: MonthRef,
        month_data: &[Transaction],
        summary: &MonthlySummary,
    ) -> String {
        let title = format!("รายงานประจำเดือน {:02}/{:04}", month.month, month.year);

        let rows: String = month_data
            .iter()
            .map(|t| {
                let (type_label, sign) = match t.transaction_type {
                    TransactionType::Income => ("รายรับ", ""),
                    TransactionType::Expense => ("รายจ่าย", "-"),
                };
                format!(
                    "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td>\
                     <td style=\"text-align: right;\">{}฿{}</td></tr>\n",
                    self.display_date(&t.date),
                    type_label,
                    escape_html(&t.description),
                    escape_html(&t.category),
                    sign,
                    t.amount,
                )
            })
            .collect();

        format!(
            r#"<html>
  <head>
    <title>{title}</title>
    <style>
      body {{ font-family: Arial, sans-serif; }}
      table {{ width: 100%; border-collapse: collapse; margin: 20px 0; }}
      th, td {{ border: 1px solid #ddd; padding: 8px; text-align: left; }}
      th {{ background-color: #f2f2f2; }}
      .summary {{ margin-top: 20px; font-weight: bold; }}
      @media print {{ body {{ margin: 20px; }} }}
    </style>
  </head>
  <body>
    <h1>{title}</h1>
    <table>
      <thead>
        <tr><th>วันที่</th><th>ประเภท</th><th>รายการ</th><th>หมวดหมู่</th><th>จำนวนเงิน</th></tr>
      </thead>
      <tbody>
{rows}      </tbody>
    </table>
    <div class="summary">
      <p>รวมรายรับ: ฿{income}</p>
      <p>รวมรายจ่าย: ฿{expense}</p>
      <p>กำไรสุทธิ: ฿{balance}</p>
    </div>
  </body>
</html>
"#,
            title = title,
            rows = rows,
            income = summary.income,
            expense = summary.expense,
            balance = summary.balance,
        )
    }

    /// Day-first display date, falling back to the raw string
    fn display_date(&self, date: &str) -> String {
        date.split('T')
            .next()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
            .map(|d| d.format("%d/%m/%Y").to_string())
            .unwrap_or_else(|| date.to_string())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
