use bigdecimal::{BigDecimal, Zero};
use crate::error::LedgerResult;
use crate::models::{DebtReport, DebtSummary};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// 金额格式: 四舍五入到两位小数
pub fn format_amount(amount: &BigDecimal) -> String {
    amount.round(2).with_scale(2).to_string()
}

/// 写出 CSV: 表头 + 每个供应商一行 + 空行 + 两行合计
pub fn write_csv<W: Write>(report: &DebtReport, out: W) -> LedgerResult<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(out);

    writer.write_record(["supplier", "type", "total_unpaid", "total_paid", "invoice_count"])?;
    for row in &report.rows {
        writer.write_record(&[
            row.supplier_name.clone(),
            row.supplier_type.to_string(),
            format_amount(&row.total_unpaid),
            format_amount(&row.total_paid),
            row.invoice_count.to_string(),
        ])?;
    }

    writer.write_record([""])?;
    writer.write_record(["Total unpaid", format_amount(&report.totals.total_unpaid).as_str()])?;
    writer.write_record(["Total paid", format_amount(&report.totals.total_paid).as_str()])?;

    writer.flush()?;
    Ok(())
}

pub fn to_csv_string(report: &DebtReport) -> LedgerResult<String> {
    let mut buf = Vec::new();
    write_csv(report, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// 导出到 CSV 文件
pub fn export_to_csv(report: &DebtReport, output_path: &Path) -> LedgerResult<()> {
    let file = std::fs::File::create(output_path)?;
    write_csv(report, file)?;
    tracing::info!("Exported {} supplier rows to {}", report.rows.len(), output_path.display());
    Ok(())
}

/// 分页报表中的一页
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPage {
    /// 从 1 开始
    pub number: usize,
    pub total_pages: usize,
    pub rows: Vec<DebtSummary>,
    pub page_unpaid: BigDecimal,
    pub page_paid: BigDecimal,
}

/// 按页大小切分; 空报表也返回一页
pub fn paginate(rows: &[DebtSummary], page_size: usize) -> Vec<ReportPage> {
    let page_size = page_size.max(1);
    if rows.is_empty() {
        return vec![ReportPage {
            number: 1,
            total_pages: 1,
            rows: Vec::new(),
            page_unpaid: BigDecimal::zero(),
            page_paid: BigDecimal::zero(),
        }];
    }

    let total_pages = rows.len().div_ceil(page_size);
    rows.chunks(page_size)
        .enumerate()
        .map(|(idx, chunk)| {
            let mut page_unpaid = BigDecimal::zero();
            let mut page_paid = BigDecimal::zero();
            for row in chunk {
                page_unpaid += &row.total_unpaid;
                page_paid += &row.total_paid;
            }
            ReportPage {
                number: idx + 1,
                total_pages,
                rows: chunk.to_vec(),
                page_unpaid,
                page_paid,
            }
        })
        .collect()
}
