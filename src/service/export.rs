use crate::error::ReportError;
use crate::models::CostReport;
use crate::service::aggregator::format_optional;
use csv::Writer;

/// 附件文件名
pub fn csv_file_name(report: &CostReport) -> String {
    format!("daily_cost_report_{}.csv", report.generated_at.format("%Y_%m_%d_%H_%M"))
}

/// 导出报表明细为 CSV, 每个 (产品组, 品牌, 城市) 一行
pub fn export_to_csv(report: &CostReport) -> Result<Vec<u8>, ReportError> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.write_record(["Product", "Brand", "Location", "YTD Cost", "MTD Cost"])?;

    for group in &report.groups {
        for brand in &group.brands {
            for (location, cost) in &brand.locations {
                let ytd = format_optional(cost.ytd.as_ref());
                let mtd = format_optional(cost.mtd.as_ref());
                writer.write_record([
                    group.product_group.as_str(),
                    brand.brand.as_str(),
                    location.as_str(),
                    ytd.as_str(),
                    mtd.as_str(),
                ])?;
            }
        }
    }

    writer
        .into_inner()
        .map_err(|e| ReportError::Export(e.into_error().into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BrandReport, GroupReport, LocationCost};
    use bigdecimal::BigDecimal;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn writes_one_line_per_location() {
        let ist = FixedOffset::east_opt(19_800).unwrap();
        let report = CostReport {
            generated_at: ist.with_ymd_and_hms(2024, 6, 20, 9, 5, 0).unwrap(),
            groups: vec![GroupReport {
                product_group: "LGA".to_string(),
                brands: vec![BrandReport {
                    brand: "VW".to_string(),
                    locations: [
                        (
                            "Ahmedabad".to_string(),
                            LocationCost {
                                ytd: Some(BigDecimal::from(1500)),
                                mtd: None,
                            },
                        ),
                        (
                            "Goa".to_string(),
                            LocationCost {
                                ytd: Some(BigDecimal::from(20)),
                                mtd: Some(BigDecimal::from(20)),
                            },
                        ),
                    ]
                    .into_iter()
                    .collect(),
                }],
            }],
        };

        let csv = String::from_utf8(export_to_csv(&report).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Product,Brand,Location,YTD Cost,MTD Cost");
        assert_eq!(lines[1], "LGA,VW,Ahmedabad,\"1,500\",");
        assert_eq!(lines[2], "LGA,VW,Goa,20,20");
        assert_eq!(csv_file_name(&report), "daily_cost_report_2024_06_20_09_05.csv");
    }
}
