use crate::models::CostReport;
use crate::service::aggregator::format_optional;
use askama::Template;

/// 邮件正文页面, 模板内插入的文本均经过 HTML 转义
#[derive(Template)]
#[template(path = "cost_report.html")]
pub struct CostReportPage<'a> {
    pub sections: Vec<GroupSection<'a>>,
}

pub struct GroupSection<'a> {
    pub product_group: &'a str,
    pub brands: Vec<BrandSection<'a>>,
}

pub struct BrandSection<'a> {
    pub brand: &'a str,
    pub rows: Vec<CostRow<'a>>,
}

pub struct CostRow<'a> {
    pub location: &'a str,
    pub ytd: String,
    pub mtd: String,
}

impl<'a> CostReportPage<'a> {
    pub fn new(report: &'a CostReport) -> Self {
        let sections = report
            .groups
            .iter()
            .map(|group| GroupSection {
                product_group: group.product_group.as_str(),
                brands: group
                    .brands
                    .iter()
                    .map(|brand| BrandSection {
                        brand: brand.brand.as_str(),
                        rows: brand
                            .locations
                            .iter()
                            .map(|(location, cost)| CostRow {
                                location: location.as_str(),
                                ytd: format_optional(cost.ytd.as_ref()),
                                mtd: format_optional(cost.mtd.as_ref()),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self { sections }
    }
}

/// 渲染完整 HTML 正文
pub fn render_report(report: &CostReport) -> Result<String, askama::Error> {
    CostReportPage::new(report).render()
}
