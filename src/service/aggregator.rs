use crate::models::{BrandReport, CostReport, CostedInvoice, GroupReport, LocationCost};
use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// 按 (产品组, 品牌, 城市) 汇总 YTD / MTD 成本
///
/// 产品组与品牌按首次出现顺序排列, 城市升序. YTD 覆盖全部行,
/// MTD 仅统计开票日期与 `today` 同年同月的行. 成本为 None 的行按 0 计入,
/// 某侧没有任何行时该侧为空白.
pub fn aggregate(rows: &[CostedInvoice], today: NaiveDate) -> Vec<GroupReport> {
    let mut groups: IndexMap<&str, IndexMap<&str, BTreeMap<String, LocationCost>>> =
        IndexMap::new();
    let mut unbucketed = 0usize;

    for row in rows {
        let Some(group) = row.record.group_name.as_deref() else {
            unbucketed += 1;
            continue;
        };
        let brands = groups.entry(group).or_default();

        let Some(brand) = row.record.company_name.as_deref() else {
            unbucketed += 1;
            continue;
        };
        let locations = brands.entry(brand).or_default();

        let Some(location) = row.record.location_name.as_deref() else {
            unbucketed += 1;
            continue;
        };

        // 成本缺失的行按 0 计入, 城市仍然出现在表中
        let entry = locations.entry(location.to_string()).or_default();
        let cost = row.cost.as_ref();
        accumulate(&mut entry.ytd, cost);
        if in_month_of(row.record.invoice_date, today) {
            accumulate(&mut entry.mtd, cost);
        }
    }

    if unbucketed > 0 {
        tracing::warn!("{} 行缺少产品组/品牌/城市, 未参与汇总", unbucketed);
    }

    groups
        .into_iter()
        .map(|(group, brands)| GroupReport {
            product_group: group.to_string(),
            brands: brands
                .into_iter()
                .map(|(brand, locations)| BrandReport {
                    brand: brand.to_string(),
                    locations,
                })
                .collect(),
        })
        .collect()
}

/// 以生成时间 (IST) 的日期为当月基准构建报表
pub fn build_report(rows: &[CostedInvoice], generated_at: DateTime<FixedOffset>) -> CostReport {
    CostReport {
        generated_at,
        groups: aggregate(rows, generated_at.date_naive()),
    }
}

fn accumulate(slot: &mut Option<BigDecimal>, cost: Option<&BigDecimal>) {
    let sum = slot.take().unwrap_or_else(BigDecimal::zero);
    *slot = Some(match cost {
        Some(cost) => sum + cost,
        None => sum,
    });
}

fn in_month_of(date: Option<NaiveDateTime>, today: NaiveDate) -> bool {
    date.is_some_and(|d| d.year() == today.year() && d.month() == today.month())
}

/// 千分位整数格式 (舍入到个位), 例如 1234567.6 -> "1,234,568"
pub fn format_amount(value: &BigDecimal) -> String {
    let plain = round_half_even(value).with_scale(0).to_string();
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push_str(sign);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// 四舍六入五成双, 与 `{:,.0f}` 一致: 124.5 -> 124, 125.5 -> 126
fn round_half_even(value: &BigDecimal) -> BigDecimal {
    // with_scale 向零截断
    let truncated = value.with_scale(0);
    let fraction = (value - &truncated).abs();
    let half = BigDecimal::new(5.into(), 1);

    let round_away = match fraction.cmp(&half) {
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Equal => !is_even(&truncated),
    };
    if !round_away {
        truncated
    } else if value < &BigDecimal::zero() {
        truncated - BigDecimal::from(1)
    } else {
        truncated + BigDecimal::from(1)
    }
}

fn is_even(integer: &BigDecimal) -> bool {
    integer
        .to_string()
        .ends_with(|c: char| matches!(c, '0' | '2' | '4' | '6' | '8'))
}

/// 空值渲染为空白
pub fn format_optional(value: Option<&BigDecimal>) -> String {
    value.map(format_amount).unwrap_or_default()
}
