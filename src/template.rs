use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};

use crate::fmt::{currency, plain, text};
use crate::layout::{line_items_html, Page, PageLayout};
use crate::models::EstimateRecord;

#[derive(Clone, Copy)]
enum Kind {
    Text,
    Currency,
}

/// Every `{{dotted.path}}` token the estimate template understands.
const FIELDS: &[(&str, Kind)] = &[
    ("contractor.name", Kind::Text),
    ("contractor.address", Kind::Text),
    ("contractor.city", Kind::Text),
    ("contractor.state", Kind::Text),
    ("contractor.zip", Kind::Text),
    ("contractor.country", Kind::Text),
    ("contractor.phone", Kind::Text),
    ("contractor.email", Kind::Text),
    ("contractor.rep", Kind::Text),
    ("carrier.name", Kind::Text),
    ("carrier.phone", Kind::Text),
    ("carrier.email", Kind::Text),
    ("carrier.rep", Kind::Text),
    ("claim.number", Kind::Text),
    ("claim.policyNumber", Kind::Text),
    ("claim.lossType", Kind::Text),
    ("claim.lossDate", Kind::Text),
    ("claim.dateInspected", Kind::Text),
    ("claim.estimateCompleted", Kind::Text),
    ("claim.priceList", Kind::Text),
    ("insured.name", Kind::Text),
    ("insured.address", Kind::Text),
    ("insured.city", Kind::Text),
    ("insured.state", Kind::Text),
    ("insured.zip", Kind::Text),
    ("insured.phone", Kind::Text),
    ("insured.email", Kind::Text),
    ("estimateTitle", Kind::Text),
    ("estimateSubtitle", Kind::Text),
    ("section", Kind::Text),
    ("summary.taxTotal", Kind::Currency),
    ("summary.lineItemTotal", Kind::Currency),
    ("summary.depreciationTotal", Kind::Currency),
    ("summary.acvTotal", Kind::Currency),
    ("summary.materialSalesTaxRate", Kind::Text),
    ("summary.materialSalesTax", Kind::Currency),
    ("summary.rcvTotal", Kind::Currency),
    ("summary.totalDepreciation", Kind::Currency),
    ("summary.totalACV", Kind::Currency),
    ("summary.additionalClaimValue", Kind::Currency),
    ("footer.disclaimer", Kind::Text),
    ("footer.generatedDate", Kind::Text),
    ("professionalStandards.qualityAssurance", Kind::Text),
    ("professionalStandards.documentation", Kind::Text),
    ("professionalStandards.warranty", Kind::Text),
    ("professionalStandards.contact", Kind::Text),
];

pub const LINE_ITEMS_PAGE1: &str = "{{LINE_ITEMS_PAGE1}}";
pub const LINE_ITEMS_PAGE2: &str = "{{LINE_ITEMS_PAGE2}}";
pub const PRE_LOSS_CONDITIONS: &str = "{{PRE_LOSS_CONDITIONS}}";
/// Reserved for a continuation list on the second page; always filled with nothing.
pub const PRE_LOSS_CONTINUED: &str = "{{PRE_LOSS_CONTINUED}}";

#[cfg(test)]
fn field_tokens() -> impl Iterator<Item = String> {
    FIELDS.iter().map(|(path, _)| format!("{{{{{path}}}}}"))
}

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{[A-Za-z0-9_.]+\}\}").expect("placeholder pattern is a valid regex")
});

pub fn pre_loss_conditions_html(conditions: &[Value]) -> String {
    conditions
        .iter()
        .map(|c| format!("<li>{}</li>", plain(c)))
        .collect::<Vec<_>>()
        .join("\n        ")
}

/// Substitute the record into the template.
///
/// Field tokens are replaced everywhere they occur. The generated fragments
/// (line item pages, pre-loss conditions) fill only the first occurrence of
/// their token.
pub fn populate(template: &str, record: &EstimateRecord, layout: &PageLayout) -> String {
    let mut html = template.to_string();

    for (path, kind) in FIELDS {
        let value = record.lookup(path);
        let replacement = match kind {
            Kind::Text => text(value),
            Kind::Currency => currency(value),
        };
        html = html.replace(&format!("{{{{{path}}}}}"), &replacement);
    }

    let page1 = line_items_html(&record.line_items, Page::First, layout);
    let page2 = line_items_html(&record.line_items, Page::Second, layout);
    let conditions = pre_loss_conditions_html(&record.pre_loss_conditions);
    debug!(
        page1_bytes = page1.len(),
        page2_bytes = page2.len(),
        conditions = record.pre_loss_conditions.len(),
        "generated fragments"
    );

    html = html.replacen(LINE_ITEMS_PAGE1, &page1, 1);
    html = html.replacen(LINE_ITEMS_PAGE2, &page2, 1);
    html = html.replacen(PRE_LOSS_CONDITIONS, &conditions, 1);
    html = html.replacen(PRE_LOSS_CONTINUED, "", 1);

    let leftover = leftover_placeholders(&html);
    if !leftover.is_empty() {
        warn!(tokens = ?leftover, "template still has unfilled placeholders");
    }

    html
}

/// Placeholder-shaped tokens still present in `html`, in order of appearance.
pub fn leftover_placeholders(html: &str) -> Vec<String> {
    PLACEHOLDER
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect()
}
