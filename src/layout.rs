use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::fmt::{currency, is_present, plain, text};
use crate::models::{Category, LineItem};

/// Row capacity of the two table pages in the estimate template. The numbers
/// follow the template's physical row height, not the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    pub first_page_rows: usize,
    pub second_page_rows: usize,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            first_page_rows: 17,
            second_page_rows: 17,
        }
    }
}

impl PageLayout {
    /// Items that do not fit on either page. They still go on page two.
    pub fn overflow(&self, total_items: usize) -> usize {
        total_items.saturating_sub(self.first_page_rows.saturating_add(self.second_page_rows))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    First,
    Second,
}

pub fn category_row(name: &str) -> String {
    format!(
        r#"
    <tr class="category-row">
      <td colspan="10">{name}</td>
    </tr>
  "#
    )
}

pub fn line_item_row(item: &LineItem) -> String {
    let (dep_class, dep_cell) = if is_present(&item.depreciation) {
        (" negative", format!("({})", currency(&item.depreciation)))
    } else {
        ("", String::new())
    };
    format!(
        r#"
    <tr>
      <td>{description}</td>
      <td>{quantity}</td>
      <td>{unit}</td>
      <td class="currency">{tax}</td>
      <td class="currency">{rcv}</td>
      <td>{age_life}</td>
      <td>{condition}</td>
      <td>{dep_percent}</td>
      <td class="currency{dep_class}">{dep_cell}</td>
      <td class="currency">{acv}</td>
    </tr>
  "#,
        description = plain(&item.description),
        quantity = plain(&item.quantity),
        unit = plain(&item.unit),
        tax = text(&item.tax),
        rcv = currency(&item.rcv),
        age_life = text(&item.age_life),
        condition = text(&item.condition),
        dep_percent = text(&item.dep_percent),
        acv = currency(&item.acv),
    )
}

/// Table rows for one page of the estimate.
///
/// Page one takes the first `first_page_rows` items in category order; a
/// category that straddles the boundary is cut there. Page two takes the rest,
/// and only repeats a category header when none of that category's items made
/// it onto page one. Empty categories produce nothing.
pub fn line_items_html(categories: &[Category], page: Page, layout: &PageLayout) -> String {
    let capacity = layout.first_page_rows;
    let mut html = String::new();
    let mut placed = 0usize;

    for category in categories.iter().filter(|c| !c.items.is_empty()) {
        let start = placed;
        placed += category.items.len();

        let (skip, take) = match page {
            Page::First if start >= capacity => continue,
            Page::First => (0, capacity - start),
            Page::Second if placed <= capacity => continue,
            Page::Second => (capacity.saturating_sub(start), usize::MAX),
        };

        if skip == 0 {
            html.push_str(&category_row(&text(&category.category)));
        }
        for item in category.items.iter().skip(skip).take(take) {
            html.push_str(&line_item_row(item));
        }
    }

    if page == Page::Second {
        let overflow = layout.overflow(placed);
        if overflow > 0 {
            warn!(
                overflow,
                total = placed,
                "line items exceed two pages; extra rows stay on page two"
            );
        }
    }

    html
}
