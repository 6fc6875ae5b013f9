//! Fixed category tables for the shop books tracker.
//!
//! Categories are a closed set per transaction type, each with a display
//! color used by the category breakdown chart. Transactions carrying a
//! category outside the table are still aggregated, they just render with
//! the fallback color.

use once_cell::sync::Lazy;
use shared::TransactionType;
use std::collections::HashMap;

/// Color used when a transaction's category is not in the table
pub const FALLBACK_COLOR: &str = "#95AFFE";

static EXPENSE_CATEGORIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ต้นทุนสินค้า", "#FF6B6B"),
        ("ค่าขนส่ง", "#4ECDC4"),
        ("ค่าเช่าร้าน/ที่", "#45B7D1"),
        ("ค่าสาธารณูปโภค", "#96CEB4"),
        ("ค่าแรงพนักงาน", "#FECA57"),
        ("ค่าการตลาด/โฆษณา", "#FF9FF3"),
        ("ค่าวัสดุอุปกรณ์", "#A55EC4"),
        ("ค่าบำรุงรักษา", "#FDA7DF"),
        ("ภาษี", "#D980FA"),
        ("อื่นๆ", "#95AFFE"),
    ])
});

static INCOME_CATEGORIES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("ขายสินค้า", "#10B981"),
        ("ขายบริการ", "#34D399"),
        ("รายได้อื่นๆ", "#6EE7B7"),
    ])
});

/// Default category preselected in entry forms, per type
pub fn default_category(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Expense => "ต้นทุนสินค้า",
        TransactionType::Income => "ขายสินค้า",
    }
}

/// Display color for an expense category, falling back for unknown names
pub fn expense_category_color(name: &str) -> &'static str {
    EXPENSE_CATEGORIES.get(name).copied().unwrap_or(FALLBACK_COLOR)
}

/// Display color for any category regardless of type
pub fn category_color(transaction_type: TransactionType, name: &str) -> &'static str {
    let table = match transaction_type {
        TransactionType::Expense => &EXPENSE_CATEGORIES,
        TransactionType::Income => &INCOME_CATEGORIES,
    };
    table.get(name).copied().unwrap_or(FALLBACK_COLOR)
}

/// All known category names for a transaction type
pub fn category_names(transaction_type: TransactionType) -> Vec<&'static str> {
    let table = match transaction_type {
        TransactionType::Expense => &EXPENSE_CATEGORIES,
        TransactionType::Income => &INCOME_CATEGORIES,
    };
    let mut names: Vec<&'static str> = table.keys().copied().collect();
    names.sort();
    names
}
