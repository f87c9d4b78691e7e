use crate::{Category, LineItemPayload};

/// Field of a line-item row, as embedded in `line_items[<index>][<field>]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineItemField {
    ItemName,
    Category,
    Quantity,
    Price,
    Amount,
}

impl LineItemField {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineItemField::ItemName => "item_name",
            LineItemField::Category => "category",
            LineItemField::Quantity => "quantity",
            LineItemField::Price => "price",
            LineItemField::Amount => "amount",
        }
    }
}

/// Form field name for a row input, e.g. `line_items[3][price]`
pub fn field_name(index: u32, field: LineItemField) -> String {
    format!("line_items[{}][{}]", index, field.as_str())
}

/// Parse numeric input the way the browser's `parseFloat(x) || 0` does:
/// the longest numeric prefix wins, anything unparseable is 0.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let candidate_len = trimmed
        .char_indices()
        .take_while(|(_, c)| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
        .map(|(i, c)| i + c.len_utf8())
        .last()
        .unwrap_or(0);

    (1..=candidate_len)
        .rev()
        .find_map(|end| trimmed[..end].parse::<f64>().ok())
        .filter(|value| !value.is_nan())
        .unwrap_or(0.0)
}

/// Raw text of a numeric input together with its parsed value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumericInput {
    pub raw: String,
    pub value: f64,
}

impl NumericInput {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = parse_number(&raw);
        Self { raw, value }
    }
}

/// One expense line item in the form
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRow {
    /// Creation index; unique within its `LineItems`, never reused
    pub index: u32,
    pub item_name: String,
    pub category: Option<Category>,
    pub quantity: NumericInput,
    pub price: NumericInput,
}

impl LineItemRow {
    fn new(index: u32) -> Self {
        Self {
            index,
            item_name: String::new(),
            category: None,
            quantity: NumericInput::default(),
            price: NumericInput::default(),
        }
    }

    /// Derived `price * quantity`; not settable on its own
    pub fn amount(&self) -> f64 {
        self.price.value * self.quantity.value
    }

    pub fn field_name(&self, field: LineItemField) -> String {
        field_name(self.index, field)
    }

    pub fn to_payload(&self) -> LineItemPayload {
        LineItemPayload {
            item_name: self.item_name.clone(),
            category: self.category,
            quantity: self.quantity.value,
            price: self.price.value,
            amount: self.amount(),
        }
    }
}

/// Ordered rows of the expense form plus the counter that numbers them
#[derive(Debug, Clone, PartialEq)]
pub struct LineItems {
    rows: Vec<LineItemRow>,
    next_index: u32,
}

impl Default for LineItems {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_index: 1,
        }
    }
}

impl LineItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty row and return its creation index
    pub fn add_row(&mut self) -> u32 {
        let index = self.next_index;
        self.next_index += 1;
        self.rows.push(LineItemRow::new(index));
        index
    }

    /// Detach the row created with `index`; the counter is left untouched
    pub fn remove_row(&mut self, index: u32) -> Option<LineItemRow> {
        let position = self.rows.iter().position(|row| row.index == index)?;
        Some(self.rows.remove(position))
    }

    pub fn rows(&self) -> &[LineItemRow] {
        &self.rows
    }

    pub fn get(&self, index: u32) -> Option<&LineItemRow> {
        self.rows.iter().find(|row| row.index == index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn row_mut(&mut self, index: u32) -> Option<&mut LineItemRow> {
        self.rows.iter_mut().find(|row| row.index == index)
    }

    pub fn set_item_name(&mut self, index: u32, item_name: impl Into<String>) -> bool {
        match self.row_mut(index) {
            Some(row) => {
                row.item_name = item_name.into();
                true
            }
            None => false,
        }
    }

    /// Unknown values (including the empty placeholder) clear the category
    pub fn set_category(&mut self, index: u32, value: &str) -> bool {
        match self.row_mut(index) {
            Some(row) => {
                row.category = value.parse().ok();
                true
            }
            None => false,
        }
    }

    /// Store the raw quantity text and return the row's new amount
    pub fn set_quantity(&mut self, index: u32, raw: &str) -> Option<f64> {
        let row = self.row_mut(index)?;
        row.quantity = NumericInput::new(raw);
        Some(row.amount())
    }

    /// Store the raw price text and return the row's new amount
    pub fn set_price(&mut self, index: u32, raw: &str) -> Option<f64> {
        let row = self.row_mut(index)?;
        row.price = NumericInput::new(raw);
        Some(row.amount())
    }

    /// Update any editable field from its raw input value
    pub fn set_field(&mut self, index: u32, field: LineItemField, raw: &str) -> bool {
        match field {
            LineItemField::ItemName => self.set_item_name(index, raw),
            LineItemField::Category => self.set_category(index, raw),
            LineItemField::Quantity => self.set_quantity(index, raw).is_some(),
            LineItemField::Price => self.set_price(index, raw).is_some(),
            LineItemField::Amount => false,
        }
    }

    pub fn grand_total(&self) -> f64 {
        self.rows.iter().map(LineItemRow::amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_like_parse_float() {
        assert_eq!(parse_number("12"), 12.0);
        assert_eq!(parse_number("  3.5"), 3.5);
        assert_eq!(parse_number("12abc"), 12.0);
        assert_eq!(parse_number(".5"), 0.5);
        assert_eq!(parse_number("-4"), -4.0);
        assert_eq!(parse_number("1e2"), 100.0);
        assert_eq!(parse_number("1e"), 1.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("-"), 0.0);
    }

    #[test]
    fn test_indices_are_monotonic_and_never_reused() {
        let mut items = LineItems::new();
        assert_eq!(items.add_row(), 1);
        assert_eq!(items.add_row(), 2);
        assert_eq!(items.add_row(), 3);
        items.remove_row(3);
        items.remove_row(1);
        assert_eq!(items.add_row(), 4);

        let indices: Vec<u32> = items.rows().iter().map(|row| row.index).collect();
        assert_eq!(indices, vec![2, 4]);
    }

    #[test]
    fn test_row_count_tracks_adds_minus_removes() {
        let mut items = LineItems::new();
        let mut adds = 0;
        let mut removes = 0;
        for step in 0..20u32 {
            if step % 3 == 2 {
                let target = items.rows().first().map(|row| row.index);
                if let Some(index) = target {
                    assert!(items.remove_row(index).is_some());
                    removes += 1;
                }
            } else {
                items.add_row();
                adds += 1;
            }
            assert_eq!(items.len(), adds - removes);
        }

        for row in items.rows() {
            assert_eq!(
                row.field_name(LineItemField::Quantity),
                format!("line_items[{}][quantity]", row.index)
            );
        }
    }

    #[test]
    fn test_remove_unknown_row_is_noop() {
        let mut items = LineItems::new();
        items.add_row();
        assert!(items.remove_row(42).is_none());
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_amount_is_price_times_quantity() {
        let mut items = LineItems::new();
        let index = items.add_row();
        assert_eq!(items.set_quantity(index, "2"), Some(0.0));
        assert_eq!(items.set_price(index, "10"), Some(20.0));
        assert_eq!(items.set_price(index, ""), Some(0.0));
        assert_eq!(items.set_price(index, "x"), Some(0.0));
        assert_eq!(items.set_quantity(99, "1"), None);
    }

    #[test]
    fn test_grand_total_scenario_with_removal() {
        let mut items = LineItems::new();
        let first = items.add_row();
        let second = items.add_row();
        items.set_quantity(first, "2");
        items.set_price(first, "10");
        items.set_quantity(second, "1");
        items.set_price(second, "5");
        assert_eq!(items.grand_total(), 15.0);

        items.remove_row(first);
        assert_eq!(items.grand_total(), 5.0);
    }

    #[test]
    fn test_negative_inputs_propagate() {
        let mut items = LineItems::new();
        let refund = items.add_row();
        let purchase = items.add_row();
        items.set_field(refund, LineItemField::Quantity, "-1");
        items.set_field(refund, LineItemField::Price, "30");
        items.set_field(purchase, LineItemField::Quantity, "1");
        items.set_field(purchase, LineItemField::Price, "50");
        assert_eq!(items.grand_total(), 20.0);
    }

    #[test]
    fn test_set_field_text_and_category() {
        let mut items = LineItems::new();
        let index = items.add_row();
        assert!(items.set_field(index, LineItemField::ItemName, "Stapler"));
        assert!(items.set_field(index, LineItemField::Category, "office_supplies"));
        assert!(!items.set_field(index, LineItemField::Amount, "500"));

        let row = items.get(index).unwrap();
        assert_eq!(row.item_name, "Stapler");
        assert_eq!(row.category, Some(Category::OfficeSupplies));
        assert_eq!(row.amount(), 0.0);

        items.set_category(index, "");
        assert_eq!(items.get(index).unwrap().category, None);
    }

    #[test]
    fn test_separate_forms_have_separate_counters() {
        let mut first = LineItems::new();
        let mut second = LineItems::new();
        first.add_row();
        first.add_row();
        assert_eq!(second.add_row(), 1);
    }
}
