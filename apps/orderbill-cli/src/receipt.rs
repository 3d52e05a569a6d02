//! # Text Receipt
//!
//! Renders a [`Bill`] the way it reads on an order summary screen:
//!
//! ```text
//! Biryani x1                     Rs 330.00
//!   (incl. add-ons Rs 30.00 each)
//! ----------------------------------------
//! Subtotal                       Rs 330.00
//! Delivery fee                    Rs 30.00
//! GST (5%)                        Rs 16.50
//! Discount (FLAT100)            -Rs 100.00
//! ----------------------------------------
//! Grand total                    Rs 276.50
//! ```

use orderbill_core::{Bill, Money, TaxRate};

const WIDTH: usize = 40;

/// Renders the bill as a fixed-width receipt.
pub fn render(bill: &Bill, gst_rate: TaxRate) -> String {
    let mut out = String::new();

    for line in &bill.items {
        row(&mut out, &format!("{} x{}", line.name, line.qty), &line.item_total.to_string());
        if !line.addon_total.is_zero() {
            out.push_str(&format!("  (incl. add-ons {} each)\n", line.addon_total));
        }
    }
    if bill.items.is_empty() {
        out.push_str("(no billable items)\n");
    }

    rule(&mut out);
    row(&mut out, "Subtotal", &bill.subtotal.to_string());

    let delivery = if bill.delivery_fee.is_zero() {
        "FREE".to_string()
    } else {
        bill.delivery_fee.to_string()
    };
    row(&mut out, "Delivery fee", &delivery);
    row(&mut out, &format!("GST ({}%)", gst_rate.percentage()), &bill.gst.to_string());

    if !bill.discount.is_zero() {
        let label = match bill.coupon {
            Some(coupon) => format!("Discount ({})", coupon),
            None => "Discount".to_string(),
        };
        row(&mut out, &label, &(Money::zero() - bill.discount).to_string());
    }

    rule(&mut out);
    row(&mut out, "Grand total", &bill.grand_total.to_string());

    out
}

fn row(out: &mut String, label: &str, amount: &str) {
    let pad = WIDTH.saturating_sub(label.chars().count() + amount.chars().count()).max(1);
    out.push_str(&format!("{}{}{}\n", label, " ".repeat(pad), amount));
}

fn rule(out: &mut String) {
    out.push_str(&"-".repeat(WIDTH));
    out.push('\n');
}
