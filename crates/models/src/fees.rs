use crate::status::FeeStatus;
use chrono::NaiveDate;

/// The monetary components of a fee record
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FeeAmounts {
    pub total: f64,
    pub paid: f64,
    pub discount: f64,
    pub late_fee: f64,
}

impl FeeAmounts {
    /// Amount still owed, rounded to cents. Negative when overpaid.
    pub fn balance(&self) -> f64 {
        round_cents(self.total + self.late_fee - self.discount - self.paid)
    }

    /// Derives the payment status of a fee due on `due_date`, as seen on `today`
    pub fn status(&self, due_date: NaiveDate, today: NaiveDate) -> FeeStatus {
        if self.balance() <= 0.0 {
            FeeStatus::Paid
        } else if self.paid > 0.0 {
            FeeStatus::Partial
        } else if due_date < today {
            FeeStatus::Overdue
        } else {
            FeeStatus::Pending
        }
    }

    /// Returns the name of the first negative amount, if any
    pub fn first_negative(&self) -> Option<&'static str> {
        [
            ("total_amount", self.total),
            ("paid_amount", self.paid),
            ("discount_amount", self.discount),
            ("late_fee_penalty", self.late_fee),
        ]
        .into_iter()
        .find(|(_, amount)| *amount < 0.0 || amount.is_nan())
        .map(|(name, _)| name)
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
