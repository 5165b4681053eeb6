//! Strategy: a shopping cart paying through whichever method is active.

use crate::error::PatternError;
use crate::holder::Holder;
use crate::sink::Sink;

pub trait PaymentStrategy {
    fn name(&self) -> &str;
    fn pay(&self, amount: f64) -> String;
}

pub struct CreditCardPayment {
    last_digits: String,
}

impl CreditCardPayment {
    pub fn new(last_digits: impl Into<String>) -> Self {
        Self {
            last_digits: last_digits.into(),
        }
    }
}

impl PaymentStrategy for CreditCardPayment {
    fn name(&self) -> &str {
        "credit card"
    }

    fn pay(&self, amount: f64) -> String {
        format!("Paid ${amount:.2} with credit card ending {}", self.last_digits)
    }
}

pub struct PayPalPayment {
    account: String,
}

impl PayPalPayment {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }
}

impl PaymentStrategy for PayPalPayment {
    fn name(&self) -> &str {
        "paypal"
    }

    fn pay(&self, amount: f64) -> String {
        format!("Paid ${amount:.2} via PayPal account {}", self.account)
    }
}

pub struct ShoppingCart {
    items: Vec<(String, f64)>,
    payment: Holder<dyn PaymentStrategy>,
}

impl Default for ShoppingCart {
    fn default() -> Self {
        Self::new()
    }
}

impl ShoppingCart {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            payment: Holder::new("shopping cart payment"),
        }
    }

    pub fn add_item(&mut self, name: impl Into<String>, price: f64) {
        self.items.push((name.into(), price));
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(|(_, price)| price).sum()
    }

    pub fn set_payment_strategy(&mut self, strategy: Box<dyn PaymentStrategy>) {
        self.payment.set_active(strategy);
    }

    pub fn payment_method(&self) -> Option<String> {
        self.payment.invoke(|s| s.name().to_string()).ok()
    }

    pub fn checkout(&self) -> Result<String, PatternError> {
        let total = self.total();
        self.payment.invoke(|strategy| strategy.pay(total))
    }
}

pub fn run(sink: &dyn Sink) -> Result<(), PatternError> {
    let mut cart = ShoppingCart::new();
    cart.add_item("Design Patterns book", 39.90);
    cart.add_item("Coffee mug", 9.50);

    cart.set_payment_strategy(Box::new(PayPalPayment::new("alice@example.com")));
    sink.emit(&cart.checkout()?);

    cart.set_payment_strategy(Box::new(CreditCardPayment::new("4242")));
    sink.emit(&cart.checkout()?);
    Ok(())
}
