use std::fmt;

/// The closed set of app screens. Exactly one is active at any time; the
/// `Navigator` owns that invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Home,
    Wallet,
    TopUp,
    TopUpSuccess,
    PaymentConfirm,
    PaymentSuccess,
}

impl Screen {
    /// Kebab-case identifier used in presentation requests.
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Wallet => "wallet",
            Screen::TopUp => "topup",
            Screen::TopUpSuccess => "topup-success",
            Screen::PaymentConfirm => "payment-confirm",
            Screen::PaymentSuccess => "payment-success",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
