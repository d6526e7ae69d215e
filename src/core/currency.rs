/// Currency used when the user neither names one nor asks for all currencies
pub const DEFAULT_CURRENCY: &str = "BDT";

/// Which currency a history view is restricted to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrencySelection {
    /// The configured default currency
    Default(String),
    /// A currency the user asked for
    Explicit(String),
    /// No currency restriction
    Any,
}

impl CurrencySelection {
    pub fn resolve(default: &str, explicit: Option<&str>, any: bool) -> Self {
        match (explicit.map(str::trim).filter(|c| !c.is_empty()), any) {
            (Some(code), _) => CurrencySelection::Explicit(code.to_string()),
            (None, true) => CurrencySelection::Any,
            (None, false) if default.trim().is_empty() => CurrencySelection::Any,
            (None, false) => CurrencySelection::Default(default.trim().to_string()),
        }
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            CurrencySelection::Default(c) | CurrencySelection::Explicit(c) => Some(c),
            CurrencySelection::Any => None,
        }
    }
}
