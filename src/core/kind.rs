use super::projection::{Column, ReportLayout};

/// The ledger histories the backend serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    Expense,
    Credit,
    Salary,
}

impl LedgerKind {
    pub const ALL: [LedgerKind; 3] = [LedgerKind::Expense, LedgerKind::Credit, LedgerKind::Salary];

    /// History endpoint, relative to the API base URL
    pub fn endpoint(self) -> &'static str {
        match self {
            LedgerKind::Expense => "expense/history/",
            LedgerKind::Credit => "credit/history/",
            LedgerKind::Salary => "salary/history/",
        }
    }

    /// Permission needed to view this history
    pub fn permission(self) -> &'static str {
        match self {
            LedgerKind::Expense => "view_expense",
            LedgerKind::Credit => "view_credit",
            LedgerKind::Salary => "view_salary",
        }
    }

    /// Fields summed when the user does not name any
    pub fn default_sum_fields(self) -> &'static [&'static str] {
        match self {
            LedgerKind::Expense | LedgerKind::Credit => &["amount"],
            LedgerKind::Salary => &["amount", "bonus", "deduction"],
        }
    }

    pub fn display(self) -> &'static str {
        match self {
            LedgerKind::Expense => "Expense",
            LedgerKind::Credit => "Credit",
            LedgerKind::Salary => "Salary",
        }
    }

    /// Report layout used when no layout file is given
    pub fn default_layout(self) -> ReportLayout {
        let columns: &[(&str, &str, bool)] = match self {
            LedgerKind::Expense => &[
                ("Date", "start_date", false),
                ("Purpose", "purpose", false),
                ("Paid To", "paid_to", false),
                ("Currency", "currency_title", false),
                ("Amount", "amount", true),
            ],
            LedgerKind::Credit => &[
                ("Date", "start_date", false),
                ("Client", "client", false),
                ("Reference", "reference", false),
                ("Currency", "currency_title", false),
                ("Amount", "amount", true),
            ],
            LedgerKind::Salary => &[
                ("Employee", "employee", false),
                ("From", "start_date", false),
                ("To", "end_date", false),
                ("Currency", "currency_title", false),
                ("Salary", "amount", true),
                ("Bonus", "bonus", true),
                ("Deduction", "deduction", true),
            ],
        };
        ReportLayout {
            title: format!("{} History", self.display()),
            columns: columns
                .iter()
                .map(|(heading, key, currency)| Column {
                    heading: heading.to_string(),
                    key: key.to_string(),
                    currency: *currency,
                })
                .collect(),
        }
    }
}
