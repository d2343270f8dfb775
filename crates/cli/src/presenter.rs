//! Turns operation outcomes into the lines printed on the terminal.
//!
//! All formatting lives here; the engine returns structured outcomes and
//! never builds display strings.

use engine::{DepositOutcome, LoginOutcome, OwedEntry, TransferOutcome, WithdrawOutcome};

pub const WELCOME: &str = "Welcome to Tally!";
pub const GOODBYE: &str = "Thank you, See you later!";
pub const COLLECT_CASH: &str = "Collect cash";

pub fn login_messages(outcome: &LoginOutcome) -> Vec<String> {
    let mut lines = vec![
        format!("Hello, {}!", outcome.username),
        format!("Your balance is {}", outcome.balance),
    ];
    lines.extend(owed_from_lines(&outcome.owed_from));
    lines.extend(owed_to_lines(&outcome.owed_to));
    lines
}

pub fn logout_messages(username: &str) -> Vec<String> {
    vec![format!("Goodbye, {username}!")]
}

pub fn deposit_messages(outcome: &DepositOutcome) -> Vec<String> {
    let mut lines = transferred_lines(&outcome.settlements);
    lines.push(format!("Your balance is {}", outcome.balance));
    lines.extend(owed_to_lines(&outcome.owed_to));
    lines
}

pub fn withdraw_messages(outcome: &WithdrawOutcome) -> Vec<String> {
    vec![
        COLLECT_CASH.to_string(),
        format!("Your balance is {}", outcome.balance),
    ]
}

pub fn transfer_messages(outcome: &TransferOutcome) -> Vec<String> {
    let mut lines = transferred_lines(&outcome.transfers);
    lines.push(format!("Your balance is {}", outcome.balance));
    if outcome.owed_total.is_positive() {
        lines.push(format!("Owed {} to {}", outcome.owed_total, outcome.target));
    }
    lines.extend(owed_from_lines(&outcome.owed_from));
    lines
}

fn transferred_lines(entries: &[OwedEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|(name, amount)| format!("Transferred {amount} to {name}"))
        .collect()
}

fn owed_to_lines(entries: &[OwedEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|(name, amount)| format!("Owed {amount} to {name}"))
        .collect()
}

fn owed_from_lines(entries: &[OwedEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|(name, amount)| format!("Owed {amount} from {name}"))
        .collect()
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

pub fn print_error(message: &str) {
    println!("\u{1b}[31m{message}\u{1b}[0m");
}

#[cfg(test)]
mod tests {
    use engine::MoneyCents;

    use super::*;

    #[test]
    fn login_lists_balance_then_debts() {
        let outcome = LoginOutcome {
            username: "Alice".to_string(),
            created: false,
            balance: MoneyCents::new(10000),
            owed_to: vec![("Bob".to_string(), MoneyCents::new(4000))],
            owed_from: vec![("Carol".to_string(), MoneyCents::new(500))],
        };
        assert_eq!(
            login_messages(&outcome),
            vec![
                "Hello, Alice!",
                "Your balance is $100.00",
                "Owed $5.00 from Carol",
                "Owed $40.00 to Bob",
            ]
        );
    }

    #[test]
    fn transfer_reports_residual_debt_to_target() {
        let outcome = TransferOutcome {
            target: "Bob".to_string(),
            transfers: vec![("Bob".to_string(), MoneyCents::new(3000))],
            balance: MoneyCents::ZERO,
            owed_total: MoneyCents::new(7000),
            owed_from: vec![],
        };
        assert_eq!(
            transfer_messages(&outcome),
            vec![
                "Transferred $30.00 to Bob",
                "Your balance is $0.00",
                "Owed $70.00 to Bob",
            ]
        );
    }

    #[test]
    fn withdraw_prompts_cash_collection() {
        let outcome = WithdrawOutcome {
            balance: MoneyCents::new(1500),
        };
        assert_eq!(
            withdraw_messages(&outcome),
            vec!["Collect cash", "Your balance is $15.00"]
        );
    }
}
