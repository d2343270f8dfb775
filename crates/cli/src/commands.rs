//! Parsing of the interactive commands.

use engine::MoneyCents;

pub const LOGIN_USAGE: &str = "Usage: login [name]";
pub const DEPOSIT_USAGE: &str = "Usage: deposit [amount]";
pub const WITHDRAW_USAGE: &str = "Usage: withdraw [amount]";
pub const TRANSFER_USAGE: &str = "Usage: transfer [target] [amount]";
pub const AMOUNT_NOT_A_NUMBER: &str = "Amount must be a number.";
pub const INVALID_COMMAND: &str =
    "Invalid command. Supported commands: [login, deposit, withdraw, transfer, logout, exit].";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Login { name: String },
    Logout,
    Deposit { amount: MoneyCents },
    Withdraw { amount: MoneyCents },
    Transfer { target: String, amount: MoneyCents },
    Exit,
}

impl Command {
    /// Parses one input line. Returns a user-displayable message on failure.
    pub fn parse(line: &str) -> Result<Command, String> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((keyword, args)) = words.split_first() else {
            return Err(INVALID_COMMAND.to_string());
        };

        match keyword.to_ascii_lowercase().as_str() {
            "login" => match args {
                [name] => Ok(Command::Login {
                    name: (*name).to_string(),
                }),
                _ => Err(LOGIN_USAGE.to_string()),
            },
            "logout" if args.is_empty() => Ok(Command::Logout),
            "deposit" => match args {
                [amount] => Ok(Command::Deposit {
                    amount: parse_amount(amount)?,
                }),
                _ => Err(DEPOSIT_USAGE.to_string()),
            },
            "withdraw" => match args {
                [amount] => Ok(Command::Withdraw {
                    amount: parse_amount(amount)?,
                }),
                _ => Err(WITHDRAW_USAGE.to_string()),
            },
            "transfer" => match args {
                [target, amount] => Ok(Command::Transfer {
                    target: (*target).to_string(),
                    amount: parse_amount(amount)?,
                }),
                _ => Err(TRANSFER_USAGE.to_string()),
            },
            "exit" if args.is_empty() => Ok(Command::Exit),
            _ => Err(INVALID_COMMAND.to_string()),
        }
    }
}

fn parse_amount(raw: &str) -> Result<MoneyCents, String> {
    raw.parse::<MoneyCents>()
        .map_err(|_| AMOUNT_NOT_A_NUMBER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!(
            Command::parse("login Alice").unwrap(),
            Command::Login {
                name: "Alice".to_string()
            }
        );
        assert_eq!(Command::parse("logout").unwrap(), Command::Logout);
        assert_eq!(
            Command::parse("deposit 10.50").unwrap(),
            Command::Deposit {
                amount: MoneyCents::new(1050)
            }
        );
        assert_eq!(
            Command::parse("withdraw 3").unwrap(),
            Command::Withdraw {
                amount: MoneyCents::new(300)
            }
        );
        assert_eq!(
            Command::parse("transfer Bob 7.25").unwrap(),
            Command::Transfer {
                target: "Bob".to_string(),
                amount: MoneyCents::new(725)
            }
        );
        assert_eq!(Command::parse("exit").unwrap(), Command::Exit);
    }

    #[test]
    fn keyword_is_case_insensitive() {
        assert_eq!(Command::parse("LOGIN Alice").unwrap(), Command::Login {
            name: "Alice".to_string()
        });
    }

    #[test]
    fn wrong_arity_yields_usage() {
        assert_eq!(Command::parse("login").unwrap_err(), LOGIN_USAGE);
        assert_eq!(Command::parse("deposit").unwrap_err(), DEPOSIT_USAGE);
        assert_eq!(Command::parse("withdraw 1 2").unwrap_err(), WITHDRAW_USAGE);
        assert_eq!(Command::parse("transfer Bob").unwrap_err(), TRANSFER_USAGE);
    }

    #[test]
    fn bad_amount_and_unknown_command() {
        assert_eq!(
            Command::parse("deposit ten").unwrap_err(),
            AMOUNT_NOT_A_NUMBER
        );
        assert_eq!(Command::parse("dance").unwrap_err(), INVALID_COMMAND);
        assert_eq!(Command::parse("   ").unwrap_err(), INVALID_COMMAND);
    }
}
