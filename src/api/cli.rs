use clap::{Parser, Subcommand};
use tracing::debug;

use super::calculators::{
    BorrowingArgs, Calculator, DepletionArgs, IncomeArgs, InvestmentArgs, InvestmentMode,
    InvestmentRequest, RetirementArgs, RoiArgs, StrategyArgs, run_calculator,
};
use super::server::{DEFAULT_PORT, run_http_server};
use crate::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "finmetic",
    about = "Time-value-of-money calculators: annuity solvers, retirement, income and leverage"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve every calculator as a JSON API
    Serve {
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Ending balance of a principal plus monthly contributions
    FutureValue(InvestmentArgs),
    /// Monthly contribution needed to reach --target-amount
    RequiredContribution(InvestmentArgs),
    /// Starting principal needed to reach --target-amount
    RequiredPrincipal(InvestmentArgs),
    /// Annual rate needed to reach --target-amount
    RequiredRate(InvestmentArgs),
    /// Years needed to reach --target-amount
    RequiredYears(InvestmentArgs),
    /// Nest egg and monthly investment needed to retire
    Retirement(RetirementArgs),
    /// Assets needed to live off dividends
    Income(IncomeArgs),
    /// Assets needed to live off withdrawals, and what is left
    Depletion(DepletionArgs),
    /// Borrowing against an appreciating asset instead of selling it
    Borrowing(BorrowingArgs),
    /// Dividends vs. depletion vs. buy-borrow-die
    Strategies(StrategyArgs),
    /// Return on investment with optional leverage
    Roi(RoiArgs),
}

pub async fn run(cli: Cli) -> Result<(), AppError> {
    let investment = |mode, args| InvestmentRequest { mode, args };
    match cli.command {
        Command::Serve { port } => run_http_server(port).await?,
        Command::FutureValue(args) => {
            print_json(&investment(InvestmentMode::FutureValue, args))?
        }
        Command::RequiredContribution(args) => {
            print_json(&investment(InvestmentMode::RequiredContribution, args))?
        }
        Command::RequiredPrincipal(args) => {
            print_json(&investment(InvestmentMode::RequiredPrincipal, args))?
        }
        Command::RequiredRate(args) => {
            print_json(&investment(InvestmentMode::RequiredRate, args))?
        }
        Command::RequiredYears(args) => {
            print_json(&investment(InvestmentMode::RequiredYears, args))?
        }
        Command::Retirement(args) => print_json(&args)?,
        Command::Income(args) => print_json(&args)?,
        Command::Depletion(args) => print_json(&args)?,
        Command::Borrowing(args) => print_json(&args)?,
        Command::Strategies(args) => print_json(&args)?,
        Command::Roi(args) => print_json(&args)?,
    }
    Ok(())
}

fn print_json<C: Calculator>(request: &C) -> Result<(), AppError> {
    let output = run_calculator(request)?;
    debug!(calculator = request.name(), "calculation complete");
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Command {
        let mut argv = vec!["finmetic"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("valid arguments").command
    }

    #[test]
    fn serve_defaults_to_port_8080() {
        match parse(&["serve"]) {
            Command::Serve { port } => assert_eq!(port, 8080),
            other => panic!("unexpected command {other:?}"),
        }
        match parse(&["serve", "--port", "3000"]) {
            Command::Serve { port } => assert_eq!(port, 3000),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn investment_flags_override_defaults() {
        match parse(&["future-value", "--principal", "1000", "--years", "2.5"]) {
            Command::FutureValue(args) => {
                assert_eq!(args.principal, 1_000.0);
                assert_eq!(args.years, 2.5);
                let defaults = InvestmentArgs::default();
                assert_eq!(args.monthly_contribution, defaults.monthly_contribution);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn flag_defaults_match_api_defaults() {
        match parse(&["retirement"]) {
            Command::Retirement(args) => assert_eq!(args, RetirementArgs::default()),
            other => panic!("unexpected command {other:?}"),
        }
        match parse(&["roi"]) {
            Command::Roi(args) => assert_eq!(args, RoiArgs::default()),
            other => panic!("unexpected command {other:?}"),
        }
        match parse(&["strategies"]) {
            Command::Strategies(args) => assert_eq!(args, StrategyArgs::default()),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn invalid_flag_value_surfaces_as_input_error() {
        let request = InvestmentRequest {
            mode: InvestmentMode::FutureValue,
            args: InvestmentArgs {
                years: 150.0,
                ..InvestmentArgs::default()
            },
        };
        let err = print_json(&request).expect_err("years above 100");
        assert!(matches!(err, AppError::Input(_)));
        assert!(err.to_string().contains("--years"));
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["finmetic", "mortgage"]).is_err());
    }
}
