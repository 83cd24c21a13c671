mod calculators;
pub mod cli;
mod server;

pub use calculators::{
    BorrowingArgs, BorrowingResponse, Calculator, DepletionArgs, DepletionResponse, IncomeArgs,
    IncomeResponse, InvestmentArgs, InvestmentMode, InvestmentRequest, InvestmentResponse,
    RetirementArgs, RetirementResponse, RoiArgs, RoiResponse, StrategyArgs, run_calculator,
};
pub use server::{DEFAULT_PORT, router, run_http_server};
