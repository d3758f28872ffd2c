//! quantly — rule-driven trading strategy backtester.
//!
//! Feed [`run_backtest`] a price series and a [`BacktestConfig`]; it
//! pre-computes the indicators the rules need, simulates fills bar by
//! bar, and returns a [`BacktestResult`] that [`PerformanceMetrics`]
//! can summarize.

pub mod config;
pub mod error;
pub mod indicator;
pub mod metrics;
pub mod ohlcv;
pub mod portfolio;
pub mod rule;
pub mod rule_eval;
pub mod simulator;
pub mod validation;

pub use config::{BacktestConfig, DateRange, ShareSizing};
pub use error::EngineError;
pub use metrics::PerformanceMetrics;
pub use ohlcv::PriceBar;
pub use portfolio::{BacktestResult, EquityPoint, Trade};
pub use rule::{MaType, RuleKind, StrategyRule, TradeAction};
pub use simulator::run_backtest;
