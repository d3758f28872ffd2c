//! Configuration validation.
//!
//! Runs before any bar is simulated, so a run either starts with a fully
//! usable configuration or fails with a structured error pointing at the
//! offending field or rule.

use crate::config::BacktestConfig;
use crate::error::EngineError;
use crate::rule::{RuleKind, StrategyRule};

pub fn validate_config(config: &BacktestConfig) -> Result<(), EngineError> {
    validate_starting_value(config)?;
    validate_risk_free_rate(config)?;
    validate_date_range(config)?;
    validate_rule_lists(config)?;
    for (index, rule) in config.sell_rules.iter().enumerate() {
        validate_rule(rule, index)?;
    }
    for (index, rule) in config.buy_rules.iter().enumerate() {
        validate_rule(rule, index)?;
    }
    Ok(())
}

fn validate_starting_value(config: &BacktestConfig) -> Result<(), EngineError> {
    if !(config.starting_value > 0.0 && config.starting_value.is_finite()) {
        return Err(EngineError::InvalidConfiguration {
            parameter: "starting_value".to_string(),
            reason: "starting_value must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_risk_free_rate(config: &BacktestConfig) -> Result<(), EngineError> {
    if config.risk_free_rate < 0.0 || config.risk_free_rate >= 1.0 {
        return Err(EngineError::InvalidConfiguration {
            parameter: "risk_free_rate".to_string(),
            reason: "risk_free_rate must be between 0 and 1".to_string(),
        });
    }
    Ok(())
}

fn validate_date_range(config: &BacktestConfig) -> Result<(), EngineError> {
    if let Some(range) = &config.date_range {
        if range.start > range.end {
            return Err(EngineError::InvalidConfiguration {
                parameter: "date_range".to_string(),
                reason: "start must not be after end".to_string(),
            });
        }
    }
    Ok(())
}

fn validate_rule_lists(config: &BacktestConfig) -> Result<(), EngineError> {
    if config.buy_rules.is_empty() && config.sell_rules.is_empty() {
        return Err(EngineError::InvalidConfiguration {
            parameter: "rules".to_string(),
            reason: "at least one buy or sell rule is required".to_string(),
        });
    }
    Ok(())
}

fn validate_rule(rule: &StrategyRule, index: usize) -> Result<(), EngineError> {
    let fail = |reason: String| EngineError::InvalidRule {
        index,
        action: rule.action,
        kind: rule.kind.to_string(),
        reason,
    };

    if !(rule.trade_percent > 0.0 && rule.trade_percent <= 1.0) {
        return Err(fail("trade_percent must be in (0, 1]".to_string()));
    }

    match &rule.kind {
        RuleKind::MaCross { period, .. } => validate_period(*period, "period").map_err(fail),
        RuleKind::RsiThreshold { period, threshold } => {
            validate_period(*period, "period").map_err(&fail)?;
            validate_percent_threshold(*threshold).map_err(fail)
        }
        RuleKind::MacdHistogramFlip { fast, slow, signal } => {
            validate_period(*fast, "fast").map_err(&fail)?;
            validate_period(*slow, "slow").map_err(&fail)?;
            validate_period(*signal, "signal").map_err(&fail)?;
            if fast >= slow {
                return Err(fail("fast period must be less than slow period".to_string()));
            }
            Ok(())
        }
        RuleKind::BollingerBand { period, std_dev } => {
            validate_period(*period, "period").map_err(&fail)?;
            if !(*std_dev > 0.0 && std_dev.is_finite()) {
                return Err(fail("std_dev must be positive".to_string()));
            }
            Ok(())
        }
        RuleKind::StochasticThreshold {
            k_period,
            d_period,
            threshold,
        } => {
            validate_period(*k_period, "k_period").map_err(&fail)?;
            validate_period(*d_period, "d_period").map_err(&fail)?;
            validate_percent_threshold(*threshold).map_err(fail)
        }
        RuleKind::AtrThreshold { period, threshold } => {
            validate_period(*period, "period").map_err(&fail)?;
            if !(*threshold > 0.0 && threshold.is_finite()) {
                return Err(fail("threshold must be positive".to_string()));
            }
            Ok(())
        }
        RuleKind::AdxThreshold { period, threshold } => {
            validate_period(*period, "period").map_err(&fail)?;
            validate_percent_threshold(*threshold).map_err(fail)
        }
        RuleKind::VwapCross | RuleKind::ObvSlopeFlip => Ok(()),
        RuleKind::SarFlip {
            af_start,
            af_increment,
            af_max,
        } => {
            if !(*af_start > 0.0 && af_start.is_finite()) {
                return Err(fail("af_start must be positive".to_string()));
            }
            if !(*af_increment > 0.0 && af_increment.is_finite()) {
                return Err(fail("af_increment must be positive".to_string()));
            }
            if !(*af_max >= *af_start && af_max.is_finite()) {
                return Err(fail("af_max must be at least af_start".to_string()));
            }
            Ok(())
        }
    }
}

fn validate_period(period: usize, name: &str) -> Result<(), String> {
    if period == 0 {
        return Err(format!("{name} must be at least 1"));
    }
    Ok(())
}

fn validate_percent_threshold(threshold: f64) -> Result<(), String> {
    if !(0.0..=100.0).contains(&threshold) {
        return Err("threshold must be between 0 and 100".to_string());
    }
    Ok(())
}
