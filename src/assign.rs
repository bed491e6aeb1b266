//! `--assign` 引数の解析
//!
//! 書式: `RECEIPT:INDEX=NAME[,NAME...]`（INDEXはレシート内の0始まりの品目番号）

use crate::error::{PayCheckError, Result};
use paycheck_common::ItemKey;
use regex::Regex;

/// 1つの割り当て指定
#[derive(Debug, Clone, PartialEq)]
pub struct AssignSpec {
    pub key: ItemKey,
    pub names: Vec<String>,
}

pub fn parse_assign(spec: &str) -> Result<AssignSpec> {
    lazy_static::lazy_static! {
        static ref ASSIGN_RE: Regex = Regex::new(r"^\s*(-?\d+)\s*:\s*(\d+)\s*=\s*(.+)$").unwrap();
    }

    let caps = ASSIGN_RE
        .captures(spec)
        .ok_or_else(|| PayCheckError::InvalidAssignment(spec.to_string()))?;

    let receipt = caps[1]
        .parse()
        .map_err(|_| PayCheckError::InvalidAssignment(spec.to_string()))?;
    let index = caps[2]
        .parse()
        .map_err(|_| PayCheckError::InvalidAssignment(spec.to_string()))?;

    let names: Vec<String> = caps[3]
        .split(',')
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();

    if names.is_empty() {
        return Err(PayCheckError::InvalidAssignment(spec.to_string()));
    }

    Ok(AssignSpec { key: ItemKey::new(receipt, index), names })
}
