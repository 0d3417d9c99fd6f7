// src/engine/mod.rs
//
//! Dispatch engine: resolve an operation, source its operands from the
//! shared stack or from an inline list, execute, persist on success.

pub mod ops;
pub mod stack;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::CalcError;
use crate::state::AppState;
use crate::store::{Category, RecordDraft};

pub use ops::Op;
pub use stack::OperandStack;

/// What a successful dispatch hands back: the computed value and the
/// identifier assigned by the primary store.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub result: f64,
    pub id: i64,
}

/// Stack-mode dispatch: consume `arity` operands from the top of the
/// shared stack.
///
/// The pop, the computation, and the push-back on compute failure run
/// under the stack mutex, so two dispatches can never interleave their
/// pop and restore steps. The persistence round trip happens after the
/// lock is released.
pub async fn operate(state: &AppState, raw_name: &str) -> Result<Outcome, CalcError> {
    let op = Op::resolve(raw_name).ok_or_else(|| CalcError::unknown_operation(raw_name))?;

    let (operands, result) = {
        let mut stack = state.stack.lock().await;
        let available = stack.len();
        let mut operands = stack
            .pop_top(op.arity())
            .ok_or_else(|| CalcError::insufficient_for(raw_name, op.arity(), available))?;
        // pop_top yields most-recent-first; the earlier-pushed operand is
        // the left argument, so flip into push order before computing.
        operands.reverse();
        match op.apply(&operands) {
            Ok(result) => (operands, result),
            Err(e) => {
                // Restore the exact pre-pop stack: the operands are already
                // back in push order.
                stack.push_all(&operands);
                return Err(e);
            }
        }
    };

    debug!("operate {} {:?} = {}", op.name(), operands, result);
    let id = state
        .history
        .persist(&RecordDraft {
            category: Category::Stack,
            operation: op.name().to_string(),
            operands,
            result,
        })
        .await?;
    Ok(Outcome { result, id })
}

/// Independent-mode dispatch: operands supplied inline, no stack state.
pub async fn calculate(
    state: &AppState,
    raw_name: &str,
    raw_arguments: Option<&Value>,
) -> Result<Outcome, CalcError> {
    let op = Op::resolve(raw_name).ok_or_else(|| CalcError::unknown_operation(raw_name))?;
    let operands = parse_operands(raw_arguments)?;
    if operands.len() != op.arity() {
        return Err(CalcError::InvalidArity {
            operation: raw_name.to_string(),
            required: op.arity(),
        });
    }

    let result = op.apply(&operands)?;
    debug!("calculate {} {:?} = {}", op.name(), operands, result);
    let id = state
        .history
        .persist(&RecordDraft {
            category: Category::Independent,
            operation: op.name().to_string(),
            operands,
            result,
        })
        .await?;
    Ok(Outcome { result, id })
}

/// Decode a request's operand collection. Anything other than a JSON
/// array of numbers is a shape error.
pub fn parse_operands(raw: Option<&Value>) -> Result<Vec<f64>, CalcError> {
    let list = raw
        .and_then(Value::as_array)
        .ok_or_else(CalcError::arguments_not_a_list)?;
    list.iter()
        .map(|v| v.as_f64().ok_or_else(CalcError::arguments_not_a_list))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_operands_accepts_numbers() {
        let raw = json!([1, 2.5, -3]);
        assert_eq!(parse_operands(Some(&raw)).unwrap(), vec![1.0, 2.5, -3.0]);
    }

    #[test]
    fn parse_operands_rejects_non_lists() {
        assert!(parse_operands(None).is_err());
        assert!(parse_operands(Some(&json!(5))).is_err());
        assert!(parse_operands(Some(&json!("1,2"))).is_err());
        assert!(parse_operands(Some(&json!([1, "two"]))).is_err());
    }
}
