//! Built-in validator capabilities.
//!
//! Each function has the shape the [`Registry`](crate::registry::Registry)
//! stores: it receives the field context and arguments already coerced to
//! the declared [`ParamKind`](crate::registry::ParamKind)s.

use crate::error::BindError;
use crate::registry::{Arg, ValidationContext};
use crate::value::Value;

/// `Required()`: the value must differ from its kind's zero representation.
///
/// # Errors
///
/// Rejects zero values; booleans are unsupported.
pub fn required(ctx: &ValidationContext<'_>, _args: &[Arg]) -> Result<(), BindError> {
    if matches!(ctx.value(), Value::Bool(_)) {
        return Err(ctx.unsupported());
    }
    if ctx.value().is_zero() {
        return Err(ctx.reject(format!("missing required parameter '{}'", ctx.key())));
    }
    Ok(())
}

/// `Range(min, max)`: the numeric value must lie in `[min, max]`.
///
/// # Errors
///
/// Rejects out-of-range values; text and booleans are unsupported.
pub fn range(ctx: &ValidationContext<'_>, args: &[Arg]) -> Result<(), BindError> {
    let (Some(min), Some(max)) = (
        args.first().and_then(Arg::as_int),
        args.get(1).and_then(Arg::as_int),
    ) else {
        return Err(malformed_args(ctx, "Range", args));
    };

    let within = match ctx.value() {
        Value::Int(n) => (min..=max).contains(n),
        Value::Uint(n) => (i128::from(min)..=i128::from(max)).contains(&i128::from(*n)),
        Value::Float(n) => (min as f64..=max as f64).contains(n),
        Value::Text(_) | Value::Bool(_) => return Err(ctx.unsupported()),
    };

    if within {
        Ok(())
    } else {
        Err(ctx.reject(format!(
            "'{}' out of range[{min}, {max}]",
            ctx.value()
        )))
    }
}

/// `Choices(a, b, ...)`: the textual form of the value must equal one entry.
///
/// # Errors
///
/// Rejects values matching no entry.
pub fn choices(ctx: &ValidationContext<'_>, args: &[Arg]) -> Result<(), BindError> {
    let Some(list) = args.first().and_then(Arg::as_list) else {
        return Err(malformed_args(ctx, "Choices", args));
    };

    let text = ctx.value().to_string();
    if list.iter().any(|choice| *choice == text) {
        Ok(())
    } else {
        Err(ctx.reject(format!("'{text}' is not a valid choice")))
    }
}

fn malformed_args(ctx: &ValidationContext<'_>, name: &str, args: &[Arg]) -> BindError {
    BindError::InvalidArgument {
        key: ctx.key().to_owned(),
        name: name.to_owned(),
        arg: format!("{args:?}"),
        reason: "unexpected argument kinds".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn range_args(min: i64, max: i64) -> Vec<Arg> {
        vec![Arg::Int(min), Arg::Int(max)]
    }

    fn choice_args(items: &[&str]) -> Vec<Arg> {
        vec![Arg::List(items.iter().map(|s| (*s).to_owned()).collect())]
    }

    #[rstest]
    #[case(Value::Int(0))]
    #[case(Value::Uint(0))]
    #[case(Value::Float(0.0))]
    #[case(Value::Text(String::new()))]
    fn required_rejects_zero(#[case] value: Value) {
        let ctx = ValidationContext::new("name", &value);
        assert_eq!(
            required(&ctx, &[]).unwrap_err().to_string(),
            "name: missing required parameter 'name'"
        );
    }

    #[test]
    fn required_accepts_non_zero_and_rejects_bool() {
        let value = Value::Int(-1);
        assert_eq!(required(&ValidationContext::new("n", &value), &[]), Ok(()));

        let value = Value::Bool(true);
        assert_eq!(
            required(&ValidationContext::new("flag", &value), &[]),
            Err(BindError::UnsupportedKind {
                key: "flag".into(),
                kind: FieldKind::Bool,
            })
        );
    }

    #[rstest]
    #[case(Value::Int(1), true)]
    #[case(Value::Int(10), true)]
    #[case(Value::Int(0), false)]
    #[case(Value::Int(11), false)]
    #[case(Value::Uint(10), true)]
    #[case(Value::Uint(u64::MAX), false)]
    #[case(Value::Float(10.0), true)]
    #[case(Value::Float(10.5), false)]
    fn range_is_inclusive(#[case] value: Value, #[case] ok: bool) {
        let ctx = ValidationContext::new("n", &value);
        assert_eq!(range(&ctx, &range_args(1, 10)).is_ok(), ok);
    }

    #[test]
    fn range_message() {
        let value = Value::Int(11);
        let ctx = ValidationContext::new("age", &value);
        assert_eq!(
            range(&ctx, &range_args(1, 10)).unwrap_err().to_string(),
            "age: '11' out of range[1, 10]"
        );
    }

    #[test]
    fn range_unsupported_kinds() {
        let value = Value::Text("5".into());
        let err = range(&ValidationContext::new("n", &value), &range_args(1, 10)).unwrap_err();
        assert_eq!(err.to_string(), "n: 'string' is unsupported value type");

        let value = Value::Bool(false);
        let err = range(&ValidationContext::new("n", &value), &range_args(1, 10)).unwrap_err();
        assert_eq!(err.to_string(), "n: 'bool' is unsupported value type");
    }

    #[test]
    fn choices_match_textual_form() {
        let args = choice_args(&["A", "B", "C"]);

        let value = Value::Text("B".into());
        assert_eq!(choices(&ValidationContext::new("grade", &value), &args), Ok(()));

        let value = Value::Text("1".into());
        assert_eq!(
            choices(&ValidationContext::new("grade", &value), &args)
                .unwrap_err()
                .to_string(),
            "grade: '1' is not a valid choice"
        );

        let value = Value::Text(String::new());
        assert!(choices(&ValidationContext::new("grade", &value), &args).is_err());

        let value = Value::Int(2);
        assert_eq!(
            choices(&ValidationContext::new("n", &value), &choice_args(&["1", "2"])),
            Ok(())
        );
    }

    #[test]
    fn wrong_argument_kinds_are_reported() {
        let value = Value::Int(2);
        let ctx = ValidationContext::new("n", &value);
        assert_eq!(
            range(&ctx, &[Arg::Str("1".into())]).unwrap_err().code(),
            "BIND_INVALID_ARGUMENT"
        );
        assert_eq!(
            choices(&ctx, &[]).unwrap_err().code(),
            "BIND_INVALID_ARGUMENT"
        );
    }
}
