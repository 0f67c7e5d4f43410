//! Conversion between wire text and scalar values.
//!
//! Parsing is lenient in the same ways for every numeric type: integers may
//! be written in hexadecimal (`0x7B`) or with an all-zero fraction
//! (`123.00`). Booleans accept `true`, `yes`, `on` and `1`; any other text is
//! `false`.

use std::borrow::Cow;

use crate::{ConvertError, EnumDescriptor, ResolvedType, Scalar, Shape, TypeDef, TypeRegistry, Value};

/// Convert `text` to a value of the scalar-like type `ty`.
pub fn parse_scalar(
    text: &str,
    ty: &ResolvedType,
    registry: &TypeRegistry,
) -> Result<Value, ConvertError> {
    match &ty.shape {
        Shape::Scalar(scalar) => parse_primitive(text, *scalar),
        Shape::Named(name) => match registry.lookup(name) {
            Some(TypeDef::Enum(desc)) => parse_enum(text, desc),
            Some(TypeDef::Custom { codec, .. }) => codec
                .parse(text)
                .map(|text| Value::Custom {
                    type_name: name.clone(),
                    text,
                })
                .ok_or_else(|| ConvertError::new(text, name.as_str())),
            _ => Err(ConvertError::new(text, ty.to_string())),
        },
        _ => Err(ConvertError::new(text, ty.to_string())),
    }
}

/// Text form of a scalar value; `None` for containers, objects and `null`.
///
/// Enumerations registered as ordinal produce their ordinal.
pub fn format_scalar<'a>(value: &'a Value, registry: &TypeRegistry) -> Option<Cow<'a, str>> {
    Some(match value {
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Int(i) => Cow::Owned(i.to_string()),
        Value::UInt(u) => Cow::Owned(u.to_string()),
        Value::Float(f) => Cow::Owned(f.to_string()),
        Value::Char(c) => Cow::Owned(c.to_string()),
        Value::Str(s) => Cow::Borrowed(s.as_str()),
        Value::Enum {
            type_name,
            name,
            ordinal,
        } => {
            if registry.is_ordinal_enum(type_name) {
                Cow::Owned(ordinal.to_string())
            } else {
                Cow::Borrowed(name.as_str())
            }
        }
        Value::Custom { text, .. } => Cow::Borrowed(text.as_str()),
        Value::Null | Value::Array(_) | Value::List(_) | Value::Map(_) | Value::Object(_) => {
            return None;
        }
    })
}

/// `true`, `yes`, `on` or `1`, ignoring ASCII case.
pub fn parse_bool(text: &str) -> bool {
    let text = text.trim();
    ["true", "yes", "on", "1"]
        .iter()
        .any(|word| text.eq_ignore_ascii_case(word))
}

/// Decimal, `0x` hexadecimal, or decimal with an all-zero fraction.
pub fn parse_integer(text: &str) -> Option<i128> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    if digits.is_empty() || digits.starts_with(['+', '-']) {
        return None;
    }
    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        i128::from_str_radix(hex, 16).ok()?
    } else if let Some((whole, fraction)) = digits.split_once('.') {
        if whole.is_empty() || !fraction.bytes().all(|b| b == b'0') {
            return None;
        }
        whole.parse::<i128>().ok()?
    } else {
        digits.parse::<i128>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Decimal or exponent notation, or any form [`parse_integer`] accepts.
pub fn parse_float(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .or_else(|| parse_integer(trimmed).map(|i| i as f64))
}

fn parse_primitive(text: &str, scalar: Scalar) -> Result<Value, ConvertError> {
    let invalid = || ConvertError::new(text, scalar.name());
    let signed = |min: i64, max: i64| {
        parse_integer(text)
            .filter(|i| (i128::from(min)..=i128::from(max)).contains(i))
            .and_then(|i| i64::try_from(i).ok())
            .map(Value::Int)
            .ok_or_else(invalid)
    };
    let unsigned = |max: u64| {
        parse_integer(text)
            .filter(|i| (0..=i128::from(max)).contains(i))
            .and_then(|i| u64::try_from(i).ok())
            .map(Value::UInt)
            .ok_or_else(invalid)
    };
    match scalar {
        Scalar::Bool => Ok(Value::Bool(parse_bool(text))),
        Scalar::I8 => signed(i64::from(i8::MIN), i64::from(i8::MAX)),
        Scalar::I16 => signed(i64::from(i16::MIN), i64::from(i16::MAX)),
        Scalar::I32 => signed(i64::from(i32::MIN), i64::from(i32::MAX)),
        Scalar::I64 => signed(i64::MIN, i64::MAX),
        Scalar::U8 => unsigned(u64::from(u8::MAX)),
        Scalar::U16 => unsigned(u64::from(u16::MAX)),
        Scalar::U32 => unsigned(u64::from(u32::MAX)),
        Scalar::U64 => unsigned(u64::MAX),
        Scalar::F32 => parse_float(text)
            .map(|f| Value::Float(f64::from(f as f32)))
            .ok_or_else(invalid),
        Scalar::F64 => parse_float(text).map(Value::Float).ok_or_else(invalid),
        Scalar::Char => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(invalid()),
            }
        }
        Scalar::String => Ok(Value::Str(text.to_string())),
    }
}

fn parse_enum(text: &str, desc: &EnumDescriptor) -> Result<Value, ConvertError> {
    let by_ordinal = || {
        parse_integer(text)
            .and_then(|i| usize::try_from(i).ok())
            .filter(|&i| i < desc.constants.len())
    };
    let ordinal = if desc.ordinal {
        by_ordinal().or_else(|| desc.position(text))
    } else {
        desc.position(text)
    };
    ordinal
        .map(|ordinal| Value::Enum {
            type_name: desc.name.clone(),
            name: desc.constants[ordinal].clone(),
            ordinal,
        })
        .ok_or_else(|| ConvertError::new(text, desc.name.as_str()))
}
